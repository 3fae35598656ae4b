//! Static reference ranges and the per-parameter evaluator.
//!
//! Each range is an ordered list of bands. The first band whose bound matches
//! the reading decides the status; a reading matching no band is normal.

use triage_core::{Finding, Parameter, RiskLevel, Sex};

use Bound::{AtLeast, Above, Below};
use Demographic::{Any, Female, Male};
use RiskLevel::{Critical, High, Low, Moderate};

const NORMAL_INTERPRETATION: &str = "Within normal range";

/// Demographic key of a reference range or rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Demographic {
    Any,
    Male,
    Female,
}

impl From<Sex> for Demographic {
    fn from(sex: Sex) -> Self {
        match sex {
            Sex::Male => Demographic::Male,
            Sex::Female => Demographic::Female,
            Sex::Other => Demographic::Any,
        }
    }
}

/// Pick the entry for `sex`, falling back to the `Any` entry.
pub(crate) fn select_for<T>(
    entries: impl Iterator<Item = T> + Clone,
    demographic_of: impl Fn(&T) -> Demographic,
    sex: Sex,
) -> Option<T> {
    let wanted = Demographic::from(sex);
    if wanted != Demographic::Any {
        if let Some(entry) = entries.clone().find(|entry| demographic_of(entry) == wanted) {
            return Some(entry);
        }
    }
    entries
        .into_iter()
        .find(|entry| demographic_of(entry) == Demographic::Any)
}

/// A measured value as seen by the evaluator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading {
    Single(f64),
    /// Blood pressure; at least one side is present.
    Pressure {
        systolic: Option<f64>,
        diastolic: Option<f64>,
    },
}

impl Reading {
    /// Value reported on the finding (systolic for blood pressure).
    pub fn value(&self) -> f64 {
        match *self {
            Reading::Single(value) => value,
            Reading::Pressure {
                systolic,
                diastolic,
            } => systolic.or(diastolic).unwrap_or_default(),
        }
    }
}

/// Predicate half of a band or rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    /// `value >= threshold`. Escalation thresholds are closed.
    AtLeast(f64),
    /// `value > limit`, for limits that are themselves inside the normal range.
    Above(f64),
    /// `value < limit`.
    Below(f64),
    EitherAtLeast { systolic: f64, diastolic: f64 },
    EitherBelow { systolic: f64, diastolic: f64 },
}

impl Bound {
    pub fn matches(&self, reading: Reading) -> bool {
        match (*self, reading) {
            (Bound::AtLeast(threshold), Reading::Single(value)) => value >= threshold,
            (Bound::Above(limit), Reading::Single(value)) => value > limit,
            (Bound::Below(limit), Reading::Single(value)) => value < limit,
            (
                Bound::EitherAtLeast {
                    systolic: sys_limit,
                    diastolic: dia_limit,
                },
                Reading::Pressure {
                    systolic,
                    diastolic,
                },
            ) => {
                systolic.is_some_and(|sys| sys >= sys_limit)
                    || diastolic.is_some_and(|dia| dia >= dia_limit)
            }
            (
                Bound::EitherBelow {
                    systolic: sys_limit,
                    diastolic: dia_limit,
                },
                Reading::Pressure {
                    systolic,
                    diastolic,
                },
            ) => {
                systolic.is_some_and(|sys| sys < sys_limit)
                    || diastolic.is_some_and(|dia| dia < dia_limit)
            }
            _ => false,
        }
    }
}

#[derive(Debug)]
pub struct Band {
    pub bound: Bound,
    pub status: RiskLevel,
    pub interpretation: &'static str,
    pub recommendations: &'static [&'static str],
}

const fn band(
    bound: Bound,
    status: RiskLevel,
    interpretation: &'static str,
    recommendations: &'static [&'static str],
) -> Band {
    Band {
        bound,
        status,
        interpretation,
        recommendations,
    }
}

#[derive(Debug)]
pub struct ReferenceRange {
    pub parameter: Parameter,
    pub demographic: Demographic,
    pub normal_range: &'static str,
    pub bands: &'static [Band],
}

impl ReferenceRange {
    /// First matching band, if any.
    pub fn classify(&self, reading: Reading) -> Option<&'static Band> {
        self.bands.iter().find(|band| band.bound.matches(reading))
    }
}

/// Range for `parameter` in the given demographic context.
///
/// A sex-specific entry wins over the `Any` entry. `None` means the range is
/// undefined for that context, which callers treat as "no finding".
pub fn lookup(parameter: Parameter, sex: Sex) -> Option<&'static ReferenceRange> {
    select_for(
        REFERENCE_RANGES
            .iter()
            .filter(move |range| range.parameter == parameter),
        |range| range.demographic,
        sex,
    )
}

/// Evaluate one reading. Always yields a finding when a range is defined.
pub fn evaluate(parameter: Parameter, reading: Reading, sex: Sex) -> Option<Finding> {
    let range = lookup(parameter, sex)?;
    let (status, interpretation, recommendations) = match range.classify(reading) {
        Some(band) => (band.status, band.interpretation, band.recommendations),
        None => (RiskLevel::Normal, NORMAL_INTERPRETATION, &[][..]),
    };

    Some(Finding {
        category: parameter.category(),
        parameter,
        value: reading.value(),
        normal_range: range.normal_range.to_string(),
        status,
        interpretation: interpretation.to_string(),
        recommendations: recommendations.iter().map(|s| s.to_string()).collect(),
    })
}

const FEVER_ADVICE: &[&str] = &[
    "Monitor temperature regularly",
    "Stay hydrated",
    "Consider antipyretics if >38.5°C",
];
const HEART_RATE_ADVICE: &[&str] = &[
    "Monitor heart rate",
    "ECG recommended",
    "Check for underlying causes",
];
const OXYGEN_ADVICE: &[&str] = &[
    "Oxygen therapy may be needed",
    "Chest X-ray recommended",
    "Monitor breathing",
];
const OBESITY_ADVICE: &[&str] = &[
    "Weight loss program",
    "Dietitian consultation",
    "Exercise regimen",
    "Screen for metabolic syndrome",
];
const ANEMIA_ADVICE: &[&str] = &[
    "Iron-rich diet",
    "Iron supplements",
    "Check for bleeding sources",
];
const SEVERE_ANEMIA_ADVICE: &[&str] = &[
    "Urgent hematology evaluation",
    "Check for bleeding sources",
    "Iron studies",
];
const POLYCYTHEMIA_ADVICE: &[&str] = &[
    "Assess hydration status",
    "Repeat complete blood count",
    "Hematology consultation if persistent",
];
const LEUKOCYTOSIS_ADVICE: &[&str] = &[
    "Identify infection source",
    "Blood culture if fever present",
    "Monitor closely",
];
const LOW_RBC_ADVICE: &[&str] = &["Correlate with hemoglobin", "Iron studies"];
const HIGH_RBC_ADVICE: &[&str] = &["Assess hydration status", "Repeat complete blood count"];
const GLUCOSE_ADVICE: &[&str] = &[
    "HbA1c test recommended",
    "Lifestyle modifications",
    "Consult endocrinologist",
];
const HYPOGLYCEMIA_ADVICE: &[&str] = &[
    "Take fast-acting carbohydrates",
    "Review diabetes medications",
    "Recheck glucose in 15 minutes",
];
const HBA1C_ADVICE: &[&str] = &[
    "Blood sugar monitoring",
    "Dietary changes",
    "Regular exercise",
];
const CHOLESTEROL_ADVICE: &[&str] = &[
    "Low-fat diet",
    "Regular exercise",
    "Statin therapy consideration",
];
const LDL_ADVICE: &[&str] = &[
    "Reduce saturated fats",
    "Increase fiber intake",
    "Consider medication",
];
const HDL_ADVICE: &[&str] = &[
    "Increase physical activity",
    "Omega-3 fatty acids",
    "Quit smoking if applicable",
];
const CREATININE_ADVICE: &[&str] = &[
    "Kidney function tests",
    "Monitor hydration",
    "Nephrology consultation",
];
const URIC_ACID_ADVICE: &[&str] = &[
    "Limit purine-rich foods",
    "Stay hydrated",
    "Limit alcohol",
];
const AST_ADVICE: &[&str] = &[
    "Liver ultrasound",
    "Avoid alcohol",
    "Hepatology consultation",
];
const ALT_ADVICE: &[&str] = &[
    "Repeat liver function tests",
    "Viral hepatitis screening",
    "Avoid hepatotoxic drugs",
];
const HYPOTHYROID_ADVICE: &[&str] = &[
    "Thyroid hormone replacement",
    "Repeat TSH in 6-8 weeks",
    "Monitor symptoms",
];
const HYPERTHYROID_ADVICE: &[&str] = &[
    "Thyroid hormone levels (T3, T4)",
    "Endocrinology referral",
    "Thyroid ultrasound",
];
const HIGH_THYROID_HORMONE_ADVICE: &[&str] = &["Correlate with TSH", "Endocrinology referral"];
const LOW_THYROID_HORMONE_ADVICE: &[&str] = &["Correlate with TSH", "Repeat thyroid panel"];
const VITAMIN_D_ADVICE: &[&str] = &[
    "Vitamin D supplementation",
    "Sunlight exposure",
    "Calcium intake",
];

/// Reference table, ordered by category.
pub static REFERENCE_RANGES: &[ReferenceRange] = &[
    // Vital signs
    ReferenceRange {
        parameter: Parameter::Temperature,
        demographic: Any,
        normal_range: "36.5-37.5°C",
        bands: &[
            band(
                AtLeast(39.0),
                High,
                "High fever - possible infection or inflammatory condition",
                &[
                    "Seek medical evaluation for high fever",
                    "Stay hydrated",
                    "Consider antipyretics",
                ],
            ),
            band(
                AtLeast(38.0),
                Moderate,
                "Fever detected - possible infection or inflammatory condition",
                FEVER_ADVICE,
            ),
            band(
                Below(35.0),
                High,
                "Hypothermia - core temperature below safe range",
                &[
                    "Gradual rewarming",
                    "Seek urgent medical evaluation",
                    "Monitor mental status",
                ],
            ),
        ],
    },
    ReferenceRange {
        parameter: Parameter::BloodPressure,
        demographic: Any,
        normal_range: "90-120/60-80 mmHg",
        bands: &[
            band(
                Bound::EitherAtLeast {
                    systolic: 180.0,
                    diastolic: 120.0,
                },
                Critical,
                "Hypertensive Crisis - immediate medical attention required",
                &[
                    "Seek emergency care immediately",
                    "May need hospitalization",
                    "Risk of stroke/heart attack",
                ],
            ),
            band(
                Bound::EitherAtLeast {
                    systolic: 140.0,
                    diastolic: 90.0,
                },
                High,
                "Hypertension (High Blood Pressure) - Stage 2",
                &[
                    "Antihypertensive medication needed",
                    "Low sodium diet",
                    "Regular monitoring",
                ],
            ),
            band(
                Bound::EitherAtLeast {
                    systolic: 130.0,
                    diastolic: 80.0,
                },
                Moderate,
                "Hypertension (High Blood Pressure) - Stage 1",
                &[
                    "Lifestyle modifications",
                    "Monitor regularly",
                    "Consider medication",
                ],
            ),
            band(
                Bound::EitherBelow {
                    systolic: 90.0,
                    diastolic: 60.0,
                },
                Moderate,
                "Hypotension (Low Blood Pressure)",
                &[
                    "Increase fluid intake",
                    "Avoid sudden position changes",
                    "Monitor symptoms",
                ],
            ),
        ],
    },
    ReferenceRange {
        parameter: Parameter::HeartRate,
        demographic: Any,
        normal_range: "60-100 bpm",
        bands: &[
            band(Above(110.0), High, "Tachycardia detected", HEART_RATE_ADVICE),
            band(Above(100.0), Moderate, "Tachycardia detected", HEART_RATE_ADVICE),
            band(Below(50.0), High, "Bradycardia detected", HEART_RATE_ADVICE),
            band(Below(60.0), Moderate, "Bradycardia detected", HEART_RATE_ADVICE),
        ],
    },
    ReferenceRange {
        parameter: Parameter::RespiratoryRate,
        demographic: Any,
        normal_range: "12-20 breaths/min",
        bands: &[
            band(
                AtLeast(30.0),
                High,
                "Severe tachypnea - respiratory distress possible",
                &[
                    "Assess airway and breathing",
                    "Pulse oximetry",
                    "Chest X-ray recommended",
                ],
            ),
            band(
                Above(20.0),
                Moderate,
                "Tachypnea (rapid breathing)",
                &[
                    "Monitor breathing",
                    "Check for fever or infection",
                    "Pulse oximetry",
                ],
            ),
            band(
                Below(8.0),
                High,
                "Severe bradypnea - risk of hypoventilation",
                &[
                    "Seek urgent medical evaluation",
                    "Review sedating medications",
                    "Monitor oxygen levels",
                ],
            ),
            band(
                Below(12.0),
                Moderate,
                "Bradypnea (slow breathing)",
                &["Monitor breathing", "Review sedating medications"],
            ),
        ],
    },
    ReferenceRange {
        parameter: Parameter::OxygenSaturation,
        demographic: Any,
        normal_range: "95-100%",
        bands: &[
            band(
                Below(90.0),
                Critical,
                "Severe hypoxemia - urgent respiratory assessment required",
                OXYGEN_ADVICE,
            ),
            band(
                Below(95.0),
                High,
                "Low oxygen levels - possible respiratory issue",
                OXYGEN_ADVICE,
            ),
        ],
    },
    ReferenceRange {
        parameter: Parameter::Bmi,
        demographic: Any,
        normal_range: "18.5-24.9",
        bands: &[
            band(AtLeast(35.0), High, "Obesity (Class II or higher)", OBESITY_ADVICE),
            band(AtLeast(30.0), Moderate, "Obesity (Class I)", OBESITY_ADVICE),
            band(
                AtLeast(25.0),
                Low,
                "Overweight",
                &[
                    "Balanced diet",
                    "Regular exercise",
                    "Weight management program",
                ],
            ),
            band(
                Below(18.5),
                Moderate,
                "Underweight",
                &[
                    "Increase caloric intake",
                    "Nutritionist consultation",
                    "Rule out underlying conditions",
                ],
            ),
        ],
    },
    // Complete blood count
    ReferenceRange {
        parameter: Parameter::Hemoglobin,
        demographic: Male,
        normal_range: "13.5-17.5 g/dL (men)",
        bands: &[
            band(Below(10.0), High, "Severe anemia detected", SEVERE_ANEMIA_ADVICE),
            band(Below(13.5), Moderate, "Anemia detected", ANEMIA_ADVICE),
            band(
                Above(17.5),
                Moderate,
                "Elevated hemoglobin - possible polycythemia or dehydration",
                POLYCYTHEMIA_ADVICE,
            ),
        ],
    },
    ReferenceRange {
        parameter: Parameter::Hemoglobin,
        demographic: Female,
        normal_range: "12.0-15.5 g/dL (women)",
        bands: &[
            band(Below(10.0), High, "Severe anemia detected", SEVERE_ANEMIA_ADVICE),
            band(Below(12.0), Moderate, "Anemia detected", ANEMIA_ADVICE),
            band(
                Above(15.5),
                Moderate,
                "Elevated hemoglobin - possible polycythemia or dehydration",
                POLYCYTHEMIA_ADVICE,
            ),
        ],
    },
    ReferenceRange {
        parameter: Parameter::WbcCount,
        demographic: Any,
        normal_range: "4,000-11,000 cells/μL",
        bands: &[
            band(
                AtLeast(15_000.0),
                High,
                "Marked leukocytosis - likely infection or inflammation",
                LEUKOCYTOSIS_ADVICE,
            ),
            band(
                Above(11_000.0),
                Moderate,
                "Leukocytosis - possible infection or inflammation",
                LEUKOCYTOSIS_ADVICE,
            ),
            band(
                Below(4_000.0),
                Moderate,
                "Leukopenia - reduced white blood cells",
                &[
                    "Check for bone marrow issues",
                    "Review medications",
                    "Hematology consultation",
                ],
            ),
        ],
    },
    ReferenceRange {
        parameter: Parameter::PlateletCount,
        demographic: Any,
        normal_range: "150,000-450,000 cells/μL",
        bands: &[
            band(
                Below(50_000.0),
                High,
                "Severe thrombocytopenia - bleeding risk",
                &[
                    "Urgent hematology consultation",
                    "Avoid antiplatelet drugs",
                    "Monitor for bleeding",
                ],
            ),
            band(
                Below(150_000.0),
                Moderate,
                "Thrombocytopenia - low platelet count",
                &[
                    "Repeat platelet count",
                    "Review medications",
                    "Monitor for bruising",
                ],
            ),
            band(
                Above(450_000.0),
                Moderate,
                "Thrombocytosis - elevated platelet count",
                &[
                    "Repeat platelet count",
                    "Check for inflammation or iron deficiency",
                ],
            ),
        ],
    },
    ReferenceRange {
        parameter: Parameter::RbcCount,
        demographic: Male,
        normal_range: "4.7-6.1 million cells/μL (men)",
        bands: &[
            band(Below(4.7), Low, "Low red blood cell count", LOW_RBC_ADVICE),
            band(Above(6.1), Low, "High red blood cell count", HIGH_RBC_ADVICE),
        ],
    },
    ReferenceRange {
        parameter: Parameter::RbcCount,
        demographic: Female,
        normal_range: "4.2-5.4 million cells/μL (women)",
        bands: &[
            band(Below(4.2), Low, "Low red blood cell count", LOW_RBC_ADVICE),
            band(Above(5.4), Low, "High red blood cell count", HIGH_RBC_ADVICE),
        ],
    },
    // Blood sugar
    ReferenceRange {
        parameter: Parameter::FastingGlucose,
        demographic: Any,
        normal_range: "70-99 mg/dL",
        bands: &[
            band(AtLeast(126.0), High, "Diabetes Mellitus", GLUCOSE_ADVICE),
            band(
                AtLeast(100.0),
                Moderate,
                "Prediabetes (Impaired Fasting Glucose)",
                GLUCOSE_ADVICE,
            ),
            band(Below(70.0), Moderate, "Hypoglycemia", HYPOGLYCEMIA_ADVICE),
        ],
    },
    ReferenceRange {
        parameter: Parameter::RandomGlucose,
        demographic: Any,
        normal_range: "<140 mg/dL",
        bands: &[
            band(
                AtLeast(200.0),
                High,
                "Random glucose in diabetic range",
                &[
                    "Fasting glucose and HbA1c testing",
                    "Consult endocrinologist",
                    "Lifestyle modifications",
                ],
            ),
            band(
                AtLeast(140.0),
                Moderate,
                "Elevated random glucose",
                &["Fasting glucose test", "Reduce refined carbohydrates"],
            ),
            band(Below(70.0), Moderate, "Hypoglycemia", HYPOGLYCEMIA_ADVICE),
        ],
    },
    ReferenceRange {
        parameter: Parameter::Hba1c,
        demographic: Any,
        normal_range: "<5.7%",
        bands: &[
            band(AtLeast(6.5), High, "Diabetes Mellitus", HBA1C_ADVICE),
            band(AtLeast(5.7), Moderate, "Prediabetes", HBA1C_ADVICE),
        ],
    },
    // Lipid profile
    ReferenceRange {
        parameter: Parameter::TotalCholesterol,
        demographic: Any,
        normal_range: "<200 mg/dL",
        bands: &[
            band(
                AtLeast(240.0),
                High,
                "Hypercholesterolemia - increased cardiovascular risk",
                CHOLESTEROL_ADVICE,
            ),
            band(
                AtLeast(200.0),
                Moderate,
                "Borderline high cholesterol - increased cardiovascular risk",
                CHOLESTEROL_ADVICE,
            ),
        ],
    },
    ReferenceRange {
        parameter: Parameter::LdlCholesterol,
        demographic: Any,
        normal_range: "<130 mg/dL",
        bands: &[
            band(AtLeast(160.0), High, "Elevated 'bad' cholesterol", LDL_ADVICE),
            band(
                AtLeast(130.0),
                Moderate,
                "Borderline high 'bad' cholesterol",
                LDL_ADVICE,
            ),
        ],
    },
    ReferenceRange {
        parameter: Parameter::HdlCholesterol,
        demographic: Any,
        normal_range: ">40 mg/dL",
        bands: &[band(
            Below(40.0),
            Moderate,
            "Low 'good' cholesterol - reduced cardiovascular protection",
            HDL_ADVICE,
        )],
    },
    ReferenceRange {
        parameter: Parameter::HdlCholesterol,
        demographic: Female,
        normal_range: ">50 mg/dL (women)",
        bands: &[band(
            Below(50.0),
            Moderate,
            "Low 'good' cholesterol - reduced cardiovascular protection",
            HDL_ADVICE,
        )],
    },
    ReferenceRange {
        parameter: Parameter::Triglycerides,
        demographic: Any,
        normal_range: "<150 mg/dL",
        bands: &[
            band(
                AtLeast(500.0),
                High,
                "Very high triglycerides - pancreatitis risk",
                &[
                    "Low-fat, low-sugar diet",
                    "Avoid alcohol",
                    "Consider medication",
                ],
            ),
            band(
                AtLeast(150.0),
                Moderate,
                "Elevated triglycerides",
                &[
                    "Reduce sugar and refined carbohydrates",
                    "Regular exercise",
                    "Limit alcohol",
                ],
            ),
        ],
    },
    // Kidney function
    ReferenceRange {
        parameter: Parameter::Creatinine,
        demographic: Male,
        normal_range: "0.7-1.3 mg/dL (men)",
        bands: &[
            band(
                AtLeast(2.0),
                High,
                "Significant kidney dysfunction",
                &[
                    "Nephrology consultation",
                    "Kidney function tests",
                    "Monitor hydration",
                ],
            ),
            band(Above(1.3), Moderate, "Possible kidney dysfunction", CREATININE_ADVICE),
        ],
    },
    ReferenceRange {
        parameter: Parameter::Creatinine,
        demographic: Female,
        normal_range: "0.6-1.1 mg/dL (women)",
        bands: &[
            band(
                AtLeast(2.0),
                High,
                "Significant kidney dysfunction",
                &[
                    "Nephrology consultation",
                    "Kidney function tests",
                    "Monitor hydration",
                ],
            ),
            band(Above(1.1), Moderate, "Possible kidney dysfunction", CREATININE_ADVICE),
        ],
    },
    ReferenceRange {
        parameter: Parameter::Bun,
        demographic: Any,
        normal_range: "7-20 mg/dL",
        bands: &[
            band(
                AtLeast(50.0),
                High,
                "Markedly elevated BUN - possible renal impairment",
                &[
                    "Kidney function tests",
                    "Assess hydration",
                    "Nephrology consultation",
                ],
            ),
            band(
                Above(20.0),
                Moderate,
                "Elevated BUN - dehydration or reduced kidney function",
                &["Increase fluid intake", "Repeat kidney function tests"],
            ),
        ],
    },
    ReferenceRange {
        parameter: Parameter::UricAcid,
        demographic: Male,
        normal_range: "3.4-7.0 mg/dL (men)",
        bands: &[band(
            Above(7.0),
            Moderate,
            "Hyperuricemia - gout risk",
            URIC_ACID_ADVICE,
        )],
    },
    ReferenceRange {
        parameter: Parameter::UricAcid,
        demographic: Female,
        normal_range: "2.4-6.0 mg/dL (women)",
        bands: &[band(
            Above(6.0),
            Moderate,
            "Hyperuricemia - gout risk",
            URIC_ACID_ADVICE,
        )],
    },
    // Liver function
    ReferenceRange {
        parameter: Parameter::SgotAst,
        demographic: Any,
        normal_range: "10-40 U/L",
        bands: &[
            band(AtLeast(100.0), High, "Markedly elevated liver enzymes", AST_ADVICE),
            band(Above(40.0), Moderate, "Elevated liver enzymes", AST_ADVICE),
        ],
    },
    ReferenceRange {
        parameter: Parameter::SgptAlt,
        demographic: Any,
        normal_range: "7-41 U/L",
        bands: &[
            band(
                AtLeast(100.0),
                High,
                "Significant liver stress or damage",
                ALT_ADVICE,
            ),
            band(Above(41.0), Moderate, "Liver stress or damage", ALT_ADVICE),
        ],
    },
    ReferenceRange {
        parameter: Parameter::BilirubinTotal,
        demographic: Any,
        normal_range: "0.1-1.2 mg/dL",
        bands: &[
            band(
                AtLeast(3.0),
                High,
                "Marked hyperbilirubinemia - jaundice likely",
                &[
                    "Urgent liver evaluation",
                    "Liver ultrasound",
                    "Viral hepatitis screening",
                ],
            ),
            band(
                Above(1.2),
                Moderate,
                "Elevated bilirubin",
                &["Repeat liver function tests", "Liver ultrasound"],
            ),
        ],
    },
    // Thyroid
    ReferenceRange {
        parameter: Parameter::Tsh,
        demographic: Any,
        normal_range: "0.4-4.0 mIU/L",
        bands: &[
            band(
                AtLeast(10.0),
                High,
                "Hypothyroidism (underactive thyroid)",
                HYPOTHYROID_ADVICE,
            ),
            band(
                Above(4.0),
                Moderate,
                "Hypothyroidism (underactive thyroid)",
                HYPOTHYROID_ADVICE,
            ),
            band(
                Below(0.4),
                Moderate,
                "Hyperthyroidism (overactive thyroid)",
                HYPERTHYROID_ADVICE,
            ),
        ],
    },
    ReferenceRange {
        parameter: Parameter::T3,
        demographic: Any,
        normal_range: "80-200 ng/dL",
        bands: &[
            band(Above(200.0), Moderate, "Elevated T3", HIGH_THYROID_HORMONE_ADVICE),
            band(Below(80.0), Moderate, "Low T3", LOW_THYROID_HORMONE_ADVICE),
        ],
    },
    ReferenceRange {
        parameter: Parameter::T4,
        demographic: Any,
        normal_range: "4.5-12.0 μg/dL",
        bands: &[
            band(Above(12.0), Moderate, "Elevated T4", HIGH_THYROID_HORMONE_ADVICE),
            band(Below(4.5), Moderate, "Low T4", LOW_THYROID_HORMONE_ADVICE),
        ],
    },
    // Electrolytes
    ReferenceRange {
        parameter: Parameter::Sodium,
        demographic: Any,
        normal_range: "135-145 mEq/L",
        bands: &[
            band(
                Below(125.0),
                High,
                "Severe hyponatremia",
                &[
                    "Urgent electrolyte correction",
                    "Review fluid intake and medications",
                    "Neurological monitoring",
                ],
            ),
            band(
                Below(135.0),
                Moderate,
                "Hyponatremia",
                &[
                    "Review fluid intake",
                    "Review diuretics",
                    "Repeat electrolytes",
                ],
            ),
            band(
                AtLeast(155.0),
                High,
                "Severe hypernatremia",
                &["Urgent fluid replacement", "Monitor mental status"],
            ),
            band(
                Above(145.0),
                Moderate,
                "Hypernatremia",
                &["Increase water intake", "Repeat electrolytes"],
            ),
        ],
    },
    ReferenceRange {
        parameter: Parameter::Potassium,
        demographic: Any,
        normal_range: "3.5-5.0 mEq/L",
        bands: &[
            band(
                Below(2.5),
                Critical,
                "Severe hypokalemia - arrhythmia risk",
                &[
                    "Emergency potassium replacement",
                    "Continuous ECG monitoring",
                ],
            ),
            band(
                Below(3.5),
                Moderate,
                "Hypokalemia",
                &[
                    "Potassium-rich diet",
                    "Review diuretics",
                    "Repeat electrolytes",
                ],
            ),
            band(
                AtLeast(6.5),
                Critical,
                "Severe hyperkalemia - arrhythmia risk",
                &["Emergency treatment required", "Continuous ECG monitoring"],
            ),
            band(
                Above(5.0),
                Moderate,
                "Hyperkalemia",
                &[
                    "Review medications (ACE inhibitors, potassium-sparing diuretics)",
                    "Repeat electrolytes",
                    "Low-potassium diet",
                ],
            ),
        ],
    },
    // Vitamins
    ReferenceRange {
        parameter: Parameter::VitaminD,
        demographic: Any,
        normal_range: "20-50 ng/mL",
        bands: &[
            band(
                Below(12.0),
                Moderate,
                "Severe vitamin D deficiency",
                VITAMIN_D_ADVICE,
            ),
            band(Below(20.0), Low, "Vitamin D deficiency", VITAMIN_D_ADVICE),
        ],
    },
    ReferenceRange {
        parameter: Parameter::VitaminB12,
        demographic: Any,
        normal_range: "200-900 pg/mL",
        bands: &[band(
            Below(200.0),
            Moderate,
            "Vitamin B12 deficiency",
            &[
                "B12 supplementation (oral or injections)",
                "Check for pernicious anemia",
                "Dietary assessment",
            ],
        )],
    },
];
