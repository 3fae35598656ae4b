//! Risk aggregation and report composition.

use triage_core::{
    Category, Condition, ConditionInference, Finding, PatientRecord, RiskLevel, TriageConfig,
};

const BASELINE_ADVICE: [&str; 3] = [
    "Regular health checkup every 6 months",
    "Regular follow-up with primary care physician",
    "Maintain hydration (8-10 glasses of water daily)",
];

const DISCLAIMER: &str = "This is an automated preliminary analysis. Please consult with a \
healthcare professional for proper diagnosis and treatment.";

/// Composer output, minus the summary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recommendations {
    pub immediate_actions: Vec<String>,
    pub follow_up_tests: Vec<String>,
    pub general_recommendations: Vec<String>,
}

/// Highest severity across findings and conditions; `Normal` when both are empty.
pub fn overall_risk(findings: &[Finding], conditions: &[ConditionInference]) -> RiskLevel {
    findings
        .iter()
        .map(|finding| finding.status)
        .chain(conditions.iter().map(|inference| inference.risk))
        .max()
        .unwrap_or_default()
}

pub fn compose(
    record: &PatientRecord,
    findings: &[Finding],
    conditions: &[ConditionInference],
    overall: RiskLevel,
    config: &TriageConfig,
) -> Recommendations {
    Recommendations {
        immediate_actions: immediate_actions(findings, overall),
        follow_up_tests: follow_up_tests(conditions),
        general_recommendations: general_recommendations(record, conditions, config),
    }
}

fn immediate_actions(findings: &[Finding], overall: RiskLevel) -> Vec<String> {
    if overall < RiskLevel::High {
        return Vec::new();
    }

    [RiskLevel::Critical, RiskLevel::High]
        .into_iter()
        .flat_map(|status| {
            findings
                .iter()
                .filter(move |finding| finding.status == status)
                .map(move |finding| {
                    let action = finding
                        .recommendations
                        .first()
                        .unwrap_or(&finding.interpretation);
                    format!(
                        "[{}] {}: {}",
                        status.as_str().to_uppercase(),
                        finding.parameter,
                        action
                    )
                })
        })
        .collect()
}

fn follow_up_tests(conditions: &[ConditionInference]) -> Vec<String> {
    let mut tests = Vec::new();
    for inference in conditions {
        for test in tests_for(inference.condition) {
            push_unique(&mut tests, test);
        }
    }
    tests
}

fn general_recommendations(
    record: &PatientRecord,
    conditions: &[ConditionInference],
    config: &TriageConfig,
) -> Vec<String> {
    let mut advice = Vec::new();
    for inference in conditions {
        for line in advice_for(inference.condition) {
            push_unique(&mut advice, line);
        }
    }

    if record.age > config.screening_age {
        push_unique(&mut advice, "Annual comprehensive health screening recommended");
    }
    if record
        .bmi()
        .is_some_and(|bmi| bmi >= config.weight_management_bmi)
    {
        push_unique(&mut advice, "Weight management program with diet and exercise");
    }
    if let Some(history) = &record.medical_history {
        if history.smoking {
            push_unique(&mut advice, "Smoking cessation program strongly recommended");
        }
        if history.alcohol_consumption {
            push_unique(&mut advice, "Limit alcohol consumption");
        }
    }

    for line in BASELINE_ADVICE {
        push_unique(&mut advice, line);
    }
    advice
}

fn tests_for(condition: Condition) -> &'static [&'static str] {
    match condition {
        Condition::DiabetesMellitus => &[
            "HbA1c test (if not done)",
            "Oral Glucose Tolerance Test",
            "Urine Albumin-to-Creatinine Ratio",
            "Fasting Lipid Profile",
        ],
        Condition::Prediabetes => &["HbA1c test (if not done)", "Oral Glucose Tolerance Test"],
        Condition::HypertensiveCrisis => &[
            "ECG (Electrocardiogram)",
            "Cardiac Enzyme Tests",
            "Echocardiogram",
            "Basic Metabolic Panel",
        ],
        Condition::HypertensionStage2 => &[
            "ECG (Electrocardiogram)",
            "Basic Metabolic Panel",
            "Urinalysis",
        ],
        Condition::HypertensionStage1 => &["Basic Metabolic Panel", "Fasting Lipid Profile"],
        Condition::Obesity => &[
            "Fasting Lipid Profile",
            "HbA1c test (if not done)",
            "Complete Liver Function Panel",
        ],
        Condition::Anemia => &[
            "Iron Studies (Serum Iron, Ferritin, TIBC)",
            "Peripheral Blood Smear",
            "Reticulocyte Count",
        ],
        Condition::Infection => &["Blood Culture", "C-Reactive Protein (CRP)", "Procalcitonin"],
        Condition::Hyperlipidemia => &["Fasting Lipid Profile", "ECG (Electrocardiogram)"],
        Condition::ChronicKidneyDisease => &[
            "Complete Metabolic Panel",
            "Urinalysis",
            "Kidney Ultrasound",
        ],
        Condition::LiverDisease => &[
            "Complete Liver Function Panel",
            "Viral Hepatitis Screening",
            "Liver Ultrasound",
        ],
        Condition::Hypothyroidism => &[
            "Complete Thyroid Panel (TSH, T3, T4)",
            "Thyroid Antibodies",
        ],
        Condition::Hyperthyroidism => &[
            "Complete Thyroid Panel (TSH, T3, T4)",
            "Thyroid Antibodies",
            "Thyroid Ultrasound",
        ],
        Condition::VitaminDDeficiency => &[
            "25-Hydroxy Vitamin D (repeat in 3 months)",
            "Serum Calcium",
        ],
        Condition::VitaminB12Deficiency => &[
            "Methylmalonic Acid",
            "Complete Blood Count with Indices",
        ],
    }
}

const METABOLIC_ADVICE: &[&str] = &[
    "Mediterranean or DASH diet recommended",
    "30 minutes of moderate exercise 5 days/week",
    "Stress management and adequate sleep (7-8 hours)",
];

fn advice_for(condition: Condition) -> &'static [&'static str] {
    match condition {
        Condition::DiabetesMellitus
        | Condition::Prediabetes
        | Condition::Hyperlipidemia
        | Condition::Obesity => METABOLIC_ADVICE,
        Condition::HypertensiveCrisis
        | Condition::HypertensionStage2
        | Condition::HypertensionStage1 => &[
            "Home blood pressure monitoring, reviewed with your doctor every 2-4 weeks",
            "Limit sodium intake to under 2,300 mg/day",
        ],
        Condition::Anemia => &["Iron-rich diet (leafy greens, legumes, lean red meat)"],
        Condition::Infection => &["Rest and maintain adequate fluid intake"],
        Condition::ChronicKidneyDisease => &["Avoid NSAIDs and other nephrotoxic medications"],
        Condition::LiverDisease => &["Avoid alcohol and hepatotoxic medications"],
        Condition::Hypothyroidism | Condition::Hyperthyroidism => {
            &["Repeat thyroid function tests in 6-8 weeks"]
        }
        Condition::VitaminDDeficiency | Condition::VitaminB12Deficiency => {
            &["Balanced diet with safe daily sunlight exposure"]
        }
    }
}

fn push_unique(list: &mut Vec<String>, item: &str) {
    if !list.iter().any(|existing| existing == item) {
        list.push(item.to_string());
    }
}

/// Human-readable report summary.
pub fn summary(record: &PatientRecord, findings: &[Finding], overall: RiskLevel) -> String {
    let count = |status: RiskLevel| findings.iter().filter(|f| f.status == status).count();
    let critical = count(RiskLevel::Critical);
    let high = count(RiskLevel::High);
    let moderate = count(RiskLevel::Moderate);

    let mut lines = vec![
        format!(
            "Diagnostic Analysis for Patient {} (ID: {})",
            record.name, record.patient_id
        ),
        String::new(),
        format!("Overall Risk Level: {}", overall.as_str().to_uppercase()),
        String::new(),
    ];

    if critical > 0 {
        lines.push(format!(
            "CRITICAL: {critical} critical finding(s) requiring immediate attention."
        ));
    }
    if high > 0 {
        lines.push(format!(
            "HIGH: {high} high-priority finding(s) requiring prompt medical attention."
        ));
    }
    if moderate > 0 {
        lines.push(format!(
            "MODERATE: {moderate} finding(s) requiring monitoring and lifestyle modifications."
        ));
    }

    let abnormal: Vec<&Finding> = findings.iter().filter(|f| f.is_abnormal()).collect();
    if abnormal.is_empty() {
        lines.push(
            "No significant abnormalities detected. All parameters within normal ranges."
                .to_string(),
        );
    } else {
        let mut categories: Vec<Category> = Vec::new();
        for finding in &abnormal {
            if !categories.contains(&finding.category) {
                categories.push(finding.category);
            }
        }
        let labels: Vec<&str> = categories.iter().map(Category::label).collect();

        lines.push(String::new());
        lines.push(format!("Total findings: {}", abnormal.len()));
        lines.push(format!("Key areas of concern: {}", labels.join(", ")));
    }

    lines.push(String::new());
    lines.push(DISCLAIMER.to_string());
    lines.join("\n")
}
