//! Per-category analyzers.
//!
//! Each analyzer owns a fixed parameter list and a set of condition groups.
//! Analyzers only read the record, never each other's output.

use log::debug;
use triage_core::{
    Category, ConditionInference, Finding, LabResults, Parameter, PatientRecord, TriageConfig,
};

use crate::ranges::{self, Reading};
use crate::rules::{self, ConditionGroup};

type Readings = Vec<(Parameter, Reading)>;

pub struct Analyzer {
    pub category: Category,
    collect: fn(&PatientRecord) -> Readings,
    groups: &'static [&'static ConditionGroup],
}

#[derive(Debug, Default)]
pub struct CategoryOutcome {
    pub findings: Vec<Finding>,
    pub conditions: Vec<ConditionInference>,
}

impl Analyzer {
    /// Present readings in this analyzer's parameter order.
    pub fn readings(&self, record: &PatientRecord) -> Readings {
        (self.collect)(record)
    }

    pub fn analyze(&self, record: &PatientRecord, config: &TriageConfig) -> CategoryOutcome {
        let readings = self.readings(record);
        if readings.is_empty() {
            return CategoryOutcome::default();
        }

        let findings: Vec<Finding> = readings
            .iter()
            .filter_map(|(parameter, reading)| ranges::evaluate(*parameter, *reading, record.sex))
            .filter(|finding| config.report_normal_findings || finding.is_abnormal())
            .collect();

        let conditions: Vec<ConditionInference> = self
            .groups
            .iter()
            .filter_map(|group| {
                let inference = group.infer(&readings, record.sex)?;
                debug!(
                    "{}: {} rules matched {}",
                    self.category, group.name, inference.condition
                );
                Some(inference)
            })
            .collect();

        debug!(
            "{}: {} reading(s), {} finding(s), {} condition(s)",
            self.category,
            readings.len(),
            findings.len(),
            conditions.len()
        );

        CategoryOutcome {
            findings,
            conditions,
        }
    }
}

/// Analyzers in report order.
pub static ANALYZERS: [Analyzer; 9] = [
    Analyzer {
        category: Category::VitalSigns,
        collect: vital_readings,
        groups: &[&rules::HYPERTENSION, &rules::OBESITY],
    },
    Analyzer {
        category: Category::CompleteBloodCount,
        collect: |record| {
            lab_readings(record, |labs| {
                [
                    (Parameter::Hemoglobin, labs.hemoglobin),
                    (Parameter::WbcCount, labs.wbc_count),
                    (Parameter::PlateletCount, labs.platelet_count),
                    (Parameter::RbcCount, labs.rbc_count),
                ]
            })
        },
        groups: &[&rules::ANEMIA, &rules::INFECTION],
    },
    Analyzer {
        category: Category::BloodSugar,
        collect: |record| {
            lab_readings(record, |labs| {
                [
                    (Parameter::FastingGlucose, labs.fasting_glucose),
                    (Parameter::RandomGlucose, labs.random_glucose),
                    (Parameter::Hba1c, labs.hba1c),
                ]
            })
        },
        groups: &[&rules::DIABETES],
    },
    Analyzer {
        category: Category::LipidProfile,
        collect: |record| {
            lab_readings(record, |labs| {
                [
                    (Parameter::TotalCholesterol, labs.total_cholesterol),
                    (Parameter::LdlCholesterol, labs.ldl_cholesterol),
                    (Parameter::HdlCholesterol, labs.hdl_cholesterol),
                    (Parameter::Triglycerides, labs.triglycerides),
                ]
            })
        },
        groups: &[&rules::HYPERLIPIDEMIA],
    },
    Analyzer {
        category: Category::KidneyFunction,
        collect: |record| {
            lab_readings(record, |labs| {
                [
                    (Parameter::Creatinine, labs.creatinine),
                    (Parameter::Bun, labs.bun),
                    (Parameter::UricAcid, labs.uric_acid),
                ]
            })
        },
        groups: &[&rules::KIDNEY],
    },
    Analyzer {
        category: Category::LiverFunction,
        collect: |record| {
            lab_readings(record, |labs| {
                [
                    (Parameter::SgotAst, labs.sgot_ast),
                    (Parameter::SgptAlt, labs.sgpt_alt),
                    (Parameter::BilirubinTotal, labs.bilirubin_total),
                ]
            })
        },
        groups: &[&rules::LIVER],
    },
    Analyzer {
        category: Category::ThyroidFunction,
        collect: |record| {
            lab_readings(record, |labs| {
                [
                    (Parameter::Tsh, labs.tsh),
                    (Parameter::T3, labs.t3),
                    (Parameter::T4, labs.t4),
                ]
            })
        },
        groups: &[&rules::THYROID],
    },
    Analyzer {
        category: Category::Electrolytes,
        collect: |record| {
            lab_readings(record, |labs| {
                [
                    (Parameter::Sodium, labs.sodium),
                    (Parameter::Potassium, labs.potassium),
                ]
            })
        },
        groups: &[],
    },
    Analyzer {
        category: Category::Vitamins,
        collect: |record| {
            lab_readings(record, |labs| {
                [
                    (Parameter::VitaminD, labs.vitamin_d),
                    (Parameter::VitaminB12, labs.vitamin_b12),
                ]
            })
        },
        groups: &[&rules::VITAMIN_D, &rules::VITAMIN_B12],
    },
];

/// Analyzer responsible for `category`.
pub fn analyzer_for(category: Category) -> Option<&'static Analyzer> {
    ANALYZERS
        .iter()
        .find(|analyzer| analyzer.category == category)
}

fn vital_readings(record: &PatientRecord) -> Readings {
    let Some(vitals) = record.vital_signs.as_ref() else {
        return Vec::new();
    };

    let mut readings = Vec::new();
    push_single(&mut readings, Parameter::Temperature, vitals.temperature);
    if vitals.blood_pressure_systolic.is_some() || vitals.blood_pressure_diastolic.is_some() {
        readings.push((
            Parameter::BloodPressure,
            Reading::Pressure {
                systolic: vitals.blood_pressure_systolic,
                diastolic: vitals.blood_pressure_diastolic,
            },
        ));
    }
    push_single(&mut readings, Parameter::HeartRate, vitals.heart_rate);
    push_single(&mut readings, Parameter::RespiratoryRate, vitals.respiratory_rate);
    push_single(&mut readings, Parameter::OxygenSaturation, vitals.oxygen_saturation);
    push_single(&mut readings, Parameter::Bmi, vitals.bmi());
    readings
}

fn lab_readings<const N: usize>(
    record: &PatientRecord,
    fields: impl Fn(&LabResults) -> [(Parameter, Option<f64>); N],
) -> Readings {
    let Some(labs) = record.lab_results.as_ref() else {
        return Vec::new();
    };

    let mut readings = Vec::new();
    for (parameter, value) in fields(labs) {
        push_single(&mut readings, parameter, value);
    }
    readings
}

fn push_single(readings: &mut Readings, parameter: Parameter, value: Option<f64>) {
    if let Some(value) = value {
        readings.push((parameter, Reading::Single(value)));
    }
}
