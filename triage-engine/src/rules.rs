//! Composite condition rules.
//!
//! A group is an ordered list of (predicate, outcome) rules; the first rule
//! with any matching criterion produces the group's single inference.

use triage_core::{Condition, ConditionInference, Confidence, Parameter, RiskLevel, Sex};

use crate::ranges::{select_for, Bound, Demographic, Reading};

use Bound::{AtLeast, Above, Below};
use Demographic::{Any, Female, Male};

#[derive(Debug)]
pub struct Criterion {
    pub parameter: Parameter,
    pub bound: Bound,
}

impl Criterion {
    fn matches(&self, readings: &[(Parameter, Reading)]) -> bool {
        readings.iter().any(|(parameter, reading)| {
            *parameter == self.parameter && self.bound.matches(*reading)
        })
    }
}

#[derive(Debug)]
pub struct ConditionOutcome {
    pub condition: Condition,
    pub confidence: Confidence,
    pub risk: RiskLevel,
    pub description: &'static str,
}

impl ConditionOutcome {
    fn to_inference(&self) -> ConditionInference {
        ConditionInference {
            condition: self.condition,
            confidence: self.confidence,
            risk: self.risk,
            description: self.description.to_string(),
            notes: Vec::new(),
        }
    }
}

/// Fires when any criterion matches.
#[derive(Debug)]
pub struct ConditionRule {
    pub any_of: &'static [Criterion],
    pub outcome: ConditionOutcome,
}

#[derive(Debug)]
pub struct RuleSet {
    pub demographic: Demographic,
    pub rules: &'static [ConditionRule],
}

#[derive(Debug)]
pub struct ConditionGroup {
    pub name: &'static str,
    pub rule_sets: &'static [RuleSet],
}

impl ConditionGroup {
    /// Rules for `sex`, with the same fallback as reference ranges.
    pub fn rules_for(&self, sex: Sex) -> Option<&'static [ConditionRule]> {
        select_for(self.rule_sets.iter(), |set| set.demographic, sex).map(|set| set.rules)
    }

    pub fn infer(&self, readings: &[(Parameter, Reading)], sex: Sex) -> Option<ConditionInference> {
        self.rules_for(sex)?
            .iter()
            .find(|rule| rule.any_of.iter().any(|criterion| criterion.matches(readings)))
            .map(|rule| rule.outcome.to_inference())
    }
}

macro_rules! when {
    ($parameter:expr, $bound:expr $(,)?) => {
        Criterion {
            parameter: $parameter,
            bound: $bound,
        }
    };
}

const fn rule(
    any_of: &'static [Criterion],
    condition: Condition,
    confidence: Confidence,
    risk: RiskLevel,
    description: &'static str,
) -> ConditionRule {
    ConditionRule {
        any_of,
        outcome: ConditionOutcome {
            condition,
            confidence,
            risk,
            description,
        },
    }
}

const GLUCOSE_DESCRIPTION: &str = "Elevated blood sugar levels indicate glucose metabolism issues";
const OBESITY_DESCRIPTION: &str = "Excess body weight increases metabolic and cardiovascular risk";
const ANEMIA_DESCRIPTION: &str = "Low hemoglobin can cause fatigue and weakness";
const INFECTION_DESCRIPTION: &str =
    "Elevated white cell count suggests an infection or inflammatory process";
const LIPID_DESCRIPTION: &str = "Elevated cholesterol increases risk of heart disease and stroke";
const KIDNEY_DESCRIPTION: &str = "Elevated creatinine may indicate impaired kidney function";
const LIVER_DESCRIPTION: &str = "Elevated liver enzymes suggest liver inflammation or damage";
const VITAMIN_D_DESCRIPTION: &str = "Low vitamin D affects bone health and immunity";

pub static DIABETES: ConditionGroup = ConditionGroup {
    name: "diabetes",
    rule_sets: &[RuleSet {
        demographic: Any,
        rules: &[
            rule(
                &[
                    when!(Parameter::FastingGlucose, AtLeast(126.0)),
                    when!(Parameter::Hba1c, AtLeast(6.5)),
                ],
                Condition::DiabetesMellitus,
                Confidence::High,
                RiskLevel::High,
                GLUCOSE_DESCRIPTION,
            ),
            rule(
                &[
                    when!(Parameter::FastingGlucose, AtLeast(100.0)),
                    when!(Parameter::Hba1c, AtLeast(5.7)),
                ],
                Condition::Prediabetes,
                Confidence::Moderate,
                RiskLevel::Moderate,
                GLUCOSE_DESCRIPTION,
            ),
        ],
    }],
};

pub static HYPERTENSION: ConditionGroup = ConditionGroup {
    name: "hypertension",
    rule_sets: &[RuleSet {
        demographic: Any,
        rules: &[
            rule(
                &[when!(
                    Parameter::BloodPressure,
                    Bound::EitherAtLeast {
                        systolic: 180.0,
                        diastolic: 120.0,
                    },
                )],
                Condition::HypertensiveCrisis,
                Confidence::High,
                RiskLevel::Critical,
                "Severely elevated blood pressure with risk of organ damage",
            ),
            rule(
                &[when!(
                    Parameter::BloodPressure,
                    Bound::EitherAtLeast {
                        systolic: 140.0,
                        diastolic: 90.0,
                    },
                )],
                Condition::HypertensionStage2,
                Confidence::High,
                RiskLevel::High,
                "Sustained high blood pressure increases cardiovascular risk",
            ),
            rule(
                &[when!(
                    Parameter::BloodPressure,
                    Bound::EitherAtLeast {
                        systolic: 130.0,
                        diastolic: 80.0,
                    },
                )],
                Condition::HypertensionStage1,
                Confidence::Moderate,
                RiskLevel::Moderate,
                "Mildly elevated blood pressure warrants lifestyle changes and monitoring",
            ),
        ],
    }],
};

pub static OBESITY: ConditionGroup = ConditionGroup {
    name: "obesity",
    rule_sets: &[RuleSet {
        demographic: Any,
        rules: &[
            rule(
                &[when!(Parameter::Bmi, AtLeast(35.0))],
                Condition::Obesity,
                Confidence::High,
                RiskLevel::High,
                OBESITY_DESCRIPTION,
            ),
            rule(
                &[when!(Parameter::Bmi, AtLeast(30.0))],
                Condition::Obesity,
                Confidence::High,
                RiskLevel::Moderate,
                OBESITY_DESCRIPTION,
            ),
        ],
    }],
};

pub static ANEMIA: ConditionGroup = ConditionGroup {
    name: "anemia",
    rule_sets: &[
        RuleSet {
            demographic: Male,
            rules: &[
                rule(
                    &[when!(Parameter::Hemoglobin, Below(10.0))],
                    Condition::Anemia,
                    Confidence::High,
                    RiskLevel::High,
                    ANEMIA_DESCRIPTION,
                ),
                rule(
                    &[when!(Parameter::Hemoglobin, Below(13.5))],
                    Condition::Anemia,
                    Confidence::High,
                    RiskLevel::Moderate,
                    ANEMIA_DESCRIPTION,
                ),
            ],
        },
        RuleSet {
            demographic: Female,
            rules: &[
                rule(
                    &[when!(Parameter::Hemoglobin, Below(10.0))],
                    Condition::Anemia,
                    Confidence::High,
                    RiskLevel::High,
                    ANEMIA_DESCRIPTION,
                ),
                rule(
                    &[when!(Parameter::Hemoglobin, Below(12.0))],
                    Condition::Anemia,
                    Confidence::High,
                    RiskLevel::Moderate,
                    ANEMIA_DESCRIPTION,
                ),
            ],
        },
    ],
};

pub static INFECTION: ConditionGroup = ConditionGroup {
    name: "infection",
    rule_sets: &[RuleSet {
        demographic: Any,
        rules: &[
            rule(
                &[when!(Parameter::WbcCount, AtLeast(15_000.0))],
                Condition::Infection,
                Confidence::Moderate,
                RiskLevel::High,
                INFECTION_DESCRIPTION,
            ),
            rule(
                &[when!(Parameter::WbcCount, Above(11_000.0))],
                Condition::Infection,
                Confidence::Moderate,
                RiskLevel::Moderate,
                INFECTION_DESCRIPTION,
            ),
        ],
    }],
};

pub static HYPERLIPIDEMIA: ConditionGroup = ConditionGroup {
    name: "hyperlipidemia",
    rule_sets: &[RuleSet {
        demographic: Any,
        rules: &[
            rule(
                &[
                    when!(Parameter::TotalCholesterol, AtLeast(240.0)),
                    when!(Parameter::LdlCholesterol, AtLeast(160.0)),
                ],
                Condition::Hyperlipidemia,
                Confidence::High,
                RiskLevel::High,
                LIPID_DESCRIPTION,
            ),
            rule(
                &[
                    when!(Parameter::TotalCholesterol, AtLeast(200.0)),
                    when!(Parameter::LdlCholesterol, AtLeast(130.0)),
                ],
                Condition::Hyperlipidemia,
                Confidence::High,
                RiskLevel::Moderate,
                LIPID_DESCRIPTION,
            ),
        ],
    }],
};

pub static KIDNEY: ConditionGroup = ConditionGroup {
    name: "kidney",
    rule_sets: &[
        RuleSet {
            demographic: Male,
            rules: &[
                rule(
                    &[when!(Parameter::Creatinine, AtLeast(2.0))],
                    Condition::ChronicKidneyDisease,
                    Confidence::Moderate,
                    RiskLevel::High,
                    KIDNEY_DESCRIPTION,
                ),
                rule(
                    &[when!(Parameter::Creatinine, Above(1.3))],
                    Condition::ChronicKidneyDisease,
                    Confidence::Moderate,
                    RiskLevel::Moderate,
                    KIDNEY_DESCRIPTION,
                ),
            ],
        },
        RuleSet {
            demographic: Female,
            rules: &[
                rule(
                    &[when!(Parameter::Creatinine, AtLeast(2.0))],
                    Condition::ChronicKidneyDisease,
                    Confidence::Moderate,
                    RiskLevel::High,
                    KIDNEY_DESCRIPTION,
                ),
                rule(
                    &[when!(Parameter::Creatinine, Above(1.1))],
                    Condition::ChronicKidneyDisease,
                    Confidence::Moderate,
                    RiskLevel::Moderate,
                    KIDNEY_DESCRIPTION,
                ),
            ],
        },
    ],
};

pub static LIVER: ConditionGroup = ConditionGroup {
    name: "liver",
    rule_sets: &[RuleSet {
        demographic: Any,
        rules: &[
            rule(
                &[
                    when!(Parameter::SgotAst, AtLeast(100.0)),
                    when!(Parameter::SgptAlt, AtLeast(100.0)),
                ],
                Condition::LiverDisease,
                Confidence::Moderate,
                RiskLevel::High,
                LIVER_DESCRIPTION,
            ),
            rule(
                &[
                    when!(Parameter::SgotAst, Above(40.0)),
                    when!(Parameter::SgptAlt, Above(41.0)),
                ],
                Condition::LiverDisease,
                Confidence::Moderate,
                RiskLevel::Moderate,
                LIVER_DESCRIPTION,
            ),
        ],
    }],
};

pub static THYROID: ConditionGroup = ConditionGroup {
    name: "thyroid",
    rule_sets: &[RuleSet {
        demographic: Any,
        rules: &[
            rule(
                &[when!(Parameter::Tsh, AtLeast(10.0))],
                Condition::Hypothyroidism,
                Confidence::High,
                RiskLevel::High,
                "Elevated TSH indicates an underactive thyroid",
            ),
            rule(
                &[when!(Parameter::Tsh, Above(4.0))],
                Condition::Hypothyroidism,
                Confidence::Moderate,
                RiskLevel::Moderate,
                "Elevated TSH indicates an underactive thyroid",
            ),
            rule(
                &[when!(Parameter::Tsh, Below(0.4))],
                Condition::Hyperthyroidism,
                Confidence::Moderate,
                RiskLevel::Moderate,
                "Low TSH suggests an overactive thyroid",
            ),
        ],
    }],
};

pub static VITAMIN_D: ConditionGroup = ConditionGroup {
    name: "vitamin_d",
    rule_sets: &[RuleSet {
        demographic: Any,
        rules: &[
            rule(
                &[when!(Parameter::VitaminD, Below(12.0))],
                Condition::VitaminDDeficiency,
                Confidence::High,
                RiskLevel::Moderate,
                VITAMIN_D_DESCRIPTION,
            ),
            rule(
                &[when!(Parameter::VitaminD, Below(20.0))],
                Condition::VitaminDDeficiency,
                Confidence::Moderate,
                RiskLevel::Low,
                VITAMIN_D_DESCRIPTION,
            ),
        ],
    }],
};

pub static VITAMIN_B12: ConditionGroup = ConditionGroup {
    name: "vitamin_b12",
    rule_sets: &[RuleSet {
        demographic: Any,
        rules: &[rule(
            &[when!(Parameter::VitaminB12, Below(200.0))],
            Condition::VitaminB12Deficiency,
            Confidence::Moderate,
            RiskLevel::Moderate,
            "Low vitamin B12 can cause anemia and neurological symptoms",
        )],
    }],
};

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn single(parameter: Parameter, value: f64) -> (Parameter, Reading) {
        (parameter, Reading::Single(value))
    }

    fn infer(group: &ConditionGroup, readings: &[(Parameter, Reading)], sex: Sex) -> Option<(Condition, Confidence, RiskLevel)> {
        group
            .infer(readings, sex)
            .map(|inference| (inference.condition, inference.confidence, inference.risk))
    }

    #[test]
    fn diabetes_threshold_is_closed() {
        assert_eq!(
            infer(&DIABETES, &[single(Parameter::FastingGlucose, 126.0)], Sex::Male),
            Some((Condition::DiabetesMellitus, Confidence::High, RiskLevel::High))
        );
        assert_eq!(
            infer(&DIABETES, &[single(Parameter::FastingGlucose, 125.9)], Sex::Male),
            Some((Condition::Prediabetes, Confidence::Moderate, RiskLevel::Moderate))
        );
        assert_eq!(
            infer(&DIABETES, &[single(Parameter::FastingGlucose, 95.0)], Sex::Male),
            None
        );
    }

    #[test]
    fn either_criterion_fires_the_rule() {
        let readings = [
            single(Parameter::FastingGlucose, 92.0),
            single(Parameter::Hba1c, 6.9),
        ];
        assert_eq!(
            infer(&DIABETES, &readings, Sex::Female).map(|(condition, ..)| condition),
            Some(Condition::DiabetesMellitus)
        );
    }

    #[test]
    fn first_matching_rule_wins() {
        let crisis = [(
            Parameter::BloodPressure,
            Reading::Pressure {
                systolic: Some(150.0),
                diastolic: Some(125.0),
            },
        )];
        assert_eq!(
            infer(&HYPERTENSION, &crisis, Sex::Male),
            Some((Condition::HypertensiveCrisis, Confidence::High, RiskLevel::Critical))
        );
    }

    #[test]
    fn sex_specific_groups_have_no_fallback_for_other() {
        let readings = [single(Parameter::Hemoglobin, 9.0)];
        assert_eq!(
            infer(&ANEMIA, &readings, Sex::Male),
            Some((Condition::Anemia, Confidence::High, RiskLevel::High))
        );
        assert_eq!(infer(&ANEMIA, &readings, Sex::Other), None);
        assert!(KIDNEY.rules_for(Sex::Other).is_none());
    }

    #[test]
    fn female_kidney_limit_is_lower() {
        let readings = [single(Parameter::Creatinine, 1.2)];
        assert_eq!(infer(&KIDNEY, &readings, Sex::Male), None);
        assert_eq!(
            infer(&KIDNEY, &readings, Sex::Female),
            Some((
                Condition::ChronicKidneyDisease,
                Confidence::Moderate,
                RiskLevel::Moderate
            ))
        );
    }

    #[test]
    fn thyroid_rules_cover_both_directions() {
        assert_eq!(
            infer(&THYROID, &[single(Parameter::Tsh, 0.2)], Sex::Female)
                .map(|(condition, ..)| condition),
            Some(Condition::Hyperthyroidism)
        );
        assert_eq!(
            infer(&THYROID, &[single(Parameter::Tsh, 12.0)], Sex::Female),
            Some((Condition::Hypothyroidism, Confidence::High, RiskLevel::High))
        );
    }

    fn pressure(systolic: f64, diastolic: f64) -> [(Parameter, Reading); 1] {
        [(
            Parameter::BloodPressure,
            Reading::Pressure {
                systolic: Some(systolic),
                diastolic: Some(diastolic),
            },
        )]
    }

    #[test]
    fn hypertension_stages_use_either_component() {
        assert_eq!(
            infer(&HYPERTENSION, &pressure(130.0, 70.0), Sex::Male),
            Some((Condition::HypertensionStage1, Confidence::Moderate, RiskLevel::Moderate))
        );
        assert_eq!(
            infer(&HYPERTENSION, &pressure(118.0, 80.0), Sex::Male),
            Some((Condition::HypertensionStage1, Confidence::Moderate, RiskLevel::Moderate))
        );
        assert_eq!(infer(&HYPERTENSION, &pressure(129.9, 79.9), Sex::Male), None);
        assert_eq!(
            infer(&HYPERTENSION, &pressure(139.9, 89.9), Sex::Female),
            Some((Condition::HypertensionStage1, Confidence::Moderate, RiskLevel::Moderate))
        );
        assert_eq!(
            infer(&HYPERTENSION, &pressure(140.0, 85.0), Sex::Female),
            Some((Condition::HypertensionStage2, Confidence::High, RiskLevel::High))
        );
    }

    #[test]
    fn obesity_risk_rises_at_35() {
        assert_eq!(
            infer(&OBESITY, &[single(Parameter::Bmi, 35.0)], Sex::Male),
            Some((Condition::Obesity, Confidence::High, RiskLevel::High))
        );
        assert_eq!(
            infer(&OBESITY, &[single(Parameter::Bmi, 34.9)], Sex::Male),
            Some((Condition::Obesity, Confidence::High, RiskLevel::Moderate))
        );
        assert_eq!(
            infer(&OBESITY, &[single(Parameter::Bmi, 30.0)], Sex::Male),
            Some((Condition::Obesity, Confidence::High, RiskLevel::Moderate))
        );
        assert_eq!(infer(&OBESITY, &[single(Parameter::Bmi, 29.9)], Sex::Male), None);
    }

    #[test]
    fn infection_risk_rises_at_15000() {
        assert_eq!(
            infer(&INFECTION, &[single(Parameter::WbcCount, 15_000.0)], Sex::Other),
            Some((Condition::Infection, Confidence::Moderate, RiskLevel::High))
        );
        assert_eq!(
            infer(&INFECTION, &[single(Parameter::WbcCount, 14_999.0)], Sex::Other),
            Some((Condition::Infection, Confidence::Moderate, RiskLevel::Moderate))
        );
        assert_eq!(
            infer(&INFECTION, &[single(Parameter::WbcCount, 11_000.0)], Sex::Other),
            None
        );
    }

    #[test]
    fn hyperlipidemia_high_tier_starts_at_ldl_160() {
        assert_eq!(
            infer(&HYPERLIPIDEMIA, &[single(Parameter::LdlCholesterol, 160.0)], Sex::Female),
            Some((Condition::Hyperlipidemia, Confidence::High, RiskLevel::High))
        );
        assert_eq!(
            infer(&HYPERLIPIDEMIA, &[single(Parameter::LdlCholesterol, 159.9)], Sex::Female),
            Some((Condition::Hyperlipidemia, Confidence::High, RiskLevel::Moderate))
        );
        assert_eq!(
            infer(&HYPERLIPIDEMIA, &[single(Parameter::LdlCholesterol, 129.9)], Sex::Female),
            None
        );
    }

    #[test]
    fn liver_tiers() {
        assert_eq!(
            infer(&LIVER, &[single(Parameter::SgotAst, 100.0)], Sex::Male),
            Some((Condition::LiverDisease, Confidence::Moderate, RiskLevel::High))
        );
        assert_eq!(
            infer(&LIVER, &[single(Parameter::SgotAst, 99.9)], Sex::Male),
            Some((Condition::LiverDisease, Confidence::Moderate, RiskLevel::Moderate))
        );
        assert_eq!(
            infer(&LIVER, &[single(Parameter::SgptAlt, 41.1)], Sex::Male),
            Some((Condition::LiverDisease, Confidence::Moderate, RiskLevel::Moderate))
        );
        assert_eq!(infer(&LIVER, &[single(Parameter::SgptAlt, 41.0)], Sex::Male), None);
        assert_eq!(infer(&LIVER, &[single(Parameter::SgotAst, 40.0)], Sex::Male), None);
    }

    #[test]
    fn vitamin_d_tiers() {
        assert_eq!(
            infer(&VITAMIN_D, &[single(Parameter::VitaminD, 11.9)], Sex::Female),
            Some((Condition::VitaminDDeficiency, Confidence::High, RiskLevel::Moderate))
        );
        assert_eq!(
            infer(&VITAMIN_D, &[single(Parameter::VitaminD, 12.0)], Sex::Female),
            Some((Condition::VitaminDDeficiency, Confidence::Moderate, RiskLevel::Low))
        );
        assert_eq!(
            infer(&VITAMIN_D, &[single(Parameter::VitaminD, 19.9)], Sex::Female),
            Some((Condition::VitaminDDeficiency, Confidence::Moderate, RiskLevel::Low))
        );
        assert_eq!(infer(&VITAMIN_D, &[single(Parameter::VitaminD, 20.0)], Sex::Female), None);
    }

    #[test]
    fn group_names_are_distinct() {
        let groups = [
            &DIABETES,
            &HYPERTENSION,
            &OBESITY,
            &ANEMIA,
            &INFECTION,
            &HYPERLIPIDEMIA,
            &KIDNEY,
            &LIVER,
            &THYROID,
            &VITAMIN_D,
            &VITAMIN_B12,
        ];
        let mut names: Vec<&str> = groups.iter().map(|group| group.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), groups.len());
    }

    #[test]
    fn inferences_start_without_notes() {
        let inference = VITAMIN_B12
            .infer(&[single(Parameter::VitaminB12, 150.0)], Sex::Male)
            .expect("deficiency inferred");
        assert!(inference.notes.is_empty());
        assert_eq!(
            inference.description,
            "Low vitamin B12 can cause anemia and neurological symptoms"
        );
    }
}
