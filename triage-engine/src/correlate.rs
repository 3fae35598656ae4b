//! Symptom correlation.
//!
//! Reported symptoms can only strengthen an inference already made from the
//! readings: confidence goes up one level and a note records the matches.

use log::debug;
use triage_core::{Condition, ConditionInference, Symptoms};

/// Keywords looked up in the lower-cased symptom text.
pub fn keywords_for(condition: Condition) -> &'static [&'static str] {
    match condition {
        Condition::DiabetesMellitus | Condition::Prediabetes => &[
            "thirst",
            "urination",
            "hunger",
            "fatigue",
            "polyuria",
            "polydipsia",
            "blurred vision",
        ],
        Condition::HypertensiveCrisis
        | Condition::HypertensionStage2
        | Condition::HypertensionStage1 => &["headache", "chest pain", "blurred vision", "nosebleed"],
        Condition::Obesity => &["breathlessness", "snoring", "joint pain"],
        Condition::Anemia => &[
            "fatigue",
            "weakness",
            "pale",
            "dizziness",
            "shortness of breath",
        ],
        Condition::Infection => &["fever", "chills", "cough", "sore throat"],
        Condition::Hyperlipidemia => &[],
        Condition::ChronicKidneyDisease => &["swelling", "edema", "decreased urination"],
        Condition::LiverDisease => &["jaundice", "yellow", "abdominal pain", "dark urine"],
        Condition::Hypothyroidism => &["weight gain", "cold intolerance", "constipation", "fatigue"],
        Condition::Hyperthyroidism => &[
            "weight loss",
            "anxiety",
            "tremor",
            "palpitation",
            "heat intolerance",
        ],
        Condition::VitaminDDeficiency => &["bone pain", "muscle weakness"],
        Condition::VitaminB12Deficiency => &["numbness", "tingling", "memory"],
    }
}

/// Chief complaint plus every listed symptom, lower-cased.
pub fn symptom_text(symptoms: &Symptoms) -> Vec<String> {
    std::iter::once(&symptoms.chief_complaint)
        .chain(symptoms.symptoms_list.iter())
        .map(|entry| entry.trim().to_lowercase())
        .filter(|entry| !entry.is_empty())
        .collect()
}

/// Annotate `conditions` with symptom support. Never adds or drops entries.
pub fn correlate(
    symptoms: &Symptoms,
    conditions: Vec<ConditionInference>,
) -> Vec<ConditionInference> {
    let text = symptom_text(symptoms);
    if text.is_empty() {
        return conditions;
    }

    conditions
        .into_iter()
        .map(|mut inference| {
            let matched: Vec<&str> = keywords_for(inference.condition)
                .iter()
                .copied()
                .filter(|keyword| text.iter().any(|entry| entry.contains(keyword)))
                .collect();

            if !matched.is_empty() {
                debug!(
                    "{}: supported by symptoms {:?}",
                    inference.condition, matched
                );
                inference.confidence = inference.confidence.raised();
                inference.notes.push(format!(
                    "Reported symptoms support this finding: {}",
                    matched.join(", ")
                ));
            }
            inference
        })
        .collect()
}
