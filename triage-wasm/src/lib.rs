//! Framework-neutral WASM <-> JavaScript bridge for the triage engine.

use serde::Deserialize;
use serde_wasm_bindgen::{from_value, to_value};
use triage_core::{TriageConfig, TriageError};
use wasm_bindgen::prelude::*;

/// Partial config coming from JavaScript; unset keys keep their defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsTriageConfig {
    #[serde(default, alias = "report_normal_findings")]
    report_normal_findings: Option<bool>,
    #[serde(default, alias = "correlate_symptoms")]
    correlate_symptoms: Option<bool>,
    #[serde(default, alias = "screening_age")]
    screening_age: Option<u32>,
    #[serde(default, alias = "weight_management_bmi")]
    weight_management_bmi: Option<f64>,
}

impl From<JsTriageConfig> for TriageConfig {
    fn from(cfg: JsTriageConfig) -> Self {
        let mut base = TriageConfig::default();
        if let Some(flag) = cfg.report_normal_findings {
            base.report_normal_findings = flag;
        }
        if let Some(flag) = cfg.correlate_symptoms {
            base.correlate_symptoms = flag;
        }
        if let Some(age) = cfg.screening_age {
            base.screening_age = age;
        }
        if let Some(bmi) = cfg.weight_management_bmi {
            base.weight_management_bmi = bmi;
        }
        base
    }
}

/// Analyze one patient record object and return the report object.
#[wasm_bindgen]
pub fn analyze_patient(record: JsValue, config: Option<JsValue>) -> Result<JsValue, JsValue> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let record_value = from_value::<serde_json::Value>(record)
        .map_err(|err| JsValue::from_str(&format!("Could not read patient record: {err}")))?;

    let cfg = match config {
        Some(js_cfg) if !js_cfg.is_undefined() && !js_cfg.is_null() => {
            let cfg: JsTriageConfig = from_value(js_cfg)
                .map_err(|err| JsValue::from_str(&format!("Could not read config: {err}")))?;
            TriageConfig::from(cfg)
        }
        _ => TriageConfig::default(),
    };

    let report = triage_engine::analyze_record_value(&record_value, &cfg)
        .map_err(|err| JsValue::from_str(&format_triage_error(&err)))?;

    to_value(&report).map_err(|err| JsValue::from_str(&format!("Could not serialize report: {err}")))
}

fn format_triage_error(err: &TriageError) -> String {
    format!("Triage error: {err}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let cfg: JsTriageConfig =
            serde_json::from_str(r#"{"screeningAge": 50}"#).expect("valid config");
        let cfg = TriageConfig::from(cfg);
        assert_eq!(cfg.screening_age, 50);
        assert!(cfg.correlate_symptoms);
        assert!(!cfg.report_normal_findings);
    }

    #[test]
    fn snake_case_keys_are_accepted() {
        let cfg: JsTriageConfig =
            serde_json::from_str(r#"{"report_normal_findings": true}"#).expect("valid config");
        assert!(TriageConfig::from(cfg).report_normal_findings);
    }

    #[test]
    fn errors_are_prefixed() {
        let err = TriageError::UnknownPatient("P-1".to_string());
        assert_eq!(format_triage_error(&err), "Triage error: Patient `P-1` not found");
    }
}
