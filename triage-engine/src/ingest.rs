//! JSON patient record ingestion with field-level validation.

use chrono::Utc;
use serde_json::{Map, Value};
use triage_core::{
    BloodGroup, LabResults, MedicalHistory, PatientRecord, Sex, SymptomSeverity, Symptoms,
    TriageError, VitalSigns,
};
use uuid::Uuid;

const MAX_AGE: f64 = 150.0;

/// Parse a patient record from a JSON string.
pub fn parse_record_str(json: &str) -> Result<PatientRecord, TriageError> {
    let value: Value =
        serde_json::from_str(json).map_err(|err| TriageError::Parse(err.to_string()))?;
    parse_record_value(&value)
}

/// Parse a patient record from a `serde_json::Value`.
pub fn parse_record_value(value: &Value) -> Result<PatientRecord, TriageError> {
    let root = value
        .as_object()
        .map(|map| Section::new("", map))
        .ok_or_else(|| TriageError::Parse("expected a JSON object".to_string()))?;

    let patient_id = root
        .text("patient_id")?
        .unwrap_or_else(generate_patient_id);
    let name = root
        .text("name")?
        .ok_or_else(|| TriageError::invalid("name", "is required"))?;
    let age = parse_age(&root)?;
    let sex = parse_sex(&root)?;
    let blood_group = match root.text("blood_group")? {
        Some(text) => Some(BloodGroup::parse(&text).ok_or_else(|| {
            TriageError::invalid("blood_group", format!("unknown blood group {text:?}"))
        })?),
        None => None,
    };

    let vital_signs = root.section("vital_signs")?.map(parse_vitals).transpose()?;
    let lab_results = root.section("lab_results")?.map(parse_labs).transpose()?;
    let medical_history = root
        .section("medical_history")?
        .map(parse_history)
        .transpose()?;
    let symptoms = root.section("symptoms")?.map(parse_symptoms).transpose()?;

    Ok(PatientRecord {
        patient_id,
        name,
        age,
        sex,
        blood_group,
        contact: root.text("contact")?.unwrap_or_default(),
        vital_signs,
        lab_results,
        medical_history,
        symptoms,
        submitted_at: Utc::now(),
    })
}

/// `P<yyyymmddHHMMSS>-<8 hex>`.
pub fn generate_patient_id() -> String {
    let stamp = Utc::now().format("%Y%m%d%H%M%S");
    let suffix = Uuid::new_v4().simple().to_string();
    format!("P{stamp}-{}", &suffix[..8])
}

fn parse_age(root: &Section<'_>) -> Result<u32, TriageError> {
    let age = root
        .number("age")?
        .ok_or_else(|| TriageError::invalid("age", "is required"))?;
    if age.fract() != 0.0 {
        return Err(TriageError::invalid("age", "must be a whole number"));
    }
    if !(0.0..=MAX_AGE).contains(&age) {
        return Err(TriageError::invalid(
            "age",
            format!("must be between 0 and {MAX_AGE}"),
        ));
    }
    Ok(age as u32)
}

fn parse_sex(root: &Section<'_>) -> Result<Sex, TriageError> {
    let (field, text) = match root.text("sex")? {
        Some(text) => ("sex", text),
        None => match root.text("gender")? {
            Some(text) => ("gender", text),
            None => return Err(TriageError::invalid("sex", "is required")),
        },
    };

    match text.to_ascii_lowercase().as_str() {
        "male" | "m" => Ok(Sex::Male),
        "female" | "f" => Ok(Sex::Female),
        "other" => Ok(Sex::Other),
        _ => Err(TriageError::invalid(
            field,
            format!("expected male, female or other, got {text:?}"),
        )),
    }
}

fn parse_vitals(section: Section<'_>) -> Result<VitalSigns, TriageError> {
    let oxygen_saturation = section.measurement("oxygen_saturation")?;
    if oxygen_saturation.is_some_and(|spo2| spo2 > 100.0) {
        return Err(TriageError::invalid(
            section.path("oxygen_saturation"),
            "cannot exceed 100",
        ));
    }

    let vitals = VitalSigns {
        temperature: section.measurement("temperature")?,
        blood_pressure_systolic: section.measurement("blood_pressure_systolic")?,
        blood_pressure_diastolic: section.measurement("blood_pressure_diastolic")?,
        heart_rate: section.measurement("heart_rate")?,
        respiratory_rate: section.measurement("respiratory_rate")?,
        oxygen_saturation,
        weight: section.positive("weight")?,
        height: section.positive("height")?,
    };
    if vitals.weight.is_some() && vitals.height.is_some() && vitals.bmi().is_none() {
        return Err(TriageError::invalid(
            section.path("weight"),
            "gives a non-finite BMI with the reported height",
        ));
    }
    Ok(vitals)
}

fn parse_labs(section: Section<'_>) -> Result<LabResults, TriageError> {
    Ok(LabResults {
        hemoglobin: section.measurement("hemoglobin")?,
        wbc_count: section.measurement("wbc_count")?,
        platelet_count: section.measurement("platelet_count")?,
        rbc_count: section.measurement("rbc_count")?,
        fasting_glucose: section.measurement("fasting_glucose")?,
        random_glucose: section.measurement("random_glucose")?,
        hba1c: section.measurement("hba1c")?,
        total_cholesterol: section.measurement("total_cholesterol")?,
        ldl_cholesterol: section.measurement("ldl_cholesterol")?,
        hdl_cholesterol: section.measurement("hdl_cholesterol")?,
        triglycerides: section.measurement("triglycerides")?,
        creatinine: section.measurement("creatinine")?,
        bun: section.measurement("bun")?,
        uric_acid: section.measurement("uric_acid")?,
        sgot_ast: section.measurement("sgot_ast")?,
        sgpt_alt: section.measurement("sgpt_alt")?,
        bilirubin_total: section.measurement("bilirubin_total")?,
        tsh: section.measurement("tsh")?,
        t3: section.measurement("t3")?,
        t4: section.measurement("t4")?,
        sodium: section.measurement("sodium")?,
        potassium: section.measurement("potassium")?,
        vitamin_d: section.measurement("vitamin_d")?,
        vitamin_b12: section.measurement("vitamin_b12")?,
    })
}

fn parse_history(section: Section<'_>) -> Result<MedicalHistory, TriageError> {
    Ok(MedicalHistory {
        chronic_conditions: section.list("chronic_conditions")?,
        allergies: section.list("allergies")?,
        current_medications: section.list("current_medications")?,
        past_surgeries: section.list("past_surgeries")?,
        family_history: section.list("family_history")?,
        smoking: section.flag("smoking")?,
        alcohol_consumption: section.flag("alcohol_consumption")?,
    })
}

fn parse_symptoms(section: Section<'_>) -> Result<Symptoms, TriageError> {
    let duration_days = match section.measurement("duration_days")? {
        Some(days) if days.fract() != 0.0 || days > f64::from(u32::MAX) => {
            return Err(TriageError::invalid(
                section.path("duration_days"),
                "must be a whole number of days",
            ))
        }
        Some(days) => days as u32,
        None => 0,
    };

    let severity = match section.text("severity")? {
        None => SymptomSeverity::default(),
        Some(text) => match text.to_ascii_lowercase().as_str() {
            "mild" => SymptomSeverity::Mild,
            "moderate" => SymptomSeverity::Moderate,
            "severe" => SymptomSeverity::Severe,
            _ => {
                return Err(TriageError::invalid(
                    section.path("severity"),
                    format!("expected mild, moderate or severe, got {text:?}"),
                ))
            }
        },
    };

    Ok(Symptoms {
        chief_complaint: section.text("chief_complaint")?.unwrap_or_default(),
        symptoms_list: section.list("symptoms_list")?,
        duration_days,
        severity,
    })
}

/// A JSON object together with its dotted path, for error messages.
struct Section<'a> {
    prefix: &'static str,
    map: &'a Map<String, Value>,
}

impl<'a> Section<'a> {
    fn new(prefix: &'static str, map: &'a Map<String, Value>) -> Self {
        Self { prefix, map }
    }

    fn path(&self, key: &str) -> String {
        if self.prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}.{key}", self.prefix)
        }
    }

    /// Present, non-null, non-empty value.
    fn present(&self, key: &str) -> Option<&'a Value> {
        match self.map.get(key) {
            None | Some(Value::Null) => None,
            Some(Value::String(text)) if text.trim().is_empty() => None,
            Some(value) => Some(value),
        }
    }

    fn section(&self, key: &'static str) -> Result<Option<Section<'a>>, TriageError> {
        match self.present(key) {
            None => Ok(None),
            Some(Value::Object(map)) => Ok(Some(Section::new(key, map))),
            Some(other) => Err(TriageError::invalid(
                self.path(key),
                format!("expected an object, got {}", type_name(other)),
            )),
        }
    }

    fn text(&self, key: &str) -> Result<Option<String>, TriageError> {
        match self.present(key) {
            None => Ok(None),
            Some(Value::String(text)) => Ok(Some(text.trim().to_string())),
            Some(Value::Number(number)) => Ok(Some(number.to_string())),
            Some(other) => Err(TriageError::invalid(
                self.path(key),
                format!("expected a string, got {}", type_name(other)),
            )),
        }
    }

    fn number(&self, key: &str) -> Result<Option<f64>, TriageError> {
        let number = match self.present(key) {
            None => return Ok(None),
            Some(Value::Number(number)) => number.as_f64(),
            Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
            Some(other) => {
                return Err(TriageError::invalid(
                    self.path(key),
                    format!("expected a number, got {}", type_name(other)),
                ))
            }
        };

        match number {
            Some(number) if number.is_finite() => Ok(Some(number)),
            _ => Err(TriageError::invalid(
                self.path(key),
                "expected a finite number",
            )),
        }
    }

    /// Non-negative number.
    fn measurement(&self, key: &str) -> Result<Option<f64>, TriageError> {
        match self.number(key)? {
            Some(value) if value < 0.0 => {
                Err(TriageError::invalid(self.path(key), "cannot be negative"))
            }
            other => Ok(other),
        }
    }

    fn positive(&self, key: &str) -> Result<Option<f64>, TriageError> {
        match self.number(key)? {
            Some(value) if value <= 0.0 => {
                Err(TriageError::invalid(self.path(key), "must be positive"))
            }
            other => Ok(other),
        }
    }

    /// String list; a comma-separated string is split.
    fn list(&self, key: &str) -> Result<Vec<String>, TriageError> {
        match self.present(key) {
            None => Ok(Vec::new()),
            Some(Value::String(text)) => Ok(split_list(text)),
            Some(Value::Array(items)) => items
                .iter()
                .filter(|item| !item.is_null())
                .map(|item| match item {
                    Value::String(text) => Ok(text.trim().to_string()),
                    other => Err(TriageError::invalid(
                        self.path(key),
                        format!("expected a list of strings, found {}", type_name(other)),
                    )),
                })
                .filter(|item| !matches!(item, Ok(text) if text.is_empty()))
                .collect(),
            Some(other) => Err(TriageError::invalid(
                self.path(key),
                format!("expected a list of strings, got {}", type_name(other)),
            )),
        }
    }

    fn flag(&self, key: &str) -> Result<bool, TriageError> {
        match self.present(key) {
            None => Ok(false),
            Some(Value::Bool(flag)) => Ok(*flag),
            Some(Value::String(text)) => match text.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" => Ok(true),
                "false" | "no" => Ok(false),
                _ => Err(TriageError::invalid(
                    self.path(key),
                    format!("expected true or false, got {text:?}"),
                )),
            },
            Some(other) => Err(TriageError::invalid(
                self.path(key),
                format!("expected a boolean, got {}", type_name(other)),
            )),
        }
    }
}

fn split_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn invalid_field(value: Value) -> String {
        match parse_record_value(&value) {
            Err(TriageError::InvalidInput { field, .. }) => field,
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn parses_a_minimal_record() {
        let record = parse_record_value(&json!({
            "patient_id": "P-100",
            "name": "Ana Souza",
            "age": 34,
            "sex": "female"
        }))
        .expect("valid record");

        assert_eq!(record.patient_id, "P-100");
        assert_eq!(record.age, 34);
        assert_eq!(record.sex, Sex::Female);
        assert!(record.vital_signs.is_none());
        assert!(record.lab_results.is_none());
        assert_eq!(record.contact, "");
    }

    #[test]
    fn accepts_numeric_strings_and_treats_blanks_as_absent() {
        let record = parse_record_value(&json!({
            "name": "Ravi Kumar",
            "age": "61",
            "gender": "Male",
            "blood_group": "B+",
            "vital_signs": { "temperature": "38.4", "heart_rate": "", "weight": null },
            "lab_results": { "hemoglobin": 12.9, "tsh": " 5.1 " }
        }))
        .expect("valid record");

        assert_eq!(record.sex, Sex::Male);
        assert_eq!(record.blood_group, Some(BloodGroup::BPositive));
        let vitals = record.vital_signs.expect("vitals present");
        assert_eq!(vitals.temperature, Some(38.4));
        assert_eq!(vitals.heart_rate, None);
        assert_eq!(vitals.weight, None);
        let labs = record.lab_results.expect("labs present");
        assert_eq!(labs.hemoglobin, Some(12.9));
        assert_eq!(labs.tsh, Some(5.1));
    }

    #[test]
    fn generates_an_id_when_missing() {
        let record = parse_record_value(&json!({ "name": "X", "age": 20, "sex": "other" }))
            .expect("valid record");
        let (stamp, suffix) = record
            .patient_id
            .strip_prefix('P')
            .and_then(|rest| rest.split_once('-'))
            .expect("P<stamp>-<hex>");
        assert_eq!(stamp.len(), 14);
        assert!(stamp.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(suffix.len(), 8);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn required_fields_are_enforced() {
        assert_eq!(invalid_field(json!({ "age": 20, "sex": "male" })), "name");
        assert_eq!(invalid_field(json!({ "name": "X", "sex": "male" })), "age");
        assert_eq!(invalid_field(json!({ "name": "X", "age": 20 })), "sex");
    }

    #[test]
    fn errors_name_the_dotted_field() {
        assert_eq!(
            invalid_field(json!({
                "name": "X", "age": 20, "sex": "male",
                "lab_results": { "hemoglobin": "low" }
            })),
            "lab_results.hemoglobin"
        );
        assert_eq!(
            invalid_field(json!({
                "name": "X", "age": 20, "sex": "male",
                "lab_results": { "sodium": -4 }
            })),
            "lab_results.sodium"
        );
        assert_eq!(
            invalid_field(json!({
                "name": "X", "age": 20, "sex": "male",
                "vital_signs": { "heart_rate": [80] }
            })),
            "vital_signs.heart_rate"
        );
    }

    #[test]
    fn physiological_limits_are_checked() {
        let base = |vitals: Value| json!({ "name": "X", "age": 20, "sex": "f", "vital_signs": vitals });
        assert_eq!(
            invalid_field(base(json!({ "oxygen_saturation": 101 }))),
            "vital_signs.oxygen_saturation"
        );
        assert_eq!(invalid_field(base(json!({ "height": 0 }))), "vital_signs.height");
        assert_eq!(invalid_field(base(json!({ "weight": -70 }))), "vital_signs.weight");
        assert_eq!(
            invalid_field(base(json!({ "temperature": "NaN" }))),
            "vital_signs.temperature"
        );
        assert_eq!(
            invalid_field(json!({ "name": "X", "age": 151, "sex": "male" })),
            "age"
        );
        assert_eq!(
            invalid_field(json!({ "name": "X", "age": 40.5, "sex": "male" })),
            "age"
        );
    }

    #[test]
    fn absurd_weight_and_height_pair_is_rejected() {
        let record = json!({
            "name": "X",
            "age": 20,
            "sex": "male",
            "vital_signs": { "weight": 1e308, "height": 1e-10 }
        });
        assert_eq!(invalid_field(record), "vital_signs.weight");

        let report = crate::analyze_record_value(
            &json!({
                "name": "Y",
                "age": 20,
                "sex": "male",
                "vital_signs": { "weight": 300, "height": 150 }
            }),
            &triage_core::TriageConfig::default(),
        )
        .expect("extreme but finite BMI is accepted");
        let text = serde_json::to_string(&report).expect("report serializes");
        let back: triage_core::DiagnosticReport =
            serde_json::from_str(&text).expect("report reads back");
        assert_eq!(back.findings.len(), report.findings.len());
        assert!(back.findings.iter().all(|finding| finding.value.is_finite()));
    }

    #[test]
    fn sections_must_be_objects() {
        assert_eq!(
            invalid_field(json!({ "name": "X", "age": 20, "sex": "male", "symptoms": "tired" })),
            "symptoms"
        );
    }

    #[test]
    fn symptoms_and_history_are_parsed() {
        let record = parse_record_value(&json!({
            "name": "Mei Chen", "age": 47, "sex": "female",
            "symptoms": {
                "chief_complaint": "Tired all the time",
                "symptoms_list": ["fatigue", "", "cold intolerance"],
                "duration_days": 21,
                "severity": "Severe"
            },
            "medical_history": {
                "allergies": "penicillin, latex",
                "smoking": true,
                "alcohol_consumption": "no"
            }
        }))
        .expect("valid record");

        let symptoms = record.symptoms.expect("symptoms present");
        assert_eq!(symptoms.symptoms_list, vec!["fatigue", "cold intolerance"]);
        assert_eq!(symptoms.duration_days, 21);
        assert_eq!(symptoms.severity, SymptomSeverity::Severe);

        let history = record.medical_history.expect("history present");
        assert_eq!(history.allergies, vec!["penicillin", "latex"]);
        assert!(history.smoking);
        assert!(!history.alcohol_consumption);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            parse_record_str("{ not json"),
            Err(TriageError::Parse(_))
        ));
        assert!(matches!(
            parse_record_str("[1, 2]"),
            Err(TriageError::Parse(_))
        ));
    }
}
