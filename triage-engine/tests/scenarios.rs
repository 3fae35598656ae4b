use std::fs;

use pretty_assertions::assert_eq;
use serde_json::json;
use triage_core::{
    Category, Condition, Confidence, Parameter, PatientRecord, RiskLevel, Sex, TriageConfig,
};
use triage_engine::{analyze, analyze_record_str, analyze_record_value};

fn fixture(name: &str) -> String {
    let path = format!("{}/tests/data/{name}", env!("CARGO_MANIFEST_DIR"));
    fs::read_to_string(&path).unwrap_or_else(|err| panic!("cannot read {path}: {err}"))
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn hypertensive_crisis_is_critical() {
    init_logging();
    let report = analyze_record_str(&fixture("hypertensive_crisis.json"), &TriageConfig::default())
        .expect("record is valid");

    assert_eq!(report.findings.len(), 1);
    let finding = &report.findings[0];
    assert_eq!(finding.category, Category::VitalSigns);
    assert_eq!(finding.parameter, Parameter::BloodPressure);
    assert_eq!(finding.status, RiskLevel::Critical);

    let crisis = report
        .condition(Condition::HypertensiveCrisis)
        .expect("crisis inferred");
    assert_eq!(crisis.confidence, Confidence::High);
    assert_eq!(crisis.risk, RiskLevel::Critical);
    assert_eq!(report.possible_conditions.len(), 1);

    assert_eq!(report.overall_risk, RiskLevel::Critical);
    assert_eq!(
        report.immediate_actions,
        vec!["[CRITICAL] Blood Pressure: Seek emergency care immediately".to_string()]
    );
    assert!(report
        .follow_up_tests
        .contains(&"Echocardiogram".to_string()));
}

#[test]
fn diabetic_labs_suggest_glucose_follow_up() {
    let report = analyze_record_str(&fixture("diabetic_labs.json"), &TriageConfig::default())
        .expect("record is valid");

    let diabetes = report
        .condition(Condition::DiabetesMellitus)
        .expect("diabetes inferred");
    assert_eq!(diabetes.confidence, Confidence::High);
    assert!(report.condition(Condition::Prediabetes).is_none());
    assert!(report.overall_risk >= RiskLevel::High);
    assert!(report
        .follow_up_tests
        .iter()
        .any(|test| test.contains("HbA1c") || test.contains("Glucose Tolerance")));
    assert_eq!(report.findings_with_status(RiskLevel::High).count(), 2);
}

#[test]
fn low_male_hemoglobin_is_high_risk_anemia() {
    let mut record = PatientRecord::new("P-HB", "Kwame Mensah", 44, Sex::Male);
    record.lab_results = Some(triage_core::LabResults {
        hemoglobin: Some(9.5),
        ..Default::default()
    });

    let report = analyze(&record, &TriageConfig::default());
    let anemia = report.condition(Condition::Anemia).expect("anemia inferred");
    assert_eq!(anemia.risk, RiskLevel::High);
    assert!(report.overall_risk >= RiskLevel::High);
    assert_eq!(
        report.immediate_actions,
        vec!["[HIGH] Hemoglobin: Urgent hematology evaluation".to_string()]
    );
}

#[test]
fn all_normal_values_give_a_normal_report() {
    let record = fixture("all_normal.json");

    let report = analyze_record_str(&record, &TriageConfig::default()).expect("record is valid");
    assert!(report.findings.is_empty());
    assert!(report.possible_conditions.is_empty());
    assert_eq!(report.overall_risk, RiskLevel::Normal);
    assert!(report.immediate_actions.is_empty());
    assert!(report.follow_up_tests.is_empty());
    assert!(report
        .summary
        .contains("No significant abnormalities detected."));

    let verbose = TriageConfig {
        report_normal_findings: true,
        ..TriageConfig::default()
    };
    let report = analyze_record_str(&record, &verbose).expect("record is valid");
    assert_eq!(report.findings.len(), 29);
    assert!(report
        .findings
        .iter()
        .all(|finding| finding.status == RiskLevel::Normal));
    assert_eq!(report.overall_risk, RiskLevel::Normal);
}

#[test]
fn all_absent_record_gives_an_empty_report() {
    let report = analyze_record_value(
        &json!({ "patient_id": "P-EMPTY", "name": "Blank", "age": 35, "sex": "other" }),
        &TriageConfig::default(),
    )
    .expect("record is valid");

    assert!(report.findings.is_empty());
    assert!(report.possible_conditions.is_empty());
    assert_eq!(report.overall_risk, RiskLevel::Normal);
    assert_eq!(
        report.general_recommendations,
        vec![
            "Regular health checkup every 6 months".to_string(),
            "Regular follow-up with primary care physician".to_string(),
            "Maintain hydration (8-10 glasses of water daily)".to_string(),
        ]
    );
}

#[test]
fn correlation_can_be_disabled() {
    let record = fixture("hypertensive_crisis.json");
    let config = TriageConfig {
        correlate_symptoms: false,
        ..TriageConfig::default()
    };
    let report = analyze_record_str(&record, &config).expect("record is valid");
    let crisis = report
        .condition(Condition::HypertensiveCrisis)
        .expect("crisis inferred");
    assert!(crisis.notes.is_empty());

    let correlated =
        analyze_record_str(&record, &TriageConfig::default()).expect("record is valid");
    let crisis = correlated
        .condition(Condition::HypertensiveCrisis)
        .expect("crisis inferred");
    assert_eq!(
        crisis.notes,
        vec!["Reported symptoms support this finding: headache, blurred vision".to_string()]
    );
}

#[test]
fn invalid_input_names_the_field() {
    let err = analyze_record_value(
        &json!({
            "name": "Bad Lab", "age": 50, "sex": "male",
            "lab_results": { "potassium": "high" }
        }),
        &TriageConfig::default(),
    )
    .expect_err("non-numeric lab value");
    assert_eq!(
        err.to_string(),
        "Invalid input for `lab_results.potassium`: expected a finite number"
    );
}
