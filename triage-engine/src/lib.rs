//! Rule-based triage of structured patient records.
//!
//! A record is split into per-category readings, each reading is classified
//! against a static reference table, composite rules infer conditions, and
//! the results are folded into a single [`DiagnosticReport`].

use serde_json::Value;
use triage_core::{DiagnosticReport, PatientRecord, TriageConfig, TriageError};

pub mod analyzers;
pub mod correlate;
pub mod ingest;
pub mod ranges;
pub mod report;
pub mod rules;
pub mod service;

pub use ingest::{parse_record_str, parse_record_value};
pub use service::{HealthStatus, Submission, TriageService};

/// Analyze a patient record given as a JSON string.
pub fn analyze_record_str(
    record_json: &str,
    config: &TriageConfig,
) -> Result<DiagnosticReport, TriageError> {
    let record = parse_record_str(record_json)?;
    Ok(analyze(&record, config))
}

/// Analyze a patient record given as a `serde_json::Value`.
pub fn analyze_record_value(
    record: &Value,
    config: &TriageConfig,
) -> Result<DiagnosticReport, TriageError> {
    let record = parse_record_value(record)?;
    Ok(analyze(&record, config))
}

/// Run every analyzer over `record` and compose the report.
///
/// Pure: `submitted_at` is never read, so the same record always yields the
/// same report.
pub fn analyze(record: &PatientRecord, config: &TriageConfig) -> DiagnosticReport {
    let mut findings = Vec::new();
    let mut conditions = Vec::new();
    for analyzer in analyzers::ANALYZERS.iter() {
        let outcome = analyzer.analyze(record, config);
        findings.extend(outcome.findings);
        conditions.extend(outcome.conditions);
    }

    if config.correlate_symptoms {
        if let Some(symptoms) = &record.symptoms {
            conditions = correlate::correlate(symptoms, conditions);
        }
    }

    let overall_risk = report::overall_risk(&findings, &conditions);
    let recommendations = report::compose(record, &findings, &conditions, overall_risk, config);
    let summary = report::summary(record, &findings, overall_risk);

    DiagnosticReport {
        patient_id: record.patient_id.clone(),
        overall_risk,
        summary,
        findings,
        possible_conditions: conditions,
        immediate_actions: recommendations.immediate_actions,
        follow_up_tests: recommendations.follow_up_tests,
        general_recommendations: recommendations.general_recommendations,
    }
}
