//! Transport-free service facade: submit, look up, list, health.

use log::{info, warn};
use serde::Serialize;
use serde_json::Value;
use triage_core::{
    DiagnosticReport, InMemoryPatientStore, PatientRecord, PatientStore, PatientSummary,
    TriageConfig, TriageError,
};

use crate::{analyze, ingest};

/// Result of a successful submission.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Submission {
    pub patient_id: String,
    pub report: DiagnosticReport,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

pub struct TriageService<S = InMemoryPatientStore> {
    store: S,
    config: TriageConfig,
}

impl Default for TriageService<InMemoryPatientStore> {
    fn default() -> Self {
        Self::new(InMemoryPatientStore::new(), TriageConfig::default())
    }
}

impl<S: PatientStore> TriageService<S> {
    pub fn new(store: S, config: TriageConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &TriageConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn submit_str(&self, json: &str) -> Result<Submission, TriageError> {
        let record = ingest::parse_record_str(json).inspect_err(log_rejection)?;
        self.submit_record(record)
    }

    pub fn submit_value(&self, value: &Value) -> Result<Submission, TriageError> {
        let record = ingest::parse_record_value(value).inspect_err(log_rejection)?;
        self.submit_record(record)
    }

    /// Store an already-parsed record and analyze it.
    pub fn submit_record(&self, record: PatientRecord) -> Result<Submission, TriageError> {
        let report = analyze(&record, &self.config);
        let patient_id = record.patient_id.clone();
        self.store.put(record).inspect_err(log_rejection)?;

        info!(
            "patient {patient_id}: overall risk {}, {} finding(s), {} condition(s)",
            report.overall_risk,
            report.findings.len(),
            report.possible_conditions.len()
        );
        Ok(Submission { patient_id, report })
    }

    pub fn patient(&self, patient_id: &str) -> Result<PatientRecord, TriageError> {
        self.store
            .get(patient_id)
            .ok_or_else(|| TriageError::UnknownPatient(patient_id.to_string()))
    }

    pub fn patients(&self) -> Vec<PatientSummary> {
        self.store.list()
    }

    pub fn health(&self) -> HealthStatus {
        HealthStatus {
            status: "healthy",
            service: "Patient Triage Engine",
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

fn log_rejection(err: &TriageError) {
    warn!("submission rejected: {err}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use triage_core::RiskLevel;

    fn service() -> TriageService {
        TriageService::default()
    }

    #[test]
    fn submit_stores_and_analyzes() {
        let service = service();
        let submission = service
            .submit_value(&json!({
                "patient_id": "P-7",
                "name": "Lena Novak",
                "age": 66,
                "sex": "female",
                "lab_results": { "fasting_glucose": 131 }
            }))
            .expect("submission succeeds");

        assert_eq!(submission.patient_id, "P-7");
        assert_eq!(submission.report.overall_risk, RiskLevel::High);
        assert_eq!(service.patient("P-7").expect("stored").name, "Lena Novak");
        assert_eq!(service.patients().len(), 1);
    }

    #[test]
    fn rejected_input_is_not_stored() {
        let service = service();
        let err = service
            .submit_str(r#"{"name": "No Age", "sex": "male"}"#)
            .expect_err("age is required");
        assert_eq!(err, TriageError::invalid("age", "is required"));
        assert!(service.store().is_empty());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let service = service();
        let record = json!({ "patient_id": "P-9", "name": "A", "age": 30, "sex": "male" });
        service.submit_value(&record).expect("first submission");
        assert_eq!(
            service.submit_value(&record).expect_err("second submission"),
            TriageError::DuplicatePatient("P-9".to_string())
        );
    }

    #[test]
    fn unknown_patient_lookup_fails() {
        let service = service();
        assert_eq!(
            service.patient("missing").expect_err("nothing stored"),
            TriageError::UnknownPatient("missing".to_string())
        );
    }

    #[test]
    fn health_reports_the_crate_version() {
        let health = service().health();
        assert_eq!(health.status, "healthy");
        assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
    }
}
