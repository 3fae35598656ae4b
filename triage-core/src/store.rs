//! Patient lookup capability injected into the service layer.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::{PatientRecord, PatientSummary, TriageError};

/// Lookup-by-id storage for submitted records.
///
/// Implementations are append-only: a record is never replaced once stored.
pub trait PatientStore: Send + Sync {
    fn put(&self, record: PatientRecord) -> Result<(), TriageError>;

    fn get(&self, patient_id: &str) -> Option<PatientRecord>;

    /// Summaries ordered by submission time, then id.
    fn list(&self) -> Vec<PatientSummary>;
}

/// Process-local store backed by a `HashMap` behind a `RwLock`.
#[derive(Debug, Default)]
pub struct InMemoryPatientStore {
    records: RwLock<HashMap<String, PatientRecord>>,
}

impl InMemoryPatientStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PatientStore for InMemoryPatientStore {
    fn put(&self, record: PatientRecord) -> Result<(), TriageError> {
        let mut records = self
            .records
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if records.contains_key(&record.patient_id) {
            return Err(TriageError::DuplicatePatient(record.patient_id));
        }
        records.insert(record.patient_id.clone(), record);
        Ok(())
    }

    fn get(&self, patient_id: &str) -> Option<PatientRecord> {
        self.records
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(patient_id)
            .cloned()
    }

    fn list(&self) -> Vec<PatientSummary> {
        let records = self
            .records
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut summaries: Vec<PatientSummary> =
            records.values().map(PatientRecord::summary).collect();
        summaries.sort_by(|a, b| {
            a.submitted_at
                .cmp(&b.submitted_at)
                .then_with(|| a.patient_id.cmp(&b.patient_id))
        });
        summaries
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use chrono::{Duration, Utc};

    use super::*;
    use crate::Sex;

    fn record(id: &str) -> PatientRecord {
        PatientRecord::new(id, format!("Patient {id}"), 40, Sex::Female)
    }

    #[test]
    fn put_then_get_round_trips() {
        let store = InMemoryPatientStore::new();
        store.put(record("P1")).expect("first insert succeeds");
        let stored = store.get("P1").expect("record is stored");
        assert_eq!(stored.name, "Patient P1");
        assert!(store.get("P2").is_none());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let store = InMemoryPatientStore::new();
        store.put(record("P1")).expect("first insert succeeds");
        let err = store.put(record("P1")).expect_err("second insert fails");
        assert_eq!(err, TriageError::DuplicatePatient("P1".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn list_orders_by_submission_time_then_id() {
        let store = InMemoryPatientStore::new();
        let now = Utc::now();

        let mut late = record("A");
        late.submitted_at = now;
        let mut early = record("B");
        early.submitted_at = now - Duration::minutes(5);
        let mut tied = record("C");
        tied.submitted_at = now;

        store.put(tied).expect("insert");
        store.put(late).expect("insert");
        store.put(early).expect("insert");

        let ids: Vec<String> = store.list().into_iter().map(|s| s.patient_id).collect();
        assert_eq!(ids, vec!["B", "A", "C"]);
    }

    #[test]
    fn concurrent_writers_do_not_lose_records() {
        let store = Arc::new(InMemoryPatientStore::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || store.put(record(&format!("P{i}"))))
            })
            .collect();

        for handle in handles {
            handle
                .join()
                .expect("writer thread finishes")
                .expect("insert succeeds");
        }
        assert_eq!(store.len(), 8);
    }
}
