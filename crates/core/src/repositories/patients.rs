//! Patient record service.
//!
//! Every operation is a full read-modify-write of the record set held by the
//! configured [`PatientStore`]. There is no locking and no optimistic
//! concurrency token; mutations fail before any write when validation,
//! conflict or lookup checks do not pass.

use crate::patient::{Patient, PatientInput, PatientUpdate, StoredPatient};
use crate::repositories::store::{JsonFileStore, PatientRecords, PatientStore};
use crate::validation::require_one_of;
use crate::{CoreConfig, CoreError, CoreResult};
use std::sync::Arc;

/// Column a patient listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Height,
    Weight,
    Bmi,
}

impl SortField {
    pub const ALL: [(&'static str, SortField); 3] = [
        ("height", SortField::Height),
        ("weight", SortField::Weight),
        ("bmi", SortField::Bmi),
    ];

    pub fn parse(value: &str) -> CoreResult<Self> {
        require_one_of("sort_by", value, &Self::ALL)
    }

    fn value(self, patient: &StoredPatient) -> f64 {
        match self {
            SortField::Height => patient.height,
            SortField::Weight => patient.weight,
            SortField::Bmi => patient.bmi,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub const ALL: [(&'static str, SortOrder); 2] =
        [("asc", SortOrder::Asc), ("desc", SortOrder::Desc)];

    pub fn parse(value: &str) -> CoreResult<Self> {
        require_one_of("order_by", value, &Self::ALL)
    }
}

/// Pure patient data operations - no API concerns
#[derive(Clone)]
pub struct PatientService {
    store: Arc<dyn PatientStore>,
}

impl PatientService {
    pub fn new(store: Arc<dyn PatientStore>) -> Self {
        Self { store }
    }

    /// Service backed by the JSON file named in the configuration.
    pub fn from_config(cfg: &CoreConfig) -> Self {
        Self::new(Arc::new(JsonFileStore::new(cfg.patient_file())))
    }

    /// Every stored patient keyed by id.
    ///
    /// # Errors
    ///
    /// Returns a read or deserialisation error if the backing store cannot be
    /// loaded.
    pub fn get_all(&self) -> CoreResult<PatientRecords> {
        self.store.load()
    }

    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if no patient has this id.
    pub fn get(&self, id: &str) -> CoreResult<StoredPatient> {
        let mut records = self.store.load()?;
        records
            .swap_remove(id)
            .ok_or_else(|| CoreError::NotFound(id.to_string()))
    }

    /// All patients ordered by `sort_by` (`height`, `weight` or `bmi`) in
    /// `order_by` direction (`asc` or `desc`).
    ///
    /// The sort is stable: patients with equal values keep the store's
    /// document order in both directions.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for an unknown field or order before
    /// the store is touched.
    pub fn list_sorted(&self, sort_by: &str, order_by: &str) -> CoreResult<Vec<StoredPatient>> {
        let field = SortField::parse(sort_by)?;
        let order = SortOrder::parse(order_by)?;
        Ok(self
            .sorted(field, order)?
            .into_iter()
            .map(|(_, patient)| patient)
            .collect())
    }

    /// Sorted `(id, patient)` pairs, with the same tie rule as
    /// [`PatientService::list_sorted`].
    pub fn sorted(
        &self,
        field: SortField,
        order: SortOrder,
    ) -> CoreResult<Vec<(String, StoredPatient)>> {
        let mut patients: Vec<(String, StoredPatient)> = self.store.load()?.into_iter().collect();

        patients.sort_by(|(_, a), (_, b)| {
            let ordering = field.value(a).total_cmp(&field.value(b));
            match order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
        Ok(patients)
    }

    /// Validate and insert a new patient.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for invalid input and
    /// `CoreError::Conflict` if the id is already present.
    pub fn create(&self, input: PatientInput) -> CoreResult<StoredPatient> {
        let patient = Patient::new(input)?;
        let mut records = self.store.load()?;

        if records.contains_key(patient.id()) {
            return Err(CoreError::Conflict(patient.id().to_string()));
        }

        let (id, stored) = patient.into_stored();
        records.insert(id.clone(), stored.clone());
        self.store.save(&records)?;

        tracing::info!("created patient {}", id);
        Ok(stored)
    }

    /// Apply a partial update, re-validating and re-deriving the full record.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the id is absent and
    /// `CoreError::Validation` if the merged record is invalid.
    pub fn update(&self, id: &str, update: PatientUpdate) -> CoreResult<StoredPatient> {
        let mut records = self.store.load()?;
        let existing = records
            .get(id)
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;

        let patient = Patient::new(update.merge_into(id, existing))?;
        let (_, stored) = patient.into_stored();
        records.insert(id.to_string(), stored.clone());
        self.store.save(&records)?;

        tracing::info!("updated patient {}", id);
        Ok(stored)
    }

    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the id is absent; nothing is written.
    pub fn delete(&self, id: &str) -> CoreResult<()> {
        let mut records = self.store.load()?;
        if records.shift_remove(id).is_none() {
            return Err(CoreError::NotFound(id.to_string()));
        }
        self.store.save(&records)?;

        tracing::info!("deleted patient {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patient::{rounded_bmi, Verdict};
    use crate::repositories::store::InMemoryStore;
    use tempfile::TempDir;

    fn input(id: &str, height: f64, weight: f64) -> PatientInput {
        PatientInput {
            id: id.into(),
            name: format!("Patient {id}"),
            city: "Delhi".into(),
            age: 35,
            gender: "male".into(),
            height,
            weight,
        }
    }

    fn service() -> PatientService {
        PatientService::new(Arc::new(InMemoryStore::new()))
    }

    #[test]
    fn create_then_get_round_trips() {
        let svc = service();
        svc.create(input("P001", 1.72, 70.0)).unwrap();

        let stored = svc.get("P001").unwrap();
        assert_eq!(stored.name, "Patient P001");
        assert_eq!(stored.city, "Delhi");
        assert_eq!(stored.age, 35);
        assert_eq!(stored.height, 1.72);
        assert_eq!(stored.weight, 70.0);
        assert_eq!(stored.bmi, rounded_bmi(1.72, 70.0));
        assert_eq!(stored.verdict, Verdict::of(stored.bmi));
    }

    #[test]
    fn create_rejects_duplicate_id() {
        let svc = service();
        svc.create(input("P001", 1.72, 70.0)).unwrap();

        let err = svc.create(input("P001", 1.60, 50.0)).unwrap_err();
        assert!(matches!(err, CoreError::Conflict(id) if id == "P001"));
        assert_eq!(svc.get("P001").unwrap().weight, 70.0);
    }

    #[test]
    fn create_rejects_invalid_input_without_writing() {
        let svc = service();
        let err = svc.create(input("P001", 0.0, 70.0)).unwrap_err();
        assert_eq!(err.field(), Some("height"));
        assert!(svc.get_all().unwrap().is_empty());
    }

    #[test]
    fn get_unknown_is_not_found() {
        let err = service().get("P404").unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));
    }

    #[test]
    fn update_weight_recomputes_derived_fields() {
        let svc = service();
        svc.create(input("P001", 1.70, 60.0)).unwrap();
        let before = svc.get("P001").unwrap();
        assert_eq!(before.verdict, Verdict::Normal);

        svc.update(
            "P001",
            PatientUpdate {
                weight: Some(100.0),
                ..Default::default()
            },
        )
        .unwrap();

        let after = svc.get("P001").unwrap();
        assert_eq!(after.name, before.name);
        assert_eq!(after.age, before.age);
        assert_eq!(after.city, before.city);
        assert_eq!(after.gender, before.gender);
        assert_eq!(after.height, 1.70);
        assert_eq!(after.bmi, rounded_bmi(1.70, 100.0));
        assert_eq!(after.verdict, Verdict::Obese);
    }

    #[test]
    fn update_unknown_is_not_found() {
        let err = service()
            .update("P404", PatientUpdate::default())
            .unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));
    }

    #[test]
    fn update_with_invalid_value_leaves_record() {
        let svc = service();
        svc.create(input("P001", 1.70, 60.0)).unwrap();

        let err = svc
            .update(
                "P001",
                PatientUpdate {
                    age: Some(0),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert_eq!(err.field(), Some("age"));
        assert_eq!(svc.get("P001").unwrap().age, 35);
    }

    #[test]
    fn sort_by_bmi_desc_is_non_increasing() {
        let svc = service();
        svc.create(input("P001", 1.70, 60.0)).unwrap();
        svc.create(input("P002", 1.60, 90.0)).unwrap();
        svc.create(input("P003", 1.90, 55.0)).unwrap();
        svc.create(input("P004", 1.70, 60.0)).unwrap();

        let sorted = svc.list_sorted("bmi", "desc").unwrap();
        assert_eq!(sorted.len(), 4);
        assert!(sorted.windows(2).all(|w| w[0].bmi >= w[1].bmi));

        let asc = svc.list_sorted("height", "asc").unwrap();
        assert!(asc.windows(2).all(|w| w[0].height <= w[1].height));
    }

    #[test]
    fn sort_ties_keep_store_order() {
        let svc = service();
        svc.create(input("P002", 1.70, 60.0)).unwrap();
        svc.create(input("P001", 1.70, 60.0)).unwrap();

        for order in ["asc", "desc"] {
            let sorted = svc.list_sorted("weight", order).unwrap();
            let names: Vec<&str> = sorted.iter().map(|p| p.name.as_str()).collect();
            assert_eq!(names, ["Patient P002", "Patient P001"]);
        }
    }

    #[test]
    fn sort_ties_follow_preloaded_order() {
        let mut records = PatientRecords::new();
        for (id, name) in [("P003", "Chitra"), ("P001", "Arjun"), ("P002", "Bela")] {
            let (_, stored) = Patient::new(PatientInput {
                name: name.into(),
                ..input(id, 1.65, 58.0)
            })
            .unwrap()
            .into_stored();
            records.insert(id.into(), stored);
        }
        let svc = PatientService::new(Arc::new(InMemoryStore::with_records(records)));

        let names: Vec<String> = svc
            .list_sorted("bmi", "desc")
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, ["Chitra", "Arjun", "Bela"]);
    }

    #[test]
    fn sorted_pairs_carry_ids() {
        let svc = service();
        svc.create(input("P001", 1.70, 90.0)).unwrap();
        svc.create(input("P002", 1.70, 50.0)).unwrap();

        let ids: Vec<String> = svc
            .sorted(SortField::Weight, SortOrder::Asc)
            .unwrap()
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(ids, ["P002", "P001"]);
    }

    #[test]
    fn delete_keeps_remaining_order() {
        let svc = service();
        for id in ["P003", "P001", "P002"] {
            svc.create(input(id, 1.70, 60.0)).unwrap();
        }
        svc.delete("P003").unwrap();
        svc.update(
            "P001",
            PatientUpdate {
                weight: Some(65.0),
                ..Default::default()
            },
        )
        .unwrap();

        let ids: Vec<String> = svc.get_all().unwrap().into_keys().collect();
        assert_eq!(ids, ["P001", "P002"]);
    }

    #[test]
    fn sort_rejects_unknown_field_and_order() {
        let svc = service();
        assert_eq!(
            svc.list_sorted("age", "asc").unwrap_err().field(),
            Some("sort_by")
        );
        assert_eq!(
            svc.list_sorted("bmi", "sideways").unwrap_err().field(),
            Some("order_by")
        );
    }

    #[test]
    fn delete_unknown_leaves_store_unchanged() {
        let svc = service();
        svc.create(input("P001", 1.70, 60.0)).unwrap();
        let before = svc.get_all().unwrap();

        let err = svc.delete("P404").unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));
        assert_eq!(svc.get_all().unwrap(), before);
    }

    #[test]
    fn delete_then_get_is_not_found() {
        let svc = service();
        svc.create(input("P001", 1.70, 60.0)).unwrap();
        svc.delete("P001").unwrap();
        assert!(matches!(svc.get("P001"), Err(CoreError::NotFound(_))));
    }

    #[test]
    fn file_backed_service_persists_between_instances() {
        let dir = TempDir::new().unwrap();
        let cfg = CoreConfig::new(dir.path().join("patients.json"), "model.json".into()).unwrap();

        PatientService::from_config(&cfg)
            .create(input("P001", 1.70, 60.0))
            .unwrap();

        let reopened = PatientService::from_config(&cfg);
        assert_eq!(reopened.get_all().unwrap().len(), 1);
        assert_eq!(reopened.get("P001").unwrap().name, "Patient P001");
    }
}
