//! Patient records and their derived fields.
//!
//! [`Patient::new`] is the single construction path: it validates raw input and
//! computes `bmi` and `verdict` from the current height and weight. Updates
//! are applied by merging into a [`PatientInput`] and constructing again, so
//! derived fields are never stored stale.

use crate::constants::{OBESE_BMI, UNDERWEIGHT_BMI};
use crate::validation::{require_age, require_measure, require_one_of, require_text};
use crate::CoreResult;
use care_types::{Age, NonEmptyText, PositiveMeasure};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Others,
}

impl Gender {
    pub const ALL: [(&'static str, Gender); 3] = [
        ("male", Gender::Male),
        ("female", Gender::Female),
        ("others", Gender::Others),
    ];

    pub fn parse(value: &str) -> CoreResult<Self> {
        require_one_of("gender", value, &Self::ALL)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Others => "others",
        }
    }
}

/// BMI category of a patient record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    Underweight,
    Normal,
    Obese,
}

impl Verdict {
    pub fn of(bmi: f64) -> Self {
        if bmi < UNDERWEIGHT_BMI {
            Verdict::Underweight
        } else if bmi < OBESE_BMI {
            Verdict::Normal
        } else {
            Verdict::Obese
        }
    }
}

/// Body-mass index rounded to two decimal places.
pub fn rounded_bmi(height: f64, weight: f64) -> f64 {
    (weight / (height * height) * 100.0).round() / 100.0
}

/// A full patient record as supplied by a caller, including the id.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PatientInput {
    pub id: String,
    pub name: String,
    pub city: String,
    pub age: i64,
    pub gender: String,
    pub height: f64,
    pub weight: f64,
}

/// A validated patient with derived fields computed.
#[derive(Debug, Clone, PartialEq)]
pub struct Patient {
    id: NonEmptyText,
    name: NonEmptyText,
    city: NonEmptyText,
    age: Age,
    gender: Gender,
    height: PositiveMeasure,
    weight: PositiveMeasure,
    bmi: f64,
    verdict: Verdict,
}

impl Patient {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` naming the first invalid field.
    pub fn new(input: PatientInput) -> CoreResult<Self> {
        let id = require_text("id", &input.id)?;
        let name = require_text("name", &input.name)?;
        let city = require_text("city", &input.city)?;
        let age = require_age(input.age)?;
        let gender = Gender::parse(&input.gender)?;
        let height = require_measure("height", input.height)?;
        let weight = require_measure("weight", input.weight)?;

        let bmi = rounded_bmi(height.get(), weight.get());

        Ok(Self {
            id,
            name,
            city,
            age,
            gender,
            height,
            weight,
            bmi,
            verdict: Verdict::of(bmi),
        })
    }

    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    pub fn bmi(&self) -> f64 {
        self.bmi
    }

    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    /// Split into the storage key and the stored value.
    pub fn into_stored(self) -> (String, StoredPatient) {
        (
            self.id.into_inner(),
            StoredPatient {
                name: self.name.into_inner(),
                city: self.city.into_inner(),
                age: self.age.years(),
                gender: self.gender,
                height: self.height.get(),
                weight: self.weight.get(),
                bmi: self.bmi,
                verdict: self.verdict,
            },
        )
    }
}

/// A patient as persisted: keyed externally by id, so the id is not repeated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredPatient {
    pub name: String,
    pub city: String,
    pub age: u32,
    pub gender: Gender,
    pub height: f64,
    pub weight: f64,
    pub bmi: f64,
    pub verdict: Verdict,
}

impl StoredPatient {
    /// Reattach the id, producing raw input suitable for [`Patient::new`].
    pub fn to_input(&self, id: &str) -> PatientInput {
        PatientInput {
            id: id.to_string(),
            name: self.name.clone(),
            city: self.city.clone(),
            age: i64::from(self.age),
            gender: self.gender.as_str().to_string(),
            height: self.height,
            weight: self.weight,
        }
    }
}

/// Fields a caller may change on an existing patient. Unset fields are kept.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PatientUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub weight: Option<f64>,
}

impl PatientUpdate {
    /// Overlay the provided fields onto an existing record.
    pub fn merge_into(self, id: &str, existing: &StoredPatient) -> PatientInput {
        let mut input = existing.to_input(id);
        if let Some(name) = self.name {
            input.name = name;
        }
        if let Some(city) = self.city {
            input.city = city;
        }
        if let Some(age) = self.age {
            input.age = age;
        }
        if let Some(gender) = self.gender {
            input.gender = gender;
        }
        if let Some(height) = self.height {
            input.height = height;
        }
        if let Some(weight) = self.weight {
            input.weight = weight;
        }
        input
    }
}
