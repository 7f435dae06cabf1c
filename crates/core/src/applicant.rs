//! Applicant facts and the derived attributes fed to the premium classifier.
//!
//! An [`Applicant`] is built from raw [`ApplicantInput`] through
//! [`Applicant::new`], which validates every field and eagerly computes BMI,
//! age group, lifestyle risk and city tier. The resulting value is immutable.

use crate::city::{normalise_city, CityTier};
use crate::validation::{require_age, require_measure, require_one_of};
use crate::CoreResult;
use care_types::{Age, PositiveMeasure};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Occupation {
    Retired,
    Freelancer,
    Student,
    GovernmentJob,
    BusinessOwner,
    Unemployed,
    PrivateJob,
}

impl Occupation {
    pub const ALL: [(&'static str, Occupation); 7] = [
        ("retired", Occupation::Retired),
        ("freelancer", Occupation::Freelancer),
        ("student", Occupation::Student),
        ("government_job", Occupation::GovernmentJob),
        ("business_owner", Occupation::BusinessOwner),
        ("unemployed", Occupation::Unemployed),
        ("private_job", Occupation::PrivateJob),
    ];

    pub fn as_str(self) -> &'static str {
        Self::ALL
            .iter()
            .find(|(_, o)| *o == self)
            .map(|(name, _)| *name)
            .unwrap_or_default()
    }

    pub fn parse(value: &str) -> CoreResult<Self> {
        require_one_of("occupation", value, &Self::ALL)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeGroup {
    Young,
    Adult,
    MiddleAged,
    Senior,
}

impl AgeGroup {
    pub fn of(age: Age) -> Self {
        match age.years() {
            0..=24 => AgeGroup::Young,
            25..=44 => AgeGroup::Adult,
            45..=59 => AgeGroup::MiddleAged,
            _ => AgeGroup::Senior,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AgeGroup::Young => "young",
            AgeGroup::Adult => "adult",
            AgeGroup::MiddleAged => "middle_aged",
            AgeGroup::Senior => "senior",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LifestyleRisk {
    High,
    Medium,
    Low,
}

impl LifestyleRisk {
    pub fn of(smoker: bool, bmi: f64) -> Self {
        if smoker && bmi > 30.0 {
            LifestyleRisk::High
        } else if smoker || bmi > 27.0 {
            LifestyleRisk::Medium
        } else {
            LifestyleRisk::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LifestyleRisk::High => "high",
            LifestyleRisk::Medium => "medium",
            LifestyleRisk::Low => "low",
        }
    }
}

/// Raw applicant facts as supplied by a caller, before validation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApplicantInput {
    pub age: i64,
    pub height: f64,
    pub weight: f64,
    pub city: String,
    pub income_lpa: i64,
    pub smoker: bool,
    pub occupation: String,
}

/// A validated applicant with all derived attributes computed.
#[derive(Debug, Clone, PartialEq)]
pub struct Applicant {
    age: Age,
    height: PositiveMeasure,
    weight: PositiveMeasure,
    city: String,
    income_lpa: i64,
    smoker: bool,
    occupation: Occupation,
    bmi: f64,
    age_group: AgeGroup,
    lifestyle_risk: LifestyleRisk,
    city_tier: CityTier,
}

impl Applicant {
    /// Validate raw input and compute the derived attributes.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` naming the first offending field when
    /// age, height or weight is not positive, or occupation is not one of the
    /// known values.
    pub fn new(input: ApplicantInput) -> CoreResult<Self> {
        let age = require_age(input.age)?;
        let height = require_measure("height", input.height)?;
        let weight = require_measure("weight", input.weight)?;
        let occupation = Occupation::parse(&input.occupation)?;
        let city = normalise_city(&input.city);

        let bmi = weight.get() / (height.get() * height.get());

        Ok(Self {
            age,
            height,
            weight,
            city_tier: CityTier::of(&city),
            city,
            income_lpa: input.income_lpa,
            smoker: input.smoker,
            occupation,
            bmi,
            age_group: AgeGroup::of(age),
            lifestyle_risk: LifestyleRisk::of(input.smoker, bmi),
        })
    }

    pub fn age(&self) -> Age {
        self.age
    }

    pub fn height(&self) -> f64 {
        self.height.get()
    }

    pub fn weight(&self) -> f64 {
        self.weight.get()
    }

    /// City after trimming and title casing.
    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn income_lpa(&self) -> i64 {
        self.income_lpa
    }

    pub fn smoker(&self) -> bool {
        self.smoker
    }

    pub fn occupation(&self) -> Occupation {
        self.occupation
    }

    /// Unrounded body-mass index.
    pub fn bmi(&self) -> f64 {
        self.bmi
    }

    pub fn age_group(&self) -> AgeGroup {
        self.age_group
    }

    pub fn lifestyle_risk(&self) -> LifestyleRisk {
        self.lifestyle_risk
    }

    pub fn city_tier(&self) -> CityTier {
        self.city_tier
    }

    /// The feature record the classifier was trained on.
    pub fn features(&self) -> FeatureRecord {
        FeatureRecord {
            age_group: self.age_group,
            bmi: self.bmi,
            lifestyle_risk: self.lifestyle_risk,
            city_tier: self.city_tier,
            income_lpa: self.income_lpa,
            occupation: self.occupation,
        }
    }
}

/// One row of classifier input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureRecord {
    pub age_group: AgeGroup,
    pub bmi: f64,
    pub lifestyle_risk: LifestyleRisk,
    pub city_tier: CityTier,
    pub income_lpa: i64,
    pub occupation: Occupation,
}

impl FeatureRecord {
    /// Value of a numeric column by its training name.
    pub fn numeric(&self, feature: &str) -> Option<f64> {
        match feature {
            "bmi" => Some(self.bmi),
            "city_tier" => Some(f64::from(self.city_tier.number())),
            "income_lpa" => Some(self.income_lpa as f64),
            _ => None,
        }
    }

    /// Value of a categorical column by its training name.
    pub fn categorical(&self, feature: &str) -> Option<&'static str> {
        match feature {
            "age_group" => Some(self.age_group.as_str()),
            "lifestyle_risk" => Some(self.lifestyle_risk.as_str()),
            "occupation" => Some(self.occupation.as_str()),
            "city_tier" => Some(match self.city_tier {
                CityTier::Metro => "1",
                CityTier::MidSize => "2",
                CityTier::Other => "3",
            }),
            _ => None,
        }
    }
}
