//! Small validated value types shared across the care services.

/// Errors that can occur when creating validated value types.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValueError {
    /// The input text was empty or contained only whitespace
    #[error("must not be empty")]
    Empty,
    /// The number was zero, negative or not finite
    #[error("must be greater than 0")]
    NotPositive,
}

/// A string type that guarantees non-empty content.
///
/// The input is trimmed of leading and trailing whitespace during construction.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::Empty` if the trimmed input is empty.
    pub fn new(input: impl AsRef<str>) -> Result<Self, ValueError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ValueError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

/// A finite floating-point measurement strictly greater than zero.
///
/// Used for body measurements (height in metres, weight in kilograms).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct PositiveMeasure(f64);

impl PositiveMeasure {
    /// # Errors
    ///
    /// Returns `ValueError::NotPositive` for zero, negative, NaN or infinite values.
    pub fn new(value: f64) -> Result<Self, ValueError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(ValueError::NotPositive);
        }
        Ok(Self(value))
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl serde::Serialize for PositiveMeasure {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_f64(self.0)
    }
}

impl<'de> serde::Deserialize<'de> for PositiveMeasure {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let v = f64::deserialize(deserializer)?;
        PositiveMeasure::new(v).map_err(serde::de::Error::custom)
    }
}

/// An age in whole years, strictly greater than zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Age(u32);

impl Age {
    /// Accepts any signed input so that negative values from callers are
    /// reported as validation failures rather than decode failures.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::NotPositive` if `years` is zero, negative or does
    /// not fit in a `u32`.
    pub fn new(years: i64) -> Result<Self, ValueError> {
        if years <= 0 {
            return Err(ValueError::NotPositive);
        }
        u32::try_from(years)
            .map(Self)
            .map_err(|_| ValueError::NotPositive)
    }

    pub fn years(self) -> u32 {
        self.0
    }
}

impl serde::Serialize for Age {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u32(self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Age {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let v = i64::deserialize(deserializer)?;
        Age::new(v).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_text_trims_input() {
        let text = NonEmptyText::new("  Mumbai \n").unwrap();
        assert_eq!(text.as_str(), "Mumbai");
    }

    #[test]
    fn non_empty_text_rejects_whitespace() {
        assert_eq!(NonEmptyText::new("   "), Err(ValueError::Empty));
        assert_eq!(NonEmptyText::new(""), Err(ValueError::Empty));
    }

    #[test]
    fn positive_measure_rejects_zero_negative_and_nan() {
        assert_eq!(PositiveMeasure::new(0.0), Err(ValueError::NotPositive));
        assert_eq!(PositiveMeasure::new(-1.5), Err(ValueError::NotPositive));
        assert_eq!(PositiveMeasure::new(f64::NAN), Err(ValueError::NotPositive));
        assert_eq!(
            PositiveMeasure::new(f64::INFINITY),
            Err(ValueError::NotPositive)
        );
        assert_eq!(PositiveMeasure::new(1.72).unwrap().get(), 1.72);
    }

    #[test]
    fn age_rejects_non_positive() {
        assert_eq!(Age::new(0), Err(ValueError::NotPositive));
        assert_eq!(Age::new(-3), Err(ValueError::NotPositive));
        assert_eq!(Age::new(i64::MAX), Err(ValueError::NotPositive));
        assert_eq!(Age::new(42).unwrap().years(), 42);
    }

    #[test]
    fn deserialize_applies_validation() {
        let err = serde_json::from_str::<PositiveMeasure>("-2.0").unwrap_err();
        assert!(err.to_string().contains("greater than 0"));

        let age: Age = serde_json::from_str("30").unwrap();
        assert_eq!(age.years(), 30);
    }
}
