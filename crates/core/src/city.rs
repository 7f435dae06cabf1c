//! City normalisation and tier lookup.

use crate::constants::{TIER_1_CITIES, TIER_2_CITIES};

/// A city's classification bucket, used as a categorical predictor feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CityTier {
    Metro = 1,
    MidSize = 2,
    Other = 3,
}

impl CityTier {
    pub fn number(self) -> u8 {
        self as u8
    }

    /// Look up the tier of an already-normalised city name.
    ///
    /// Matching is exact; callers should pass the output of [`normalise_city`].
    pub fn of(city: &str) -> Self {
        if TIER_1_CITIES.contains(&city) {
            CityTier::Metro
        } else if TIER_2_CITIES.contains(&city) {
            CityTier::MidSize
        } else {
            CityTier::Other
        }
    }
}

impl serde::Serialize for CityTier {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.number())
    }
}

/// Trim surrounding whitespace and convert to title case.
///
/// A letter starts a new word whenever the previous character is not a letter,
/// so `"new delhi"` becomes `"New Delhi"` and `"o'neil"` becomes `"O'Neil"`.
pub fn normalise_city(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut previous_is_letter = false;

    for c in raw.trim().chars() {
        if c.is_alphabetic() {
            if previous_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            out.push(c);
            previous_is_letter = false;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalisation_trims_and_title_cases() {
        assert_eq!(normalise_city(" mumbai "), "Mumbai");
        assert_eq!(normalise_city("NEW DELHI"), "New Delhi");
        assert_eq!(normalise_city("o'neil"), "O'Neil");
        assert_eq!(normalise_city("3rd street"), "3Rd Street");
        assert_eq!(normalise_city(""), "");
    }

    #[test]
    fn normalisation_is_idempotent_for_lookup() {
        for raw in [" mumbai ", "Mumbai", "MUMBAI", "\tmUmBaI\n"] {
            assert_eq!(CityTier::of(&normalise_city(raw)), CityTier::Metro);
        }
    }

    #[test]
    fn tiers_follow_lookup_tables() {
        assert_eq!(CityTier::of("Pune"), CityTier::Metro);
        assert_eq!(CityTier::of("Jaipur"), CityTier::MidSize);
        assert_eq!(CityTier::of("Siliguri"), CityTier::MidSize);
        assert_eq!(CityTier::of("Springfield"), CityTier::Other);
        // lookup itself does not normalise
        assert_eq!(CityTier::of("pune"), CityTier::Other);
    }

    #[test]
    fn tier_serialises_as_number() {
        assert_eq!(serde_json::to_string(&CityTier::MidSize).unwrap(), "2");
    }
}
