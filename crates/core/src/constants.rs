//! Constants used throughout the care core crate.

/// Default location of the flat JSON patient file when none is configured.
pub const DEFAULT_PATIENT_FILE: &str = "patients.json";

/// Default location of the premium classifier artifact.
pub const DEFAULT_MODEL_PATH: &str = "model/model.json";

/// Version string reported by the predictor health check.
pub const MODEL_VERSION: &str = "1.0.0";

/// Major metros, matched after city normalisation.
pub const TIER_1_CITIES: [&str; 7] = [
    "Mumbai",
    "Delhi",
    "Bangalore",
    "Chennai",
    "Kolkata",
    "Hyderabad",
    "Pune",
];

/// Mid-size cities, matched after city normalisation.
pub const TIER_2_CITIES: [&str; 48] = [
    "Jaipur",
    "Chandigarh",
    "Indore",
    "Lucknow",
    "Patna",
    "Ranchi",
    "Visakhapatnam",
    "Coimbatore",
    "Bhopal",
    "Nagpur",
    "Vadodara",
    "Surat",
    "Rajkot",
    "Jodhpur",
    "Raipur",
    "Amritsar",
    "Varanasi",
    "Agra",
    "Dehradun",
    "Mysore",
    "Jabalpur",
    "Guwahati",
    "Thiruvananthapuram",
    "Ludhiana",
    "Nashik",
    "Allahabad",
    "Udaipur",
    "Aurangabad",
    "Hubli",
    "Belgaum",
    "Salem",
    "Vijayawada",
    "Tiruchirappalli",
    "Bhavnagar",
    "Gwalior",
    "Dhanbad",
    "Bareilly",
    "Aligarh",
    "Gaya",
    "Kozhikode",
    "Warangal",
    "Kolhapur",
    "Bilaspur",
    "Jalandhar",
    "Noida",
    "Guntur",
    "Asansol",
    "Siliguri",
];

/// BMI below which a patient is classed as underweight.
pub const UNDERWEIGHT_BMI: f64 = 18.5;

/// BMI at or above which a patient is classed as obese.
pub const OBESE_BMI: f64 = 30.0;
