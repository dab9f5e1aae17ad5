//! Onboarding field values, limits, and per-field rules.
//!
//! The wizard evaluates these rules as the merchant fills in each step, and
//! the submission service reuses the primitives when it re-validates the
//! final payload. Keeping them here guarantees both sides agree on what a
//! valid phone number or MID looks like.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Minimum trimmed length for names, business names, and designations.
pub const MIN_TEXT_LENGTH: usize = 2;

/// Fewest business locations a merchant can declare.
pub const MIN_LOCATION_COUNT: u32 = 1;
/// Most business locations a merchant can declare.
pub const MAX_LOCATION_COUNT: u32 = 50;

/// Lower bound of the monthly-customers slider.
pub const MIN_MONTHLY_CUSTOMERS: u32 = 100;
/// Upper bound of the monthly-customers slider.
pub const MAX_MONTHLY_CUSTOMERS: u32 = 10_000;
/// Initial slider position for a fresh draft.
pub const DEFAULT_MONTHLY_CUSTOMERS: u32 = 1_000;

/// Exact length of a terminal Merchant ID.
pub const TERMINAL_MID_LENGTH: usize = 9;

/// Country calling code every phone number must start with.
pub const UAE_PHONE_PREFIX: &str = "+971";
/// Number of subscriber digits after the prefix.
pub const UAE_PHONE_DIGITS: usize = 9;
/// Total length of a valid phone number, prefix included.
pub const UAE_PHONE_LENGTH: usize = 13;

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

pub const MSG_NAME: &str = "Name must be at least 2 characters";
pub const MSG_BUSINESS_NAME: &str = "Business name must be at least 2 characters";
pub const MSG_INDUSTRY: &str = "Please select your industry";
pub const MSG_LOCATION_COUNT: &str = "Number of locations must be between 1 and 50";
pub const MSG_EMIRATES: &str = "Please select at least one emirate";
pub const MSG_MONTHLY_CUSTOMERS: &str = "Monthly customers must be between 100 and 10,000";
pub const MSG_TERMINAL_DETAILS: &str = "Terminal MID must be exactly 9 digits";
pub const MSG_EMAIL: &str = "Please enter a valid email address";
pub const MSG_PHONE: &str = "Phone must be in UAE format: +971 followed by 9 digits";
pub const MSG_DESIGNATION: &str = "Designation must be at least 2 characters";
pub const MSG_TERMS: &str = "You must accept the terms and conditions";

// ---------------------------------------------------------------------------
// Industry
// ---------------------------------------------------------------------------

/// Business verticals offered in the industry picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Industry {
    Retail,
    Restaurant,
    Cafe,
    Salon,
    Fitness,
    Hospitality,
    Healthcare,
    Automotive,
    Other,
}

impl Industry {
    pub const ALL: [Industry; 9] = [
        Industry::Retail,
        Industry::Restaurant,
        Industry::Cafe,
        Industry::Salon,
        Industry::Fitness,
        Industry::Hospitality,
        Industry::Healthcare,
        Industry::Automotive,
        Industry::Other,
    ];

    /// Wire value, as posted by the wizard.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Retail => "retail",
            Self::Restaurant => "restaurant",
            Self::Cafe => "cafe",
            Self::Salon => "salon",
            Self::Fitness => "fitness",
            Self::Hospitality => "hospitality",
            Self::Healthcare => "healthcare",
            Self::Automotive => "automotive",
            Self::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Retail => "Retail",
            Self::Restaurant => "Restaurants",
            Self::Cafe => "Cafes & Coffee Shops",
            Self::Salon => "Salons & Spas",
            Self::Fitness => "Fitness & Gyms",
            Self::Hospitality => "Hospitality",
            Self::Healthcare => "Healthcare & Pharmacies",
            Self::Automotive => "Automotive",
            Self::Other => "Other",
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|i| i.as_str() == value)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid industry '{value}'. Must be one of: {:?}",
                    Self::ALL.map(Industry::as_str)
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// Emirate
// ---------------------------------------------------------------------------

/// The seven emirates a merchant can operate in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Emirate {
    Dubai,
    AbuDhabi,
    Sharjah,
    Ajman,
    UmmAlQuwain,
    RasAlKhaimah,
    Fujairah,
}

impl Emirate {
    pub const ALL: [Emirate; 7] = [
        Emirate::Dubai,
        Emirate::AbuDhabi,
        Emirate::Sharjah,
        Emirate::Ajman,
        Emirate::UmmAlQuwain,
        Emirate::RasAlKhaimah,
        Emirate::Fujairah,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dubai => "dubai",
            Self::AbuDhabi => "abu-dhabi",
            Self::Sharjah => "sharjah",
            Self::Ajman => "ajman",
            Self::UmmAlQuwain => "umm-al-quwain",
            Self::RasAlKhaimah => "ras-al-khaimah",
            Self::Fujairah => "fujairah",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Dubai => "Dubai",
            Self::AbuDhabi => "Abu Dhabi",
            Self::Sharjah => "Sharjah",
            Self::Ajman => "Ajman",
            Self::UmmAlQuwain => "Umm Al Quwain",
            Self::RasAlKhaimah => "Ras Al Khaimah",
            Self::Fujairah => "Fujairah",
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|e| e.as_str() == value)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid emirate '{value}'. Must be one of: {:?}",
                    Self::ALL.map(Emirate::as_str)
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// Rule primitives
// ---------------------------------------------------------------------------

/// One `@`, no whitespace on either side, and a dot somewhere in the domain.
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// Trimmed text is at least [`MIN_TEXT_LENGTH`] characters.
pub fn has_min_text_length(value: &str) -> bool {
    value.trim().chars().count() >= MIN_TEXT_LENGTH
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

/// `+971` followed by exactly nine ASCII digits, nothing else.
pub fn is_valid_uae_phone(value: &str) -> bool {
    value.len() == UAE_PHONE_LENGTH
        && value
            .strip_prefix(UAE_PHONE_PREFIX)
            .is_some_and(|rest| rest.len() == UAE_PHONE_DIGITS && rest.bytes().all(|b| b.is_ascii_digit()))
}

/// A MID counts characters, not bytes.
pub fn is_valid_terminal_mid(value: &str) -> bool {
    value.chars().count() == TERMINAL_MID_LENGTH
}

/// Terminal details only matter when the merchant has an RFM terminal.
pub fn terminal_details_satisfied(has_rfm_terminal: bool, terminal_details: Option<&str>) -> bool {
    !has_rfm_terminal || terminal_details.is_some_and(is_valid_terminal_mid)
}

pub fn is_valid_location_count(count: u32) -> bool {
    (MIN_LOCATION_COUNT..=MAX_LOCATION_COUNT).contains(&count)
}

pub fn is_valid_monthly_customers(values: &[u32]) -> bool {
    !values.is_empty()
        && values
            .iter()
            .all(|v| (MIN_MONTHLY_CUSTOMERS..=MAX_MONTHLY_CUSTOMERS).contains(v))
}

/// Normalize an email for storage and duplicate lookups.
pub fn normalize_email(value: &str) -> String {
    value.trim().to_lowercase()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_length_is_measured_after_trimming() {
        assert!(has_min_text_length("Al"));
        assert!(has_min_text_length("  Ahmed  "));
        assert!(!has_min_text_length(" A "));
        assert!(!has_min_text_length(""));
    }

    #[test]
    fn email_pattern() {
        assert!(is_valid_email("ahmed@example.com"));
        assert!(is_valid_email("a.b+c@mail.example.ae"));
        assert!(!is_valid_email("ahmed@example"));
        assert!(!is_valid_email("ahmed@@example.com"));
        assert!(!is_valid_email("ahmed example@x.com"));
        assert!(!is_valid_email("@example.com"));
    }

    #[test]
    fn phone_requires_prefix_and_nine_digits() {
        assert!(is_valid_uae_phone("+971501234123"));
        assert!(!is_valid_uae_phone("+97150123412"));
        assert!(!is_valid_uae_phone("+9715012341234"));
        assert!(!is_valid_uae_phone("+97150"));
        assert!(!is_valid_uae_phone("00971501234123"));
        assert!(!is_valid_uae_phone("+971 50123412"));
        assert!(!is_valid_uae_phone("+97150123412a"));
        assert!(!is_valid_uae_phone("+966501234123"));
    }

    #[test]
    fn terminal_details_only_required_with_terminal() {
        assert!(terminal_details_satisfied(false, None));
        assert!(terminal_details_satisfied(false, Some("")));
        assert!(terminal_details_satisfied(true, Some("123456789")));
        assert!(!terminal_details_satisfied(true, None));
        assert!(!terminal_details_satisfied(true, Some("1234")));
        assert!(!terminal_details_satisfied(true, Some("1234567890")));
    }

    #[test]
    fn location_count_bounds() {
        assert!(is_valid_location_count(1));
        assert!(is_valid_location_count(50));
        assert!(!is_valid_location_count(0));
        assert!(!is_valid_location_count(51));
    }

    #[test]
    fn monthly_customers_bounds() {
        assert!(is_valid_monthly_customers(&[1000]));
        assert!(is_valid_monthly_customers(&[100, 10_000]));
        assert!(!is_valid_monthly_customers(&[]));
        assert!(!is_valid_monthly_customers(&[99]));
        assert!(!is_valid_monthly_customers(&[1000, 10_001]));
    }

    #[test]
    fn industries_parse_from_wire_values() {
        for industry in Industry::ALL {
            assert_eq!(Industry::parse(industry.as_str()).unwrap(), industry);
            assert!(!industry.label().is_empty());
        }
        assert!(Industry::parse("").is_err());
        assert!(Industry::parse("Retail").is_err());
    }

    #[test]
    fn emirates_parse_and_serialize_kebab_case() {
        for emirate in Emirate::ALL {
            assert_eq!(Emirate::parse(emirate.as_str()).unwrap(), emirate);
            let json = serde_json::to_value(emirate).unwrap();
            assert_eq!(json, emirate.as_str());
        }
        assert!(Emirate::parse("riyadh").is_err());
    }

    #[test]
    fn normalize_email_trims_and_lowercases() {
        assert_eq!(normalize_email("  Ahmed@Example.COM "), "ahmed@example.com");
    }
}
