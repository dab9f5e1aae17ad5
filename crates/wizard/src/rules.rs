//! Per-field validation for the wizard.
//!
//! [`validate_field`] is pure: it reads the draft and returns the message to
//! show, or `None` when the field is acceptable.

use partners_core::onboarding::{self as rules, Industry};

use crate::draft::{Field, OnboardingDraft};

/// Evaluate the rule for one field against the current draft.
pub fn validate_field(draft: &OnboardingDraft, field: Field) -> Option<&'static str> {
    let (ok, message) = match field {
        Field::Name => (rules::has_min_text_length(&draft.name), rules::MSG_NAME),
        Field::BusinessName => (
            rules::has_min_text_length(&draft.business_name),
            rules::MSG_BUSINESS_NAME,
        ),
        Field::Industry => (Industry::parse(&draft.industry).is_ok(), rules::MSG_INDUSTRY),
        Field::LocationCount => (
            rules::is_valid_location_count(draft.location_count),
            rules::MSG_LOCATION_COUNT,
        ),
        Field::SelectedEmirates => (!draft.selected_emirates.is_empty(), rules::MSG_EMIRATES),
        Field::MonthlyCustomers => (
            rules::is_valid_monthly_customers(&draft.monthly_customers),
            rules::MSG_MONTHLY_CUSTOMERS,
        ),
        // A plain yes/no toggle.
        Field::HasRfmTerminal => return None,
        Field::TerminalDetails => (
            rules::terminal_details_satisfied(
                draft.has_rfm_terminal,
                Some(draft.terminal_details.trim()),
            ),
            rules::MSG_TERMINAL_DETAILS,
        ),
        Field::Email => (rules::is_valid_email(&draft.email), rules::MSG_EMAIL),
        Field::Phone => (rules::is_valid_uae_phone(&draft.phone), rules::MSG_PHONE),
        Field::Designation => (
            rules::has_min_text_length(&draft.designation),
            rules::MSG_DESIGNATION,
        ),
        Field::AcceptedTerms => (draft.accepted_terms, rules::MSG_TERMS),
    };

    (!ok).then_some(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use partners_core::onboarding::Emirate;

    fn complete_draft() -> OnboardingDraft {
        OnboardingDraft {
            name: "Ahmed Ali".into(),
            business_name: "Al Manara Trading".into(),
            industry: "retail".into(),
            location_count: 2,
            selected_emirates: [Emirate::Dubai].into_iter().collect(),
            monthly_customers: vec![1000],
            has_rfm_terminal: false,
            terminal_details: String::new(),
            email: "ahmed@example.com".into(),
            phone: "+971501234123".into(),
            designation: "Owner".into(),
            accepted_terms: true,
        }
    }

    #[test]
    fn complete_draft_has_no_errors() {
        let draft = complete_draft();
        for field in Field::ALL {
            assert_eq!(validate_field(&draft, field), None, "{field:?}");
        }
    }

    #[test]
    fn validation_does_not_mutate_the_draft() {
        let draft = OnboardingDraft::default();
        let before = draft.clone();
        for field in Field::ALL {
            let _ = validate_field(&draft, field);
        }
        assert_eq!(draft, before);
    }

    #[test]
    fn text_fields_are_trimmed_before_measuring() {
        let mut draft = complete_draft();
        draft.name = " A ".into();
        assert_eq!(validate_field(&draft, Field::Name), Some(rules::MSG_NAME));
        draft.designation = "  ".into();
        assert_eq!(validate_field(&draft, Field::Designation), Some(rules::MSG_DESIGNATION));
    }

    #[test]
    fn industry_must_be_a_known_value() {
        let mut draft = complete_draft();
        draft.industry = String::new();
        assert!(validate_field(&draft, Field::Industry).is_some());
        draft.industry = "bakery".into();
        assert!(validate_field(&draft, Field::Industry).is_some());
        draft.industry = "cafe".into();
        assert!(validate_field(&draft, Field::Industry).is_none());
    }

    #[test]
    fn phone_law() {
        let mut draft = complete_draft();
        for bad in ["+97150", "+9715012341234", "971501234123", "+97150123412x", ""] {
            draft.phone = bad.into();
            assert_eq!(validate_field(&draft, Field::Phone), Some(rules::MSG_PHONE), "{bad}");
        }
        draft.phone = "+971501234123".into();
        assert_eq!(validate_field(&draft, Field::Phone), None);
    }

    #[test]
    fn terminal_conditional_law() {
        let mut draft = complete_draft();
        draft.terminal_details = "12".into();
        assert_eq!(validate_field(&draft, Field::TerminalDetails), None);

        draft.has_rfm_terminal = true;
        assert_eq!(
            validate_field(&draft, Field::TerminalDetails),
            Some(rules::MSG_TERMINAL_DETAILS)
        );

        draft.terminal_details = "123456789".into();
        assert_eq!(validate_field(&draft, Field::TerminalDetails), None);
    }

    #[test]
    fn terminal_details_are_measured_as_sent() {
        let mut draft = complete_draft();
        draft.has_rfm_terminal = true;
        draft.terminal_details = "12345678 ".into();
        assert_eq!(
            validate_field(&draft, Field::TerminalDetails),
            Some(rules::MSG_TERMINAL_DETAILS)
        );

        draft.terminal_details = " 123456789 ".into();
        assert_eq!(validate_field(&draft, Field::TerminalDetails), None);
        assert_eq!(
            draft.to_request().terminal_details.as_deref(),
            Some("123456789")
        );
    }

    #[test]
    fn scale_limits() {
        let mut draft = complete_draft();
        draft.location_count = 51;
        assert!(validate_field(&draft, Field::LocationCount).is_some());
        draft.monthly_customers = vec![50];
        assert!(validate_field(&draft, Field::MonthlyCustomers).is_some());
        draft.selected_emirates.clear();
        assert!(validate_field(&draft, Field::SelectedEmirates).is_some());
    }

    #[test]
    fn terms_must_be_accepted() {
        let mut draft = complete_draft();
        draft.accepted_terms = false;
        assert_eq!(validate_field(&draft, Field::AcceptedTerms), Some(rules::MSG_TERMS));
    }
}
