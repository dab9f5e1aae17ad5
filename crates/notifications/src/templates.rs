//! Rendered emails for each submission event.
//!
//! Every template produces both an HTML and a plain-text body. User-supplied
//! values are escaped before they are placed in HTML.

use partners_core::onboarding::{Emirate, Industry};
use partners_core::submission::{ContactRequest, OnboardingRequest, NEXT_STEPS};
use partners_core::types::DbId;

use crate::email::OutgoingEmail;

/// Escape the five HTML-significant characters.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn industry_label(value: &str) -> &str {
    Industry::parse(value).map(Industry::label).unwrap_or(value)
}

fn emirate_labels(values: &[String]) -> String {
    values
        .iter()
        .map(|v| Emirate::parse(v).map(Emirate::label).unwrap_or(v.as_str()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn html_rows(rows: &[(&str, String)]) -> String {
    rows.iter()
        .map(|(label, value)| {
            format!(
                "<tr><td style=\"padding:4px 12px 4px 0;color:#555\"><strong>{label}</strong></td>\
                 <td style=\"padding:4px 0\">{}</td></tr>",
                escape_html(value)
            )
        })
        .collect()
}

fn text_rows(rows: &[(&str, String)]) -> String {
    rows.iter()
        .map(|(label, value)| format!("{label}: {value}\n"))
        .collect()
}

fn onboarding_rows(request: &OnboardingRequest) -> Vec<(&'static str, String)> {
    let terminal = match (request.has_rfm_terminal, request.terminal_details.as_deref()) {
        (true, Some(mid)) => format!("Yes (MID {mid})"),
        (true, None) => "Yes".to_string(),
        (false, _) => "No".to_string(),
    };
    let customers = request
        .monthly_customers
        .first()
        .map(|c| format!("{c:.0}"))
        .unwrap_or_else(|| "-".to_string());

    vec![
        ("Name", request.name.clone()),
        ("Designation", request.designation.clone()),
        ("Business", request.business_name.clone()),
        ("Industry", industry_label(&request.industry).to_string()),
        ("Locations", request.location_count.to_string()),
        ("Emirates", emirate_labels(&request.selected_emirates)),
        ("Monthly customers", customers),
        ("RFM terminal", terminal),
        ("Email", request.email.clone()),
        ("Phone", request.phone.clone()),
    ]
}

/// Alert sent to each operator address when a merchant applies.
pub fn onboarding_operator_alert(
    to: &str,
    submission_id: DbId,
    request: &OnboardingRequest,
) -> OutgoingEmail {
    let rows = onboarding_rows(request);
    OutgoingEmail {
        to: to.to_string(),
        subject: format!("New Partner Application: {}", request.business_name),
        html: format!(
            "<h2>New partner application #{submission_id}</h2>\
             <table>{}</table>\
             <p>Review it in the admin dashboard.</p>",
            html_rows(&rows)
        ),
        text: format!(
            "New partner application #{submission_id}\n\n{}\nReview it in the admin dashboard.\n",
            text_rows(&rows)
        ),
    }
}

/// Confirmation sent to the merchant after a successful application.
pub fn onboarding_confirmation(request: &OnboardingRequest) -> OutgoingEmail {
    let name = request.name.trim();
    let steps_html: String = NEXT_STEPS
        .iter()
        .map(|s| format!("<li>{s}</li>"))
        .collect();
    let steps_text: String = NEXT_STEPS
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{}. {s}\n", i + 1))
        .collect();

    OutgoingEmail {
        to: request.email.clone(),
        subject: "Welcome to Partners Points - Application Received".to_string(),
        html: format!(
            "<h2>Thank you, {}!</h2>\
             <p>We have received the application for <strong>{}</strong>.</p>\
             <p>What happens next:</p><ol>{steps_html}</ol>\
             <p>The Partners Points team</p>",
            escape_html(name),
            escape_html(&request.business_name)
        ),
        text: format!(
            "Thank you, {name}!\n\nWe have received the application for {}.\n\n\
             What happens next:\n{steps_text}\nThe Partners Points team\n",
            request.business_name
        ),
    }
}

/// Alert sent to each operator address for a contact-form message.
pub fn contact_operator_alert(to: &str, submission_id: DbId, request: &ContactRequest) -> OutgoingEmail {
    let rows = vec![
        ("Name", request.name.clone()),
        ("Email", request.email.clone()),
        ("Company", request.company.clone().unwrap_or_else(|| "-".to_string())),
        ("Phone", request.phone.clone().unwrap_or_else(|| "-".to_string())),
    ];
    OutgoingEmail {
        to: to.to_string(),
        subject: format!("New Contact Message from {}", request.name),
        html: format!(
            "<h2>New contact message #{submission_id}</h2>\
             <table>{}</table>\
             <p style=\"white-space:pre-wrap\">{}</p>",
            html_rows(&rows),
            escape_html(&request.message)
        ),
        text: format!(
            "New contact message #{submission_id}\n\n{}\n{}\n",
            text_rows(&rows),
            request.message
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> OnboardingRequest {
        OnboardingRequest {
            name: "Ahmed Ali".into(),
            business_name: "Al Manara <Trading>".into(),
            industry: "cafe".into(),
            location_count: 3,
            selected_emirates: vec!["dubai".into(), "sharjah".into()],
            monthly_customers: vec![2500.0],
            has_rfm_terminal: true,
            terminal_details: Some("123456789".into()),
            email: "ahmed@example.com".into(),
            phone: "+971501234123".into(),
            designation: "Owner".into(),
            accepted_terms: true,
        }
    }

    #[test]
    fn escape_html_handles_markup() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn operator_alert_lists_application_details() {
        let email = onboarding_operator_alert("ops@example.com", 12, &request());
        assert_eq!(email.to, "ops@example.com");
        assert_eq!(email.subject, "New Partner Application: Al Manara <Trading>");
        assert!(email.text.contains("Industry: Cafes & Coffee Shops"));
        assert!(email.text.contains("Emirates: Dubai, Sharjah"));
        assert!(email.text.contains("RFM terminal: Yes (MID 123456789)"));
        assert!(email.text.contains("Monthly customers: 2500"));
        assert!(email.html.contains("Al Manara &lt;Trading&gt;"));
        assert!(!email.html.contains("<Trading>"));
    }

    #[test]
    fn confirmation_goes_to_submitter_with_next_steps() {
        let email = onboarding_confirmation(&request());
        assert_eq!(email.to, "ahmed@example.com");
        for step in NEXT_STEPS {
            assert!(email.text.contains(step));
        }
        assert!(email.text.contains("4. "));
    }

    #[test]
    fn contact_alert_escapes_message() {
        let contact = ContactRequest {
            name: "Sara".into(),
            email: "sara@example.com".into(),
            company: None,
            phone: None,
            message: "<script>alert(1)</script> please call".into(),
        };
        let email = contact_operator_alert("ops@example.com", 3, &contact);
        assert!(email.html.contains("&lt;script&gt;"));
        assert!(email.text.contains("Company: -"));
    }
}
