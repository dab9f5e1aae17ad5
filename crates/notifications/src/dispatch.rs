//! Best-effort delivery of a batch of notifications.
//!
//! Emails are sent one after another in the order given. A failed send is
//! logged and recorded in its [`DeliveryOutcome`]; it never stops the
//! remaining sends and never surfaces as an error to the caller.

use serde::Serialize;

use crate::email::{Mailer, OutgoingEmail};

/// Who a notification is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    OperatorAlert,
    SubmitterConfirmation,
}

/// One queued email and what it is for.
#[derive(Debug, Clone)]
pub struct PendingEmail {
    pub kind: NotificationKind,
    pub email: OutgoingEmail,
}

impl PendingEmail {
    pub fn new(kind: NotificationKind, email: OutgoingEmail) -> Self {
        Self { kind, email }
    }
}

/// Result of one delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryOutcome {
    pub kind: NotificationKind,
    pub recipient: String,
    pub delivered: bool,
    pub error: Option<String>,
}

/// Send every queued email in order and report one outcome per attempt.
pub async fn dispatch(mailer: &dyn Mailer, queue: Vec<PendingEmail>) -> Vec<DeliveryOutcome> {
    let mut outcomes = Vec::with_capacity(queue.len());

    for pending in queue {
        let recipient = pending.email.to.clone();
        let outcome = match mailer.send(&pending.email).await {
            Ok(()) => DeliveryOutcome {
                kind: pending.kind,
                recipient,
                delivered: true,
                error: None,
            },
            Err(e) => {
                tracing::warn!(
                    recipient = %recipient,
                    kind = ?pending.kind,
                    error = %e,
                    "Notification delivery failed",
                );
                DeliveryOutcome {
                    kind: pending.kind,
                    recipient,
                    delivered: false,
                    error: Some(e.to_string()),
                }
            }
        };
        outcomes.push(outcome);
    }

    outcomes
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::email::EmailError;

    /// Records every send and fails for addresses on the deny list.
    struct ScriptedMailer {
        sent: Mutex<Vec<String>>,
        failing: Vec<&'static str>,
    }

    #[async_trait]
    impl Mailer for ScriptedMailer {
        async fn send(&self, email: &OutgoingEmail) -> Result<(), EmailError> {
            self.sent.lock().unwrap().push(email.to.clone());
            if self.failing.contains(&email.to.as_str()) {
                Err(EmailError::Build("rejected".into()))
            } else {
                Ok(())
            }
        }
    }

    fn pending(kind: NotificationKind, to: &str) -> PendingEmail {
        PendingEmail::new(
            kind,
            OutgoingEmail {
                to: to.to_string(),
                subject: "s".into(),
                html: "h".into(),
                text: "t".into(),
            },
        )
    }

    #[tokio::test]
    async fn sends_in_order_and_continues_after_failure() {
        let mailer = ScriptedMailer {
            sent: Mutex::new(Vec::new()),
            failing: vec!["ops1@example.com"],
        };
        let outcomes = dispatch(
            &mailer,
            vec![
                pending(NotificationKind::OperatorAlert, "ops1@example.com"),
                pending(NotificationKind::OperatorAlert, "ops2@example.com"),
                pending(NotificationKind::SubmitterConfirmation, "merchant@example.com"),
            ],
        )
        .await;

        assert_eq!(
            *mailer.sent.lock().unwrap(),
            vec!["ops1@example.com", "ops2@example.com", "merchant@example.com"]
        );
        assert_eq!(outcomes.len(), 3);
        assert!(!outcomes[0].delivered);
        assert_eq!(outcomes[0].error.as_deref(), Some("Email build error: rejected"));
        assert!(outcomes[1].delivered);
        assert_eq!(outcomes[2].kind, NotificationKind::SubmitterConfirmation);
        assert!(outcomes[2].delivered);
    }

    #[tokio::test]
    async fn empty_queue_sends_nothing() {
        let mailer = ScriptedMailer {
            sent: Mutex::new(Vec::new()),
            failing: vec![],
        };
        assert!(dispatch(&mailer, vec![]).await.is_empty());
        assert!(mailer.sent.lock().unwrap().is_empty());
    }
}
