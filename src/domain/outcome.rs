use chrono::{DateTime, Local};

use crate::domain::country::NormalizedRecipient;

#[derive(Debug, Clone, PartialEq)]
/// Result of one dispatch attempt.
///
/// Exactly one outcome is recorded per attempted send; `provider_message_id` is only
/// set when `delivered`, `error_detail` only when not.
pub struct DispatchOutcome {
    pub name: Option<String>,
    pub recipient: NormalizedRecipient,
    pub delivered: bool,
    pub provider_message_id: Option<String>,
    pub error_detail: Option<String>,
    pub rendered_content: String,
    pub sent_at: DateTime<Local>,
}

impl DispatchOutcome {
    pub fn status_label(&self) -> &'static str {
        if self.delivered { "Sent" } else { "Failed" }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Aggregate counts for one run, always recomputed from the outcomes.
pub struct RunSummary {
    pub total_contacts: usize,
    pub valid_contacts: usize,
    pub invalid_contacts: usize,
    pub total_sends: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn new(valid_contacts: usize, invalid_contacts: usize, outcomes: &[DispatchOutcome]) -> Self {
        let succeeded = outcomes.iter().filter(|outcome| outcome.delivered).count();
        Self {
            total_contacts: valid_contacts + invalid_contacts,
            valid_contacts,
            invalid_contacts,
            total_sends: outcomes.len(),
            succeeded,
            failed: outcomes.len() - succeeded,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::Country;

    use super::*;

    fn outcome(delivered: bool) -> DispatchOutcome {
        DispatchOutcome {
            name: None,
            recipient: Country::UsCa.profile().normalize("5551234567").unwrap(),
            delivered,
            provider_message_id: delivered.then(|| "1".to_owned()),
            error_detail: (!delivered).then(|| "Invalid phone number".to_owned()),
            rendered_content: "hi".to_owned(),
            sent_at: Local::now(),
        }
    }

    #[test]
    fn summary_counts_come_from_outcomes() {
        let outcomes = vec![outcome(true), outcome(false), outcome(true)];
        let summary = RunSummary::new(4, 2, &outcomes);
        assert_eq!(
            summary,
            RunSummary {
                total_contacts: 6,
                valid_contacts: 4,
                invalid_contacts: 2,
                total_sends: 3,
                succeeded: 2,
                failed: 1,
            }
        );
    }

    #[test]
    fn status_label_reflects_delivery() {
        assert_eq!(outcome(true).status_label(), "Sent");
        assert_eq!(outcome(false).status_label(), "Failed");
    }
}
