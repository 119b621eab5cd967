//! Batch layer: validates contacts, personalizes and dispatches one message per
//! valid recipient, and collects the outcomes.
//!
//! Dispatches run strictly one at a time and in contact order: contact `n + 1` is
//! not sent until the outcome for contact `n` is recorded. The configured
//! [`Throttle`] runs between consecutive dispatches.

mod throttle;

use std::fmt;
use std::sync::Arc;

use chrono::Local;
use tracing::{info, warn};

pub use throttle::{FixedDelay, NoDelay, Throttle};

use crate::client::Dispatcher;
use crate::domain::{
    ApiKey, Contact, CountryProfile, DispatchOutcome, MessageText, NormalizedRecipient,
    RunSummary, SendOptions, SendSms, SenderName, SmsType, Tag, ValidationError, render,
};

#[derive(Debug, Clone)]
/// Everything a run needs, fixed before the first contact is processed.
pub struct RunConfig {
    pub profile: CountryProfile,
    pub template: String,
    pub sender: String,
    pub tag: Option<String>,
    pub unicode_enabled: bool,
    pub api_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigProblem {
    MissingApiKey,
    MissingSender,
    InvalidSender(ValidationError),
    MissingTemplate,
    NoValidRecipients,
}

impl fmt::Display for ConfigProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingApiKey => f.write_str("missing Brevo API key"),
            Self::MissingSender => f.write_str("missing sender name"),
            Self::InvalidSender(err) => write!(f, "invalid sender name: {err}"),
            Self::MissingTemplate => f.write_str("missing message content"),
            Self::NoValidRecipients => f.write_str("no valid phone numbers to send to"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// The run was refused before any message was sent.
pub struct ConfigurationError {
    pub problems: Vec<ConfigProblem>,
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("cannot start run: ")?;
        for (idx, problem) in self.problems.iter().enumerate() {
            if idx > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{problem}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigurationError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidContact {
    pub contact: Contact,
    pub recipient: NormalizedRecipient,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Contacts split by whether their phone number normalized; order is preserved.
pub struct Partition {
    pub valid: Vec<ValidContact>,
    pub invalid: Vec<Contact>,
}

/// Normalize every contact against `profile`.
pub fn partition(contacts: &[Contact], profile: &CountryProfile) -> Partition {
    let mut result = Partition::default();
    for contact in contacts {
        match profile.normalize(contact.raw_phone()) {
            Ok(recipient) => result.valid.push(ValidContact {
                contact: contact.clone(),
                recipient,
            }),
            Err(_) => result.invalid.push(contact.clone()),
        }
    }
    result
}

#[derive(Debug, Clone)]
pub struct BatchReport {
    pub valid: Vec<NormalizedRecipient>,
    pub invalid: Vec<Contact>,
    pub outcomes: Vec<DispatchOutcome>,
}

impl BatchReport {
    pub fn summary(&self) -> RunSummary {
        RunSummary::new(self.valid.len(), self.invalid.len(), &self.outcomes)
    }
}

#[derive(Debug, Clone, Copy)]
/// Snapshot handed to a progress observer right after an outcome is recorded.
pub struct Progress<'a> {
    /// Number of outcomes recorded so far, including this one.
    pub completed: usize,
    pub total: usize,
    pub outcome: &'a DispatchOutcome,
}

struct PreparedRun {
    api_key: ApiKey,
    sender: SenderName,
    options: SendOptions,
}

/// Check the run's required settings, collecting every problem found.
pub fn preflight(config: &RunConfig, valid_recipients: usize) -> Result<(), ConfigurationError> {
    prepare(config, valid_recipients).map(|_| ())
}

fn prepare(config: &RunConfig, valid_recipients: usize) -> Result<PreparedRun, ConfigurationError> {
    let mut problems = Vec::new();

    let api_key = match ApiKey::new(config.api_key.as_str()) {
        Ok(api_key) => Some(api_key),
        Err(_) => {
            problems.push(ConfigProblem::MissingApiKey);
            None
        }
    };

    let sender = match SenderName::new(config.sender.as_str()) {
        Ok(sender) => Some(sender),
        Err(ValidationError::Empty { .. }) => {
            problems.push(ConfigProblem::MissingSender);
            None
        }
        Err(err) => {
            problems.push(ConfigProblem::InvalidSender(err));
            None
        }
    };

    if config.template.trim().is_empty() {
        problems.push(ConfigProblem::MissingTemplate);
    }
    if valid_recipients == 0 {
        problems.push(ConfigProblem::NoValidRecipients);
    }

    match (api_key, sender) {
        (Some(api_key), Some(sender)) if problems.is_empty() => Ok(PreparedRun {
            api_key,
            sender,
            options: SendOptions {
                sms_type: SmsType::Marketing,
                unicode_enabled: config.unicode_enabled,
                tag: Tag::optional(config.tag.as_deref()),
            },
        }),
        _ => Err(ConfigurationError { problems }),
    }
}

#[derive(Clone)]
/// Sequential sender for a list of contacts.
pub struct BatchRunner {
    dispatcher: Arc<dyn Dispatcher>,
    throttle: Arc<dyn Throttle>,
}

impl BatchRunner {
    /// Runner with the default [`FixedDelay`] between dispatches.
    pub fn new(dispatcher: Arc<dyn Dispatcher>) -> Self {
        Self {
            dispatcher,
            throttle: Arc::new(FixedDelay::default()),
        }
    }

    pub fn with_throttle(mut self, throttle: Arc<dyn Throttle>) -> Self {
        self.throttle = throttle;
        self
    }

    /// Send one personalized message to every valid contact.
    ///
    /// Returns [`ConfigurationError`] without sending anything when the API key,
    /// sender or template is missing, or when no contact has a valid number. Per
    /// recipient failures never stop the loop; they are recorded as failed outcomes.
    pub async fn run(
        &self,
        contacts: &[Contact],
        config: &RunConfig,
    ) -> Result<BatchReport, ConfigurationError> {
        self.run_with_progress(contacts, config, |_| {}).await
    }

    /// Like [`BatchRunner::run`], calling `observer` after each recorded outcome.
    pub async fn run_with_progress<F>(
        &self,
        contacts: &[Contact],
        config: &RunConfig,
        mut observer: F,
    ) -> Result<BatchReport, ConfigurationError>
    where
        F: FnMut(Progress<'_>),
    {
        let Partition { valid, invalid } = partition(contacts, &config.profile);
        let prepared = prepare(config, valid.len())?;
        for contact in &invalid {
            warn!(phone = contact.raw_phone(), "skipping contact with invalid phone number");
        }

        info!(
            total = contacts.len(),
            valid = valid.len(),
            invalid = invalid.len(),
            "starting batch"
        );

        let total = valid.len();
        let mut outcomes = Vec::with_capacity(total);
        for (idx, entry) in valid.iter().enumerate() {
            if idx > 0 {
                self.throttle.pause().await;
            }

            let outcome = self.send_one(&prepared, config, entry).await;
            if outcome.delivered {
                info!(
                    recipient = outcome.recipient.canonical(),
                    message_id = outcome.provider_message_id.as_deref().unwrap_or(""),
                    "sms sent"
                );
            } else {
                warn!(
                    recipient = outcome.recipient.canonical(),
                    error = outcome.error_detail.as_deref().unwrap_or(""),
                    "sms failed"
                );
            }
            outcomes.push(outcome);

            if let Some(outcome) = outcomes.last() {
                observer(Progress {
                    completed: outcomes.len(),
                    total,
                    outcome,
                });
            }
        }

        let report = BatchReport {
            valid: valid.into_iter().map(|entry| entry.recipient).collect(),
            invalid,
            outcomes,
        };
        let summary = report.summary();
        info!(
            sent = summary.total_sends,
            succeeded = summary.succeeded,
            failed = summary.failed,
            "batch finished"
        );
        Ok(report)
    }

    async fn send_one(
        &self,
        prepared: &PreparedRun,
        config: &RunConfig,
        entry: &ValidContact,
    ) -> DispatchOutcome {
        let rendered = render(&config.template, entry.contact.attributes());
        let result = match MessageText::new(rendered.as_str()) {
            Ok(content) => {
                let request = SendSms::new(
                    prepared.sender.clone(),
                    &entry.recipient,
                    content,
                    prepared.options.clone(),
                );
                self.dispatcher
                    .dispatch(&prepared.api_key, request)
                    .await
                    .map_err(|err| err.detail())
            }
            Err(err) => Err(err.to_string()),
        };

        let (delivered, provider_message_id, error_detail) = match result {
            Ok(sent) => (true, sent.message_id, None),
            Err(detail) => (false, None, Some(detail)),
        };

        DispatchOutcome {
            name: entry.contact.display_name().map(str::to_owned),
            recipient: entry.recipient.clone(),
            delivered,
            provider_message_id,
            error_detail,
            rendered_content: rendered,
            sent_at: Local::now(),
        }
    }
}
