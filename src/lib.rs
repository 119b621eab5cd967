//! Bulk SMS sending through the Brevo transactional SMS API.
//!
//! The crate is split into a domain layer of strong types (phone normalization,
//! message personalization), a transport layer for the wire format, a small client
//! layer issuing the HTTP calls, and a batch layer that sends one message per
//! contact, strictly in order, and records each outcome.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use brevo_bulk_sms::{BatchRunner, BrevoClient, Contact, Country, RunConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let runner = BatchRunner::new(Arc::new(BrevoClient::new()));
//!     let config = RunConfig {
//!         profile: Country::UsCa.profile(),
//!         template: "Hi {name}, your order is ready".to_owned(),
//!         sender: "MyShop".to_owned(),
//!         tag: None,
//!         unicode_enabled: true,
//!         api_key: std::env::var("BREVO_API_KEY")?,
//!     };
//!     let report = runner.run(&[Contact::new("(555) 123-4567")], &config).await?;
//!     println!("{:?}", report.summary());
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod batch;
pub mod client;
pub mod config;
pub mod contacts;
pub mod domain;
pub mod export;
mod transport;

pub use batch::{
    BatchReport, BatchRunner, ConfigProblem, ConfigurationError, FixedDelay, NoDelay, Progress,
    RunConfig, Throttle,
};
pub use client::{BrevoClient, BrevoClientBuilder, BrevoError, Dispatcher};
pub use config::{Settings, SettingsError};
pub use contacts::ContactsError;
pub use domain::{
    ApiKey, Attributes, Contact, Country, CountryProfile, DispatchOutcome, MessageText,
    NormalizationRule, NormalizedRecipient, RunSummary, SendOptions, SendSms, SenderName,
    SentSms, SmsType, Tag, ValidationError, render,
};
