//! Domain layer: strong types with validation and invariants (no I/O).

mod contact;
mod country;
mod outcome;
mod request;
mod response;
mod template;
mod validation;
mod value;

pub use contact::Contact;
pub use country::{Country, CountryProfile, NormalizationRule, NormalizedRecipient};
pub use outcome::{DispatchOutcome, RunSummary};
pub use request::{SendOptions, SendSms, SmsType};
pub use response::SentSms;
pub use template::{
    Attributes, DERIVED_NAME_KEYS, derive_name_attributes, first_name, render,
};
pub use validation::ValidationError;
pub use value::{ApiKey, MessageText, SenderName, Tag, sms_parts};
