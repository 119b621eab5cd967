use crate::domain::country::NormalizedRecipient;
use crate::domain::value::{MessageText, SenderName, Tag};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Brevo SMS category (`type`).
pub enum SmsType {
    #[default]
    Marketing,
    Transactional,
}

impl SmsType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Marketing => "marketing",
            Self::Transactional => "transactional",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SendOptions {
    pub sms_type: SmsType,
    pub unicode_enabled: bool,
    pub tag: Option<Tag>,
}

impl Default for SendOptions {
    fn default() -> Self {
        Self {
            sms_type: SmsType::default(),
            unicode_enabled: true,
            tag: None,
        }
    }
}

#[derive(Debug, Clone)]
/// A single transactional SMS to one recipient.
pub struct SendSms {
    sender: SenderName,
    recipient: String,
    content: MessageText,
    options: SendOptions,
}

impl SendSms {
    pub fn new(
        sender: SenderName,
        recipient: &NormalizedRecipient,
        content: MessageText,
        options: SendOptions,
    ) -> Self {
        Self {
            sender,
            recipient: recipient.canonical().to_owned(),
            content,
            options,
        }
    }

    pub fn sender(&self) -> &SenderName {
        &self.sender
    }

    /// Canonical digits of the recipient.
    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn content(&self) -> &MessageText {
        &self.content
    }

    pub fn options(&self) -> &SendOptions {
        &self.options
    }
}
