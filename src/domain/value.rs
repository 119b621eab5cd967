use crate::domain::validation::ValidationError;

#[derive(Clone, PartialEq, Eq, Hash)]
/// Brevo API key, sent in the `api-key` header.
///
/// Invariant: non-empty after trimming. `Debug` never prints the key.
pub struct ApiKey(String);

impl ApiKey {
    /// Header name used by Brevo (`api-key`).
    pub const HEADER: &'static str = "api-key";

    /// Create a validated [`ApiKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "api key" });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Sender shown on the handset (`sender`).
///
/// Invariant: non-empty after trimming; at most 11 characters when alphanumeric,
/// at most 15 digits when numeric.
pub struct SenderName(String);

impl SenderName {
    /// JSON field name used by Brevo (`sender`).
    pub const FIELD: &'static str = "sender";

    /// Maximum length of an alphanumeric sender.
    pub const MAX_ALPHANUMERIC: usize = 11;
    /// Maximum length of a numeric sender.
    pub const MAX_NUMERIC: usize = 15;

    /// Create a validated [`SenderName`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let actual = trimmed.chars().count();
        let max = if trimmed.chars().all(|c| c.is_ascii_digit()) {
            Self::MAX_NUMERIC
        } else {
            Self::MAX_ALPHANUMERIC
        };
        if actual > max {
            return Err(ValidationError::TooLong {
                field: Self::FIELD,
                max,
                actual,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated sender.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS message text (`content`).
///
/// Invariant: non-empty after trimming. The original value (including whitespace) is preserved.
pub struct MessageText(String);

impl MessageText {
    /// JSON field name used by Brevo (`content`).
    pub const FIELD: &'static str = "content";

    /// Characters per billed SMS part used by [`MessageText::sms_parts`].
    pub const PART_LENGTH: usize = 160;

    /// Create validated message text.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the message text as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Rough number of SMS parts this text is split into.
    pub fn sms_parts(&self) -> usize {
        sms_parts(&self.0)
    }
}

/// Rough number of SMS parts for `text`: `chars / 160 + 1`, or zero for empty text.
///
/// This mirrors what operators see before sending; the provider's own count is
/// reported back as [`SentSms::sms_count`](crate::domain::SentSms::sms_count).
pub fn sms_parts(text: &str) -> usize {
    let chars = text.chars().count();
    if chars == 0 {
        0
    } else {
        chars / MessageText::PART_LENGTH + 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Free-text tag attached to a message for tracking (`tag`).
///
/// Invariant: non-empty after trimming.
pub struct Tag(String);

impl Tag {
    /// JSON field name used by Brevo (`tag`).
    pub const FIELD: &'static str = "tag";

    /// Create a validated [`Tag`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Build an optional tag, treating blank input as "no tag".
    pub fn optional(value: Option<&str>) -> Option<Self> {
        value.and_then(|value| Self::new(value).ok())
    }

    /// Borrow the validated tag.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_newtypes_trim_or_validate() {
        let key = ApiKey::new("  xkeysib-123 ").unwrap();
        assert_eq!(key.as_str(), "xkeysib-123");
        assert!(ApiKey::new("  ").is_err());

        let sender = SenderName::new(" MyShop ").unwrap();
        assert_eq!(sender.as_str(), "MyShop");
        assert!(SenderName::new("").is_err());

        let msg = MessageText::new(" hi ").unwrap();
        assert_eq!(msg.as_str(), " hi ");
        assert!(MessageText::new("  ").is_err());

        let tag = Tag::new(" promo ").unwrap();
        assert_eq!(tag.as_str(), "promo");
        assert!(Tag::new(" ").is_err());
    }

    #[test]
    fn api_key_debug_is_redacted() {
        let key = ApiKey::new("secret").unwrap();
        assert_eq!(format!("{key:?}"), "ApiKey(***)");
    }

    #[test]
    fn sender_name_length_depends_on_kind() {
        assert!(SenderName::new("ABCDEFGHIJK").is_ok());
        assert_eq!(
            SenderName::new("ABCDEFGHIJKL").unwrap_err(),
            ValidationError::TooLong {
                field: SenderName::FIELD,
                max: 11,
                actual: 12,
            }
        );

        assert!(SenderName::new("123456789012345").is_ok());
        assert!(SenderName::new("1234567890123456").is_err());
    }

    #[test]
    fn optional_tag_drops_blank_values() {
        assert_eq!(Tag::optional(None), None);
        assert_eq!(Tag::optional(Some("   ")), None);
        assert_eq!(Tag::optional(Some("spring")).unwrap().as_str(), "spring");
    }

    #[test]
    fn sms_parts_follow_160_char_blocks() {
        assert_eq!(sms_parts(""), 0);
        assert_eq!(sms_parts("hello"), 1);
        assert_eq!(sms_parts(&"a".repeat(159)), 1);
        assert_eq!(sms_parts(&"a".repeat(160)), 2);
        assert_eq!(sms_parts(&"a".repeat(321)), 3);
        assert_eq!(MessageText::new("hello").unwrap().sms_parts(), 1);
    }
}
