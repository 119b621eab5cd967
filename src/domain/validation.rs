use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    TooLong { field: &'static str, max: usize, actual: usize },
    InvalidPhoneNumber { input: String },
    InvalidDialingCode { input: String },
    InvalidNationalLength,
    UnknownCountry { input: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::TooLong { field, max, actual } => {
                write!(f, "{field} is too long: {actual} characters (max {max})")
            }
            Self::InvalidPhoneNumber { input } => write!(f, "invalid phone number: {input}"),
            Self::InvalidDialingCode { input } => {
                write!(f, "dialing code must be non-empty digits: {input:?}")
            }
            Self::InvalidNationalLength => write!(f, "national number length must be positive"),
            Self::UnknownCountry { input } => write!(f, "unknown country: {input}"),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::ValidationError;

    #[test]
    fn display_messages_are_human_readable() {
        let err = ValidationError::Empty { field: "sender" };
        assert_eq!(err.to_string(), "sender must not be empty");

        let err = ValidationError::TooLong {
            field: "sender",
            max: 11,
            actual: 12,
        };
        assert_eq!(
            err.to_string(),
            "sender is too long: 12 characters (max 11)"
        );

        let err = ValidationError::InvalidPhoneNumber {
            input: "bad".to_owned(),
        };
        assert_eq!(err.to_string(), "invalid phone number: bad");

        let err = ValidationError::InvalidDialingCode {
            input: "+1".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "dialing code must be non-empty digits: \"+1\""
        );

        let err = ValidationError::UnknownCountry {
            input: "zz".to_owned(),
        };
        assert_eq!(err.to_string(), "unknown country: zz");
    }
}
