use std::fmt;
use std::str::FromStr;

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Dialing code and national number length used to normalize phone numbers.
///
/// Invariant: `dialing_code` is non-empty ASCII digits and `national_length > 0`.
pub struct CountryProfile {
    dialing_code: String,
    national_length: usize,
}

impl CountryProfile {
    /// Create a validated [`CountryProfile`].
    pub fn new(
        dialing_code: impl Into<String>,
        national_length: usize,
    ) -> Result<Self, ValidationError> {
        let dialing_code = dialing_code.into();
        if dialing_code.is_empty() || !dialing_code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::InvalidDialingCode {
                input: dialing_code,
            });
        }
        if national_length == 0 {
            return Err(ValidationError::InvalidNationalLength);
        }
        Ok(Self {
            dialing_code,
            national_length,
        })
    }

    pub fn dialing_code(&self) -> &str {
        &self.dialing_code
    }

    pub fn national_length(&self) -> usize {
        self.national_length
    }

    /// Length of a fully qualified number: dialing code plus national number.
    pub fn full_length(&self) -> usize {
        self.dialing_code.len() + self.national_length
    }

    /// Normalize `raw` into a dialable digit string for this profile.
    ///
    /// All non-digit characters are stripped first. The rules are tried in order and
    /// the first match wins:
    /// 1. full length and starts with the dialing code: kept as-is,
    /// 2. exactly the national length: the dialing code is prepended,
    /// 3. full length with some other prefix: kept as-is, assumed complete.
    ///
    /// Anything else is rejected with [`ValidationError::InvalidPhoneNumber`].
    pub fn normalize(&self, raw: &str) -> Result<NormalizedRecipient, ValidationError> {
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();

        let (canonical, rule) = if digits.len() == self.full_length()
            && digits.starts_with(&self.dialing_code)
        {
            (digits, NormalizationRule::AlreadyQualified)
        } else if digits.len() == self.national_length {
            (
                format!("{}{}", self.dialing_code, digits),
                NormalizationRule::NationalNumber,
            )
        } else if digits.len() == self.full_length() {
            (digits, NormalizationRule::AssumedComplete)
        } else {
            return Err(ValidationError::InvalidPhoneNumber {
                input: raw.to_owned(),
            });
        };

        Ok(NormalizedRecipient {
            original: raw.to_owned(),
            canonical,
            rule,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Which normalization rule accepted a number.
pub enum NormalizationRule {
    /// Already carried the profile's dialing code.
    AlreadyQualified,
    /// Bare national number; the dialing code was prepended.
    NationalNumber,
    /// Full length but a different leading prefix; accepted unchanged.
    AssumedComplete,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// A phone number that passed normalization.
///
/// Invariant: `canonical` is ASCII digits of the profile's full length.
pub struct NormalizedRecipient {
    original: String,
    canonical: String,
    rule: NormalizationRule,
}

impl NormalizedRecipient {
    /// The value as it appeared in the contact list.
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Fully dialable digits including the dialing code.
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    pub fn rule(&self) -> NormalizationRule {
        self.rule
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Countries selectable for a run.
pub enum Country {
    UsCa,
    India,
    UnitedKingdom,
    Australia,
    Singapore,
    UnitedArabEmirates,
    SaudiArabia,
}

impl Country {
    pub const ALL: [Country; 7] = [
        Self::UsCa,
        Self::India,
        Self::UnitedKingdom,
        Self::Australia,
        Self::Singapore,
        Self::UnitedArabEmirates,
        Self::SaudiArabia,
    ];

    /// Short code accepted by [`Country::from_str`].
    pub fn code(self) -> &'static str {
        match self {
            Self::UsCa => "us",
            Self::India => "in",
            Self::UnitedKingdom => "uk",
            Self::Australia => "au",
            Self::Singapore => "sg",
            Self::UnitedArabEmirates => "uae",
            Self::SaudiArabia => "sa",
        }
    }

    fn dialing(self) -> (&'static str, usize) {
        match self {
            Self::UsCa => ("1", 10),
            Self::India => ("91", 10),
            Self::UnitedKingdom => ("44", 10),
            Self::Australia => ("61", 9),
            Self::Singapore => ("65", 8),
            Self::UnitedArabEmirates => ("971", 9),
            Self::SaudiArabia => ("966", 9),
        }
    }

    pub fn profile(self) -> CountryProfile {
        let (dialing_code, national_length) = self.dialing();
        CountryProfile {
            dialing_code: dialing_code.to_owned(),
            national_length,
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::UsCa => "US/Canada",
            Self::India => "India",
            Self::UnitedKingdom => "United Kingdom",
            Self::Australia => "Australia",
            Self::Singapore => "Singapore",
            Self::UnitedArabEmirates => "UAE",
            Self::SaudiArabia => "Saudi Arabia",
        };
        let (code, len) = self.dialing();
        write!(f, "{name} (+{code}, {len} digits)")
    }
}

impl FromStr for Country {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        let alias = match needle.as_str() {
            "ca" | "us-ca" => "us",
            "gb" => "uk",
            "ae" => "uae",
            other => other,
        };
        Self::ALL
            .into_iter()
            .find(|country| country.code() == alias)
            .ok_or(ValidationError::UnknownCountry {
                input: s.to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn us() -> CountryProfile {
        Country::UsCa.profile()
    }

    #[test]
    fn profile_constructor_validates_invariants() {
        assert!(CountryProfile::new("44", 10).is_ok());
        assert!(matches!(
            CountryProfile::new("", 10),
            Err(ValidationError::InvalidDialingCode { .. })
        ));
        assert!(matches!(
            CountryProfile::new("+44", 10),
            Err(ValidationError::InvalidDialingCode { .. })
        ));
        assert_eq!(
            CountryProfile::new("44", 0),
            Err(ValidationError::InvalidNationalLength)
        );
    }

    #[test]
    fn fully_qualified_numbers_are_kept() {
        let recipient = us().normalize("15551234567").unwrap();
        assert_eq!(recipient.canonical(), "15551234567");
        assert_eq!(recipient.rule(), NormalizationRule::AlreadyQualified);

        let recipient = Country::UnitedArabEmirates
            .profile()
            .normalize("+971 50 123 4567")
            .unwrap();
        assert_eq!(recipient.canonical(), "971501234567");
        assert_eq!(recipient.original(), "+971 50 123 4567");
    }

    #[test]
    fn national_numbers_get_the_dialing_code() {
        let recipient = us().normalize("5551234567").unwrap();
        assert_eq!(recipient.canonical(), "15551234567");
        assert_eq!(recipient.rule(), NormalizationRule::NationalNumber);

        let recipient = Country::Singapore.profile().normalize("81234567").unwrap();
        assert_eq!(recipient.canonical(), "6581234567");
    }

    #[test]
    fn formatting_characters_are_stripped() {
        let recipient = us().normalize("(555) 123-4567").unwrap();
        assert_eq!(recipient.canonical(), "15551234567");
        assert_eq!(recipient.original(), "(555) 123-4567");
    }

    // A full-length number with a foreign prefix is accepted unchanged; this keeps
    // the established behaviour even though it may not be dialable for the profile.
    #[test]
    fn full_length_with_other_prefix_is_assumed_complete() {
        let recipient = us().normalize("25551234567").unwrap();
        assert_eq!(recipient.canonical(), "25551234567");
        assert_eq!(recipient.rule(), NormalizationRule::AssumedComplete);

        let recipient = Country::India.profile().normalize("449876543210").unwrap();
        assert_eq!(recipient.rule(), NormalizationRule::AssumedComplete);
    }

    #[test]
    fn national_rule_wins_for_code_lookalike_prefix() {
        // Ten digits starting with "1" are a national number, not a qualified one.
        let recipient = us().normalize("1234567890").unwrap();
        assert_eq!(recipient.canonical(), "11234567890");
        assert_eq!(recipient.rule(), NormalizationRule::NationalNumber);
    }

    #[test]
    fn other_lengths_are_rejected() {
        for raw in ["", "abc", "555123", "555123456", "155512345678", "+1 (555) 123-45"] {
            assert_eq!(
                us().normalize(raw),
                Err(ValidationError::InvalidPhoneNumber {
                    input: raw.to_owned()
                }),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn canonical_length_matches_profile() {
        for country in Country::ALL {
            let profile = country.profile();
            let national = "7".repeat(profile.national_length());
            let recipient = profile.normalize(&national).unwrap();
            assert_eq!(recipient.canonical().len(), profile.full_length());
            assert!(recipient.canonical().starts_with(profile.dialing_code()));
        }
    }

    #[test]
    fn country_codes_parse() {
        assert_eq!("us".parse::<Country>().unwrap(), Country::UsCa);
        assert_eq!(" UK ".parse::<Country>().unwrap(), Country::UnitedKingdom);
        assert_eq!("gb".parse::<Country>().unwrap(), Country::UnitedKingdom);
        assert_eq!("ae".parse::<Country>().unwrap(), Country::UnitedArabEmirates);
        assert!(matches!(
            "zz".parse::<Country>(),
            Err(ValidationError::UnknownCountry { .. })
        ));
        for country in Country::ALL {
            assert_eq!(country.code().parse::<Country>().unwrap(), country);
        }
    }

    #[test]
    fn country_display_includes_dialing_details() {
        assert_eq!(Country::Australia.to_string(), "Australia (+61, 9 digits)");
    }
}
