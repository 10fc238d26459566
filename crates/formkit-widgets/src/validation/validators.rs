#![forbid(unsafe_code)]

//! Text validators backing each [`ValidationKind`](super::ValidationKind).

use std::fmt::{self, Write as _};
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

// ---------------------------------------------------------------------------
// Error Codes
// ---------------------------------------------------------------------------

/// Error code reported by [`Required`].
pub const ERROR_CODE_NOT_BLANK: &str = "NotBlank";
/// Error code reported by [`Email`].
pub const ERROR_CODE_EMAIL: &str = "Email";
/// Error code reported by [`ZipCode`].
pub const ERROR_CODE_ZIP_CODE: &str = "ZipCode";
/// Error code reported by [`Phone`].
pub const ERROR_CODE_PHONE: &str = "Phone";
/// Error code reported by [`DateFormat`].
pub const ERROR_CODE_DATE: &str = "Date";

/// Fixed pattern text fields are validated against for `Date` fields.
pub const VALIDATION_DATE_FORMAT: &str = "%d/%m/%Y";

const EMAIL_PATTERN: &str = r"(?i)^[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,4}$";
// Department codes 01-98 plus Corsica (2A, 2B), then three digits.
const ZIP_CODE_PATTERN: &str = r"^(0[1-9]|[1-8][0-9]|9[0-8]|2A|2B)[0-9]{3}$";
const PHONE_PATTERN: &str = r"^0[1-9]([-. ]?[0-9]{2}){4}$";

// ---------------------------------------------------------------------------
// ValidationError
// ---------------------------------------------------------------------------

/// A validation error with a stable code and a default message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Stable error code, equal to the failing kind's label.
    pub code: &'static str,
    /// Human-readable default message.
    pub message: String,
}

impl ValidationError {
    /// Create a new validation error.
    #[must_use]
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

// ---------------------------------------------------------------------------
// ValidationResult
// ---------------------------------------------------------------------------

/// Outcome of one validator run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ValidationResult {
    /// Accepted.
    #[default]
    Valid,
    /// Rejected, with the reason.
    Invalid(ValidationError),
}

impl ValidationResult {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// The rejection reason, if any.
    #[must_use]
    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            Self::Valid => None,
            Self::Invalid(e) => Some(e),
        }
    }

    fn check(ok: bool, code: &'static str, message: &str) -> Self {
        if ok {
            Self::Valid
        } else {
            Self::Invalid(ValidationError::new(code, message))
        }
    }
}

// ---------------------------------------------------------------------------
// Validator Trait
// ---------------------------------------------------------------------------

/// Checks a value and explains a rejection.
pub trait Validator<T: ?Sized>: Send + Sync {
    fn validate(&self, value: &T) -> ValidationResult;

    /// Message attached to rejections.
    fn error_message(&self) -> &str;
}

fn compiled(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("built-in validation pattern compiles"))
}

// ---------------------------------------------------------------------------
// Built-in Validators
// ---------------------------------------------------------------------------

/// Accepts everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct Accept;

impl Validator<str> for Accept {
    fn validate(&self, _value: &str) -> ValidationResult {
        ValidationResult::Valid
    }

    fn error_message(&self) -> &str {
        ""
    }
}

/// Rejects the empty string. Whitespace counts as content: `" "` passes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Required;

impl Validator<str> for Required {
    fn validate(&self, value: &str) -> ValidationResult {
        let len = value.graphemes(true).count();
        ValidationResult::check(len > 0, ERROR_CODE_NOT_BLANK, self.error_message())
    }

    fn error_message(&self) -> &str {
        "This field is required"
    }
}

/// Validates `local@domain.tld` addresses, case-insensitive, TLD of 2 to 4 letters.
#[derive(Debug, Clone, Copy, Default)]
pub struct Email;

impl Validator<str> for Email {
    fn validate(&self, value: &str) -> ValidationResult {
        static RE: OnceLock<Regex> = OnceLock::new();
        let ok = compiled(&RE, EMAIL_PATTERN).is_match(value);
        ValidationResult::check(ok, ERROR_CODE_EMAIL, self.error_message())
    }

    fn error_message(&self) -> &str {
        "Invalid email address"
    }
}

/// Validates five-character French postal codes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipCode;

impl Validator<str> for ZipCode {
    fn validate(&self, value: &str) -> ValidationResult {
        static RE: OnceLock<Regex> = OnceLock::new();
        let ok = compiled(&RE, ZIP_CODE_PATTERN).is_match(value);
        ValidationResult::check(ok, ERROR_CODE_ZIP_CODE, self.error_message())
    }

    fn error_message(&self) -> &str {
        "Invalid zip code"
    }
}

/// Validates French phone numbers: `0[1-9]` then four pairs of digits, each pair
/// optionally preceded by a space, dot or hyphen.
#[derive(Debug, Clone, Copy, Default)]
pub struct Phone;

impl Validator<str> for Phone {
    fn validate(&self, value: &str) -> ValidationResult {
        static RE: OnceLock<Regex> = OnceLock::new();
        let ok = compiled(&RE, PHONE_PATTERN).is_match(value);
        ValidationResult::check(ok, ERROR_CODE_PHONE, self.error_message())
    }

    fn error_message(&self) -> &str {
        "Invalid phone number"
    }
}

/// Validates that a string parses as a calendar date under a chrono pattern.
#[derive(Debug, Clone, Copy)]
pub struct DateFormat {
    /// chrono pattern, `%d/%m/%Y` by default.
    pub pattern: &'static str,
}

impl Default for DateFormat {
    fn default() -> Self {
        Self {
            pattern: VALIDATION_DATE_FORMAT,
        }
    }
}

impl DateFormat {
    /// Parse `value`, returning `None` when it does not match.
    ///
    /// chrono accepts unpadded fields and signed or short years, so the date
    /// must also print back to exactly `value`: `1/1/20` is rejected under
    /// `%d/%m/%Y`.
    pub fn parse(&self, value: &str) -> Option<NaiveDate> {
        let date = NaiveDate::parse_from_str(value, self.pattern).ok()?;
        let mut canonical = String::with_capacity(value.len());
        write!(canonical, "{}", date.format(self.pattern)).ok()?;
        (canonical == value).then_some(date)
    }
}

impl Validator<str> for DateFormat {
    fn validate(&self, value: &str) -> ValidationResult {
        ValidationResult::check(
            self.parse(value).is_some(),
            ERROR_CODE_DATE,
            self.error_message(),
        )
    }

    fn error_message(&self) -> &str {
        "Invalid date"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- Required ---

    #[test]
    fn required_empty_fails() {
        let r = Required.validate("");
        assert!(!r.is_valid());
        assert_eq!(r.error().map(|e| e.code), Some(ERROR_CODE_NOT_BLANK));
    }

    #[test]
    fn required_single_char_passes() {
        assert!(Required.validate("a").is_valid());
    }

    #[test]
    fn required_whitespace_counts() {
        assert!(Required.validate(" ").is_valid());
    }

    // --- Email ---

    #[test]
    fn email_valid() {
        assert!(Email.validate("a@b.co").is_valid());
        assert!(Email.validate("john.doe+tag@mail.example.com").is_valid());
        assert!(Email.validate("UPPER@CASE.ORG").is_valid());
    }

    #[test]
    fn email_invalid() {
        assert!(!Email.validate("a@b").is_valid());
        assert!(!Email.validate("").is_valid());
        assert!(!Email.validate("no-at-sign.com").is_valid());
        assert!(!Email.validate("a@b.toolong").is_valid());
        assert!(!Email.validate("a@b.c").is_valid());
        assert!(!Email.validate(" a@b.co").is_valid());
    }

    // --- ZipCode ---

    #[test]
    fn zip_code_valid() {
        for zip in ["75001", "01000", "98000", "2A001", "2B999", "13008"] {
            assert!(ZipCode.validate(zip).is_valid(), "{zip} should be valid");
        }
    }

    #[test]
    fn zip_code_invalid() {
        for zip in ["99999", "00123", "7500", "750011", "2C001", "2a001", "ABCDE", ""] {
            assert!(!ZipCode.validate(zip).is_valid(), "{zip} should be invalid");
        }
    }

    // --- Phone ---

    #[test]
    fn phone_valid() {
        for phone in [
            "0123456789",
            "01 23 45 67 89",
            "06.12.34.56.78",
            "06-12-34-56-78",
            "06 12.34-5678",
        ] {
            assert!(Phone.validate(phone).is_valid(), "{phone} should be valid");
        }
    }

    #[test]
    fn phone_invalid() {
        for phone in ["0023456789", "1123456789", "012345678", "01  23 45 67 89", "+33123456789"] {
            assert!(!Phone.validate(phone).is_valid(), "{phone} should be invalid");
        }
    }

    // --- Date ---

    #[test]
    fn date_valid() {
        assert!(DateFormat::default().validate("25/12/2020").is_valid());
        assert!(DateFormat::default().validate("29/02/2024").is_valid());
    }

    #[test]
    fn date_invalid() {
        let v = DateFormat::default();
        assert!(!v.validate("2020-12-25").is_valid());
        assert!(!v.validate("31/02/2020").is_valid());
        assert!(!v.validate("").is_valid());
        assert!(!v.validate("tomorrow").is_valid());
        let loose = [
            "1/1/20",
            "01/01/20",
            "01/01/+2020",
            "1/01/2020",
            "01/1/2020",
            " 01/01/2020",
        ];
        for loose in loose {
            assert!(!v.validate(loose).is_valid(), "{loose} should be invalid");
        }
    }

    #[test]
    fn date_custom_pattern_is_strict_too() {
        let v = DateFormat { pattern: "%Y-%m-%d" };
        assert!(v.validate("2020-12-25").is_valid());
        assert!(!v.validate("2020-1-5").is_valid());
    }

    #[test]
    fn date_parse_returns_value() {
        let d = DateFormat::default().parse("01/03/2021");
        assert_eq!(d, NaiveDate::from_ymd_opt(2021, 3, 1));
    }

    // --- Accept / results ---

    #[test]
    fn accept_anything() {
        assert!(Accept.validate("").is_valid());
        assert!(Accept.validate("whatever").is_valid());
    }

    #[test]
    fn error_display_uses_message() {
        let e = ValidationError::new(ERROR_CODE_EMAIL, "Invalid email address");
        assert_eq!(e.to_string(), "Invalid email address");
        assert!(ValidationResult::Valid.error().is_none());
    }
}
