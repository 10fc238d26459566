#![forbid(unsafe_code)]

//! Validation kinds and verdicts.

use std::fmt;

use super::validators::{Accept, DateFormat, Email, Phone, Required, Validator, ZipCode};

/// The validation policy declared for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValidationKind {
    /// Anything goes.
    #[default]
    NoValidation,
    /// At least one character.
    NotBlank,
    /// `local@domain.tld`.
    Email,
    /// French postal code.
    ZipCode,
    /// French phone number.
    Phone,
    /// `dd/mm/yyyy`.
    Date,
}

impl ValidationKind {
    /// Every kind, in declaration order.
    pub const ALL: [ValidationKind; 6] = [
        Self::NoValidation,
        Self::NotBlank,
        Self::Email,
        Self::ZipCode,
        Self::Phone,
        Self::Date,
    ];

    /// Label handed to the error-display sink.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoValidation => "NoValidation",
            Self::NotBlank => "NotBlank",
            Self::Email => "Email",
            Self::ZipCode => "ZipCode",
            Self::Phone => "Phone",
            Self::Date => "Date",
        }
    }

    /// The validator implementing this kind.
    #[must_use]
    pub fn validator(self) -> &'static dyn Validator<str> {
        static DATE: DateFormat = DateFormat {
            pattern: super::validators::VALIDATION_DATE_FORMAT,
        };
        match self {
            Self::NoValidation => &Accept,
            Self::NotBlank => &Required,
            Self::Email => &Email,
            Self::ZipCode => &ZipCode,
            Self::Phone => &Phone,
            Self::Date => &DATE,
        }
    }

    /// Check `text` against this kind.
    #[must_use]
    pub fn verdict(self, text: &str) -> ValidationVerdict {
        match self.validator().validate(text).error() {
            None => ValidationVerdict::Valid,
            Some(reason) => {
                tracing::debug!(kind = reason.code, %reason, "text rejected");
                ValidationVerdict::Invalid(self)
            }
        }
    }
}

impl fmt::Display for ValidationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of checking a field's text against its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationVerdict {
    Valid,
    Invalid(ValidationKind),
}

impl ValidationVerdict {
    #[must_use]
    pub fn is_valid(self) -> bool {
        matches!(self, Self::Valid)
    }
}
