#![forbid(unsafe_code)]

//! Field validation.
//!
//! A field declares a [`ValidationKind`] through its [`ValidationProvider`];
//! [`validate`] checks the field text against the matching built-in
//! [`Validator`] and reports failures to the field's [`ErrorDisplay`].
//!
//! # Example
//!
//! ```rust
//! use formkit_widgets::validation::{ValidationKind, Validator, Email};
//!
//! assert!(ValidationKind::ZipCode.verdict("2A001").is_valid());
//! assert!(Email.validate("a@b.co").is_valid());
//! ```

mod engine;
mod kind;
mod validators;

pub use engine::{ErrorDisplay, ValidationBinding, ValidationProvider, validate, verdict};
pub use kind::{ValidationKind, ValidationVerdict};
pub use validators::{
    // Built-in validators
    Accept,
    DateFormat,
    // Error codes
    ERROR_CODE_DATE,
    ERROR_CODE_EMAIL,
    ERROR_CODE_NOT_BLANK,
    ERROR_CODE_PHONE,
    ERROR_CODE_ZIP_CODE,
    Email,
    Phone,
    Required,
    VALIDATION_DATE_FORMAT,
    // Core types
    ValidationError,
    ValidationResult,
    Validator,
    ZipCode,
};
