#![forbid(unsafe_code)]

//! Errors for API misuse.
//!
//! Missing collaborators and failed validations are not errors: the former
//! degrade to logged no-ops, the latter go to the error-display sink.

use std::fmt;

use formkit_core::FieldId;

/// Error returned when a form or field is driven with invalid arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// No field with this id is attached to the form.
    UnknownField(FieldId),
    /// The field exists but is not a drop-down.
    NotASelectionField(FieldId),
    /// The field exists but is not a typed text field.
    NotATextField(FieldId),
    /// A row pick sent to a date drop-down.
    NotAChoiceField(FieldId),
    /// A date pick sent to a drop-down of strings.
    NotADateField(FieldId),
    /// A picker row beyond the rows the picker was given (picker space).
    RowOutOfRange {
        field: FieldId,
        row: usize,
        rows: usize,
    },
    /// A choice index beyond the end of the choice list.
    IndexOutOfRange {
        field: FieldId,
        index: usize,
        len: usize,
    },
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownField(id) => write!(f, "unknown field: {id}"),
            Self::NotASelectionField(id) => write!(f, "{id} is not a selection field"),
            Self::NotATextField(id) => write!(f, "{id} is not a text field"),
            Self::NotAChoiceField(id) => write!(f, "{id} does not pick from a list"),
            Self::NotADateField(id) => write!(f, "{id} does not pick dates"),
            Self::RowOutOfRange { field, row, rows } => {
                write!(f, "picker row {row} out of range for {field} ({rows} rows)")
            }
            Self::IndexOutOfRange { field, index, len } => {
                write!(f, "choice index {index} out of range for {field} ({len} choices)")
            }
        }
    }
}

impl std::error::Error for FormError {}

/// Result alias for form operations.
pub type Result<T> = std::result::Result<T, FormError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            FormError::UnknownField(FieldId(9)).to_string(),
            "unknown field: field#9"
        );
        assert_eq!(
            FormError::IndexOutOfRange {
                field: FieldId(1),
                index: 4,
                len: 2
            }
            .to_string(),
            "choice index 4 out of range for field#1 (2 choices)"
        );
        assert_eq!(
            FormError::RowOutOfRange {
                field: FieldId(1),
                row: 7,
                rows: 2
            }
            .to_string(),
            "picker row 7 out of range for field#1 (2 rows)"
        );
        assert_eq!(
            FormError::NotADateField(FieldId(3)).to_string(),
            "field#3 does not pick dates"
        );
    }
}
