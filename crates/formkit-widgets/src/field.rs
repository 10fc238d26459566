#![forbid(unsafe_code)]

//! The field capability shared by every data-entry control.

use formkit_core::{FieldId, Rect};

use crate::drop_down::{DateDropDown, DropDown};
use crate::text_input::TextInput;
use crate::validation::ValidationBinding;

/// Return-key affordance shown by the keyboard while a field edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReturnKey {
    /// Not assigned by a form yet.
    #[default]
    Default,
    /// Moves to the following field.
    Next,
    /// Submits the form.
    Go,
}

/// A single data-entry control.
pub trait Field {
    /// Identifier within the owning form.
    fn id(&self) -> FieldId;

    /// Displayed text.
    fn text(&self) -> &str;

    /// Frame in scroll-content coordinates.
    fn frame(&self) -> Rect;

    /// Update the frame after a layout pass.
    fn set_frame(&mut self, frame: Rect);

    /// Current return-key affordance.
    fn return_key(&self) -> ReturnKey;

    /// Assign the return-key affordance.
    fn set_return_key(&mut self, key: ReturnKey);

    /// Validation collaborators.
    fn validation(&self) -> &ValidationBinding;

    /// Validation collaborators, mutably.
    fn validation_mut(&mut self) -> &mut ValidationBinding;
}

/// A field owned by a form.
#[derive(Debug)]
pub enum FormField {
    /// Typed text.
    Text(TextInput),
    /// Choice from a list.
    DropDown(DropDown),
    /// Choice of a day.
    Date(DateDropDown),
}

impl FormField {
    /// View as the shared capability.
    pub fn as_field(&self) -> &dyn Field {
        match self {
            Self::Text(f) => f,
            Self::DropDown(f) => f,
            Self::Date(f) => f,
        }
    }

    /// View as the shared capability, mutably.
    pub fn as_field_mut(&mut self) -> &mut dyn Field {
        match self {
            Self::Text(f) => f,
            Self::DropDown(f) => f,
            Self::Date(f) => f,
        }
    }

    /// The field identifier.
    pub fn id(&self) -> FieldId {
        self.as_field().id()
    }

    /// Whether values are picked rather than typed.
    pub fn is_selection(&self) -> bool {
        !matches!(self, Self::Text(_))
    }

    pub fn as_text_input(&self) -> Option<&TextInput> {
        match self {
            Self::Text(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_text_input_mut(&mut self) -> Option<&mut TextInput> {
        match self {
            Self::Text(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_drop_down(&self) -> Option<&DropDown> {
        match self {
            Self::DropDown(f) => Some(f),
            Self::Date(f) => Some(f.inner()),
            Self::Text(_) => None,
        }
    }

    pub fn as_drop_down_mut(&mut self) -> Option<&mut DropDown> {
        match self {
            Self::DropDown(f) => Some(f),
            Self::Date(f) => Some(f.inner_mut()),
            Self::Text(_) => None,
        }
    }

    pub fn as_date_drop_down_mut(&mut self) -> Option<&mut DateDropDown> {
        match self {
            Self::Date(f) => Some(f),
            _ => None,
        }
    }
}

impl From<TextInput> for FormField {
    fn from(f: TextInput) -> Self {
        Self::Text(f)
    }
}

impl From<DropDown> for FormField {
    fn from(f: DropDown) -> Self {
        Self::DropDown(f)
    }
}

impl From<DateDropDown> for FormField {
    fn from(f: DateDropDown) -> Self {
        Self::Date(f)
    }
}
