#![forbid(unsafe_code)]

//! Per-field validation: provider lookup, verdict, and error-mode toggling.
//!
//! # Contract
//!
//! - A field without a [`ValidationProvider`] always validates.
//! - The kind is queried on every call, so it may change between calls.
//! - On failure the [`ErrorDisplay`] sink enters error mode with the kind label.
//!   Leaving error mode is the focus-gained path's job, not validation's.
//! - Field text and state are never modified.

use std::fmt;

use formkit_core::FieldId;

use super::kind::{ValidationKind, ValidationVerdict};
use crate::field::Field;

/// Supplies the validation kind of a field on request.
pub trait ValidationProvider {
    fn validation_kind(&self, field: FieldId) -> ValidationKind;
}

/// Receives error-mode transitions for display.
pub trait ErrorDisplay {
    /// The field failed validation; `kind_label` names the failing kind.
    fn enter_error_mode(&mut self, field: FieldId, kind_label: &str);
    /// The field started editing again.
    fn exit_error_mode(&mut self, field: FieldId);
}

/// Optional validation collaborators attached to a field.
#[derive(Default)]
pub struct ValidationBinding {
    provider: Option<Box<dyn ValidationProvider>>,
    display: Option<Box<dyn ErrorDisplay>>,
    error_mode: bool,
}

impl fmt::Debug for ValidationBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationBinding")
            .field("provider", &self.provider.is_some())
            .field("display", &self.display.is_some())
            .field("error_mode", &self.error_mode)
            .finish()
    }
}

impl ValidationBinding {
    /// Set the kind provider.
    pub fn set_provider(&mut self, provider: impl ValidationProvider + 'static) {
        self.provider = Some(Box::new(provider));
    }

    /// Set the error-display sink.
    pub fn set_display(&mut self, display: impl ErrorDisplay + 'static) {
        self.display = Some(Box::new(display));
    }

    /// Whether a provider is registered.
    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Current kind, if a provider is registered.
    pub fn kind(&self, field: FieldId) -> Option<ValidationKind> {
        self.provider.as_ref().map(|p| p.validation_kind(field))
    }

    /// Whether the last validation failed and editing has not resumed since.
    pub fn in_error_mode(&self) -> bool {
        self.error_mode
    }

    pub(crate) fn enter_error_mode(&mut self, field: FieldId, kind: ValidationKind) {
        self.error_mode = true;
        match self.display.as_mut() {
            Some(display) => display.enter_error_mode(field, kind.as_str()),
            None => tracing::debug!(%field, kind = kind.as_str(), "validation failed, no error display"),
        }
    }

    pub(crate) fn exit_error_mode(&mut self, field: FieldId) {
        self.error_mode = false;
        if let Some(display) = self.display.as_mut() {
            display.exit_error_mode(field);
        }
    }
}

/// Check a field's current text against its current kind, without side effects.
pub fn verdict(field: &dyn Field) -> ValidationVerdict {
    match field.validation().kind(field.id()) {
        Some(kind) => kind.verdict(field.text()),
        None => ValidationVerdict::Valid,
    }
}

/// Validate a field, entering error mode on failure.
pub fn validate(field: &mut dyn Field) -> bool {
    let id = field.id();
    match verdict(field) {
        ValidationVerdict::Valid => true,
        ValidationVerdict::Invalid(kind) => {
            field.validation_mut().enter_error_mode(id, kind);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text_input::TextInput;
    use formkit_core::EventBus;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    struct Fixed(ValidationKind);

    impl ValidationProvider for Fixed {
        fn validation_kind(&self, _field: FieldId) -> ValidationKind {
            self.0
        }
    }

    #[derive(Clone)]
    struct Switching(Rc<Cell<ValidationKind>>);

    impl ValidationProvider for Switching {
        fn validation_kind(&self, _field: FieldId) -> ValidationKind {
            self.0.get()
        }
    }

    #[derive(Clone, Default)]
    struct Sink(Rc<RefCell<Vec<String>>>);

    impl ErrorDisplay for Sink {
        fn enter_error_mode(&mut self, field: FieldId, kind_label: &str) {
            self.0.borrow_mut().push(format!("enter {field} {kind_label}"));
        }
        fn exit_error_mode(&mut self, field: FieldId) {
            self.0.borrow_mut().push(format!("exit {field}"));
        }
    }

    fn input(text: &str, kind: Option<ValidationKind>, sink: &Sink) -> TextInput {
        let mut input = TextInput::new(FieldId(1)).with_text(text);
        if let Some(kind) = kind {
            input.validation_mut().set_provider(Fixed(kind));
        }
        input.validation_mut().set_display(sink.clone());
        input
    }

    #[test]
    fn no_provider_always_validates() {
        let sink = Sink::default();
        let mut field = input("", None, &sink);
        assert!(validate(&mut field));
        assert!(sink.0.borrow().is_empty());
    }

    #[test]
    fn failure_enters_error_mode_with_label() {
        let sink = Sink::default();
        let mut field = input("a@b", Some(ValidationKind::Email), &sink);
        assert!(!validate(&mut field));
        assert!(field.validation().in_error_mode());
        assert_eq!(*sink.0.borrow(), vec!["enter field#1 Email"]);
        assert_eq!(field.text(), "a@b");
    }

    #[test]
    fn success_does_not_touch_display() {
        let sink = Sink::default();
        let mut field = input("a", Some(ValidationKind::NotBlank), &sink);
        assert!(validate(&mut field));
        assert!(!field.validation().in_error_mode());
        assert!(sink.0.borrow().is_empty());
    }

    #[test]
    fn focus_gained_exits_error_mode() {
        let sink = Sink::default();
        let mut bus = EventBus::new();
        let mut field = input("", Some(ValidationKind::NotBlank), &sink);
        validate(&mut field);
        field.begin_editing(&mut bus);
        assert!(!field.validation().in_error_mode());
        assert_eq!(
            *sink.0.borrow(),
            vec!["enter field#1 NotBlank", "exit field#1"]
        );
    }

    #[test]
    fn kind_is_requeried_each_time() {
        let kind = Rc::new(Cell::new(ValidationKind::NoValidation));
        let mut field = TextInput::new(FieldId(2)).with_text("hello");
        field
            .validation_mut()
            .set_provider(Switching(Rc::clone(&kind)));

        assert_eq!(verdict(&field), ValidationVerdict::Valid);
        kind.set(ValidationKind::Phone);
        assert_eq!(
            verdict(&field),
            ValidationVerdict::Invalid(ValidationKind::Phone)
        );
    }
}
