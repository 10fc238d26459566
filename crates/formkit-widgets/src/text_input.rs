#![forbid(unsafe_code)]

//! Single-line typed text field.
//!
//! A `TextInput` reports its lifecycle to the owning form through the
//! [`EventBus`] it is handed on every interaction:
//!
//! | Interaction        | Event                         |
//! |--------------------|-------------------------------|
//! | `begin_editing`    | [`FieldEvent::FocusGained`]   |
//! | `end_editing`      | [`FieldEvent::FocusLost`]     |
//! | `press_return`     | [`FieldEvent::ReturnPressed`] |
//! | `set_text`/`insert`| [`FieldEvent::TextChanged`]   |
//!
//! Beginning to edit also takes the field out of error mode.

use std::fmt;

use formkit_core::{EventBus, FieldEvent, FieldId, Rect};
use unicode_segmentation::UnicodeSegmentation;

use crate::field::{Field, ReturnKey};
use crate::validation::ValidationBinding;

/// Applies application-specific setup to a freshly built input.
pub trait InputDataSource {
    fn apply_custom_init(&self, input: &mut TextInput);
}

/// Observes edition mode transitions of a single input.
pub trait EditionDelegate {
    fn did_enter_edition_mode(&mut self, field: FieldId);
    fn did_exit_edition_mode(&mut self, field: FieldId);
}

/// A typed text field.
pub struct TextInput {
    id: FieldId,
    text: String,
    placeholder: Option<String>,
    frame: Rect,
    return_key: ReturnKey,
    char_limit: Option<usize>,
    editing: bool,
    validation: ValidationBinding,
    edition_delegate: Option<Box<dyn EditionDelegate>>,
}

impl fmt::Debug for TextInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextInput")
            .field("id", &self.id)
            .field("text", &self.text)
            .field("frame", &self.frame)
            .field("return_key", &self.return_key)
            .field("char_limit", &self.char_limit)
            .field("editing", &self.editing)
            .field("validation", &self.validation)
            .finish_non_exhaustive()
    }
}

impl TextInput {
    /// Create an empty input.
    pub fn new(id: FieldId) -> Self {
        Self {
            id,
            text: String::new(),
            placeholder: None,
            frame: Rect::default(),
            return_key: ReturnKey::Default,
            char_limit: None,
            editing: false,
            validation: ValidationBinding::default(),
            edition_delegate: None,
        }
    }

    /// Set the initial text (builder). No event is emitted.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the placeholder (builder).
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Set the frame (builder).
    #[must_use]
    pub fn with_frame(mut self, frame: Rect) -> Self {
        self.frame = frame;
        self
    }

    /// Run the data source's custom initialization once (builder).
    #[must_use]
    pub fn with_data_source(mut self, data_source: &dyn InputDataSource) -> Self {
        data_source.apply_custom_init(&mut self);
        self
    }

    /// Set the edition delegate (builder).
    #[must_use]
    pub fn with_edition_delegate(mut self, delegate: impl EditionDelegate + 'static) -> Self {
        self.edition_delegate = Some(Box::new(delegate));
        self
    }

    /// Placeholder shown while empty.
    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    /// Set or clear the maximum number of characters accepted by typing.
    pub fn set_char_limit(&mut self, limit: Option<usize>) {
        self.char_limit = limit;
    }

    /// Maximum number of characters accepted by typing.
    pub fn char_limit(&self) -> Option<usize> {
        self.char_limit
    }

    /// Whether the input currently holds the keyboard.
    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Whether typing `replacement` is allowed.
    ///
    /// Deletions (empty replacement) are always allowed; otherwise the text
    /// must still be under the character limit.
    pub fn should_change(&self, replacement: &str) -> bool {
        match self.char_limit {
            Some(limit) if !replacement.is_empty() => self.text.graphemes(true).count() < limit,
            _ => true,
        }
    }

    /// Start editing. Returns `false` if already editing.
    pub fn begin_editing(&mut self, bus: &mut EventBus) -> bool {
        if self.editing {
            return false;
        }
        self.editing = true;
        if let Some(delegate) = self.edition_delegate.as_mut() {
            delegate.did_enter_edition_mode(self.id);
        }
        self.validation.exit_error_mode(self.id);
        bus.emit(FieldEvent::FocusGained(self.id));
        true
    }

    /// Stop editing. Returns `false` if not editing.
    pub fn end_editing(&mut self, bus: &mut EventBus) -> bool {
        if !self.editing {
            return false;
        }
        self.editing = false;
        if let Some(delegate) = self.edition_delegate.as_mut() {
            delegate.did_exit_edition_mode(self.id);
        }
        bus.emit(FieldEvent::FocusLost(self.id));
        true
    }

    /// Press the keyboard return key.
    pub fn press_return(&mut self, bus: &mut EventBus) {
        bus.emit(FieldEvent::ReturnPressed(self.id));
    }

    /// Replace the whole text.
    pub fn set_text(&mut self, text: impl Into<String>, bus: &mut EventBus) {
        self.text = text.into();
        bus.emit(FieldEvent::TextChanged {
            field: self.id,
            text: self.text.clone(),
        });
    }

    /// Append typed text, honouring the character limit.
    pub fn insert(&mut self, typed: &str, bus: &mut EventBus) -> bool {
        if typed.is_empty() || !self.should_change(typed) {
            return false;
        }
        let mut text = std::mem::take(&mut self.text);
        text.push_str(typed);
        self.set_text(text, bus);
        true
    }

    /// Remove the last grapheme. Returns `false` on empty text.
    pub fn delete_backward(&mut self, bus: &mut EventBus) -> bool {
        let Some((start, _)) = self.text.grapheme_indices(true).next_back() else {
            return false;
        };
        let mut text = std::mem::take(&mut self.text);
        text.truncate(start);
        self.set_text(text, bus);
        true
    }
}

impl Field for TextInput {
    fn id(&self) -> FieldId {
        self.id
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn frame(&self) -> Rect {
        self.frame
    }

    fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
    }

    fn return_key(&self) -> ReturnKey {
        self.return_key
    }

    fn set_return_key(&mut self, key: ReturnKey) {
        self.return_key = key;
    }

    fn validation(&self) -> &ValidationBinding {
        &self.validation
    }

    fn validation_mut(&mut self) -> &mut ValidationBinding {
        &mut self.validation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn drain(bus: &mut EventBus) -> Vec<FieldEvent> {
        std::iter::from_fn(|| bus.pop()).collect()
    }

    #[derive(Clone, Default)]
    struct Log(Rc<RefCell<Vec<String>>>);

    impl EditionDelegate for Log {
        fn did_enter_edition_mode(&mut self, field: FieldId) {
            self.0.borrow_mut().push(format!("enter {field}"));
        }
        fn did_exit_edition_mode(&mut self, field: FieldId) {
            self.0.borrow_mut().push(format!("exit {field}"));
        }
    }

    impl crate::validation::ErrorDisplay for Log {
        fn enter_error_mode(&mut self, field: FieldId, kind_label: &str) {
            self.0.borrow_mut().push(format!("error {field} {kind_label}"));
        }
        fn exit_error_mode(&mut self, field: FieldId) {
            self.0.borrow_mut().push(format!("clear {field}"));
        }
    }

    struct Uppercase;

    impl InputDataSource for Uppercase {
        fn apply_custom_init(&self, input: &mut TextInput) {
            input.set_char_limit(Some(3));
            input.placeholder = Some("ABC".into());
        }
    }

    #[test]
    fn editing_lifecycle_emits_events() {
        let mut bus = EventBus::new();
        let mut input = TextInput::new(FieldId(1));

        assert!(input.begin_editing(&mut bus));
        assert!(!input.begin_editing(&mut bus));
        input.press_return(&mut bus);
        assert!(input.end_editing(&mut bus));
        assert!(!input.end_editing(&mut bus));

        assert_eq!(
            drain(&mut bus),
            vec![
                FieldEvent::FocusGained(FieldId(1)),
                FieldEvent::ReturnPressed(FieldId(1)),
                FieldEvent::FocusLost(FieldId(1)),
            ]
        );
    }

    #[test]
    fn begin_editing_exits_error_mode_and_notifies_delegate() {
        let log = Log::default();
        let mut bus = EventBus::new();
        let mut input = TextInput::new(FieldId(2)).with_edition_delegate(log.clone());
        input.validation_mut().set_display(log.clone());

        input.begin_editing(&mut bus);
        input.end_editing(&mut bus);

        assert_eq!(
            *log.0.borrow(),
            vec!["enter field#2", "clear field#2", "exit field#2"]
        );
    }

    #[test]
    fn char_limit_blocks_insertions_not_deletions() {
        let mut bus = EventBus::new();
        let mut input = TextInput::new(FieldId(3));
        input.set_char_limit(Some(2));

        assert!(input.insert("a", &mut bus));
        assert!(input.insert("b", &mut bus));
        assert!(!input.insert("c", &mut bus));
        assert_eq!(input.text(), "ab");
        assert!(input.should_change(""));
        assert!(input.delete_backward(&mut bus));
        assert_eq!(input.text(), "a");
    }

    #[test]
    fn char_limit_counts_graphemes() {
        let mut bus = EventBus::new();
        let mut input = TextInput::new(FieldId(3)).with_text("e\u{301}");
        input.set_char_limit(Some(2));
        assert!(input.insert("x", &mut bus));
        assert!(!input.insert("y", &mut bus));
    }

    #[test]
    fn text_changes_are_reported() {
        let mut bus = EventBus::new();
        let mut input = TextInput::new(FieldId(4));
        input.insert("hi", &mut bus);
        input.delete_backward(&mut bus);
        assert_eq!(
            drain(&mut bus),
            vec![
                FieldEvent::TextChanged {
                    field: FieldId(4),
                    text: "hi".into()
                },
                FieldEvent::TextChanged {
                    field: FieldId(4),
                    text: "h".into()
                },
            ]
        );
    }

    #[test]
    fn delete_backward_on_empty_is_noop() {
        let mut bus = EventBus::new();
        let mut input = TextInput::new(FieldId(5));
        assert!(!input.delete_backward(&mut bus));
        assert!(bus.is_empty());
    }

    #[test]
    fn data_source_applies_custom_init() {
        let input = TextInput::new(FieldId(6)).with_data_source(&Uppercase);
        assert_eq!(input.char_limit(), Some(3));
        assert_eq!(input.placeholder(), Some("ABC"));
    }
}
