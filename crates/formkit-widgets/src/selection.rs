#![forbid(unsafe_code)]

//! Selection state shared by drop-down fields.
//!
//! Optional fields prepend a sentinel "unset" row to the picker, so the
//! picker's row numbers and the caller-facing choice indices differ by one.
//! [`SelectionState::resolve_row`] and [`SelectionState::row_for`] are the only
//! places that translate between the two spaces.
//!
//! # Invariants
//!
//! 1. `index_offset() == 1` iff the field is optional.
//! 2. `selected_index()` is always a choice index, never a picker row.
//! 3. `row_for(i)` followed by `resolve_row` yields `PickedRow::Choice(i)`.

use chrono::NaiveDate;
use formkit_core::FieldId;

/// Opaque handle of the screen a picker is presented over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HostId(pub u64);

/// A committed selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionValue {
    Text(String),
    Date(NaiveDate),
}

/// Whether the picker surface is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionPhase {
    #[default]
    Closed,
    Open,
}

/// What a picker row stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickedRow {
    /// The "unset" row of an optional field.
    Sentinel,
    /// A real choice, as a caller-facing index.
    Choice(usize),
}

/// Value and index bookkeeping for a selection field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    is_required: bool,
    selected_index: Option<usize>,
    selected_value: Option<SelectionValue>,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            is_required: true,
            selected_index: None,
            selected_value: None,
        }
    }
}

impl SelectionState {
    /// Whether a value must be chosen (no sentinel row).
    pub fn is_required(&self) -> bool {
        self.is_required
    }

    /// Set whether a value must be chosen.
    pub fn set_required(&mut self, required: bool) {
        self.is_required = required;
    }

    /// Number of synthetic rows in front of the choices: 0 or 1.
    pub fn index_offset(&self) -> usize {
        usize::from(!self.is_required)
    }

    /// Translate a picker row into choice space.
    pub fn resolve_row(&self, row: usize) -> PickedRow {
        match row.checked_sub(self.index_offset()) {
            Some(index) => PickedRow::Choice(index),
            None => PickedRow::Sentinel,
        }
    }

    /// Translate a choice index into picker space.
    pub fn row_for(&self, index: usize) -> usize {
        index + self.index_offset()
    }

    /// Currently selected choice index.
    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    /// Currently committed value.
    pub fn selected_value(&self) -> Option<&SelectionValue> {
        self.selected_value.as_ref()
    }

    /// Whether the field holds no value.
    pub fn is_unset(&self) -> bool {
        self.selected_value.is_none()
    }

    pub(crate) fn commit(&mut self, value: SelectionValue, index: Option<usize>) {
        self.selected_value = Some(value);
        self.selected_index = index;
    }

    pub(crate) fn clear(&mut self) {
        self.selected_value = None;
        self.selected_index = None;
    }
}

/// Supplies choices and presentation context for a drop-down.
pub trait ChoiceDataSource {
    /// Selectable values, without any sentinel row.
    fn values(&self, field: FieldId) -> Vec<String>;

    /// Preselected choice index, if any.
    fn selected_index(&self, field: FieldId) -> Option<usize>;

    /// Placeholder shown while nothing is selected.
    fn placeholder(&self, field: FieldId) -> Option<String>;

    /// Whether a value must be chosen.
    fn is_required(&self, field: FieldId) -> bool;

    /// Screen to present the picker over.
    fn host(&self, field: FieldId) -> Option<HostId>;
}

/// Receives selection outcomes.
pub trait SelectionDelegate {
    /// A choice was committed; `index` is in choice space.
    fn selected(&mut self, field: FieldId, value: &str, index: usize);

    /// The sentinel row was picked.
    fn deselected(&mut self, field: FieldId);

    /// A date was committed.
    fn date_selected(&mut self, field: FieldId, date: NaiveDate) {
        let _ = (field, date);
    }
}

/// What a picker should display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerKind {
    /// A wheel of text rows, sentinel included.
    Choices {
        rows: Vec<String>,
        selected_row: Option<usize>,
    },
    /// A day-only date wheel.
    Day { selected: Option<NaiveDate> },
}

/// Request handed to a [`PickerSurface`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerRequest {
    pub field: FieldId,
    pub kind: PickerKind,
    pub done_title: String,
    pub cancel_title: String,
}

/// The external picker widget driven by a drop-down.
pub trait PickerSurface {
    /// Show the picker over `host`.
    fn show(&mut self, host: HostId, request: &PickerRequest);

    /// Highlight a row (picker space).
    fn select_row(&mut self, row: usize);

    /// Dismiss the picker.
    fn close(&mut self) {}
}
