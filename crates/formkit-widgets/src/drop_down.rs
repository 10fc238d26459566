#![forbid(unsafe_code)]

//! Drop-down fields: a value picked from an external picker surface.
//!
//! [`DropDown`] presents a list of strings; [`DateDropDown`] presents a
//! day-only date wheel. Both share [`SelectionState`] and the same
//! `Closed -> Open -> Closed` lifecycle.
//!
//! User picks ([`DropDown::on_choice_picked`]) and programmatic selection
//! ([`DropDown::select_at`]) go through the same path, so delegates observe
//! identical notifications either way.
//!
//! # Failure Modes
//!
//! | Scenario                 | Behavior                            |
//! |--------------------------|-------------------------------------|
//! | No data source           | `reload` does nothing               |
//! | No picker surface        | `present` does nothing              |
//! | Data source has no host  | `present` logs a warning, no-op     |
//! | No delegate              | state updates, nobody is notified   |
//! | Index beyond choices     | `select_at` returns an error        |
//! | Row beyond picker rows   | `on_choice_picked` returns an error |
//! | Row pick on a date field | `on_choice_picked` returns an error |

use std::fmt::{self, Write as _};

use chrono::NaiveDate;
use formkit_core::config::DEFAULT_DATE_FORMAT;
use formkit_core::{FieldId, FormConfig, Rect};

use crate::error::{FormError, Result};
use crate::field::{Field, ReturnKey};
use crate::selection::{
    ChoiceDataSource, PickedRow, PickerKind, PickerRequest, PickerSurface, SelectionDelegate,
    SelectionPhase, SelectionState, SelectionValue,
};
use crate::validation::ValidationBinding;

/// A field whose value is chosen from a list.
pub struct DropDown {
    id: FieldId,
    frame: Rect,
    return_key: ReturnKey,
    validation: ValidationBinding,
    title: String,
    placeholder: Option<String>,
    rows: Vec<String>,
    state: SelectionState,
    phase: SelectionPhase,
    day_picker: bool,
    date_format: String,
    sentinel_label: String,
    done_title: String,
    cancel_title: String,
    data_source: Option<Box<dyn ChoiceDataSource>>,
    delegate: Option<Box<dyn SelectionDelegate>>,
    surface: Option<Box<dyn PickerSurface>>,
}

impl fmt::Debug for DropDown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DropDown")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("rows", &self.rows)
            .field("state", &self.state)
            .field("phase", &self.phase)
            .field("day_picker", &self.day_picker)
            .finish_non_exhaustive()
    }
}

impl DropDown {
    /// Create a required drop-down with no choices.
    pub fn new(id: FieldId) -> Self {
        let config = FormConfig::default();
        Self {
            id,
            frame: Rect::default(),
            return_key: ReturnKey::Default,
            validation: ValidationBinding::default(),
            title: String::new(),
            placeholder: None,
            rows: Vec::new(),
            state: SelectionState::default(),
            phase: SelectionPhase::Closed,
            day_picker: false,
            date_format: config.date_format,
            sentinel_label: config.sentinel_label,
            done_title: config.picker_done_title,
            cancel_title: config.picker_cancel_title,
            data_source: None,
            delegate: None,
            surface: None,
        }
    }

    /// Set the frame (builder).
    #[must_use]
    pub fn with_frame(mut self, frame: Rect) -> Self {
        self.frame = frame;
        self
    }

    /// Take labels and the date pattern from a form configuration.
    pub fn apply_config(&mut self, config: &FormConfig) {
        self.date_format.clone_from(&config.date_format);
        self.sentinel_label.clone_from(&config.sentinel_label);
        self.done_title.clone_from(&config.picker_done_title);
        self.cancel_title.clone_from(&config.picker_cancel_title);
    }

    /// Register the data source and refresh the placeholder.
    pub fn set_data_source(&mut self, data_source: impl ChoiceDataSource + 'static) {
        self.data_source = Some(Box::new(data_source));
        self.update_placeholder();
    }

    /// Register the selection delegate.
    pub fn set_delegate(&mut self, delegate: impl SelectionDelegate + 'static) {
        self.delegate = Some(Box::new(delegate));
    }

    /// Register the picker surface.
    pub fn set_surface(&mut self, surface: impl PickerSurface + 'static) {
        self.surface = Some(Box::new(surface));
    }

    /// Selection bookkeeping.
    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Picker lifecycle phase.
    pub fn phase(&self) -> SelectionPhase {
        self.phase
    }

    /// Rows as the picker sees them, sentinel included.
    pub fn picker_rows(&self) -> &[String] {
        &self.rows
    }

    /// Number of real choices.
    pub fn choice_count(&self) -> usize {
        self.rows.len().saturating_sub(self.state.index_offset())
    }

    /// Selected choice index.
    pub fn selected_index(&self) -> Option<usize> {
        self.state.selected_index()
    }

    /// Placeholder shown while nothing is selected.
    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    /// Text to display: the selection, or the placeholder while unset.
    pub fn display_text(&self) -> &str {
        if self.title.is_empty() {
            self.placeholder.as_deref().unwrap_or("")
        } else {
            &self.title
        }
    }

    /// Refresh the placeholder from the data source.
    pub fn update_placeholder(&mut self) {
        if let Some(placeholder) = self
            .data_source
            .as_ref()
            .and_then(|ds| ds.placeholder(self.id))
        {
            self.placeholder = Some(placeholder);
        }
    }

    /// Rebuild choices from the data source. No-op without one.
    pub fn reload(&mut self) {
        self.update_placeholder();
        let Some(ds) = self.data_source.as_ref() else {
            tracing::debug!(field = %self.id, "reload without data source");
            return;
        };
        let values = ds.values(self.id);
        let required = ds.is_required(self.id);
        let current = ds.selected_index(self.id);
        if let Err(err) = self.reload_with(values, required, current) {
            tracing::warn!(field = %self.id, %err, "data source preselection ignored");
        }
    }

    /// Rebuild choices from explicit values.
    ///
    /// Optional fields get the sentinel row in front. A supplied `current`
    /// index is applied through [`DropDown::select_at`].
    pub fn reload_with(
        &mut self,
        choices: Vec<String>,
        is_required: bool,
        current: Option<usize>,
    ) -> Result<()> {
        self.state.set_required(is_required);
        self.rows = choices;
        if !is_required {
            self.rows.insert(0, self.sentinel_label.clone());
        }
        tracing::debug!(
            field = %self.id,
            choices = self.choice_count(),
            offset = self.state.index_offset(),
            "choices reloaded"
        );
        match current {
            Some(index) => self.select_at(index),
            None => Ok(()),
        }
    }

    fn request(&self) -> PickerRequest {
        let kind = if self.day_picker {
            PickerKind::Day {
                selected: match self.state.selected_value() {
                    Some(SelectionValue::Date(d)) => Some(*d),
                    _ => None,
                },
            }
        } else {
            PickerKind::Choices {
                rows: self.rows.clone(),
                selected_row: self.state.selected_index().map(|i| self.state.row_for(i)),
            }
        };
        PickerRequest {
            field: self.id,
            kind,
            done_title: self.done_title.clone(),
            cancel_title: self.cancel_title.clone(),
        }
    }

    /// Show the picker. Returns `true` if it was shown.
    ///
    /// Dismissing the keyboard of another field is the form's job; see
    /// `Form::present`.
    pub fn present(&mut self) -> bool {
        if self.surface.is_none() {
            tracing::debug!(field = %self.id, "present without picker surface");
            return false;
        }
        let Some(host) = self.data_source.as_ref().and_then(|ds| ds.host(self.id)) else {
            tracing::warn!(field = %self.id, "no host to present the picker over");
            return false;
        };
        let request = self.request();
        if let Some(surface) = self.surface.as_mut() {
            surface.show(host, &request);
        }
        self.phase = SelectionPhase::Open;
        true
    }

    /// The picker was dismissed without a choice.
    pub fn cancel(&mut self) {
        self.phase = SelectionPhase::Closed;
    }

    /// Close an open picker without a choice.
    pub fn dismiss(&mut self) {
        if self.phase == SelectionPhase::Open {
            if let Some(surface) = self.surface.as_mut() {
                surface.close();
            }
            self.phase = SelectionPhase::Closed;
        }
    }

    /// Clear the displayed text without notifying anyone.
    pub fn reset_value(&mut self) {
        self.title.clear();
    }

    /// The picker reported a row pick (picker space).
    ///
    /// Rows past the end and picks on a day picker are rejected and leave the
    /// selection untouched.
    pub fn on_choice_picked(&mut self, row: usize, value: &str) -> Result<()> {
        if self.day_picker {
            return Err(FormError::NotAChoiceField(self.id));
        }
        if row >= self.rows.len() {
            return Err(FormError::RowOutOfRange {
                field: self.id,
                row,
                rows: self.rows.len(),
            });
        }
        self.phase = SelectionPhase::Closed;
        match self.state.resolve_row(row) {
            PickedRow::Sentinel => {
                self.reset_value();
                self.state.clear();
                tracing::debug!(field = %self.id, "selection cleared");
                if let Some(delegate) = self.delegate.as_mut() {
                    delegate.deselected(self.id);
                }
            }
            PickedRow::Choice(index) => {
                self.title = value.to_string();
                self.state
                    .commit(SelectionValue::Text(value.to_string()), Some(index));
                tracing::debug!(field = %self.id, index, "choice selected");
                if let Some(delegate) = self.delegate.as_mut() {
                    delegate.selected(self.id, value, index);
                }
            }
        }
        Ok(())
    }

    /// Select a choice programmatically (choice space).
    pub fn select_at(&mut self, index: usize) -> Result<()> {
        let row = self.state.row_for(index);
        let Some(value) = self.rows.get(row).cloned() else {
            return Err(FormError::IndexOutOfRange {
                field: self.id,
                index,
                len: self.choice_count(),
            });
        };
        if let Some(surface) = self.surface.as_mut() {
            surface.select_row(row);
        }
        self.on_choice_picked(row, &value)
    }

    fn format_date(&self, date: NaiveDate) -> String {
        let mut out = String::new();
        if write!(out, "{}", date.format(&self.date_format)).is_err() {
            tracing::warn!(field = %self.id, pattern = %self.date_format, "invalid date pattern");
            out.clear();
            let _ = write!(out, "{}", date.format(DEFAULT_DATE_FORMAT));
        }
        out
    }

    fn show_date(&mut self, date: NaiveDate) {
        self.title = self.format_date(date);
        self.state.commit(SelectionValue::Date(date), None);
    }

    fn on_date_picked(&mut self, date: NaiveDate) {
        self.phase = SelectionPhase::Closed;
        self.show_date(date);
        tracing::debug!(field = %self.id, %date, "date selected");
        if let Some(delegate) = self.delegate.as_mut() {
            delegate.date_selected(self.id, date);
        }
    }
}

impl Field for DropDown {
    fn id(&self) -> FieldId {
        self.id
    }

    fn text(&self) -> &str {
        &self.title
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

/// A drop-down picking a day.
#[derive(Debug)]
pub struct DateDropDown {
    inner: DropDown,
}

impl DateDropDown {
    /// Create an empty date drop-down.
    pub fn new(id: FieldId) -> Self {
        let mut inner = DropDown::new(id);
        inner.day_picker = true;
        Self { inner }
    }

    /// Set the frame (builder).
    #[must_use]
    pub fn with_frame(mut self, frame: Rect) -> Self {
        self.inner.frame = frame;
        self
    }

    /// Set the display pattern (chrono syntax).
    pub fn set_date_format(&mut self, pattern: impl Into<String>) {
        self.inner.date_format = pattern.into();
        if let Some(date) = self.selected_date() {
            self.inner.show_date(date);
        }
    }

    /// The shared drop-down machinery.
    pub fn inner(&self) -> &DropDown {
        &self.inner
    }

    /// The shared drop-down machinery, mutably.
    pub fn inner_mut(&mut self) -> &mut DropDown {
        &mut self.inner
    }

    /// Committed date.
    pub fn selected_date(&self) -> Option<NaiveDate> {
        match self.inner.state.selected_value() {
            Some(SelectionValue::Date(d)) => Some(*d),
            _ => None,
        }
    }

    /// Set the date programmatically. The text is refreshed only on change and
    /// the delegate is not notified.
    pub fn set_selected_date(&mut self, date: NaiveDate) {
        if self.selected_date() != Some(date) {
            self.inner.show_date(date);
        }
    }

    /// Show the day picker.
    pub fn present(&mut self) -> bool {
        self.inner.present()
    }

    /// The picker reported a date pick.
    pub fn on_date_picked(&mut self, date: NaiveDate) {
        self.inner.on_date_picked(date);
    }
}

impl Field for DateDropDown {
    fn id(&self) -> FieldId {
        self.inner.id
    }

    fn text(&self) -> &str {
        &self.inner.title
    }

    fn frame(&self) -> Rect {
        self.inner.frame
    }

    fn set_frame(&mut self, frame: Rect) {
        self.inner.frame = frame;
    }

    fn return_key(&self) -> ReturnKey {
        self.inner.return_key
    }

    fn set_return_key(&mut self, key: ReturnKey) {
        self.inner.return_key = key;
    }

    fn validation(&self) -> &ValidationBinding {
        &self.inner.validation
    }

    fn validation_mut(&mut self) -> &mut ValidationBinding {
        &mut self.inner.validation
    }
}
