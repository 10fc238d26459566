#![forbid(unsafe_code)]

//! The form: owns fields, routes their events, walks the focus chain.
//!
//! Every public entry point that touches a field ends by draining the form's
//! [`EventBus`]. Events are dispatched in emission order, so when return moves
//! focus, `FocusGained` of the next field is handled before `FocusLost` of the
//! previous one and the viewport stays shrunk.
//!
//! Selection fields do not hold the keyboard. Presenting one ends typed
//! editing first; at most one field is active at a time, typed or picking.
//!
//! # Example
//!
//! ```rust
//! use formkit_core::FieldId;
//! use formkit_widgets::{Form, TextInput, Viewport};
//!
//! let mut form = Form::new(Viewport::new(600.0, 1200.0));
//! form.attach(TextInput::new(FieldId(1)));
//! form.attach(TextInput::new(FieldId(2)));
//!
//! form.begin_editing(FieldId(1)).unwrap();
//! form.press_return(FieldId(1)).unwrap();
//! assert_eq!(form.focused(), Some(FieldId(2)));
//! ```

use std::fmt;
use std::time::Duration;

use chrono::NaiveDate;
use formkit_core::{EventBus, FieldEvent, FieldId, FormConfig, Rect, SubscriptionId};

use crate::chain::{ChainProvider, FocusChain, OrderedChain};
use crate::drop_down::{DateDropDown, DropDown};
use crate::error::{FormError, Result};
use crate::field::{FormField, ReturnKey};
use crate::scroll::{ScrollCoordinator, Viewport};
use crate::validation;

/// Receives the submit request fired by return on the last field.
pub trait SubmitSink {
    fn submit_requested(&mut self);
}

impl<F: FnMut()> SubmitSink for F {
    fn submit_requested(&mut self) {
        self()
    }
}

/// A set of fields chained together above an on-screen keyboard.
pub struct Form {
    fields: Vec<FormField>,
    attached: OrderedChain,
    provider: Option<Box<dyn ChainProvider>>,
    scroll: ScrollCoordinator,
    bus: EventBus,
    focused: Option<FieldId>,
    picking: Option<FieldId>,
    submit_sink: Option<Box<dyn SubmitSink>>,
    config: FormConfig,
}

impl fmt::Debug for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Form")
            .field("fields", &self.fields)
            .field("custom_chain", &self.provider.is_some())
            .field("scroll", &self.scroll)
            .field("focused", &self.focused)
            .field("picking", &self.picking)
            .finish_non_exhaustive()
    }
}

impl Form {
    /// Create an empty form with the default configuration.
    pub fn new(viewport: Viewport) -> Self {
        Self::with_config(viewport, FormConfig::default())
    }

    /// Create an empty form.
    pub fn with_config(viewport: Viewport, config: FormConfig) -> Self {
        Self {
            fields: Vec::new(),
            attached: OrderedChain::default(),
            provider: None,
            scroll: ScrollCoordinator::with_config(viewport, &config),
            bus: EventBus::new(),
            focused: None,
            picking: None,
            submit_sink: None,
            config,
        }
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    // -----------------------------------------------------------------------
    // Fields
    // -----------------------------------------------------------------------

    /// Attach a field. A field with the same id is replaced.
    pub fn attach(&mut self, field: impl Into<FormField>) -> FieldId {
        let mut field = field.into();
        self.configure(&mut field);
        let id = field.id();
        match self.index_of(id) {
            Some(idx) => {
                tracing::warn!(field = %id, "replacing attached field");
                self.fields[idx] = field;
            }
            None => {
                self.fields.push(field);
                self.attached.push(id);
            }
        }
        self.assign_return_keys();
        id
    }

    /// Detach a field, returning it.
    pub fn detach(&mut self, id: FieldId) -> Option<FormField> {
        let idx = self.index_of(id)?;
        if self.focused == Some(id) || self.picking == Some(id) {
            self.release(id);
            self.pump();
        }
        let field = self.fields.remove(idx);
        self.attached.remove(id);
        self.assign_return_keys();
        Some(field)
    }

    fn configure(&self, field: &mut FormField) {
        if let Some(drop_down) = field.as_drop_down_mut() {
            drop_down.apply_config(&self.config);
        }
        if let Some(date) = field.as_date_drop_down_mut() {
            date.set_date_format(self.config.date_format.clone());
        }
    }

    fn index_of(&self, id: FieldId) -> Option<usize> {
        self.fields.iter().position(|f| f.id() == id)
    }

    fn slot(&self, id: FieldId) -> Result<usize> {
        self.index_of(id).ok_or(FormError::UnknownField(id))
    }

    pub fn field(&self, id: FieldId) -> Option<&FormField> {
        self.fields.iter().find(|f| f.id() == id)
    }

    pub fn field_mut(&mut self, id: FieldId) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|f| f.id() == id)
    }

    /// Fields in attach order.
    pub fn fields(&self) -> impl Iterator<Item = &FormField> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Update a field frame after layout.
    pub fn set_frame(&mut self, id: FieldId, frame: Rect) -> Result<()> {
        let idx = self.slot(id)?;
        self.fields[idx].as_field_mut().set_frame(frame);
        Ok(())
    }

    /// The active field, typed or picking.
    pub fn focused(&self) -> Option<FieldId> {
        self.focused.or(self.picking)
    }

    /// The selection field whose picker is open.
    pub fn picking(&self) -> Option<FieldId> {
        self.picking
    }

    // -----------------------------------------------------------------------
    // Chain
    // -----------------------------------------------------------------------

    /// Order fields with a provider instead of attach order.
    pub fn set_chain_provider(&mut self, provider: impl ChainProvider + 'static) {
        self.provider = Some(Box::new(provider));
        self.assign_return_keys();
    }

    /// Go back to attach order.
    pub fn clear_chain_provider(&mut self) {
        self.provider = None;
        self.assign_return_keys();
    }

    /// The focus chain as currently answered by the provider.
    pub fn chain(&self) -> FocusChain<'_> {
        match self.provider.as_deref() {
            Some(provider) => FocusChain::new(provider),
            None => FocusChain::new(&self.attached),
        }
    }

    fn assign_return_keys(&mut self) {
        let order: Vec<FieldId> = self.chain().iter().collect();
        let last = order.last().copied();
        for id in order {
            let key = if Some(id) == last {
                ReturnKey::Go
            } else {
                ReturnKey::Next
            };
            match self.field_mut(id) {
                Some(field) => field.as_field_mut().set_return_key(key),
                None => tracing::debug!(field = %id, "chain names a detached field"),
            }
        }
    }

    /// Re-read choices and chain order after the field set changed.
    ///
    /// Returns the first field of the chain.
    pub fn reload_data(&mut self) -> Option<FieldId> {
        for field in &mut self.fields {
            match field {
                FormField::DropDown(drop_down) => drop_down.reload(),
                FormField::Date(date) => date.inner_mut().update_placeholder(),
                FormField::Text(_) => {}
            }
        }
        self.assign_return_keys();
        self.scroll.reset();
        let first = self.chain().first();
        tracing::debug!(first = ?first, fields = self.fields.len(), "form reloaded");
        first
    }

    // -----------------------------------------------------------------------
    // Collaborators
    // -----------------------------------------------------------------------

    pub fn set_submit_sink(&mut self, sink: impl SubmitSink + 'static) {
        self.submit_sink = Some(Box::new(sink));
    }

    /// Observe every event before the form acts on it.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&FieldEvent) + 'static,
    {
        self.bus.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    // -----------------------------------------------------------------------
    // Interaction
    // -----------------------------------------------------------------------

    /// Give a field focus: typed fields start editing, selection fields
    /// present their picker.
    pub fn begin_editing(&mut self, id: FieldId) -> Result<()> {
        let idx = self.slot(id)?;
        if self.fields[idx].is_selection() {
            if let Some(current) = self.focused() {
                self.release(current);
            }
            self.present_at(idx);
        } else {
            self.focus_text(idx, self.focused().filter(|f| *f != id));
        }
        self.pump();
        Ok(())
    }

    /// Take focus away from a field.
    pub fn end_editing(&mut self, id: FieldId) -> Result<()> {
        self.slot(id)?;
        self.release(id);
        self.pump();
        Ok(())
    }

    /// Show a selection field's picker, ending typed editing first.
    pub fn present(&mut self, id: FieldId) -> Result<bool> {
        let idx = self.slot(id)?;
        if !self.fields[idx].is_selection() {
            return Err(FormError::NotASelectionField(id));
        }
        if let Some(current) = self.focused().filter(|f| *f != id) {
            self.release(current);
        }
        let shown = self.present_at(idx);
        self.pump();
        Ok(shown)
    }

    /// Press return on a field.
    pub fn press_return(&mut self, id: FieldId) -> Result<()> {
        let idx = self.slot(id)?;
        match &mut self.fields[idx] {
            FormField::Text(input) => input.press_return(&mut self.bus),
            _ => self.bus.emit(FieldEvent::ReturnPressed(id)),
        }
        self.pump();
        Ok(())
    }

    fn text_input(&self, id: FieldId) -> Result<usize> {
        let idx = self.slot(id)?;
        match self.fields[idx] {
            FormField::Text(_) => Ok(idx),
            _ => Err(FormError::NotATextField(id)),
        }
    }

    /// Type into a text field. Returns `false` when the character limit
    /// rejected the input.
    pub fn type_text(&mut self, id: FieldId, typed: &str) -> Result<bool> {
        let idx = self.text_input(id)?;
        let accepted = match &mut self.fields[idx] {
            FormField::Text(input) => input.insert(typed, &mut self.bus),
            _ => false,
        };
        self.pump();
        Ok(accepted)
    }

    /// Delete the last character of a text field.
    pub fn delete_backward(&mut self, id: FieldId) -> Result<bool> {
        let idx = self.text_input(id)?;
        let deleted = match &mut self.fields[idx] {
            FormField::Text(input) => input.delete_backward(&mut self.bus),
            _ => false,
        };
        self.pump();
        Ok(deleted)
    }

    /// Replace a text field's content.
    pub fn set_text(&mut self, id: FieldId, text: impl Into<String>) -> Result<()> {
        let idx = self.text_input(id)?;
        if let FormField::Text(input) = &mut self.fields[idx] {
            input.set_text(text, &mut self.bus);
        }
        self.pump();
        Ok(())
    }

    fn drop_down(&mut self, id: FieldId) -> Result<&mut DropDown> {
        let idx = self.slot(id)?;
        self.fields[idx]
            .as_drop_down_mut()
            .ok_or(FormError::NotASelectionField(id))
    }

    fn choice_list(&mut self, id: FieldId) -> Result<&mut DropDown> {
        let idx = self.slot(id)?;
        match &mut self.fields[idx] {
            FormField::DropDown(drop_down) => Ok(drop_down),
            FormField::Date(_) => Err(FormError::NotAChoiceField(id)),
            FormField::Text(_) => Err(FormError::NotASelectionField(id)),
        }
    }

    fn date_field(&mut self, id: FieldId) -> Result<&mut DateDropDown> {
        let idx = self.slot(id)?;
        match &mut self.fields[idx] {
            FormField::Date(date) => Ok(date),
            FormField::DropDown(_) => Err(FormError::NotADateField(id)),
            FormField::Text(_) => Err(FormError::NotASelectionField(id)),
        }
    }

    /// Select a choice programmatically (choice space).
    pub fn select_at(&mut self, id: FieldId, index: usize) -> Result<()> {
        self.choice_list(id)?.select_at(index)?;
        self.picker_closed(id);
        Ok(())
    }

    /// The picker of `id` reported a row pick (picker space).
    ///
    /// A rejected pick leaves the field and the open picker as they were.
    pub fn pick_row(&mut self, id: FieldId, row: usize, value: &str) -> Result<()> {
        self.choice_list(id)?.on_choice_picked(row, value)?;
        self.picker_closed(id);
        Ok(())
    }

    /// The picker of `id` reported a date.
    pub fn pick_date(&mut self, id: FieldId, date: NaiveDate) -> Result<()> {
        self.date_field(id)?.on_date_picked(date);
        self.picker_closed(id);
        Ok(())
    }

    /// The picker of `id` was dismissed without a choice.
    pub fn cancel_picker(&mut self, id: FieldId) -> Result<()> {
        self.drop_down(id)?.cancel();
        self.picker_closed(id);
        Ok(())
    }

    fn picker_closed(&mut self, id: FieldId) {
        if self.picking == Some(id) {
            self.picking = None;
        }
    }

    /// The keyboard (or an equivalent overlay) appeared.
    pub fn overlay_shown(&mut self, height: f32) {
        self.bus.emit(FieldEvent::OverlayShown { height });
        self.pump();
    }

    /// The overlay went away.
    pub fn overlay_dismissed(&mut self) {
        self.bus.emit(FieldEvent::OverlayDismissed);
        self.pump();
    }

    // -----------------------------------------------------------------------
    // Scrolling
    // -----------------------------------------------------------------------

    pub fn scroll(&self) -> &ScrollCoordinator {
        &self.scroll
    }

    /// Update viewport and content sizes after layout.
    pub fn set_layout(&mut self, height: f32, content_height: f32) {
        self.scroll.set_layout(height, content_height);
    }

    /// Advance the reveal animation. Returns `true` while more frames are needed.
    pub fn tick(&mut self, dt: Duration) -> bool {
        self.scroll.tick(dt)
    }

    /// Restore the viewport.
    pub fn reset_scroll(&mut self) {
        self.scroll.reset();
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    /// Validate chain members in order, stopping at the first failure.
    pub fn validate(&mut self) -> bool {
        let mut next = self.chain().first();
        while let Some(id) = next {
            if let Some(field) = self.field_mut(id) {
                if !validation::validate(field.as_field_mut()) {
                    tracing::debug!(field = %id, "form validation stopped");
                    return false;
                }
            }
            next = self.chain().after(id);
        }
        true
    }

    /// Validate every chain member, returning the failing ones in order.
    pub fn validate_all(&mut self) -> Vec<FieldId> {
        let mut failed = Vec::new();
        let mut next = self.chain().first();
        while let Some(id) = next {
            if let Some(field) = self.field_mut(id) {
                if !validation::validate(field.as_field_mut()) {
                    failed.push(id);
                }
            }
            next = self.chain().after(id);
        }
        failed
    }

    // -----------------------------------------------------------------------
    // Dispatch
    // -----------------------------------------------------------------------

    fn focus_text(&mut self, idx: usize, previous: Option<FieldId>) {
        if let FormField::Text(input) = &mut self.fields[idx] {
            input.begin_editing(&mut self.bus);
        }
        if let Some(previous) = previous {
            self.release(previous);
        }
    }

    fn present_at(&mut self, idx: usize) -> bool {
        let id = self.fields[idx].id();
        let shown = self.fields[idx]
            .as_drop_down_mut()
            .is_some_and(DropDown::present);
        if shown {
            self.picking = Some(id);
        }
        shown
    }

    fn release(&mut self, id: FieldId) {
        if self.picking == Some(id) {
            self.picking = None;
            if let Some(drop_down) = self.fields.iter_mut().find_map(|f| {
                if f.id() == id {
                    f.as_drop_down_mut()
                } else {
                    None
                }
            }) {
                drop_down.dismiss();
            }
            return;
        }
        if let Some(FormField::Text(input)) = self.fields.iter_mut().find(|f| f.id() == id) {
            input.end_editing(&mut self.bus);
        }
    }

    fn pump(&mut self) {
        if self.bus.is_empty() {
            return;
        }
        let span = tracing::debug_span!("form.dispatch", pending = self.bus.pending());
        let _guard = span.enter();
        while let Some(event) = self.bus.pop() {
            self.dispatch(event);
        }
    }

    fn dispatch(&mut self, event: FieldEvent) {
        tracing::trace!(event = event.name(), field = ?event.field(), "dispatch");
        match event {
            FieldEvent::FocusGained(id) => {
                self.focused = Some(id);
                if let Some(frame) = self.field(id).map(|f| f.as_field().frame()) {
                    self.scroll.reveal(frame);
                }
            }
            FieldEvent::FocusLost(id) => {
                if self.focused == Some(id) {
                    self.focused = None;
                    self.scroll.focus_released();
                }
            }
            FieldEvent::ReturnPressed(id) => self.handle_return(id),
            FieldEvent::TextChanged { .. } => {}
            FieldEvent::OverlayShown { height } => self.scroll.on_overlay_shown(height),
            FieldEvent::OverlayDismissed => self.scroll.overlay_dismissed(),
        }
    }

    fn handle_return(&mut self, id: FieldId) {
        match self.chain().after(id) {
            Some(next) => self.advance(id, next),
            None => self.finish(id),
        }
    }

    fn advance(&mut self, current: FieldId, next: FieldId) {
        let Some(idx) = self.index_of(next) else {
            tracing::warn!(field = %next, "chain names a detached field");
            return;
        };
        tracing::debug!(from = %current, to = %next, "focus moves");
        if self.fields[idx].is_selection() {
            self.release(current);
            self.present_at(idx);
        } else {
            self.focus_text(idx, Some(current));
        }
    }

    fn finish(&mut self, id: FieldId) {
        self.release(id);
        self.scroll.reset();
        tracing::debug!(field = %id, "submit requested");
        match self.submit_sink.as_mut() {
            Some(sink) => sink.submit_requested(),
            None => tracing::debug!("no submit sink"),
        }
    }
}
