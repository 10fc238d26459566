#![forbid(unsafe_code)]

//! Field events and the per-form event bus.
//!
//! Fields never call their form directly. They push a [`FieldEvent`] onto the
//! [`EventBus`] they are handed, and the form drains the bus afterwards.
//!
//! # Invariants
//!
//! 1. Events are delivered in emission order (FIFO).
//! 2. Every subscriber sees an event before the owning form acts on it.
//! 3. Delivery is synchronous: nothing is queued across UI turns.

use std::collections::VecDeque;
use std::fmt;

/// Identifier of a field inside a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId(pub u32);

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field#{}", self.0)
    }
}

/// Events a field (or the platform overlay) reports to its form.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEvent {
    /// The field started editing and now holds the keyboard.
    FocusGained(FieldId),
    /// The field stopped editing.
    FocusLost(FieldId),
    /// The return key was pressed while the field was editing.
    ReturnPressed(FieldId),
    /// The field text changed.
    TextChanged {
        field: FieldId,
        text: String,
    },
    /// The on-screen keyboard (or an equivalent overlay) appeared.
    OverlayShown {
        /// Overlay height in viewport coordinates.
        height: f32,
    },
    /// The overlay went away.
    OverlayDismissed,
}

impl FieldEvent {
    /// The field this event concerns, if any.
    pub fn field(&self) -> Option<FieldId> {
        match self {
            Self::FocusGained(id) | Self::FocusLost(id) | Self::ReturnPressed(id) => Some(*id),
            Self::TextChanged { field, .. } => Some(*field),
            Self::OverlayShown { .. } | Self::OverlayDismissed => None,
        }
    }

    /// Short name used in log records.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::FocusGained(_) => "focus_gained",
            Self::FocusLost(_) => "focus_lost",
            Self::ReturnPressed(_) => "return_pressed",
            Self::TextChanged { .. } => "text_changed",
            Self::OverlayShown { .. } => "overlay_shown",
            Self::OverlayDismissed => "overlay_dismissed",
        }
    }
}

/// Handle returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&FieldEvent)>;

/// A typed, form-scoped event queue with observers.
#[derive(Default)]
pub struct EventBus {
    queue: VecDeque<FieldEvent>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("queue", &self.queue)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl EventBus {
    /// Create an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event.
    pub fn emit(&mut self, event: FieldEvent) {
        tracing::trace!(event = event.name(), field = ?event.field(), "field event queued");
        self.queue.push_back(event);
    }

    /// Register an observer. Observers are called from [`EventBus::pop`].
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&FieldEvent) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove an observer. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        before != self.listeners.len()
    }

    /// Take the oldest queued event, notifying every observer first.
    pub fn pop(&mut self) -> Option<FieldEvent> {
        let event = self.queue.pop_front()?;
        for (_, listener) in &mut self.listeners {
            listener(&event);
        }
        Some(event)
    }

    /// Number of queued events.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Whether nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
