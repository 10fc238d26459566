#![forbid(unsafe_code)]

//! Keeps the focused field visible above an on-screen overlay.
//!
//! # State Machine
//!
//! ```text
//!            reveal (first focus)
//!   Normal ─────────────────────────► ShrunkForKeyboard
//!     ▲                                  │   │
//!     │  reset / overlay dismissed       │   │ reveal (re-entrant):
//!     └──────── after focus release ─────┘   │ new target offset only
//!                                            ▼
//! ```
//!
//! Shrinking adds the overlay height to the viewport's bottom inset; the
//! viewport height itself is never touched. Scroll changes are scheduled and
//! applied on the next [`ScrollCoordinator::tick`], then animated with a
//! [`Tween`]. A new reveal restarts the tween from the current offset.

use std::time::Duration;

use formkit_core::FormConfig;
use formkit_core::Rect;
use formkit_core::animation::{Animation, Tween};

/// Scrollable area the form lives in.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    /// Frame height, fixed by layout.
    pub height: f32,
    /// Total height of the scrollable content.
    pub content_height: f32,
    /// Bottom constraint offset.
    pub bottom_inset: f32,
    /// Current vertical scroll offset.
    pub offset: f32,
}

impl Viewport {
    pub fn new(height: f32, content_height: f32) -> Self {
        Self {
            height,
            content_height,
            bottom_inset: 0.0,
            offset: 0.0,
        }
    }

    /// Height left once the bottom inset is removed.
    pub fn visible_height(&self) -> f32 {
        (self.height - self.bottom_inset).max(0.0)
    }

    /// Largest offset that keeps content filling the visible area.
    pub fn max_offset(&self) -> f32 {
        (self.content_height - self.visible_height()).max(0.0)
    }

    /// Visible part of the content, in content coordinates.
    pub fn visible_rect(&self) -> Rect {
        Rect::new(0.0, self.offset, 0.0, self.height).shrink_bottom(self.bottom_inset)
    }

    /// Whether the vertical span of `field` is fully visible.
    pub fn is_revealed(&self, field: &Rect) -> bool {
        self.visible_rect().contains_vertically(field)
    }
}

/// Whether the viewport is shrunk for an overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollState {
    #[default]
    Normal,
    ShrunkForKeyboard,
}

/// Offset centering `field` in a viewport of `viewport_height` shrunk by
/// `overlay_height`, clamped to `[0, content_height - visible + field.height / 2]`.
///
/// The center is taken in the shrunk viewport, not the full height: the
/// viewport has already lost the overlay when the reveal runs, and centering
/// on the full height would leave the field under the keyboard.
pub fn reveal_offset(
    field: Rect,
    viewport_height: f32,
    overlay_height: f32,
    content_height: f32,
) -> f32 {
    let visible = (viewport_height - overlay_height).max(0.0);
    let half_field = field.height / 2.0;
    let centered = field.y - visible / 2.0 + half_field;
    let upper = (content_height - visible + half_field).max(0.0);
    centered.max(0.0).min(upper)
}

/// Drives viewport shrinking and reveal scrolling.
#[derive(Debug, Clone)]
pub struct ScrollCoordinator {
    viewport: Viewport,
    state: ScrollState,
    overlay_height: f32,
    original_bottom_inset: f32,
    reveal_duration: Duration,
    revealed: Option<Rect>,
    pending: Option<f32>,
    animation: Option<Tween>,
    focus_released: bool,
}

impl ScrollCoordinator {
    pub fn new(viewport: Viewport) -> Self {
        Self::with_config(viewport, &FormConfig::default())
    }

    pub fn with_config(viewport: Viewport, config: &FormConfig) -> Self {
        Self {
            viewport,
            state: ScrollState::Normal,
            overlay_height: config.overlay_height,
            original_bottom_inset: viewport.bottom_inset,
            reveal_duration: config.reveal_duration,
            revealed: None,
            pending: None,
            animation: None,
            focus_released: false,
        }
    }

    pub fn apply_config(&mut self, config: &FormConfig) {
        self.reveal_duration = config.reveal_duration;
        if self.state == ScrollState::Normal {
            self.overlay_height = config.overlay_height;
        }
    }

    pub fn state(&self) -> ScrollState {
        self.state
    }

    pub fn is_shrunk(&self) -> bool {
        self.state == ScrollState::ShrunkForKeyboard
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Overlay height used for the next shrink.
    pub fn overlay_height(&self) -> f32 {
        self.overlay_height
    }

    /// Scheduled target, not applied until the next tick.
    pub fn pending_target(&self) -> Option<f32> {
        self.pending
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Update layout-driven sizes. Insets and offset are kept.
    pub fn set_layout(&mut self, height: f32, content_height: f32) {
        self.viewport.height = height;
        self.viewport.content_height = content_height;
    }

    fn target_for(&self, field: Rect) -> f32 {
        let base = (self.viewport.height - self.original_bottom_inset).max(0.0);
        reveal_offset(
            field,
            base,
            self.overlay_height,
            self.viewport.content_height,
        )
    }

    /// Record the overlay height. While shrunk the inset follows it and the
    /// last revealed field is revealed again.
    pub fn on_overlay_shown(&mut self, height: f32) {
        let height = height.max(0.0);
        self.overlay_height = height;
        if self.is_shrunk() {
            self.viewport.bottom_inset = self.original_bottom_inset + height;
            if let Some(frame) = self.revealed {
                self.pending = Some(self.target_for(frame));
            }
        }
        tracing::debug!(height, shrunk = self.is_shrunk(), "overlay height recorded");
    }

    /// Schedule scrolling so `field` is centered above the overlay.
    pub fn reveal(&mut self, field: Rect) {
        if !self.is_shrunk() {
            self.original_bottom_inset = self.viewport.bottom_inset;
            self.viewport.bottom_inset = self.original_bottom_inset + self.overlay_height;
            self.state = ScrollState::ShrunkForKeyboard;
            tracing::debug!(inset = self.viewport.bottom_inset, "viewport shrunk");
        }
        self.focus_released = false;
        self.revealed = Some(field);
        let target = self.target_for(field);
        tracing::debug!(target, "reveal scheduled");
        self.pending = Some(target);
    }

    /// The focused field let go and nothing took its place yet.
    pub fn focus_released(&mut self) {
        self.focus_released = true;
    }

    /// The overlay went away. Resets only after a focus release.
    pub fn overlay_dismissed(&mut self) {
        if self.focus_released {
            self.reset();
        }
    }

    /// Return to `Normal`, restoring the bottom inset. Idempotent.
    pub fn reset(&mut self) {
        self.pending = None;
        self.animation = None;
        self.revealed = None;
        self.focus_released = false;
        if self.state == ScrollState::Normal {
            return;
        }
        self.viewport.bottom_inset = self.original_bottom_inset;
        self.viewport.offset = self.viewport.offset.min(self.viewport.max_offset());
        self.state = ScrollState::Normal;
        tracing::debug!(offset = self.viewport.offset, "viewport restored");
    }

    /// Advance scrolling by `dt`. Returns `true` while more frames are needed.
    pub fn tick(&mut self, dt: Duration) -> bool {
        if let Some(target) = self.pending.take() {
            self.animation = Some(Tween::new(
                self.viewport.offset,
                target,
                self.reveal_duration,
            ));
            return true;
        }
        let Some(tween) = self.animation.as_mut() else {
            return false;
        };
        tween.tick(dt);
        self.viewport.offset = tween.current();
        if tween.is_complete() {
            self.animation = None;
            return false;
        }
        true
    }

    /// Run scheduled work to completion.
    pub fn settle(&mut self) {
        let step = self.reveal_duration.max(Duration::from_millis(1));
        while self.tick(step) {}
    }
}
