#![forbid(unsafe_code)]

//! Core: geometry, field events, animation and configuration for formkit.

pub mod animation;
pub mod config;
pub mod event;
pub mod geometry;
pub mod logging;

pub use config::FormConfig;
pub use event::{EventBus, FieldEvent, FieldId, SubscriptionId};
pub use geometry::Rect;
