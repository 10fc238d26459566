#![forbid(unsafe_code)]

//! formkit public facade crate.
//!
//! Re-exports the form engine and its widgets, and offers a prelude for
//! building screens.
//!
//! ```rust
//! use formkit::prelude::*;
//!
//! let mut form = Form::new(Viewport::new(600.0, 1200.0));
//! let email = form.attach(TextInput::new(FieldId(1)));
//! form.set_text(email, "jane@example.org").unwrap();
//! assert!(form.validate());
//! ```

// --- Core re-exports -------------------------------------------------------

pub use formkit_core::animation::{Animation, Tween};
pub use formkit_core::{EventBus, FieldEvent, FieldId, FormConfig, Rect, SubscriptionId};

// --- Widget re-exports -----------------------------------------------------

pub use formkit_widgets::validation::{
    ErrorDisplay, ValidationError, ValidationKind, ValidationProvider, ValidationResult,
    ValidationVerdict, Validator,
};
pub use formkit_widgets::{
    ChainProvider, ChoiceDataSource, DateDropDown, DropDown, EditionDelegate, Field, FocusChain,
    Form, FormError, FormField, HostId, ImageAction, ImagePicker, ImagePickerDataSource,
    ImagePickerDelegate, ImageSource, ImageSurface, InputDataSource, OrderedChain, PickedImage,
    PickerKind, PickerRequest, PickerSurface, ReturnKey, ScrollCoordinator, ScrollState,
    SelectionDelegate, SelectionState, SubmitSink, TextInput, Viewport,
};

pub use chrono::NaiveDate;

/// Standard result type for formkit APIs.
pub type Result<T> = std::result::Result<T, FormError>;

/// Build a form configured from `FORMKIT_*` environment variables.
pub fn form_from_env(viewport: Viewport) -> Form {
    Form::with_config(viewport, FormConfig::from_env())
}

/// Install the `FORMKIT_LOG`-filtered tracing subscriber.
///
/// Returns `false` if a global subscriber was already set.
#[cfg(feature = "subscriber")]
pub fn init_logging() -> bool {
    formkit_core::logging::init()
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        ChainProvider, ChoiceDataSource, DateDropDown, DropDown, ErrorDisplay, Field, FieldEvent,
        FieldId, Form, FormConfig, FormError, HostId, OrderedChain, PickerSurface, Rect, Result,
        ReturnKey, SelectionDelegate, TextInput, ValidationKind, ValidationProvider, Viewport,
    };

    pub use crate::{core, widgets};
}

pub use formkit_core as core;
pub use formkit_widgets as widgets;
