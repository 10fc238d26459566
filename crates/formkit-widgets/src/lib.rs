#![forbid(unsafe_code)]

//! Form widgets: validated text inputs, drop-downs, image pickers, and the
//! form that chains them above an on-screen keyboard.
//!
//! Fields report to their [`Form`] through a typed event bus; the form walks
//! its [`FocusChain`] on return and keeps the focused field visible with the
//! [`ScrollCoordinator`]. Rendering is the host's business: every surface the
//! fields drive (pickers, action sheets, error display) is a trait.

pub mod chain;
pub mod drop_down;
pub mod error;
pub mod field;
pub mod form;
pub mod image_picker;
pub mod scroll;
pub mod selection;
pub mod text_input;
pub mod validation;

pub use chain::{ChainIter, ChainProvider, FocusChain, OrderedChain};
pub use drop_down::{DateDropDown, DropDown};
pub use error::{FormError, Result};
pub use field::{Field, FormField, ReturnKey};
pub use form::{Form, SubmitSink};
pub use image_picker::{
    ActionEntry, ImageAction, ImagePicker, ImagePickerDataSource, ImagePickerDelegate,
    ImagePickerPhase, ImageSource, ImageSurface, PickedImage,
};
pub use scroll::{ScrollCoordinator, ScrollState, Viewport, reveal_offset};
pub use selection::{
    ChoiceDataSource, HostId, PickedRow, PickerKind, PickerRequest, PickerSurface,
    SelectionDelegate, SelectionPhase, SelectionState, SelectionValue,
};
pub use text_input::{EditionDelegate, InputDataSource, TextInput};
pub use validation::{ErrorDisplay, ValidationKind, ValidationProvider, ValidationVerdict};
