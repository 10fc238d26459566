#![forbid(unsafe_code)]

//! A button that lets the user import or capture a picture.
//!
//! Touching the control shows an action sheet with three entries. Import and
//! capture open the platform image surface on the matching source; the
//! surface reports back through [`ImagePicker::finish`] or
//! [`ImagePicker::cancelled`].

use std::fmt;

use formkit_core::{FieldId, FormConfig};

use crate::selection::HostId;

/// Where the platform surface takes pictures from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    PhotoLibrary,
    Camera,
}

/// An entry of the action sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageAction {
    Import,
    Capture,
    Cancel,
}

/// Titled action sheet entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionEntry {
    pub action: ImageAction,
    pub title: String,
}

/// Encoded picture handed back by the platform.
#[derive(Clone, PartialEq, Eq)]
pub struct PickedImage {
    bytes: Vec<u8>,
}

impl PickedImage {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for PickedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PickedImage")
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Interaction phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImagePickerPhase {
    #[default]
    Idle,
    ChoosingAction,
    Picking(ImageSource),
}

/// Supplies the screen the action sheet and image surface appear over.
pub trait ImagePickerDataSource {
    fn host(&self, picker: FieldId) -> Option<HostId>;
}

/// Receives the outcome of a pick.
pub trait ImagePickerDelegate {
    fn selected_image(&mut self, picker: FieldId, image: &PickedImage);
    fn no_image(&mut self, picker: FieldId);
}

/// The platform widgets driven by the picker.
pub trait ImageSurface {
    fn show_actions(&mut self, host: HostId, actions: &[ActionEntry]);
    fn show_source(&mut self, host: HostId, source: ImageSource);
    fn close(&mut self);
}

/// Picture import control.
pub struct ImagePicker {
    id: FieldId,
    import_title: String,
    capture_title: String,
    cancel_title: String,
    actions: Vec<ActionEntry>,
    phase: ImagePickerPhase,
    image: Option<PickedImage>,
    data_source: Option<Box<dyn ImagePickerDataSource>>,
    delegate: Option<Box<dyn ImagePickerDelegate>>,
    surface: Option<Box<dyn ImageSurface>>,
}

impl fmt::Debug for ImagePicker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImagePicker")
            .field("id", &self.id)
            .field("actions", &self.actions)
            .field("phase", &self.phase)
            .field("image", &self.image)
            .finish_non_exhaustive()
    }
}

impl ImagePicker {
    pub fn new(id: FieldId) -> Self {
        let config = FormConfig::default();
        Self {
            id,
            import_title: config.import_title,
            capture_title: config.capture_title,
            cancel_title: config.image_cancel_title,
            actions: Vec::new(),
            phase: ImagePickerPhase::Idle,
            image: None,
            data_source: None,
            delegate: None,
            surface: None,
        }
    }

    /// Take action titles from a form configuration. Call `reload_data` after.
    pub fn apply_config(&mut self, config: &FormConfig) {
        self.import_title.clone_from(&config.import_title);
        self.capture_title.clone_from(&config.capture_title);
        self.cancel_title.clone_from(&config.image_cancel_title);
    }

    pub fn set_data_source(&mut self, data_source: impl ImagePickerDataSource + 'static) {
        self.data_source = Some(Box::new(data_source));
    }

    pub fn set_delegate(&mut self, delegate: impl ImagePickerDelegate + 'static) {
        self.delegate = Some(Box::new(delegate));
    }

    pub fn set_surface(&mut self, surface: impl ImageSurface + 'static) {
        self.surface = Some(Box::new(surface));
    }

    pub fn id(&self) -> FieldId {
        self.id
    }

    pub fn actions(&self) -> &[ActionEntry] {
        &self.actions
    }

    pub fn phase(&self) -> ImagePickerPhase {
        self.phase
    }

    /// Last picked picture.
    pub fn image(&self) -> Option<&PickedImage> {
        self.image.as_ref()
    }

    /// Build the action sheet entries: cancel, import, capture.
    pub fn reload_data(&mut self) {
        self.actions = vec![
            ActionEntry {
                action: ImageAction::Cancel,
                title: self.cancel_title.clone(),
            },
            ActionEntry {
                action: ImageAction::Import,
                title: self.import_title.clone(),
            },
            ActionEntry {
                action: ImageAction::Capture,
                title: self.capture_title.clone(),
            },
        ];
    }

    fn host(&self, what: &str) -> Option<HostId> {
        let host = self.data_source.as_ref().and_then(|ds| ds.host(self.id));
        if host.is_none() {
            tracing::warn!(picker = %self.id, surface = what, "no host to present over");
        }
        host
    }

    /// The control was touched: show the action sheet.
    pub fn touched(&mut self) -> bool {
        let Some(host) = self.host("action sheet") else {
            return false;
        };
        let Some(surface) = self.surface.as_mut() else {
            tracing::debug!(picker = %self.id, "touched without image surface");
            return false;
        };
        surface.show_actions(host, &self.actions);
        self.phase = ImagePickerPhase::ChoosingAction;
        true
    }

    /// An action sheet entry was chosen.
    pub fn choose(&mut self, action: ImageAction) -> bool {
        let source = match action {
            ImageAction::Import => ImageSource::PhotoLibrary,
            ImageAction::Capture => ImageSource::Camera,
            ImageAction::Cancel => {
                self.close();
                return false;
            }
        };
        let Some(host) = self.host("image picker") else {
            self.phase = ImagePickerPhase::Idle;
            return false;
        };
        let Some(surface) = self.surface.as_mut() else {
            self.phase = ImagePickerPhase::Idle;
            return false;
        };
        surface.show_source(host, source);
        self.phase = ImagePickerPhase::Picking(source);
        true
    }

    /// The image surface finished. `None` means it returned no picture.
    pub fn finish(&mut self, image: Option<PickedImage>) {
        self.image = image;
        match (self.delegate.as_mut(), self.image.as_ref()) {
            (Some(delegate), Some(image)) => delegate.selected_image(self.id, image),
            (Some(delegate), None) => delegate.no_image(self.id),
            (None, _) => tracing::warn!(picker = %self.id, "no delegate for picked image"),
        }
        self.close();
    }

    /// The image surface was dismissed without a result.
    pub fn cancelled(&mut self) {
        self.close();
    }

    fn close(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            surface.close();
        }
        self.phase = ImagePickerPhase::Idle;
    }
}
