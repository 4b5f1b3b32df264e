//! Image upload and displayable resource handles
//!
//! A selected file becomes displayable once it is registered with the
//! [`ResourceRegistry`], which hands back a [`ResourceHandle`]. The handle owns
//! the registration: dropping it releases the resource.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::{Rc, Weak};
use std::sync::Arc;

use image::DynamicImage;

use crate::image_loader::{decode_image, read_file};
use crate::render_engines::mockup::PreviewImage;

/// Reference shown before anything is uploaded
pub const PLACEHOLDER_REFERENCE: &str = "/placeholder.svg?height=300&width=300";

/// Displayable reference to image data
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ImageRef {
    Placeholder,
    Object(u64),
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageRef::Placeholder => f.write_str(PLACEHOLDER_REFERENCE),
            ImageRef::Object(id) => write!(f, "blob:teecraft/{}", id),
        }
    }
}

/// A file chosen by the user, before it is registered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

/// Accept a file selection.
///
/// A cancelled selection or an unreadable path yields `None` and leaves the
/// caller's state alone. Any readable file is accepted regardless of content.
pub fn select_file(path: Option<&Path>) -> Option<SelectedFile> {
    let path = path?;
    match read_file(path) {
        Ok(bytes) => Some(SelectedFile {
            path: path.to_path_buf(),
            bytes,
        }),
        Err(e) => {
            tracing::warn!("ignoring file selection: {:#}", e);
            None
        }
    }
}

#[derive(Debug, Default)]
struct Resources {
    next_id: u64,
    live: HashMap<u64, Option<Arc<DynamicImage>>>,
}

/// Issues and resolves displayable references
#[derive(Debug, Clone, Default)]
pub struct ResourceRegistry {
    inner: Rc<RefCell<Resources>>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a selected file and return the handle that keeps it alive.
    pub fn create(&self, file: &SelectedFile) -> ResourceHandle {
        let decoded = match decode_image(&file.bytes) {
            Ok(img) => Some(Arc::new(img)),
            Err(e) => {
                tracing::debug!(file = %file.file_name(), "upload is not a displayable image: {:#}", e);
                None
            }
        };

        let mut resources = self.inner.borrow_mut();
        resources.next_id += 1;
        let id = resources.next_id;
        resources.live.insert(id, decoded);
        tracing::debug!(id, live = resources.live.len(), "resource created");

        ResourceHandle {
            reference: ImageRef::Object(id),
            registry: Rc::downgrade(&self.inner),
        }
    }

    /// Look up what a reference currently displays.
    pub fn resolve(&self, reference: &ImageRef) -> PreviewImage {
        match reference {
            ImageRef::Placeholder => PreviewImage::Placeholder,
            ImageRef::Object(id) => match self.inner.borrow().live.get(id) {
                Some(Some(img)) => PreviewImage::Decoded(Arc::clone(img)),
                Some(None) => PreviewImage::Undecodable,
                None => PreviewImage::Placeholder,
            },
        }
    }

    pub fn is_live(&self, reference: &ImageRef) -> bool {
        match reference {
            ImageRef::Placeholder => true,
            ImageRef::Object(id) => self.inner.borrow().live.contains_key(id),
        }
    }

    pub fn live_count(&self) -> usize {
        self.inner.borrow().live.len()
    }
}

/// Owning registration of a displayable resource
#[derive(Debug)]
pub struct ResourceHandle {
    reference: ImageRef,
    registry: Weak<RefCell<Resources>>,
}

impl ResourceHandle {
    pub fn reference(&self) -> &ImageRef {
        &self.reference
    }
}

impl Drop for ResourceHandle {
    fn drop(&mut self) {
        if let (ImageRef::Object(id), Some(inner)) = (&self.reference, self.registry.upgrade()) {
            inner.borrow_mut().live.remove(id);
            tracing::debug!(id, "resource released");
        }
    }
}

/// The current upload: the raw file plus its displayable handle
#[derive(Debug)]
pub struct UploadedImage {
    pub file: SelectedFile,
    handle: ResourceHandle,
}

impl UploadedImage {
    pub fn new(file: SelectedFile, handle: ResourceHandle) -> Self {
        Self { file, handle }
    }

    pub fn reference(&self) -> &ImageRef {
        self.handle.reference()
    }
}
