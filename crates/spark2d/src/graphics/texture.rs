//! Texture resource table
//!
//! Games refer to textures by small integer ids of their own choosing. The
//! [`TextureTable`] maps ids to decoded images uploaded to the backend, loads
//! lazily on first use, and can drop and rebuild all backend resources when
//! the rendering surface is lost.

use std::collections::HashMap;

use log::{debug, error, warn};
use thiserror::Error;

use crate::assets::{AssetError, AssetSource, ImageData};
use crate::graphics::backend::{BackendTextureId, RenderBackend, RenderError};

/// Errors from texture loading
#[derive(Debug, Error)]
pub enum TextureError {
    /// No texture registered under the id
    #[error("unknown texture id: {0}")]
    UnknownId(i32),
    /// Asset could not be read or decoded
    #[error(transparent)]
    Asset(#[from] AssetError),
    /// Backend refused the upload
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// A texture registration and, once loaded, its backend resource
///
/// Cloning copies the snapshot; the table remains the owner of the backend
/// resource.
#[derive(Debug, Clone)]
pub struct Texture {
    filename: String,
    id: i32,
    backend: Option<BackendTextureId>,
    width: u32,
    height: u32,
}

impl Texture {
    fn new(filename: String, id: i32) -> Self {
        Self {
            filename,
            id,
            backend: None,
            width: 0,
            height: 0,
        }
    }

    /// Game-assigned id
    pub fn id(&self) -> i32 {
        self.id
    }

    /// Asset name this texture loads from
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Width in pixels, zero until loaded
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels, zero until loaded
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Backend handle if currently loaded
    pub fn backend_id(&self) -> Option<BackendTextureId> {
        self.backend
    }

    /// True once the texture has a live backend resource
    pub fn is_loaded(&self) -> bool {
        self.backend.is_some()
    }
}

#[cfg(test)]
impl Texture {
    /// Builds a texture snapshot with known dimensions, bypassing the table
    pub(crate) fn test_stub(filename: &str, id: i32, width: u32, height: u32) -> Self {
        Self {
            filename: filename.to_string(),
            id,
            backend: None,
            width,
            height,
        }
    }

    /// Attaches a backend handle directly
    pub(crate) fn force_backend(&mut self, handle: BackendTextureId) {
        self.backend = Some(handle);
    }
}

/// Id-keyed table owning all texture resources
#[derive(Default)]
pub struct TextureTable {
    textures: HashMap<i32, Texture>,
}

impl TextureTable {
    /// Creates an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `filename` under `id` without loading it
    ///
    /// A negative id is rejected. A duplicate id is ignored; the first
    /// registration wins.
    pub fn register(&mut self, filename: impl Into<String>, id: i32) {
        let filename = filename.into();
        if id < 0 {
            warn!("Rejecting negative texture id {} for {:?}", id, filename);
            return;
        }
        if let Some(existing) = self.textures.get(&id) {
            warn!(
                "Texture id {} already registered as {:?}, ignoring {:?}",
                id,
                existing.filename(),
                filename
            );
            return;
        }
        debug!("Registered texture {} as id {}", filename, id);
        self.textures.insert(id, Texture::new(filename, id));
    }

    /// Number of registered textures
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// True if nothing is registered
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Returns the registered texture without triggering a load
    pub fn lookup(&self, id: i32) -> Option<&Texture> {
        self.textures.get(&id)
    }

    /// Returns a snapshot of the texture, loading it first if needed
    ///
    /// Returns `None` for unknown ids. A failed load is logged and the
    /// unloaded snapshot is returned; drawing with it is a no-op.
    pub fn get(
        &mut self,
        id: i32,
        assets: &dyn AssetSource,
        backend: &mut dyn RenderBackend,
    ) -> Option<Texture> {
        if !self.textures.contains_key(&id) {
            warn!("Requested unknown texture id {}", id);
            return None;
        }
        if let Err(e) = self.load(id, assets, backend) {
            error!("Failed to load texture id {}: {}", id, e);
        }
        self.textures.get(&id).cloned()
    }

    /// Loads the texture now, unless it is already loaded
    pub fn load(
        &mut self,
        id: i32,
        assets: &dyn AssetSource,
        backend: &mut dyn RenderBackend,
    ) -> Result<(), TextureError> {
        let entry = self
            .textures
            .get_mut(&id)
            .ok_or(TextureError::UnknownId(id))?;
        if entry.is_loaded() {
            return Ok(());
        }
        let bytes = assets.read(&entry.filename)?;
        let image = ImageData::from_bytes(&bytes)?;
        let handle = backend.create_texture(&image)?;
        entry.backend = Some(handle);
        entry.width = image.width;
        entry.height = image.height;
        debug!(
            "Loaded texture id {} ({}x{})",
            id, entry.width, entry.height
        );
        Ok(())
    }

    /// Loads every registered texture that is not already loaded
    ///
    /// Failures are logged and skipped so one bad asset does not block the
    /// rest.
    pub fn load_all(&mut self, assets: &dyn AssetSource, backend: &mut dyn RenderBackend) {
        let ids: Vec<i32> = self.textures.keys().copied().collect();
        for id in ids {
            if let Err(e) = self.load(id, assets, backend) {
                error!("Failed to load texture id {}: {}", id, e);
            }
        }
    }

    /// Destroys all backend resources but keeps registrations
    ///
    /// Textures reload lazily, or via [`TextureTable::load_all`], afterwards.
    pub fn unload_all(&mut self, backend: &mut dyn RenderBackend) {
        for entry in self.textures.values_mut() {
            if let Some(handle) = entry.backend.take() {
                backend.destroy_texture(handle);
            }
        }
    }

    /// Destroys all backend resources and forgets every registration
    pub fn release(&mut self, backend: &mut dyn RenderBackend) {
        self.unload_all(backend);
        self.textures.clear();
    }
}
