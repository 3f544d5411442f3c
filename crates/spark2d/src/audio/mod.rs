//! Audio playback behind an abstract backend
//!
//! Mirrors the texture layer: games register sound effects under integer ids
//! in a [`SoundTable`], and a single streamed music track goes through
//! [`MusicPlayer`]. The platform supplies an [`AudioBackend`];
//! [`NullAudio`] is a silent implementation for tests and headless runs.

use std::collections::HashMap;

use log::{debug, warn};
use thiserror::Error;

use crate::assets::{AssetError, AssetSource};

/// Errors from audio loading
#[derive(Debug, Error)]
pub enum AudioError {
    /// Asset could not be read
    #[error(transparent)]
    Asset(#[from] AssetError),
    /// Backend could not decode or take the sound
    #[error("audio backend error: {0}")]
    Backend(String),
}

/// Opaque handle to a sound loaded on the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AudioHandle(pub u64);

/// Platform audio interface
pub trait AudioBackend {
    /// Decodes and retains a sound effect
    fn load_sound(&mut self, bytes: &[u8]) -> Result<AudioHandle, AudioError>;
    /// Plays a loaded sound with per-channel volume
    fn play_sound(&mut self, handle: AudioHandle, left: f32, right: f32, looped: bool);
    /// Stops all playing instances of a sound
    fn stop_sound(&mut self, handle: AudioHandle);
    /// Frees a loaded sound
    fn unload_sound(&mut self, handle: AudioHandle);

    /// Loads the streamed music track, replacing any previous one
    fn load_music(&mut self, bytes: &[u8]) -> Result<(), AudioError>;
    /// Starts or resumes the music track
    fn play_music(&mut self);
    /// Pauses the music track
    fn pause_music(&mut self);
    /// Stops the music track and rewinds it
    fn stop_music(&mut self);
    /// Sets music volume in `[0, 1]`
    fn set_music_volume(&mut self, volume: f32);

    /// Frees every audio resource
    fn release(&mut self);
}

/// Audio backend that plays nothing
///
/// Tracks live sounds so tests can assert resource balance.
#[derive(Debug, Default)]
pub struct NullAudio {
    next_id: u64,
    live: usize,
    music_loaded: bool,
    /// Volume last passed to [`AudioBackend::set_music_volume`]
    pub music_volume: f32,
}

impl NullAudio {
    /// Creates a silent backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sounds currently loaded
    pub fn live_sounds(&self) -> usize {
        self.live
    }
}

impl AudioBackend for NullAudio {
    fn load_sound(&mut self, _bytes: &[u8]) -> Result<AudioHandle, AudioError> {
        self.next_id += 1;
        self.live += 1;
        Ok(AudioHandle(self.next_id))
    }

    fn play_sound(&mut self, _handle: AudioHandle, _left: f32, _right: f32, _looped: bool) {}

    fn stop_sound(&mut self, _handle: AudioHandle) {}

    fn unload_sound(&mut self, _handle: AudioHandle) {
        self.live = self.live.saturating_sub(1);
    }

    fn load_music(&mut self, _bytes: &[u8]) -> Result<(), AudioError> {
        self.music_loaded = true;
        Ok(())
    }

    fn play_music(&mut self) {}

    fn pause_music(&mut self) {}

    fn stop_music(&mut self) {}

    fn set_music_volume(&mut self, volume: f32) {
        self.music_volume = volume;
    }

    fn release(&mut self) {
        self.live = 0;
        self.music_loaded = false;
    }
}

struct Sound {
    filename: String,
    handle: Option<AudioHandle>,
    left: f32,
    right: f32,
    looped: bool,
}

/// Id-keyed table of loaded sound effects
#[derive(Default)]
pub struct SoundTable {
    sounds: HashMap<i32, Sound>,
}

impl SoundTable {
    /// Creates an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `filename` and registers it under `id`
    ///
    /// A duplicate id is ignored; the first registration wins.
    pub fn register(
        &mut self,
        filename: &str,
        id: i32,
        assets: &dyn AssetSource,
        backend: &mut dyn AudioBackend,
    ) -> Result<(), AudioError> {
        if self.sounds.contains_key(&id) {
            warn!("Sound id {} already registered, ignoring {:?}", id, filename);
            return Ok(());
        }
        let bytes = assets.read(filename)?;
        let handle = backend.load_sound(&bytes)?;
        self.sounds.insert(
            id,
            Sound {
                filename: filename.to_string(),
                handle: Some(handle),
                left: 1.0,
                right: 1.0,
                looped: false,
            },
        );
        debug!("Registered sound {} as id {}", filename, id);
        Ok(())
    }

    /// Number of registered sounds
    pub fn len(&self) -> usize {
        self.sounds.len()
    }

    /// True if nothing is registered
    pub fn is_empty(&self) -> bool {
        self.sounds.is_empty()
    }

    /// Plays a sound with its stored volume and loop flag
    ///
    /// An unknown or unloaded id is a logged no-op.
    pub fn play(&self, id: i32, backend: &mut dyn AudioBackend) {
        match self.sounds.get(&id).and_then(|s| s.handle.map(|h| (s, h))) {
            Some((s, handle)) => backend.play_sound(handle, s.left, s.right, s.looped),
            None => debug!("Ignoring play of unknown or unloaded sound id {}", id),
        }
    }

    /// Stops all instances of a sound
    pub fn stop(&self, id: i32, backend: &mut dyn AudioBackend) {
        if let Some(handle) = self.sounds.get(&id).and_then(|s| s.handle) {
            backend.stop_sound(handle);
        }
    }

    /// Sets per-channel volume for future plays, clamped to `[0, 1]`
    pub fn set_volume(&mut self, id: i32, left: f32, right: f32) {
        if let Some(s) = self.sounds.get_mut(&id) {
            s.left = left.clamp(0.0, 1.0);
            s.right = right.clamp(0.0, 1.0);
        }
    }

    /// Sets whether future plays loop
    pub fn set_looped(&mut self, id: i32, looped: bool) {
        if let Some(s) = self.sounds.get_mut(&id) {
            s.looped = looped;
        }
    }

    /// Stops every registered sound
    pub fn stop_all(&self, backend: &mut dyn AudioBackend) {
        for handle in self.sounds.values().filter_map(|s| s.handle) {
            backend.stop_sound(handle);
        }
    }

    /// Loads every registered sound that is not currently loaded
    ///
    /// Failures are logged and skipped.
    pub fn load_all(&mut self, assets: &dyn AssetSource, backend: &mut dyn AudioBackend) {
        for (id, s) in &mut self.sounds {
            if s.handle.is_some() {
                continue;
            }
            let loaded = assets
                .read(&s.filename)
                .map_err(AudioError::from)
                .and_then(|bytes| backend.load_sound(&bytes));
            match loaded {
                Ok(handle) => s.handle = Some(handle),
                Err(e) => warn!("Failed to reload sound id {}: {}", id, e),
            }
        }
    }

    /// Frees every backend sound but keeps registrations
    pub fn unload_all(&mut self, backend: &mut dyn AudioBackend) {
        for s in self.sounds.values_mut() {
            if let Some(handle) = s.handle.take() {
                backend.unload_sound(handle);
            }
        }
    }

    /// Frees every sound and forgets all registrations
    pub fn release(&mut self, backend: &mut dyn AudioBackend) {
        self.unload_all(backend);
        self.sounds.clear();
    }
}

/// Controls the single streamed music track
#[derive(Debug, Default)]
pub struct MusicPlayer {
    loaded: bool,
}

impl MusicPlayer {
    /// Creates a player with no track loaded
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a music track, replacing any previous one
    pub fn load(
        &mut self,
        filename: &str,
        assets: &dyn AssetSource,
        backend: &mut dyn AudioBackend,
    ) -> Result<(), AudioError> {
        let bytes = assets.read(filename)?;
        backend.load_music(&bytes)?;
        self.loaded = true;
        debug!("Loaded music track {}", filename);
        Ok(())
    }

    /// True once a track is loaded
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Starts or resumes playback; a no-op without a loaded track
    pub fn play(&self, backend: &mut dyn AudioBackend) {
        if self.loaded {
            backend.play_music();
        }
    }

    /// Pauses playback
    pub fn pause(&self, backend: &mut dyn AudioBackend) {
        if self.loaded {
            backend.pause_music();
        }
    }

    /// Stops playback and rewinds
    pub fn stop(&self, backend: &mut dyn AudioBackend) {
        if self.loaded {
            backend.stop_music();
        }
    }

    /// Sets playback volume, clamped to `[0, 1]`
    pub fn set_volume(&self, volume: f32, backend: &mut dyn AudioBackend) {
        backend.set_music_volume(volume.clamp(0.0, 1.0));
    }

    /// Stops playback and forgets the track
    pub fn release(&mut self, backend: &mut dyn AudioBackend) {
        if self.loaded {
            backend.stop_music();
        }
        self.loaded = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::MemoryAssets;

    fn assets_with(name: &str) -> MemoryAssets {
        let mut assets = MemoryAssets::new();
        assets.insert(name, vec![0u8; 16]);
        assets
    }

    #[test]
    fn duplicate_sound_id_keeps_first() {
        let mut table = SoundTable::new();
        let mut audio = NullAudio::new();
        let mut assets = assets_with("boom.ogg");
        assets.insert("zap.ogg", vec![1u8; 16]);

        table.register("boom.ogg", 1, &assets, &mut audio).unwrap();
        table.register("zap.ogg", 1, &assets, &mut audio).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(audio.live_sounds(), 1);
    }

    #[test]
    fn missing_sound_asset_errors() {
        let mut table = SoundTable::new();
        let mut audio = NullAudio::new();
        let assets = MemoryAssets::new();
        assert!(table.register("nope.ogg", 1, &assets, &mut audio).is_err());
        assert!(table.is_empty());
    }

    #[test]
    fn release_frees_all_sounds() {
        let mut table = SoundTable::new();
        let mut audio = NullAudio::new();
        let mut assets = assets_with("boom.ogg");
        assets.insert("zap.ogg", vec![1u8; 16]);
        table.register("boom.ogg", 1, &assets, &mut audio).unwrap();
        table.register("zap.ogg", 2, &assets, &mut audio).unwrap();
        table.release(&mut audio);
        assert!(table.is_empty());
        assert_eq!(audio.live_sounds(), 0);
    }

    #[test]
    fn unload_all_keeps_registrations() {
        let mut table = SoundTable::new();
        let mut audio = NullAudio::new();
        let assets = assets_with("boom.ogg");
        table.register("boom.ogg", 1, &assets, &mut audio).unwrap();

        table.unload_all(&mut audio);
        assert_eq!(audio.live_sounds(), 0);
        assert_eq!(table.len(), 1);
        // Playing while unloaded is a no-op.
        table.play(1, &mut audio);

        table.load_all(&assets, &mut audio);
        assert_eq!(audio.live_sounds(), 1);
    }

    #[test]
    fn volume_is_clamped() {
        let mut table = SoundTable::new();
        let mut audio = NullAudio::new();
        let assets = assets_with("boom.ogg");
        table.register("boom.ogg", 1, &assets, &mut audio).unwrap();
        table.set_volume(1, 2.0, -1.0);
        let s = table.sounds.get(&1).unwrap();
        assert_eq!(s.left, 1.0);
        assert_eq!(s.right, 0.0);
    }

    #[test]
    fn music_volume_is_clamped() {
        let mut audio = NullAudio::new();
        let player = MusicPlayer::new();
        player.set_volume(3.5, &mut audio);
        assert_eq!(audio.music_volume, 1.0);
    }

    #[test]
    fn playing_unknown_sound_is_a_no_op() {
        let table = SoundTable::new();
        let mut audio = NullAudio::new();
        table.play(99, &mut audio);
    }
}
