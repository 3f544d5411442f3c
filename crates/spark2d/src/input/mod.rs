//! Input state shared between platform threads and the game loop
//!
//! Platform callbacks write pointer, key and accelerometer samples from their
//! own threads; entities read them during update on the render thread.
//! [`InputState`] guards each channel with a lock, so it is shared as an
//! `Arc<InputState>` without further ceremony.

use std::sync::Mutex;

use log::warn;

/// Maximum simultaneously tracked pointers
pub const MAX_POINTERS: usize = 10;

/// Phase of a pointer sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerPhase {
    /// Slot holds no current sample
    #[default]
    Invalid,
    /// Pointer went down
    Down,
    /// Pointer lifted
    Up,
    /// Pointer moved while down
    Moved,
}

/// One pointer slot: phase plus surface coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerSample {
    /// Sample phase
    pub phase: PointerPhase,
    /// Surface x coordinate
    pub x: f32,
    /// Surface y coordinate
    pub y: f32,
}

/// State of the most recent key event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyPhase {
    /// No key event recorded
    #[default]
    Indeterminate,
    /// Key is down
    Down,
    /// Key was released
    Up,
}

/// Most recent key event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeySample {
    /// Platform key code
    pub code: i32,
    /// Phase of the event
    pub phase: KeyPhase,
}

/// Most recent accelerometer reading
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AccelSample {
    /// X axis acceleration
    pub x: f32,
    /// Y axis acceleration
    pub y: f32,
    /// Z axis acceleration
    pub z: f32,
}

/// Thread-safe container for all input channels
#[derive(Debug, Default)]
pub struct InputState {
    pointers: Mutex<[PointerSample; MAX_POINTERS]>,
    key: Mutex<KeySample>,
    accel: Mutex<AccelSample>,
}

impl InputState {
    /// Creates an empty input state
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the pointer slot at `index`
    ///
    /// Out-of-range indices return an invalid sample.
    pub fn pointer(&self, index: usize) -> PointerSample {
        if index >= MAX_POINTERS {
            return PointerSample::default();
        }
        self.pointers.lock().unwrap()[index]
    }

    /// Stores a pointer sample; out-of-range indices are dropped with a
    /// warning
    pub fn set_pointer(&self, index: usize, sample: PointerSample) {
        if index >= MAX_POINTERS {
            warn!("Dropping pointer sample for out-of-range index {}", index);
            return;
        }
        self.pointers.lock().unwrap()[index] = sample;
    }

    /// Invalidates every pointer slot
    ///
    /// Called by the engine at the end of each frame so stale samples do not
    /// replay.
    pub fn clear_pointers(&self) {
        let mut pointers = self.pointers.lock().unwrap();
        *pointers = [PointerSample::default(); MAX_POINTERS];
    }

    /// Most recent key event
    pub fn key(&self) -> KeySample {
        *self.key.lock().unwrap()
    }

    /// Records a key event
    pub fn set_key(&self, sample: KeySample) {
        *self.key.lock().unwrap() = sample;
    }

    /// Most recent accelerometer reading
    pub fn accelerometer(&self) -> AccelSample {
        *self.accel.lock().unwrap()
    }

    /// Records an accelerometer reading
    pub fn set_accelerometer(&self, sample: AccelSample) {
        *self.accel.lock().unwrap() = sample;
    }
}
