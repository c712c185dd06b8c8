//! Persistence port for the frame collection.
//!
//! The collection treats storage as an opaque load/save pair over the whole
//! ordered frame list. Concrete backends live outside this crate; the
//! in-memory [`MemoryStore`] here backs tests and embedding callers.

use crate::frame::Frame;

/// Errors raised by a persistence backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Load/save pair over the serialized frame list.
pub trait FrameStore {
    /// The last saved list, or `None` if nothing was ever saved.
    fn load(&self) -> Result<Option<Vec<Frame>>, StoreError>;

    /// Durably replace the stored list. Returning `Ok` means the write landed.
    fn save(&mut self, frames: &[Frame]) -> Result<(), StoreError>;
}

/// Volatile store holding a copy of the last saved list.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    saved: Option<Vec<Frame>>,
    fail_saves: bool,
    save_count: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `frames`, as if saved by an earlier session.
    pub fn with_frames(frames: Vec<Frame>) -> Self {
        Self {
            saved: Some(frames),
            ..Self::default()
        }
    }

    /// Make every subsequent `save` fail until switched back off.
    pub fn set_fail_saves(&mut self, fail: bool) {
        self.fail_saves = fail;
    }

    pub fn saved(&self) -> Option<&[Frame]> {
        self.saved.as_deref()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.save_count
    }
}

impl FrameStore for MemoryStore {
    fn load(&self) -> Result<Option<Vec<Frame>>, StoreError> {
        Ok(self.saved.clone())
    }

    fn save(&mut self, frames: &[Frame]) -> Result<(), StoreError> {
        if self.fail_saves {
            return Err(StoreError::Backend("memory store is read-only".to_string()));
        }
        self.saved = Some(frames.to_vec());
        self.save_count += 1;
        Ok(())
    }
}
