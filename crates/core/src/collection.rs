//! The working frame collection and its mutating operations.
//!
//! [`FrameCollection`] exclusively owns the ordered frame list and the
//! persistence port it was opened with. Every mutation builds the next list,
//! saves it, and only then swaps it in, so a failed save leaves the
//! in-memory list at the last durable state.

use std::collections::HashSet;

use crate::error::CoreError;
use crate::frame::{Frame, FrameInput};
use crate::parser;
use crate::store::FrameStore;
use crate::types::FrameId;

/// Entity name used in [`CoreError::NotFound`].
pub const FRAME_ENTITY: &str = "frame";

/// Ordered, persisted set of frames.
#[derive(Debug)]
pub struct FrameCollection<S> {
    frames: Vec<Frame>,
    store: S,
}

impl<S: FrameStore> FrameCollection<S> {
    /// Load the collection from `store`. A store that was never written
    /// opens as an empty collection.
    pub fn open(store: S) -> Result<Self, CoreError> {
        let frames = store.load()?.unwrap_or_default();
        ensure_unique_ids(&frames)?;
        tracing::debug!(frame_count = frames.len(), "Frame collection loaded");
        Ok(Self { frames, store })
    }

    /// Like [`open`](Self::open), but a never-written store is initialised
    /// with `seed` and saved straight away.
    pub fn open_or_seed(store: S, seed: Vec<Frame>) -> Result<Self, CoreError> {
        match store.load()? {
            Some(frames) => {
                ensure_unique_ids(&frames)?;
                tracing::debug!(frame_count = frames.len(), "Frame collection loaded");
                Ok(Self { frames, store })
            }
            None => {
                let mut collection = Self {
                    frames: Vec::new(),
                    store,
                };
                collection.replace_all(seed)?;
                tracing::info!(
                    frame_count = collection.frames.len(),
                    "Empty store seeded with sample frames"
                );
                Ok(collection)
            }
        }
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn get(&self, id: FrameId) -> Option<&Frame> {
        self.frames.iter().find(|f| f.id == id)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Append a new frame built from `input` under a fresh id.
    pub fn add(&mut self, input: FrameInput) -> Result<Frame, CoreError> {
        input.check()?;
        let frame = Frame::from_input(FrameId::generate(), input);

        let mut next = self.frames.clone();
        next.push(frame.clone());
        self.commit(next)?;

        tracing::info!(frame_id = %frame.id, frame_number = %frame.frame_number, "Frame added");
        Ok(frame)
    }

    /// Replace every field of frame `id` except the id itself, keeping its
    /// position.
    pub fn update(&mut self, id: FrameId, input: FrameInput) -> Result<Frame, CoreError> {
        let position = self
            .frames
            .iter()
            .position(|f| f.id == id)
            .ok_or(CoreError::NotFound {
                entity: FRAME_ENTITY,
                id,
            })?;
        input.check()?;

        let updated = Frame::from_input(id, input);
        let mut next = self.frames.clone();
        next[position] = updated.clone();
        self.commit(next)?;

        tracing::info!(frame_id = %id, "Frame updated");
        Ok(updated)
    }

    /// Remove frame `id`. Removing an unknown id is not an error; the
    /// unchanged list is still saved. Returns whether a frame was removed.
    pub fn remove(&mut self, id: FrameId) -> Result<bool, CoreError> {
        let next: Vec<Frame> = self.frames.iter().filter(|f| f.id != id).cloned().collect();
        let removed = next.len() != self.frames.len();
        self.commit(next)?;

        if removed {
            tracing::info!(frame_id = %id, "Frame removed");
        } else {
            tracing::debug!(frame_id = %id, "Remove of unknown frame ignored");
        }
        Ok(removed)
    }

    /// Discard the whole collection and install `frames` verbatim.
    ///
    /// Every frame must have a unique id and non-blank content.
    pub fn replace_all(&mut self, frames: Vec<Frame>) -> Result<(), CoreError> {
        ensure_unique_ids(&frames)?;
        if let Some(blank) = frames.iter().find(|f| f.content.trim().is_empty()) {
            return Err(CoreError::Validation(format!(
                "frame {} has empty content",
                blank.id
            )));
        }

        let previous = self.frames.len();
        self.commit(frames)?;
        tracing::info!(
            previous_count = previous,
            frame_count = self.frames.len(),
            "Frame collection replaced"
        );
        Ok(())
    }

    /// Parse `script` and replace the collection with the result.
    ///
    /// Blank scripts fail with [`CoreError::EmptyInput`]; scripts with no
    /// recognisable labels fail with [`CoreError::NoFramesDetected`]. In both
    /// cases the collection is left untouched.
    pub fn import_script(&mut self, script: &str) -> Result<&[Frame], CoreError> {
        if script.trim().is_empty() {
            return Err(CoreError::EmptyInput);
        }

        let outcome = parser::parse_script_with_outcome(script);
        let Some(strategy) = outcome.strategy else {
            return Err(CoreError::NoFramesDetected);
        };

        self.replace_all(outcome.frames)?;
        tracing::info!(
            strategy = %strategy,
            frame_count = self.frames.len(),
            "Script imported"
        );
        Ok(&self.frames)
    }

    fn commit(&mut self, next: Vec<Frame>) -> Result<(), CoreError> {
        if let Err(e) = self.store.save(&next) {
            tracing::error!(error = %e, "Failed to persist frame collection");
            return Err(e.into());
        }
        self.frames = next;
        Ok(())
    }
}

fn ensure_unique_ids(frames: &[Frame]) -> Result<(), CoreError> {
    let mut seen = HashSet::with_capacity(frames.len());
    for frame in frames {
        if !seen.insert(frame.id) {
            return Err(CoreError::Conflict(format!(
                "duplicate frame id {}",
                frame.id
            )));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
