//! Frame record, its enumerated fields, and the editable input payload.
//!
//! A [`Frame`] is one unit of storyboard content. [`FrameInput`] carries every
//! field except the id and is what the editing surface submits for `add` and
//! `update`; it is validated before it reaches the collection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::types::FrameId;

// ---------------------------------------------------------------------------
// Frame tone
// ---------------------------------------------------------------------------

/// Narrative tone of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FrameTone {
    #[default]
    Informative,
    Cinematic,
    Emotional,
    Playful,
    Serious,
}

impl FrameTone {
    pub const ALL: [FrameTone; 5] = [
        Self::Informative,
        Self::Cinematic,
        Self::Emotional,
        Self::Playful,
        Self::Serious,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Informative => "Informative",
            Self::Cinematic => "Cinematic",
            Self::Emotional => "Emotional",
            Self::Playful => "Playful",
            Self::Serious => "Serious",
        }
    }
}

impl fmt::Display for FrameTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FrameTone {
    type Err = CoreError;

    /// Case-insensitive match against the display labels.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|tone| tone.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid frame tone '{s}'. Must be one of: {}",
                    Self::ALL.map(Self::label).join(", ")
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// Frame type
// ---------------------------------------------------------------------------

/// How the frame is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FrameType {
    #[default]
    #[serde(rename = "Live Footage")]
    LiveFootage,
    #[serde(rename = "Animation")]
    Animation,
    #[serde(rename = "Live Footage + Animation")]
    LiveFootageAndAnimation,
}

impl FrameType {
    pub const ALL: [FrameType; 3] = [
        Self::LiveFootage,
        Self::Animation,
        Self::LiveFootageAndAnimation,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::LiveFootage => "Live Footage",
            Self::Animation => "Animation",
            Self::LiveFootageAndAnimation => "Live Footage + Animation",
        }
    }
}

impl fmt::Display for FrameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FrameType {
    type Err = CoreError;

    /// Case-insensitive match against the display labels.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid frame type '{s}'. Must be one of: {}",
                    Self::ALL.map(Self::label).join(", ")
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// Frame input
// ---------------------------------------------------------------------------

/// Every editable frame field. Submitted by the editor for `add` / `update`.
///
/// Only the frame number and content are required. There are no upper
/// length bounds: parsed frames carry whole script passages and must stay
/// editable after import.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct FrameInput {
    #[validate(length(min = 1, message = "frame number is required"))]
    pub frame_number: String,
    pub frame_tone: FrameTone,
    #[validate(length(min = 1, message = "content is required"))]
    pub content: String,
    pub frame_type: FrameType,
    pub voice_over_required: bool,
    pub editing_required: bool,
    pub facilitator_costume: String,
    pub scene_description: String,
    pub camera_note: String,
    pub editing_note: String,
    pub suggestions: String,
}

impl FrameInput {
    /// Input with the given label and body, everything else at defaults.
    pub fn new(frame_number: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            frame_number: frame_number.into(),
            content: content.into(),
            ..Self::default()
        }
    }

    /// Run the declarative rules plus the whitespace-only checks the
    /// derive cannot express.
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate()
            .map_err(|e| CoreError::Validation(e.to_string()))?;
        if self.frame_number.trim().is_empty() {
            return Err(CoreError::Validation(
                "frame number must not be blank".to_string(),
            ));
        }
        if self.content.trim().is_empty() {
            return Err(CoreError::Validation(
                "content must not be blank".to_string(),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Frame
// ---------------------------------------------------------------------------

/// One storyboard record. `id` never changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    pub id: FrameId,
    pub frame_number: String,
    #[serde(default)]
    pub frame_tone: FrameTone,
    pub content: String,
    #[serde(default)]
    pub frame_type: FrameType,
    #[serde(default)]
    pub voice_over_required: bool,
    #[serde(default)]
    pub editing_required: bool,
    #[serde(default)]
    pub facilitator_costume: String,
    #[serde(default)]
    pub scene_description: String,
    #[serde(default)]
    pub camera_note: String,
    #[serde(default)]
    pub editing_note: String,
    #[serde(default)]
    pub suggestions: String,
}

impl Frame {
    /// Build a frame from editor input under the given id.
    pub fn from_input(id: FrameId, input: FrameInput) -> Self {
        Self {
            id,
            frame_number: input.frame_number,
            frame_tone: input.frame_tone,
            content: input.content,
            frame_type: input.frame_type,
            voice_over_required: input.voice_over_required,
            editing_required: input.editing_required,
            facilitator_costume: input.facilitator_costume,
            scene_description: input.scene_description,
            camera_note: input.camera_note,
            editing_note: input.editing_note,
            suggestions: input.suggestions,
        }
    }

    /// Editable fields of this frame, detached from its id.
    pub fn to_input(&self) -> FrameInput {
        FrameInput {
            frame_number: self.frame_number.clone(),
            frame_tone: self.frame_tone,
            content: self.content.clone(),
            frame_type: self.frame_type,
            voice_over_required: self.voice_over_required,
            editing_required: self.editing_required,
            facilitator_costume: self.facilitator_costume.clone(),
            scene_description: self.scene_description.clone(),
            camera_note: self.camera_note.clone(),
            editing_note: self.editing_note.clone(),
            suggestions: self.suggestions.clone(),
        }
    }

    /// `true` when none of the production details have been filled in yet.
    pub fn details_pending(&self) -> bool {
        [
            &self.scene_description,
            &self.camera_note,
            &self.editing_note,
            &self.facilitator_costume,
        ]
        .iter()
        .all(|field| field.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    // -- enums ---------------------------------------------------------------

    #[test]
    fn defaults_are_informative_live_footage() {
        assert_eq!(FrameTone::default(), FrameTone::Informative);
        assert_eq!(FrameType::default(), FrameType::LiveFootage);
    }

    #[test]
    fn tone_parses_case_insensitively() {
        assert_eq!("cinematic".parse::<FrameTone>().unwrap(), FrameTone::Cinematic);
        assert_eq!(" Serious ".parse::<FrameTone>().unwrap(), FrameTone::Serious);
    }

    #[test]
    fn unknown_tone_lists_allowed_values() {
        let err = "Sarcastic".parse::<FrameTone>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Sarcastic"));
        assert!(msg.contains("Informative, Cinematic, Emotional, Playful, Serious"));
    }

    #[test]
    fn frame_type_round_trips_through_label() {
        for kind in FrameType::ALL {
            assert_eq!(kind.label().parse::<FrameType>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_frame_type_is_rejected() {
        assert_matches!("Stop Motion".parse::<FrameType>(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn frame_type_serializes_as_label() {
        let json = serde_json::to_value(FrameType::LiveFootageAndAnimation).unwrap();
        assert_eq!(json, "Live Footage + Animation");
    }

    // -- FrameInput::check ---------------------------------------------------

    #[test]
    fn valid_input_passes() {
        assert!(FrameInput::new("1", "Hello").check().is_ok());
    }

    #[test]
    fn empty_content_is_rejected() {
        assert_matches!(FrameInput::new("1", "").check(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn blank_content_is_rejected() {
        let err = FrameInput::new("1", "  \n ").check().unwrap_err();
        assert!(err.to_string().contains("content"));
    }

    #[test]
    fn blank_frame_number_is_rejected() {
        assert_matches!(FrameInput::new(" ", "body").check(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn long_fields_are_accepted() {
        let mut input = FrameInput::new("9".repeat(64), "x".repeat(20_000));
        input.camera_note = "y".repeat(8_000);
        assert!(input.check().is_ok());
    }

    // -- Frame ---------------------------------------------------------------

    #[test]
    fn input_round_trips_through_frame() {
        let mut input = FrameInput::new("07", "Narration");
        input.frame_tone = FrameTone::Playful;
        input.editing_required = true;
        input.suggestions = "More B-roll".to_string();

        let frame = Frame::from_input(FrameId::generate(), input.clone());
        assert_eq!(frame.to_input(), input);
    }

    #[test]
    fn details_pending_until_any_detail_is_set() {
        let mut frame = Frame::from_input(FrameId::generate(), FrameInput::new("1", "x"));
        assert!(frame.details_pending());

        frame.suggestions = "does not count".to_string();
        assert!(frame.details_pending());

        frame.camera_note = "Wide shot".to_string();
        assert!(!frame.details_pending());
    }

    #[test]
    fn frame_serializes_with_camel_case_keys() {
        let frame = Frame::from_input(FrameId::generate(), FrameInput::new("3", "Body"));
        let json = serde_json::to_value(&frame).unwrap();

        assert_eq!(json["frameNumber"], "3");
        assert_eq!(json["frameTone"], "Informative");
        assert_eq!(json["frameType"], "Live Footage");
        assert_eq!(json["voiceOverRequired"], false);
        assert_eq!(json["sceneDescription"], "");
    }

    #[test]
    fn frame_deserializes_with_missing_optional_fields() {
        let id = FrameId::generate();
        let json = serde_json::json!({
            "id": id.to_string(),
            "frameNumber": "4",
            "content": "Only the basics",
        });
        let frame: Frame = serde_json::from_value(json).unwrap();

        assert_eq!(frame.id, id);
        assert_eq!(frame.frame_tone, FrameTone::Informative);
        assert_eq!(frame.frame_type, FrameType::LiveFootage);
        assert!(frame.editing_note.is_empty());
    }
}
