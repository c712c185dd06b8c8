//! Sample frames installed into a store that has never been written.

use crate::frame::{Frame, FrameInput, FrameTone, FrameType};
use crate::types::FrameId;

/// Two fully detailed frames showing what a finished storyboard looks like.
pub fn sample_frames() -> Vec<Frame> {
    vec![
        Frame::from_input(
            FrameId::generate(),
            FrameInput {
                frame_number: "1".to_string(),
                frame_tone: FrameTone::Informative,
                content: "Welcome to our AI video course. Today we will explore the \
                          fundamentals of artificial intelligence and machine learning."
                    .to_string(),
                frame_type: FrameType::LiveFootage,
                voice_over_required: true,
                editing_required: true,
                facilitator_costume: "Professional blazer, white shirt".to_string(),
                scene_description: "Instructor standing in modern studio with soft lighting"
                    .to_string(),
                camera_note: "Medium shot, 50mm lens, f/2.8".to_string(),
                editing_note: "Add lower third with name and title".to_string(),
                suggestions: "Consider adding subtle background music".to_string(),
            },
        ),
        Frame::from_input(
            FrameId::generate(),
            FrameInput {
                frame_number: "2".to_string(),
                frame_tone: FrameTone::Cinematic,
                content: "Artificial Intelligence has transformed the way we live and work \
                          in the 21st century."
                    .to_string(),
                frame_type: FrameType::Animation,
                voice_over_required: true,
                editing_required: true,
                facilitator_costume: "N/A".to_string(),
                scene_description: "Animated visualization of AI neural networks".to_string(),
                camera_note: "N/A - Animation sequence".to_string(),
                editing_note: "Smooth transitions between network nodes".to_string(),
                suggestions: "Use blue and purple color palette for tech feel".to_string(),
            },
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_frames_are_valid_and_distinct() {
        let frames = sample_frames();
        assert_eq!(frames.len(), 2);
        assert_ne!(frames[0].id, frames[1].id);
        for frame in &frames {
            assert!(frame.to_input().check().is_ok());
            assert!(!frame.details_pending());
        }
    }
}
