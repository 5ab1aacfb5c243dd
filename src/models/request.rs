use serde::{Deserialize, Serialize};

use super::{ImageReference, Mode};

/// Thematic enhancement tags the request asks the model to emphasize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StyleModifier {
    Action,
    Vfx,
    Atmosphere,
    Lighting,
    Camera,
    General,
}

impl StyleModifier {
    pub const ALL: [StyleModifier; 6] = [
        StyleModifier::Action,
        StyleModifier::Vfx,
        StyleModifier::Atmosphere,
        StyleModifier::Lighting,
        StyleModifier::Camera,
        StyleModifier::General,
    ];

    /// The name embedded in the generation instruction.
    pub fn prompt_name(&self) -> &'static str {
        match self {
            StyleModifier::Action => "Action/Fight Choreography",
            StyleModifier::Vfx => "Visual Effects (VFX) & Particles",
            StyleModifier::Atmosphere => "Atmosphere & Mood",
            StyleModifier::Lighting => "Cinematic Lighting",
            StyleModifier::Camera => "Camera Movement",
            StyleModifier::General => "General Enhancement",
        }
    }

    pub fn ui_label(&self) -> &'static str {
        match self {
            StyleModifier::Action => "动作 / 打戏",
            StyleModifier::Vfx => "特效 / 魔法",
            StyleModifier::Atmosphere => "氛围 / 情绪",
            StyleModifier::Lighting => "灯光 / 光影",
            StyleModifier::Camera => "镜头 / 运镜",
            StyleModifier::General => "通用 / 润色",
        }
    }
}

/// Motion-smoothing flags, meaningful only for start/end transitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EaseOptions {
    pub ease_in: bool,
    pub ease_out: bool,
}

impl EaseOptions {
    pub fn any(&self) -> bool {
        self.ease_in || self.ease_out
    }
}

/// A validated submission, one variant per workflow.
///
/// Image-count rules are structural: single-frame carries exactly one image
/// and start/end carries exactly two in fixed [start, end] order, so those
/// invariants cannot be violated at runtime. Multi-ref's "at least one" is
/// checked when a draft is converted into a request.
#[derive(Debug, Clone)]
pub enum PromptRequest {
    SingleFrame {
        image: ImageReference,
        description: String,
        modifiers: Vec<StyleModifier>,
    },
    StartEnd {
        start: ImageReference,
        end: ImageReference,
        description: String,
        modifiers: Vec<StyleModifier>,
        ease: EaseOptions,
    },
    MultiRef {
        images: Vec<ImageReference>,
        description: String,
        modifiers: Vec<StyleModifier>,
    },
}

impl PromptRequest {
    pub fn mode(&self) -> Mode {
        match self {
            PromptRequest::SingleFrame { .. } => Mode::SingleFrame,
            PromptRequest::StartEnd { .. } => Mode::StartEnd,
            PromptRequest::MultiRef { .. } => Mode::MultiRef,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            PromptRequest::SingleFrame { description, .. }
            | PromptRequest::StartEnd { description, .. }
            | PromptRequest::MultiRef { description, .. } => description,
        }
    }

    pub fn modifiers(&self) -> &[StyleModifier] {
        match self {
            PromptRequest::SingleFrame { modifiers, .. }
            | PromptRequest::StartEnd { modifiers, .. }
            | PromptRequest::MultiRef { modifiers, .. } => modifiers,
        }
    }

    /// The images in the order their payloads will be emitted.
    pub fn images(&self) -> Vec<&ImageReference> {
        match self {
            PromptRequest::SingleFrame { image, .. } => vec![image],
            PromptRequest::StartEnd { start, end, .. } => vec![start, end],
            PromptRequest::MultiRef { images, .. } => images.iter().collect(),
        }
    }
}
