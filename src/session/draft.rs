//! Per-view form drafts.
//!
//! Each view owns one draft; edits replace values wholesale and converting a
//! draft into a [`PromptRequest`] performs all pre-submission validation, so
//! an invalid form can never reach the generation client.

use crate::{
    config::UploadLimits,
    error::{PromptError, Result},
    models::{EaseOptions, ImageReference, PromptRequest, StyleModifier},
};
use uuid::Uuid;

/// Set-semantics toggle that keeps selection order: re-selecting an active
/// modifier removes it, leaving the rest untouched.
pub fn toggle_modifier(modifiers: &mut Vec<StyleModifier>, modifier: StyleModifier) {
    if let Some(position) = modifiers.iter().position(|m| *m == modifier) {
        modifiers.remove(position);
    } else {
        modifiers.push(modifier);
    }
}

fn require_description(raw: &str, message: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PromptError::Validation(message.into()));
    }
    Ok(trimmed.to_string())
}

#[derive(Debug, Default)]
pub struct SingleFrameDraft {
    pub image: Option<ImageReference>,
    pub description: String,
    pub modifiers: Vec<StyleModifier>,
}

impl SingleFrameDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the replaced image so its preview handle can be released.
    pub fn set_image(&mut self, image: ImageReference) -> Option<ImageReference> {
        self.image.replace(image)
    }

    pub fn remove_image(&mut self) -> Option<ImageReference> {
        self.image.take()
    }

    pub fn toggle_modifier(&mut self, modifier: StyleModifier) {
        toggle_modifier(&mut self.modifiers, modifier);
    }

    pub fn is_submittable(&self) -> bool {
        self.image.is_some() && !self.description.trim().is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn to_request(&self) -> Result<PromptRequest> {
        let image = self
            .image
            .clone()
            .ok_or_else(|| PromptError::Validation("请上传一张参考图片。".into()))?;
        let description = require_description(&self.description, "请简单描述您的想法。")?;
        Ok(PromptRequest::SingleFrame {
            image,
            description,
            modifiers: self.modifiers.clone(),
        })
    }
}

#[derive(Debug, Default)]
pub struct StartEndDraft {
    pub start: Option<ImageReference>,
    pub end: Option<ImageReference>,
    pub description: String,
    pub modifiers: Vec<StyleModifier>,
    pub ease: EaseOptions,
}

impl StartEndDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_start(&mut self, image: ImageReference) -> Option<ImageReference> {
        self.start.replace(image)
    }

    pub fn set_end(&mut self, image: ImageReference) -> Option<ImageReference> {
        self.end.replace(image)
    }

    /// Drag-and-drop lands in the first empty slot.
    pub fn place_dropped(&mut self, image: ImageReference) -> Option<ImageReference> {
        if self.start.is_none() {
            self.set_start(image)
        } else {
            self.set_end(image)
        }
    }

    pub fn toggle_modifier(&mut self, modifier: StyleModifier) {
        toggle_modifier(&mut self.modifiers, modifier);
    }

    pub fn is_submittable(&self) -> bool {
        self.start.is_some() && self.end.is_some() && !self.description.trim().is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn to_request(&self) -> Result<PromptRequest> {
        let (start, end) = match (self.start.clone(), self.end.clone()) {
            (Some(start), Some(end)) => (start, end),
            _ => return Err(PromptError::Validation("请上传起始帧和结束帧。".into())),
        };
        let description =
            require_description(&self.description, "请描述这两帧之间的过渡效果。")?;
        Ok(PromptRequest::StartEnd {
            start,
            end,
            description,
            modifiers: self.modifiers.clone(),
            ease: self.ease,
        })
    }
}

#[derive(Debug, Default)]
pub struct MultiRefDraft {
    pub images: Vec<ImageReference>,
    pub description: String,
    pub modifiers: Vec<StyleModifier>,
}

impl MultiRefDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_image(&mut self, image: ImageReference, limits: &UploadLimits) -> Result<()> {
        if self.images.len() >= limits.max_reference_images {
            return Err(PromptError::Validation(format!(
                "最多支持 {} 张参考图片。",
                limits.max_reference_images
            )));
        }
        self.images.push(image);
        Ok(())
    }

    pub fn remove_image(&mut self, id: Uuid) -> Option<ImageReference> {
        let position = self.images.iter().position(|image| image.id == id)?;
        Some(self.images.remove(position))
    }

    pub fn rename_image(&mut self, id: Uuid, label: impl Into<String>) {
        if let Some(image) = self.images.iter_mut().find(|image| image.id == id) {
            image.label = Some(label.into());
        }
    }

    pub fn toggle_modifier(&mut self, modifier: StyleModifier) {
        toggle_modifier(&mut self.modifiers, modifier);
    }

    pub fn is_submittable(&self) -> bool {
        !self.images.is_empty() && !self.description.trim().is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn to_request(&self) -> Result<PromptRequest> {
        if self.images.is_empty() {
            return Err(PromptError::Validation("请至少添加一张参考图片。".into()));
        }
        let description = require_description(&self.description, "请描述您的视频故事。")?;
        Ok(PromptRequest::MultiRef {
            images: self.images.clone(),
            description,
            modifiers: self.modifiers.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image() -> ImageReference {
        ImageReference::new(vec![1, 2, 3], "image/png")
    }

    #[test]
    fn single_frame_requires_image_and_description() {
        let mut draft = SingleFrameDraft::new();
        assert!(matches!(
            draft.to_request(),
            Err(PromptError::Validation(_))
        ));

        draft.set_image(image());
        draft.description = "   \n  ".into();
        assert!(matches!(
            draft.to_request(),
            Err(PromptError::Validation(_))
        ));
        assert!(!draft.is_submittable());

        draft.description = "a cat walks on a rainy street".into();
        let request = draft.to_request().unwrap();
        assert_eq!(request.description(), "a cat walks on a rainy street");
        assert_eq!(request.images().len(), 1);
    }

    #[test]
    fn start_end_requires_both_frames() {
        let mut draft = StartEndDraft::new();
        draft.description = "day turns to night".into();
        draft.set_start(image());
        assert!(matches!(
            draft.to_request(),
            Err(PromptError::Validation(_))
        ));

        draft.set_end(image());
        draft.ease.ease_in = true;
        let request = draft.to_request().unwrap();
        match request {
            PromptRequest::StartEnd { ease, .. } => {
                assert!(ease.ease_in);
                assert!(!ease.ease_out);
            }
            other => panic!("unexpected request: {:?}", other.mode()),
        }
    }

    #[test]
    fn dropped_images_fill_start_then_end() {
        let mut draft = StartEndDraft::new();
        let first = image();
        let second = image();
        let first_id = first.id;
        let second_id = second.id;

        assert!(draft.place_dropped(first).is_none());
        assert!(draft.place_dropped(second).is_none());
        assert_eq!(draft.start.as_ref().unwrap().id, first_id);
        assert_eq!(draft.end.as_ref().unwrap().id, second_id);

        // A third drop replaces the end frame and hands back the old one.
        let replaced = draft.place_dropped(image()).unwrap();
        assert_eq!(replaced.id, second_id);
    }

    #[test]
    fn multi_ref_requires_at_least_one_image() {
        let limits = UploadLimits::default();
        let mut draft = MultiRefDraft::new();
        draft.description = "主角拔剑".into();
        assert!(matches!(
            draft.to_request(),
            Err(PromptError::Validation(_))
        ));

        draft.add_image(image(), &limits).unwrap();
        assert!(draft.to_request().is_ok());
    }

    #[test]
    fn multi_ref_enforces_the_reference_cap() {
        let limits = UploadLimits::new().with_max_reference_images(2);
        let mut draft = MultiRefDraft::new();
        draft.add_image(image(), &limits).unwrap();
        draft.add_image(image(), &limits).unwrap();
        assert!(matches!(
            draft.add_image(image(), &limits),
            Err(PromptError::Validation(_))
        ));
        assert_eq!(draft.images.len(), 2);
    }

    #[test]
    fn remove_and_rename_operate_by_id() {
        let limits = UploadLimits::default();
        let mut draft = MultiRefDraft::new();
        let keep = image();
        let gone = image();
        let keep_id = keep.id;
        let gone_id = gone.id;
        draft.add_image(keep, &limits).unwrap();
        draft.add_image(gone, &limits).unwrap();

        draft.rename_image(keep_id, "主角");
        let removed = draft.remove_image(gone_id).unwrap();
        assert_eq!(removed.id, gone_id);
        assert_eq!(draft.images.len(), 1);
        assert_eq!(draft.images[0].label.as_deref(), Some("主角"));
        assert!(draft.remove_image(gone_id).is_none());
    }

    #[test]
    fn modifier_toggle_is_idempotent() {
        let mut draft = SingleFrameDraft::new();
        draft.toggle_modifier(StyleModifier::Camera);
        let selected = draft.modifiers.clone();

        draft.toggle_modifier(StyleModifier::Vfx);
        draft.toggle_modifier(StyleModifier::Vfx);
        assert_eq!(draft.modifiers, selected);
    }

    #[test]
    fn clear_resets_everything() {
        let mut draft = StartEndDraft::new();
        draft.set_start(image());
        draft.set_end(image());
        draft.description = "x".into();
        draft.ease.ease_out = true;
        draft.toggle_modifier(StyleModifier::Action);

        draft.clear();
        assert!(draft.start.is_none());
        assert!(draft.end.is_none());
        assert!(draft.description.is_empty());
        assert!(!draft.ease.any());
        assert!(draft.modifiers.is_empty());
    }
}
