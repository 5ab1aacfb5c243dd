use uuid::Uuid;

/// An uploaded reference image held in memory for the form session.
///
/// The id exists only for list operations in the form (remove-by-id,
/// rename-by-id) and for keying preview textures; it is never sent to the
/// generation service.
#[derive(Debug, Clone)]
pub struct ImageReference {
    pub id: Uuid,
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub label: Option<String>,
}

impl ImageReference {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            bytes,
            mime_type: mime_type.into(),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// The user-supplied name, or the generic `主体 N` fallback for the
    /// 1-based position `index`.
    pub fn display_label(&self, index: usize) -> String {
        match self.label.as_deref().map(str::trim) {
            Some(label) if !label.is_empty() => label.to_string(),
            _ => format!("主体 {}", index + 1),
        }
    }

    pub fn payload(&self) -> ImagePayload {
        ImagePayload {
            data: self.bytes.clone(),
            mime_type: self.mime_type.clone(),
        }
    }
}

/// One image part as sent to the generation service: raw bytes plus the
/// declared media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub data: Vec<u8>,
    pub mime_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_label_falls_back_to_subject_index() {
        let unnamed = ImageReference::new(vec![1, 2, 3], "image/png");
        assert_eq!(unnamed.display_label(0), "主体 1");
        assert_eq!(unnamed.display_label(4), "主体 5");

        let blank = ImageReference::new(vec![], "image/png").with_label("   ");
        assert_eq!(blank.display_label(1), "主体 2");

        let named = ImageReference::new(vec![], "image/jpeg").with_label("魔法剑");
        assert_eq!(named.display_label(2), "魔法剑");
    }

    #[test]
    fn payload_carries_bytes_and_media_type() {
        let image = ImageReference::new(vec![9, 9], "image/webp");
        let payload = image.payload();
        assert_eq!(payload.data, vec![9, 9]);
        assert_eq!(payload.mime_type, "image/webp");
    }
}
