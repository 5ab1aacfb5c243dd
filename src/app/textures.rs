use crate::models::ImageReference;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Preview textures keyed by image id.
///
/// Handles are reference-counted by egui, so removing an entry releases the
/// GPU texture once the frame that used it finishes. Entries are removed
/// whenever their image leaves the draft, keeping resource use bounded over
/// a long session.
#[derive(Default)]
pub struct PreviewCache {
    textures: HashMap<Uuid, egui::TextureHandle>,
    failed: HashSet<Uuid>,
}

impl PreviewCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texture(
        &mut self,
        ctx: &egui::Context,
        image: &ImageReference,
    ) -> Option<egui::TextureHandle> {
        if self.failed.contains(&image.id) {
            return None;
        }
        if let Some(handle) = self.textures.get(&image.id) {
            return Some(handle.clone());
        }
        match decode_preview(&image.bytes) {
            Ok(color_image) => {
                let handle = ctx.load_texture(
                    format!("preview-{}", image.id),
                    color_image,
                    egui::TextureOptions::LINEAR,
                );
                self.textures.insert(image.id, handle.clone());
                Some(handle)
            }
            Err(e) => {
                log::warn!("Failed to decode image preview: {}", e);
                self.failed.insert(image.id);
                None
            }
        }
    }

    pub fn release(&mut self, id: &Uuid) {
        self.textures.remove(id);
        self.failed.remove(id);
    }

    pub fn clear(&mut self) {
        self.textures.clear();
        self.failed.clear();
    }
}

fn decode_preview(bytes: &[u8]) -> Result<egui::ColorImage, image::ImageError> {
    let decoded = image::load_from_memory(bytes)?;
    let thumbnail = decoded.thumbnail(320, 320).to_rgba8();
    let size = [thumbnail.width() as usize, thumbnail.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(
        size,
        thumbnail.as_raw(),
    ))
}
