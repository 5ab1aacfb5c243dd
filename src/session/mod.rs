pub mod draft;
pub mod output;
pub mod upload;

pub use draft::{toggle_modifier, MultiRefDraft, SingleFrameDraft, StartEndDraft};
pub use output::{OutputPanel, OutputState};
pub use upload::{image_reference_from_bytes, mime_from_path, read_image_reference};
