use serde::{Deserialize, Serialize};

/// The three prompt-construction workflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    SingleFrame,
    StartEnd,
    MultiRef,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::SingleFrame, Mode::StartEnd, Mode::MultiRef];

    pub fn label(&self) -> &'static str {
        match self {
            Mode::SingleFrame => "单帧润色",
            Mode::StartEnd => "首尾帧补全",
            Mode::MultiRef => "多图参考",
        }
    }
}
