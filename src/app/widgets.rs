use crate::{
    config::UploadLimits,
    error::Result,
    models::{ImageReference, StyleModifier},
    session::{read_image_reference, toggle_modifier, OutputPanel, OutputState},
};

use super::textures::PreviewCache;

pub fn section_label(ui: &mut egui::Ui, text: &str) {
    ui.label(egui::RichText::new(text).small().weak());
}

pub fn style_selector(ui: &mut egui::Ui, modifiers: &mut Vec<StyleModifier>) {
    section_label(ui, "增强方向");
    ui.horizontal_wrapped(|ui| {
        for modifier in StyleModifier::ALL {
            let selected = modifiers.contains(&modifier);
            if ui.selectable_label(selected, modifier.ui_label()).clicked() {
                toggle_modifier(modifiers, modifier);
            }
        }
    });
}

/// Single fixed image slot (used by the single-frame view and both start/end
/// frames). Returns an inline error message when an upload was rejected.
pub fn image_slot(
    ui: &mut egui::Ui,
    label: &str,
    slot: &mut Option<ImageReference>,
    previews: &mut PreviewCache,
    limits: &UploadLimits,
) -> Option<String> {
    let mut upload_error = None;
    let mut remove = false;
    let mut picked = None;

    section_label(ui, label);
    ui.group(|ui| {
        if let Some(image) = slot.as_ref() {
            if let Some(texture) = previews.texture(ui.ctx(), image) {
                ui.add(egui::Image::new(&texture).fit_to_exact_size(egui::vec2(180.0, 130.0)));
            } else {
                ui.weak("预览不可用");
            }
            if ui.button("移除").clicked() {
                remove = true;
            }
        } else {
            if ui.button("点击上传图片").clicked() {
                match pick_image(limits) {
                    Ok(image) => picked = image,
                    Err(e) => upload_error = Some(e.to_string()),
                }
            }
            ui.weak("或将图片拖入窗口");
        }
    });

    if remove {
        if let Some(removed) = slot.take() {
            previews.release(&removed.id);
        }
    }
    if let Some(image) = picked {
        if let Some(replaced) = slot.replace(image) {
            previews.release(&replaced.id);
        }
    }
    upload_error
}

pub fn pick_image(limits: &UploadLimits) -> Result<Option<ImageReference>> {
    let path = rfd::FileDialog::new()
        .set_title("选择参考图片")
        .add_filter("image files", &["png", "jpg", "jpeg", "webp", "gif", "bmp"])
        .pick_file();
    match path {
        Some(path) => read_image_reference(&path, limits).map(Some),
        None => Ok(None),
    }
}

/// Clear + submit row shared by all three views. Submit stays disabled while
/// a request is in flight or the draft is incomplete.
pub fn action_row(
    ui: &mut egui::Ui,
    submittable: bool,
    loading: bool,
    submit_label: &str,
    loading_label: &str,
) -> (bool, bool) {
    let mut clear = false;
    let mut submit = false;
    ui.horizontal(|ui| {
        if ui.button("清空").clicked() {
            clear = true;
        }
        let label = if loading { loading_label } else { submit_label };
        if ui
            .add_enabled(submittable && !loading, egui::Button::new(label))
            .clicked()
        {
            submit = true;
        }
    });
    (clear, submit)
}

pub fn output_panel_ui(ui: &mut egui::Ui, panel: &mut OutputPanel) {
    ui.group(|ui| {
        ui.set_min_height(380.0);
        ui.set_width(ui.available_width());
        match panel.state().clone() {
            OutputState::Idle => {
                ui.vertical_centered(|ui| {
                    ui.add_space(140.0);
                    ui.heading("准备创作");
                    ui.weak("上传图片并描述您的构思，即可生成专业视频提示词。");
                });
            }
            OutputState::Loading => {
                ui.vertical_centered(|ui| {
                    ui.add_space(140.0);
                    ui.spinner();
                    ui.add_space(8.0);
                    ui.label("正在炼制提示词...");
                    ui.weak("正在分析画面并优化描述");
                });
            }
            OutputState::Failed(message) => {
                ui.vertical_centered(|ui| {
                    ui.add_space(140.0);
                    ui.colored_label(egui::Color32::LIGHT_RED, "生成失败");
                    ui.add_space(6.0);
                    ui.label(message);
                });
            }
            OutputState::Ready(text) => {
                ui.horizontal(|ui| {
                    ui.strong("优化后的提示词");
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let copy_label = if panel.copied_recently() {
                            "已复制"
                        } else {
                            "复制"
                        };
                        if ui.button(copy_label).clicked() {
                            ui.ctx().copy_text(text.clone());
                            panel.mark_copied();
                        }
                    });
                });
                ui.separator();
                egui::ScrollArea::vertical()
                    .id_salt("generated-prompt")
                    .auto_shrink(false)
                    .show(ui, |ui| {
                        ui.label(egui::RichText::new(text).size(15.0));
                    });
            }
        }
    });
}
