use crate::{
    config::UploadLimits,
    models::ImageReference,
    session::{MultiRefDraft, OutputPanel, SingleFrameDraft, StartEndDraft},
};

use super::{textures::PreviewCache, widgets};

/// 单帧润色: one reference frame plus an idea to set in motion.
pub struct SingleFrameView {
    pub draft: SingleFrameDraft,
    pub output: OutputPanel,
    pub previews: PreviewCache,
}

impl SingleFrameView {
    pub fn new() -> Self {
        Self {
            draft: SingleFrameDraft::new(),
            output: OutputPanel::new(),
            previews: PreviewCache::new(),
        }
    }

    pub fn accept_dropped(&mut self, image: ImageReference) {
        if let Some(replaced) = self.draft.set_image(image) {
            self.previews.release(&replaced.id);
        }
    }

    pub fn clear(&mut self) {
        self.draft.clear();
        self.previews.clear();
        self.output.reset();
    }

    /// Renders the form; returns true when the user asked to submit.
    pub fn form_ui(&mut self, ui: &mut egui::Ui, limits: &UploadLimits) -> bool {
        if let Some(message) = widgets::image_slot(
            ui,
            "参考画面",
            &mut self.draft.image,
            &mut self.previews,
            limits,
        ) {
            self.output.fail_validation(message);
        }

        ui.add_space(10.0);
        widgets::section_label(ui, "您的构思");
        ui.add(
            egui::TextEdit::multiline(&mut self.draft.description)
                .hint_text("例如：赛博朋克侦探在雨夜的霓虹街道上行走，看着全息图...")
                .desired_rows(5)
                .desired_width(f32::INFINITY),
        );

        ui.add_space(10.0);
        widgets::style_selector(ui, &mut self.draft.modifiers);

        ui.add_space(12.0);
        let (clear, submit) = widgets::action_row(
            ui,
            self.draft.is_submittable(),
            self.output.is_loading(),
            "生成提示词",
            "生成中...",
        );
        if clear {
            self.clear();
        }
        submit
    }
}

/// 首尾帧补全: start and end frames with easing control over the transition.
pub struct StartEndView {
    pub draft: StartEndDraft,
    pub output: OutputPanel,
    pub previews: PreviewCache,
}

impl StartEndView {
    pub fn new() -> Self {
        Self {
            draft: StartEndDraft::new(),
            output: OutputPanel::new(),
            previews: PreviewCache::new(),
        }
    }

    pub fn accept_dropped(&mut self, image: ImageReference) {
        if let Some(replaced) = self.draft.place_dropped(image) {
            self.previews.release(&replaced.id);
        }
    }

    pub fn clear(&mut self) {
        self.draft.clear();
        self.previews.clear();
        self.output.reset();
    }

    pub fn form_ui(&mut self, ui: &mut egui::Ui, limits: &UploadLimits) -> bool {
        let mut upload_error = None;
        ui.columns(2, |columns| {
            if let Some(message) = widgets::image_slot(
                &mut columns[0],
                "起始帧 (Start)",
                &mut self.draft.start,
                &mut self.previews,
                limits,
            ) {
                upload_error = Some(message);
            }
            if let Some(message) = widgets::image_slot(
                &mut columns[1],
                "结束帧 (End)",
                &mut self.draft.end,
                &mut self.previews,
                limits,
            ) {
                upload_error = Some(message);
            }
        });
        if let Some(message) = upload_error {
            self.output.fail_validation(message);
        }

        ui.add_space(10.0);
        widgets::section_label(ui, "过渡描述");
        ui.add(
            egui::TextEdit::multiline(&mut self.draft.description)
                .hint_text("描述这两个画面之间发生了什么，如何变化的...")
                .desired_rows(4)
                .desired_width(f32::INFINITY),
        );

        ui.add_space(10.0);
        widgets::section_label(ui, "动态平滑控制 (减少刹车感)");
        ui.horizontal(|ui| {
            ui.toggle_value(&mut self.draft.ease.ease_in, "动态缓入 (Ease In)");
            ui.toggle_value(&mut self.draft.ease.ease_out, "动态缓出 (Ease Out)");
        });
        ui.weak("提示：勾选「缓入」使起步更柔和，勾选「缓出」使结束更平滑，避免视频循环或拼接时的突兀感。");

        ui.add_space(10.0);
        widgets::style_selector(ui, &mut self.draft.modifiers);

        ui.add_space(12.0);
        let (clear, submit) = widgets::action_row(
            ui,
            self.draft.is_submittable(),
            self.output.is_loading(),
            "优化过渡效果",
            "分析中...",
        );
        if clear {
            self.clear();
        }
        submit
    }
}

/// 多图参考: a named cast of reference images woven into one story.
pub struct MultiRefView {
    pub draft: MultiRefDraft,
    pub output: OutputPanel,
    pub previews: PreviewCache,
}

impl MultiRefView {
    pub fn new() -> Self {
        Self {
            draft: MultiRefDraft::new(),
            output: OutputPanel::new(),
            previews: PreviewCache::new(),
        }
    }

    pub fn accept_dropped(&mut self, image: ImageReference, limits: &UploadLimits) {
        if let Err(e) = self.draft.add_image(image, limits) {
            self.output.fail_validation(e.to_string());
        }
    }

    pub fn clear(&mut self) {
        self.draft.clear();
        self.previews.clear();
        self.output.reset();
    }

    pub fn form_ui(&mut self, ui: &mut egui::Ui, limits: &UploadLimits) -> bool {
        ui.horizontal(|ui| {
            widgets::section_label(ui, "角色/物品参考");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("＋ 添加参考图").clicked() {
                    match widgets::pick_image(limits) {
                        Ok(Some(image)) => {
                            if let Err(e) = self.draft.add_image(image, limits) {
                                self.output.fail_validation(e.to_string());
                            }
                        }
                        Ok(None) => {}
                        Err(e) => self.output.fail_validation(e.to_string()),
                    }
                }
            });
        });

        if self.draft.images.is_empty() {
            ui.group(|ui| {
                ui.set_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    ui.add_space(18.0);
                    ui.weak("暂无参考图。点击「添加参考图」上传角色或物体。");
                    ui.add_space(18.0);
                });
            });
        }

        let mut remove_id = None;
        for image in self.draft.images.iter_mut() {
            ui.group(|ui| {
                ui.horizontal(|ui| {
                    if let Some(texture) = self.previews.texture(ui.ctx(), image) {
                        ui.add(
                            egui::Image::new(&texture).fit_to_exact_size(egui::vec2(56.0, 56.0)),
                        );
                    }
                    ui.vertical(|ui| {
                        ui.weak("设定名称");
                        let mut name = image.label.clone().unwrap_or_default();
                        let edit = egui::TextEdit::singleline(&mut name)
                            .hint_text("例如：主角、魔法剑...");
                        if ui.add(edit).changed() {
                            image.label = Some(name);
                        }
                    });
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("移除").clicked() {
                            remove_id = Some(image.id);
                        }
                    });
                });
            });
        }
        if let Some(id) = remove_id {
            if let Some(removed) = self.draft.remove_image(id) {
                self.previews.release(&removed.id);
            }
        }

        ui.add_space(10.0);
        widgets::section_label(ui, "故事/场景描述");
        ui.add(
            egui::TextEdit::multiline(&mut self.draft.description)
                .hint_text("使用上方设定的名称描述场景剧情...")
                .desired_rows(4)
                .desired_width(f32::INFINITY),
        );

        ui.add_space(10.0);
        widgets::style_selector(ui, &mut self.draft.modifiers);

        ui.add_space(12.0);
        let (clear, submit) = widgets::action_row(
            ui,
            self.draft.is_submittable(),
            self.output.is_loading(),
            "生成组合提示词",
            "编写中...",
        );
        if clear {
            self.clear();
        }
        submit
    }
}
