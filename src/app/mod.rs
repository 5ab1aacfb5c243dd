pub mod textures;
pub mod views;
pub mod widgets;

use crate::{
    config::UploadLimits,
    error::Result,
    gemini::PromptGenerator,
    models::Mode,
    prompt::build_request,
    session::{read_image_reference, OutputPanel},
};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::time::Duration;

use views::{MultiRefView, SingleFrameView, StartEndView};

/// Completion message from a background generation task. Routed back to the
/// view that submitted it and checked against its ticket before being shown.
pub struct GenerationOutcome {
    pub mode: Mode,
    pub ticket: u64,
    pub result: Result<String>,
}

/// The desktop form: a mode selector over three input views sharing one
/// output column, with generation running on a background runtime.
pub struct StudioApp {
    mode: Mode,
    single: SingleFrameView,
    start_end: StartEndView,
    multi: MultiRefView,
    generator: Arc<dyn PromptGenerator>,
    limits: UploadLimits,
    runtime: tokio::runtime::Handle,
    outcome_tx: Sender<GenerationOutcome>,
    outcome_rx: Receiver<GenerationOutcome>,
}

impl StudioApp {
    pub fn new(
        generator: Arc<dyn PromptGenerator>,
        limits: UploadLimits,
        runtime: tokio::runtime::Handle,
    ) -> Self {
        let (outcome_tx, outcome_rx) = channel();
        Self {
            mode: Mode::SingleFrame,
            single: SingleFrameView::new(),
            start_end: StartEndView::new(),
            multi: MultiRefView::new(),
            generator,
            limits,
            runtime,
            outcome_tx,
            outcome_rx,
        }
    }

    fn panel_mut(&mut self, mode: Mode) -> &mut OutputPanel {
        match mode {
            Mode::SingleFrame => &mut self.single.output,
            Mode::StartEnd => &mut self.start_end.output,
            Mode::MultiRef => &mut self.multi.output,
        }
    }

    fn panel(&self, mode: Mode) -> &OutputPanel {
        match mode {
            Mode::SingleFrame => &self.single.output,
            Mode::StartEnd => &self.start_end.output,
            Mode::MultiRef => &self.multi.output,
        }
    }

    fn drain_outcomes(&mut self) {
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.panel_mut(outcome.mode)
                .complete(outcome.ticket, outcome.result);
        }
    }

    /// Validates the active draft and, when it passes, dispatches exactly one
    /// generation task. Validation failures render inline without ever
    /// reaching the client.
    fn submit(&mut self, mode: Mode) {
        let request = match mode {
            Mode::SingleFrame => self.single.draft.to_request(),
            Mode::StartEnd => self.start_end.draft.to_request(),
            Mode::MultiRef => self.multi.draft.to_request(),
        };

        let request = match request {
            Ok(request) => request,
            Err(e) => {
                self.panel_mut(mode).fail_validation(e.to_string());
                return;
            }
        };

        let ticket = self.panel_mut(mode).begin();
        let assembled = build_request(&request);
        let generator = Arc::clone(&self.generator);
        let outcome_tx = self.outcome_tx.clone();

        log::info!(
            "Submitting {} generation with {} image(s)",
            mode.label(),
            assembled.payloads.len()
        );

        self.runtime.spawn(async move {
            let result = generator.generate(&assembled).await;
            if outcome_tx
                .send(GenerationOutcome {
                    mode,
                    ticket,
                    result,
                })
                .is_err()
            {
                log::warn!("Generation finished after the window closed");
            }
        });
    }

    fn handle_dropped_file(&mut self, path: PathBuf) {
        let image = match read_image_reference(&path, &self.limits) {
            Ok(image) => image,
            Err(e) => {
                let mode = self.mode;
                self.panel_mut(mode).fail_validation(e.to_string());
                return;
            }
        };
        match self.mode {
            Mode::SingleFrame => self.single.accept_dropped(image),
            Mode::StartEnd => self.start_end.accept_dropped(image),
            Mode::MultiRef => self.multi.accept_dropped(image, &self.limits),
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        for file in dropped {
            if let Some(path) = file.path {
                self.handle_dropped_file(path);
            }
        }
    }
}

impl eframe::App for StudioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_outcomes();
        self.handle_dropped_files(ctx);

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading("AI 视频提示词工作台");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.weak("Powered by Gemini");
                });
            });
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                for mode in Mode::ALL {
                    if ui.selectable_label(self.mode == mode, mode.label()).clicked() {
                        self.mode = mode;
                    }
                }
            });
            ui.add_space(6.0);
        });

        let mut submitted = false;
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.columns(2, |columns| {
                egui::ScrollArea::vertical()
                    .id_salt("input-form")
                    .auto_shrink(false)
                    .show(&mut columns[0], |ui| {
                        submitted = match self.mode {
                            Mode::SingleFrame => self.single.form_ui(ui, &self.limits),
                            Mode::StartEnd => self.start_end.form_ui(ui, &self.limits),
                            Mode::MultiRef => self.multi.form_ui(ui, &self.limits),
                        };
                    });

                let mode = self.mode;
                widgets::output_panel_ui(&mut columns[1], self.panel_mut(mode));
            });
        });

        if submitted {
            self.submit(self.mode);
        }

        // Keep draining while any view has a call in flight, even if the
        // user tabbed away from it.
        let any_loading = Mode::ALL.iter().any(|mode| self.panel(*mode).is_loading());
        if any_loading {
            ctx.request_repaint_after(Duration::from_millis(120));
        }
        if self.panel(self.mode).copied_recently() {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }
}

/// The default egui fonts carry no CJK glyphs, so pull in a system font when
/// one is available.
pub fn install_cjk_fonts(ctx: &egui::Context) {
    const CANDIDATES: [&str; 6] = [
        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/truetype/wqy/wqy-zenhei.ttc",
        "/usr/share/fonts/truetype/arphic/uming.ttc",
        "/System/Library/Fonts/PingFang.ttc",
        "C:\\Windows\\Fonts\\msyh.ttc",
    ];

    for path in CANDIDATES {
        let Ok(bytes) = std::fs::read(path) else {
            continue;
        };
        let mut fonts = egui::FontDefinitions::default();
        fonts.font_data.insert(
            "cjk".to_owned(),
            std::sync::Arc::new(egui::FontData::from_owned(bytes)),
        );
        for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
            if let Some(list) = fonts.families.get_mut(&family) {
                list.push("cjk".to_owned());
            }
        }
        ctx.set_fonts(fonts);
        log::debug!("Loaded CJK font from {}", path);
        return;
    }
    log::warn!("No CJK font found on this system; Chinese labels may not render");
}
