use eframe::egui;
use session_core::{detect_clipboard, CopyOutcome, Session};
use shared::{
    domain::{CopyFeedbackState, MalformedDirective, MalformedPolicy},
    error::UserNotice,
};
use tokio::runtime::Runtime;

pub const WINDOW_TITLE: &str = "Markdown Image Converter";
const HEADING: &str = "Convert Markdown Image Tags to HTML";
const INPUT_LABEL: &str = "Paste Markdown";
const INPUT_HINT: &str = "Paste markdown with image tags to convert images to html with mobile width";

#[derive(Debug, Clone, Default)]
pub struct StartupConfig {
    pub on_malformed: MalformedPolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusBannerSeverity {
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct StatusBanner {
    severity: StatusBannerSeverity,
    message: String,
}

impl From<UserNotice> for StatusBanner {
    fn from(notice: UserNotice) -> Self {
        Self {
            severity: StatusBannerSeverity::Error,
            message: notice.message,
        }
    }
}

pub struct ConverterApp {
    session: Session,
    input: String,
    malformed: Vec<MalformedDirective>,
    status: Option<StatusBanner>,
    // Drives the copy-feedback timer; dropped with the window.
    _runtime: Runtime,
}

impl ConverterApp {
    pub fn new(cc: &eframe::CreationContext<'_>, runtime: Runtime, startup: StartupConfig) -> Self {
        let session = Session::new(detect_clipboard(), runtime.handle().clone())
            .with_policy(startup.on_malformed);

        // Repaint as soon as the feedback flips back to idle, even with no input events.
        let mut feedback = session.subscribe_feedback();
        let ctx = cc.egui_ctx.clone();
        runtime.spawn(async move {
            while feedback.changed().await.is_ok() {
                ctx.request_repaint();
            }
        });

        Self {
            session,
            input: String::new(),
            malformed: Vec::new(),
            status: None,
            _runtime: runtime,
        }
    }

    fn submit(&mut self) {
        self.malformed = self.session.submit();
        self.status = malformed_banner(&self.malformed);
        tracing::debug!(lines = self.session.output().len(), "ui submit");
    }

    fn reset(&mut self) {
        self.session.reset();
        self.input.clear();
        self.malformed.clear();
        self.status = None;
    }

    fn copy(&mut self) {
        match self.session.request_copy() {
            CopyOutcome::Copied { .. } => self.status = None,
            CopyOutcome::Notice(notice) => self.status = Some(notice.into()),
        }
    }

    fn show_form(&mut self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new(INPUT_LABEL).strong());
        let response = ui.add(
            egui::TextEdit::multiline(&mut self.input)
                .desired_rows(3)
                .desired_width(f32::INFINITY),
        );
        if response.changed() {
            self.session.set_input(self.input.clone());
        }
        ui.label(egui::RichText::new(INPUT_HINT).small().weak());

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui.button("Submit").clicked() {
                self.submit();
            }
            if ui.button("Reset").clicked() {
                self.reset();
            }
        });
    }

    fn show_results(&mut self, ui: &mut egui::Ui) {
        ui.heading("Results:");
        egui::ScrollArea::vertical()
            .max_height(ui.available_height() - 80.0)
            .auto_shrink([false, true])
            .show(ui, |ui| {
                for line in self.session.output() {
                    ui.monospace(display_line(line));
                }
            });

        ui.add_space(8.0);
        let caption = copy_button_caption(self.session.feedback());
        ui.horizontal(|ui| {
            if ui.button(caption).clicked() {
                self.copy();
            }
            if let Some(hint) = copy_hint(self.session.clipboard_available()) {
                ui.label(egui::RichText::new(hint).small().weak());
            }
        });
    }

    fn show_status(&self, ui: &mut egui::Ui) {
        let Some(banner) = &self.status else {
            return;
        };
        let color = match banner.severity {
            StatusBannerSeverity::Warning => egui::Color32::from_rgb(0xE0, 0xB0, 0x40),
            StatusBannerSeverity::Error => egui::Color32::from_rgb(0xE0, 0x60, 0x60),
        };
        ui.colored_label(color, &banner.message);
        for directive in &self.malformed {
            ui.small(format!(
                "line {}: {} ({})",
                directive.line_number, directive.line, directive.reason
            ));
        }
    }
}

impl eframe::App for ConverterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(HEADING);
            ui.add_space(12.0);
            self.show_form(ui);
            self.show_status(ui);
            ui.separator();
            self.show_results(ui);
        });
    }
}

fn malformed_banner(malformed: &[MalformedDirective]) -> Option<StatusBanner> {
    match malformed.len() {
        0 => None,
        1 => Some(StatusBanner {
            severity: StatusBannerSeverity::Warning,
            message: "1 image tag could not be converted".to_string(),
        }),
        n => Some(StatusBanner {
            severity: StatusBannerSeverity::Warning,
            message: format!("{n} image tags could not be converted"),
        }),
    }
}

pub fn copy_button_caption(state: CopyFeedbackState) -> &'static str {
    match state {
        CopyFeedbackState::Idle => "Copy",
        CopyFeedbackState::JustCopied => "Copied!",
    }
}

fn copy_hint(clipboard_available: bool) -> Option<&'static str> {
    (!clipboard_available).then_some("No system clipboard detected")
}

/// Generated `<img>` lines carry a trailing newline that would render as an empty row.
pub fn display_line(line: &str) -> &str {
    line.strip_suffix('\n').unwrap_or(line)
}
