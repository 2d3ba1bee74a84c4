#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::path::PathBuf;

use eframe::egui;

use exif_view::pipeline::{IMAGE_EXTENSIONS, Viewer};

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let viewport = egui::ViewportBuilder::default()
        .with_title("Drag and Drop Image Metadata Reader")
        .with_inner_size([600.0, 400.0])
        .with_min_inner_size([360.0, 240.0])
        .with_drag_and_drop(true);

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "exif-view",
        options,
        Box::new(|cc| Ok(Box::new(App::new(cc)))),
    )
}

// ── Main application state ──────────────────────────────────────────

struct App {
    /// Label and text of the current file; replaced on every load.
    viewer: Viewer,
}

impl App {
    fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            viewer: Viewer::default(),
        }
    }

    fn open_file_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .set_title("Open Image File")
            .add_filter("Image Files", IMAGE_EXTENSIONS)
            .pick_file()
        {
            self.viewer.load(&path);
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Handle dropped files
        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw.dropped_files.iter()
                .filter_map(|f| f.path.clone())
                .collect()
        });
        if !dropped.is_empty() {
            self.viewer.drop_paths(&dropped);
        }
        let hovering = ctx.input(|i| !i.raw.hovered_files.is_empty());

        // ── Status label ────────────────────────────────────────────
        egui::TopBottomPanel::top("status").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.vertical_centered(|ui| {
                if hovering {
                    ui.label(egui::RichText::new("Drop to read metadata").italics());
                } else {
                    ui.label(&self.viewer.label);
                }
            });
            ui.add_space(4.0);
        });

        // ── Bottom toolbar ──────────────────────────────────────────
        egui::TopBottomPanel::bottom("toolbar").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.vertical_centered_justified(|ui| {
                if ui.button("📂 Open Image").clicked() {
                    self.open_file_dialog();
                }
            });
            ui.add_space(4.0);
        });

        // ── Central panel: metadata text ────────────────────────────
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    // A `&str` buffer makes the text area read-only but still selectable.
                    let mut text = self.viewer.text.as_str();
                    ui.add(
                        egui::TextEdit::multiline(&mut text)
                            .font(egui::TextStyle::Monospace)
                            .desired_width(f32::INFINITY),
                    );
                });
        });
    }
}
