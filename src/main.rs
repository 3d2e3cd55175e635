//! PANOPTES - BINARY FIELD CARTOGRAPHER
//!
//! Hilbert-curve forensic visualizer: every byte offset of a file is
//! placed on a space-filling curve and colored by a local window
//! classification (padding / high entropy / text / code).

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]

mod analysis;
mod app;
mod gpu;
mod hilbert;
mod util;
mod viz;

use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use memmap2::Mmap;

use eframe::egui::{self, Color32, ColorImage, Pos2, Rect, RichText, Sense, Vec2};

use analysis::{classify_window, identify_file_type};
use app::{inspect, FileData, PanoptesApp, TextureParams};
use hilbert::calculate_dimension;
use util::color::{
    byte_color, entropy_indicator_color, ALERT_RED, DATA_WHITE, DIM_CYAN, MUTED_TEXT,
    OPERATIONAL_GREEN, PANEL_DARK, TACTICAL_CYAN, VOID_BLACK,
};
use util::format_bytes;
use viz::{generate_hilbert_pixels, FrameUniforms};

// =============================================================================
// File Loading
// =============================================================================

impl PanoptesApp {
    /// Load a file from the given path, replacing the current one.
    /// Uses memory-mapped files so large inputs never load entirely into RAM.
    fn load_file(&mut self, path: PathBuf) {
        let file = match File::open(&path) {
            Ok(f) => f,
            Err(e) => {
                eprintln!("Error opening file: {e}");
                return;
            }
        };

        let mmap = match unsafe { Mmap::map(&file) } {
            Ok(m) => m,
            Err(e) => {
                eprintln!("Error memory-mapping file: {e}");
                return;
            }
        };

        let data = &mmap[..];
        let size = data.len() as u64;

        if size == 0 {
            eprintln!("Error: File is empty");
            return;
        }

        let dimension = calculate_dimension(size);
        let file_type = identify_file_type(data);

        // Upload to GPU if available (has its own size limit)
        if let Some(ref mut gpu) = self.gpu {
            gpu.upload_file(data, dimension);
        }

        self.file = Some(FileData {
            data: Arc::new(mmap),
            size,
            dimension,
            file_type,
            path,
        });

        self.viewport.reset();
        self.pinned = false;
        self.needs_fit_to_view = true;
        self.last_fit_view_size = None;
        self.invalidate_texture();

        // Seed the inspector at offset 0 so it is never empty.
        if let Some(file) = &self.file {
            self.inspection = inspect(Vec2::ZERO, &self.viewport, &file.data, file.dimension);
        }

        println!("Loaded file: Size={size} bytes, Dimension={dimension}, Type={file_type}");
    }

    // =========================================================================
    // Frame Generation
    // =========================================================================

    /// Generate the classification texture for the current frame, reusing
    /// the cached one when nothing about the frame changed.
    fn generate_texture(&mut self, ctx: &egui::Context, view_rect: Rect) {
        let Some(file) = &self.file else {
            return;
        };

        let view_size = view_rect.size();
        let view_width = (view_size.x as usize).clamp(1, 4096);
        let view_height = (view_size.y as usize).clamp(1, 4096);

        let params = TextureParams {
            offset: self.viewport.offset,
            zoom: self.viewport.zoom,
            view_size,
        };
        if self.texture.is_some() && self.texture_params == Some(params) {
            return;
        }

        let frame = FrameUniforms {
            view_width,
            view_height,
            offset: self.viewport.offset,
            zoom: self.viewport.zoom,
            file_size: file.size,
            dimension: file.dimension,
        };

        let pixels: Vec<Color32> = match &self.gpu {
            Some(gpu) if gpu.is_ready() => {
                let rgba = gpu.render(&frame);
                rgba.chunks_exact(4)
                    .map(|c| Color32::from_rgba_unmultiplied(c[0], c[1], c[2], c[3]))
                    .collect()
            }
            _ => generate_hilbert_pixels(&file.data, &frame),
        };

        let image = ColorImage {
            size: [view_width, view_height],
            pixels,
        };

        self.texture = Some(ctx.load_texture("hilbert_field", image, egui::TextureOptions::NEAREST));
        self.texture_params = Some(params);
    }

    // =========================================================================
    // Visualization Panel
    // =========================================================================

    fn draw_visualization(&mut self, ui: &mut egui::Ui) {
        let view_rect = ui.available_rect_before_wrap();
        ui.painter().rect_filled(view_rect, 0.0, VOID_BLACK);

        if self.file.is_none() {
            self.draw_empty_state(ui, view_rect);
            return;
        }

        // Fit viewport after load, and re-fit when the view resizes enough
        // to matter.
        let view_size = view_rect.size();
        let should_fit = self.needs_fit_to_view || self.should_refit(view_size);
        if should_fit && view_size.x > 100.0 && view_size.y > 100.0 {
            if let Some(file) = &self.file {
                self.viewport.fit_to_view(view_size, file.dimension as f32);
            }
            self.last_fit_view_size = Some(view_size);
            self.needs_fit_to_view = false;
            self.invalidate_texture();
        }

        let response = ui.allocate_rect(view_rect, Sense::click_and_drag());

        // Zoom towards the cursor on scroll
        let scroll_delta = ui.input(|i| i.raw_scroll_delta);
        if scroll_delta.y != 0.0 && response.hovered() {
            let factor = 1.1f32.powf(scroll_delta.y / 50.0);
            let anchor = response
                .hover_pos()
                .map_or(view_rect.center() - view_rect.min, |p| p - view_rect.min);
            self.viewport.zoom_at(anchor, factor);
            self.invalidate_texture();
        }

        // Pan on drag
        if response.dragged() {
            self.viewport.pan(response.drag_delta());
            self.invalidate_texture();
        }

        // Hover inspection; a click pins the current window until the next
        // click.
        if let Some(cursor_pos) = response.hover_pos() {
            let cursor_rel = cursor_pos - view_rect.min;
            if response.clicked() {
                self.pinned = !self.pinned;
            }
            if !self.pinned || response.clicked() {
                if let Some(file) = &self.file {
                    self.inspection = inspect(
                        Vec2::new(cursor_rel.x, cursor_rel.y),
                        &self.viewport,
                        &file.data,
                        file.dimension,
                    );
                }
            }
        }

        // Keyboard: R resets the view, F fits the file
        if ui.input(|i| i.key_pressed(egui::Key::R)) {
            self.viewport.reset();
            self.invalidate_texture();
        }
        if ui.input(|i| i.key_pressed(egui::Key::F)) {
            self.needs_fit_to_view = true;
        }

        self.generate_texture(ui.ctx(), view_rect);

        if let Some(texture) = &self.texture {
            ui.painter().image(
                texture.id(),
                view_rect,
                Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                Color32::WHITE,
            );
        }

        self.draw_hud(ui, view_rect);
    }

    fn draw_empty_state(&self, ui: &mut egui::Ui, rect: Rect) {
        let text = if self.is_drop_target {
            "RELEASE TO LOAD"
        } else {
            "DROP A FILE TO BEGIN // OR OPEN FROM THE TOOLBAR"
        };
        let color = if self.is_drop_target {
            TACTICAL_CYAN
        } else {
            MUTED_TEXT
        };
        ui.painter().text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            text,
            egui::FontId::monospace(14.0),
            color,
        );
    }

    fn draw_hud(&self, ui: &mut egui::Ui, rect: Rect) {
        let Some(file) = &self.file else {
            return;
        };

        let name = file
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown");
        let hud = format!(
            "{}  //  {}  //  {}  //  N={}  //  ZOOM {:.3}",
            name,
            file.file_type,
            format_bytes(file.size),
            file.dimension,
            self.viewport.zoom,
        );
        ui.painter().text(
            rect.min + Vec2::new(8.0, 8.0),
            egui::Align2::LEFT_TOP,
            hud,
            egui::FontId::monospace(11.0),
            DIM_CYAN,
        );
    }

    // =========================================================================
    // Inspector Panel
    // =========================================================================

    fn draw_inspector(&mut self, ui: &mut egui::Ui) {
        ui.add_space(8.0);
        ui.label(
            RichText::new("INSPECTOR")
                .monospace()
                .size(13.0)
                .color(TACTICAL_CYAN),
        );
        ui.separator();

        let Some(file) = &self.file else {
            ui.label(RichText::new("NO TARGET").monospace().color(MUTED_TEXT));
            return;
        };

        let inspection = &self.inspection;

        // Target state line: live hover, pinned, or fallback
        let (state_text, state_color) = if self.pinned {
            ("PINNED", TACTICAL_CYAN)
        } else if inspection.hovering {
            ("TRACKING", OPERATIONAL_GREEN)
        } else {
            ("NO TARGET / SHOWING 0x0", MUTED_TEXT)
        };
        ui.label(RichText::new(state_text).monospace().size(11.0).color(state_color));
        ui.add_space(4.0);

        if let Some(offset) = inspection.offset {
            ui.label(
                RichText::new(format!("OFFSET  0x{offset:08X}"))
                    .monospace()
                    .color(DATA_WHITE),
            );
            ui.label(
                RichText::new(format!(
                    "        {} / {}",
                    format_bytes(offset),
                    format_bytes(file.size)
                ))
                .monospace()
                .size(11.0)
                .color(MUTED_TEXT),
            );

            if (offset as usize) < file.data.len() {
                let b = file.data[offset as usize];
                let ch = if (0x20..=0x7e).contains(&b) {
                    b as char
                } else {
                    '.'
                };
                ui.label(
                    RichText::new(format!("BYTE    0x{b:02X} '{ch}'"))
                        .monospace()
                        .color(byte_color(b)),
                );
            }

            // Window verdict from the same classifier the renderer uses
            if let Some(analysis) = classify_window(&file.data, offset) {
                let verdict = analysis.classify();
                let [r, g, b] = analysis.to_color();
                ui.add_space(4.0);
                ui.horizontal(|ui| {
                    let (swatch, _) =
                        ui.allocate_exact_size(egui::vec2(10.0, 10.0), Sense::hover());
                    ui.painter()
                        .rect_filled(swatch, 0.0, Color32::from_rgb(r, g, b));
                    ui.label(
                        RichText::new(verdict.name())
                            .monospace()
                            .color(DATA_WHITE),
                    );
                });
            }

            ui.add_space(4.0);
            ui.label(
                RichText::new(format!("ENTROPY {:.4} bits/byte", inspection.entropy))
                    .monospace()
                    .color(entropy_indicator_color(inspection.entropy)),
            );

            ui.add_space(8.0);
            ui.label(RichText::new("WINDOW").monospace().size(11.0).color(MUTED_TEXT));
            for line in inspection.hex_dump.lines() {
                ui.label(
                    RichText::new(line)
                        .monospace()
                        .size(10.0)
                        .color(DATA_WHITE),
                );
            }

            if let Some(preview) = &inspection.ascii_preview {
                ui.add_space(4.0);
                ui.label(RichText::new("STRING").monospace().size(11.0).color(MUTED_TEXT));
                ui.label(
                    RichText::new(preview)
                        .monospace()
                        .size(11.0)
                        .color(OPERATIONAL_GREEN),
                );
            }
        }

        ui.add_space(12.0);
        ui.separator();
        ui.label(RichText::new("LEGEND").monospace().size(11.0).color(MUTED_TEXT));
        for (color, label) in [
            (Color32::from_rgb(0, 0, 127), "PADDING / NULLS"),
            (Color32::from_rgb(255, 0, 0), "HIGH ENTROPY"),
            (Color32::from_rgb(0, 200, 200), "ASCII TEXT"),
            (Color32::from_rgb(0, 190, 0), "CODE / DATA"),
            (viz::OUT_OF_RANGE, "BEYOND EOF"),
        ] {
            ui.horizontal(|ui| {
                let (swatch, _) = ui.allocate_exact_size(egui::vec2(10.0, 10.0), Sense::hover());
                ui.painter().rect_filled(swatch, 0.0, color);
                ui.label(RichText::new(label).monospace().size(10.0).color(MUTED_TEXT));
            });
        }

        ui.add_space(8.0);
        ui.label(
            RichText::new("DRAG pan  SCROLL zoom  CLICK pin  R reset  F fit")
                .monospace()
                .size(10.0)
                .color(MUTED_TEXT),
        );
    }
}

// =============================================================================
// eframe Application
// =============================================================================

impl eframe::App for PanoptesApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Load initial file from command-line argument (first frame only)
        if let Some(path) = self.initial_file.take() {
            println!("Loading file from command line: {}", path.display());
            self.load_file(path);
        }

        // Handle file drops
        let dropped_file = ctx.input(|i| {
            self.is_drop_target = !i.raw.hovered_files.is_empty();
            i.raw.dropped_files.first().and_then(|f| f.path.clone())
        });
        if let Some(path) = dropped_file {
            self.load_file(path);
        }

        egui::TopBottomPanel::top("toolbar")
            .frame(egui::Frame::none().fill(PANEL_DARK))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.add_space(6.0);
                    ui.label(
                        RichText::new("PANOPTES")
                            .monospace()
                            .size(14.0)
                            .color(TACTICAL_CYAN),
                    );
                    ui.add_space(12.0);
                    if ui.button(RichText::new("OPEN").monospace()).clicked() {
                        if let Some(path) = rfd::FileDialog::new().pick_file() {
                            self.load_file(path);
                        }
                    }
                    if ui.button(RichText::new("FIT").monospace()).clicked() {
                        self.needs_fit_to_view = true;
                    }
                    if ui.button(RichText::new("RESET").monospace()).clicked() {
                        self.viewport.reset();
                        self.invalidate_texture();
                    }
                    if self.gpu.is_none() {
                        ui.add_space(12.0);
                        ui.label(RichText::new("CPU MODE").monospace().size(11.0).color(ALERT_RED));
                    }
                });
                ui.add_space(4.0);
            });

        egui::SidePanel::right("inspector")
            .resizable(false)
            .default_width(360.0)
            .frame(egui::Frame::none().fill(PANEL_DARK).inner_margin(8.0))
            .show(ctx, |ui| {
                self.draw_inspector(ui);
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(VOID_BLACK))
            .show(ctx, |ui| {
                self.draw_visualization(ui);
            });
    }
}

fn main() -> eframe::Result<()> {
    // Parse command-line arguments
    let args: Vec<String> = std::env::args().collect();
    let initial_file = if args.len() > 1 {
        let path = PathBuf::from(&args[1]);
        if path.exists() {
            Some(path)
        } else {
            eprintln!("Warning: File not found: {}", args[1]);
            None
        }
    } else {
        None
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 840.0])
            .with_min_inner_size([800.0, 600.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "Panoptes",
        options,
        Box::new(move |cc| Ok(Box::new(PanoptesApp::new_with_file(cc, initial_file)))),
    )
}
