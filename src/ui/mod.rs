//! User interface components and rendering logic for the wordtrace editor.
//!
//! This module contains all the UI-related code including the main
//! application struct, canvas rendering, the layer panel, and user
//! interaction handling.
//!
//! # Module Organization
//!
//! - `state` - Application state structures and the main WordtraceApp
//! - `canvas` - Camera transforms, auto-fit, panning, zooming, dragging
//! - `rendering` - Drawing layer curves and the grid
//! - `looper` - Automatic loop-growth controller
//! - `panel` - Sidebar layer list and property editing

mod canvas;
mod looper;
mod panel;
mod rendering;
mod state;


pub use state::WordtraceApp;

use crate::constants;
use eframe::egui;
use state::PREFS_STORAGE_KEY;

impl eframe::App for WordtraceApp {
    /// Persist UI preferences between restarts.
    ///
    /// Layer sets are intentionally not saved; only presentation settings
    /// survive.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        match serde_json::to_string(&self.current_prefs()) {
            Ok(json) => storage.set_string(PREFS_STORAGE_KEY, json),
            Err(err) => log::warn!("failed to serialize UI preferences: {err}"),
        }
    }

    /// Main update function called by egui for each frame.
    ///
    /// Handles the overall layout (side panel, toolbar, canvas), drives the
    /// loop controller, and keeps auto-fit framing current.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The egui context
    /// * `_frame` - The eframe frame
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let visuals = if self.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        ctx.set_visuals(visuals);

        // Drive the loop controller from the frame clock; while a loop is
        // running we keep scheduling repaints so ticks arrive on cadence
        if self.looper.is_running() {
            let now = ctx.input(|i| i.time);
            if self.looper.tick(now, &mut self.composition) {
                ctx.request_repaint_after(std::time::Duration::from_millis(15));
            }
        }

        self.draw_side_panel(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_toolbar(ui);
            ui.separator();
            self.draw_canvas(ui);
        });
    }
}

impl WordtraceApp {
    /// Draws the toolbar with camera commands and display toggles.
    ///
    /// # Arguments
    ///
    /// * `ui` - The egui UI context
    fn draw_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("Auto-fit").clicked() {
                self.enable_auto_fit();
            }
            if ui.button("Zoom in").clicked() {
                self.zoom_by(constants::BUTTON_ZOOM_IN);
            }
            if ui.button("Zoom out").clicked() {
                self.zoom_by(constants::BUTTON_ZOOM_OUT);
            }
            ui.checkbox(&mut self.canvas.show_grid, "Grid");
            ui.checkbox(&mut self.dark_mode, "Dark mode");

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if let Some(rect) = self.canvas.screen_rect {
                    let scale = canvas::view_scale(self.canvas.view, rect);
                    ui.label(format!("{:.0}%", scale * 100.0));
                }
                if let Some(id) = self.interaction.selected_layer {
                    if let Some(layer) = self.composition.layer_mut(id) {
                        let points = layer.path().points.len();
                        ui.label(format!("{points} points"));
                    }
                }
            });
        });
    }

    /// Allocates the canvas area and runs one frame of interaction and
    /// rendering.
    ///
    /// # Arguments
    ///
    /// * `ui` - The egui UI context
    pub fn draw_canvas(&mut self, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
        self.canvas.screen_rect = Some(response.rect);

        self.handle_canvas_zoom(ui, &response);
        self.handle_canvas_interaction(ui, &response);

        // Reframe after any content changes this frame; manual pan/zoom
        // above will already have disabled auto-fit
        self.apply_auto_fit();

        self.render_canvas(&painter, response.rect);
    }
}
