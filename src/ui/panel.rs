//! Sidebar panel: layer list and per-layer property editing.
//!
//! This is the form/state plumbing around the core: it supplies layer data
//! (text, color, position, segment length, lock/visibility flags) and shows
//! the loop controls. All geometry reacts through the layer cache.

use super::state::WordtraceApp;
use crate::constants;
use eframe::egui;

impl WordtraceApp {
    /// Draws the left side panel with the layer list and editors.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The egui context
    pub fn draw_side_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("layer_panel")
            .resizable(true)
            .default_width(260.0)
            .show(ctx, |ui| {
                ui.heading("Layers");
                ui.separator();
                self.draw_layer_list(ui);
                ui.separator();
                self.draw_layer_editor(ui);
            });
    }

    /// Draws the selectable list of layers with add/remove controls.
    fn draw_layer_list(&mut self, ui: &mut egui::Ui) {
        let ids: Vec<_> = self.composition.layers.iter().map(|l| l.id).collect();
        for id in ids {
            let Some(layer) = self.composition.layer_mut(id) else {
                continue;
            };
            let name = layer.name.clone();
            let [r, g, b] = layer.color;
            let selected = self.interaction.selected_layer == Some(id);
            ui.horizontal(|ui| {
                let swatch = egui::RichText::new("■").color(egui::Color32::from_rgb(r, g, b));
                ui.label(swatch);
                if ui.selectable_label(selected, name).clicked() {
                    self.interaction.selected_layer = Some(id);
                }
                if let Some(layer) = self.composition.layer_mut(id) {
                    if ui
                        .selectable_label(layer.visible, "👁")
                        .on_hover_text("Toggle visibility")
                        .clicked()
                    {
                        layer.visible = !layer.visible;
                    }
                    if ui
                        .selectable_label(layer.locked, "🔒")
                        .on_hover_text("Toggle drag lock")
                        .clicked()
                    {
                        layer.locked = !layer.locked;
                    }
                }
            });
        }

        ui.horizontal(|ui| {
            if ui.button("Add layer").clicked() {
                let id = self.composition.add_layer();
                self.interaction.selected_layer = Some(id);
            }
            let can_remove = self.composition.layers.len() > 1;
            let remove = ui.add_enabled(can_remove, egui::Button::new("Remove layer"));
            if remove.clicked() {
                if let Some(id) = self.interaction.selected_layer {
                    if self.looper.is_looping_layer(id) {
                        self.looper.stop();
                    }
                    if self.composition.remove_layer(id) {
                        self.interaction.selected_layer =
                            self.composition.layers.last().map(|l| l.id);
                    }
                }
            }
        });
    }

    /// Draws the property editors for the selected layer.
    fn draw_layer_editor(&mut self, ui: &mut egui::Ui) {
        let Some(id) = self.interaction.selected_layer else {
            ui.label("No layer selected");
            return;
        };
        let looping = self.looper.is_looping_layer(id);
        let any_loop = self.looper.is_running();
        let now = ui.input(|i| i.time);
        let Some(layer) = self.composition.layer_mut(id) else {
            return;
        };

        ui.label("Name");
        ui.text_edit_singleline(&mut layer.name);

        ui.label("Text");
        // Editing is blocked while the loop grows this layer's text
        ui.add_enabled(
            !looping,
            egui::TextEdit::multiline(&mut layer.text).desired_rows(3),
        );

        ui.horizontal(|ui| {
            ui.label("Color");
            ui.color_edit_button_srgb(&mut layer.color);
        });

        let mut segment_length = layer.segment_length;
        ui.add(
            egui::Slider::new(
                &mut segment_length,
                constants::MIN_SEGMENT_LENGTH..=constants::MAX_SEGMENT_LENGTH,
            )
            .text("Segment length"),
        );
        layer.set_segment_length(segment_length);

        ui.separator();
        if looping {
            if ui.button("Stop loop").clicked() {
                self.looper.stop();
            }
        } else {
            let can_start = !any_loop && !layer.text.is_empty();
            let seed = layer.text.clone();
            let start = ui
                .add_enabled(can_start, egui::Button::new("Start loop"))
                .on_disabled_hover_text("Needs non-empty text and no other running loop");
            if start.clicked() {
                self.looper.start(id, &seed, now);
            }
        }
    }
}
