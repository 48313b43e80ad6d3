//! Canvas rendering functionality for layer curves and the grid.
//!
//! This module draws the background grid and every visible layer's path
//! inside the current view rectangle, plus the endpoint marker for the
//! selected layer.

use super::canvas::{plane_to_screen, view_scale};
use super::state::{InteractionMode, WordtraceApp};
use crate::constants;
use crate::types::*;
use eframe::egui;

impl WordtraceApp {
    /// Renders the grid and all visible layers on the canvas.
    ///
    /// Layers are drawn in list order so later layers appear on top. During
    /// a drag every other layer is dimmed for visual feedback.
    ///
    /// # Arguments
    ///
    /// * `painter` - The egui painter for drawing operations
    /// * `canvas_rect` - The screen-space rectangle of the canvas area
    pub fn render_canvas(&mut self, painter: &egui::Painter, canvas_rect: egui::Rect) {
        let painter = painter.with_clip_rect(canvas_rect);

        if self.canvas.show_grid {
            self.draw_grid(&painter, canvas_rect);
        }

        let dragged = match self.interaction.mode {
            InteractionMode::DraggingLayer { id, .. } => Some(id),
            _ => None,
        };
        let selected = self.interaction.selected_layer;
        let view = self.canvas.view;

        for layer in &mut self.composition.layers {
            if !layer.visible {
                continue;
            }
            let id = layer.id;
            let dimmed = dragged.is_some() && dragged != Some(id);
            let [r, g, b] = layer.color;
            let color = if dimmed {
                egui::Color32::from_rgba_unmultiplied(r, g, b, 100)
            } else {
                egui::Color32::from_rgb(r, g, b)
            };
            let stroke = egui::Stroke::new(constants::PATH_STROKE_WIDTH, color);
            let (ox, oy) = layer.position;
            let path = layer.path();

            // Accumulate pen-down runs; every MoveTo breaks the polyline
            let mut run: Vec<egui::Pos2> = Vec::new();
            for command in &path.commands {
                match *command {
                    DrawCommand::MoveTo(p) => {
                        if run.len() >= 2 {
                            painter.add(egui::Shape::line(run.clone(), stroke));
                        }
                        run.clear();
                        run.push(plane_to_screen(view, canvas_rect, (p.0 + ox, p.1 + oy)));
                    }
                    DrawCommand::LineTo(p) => {
                        run.push(plane_to_screen(view, canvas_rect, (p.0 + ox, p.1 + oy)));
                    }
                }
            }
            if run.len() >= 2 {
                painter.add(egui::Shape::line(run, stroke));
            }

            if selected == Some(id) {
                let (ex, ey) = path.end_point;
                let end = plane_to_screen(view, canvas_rect, (ex + ox, ey + oy));
                painter.circle_filled(end, constants::ENDPOINT_RADIUS, color);
            }
        }
    }

    /// Draws a scale-aware grid over the canvas for visual reference.
    ///
    /// Grid lines are spaced every [constants::GRID_SIZE] plane units and
    /// skipped entirely when the current scale squeezes them below two
    /// pixels. The plane axes are drawn slightly stronger.
    ///
    /// # Arguments
    ///
    /// * `painter` - The egui painter for drawing operations
    /// * `canvas_rect` - The screen-space rectangle defining the visible area
    pub fn draw_grid(&self, painter: &egui::Painter, canvas_rect: egui::Rect) {
        let grid_size = constants::GRID_SIZE;
        let view = self.canvas.view;
        let scale = view_scale(view, canvas_rect);
        if grid_size * scale < 2.0 {
            // Too dense to be useful at this zoom level
            return;
        }

        let grid_color = egui::Color32::from_rgba_unmultiplied(128, 128, 128, 32);
        let axis_color = egui::Color32::from_rgba_unmultiplied(128, 128, 128, 96);

        // Plane-space extent of the canvas, including letterbox margins
        let top_left = super::canvas::screen_to_plane(view, canvas_rect, canvas_rect.min);
        let bottom_right = super::canvas::screen_to_plane(view, canvas_rect, canvas_rect.max);

        let start_x = (top_left.0 / grid_size).floor() * grid_size;
        let end_x = (bottom_right.0 / grid_size).ceil() * grid_size;
        let start_y = (top_left.1 / grid_size).floor() * grid_size;
        let end_y = (bottom_right.1 / grid_size).ceil() * grid_size;

        let mut x = start_x;
        while x <= end_x {
            let color = if x == 0.0 { axis_color } else { grid_color };
            let top = plane_to_screen(view, canvas_rect, (x, top_left.1));
            let bottom = plane_to_screen(view, canvas_rect, (x, bottom_right.1));
            painter.line_segment([top, bottom], egui::Stroke::new(1.0, color));
            x += grid_size;
        }

        let mut y = start_y;
        while y <= end_y {
            let color = if y == 0.0 { axis_color } else { grid_color };
            let left = plane_to_screen(view, canvas_rect, (top_left.0, y));
            let right = plane_to_screen(view, canvas_rect, (bottom_right.0, y));
            painter.line_segment([left, right], egui::Stroke::new(1.0, color));
            y += grid_size;
        }
    }
}
