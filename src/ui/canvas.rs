//! Camera and canvas interaction functionality.
//!
//! This module owns the coordinate transforms between screen pixels and
//! plane units, the auto-fit framing computation, and the pointer state
//! machine that routes input into panning the camera or dragging a layer.

use super::state::{InteractionMode, ViewRect, WordtraceApp};
use crate::constants;
use crate::types::*;
use eframe::egui;

/// Uniform scale from plane units to screen pixels.
///
/// The view rectangle is fitted inside the canvas preserving aspect ratio,
/// so the scale is the smaller of the per-axis ratios and the remaining
/// space letterboxes.
///
/// # Arguments
///
/// * `view` - The current view rectangle in plane units
/// * `canvas` - The rendered canvas rectangle in screen pixels
pub fn view_scale(view: ViewRect, canvas: egui::Rect) -> f32 {
    (canvas.width() / view.w).min(canvas.height() / view.h)
}

/// Converts a plane position to screen pixels.
///
/// The view rectangle's center always maps to the canvas center, which
/// keeps the mapping well-defined under letterboxing.
pub fn plane_to_screen(view: ViewRect, canvas: egui::Rect, pos: (f32, f32)) -> egui::Pos2 {
    let scale = view_scale(view, canvas);
    let (cx, cy) = view.center();
    let canvas_center = canvas.center();
    egui::pos2(
        canvas_center.x + (pos.0 - cx) * scale,
        canvas_center.y + (pos.1 - cy) * scale,
    )
}

/// Converts a screen-pixel position to plane units.
pub fn screen_to_plane(view: ViewRect, canvas: egui::Rect, pos: egui::Pos2) -> (f32, f32) {
    let scale = view_scale(view, canvas);
    let (cx, cy) = view.center();
    let canvas_center = canvas.center();
    (
        cx + (pos.x - canvas_center.x) / scale,
        cy + (pos.y - canvas_center.y) / scale,
    )
}

/// Converts a pixel displacement to a plane-unit displacement.
///
/// Both layer dragging and camera panning go through this one conversion,
/// so 1:1 pixel tracking holds for both even under letterboxed viewports.
pub fn screen_delta_to_plane(view: ViewRect, canvas: egui::Rect, delta: egui::Vec2) -> (f32, f32) {
    let scale = view_scale(view, canvas);
    (delta.x / scale, delta.y / scale)
}

/// Computes the auto-fit view rectangle for the given content bounds.
///
/// Padding on each axis is the larger of [constants::FIT_MIN_PADDING] or
/// [constants::FIT_PADDING_RATIO] of that axis's extent; the padded size is
/// floored at [constants::MIN_VIEW_SIZE] so empty or single-point content
/// still gets a usable framing.
///
/// # Arguments
///
/// * `content` - Union of all visible layers' bounds, or `None` when there
///   is nothing visible
pub fn fit_view(content: Option<Bounds>) -> ViewRect {
    let bounds = content.unwrap_or_else(|| Bounds::from_point(0.0, 0.0));
    let pad_x = constants::FIT_MIN_PADDING.max(constants::FIT_PADDING_RATIO * bounds.width());
    let pad_y = constants::FIT_MIN_PADDING.max(constants::FIT_PADDING_RATIO * bounds.height());
    let w = (bounds.width() + 2.0 * pad_x).max(constants::MIN_VIEW_SIZE);
    let h = (bounds.height() + 2.0 * pad_y).max(constants::MIN_VIEW_SIZE);
    ViewRect::centered_on(bounds.center(), w, h)
}

/// Distance from a point to a line segment, all in plane units.
///
/// Uses vector projection clamped to the segment endpoints.
fn point_to_segment_distance(point: (f32, f32), start: (f32, f32), end: (f32, f32)) -> f32 {
    let seg = (end.0 - start.0, end.1 - start.1);
    let to_point = (point.0 - start.0, point.1 - start.1);
    let len_sq = seg.0 * seg.0 + seg.1 * seg.1;

    if len_sq < 0.0001 {
        // Segment is essentially a point
        return (to_point.0 * to_point.0 + to_point.1 * to_point.1).sqrt();
    }

    let t = ((to_point.0 * seg.0 + to_point.1 * seg.1) / len_sq).clamp(0.0, 1.0);
    let proj = (start.0 + seg.0 * t, start.1 + seg.1 * t);
    let d = (point.0 - proj.0, point.1 - proj.1);
    (d.0 * d.0 + d.1 * d.1).sqrt()
}

impl WordtraceApp {
    /// Handles scroll-wheel zooming over the canvas.
    ///
    /// Wheel-up shrinks the view rectangle (zoom in), wheel-down grows it,
    /// both about the rectangle's fixed center. Any zoom disables auto-fit.
    ///
    /// # Arguments
    ///
    /// * `ui` - The egui UI context
    /// * `response` - The response from the canvas widget
    pub fn handle_canvas_zoom(&mut self, ui: &mut egui::Ui, response: &egui::Response) {
        let scroll_delta = ui.input(|i| i.smooth_scroll_delta.y);
        if scroll_delta == 0.0 {
            return;
        }

        // Only zoom when the cursor is over the canvas
        let hover = ui.input(|i| i.pointer.hover_pos());
        if !hover.is_some_and(|pos| response.rect.contains(pos)) {
            return;
        }

        let factor = if scroll_delta > 0.0 {
            constants::WHEEL_ZOOM_IN
        } else {
            constants::WHEEL_ZOOM_OUT
        };
        self.zoom_by(factor);
    }

    /// Scales the view rectangle about its center and disables auto-fit.
    ///
    /// # Arguments
    ///
    /// * `factor` - Size multiplier; below 1 zooms in, above 1 zooms out
    pub fn zoom_by(&mut self, factor: f32) {
        self.canvas.auto_fit = false;
        self.canvas.view = self.canvas.view.scaled_about_center(factor);
    }

    /// Re-enables auto-fit and immediately reframes the content.
    pub fn enable_auto_fit(&mut self) {
        self.canvas.auto_fit = true;
        self.apply_auto_fit();
    }

    /// Recomputes the view rectangle from content bounds while auto-fit is
    /// enabled; does nothing once the user has panned or zoomed manually.
    pub fn apply_auto_fit(&mut self) {
        if !self.canvas.auto_fit {
            return;
        }
        self.canvas.view = fit_view(self.composition.visible_bounds());
    }

    /// Drives the pointer interaction state machine for one frame.
    ///
    /// The three modes are mutually exclusive: panning only ever mutates the
    /// view rectangle, dragging only ever mutates one layer's position, and
    /// releasing every button returns to idle unconditionally.
    ///
    /// # Arguments
    ///
    /// * `ui` - The egui UI context
    /// * `response` - The response from the canvas widget
    pub fn handle_canvas_interaction(&mut self, ui: &mut egui::Ui, response: &egui::Response) {
        let canvas_rect = response.rect;
        let (primary, middle, secondary, command) = ui.input(|i| {
            (
                i.pointer.primary_down(),
                i.pointer.middle_down(),
                i.pointer.secondary_down(),
                i.modifiers.command,
            )
        });
        let any_button = primary || middle || secondary;
        let pointer_pos = response.interact_pointer_pos();

        match self.interaction.mode {
            InteractionMode::Idle => {
                if let Some(pos) = pointer_pos {
                    let pan_trigger = middle || secondary || (primary && command);
                    if pan_trigger {
                        self.interaction.mode = InteractionMode::Panning {
                            start_pos: pos,
                            view_at_start: self.canvas.view,
                        };
                        self.canvas.auto_fit = false;
                    } else if primary {
                        let plane_pos = screen_to_plane(self.canvas.view, canvas_rect, pos);
                        let hit_dist =
                            constants::HIT_BAND_PX / view_scale(self.canvas.view, canvas_rect);
                        if let Some((id, locked)) = self.find_layer_at(plane_pos, hit_dist) {
                            self.interaction.selected_layer = Some(id);
                            // A press on a locked layer is ignored entirely
                            if !locked {
                                self.interaction.mode =
                                    InteractionMode::DraggingLayer { id, last_pos: pos };
                            }
                        }
                    }
                }
            }
            InteractionMode::Panning {
                start_pos,
                view_at_start,
            } => {
                if !any_button {
                    self.interaction.mode = InteractionMode::Idle;
                } else if let Some(pos) = pointer_pos {
                    // Displacement is converted with the scale captured at
                    // pan start; the rectangle size never changes mid-pan
                    let (dx, dy) =
                        screen_delta_to_plane(view_at_start, canvas_rect, pos - start_pos);
                    self.canvas.view.x = view_at_start.x - dx;
                    self.canvas.view.y = view_at_start.y - dy;
                }
            }
            InteractionMode::DraggingLayer { id, last_pos } => {
                if !primary {
                    self.interaction.mode = InteractionMode::Idle;
                } else if let Some(pos) = pointer_pos {
                    // Incremental deltas: the anchor resets to the new
                    // pointer position after every move
                    let (dx, dy) =
                        screen_delta_to_plane(self.canvas.view, canvas_rect, pos - last_pos);
                    if let Some(layer) = self.composition.layer_mut(id) {
                        layer.position.0 += dx;
                        layer.position.1 += dy;
                    }
                    self.interaction.mode = InteractionMode::DraggingLayer { id, last_pos: pos };
                }
            }
        }

        self.update_cursor_hint(ui, response, command);
    }

    /// Sets the cursor icon reflecting the current interaction affordance.
    fn update_cursor_hint(&mut self, ui: &egui::Ui, response: &egui::Response, command: bool) {
        let icon = match self.interaction.mode {
            InteractionMode::Panning { .. } | InteractionMode::DraggingLayer { .. } => {
                egui::CursorIcon::Grabbing
            }
            InteractionMode::Idle => {
                let hover = ui.input(|i| i.pointer.hover_pos());
                match hover.filter(|pos| response.rect.contains(*pos)) {
                    Some(_) if command => egui::CursorIcon::Grab,
                    Some(pos) => {
                        let plane_pos = screen_to_plane(self.canvas.view, response.rect, pos);
                        let hit_dist =
                            constants::HIT_BAND_PX / view_scale(self.canvas.view, response.rect);
                        match self.find_layer_at(plane_pos, hit_dist) {
                            Some((_, false)) => egui::CursorIcon::Grab,
                            _ => egui::CursorIcon::Default,
                        }
                    }
                    None => egui::CursorIcon::Default,
                }
            }
        };
        ui.ctx().set_cursor_icon(icon);
    }

    /// Finds the topmost visible layer whose stroke passes within
    /// `hit_dist` of the given plane position.
    ///
    /// The hit band is wider than the visible stroke to ease selection of
    /// thin lines. Pen-up gaps are not hittable.
    ///
    /// # Arguments
    ///
    /// * `plane_pos` - Query position in plane units
    /// * `hit_dist` - Hit band radius in plane units
    ///
    /// # Returns
    ///
    /// The layer's ID and lock flag, or `None` if nothing is hit.
    pub fn find_layer_at(
        &mut self,
        plane_pos: (f32, f32),
        hit_dist: f32,
    ) -> Option<(LayerId, bool)> {
        // Last-rendered layer is topmost, so scan in reverse
        for layer in self.composition.layers.iter_mut().rev() {
            if !layer.visible {
                continue;
            }
            let local = (
                plane_pos.0 - layer.position.0,
                plane_pos.1 - layer.position.1,
            );
            let id = layer.id;
            let locked = layer.locked;
            let points = &layer.path().points;
            for i in 1..points.len() {
                if points[i].is_space {
                    continue;
                }
                let d = point_to_segment_distance(local, points[i - 1].pos, points[i].pos);
                if d < hit_dist {
                    return Some((id, locked));
                }
            }
        }
        None
    }
}
