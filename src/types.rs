//! Core data types and structures for the wordtrace editor.
//!
//! This module defines the fundamental data structures used throughout the
//! application: layers, generated path geometry, draw commands, and bounds.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for layers.
pub type LayerId = Uuid;

/// Axis-aligned bounding box over plane coordinates.
///
/// Width and height are never negative; a box produced from a single point
/// has zero size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Smallest x coordinate covered by the box
    pub min_x: f32,
    /// Smallest y coordinate covered by the box
    pub min_y: f32,
    /// Largest x coordinate covered by the box
    pub max_x: f32,
    /// Largest y coordinate covered by the box
    pub max_y: f32,
}

impl Bounds {
    /// Creates a zero-size box at the given point.
    pub fn from_point(x: f32, y: f32) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    /// Grows the box to include the given point.
    pub fn include(&mut self, x: f32, y: f32) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    /// Returns the smallest box covering both `self` and `other`.
    pub fn union(self, other: Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Width of the box.
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Height of the box.
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Center point of the box as `(x, y)`.
    pub fn center(self) -> (f32, f32) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Returns the box shifted by the given offset.
    pub fn translated(self, dx: f32, dy: f32) -> Self {
        Self {
            min_x: self.min_x + dx,
            min_y: self.min_y + dy,
            max_x: self.max_x + dx,
            max_y: self.max_y + dy,
        }
    }
}

/// A single instruction in a generated path's draw sequence.
///
/// `MoveTo` lifts the pen (no visible stroke to the target point), `LineTo`
/// draws a visible segment from the previous point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    /// Reposition without drawing (path start and pen-up gaps)
    MoveTo((f32, f32)),
    /// Draw a visible segment to the target point
    LineTo((f32, f32)),
}

impl DrawCommand {
    /// The target point of this command.
    pub fn target(self) -> (f32, f32) {
        match self {
            DrawCommand::MoveTo(p) | DrawCommand::LineTo(p) => p,
        }
    }
}

/// A point emitted while generating a path, with its provenance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathPoint {
    /// Position in plane units, relative to the path's own origin
    pub pos: (f32, f32),
    /// Source character that produced this point; `None` for the synthetic
    /// start point. Original case is preserved for display.
    pub ch: Option<char>,
    /// Cumulative turtle heading in degrees at this point (unbounded)
    pub heading_deg: f32,
    /// Whether this point was produced by a space (pen-up gap)
    pub is_space: bool,
}

/// Geometry derived from a layer's text and segment length.
///
/// Coordinates are turtle-relative: the path always starts at the origin and
/// the layer's position offset is applied at render time only.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedPath {
    /// Draw sequence: one `MoveTo` for the start and after every space, one
    /// `LineTo` for every letter
    pub commands: Vec<DrawCommand>,
    /// All emitted points including the synthetic start point
    pub points: Vec<PathPoint>,
    /// Last emitted position; the origin if the text produced no points
    pub end_point: (f32, f32),
    /// Box over all non-start points; degenerates to the origin when the
    /// text contains no valid characters
    pub bounds: Bounds,
}

/// Cached geometry together with the inputs it was generated from.
#[derive(Debug, Clone)]
struct PathCache {
    text: String,
    segment_length: f32,
    path: GeneratedPath,
}

/// An independently configured text-to-curve instance.
///
/// Layers share one canvas; each carries its own position offset, color, and
/// styling. Geometry is cached and regenerated only when the text or segment
/// length changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer {
    /// Unique identifier for this layer
    pub id: LayerId,
    /// User-displayable name
    pub name: String,
    /// Source text converted into curve geometry
    pub text: String,
    /// Stroke color as sRGB bytes
    pub color: [u8; 3],
    /// Translation applied at render time, in plane units
    pub position: (f32, f32),
    /// Suppresses dragging when set
    pub locked: bool,
    /// Suppresses rendering and bounds contribution when cleared
    pub visible: bool,
    /// Uniform step distance for every segment, in plane units
    pub segment_length: f32,
    /// Memoized geometry keyed by `(text, segment_length)`
    #[serde(skip)]
    cache: Option<PathCache>,
}

impl Layer {
    /// Creates a new layer with the given name, text, and color.
    ///
    /// # Arguments
    ///
    /// * `name` - The display name for the layer
    /// * `text` - Initial source text
    /// * `color` - Stroke color as sRGB bytes
    ///
    /// # Returns
    ///
    /// A new visible, unlocked `Layer` at the origin with a unique ID and
    /// the default segment length.
    pub fn new(name: String, text: String, color: [u8; 3]) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            text,
            color,
            position: (0.0, 0.0),
            locked: false,
            visible: true,
            segment_length: crate::constants::DEFAULT_SEGMENT_LENGTH,
            cache: None,
        }
    }

    /// Returns this layer's generated path, regenerating it only when the
    /// text or segment length changed since the last call.
    ///
    /// Position, color, and flag changes never invalidate the cache.
    pub fn path(&mut self) -> &GeneratedPath {
        let stale = match &self.cache {
            Some(c) => c.text != self.text || c.segment_length != self.segment_length,
            None => true,
        };
        if stale {
            self.cache = Some(PathCache {
                text: self.text.clone(),
                segment_length: self.segment_length,
                path: crate::path_gen::generate(&self.text, self.segment_length),
            });
        }
        // The cache was filled above if it was stale
        &self.cache.as_ref().unwrap().path
    }

    /// Bounding box of this layer's path shifted by its position offset.
    pub fn translated_bounds(&mut self) -> Bounds {
        let (dx, dy) = self.position;
        self.path().bounds.translated(dx, dy)
    }

    /// Sets the segment length, clamped to the allowed range.
    pub fn set_segment_length(&mut self, length: f32) {
        self.segment_length = length.clamp(
            crate::constants::MIN_SEGMENT_LENGTH,
            crate::constants::MAX_SEGMENT_LENGTH,
        );
    }
}

/// The full set of layers composited on one canvas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Composition {
    /// Layers in render order (last is drawn topmost)
    pub layers: Vec<Layer>,
    /// Counter for generating unique default layer names
    pub layer_counter: u32,
}

impl Default for Composition {
    /// Creates a composition holding the single initial layer.
    fn default() -> Self {
        let mut composition = Self {
            layers: Vec::new(),
            layer_counter: 0,
        };
        let id = composition.add_layer();
        if let Some(layer) = composition.layer_mut(id) {
            layer.text = "HELLO WORLD".to_string();
        }
        composition
    }
}

impl Composition {
    /// Adds a new empty layer with a generated name and palette color.
    ///
    /// # Returns
    ///
    /// The ID of the newly created layer.
    pub fn add_layer(&mut self) -> LayerId {
        let palette = crate::constants::LAYER_PALETTE;
        let color = palette[self.layer_counter as usize % palette.len()];
        self.layer_counter += 1;
        let layer = Layer::new(format!("Layer {}", self.layer_counter), String::new(), color);
        let id = layer.id;
        log::debug!("added layer {} ({})", layer.name, id);
        self.layers.push(layer);
        id
    }

    /// Removes the given layer.
    ///
    /// Refused when it would leave the composition empty; at least one layer
    /// must always exist.
    ///
    /// # Returns
    ///
    /// `true` if the layer was removed.
    pub fn remove_layer(&mut self, id: LayerId) -> bool {
        if self.layers.len() <= 1 {
            return false;
        }
        let before = self.layers.len();
        self.layers.retain(|l| l.id != id);
        if self.layers.len() < before {
            log::debug!("removed layer {}", id);
            true
        } else {
            false
        }
    }

    /// Looks up a layer by ID.
    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    /// Looks up a layer by ID for mutation.
    pub fn layer_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| l.id == id)
    }

    /// Union of the translated bounds of all visible layers.
    ///
    /// # Returns
    ///
    /// `None` when no layer is visible.
    pub fn visible_bounds(&mut self) -> Option<Bounds> {
        let mut union: Option<Bounds> = None;
        for layer in self.layers.iter_mut().filter(|l| l.visible) {
            let bounds = layer.translated_bounds();
            union = Some(match union {
                Some(u) => u.union(bounds),
                None => bounds,
            });
        }
        union
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_union_and_translate() {
        let a = Bounds::from_point(0.0, 0.0);
        let mut b = Bounds::from_point(10.0, -5.0);
        b.include(20.0, 5.0);
        let u = a.union(b);
        assert_eq!(u.min_x, 0.0);
        assert_eq!(u.max_x, 20.0);
        assert_eq!(u.min_y, -5.0);
        assert_eq!(u.max_y, 5.0);
        let t = u.translated(-10.0, 2.5);
        assert_eq!(t.min_x, -10.0);
        assert_eq!(t.width(), u.width());
        assert_eq!(t.center(), (0.0, 2.5));
    }

    #[test]
    fn layer_cache_regenerates_only_on_input_change() {
        let mut layer = Layer::new("Test".into(), "AB".into(), [255, 0, 0]);
        let first = layer.path().clone();

        // Unrelated mutations must not change the cached geometry
        layer.position = (100.0, 100.0);
        layer.locked = true;
        assert_eq!(*layer.path(), first);

        // Text change regenerates
        layer.text.push('C');
        let grown = layer.path().clone();
        assert_eq!(grown.points.len(), first.points.len() + 1);

        // Segment length change regenerates
        layer.set_segment_length(20.0);
        assert_ne!(layer.path().end_point, grown.end_point);
    }

    #[test]
    fn segment_length_is_clamped() {
        let mut layer = Layer::new("Test".into(), String::new(), [0, 0, 0]);
        layer.set_segment_length(0.5);
        assert_eq!(layer.segment_length, crate::constants::MIN_SEGMENT_LENGTH);
        layer.set_segment_length(500.0);
        assert_eq!(layer.segment_length, crate::constants::MAX_SEGMENT_LENGTH);
    }

    #[test]
    fn translated_bounds_follow_position() {
        let mut layer = Layer::new("Test".into(), "A".into(), [0, 0, 0]);
        layer.position = (5.0, 7.0);
        let bounds = layer.translated_bounds();
        // "A" draws a single segment to (10, 0) before translation
        assert_eq!(bounds.min_x, 15.0);
        assert_eq!(bounds.min_y, 7.0);
    }

    #[test]
    fn default_composition_has_one_layer() {
        let composition = Composition::default();
        assert_eq!(composition.layers.len(), 1);
        assert_eq!(composition.layers[0].text, "HELLO WORLD");
    }

    #[test]
    fn last_layer_cannot_be_removed() {
        let mut composition = Composition::default();
        let only = composition.layers[0].id;
        assert!(!composition.remove_layer(only));
        assert_eq!(composition.layers.len(), 1);

        let second = composition.add_layer();
        assert!(composition.remove_layer(second));
        assert!(!composition.remove_layer(only));
    }

    #[test]
    fn visible_bounds_skips_hidden_layers() {
        let mut composition = Composition::default();
        let second = composition.add_layer();
        if let Some(layer) = composition.layer_mut(second) {
            layer.text = "A".into();
            layer.position = (1000.0, 0.0);
        }
        let with_both = composition.visible_bounds().unwrap();
        assert!(with_both.max_x >= 1000.0);

        composition.layer_mut(second).unwrap().visible = false;
        let without = composition.visible_bounds().unwrap();
        assert!(without.max_x < 1000.0);

        for layer in &mut composition.layers {
            layer.visible = false;
        }
        assert!(composition.visible_bounds().is_none());
    }
}
