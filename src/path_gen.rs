//! Text-to-curve path generation.
//!
//! This module converts text strings into polyline geometry using a fixed
//! 52-position rotary alphabet: each letter turns the drawing turtle by its
//! mapped angle and advances it one segment. Spaces advance without turning
//! and lift the pen; anything else is skipped.

use crate::constants::ALPHABET_POSITIONS;
use crate::types::{Bounds, DrawCommand, GeneratedPath, PathPoint};

/// Maps a letter to its turn angle in whole degrees.
///
/// Letters occupy the 26 even-indexed positions of a 52-position circle, so
/// letter index `i` maps to `round(2 * i * 360 / 52)` degrees. The lookup is
/// case-insensitive and total over A-Z.
///
/// # Arguments
///
/// * `c` - The character to map
///
/// # Returns
///
/// The turn angle in degrees, or `None` for anything outside A-Z.
pub fn letter_angle(c: char) -> Option<i32> {
    let upper = c.to_ascii_uppercase();
    if !upper.is_ascii_uppercase() {
        return None;
    }
    let index = upper as i32 - 'A' as i32;
    Some((f64::from(2 * index * 360) / f64::from(ALPHABET_POSITIONS)).round() as i32)
}

/// Advances one step from `pos` along `heading_deg`.
///
/// The vertical axis is inverted: increasing heading rotates
/// counter-clockwise in math convention but appears clockwise in the
/// downward-y display convention. This must not change or identical text
/// would stop producing identical shapes.
fn advance(pos: (f32, f32), heading_deg: f32, length: f32) -> (f32, f32) {
    let radians = heading_deg.to_radians();
    (
        pos.0 + length * radians.cos(),
        pos.1 - length * radians.sin(),
    )
}

/// Generates the curve geometry for a text string.
///
/// Pure and deterministic: identical `(text, segment_length)` inputs always
/// yield identical geometry. There are no error conditions; characters
/// outside A-Z and space are silently skipped.
///
/// The turtle starts at the origin with heading 0. A synthetic start point
/// (no source character) opens the point list and the draw sequence begins
/// with a move to the origin. Then, per character:
///
/// - space: keep the heading, advance one segment, emit a pen-up move;
/// - letter: add its angle to the cumulative heading, advance one segment
///   along the new heading, emit a pen-down line;
/// - anything else: no heading change, no point, no command.
///
/// # Arguments
///
/// * `text` - The source text, processed left to right
/// * `segment_length` - Step distance for every segment, in plane units
///
/// # Returns
///
/// The draw-command sequence, the emitted points, the final endpoint, and
/// the bounding box over all non-start points (collapsed to the origin when
/// the text has no valid characters).
pub fn generate(text: &str, segment_length: f32) -> GeneratedPath {
    let mut heading_deg = 0.0_f32;
    let mut pos = (0.0_f32, 0.0_f32);
    let mut commands = vec![DrawCommand::MoveTo(pos)];
    let mut points = vec![PathPoint {
        pos,
        ch: None,
        heading_deg,
        is_space: false,
    }];
    let mut bounds: Option<Bounds> = None;

    for ch in text.chars() {
        if ch == ' ' {
            // Pen-up: advance along the current heading without turning
            pos = advance(pos, heading_deg, segment_length);
            commands.push(DrawCommand::MoveTo(pos));
            points.push(PathPoint {
                pos,
                ch: Some(ch),
                heading_deg,
                is_space: true,
            });
        } else if let Some(angle) = letter_angle(ch) {
            heading_deg += angle as f32;
            pos = advance(pos, heading_deg, segment_length);
            commands.push(DrawCommand::LineTo(pos));
            points.push(PathPoint {
                pos,
                ch: Some(ch),
                heading_deg,
                is_space: false,
            });
        } else {
            continue;
        }
        match bounds.as_mut() {
            Some(b) => b.include(pos.0, pos.1),
            None => bounds = Some(Bounds::from_point(pos.0, pos.1)),
        }
    }

    GeneratedPath {
        commands,
        points,
        end_point: pos,
        bounds: bounds.unwrap_or_else(|| Bounds::from_point(0.0, 0.0)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn angles_match_rotary_positions() {
        assert_eq!(letter_angle('A'), Some(0));
        assert_eq!(letter_angle('a'), Some(0));
        assert_eq!(letter_angle('B'), Some(14));
        assert_eq!(letter_angle('Z'), Some(346));
        assert_eq!(letter_angle('z'), Some(346));
        for i in 0..26 {
            let c = (b'A' + i) as char;
            let expected = (f64::from(2 * i32::from(i) * 360) / 52.0).round() as i32;
            assert_eq!(letter_angle(c), Some(expected));
        }
    }

    #[test]
    fn angles_strictly_increase_within_one_period() {
        let mut previous = -1;
        for i in 0..26 {
            let angle = letter_angle((b'A' + i) as char).unwrap();
            assert!(angle > previous, "angle for index {i} did not increase");
            previous = angle;
        }
    }

    #[test]
    fn non_letters_have_no_angle() {
        for c in ['0', '!', 'ü', ' ', '\n', 'é'] {
            assert_eq!(letter_angle(c), None, "{c:?} should not map");
        }
    }

    #[test]
    fn single_a_draws_one_horizontal_segment() {
        let path = generate("A", 10.0);
        assert_eq!(path.points.len(), 2);
        assert!(close(path.end_point.0, 10.0));
        assert!(close(path.end_point.1, 0.0));
        assert_eq!(path.commands.len(), 2);
        assert!(matches!(path.commands[1], DrawCommand::LineTo(_)));
    }

    #[test]
    fn headings_accumulate_across_letters() {
        let path = generate("AZ", 10.0);
        // First segment at angle('A') = 0, second at angle('A') + angle('Z')
        assert!(close(path.points[1].heading_deg, 0.0));
        assert!(close(path.points[2].heading_deg, 346.0));
    }

    #[test]
    fn point_count_is_one_plus_valid_characters() {
        let cases = [
            ("", 0),
            ("A", 1),
            ("Hello World", 11),
            ("a1b2c3", 3),
            ("...!!!", 0),
            ("  ", 2),
            ("MiXeD cAsE", 10),
        ];
        for (text, valid) in cases {
            let path = generate(text, 5.0);
            assert_eq!(path.points.len(), 1 + valid, "text {text:?}");
        }
    }

    #[test]
    fn spaces_lift_the_pen_without_turning() {
        let path = generate("A A", 10.0);
        assert_eq!(path.points.len(), 4);
        assert!(path.points[2].is_space);
        assert!(matches!(path.commands[2], DrawCommand::MoveTo(_)));
        // Heading unchanged through the space, so all steps stay on the x axis
        assert!(close(path.points[2].pos.0, 20.0));
        assert!(close(path.points[3].pos.0, 30.0));
        assert!(close(path.points[3].pos.1, 0.0));
    }

    #[test]
    fn skipped_characters_leave_geometry_untouched() {
        let plain = generate("AB", 10.0);
        let noisy = generate("A!?1B", 10.0);
        assert_eq!(plain.points, noisy.points);
        assert_eq!(plain.commands, noisy.commands);
        assert_eq!(plain.bounds, noisy.bounds);
    }

    #[test]
    fn generation_is_deterministic() {
        let first = generate("The Quick Brown Fox", 7.0);
        let second = generate("The Quick Brown Fox", 7.0);
        assert_eq!(first, second);
    }

    #[test]
    fn empty_text_collapses_bounds_to_origin() {
        for text in ["", "123", "..."] {
            let path = generate(text, 10.0);
            assert_eq!(path.bounds, Bounds::from_point(0.0, 0.0));
            assert_eq!(path.end_point, (0.0, 0.0));
            assert_eq!(path.points.len(), 1);
            assert_eq!(path.commands.len(), 1);
        }
    }

    #[test]
    fn bounds_cover_emitted_points_only() {
        // "N" turns by 180 and walks to (-10, 0); the synthetic start point
        // at the origin is excluded, so the box collapses onto (-10, 0).
        assert_eq!(letter_angle('N'), Some(180));
        let path = generate("N", 10.0);
        assert!(close(path.bounds.min_x, -10.0));
        assert!(close(path.bounds.max_x, -10.0));
        assert!(path.bounds.width() >= 0.0);
        assert!(path.bounds.height() >= 0.0);
    }

    #[test]
    fn vertical_axis_is_inverted() {
        // angle('G') = round(12 * 360 / 52) = 83; close to straight "up",
        // which in display convention means negative y.
        assert_eq!(letter_angle('G'), Some(83));
        let path = generate("G", 10.0);
        assert!(path.end_point.1 < 0.0);
    }
}
