//! Automatic loop-growth controller.
//!
//! While a loop runs, the active layer's text grows character by character,
//! drawn cyclically from the text captured when the loop started. After each
//! append the regenerated path's endpoint is checked against the origin;
//! once it returns close enough the loop stops and the layer is recentered.

use crate::constants;
use crate::types::{Composition, LayerId};

/// A running loop attached to one layer.
#[derive(Debug, Clone)]
struct LoopTask {
    /// Layer whose text is being grown
    layer: LayerId,
    /// Text at loop start, cycled through for appends
    seed: Vec<char>,
    /// Index of the next seed character to append
    cursor: usize,
    /// Time at which the next append is due, in seconds
    next_tick: f64,
}

/// Grows one layer's text on a fixed cadence until its path closes.
///
/// At most one loop runs per application instance: starting is refused while
/// a task is active, and `stop` is idempotent. The controller holds no timer
/// of its own; the frame loop feeds it the current time.
#[derive(Debug, Default)]
pub struct LoopController {
    active: Option<LoopTask>,
}

impl LoopController {
    /// Whether a loop is currently running.
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Whether a loop is currently growing the given layer.
    ///
    /// Text editing for that layer is blocked while this returns `true` to
    /// avoid racing manual edits against timer-driven appends.
    pub fn is_looping_layer(&self, id: LayerId) -> bool {
        self.active.as_ref().is_some_and(|task| task.layer == id)
    }

    /// Starts a loop on the given layer.
    ///
    /// Refused when a loop is already running or when the layer's text is
    /// empty (there would be nothing to cycle through).
    ///
    /// # Arguments
    ///
    /// * `id` - Layer to grow
    /// * `seed` - The layer's text at this moment
    /// * `now` - Current time in seconds
    ///
    /// # Returns
    ///
    /// `true` if the loop was started.
    pub fn start(&mut self, id: LayerId, seed: &str, now: f64) -> bool {
        if self.active.is_some() || seed.is_empty() {
            return false;
        }
        log::info!("loop started on layer {} with seed {:?}", id, seed);
        self.active = Some(LoopTask {
            layer: id,
            seed: seed.chars().collect(),
            cursor: 0,
            next_tick: now + constants::LOOP_TICK_SECS,
        });
        true
    }

    /// Stops the running loop, if any. Stopping twice is a no-op.
    pub fn stop(&mut self) {
        if self.active.take().is_some() {
            log::info!("loop stopped");
        }
    }

    /// Advances the loop by as many ticks as have elapsed.
    ///
    /// Each tick appends the next seed character to the layer's live text
    /// (which has already grown past the seed), regenerates the path through
    /// the layer's cache, and checks the stop conditions in order:
    ///
    /// 1. the text is longer than `max(4 * seed_len, 40)` and the endpoint
    ///    is within half a plane unit of the origin: the curve closed, so
    ///    the loop stops and the layer is recentered on the origin;
    /// 2. the text exceeds the hard safety ceiling: the loop stops without
    ///    recentering.
    ///
    /// The loop also stops if the layer was deleted out from under it.
    ///
    /// # Arguments
    ///
    /// * `now` - Current time in seconds
    /// * `composition` - The live layer set
    ///
    /// # Returns
    ///
    /// `true` while the loop is still running.
    pub fn tick(&mut self, now: f64, composition: &mut Composition) -> bool {
        while let Some(task) = self.active.as_mut() {
            if now < task.next_tick {
                return true;
            }
            task.next_tick += constants::LOOP_TICK_SECS;

            let ch = task.seed[task.cursor % task.seed.len()];
            task.cursor += 1;
            let seed_len = task.seed.len();
            let layer_id = task.layer;

            let Some(layer) = composition.layer_mut(layer_id) else {
                self.stop();
                return false;
            };
            layer.text.push(ch);
            let length = layer.text.chars().count();
            let (ex, ey) = layer.path().end_point;
            let distance = (ex * ex + ey * ey).sqrt();

            let closure_floor = (constants::LOOP_SEED_FACTOR * seed_len)
                .max(constants::LOOP_MIN_LENGTH);
            if length > closure_floor && distance < constants::LOOP_CLOSE_DISTANCE {
                // Closed loop found: recenter so the curve's box sits on
                // the origin
                let center = layer.path().bounds.center();
                layer.position = (-center.0, -center.1);
                log::info!(
                    "closed loop found after {} characters (endpoint distance {:.3})",
                    length,
                    distance
                );
                self.stop();
                return false;
            }
            if length > constants::LOOP_MAX_LENGTH {
                log::warn!("loop hit the {} character ceiling", constants::LOOP_MAX_LENGTH);
                self.stop();
                return false;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::LOOP_TICK_SECS;

    fn composition_with_text(text: &str) -> (Composition, LayerId) {
        let mut composition = Composition::default();
        let id = composition.layers[0].id;
        composition.layers[0].text = text.to_string();
        (composition, id)
    }

    /// Advances time far enough for `n` appends, one per call.
    ///
    /// Probe times sit half a tick past each boundary so rounding in the
    /// accumulated tick schedule cannot skip an append.
    fn run_ticks(looper: &mut LoopController, composition: &mut Composition, n: usize) -> bool {
        let mut running = looper.is_running();
        for step in 1..=n {
            if !running {
                break;
            }
            let now = 1.0 + (step as f64 + 0.5) * LOOP_TICK_SECS;
            running = looper.tick(now, composition);
        }
        running
    }

    #[test]
    fn start_refuses_empty_seed() {
        let (composition, id) = composition_with_text("");
        let _ = composition;
        let mut looper = LoopController::default();
        assert!(!looper.start(id, "", 0.0));
        assert!(!looper.is_running());
    }

    #[test]
    fn only_one_loop_at_a_time() {
        let (_, id) = composition_with_text("AB");
        let mut looper = LoopController::default();
        assert!(looper.start(id, "AB", 0.0));
        assert!(!looper.start(id, "AB", 0.0));
        assert!(looper.is_looping_layer(id));
    }

    #[test]
    fn stop_is_idempotent() {
        let (_, id) = composition_with_text("AB");
        let mut looper = LoopController::default();
        assert!(looper.start(id, "AB", 0.0));
        looper.stop();
        looper.stop();
        assert!(!looper.is_running());
        // A new loop may start after stopping
        assert!(looper.start(id, "AB", 0.0));
    }

    #[test]
    fn ticks_append_seed_cyclically() {
        let (mut composition, id) = composition_with_text("AB");
        let mut looper = LoopController::default();
        assert!(looper.start(id, "AB", 1.0));

        assert!(run_ticks(&mut looper, &mut composition, 5));
        assert_eq!(composition.layer(id).unwrap().text, "ABABABA");
    }

    #[test]
    fn no_ticks_before_the_cadence_elapses() {
        let (mut composition, id) = composition_with_text("AB");
        let mut looper = LoopController::default();
        assert!(looper.start(id, "AB", 1.0));

        assert!(looper.tick(1.0 + LOOP_TICK_SECS / 2.0, &mut composition));
        assert_eq!(composition.layer(id).unwrap().text, "AB");
    }

    #[test]
    fn short_seed_still_waits_for_minimum_length() {
        // With a two-character seed the closure floor is max(8, 40) = 40,
        // so nothing can stop the loop within the first 30 appends
        let (mut composition, id) = composition_with_text("AB");
        let mut looper = LoopController::default();
        assert!(looper.start(id, "AB", 1.0));

        assert!(run_ticks(&mut looper, &mut composition, 30));
        assert_eq!(composition.layer(id).unwrap().text.chars().count(), 32);
        assert_eq!(composition.layer(id).unwrap().position, (0.0, 0.0));
    }

    #[test]
    fn closure_cannot_trigger_before_minimum_length() {
        // "N" alternates heading 180/360, so the endpoint passes through
        // the origin every second append; the length floor must still hold
        // the loop open until the text exceeds max(4 * 1, 40) = 40.
        let (mut composition, id) = composition_with_text("N");
        let mut looper = LoopController::default();
        assert!(looper.start(id, "N", 1.0));

        let mut appends = 0;
        for step in 1..200 {
            if !looper.tick(1.0 + step as f64 * LOOP_TICK_SECS, &mut composition) {
                appends = composition.layer(id).unwrap().text.chars().count();
                break;
            }
        }
        assert!(appends > 40, "loop closed at {appends} characters");
    }

    #[test]
    fn closed_loop_recenters_the_layer() {
        let (mut composition, id) = composition_with_text("N");
        composition.layer_mut(id).unwrap().position = (500.0, -300.0);
        let mut looper = LoopController::default();
        assert!(looper.start(id, "N", 1.0));

        assert!(!run_ticks(&mut looper, &mut composition, 200));

        let layer = composition.layer_mut(id).unwrap();
        let bounds = layer.translated_bounds();
        let (cx, cy) = bounds.center();
        assert!(cx.abs() < 1e-3, "bounds center x = {cx}");
        assert!(cy.abs() < 1e-3, "bounds center y = {cy}");
    }

    #[test]
    fn runaway_loop_stops_at_the_ceiling() {
        // "AA" never returns to the origin: every 'A' keeps heading 0 and
        // walks further along the x axis
        let (mut composition, id) = composition_with_text("AA");
        let mut looper = LoopController::default();
        assert!(looper.start(id, "AA", 1.0));

        let mut step = 0_usize;
        loop {
            step += 1;
            if !looper.tick(1.0 + step as f64 * LOOP_TICK_SECS, &mut composition) {
                break;
            }
            assert!(step < 20_000, "loop failed to stop");
        }
        let length = composition.layer(id).unwrap().text.chars().count();
        assert!(length > constants::LOOP_MAX_LENGTH);
        assert!(length <= constants::LOOP_MAX_LENGTH + 1);
        // No recentering on a safety stop
        assert_eq!(composition.layer(id).unwrap().position, (0.0, 0.0));
    }

    #[test]
    fn deleting_the_layer_stops_the_loop() {
        let (mut composition, id) = composition_with_text("AB");
        composition.add_layer();
        let mut looper = LoopController::default();
        assert!(looper.start(id, "AB", 1.0));
        assert!(composition.remove_layer(id));
        assert!(!looper.tick(2.0, &mut composition));
        assert!(!looper.is_running());
    }
}
