use bevy::prelude::*;

use crate::SimSet;

pub struct ClockPlugin;

impl Plugin for ClockPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimClock>()
            .configure_sets(Update, (SimSet::Tick, SimSet::Update).chain())
            .add_systems(
                Update,
                (speed_controls, tick_clock).chain().in_set(SimSet::Tick),
            );
    }
}

/// Monotonic simulation clock. Raw engine time goes in, scaled simulation
/// time and a per-frame delta come out. The elapsed value is the only time
/// source consumed by orbital motion.
#[derive(Debug, Resource)]
pub struct SimClock {
    elapsed: f64,
    delta: f64,
    last_raw: Option<f64>,
    speed: f64,
    paused: bool,
}

impl Default for SimClock {
    fn default() -> Self {
        Self {
            elapsed: 0.0,
            delta: 0.0,
            last_raw: None,
            speed: 1.0,
            paused: false,
        }
    }
}

impl SimClock {
    pub const MIN_SPEED: f64 = 1.0 / 64.0;
    pub const MAX_SPEED: f64 = 64.0;

    /// Advances the clock to the raw sample `raw` (seconds) and returns
    /// `(elapsed, delta)` in simulation seconds. The first sample yields a
    /// zero delta. Backwards and non-finite samples are treated as a
    /// stalled clock: the delta is zero and `elapsed` does not move.
    pub fn tick(&mut self, raw: f64) -> (f64, f64) {
        if !raw.is_finite() {
            self.delta = 0.0;
            return (self.elapsed, 0.0);
        }
        let raw_delta = match self.last_raw {
            Some(last) => (raw - last).max(0.0),
            None => 0.0,
        };
        self.last_raw = Some(raw);
        self.delta = if self.paused { 0.0 } else { raw_delta * self.speed };
        self.elapsed += self.delta;
        (self.elapsed, self.delta)
    }

    /// Cumulative simulation time in seconds.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Simulation time advanced by the most recent tick.
    pub fn delta(&self) -> f64 {
        self.delta
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed.clamp(Self::MIN_SPEED, Self::MAX_SPEED);
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }
}

fn tick_clock(time: Res<Time<Virtual>>, mut clock: ResMut<SimClock>) {
    clock.tick(time.elapsed_secs_f64());
}

fn speed_controls(keyboard: Res<ButtonInput<KeyCode>>, mut clock: ResMut<SimClock>) {
    if keyboard.just_pressed(KeyCode::Space) {
        clock.toggle_pause();
        info!(
            "Simulation {}",
            if clock.is_paused() { "paused" } else { "resumed" }
        );
    }
    if keyboard.just_pressed(KeyCode::Equal) {
        let speed = clock.speed() * 2.0;
        clock.set_speed(speed);
        info!("Simulation speed x{}", clock.speed());
    }
    if keyboard.just_pressed(KeyCode::Minus) {
        let speed = clock.speed() / 2.0;
        clock.set_speed(speed);
        info!("Simulation speed x{}", clock.speed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn first_tick_yields_zero_delta() {
        let mut clock = SimClock::default();
        let (elapsed, delta) = clock.tick(123.5);
        assert_eq!(elapsed, 0.0);
        assert_eq!(delta, 0.0);
    }

    #[test]
    fn deltas_accumulate_into_elapsed() {
        let mut clock = SimClock::default();
        clock.tick(1.0);
        let (elapsed, delta) = clock.tick(1.25);
        assert_abs_diff_eq!(delta, 0.25);
        assert_abs_diff_eq!(elapsed, 0.25);
        let (elapsed, delta) = clock.tick(2.0);
        assert_abs_diff_eq!(delta, 0.75);
        assert_abs_diff_eq!(elapsed, 1.0);
    }

    #[test]
    fn backwards_samples_do_not_rewind() {
        let mut clock = SimClock::default();
        clock.tick(5.0);
        clock.tick(6.0);
        let (elapsed, delta) = clock.tick(4.0);
        assert_eq!(delta, 0.0);
        assert_abs_diff_eq!(elapsed, 1.0);
    }

    #[test]
    fn non_finite_samples_are_ignored() {
        let mut clock = SimClock::default();
        clock.tick(1.0);
        clock.tick(2.0);
        let (elapsed, delta) = clock.tick(f64::NAN);
        assert_eq!(delta, 0.0);
        assert_abs_diff_eq!(elapsed, 1.0);
        let (elapsed, _) = clock.tick(3.0);
        assert_abs_diff_eq!(elapsed, 2.0);
    }

    #[test]
    fn pausing_freezes_elapsed_time() {
        let mut clock = SimClock::default();
        clock.tick(0.0);
        clock.tick(1.0);
        clock.toggle_pause();
        let (elapsed, delta) = clock.tick(10.0);
        assert_eq!(delta, 0.0);
        assert_abs_diff_eq!(elapsed, 1.0);
        clock.toggle_pause();
        let (_, delta) = clock.tick(10.5);
        assert_abs_diff_eq!(delta, 0.5);
    }

    #[test]
    fn speed_scales_deltas_and_clamps() {
        let mut clock = SimClock::default();
        clock.set_speed(4.0);
        clock.tick(0.0);
        let (elapsed, delta) = clock.tick(1.0);
        assert_abs_diff_eq!(delta, 4.0);
        assert_abs_diff_eq!(elapsed, 4.0);
        clock.set_speed(1.0e9);
        assert_eq!(clock.speed(), SimClock::MAX_SPEED);
        clock.set_speed(0.0);
        assert_eq!(clock.speed(), SimClock::MIN_SPEED);
    }

    #[test]
    fn elapsed_never_decreases() {
        let mut clock = SimClock::default();
        let samples = [0.0, 0.5, 0.4, f64::INFINITY, 1.5, 1.5, 2.0];
        let mut previous = 0.0;
        for raw in samples {
            let (elapsed, delta) = clock.tick(raw);
            assert!(delta >= 0.0);
            assert!(elapsed >= previous);
            previous = elapsed;
        }
    }
}
