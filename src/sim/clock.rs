use std::f64::consts::TAU;
use std::sync::Arc;

use glam::DVec3;
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};

use super::body::CelestialBody;
use super::registry::Registry;

/// Gets the position of a body at the given time, in scene units.
///
/// Orbits are exact circles in the x–z plane, starting on the +x axis
/// at `time == 0`. The star stays at the origin.
pub fn position_of(body: &CelestialBody, time: f64) -> DVec3 {
    // The registry guarantees a non-zero period for everything but the star.
    if body.is_star() {
        return DVec3::ZERO;
    }
    let angle = TAU * time / body.orbital_period;
    DVec3::new(
        body.orbital_radius * angle.cos(),
        0.0,
        body.orbital_radius * angle.sin(),
    )
}

/// Body positions keyed by name, in registry order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Positions(Vec<(String, DVec3)>);

impl Positions {
    pub fn get(&self, name: &str) -> Option<DVec3> {
        self.0.iter().find(|(n, _)| n == name).map(|&(_, p)| p)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, DVec3)> {
        self.0.iter().map(|(n, p)| (n.as_str(), *p))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, DVec3)> for Positions {
    fn from_iter<T: IntoIterator<Item = (String, DVec3)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Serializes a position as `{"x": .., "y": .., "z": ..}`.
#[derive(Clone, Copy, Debug)]
pub struct PositionJson(pub DVec3);

impl Serialize for PositionJson {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Position", 3)?;
        s.serialize_field("x", &self.0.x)?;
        s.serialize_field("y", &self.0.y)?;
        s.serialize_field("z", &self.0.z)?;
        s.end()
    }
}

impl Serialize for Positions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, pos) in &self.0 {
            map.serialize_entry(name, &PositionJson(*pos))?;
        }
        map.end()
    }
}

/// Tunables for a new clock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClockSettings {
    /// Default advance of one tick, in days, before scaling.
    pub step_size: f64,
    /// Multiplier applied to every advance.
    pub time_scale: f64,
}

impl Default for ClockSettings {
    fn default() -> Self {
        Self {
            step_size: 0.016,
            time_scale: 1.0,
        }
    }
}

/// A read-only view of the clock at one instant.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClockSnapshot {
    pub time: f64,
    pub paused: bool,
    pub time_scale: f64,
    pub positions: Positions,
}

impl ClockSnapshot {
    /// Rounds `time` to hundredths of a day for display to clients.
    pub fn rounded(mut self) -> Self {
        self.time = (self.time * 100.0).round() / 100.0;
        self
    }
}

/// The simulation clock driving every orbit.
#[derive(Clone, Debug)]
pub struct OrbitClock {
    registry: Arc<Registry>,

    /// The time elapsed in the simulation, in days.
    time: f64,
    paused: bool,
    time_scale: f64,
    step_size: f64,
}

fn is_valid_advance(dt: f64) -> bool {
    dt >= 0.0 && dt.is_finite()
}

impl OrbitClock {
    /// Creates a clock at time zero. An invalid step size falls back to the default.
    pub fn new(registry: Arc<Registry>, settings: ClockSettings) -> Self {
        let step_size = if is_valid_advance(settings.step_size) {
            settings.step_size
        } else {
            tracing::warn!(step_size = settings.step_size, "invalid step size, using the default");
            ClockSettings::default().step_size
        };
        let mut clock = Self {
            registry,
            time: 0.0,
            paused: false,
            time_scale: 1.0,
            step_size,
        };
        clock.set_time_scale(settings.time_scale);
        clock
    }

    #[inline]
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    #[inline]
    pub fn time(&self) -> f64 {
        self.time
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[inline]
    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    #[inline]
    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    /// Advances the clock by `dt * time_scale` unless paused.
    ///
    /// A negative or non-finite `dt` is ignored, so time never runs backwards.
    /// Returns the positions after the advance.
    pub fn tick(&mut self, dt: f64) -> Positions {
        if !is_valid_advance(dt) {
            tracing::debug!(dt, "ignoring invalid tick length");
        } else if !self.paused {
            self.time += dt * self.time_scale;
        }
        self.positions()
    }

    /// Advances by one default step.
    pub fn step(&mut self) -> Positions {
        self.tick(self.step_size)
    }

    pub fn pause(&mut self) -> bool {
        self.paused = true;
        self.paused
    }

    pub fn resume(&mut self) -> bool {
        self.paused = false;
        self.paused
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    /// Rewinds to time zero and unpauses. The time scale is kept.
    pub fn reset(&mut self) -> Positions {
        self.time = 0.0;
        self.paused = false;
        self.positions()
    }

    /// Replaces the time scale if `scale` is positive and finite.
    ///
    /// Returns the time scale in effect afterwards.
    pub fn set_time_scale(&mut self, scale: f64) -> f64 {
        if scale > 0.0 && scale.is_finite() {
            self.time_scale = scale;
        } else {
            tracing::debug!(scale, "ignoring non-positive time scale");
        }
        self.time_scale
    }

    pub fn positions(&self) -> Positions {
        self.registry.positions_at(self.time)
    }

    pub fn position(&self, name: &str) -> Option<DVec3> {
        self.registry.position_at(name, self.time)
    }

    pub fn snapshot(&self) -> ClockSnapshot {
        ClockSnapshot {
            time: self.time,
            paused: self.paused,
            time_scale: self.time_scale,
            positions: self.positions(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::solar_system;
    use approx::assert_relative_eq;

    fn clock() -> OrbitClock {
        OrbitClock::new(
            Arc::new(solar_system()),
            ClockSettings {
                step_size: 0.5,
                time_scale: 1.0,
            },
        )
    }

    #[test]
    fn orbiting_bodies_stay_on_their_circle() {
        let registry = solar_system();
        for body in registry.all().iter().filter(|b| !b.is_star()) {
            for t in [0.0, 1.0, 17.3, 365.0, 1e4, -52.0] {
                let p = position_of(body, t);
                assert_relative_eq!(p.length(), body.orbital_radius, max_relative = 1e-12);
                assert_eq!(p.y, 0.0);
            }
        }
    }

    #[test]
    fn positions_repeat_every_period() {
        let registry = solar_system();
        for body in registry.all().iter().filter(|b| !b.is_star()) {
            let t = 123.4;
            let a = position_of(body, t);
            let b = position_of(body, t + body.orbital_period);
            assert_relative_eq!(a.x, b.x, epsilon = 1e-9);
            assert_relative_eq!(a.z, b.z, epsilon = 1e-9);
        }
    }

    #[test]
    fn star_never_moves() {
        let registry = solar_system();
        let sun = registry.body("Sun").unwrap();
        for t in [0.0, 1.0, 1e9] {
            assert_eq!(position_of(sun, t), DVec3::ZERO);
        }
    }

    #[test]
    fn earth_goes_to_the_far_side_in_half_a_year() {
        let registry = solar_system();
        let earth = registry.body("Earth").unwrap();

        assert_eq!(position_of(earth, 0.0), DVec3::new(40.0, 0.0, 0.0));

        let half = position_of(earth, 182.5);
        assert_relative_eq!(half.x, -40.0, epsilon = 1e-9);
        assert_relative_eq!(half.z, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn tick_only_advances_while_running() {
        let mut clock = clock();
        clock.tick(1.0);
        assert_eq!(clock.time(), 1.0);

        clock.pause();
        let before = clock.positions();
        let after = clock.tick(1.0);
        assert_eq!(clock.time(), 1.0);
        assert_eq!(before, after);

        clock.resume();
        clock.step();
        assert!(clock.time() > 1.0);
    }

    #[test]
    fn only_the_tick_after_resume_counts() {
        let mut clock = clock();
        clock.pause();
        for _ in 0..3 {
            clock.step();
        }
        assert_eq!(clock.time(), 0.0);
        clock.resume();
        clock.step();
        assert_eq!(clock.time(), 0.5);
    }

    #[test]
    fn reset_always_rewinds_and_unpauses() {
        let mut clock = clock();
        clock.set_time_scale(3.0);
        clock.tick(10.0);
        clock.pause();

        let positions = clock.reset();
        assert_eq!(clock.time(), 0.0);
        assert!(!clock.is_paused());
        assert_eq!(clock.time_scale(), 3.0);
        assert_eq!(positions.get("Earth"), Some(DVec3::new(40.0, 0.0, 0.0)));
    }

    #[test]
    fn invalid_time_scales_are_ignored() {
        let mut clock = clock();
        assert_eq!(clock.set_time_scale(-1.0), 1.0);
        assert_eq!(clock.set_time_scale(0.0), 1.0);
        assert_eq!(clock.set_time_scale(f64::NAN), 1.0);
        assert_eq!(clock.set_time_scale(f64::INFINITY), 1.0);
    }

    #[test]
    fn invalid_tick_lengths_are_ignored() {
        let mut clock = clock();
        clock.tick(2.0);
        for dt in [-1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let positions = clock.tick(dt);
            assert_eq!(clock.time(), 2.0);
            assert!(positions.iter().all(|(_, p)| p.is_finite()));
        }
    }

    #[test]
    fn invalid_step_size_falls_back_to_the_default() {
        for step_size in [-0.016, f64::NAN, f64::INFINITY] {
            let mut clock = OrbitClock::new(
                Arc::new(solar_system()),
                ClockSettings {
                    step_size,
                    time_scale: 1.0,
                },
            );
            assert_eq!(clock.step_size(), ClockSettings::default().step_size);
            clock.step();
            assert!(clock.time() > 0.0);
        }
    }

    #[test]
    fn time_scale_multiplies_the_step() {
        let mut clock = clock();
        clock.step();
        let base = clock.time();

        clock.reset();
        assert_eq!(clock.set_time_scale(2.5), 2.5);
        clock.step();
        assert_relative_eq!(clock.time(), base * 2.5);
    }

    #[test]
    fn changing_scale_keeps_elapsed_time() {
        let mut clock = clock();
        clock.tick(4.0);
        clock.set_time_scale(10.0);
        assert_eq!(clock.time(), 4.0);
    }

    #[test]
    fn rounded_snapshot_keeps_two_decimals() {
        let mut clock = clock();
        clock.tick(1.23456);
        let snapshot = clock.snapshot().rounded();
        assert_eq!(snapshot.time, 1.23);
        assert_eq!(snapshot.positions, clock.positions());
    }

    #[test]
    fn snapshot_serializes_positions_as_objects() {
        let clock = clock();
        let value = serde_json::to_value(clock.snapshot()).unwrap();
        assert_eq!(value["paused"], false);
        assert_eq!(value["positions"]["Earth"]["x"], 40.0);
        assert_eq!(value["positions"]["Sun"]["z"], 0.0);
    }
}
