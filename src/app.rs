use std::sync::Arc;

use solar_system_demo::{
    cfg::DesktopConfig,
    interaction::{
        Effect, Event, PickQuery, Selection,
        picking::Candidate,
    },
    sim::{
        clock::{ClockSettings, OrbitClock, Positions},
        registry::Registry,
        solar_system,
        stepper::FixedStepper,
    },
    units::{UnitEnum, length::LengthUnit, time::TimeDisplayMode},
};

const HINT: &str = "Click a body for info. Shift-click (or press M) to pick two bodies.";

/// What the caption panel currently shows.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Caption {
    Hint,
    Info {
        name: String,
        info: String,
    },
    Selecting {
        name: String,
    },
    Relationship {
        first: String,
        second: String,
        text: String,
        distance_km: Option<f64>,
    },
}

impl Caption {
    pub(crate) fn title(&self) -> String {
        match self {
            Caption::Hint => "Solar system".to_owned(),
            Caption::Info { name, .. } => name.clone(),
            Caption::Selecting { name } => format!("{name} selected"),
            Caption::Relationship { first, second, .. } => format!("{first} and {second}"),
        }
    }

    /// `None` shows distances in whichever unit fits them best.
    pub(crate) fn text(&self, unit: Option<LengthUnit>) -> String {
        match self {
            Caption::Hint => HINT.to_owned(),
            Caption::Info { info, .. } => info.clone(),
            Caption::Selecting { name } => {
                format!("Selected {name}. Select another body to see how they relate.")
            }
            Caption::Relationship {
                text, distance_km, ..
            } => match distance_km {
                Some(km) => {
                    let distance = match unit {
                        Some(unit) => unit.format_km(*km),
                        None => LengthUnit::format_in_largest(*km),
                    };
                    format!("Relationship: {text}  Distance: ~{distance}")
                }
                None => format!("Relationship: {text}"),
            },
        }
    }
}

pub(crate) struct SimState {
    pub clock: OrbitClock,
    pub selection: Selection,
    pub caption: Caption,
    stepper: FixedStepper,
    pub show_orbits: bool,
    pub show_labels: bool,
    pub time_disp: TimeDisplayMode,
    pub length_unit: Option<LengthUnit>,
}

impl SimState {
    pub(crate) fn new(cfg: &DesktopConfig) -> Self {
        Self::with_registry(Arc::new(solar_system()), cfg)
    }

    pub(crate) fn with_registry(registry: Arc<Registry>, cfg: &DesktopConfig) -> Self {
        let clock = OrbitClock::new(
            registry,
            ClockSettings {
                step_size: cfg.step_size,
                time_scale: cfg.time_scale,
            },
        );
        Self {
            clock,
            selection: Selection::new(),
            caption: Caption::Hint,
            stepper: FixedStepper::new(cfg.tick_rate_hz, cfg.max_ticks_per_frame),
            show_orbits: cfg.show_orbits,
            show_labels: cfg.show_labels,
            time_disp: TimeDisplayMode::default(),
            length_unit: Some(LengthUnit::Kilometers),
        }
    }

    #[inline]
    pub(crate) fn registry(&self) -> &Registry {
        self.clock.registry()
    }

    #[inline]
    pub(crate) fn running(&self) -> bool {
        !self.clock.is_paused()
    }

    /// Runs the fixed ticks owed for a frame that took `elapsed_ms`.
    pub(crate) fn advance(&mut self, elapsed_ms: f64) {
        let ticks = self.stepper.advance(elapsed_ms);
        for _ in 0..ticks {
            self.clock.step();
        }
    }

    pub(crate) fn toggle_pause(&mut self) {
        let paused = self.clock.toggle_pause();
        tracing::info!(paused, "pause toggled");
    }

    pub(crate) fn reset(&mut self) {
        self.clock.reset();
        tracing::info!("simulation reset");
    }

    /// Multiplies the time scale; results that would not be positive are ignored.
    pub(crate) fn scale_time(&mut self, factor: f64) {
        let scale = self.clock.set_time_scale(self.clock.time_scale() * factor);
        tracing::debug!(scale, "time scale changed");
    }

    /// Simulated days per wall-clock second while running.
    pub(crate) fn days_per_second(&self) -> f64 {
        self.clock.step_size() * self.clock.time_scale() * 1000.0 / self.stepper.tick_len_ms()
    }

    /// Pickable bodies at their current positions.
    pub(crate) fn candidates<'a>(&'a self, positions: &Positions) -> Vec<Candidate<'a>> {
        self.registry()
            .all()
            .iter()
            .filter_map(|body| {
                Some(Candidate {
                    name: &body.name,
                    position: positions.get(&body.name)?,
                    radius: body.display_radius,
                })
            })
            .collect()
    }

    /// Resolves a click and feeds the result to the selection.
    pub(crate) fn pick(&mut self, query: PickQuery, modifier: bool) {
        let positions = self.clock.positions();
        let target = {
            let candidates = self.candidates(&positions);
            query.with_sphere_hit(&candidates).resolve(&candidates)
        };
        tracing::debug!(?target, modifier, "click resolved");
        self.dispatch(Event::Pick { target, modifier });
    }

    pub(crate) fn dispatch(&mut self, event: Event) {
        let positions = self.clock.positions();
        let effects = self
            .selection
            .handle(event, self.clock.registry(), &positions);
        for effect in effects {
            self.apply(effect);
        }
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::ShowInfo { name, info } => self.caption = Caption::Info { name, info },
            Effect::SelectionStarted { name } => self.caption = Caption::Selecting { name },
            Effect::ShowRelationship {
                first,
                second,
                text,
                distance_km,
            } => {
                self.caption = Caption::Relationship {
                    first,
                    second,
                    text,
                    distance_km,
                }
            }
            Effect::ResetCaption => self.caption = Caption::Hint,
            Effect::SelectionModeChanged(on) => tracing::info!(on, "selection mode"),
            // Markers are drawn straight from `Selection::markers` every frame.
            Effect::ShowMarker { .. } | Effect::ClearMarker { .. } | Effect::ClearAllMarkers => (),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solar_system_demo::interaction::{MarkerKind, PickResult};

    fn state() -> SimState {
        SimState::new(&DesktopConfig::default())
    }

    fn pick(state: &mut SimState, name: &str, modifier: bool) {
        state.dispatch(Event::Pick {
            target: PickResult::Body(name.into()),
            modifier,
        });
    }

    #[test]
    fn advance_runs_whole_ticks_only_while_running() {
        let mut state = state();
        state.advance(1000.0 / 60.0 + 0.01);
        let after_one = state.clock.time();
        assert!(after_one > 0.0);

        state.toggle_pause();
        state.advance(1000.0);
        assert_eq!(state.clock.time(), after_one);
    }

    #[test]
    fn pair_caption_shows_fact_and_distance() {
        let mut state = state();
        pick(&mut state, "Earth", true);
        assert_eq!(
            state.caption,
            Caption::Selecting {
                name: "Earth".into()
            }
        );

        pick(&mut state, "Mars", true);
        let text = state.caption.text(Some(LengthUnit::Kilometers));
        assert!(text.starts_with("Relationship: Mars and Earth share"));
        assert!(text.ends_with("Distance: ~7.50e7 km"));

        let auto = state.caption.text(None);
        assert!(auto.ends_with(" Mm"), "{auto}");
    }

    #[test]
    fn clear_restores_the_hint() {
        let mut state = state();
        pick(&mut state, "Venus", false);
        assert_eq!(state.selection.marker("Venus"), Some(MarkerKind::Info));

        state.dispatch(Event::Clear);
        assert_eq!(state.caption, Caption::Hint);
        assert_eq!(state.selection.markers().count(), 0);
    }

    #[test]
    fn time_scale_ignores_collapse_to_zero() {
        let mut state = state();
        state.scale_time(2.0);
        assert_eq!(state.clock.time_scale(), 200.0);
        state.scale_time(0.0);
        assert_eq!(state.clock.time_scale(), 200.0);
    }

    #[test]
    fn clicking_a_sphere_picks_it() {
        use glam::DVec3;
        use solar_system_demo::interaction::Ray;

        let mut state = state();
        let ray = Ray::new(DVec3::new(40.0, 100.0, 0.0), DVec3::NEG_Y).unwrap();
        state.pick(PickQuery::from_ray(ray), false);
        assert!(matches!(&state.caption, Caption::Info { name, .. } if name == "Earth"));
    }
}
