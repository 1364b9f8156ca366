use std::collections::BTreeMap;

use super::picking::PickResult;
use crate::sim::clock::Positions;
use crate::sim::registry::Registry;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SelectionState {
    #[default]
    Idle,
    /// The first half of a pair has been picked.
    OneSelected(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// A click, resolved or not. `modifier` is set while shift is held.
    Pick { target: PickResult, modifier: bool },
    ToggleSelectionMode,
    Clear,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    /// Highlights the body whose info is shown.
    Info,
    /// Highlights a body taking part in a pair.
    Selected,
}

/// Something the driver has to do in response to an event.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    ShowInfo {
        name: String,
        info: String,
    },
    ShowMarker {
        name: String,
        kind: MarkerKind,
    },
    ClearMarker {
        name: String,
    },
    ClearAllMarkers,
    ShowRelationship {
        first: String,
        second: String,
        text: String,
        distance_km: Option<f64>,
    },
    SelectionStarted {
        name: String,
    },
    SelectionModeChanged(bool),
    ResetCaption,
}

/// The click-to-inspect and pick-two-bodies state machine.
///
/// [`Selection::handle`] only computes effects and updates its own
/// bookkeeping; drawing markers and captions is up to the caller.
#[derive(Clone, Debug, Default)]
pub struct Selection {
    state: SelectionState,
    selection_mode: bool,
    markers: BTreeMap<String, MarkerKind>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    #[inline]
    pub fn selection_mode(&self) -> bool {
        self.selection_mode
    }

    /// Bodies that currently carry a marker.
    pub fn markers(&self) -> impl Iterator<Item = (&str, MarkerKind)> {
        self.markers.iter().map(|(n, &k)| (n.as_str(), k))
    }

    pub fn marker(&self, name: &str) -> Option<MarkerKind> {
        self.markers.get(name).copied()
    }

    /// Feeds one event through the state machine.
    ///
    /// `positions` is used for the distance of a completed pair.
    pub fn handle(&mut self, event: Event, registry: &Registry, positions: &Positions) -> Vec<Effect> {
        let effects = match event {
            Event::Pick {
                target: PickResult::Unresolved,
                ..
            } => Vec::new(),
            Event::Pick {
                target: PickResult::Body(name),
                modifier,
            } => {
                if registry.body(&name).is_none() {
                    tracing::debug!(%name, "pick names an unknown body");
                    Vec::new()
                } else if modifier || self.selection_mode {
                    self.select(name, registry, positions)
                } else {
                    self.inspect(name, registry)
                }
            }
            Event::ToggleSelectionMode => {
                self.selection_mode = !self.selection_mode;
                vec![Effect::SelectionModeChanged(self.selection_mode)]
            }
            Event::Clear => {
                self.state = SelectionState::Idle;
                vec![Effect::ClearAllMarkers, Effect::ResetCaption]
            }
        };

        for effect in &effects {
            self.track(effect);
        }
        effects
    }

    fn inspect(&mut self, name: String, registry: &Registry) -> Vec<Effect> {
        let info = registry
            .body(&name)
            .map(|b| b.info.clone())
            .unwrap_or_default();

        self.state = SelectionState::Idle;
        vec![
            Effect::ClearAllMarkers,
            Effect::ShowMarker {
                name: name.clone(),
                kind: MarkerKind::Info,
            },
            Effect::ShowInfo { name, info },
        ]
    }

    fn select(&mut self, name: String, registry: &Registry, positions: &Positions) -> Vec<Effect> {
        match std::mem::take(&mut self.state) {
            SelectionState::Idle => {
                let mut effects = Vec::with_capacity(3);
                if !self.markers.is_empty() {
                    effects.push(Effect::ClearAllMarkers);
                }
                effects.push(Effect::ShowMarker {
                    name: name.clone(),
                    kind: MarkerKind::Selected,
                });
                effects.push(Effect::SelectionStarted { name: name.clone() });
                self.state = SelectionState::OneSelected(name);
                effects
            }
            SelectionState::OneSelected(first) if first == name => {
                vec![Effect::ClearMarker { name }, Effect::ResetCaption]
            }
            SelectionState::OneSelected(first) => {
                let text = registry.relationship_or_default(&first, &name).into_owned();
                let distance_km = registry.distance_km(&first, &name, positions);
                tracing::debug!(%first, second = %name, ?distance_km, "pair selected");
                vec![
                    Effect::ShowMarker {
                        name: name.clone(),
                        kind: MarkerKind::Selected,
                    },
                    Effect::ShowRelationship {
                        first,
                        second: name,
                        text,
                        distance_km,
                    },
                ]
            }
        }
    }

    fn track(&mut self, effect: &Effect) {
        match effect {
            Effect::ShowMarker { name, kind } => {
                self.markers.insert(name.clone(), *kind);
            }
            Effect::ClearMarker { name } => {
                self.markers.remove(name);
            }
            Effect::ClearAllMarkers => self.markers.clear(),
            _ => {}
        }
    }
}
