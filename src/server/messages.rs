//! JSON shapes exchanged over HTTP and the WebSocket.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::sim::body::CelestialBody;
use crate::sim::clock::{ClockSnapshot, PositionJson, Positions};
use crate::sim::registry::Registry;

/// Pushed to WebSocket clients as `{"event": .., "data": ..}`.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerMessage {
    InitialState(InitialState),
    PositionUpdate(PositionUpdate),
}

/// Sent by WebSocket clients.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientMessage {
    RequestUpdate,
}

#[derive(Clone, Debug, Serialize)]
pub struct InitialState {
    pub bodies: BodyTable,
    pub state: ClockSnapshot,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PositionUpdate {
    pub positions: Positions,
    pub time: f64,
    pub paused: bool,
}

impl From<ClockSnapshot> for PositionUpdate {
    fn from(snapshot: ClockSnapshot) -> Self {
        Self {
            positions: snapshot.positions,
            time: snapshot.time,
            paused: snapshot.paused,
        }
    }
}

/// Every body keyed by name, optionally with where it is right now.
#[derive(Clone, Debug)]
pub struct BodyTable {
    bodies: Vec<CelestialBody>,
    positions: Option<Positions>,
}

impl BodyTable {
    pub fn new(registry: &Registry) -> Self {
        Self {
            bodies: registry.all().to_vec(),
            positions: None,
        }
    }

    pub fn with_positions(registry: &Registry, positions: Positions) -> Self {
        Self {
            bodies: registry.all().to_vec(),
            positions: Some(positions),
        }
    }
}

#[derive(Serialize)]
struct BodyWithPosition<'a> {
    #[serde(flatten)]
    body: &'a CelestialBody,
    current_position: Option<PositionJson>,
}

impl Serialize for BodyTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.bodies.len()))?;
        for body in &self.bodies {
            match &self.positions {
                Some(positions) => map.serialize_entry(
                    &body.name,
                    &BodyWithPosition {
                        body,
                        current_position: positions.get(&body.name).map(PositionJson),
                    },
                )?,
                None => map.serialize_entry(&body.name, body)?,
            }
        }
        map.end()
    }
}

/// Reply of `GET /api/body/{name}`.
#[derive(Clone, Debug, Serialize)]
pub struct BodyDetail {
    pub name: String,
    pub info: String,
    pub data: CelestialBody,
    pub current_position: PositionJson,
}

#[derive(Clone, Debug, Serialize)]
pub struct RelationshipReply {
    pub body1: String,
    pub body2: String,
    pub relationship: String,
    pub current_distance_km: Option<f64>,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct PauseReply {
    pub paused: bool,
    pub time: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct ResetReply {
    pub message: &'static str,
    pub time: f64,
    pub positions: Positions,
}

#[derive(Clone, Copy, Debug, Deserialize)]
pub struct SpeedRequest {
    #[serde(default = "default_speed")]
    pub speed: f64,
}

impl Default for SpeedRequest {
    fn default() -> Self {
        Self {
            speed: default_speed(),
        }
    }
}

fn default_speed() -> f64 {
    1.0
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct SpeedReply {
    pub speed: f64,
}
