use std::borrow::Cow;
use std::collections::HashMap;

use glam::DVec3;
use thiserror::Error;

use super::body::CelestialBody;
use super::clock::Positions;
use crate::units::length::scene_to_km;

/// An unordered pair of distinct body names.
///
/// `BodyPair::new("Mars", "Earth") == BodyPair::new("Earth", "Mars")`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BodyPair(String, String);

impl BodyPair {
    /// Returns `None` if both names are the same body.
    pub fn new(a: &str, b: &str) -> Option<Self> {
        match a.cmp(b) {
            std::cmp::Ordering::Less => Some(Self(a.to_owned(), b.to_owned())),
            std::cmp::Ordering::Greater => Some(Self(b.to_owned(), a.to_owned())),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn names(&self) -> (&str, &str) {
        (&self.0, &self.1)
    }
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum RegistryError {
    #[error("duplicate body name {0:?}")]
    DuplicateBody(String),
    #[error("body {name:?} has orbital radius {radius} but period {period}")]
    InconsistentOrbit {
        name: String,
        radius: f64,
        period: f64,
    },
    #[error("body {name:?} has non-positive display radius {radius}")]
    InvalidDisplayRadius { name: String, radius: f64 },
    #[error("relationship names an unknown body {0:?}")]
    UnknownBody(String),
    #[error("relationship pairs {0:?} with itself")]
    SelfRelationship(String),
}

/// Static table of celestial bodies and the facts relating pairs of them.
///
/// Built once at startup and never mutated afterwards.
#[derive(Clone, Debug)]
pub struct Registry {
    bodies: Vec<CelestialBody>,
    index: HashMap<String, usize>,
    relationships: HashMap<BodyPair, String>,
}

impl Registry {
    /// Builds a registry, checking the orbit invariants of every body.
    ///
    /// A body orbits iff both its orbital radius and period are positive;
    /// the star has both at zero. Anything in between is rejected.
    pub fn new<R>(bodies: Vec<CelestialBody>, relationships: R) -> Result<Self, RegistryError>
    where
        R: IntoIterator<Item = (&'static str, &'static str, &'static str)>,
    {
        let mut index = HashMap::with_capacity(bodies.len());

        for (i, body) in bodies.iter().enumerate() {
            let orbiting = body.orbital_radius > 0.0 && body.orbital_period > 0.0;
            if !orbiting && !body.is_star() {
                return Err(RegistryError::InconsistentOrbit {
                    name: body.name.clone(),
                    radius: body.orbital_radius,
                    period: body.orbital_period,
                });
            }
            if !(body.display_radius > 0.0) {
                return Err(RegistryError::InvalidDisplayRadius {
                    name: body.name.clone(),
                    radius: body.display_radius,
                });
            }
            if index.insert(body.name.clone(), i).is_some() {
                return Err(RegistryError::DuplicateBody(body.name.clone()));
            }
        }

        let mut facts = HashMap::new();
        for (a, b, text) in relationships {
            for name in [a, b] {
                if !index.contains_key(name) {
                    return Err(RegistryError::UnknownBody(name.to_owned()));
                }
            }
            let pair = BodyPair::new(a, b).ok_or_else(|| RegistryError::SelfRelationship(a.to_owned()))?;
            facts.insert(pair, text.to_owned());
        }

        Ok(Self {
            bodies,
            index,
            relationships: facts,
        })
    }

    /// All bodies, in registration order.
    pub fn all(&self) -> &[CelestialBody] {
        &self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Gets a body by name, if any.
    pub fn body(&self, name: &str) -> Option<&CelestialBody> {
        self.index.get(name).map(|&i| &self.bodies[i])
    }

    /// Gets the stored fact relating two bodies. Order does not matter.
    pub fn relationship(&self, a: &str, b: &str) -> Option<&str> {
        let pair = BodyPair::new(a, b)?;
        self.relationships.get(&pair).map(String::as_str)
    }

    /// Gets the stored fact, or a stand-in message when there is none.
    pub fn relationship_or_default(&self, a: &str, b: &str) -> Cow<'_, str> {
        match self.relationship(a, b) {
            Some(text) => Cow::Borrowed(text),
            None => Cow::Owned(default_relationship(a, b)),
        }
    }

    /// Distance between two bodies at the given positions, in kilometers.
    ///
    /// Returns `None` if either body is missing from `positions`.
    pub fn distance_km(&self, a: &str, b: &str, positions: &Positions) -> Option<f64> {
        let pa = positions.get(a)?;
        let pb = positions.get(b)?;
        Some(scene_to_km(pa.distance(pb)))
    }

    pub(crate) fn iter_relationships(&self) -> impl Iterator<Item = (&BodyPair, &str)> {
        self.relationships.iter().map(|(k, v)| (k, v.as_str()))
    }

    /// Positions of bodies at `time`, in registration order.
    pub(crate) fn positions_at(&self, time: f64) -> Positions {
        self.bodies
            .iter()
            .map(|body| (body.name.clone(), super::clock::position_of(body, time)))
            .collect()
    }

    pub(crate) fn position_at(&self, name: &str, time: f64) -> Option<DVec3> {
        self.body(name).map(|b| super::clock::position_of(b, time))
    }
}

pub fn default_relationship(a: &str, b: &str) -> String {
    format!("No specific relationship documented for {a} and {b}.")
}
