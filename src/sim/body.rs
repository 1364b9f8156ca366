use serde::{Serialize, Serializer};
use three_d::Srgba;

/// A struct representing a celestial body.
///
/// All lengths are in scene units and periods in days; neither is meant to be
/// physically accurate.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CelestialBody {
    /// The unique name of the celestial body.
    pub name: String,

    /// The size the body is drawn at.
    #[serde(rename = "radius")]
    pub display_radius: f64,

    /// The color of the celestial body.
    #[serde(serialize_with = "serialize_color")]
    pub color: Srgba,

    /// Distance from the origin. Zero means the body sits at the origin.
    pub orbital_radius: f64,

    /// Time for one revolution, in days. Zero for the body at the origin.
    pub orbital_period: f64,

    /// Human-readable description.
    pub info: String,
}

impl CelestialBody {
    /// Creates a new `CelestialBody` instance.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the celestial body.
    /// * `display_radius` - The radius the body is drawn with.
    /// * `color` - The color of the body.
    /// * `orbital_radius` - The radius of its circular orbit, or 0 for the star.
    /// * `orbital_period` - The period of its orbit in days, or 0 for the star.
    /// * `info` - A description of the body.
    pub fn new(
        name: impl Into<String>,
        display_radius: f64,
        color: Srgba,
        orbital_radius: f64,
        orbital_period: f64,
        info: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            display_radius,
            color,
            orbital_radius,
            orbital_period,
            info: info.into(),
        }
    }

    /// Whether this body is the motionless body at the origin.
    #[inline]
    pub fn is_star(&self) -> bool {
        self.orbital_radius == 0.0 && self.orbital_period == 0.0
    }
}

/// Formats a color as `#rrggbb`.
pub fn color_to_hex(color: Srgba) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
}

fn serialize_color<S: Serializer>(color: &Srgba, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&color_to_hex(*color))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_color_is_lowercase_rgb() {
        assert_eq!(color_to_hex(Srgba::new_opaque(255, 165, 0)), "#ffa500");
        assert_eq!(color_to_hex(Srgba::new(0, 0, 255, 10)), "#0000ff");
    }

    #[test]
    fn star_is_detected_by_zero_orbit() {
        let sun = CelestialBody::new("Sun", 10.0, Srgba::WHITE, 0.0, 0.0, "");
        let earth = CelestialBody::new("Earth", 1.0, Srgba::WHITE, 40.0, 365.0, "");
        assert!(sun.is_star());
        assert!(!earth.is_star());
    }

    #[test]
    fn serializes_with_wire_names() {
        let earth = CelestialBody::new("Earth", 1.0, Srgba::new_opaque(0, 0, 255), 40.0, 365.0, "x");
        let value = serde_json::to_value(&earth).unwrap();
        assert_eq!(value["radius"], 1.0);
        assert_eq!(value["color"], "#0000ff");
        assert_eq!(value["orbital_period"], 365.0);
    }
}
