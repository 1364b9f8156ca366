use std::fmt::Display;

use strum_macros::{EnumCount, EnumIter};

use super::UnitEnum;

/// Kilometers represented by one scene unit.
///
/// Earth's orbit is drawn 40 units out and stands for 1.5e8 km. Every distance
/// shown to a user goes through this factor.
pub const KM_PER_SCENE_UNIT: f64 = 1.5e8 / 40.0;

const KILOMETER: f64 = 1.0;
const MEGAMETER: f64 = 1000.0 * KILOMETER;
const ASTRONOMICAL_UNIT: f64 = 149_597_870.7 * KILOMETER;

const TEXT_KILOMETER: &str = "km";
const TEXT_MEGAMETER: &str = "Mm";
const TEXT_ASTRONOMICAL_UNIT: &str = "AU";

#[inline]
pub fn scene_to_km(scene_units: f64) -> f64 {
    scene_units * KM_PER_SCENE_UNIT
}

/// Length units with kilometers as the base.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, EnumCount, EnumIter)]
pub enum LengthUnit {
    Kilometers,
    Megameters,
    AstronomicalUnits,
}

impl LengthUnit {
    pub const fn get_value(self) -> f64 {
        match self {
            LengthUnit::Kilometers => KILOMETER,
            LengthUnit::Megameters => MEGAMETER,
            LengthUnit::AstronomicalUnits => ASTRONOMICAL_UNIT,
        }
    }

    pub const fn largest_unit_from_base(base: f64) -> Self {
        match base {
            x if x.abs() >= ASTRONOMICAL_UNIT => LengthUnit::AstronomicalUnits,
            x if x.abs() >= MEGAMETER => LengthUnit::Megameters,
            _ => LengthUnit::Kilometers,
        }
    }

    /// Formats a distance in kilometers with this unit, e.g. `1.50e8 km`.
    pub fn format_km(self, km: f64) -> String {
        match self {
            LengthUnit::Kilometers => format!("{km:.2e} {self}"),
            _ => format!("{:.3} {self}", km / self.get_value()),
        }
    }
}

impl Display for LengthUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LengthUnit::Kilometers => write!(f, "{TEXT_KILOMETER}"),
            LengthUnit::Megameters => write!(f, "{TEXT_MEGAMETER}"),
            LengthUnit::AstronomicalUnits => write!(f, "{TEXT_ASTRONOMICAL_UNIT}"),
        }
    }
}

impl UnitEnum for LengthUnit {
    fn get_value(self) -> f64 {
        self.get_value()
    }
    fn largest_unit_from_base(base: f64) -> Self {
        Self::largest_unit_from_base(base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn earth_orbit_is_one_and_a_half_hundred_million_km() {
        assert_relative_eq!(scene_to_km(40.0), 1.5e8);
    }

    #[test]
    fn picks_largest_fitting_unit() {
        assert_eq!(LengthUnit::largest_unit_from_base(12.0), LengthUnit::Kilometers);
        assert_eq!(LengthUnit::largest_unit_from_base(4.0e4), LengthUnit::Megameters);
        assert_eq!(
            LengthUnit::largest_unit_from_base(-3.0e8),
            LengthUnit::AstronomicalUnits
        );
    }

    #[test]
    fn formats_like_the_caption() {
        assert_eq!(LengthUnit::Kilometers.format_km(1.5e8), "1.50e8 km");
        assert_eq!(
            LengthUnit::AstronomicalUnits.format_km(ASTRONOMICAL_UNIT * 2.0),
            "2.000 AU"
        );
    }
}
