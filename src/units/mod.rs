use std::fmt::Display;

use float_pretty_print::PrettyPrintFloat;
use strum::IntoEnumIterator;

pub mod length;
pub mod time;

/// A family of units sharing one base unit.
pub trait UnitEnum: Copy + Display + Eq + Ord + IntoEnumIterator {
    /// How many base units one of this unit is.
    fn get_value(self) -> f64;
    fn largest_unit_from_base(base: f64) -> Self;

    fn from_base(self, base: f64) -> f64 {
        base / self.get_value()
    }

    /// Formats `base` in the largest unit it fills, e.g. `2.5 y`.
    fn format_in_largest(base: f64) -> String {
        let unit = Self::largest_unit_from_base(base);
        format!("{:6.6} {unit}", PrettyPrintFloat(unit.from_base(base)))
    }
}

#[cfg(test)]
mod tests {
    use super::{length::LengthUnit, time::TimeUnit, *};

    #[test]
    fn formats_in_the_largest_fitting_unit() {
        assert!(TimeUnit::format_in_largest(730.5).ends_with(" y"));
        assert!(TimeUnit::format_in_largest(0.5).ends_with(" h"));
        assert!(LengthUnit::format_in_largest(2.0e4).ends_with(" Mm"));
        assert!(LengthUnit::format_in_largest(3.0e8).ends_with(" AU"));
    }

    #[test]
    fn from_base_divides_by_the_unit() {
        assert_eq!(TimeUnit::Years.from_base(365.25 * 2.0), 2.0);
        assert_eq!(LengthUnit::Megameters.from_base(5000.0), 5.0);
    }
}
