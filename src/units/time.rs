use std::fmt::Display;

use float_pretty_print::PrettyPrintFloat;
use strum_macros::{EnumCount, EnumIter};

use super::UnitEnum;

/// Units of simulated time. The clock counts days.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, EnumCount, EnumIter)]
pub enum TimeUnit {
    Minutes,
    Hours,
    Days,
    Years,
}

const DAY: f64 = 1.0;
const HOUR: f64 = DAY / 24.0;
const MINUTE: f64 = HOUR / 60.0;
const YEAR: f64 = 365.25 * DAY;

const TEXT_MINUTE: &str = "min";
const TEXT_HOUR: &str = "h";
const TEXT_DAY: &str = "d";
const TEXT_YEAR: &str = "y";

impl TimeUnit {
    pub const fn get_next_smaller(self) -> Option<Self> {
        match self {
            Self::Minutes => None,
            Self::Hours => Some(Self::Minutes),
            Self::Days => Some(Self::Hours),
            Self::Years => Some(Self::Days),
        }
    }
    pub const fn get_value(self) -> f64 {
        match self {
            TimeUnit::Minutes => MINUTE,
            TimeUnit::Hours => HOUR,
            TimeUnit::Days => DAY,
            TimeUnit::Years => YEAR,
        }
    }
    pub const fn largest_unit_from_base(base: f64) -> Self {
        match base {
            x if x.abs() >= YEAR => TimeUnit::Years,
            x if x.abs() >= DAY => TimeUnit::Days,
            x if x.abs() >= HOUR => TimeUnit::Hours,
            _ => TimeUnit::Minutes,
        }
    }
}

impl Display for TimeUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeUnit::Minutes => write!(f, "{TEXT_MINUTE}"),
            TimeUnit::Hours => write!(f, "{TEXT_HOUR}"),
            TimeUnit::Days => write!(f, "{TEXT_DAY}"),
            TimeUnit::Years => write!(f, "{TEXT_YEAR}"),
        }
    }
}

impl UnitEnum for TimeUnit {
    fn get_value(self) -> f64 {
        self.get_value()
    }
    fn largest_unit_from_base(base: f64) -> Self {
        Self::largest_unit_from_base(base)
    }
}

/// How the bottom bar shows the elapsed simulation time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumCount, EnumIter)]
pub enum TimeDisplayMode {
    /// e.g. `1234.5 d`
    DaysOnly,
    /// Top 3 units, e.g. `3 y, 139 d, 6 h`
    #[default]
    MultiUnit,
    /// e.g. `3.38 y`
    SingleUnit,
}

impl TimeDisplayMode {
    pub fn format_time(self, days: f64) -> String {
        match self {
            TimeDisplayMode::DaysOnly => Self::format_days_only(days),
            TimeDisplayMode::MultiUnit => Self::format_days_to_years(days),
            TimeDisplayMode::SingleUnit => Self::format_one_unit(days),
        }
    }

    fn format_days_only(days: f64) -> String {
        format!("{:10.10} {}", PrettyPrintFloat(days), TimeUnit::Days)
    }

    fn format_days_to_years(mut days: f64) -> String {
        const MAX_UNIT_AMOUNT: usize = 3;
        let mut unit = TimeUnit::largest_unit_from_base(days);
        let mut units = Vec::with_capacity(MAX_UNIT_AMOUNT);
        units.push(unit);

        while let Some(u) = unit.get_next_smaller() {
            if units.len() >= MAX_UNIT_AMOUNT {
                break;
            }
            units.push(u);
            unit = u;
        }

        let mut string = String::new();
        if days.is_sign_negative() {
            string.push('−');
            days = days.abs();
        }

        let parts: Vec<String> = units
            .iter()
            .map(|&unit| {
                let unit_value = unit.get_value();
                let (quo, rem) = ((days / unit_value).trunc(), days % unit_value);
                days = rem;
                if quo < 1000.0 {
                    format!("{quo} {unit}")
                } else {
                    format!("{:5.3} {unit}", PrettyPrintFloat(quo))
                }
            })
            .collect();

        string += &parts.join(", ");
        string
    }

    fn format_one_unit(days: f64) -> String {
        let unit = TimeUnit::largest_unit_from_base(days);
        let amount = days / unit.get_value();

        format!("{:8.8} {unit}", PrettyPrintFloat(amount))
    }

    pub fn get_next(self) -> Self {
        match self {
            Self::DaysOnly => Self::MultiUnit,
            Self::MultiUnit => Self::SingleUnit,
            Self::SingleUnit => Self::DaysOnly,
        }
    }

    pub fn get_prev(self) -> Self {
        match self {
            Self::DaysOnly => Self::SingleUnit,
            Self::MultiUnit => Self::DaysOnly,
            Self::SingleUnit => Self::MultiUnit,
        }
    }
}

impl Display for TimeDisplayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeDisplayMode::DaysOnly => write!(f, "days-only"),
            TimeDisplayMode::MultiUnit => write!(f, "multi-unit"),
            TimeDisplayMode::SingleUnit => write!(f, "single-unit"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use strum::EnumCount;

    #[test]
    fn test_next() {
        let mut cur = TimeDisplayMode::DaysOnly;
        let mut encountered = HashSet::new();

        while encountered.insert(cur) {
            cur = cur.get_next();
        }

        assert_eq!(encountered.len(), TimeDisplayMode::COUNT);

        for variant in encountered {
            assert_eq!(variant, variant.get_next().get_prev());
        }
    }

    #[test]
    fn multi_unit_splits_years_days_hours() {
        let days = 2.0 * YEAR + 3.0 + 0.25;
        assert_eq!(
            TimeDisplayMode::MultiUnit.format_time(days),
            "2 y, 3 d, 6 h"
        );
    }

    #[test]
    fn picks_largest_fitting_unit() {
        assert_eq!(TimeUnit::largest_unit_from_base(0.5), TimeUnit::Hours);
        assert_eq!(TimeUnit::largest_unit_from_base(12.0), TimeUnit::Days);
        assert_eq!(TimeUnit::largest_unit_from_base(-400.0), TimeUnit::Years);
    }
}
