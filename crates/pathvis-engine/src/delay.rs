//! Animation delays expressed as an amount and a time unit.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::DelayError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimeUnit {
    #[cfg_attr(feature = "serde", serde(rename = "ns"))]
    Nanos,
    #[cfg_attr(feature = "serde", serde(rename = "us"))]
    Micros,
    #[cfg_attr(feature = "serde", serde(rename = "ms"))]
    Millis,
    #[cfg_attr(feature = "serde", serde(rename = "s"))]
    Secs,
    #[cfg_attr(feature = "serde", serde(rename = "min"))]
    Mins,
    #[cfg_attr(feature = "serde", serde(rename = "h"))]
    Hours,
}

impl TimeUnit {
    pub const fn symbol(self) -> &'static str {
        match self {
            TimeUnit::Nanos => "ns",
            TimeUnit::Micros => "us",
            TimeUnit::Millis => "ms",
            TimeUnit::Secs => "s",
            TimeUnit::Mins => "min",
            TimeUnit::Hours => "h",
        }
    }
}

impl FromStr for TimeUnit {
    type Err = DelayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ns" => Ok(TimeUnit::Nanos),
            "us" => Ok(TimeUnit::Micros),
            "ms" => Ok(TimeUnit::Millis),
            "s" => Ok(TimeUnit::Secs),
            "min" => Ok(TimeUnit::Mins),
            "h" => Ok(TimeUnit::Hours),
            other => Err(DelayError::UnknownUnit(other.to_string())),
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A pause between two animated grid writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Delay {
    pub amount: u64,
    pub unit: TimeUnit,
}

impl Delay {
    pub const fn new(amount: u64, unit: TimeUnit) -> Self {
        Self { amount, unit }
    }

    /// Build a delay from a unit symbol.
    ///
    /// # Panics
    ///
    /// Panics when `unit` is not a supported symbol. An unknown unit is a
    /// configuration bug; use [`try_from_unit`](Self::try_from_unit) for
    /// input that comes from outside the program.
    pub fn from_unit(amount: u64, unit: &str) -> Self {
        match Self::try_from_unit(amount, unit) {
            Ok(d) => d,
            Err(e) => panic!("{e}"),
        }
    }

    pub fn try_from_unit(amount: u64, unit: &str) -> Result<Self, DelayError> {
        Ok(Self::new(amount, unit.parse()?))
    }

    pub fn as_duration(&self) -> Duration {
        let n = self.amount;
        match self.unit {
            TimeUnit::Nanos => Duration::from_nanos(n),
            TimeUnit::Micros => Duration::from_micros(n),
            TimeUnit::Millis => Duration::from_millis(n),
            TimeUnit::Secs => Duration::from_secs(n),
            TimeUnit::Mins => Duration::from_secs(n.saturating_mul(60)),
            TimeUnit::Hours => Duration::from_secs(n.saturating_mul(3600)),
        }
    }
}

impl From<Delay> for Duration {
    fn from(d: Delay) -> Self {
        d.as_duration()
    }
}

impl fmt::Display for Delay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn units_convert() {
        assert_eq!(Delay::from_unit(3, "ms").as_duration(), Duration::from_millis(3));
        assert_eq!(Delay::from_unit(250, "us").as_duration(), Duration::from_micros(250));
        assert_eq!(Delay::from_unit(7, "ns").as_duration(), Duration::from_nanos(7));
        assert_eq!(Delay::from_unit(2, "min").as_duration(), Duration::from_secs(120));
        assert_eq!(Delay::from_unit(1, "h").as_duration(), Duration::from_secs(3600));
        assert_eq!(Duration::from(Delay::new(4, TimeUnit::Secs)), Duration::from_secs(4));
    }

    #[test]
    fn unknown_unit_is_an_error() {
        assert_eq!(
            Delay::try_from_unit(1, "days"),
            Err(DelayError::UnknownUnit("days".into()))
        );
        assert!("MS".parse::<TimeUnit>().is_err());
    }

    #[test]
    #[should_panic(expected = "unsupported delay unit")]
    fn from_unit_panics_on_unknown_unit() {
        Delay::from_unit(1, "fortnight");
    }

    #[test]
    fn display_round_trips_through_parse() {
        let d = Delay::new(250, TimeUnit::Micros);
        assert_eq!(d.to_string(), "250us");
        assert_eq!(d.unit.symbol().parse::<TimeUnit>(), Ok(TimeUnit::Micros));
    }
}
