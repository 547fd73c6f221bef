// Breakpoint tables and sub-index interpolation
use super::pollutant::Pollutant;
use serde::{Deserialize, Serialize};

/// One severity band: concentrations in `[c_low, c_high]` map linearly onto
/// `[i_low, i_high]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Breakpoint {
    pub c_low: f64,
    pub c_high: f64,
    pub i_low: f64,
    pub i_high: f64,
}

impl Breakpoint {
    const fn new(c_low: f64, c_high: f64, i_low: f64, i_high: f64) -> Self {
        Self {
            c_low,
            c_high,
            i_low,
            i_high,
        }
    }

    fn contains(&self, value: f64) -> bool {
        self.c_low <= value && value <= self.c_high
    }

    fn interpolate(&self, value: f64) -> f64 {
        self.i_low + (self.i_high - self.i_low) / (self.c_high - self.c_low) * (value - self.c_low)
    }
}

pub const CO_BREAKPOINTS: &[Breakpoint] = &[
    Breakpoint::new(0.0, 4.4, 0.0, 50.0),
    Breakpoint::new(4.5, 9.4, 51.0, 100.0),
    Breakpoint::new(9.5, 12.4, 101.0, 150.0),
    Breakpoint::new(12.5, 15.4, 151.0, 200.0),
];

pub const NO2_BREAKPOINTS: &[Breakpoint] = &[
    Breakpoint::new(0.0, 53.0, 0.0, 50.0),
    Breakpoint::new(54.0, 100.0, 51.0, 100.0),
    Breakpoint::new(101.0, 360.0, 101.0, 150.0),
    Breakpoint::new(361.0, 649.0, 151.0, 200.0),
];

pub const C6H6_BREAKPOINTS: &[Breakpoint] = &[
    Breakpoint::new(0.0, 5.0, 0.0, 50.0),
    Breakpoint::new(6.0, 10.0, 51.0, 100.0),
    Breakpoint::new(11.0, 20.0, 101.0, 150.0),
];

pub fn table_for(pollutant: Pollutant) -> &'static [Breakpoint] {
    match pollutant {
        Pollutant::Co => CO_BREAKPOINTS,
        Pollutant::No2 => NO2_BREAKPOINTS,
        Pollutant::C6h6 => C6H6_BREAKPOINTS,
    }
}

/// What to return for a concentration no band contains.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutOfRangePolicy {
    /// Top of the last band, whatever side the value fell off.
    #[default]
    Saturate,
    /// Bottom of the first band below range, otherwise top of the nearest
    /// band beneath the value.
    Clamp,
}

/// Interpolated sub-index of `value` against `table`.
pub fn sub_index(value: f64, table: &[Breakpoint]) -> f64 {
    sub_index_with(value, table, OutOfRangePolicy::Saturate)
}

pub fn sub_index_with(value: f64, table: &[Breakpoint], policy: OutOfRangePolicy) -> f64 {
    debug_assert!(
        table.windows(2).all(|w| w[0].c_high < w[1].c_low),
        "breakpoint bands must be ordered and non-overlapping"
    );

    if let Some(band) = table.iter().find(|b| b.contains(value)) {
        return band.interpolate(value);
    }

    let Some(last) = table.last() else {
        return 0.0;
    };

    match policy {
        OutOfRangePolicy::Saturate => last.i_high,
        OutOfRangePolicy::Clamp => match table.first() {
            Some(first) if value < first.c_low => first.i_low,
            _ => table
                .iter()
                .rev()
                .find(|b| b.c_high < value)
                .map_or(last.i_high, |b| b.i_high),
        },
    }
}
