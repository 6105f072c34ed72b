//! Calendar units at which comparison, stepping and commits happen.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The calendar unit a picker (or one of its panels) works in.
///
/// Ordered from finest to coarsest, so `Granularity::Day < Granularity::Year`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Day,
    Week,
    Month,
    Year,
}

impl Granularity {
    /// The coarser panels a picker of this granularity embeds for drill-down.
    ///
    /// A day or week picker can zoom out to a month grid and then to a decade
    /// grid; a month picker only to the decade grid; a year picker has nothing
    /// above it.
    pub fn drill_chain(self) -> &'static [Granularity] {
        match self {
            Granularity::Day | Granularity::Week => &[Granularity::Month, Granularity::Year],
            Granularity::Month => &[Granularity::Year],
            Granularity::Year => &[],
        }
    }

    /// Whether a panel of this granularity paints the 6x7 day grid.
    pub fn is_day_grid(self) -> bool {
        matches!(self, Granularity::Day | Granularity::Week)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
            Granularity::Year => "year",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
