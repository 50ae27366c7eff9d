//! Public types for the chart module.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Chart shapes supported by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartGeometry {
    /// Smoothed line through the values.
    Line,
    /// One solid bar per label.
    Bar,
    /// Slices proportional to each value.
    Pie,
    /// Pie with a blank centre.
    Doughnut,
    /// Values on spokes around a centre.
    Radar,
}

impl ChartGeometry {
    /// Fixed display order used when every geometry is requested.
    pub const ALL: [ChartGeometry; 5] = [
        ChartGeometry::Line,
        ChartGeometry::Bar,
        ChartGeometry::Pie,
        ChartGeometry::Doughnut,
        ChartGeometry::Radar,
    ];

    /// Lowercase name, also used for exported file names.
    pub fn name(self) -> &'static str {
        match self {
            ChartGeometry::Line => "line",
            ChartGeometry::Bar => "bar",
            ChartGeometry::Pie => "pie",
            ChartGeometry::Doughnut => "doughnut",
            ChartGeometry::Radar => "radar",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ChartGeometry::Line => "Line Chart",
            ChartGeometry::Bar => "Bar Chart",
            ChartGeometry::Pie => "Pie Chart",
            ChartGeometry::Doughnut => "Doughnut Chart",
            ChartGeometry::Radar => "Radar Chart",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ChartGeometry::Line => {
                "A line chart representing continuous data changes over time or categories."
            }
            ChartGeometry::Bar => "A bar chart displaying comparisons among discrete categories.",
            ChartGeometry::Pie => "A pie chart showing proportions in a circular form.",
            ChartGeometry::Doughnut => {
                "A doughnut chart offering a variation of the pie chart with a blank center."
            }
            ChartGeometry::Radar => "A radar chart mapping multiple variables in a web-like shape.",
        }
    }

    /// Pie and Doughnut have no cartesian scales and colour each data point.
    pub fn is_circular(self) -> bool {
        matches!(self, ChartGeometry::Pie | ChartGeometry::Doughnut)
    }
}

impl fmt::Display for ChartGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ChartGeometry {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChartGeometry::ALL
            .into_iter()
            .find(|g| g.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown chart type: {s}"))
    }
}

/// Which geometries a rendering session should hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeometrySet {
    /// Every geometry, in [`ChartGeometry::ALL`] order.
    All,
    /// Exactly one geometry, mounted in slot 0.
    Single(ChartGeometry),
}

impl Default for GeometrySet {
    fn default() -> Self {
        GeometrySet::Single(ChartGeometry::Line)
    }
}

impl GeometrySet {
    /// `(slot, geometry)` pairs in display order.
    pub fn slots(self) -> Vec<(usize, ChartGeometry)> {
        match self {
            GeometrySet::All => ChartGeometry::ALL.into_iter().enumerate().collect(),
            GeometrySet::Single(g) => vec![(0, g)],
        }
    }

    /// Number of live instances this set implies.
    pub fn instance_count(self) -> usize {
        match self {
            GeometrySet::All => ChartGeometry::ALL.len(),
            GeometrySet::Single(_) => 1,
        }
    }
}

impl FromStr for GeometrySet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(GeometrySet::All)
        } else {
            s.parse().map(GeometrySet::Single)
        }
    }
}

/// Number of rendering slots a session can hold.
pub const SLOT_COUNT: usize = ChartGeometry::ALL.len();
