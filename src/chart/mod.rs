//! Chart construction and rasterisation.
//!
//! - [`types`]: the closed set of geometries and the All/Single selector
//! - [`palette`]: colours and the cycling palette
//! - [`spec`]: fully populated per-chart configuration
//! - [`render`]: draw a spec onto an in-memory pixel surface
//! - [`legend`]: textual legend for Pie/Doughnut

mod fonts;
pub mod legend;
pub mod palette;
pub mod render;
pub mod smooth;
pub mod spec;
pub mod text;
pub mod types;

pub use legend::{LegendEntry, format_legend, legend_entries};
pub use palette::{ColorPalette, Rgba};
pub use render::{PixelSurface, draw_chart};
pub use spec::{ChartSpec, SeriesInput, build};
pub use types::{ChartGeometry, GeometrySet, SLOT_COUNT};
