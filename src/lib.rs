//! sheetviz
//!
//! Turn tabular spreadsheet data into charts. Pairs with the `sheetviz` CLI.
//!
//! ### Features
//! - Project two chosen columns (or one column plus a row index) into labels and values
//! - Summary statistics (sum, average, min, max) over the projected series
//! - Line, Bar, Pie, Doughnut, and Radar charts, one at a time or all five side by side
//! - A rendering session that keeps exactly one live chart per slot across updates
//! - PNG export per chart, plain-text export for insight reports
//!
//! ### Example
//! ```no_run
//! use sheetviz::{AxisMode, AxisSelection, GeometrySet, RenderConfig};
//! use sheetviz::{RenderingSession, SurfaceGrid};
//! use sheetviz::source::{DatasetSource, FileSource};
//!
//! let loaded = FileSource::new("sales.csv").load()?;
//! let selection = AxisSelection::new("Month", "Revenue", AxisMode::Normal);
//! let config = RenderConfig::default();
//! let grid = SurfaceGrid::uniform(config.width, config.height);
//! let mut session = RenderingSession::new(grid, config);
//! session.update(&loaded.dataset, &selection, GeometrySet::All);
//! for (_, blob) in sheetviz::export::export_all(&session) {
//!     blob?.save_in("out")?;
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod chart;
pub mod config;
pub mod error;
pub mod export;
pub mod insights;
pub mod models;
pub mod projection;
pub mod session;
pub mod source;
pub mod stats;

pub use chart::{ChartGeometry, ChartSpec, ColorPalette, GeometrySet, Rgba};
pub use config::RenderConfig;
pub use error::{ExportError, InsightError, PaletteError, SourceError};
pub use models::{AxisMode, AxisSelection, CellValue, Dataset, Projection, Row, Upload};
pub use projection::project;
pub use session::{RenderPlan, RenderingSession, SurfaceGrid, SurfaceHost, plan};
pub use stats::{Stats, summarize};
