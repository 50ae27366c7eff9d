//! Rendering session: recompute a render plan and keep the set of live charts in sync.
//!
//! The session follows a two-step shape:
//!
//! 1. [`plan`] is a pure function of (dataset, selection, geometry set, palette) that
//!    produces the projection, its stats, and one [`ChartSpec`] per requested slot.
//! 2. [`RenderingSession::apply`] destroys every live chart instance and only then
//!    mounts new ones, so a slot is never drawn twice and instances never accumulate.
//!
//! Drawing surfaces are supplied by a [`SurfaceHost`]; a slot without a surface is
//! skipped silently.
//!
//! ```
//! use sheetviz::models::{AxisMode, AxisSelection, Dataset, Row};
//! use sheetviz::chart::GeometrySet;
//! use sheetviz::session::{RenderingSession, SurfaceGrid};
//! use sheetviz::config::RenderConfig;
//!
//! let data = Dataset::new(vec![
//!     Row::new().with("Month", "Jan").with("Sales", 10.0),
//!     Row::new().with("Month", "Feb").with("Sales", 12.0),
//! ]);
//! let sel = AxisSelection::new("Month", "Sales", AxisMode::Normal);
//! let config = RenderConfig::default().with_size(320, 200);
//! let mut session = RenderingSession::new(SurfaceGrid::uniform(320, 200), config);
//! session.update(&data, &sel, GeometrySet::All);
//! assert_eq!(session.live_count(), 5);
//! session.teardown();
//! assert_eq!(session.live_count(), 0);
//! ```

use log::{debug, trace, warn};

use crate::chart::palette::ColorPalette;
use crate::chart::render::{PixelSurface, draw_chart};
use crate::chart::spec::{ChartSpec, SeriesInput, build};
use crate::chart::types::{ChartGeometry, GeometrySet, SLOT_COUNT};
use crate::config::RenderConfig;
use crate::models::{AxisSelection, Dataset, Projection};
use crate::projection::project;
use crate::stats::{Stats, summarize};

/// One requested chart: where it goes and what it shows.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotSpec {
    pub slot: usize,
    pub spec: ChartSpec,
}

/// Everything derived from one (dataset, selection, geometry set) triple.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPlan {
    pub projection: Projection,
    pub stats: Option<Stats>,
    pub geometry_set: GeometrySet,
    /// Empty when the projection is empty.
    pub slots: Vec<SlotSpec>,
}

impl RenderPlan {
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Derive the render plan. Pure: identical inputs give identical plans.
///
/// The colour slot of each chart is its rendering slot, so `All` colours Line..Radar
/// with palette entries 0..4, and a single geometry always uses entry 0.
pub fn plan(
    dataset: &Dataset,
    selection: &AxisSelection,
    geometry_set: GeometrySet,
    palette: &ColorPalette,
) -> RenderPlan {
    let projection = project(dataset, selection);
    let stats = summarize(&projection.values);
    let slots = if projection.is_empty() {
        Vec::new()
    } else {
        let input = SeriesInput {
            labels: &projection.labels,
            values: &projection.values,
            series_name: selection.y_name(),
            x_title: selection.x_name(),
        };
        geometry_set
            .slots()
            .into_iter()
            .map(|(slot, geometry)| SlotSpec {
                slot,
                spec: build(geometry, &input, slot, palette),
            })
            .collect()
    };
    RenderPlan {
        projection,
        stats,
        geometry_set,
        slots,
    }
}

// ------------------------ Surfaces ------------------------

/// Pixel size of a drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

/// Supplies the drawing surface mounted at each slot, if any.
pub trait SurfaceHost {
    fn surface(&self, slot: usize) -> Option<SurfaceSize>;
}

/// A fixed grid of surfaces, one per slot, any of which may be absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceGrid {
    sizes: Vec<Option<SurfaceSize>>,
}

impl SurfaceGrid {
    /// Every slot has a surface of the same size.
    pub fn uniform(width: u32, height: u32) -> Self {
        Self {
            sizes: vec![Some(SurfaceSize { width, height }); SLOT_COUNT],
        }
    }

    /// No slot has a surface.
    pub fn empty() -> Self {
        Self {
            sizes: vec![None; SLOT_COUNT],
        }
    }

    /// Builder-style: remove the surface at `slot`.
    pub fn without(mut self, slot: usize) -> Self {
        if let Some(s) = self.sizes.get_mut(slot) {
            *s = None;
        }
        self
    }

    pub fn set(&mut self, slot: usize, size: Option<SurfaceSize>) {
        if slot >= self.sizes.len() {
            self.sizes.resize(slot + 1, None);
        }
        self.sizes[slot] = size;
    }
}

impl SurfaceHost for SurfaceGrid {
    fn surface(&self, slot: usize) -> Option<SurfaceSize> {
        self.sizes.get(slot).copied().flatten()
    }
}

// ------------------------ Instances ------------------------

/// A chart drawn onto its own surface. Owned exclusively by a [`RenderingSession`].
#[derive(Debug)]
pub struct ChartInstance {
    id: u64,
    slot: usize,
    spec: ChartSpec,
    surface: PixelSurface,
}

impl ChartInstance {
    fn mount(
        id: u64,
        slot: usize,
        spec: ChartSpec,
        size: SurfaceSize,
        config: &RenderConfig,
    ) -> anyhow::Result<Self> {
        let mut surface = PixelSurface::new(size.width, size.height);
        draw_chart(&spec, &mut surface, config.background, &config.locale)?;
        Ok(Self {
            id,
            slot,
            spec,
            surface,
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn slot(&self) -> usize {
        self.slot
    }

    pub fn geometry(&self) -> ChartGeometry {
        self.spec.geometry
    }

    pub fn spec(&self) -> &ChartSpec {
        &self.spec
    }

    pub fn surface(&self) -> &PixelSurface {
        &self.surface
    }

    fn destroy(self) {
        debug!("destroying {} chart #{} in slot {}", self.spec.geometry, self.id, self.slot);
    }
}

// ------------------------ Session ------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unmounted,
    Mounted,
}

/// Outcome of one [`RenderingSession::apply`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub destroyed: usize,
    pub mounted: Vec<usize>,
    /// Slots skipped because no surface was available.
    pub no_surface: Vec<usize>,
    /// Slots whose chart failed to draw; the failure is logged and contained.
    pub failed: Vec<usize>,
}

pub struct RenderingSession<H: SurfaceHost> {
    host: H,
    config: RenderConfig,
    slots: Vec<Option<ChartInstance>>,
    state: SessionState,
    last_plan: Option<RenderPlan>,
    next_id: u64,
    created_total: u64,
    destroyed_total: u64,
}

impl<H: SurfaceHost> RenderingSession<H> {
    pub fn new(host: H, config: RenderConfig) -> Self {
        Self {
            host,
            config,
            slots: (0..SLOT_COUNT).map(|_| None).collect(),
            state: SessionState::Unmounted,
            last_plan: None,
            next_id: 1,
            created_total: 0,
            destroyed_total: 0,
        }
    }

    /// Recompute for new inputs and apply the result.
    pub fn update(
        &mut self,
        dataset: &Dataset,
        selection: &AxisSelection,
        geometry_set: GeometrySet,
    ) -> ApplyReport {
        let plan = plan(dataset, selection, geometry_set, &self.config.palette);
        self.apply(plan)
    }

    /// Destroy every live instance, then mount one instance per planned slot.
    pub fn apply(&mut self, plan: RenderPlan) -> ApplyReport {
        let mut report = ApplyReport {
            destroyed: self.destroy_all(),
            ..ApplyReport::default()
        };

        for SlotSpec { slot, spec } in plan.slots.iter().cloned() {
            let Some(size) = self.host.surface(slot) else {
                trace!("slot {slot} has no surface; skipping {}", spec.geometry);
                report.no_surface.push(slot);
                continue;
            };
            let id = self.next_id;
            self.next_id += 1;
            let geometry = spec.geometry;
            match ChartInstance::mount(id, slot, spec, size, &self.config) {
                Ok(instance) => {
                    debug!("mounted {geometry} chart #{id} in slot {slot}");
                    if slot >= self.slots.len() {
                        self.slots.resize_with(slot + 1, || None);
                    }
                    self.slots[slot] = Some(instance);
                    self.created_total += 1;
                    report.mounted.push(slot);
                }
                Err(e) => {
                    warn!("failed to render {geometry} chart in slot {slot}: {e:#}");
                    report.failed.push(slot);
                }
            }
        }

        self.state = SessionState::Mounted;
        self.last_plan = Some(plan);
        report
    }

    /// Destroy all live instances and return to `Unmounted`.
    pub fn teardown(&mut self) {
        self.destroy_all();
        self.last_plan = None;
        self.state = SessionState::Unmounted;
    }

    fn destroy_all(&mut self) -> usize {
        let mut n = 0;
        for slot in self.slots.iter_mut() {
            if let Some(instance) = slot.take() {
                instance.destroy();
                n += 1;
            }
        }
        self.destroyed_total += n as u64;
        n
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn instance(&self, slot: usize) -> Option<&ChartInstance> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// `(slot, geometry)` of every live instance, in slot order.
    pub fn live_geometries(&self) -> Vec<(usize, ChartGeometry)> {
        self.slots
            .iter()
            .flatten()
            .map(|i| (i.slot, i.geometry()))
            .collect()
    }

    pub fn last_plan(&self) -> Option<&RenderPlan> {
        self.last_plan.as_ref()
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Replace the surface host; takes effect on the next apply.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn created_total(&self) -> u64 {
        self.created_total
    }

    pub fn destroyed_total(&self) -> u64 {
        self.destroyed_total
    }
}

impl<H: SurfaceHost> Drop for RenderingSession<H> {
    fn drop(&mut self) {
        self.teardown();
    }
}
