//! Orchestration: validate a spec, derive a resolution, run the matching
//! generator.
//!
//! The engine is synchronous and single-threaded; a generation runs to
//! completion on the calling thread and callers debounce continuous
//! interactions themselves. The expression cache is the only mutable state,
//! owned by the engine (one engine per evaluation worker).

use log::debug;

use crate::core::cache::EvalCache;
use crate::errors::GraphError;
use crate::geometry::GraphGeometry;
use crate::lod::{LodConfig, LodController, LodTier};
use crate::plot2d::{curves, region as region2d};
use crate::plot3d::{region as region3d, surface};
use crate::spec::{GraphSpec, LodState, PlotSpec};
use crate::validate::{compile, CompiledPlot};

pub struct GraphEngine {
    lod: LodController,
    cache: EvalCache,
}

impl Default for GraphEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphEngine {
    pub fn new() -> Self {
        Self {
            lod: LodController::default(),
            cache: EvalCache::default(),
        }
    }

    pub fn with_config(lod: LodConfig, cache_capacity: usize) -> Self {
        Self {
            lod: LodController::new(lod),
            cache: EvalCache::new(cache_capacity),
        }
    }

    pub fn lod(&self) -> &LodController {
        &self.lod
    }

    pub fn cache(&self) -> &EvalCache {
        &self.cache
    }

    /// Generates geometry for a graph spec at the [`LodTier::Near`] budget.
    ///
    /// Non-mathematical variants (charts, statistics) are out of engine
    /// scope and pass through as `Ok(None)`.
    pub fn generate(
        &mut self,
        spec: &GraphSpec,
        state: &LodState,
    ) -> Result<Option<GraphGeometry>, GraphError> {
        self.generate_at(spec, state, LodTier::Near)
    }

    /// [`generate`](Self::generate) with an explicit tier, for renderers
    /// that classified the graph's on-screen placement via
    /// [`LodController::classify`].
    pub fn generate_at(
        &mut self,
        spec: &GraphSpec,
        state: &LodState,
        tier: LodTier,
    ) -> Result<Option<GraphGeometry>, GraphError> {
        match spec.plot() {
            Some(plot) => Ok(Some(self.generate_plot(plot, state, tier)?)),
            None => Ok(None),
        }
    }

    /// Generates geometry for one mathematical plot. Structural errors abort
    /// before any sampling; the output is always complete or absent.
    pub fn generate_plot(
        &mut self,
        plot: &PlotSpec,
        state: &LodState,
        tier: LodTier,
    ) -> Result<GraphGeometry, GraphError> {
        let compiled = compile(plot)?;
        let base = plot.base_resolution();
        let mut resolution = self.lod.resolution_for(base, state, tier);
        if compiled.is_mesh() {
            resolution = self
                .lod
                .cap_resolution(resolution, self.lod.triangle_budget(tier));
        }
        debug!(
            "generating {} at resolution {resolution} (base {base}, tier {tier:?})",
            plot.kind
        );

        let cache = &mut self.cache;
        let geometry = match &compiled {
            CompiledPlot::Explicit { y_of_x, x } => GraphGeometry::Curve {
                points: curves::explicit_curve(y_of_x, *x, resolution, cache)?,
            },
            CompiledPlot::Parametric { x_of_t, y_of_t, t } => GraphGeometry::Curve {
                points: curves::parametric_curve(x_of_t, y_of_t, *t, resolution, cache)?,
            },
            CompiledPlot::Polar { r_of_theta, theta } => GraphGeometry::Curve {
                points: curves::polar_curve(r_of_theta, *theta, resolution, cache)?,
            },
            CompiledPlot::Area { f, f2, bounds, x } => GraphGeometry::Region {
                pairs: region2d::area_pairs(f, f2.as_ref(), bounds, *x, resolution, cache)?,
            },
            CompiledPlot::Surface { z, x, y } => {
                let mesh = surface::triangulated_mesh(z, *x, *y, resolution, cache)?;
                debug_assert!(mesh.triangle_count() <= self.lod.triangle_budget(tier));
                GraphGeometry::Mesh(mesh)
            }
            CompiledPlot::Volume { f, f2, bounds, x, y } => GraphGeometry::Region {
                pairs: region3d::volume_pairs(f, f2.as_ref(), bounds, *x, *y, resolution, cache)?,
            },
            CompiledPlot::Cylindrical {
                z,
                bounds,
                r,
                theta,
            } => GraphGeometry::Region {
                pairs: region3d::cylindrical_pairs(z, bounds, *r, *theta, resolution, cache)?,
            },
            CompiledPlot::Spherical {
                rho,
                bounds,
                theta,
                phi,
            } => GraphGeometry::Region {
                pairs: region3d::spherical_pairs(rho, bounds, *theta, *phi, resolution, cache)?,
            },
        };
        Ok(geometry)
    }

    /// Grid-ordered point cloud for a `3d_surface` spec, for renderers that
    /// draw points instead of a lit mesh.
    pub fn generate_point_cloud(
        &mut self,
        plot: &PlotSpec,
        state: &LodState,
        tier: LodTier,
    ) -> Result<GraphGeometry, GraphError> {
        let compiled = compile(plot)?;
        let resolution = self.lod.resolution_for(plot.base_resolution(), state, tier);
        match &compiled {
            CompiledPlot::Surface { z, x, y } => Ok(GraphGeometry::PointCloud(
                surface::point_cloud(z, *x, *y, resolution, &mut self.cache)?,
            )),
            _ => Err(GraphError::MissingExpressionSlot {
                kind: plot.kind.to_string(),
                slot: crate::spec::slots::SURFACE_Z,
            }),
        }
    }
}
