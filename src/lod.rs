//! Level-of-detail control: effective sampling resolution and triangle
//! budgets.
//!
//! The controller is stateless beyond its configuration: every method is a
//! pure function of the arguments and the [`LodState`] snapshot the renderer
//! reports, which keeps behavior directly testable.

use serde::{Deserialize, Serialize};

use crate::spec::{Camera, LodState};

/// Discrete detail tier from on-screen distance to the viewport center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LodTier {
    Near,
    Medium,
    Far,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LodConfig {
    /// Floor on effective resolution as a fraction of base.
    pub min_resolution_ratio: f64,
    /// Ceiling on effective resolution as a multiple of base.
    pub max_resolution_ratio: f64,
    /// Zoom factor clamp range.
    pub min_zoom_scale: f64,
    pub max_zoom_scale: f64,
    /// Per-extra-graph crowding penalty.
    pub graph_penalty: f64,
    /// Zoom-scaled distance thresholds for tier classification.
    pub near_distance: f64,
    pub far_distance: f64,
    /// Frame rates at which resolution scaling bottoms out / fully recovers.
    pub low_fps: f64,
    pub full_fps: f64,
    /// Triangle ceilings for far/medium/near meshes.
    pub budget_low: usize,
    pub budget_medium: usize,
    pub budget_high: usize,
}

impl Default for LodConfig {
    fn default() -> Self {
        Self {
            min_resolution_ratio: 0.1,
            max_resolution_ratio: 2.0,
            min_zoom_scale: 0.5,
            max_zoom_scale: 2.0,
            graph_penalty: 0.25,
            near_distance: 4.0,
            far_distance: 12.0,
            low_fps: 30.0,
            full_fps: 50.0,
            budget_low: 5_000,
            budget_medium: 15_000,
            budget_high: 50_000,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LodController {
    cfg: LodConfig,
}

impl LodController {
    pub fn new(cfg: LodConfig) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &LodConfig {
        &self.cfg
    }

    fn resolution_floor(&self, base: usize) -> usize {
        ((base as f64 * self.cfg.min_resolution_ratio).ceil() as usize).max(1)
    }

    fn resolution_ceiling(&self, base: usize) -> usize {
        ((base as f64 * self.cfg.max_resolution_ratio).round() as usize).max(1)
    }

    /// Effective per-axis resolution from zoom and the number of visible
    /// graphs. Equals `base` at zoom 1 with a single graph; non-decreasing
    /// in zoom, non-increasing in graph count, clamped to
    /// `[ceil(min_ratio * base), max_ratio * base]`.
    pub fn effective_resolution(&self, base: usize, zoom: f64, visible_graphs: usize) -> usize {
        let zoom = if zoom.is_finite() { zoom } else { 1.0 };
        let zoom_scale = zoom.clamp(self.cfg.min_zoom_scale, self.cfg.max_zoom_scale);
        let extra = visible_graphs.saturating_sub(1) as f64;
        let crowding = 1.0 / (1.0 + self.cfg.graph_penalty * extra);
        let raw = (base as f64 * zoom_scale * crowding).round() as usize;
        raw.clamp(self.resolution_floor(base), self.resolution_ceiling(base))
    }

    /// Resolution multiplier from the renderer's smoothed frame rate: 1.0 at
    /// or above `full_fps`, 0.5 at or below `low_fps`, linear between.
    pub fn performance_scale(&self, fps: f64) -> f64 {
        if !fps.is_finite() || fps >= self.cfg.full_fps {
            1.0
        } else if fps <= self.cfg.low_fps {
            0.5
        } else {
            0.5 + 0.5 * (fps - self.cfg.low_fps) / (self.cfg.full_fps - self.cfg.low_fps)
        }
    }

    /// Classifies a graph's detail tier from its zoom-scaled in-plane
    /// distance to the camera. An approximation of on-screen distance; the
    /// engine owns no camera state and only reads this snapshot.
    pub fn classify(&self, camera: &Camera, graph_position: [f64; 3]) -> LodTier {
        let dx = graph_position[0] - camera.position[0];
        let dy = graph_position[1] - camera.position[1];
        let zoom = if camera.zoom.is_finite() && camera.zoom > 0.0 {
            camera.zoom
        } else {
            1.0
        };
        let distance = (dx * dx + dy * dy).sqrt() * zoom;
        if distance <= self.cfg.near_distance {
            LodTier::Near
        } else if distance <= self.cfg.far_distance {
            LodTier::Medium
        } else {
            LodTier::Far
        }
    }

    /// Mesh density multiplier per tier.
    pub fn tier_scale(tier: LodTier) -> f64 {
        match tier {
            LodTier::Near => 1.0,
            LodTier::Medium => 0.6,
            LodTier::Far => 0.3,
        }
    }

    /// Triangle ceiling for a mesh at the given tier.
    pub fn triangle_budget(&self, tier: LodTier) -> usize {
        match tier {
            LodTier::Near => self.cfg.budget_high,
            LodTier::Medium => self.cfg.budget_medium,
            LodTier::Far => self.cfg.budget_low,
        }
    }

    /// The largest grid resolution whose full mesh (`2 * res^2` triangles)
    /// fits in `max_triangles`, never exceeding `resolution`. Capping means
    /// re-sampling at this coarser grid, not removing vertices afterwards.
    pub fn cap_resolution(&self, resolution: usize, max_triangles: usize) -> usize {
        let fitting = ((max_triangles as f64 / 2.0).sqrt().floor() as usize).max(1);
        resolution.min(fitting)
    }

    /// The resolution generation actually runs at: effective resolution
    /// scaled by frame-rate pressure and the tier density factor, floored at
    /// `min_resolution_ratio * base`.
    pub fn resolution_for(&self, base: usize, state: &LodState, tier: LodTier) -> usize {
        let effective = self.effective_resolution(base, state.zoom, state.visible_graphs);
        let scaled = effective as f64
            * self.performance_scale(state.smoothed_fps)
            * Self::tier_scale(tier);
        (scaled.round() as usize).clamp(self.resolution_floor(base), effective.max(1))
    }
}
