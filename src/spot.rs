//! High-level query compilation and spotting.
//!
//! `CompiledQuery` runs the query-side pipeline once (skeleton, corner
//! seeds, landmark walk, tree assembly) so one query can be spotted against
//! many targets. `Spotter` composes the energy field for a target and ranks
//! its local minima.

use crate::candidate::{find_local_minima, Minimum};
use crate::dt::energy::{compose_energy, EnergyParams};
use crate::field::EnergyField;
use crate::landmark::place_landmarks;
use crate::raster::RasterView;
use crate::skeleton::corners::{detect_corners, CornerParams};
use crate::skeleton::{pad_border, skeletonize};
use crate::trace::{trace_event, trace_span};
use crate::tree::assemble::assemble;
use crate::tree::PartTree;
use crate::util::{GlyphSpotError, GlyphSpotResult};

/// Tunable parameters for the whole pipeline.
///
/// The defaults (spacing 3, corner separation 2, decay 1.5) are the values
/// the energy heuristic was calibrated with.
#[derive(Clone, Copy, Debug)]
pub struct SpotConfig {
    /// Landmark spacing along skeleton branches, in pixels.
    pub spacing: i32,
    /// Minimum Chebyshev separation between corner seeds.
    pub corner_min_distance: usize,
    /// Harris sensitivity factor.
    pub corner_k: f32,
    /// Corner peaks must reach this fraction of the maximum response.
    pub corner_threshold_rel: f32,
    /// Attenuation of child contributions in the energy fold.
    pub decay: f32,
    /// Divisor normalizing the base distance transform.
    pub dt_divisor: f32,
    /// Full extent of the local-minimum filter window; `None` picks
    /// `min(height, width) / 10`.
    pub minima_window: Option<usize>,
    /// Maximum number of ranked candidates to return.
    pub limit: usize,
}

impl Default for SpotConfig {
    fn default() -> Self {
        Self {
            spacing: 3,
            corner_min_distance: 2,
            corner_k: 0.05,
            corner_threshold_rel: 0.1,
            decay: 1.5,
            dt_divisor: 1.0,
            minima_window: None,
            limit: 10,
        }
    }
}

/// A query reduced to its landmark tree, ready for repeated spotting.
#[derive(Debug)]
pub struct CompiledQuery {
    tree: PartTree,
    width: usize,
    height: usize,
}

impl CompiledQuery {
    /// Reduces a binary query raster to a rooted landmark tree.
    ///
    /// Fails with `InvalidInput` when the raster is blank, skeletonizes to
    /// nothing, or yields no corner seeds.
    pub fn compile(query: RasterView<'_>, cfg: &SpotConfig) -> GlyphSpotResult<Self> {
        let _span =
            trace_span!("compile_query", width = query.width(), height = query.height()).entered();
        if query.foreground_count() == 0 {
            return Err(GlyphSpotError::InvalidInput {
                reason: "query raster has no foreground pixels",
            });
        }

        let skeleton = skeletonize(query)?;
        if skeleton.view().foreground_count() == 0 {
            return Err(GlyphSpotError::InvalidInput {
                reason: "query skeletonized to nothing",
            });
        }
        let padded = pad_border(skeleton.view())?;

        let corner_params = CornerParams {
            k: cfg.corner_k,
            threshold_rel: cfg.corner_threshold_rel,
            min_distance: cfg.corner_min_distance,
        };
        let seeds = detect_corners(padded.view(), &corner_params);
        trace_event!("corner_seeds", count = seeds.len());

        let landmarks = place_landmarks(padded.view(), &seeds, cfg.spacing)?;
        trace_event!("landmarks_placed", count = landmarks.points.len());

        let tree = assemble(&landmarks)?;
        Ok(Self {
            tree,
            width: padded.width(),
            height: padded.height(),
        })
    }

    /// Returns the assembled landmark tree.
    pub fn tree(&self) -> &PartTree {
        &self.tree
    }

    /// Width of the (padded) query skeleton raster.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of the (padded) query skeleton raster.
    pub fn height(&self) -> usize {
        self.height
    }
}

/// Target region a candidate maps to, clamped to the target bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    /// Top row of the region in the target.
    pub row: usize,
    /// Left column of the region in the target.
    pub col: usize,
    /// Region width.
    pub width: usize,
    /// Region height.
    pub height: usize,
}

/// One ranked spotting candidate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spot {
    /// Row of the energy minimum in target coordinates.
    pub row: usize,
    /// Column of the energy minimum in target coordinates.
    pub col: usize,
    /// Matching energy at the minimum (lower is better).
    pub energy: f32,
    /// Query-sized region of the target anchored at the root landmark.
    pub region: Region,
}

/// Full result of one spotting run.
#[derive(Debug)]
pub struct Spotting {
    /// Matching energy per target-aligned placement.
    pub energy: EnergyField,
    /// Ranked candidates, best first.
    pub spots: Vec<Spot>,
}

/// Matches one compiled query against target rasters.
pub struct Spotter {
    query: CompiledQuery,
    cfg: SpotConfig,
}

impl Spotter {
    /// Creates a spotter with default configuration.
    pub fn new(query: CompiledQuery) -> Self {
        Self {
            query,
            cfg: SpotConfig::default(),
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, cfg: SpotConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Returns the compiled query.
    pub fn query(&self) -> &CompiledQuery {
        &self.query
    }

    /// Computes the energy field for `target` and ranks its local minima.
    pub fn spot(&self, target: RasterView<'_>) -> GlyphSpotResult<Spotting> {
        let _span =
            trace_span!("spot", width = target.width(), height = target.height()).entered();
        if target.foreground_count() == 0 {
            return Err(GlyphSpotError::InvalidInput {
                reason: "target raster has no foreground pixels",
            });
        }

        let params = EnergyParams {
            decay: self.cfg.decay,
            dt_divisor: self.cfg.dt_divisor,
        };
        let energy = compose_energy(
            self.query.tree(),
            target,
            self.query.width(),
            self.query.height(),
            &params,
        )?;

        let window = self
            .cfg
            .minima_window
            .unwrap_or_else(|| (energy.height().min(energy.width()) / 10).max(1));
        let minima = find_local_minima(&energy, window, self.cfg.limit);
        trace_event!("minima_ranked", count = minima.len());

        let root = self.query.tree.position(self.query.tree.root());
        let spots = minima
            .into_iter()
            .map(|m| self.to_spot(m, target.width(), target.height(), root.row, root.col))
            .collect();

        Ok(Spotting { energy, spots })
    }

    fn to_spot(
        &self,
        minimum: Minimum,
        target_width: usize,
        target_height: usize,
        root_row: i32,
        root_col: i32,
    ) -> Spot {
        // Anchor the query box so its root landmark sits on the minimum;
        // clamp to the target because minima near the border may hang over.
        let row = (minimum.row as i64 - i64::from(root_row)).max(0) as usize;
        let col = (minimum.col as i64 - i64::from(root_col)).max(0) as usize;
        let row = row.min(target_height.saturating_sub(1));
        let col = col.min(target_width.saturating_sub(1));
        let height = self.query.height().min(target_height - row);
        let width = self.query.width().min(target_width - col);
        Spot {
            row: minimum.row,
            col: minimum.col,
            energy: minimum.energy,
            region: Region {
                row,
                col,
                width,
                height,
            },
        }
    }
}
