//! Random star-shaped footprints (clock jitter + cone jitter + replay tokens).
//!
//! Purpose
//! - Deterministic sampler for non-convex footprints used by property tests,
//!   benchmarks, and the CLI `sample` command.
//!
//! Model
//! - Start from `n ≥ 4` equally spaced clock angles on [0, 2π), add bounded
//!   clock jitter and a random cone per vertex, then tilt the ring so its center
//!   (local +Z) sits at the requested direction.
//! - Consecutive clock gaps stay below π, so the ring is star-shaped about its
//!   center: every meridian from the center meets the boundary exactly once.
//!   `StarFootprint::classify_by_sector` uses that to classify without the
//!   shooter tally.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.
//!
//! Code cross-refs: `SlicedPolygon`, `coords::ConeClock`.

use nalgebra::{Rotation3, Vector3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::{PI, TAU};

use crate::coords::{clock_of, wrap_clock, ConeClock};
use crate::error::PolygonError;
use crate::polygon::{Containment, SlicedPolygon};

/// Vertex count distribution (values below 4 are raised to 4).
#[derive(Clone, Copy, Debug)]
pub enum VertexCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}
impl VertexCount {
    fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        match *self {
            VertexCount::Fixed(n) => n.max(4),
            VertexCount::Uniform { min, max } => {
                let lo = min.max(4);
                let hi = max.max(lo);
                rng.gen_range(lo..=hi)
            }
        }
    }
}

/// Star sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct StarCfg {
    pub vertex_count: VertexCount,
    /// Clock jitter as a fraction of the base spacing Δ=2π/n. Clamped to [0, 0.49].
    pub clock_jitter_frac: f64,
    /// Vertex cones are uniform in `[cone_min, cone_max]`, clamped into (0, π).
    pub cone_min: f64,
    pub cone_max: f64,
    /// Random global clock phase in [0, 2π)?
    pub random_phase: bool,
}
impl Default for StarCfg {
    fn default() -> Self {
        Self {
            vertex_count: VertexCount::Fixed(12),
            clock_jitter_frac: 0.3,
            cone_min: 0.2,
            cone_max: 0.9,
            random_phase: true,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}
impl ReplayToken {
    #[inline]
    pub fn new(seed: u64, index: u64) -> Self {
        Self { seed, index }
    }
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing, cheap and stable.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// A star-shaped footprint: ring in its local frame plus the tilt to the world frame.
///
/// Invariants:
/// - `local` is open (no repeated first vertex), sorted by ascending clock.
/// - Consecutive clock gaps (cyclic) lie in (0, π).
#[derive(Clone, Debug)]
pub struct StarFootprint {
    pub local: Vec<Vector3<f64>>,
    pub to_world: Rotation3<f64>,
}

impl StarFootprint {
    /// Closed ring in world coordinates.
    pub fn vertices(&self) -> Vec<Vector3<f64>> {
        let mut out: Vec<Vector3<f64>> = self.local.iter().map(|v| self.to_world * v).collect();
        out.push(out[0]);
        out
    }

    /// Closed ring in world coordinates as (cone, clock).
    pub fn cone_clock(&self) -> Vec<ConeClock> {
        self.vertices().iter().map(ConeClock::from_unit).collect()
    }

    /// The ring center in world coordinates.
    pub fn interior(&self) -> Vector3<f64> {
        self.to_world * Vector3::z()
    }

    pub fn polygon(&self) -> Result<SlicedPolygon, PolygonError> {
        SlicedPolygon::new(&self.vertices(), self.interior())
    }

    /// Classify `p` (world frame) by the single arc whose clock sector contains it.
    pub fn classify_by_sector(&self, p: &Vector3<f64>) -> Containment {
        let q = self.to_world.inverse() * p;
        let theta = clock_of(&q);
        let n = self.local.len();
        let k = self.local.partition_point(|v| clock_of(v) <= theta);
        let (a, b) = if k == 0 || k == n {
            (self.local[n - 1], self.local[0])
        } else {
            (self.local[k - 1], self.local[k])
        };
        let d = q.dot(&a.cross(&b));
        if d > 0.0 {
            Containment::Inside
        } else if d < 0.0 {
            Containment::Outside
        } else {
            Containment::OnBoundary
        }
    }
}

/// Draw a random star-shaped footprint centered at `center`.
pub fn draw_star(cfg: StarCfg, center: ConeClock, tok: ReplayToken) -> StarFootprint {
    let mut rng = tok.to_std_rng();
    let n = cfg.vertex_count.sample(&mut rng);
    let aj = cfg.clock_jitter_frac.clamp(0.0, 0.49);
    let cone_lo = cfg.cone_min.clamp(1e-3, PI - 1e-3);
    let cone_hi = cfg.cone_max.clamp(cone_lo, PI - 1e-3);
    let delta = TAU / (n as f64);
    let phase = if cfg.random_phase {
        rng.gen::<f64>() * TAU
    } else {
        0.0
    };
    let mut local: Vec<Vector3<f64>> = (0..n)
        .map(|k| {
            let jitter = (rng.gen::<f64>() * 2.0 - 1.0) * aj * delta;
            let clock = wrap_clock(phase + (k as f64) * delta + jitter);
            let cone = if cone_hi > cone_lo {
                rng.gen_range(cone_lo..cone_hi)
            } else {
                cone_lo
            };
            ConeClock::new(cone, clock).to_unit()
        })
        .collect();
    local.sort_by(|a, b| clock_of(a).total_cmp(&clock_of(b)));
    let to_world = Rotation3::from_axis_angle(&Vector3::z_axis(), center.clock)
        * Rotation3::from_axis_angle(&Vector3::y_axis(), center.cone);
    StarFootprint { local, to_world }
}

/// `n` directions uniform on the sphere.
pub fn random_directions(n: usize, tok: ReplayToken) -> Vec<Vector3<f64>> {
    let mut rng = tok.to_std_rng();
    (0..n)
        .map(|_| {
            let z: f64 = rng.gen_range(-1.0..1.0);
            let phi = rng.gen::<f64>() * TAU;
            let r = (1.0 - z * z).max(0.0).sqrt();
            Vector3::new(r * phi.cos(), r * phi.sin(), z)
        })
        .collect()
}
