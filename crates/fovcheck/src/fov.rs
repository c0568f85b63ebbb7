//! Sensor field of view: a footprint polygon in the sensor frame plus the
//! body→sensor rotation.
//!
//! The footprint rotation `QI` is composed with the body→sensor rotation once,
//! so classifying a body-frame direction costs one matrix-vector product plus
//! the polygon query.

use nalgebra::{Matrix3, Vector3};
use rayon::prelude::*;
use std::f64::consts::TAU;

use crate::coords::ConeClock;
use crate::error::PolygonError;
use crate::index::AcceleratorKind;
use crate::polygon::{Containment, SlicedPolygon};

/// Closed ring of `n` vertices at constant `cone`, clock angles `k·2π/n`.
pub fn regular_cap(cone: f64, n: usize) -> Vec<ConeClock> {
    let n = n.max(1);
    (0..=n)
        .map(|k| ConeClock::new(cone, (k % n) as f64 * TAU / n as f64))
        .collect()
}

#[derive(Debug)]
pub struct FieldOfView {
    footprint: SlicedPolygon,
    body_to_sensor: Matrix3<f64>,
    body_to_query: Matrix3<f64>,
}

impl FieldOfView {
    pub fn new(footprint: SlicedPolygon, body_to_sensor: Matrix3<f64>) -> Self {
        let body_to_query = footprint.rotation() * body_to_sensor;
        Self {
            footprint,
            body_to_sensor,
            body_to_query,
        }
    }

    /// Footprint given as (cone, clock) boundary in the sensor frame, with the
    /// boresight (sensor +Z) as interior point.
    pub fn from_boundary(
        boundary: &[ConeClock],
        body_to_sensor: Matrix3<f64>,
        accelerator: Option<AcceleratorKind>,
    ) -> Result<Self, PolygonError> {
        let mut builder = SlicedPolygon::builder()
            .cone_clock_vertices(boundary)
            .interior(Vector3::z());
        if let Some(kind) = accelerator {
            builder = builder.accelerator(kind);
        }
        Ok(Self::new(builder.build()?, body_to_sensor))
    }

    #[inline]
    pub fn footprint(&self) -> &SlicedPolygon {
        &self.footprint
    }
    #[inline]
    pub fn body_to_sensor(&self) -> &Matrix3<f64> {
        &self.body_to_sensor
    }
    /// `QI · R_body→sensor`.
    #[inline]
    pub fn body_to_query(&self) -> &Matrix3<f64> {
        &self.body_to_query
    }

    /// Classify a body-frame direction against the footprint.
    #[inline]
    pub fn sees(&self, dir_body: &Vector3<f64>) -> Containment {
        self.footprint.contains_via(&self.body_to_query, dir_body)
    }

    pub fn sees_many(&self, dirs_body: &[Vector3<f64>]) -> Vec<Containment> {
        dirs_body.iter().map(|d| self.sees(d)).collect()
    }

    pub fn par_sees_many(&self, dirs_body: &[Vector3<f64>]) -> Vec<Containment> {
        dirs_body.par_iter().map(|d| self.sees(d)).collect()
    }
}
