// ─────────────────────────────────────────────────────────────────────
// SCPN Repository Core — Geometry
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Concentric cylindrical shell geometry.
//!
//! An outer radius of `f64::INFINITY` denotes an unbounded shell (far field).

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Point in repository coordinates [m].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Point3 { x, y, z }
    }

    pub fn origin() -> Self {
        Self::default()
    }
}

/// Which face of the shell a radius belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundaryType {
    Inner,
    Outer,
}

/// Cylindrical shell: inner/outer radius, length and centroid.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    inner_radius: f64,
    outer_radius: f64,
    centroid: Point3,
    length: f64,
}

impl Default for Geometry {
    /// Solid (inner radius 0), unbounded, zero-length shell at the origin.
    fn default() -> Self {
        Geometry {
            inner_radius: 0.0,
            outer_radius: f64::INFINITY,
            centroid: Point3::origin(),
            length: 0.0,
        }
    }
}

impl Geometry {
    pub fn new(inner_radius: f64, outer_radius: f64, centroid: Point3, length: f64) -> Self {
        Geometry {
            inner_radius,
            outer_radius,
            centroid,
            length,
        }
    }

    /// Same shape at a new centroid. No two placed objects share a position,
    /// so every copy is stamped with its own.
    pub fn copy_at(&self, centroid: Point3) -> Self {
        Geometry {
            centroid,
            ..self.clone()
        }
    }

    pub fn set_radius(&mut self, boundary: BoundaryType, radius: f64) {
        match boundary {
            BoundaryType::Inner => self.inner_radius = radius,
            BoundaryType::Outer => self.outer_radius = radius,
        }
    }

    pub fn set_centroid(&mut self, centroid: Point3) {
        self.centroid = centroid;
    }

    pub fn set_length(&mut self, length: f64) {
        self.length = length;
    }

    pub fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    pub fn outer_radius(&self) -> f64 {
        self.outer_radius
    }

    pub fn centroid(&self) -> Point3 {
        self.centroid
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn x(&self) -> f64 {
        self.centroid.x
    }

    pub fn y(&self) -> f64 {
        self.centroid.y
    }

    pub fn z(&self) -> f64 {
        self.centroid.z
    }

    pub fn is_unbounded(&self) -> bool {
        self.outer_radius == f64::INFINITY
    }

    /// Shell volume `π·L·(r_o² − r_i²)` [m^3]; infinite for an unbounded shell.
    pub fn volume(&self) -> f64 {
        if self.is_unbounded() {
            return f64::INFINITY;
        }
        Self::solid_volume(self.outer_radius, self.length)
            - Self::solid_volume(self.inner_radius, self.length)
    }

    /// Radius halfway through the shell; infinite for an unbounded shell.
    pub fn radial_midpoint(&self) -> f64 {
        if self.is_unbounded() {
            return f64::INFINITY;
        }
        self.outer_radius - (self.outer_radius - self.inner_radius) / 2.0
    }

    /// Volume of a solid cylinder [m^3].
    pub fn solid_volume(radius: f64, length: f64) -> f64 {
        PI * radius * radius * length
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_geometry() {
        let g = Geometry::default();
        assert_eq!(g.inner_radius(), 0.0);
        assert!(g.outer_radius().is_infinite());
        assert_eq!(g.length(), 0.0);
        assert_eq!(g.centroid(), Point3::origin());
        assert!(g.volume().is_infinite());
        assert!(g.radial_midpoint().is_infinite());
    }

    #[test]
    fn test_shell_volume() {
        let g = Geometry::new(4.0, 5.0, Point3::origin(), 5.0);
        let expected = PI * 5.0 * (25.0 - 16.0);
        assert!((g.volume() - expected).abs() < 1e-10);
        assert!((g.radial_midpoint() - 4.5).abs() < 1e-12);
    }

    #[test]
    fn test_copy_at_is_independent() {
        let g = Geometry::new(1.0, 2.0, Point3::new(1.0, 2.0, 3.0), 4.0);
        let mut c = g.copy_at(Point3::new(9.0, 9.0, 9.0));
        assert_eq!(c.inner_radius(), 1.0);
        assert_eq!(c.length(), 4.0);
        c.set_centroid(Point3::origin());
        assert_eq!(g.x(), 1.0);
        assert_eq!(c.x(), 0.0);
    }

    #[test]
    fn test_set_radius() {
        let mut g = Geometry::default();
        g.set_radius(BoundaryType::Inner, 0.5);
        g.set_radius(BoundaryType::Outer, 1.5);
        assert_eq!(g.inner_radius(), 0.5);
        assert_eq!(g.outer_radius(), 1.5);
        assert!(!g.is_unbounded());
    }
}
