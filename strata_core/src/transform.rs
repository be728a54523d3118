// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal column-major 4×4 transform.
//!
//! This type covers the subset of 3-D transforms that `strata_core` actually
//! needs (identity, multiply, inversion, plane projection) without pulling in
//! a full linear-algebra crate.

use core::ops::Mul;
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

/// A column-major 4×4 transform stored as `[[f64; 4]; 4]`.
///
/// Each inner array is one *column* of the matrix, matching the memory layout
/// used by GPU APIs and native compositor matrix types.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform3d {
    /// Four columns, each a 4-element array `[x, y, z, w]`.
    pub cols: [[f64; 4]; 4],
}

impl Transform3d {
    /// The 4×4 identity matrix.
    pub const IDENTITY: Self = Self {
        cols: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Creates a transform from a column-major 2-D array.
    #[inline]
    #[must_use]
    pub const fn from_cols_array_2d(cols: [[f64; 4]; 4]) -> Self {
        Self { cols }
    }

    /// Returns column `i` (0-based).
    ///
    /// # Panics
    ///
    /// Panics if `i >= 4`.
    #[inline]
    #[must_use]
    pub const fn col(self, i: usize) -> [f64; 4] {
        self.cols[i]
    }

    /// Creates a pure translation transform.
    #[inline]
    #[must_use]
    pub const fn from_translation(x: f64, y: f64, z: f64) -> Self {
        Self {
            cols: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [x, y, z, 1.0],
            ],
        }
    }

    /// Creates a non-uniform scale transform.
    #[inline]
    #[must_use]
    pub const fn from_scale(sx: f64, sy: f64, sz: f64) -> Self {
        Self {
            cols: [
                [sx, 0.0, 0.0, 0.0],
                [0.0, sy, 0.0, 0.0],
                [0.0, 0.0, sz, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Creates a rotation around the Z axis (radians).
    #[inline]
    #[must_use]
    pub fn from_rotation_z(radians: f64) -> Self {
        #[cfg(feature = "std")]
        let (s, c) = radians.sin_cos();
        #[cfg(not(feature = "std"))]
        let (s, c) = (radians.sin(), radians.cos());
        Self {
            cols: [
                [c, s, 0.0, 0.0],
                [-s, c, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Returns element at `row`, `col` (0-based, row-major indexing).
    #[inline]
    #[must_use]
    pub const fn at(self, row: usize, col: usize) -> f64 {
        self.cols[col][row]
    }

    /// Returns the determinant of the full 4×4 matrix.
    #[must_use]
    pub fn determinant(&self) -> f64 {
        let m = &self.cols;
        let s0 = m[0][0] * m[1][1] - m[1][0] * m[0][1];
        let s1 = m[0][0] * m[1][2] - m[1][0] * m[0][2];
        let s2 = m[0][0] * m[1][3] - m[1][0] * m[0][3];
        let s3 = m[0][1] * m[1][2] - m[1][1] * m[0][2];
        let s4 = m[0][1] * m[1][3] - m[1][1] * m[0][3];
        let s5 = m[0][2] * m[1][3] - m[1][2] * m[0][3];

        let c5 = m[2][2] * m[3][3] - m[3][2] * m[2][3];
        let c4 = m[2][1] * m[3][3] - m[3][1] * m[2][3];
        let c3 = m[2][1] * m[3][2] - m[3][1] * m[2][2];
        let c2 = m[2][0] * m[3][3] - m[3][0] * m[2][3];
        let c1 = m[2][0] * m[3][2] - m[3][0] * m[2][2];
        let c0 = m[2][0] * m[3][1] - m[3][0] * m[2][1];

        s0 * c5 - s1 * c4 + s2 * c3 + s3 * c2 - s4 * c1 + s5 * c0
    }

    /// Returns whether the transform has an inverse.
    #[inline]
    #[must_use]
    pub fn is_invertible(&self) -> bool {
        let det = self.determinant();
        det != 0.0 && det.is_finite()
    }

    /// Returns the inverse transform, or `None` when the matrix is singular
    /// or non-finite.
    #[must_use]
    pub fn inverse(&self) -> Option<Self> {
        let m = &self.cols;
        let s0 = m[0][0] * m[1][1] - m[1][0] * m[0][1];
        let s1 = m[0][0] * m[1][2] - m[1][0] * m[0][2];
        let s2 = m[0][0] * m[1][3] - m[1][0] * m[0][3];
        let s3 = m[0][1] * m[1][2] - m[1][1] * m[0][2];
        let s4 = m[0][1] * m[1][3] - m[1][1] * m[0][3];
        let s5 = m[0][2] * m[1][3] - m[1][2] * m[0][3];

        let c5 = m[2][2] * m[3][3] - m[3][2] * m[2][3];
        let c4 = m[2][1] * m[3][3] - m[3][1] * m[2][3];
        let c3 = m[2][1] * m[3][2] - m[3][1] * m[2][2];
        let c2 = m[2][0] * m[3][3] - m[3][0] * m[2][3];
        let c1 = m[2][0] * m[3][2] - m[3][0] * m[2][2];
        let c0 = m[2][0] * m[3][1] - m[3][0] * m[2][1];

        let det = s0 * c5 - s1 * c4 + s2 * c3 + s3 * c2 - s4 * c1 + s5 * c0;
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let inv = 1.0 / det;

        Some(Self {
            cols: [
                [
                    (m[1][1] * c5 - m[1][2] * c4 + m[1][3] * c3) * inv,
                    (-m[0][1] * c5 + m[0][2] * c4 - m[0][3] * c3) * inv,
                    (m[3][1] * s5 - m[3][2] * s4 + m[3][3] * s3) * inv,
                    (-m[2][1] * s5 + m[2][2] * s4 - m[2][3] * s3) * inv,
                ],
                [
                    (-m[1][0] * c5 + m[1][2] * c2 - m[1][3] * c1) * inv,
                    (m[0][0] * c5 - m[0][2] * c2 + m[0][3] * c1) * inv,
                    (-m[3][0] * s5 + m[3][2] * s2 - m[3][3] * s1) * inv,
                    (m[2][0] * s5 - m[2][2] * s2 + m[2][3] * s1) * inv,
                ],
                [
                    (m[1][0] * c4 - m[1][1] * c2 + m[1][3] * c0) * inv,
                    (-m[0][0] * c4 + m[0][1] * c2 - m[0][3] * c0) * inv,
                    (m[3][0] * s4 - m[3][1] * s2 + m[3][3] * s0) * inv,
                    (-m[2][0] * s4 + m[2][1] * s2 - m[2][3] * s0) * inv,
                ],
                [
                    (-m[1][0] * c3 + m[1][1] * c1 - m[1][2] * c0) * inv,
                    (m[0][0] * c3 - m[0][1] * c1 + m[0][2] * c0) * inv,
                    (-m[3][0] * s3 + m[3][1] * s1 - m[3][2] * s0) * inv,
                    (m[2][0] * s3 - m[2][1] * s1 + m[2][2] * s0) * inv,
                ],
            ],
        })
    }

    /// Projects a 2-D point onto the z = 0 plane of this transform's target
    /// space.
    ///
    /// The point is lifted to the 3-D position whose image lies on the target
    /// plane, then mapped through the matrix with a homogeneous divide.
    /// Returns `None` when the projection is degenerate (the plane is edge-on)
    /// or the mapped point is clipped by the w ≤ 0 half-space.
    #[must_use]
    pub fn project_point(&self, p: kurbo::Point) -> Option<kurbo::Point> {
        let m = &self.cols;
        // Solve for the z that lands on the target plane: row 2 of M·(x,y,z,1)
        // must be zero.
        if m[2][2] == 0.0 {
            return None;
        }
        let z = -(m[0][2] * p.x + m[1][2] * p.y + m[3][2]) / m[2][2];
        if !z.is_finite() {
            return None;
        }

        let x = m[0][0] * p.x + m[1][0] * p.y + m[2][0] * z + m[3][0];
        let y = m[0][1] * p.x + m[1][1] * p.y + m[2][1] * z + m[3][1];
        let w = m[0][3] * p.x + m[1][3] * p.y + m[2][3] * z + m[3][3];
        if w <= 0.0 || !w.is_finite() {
            return None;
        }
        Some(kurbo::Point::new(x / w, y / w))
    }

    /// Is this transform [finite]?
    ///
    /// [finite]: f64::is_finite
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        let c = &self.cols;
        c[0][0].is_finite()
            && c[0][1].is_finite()
            && c[0][2].is_finite()
            && c[0][3].is_finite()
            && c[1][0].is_finite()
            && c[1][1].is_finite()
            && c[1][2].is_finite()
            && c[1][3].is_finite()
            && c[2][0].is_finite()
            && c[2][1].is_finite()
            && c[2][2].is_finite()
            && c[2][3].is_finite()
            && c[3][0].is_finite()
            && c[3][1].is_finite()
            && c[3][2].is_finite()
            && c[3][3].is_finite()
    }
}

impl Default for Transform3d {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Transform3d {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        let a = &self.cols;
        let b = &rhs.cols;
        let mut out = [[0.0_f64; 4]; 4];
        let mut j = 0;
        while j < 4 {
            let mut i = 0;
            while i < 4 {
                out[j][i] =
                    a[0][i] * b[j][0] + a[1][i] * b[j][1] + a[2][i] * b[j][2] + a[3][i] * b[j][3];
                i += 1;
            }
            j += 1;
        }
        Self { cols: out }
    }
}
