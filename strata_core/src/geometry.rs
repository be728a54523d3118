// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Integer geometry types.
//!
//! Layer bounds, scroll positions, and content rectangles are integral in this
//! model; float geometry (positions, anchor points, accumulated scroll deltas)
//! uses [`kurbo`] types directly. These small integer companions cover the
//! subset the scene tree needs without pulling in another geometry crate.

use alloc::vec::Vec;
use core::ops::Sub;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

/// An integer point in layer or screen space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct IntPoint {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
}

impl IntPoint {
    /// The origin.
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Creates a point from coordinates.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the point with each float coordinate rounded toward negative
    /// infinity.
    #[inline]
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "floored coordinates are clamped by the i32 cast"
    )]
    pub fn floored(p: kurbo::Point) -> Self {
        Self {
            x: p.x.floor() as i32,
            y: p.y.floor() as i32,
        }
    }

    /// Converts to a float point.
    #[inline]
    #[must_use]
    pub fn to_point(self) -> kurbo::Point {
        kurbo::Point::new(f64::from(self.x), f64::from(self.y))
    }
}

/// An integer size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct IntSize {
    /// Horizontal extent.
    pub width: i32,
    /// Vertical extent.
    pub height: i32,
}

impl IntSize {
    /// The zero size.
    pub const ZERO: Self = Self {
        width: 0,
        height: 0,
    };

    /// Creates a size from extents.
    #[inline]
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Returns whether either extent is non-positive.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Converts to a float vector.
    #[inline]
    #[must_use]
    pub fn to_vec2(self) -> kurbo::Vec2 {
        kurbo::Vec2::new(f64::from(self.width), f64::from(self.height))
    }
}

impl Sub for IntSize {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self {
            width: self.width - rhs.width,
            height: self.height - rhs.height,
        }
    }
}

/// An axis-aligned integer rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct IntRect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Horizontal extent.
    pub width: i32,
    /// Vertical extent.
    pub height: i32,
}

impl IntRect {
    /// The empty rectangle at the origin.
    pub const ZERO: Self = Self {
        x: 0,
        y: 0,
        width: 0,
        height: 0,
    };

    /// Creates a rectangle from edges and extents.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle at the origin with the given size.
    #[inline]
    #[must_use]
    pub const fn from_size(size: IntSize) -> Self {
        Self {
            x: 0,
            y: 0,
            width: size.width,
            height: size.height,
        }
    }

    /// Returns the smallest integer rectangle containing `rect`.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "enclosing edges are clamped by the i32 cast"
    )]
    pub fn enclosing(rect: kurbo::Rect) -> Self {
        let x0 = rect.x0.floor();
        let y0 = rect.y0.floor();
        let x1 = rect.x1.ceil();
        let y1 = rect.y1.ceil();
        Self {
            x: x0 as i32,
            y: y0 as i32,
            width: (x1 - x0) as i32,
            height: (y1 - y0) as i32,
        }
    }

    /// Returns whether either extent is non-positive.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Returns whether the point lies inside the rectangle.
    ///
    /// The right and bottom edges are exclusive.
    #[inline]
    #[must_use]
    pub const fn contains(self, p: IntPoint) -> bool {
        p.x >= self.x && p.x < self.x + self.width && p.y >= self.y && p.y < self.y + self.height
    }

    /// Converts to a float rectangle.
    #[inline]
    #[must_use]
    pub fn to_rect(self) -> kurbo::Rect {
        kurbo::Rect::new(
            f64::from(self.x),
            f64::from(self.y),
            f64::from(self.x + self.width),
            f64::from(self.y + self.height),
        )
    }
}

/// A set of integer rectangles used for coarse hit queries.
///
/// This is not a minimal-area region representation; membership is a linear
/// scan over the stored rectangles, which is sufficient for the small
/// non-fast-scrollable sets the scroll router consults.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Region {
    rects: Vec<IntRect>,
}

impl Region {
    /// Creates an empty region.
    #[must_use]
    pub const fn new() -> Self {
        Self { rects: Vec::new() }
    }

    /// Adds a rectangle to the region.
    ///
    /// Empty rectangles are ignored.
    pub fn add(&mut self, rect: IntRect) {
        if !rect.is_empty() {
            self.rects.push(rect);
        }
    }

    /// Returns whether the region contains no area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Returns whether the point lies inside any rectangle of the region.
    #[must_use]
    pub fn contains(&self, p: IntPoint) -> bool {
        self.rects.iter().any(|r| r.contains(p))
    }
}

impl From<IntRect> for Region {
    fn from(rect: IntRect) -> Self {
        let mut region = Self::new();
        region.add(rect);
        region
    }
}
