// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Filter effect descriptions.
//!
//! The scene tree stores filter stacks but never evaluates them; rendering is
//! an external concern. Equality is what matters here, since setters use it
//! to suppress spurious damage propagation.

use alloc::vec::Vec;

/// A single filter effect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FilterOp {
    /// Gaussian blur with the given standard deviation in pixels.
    Blur(f64),
    /// Brightness multiplier.
    Brightness(f64),
    /// Contrast multiplier.
    Contrast(f64),
    /// Grayscale amount in `[0, 1]`.
    Grayscale(f64),
    /// Opacity multiplier in `[0, 1]`.
    Opacity(f64),
    /// Saturation multiplier.
    Saturate(f64),
}

/// An ordered stack of filter effects.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterOperations {
    ops: Vec<FilterOp>,
}

impl FilterOperations {
    /// Creates an empty filter stack.
    #[must_use]
    pub const fn new() -> Self {
        Self { ops: Vec::new() }
    }

    /// Appends a filter to the stack.
    pub fn push(&mut self, op: FilterOp) {
        self.ops.push(op);
    }

    /// Returns whether the stack holds no filters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Returns the filters in application order.
    #[must_use]
    pub fn ops(&self) -> &[FilterOp] {
        &self.ops
    }
}
