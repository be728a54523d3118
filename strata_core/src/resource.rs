// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Opaque resource identification.

use core::fmt;

/// An opaque reference to an externally managed drawing resource.
///
/// Resources (textures, surfaces) are created and owned by a resource
/// provider; the scene tree only carries their ids through to the draw pass.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceId(pub u32);

impl fmt::Debug for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ResourceId({})", self.0)
    }
}

/// A capability token for the draw pass.
///
/// Implementations manage GPU-side resources. The scene tree threads a
/// provider through [`will_draw`]/[`did_draw`] without inspecting it; the
/// trait exists so draw hooks can only be entered by callers that actually
/// hold the drawing capability.
///
/// [`will_draw`]: crate::scene::SceneTree::will_draw
/// [`did_draw`]: crate::scene::SceneTree::did_draw
pub trait ResourceProvider {}
