// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-node animation bookkeeping.
//!
//! Curve evaluation happens outside this core; the controller only records
//! which surface-relevant properties are currently driven by an animation, so
//! damage and draw passes can ask without reaching into the animation engine.

/// A layer property that can be driven by an animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimatedProperty {
    /// Layer opacity.
    Opacity,
    /// Layer transform.
    Transform,
}

/// Records which properties of one node are animating.
///
/// Every node owns exactly one controller, created with the node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnimationController {
    opacity_animating: bool,
    transform_animating: bool,
}

impl AnimationController {
    /// Creates a controller with no active animations.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            opacity_animating: false,
            transform_animating: false,
        }
    }

    /// Returns whether the given property is animating.
    #[must_use]
    pub const fn is_animating(&self, property: AnimatedProperty) -> bool {
        match property {
            AnimatedProperty::Opacity => self.opacity_animating,
            AnimatedProperty::Transform => self.transform_animating,
        }
    }

    /// Records whether the given property is animating.
    pub const fn set_animating(&mut self, property: AnimatedProperty, animating: bool) {
        match property {
            AnimatedProperty::Opacity => self.opacity_animating = animating,
            AnimatedProperty::Transform => self.transform_animating = animating,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn properties_are_tracked_independently() {
        let mut controller = AnimationController::new();
        assert!(!controller.is_animating(AnimatedProperty::Opacity));

        controller.set_animating(AnimatedProperty::Opacity, true);
        assert!(controller.is_animating(AnimatedProperty::Opacity));
        assert!(!controller.is_animating(AnimatedProperty::Transform));

        controller.set_animating(AnimatedProperty::Opacity, false);
        controller.set_animating(AnimatedProperty::Transform, true);
        assert!(!controller.is_animating(AnimatedProperty::Opacity));
        assert!(controller.is_animating(AnimatedProperty::Transform));
    }
}
