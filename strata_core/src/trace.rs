// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for scene-tree decisions.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that
//! instrumented operations call as they run. All method bodies default to
//! no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace` — enables the `Tracer` method bodies (one branch per call).

use crate::scene::ScrollStatus;

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Why a scroll gesture was not started on the compositor thread.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScrollRejectReason {
    /// The layer is flagged to scroll on the main thread.
    MainThreadFlag,
    /// The layer's screen-space transform has no inverse.
    NonInvertibleTransform,
    /// The hit point fell inside the non-fast-scrollable region.
    NonFastScrollableRegion,
    /// A wheel gesture hit a layer with registered wheel-event handlers.
    WheelEventHandlers,
    /// The layer is not scrollable.
    NotScrollable,
}

/// Emitted for every scroll-routing decision.
#[derive(Clone, Copy, Debug)]
pub struct TryScrollEvent {
    /// Id of the layer the gesture was routed against.
    pub layer_id: i32,
    /// The routing decision.
    pub status: ScrollStatus,
    /// The rejection reason, when the gesture did not start here.
    pub reason: Option<ScrollRejectReason>,
}

/// Emitted when a depth sort over sibling layers is requested.
#[derive(Clone, Copy, Debug)]
pub struct LayerSortEvent {
    /// Number of layers handed to the sorter.
    pub layer_count: usize,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from scene-tree operations.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called with every scroll-routing decision.
    fn on_try_scroll(&mut self, e: &TryScrollEvent) {
        _ = e;
    }

    /// Called when a depth sort is requested.
    fn on_layer_sort(&mut self, e: &LayerSortEvent) {
        _ = e;
    }
}

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`TryScrollEvent`].
    #[inline]
    pub fn try_scroll(&mut self, e: &TryScrollEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_try_scroll(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`LayerSortEvent`].
    #[inline]
    pub fn layer_sort(&mut self, e: &LayerSortEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_layer_sort(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

#[cfg(all(test, feature = "trace"))]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        events: Vec<TryScrollEvent>,
    }

    impl TraceSink for RecordingSink {
        fn on_try_scroll(&mut self, e: &TryScrollEvent) {
            self.events.push(*e);
        }
    }

    #[test]
    fn tracer_dispatches_to_sink() {
        let mut sink = RecordingSink::default();
        let mut tracer = Tracer::new(&mut sink);
        tracer.try_scroll(&TryScrollEvent {
            layer_id: 7,
            status: ScrollStatus::Ignored,
            reason: Some(ScrollRejectReason::NotScrollable),
        });
        drop(tracer);
        assert_eq!(sink.events.len(), 1);
        assert_eq!(sink.events[0].layer_id, 7);
    }

    #[test]
    fn none_tracer_is_silent() {
        let mut tracer = Tracer::none();
        tracer.layer_sort(&LayerSortEvent { layer_count: 3 });
    }
}
