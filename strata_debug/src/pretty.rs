// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use strata_core::trace::{LayerSortEvent, TraceSink, TryScrollEvent};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_try_scroll(&mut self, e: &TryScrollEvent) {
        match e.reason {
            Some(reason) => {
                let _ = writeln!(
                    self.writer,
                    "[try_scroll] layer={} status={:?} reason={reason:?}",
                    e.layer_id, e.status,
                );
            }
            None => {
                let _ = writeln!(
                    self.writer,
                    "[try_scroll] layer={} status={:?}",
                    e.layer_id, e.status,
                );
            }
        }
    }

    fn on_layer_sort(&mut self, e: &LayerSortEvent) {
        let _ = writeln!(self.writer, "[layer_sort] count={}", e.layer_count);
    }
}

#[cfg(test)]
mod tests {
    use strata_core::scene::ScrollStatus;
    use strata_core::trace::ScrollRejectReason;

    use super::*;

    #[test]
    fn pretty_print_try_scroll() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_try_scroll(&TryScrollEvent {
            layer_id: 3,
            status: ScrollStatus::OnMainThread,
            reason: Some(ScrollRejectReason::WheelEventHandlers),
        });
        let output = String::from_utf8(sink.writer).unwrap();
        assert_eq!(
            output,
            "[try_scroll] layer=3 status=OnMainThread reason=WheelEventHandlers\n"
        );
    }

    #[test]
    fn pretty_print_started_scroll_has_no_reason() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_try_scroll(&TryScrollEvent {
            layer_id: 1,
            status: ScrollStatus::Started,
            reason: None,
        });
        let output = String::from_utf8(sink.writer).unwrap();
        assert_eq!(output, "[try_scroll] layer=1 status=Started\n");
    }

    #[test]
    fn pretty_print_layer_sort() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_layer_sort(&LayerSortEvent { layer_count: 12 });
        let output = String::from_utf8(sink.writer).unwrap();
        assert_eq!(output, "[layer_sort] count=12\n");
    }
}
