// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree dumps and pretty-printed trace output for strata diagnostics.
//!
//! This crate provides development-time views of a scene tree:
//!
//! - [`tree_dump::layer_tree_as_text`] — an indented textual dump of a
//!   subtree, including masks and replicas.
//! - [`pretty::PrettyPrintSink`] — a
//!   [`TraceSink`](strata_core::trace::TraceSink) writing one line per
//!   event.

pub mod pretty;
pub mod tree_dump;
