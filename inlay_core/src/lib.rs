// Copyright 2026 the Inlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host an externally managed render surface as a leaf of a component tree.
//!
//! A *surface* is an independently scheduled render root: it owns its own
//! layout, commit pipeline and activity state. `inlay_core` provides the
//! narrow seam that lets a component-tree engine embed such a surface as an
//! ordinary leaf, without either side owning the other.
//!
//! # Architecture
//!
//! The seam is split along the two phases of a tree engine:
//!
//! ```text
//!   build / diff pass (any thread)           mount pass (UI thread)
//!   ───────────────────────────────          ──────────────────────────────
//!   SurfaceRef + HostingOptions                 HostingController::mount()
//!        │                                          │  ViewHost::create_container
//!        ▼                                          │  Surface::host_mounted
//!   SurfaceHostingNode::create() ──► node ─────────►│
//!        │                                          ▼
//!   SurfaceHostingNode::diff(old, new)         HostingController::update()
//!        │   Reuse / Update / Remount / Replace     │
//!        ▼                                          ▼
//!   SurfaceHostingNode::measure(constraints)   HostingController::unmount()
//!                                                  Surface::host_unmounted
//! ```
//!
//! **[`surface`]**: The [`Surface`](surface::Surface) collaborator trait and
//! [`SurfaceRef`](surface::SurfaceRef), a weak, identity-comparable handle.
//!
//! **[`options`]**: [`HostingOptions`](options::HostingOptions), the immutable
//! configuration payload, and the [`OptionsDelta`](options::OptionsDelta)
//! computed between two generations.
//!
//! **[`constraints`]**: [`SizeConstraints`](constraints::SizeConstraints)
//! handed down by the parent during measurement.
//!
//! **[`node`]**: [`SurfaceHostingNode`](node::SurfaceHostingNode), the
//! immutable leaf descriptor, with diffing and measurement.
//!
//! **[`host`]**: The UI-thread side: [`ViewHost`](host::ViewHost),
//! [`HostingController`](host::HostingController) and the
//! [`HostedLeaf`](host::HostedLeaf) lifecycle trait.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! lifecycle instrumentation, with a zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! **[`error`]**: [`HostingError`](error::HostingError) and the opaque
//! collaborator error wrappers.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod constraints;
pub mod error;
pub mod host;
pub mod node;
pub mod options;
pub mod surface;
pub mod trace;

#[cfg(test)]
mod testing;
