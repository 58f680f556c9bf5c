// Copyright 2026 the Inlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the hosting lifecycle.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! hosting seam calls at each lifecycle step. All method bodies default to
//! no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace` enables the `Tracer` method bodies (one branch per call).

use kurbo::Size;

use crate::constraints::SizeConstraints;
use crate::error::HostingError;
use crate::host::{HostContext, UpdateOutcome};
use crate::node::{Measurement, SizeSource, SurfaceHostingNode};
use crate::options::{ActivityState, ViewClass};
use crate::surface::SurfaceKey;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which lifecycle operation an event belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HostingPhase {
    /// Measurement during the build pass.
    Measure,
    /// Container creation and host notification.
    Mount,
    /// Applying a new node generation to a mounted container.
    Update,
    /// Container release and host notification.
    Unmount,
}

/// Coarse classification of a [`HostingError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// [`HostingError::InvalidArgument`].
    InvalidArgument,
    /// [`HostingError::SurfaceGone`].
    SurfaceGone,
    /// [`HostingError::Surface`].
    Surface,
    /// [`HostingError::View`].
    View,
}

impl From<&HostingError> for FailureKind {
    fn from(err: &HostingError) -> Self {
        match err {
            HostingError::InvalidArgument(_) => Self::InvalidArgument,
            HostingError::SurfaceGone => Self::SurfaceGone,
            HostingError::Surface(_) => Self::Surface,
            HostingError::View(_) => Self::View,
        }
    }
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted after a node was measured.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeasureEvent {
    /// The measured surface.
    pub surface: SurfaceKey,
    /// Constraints handed down by the parent.
    pub constraints: SizeConstraints,
    /// The reported size.
    pub size: Size,
    /// Where the size came from.
    pub source: SizeSource,
}

impl MeasureEvent {
    /// Creates a `MeasureEvent` from a node and its measurement.
    #[must_use]
    pub fn new(
        node: &SurfaceHostingNode,
        constraints: SizeConstraints,
        measurement: &Measurement,
    ) -> Self {
        Self {
            surface: node.key(),
            constraints,
            size: measurement.size,
            source: measurement.source,
        }
    }
}

/// Emitted after a surface was mounted into a new container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MountEvent {
    /// The mounted surface.
    pub surface: SurfaceKey,
    /// The hosting context.
    pub host: HostContext,
    /// Class of the created container.
    pub view_class: ViewClass,
    /// Activity signalled right after mounting.
    pub activity: ActivityState,
}

/// Emitted after a mounted node was moved to a new generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UpdateEvent {
    /// The surface mounted after the update.
    pub surface: SurfaceKey,
    /// The hosting context.
    pub host: HostContext,
    /// What the update did.
    pub outcome: UpdateOutcome,
}

/// Emitted after a container was released.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnmountEvent {
    /// The unmounted surface.
    pub surface: SurfaceKey,
    /// The hosting context.
    pub host: HostContext,
    /// Whether the surface was still alive and got notified.
    pub surface_alive: bool,
}

/// Emitted when a lifecycle operation fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FailureEvent {
    /// The surface involved.
    pub surface: SurfaceKey,
    /// The hosting context, if the failure happened on the mount side.
    pub host: Option<HostContext>,
    /// The failing operation.
    pub phase: HostingPhase,
    /// Classification of the error.
    pub kind: FailureKind,
}

impl FailureEvent {
    /// Creates a `FailureEvent` classifying `err`.
    #[must_use]
    pub fn new(
        surface: SurfaceKey,
        host: Option<HostContext>,
        phase: HostingPhase,
        err: &HostingError,
    ) -> Self {
        Self {
            surface,
            host,
            phase,
            kind: FailureKind::from(err),
        }
    }
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the hosting lifecycle.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called after a node was measured.
    fn on_measure(&mut self, e: &MeasureEvent) {
        _ = e;
    }

    /// Called after a surface was mounted.
    fn on_mount(&mut self, e: &MountEvent) {
        _ = e;
    }

    /// Called after a mounted node was updated.
    fn on_update(&mut self, e: &UpdateEvent) {
        _ = e;
    }

    /// Called after a surface was unmounted.
    fn on_unmount(&mut self, e: &UnmountEvent) {
        _ = e;
    }

    /// Called when a lifecycle operation fails.
    fn on_failure(&mut self, e: &FailureEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

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

impl Default for Tracer<'_> {
    fn default() -> Self {
        Self::none()
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

    /// Emits a [`MeasureEvent`].
    #[inline]
    pub fn measure(&mut self, e: &MeasureEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_measure(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`MountEvent`].
    #[inline]
    pub fn mount(&mut self, e: &MountEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_mount(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`UpdateEvent`].
    #[inline]
    pub fn update(&mut self, e: &UpdateEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_update(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`UnmountEvent`].
    #[inline]
    pub fn unmount(&mut self, e: &UnmountEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_unmount(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`FailureEvent`].
    #[inline]
    pub fn failure(&mut self, e: &FailureEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_failure(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
