// Copyright 2026 the Inlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The surface hosting leaf node.
//!
//! A [`SurfaceHostingNode`] is an immutable value: a surface handle plus a
//! copy of the [`HostingOptions`]. It is built during the tree engine's build
//! pass, compared against the previous generation with
//! [`diff`](SurfaceHostingNode::diff), and measured with
//! [`measure`](SurfaceHostingNode::measure). None of these touch native views
//! or change surface state, so they are safe on any thread and free to throw
//! away.

use kurbo::Size;

use crate::constraints::SizeConstraints;
use crate::error::HostingError;
use crate::options::{HostingOptions, OptionsDelta, SizingMode};
use crate::surface::{SurfaceKey, SurfaceRef};
use crate::trace::{FailureEvent, HostingPhase, MeasureEvent, Tracer};

/// Leaf descriptor embedding one surface in a component tree.
///
/// Two nodes compare equal when they wrap the same surface (by identity) with
/// equal options. Equal nodes are interchangeable: the engine can keep the
/// mounted container without touching it.
#[derive(Clone, Debug)]
pub struct SurfaceHostingNode {
    surface: SurfaceRef,
    options: HostingOptions,
}

impl SurfaceHostingNode {
    /// Creates a node from an optional surface handle.
    ///
    /// Fails with [`HostingError::InvalidArgument`] when `surface` is `None`.
    /// Does not call into the surface: a dead handle is accepted here and
    /// reported as [`HostingError::SurfaceGone`] by the first operation that
    /// needs the surface.
    pub fn create(
        surface: Option<&SurfaceRef>,
        options: HostingOptions,
    ) -> Result<Self, HostingError> {
        let surface = surface.ok_or(HostingError::InvalidArgument("surface handle is absent"))?;
        Ok(Self::new(surface, options))
    }

    /// Creates a node wrapping `surface`.
    #[must_use]
    pub fn new(surface: &SurfaceRef, options: HostingOptions) -> Self {
        Self {
            surface: surface.clone(),
            options,
        }
    }

    /// Returns the surface handle.
    #[must_use]
    pub fn surface(&self) -> &SurfaceRef {
        &self.surface
    }

    /// Returns the hosting options.
    #[must_use]
    pub fn options(&self) -> &HostingOptions {
        &self.options
    }

    /// Returns the identity key of the wrapped surface.
    #[must_use]
    pub fn key(&self) -> SurfaceKey {
        self.surface.key()
    }

    /// Decides how the engine should move from `self` (the mounted
    /// generation) to `next`.
    #[must_use]
    pub fn diff(&self, next: &Self) -> Diff {
        if !self.surface.same_surface(&next.surface) {
            return Diff::Replace;
        }
        let delta = self.options.diff(&next.options);
        if delta.is_empty() {
            Diff::Reuse
        } else if delta.remount {
            Diff::Remount(delta)
        } else {
            Diff::Update(delta)
        }
    }

    /// Measures the node within `constraints`.
    ///
    /// With [`SizingMode::Intrinsic`] the surface's measurement is returned
    /// unmodified, unless the surface is not ready yet and a placeholder size
    /// is configured. [`SizingMode::Fixed`] never calls into the surface.
    /// [`SizingMode::Fill`] only does so for unbounded axes.
    ///
    /// Surface failures are returned unchanged as [`HostingError::Surface`].
    pub fn measure(&self, constraints: SizeConstraints) -> Result<Measurement, HostingError> {
        match self.options.sizing {
            SizingMode::Fixed(size) => Ok(Measurement {
                size: constraints.constrain(size),
                source: SizeSource::Override,
            }),
            SizingMode::Fill => {
                let bounded_w = constraints.has_bounded_width();
                let bounded_h = constraints.has_bounded_height();
                let max = constraints.max();
                if bounded_w && bounded_h {
                    return Ok(Measurement {
                        size: max,
                        source: SizeSource::Fill,
                    });
                }
                let own = self.measure_intrinsic(constraints)?.size;
                Ok(Measurement {
                    size: Size::new(
                        if bounded_w { max.width } else { own.width },
                        if bounded_h { max.height } else { own.height },
                    ),
                    source: SizeSource::Fill,
                })
            }
            SizingMode::Intrinsic => self.measure_intrinsic(constraints),
        }
    }

    /// Like [`measure`](Self::measure), reporting the result to `tracer`.
    pub fn measure_traced(
        &self,
        constraints: SizeConstraints,
        tracer: &mut Tracer<'_>,
    ) -> Result<Measurement, HostingError> {
        match self.measure(constraints) {
            Ok(measurement) => {
                tracer.measure(&MeasureEvent::new(self, constraints, &measurement));
                Ok(measurement)
            }
            Err(err) => {
                tracer.failure(&FailureEvent::new(
                    self.key(),
                    None,
                    HostingPhase::Measure,
                    &err,
                ));
                Err(err)
            }
        }
    }

    fn measure_intrinsic(&self, constraints: SizeConstraints) -> Result<Measurement, HostingError> {
        let surface = self.surface.upgrade().ok_or(HostingError::SurfaceGone)?;
        if let Some(placeholder) = self.options.placeholder_size
            && !surface.stage().is_ready()
        {
            return Ok(Measurement {
                size: constraints.constrain(placeholder),
                source: SizeSource::Placeholder,
            });
        }
        Ok(Measurement {
            size: surface.measure(constraints)?,
            source: SizeSource::Surface,
        })
    }
}

impl PartialEq for SurfaceHostingNode {
    fn eq(&self, other: &Self) -> bool {
        self.surface.same_surface(&other.surface) && self.options == other.options
    }
}

/// Outcome of comparing two generations of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Diff {
    /// Equivalent nodes; keep everything as is.
    Reuse,
    /// Same surface, options changed in place.
    Update(OptionsDelta),
    /// Same surface, but the container must be rebuilt.
    Remount(OptionsDelta),
    /// A different surface; unmount the old node and mount the new one.
    Replace,
}

impl Diff {
    /// Returns whether the mounted container can be kept untouched.
    #[must_use]
    pub const fn is_reuse(&self) -> bool {
        matches!(self, Self::Reuse)
    }

    /// Returns whether the mounted container must be torn down.
    #[must_use]
    pub const fn tears_down(&self) -> bool {
        matches!(self, Self::Remount(_) | Self::Replace)
    }
}

/// Where a measured size came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SizeSource {
    /// The surface's own measurement.
    Surface,
    /// A [`SizingMode::Fixed`] override.
    Override,
    /// The placeholder size of a surface that is not ready.
    Placeholder,
    /// [`SizingMode::Fill`].
    Fill,
}

/// Result of [`SurfaceHostingNode::measure`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Measurement {
    /// The size to report to the parent.
    pub size: Size,
    /// Where the size came from.
    pub source: SizeSource,
}
