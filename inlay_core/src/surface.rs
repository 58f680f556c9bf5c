// Copyright 2026 the Inlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The surface collaborator and its identity handle.
//!
//! A [`Surface`] is owned elsewhere (typically by the runtime that renders
//! into it) and shared through an [`Arc`]. The hosting seam only ever holds a
//! [`SurfaceRef`], a weak handle that:
//!
//! - never extends the surface's lifetime,
//! - compares by pointer identity ([`SurfaceRef::same_surface`]), which is
//!   what "same surface across tree generations" means,
//! - must be upgraded explicitly before any call into the surface, so a torn
//!   down surface is detected rather than assumed alive.

use alloc::sync::{Arc, Weak};
use core::fmt;

use kurbo::Size;

use crate::constraints::SizeConstraints;
use crate::error::SurfaceError;
use crate::host::HostContext;
use crate::options::ActivityState;

/// Coarse lifecycle stage reported by a surface.
///
/// Only read by the hosting seam; the surface drives its own transitions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SurfaceStage {
    /// Still loading or producing its first layout. Measurement may fall back
    /// to a placeholder size.
    Preparing,
    /// Has content and reports meaningful measurements.
    #[default]
    Running,
    /// Stopped by its owner. Still measurable, but no longer updating.
    Stopped,
}

impl SurfaceStage {
    /// Returns whether the surface has content to display.
    #[must_use]
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Running | Self::Stopped)
    }
}

/// An externally managed render root that can be hosted in a component tree.
///
/// All methods take `&self`: measurement and stage queries happen on the tree
/// engine's build thread, lifecycle notifications on the UI thread. Any state
/// change in response is the surface's own business (and its own locking).
///
/// The trait has no operation that destroys the surface: hosting code reports
/// that a host came or went, never that the surface should end.
pub trait Surface: Send + Sync {
    /// Measures the surface's content within the given constraints.
    fn measure(&self, constraints: SizeConstraints) -> Result<Size, SurfaceError>;

    /// Returns the surface's current stage.
    fn stage(&self) -> SurfaceStage {
        SurfaceStage::Running
    }

    /// Called after a host container embedding this surface was created.
    fn host_mounted(&self, host: HostContext) -> Result<(), SurfaceError>;

    /// Called after the container for `host` was released.
    ///
    /// The surface may be hosted again later, or elsewhere.
    fn host_unmounted(&self, host: HostContext) -> Result<(), SurfaceError>;

    /// Called when the activity requested by `host` changes, including once
    /// right after [`host_mounted`](Self::host_mounted).
    fn activity_changed(
        &self,
        host: HostContext,
        activity: ActivityState,
    ) -> Result<(), SurfaceError> {
        _ = (host, activity);
        Ok(())
    }
}

/// Identity of a surface allocation, usable as a map key.
///
/// Derived from the address of the shared allocation. The allocation outlives
/// the surface for as long as any [`SurfaceRef`] to it exists, so a key stays
/// unique while a handle is held.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SurfaceKey(pub usize);

impl fmt::Debug for SurfaceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SurfaceKey({:#x})", self.0)
    }
}

/// A non-owning, identity-comparable handle to a [`Surface`].
///
/// Cloning is cheap (weak count bump) and never keeps the surface alive.
#[derive(Clone)]
pub struct SurfaceRef {
    inner: Weak<dyn Surface>,
}

impl SurfaceRef {
    /// Creates a handle to a concrete surface.
    #[must_use]
    pub fn new<S: Surface + 'static>(surface: &Arc<S>) -> Self {
        let inner: Weak<S> = Arc::downgrade(surface);
        Self { inner }
    }

    /// Creates a handle to a type-erased surface.
    #[must_use]
    pub fn from_dyn(surface: &Arc<dyn Surface>) -> Self {
        Self {
            inner: Arc::downgrade(surface),
        }
    }

    /// Returns a strong reference if the surface is still alive.
    ///
    /// The returned `Arc` should be held only for the duration of a call into
    /// the surface.
    #[must_use]
    pub fn upgrade(&self) -> Option<Arc<dyn Surface>> {
        self.inner.upgrade()
    }

    /// Returns whether the surface is still alive.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    /// Returns whether both handles refer to the same surface allocation.
    #[must_use]
    pub fn same_surface(&self, other: &Self) -> bool {
        Weak::ptr_eq(&self.inner, &other.inner)
    }

    /// Returns the identity key of the referenced surface.
    #[must_use]
    pub fn key(&self) -> SurfaceKey {
        SurfaceKey(self.inner.as_ptr().cast::<()>().addr())
    }
}

impl fmt::Debug for SurfaceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurfaceRef")
            .field("key", &self.key())
            .field("alive", &self.is_alive())
            .finish()
    }
}
