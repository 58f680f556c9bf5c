// Copyright 2026 the Inlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.
//!
//! The hosting seam detects exactly one failure on its own: an absent surface
//! handle handed to [`SurfaceHostingNode::create`], reported as
//! [`HostingError::InvalidArgument`]. Everything else originates in a
//! collaborator (the surface or the native view system) and is carried through
//! unchanged inside [`SurfaceError`] or [`ViewError`]; the original error stays
//! reachable through [`Error::source`](core::error::Error::source) and the
//! `downcast_ref` helpers.
//!
//! [`SurfaceHostingNode::create`]: crate::node::SurfaceHostingNode::create

use alloc::boxed::Box;
use core::error::Error;
use core::fmt;

/// Boxed error type produced by a collaborator.
pub type BoxedError = Box<dyn Error + Send + Sync + 'static>;

/// Errors reported by the hosting seam.
#[derive(Debug)]
pub enum HostingError {
    /// An argument was rejected before any collaborator was contacted.
    InvalidArgument(&'static str),
    /// The surface handle no longer refers to a live surface.
    SurfaceGone,
    /// The surface collaborator reported a failure.
    Surface(SurfaceError),
    /// The native view collaborator reported a failure.
    View(ViewError),
}

impl fmt::Display for HostingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(what) => write!(f, "invalid argument: {what}"),
            Self::SurfaceGone => f.write_str("surface is no longer alive"),
            Self::Surface(err) => write!(f, "surface failure: {err}"),
            Self::View(err) => write!(f, "view failure: {err}"),
        }
    }
}

impl Error for HostingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidArgument(_) | Self::SurfaceGone => None,
            Self::Surface(err) => Some(err.get_ref()),
            Self::View(err) => Some(err.get_ref()),
        }
    }
}

impl From<SurfaceError> for HostingError {
    fn from(err: SurfaceError) -> Self {
        Self::Surface(err)
    }
}

impl From<ViewError> for HostingError {
    fn from(err: ViewError) -> Self {
        Self::View(err)
    }
}

/// A failure reported by a [`Surface`](crate::surface::Surface).
///
/// Wraps the surface's own error value without interpreting it.
pub struct SurfaceError {
    inner: BoxedError,
}

/// A failure reported by a [`ViewHost`](crate::host::ViewHost).
///
/// Wraps the view system's own error value without interpreting it.
pub struct ViewError {
    inner: BoxedError,
}

macro_rules! opaque_error {
    ($name:ident) => {
        impl $name {
            /// Wraps a collaborator error.
            pub fn new<E: Error + Send + Sync + 'static>(err: E) -> Self {
                Self {
                    inner: Box::new(err),
                }
            }

            /// Creates an error carrying only a static message.
            #[must_use]
            pub fn msg(message: &'static str) -> Self {
                Self::new(Message(message))
            }

            /// Returns the wrapped collaborator error.
            #[must_use]
            pub fn get_ref(&self) -> &(dyn Error + Send + Sync + 'static) {
                &*self.inner
            }

            /// Returns the wrapped error if it is of type `E`.
            #[must_use]
            pub fn downcast_ref<E: Error + 'static>(&self) -> Option<&E> {
                self.inner.downcast_ref::<E>()
            }

            /// Consumes the wrapper and returns the collaborator error.
            #[must_use]
            pub fn into_inner(self) -> BoxedError {
                self.inner
            }
        }

        impl From<BoxedError> for $name {
            fn from(inner: BoxedError) -> Self {
                Self { inner }
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.inner).finish()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.inner, f)
            }
        }
    };
}

opaque_error!(SurfaceError);
opaque_error!(ViewError);

/// Static-message error used by [`SurfaceError::msg`] and [`ViewError::msg`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Message(pub &'static str);

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl Error for Message {}
