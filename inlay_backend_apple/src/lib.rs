// Copyright 2026 the Inlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Apple backend for inlay.
//!
//! This crate provides a [`ViewHost`] for Apple platforms (macOS, iOS, tvOS,
//! visionOS) that embeds surfaces as `CALayer` sublayers:
//!
//! - [`LayerViewHost`]: container layers plus a registry of surface layers
//! - [`LayerContainer`]: one container per hosting context
//! - [`LayerViewError`]: failures reported through
//!   [`ViewError`](inlay_core::error::ViewError)

#![no_std]

mod calayer;

pub use calayer::{ClassSetup, LayerContainer, LayerViewError, LayerViewHost};
pub use inlay_core::host::ViewHost;

use kurbo::Rect;
use objc2_core_foundation::{CGPoint, CGRect, CGSize};

/// Converts a [`Rect`] to a `CGRect`, normalizing negative extents.
#[must_use]
pub fn to_cg_rect(rect: Rect) -> CGRect {
    let rect = rect.abs();
    CGRect::new(
        CGPoint::new(rect.x0, rect.y0),
        CGSize::new(rect.width(), rect.height()),
    )
}
