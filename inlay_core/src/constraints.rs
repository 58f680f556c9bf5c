// Copyright 2026 the Inlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Size constraints passed down during measurement.

use kurbo::Size;

use crate::error::HostingError;

/// Minimum and maximum size a parent allows for a child.
///
/// `max` components may be infinite (unbounded); `min` components are always
/// finite, non-negative and no greater than `max`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SizeConstraints {
    min: Size,
    max: Size,
}

impl SizeConstraints {
    /// Constraints that accept any size.
    pub const UNBOUNDED: Self = Self {
        min: Size::ZERO,
        max: Size::new(f64::INFINITY, f64::INFINITY),
    };

    /// Creates constraints from a minimum and maximum size.
    ///
    /// Rejects NaN, negative or infinite minimums, and minimums larger than
    /// the maximum.
    pub fn new(min: Size, max: Size) -> Result<Self, HostingError> {
        let valid_axis =
            |lo: f64, hi: f64| lo.is_finite() && lo >= 0.0 && !hi.is_nan() && lo <= hi;
        if valid_axis(min.width, max.width) && valid_axis(min.height, max.height) {
            Ok(Self { min, max })
        } else {
            Err(HostingError::InvalidArgument("size constraints are inconsistent"))
        }
    }

    /// Constraints that accept exactly `size`.
    ///
    /// Rejects sizes that are not finite and non-negative.
    pub fn tight(size: Size) -> Result<Self, HostingError> {
        Self::new(size, size)
    }

    /// Constraints from zero up to `max`.
    pub fn loose(max: Size) -> Result<Self, HostingError> {
        Self::new(Size::ZERO, max)
    }

    /// Returns the minimum size.
    #[must_use]
    pub const fn min(&self) -> Size {
        self.min
    }

    /// Returns the maximum size.
    #[must_use]
    pub const fn max(&self) -> Size {
        self.max
    }

    /// Returns whether the maximum width is finite.
    #[must_use]
    pub fn has_bounded_width(&self) -> bool {
        self.max.width.is_finite()
    }

    /// Returns whether the maximum height is finite.
    #[must_use]
    pub fn has_bounded_height(&self) -> bool {
        self.max.height.is_finite()
    }

    /// Returns whether only a single size satisfies the constraints.
    #[must_use]
    pub fn is_tight(&self) -> bool {
        self.min == self.max
    }

    /// Clamps `size` into the constraints, axis by axis.
    #[must_use]
    pub fn constrain(&self, size: Size) -> Size {
        Size::new(
            size.width.clamp(self.min.width, self.max.width),
            size.height.clamp(self.min.height, self.max.height),
        )
    }
}

impl Default for SizeConstraints {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}
