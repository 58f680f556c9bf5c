// Copyright 2026 the Inlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hosting options and option deltas.
//!
//! [`HostingOptions`] is a plain `Copy` value. It is copied into every
//! [`SurfaceHostingNode`](crate::node::SurfaceHostingNode) and compared
//! structurally when the tree engine diffs two generations. Sizes compare bit
//! for bit, so an options value always equals its own copy, NaN sizes
//! included.
//!
//! # Option effects
//!
//! When the surface stays the same and only options change,
//! [`HostingOptions::diff`] reports which effects the update needs:
//!
//! | field              | effect                                   |
//! |--------------------|------------------------------------------|
//! | `sizing`           | [`remeasure`](OptionsDelta::remeasure)   |
//! | `placeholder_size` | [`remeasure`](OptionsDelta::remeasure)   |
//! | `activity`         | [`activity`](OptionsDelta::activity)     |
//! | `bounds_animations`| [`reconfigure`](OptionsDelta::reconfigure)|
//! | `view_class`       | [`remount`](OptionsDelta::remount)       |
//!
//! Only a view class change tears the container down.

use core::fmt;

use kurbo::Size;

/// Size reported while a surface is still preparing its first layout.
pub const DEFAULT_PLACEHOLDER_SIZE: Size = Size::new(44.0, 44.0);

/// How a hosted surface is sized within its parent's constraints.
#[derive(Clone, Copy, Debug, Default)]
pub enum SizingMode {
    /// Report the surface's own measurement unmodified.
    #[default]
    Intrinsic,
    /// Report a fixed size (clamped to the constraints), ignoring the surface.
    Fixed(Size),
    /// Take the maximum size on every bounded axis. Unbounded axes fall back
    /// to the surface's own measurement.
    Fill,
}

impl PartialEq for SizingMode {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Intrinsic, Self::Intrinsic) | (Self::Fill, Self::Fill) => true,
            (Self::Fixed(a), Self::Fixed(b)) => same_size(*a, *b),
            _ => false,
        }
    }
}

fn same_size(a: Size, b: Size) -> bool {
    a.width.to_bits() == b.width.to_bits() && a.height.to_bits() == b.height.to_bits()
}

fn same_placeholder(a: Option<Size>, b: Option<Size>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => same_size(a, b),
        (None, None) => true,
        _ => false,
    }
}

/// Activity a host requests from the surface it embeds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ActivityState {
    /// Visible and updating.
    #[default]
    Active,
    /// Mounted but not visible (e.g. scrolled offscreen). May throttle.
    Inactive,
    /// Mounted but should stop producing frames until reactivated.
    Suspended,
}

/// Identifies the class of native container a view host creates.
///
/// Interpreted only by [`ViewHost`](crate::host::ViewHost) implementations.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewClass(pub &'static str);

impl ViewClass {
    /// The view host's plain container class.
    pub const DEFAULT: Self = Self("surface-host");

    /// Returns the class name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.0
    }
}

impl Default for ViewClass {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Debug for ViewClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ViewClass({:?})", self.0)
    }
}

/// Configuration governing how a surface is measured and mounted.
///
/// Presets are built with [`new`](Self::new) and the `with_*` methods:
///
/// ```
/// use inlay_core::options::{ActivityState, HostingOptions, SizingMode};
///
/// let options = HostingOptions::new()
///     .with_sizing(SizingMode::Fill)
///     .with_activity(ActivityState::Inactive);
/// assert!(options.bounds_animations);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct HostingOptions {
    /// Sizing strategy.
    pub sizing: SizingMode,
    /// Activity requested from the surface while mounted.
    pub activity: ActivityState,
    /// Container class override.
    pub view_class: ViewClass,
    /// Size reported while the surface is not ready. `None` measures the
    /// surface regardless of its stage.
    pub placeholder_size: Option<Size>,
    /// Whether the container animates bounds changes.
    pub bounds_animations: bool,
}

impl PartialEq for HostingOptions {
    fn eq(&self, other: &Self) -> bool {
        self.sizing == other.sizing
            && self.activity == other.activity
            && self.view_class == other.view_class
            && same_placeholder(self.placeholder_size, other.placeholder_size)
            && self.bounds_animations == other.bounds_animations
    }
}

impl Default for HostingOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl HostingOptions {
    /// Default options: intrinsic sizing, active, default container class,
    /// a 44x44 placeholder and animated bounds.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sizing: SizingMode::Intrinsic,
            activity: ActivityState::Active,
            view_class: ViewClass::DEFAULT,
            placeholder_size: Some(DEFAULT_PLACEHOLDER_SIZE),
            bounds_animations: true,
        }
    }

    /// Returns a copy with the given sizing mode.
    #[must_use]
    pub const fn with_sizing(mut self, sizing: SizingMode) -> Self {
        self.sizing = sizing;
        self
    }

    /// Returns a copy with the given activity state.
    #[must_use]
    pub const fn with_activity(mut self, activity: ActivityState) -> Self {
        self.activity = activity;
        self
    }

    /// Returns a copy with the given container class.
    #[must_use]
    pub const fn with_view_class(mut self, view_class: ViewClass) -> Self {
        self.view_class = view_class;
        self
    }

    /// Returns a copy with the given placeholder size.
    #[must_use]
    pub const fn with_placeholder_size(mut self, placeholder_size: Option<Size>) -> Self {
        self.placeholder_size = placeholder_size;
        self
    }

    /// Returns a copy with bounds animations enabled or disabled.
    #[must_use]
    pub const fn with_bounds_animations(mut self, bounds_animations: bool) -> Self {
        self.bounds_animations = bounds_animations;
        self
    }

    /// Computes the effects of moving from `self` to `next`.
    #[must_use]
    pub fn diff(&self, next: &Self) -> OptionsDelta {
        OptionsDelta {
            remeasure: self.sizing != next.sizing
                || !same_placeholder(self.placeholder_size, next.placeholder_size),
            activity: self.activity != next.activity,
            reconfigure: self.bounds_animations != next.bounds_animations,
            remount: self.view_class != next.view_class,
        }
    }
}

/// Effects required to move a mounted surface from one set of options to
/// another.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct OptionsDelta {
    /// Sizing inputs changed; the engine must measure again.
    pub remeasure: bool,
    /// The activity state changed; the surface must be signalled.
    pub activity: bool,
    /// Container-level settings changed; the view host must reconfigure.
    pub reconfigure: bool,
    /// The container class changed; the container must be rebuilt.
    pub remount: bool,
}

impl OptionsDelta {
    /// Returns whether no effect is required.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !(self.remeasure || self.activity || self.reconfigure || self.remount)
    }
}
