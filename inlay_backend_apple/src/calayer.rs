// Copyright 2026 the Inlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `CALayer` container host.
//!
//! Surface owners register each surface's root `CALayer` with a
//! [`LayerViewHost`]. When a surface is mounted, the host creates a container
//! layer under its root layer and re-parents the surface layer into it.
//! Releasing the container detaches the surface layer again; the surface layer
//! itself stays registered and can be hosted again.

use core::cell::Cell;
use core::fmt;

use hashbrown::HashMap;
use inlay_core::error::ViewError;
use inlay_core::host::ViewHost;
use inlay_core::options::{HostingOptions, ViewClass};
use inlay_core::surface::{Surface, SurfaceKey, SurfaceRef};
use kurbo::{Point, Rect};
use objc2::rc::Retained;
use objc2_foundation::MainThreadMarker;
use objc2_quartz_core::{CALayer, CATransaction};

use crate::to_cg_rect;

/// Customizes a freshly created container layer for one [`ViewClass`].
pub type ClassSetup = fn(&CALayer);

/// Errors reported by [`LayerViewHost`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerViewError {
    /// No layer was registered for the surface.
    UnregisteredSurface(SurfaceKey),
    /// No setup was registered for a non-default view class.
    UnknownClass(ViewClass),
}

impl fmt::Display for LayerViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnregisteredSurface(key) => {
                write!(f, "no CALayer registered for surface {key:?}")
            }
            Self::UnknownClass(class) => {
                write!(f, "unknown container class `{}`", class.name())
            }
        }
    }
}

impl core::error::Error for LayerViewError {}

/// A container layer hosting one surface layer.
#[derive(Debug)]
pub struct LayerContainer {
    layer: Retained<CALayer>,
    surface_layer: Retained<CALayer>,
    surface: SurfaceKey,
    class: ViewClass,
    animate_bounds: Cell<bool>,
}

impl LayerContainer {
    /// Returns the container layer.
    #[must_use]
    pub fn layer(&self) -> &CALayer {
        &self.layer
    }

    /// Returns the hosted surface's layer.
    #[must_use]
    pub fn surface_layer(&self) -> &CALayer {
        &self.surface_layer
    }

    /// Returns the key of the hosted surface.
    #[must_use]
    pub fn surface(&self) -> SurfaceKey {
        self.surface
    }

    /// Returns the container class.
    #[must_use]
    pub fn class(&self) -> ViewClass {
        self.class
    }

    /// Returns whether frame changes are animated implicitly.
    #[must_use]
    pub fn animates_bounds(&self) -> bool {
        self.animate_bounds.get()
    }
}

/// [`ViewHost`] that embeds surfaces as sublayers of a root `CALayer`.
///
/// Must be created and used on the main thread.
#[derive(Debug)]
pub struct LayerViewHost {
    _mtm: MainThreadMarker,
    root_layer: Retained<CALayer>,
    surfaces: HashMap<SurfaceKey, Retained<CALayer>>,
    classes: HashMap<ViewClass, ClassSetup>,
}

impl LayerViewHost {
    /// Creates a host that adds container layers to `root_layer`.
    #[must_use]
    pub fn new(mtm: MainThreadMarker, root_layer: Retained<CALayer>) -> Self {
        Self {
            _mtm: mtm,
            root_layer,
            surfaces: HashMap::new(),
            classes: HashMap::new(),
        }
    }

    /// Returns the root `CALayer`.
    #[must_use]
    pub fn root_layer(&self) -> &CALayer {
        &self.root_layer
    }

    /// Registers the root layer of `surface`, returning the one it replaces.
    ///
    /// Unregister before the surface is dropped: surface keys are only unique
    /// among live surfaces.
    pub fn register_surface(
        &mut self,
        surface: &SurfaceRef,
        layer: Retained<CALayer>,
    ) -> Option<Retained<CALayer>> {
        self.surfaces.insert(surface.key(), layer)
    }

    /// Removes the registered layer of `surface`.
    ///
    /// Containers already hosting the layer keep it until released.
    pub fn unregister_surface(&mut self, surface: &SurfaceRef) -> Option<Retained<CALayer>> {
        self.surfaces.remove(&surface.key())
    }

    /// Returns the registered layer for `key`, if any.
    #[must_use]
    pub fn surface_layer(&self, key: SurfaceKey) -> Option<&CALayer> {
        self.surfaces.get(&key).map(|r| &**r)
    }

    /// Registers the setup applied to containers of `class`.
    ///
    /// [`ViewClass::DEFAULT`] works without registration.
    pub fn register_class(&mut self, class: ViewClass, setup: ClassSetup) {
        self.classes.insert(class, setup);
    }

    /// Positions `container` within the root layer.
    ///
    /// The surface layer fills the container. Implicit animations follow the
    /// container's `bounds_animations` option.
    pub fn layout(&self, container: &LayerContainer, frame: Rect) {
        CATransaction::begin();
        CATransaction::setDisableActions(!container.animates_bounds());
        container.layer.setFrame(to_cg_rect(frame));
        container
            .surface_layer
            .setFrame(to_cg_rect(Rect::from_origin_size(Point::ZERO, frame.size())));
        CATransaction::commit();
    }
}

/// Looks up the setup for `class`; `None` means a plain layer.
fn resolve_class(
    classes: &HashMap<ViewClass, ClassSetup>,
    class: ViewClass,
) -> Result<Option<ClassSetup>, LayerViewError> {
    match classes.get(&class) {
        Some(setup) => Ok(Some(*setup)),
        None if class == ViewClass::DEFAULT => Ok(None),
        None => Err(LayerViewError::UnknownClass(class)),
    }
}

fn without_actions(f: impl FnOnce()) {
    CATransaction::begin();
    CATransaction::setDisableActions(true);
    f();
    CATransaction::commit();
}

impl ViewHost for LayerViewHost {
    type Container = LayerContainer;

    fn create_container(
        &mut self,
        _surface: &dyn Surface,
        key: SurfaceKey,
        class: ViewClass,
    ) -> Result<LayerContainer, ViewError> {
        let surface_layer = self
            .surfaces
            .get(&key)
            .cloned()
            .ok_or(LayerViewError::UnregisteredSurface(key))
            .map_err(ViewError::new)?;
        let setup = resolve_class(&self.classes, class).map_err(ViewError::new)?;

        let layer = CALayer::new();
        layer.setMasksToBounds(true);
        if let Some(setup) = setup {
            setup(&layer);
        }
        without_actions(|| {
            // Moves the surface layer out of any previous container.
            layer.addSublayer(&surface_layer);
            self.root_layer.addSublayer(&layer);
        });

        Ok(LayerContainer {
            layer,
            surface_layer,
            surface: key,
            class,
            animate_bounds: Cell::new(true),
        })
    }

    fn configure(
        &mut self,
        container: &LayerContainer,
        options: &HostingOptions,
    ) -> Result<(), ViewError> {
        container.animate_bounds.set(options.bounds_animations);
        Ok(())
    }

    fn release_container(&mut self, container: LayerContainer) {
        without_actions(|| {
            // The surface layer may have moved on to a newer container.
            if let Some(parent) = container.surface_layer.superlayer()
                && core::ptr::eq(&*parent, &*container.layer)
            {
                container.surface_layer.removeFromSuperlayer();
            }
            container.layer.removeFromSuperlayer();
        });
    }
}
