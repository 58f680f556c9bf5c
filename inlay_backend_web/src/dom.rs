// Copyright 2026 the Inlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM container host.
//!
//! Surface owners register each surface's root element with a
//! [`DomViewHost`]. Mounting creates an absolutely positioned `<div>` under
//! the host's root element and moves the surface element into it.

use alloc::format;
use alloc::string::String;
use core::fmt;

use hashbrown::HashMap;
use inlay_core::error::ViewError;
use inlay_core::host::ViewHost;
use inlay_core::options::{HostingOptions, ViewClass};
use inlay_core::surface::{Surface, SurfaceKey, SurfaceRef};
use kurbo::Rect;
use wasm_bindgen::{JsCast as _, JsValue};
use web_sys::HtmlElement;

/// Attribute carrying the container's [`ViewClass`] name.
pub const VIEW_CLASS_ATTRIBUTE: &str = "data-view-class";

const BOUNDS_TRANSITION: &str = "left 0.2s, top 0.2s, width 0.2s, height 0.2s";

/// Errors reported by [`DomViewHost`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DomViewError {
    /// The root element is not attached to a document.
    NoDocument,
    /// No element was registered for the surface.
    UnregisteredSurface(SurfaceKey),
    /// A DOM call threw.
    Dom(String),
}

impl fmt::Display for DomViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDocument => f.write_str("root element has no owner document"),
            Self::UnregisteredSurface(key) => {
                write!(f, "no element registered for surface {key:?}")
            }
            Self::Dom(message) => write!(f, "DOM call failed: {message}"),
        }
    }
}

impl core::error::Error for DomViewError {}

fn dom_error(err: JsValue) -> ViewError {
    let message = err.as_string().unwrap_or_else(|| format!("{err:?}"));
    ViewError::new(DomViewError::Dom(message))
}

/// A `<div>` container hosting one surface element.
pub struct DomContainer {
    element: HtmlElement,
    surface_element: HtmlElement,
    surface: SurfaceKey,
    class: ViewClass,
}

impl fmt::Debug for DomContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomContainer")
            .field("element", &"HtmlElement")
            .field("surface_element", &"HtmlElement")
            .field("surface", &self.surface)
            .field("class", &self.class)
            .finish()
    }
}

impl DomContainer {
    /// Returns the container element.
    #[must_use]
    pub fn element(&self) -> &HtmlElement {
        &self.element
    }

    /// Returns the hosted surface's element.
    #[must_use]
    pub fn surface_element(&self) -> &HtmlElement {
        &self.surface_element
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
}

/// [`ViewHost`] that embeds surfaces as children of a root element.
pub struct DomViewHost {
    root: HtmlElement,
    surfaces: HashMap<SurfaceKey, HtmlElement>,
}

impl fmt::Debug for DomViewHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomViewHost")
            .field("root", &"HtmlElement")
            .field("surfaces_len", &self.surfaces.len())
            .finish()
    }
}

impl DomViewHost {
    /// Creates a host that appends containers to `root`.
    ///
    /// `root` should establish a containing block (e.g. `position: relative`).
    #[must_use]
    pub fn new(root: HtmlElement) -> Self {
        Self {
            root,
            surfaces: HashMap::new(),
        }
    }

    /// Returns the root element.
    #[must_use]
    pub fn root(&self) -> &HtmlElement {
        &self.root
    }

    /// Registers the root element of `surface`, returning the one it replaces.
    ///
    /// Unregister before the surface is dropped: surface keys are only unique
    /// among live surfaces.
    pub fn register_surface(
        &mut self,
        surface: &SurfaceRef,
        element: HtmlElement,
    ) -> Option<HtmlElement> {
        self.surfaces.insert(surface.key(), element)
    }

    /// Removes the registered element of `surface`.
    pub fn unregister_surface(&mut self, surface: &SurfaceRef) -> Option<HtmlElement> {
        self.surfaces.remove(&surface.key())
    }

    /// Positions `container` within the root element, in CSS pixels.
    pub fn layout(&self, container: &DomContainer, frame: Rect) {
        let frame = frame.abs();
        let s = container.element.style();
        let _ = s.set_property("left", &px(frame.x0));
        let _ = s.set_property("top", &px(frame.y0));
        let _ = s.set_property("width", &px(frame.width()));
        let _ = s.set_property("height", &px(frame.height()));
    }
}

fn px(v: f64) -> String {
    format!("{v}px")
}

fn transition_value(bounds_animations: bool) -> &'static str {
    if bounds_animations {
        BOUNDS_TRANSITION
    } else {
        "none"
    }
}

impl ViewHost for DomViewHost {
    type Container = DomContainer;

    fn create_container(
        &mut self,
        _surface: &dyn Surface,
        key: SurfaceKey,
        class: ViewClass,
    ) -> Result<DomContainer, ViewError> {
        let surface_element = self
            .surfaces
            .get(&key)
            .cloned()
            .ok_or(DomViewError::UnregisteredSurface(key))
            .map_err(ViewError::new)?;
        let doc = self
            .root
            .owner_document()
            .ok_or(DomViewError::NoDocument)
            .map_err(ViewError::new)?;

        let element: HtmlElement = doc
            .create_element("div")
            .map_err(dom_error)?
            .unchecked_into();
        element
            .set_attribute(VIEW_CLASS_ATTRIBUTE, class.name())
            .map_err(dom_error)?;
        let s = element.style();
        let _ = s.set_property("position", "absolute");
        let _ = s.set_property("overflow", "hidden");
        let _ = s.set_property("left", "0");
        let _ = s.set_property("top", "0");

        let ss = surface_element.style();
        let _ = ss.set_property("width", "100%");
        let _ = ss.set_property("height", "100%");

        // Moves the surface element out of any previous container.
        element.append_child(&surface_element).map_err(dom_error)?;
        self.root.append_child(&element).map_err(dom_error)?;

        Ok(DomContainer {
            element,
            surface_element,
            surface: key,
            class,
        })
    }

    fn configure(
        &mut self,
        container: &DomContainer,
        options: &HostingOptions,
    ) -> Result<(), ViewError> {
        container
            .element
            .style()
            .set_property("transition", transition_value(options.bounds_animations))
            .map_err(dom_error)
    }

    fn release_container(&mut self, container: DomContainer) {
        // The surface element may have moved on to a newer container.
        if container
            .element
            .contains(Some(container.surface_element.as_ref()))
        {
            container.surface_element.remove();
        }
        container.element.remove();
    }
}
