// Copyright 2026 the Inlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mount-side contract: native containers and the hosting controller.
//!
//! Everything in this module runs on the UI thread. A [`ViewHost`] creates
//! and releases the native containers that embed a surface's own view; a
//! [`HostingController`] owns one such container on behalf of the tree engine
//! and moves it between node generations:
//!
//! ```text
//!   mount(node)            create_container ─► configure ─► host_mounted ─► activity_changed
//!   update(next) Reuse     (nothing)
//!                Update    configure? ─► activity_changed?
//!                Remount   release_container ─► host_unmounted ─► (mount next)
//!                Replace   release_container ─► host_unmounted ─► (mount next)
//!   unmount()              release_container ─► host_unmounted
//! ```
//!
//! The surface itself is never destroyed: it only learns that a host came or
//! went.

use core::fmt;

use kurbo::Size;

use crate::constraints::SizeConstraints;
use crate::error::{HostingError, ViewError};
use crate::node::{Diff, SurfaceHostingNode};
use crate::options::{HostingOptions, OptionsDelta, ViewClass};
use crate::surface::{Surface, SurfaceKey};
use crate::trace::{FailureEvent, HostingPhase, MountEvent, Tracer, UnmountEvent, UpdateEvent};

/// Identifies one hosting context (one mounted slot in the host tree).
///
/// Assigned by the tree engine; passed to the surface with every lifecycle
/// notification so a surface hosted in several places can tell them apart.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct HostContext(pub u32);

impl fmt::Debug for HostContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HostContext({})", self.0)
    }
}

/// Creates and releases the native containers that embed surfaces.
///
/// Implementations wrap a platform view system (e.g. `CALayer` or DOM
/// elements) and are used from the UI thread only; they need not be `Send`.
pub trait ViewHost {
    /// The native container type.
    type Container;

    /// Creates a container of class `class` hosting the view of `surface`.
    fn create_container(
        &mut self,
        surface: &dyn Surface,
        key: SurfaceKey,
        class: ViewClass,
    ) -> Result<Self::Container, ViewError>;

    /// Applies container-level options (e.g. bounds animations).
    ///
    /// Called once after creation and again whenever those options change.
    fn configure(
        &mut self,
        container: &Self::Container,
        options: &HostingOptions,
    ) -> Result<(), ViewError>;

    /// Detaches and drops a container. Must not affect the hosted surface.
    fn release_container(&mut self, container: Self::Container);
}

/// UI-thread collaborators handed to mount-side operations.
pub struct MountContext<'a, V: ?Sized> {
    /// The native view system.
    pub views: &'a mut V,
    /// Receives lifecycle events.
    pub tracer: Tracer<'a>,
}

impl<V: ?Sized> fmt::Debug for MountContext<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MountContext")
            .field("tracer", &self.tracer)
            .finish_non_exhaustive()
    }
}

impl<'a, V: ViewHost + ?Sized> MountContext<'a, V> {
    /// Creates a context without tracing.
    #[must_use]
    pub fn new(views: &'a mut V) -> Self {
        Self {
            views,
            tracer: Tracer::none(),
        }
    }

    /// Creates a context that reports to `tracer`.
    #[must_use]
    pub fn with_tracer(views: &'a mut V, tracer: Tracer<'a>) -> Self {
        Self { views, tracer }
    }
}

/// What [`HostingController::update`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UpdateOutcome {
    /// The new node was equivalent; nothing was touched.
    Reused,
    /// Options were applied in place.
    Updated(OptionsDelta),
    /// The container was rebuilt for the same surface.
    Remounted,
    /// The old surface was unmounted and a different one mounted.
    Replaced,
}

impl UpdateOutcome {
    /// Returns whether the engine must measure the node again.
    #[must_use]
    pub const fn needs_layout(&self) -> bool {
        match self {
            Self::Reused => false,
            Self::Updated(delta) => delta.remeasure,
            Self::Remounted | Self::Replaced => true,
        }
    }
}

/// Mount-side state of a [`SurfaceHostingNode`].
///
/// The node is an immutable value and cannot own a native view; the tree
/// engine keeps one controller per mounted slot instead. `C` is the
/// [`ViewHost::Container`] type.
///
/// A controller dropped without [`unmount`](Self::unmount) leaks its
/// container's registration with the surface: always unmount explicitly.
pub struct HostingController<C> {
    node: SurfaceHostingNode,
    host: HostContext,
    container: Option<C>,
}

impl<C> fmt::Debug for HostingController<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostingController")
            .field("node", &self.node)
            .field("host", &self.host)
            .field("mounted", &self.container.is_some())
            .finish_non_exhaustive()
    }
}

impl<C> HostingController<C> {
    /// Mounts `node` into a new container for hosting context `host`.
    ///
    /// Creates and configures the container, then notifies the surface and
    /// signals the requested activity. If any step fails, everything done so
    /// far is rolled back and the original error is returned.
    pub fn mount<V>(
        node: SurfaceHostingNode,
        host: HostContext,
        cx: &mut MountContext<'_, V>,
    ) -> Result<Self, HostingError>
    where
        V: ViewHost<Container = C> + ?Sized,
    {
        match attach(&node, host, cx.views) {
            Ok(container) => {
                cx.tracer.mount(&MountEvent {
                    surface: node.key(),
                    host,
                    view_class: node.options().view_class,
                    activity: node.options().activity,
                });
                Ok(Self {
                    node,
                    host,
                    container: Some(container),
                })
            }
            Err(err) => {
                cx.tracer.failure(&FailureEvent::new(
                    node.key(),
                    Some(host),
                    HostingPhase::Mount,
                    &err,
                ));
                Err(err)
            }
        }
    }

    /// Moves the mounted slot to the next node generation.
    ///
    /// Equivalent nodes are kept as is. A changed option set on the same
    /// surface is applied in place unless the view class changed. A different
    /// surface replaces the old one.
    ///
    /// If a remount fails after the old container was released, the
    /// controller is left without a container; the next `update` mounts
    /// from scratch and [`unmount`](Self::unmount) becomes a no-op.
    pub fn update<V>(
        &mut self,
        next: SurfaceHostingNode,
        cx: &mut MountContext<'_, V>,
    ) -> Result<UpdateOutcome, HostingError>
    where
        V: ViewHost<Container = C> + ?Sized,
    {
        match self.advance(next, cx.views) {
            Ok(outcome) => {
                cx.tracer.update(&UpdateEvent {
                    surface: self.node.key(),
                    host: self.host,
                    outcome,
                });
                Ok(outcome)
            }
            Err(err) => {
                cx.tracer.failure(&FailureEvent::new(
                    self.node.key(),
                    Some(self.host),
                    HostingPhase::Update,
                    &err,
                ));
                Err(err)
            }
        }
    }

    /// Releases the container and tells the surface this host is gone.
    ///
    /// A surface that died while mounted is not an error: the container is
    /// still released, there is just nobody left to notify.
    pub fn unmount<V>(self, cx: &mut MountContext<'_, V>) -> Result<(), HostingError>
    where
        V: ViewHost<Container = C> + ?Sized,
    {
        let Self {
            node,
            host,
            container,
        } = self;
        let Some(container) = container else {
            return Ok(());
        };
        match detach(&node, host, container, cx.views) {
            Ok(surface_alive) => {
                cx.tracer.unmount(&UnmountEvent {
                    surface: node.key(),
                    host,
                    surface_alive,
                });
                Ok(())
            }
            Err(err) => {
                cx.tracer.failure(&FailureEvent::new(
                    node.key(),
                    Some(host),
                    HostingPhase::Unmount,
                    &err,
                ));
                Err(err)
            }
        }
    }

    /// Returns the currently applied node.
    #[must_use]
    pub fn node(&self) -> &SurfaceHostingNode {
        &self.node
    }

    /// Returns the hosting context.
    #[must_use]
    pub fn host(&self) -> HostContext {
        self.host
    }

    /// Returns the native container, if mounted.
    #[must_use]
    pub fn container(&self) -> Option<&C> {
        self.container.as_ref()
    }

    /// Returns whether a container is currently mounted.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.container.is_some()
    }

    fn advance<V>(
        &mut self,
        next: SurfaceHostingNode,
        views: &mut V,
    ) -> Result<UpdateOutcome, HostingError>
    where
        V: ViewHost<Container = C> + ?Sized,
    {
        let outcome = match (self.node.diff(&next), &self.container) {
            (Diff::Reuse, Some(_)) => UpdateOutcome::Reused,
            (Diff::Update(delta), Some(container)) => {
                apply_delta(
                    container,
                    self.host,
                    self.node.options(),
                    &next,
                    delta,
                    views,
                )?;
                UpdateOutcome::Updated(delta)
            }
            (Diff::Replace, _) => {
                self.reattach(&next, views)?;
                UpdateOutcome::Replaced
            }
            // Remount, or any change after a failed remount left no container.
            (Diff::Reuse | Diff::Update(_) | Diff::Remount(_), _) => {
                self.reattach(&next, views)?;
                UpdateOutcome::Remounted
            }
        };
        self.node = next;
        Ok(outcome)
    }

    fn reattach<V>(&mut self, next: &SurfaceHostingNode, views: &mut V) -> Result<(), HostingError>
    where
        V: ViewHost<Container = C> + ?Sized,
    {
        if let Some(container) = self.container.take() {
            detach(&self.node, self.host, container, views)?;
        }
        self.container = Some(attach(next, self.host, views)?);
        Ok(())
    }
}

/// Creates a container for `node` and notifies its surface.
fn attach<V>(
    node: &SurfaceHostingNode,
    host: HostContext,
    views: &mut V,
) -> Result<V::Container, HostingError>
where
    V: ViewHost + ?Sized,
{
    let surface = node.surface().upgrade().ok_or(HostingError::SurfaceGone)?;
    let options = node.options();
    let container = views.create_container(&*surface, node.key(), options.view_class)?;
    if let Err(err) = views.configure(&container, options) {
        views.release_container(container);
        return Err(err.into());
    }
    if let Err(err) = surface.host_mounted(host) {
        views.release_container(container);
        return Err(err.into());
    }
    if let Err(err) = surface.activity_changed(host, options.activity) {
        views.release_container(container);
        // The activity failure is the one reported.
        _ = surface.host_unmounted(host);
        return Err(err.into());
    }
    Ok(container)
}

/// Releases `container` and notifies the surface if it is still alive.
///
/// Returns whether the surface was alive.
fn detach<V>(
    node: &SurfaceHostingNode,
    host: HostContext,
    container: V::Container,
    views: &mut V,
) -> Result<bool, HostingError>
where
    V: ViewHost + ?Sized,
{
    views.release_container(container);
    match node.surface().upgrade() {
        Some(surface) => {
            surface.host_unmounted(host)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Applies an in-place option change.
///
/// On failure the container is put back to `current`, so it keeps matching
/// the node the controller still holds.
fn apply_delta<V>(
    container: &V::Container,
    host: HostContext,
    current: &HostingOptions,
    next: &SurfaceHostingNode,
    delta: OptionsDelta,
    views: &mut V,
) -> Result<(), HostingError>
where
    V: ViewHost + ?Sized,
{
    if delta.reconfigure {
        views.configure(container, next.options())?;
    }
    if delta.activity {
        let signalled = match next.surface().upgrade() {
            Some(surface) => surface
                .activity_changed(host, next.options().activity)
                .map_err(HostingError::from),
            None => Err(HostingError::SurfaceGone),
        };
        if let Err(err) = signalled {
            if delta.reconfigure {
                // The activity failure is the one reported.
                _ = views.configure(container, current);
            }
            return Err(err);
        }
    }
    Ok(())
}

/// Lifecycle of a leaf whose content is managed outside the component tree.
///
/// A tree engine drives leaves through this trait: `measure` during layout on
/// any thread, the `on_*` methods on the UI thread.
pub trait HostedLeaf: Sized {
    /// Mount-side state kept by the engine while the leaf is mounted, for a
    /// view host with container type `C`.
    type Mounted<C>;

    /// Reports the size the leaf needs within `constraints`.
    fn measure(&self, constraints: SizeConstraints) -> Result<Size, HostingError>;

    /// Mounts the leaf into hosting context `host`.
    fn on_mount<V: ViewHost + ?Sized>(
        self,
        host: HostContext,
        cx: &mut MountContext<'_, V>,
    ) -> Result<Self::Mounted<V::Container>, HostingError>;

    /// Applies `self` as the next generation of an already mounted leaf.
    fn on_update<V: ViewHost + ?Sized>(
        self,
        mounted: &mut Self::Mounted<V::Container>,
        cx: &mut MountContext<'_, V>,
    ) -> Result<UpdateOutcome, HostingError>;

    /// Unmounts a mounted leaf.
    fn on_unmount<V: ViewHost + ?Sized>(
        mounted: Self::Mounted<V::Container>,
        cx: &mut MountContext<'_, V>,
    ) -> Result<(), HostingError>;
}

impl HostedLeaf for SurfaceHostingNode {
    type Mounted<C> = HostingController<C>;

    fn measure(&self, constraints: SizeConstraints) -> Result<Size, HostingError> {
        Self::measure(self, constraints).map(|m| m.size)
    }

    fn on_mount<V: ViewHost + ?Sized>(
        self,
        host: HostContext,
        cx: &mut MountContext<'_, V>,
    ) -> Result<HostingController<V::Container>, HostingError> {
        HostingController::mount(self, host, cx)
    }

    fn on_update<V: ViewHost + ?Sized>(
        self,
        mounted: &mut HostingController<V::Container>,
        cx: &mut MountContext<'_, V>,
    ) -> Result<UpdateOutcome, HostingError> {
        mounted.update(self, cx)
    }

    fn on_unmount<V: ViewHost + ?Sized>(
        mounted: HostingController<V::Container>,
        cx: &mut MountContext<'_, V>,
    ) -> Result<(), HostingError> {
        mounted.unmount(cx)
    }
}

#[cfg(test)]
mod tests {
    use alloc::sync::Arc;
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;
    use crate::error::Message;
    use crate::options::ActivityState;
    use crate::surface::SurfaceRef;
    use crate::testing::{Calls, MockContainer, MockSurface, MockViewHost};

    fn node(surface: &Arc<MockSurface>, options: HostingOptions) -> SurfaceHostingNode {
        SurfaceHostingNode::new(&SurfaceRef::new(surface), options)
    }

    fn mount(
        views: &mut MockViewHost,
        node: SurfaceHostingNode,
    ) -> HostingController<MockContainer> {
        HostingController::mount(node, HostContext(1), &mut MountContext::new(views)).unwrap()
    }

    #[test]
    fn construction_has_no_effect_until_mount() {
        let surface = MockSurface::arc(Size::new(10.0, 10.0));
        let mut views = MockViewHost::default();
        let n = SurfaceHostingNode::create(
            Some(&SurfaceRef::new(&surface)),
            HostingOptions::new(),
        )
        .unwrap();
        assert_eq!(surface.calls(), Calls::default());
        assert_eq!(views.created, 0);

        let key = n.key();
        let controller = mount(&mut views, n);
        assert!(controller.is_mounted());
        assert_eq!(controller.container().unwrap().surface, key);
        assert_eq!(views.created, 1);
        assert_eq!(surface.calls().host_mounted, 1);
        assert_eq!(
            surface.activity_log(),
            vec![(HostContext(1), ActivityState::Active)]
        );
    }

    #[test]
    fn equivalent_update_is_reused() {
        let surface = MockSurface::arc(Size::ZERO);
        let mut views = MockViewHost::default();
        let mut controller = mount(&mut views, node(&surface, HostingOptions::new()));
        let before = surface.calls();

        let outcome = controller
            .update(
                node(&surface, HostingOptions::new()),
                &mut MountContext::new(&mut views),
            )
            .unwrap();
        assert_eq!(outcome, UpdateOutcome::Reused);
        assert!(!outcome.needs_layout());
        assert_eq!(surface.calls(), before);
        assert_eq!(views.created, 1);
        assert_eq!(views.configured.len(), 1);
    }

    #[test]
    fn activity_change_is_applied_in_place() {
        let surface = MockSurface::arc(Size::ZERO);
        let mut views = MockViewHost::default();
        let mut controller = mount(&mut views, node(&surface, HostingOptions::new()));

        let next = node(
            &surface,
            HostingOptions::new().with_activity(ActivityState::Suspended),
        );
        let outcome = controller
            .update(next, &mut MountContext::new(&mut views))
            .unwrap();

        assert!(matches!(outcome, UpdateOutcome::Updated(delta) if delta.activity));
        assert!(!outcome.needs_layout());
        assert_eq!(views.created, 1);
        assert_eq!(views.released, 0);
        assert_eq!(surface.calls().host_unmounted, 0);
        assert_eq!(
            surface.activity_log(),
            vec![
                (HostContext(1), ActivityState::Active),
                (HostContext(1), ActivityState::Suspended),
            ]
        );
        assert_eq!(
            controller.node().options().activity,
            ActivityState::Suspended
        );
    }

    #[test]
    fn sizing_change_requests_layout_without_remount() {
        let surface = MockSurface::arc(Size::ZERO);
        let mut views = MockViewHost::default();
        let mut controller = mount(&mut views, node(&surface, HostingOptions::new()));

        let next = node(
            &surface,
            HostingOptions::new().with_sizing(crate::options::SizingMode::Fill),
        );
        let outcome = controller
            .update(next, &mut MountContext::new(&mut views))
            .unwrap();
        assert!(outcome.needs_layout());
        assert_eq!(views.created, 1);
        assert_eq!(surface.calls().activity_changed, 1);
    }

    #[test]
    fn bounds_animation_change_reconfigures_container() {
        let surface = MockSurface::arc(Size::ZERO);
        let mut views = MockViewHost::default();
        let mut controller = mount(&mut views, node(&surface, HostingOptions::new()));
        let id = controller.container().unwrap().id;

        let next = node(&surface, HostingOptions::new().with_bounds_animations(false));
        controller
            .update(next, &mut MountContext::new(&mut views))
            .unwrap();

        assert_eq!(views.configured, vec![(id, true), (id, false)]);
        assert_eq!(views.created, 1);
        assert_eq!(controller.container().unwrap().id, id);
    }

    #[test]
    fn view_class_change_remounts_same_surface() {
        let surface = MockSurface::arc(Size::ZERO);
        let mut views = MockViewHost::default();
        let mut controller = mount(&mut views, node(&surface, HostingOptions::new()));

        let next = node(
            &surface,
            HostingOptions::new().with_view_class(ViewClass("video-host")),
        );
        let outcome = controller
            .update(next, &mut MountContext::new(&mut views))
            .unwrap();

        assert_eq!(outcome, UpdateOutcome::Remounted);
        assert_eq!(views.created, 2);
        assert_eq!(views.released, 1);
        assert_eq!(surface.calls().host_unmounted, 1);
        assert_eq!(surface.calls().host_mounted, 2);
        assert_eq!(
            controller.container().unwrap().class,
            ViewClass("video-host")
        );
    }

    #[test]
    fn different_surface_replaces() {
        let first = MockSurface::arc(Size::ZERO);
        let second = MockSurface::arc(Size::ZERO);
        let mut views = MockViewHost::default();
        let mut controller = mount(&mut views, node(&first, HostingOptions::new()));

        let outcome = controller
            .update(
                node(&second, HostingOptions::new()),
                &mut MountContext::new(&mut views),
            )
            .unwrap();

        assert_eq!(outcome, UpdateOutcome::Replaced);
        assert_eq!(first.calls().host_unmounted, 1);
        assert_eq!(second.calls().host_mounted, 1);
        assert_eq!(first.mounted_hosts(), Vec::<HostContext>::new());
        assert_eq!(second.mounted_hosts(), vec![HostContext(1)]);
        assert_eq!(views.live(), 1);
    }

    #[test]
    fn unmount_only_notifies_surface() {
        let surface = MockSurface::arc(Size::ZERO);
        let mut views = MockViewHost::default();
        let controller = mount(&mut views, node(&surface, HostingOptions::new()));
        let strong_before = Arc::strong_count(&surface);

        controller
            .unmount(&mut MountContext::new(&mut views))
            .unwrap();

        assert_eq!(views.released, 1);
        assert_eq!(views.live(), 0);
        let calls = surface.calls();
        assert_eq!(calls.host_unmounted, 1);
        assert_eq!(calls.measure, 0);
        assert_eq!(Arc::strong_count(&surface), strong_before);
        assert!(surface.mounted_hosts().is_empty());
    }

    #[test]
    fn unmount_after_surface_died_still_releases() {
        let surface = MockSurface::arc(Size::ZERO);
        let mut views = MockViewHost::default();
        let controller = mount(&mut views, node(&surface, HostingOptions::new()));
        drop(surface);

        controller
            .unmount(&mut MountContext::new(&mut views))
            .unwrap();
        assert_eq!(views.released, 1);
    }

    #[test]
    fn mount_of_dead_surface_creates_nothing() {
        let surface = MockSurface::arc(Size::ZERO);
        let n = node(&surface, HostingOptions::new());
        drop(surface);

        let mut views = MockViewHost::default();
        let err =
            HostingController::mount(n, HostContext(1), &mut MountContext::new(&mut views))
                .unwrap_err();
        assert!(matches!(err, HostingError::SurfaceGone));
        assert_eq!(views.created, 0);
    }

    #[test]
    fn failed_notification_rolls_back_container() {
        let surface = MockSurface::arc(Size::ZERO);
        surface.fail_host_mounted("surface rejected host");
        let mut views = MockViewHost::default();

        let err = HostingController::mount(
            node(&surface, HostingOptions::new()),
            HostContext(4),
            &mut MountContext::new(&mut views),
        )
        .unwrap_err();

        assert!(matches!(err, HostingError::Surface(_)));
        assert_eq!(views.created, 1);
        assert_eq!(views.released, 1);
        assert_eq!(surface.calls().activity_changed, 0);
    }

    #[test]
    fn failed_configure_releases_container() {
        let surface = MockSurface::arc(Size::ZERO);
        let mut views = MockViewHost {
            fail_configure: Some("bad options"),
            ..MockViewHost::default()
        };
        let err = HostingController::mount(
            node(&surface, HostingOptions::new()),
            HostContext(1),
            &mut MountContext::new(&mut views),
        )
        .unwrap_err();
        assert!(matches!(err, HostingError::View(_)));
        assert_eq!(views.live(), 0);
        assert_eq!(surface.calls().total(), 0);
    }

    #[test]
    fn failed_activity_signal_unwinds_mount() {
        let surface = MockSurface::arc(Size::ZERO);
        surface.fail_activity("cannot activate");
        let mut views = MockViewHost::default();

        let err = HostingController::mount(
            node(&surface, HostingOptions::new()),
            HostContext(4),
            &mut MountContext::new(&mut views),
        )
        .unwrap_err();

        assert!(matches!(err, HostingError::Surface(_)));
        assert_eq!(views.live(), 0);
        assert!(surface.mounted_hosts().is_empty());
    }

    #[test]
    fn view_failure_propagates_unchanged() {
        let surface = MockSurface::arc(Size::ZERO);
        let mut views = MockViewHost {
            fail_create: Some("out of layers"),
            ..MockViewHost::default()
        };
        let err = HostingController::mount(
            node(&surface, HostingOptions::new()),
            HostContext(1),
            &mut MountContext::new(&mut views),
        )
        .unwrap_err();
        match err {
            HostingError::View(inner) => assert_eq!(
                inner.downcast_ref::<Message>(),
                Some(&Message("out of layers"))
            ),
            other => panic!("expected view failure, got {other:?}"),
        }
        assert_eq!(surface.calls().host_mounted, 0);
    }

    #[test]
    fn failed_remount_leaves_controller_detached() {
        let surface = MockSurface::arc(Size::ZERO);
        let mut views = MockViewHost::default();
        let mut controller = mount(&mut views, node(&surface, HostingOptions::new()));

        views.fail_create = Some("class unavailable");
        let next = node(
            &surface,
            HostingOptions::new().with_view_class(ViewClass("video-host")),
        );
        assert!(
            controller
                .update(next.clone(), &mut MountContext::new(&mut views))
                .is_err()
        );
        assert!(!controller.is_mounted());
        assert_eq!(surface.calls().host_unmounted, 1);

        views.fail_create = None;
        let outcome = controller
            .update(next, &mut MountContext::new(&mut views))
            .unwrap();
        assert_eq!(outcome, UpdateOutcome::Remounted);
        assert!(controller.is_mounted());
        assert_eq!(surface.mounted_hosts(), vec![HostContext(1)]);
    }

    #[test]
    fn failed_activity_update_restores_container_configuration() {
        let surface = MockSurface::arc(Size::ZERO);
        let mut views = MockViewHost::default();
        let mut controller = mount(&mut views, node(&surface, HostingOptions::new()));
        let id = controller.container().unwrap().id;

        surface.fail_activity("cannot suspend");
        let next = node(
            &surface,
            HostingOptions::new()
                .with_bounds_animations(false)
                .with_activity(ActivityState::Suspended),
        );
        assert!(
            controller
                .update(next, &mut MountContext::new(&mut views))
                .is_err()
        );
        assert_eq!(views.configured.last(), Some(&(id, true)));
        assert!(controller.node().options().bounds_animations);

        let outcome = controller
            .update(
                node(&surface, HostingOptions::new()),
                &mut MountContext::new(&mut views),
            )
            .unwrap();
        assert_eq!(outcome, UpdateOutcome::Reused);
        assert_eq!(views.configured.last(), Some(&(id, true)));
    }

    #[test]
    fn failed_unmount_notification_propagates_after_release() {
        let surface = MockSurface::arc(Size::ZERO);
        let mut views = MockViewHost::default();
        let controller = mount(&mut views, node(&surface, HostingOptions::new()));
        surface.fail_host_unmounted("surface busy");

        let err = controller
            .unmount(&mut MountContext::new(&mut views))
            .unwrap_err();
        match err {
            HostingError::Surface(inner) => assert_eq!(
                inner.downcast_ref::<Message>(),
                Some(&Message("surface busy"))
            ),
            other => panic!("expected surface failure, got {other:?}"),
        }
        assert_eq!(views.released, 1);
        assert_eq!(views.live(), 0);
    }

    #[test]
    fn failed_replace_unmount_leaves_controller_detached() {
        let first = MockSurface::arc(Size::ZERO);
        let second = MockSurface::arc(Size::ZERO);
        let mut views = MockViewHost::default();
        let mut controller = mount(&mut views, node(&first, HostingOptions::new()));
        first.fail_host_unmounted("surface busy");

        let err = controller
            .update(
                node(&second, HostingOptions::new()),
                &mut MountContext::new(&mut views),
            )
            .unwrap_err();
        assert!(matches!(err, HostingError::Surface(_)));
        assert!(!controller.is_mounted());
        assert_eq!(views.live(), 0);
        assert_eq!(second.calls().host_mounted, 0);

        let outcome = controller
            .update(
                node(&second, HostingOptions::new()),
                &mut MountContext::new(&mut views),
            )
            .unwrap();
        assert_eq!(outcome, UpdateOutcome::Replaced);
        assert!(controller.is_mounted());
        assert_eq!(views.live(), 1);
        assert_eq!(second.mounted_hosts(), vec![HostContext(1)]);
    }

    #[test]
    fn engine_drives_leaves_through_trait() {
        fn cycle<L: HostedLeaf>(
            first: L,
            second: L,
            views: &mut MockViewHost,
        ) -> Result<(Size, UpdateOutcome), HostingError> {
            let size = first.measure(SizeConstraints::UNBOUNDED)?;
            let mut cx = MountContext::new(views);
            let mut mounted = first.on_mount(HostContext(9), &mut cx)?;
            let outcome = second.on_update(&mut mounted, &mut cx)?;
            L::on_unmount(mounted, &mut cx)?;
            Ok((size, outcome))
        }

        let surface = MockSurface::arc(Size::new(64.0, 48.0));
        let mut views = MockViewHost::default();
        let (size, outcome) = cycle(
            node(&surface, HostingOptions::new()),
            node(&surface, HostingOptions::new()),
            &mut views,
        )
        .unwrap();
        assert_eq!(size, Size::new(64.0, 48.0));
        assert_eq!(outcome, UpdateOutcome::Reused);
        assert_eq!(views.live(), 0);
        assert_eq!(surface.calls().host_unmounted, 1);
    }

    #[cfg(feature = "trace")]
    #[test]
    fn lifecycle_is_traced() {
        use crate::trace::{FailureKind, TraceSink};

        #[derive(Default)]
        struct Log {
            mounts: Vec<HostContext>,
            updates: Vec<UpdateOutcome>,
            unmounts: Vec<bool>,
            failures: Vec<(HostingPhase, FailureKind)>,
        }
        impl TraceSink for Log {
            fn on_mount(&mut self, e: &MountEvent) {
                self.mounts.push(e.host);
            }
            fn on_update(&mut self, e: &UpdateEvent) {
                self.updates.push(e.outcome);
            }
            fn on_unmount(&mut self, e: &UnmountEvent) {
                self.unmounts.push(e.surface_alive);
            }
            fn on_failure(&mut self, e: &FailureEvent) {
                self.failures.push((e.phase, e.kind));
            }
        }

        let surface = MockSurface::arc(Size::ZERO);
        let mut views = MockViewHost::default();
        let mut log = Log::default();
        {
            let mut cx = MountContext::with_tracer(&mut views, Tracer::new(&mut log));
            let first = node(&surface, HostingOptions::new());
            let mut controller = HostingController::mount(first, HostContext(2), &mut cx).unwrap();
            controller
                .update(node(&surface, HostingOptions::new()), &mut cx)
                .unwrap();
            controller.unmount(&mut cx).unwrap();

            let dead = MockSurface::arc(Size::ZERO);
            let orphan = node(&dead, HostingOptions::new());
            drop(dead);
            assert!(HostingController::mount(orphan, HostContext(3), &mut cx).is_err());
        }
        assert_eq!(log.mounts, vec![HostContext(2)]);
        assert_eq!(log.updates, vec![UpdateOutcome::Reused]);
        assert_eq!(log.unmounts, vec![true]);
        assert_eq!(
            log.failures,
            vec![(HostingPhase::Mount, FailureKind::SurfaceGone)]
        );
    }
}
