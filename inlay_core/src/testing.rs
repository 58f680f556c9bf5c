// Copyright 2026 the Inlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording collaborators shared by the unit tests.

use alloc::sync::Arc;
use alloc::vec::Vec;
use std::sync::Mutex;

use kurbo::Size;

use crate::constraints::SizeConstraints;
use crate::error::{SurfaceError, ViewError};
use crate::host::{HostContext, ViewHost};
use crate::options::{ActivityState, HostingOptions, ViewClass};
use crate::surface::{Surface, SurfaceKey, SurfaceStage};

/// Number of calls a [`MockSurface`] received, per method.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Calls {
    pub(crate) measure: u32,
    pub(crate) stage: u32,
    pub(crate) host_mounted: u32,
    pub(crate) host_unmounted: u32,
    pub(crate) activity_changed: u32,
}

impl Calls {
    pub(crate) fn total(&self) -> u32 {
        self.measure + self.stage + self.host_mounted + self.host_unmounted + self.activity_changed
    }
}

#[derive(Default)]
struct State {
    stage: SurfaceStage,
    calls: Calls,
    last_constraints: Option<SizeConstraints>,
    mounted: Vec<HostContext>,
    activity: Vec<(HostContext, ActivityState)>,
    fail_measure: Option<&'static str>,
    fail_host_mounted: Option<&'static str>,
    fail_host_unmounted: Option<&'static str>,
    fail_activity: Option<&'static str>,
}

/// A surface with a fixed intrinsic size that records every call.
pub(crate) struct MockSurface {
    intrinsic: Size,
    state: Mutex<State>,
}

impl MockSurface {
    pub(crate) fn arc(intrinsic: Size) -> Arc<Self> {
        Arc::new(Self {
            intrinsic,
            state: Mutex::new(State::default()),
        })
    }

    fn with<R>(&self, f: impl FnOnce(&mut State) -> R) -> R {
        f(&mut self.state.lock().unwrap())
    }

    pub(crate) fn calls(&self) -> Calls {
        self.with(|s| s.calls)
    }

    pub(crate) fn last_constraints(&self) -> Option<SizeConstraints> {
        self.with(|s| s.last_constraints)
    }

    /// Hosting contexts currently holding this surface, in mount order.
    pub(crate) fn mounted_hosts(&self) -> Vec<HostContext> {
        self.with(|s| s.mounted.clone())
    }

    pub(crate) fn activity_log(&self) -> Vec<(HostContext, ActivityState)> {
        self.with(|s| s.activity.clone())
    }

    pub(crate) fn set_stage(&self, stage: SurfaceStage) {
        self.with(|s| s.stage = stage);
    }

    pub(crate) fn fail_measure(&self, message: &'static str) {
        self.with(|s| s.fail_measure = Some(message));
    }

    pub(crate) fn fail_host_mounted(&self, message: &'static str) {
        self.with(|s| s.fail_host_mounted = Some(message));
    }

    pub(crate) fn fail_host_unmounted(&self, message: &'static str) {
        self.with(|s| s.fail_host_unmounted = Some(message));
    }

    pub(crate) fn fail_activity(&self, message: &'static str) {
        self.with(|s| s.fail_activity = Some(message));
    }
}

impl Surface for MockSurface {
    fn measure(&self, constraints: SizeConstraints) -> Result<Size, SurfaceError> {
        self.with(|s| {
            s.calls.measure += 1;
            s.last_constraints = Some(constraints);
            match s.fail_measure {
                Some(message) => Err(SurfaceError::msg(message)),
                None => Ok(self.intrinsic),
            }
        })
    }

    fn stage(&self) -> SurfaceStage {
        self.with(|s| {
            s.calls.stage += 1;
            s.stage
        })
    }

    fn host_mounted(&self, host: HostContext) -> Result<(), SurfaceError> {
        self.with(|s| {
            s.calls.host_mounted += 1;
            if let Some(message) = s.fail_host_mounted {
                return Err(SurfaceError::msg(message));
            }
            s.mounted.push(host);
            Ok(())
        })
    }

    fn host_unmounted(&self, host: HostContext) -> Result<(), SurfaceError> {
        self.with(|s| {
            s.calls.host_unmounted += 1;
            if let Some(message) = s.fail_host_unmounted {
                return Err(SurfaceError::msg(message));
            }
            s.mounted.retain(|h| *h != host);
            Ok(())
        })
    }

    fn activity_changed(
        &self,
        host: HostContext,
        activity: ActivityState,
    ) -> Result<(), SurfaceError> {
        self.with(|s| {
            s.calls.activity_changed += 1;
            if let Some(message) = s.fail_activity {
                return Err(SurfaceError::msg(message));
            }
            s.activity.push((host, activity));
            Ok(())
        })
    }
}

/// Container handed out by [`MockViewHost`]. Not `Clone`: it must be given
/// back to be released.
#[derive(Debug)]
pub(crate) struct MockContainer {
    pub(crate) id: u32,
    pub(crate) class: ViewClass,
    pub(crate) surface: SurfaceKey,
}

/// A view host that counts containers and records configuration.
#[derive(Debug, Default)]
pub(crate) struct MockViewHost {
    pub(crate) next_id: u32,
    pub(crate) created: u32,
    pub(crate) released: u32,
    /// `(container id, bounds_animations)` for every `configure` call.
    pub(crate) configured: Vec<(u32, bool)>,
    pub(crate) fail_create: Option<&'static str>,
    pub(crate) fail_configure: Option<&'static str>,
}

impl MockViewHost {
    /// Containers created and not yet released.
    pub(crate) fn live(&self) -> u32 {
        self.created - self.released
    }
}

impl ViewHost for MockViewHost {
    type Container = MockContainer;

    fn create_container(
        &mut self,
        _surface: &dyn Surface,
        key: SurfaceKey,
        class: ViewClass,
    ) -> Result<MockContainer, ViewError> {
        if let Some(message) = self.fail_create {
            return Err(ViewError::msg(message));
        }
        self.next_id += 1;
        self.created += 1;
        Ok(MockContainer {
            id: self.next_id,
            class,
            surface: key,
        })
    }

    fn configure(
        &mut self,
        container: &MockContainer,
        options: &HostingOptions,
    ) -> Result<(), ViewError> {
        if let Some(message) = self.fail_configure {
            return Err(ViewError::msg(message));
        }
        self.configured.push((container.id, options.bounds_animations));
        Ok(())
    }

    fn release_container(&mut self, container: MockContainer) {
        _ = container;
        self.released += 1;
    }
}
