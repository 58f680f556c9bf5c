// Copyright 2026 the Inlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory event recording.
//!
//! [`RecorderSink`] implements [`TraceSink`] and keeps every event it
//! receives, in order, as a [`RecordedEvent`]. All hosting events are small
//! `Copy` values, so nothing is encoded.

use inlay_core::host::HostContext;
use inlay_core::surface::SurfaceKey;
use inlay_core::trace::{
    FailureEvent, MeasureEvent, MountEvent, TraceSink, UnmountEvent, UpdateEvent,
};

/// A recorded hosting event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RecordedEvent {
    /// A [`MeasureEvent`].
    Measure(MeasureEvent),
    /// A [`MountEvent`].
    Mount(MountEvent),
    /// An [`UpdateEvent`].
    Update(UpdateEvent),
    /// An [`UnmountEvent`].
    Unmount(UnmountEvent),
    /// A [`FailureEvent`].
    Failure(FailureEvent),
}

impl RecordedEvent {
    /// Returns the surface the event concerns.
    #[must_use]
    pub fn surface(&self) -> SurfaceKey {
        match self {
            Self::Measure(e) => e.surface,
            Self::Mount(e) => e.surface,
            Self::Update(e) => e.surface,
            Self::Unmount(e) => e.surface,
            Self::Failure(e) => e.surface,
        }
    }

    /// Returns the hosting context, for mount-side events.
    #[must_use]
    pub fn host(&self) -> Option<HostContext> {
        match self {
            Self::Measure(_) => None,
            Self::Mount(e) => Some(e.host),
            Self::Update(e) => Some(e.host),
            Self::Unmount(e) => Some(e.host),
            Self::Failure(e) => e.host,
        }
    }
}

/// A [`TraceSink`] that keeps every event in memory.
#[derive(Debug, Default)]
pub struct RecorderSink {
    events: Vec<RecordedEvent>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded events, oldest first.
    #[must_use]
    pub fn events(&self) -> &[RecordedEvent] {
        &self.events
    }

    /// Returns an iterator over the events concerning `surface`.
    pub fn for_surface(&self, surface: SurfaceKey) -> impl Iterator<Item = &RecordedEvent> {
        self.events.iter().filter(move |e| e.surface() == surface)
    }

    /// Removes all recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Consumes the recorder and returns the recorded events.
    #[must_use]
    pub fn into_events(self) -> Vec<RecordedEvent> {
        self.events
    }
}

impl TraceSink for RecorderSink {
    fn on_measure(&mut self, e: &MeasureEvent) {
        self.events.push(RecordedEvent::Measure(*e));
    }

    fn on_mount(&mut self, e: &MountEvent) {
        self.events.push(RecordedEvent::Mount(*e));
    }

    fn on_update(&mut self, e: &UpdateEvent) {
        self.events.push(RecordedEvent::Update(*e));
    }

    fn on_unmount(&mut self, e: &UnmountEvent) {
        self.events.push(RecordedEvent::Unmount(*e));
    }

    fn on_failure(&mut self, e: &FailureEvent) {
        self.events.push(RecordedEvent::Failure(*e));
    }
}
