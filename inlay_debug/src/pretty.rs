// Copyright 2026 the Inlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use inlay_core::host::UpdateOutcome;
use inlay_core::node::SizeSource;
use inlay_core::trace::{
    FailureEvent, HostingPhase, MeasureEvent, MountEvent, TraceSink, UnmountEvent, UpdateEvent,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the writer.
    #[must_use]
    pub fn into_writer(self) -> W {
        self.writer
    }
}

fn phase_name(phase: HostingPhase) -> &'static str {
    match phase {
        HostingPhase::Measure => "measure",
        HostingPhase::Mount => "mount",
        HostingPhase::Update => "update",
        HostingPhase::Unmount => "unmount",
    }
}

fn source_name(source: SizeSource) -> &'static str {
    match source {
        SizeSource::Surface => "surface",
        SizeSource::Override => "fixed",
        SizeSource::Placeholder => "placeholder",
        SizeSource::Fill => "fill",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_measure(&mut self, e: &MeasureEvent) {
        let max = e.constraints.max();
        let _ = writeln!(
            self.writer,
            "[measure] surface={:?} max={}x{} -> {}x{} ({})",
            e.surface,
            max.width,
            max.height,
            e.size.width,
            e.size.height,
            source_name(e.source),
        );
    }

    fn on_mount(&mut self, e: &MountEvent) {
        let _ = writeln!(
            self.writer,
            "[mount] surface={:?} host={} class={} activity={:?}",
            e.surface,
            e.host.0,
            e.view_class.name(),
            e.activity,
        );
    }

    fn on_update(&mut self, e: &UpdateEvent) {
        let outcome = match e.outcome {
            UpdateOutcome::Reused => "reused",
            UpdateOutcome::Updated(_) => "updated",
            UpdateOutcome::Remounted => "remounted",
            UpdateOutcome::Replaced => "replaced",
        };
        let layout = if e.outcome.needs_layout() {
            " +layout"
        } else {
            ""
        };
        let _ = writeln!(
            self.writer,
            "[update] surface={:?} host={} {outcome}{layout}",
            e.surface, e.host.0,
        );
    }

    fn on_unmount(&mut self, e: &UnmountEvent) {
        let status = if e.surface_alive { "notified" } else { "gone" };
        let _ = writeln!(
            self.writer,
            "[unmount] surface={:?} host={} {status}",
            e.surface, e.host.0,
        );
    }

    fn on_failure(&mut self, e: &FailureEvent) {
        let host = e
            .host
            .map_or_else(|| "-".to_owned(), |h| h.0.to_string());
        let _ = writeln!(
            self.writer,
            "[FAILED:{}] surface={:?} host={host} kind={:?}",
            phase_name(e.phase),
            e.surface,
            e.kind,
        );
    }
}
