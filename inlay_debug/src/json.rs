// Copyright 2026 the Inlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON exporter.
//!
//! [`export`] writes events recorded by a
//! [`RecorderSink`](super::recorder::RecorderSink) as a JSON array with one
//! object per event, in recording order.

use std::io::{self, Write};

use serde_json::{Value, json};

use inlay_core::host::UpdateOutcome;

use crate::recorder::RecordedEvent;

/// Exports recorded events as a pretty-printed JSON array.
///
/// Every object carries `"event"` (the event name) and `"surface"` (the
/// surface key as a hex string); mount-side events also carry `"host"`.
pub fn export(events: &[RecordedEvent], writer: &mut dyn Write) -> io::Result<()> {
    let values: Vec<Value> = events.iter().map(to_value).collect();
    serde_json::to_writer_pretty(writer, &values)?;
    Ok(())
}

fn to_value(recorded: &RecordedEvent) -> Value {
    let surface = format!("{:#x}", recorded.surface().0);
    match recorded {
        RecordedEvent::Measure(e) => {
            let max = e.constraints.max();
            json!({
                "event": "Measure",
                "surface": surface,
                "max": [finite_or_null(max.width), finite_or_null(max.height)],
                "size": [e.size.width, e.size.height],
                "source": format!("{:?}", e.source),
            })
        }
        RecordedEvent::Mount(e) => json!({
            "event": "Mount",
            "surface": surface,
            "host": e.host.0,
            "view_class": e.view_class.name(),
            "activity": format!("{:?}", e.activity),
        }),
        RecordedEvent::Update(e) => {
            let (outcome, delta) = match e.outcome {
                UpdateOutcome::Reused => ("Reused", Value::Null),
                UpdateOutcome::Updated(d) => (
                    "Updated",
                    json!({
                        "remeasure": d.remeasure,
                        "activity": d.activity,
                        "reconfigure": d.reconfigure,
                    }),
                ),
                UpdateOutcome::Remounted => ("Remounted", Value::Null),
                UpdateOutcome::Replaced => ("Replaced", Value::Null),
            };
            json!({
                "event": "Update",
                "surface": surface,
                "host": e.host.0,
                "outcome": outcome,
                "delta": delta,
            })
        }
        RecordedEvent::Unmount(e) => json!({
            "event": "Unmount",
            "surface": surface,
            "host": e.host.0,
            "surface_alive": e.surface_alive,
        }),
        RecordedEvent::Failure(e) => json!({
            "event": "Failure",
            "surface": surface,
            "host": e.host.map(|h| h.0),
            "phase": format!("{:?}", e.phase),
            "kind": format!("{:?}", e.kind),
        }),
    }
}

/// Unbounded axes are exported as `null`; JSON has no infinity.
fn finite_or_null(v: f64) -> Option<f64> {
    v.is_finite().then_some(v)
}
