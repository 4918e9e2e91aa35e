// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Host engine events as data.
//!
//! Engines running out of process report lifecycle events as JSON lines,
//! one event object per line, tagged by `event`:
//!
//! ```json
//! {"event":"test_finished","id":{...},"result":{"status":"successful"}}
//! ```

use serde::{Deserialize, Serialize};

use crate::collector::{ExecutionResult, TestIdentifier};
use crate::listener::Listener;

#[cfg(test)]
#[path = "events_tests.rs"]
mod tests;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HostEvent {
    RunStarted,
    TestStarted {
        id: TestIdentifier,
    },
    TestFinished {
        id: TestIdentifier,
        result: ExecutionResult,
    },
    TestSkipped {
        id: TestIdentifier,
        #[serde(default)]
        reason: String,
    },
    RunFinished,
}

impl HostEvent {
    /// Parse one JSON line.
    pub fn parse(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }
}

/// Forward one event to the listener.
pub fn dispatch(listener: &Listener, event: HostEvent) {
    match event {
        HostEvent::RunStarted => listener.on_run_start(),
        HostEvent::TestStarted { id } => listener.on_test_start(&id),
        HostEvent::TestFinished { id, result } => listener.on_test_finish(&id, &result),
        HostEvent::TestSkipped { id, reason } => listener.on_test_skip(&id, &reason),
        HostEvent::RunFinished => listener.on_run_finish(),
    }
}
