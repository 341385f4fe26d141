// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use super::entry::{decode_hex, entry_map, Entry};
use crate::shared::constants::{THREAD_FRAME_PREFIX, THREAD_STATE_PREFIX};
use serde::{Deserialize, Serialize};

/// The register state recorded when a thread starts.
///
/// example:
/// `[Thread:State] rax: 0x0, rbx: 0x7000074f2000, rcx: 0x7ffee562cd38`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadState {
    /// Register name to raw, undecoded value.
    pub registers: Entry,
}

impl ThreadState {
    pub fn from_line(line: &str) -> Option<Self> {
        let registers = entry_map(line, THREAD_STATE_PREFIX)?;
        Some(Self { registers })
    }
}

/// One stack frame.
///
/// example:
/// `[Thread:Frame] ip: 0x7fff7153333a, fp: 0x7ffee562cd60, sp: 0x7ffee562cd38`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackFrame {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fp: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sp: Option<u64>,
}

impl StackFrame {
    pub fn from_line(line: &str) -> Option<Self> {
        let entry = entry_map(line, THREAD_FRAME_PREFIX)?;
        let field = |key: &str| entry.get(key).and_then(|v| decode_hex(v));
        Some(Self {
            ip: field("ip"),
            fp: field("fp"),
            sp: field("sp"),
        })
    }
}

/// One thread of the crashed process. Frames are kept in log order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thread {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<ThreadState>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub frames: Vec<StackFrame>,
    pub crashed: bool,
}

impl Thread {
    pub fn new(state: Option<ThreadState>) -> Self {
        Self {
            state,
            frames: vec![],
            crashed: false,
        }
    }

    pub fn push_frame(&mut self, frame: StackFrame) {
        self.frames.push(frame);
    }

    pub fn set_crashed(&mut self) {
        self.crashed = true;
    }
}
