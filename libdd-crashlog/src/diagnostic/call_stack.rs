// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::{resolve, BinaryImage, Log, Thread};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

/// One node of a call stack.
///
/// Crash logs carry no sampling information, so every node is a single
/// observation and has at most one sub-frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    #[serde(
        rename = "binaryUUID",
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_uppercase_uuid"
    )]
    #[schemars(with = "Option<String>")]
    pub binary_uuid: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset_into_binary_text_segment: Option<u64>,
    pub sample_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binary_name: Option<String>,
    pub address: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_frames: Vec<Frame>,
}

fn serialize_uppercase_uuid<S: Serializer>(
    uuid: &Option<Uuid>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match uuid {
        Some(uuid) => serializer.serialize_str(&format!("{uuid:X}")),
        None => serializer.serialize_none(),
    }
}

impl Frame {
    /// A node for `frame`, attributed to the image containing its
    /// instruction pointer, if any, and wrapping `child`.
    fn new(frame: &crate::StackFrame, images: &[BinaryImage], child: Option<Frame>) -> Self {
        let resolved = frame.ip.and_then(|ip| resolve(ip, images));
        Self {
            binary_uuid: resolved.and_then(|r| r.image.uuid),
            offset_into_binary_text_segment: resolved.map(|r| r.offset),
            sample_count: 1,
            binary_name: resolved.and_then(|r| r.image.name()).map(str::to_string),
            address: frame.ip.unwrap_or(0),
            sub_frames: child.into_iter().collect(),
        }
    }
}

// Nodes nest one level per frame. Dropping them recursively would overflow
// the stack on deep chains, so the chain is unlinked iteratively.
impl Drop for Frame {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.sub_frames);
        while let Some(mut frame) = pending.pop() {
            pending.append(&mut frame.sub_frames);
        }
    }
}

/// The call stack of one thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CallStack {
    /// Whether this is the thread the crash is attributed to.
    pub thread_attributed: bool,
    #[serde(rename = "callStackRootFrames")]
    pub root_frames: Vec<Frame>,
}

impl CallStack {
    /// Builds the single chain of nodes for `thread`.
    ///
    /// Frames are folded back to front: the last frame of the log becomes the
    /// deepest leaf, and every earlier frame wraps the chain built so far. The
    /// root is thus the first frame the log recorded for the thread.
    pub fn from_thread(thread: &Thread, images: &[BinaryImage]) -> Self {
        let root = thread
            .frames
            .iter()
            .rev()
            .fold(None, |child, frame| Some(Frame::new(frame, images, child)));
        Self {
            thread_attributed: thread.crashed,
            root_frames: root.into_iter().collect(),
        }
    }

    /// All nodes of the stack, depth first, starting at the root.
    pub fn frames(&self) -> Vec<&Frame> {
        let mut frames = vec![];
        let mut pending: Vec<&Frame> = self.root_frames.iter().rev().collect();
        while let Some(frame) = pending.pop() {
            frames.push(frame);
            pending.extend(frame.sub_frames.iter().rev());
        }
        frames
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CallStackTree {
    pub call_stacks: Vec<CallStack>,
    pub call_stack_per_thread: bool,
}

impl CallStackTree {
    /// One call stack per thread, in log order.
    pub fn from_log(log: &Log) -> Self {
        let call_stacks = log
            .threads
            .iter()
            .map(|thread| CallStack::from_thread(thread, &log.binaries))
            .collect();
        Self {
            call_stacks,
            call_stack_per_thread: true,
        }
    }

    pub fn attributed_stack(&self) -> Option<&CallStack> {
        self.call_stacks.iter().find(|stack| stack.thread_attributed)
    }
}
