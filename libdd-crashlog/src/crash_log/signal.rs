// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use super::entry::{decode_hex, entry_map};
use crate::shared::constants::SIGNAL_PREFIX;
use serde::{Deserialize, Serialize};

/// The signal that terminated the process.
///
/// example:
/// `[Signal] signal: 0x6, code: 0x0, address: 0x1d465b5d0, errno: 0x0`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<u64>,
}

impl SignalInfo {
    pub fn from_line(line: &str) -> Option<Self> {
        let entry = entry_map(line, SIGNAL_PREFIX)?;
        Some(Self {
            number: entry.get("signal").and_then(|v| decode_hex(v)),
            code: entry.get("code").and_then(|v| decode_hex(v)),
        })
    }
}
