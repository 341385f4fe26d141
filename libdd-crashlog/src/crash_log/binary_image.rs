// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use super::entry::{decode_hex, decode_plain_uuid, entry_map};
use crate::shared::constants::BINARY_LOAD_PREFIX;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A binary image loaded into the crashed process.
///
/// example:
/// `[Binary:Load] path: /System/Library/Frameworks/AppKit.framework/Versions/C/AppKit, address: 0x7fff345ab000, size: 0xdc1000, slide: 0xa22d000, uuid: a64d10a6fe1739ce93926615be54e10e`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinaryImage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<Uuid>,
}

impl BinaryImage {
    pub fn from_line(line: &str) -> Option<Self> {
        let mut entry = entry_map(line, BINARY_LOAD_PREFIX)?;
        Some(Self {
            path: entry.remove("path"),
            address: entry.get("address").and_then(|v| decode_hex(v)),
            size: entry.get("size").and_then(|v| decode_hex(v)),
            uuid: entry.get("uuid").and_then(|v| decode_plain_uuid(v)),
        })
    }

    /// The last component of the image's path, e.g. `AppKit`.
    pub fn name(&self) -> Option<&str> {
        self.path
            .as_deref()
            .map(|path| path.rsplit('/').next().unwrap_or(path))
    }

    /// One past the last address covered by the image.
    pub fn end_address(&self) -> Option<u64> {
        self.address?.checked_add(self.size?)
    }

    /// Offset of `address` from the image's load address, if the image's
    /// `[address, address + size)` range contains it.
    pub fn offset_of(&self, address: u64) -> Option<u64> {
        let start = self.address?;
        let end = self.end_address()?;
        (start <= address && address < end).then(|| address - start)
    }

    pub fn contains(&self, address: u64) -> bool {
        self.offset_of(address).is_some()
    }
}
