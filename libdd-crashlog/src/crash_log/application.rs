// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use super::entry::{decode_base64_text, entry_map};
use crate::shared::constants::APPLICATION_PREFIX;
use serde::{Deserialize, Serialize};

/// Host application details.
///
/// example:
/// `[Application] id: TXlDb29sQXBw, org_id: TXlDb29sT3Jn, version: MjU=, short_version: NS4w`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_version: Option<String>,
}

impl ApplicationInfo {
    pub fn from_line(line: &str) -> Option<Self> {
        let entry = entry_map(line, APPLICATION_PREFIX)?;
        let field = |key: &str| entry.get(key).and_then(|v| decode_base64_text(v));
        Some(Self {
            identifier: field("id"),
            organization_identifier: field("org_id"),
            version: field("version"),
            short_version: field("short_version"),
        })
    }
}
