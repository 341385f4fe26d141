// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use super::entry::entry_map;
use crate::shared::constants::ENVIRONMENT_PREFIX;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Host environment details.
///
/// example:
/// `[Environment] platform: macOS, os_version: 10.15.7, os_build: 19H2, model: MacBookPro15,2, arch: x86_64, region: CA, start_date: 1602598162.0`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os_build: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub architecture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
}

impl EnvironmentInfo {
    pub fn from_line(line: &str) -> Option<Self> {
        let mut entry = entry_map(line, ENVIRONMENT_PREFIX)?;
        Some(Self {
            platform: entry.remove("platform"),
            os_version: entry.remove("os_version"),
            os_build: entry.remove("os_build"),
            model: entry.remove("model"),
            architecture: entry.remove("arch"),
            region: entry.remove("region"),
            start_date: entry.get("start_date").and_then(|v| decode_epoch_seconds(v)),
        })
    }
}

/// Seconds since the Unix epoch, with an optional fractional part.
fn decode_epoch_seconds(value: &str) -> Option<DateTime<Utc>> {
    let seconds: f64 = value.parse().ok()?;
    if !seconds.is_finite() {
        return None;
    }
    let whole = seconds.floor();
    let nanos = (((seconds - whole) * 1e9).round() as u32).min(999_999_999);
    DateTime::from_timestamp(whole as i64, nanos)
}
