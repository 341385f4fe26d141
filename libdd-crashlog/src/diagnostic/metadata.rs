// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::shared::constants::UNKNOWN_VALUE;
use crate::{EnvironmentInfo, Log, SignalInfo};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Descriptive fields of a crash diagnostic.
///
/// Application versions fall back to `<unknown>`, while the device,
/// architecture, region and OS version fall back to an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CrashMetaData {
    pub device_type: String,
    #[serde(rename = "appBuildVersion")]
    pub application_build_version: String,
    #[serde(rename = "appVersion")]
    pub application_version: String,
    pub os_version: String,
    pub platform_architecture: String,
    pub region_format: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub virtual_memory_region_info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exception_type: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exception_code: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub termination_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signal: Option<u64>,
}

impl CrashMetaData {
    pub fn from_log(log: &Log) -> Self {
        let application = log.application.as_ref();
        let environment = log.environment.as_ref();
        let text_or_empty = |value: Option<&String>| value.cloned().unwrap_or_default();
        Self {
            device_type: text_or_empty(environment.and_then(|env| env.model.as_ref())),
            application_build_version: application
                .and_then(|app| app.version.clone())
                .unwrap_or_else(|| UNKNOWN_VALUE.to_string()),
            application_version: application
                .and_then(|app| app.short_version.clone())
                .unwrap_or_else(|| UNKNOWN_VALUE.to_string()),
            os_version: os_version(environment).unwrap_or_default(),
            platform_architecture: text_or_empty(
                environment.and_then(|env| env.architecture.as_ref()),
            ),
            region_format: text_or_empty(environment.and_then(|env| env.region.as_ref())),
            // Crash logs do not record Mach exceptions nor the faulting region.
            virtual_memory_region_info: None,
            exception_type: None,
            exception_code: None,
            termination_reason: Some(termination_reason(log.signal.as_ref())),
            signal: log.signal.as_ref().and_then(|signal| signal.number),
        }
    }
}

/// `Namespace SIGNAL, Code 0x<number>` with the number in lowercase hex, or
/// `<unknown>` when no signal number was logged.
pub fn termination_reason(signal: Option<&SignalInfo>) -> String {
    match signal.and_then(|signal| signal.number) {
        Some(number) => format!("Namespace SIGNAL, Code 0x{number:x}"),
        None => UNKNOWN_VALUE.to_string(),
    }
}

/// The platform name as the reporting backend spells it.
pub fn normalized_platform(platform: &str) -> &str {
    match platform {
        "iOS" => "iPhone OS",
        other => other,
    }
}

/// `<platform> <version> (<build>)`, only when all three parts are known.
pub fn os_version(environment: Option<&EnvironmentInfo>) -> Option<String> {
    let environment = environment?;
    let platform = normalized_platform(environment.platform.as_deref()?);
    let version = environment.os_version.as_deref()?;
    let build = environment.os_build.as_deref()?;
    Some(format!("{platform} {version} ({build})"))
}
