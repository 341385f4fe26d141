// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

mod call_stack;
mod metadata;

pub use call_stack::*;
pub use metadata::*;

use crate::shared::constants::{DIAGNOSTIC_VERSION, TIMESTAMP_FORMAT, UNKNOWN_VALUE};
use crate::{CrashLogError, Log, LogSource};
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The crash diagnostic derived from one crash log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CrashDiagnostic {
    pub version: String,
    #[serde(rename = "diagnosticMetaData")]
    pub meta_data: CrashMetaData,
    pub call_stack_tree: CallStackTree,
}

impl CrashDiagnostic {
    pub fn from_log(log: &Log) -> Self {
        Self {
            version: DIAGNOSTIC_VERSION.to_string(),
            meta_data: CrashMetaData::from_log(log),
            call_stack_tree: CallStackTree::from_log(log),
        }
    }

    /// A diagnostic only describes a crash when the log recorded a signal.
    pub fn contains_crash(&self) -> bool {
        self.termination_reason() != UNKNOWN_VALUE
    }

    pub fn termination_reason(&self) -> &str {
        self.meta_data
            .termination_reason
            .as_deref()
            .unwrap_or(UNKNOWN_VALUE)
    }

    pub fn application_version(&self) -> &str {
        &self.meta_data.application_version
    }

    pub fn signal(&self) -> Option<u64> {
        self.meta_data.signal
    }

    pub fn virtual_memory_region_info(&self) -> Option<&str> {
        self.meta_data.virtual_memory_region_info.as_deref()
    }
}

/// The report sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticPayload {
    pub time_stamp_begin: String,
    pub time_stamp_end: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crash_diagnostics: Option<Vec<CrashDiagnostic>>,
}

impl DiagnosticPayload {
    /// Builds the payload for `log`, stamped with the current time.
    pub fn from_log(log: &Log) -> Self {
        Self::from_log_at(log, Utc::now())
    }

    /// Builds the payload for `log`. Both timestamps are `now`: crash logs
    /// carry no reporting window of their own.
    ///
    /// Call stacks are always built, but the payload only carries the
    /// diagnostic when the log recorded a signal.
    pub fn from_log_at(log: &Log, now: DateTime<Utc>) -> Self {
        let diagnostic = CrashDiagnostic::from_log(log);
        let timestamp = now.format(TIMESTAMP_FORMAT).to_string();
        Self {
            time_stamp_begin: timestamp.clone(),
            time_stamp_end: timestamp,
            crash_diagnostics: diagnostic.contains_crash().then(|| vec![diagnostic]),
        }
    }

    /// Parses the text of a crash log into a payload.
    pub fn from_text(contents: &str) -> Self {
        Self::from_log(&Log::parse(contents))
    }

    /// Reads the log named `id` from `source` and translates it.
    pub fn from_source(source: &impl LogSource, id: &str) -> Result<Self, CrashLogError> {
        Ok(Self::from_log(&Log::from_source(source, id)?))
    }

    pub fn crash_diagnostics(&self) -> &[CrashDiagnostic] {
        self.crash_diagnostics.as_deref().unwrap_or_default()
    }

    /// Whether the payload is worth sending: it describes at least one crash.
    pub fn is_reportable(&self) -> bool {
        !self.crash_diagnostics().is_empty()
    }

    /// Call stacks nest one level per frame, so encoding grows the stack on
    /// demand instead of recursing on the caller's.
    pub fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        let mut bytes = Vec::new();
        let mut serializer = serde_json::Serializer::new(&mut bytes);
        self.serialize(serde_stacker::Serializer::new(&mut serializer))?;
        Ok(bytes)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<Vec<u8>> {
        let mut bytes = Vec::new();
        let mut serializer = serde_json::Serializer::pretty(&mut bytes);
        self.serialize(serde_stacker::Serializer::new(&mut serializer))?;
        Ok(bytes)
    }

    /// Reads a payload back. The recursion limit of the deserializer is
    /// lifted and the stack grows on demand, like in [`Self::to_json`].
    pub fn from_json(bytes: &[u8]) -> serde_json::Result<Self> {
        let mut deserializer = serde_json::Deserializer::from_slice(bytes);
        deserializer.disable_recursion_limit();
        let payload = Self::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
        deserializer.end()?;
        Ok(payload)
    }

    pub fn json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(DiagnosticPayload)
    }
}
