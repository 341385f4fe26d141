// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::shared::parse_env;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfiguration {
    // Where the capture agent writes crash logs
    report_directory: PathBuf,
    // Where pending logs are moved before being translated
    processing_directory: PathBuf,
    reporting_enabled: bool,
}

impl ProviderConfiguration {
    const DD_CRASHLOG_REPORT_DIRECTORY: &'static str = "DD_CRASHLOG_REPORT_DIRECTORY";
    const DD_CRASHLOG_PROCESSING_DIRECTORY: &'static str = "DD_CRASHLOG_PROCESSING_DIRECTORY";
    const DD_CRASHLOG_REPORTING_ENABLED: &'static str = "DD_CRASHLOG_REPORTING_ENABLED";

    pub fn new(
        report_directory: impl Into<PathBuf>,
        processing_directory: impl Into<PathBuf>,
        reporting_enabled: bool,
    ) -> anyhow::Result<Self> {
        let report_directory = report_directory.into();
        let processing_directory = processing_directory.into();
        anyhow::ensure!(
            report_directory != processing_directory,
            "Can't use the same directory ({}) for pending and processed logs",
            report_directory.display()
        );
        Ok(Self {
            report_directory,
            processing_directory,
            reporting_enabled,
        })
    }

    /// Reads the configuration from `DD_CRASHLOG_*` variables, falling back to
    /// the defaults for unset or empty ones.
    pub fn from_env() -> anyhow::Result<Self> {
        let default = Self::default();
        Self::new(
            parse_env::str_not_empty(Self::DD_CRASHLOG_REPORT_DIRECTORY)
                .map(PathBuf::from)
                .unwrap_or(default.report_directory),
            parse_env::str_not_empty(Self::DD_CRASHLOG_PROCESSING_DIRECTORY)
                .map(PathBuf::from)
                .unwrap_or(default.processing_directory),
            parse_env::bool(Self::DD_CRASHLOG_REPORTING_ENABLED)
                .unwrap_or(default.reporting_enabled),
        )
    }

    pub fn report_directory(&self) -> &Path {
        &self.report_directory
    }

    pub fn processing_directory(&self) -> &Path {
        &self.processing_directory
    }

    pub fn reporting_enabled(&self) -> bool {
        self.reporting_enabled
    }
}

impl Default for ProviderConfiguration {
    fn default() -> Self {
        let tmp = std::env::temp_dir();
        Self {
            report_directory: tmp.join("crashlogs"),
            processing_directory: tmp.join("crashlogs-processing"),
            reporting_enabled: true,
        }
    }
}
