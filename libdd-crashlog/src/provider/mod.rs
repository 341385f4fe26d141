// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Lifecycle of the crash logs pending on disk.
//!
//! The capture agent writes one log per session into the report directory,
//! at [`DiagnosticProvider::next_log_path`]. On the next start, the logs left
//! there by earlier sessions are moved into the processing directory,
//! translated, removed and, when they describe a crash, handed back to the
//! caller for delivery. Collect the pending logs before the current session starts
//! writing its own.

mod configuration;

pub use configuration::ProviderConfiguration;

use crate::shared::constants::LOG_FILE_EXTENSION;
use crate::{DiagnosticPayload, FileLogSource, Log};
use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct DiagnosticProvider {
    config: ProviderConfiguration,
}

impl DiagnosticProvider {
    pub fn new(config: ProviderConfiguration) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProviderConfiguration {
        &self.config
    }

    pub fn create_report_directory_if_needed(&self) -> anyhow::Result<()> {
        let dir = self.config.report_directory();
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create report directory {}", dir.display()))
    }

    /// A fresh `<report directory>/<uuid>.impactlog` path.
    pub fn next_log_path(&self) -> PathBuf {
        self.config
            .report_directory()
            .join(Uuid::new_v4().to_string())
            .with_extension(LOG_FILE_EXTENSION)
    }

    /// Everything in the report directory, sorted. A directory that cannot be
    /// listed yields nothing.
    pub fn existing_log_paths(&self) -> Vec<PathBuf> {
        let dir = self.config.report_directory();
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(directory = %dir.display(), %err, "Failed to list crash logs");
                return vec![];
            }
        };
        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry.path()),
                Err(err) => {
                    warn!(directory = %dir.display(), %err, "Failed to read directory entry");
                    None
                }
            })
            .collect();
        paths.sort();
        paths
    }

    pub fn delete_all_logs(&self, paths: &[PathBuf]) {
        if !paths.is_empty() {
            debug!(count = paths.len(), "Removing all crash logs");
        }
        for path in paths {
            if let Err(err) = std::fs::remove_file(path) {
                warn!(path = %path.display(), %err, "Failed to remove crash log");
            }
        }
    }

    /// Translates every pending log and returns the payloads worth sending.
    ///
    /// With reporting disabled, the pending logs are deleted instead.
    pub fn collect_reportable_payloads(&self) -> Vec<DiagnosticPayload> {
        if let Err(err) = self.create_report_directory_if_needed() {
            warn!(%err, "Failed to prepare report directory");
        }
        let paths = self.existing_log_paths();

        if !self.config.reporting_enabled() {
            debug!("Crash reporting is disabled");
            self.delete_all_logs(&paths);
            return vec![];
        }

        paths
            .iter()
            .filter_map(|path| match self.translate_log(path) {
                Ok(payload) => Some(payload),
                Err(err) => {
                    warn!(path = %path.display(), err = ?err, "Failed to translate crash log");
                    None
                }
            })
            .filter(Self::is_reportable)
            .collect()
    }

    pub fn is_reportable(payload: &DiagnosticPayload) -> bool {
        payload.is_reportable()
    }

    /// Moves the log at `path` into the processing directory, translates the
    /// moved copy and removes it. A log is read at most once, whatever its
    /// outcome.
    fn translate_log(&self, path: &Path) -> anyhow::Result<DiagnosticPayload> {
        let file_name = path
            .file_name()
            .with_context(|| format!("{} does not name a file", path.display()))?;
        let processing_dir = self.config.processing_directory();
        std::fs::create_dir_all(processing_dir).with_context(|| {
            format!(
                "Failed to create processing directory {}",
                processing_dir.display()
            )
        })?;
        let destination = processing_dir.join(file_name);
        debug!(
            from = %path.display(),
            to = %destination.display(),
            "Moving crash log for processing"
        );
        std::fs::rename(path, &destination).with_context(|| {
            format!(
                "Failed to move {} to {}",
                path.display(),
                destination.display()
            )
        })?;

        let contents = FileLogSource::read_path(&destination);
        if let Err(err) = std::fs::remove_file(&destination) {
            warn!(path = %destination.display(), %err, "Failed to remove processed crash log");
        }
        Ok(DiagnosticPayload::from_log(&Log::parse(&contents?)))
    }
}
