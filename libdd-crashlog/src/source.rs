// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::shared::constants::LOG_FILE_EXTENSION;
use crate::CrashLogError;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Something that can hand out the raw text of a crash log by identifier.
pub trait LogSource {
    fn read_log(&self, id: &str) -> Result<String, CrashLogError>;
}

/// Reads `<directory>/<id>.impactlog`. An `id` that already names a file with
/// an extension is used as is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLogSource {
    directory: PathBuf,
}

impl FileLogSource {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn path_for(&self, id: &str) -> PathBuf {
        let path = self.directory.join(id);
        if path.extension().is_some() {
            path
        } else {
            path.with_extension(LOG_FILE_EXTENSION)
        }
    }

    /// Reads an arbitrary file, reporting it under its display name.
    pub fn read_path(path: &Path) -> Result<String, CrashLogError> {
        let id = path.display().to_string();
        let bytes = std::fs::read(path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => CrashLogError::NotFound(id.clone()),
            _ => CrashLogError::Read {
                id: id.clone(),
                source,
            },
        })?;
        String::from_utf8(bytes).map_err(|source| CrashLogError::Utf8 { id, source })
    }
}

impl LogSource for FileLogSource {
    fn read_log(&self, id: &str) -> Result<String, CrashLogError> {
        Self::read_path(&self.path_for(id))
    }
}

impl LogSource for HashMap<String, String> {
    fn read_log(&self, id: &str) -> Result<String, CrashLogError> {
        self.get(id)
            .cloned()
            .ok_or_else(|| CrashLogError::NotFound(id.to_string()))
    }
}
