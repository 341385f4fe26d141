// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use libdd_crashlog::FileLogSource;
use std::path::{Path, PathBuf};

pub fn get_data_folder_path() -> std::io::Result<PathBuf> {
    Path::new(&env!("CARGO_MANIFEST_DIR"))
        .join("data")
        .canonicalize()
}

#[allow(dead_code)]
pub fn fixture_source() -> FileLogSource {
    FileLogSource::new(get_data_folder_path().unwrap())
}

#[allow(dead_code)]
pub fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(get_data_folder_path().unwrap().join(name)).unwrap()
}
