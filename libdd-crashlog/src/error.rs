// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

/// The only ways a crash log translation can fail: the text could not be
/// obtained at all. Anything malformed inside the text is absorbed by the
/// parser instead.
#[derive(Debug, Error)]
pub enum CrashLogError {
    #[error("Crash log {0:?} not found")]
    NotFound(String),
    #[error("Failed to read crash log {id:?}: {source}")]
    Read {
        id: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Crash log {id:?} is not valid UTF-8: {source}")]
    Utf8 {
        id: String,
        #[source]
        source: std::string::FromUtf8Error,
    },
}
