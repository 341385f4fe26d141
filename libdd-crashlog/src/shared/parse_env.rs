// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

// Taken from ddcommon's `config::parse_env`, trimmed to the lookups used here.

use std::env;

pub fn bool(name: &str) -> Option<bool> {
    match env::var(name).ok()?.as_str() {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        _ => Some(false),
    }
}

pub fn str_not_empty(name: &str) -> Option<String> {
    env::var(name).ok().filter(|s| !s.is_empty())
}
