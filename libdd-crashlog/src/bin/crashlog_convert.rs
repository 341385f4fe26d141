// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

use anyhow::Context;
use clap::{command, Arg, ArgAction};
use libdd_crashlog::{DiagnosticPayload, FileLogSource, Log};
use std::io::Write;
use std::path::Path;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let matches = command!()
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .help("the crash log to convert")
                .required(true),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("the path to save the result to, instead of stdout")
                .required(false),
        )
        .arg(
            Arg::new("pretty")
                .long("pretty")
                .action(ArgAction::SetTrue)
                .help("pretty print the JSON"),
        )
        .arg(
            Arg::new("log")
                .long("log")
                .action(ArgAction::SetTrue)
                .help("print the parsed log instead of the diagnostic payload"),
        )
        .get_matches();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let input = matches
        .get_one::<String>("input")
        .context("missing --input")?;
    let output = matches.get_one::<String>("output");
    let pretty = matches.get_flag("pretty");

    let contents = FileLogSource::read_path(Path::new(input))?;
    let log = Log::parse(&contents);
    debug!(
        threads = log.threads.len(),
        binaries = log.binaries.len(),
        "Parsed crash log {input}"
    );

    let json = if matches.get_flag("log") {
        if pretty {
            serde_json::to_vec_pretty(&log)?
        } else {
            serde_json::to_vec(&log)?
        }
    } else {
        let payload = DiagnosticPayload::from_log(&log);
        if !payload.is_reportable() {
            debug!("Crash log {input} does not describe a crash");
        }
        if pretty {
            payload.to_json_pretty()?
        } else {
            payload.to_json()?
        }
    };

    match output {
        Some(path) => {
            std::fs::write(path, &json).with_context(|| format!("Failed to write {path}"))?
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&json)?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}
