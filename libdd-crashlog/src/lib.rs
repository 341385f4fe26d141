// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

//! Translates the line-oriented crash logs written by the in-process crash
//! monitor into normalized crash diagnostic reports.
//!
//! Architecturally, the translation is a two stage pipeline:
//! 1. The log parser scans the raw text once, front to back, and recognizes
//!    each line by its literal prefix (`[Binary:Load] `, `[Signal] `,
//!    `[Thread:Frame] `, ...). Lines it does not understand are skipped, so
//!    logs written by newer monitors still parse. The result is a [`Log`].
//! 2. The diagnostic builder resolves every frame's instruction pointer
//!    against the loaded binary images, turns each thread into a call stack
//!    and derives the report metadata (termination reason, OS version, ...).
//!    The result is a [`DiagnosticPayload`], which serializes to the JSON
//!    schema expected by the reporting backend.
//!
//! Data flows strictly forward: raw text -> [`Log`] -> [`DiagnosticPayload`]
//! -> JSON bytes. Neither stage touches the file system; logs are obtained
//! through a [`LogSource`]. The [`provider`] module adds the on-disk
//! lifecycle of pending logs on top of that.
//!
//! Malformed input is never an error: an unknown line, a field that fails to
//! decode or a frame without a thread simply leaves something absent. The
//! only failure is not being able to obtain the text at all.

mod crash_log;
mod diagnostic;
mod error;
pub mod provider;
mod resolver;
mod shared;
mod source;

pub use crash_log::*;
pub use diagnostic::*;
pub use error::CrashLogError;
pub use provider::{DiagnosticProvider, ProviderConfiguration};
pub use resolver::{resolve, ResolvedFrame};
pub use shared::constants;
pub use source::{FileLogSource, LogSource};
