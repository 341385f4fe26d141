// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Constants of the crash log text format and of the diagnostic report.
//!
//! A crash log is a sequence of `\n` separated lines. Each line starts with a
//! record prefix, followed by a body of `key: value` pairs separated by `, `:
//!
//! ```text
//! [Application] id: TXlDb29sQXBw, org_id: TXlDb29sT3Jn, version: MjU=, short_version: NS4w
//! [Binary:Load] path: /usr/lib/libobjc.A.dylib, address: 0x7fff6fe79000, size: 0x31a000, uuid: ...
//! [Signal] signal: 0x6, code: 0x0, address: 0x1d465b5d0, errno: 0x0
//! [Thread:State] rax: 0x0, rbx: 0x7000074f2000
//! [Thread:Crashed]
//! [Thread:Frame] ip: 0x7fff7153333a, fp: 0x7ffee562cd60, sp: 0x7ffee562cd38
//! ```

/// Application identity. Values are base64 encoded. Only honored on the
/// first line of a log.
pub const APPLICATION_PREFIX: &str = "[Application] ";

/// Host environment: platform, OS version and build, device model, ...
/// Values are plain text.
pub const ENVIRONMENT_PREFIX: &str = "[Environment] ";

/// A binary image mapped into the process, with its load address, size and
/// uuid.
pub const BINARY_LOAD_PREFIX: &str = "[Binary:Load] ";

/// The signal that terminated the process.
pub const SIGNAL_PREFIX: &str = "[Signal] ";

/// Starts a new thread. The body holds the thread's registers.
pub const THREAD_STATE_PREFIX: &str = "[Thread:State] ";

/// Bare marker, without body, flagging the current thread as the one that
/// crashed.
pub const THREAD_CRASHED_PREFIX: &str = "[Thread:Crashed]";

/// One stack frame of the current thread.
pub const THREAD_FRAME_PREFIX: &str = "[Thread:Frame] ";

/// Separates the `key: value` pairs of a record body.
pub const FIELD_SEPARATOR: &str = ", ";

/// Separates the key from the value inside a pair.
pub const KEY_VALUE_SEPARATOR: &str = ": ";

/// File extension of crash logs waiting to be reported.
pub const LOG_FILE_EXTENSION: &str = "impactlog";

/// Stands in for values the log did not provide.
pub const UNKNOWN_VALUE: &str = "<unknown>";

/// Version of the crash diagnostic schema.
pub const DIAGNOSTIC_VERSION: &str = "1.0.0";

/// Format of the payload timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";
