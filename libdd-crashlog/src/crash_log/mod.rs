// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

mod application;
mod binary_image;
mod entry;
mod environment;
mod signal;
mod thread;

pub use application::*;
pub use binary_image::*;
pub use entry::{decode_base64_text, decode_hex, decode_plain_uuid, entry_map, Entry};
pub use environment::*;
pub use signal::*;
pub use thread::*;

use crate::shared::constants::*;
use crate::{CrashLogError, LogSource};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// The kinds of record lines, in the order their prefixes are tried.
/// The application record is absent: it is only recognized on the first line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    BinaryLoad,
    Signal,
    ThreadState,
    ThreadCrashed,
    ThreadFrame,
    Environment,
}

impl RecordKind {
    const PRIORITY: [RecordKind; 6] = [
        RecordKind::BinaryLoad,
        RecordKind::Signal,
        RecordKind::ThreadState,
        RecordKind::ThreadCrashed,
        RecordKind::ThreadFrame,
        RecordKind::Environment,
    ];

    pub fn prefix(&self) -> &'static str {
        match self {
            RecordKind::BinaryLoad => BINARY_LOAD_PREFIX,
            RecordKind::Signal => SIGNAL_PREFIX,
            RecordKind::ThreadState => THREAD_STATE_PREFIX,
            RecordKind::ThreadCrashed => THREAD_CRASHED_PREFIX,
            RecordKind::ThreadFrame => THREAD_FRAME_PREFIX,
            RecordKind::Environment => ENVIRONMENT_PREFIX,
        }
    }

    /// The first kind whose prefix `line` starts with.
    pub fn classify(line: &str) -> Option<Self> {
        Self::PRIORITY
            .into_iter()
            .find(|kind| line.starts_with(kind.prefix()))
    }
}

/// The structured form of one crash log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Log {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application: Option<ApplicationInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<EnvironmentInfo>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub binaries: Vec<BinaryImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signal: Option<SignalInfo>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub threads: Vec<Thread>,
}

impl Log {
    /// Parses the text of a crash log.
    ///
    /// Parsing never fails. Lines with an unknown prefix are skipped, fields
    /// that do not decode are left absent, and frames that appear before any
    /// thread are dropped.
    pub fn parse(contents: &str) -> Self {
        let mut lines = contents.split('\n').filter(|line| !line.is_empty());
        let mut builder = LogBuilder::new();

        let mut first = lines.next();
        if let Some(line) = first {
            if let Some(application) = ApplicationInfo::from_line(line) {
                builder.with_application(application);
                first = None;
            }
        }

        for line in first.into_iter().chain(lines) {
            builder.process_line(line);
        }
        builder.build()
    }

    /// Reads the log named `id` from `source` and parses it.
    pub fn from_source(source: &impl LogSource, id: &str) -> Result<Self, CrashLogError> {
        let contents = source.read_log(id)?;
        Ok(Self::parse(&contents))
    }

    /// The first binary image containing the frame's instruction pointer.
    pub fn lookup_binary(&self, frame: &StackFrame) -> Option<&BinaryImage> {
        crate::resolve(frame.ip?, &self.binaries).map(|resolved| resolved.image)
    }

    pub fn crashed_thread(&self) -> Option<&Thread> {
        self.threads.iter().find(|thread| thread.crashed)
    }
}

/// Accumulates records while scanning a log. The thread currently receiving
/// frames is sealed into `threads` when the next one starts, or on `build`.
#[derive(Debug, Default)]
pub struct LogBuilder {
    application: Option<ApplicationInfo>,
    environment: Option<EnvironmentInfo>,
    binaries: Vec<BinaryImage>,
    signal: Option<SignalInfo>,
    threads: Vec<Thread>,
    current_thread: Option<Thread>,
    skipped_lines: usize,
}

impl LogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_application(&mut self, application: ApplicationInfo) {
        self.application = Some(application);
    }

    /// Dispatches one line on its prefix. Returns the kind of record
    /// recognized, if any.
    pub fn process_line(&mut self, line: &str) -> Option<RecordKind> {
        let Some(kind) = RecordKind::classify(line) else {
            trace!(line, "Skipping unrecognized crash log line");
            self.skipped_lines += 1;
            return None;
        };

        match kind {
            RecordKind::BinaryLoad => {
                if let Some(image) = BinaryImage::from_line(line) {
                    self.binaries.push(image);
                }
            }
            RecordKind::Signal => {
                self.signal = SignalInfo::from_line(line);
            }
            RecordKind::ThreadState => {
                self.seal_current_thread();
                self.current_thread = Some(Thread::new(ThreadState::from_line(line)));
            }
            RecordKind::ThreadCrashed => {
                if let Some(thread) = &mut self.current_thread {
                    thread.set_crashed();
                }
            }
            RecordKind::ThreadFrame => match (&mut self.current_thread, StackFrame::from_line(line)) {
                (Some(thread), Some(frame)) => thread.push_frame(frame),
                _ => trace!(line, "Dropping stack frame outside of a thread"),
            },
            RecordKind::Environment => {
                self.environment = EnvironmentInfo::from_line(line);
            }
        }
        Some(kind)
    }

    fn seal_current_thread(&mut self) {
        if let Some(thread) = self.current_thread.take() {
            self.threads.push(thread);
        }
    }

    pub fn build(mut self) -> Log {
        self.seal_current_thread();
        debug!(
            binaries = self.binaries.len(),
            threads = self.threads.len(),
            has_signal = self.signal.is_some(),
            skipped_lines = self.skipped_lines,
            "Parsed crash log"
        );
        Log {
            application: self.application,
            environment: self.environment,
            binaries: self.binaries,
            signal: self.signal,
            threads: self.threads,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const APPLICATION_LINE: &str =
        "[Application] id: TXlDb29sQXBw, org_id: TXlDb29sT3Jn, version: MjU=, short_version: NS4w";

    #[test]
    fn test_classify_priority() {
        assert_eq!(
            RecordKind::classify("[Binary:Load] path: /usr/lib/dyld"),
            Some(RecordKind::BinaryLoad)
        );
        assert_eq!(
            RecordKind::classify("[Signal] signal: 0xb"),
            Some(RecordKind::Signal)
        );
        assert_eq!(
            RecordKind::classify("[Thread:State] rax: 0x0"),
            Some(RecordKind::ThreadState)
        );
        assert_eq!(
            RecordKind::classify("[Thread:Crashed]"),
            Some(RecordKind::ThreadCrashed)
        );
        assert_eq!(
            RecordKind::classify("[Thread:Frame] ip: 0x1"),
            Some(RecordKind::ThreadFrame)
        );
        assert_eq!(
            RecordKind::classify("[Environment] platform: macOS"),
            Some(RecordKind::Environment)
        );
        assert_eq!(RecordKind::classify(APPLICATION_LINE), None);
        assert_eq!(RecordKind::classify("[Binary:Unload] path: /x"), None);
        assert_eq!(RecordKind::classify("[Thread:State]"), None);
    }

    #[test]
    fn test_application_only_on_first_line() {
        let log = Log::parse(APPLICATION_LINE);
        let application = log.application.unwrap();
        assert_eq!(application.identifier.as_deref(), Some("MyCoolApp"));
        assert_eq!(
            application.organization_identifier.as_deref(),
            Some("MyCoolOrg")
        );
        assert_eq!(application.version.as_deref(), Some("25"));
        assert_eq!(application.short_version.as_deref(), Some("5.0"));

        let log = Log::parse(&format!("[Signal] signal: 0x6\n{APPLICATION_LINE}"));
        assert_eq!(log.application, None);
        assert_eq!(log.signal.unwrap().number, Some(6));
    }

    #[test]
    fn test_leading_blank_lines_are_ignored() {
        let log = Log::parse(&format!("\n\n{APPLICATION_LINE}\n\n[Signal] signal: 0xb\n"));
        assert!(log.application.is_some());
        assert_eq!(log.signal.unwrap().number, Some(0xb));
    }

    #[test]
    fn test_thread_state_seals_previous_thread() {
        let log = Log::parse(
            "[Thread:State] rax: 0x0\n\
             [Thread:Crashed]\n\
             [Thread:Frame] ip: 0x10\n\
             [Thread:Frame] ip: 0x20\n\
             [Thread:State] rax: 0x1\n\
             [Thread:Frame] ip: 0x30\n\
             [Thread:State] rax: 0x2",
        );
        assert_eq!(log.threads.len(), 3);
        assert!(log.threads[0].crashed);
        assert_eq!(log.threads[0].frames.len(), 2);
        assert_eq!(log.threads[0].frames[1].ip, Some(0x20));
        assert!(!log.threads[1].crashed);
        assert_eq!(log.threads[1].frames.len(), 1);
        assert!(log.threads[2].frames.is_empty());
        assert_eq!(
            log.threads[2].state.as_ref().unwrap().registers["rax"],
            "0x2"
        );
        assert_eq!(log.crashed_thread(), Some(&log.threads[0]));
    }

    #[test]
    fn test_frames_and_marker_before_any_thread_are_dropped() {
        let log = Log::parse(
            "[Thread:Frame] ip: 0x10\n\
             [Thread:Crashed]\n\
             [Thread:State] rax: 0x0\n\
             [Thread:Frame] ip: 0x20",
        );
        assert_eq!(log.threads.len(), 1);
        assert!(!log.threads[0].crashed);
        assert_eq!(log.threads[0].frames, vec![StackFrame {
            ip: Some(0x20),
            fp: None,
            sp: None
        }]);
    }

    #[test]
    fn test_last_signal_wins() {
        let log = Log::parse("[Signal] signal: 0x6, code: 0x0\n[Signal] signal: 0xb, code: 0x1");
        let signal = log.signal.unwrap();
        assert_eq!(signal.number, Some(0xb));
        assert_eq!(signal.code, Some(1));
    }

    #[test]
    fn test_last_environment_wins() {
        let log = Log::parse(
            "[Environment] platform: macOS, os_version: 10.15.7, region: CA\n\
             [Binary:Load] path: /usr/lib/dyld\n\
             [Environment] platform: iOS, os_build: 18A8395",
        );
        let environment = log.environment.unwrap();
        assert_eq!(environment.platform.as_deref(), Some("iOS"));
        assert_eq!(environment.os_build.as_deref(), Some("18A8395"));
        // The earlier record is replaced as a whole, not merged.
        assert_eq!(environment.os_version, None);
        assert_eq!(environment.region, None);
        assert_eq!(log.binaries.len(), 1);
    }

    #[test]
    fn test_unknown_lines_are_skipped() {
        let mut builder = LogBuilder::new();
        assert_eq!(builder.process_line("[Binary:Unload] path: /usr/lib/dyld"), None);
        assert_eq!(builder.process_line("garbage"), None);
        assert_eq!(
            builder.process_line("[Binary:Load] path: /usr/lib/dyld"),
            Some(RecordKind::BinaryLoad)
        );
        assert_eq!(builder.skipped_lines, 2);
        let log = builder.build();
        assert_eq!(log.binaries.len(), 1);
        assert!(log.threads.is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(Log::parse(""), Log::default());
        assert_eq!(Log::parse("\n\n\n"), Log::default());
    }

    #[test]
    fn test_parse_is_deterministic() {
        let contents = format!(
            "{APPLICATION_LINE}\n\
             [Binary:Load] path: /usr/lib/dyld, address: 0x1000, size: 0x100, uuid: a64d10a6fe1739ce93926615be54e10e\n\
             [Signal] signal: 0xb, code: 0x1\n\
             [Thread:State] rax: 0x0, rbx: 0x1\n\
             [Thread:Crashed]\n\
             [Thread:Frame] ip: 0x1010, fp: 0x2, sp: 0x3"
        );
        assert_eq!(Log::parse(&contents), Log::parse(&contents));
    }

    #[test]
    fn test_lookup_binary() {
        let log = Log::parse(
            "[Binary:Load] path: /a, address: 0x1000, size: 0x100\n\
             [Binary:Load] path: /b, address: 0x2000, size: 0x100",
        );
        let frame = |ip| StackFrame {
            ip,
            fp: None,
            sp: None,
        };
        assert_eq!(
            log.lookup_binary(&frame(Some(0x2010))).and_then(|b| b.name()),
            Some("b")
        );
        assert_eq!(log.lookup_binary(&frame(Some(0x3000))), None);
        assert_eq!(log.lookup_binary(&frame(None)), None);
    }
}
