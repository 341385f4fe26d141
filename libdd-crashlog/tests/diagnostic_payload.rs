// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

mod common;

use chrono::DateTime;
use libdd_crashlog::{DiagnosticPayload, Log};
use uuid::Uuid;

fn signal_crash_payload() -> DiagnosticPayload {
    DiagnosticPayload::from_source(&common::fixture_source(), "macos_signal_crash").unwrap()
}

#[test]
fn test_diagnostic_payload_transformation() {
    let payload = signal_crash_payload();
    assert_eq!(payload.crash_diagnostics().len(), 1);

    let diagnostic = &payload.crash_diagnostics()[0];
    let meta_data = &diagnostic.meta_data;
    assert_eq!(meta_data.application_build_version, "1");
    assert_eq!(meta_data.device_type, "MacBookPro15,2");
    assert_eq!(meta_data.os_version, "macOS 10.15.7 (19H2)");
    assert_eq!(meta_data.platform_architecture, "x86_64");
    assert_eq!(meta_data.region_format, "CA");
    assert_eq!(diagnostic.virtual_memory_region_info(), None);
    assert_eq!(diagnostic.application_version(), "1.0");
    assert_eq!(diagnostic.termination_reason(), "Namespace SIGNAL, Code 0x6");
    assert_eq!(diagnostic.signal(), Some(6));
    assert_eq!(meta_data.exception_code, None);
    assert_eq!(meta_data.exception_type, None);

    let tree = &diagnostic.call_stack_tree;
    assert_eq!(tree.call_stacks.len(), 6);
    assert!(!tree.call_stacks[1].thread_attributed);

    let crashed_stack = &tree.call_stacks[0];
    assert!(crashed_stack.thread_attributed);
    assert_eq!(tree.attributed_stack(), Some(crashed_stack));

    let frames = crashed_stack.frames();
    assert_eq!(frames.len(), 18);

    assert_eq!(frames[0].sample_count, 1);
    assert_eq!(
        frames[0].binary_uuid,
        Some(Uuid::parse_str("A576A1CF-7726-3146-B04B-A26E1CDB9757").unwrap())
    );
    assert_eq!(
        frames[0].binary_name.as_deref(),
        Some("libsystem_kernel.dylib")
    );
    assert_eq!(frames[0].address, 0x7fff7153333a);
    assert_eq!(frames[0].offset_into_binary_text_segment, Some(0x733A));

    // Just past the end of libsystem_pthread.
    assert_eq!(frames[1].address, 0x7fff715f7e60);
    assert_eq!(frames[1].binary_uuid, None);
    assert_eq!(frames[1].binary_name, None);
    assert_eq!(frames[1].offset_into_binary_text_segment, None);

    assert_eq!(frames[3].binary_name.as_deref(), Some("ImpactTestMac"));
    assert_eq!(frames[3].offset_into_binary_text_segment, Some(0x2f4c));

    assert_eq!(frames[17].sample_count, 1);
    assert_eq!(
        frames[17].binary_uuid,
        Some(Uuid::parse_str("789A18C2-8AC7-3C88-813D-CD674376585D").unwrap())
    );
    assert_eq!(frames[17].binary_name.as_deref(), Some("libdyld.dylib"));
    assert_eq!(frames[17].address, 0x7fff713ebcc9);
    assert_eq!(frames[17].offset_into_binary_text_segment, Some(0x1ACC9));
    assert!(frames[17].sub_frames.is_empty());
}

#[test]
fn test_parsing_json_output() {
    let json = signal_crash_payload().to_json().unwrap();
    let payload = DiagnosticPayload::from_json(&json).unwrap();

    assert_eq!(payload.crash_diagnostics().len(), 1);
    let diagnostic = &payload.crash_diagnostics()[0];
    assert_eq!(diagnostic.application_version(), "1.0");
    assert_eq!(diagnostic.termination_reason(), "Namespace SIGNAL, Code 0x6");
    assert_eq!(diagnostic.virtual_memory_region_info(), None);
    assert_eq!(diagnostic.signal(), Some(6));
    assert_eq!(
        diagnostic.call_stack_tree.call_stacks[0].frames().len(),
        18
    );
}

#[test]
fn test_json_field_names() {
    let log = Log::from_source(&common::fixture_source(), "macos_signal_crash").unwrap();
    let now = DateTime::from_timestamp(1602598200, 0).unwrap();
    let payload = DiagnosticPayload::from_log_at(&log, now);
    let json: serde_json::Value =
        serde_json::from_slice(&payload.to_json_pretty().unwrap()).unwrap();

    assert_eq!(json["timeStampBegin"], "2020-10-13 14:10:00 +0000");
    assert_eq!(json["timeStampEnd"], "2020-10-13 14:10:00 +0000");

    let diagnostic = &json["crashDiagnostics"][0];
    assert_eq!(diagnostic["version"], "1.0.0");
    assert_eq!(
        diagnostic["diagnosticMetaData"],
        serde_json::json!({
            "deviceType": "MacBookPro15,2",
            "appBuildVersion": "1",
            "appVersion": "1.0",
            "osVersion": "macOS 10.15.7 (19H2)",
            "platformArchitecture": "x86_64",
            "regionFormat": "CA",
            "terminationReason": "Namespace SIGNAL, Code 0x6",
            "signal": 6,
        })
    );

    let second_stack = &diagnostic["callStackTree"]["callStacks"][1];
    assert_eq!(second_stack["threadAttributed"], false);
    assert_eq!(
        second_stack["callStackRootFrames"],
        serde_json::json!([{
            "binaryUUID": "A576A1CF-7726-3146-B04B-A26E1CDB9757",
            "offsetIntoBinaryTextSegment": 0x24ce,
            "sampleCount": 1,
            "binaryName": "libsystem_kernel.dylib",
            "address": 0x7fff7152e4ce_u64,
            "subFrames": [{
                "binaryUUID": "62CB1A98-0B8F-31E7-A02B-C1139419F5B4",
                "offsetIntoBinaryTextSegment": 0x1000,
                "sampleCount": 1,
                "binaryName": "libsystem_pthread.dylib",
                "address": 0x7fff715ed000_u64,
            }],
        }])
    );
}

#[test]
fn test_non_crash_payload_is_not_reportable() {
    let payload =
        DiagnosticPayload::from_source(&common::fixture_source(), "noncrash").unwrap();
    assert!(!payload.is_reportable());
    assert!(payload.crash_diagnostics().is_empty());

    let json: serde_json::Value = serde_json::from_slice(&payload.to_json().unwrap()).unwrap();
    assert!(json.get("crashDiagnostics").is_none());
}
