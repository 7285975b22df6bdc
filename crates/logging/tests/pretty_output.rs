//! End-to-end tests for the pretty formatter through the registry: header
//! layout, multi-line splitting, key/value lines, and indentation.

use logging::{ChannelRegistry, Fields, Level};
use logging_sink::{MemoryHandle, MemorySink};
use serde_json::json;

fn pretty_registry() -> (ChannelRegistry, MemoryHandle) {
    let registry = ChannelRegistry::new();
    registry.setup_filters("", "debug4").expect("valid spec");
    let sink = MemorySink::new();
    let handle = sink.handle();
    registry.add_sink(sink);
    (registry, handle)
}

// ============================================================================
// Header Layout
// ============================================================================

/// Verifies the header carries timestamp, padded channel, and level code.
#[test]
fn header_has_timestamp_channel_and_level() {
    let (registry, handle) = pretty_registry();
    registry
        .log("NET", Level::Warning, "link down", None)
        .expect("log succeeds");

    let lines = handle.lines();
    assert_eq!(lines.len(), 1);
    let line = &lines[0];

    // 19-character timestamp, then the bracketed channel:level block.
    assert_eq!(&line[4..5], "/");
    assert!(line.contains("[NET  :WARN] "));
    assert!(line.ends_with("link down"));
}

/// Verifies long channel names are truncated in the header only.
#[test]
fn long_channels_truncate_in_header() {
    let (registry, handle) = pretty_registry();
    registry
        .log("ORCHESTRATOR", Level::Info, "msg", None)
        .expect("log succeeds");

    assert!(handle.contents().contains("[ORCHE:INFO]"));
}

/// Verifies the thread id appears in the header when enabled.
#[test]
fn thread_id_annotation_extends_the_header() {
    let (registry, handle) = pretty_registry();
    registry.enable_thread_id();
    registry
        .log("NET", Level::Info, "msg", None)
        .expect("log succeeds");

    let contents = handle.contents();
    let start = contents.find("[NET  :INFO:").expect("thread id in header");
    let rest = &contents[start + "[NET  :INFO:".len()..];
    let id: String = rest.chars().take_while(char::is_ascii_digit).collect();
    assert!(!id.is_empty());
}

/// Verifies the service name renders between timestamp and channel block.
#[test]
fn service_name_renders_in_angle_brackets() {
    let (registry, handle) = pretty_registry();
    registry.set_service_name("gateway");
    registry
        .log("NET", Level::Info, "msg", None)
        .expect("log succeeds");

    assert!(handle.contents().contains(" <gateway> [NET  :INFO]"));
}

/// Verifies a log code renders after the bracketed block.
#[test]
fn log_code_renders_after_the_block() {
    let (registry, handle) = pretty_registry();
    registry
        .log_with_code("NET", Level::Info, "<NET00000042E>", "msg", None)
        .expect("log succeeds");

    assert!(handle.contents().contains("] <NET00000042E> msg"));
}

// ============================================================================
// Line Splitting
// ============================================================================

/// Verifies each message line gets its own self-contained output line.
#[test]
fn multi_line_messages_split_with_repeated_headers() {
    let (registry, handle) = pretty_registry();
    registry
        .log("NET", Level::Info, "first\nsecond\nthird", None)
        .expect("log succeeds");

    let lines = handle.lines();
    assert_eq!(lines.len(), 3);
    for line in &lines {
        assert!(line.contains("[NET  :INFO] "));
    }
    assert!(lines[0].ends_with("first"));
    assert!(lines[2].ends_with("third"));
}

/// Verifies extra data renders one key/value line per key.
#[test]
fn fields_render_one_line_per_key() {
    let (registry, handle) = pretty_registry();
    let mut fields = Fields::new();
    fields.insert("attempts".to_owned(), json!(3));
    fields.insert("peer".to_owned(), json!("10.0.0.2"));
    registry
        .log("NET", Level::Info, "retrying", Some(fields))
        .expect("log succeeds");

    let lines = handle.lines();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].ends_with("attempts: 3"));
    assert!(lines[2].ends_with("peer: \"10.0.0.2\""));
}

/// Verifies metadata lines render when the annotation is enabled.
#[test]
fn metadata_lines_follow_the_toggle() {
    let (registry, handle) = pretty_registry();
    registry.add_metadata("request", json!("abc"));

    registry
        .log("NET", Level::Info, "hidden", None)
        .expect("log succeeds");
    registry.enable_metadata();
    registry
        .log("NET", Level::Info, "shown", None)
        .expect("log succeeds");
    registry.clear_metadata();

    let lines = handle.lines();
    assert_eq!(lines.len(), 3);
    assert!(!lines[0].contains("request"));
    assert!(lines[2].ends_with("request: \"abc\""));
}

// ============================================================================
// Indentation
// ============================================================================

/// Verifies indentation renders two spaces per level after the header.
#[test]
fn indentation_prefixes_content() {
    let (registry, handle) = pretty_registry();

    registry
        .log("NET", Level::Info, "flat", None)
        .expect("log succeeds");
    registry.indent();
    registry.indent();
    registry
        .log("NET", Level::Info, "nested", None)
        .expect("log succeeds");
    registry.deindent();
    registry.deindent();

    let lines = handle.lines();
    assert!(lines[0].ends_with("] flat"));
    assert!(lines[1].ends_with("]     nested"));
}
