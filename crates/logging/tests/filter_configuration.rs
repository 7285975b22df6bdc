//! Integration tests for level filtering and filter spec configuration.
//!
//! Filtering is ordinal comparison between the configured level (per
//! channel, falling back to the default) and the requested level.
//! Configuration is validate-then-swap: a malformed spec changes nothing.

use logging::{ChannelRegistry, Level, LogError};

// ============================================================================
// Ordinal Dominance
// ============================================================================

/// Verifies every configured level enables exactly the levels at or below
/// its own ordinal.
#[test]
fn configured_level_dominates_by_ordinal() {
    let registry = ChannelRegistry::new();

    for configured in Level::ALL {
        if configured == Level::Off {
            continue;
        }
        registry
            .setup_filters(&format!("CH:{configured}"), "off")
            .expect("valid spec");

        for requested in Level::ALL {
            if requested == Level::Off {
                continue;
            }
            let enabled = registry.is_enabled("CH", requested).expect("valid level");
            assert_eq!(
                enabled,
                configured >= requested,
                "configured {configured}, requested {requested}"
            );
        }
    }
}

/// Verifies equal configured and requested levels are enabled.
#[test]
fn equality_is_enabled() {
    let registry = ChannelRegistry::new();
    registry.setup_filters("CH:info", "off").expect("valid spec");
    assert!(registry.is_enabled("CH", Level::Info).expect("valid level"));
}

// ============================================================================
// Round-Trips and Defaults
// ============================================================================

/// Verifies configuring a channel makes exactly its levels observable.
#[test]
fn configure_then_is_enabled_round_trips() {
    let registry = ChannelRegistry::new();
    registry
        .setup_filters("X:info", "debug4")
        .expect("valid spec");

    assert!(registry.is_enabled("X", Level::Info).expect("valid level"));
    assert!(!registry.is_enabled("X", Level::Debug).expect("valid level"));
}

/// Verifies unlisted channels fall back to the default level.
#[test]
fn unlisted_channels_use_the_default() {
    let registry = ChannelRegistry::new();
    registry
        .setup_filters("X:info", "trace")
        .expect("valid spec");

    assert!(registry
        .is_enabled("UNLISTED", Level::Trace)
        .expect("valid level"));
    assert!(!registry
        .is_enabled("UNLISTED", Level::Debug)
        .expect("valid level"));
}

/// Verifies an empty spec clears overrides without failing.
#[test]
fn empty_spec_is_valid() {
    let registry = ChannelRegistry::new();
    registry.setup_filters("", "warning").expect("valid spec");
    assert!(registry
        .is_enabled("ANY", Level::Warning)
        .expect("valid level"));
    assert!(!registry.is_enabled("ANY", Level::Info).expect("valid level"));
}

/// Verifies a channel configured off silences everything on it.
#[test]
fn off_override_silences_a_channel() {
    let registry = ChannelRegistry::new();
    registry
        .setup_filters("QUIET:off", "debug")
        .expect("valid spec");
    assert!(!registry
        .is_enabled("QUIET", Level::Fatal)
        .expect("valid level"));
    assert!(registry
        .is_enabled("OTHER", Level::Debug)
        .expect("valid level"));
}

// ============================================================================
// Validate-Then-Swap
// ============================================================================

/// Verifies a piece without a colon fails and changes nothing.
#[test]
fn missing_colon_rejected_without_mutation() {
    let registry = ChannelRegistry::new();
    registry.setup_filters("A:debug", "info").expect("valid spec");

    let err = registry.setup_filters("Adebug", "info").unwrap_err();
    assert!(matches!(err, LogError::FilterSpec(_)));
    assert!(registry.is_enabled("A", Level::Debug).expect("valid level"));
}

/// Verifies a piece with two colons fails.
#[test]
fn double_colon_rejected() {
    let registry = ChannelRegistry::new();
    assert!(registry.setup_filters("A:debug:extra", "info").is_err());
}

/// Verifies an unknown level name in the spec fails.
#[test]
fn unknown_level_in_spec_rejected() {
    let registry = ChannelRegistry::new();
    let err = registry.setup_filters("A:loud", "info").unwrap_err();
    assert!(matches!(err, LogError::FilterSpec(_)));
}

/// Verifies an unknown default level fails.
#[test]
fn unknown_default_level_rejected() {
    let registry = ChannelRegistry::new();
    assert!(registry.setup_filters("", "chatty").is_err());
}

/// Verifies level names are matched case-sensitively.
#[test]
fn level_names_are_case_sensitive() {
    let registry = ChannelRegistry::new();
    assert!(registry.setup_filters("A:DEBUG", "info").is_err());
    assert!(registry.setup_filters("A:debug", "INFO").is_err());
}

// ============================================================================
// The Off Guard
// ============================================================================

/// Verifies enablement checks at off fail instead of returning false.
#[test]
fn is_enabled_at_off_is_an_error() {
    let registry = ChannelRegistry::new();
    registry.setup_filters("", "debug").expect("valid spec");
    assert!(matches!(
        registry.is_enabled("ANY", Level::Off),
        Err(LogError::OffLevel)
    ));
}
