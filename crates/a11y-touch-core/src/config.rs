#![forbid(unsafe_code)]

//! Runtime configuration for [`TouchState`](crate::state::TouchState).
//!
//! Diagnostics are a pure side channel: toggling them never changes what the
//! ledgers or the mode machine report.

use crate::warn;

/// Env var enabling mode-transition logs (`1`/`true`/`0`/`false`).
pub const ENV_LOG_TRANSITIONS: &str = "A11Y_TOUCH_LOG_TRANSITIONS";
/// Env var enabling per-event ledger dumps (`1`/`true`/`0`/`false`).
pub const ENV_LOG_POINTERS: &str = "A11Y_TOUCH_LOG_POINTERS";
/// Env var selecting the primary-pointer policy (`last-down`/`earliest-down`).
pub const ENV_PRIMARY_POLICY: &str = "A11Y_TOUCH_PRIMARY_POLICY";

/// How a pointer going down affects the cached primary pointer.
///
/// Both policies drop the cache when the primary lifts and recompute the
/// earliest-down pointer on the next query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrimaryPointerPolicy {
    /// The pointer that went down last becomes primary.
    #[default]
    LastDown,
    /// A pointer only becomes primary if nothing else was down, so the
    /// primary is always the earliest-down pointer.
    EarliestDown,
}

impl PrimaryPointerPolicy {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "last-down" | "last" => Some(Self::LastDown),
            "earliest-down" | "earliest" | "first" => Some(Self::EarliestDown),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LastDown => "last-down",
            Self::EarliestDown => "earliest-down",
        }
    }
}

/// Configuration for a [`TouchState`](crate::state::TouchState).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TouchStateConfig {
    /// Log every mode transition with its before/after names (default: off).
    pub log_transitions: bool,
    /// Dump the affected ledger after every processed motion event (default: off).
    pub log_pointer_dumps: bool,
    /// Primary-pointer policy for the received ledger.
    pub primary_policy: PrimaryPointerPolicy,
}

impl TouchStateConfig {
    #[must_use]
    pub fn with_log_transitions(mut self, enabled: bool) -> Self {
        self.log_transitions = enabled;
        self
    }

    #[must_use]
    pub fn with_log_pointer_dumps(mut self, enabled: bool) -> Self {
        self.log_pointer_dumps = enabled;
        self
    }

    #[must_use]
    pub fn with_primary_policy(mut self, policy: PrimaryPointerPolicy) -> Self {
        self.primary_policy = policy;
        self
    }

    /// Load config from environment variables.
    ///
    /// Reads:
    /// - `A11Y_TOUCH_LOG_TRANSITIONS`
    /// - `A11Y_TOUCH_LOG_POINTERS`
    /// - `A11Y_TOUCH_PRIMARY_POLICY`
    ///
    /// Unparseable values keep the default.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Load config using a custom environment lookup (for tests).
    #[must_use]
    pub fn from_env_with<F>(get_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(val) = get_env(ENV_LOG_TRANSITIONS) {
            match parse_bool(&val) {
                Some(enabled) => config.log_transitions = enabled,
                None => warn!(key = ENV_LOG_TRANSITIONS, value = %val, "ignoring invalid value"),
            }
        }

        if let Some(val) = get_env(ENV_LOG_POINTERS) {
            match parse_bool(&val) {
                Some(enabled) => config.log_pointer_dumps = enabled,
                None => warn!(key = ENV_LOG_POINTERS, value = %val, "ignoring invalid value"),
            }
        }

        if let Some(val) = get_env(ENV_PRIMARY_POLICY) {
            match PrimaryPointerPolicy::parse(&val) {
                Some(policy) => config.primary_policy = policy,
                None => warn!(key = ENV_PRIMARY_POLICY, value = %val, "ignoring invalid value"),
            }
        }

        config
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_are_quiet_and_last_down() {
        let config = TouchStateConfig::default();
        assert!(!config.log_transitions);
        assert!(!config.log_pointer_dumps);
        assert_eq!(config.primary_policy, PrimaryPointerPolicy::LastDown);
    }

    #[test]
    fn empty_env_yields_defaults() {
        assert_eq!(
            TouchStateConfig::from_env_with(env(&[])),
            TouchStateConfig::default()
        );
    }

    #[test]
    fn env_overrides() {
        let config = TouchStateConfig::from_env_with(env(&[
            (ENV_LOG_TRANSITIONS, "1"),
            (ENV_LOG_POINTERS, "TRUE"),
            (ENV_PRIMARY_POLICY, "earliest-down"),
        ]));
        assert!(config.log_transitions);
        assert!(config.log_pointer_dumps);
        assert_eq!(config.primary_policy, PrimaryPointerPolicy::EarliestDown);
    }

    #[test]
    fn invalid_env_values_keep_defaults() {
        let config = TouchStateConfig::from_env_with(env(&[
            (ENV_LOG_TRANSITIONS, "maybe"),
            (ENV_PRIMARY_POLICY, "newest"),
        ]));
        assert_eq!(config, TouchStateConfig::default());
    }

    #[test]
    fn builder_methods() {
        let config = TouchStateConfig::default()
            .with_log_transitions(true)
            .with_primary_policy(PrimaryPointerPolicy::EarliestDown);
        assert!(config.log_transitions);
        assert!(!config.log_pointer_dumps);
        assert_eq!(config.primary_policy, PrimaryPointerPolicy::EarliestDown);
        assert_eq!(config.primary_policy.as_str(), "earliest-down");
    }
}
