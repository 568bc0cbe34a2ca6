#![forbid(unsafe_code)]

//! Per-map configuration.

/// What `insert` does when the new value equals the stored one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChangePolicy {
    /// Always replace and report [`ItemChanged`](crate::CollectionChange::ItemChanged).
    #[default]
    NotifyAlways,
    /// Treat an equal value as a no-op: no version bump, no notification.
    SkipUnchanged,
}

/// Configuration for an [`ObservableMap`](crate::ObservableMap).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapConfig {
    /// Handling of value-preserving replacements.
    pub change_policy: ChangePolicy,
}

impl MapConfig {
    /// Create a configuration with the given change policy.
    #[must_use]
    pub fn new(change_policy: ChangePolicy) -> Self {
        Self { change_policy }
    }

    /// Set the change policy.
    #[must_use]
    pub fn with_change_policy(mut self, change_policy: ChangePolicy) -> Self {
        self.change_policy = change_policy;
        self
    }
}
