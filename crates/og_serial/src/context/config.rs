use serde::{Deserialize, Serialize};

// -----------------------------------------------------------------------------
// SharingMode

/// How repeated [`Shared`] nodes are written.
///
/// [`Shared`]: crate::Shared
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SharingMode {
    /// Every occurrence is written in full. Cycles do not terminate.
    #[default]
    Unshared,
    /// The same node is written once, later occurrences are back-references.
    IdentityShared,
    /// Like `IdentityShared`, and structurally equal nodes are merged.
    ///
    /// Only nodes whose type supports hashing and equality are merged.
    /// Owned values are not nodes: two equal fields that are not behind a
    /// [`Shared`] are both written in full.
    ///
    /// [`Shared`]: crate::Shared
    EquivalenceShared,
}

impl SharingMode {
    /// Whether nodes get ids at all.
    #[inline]
    pub const fn is_shared(self) -> bool {
        !matches!(self, Self::Unshared)
    }
}

// -----------------------------------------------------------------------------
// SerialConfig

/// Stream-wide settings, fixed when a context is built.
///
/// Missing fields take their defaults, so a partial RON or JSON document is
/// a valid configuration.
///
/// ```
/// use og_serial::{SerialConfig, SharingMode};
///
/// let config = SerialConfig {
///     sharing: SharingMode::IdentityShared,
///     ..SerialConfig::default()
/// };
/// assert!(!config.share_class_names);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerialConfig {
    pub sharing: SharingMode,
    /// Write each class name once, then refer to it by class id.
    pub share_class_names: bool,
    /// Permit the blank constructor when a type has no other.
    pub allow_raw: bool,
}

#[cfg(test)]
mod tests {
    use super::{SerialConfig, SharingMode};

    #[test]
    fn defaults() {
        let config = SerialConfig::default();
        assert_eq!(config.sharing, SharingMode::Unshared);
        assert!(!config.share_class_names);
        assert!(!config.allow_raw);
        assert!(!config.sharing.is_shared());
        assert!(SharingMode::EquivalenceShared.is_shared());
    }
}
