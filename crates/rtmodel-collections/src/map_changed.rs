#![forbid(unsafe_code)]

//! Change metadata delivered to map listeners.

use std::fmt;

/// Kind of mutation reported to listeners.
///
/// Discriminants match the WinRT `CollectionChange` enumeration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum CollectionChange {
    /// The collection was cleared.
    Reset = 0,
    /// A new key was added.
    ItemInserted = 1,
    /// A key and its value were removed.
    ItemRemoved = 2,
    /// The value of an existing key was replaced.
    ItemChanged = 3,
}

impl CollectionChange {
    #[inline]
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }

    #[must_use]
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Reset),
            1 => Some(Self::ItemInserted),
            2 => Some(Self::ItemRemoved),
            3 => Some(Self::ItemChanged),
            _ => None,
        }
    }
}

impl fmt::Display for CollectionChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Reset => "Reset",
            Self::ItemInserted => "ItemInserted",
            Self::ItemRemoved => "ItemRemoved",
            Self::ItemChanged => "ItemChanged",
        })
    }
}

/// Arguments of one map change notification.
///
/// `key` is `None` only for [`CollectionChange::Reset`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapChangedEventArgs<K> {
    change: CollectionChange,
    key: Option<K>,
}

impl<K> MapChangedEventArgs<K> {
    pub(crate) fn keyed(change: CollectionChange, key: K) -> Self {
        Self {
            change,
            key: Some(key),
        }
    }

    pub(crate) fn reset() -> Self {
        Self {
            change: CollectionChange::Reset,
            key: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn collection_change(&self) -> CollectionChange {
        self.change
    }

    /// The affected key.
    #[inline]
    #[must_use]
    pub fn key(&self) -> Option<&K> {
        self.key.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_winrt() {
        assert_eq!(CollectionChange::Reset.code(), 0);
        assert_eq!(CollectionChange::ItemInserted.code(), 1);
        assert_eq!(CollectionChange::ItemRemoved.code(), 2);
        assert_eq!(CollectionChange::ItemChanged.code(), 3);
        for code in 0..4 {
            assert_eq!(CollectionChange::from_code(code).map(|c| c.code()), Some(code));
        }
        assert_eq!(CollectionChange::from_code(4), None);
    }

    #[test]
    fn reset_has_no_key() {
        let args: MapChangedEventArgs<String> = MapChangedEventArgs::reset();
        assert_eq!(args.collection_change(), CollectionChange::Reset);
        assert_eq!(args.key(), None);

        let args = MapChangedEventArgs::keyed(CollectionChange::ItemInserted, "dr");
        assert_eq!(args.key(), Some(&"dr"));
        assert_eq!(args.collection_change().to_string(), "ItemInserted");
    }
}
