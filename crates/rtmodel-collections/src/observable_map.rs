#![forbid(unsafe_code)]

//! Keyed container with synchronous change notification.
//!
//! # Design
//!
//! [`ObservableMap<K, V>`] keeps its entries in shared, reference-counted
//! storage (`Rc<..>` with `RefCell` interiors). Every successful mutation
//! commits to the store first, then delivers exactly one
//! [`MapChangedEventArgs`] to each registered listener, in registration
//! order, before the mutating call returns. Listeners receive the map
//! itself as sender and observe the post-mutation state.
//!
//! # Performance
//!
//! | Operation        | Complexity                    |
//! |------------------|-------------------------------|
//! | `lookup()`       | O(log N)                      |
//! | `insert()`       | O(log N + L), L = listeners   |
//! | `remove()`       | O(log N + L)                  |
//! | `get_view()`     | O(N) (snapshot copy)          |
//! | `add_map_changed()` | O(log L)                   |
//!
//! # Failure Modes
//!
//! - **Re-entrant mutation**: calling `insert`/`remove`/`clear` from inside
//!   a listener on the same map returns [`RtError::Reentrancy`] and leaves
//!   the map unchanged. Reads and (de)registration are allowed.
//! - **Panicking listener**: the panic propagates out of the mutating call
//!   and the remaining listeners are skipped. The mutation itself has
//!   already been committed and the map remains usable.
//! - **Reference cycles**: a listener that captures a clone of the map it is
//!   registered on keeps that map alive until it is removed. Use the
//!   `sender` argument instead.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;
use std::rc::{Rc, Weak};

use rtmodel_foundation::{RtError, RtResult};
use tracing::{debug, trace_span, warn};

use crate::config::{ChangePolicy, MapConfig};
use crate::event::{EventRevoker, EventToken, HandlerRegistry, TokenSource};
use crate::map_changed::{CollectionChange, MapChangedEventArgs};
use crate::map_view::MapView;

/// Listener signature: `(sender, args)`.
pub type MapChangedHandler<K, V> = dyn Fn(&ObservableMap<K, V>, &MapChangedEventArgs<K>);

/// Entry store plus its mutation counter.
struct MapState<K, V> {
    entries: BTreeMap<K, V>,
    version: u64,
}

/// Shared interior for [`ObservableMap`].
struct MapShared<K, V> {
    state: RefCell<MapState<K, V>>,
    handlers: RefCell<HandlerRegistry<MapChangedHandler<K, V>>>,
    /// Set while listeners are being invoked.
    dispatching: Cell<bool>,
    config: MapConfig,
}

impl<K: 'static, V: 'static> TokenSource for MapShared<K, V> {
    fn revoke(&self, token: EventToken) -> bool {
        // Registry borrow must end before the handler (and its captures) drop.
        let handler = self.handlers.borrow_mut().remove(token);
        let removed = handler.is_some();
        debug!(%token, removed, "map changed handler revoked");
        drop(handler);
        removed
    }
}

/// Clears the dispatch flag when delivery ends, including by unwinding.
struct DispatchGuard<'a> {
    flag: &'a Cell<bool>,
}

impl<'a> DispatchGuard<'a> {
    fn enter(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self { flag }
    }
}

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

/// An ordered map that notifies listeners of every mutation.
///
/// Cloning an `ObservableMap` creates a new handle to the **same** store and
/// listener set.
///
/// # Invariants
///
/// 1. `size()` equals the number of distinct keys; `has_key(k)` is true iff
///    `k` is stored.
/// 2. Each successful mutation bumps `version()` by exactly 1 and produces
///    exactly one notification per listener registered when delivery began.
/// 3. Listeners are invoked in registration order.
/// 4. After `remove_map_changed(token)` returns, the removed listener is not
///    invoked by any later mutation.
pub struct ObservableMap<K, V> {
    shared: Rc<MapShared<K, V>>,
}

// Manual Clone: shares the same Rc.
impl<K, V> Clone for ObservableMap<K, V> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for ObservableMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.state.borrow();
        f.debug_struct("ObservableMap")
            .field("entries", &state.entries)
            .field("version", &state.version)
            .field("listener_count", &self.shared.handlers.borrow().len())
            .finish()
    }
}

impl<K, V> Default for ObservableMap<K, V>
where
    K: Ord + Clone + fmt::Debug + 'static,
    V: Clone + PartialEq + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> ObservableMap<K, V>
where
    K: Ord + Clone + fmt::Debug + 'static,
    V: Clone + PartialEq + 'static,
{
    /// Create an empty map with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MapConfig::default())
    }

    /// Create an empty map with the given configuration.
    #[must_use]
    pub fn with_config(config: MapConfig) -> Self {
        Self::from_parts(BTreeMap::new(), config)
    }

    fn from_parts(entries: BTreeMap<K, V>, config: MapConfig) -> Self {
        Self {
            shared: Rc::new(MapShared {
                state: RefCell::new(MapState {
                    entries,
                    version: 0,
                }),
                handlers: RefCell::new(HandlerRegistry::default()),
                dispatching: Cell::new(false),
                config,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &MapConfig {
        &self.shared.config
    }

    /// Number of entries.
    #[must_use]
    pub fn size(&self) -> usize {
        self.shared.state.borrow().entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    #[must_use]
    pub fn has_key<Q>(&self, key: &Q) -> bool
    where
        K: std::borrow::Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.shared.state.borrow().entries.contains_key(key)
    }

    /// Value stored under `key`, or [`RtError::KeyNotFound`].
    pub fn lookup<Q>(&self, key: &Q) -> RtResult<V>
    where
        K: std::borrow::Borrow<Q>,
        Q: Ord + fmt::Debug + ?Sized,
    {
        self.shared
            .state
            .borrow()
            .entries
            .get(key)
            .cloned()
            .ok_or_else(|| RtError::key_not_found(&key))
    }

    /// Mutation counter. Increments by 1 per notified mutation.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.shared.state.borrow().version
    }

    /// Add or replace the entry for `key`.
    ///
    /// Returns `true` if an existing entry was replaced. Listeners see
    /// [`CollectionChange::ItemInserted`] for new keys and
    /// [`CollectionChange::ItemChanged`] for replacements.
    ///
    /// Under [`ChangePolicy::SkipUnchanged`], replacing a value with an equal
    /// one returns `Ok(true)` without notifying and without bumping
    /// [`version`](Self::version).
    pub fn insert(&self, key: impl Into<K>, value: impl Into<V>) -> RtResult<bool> {
        self.ensure_idle("insert")?;
        let key = key.into();
        let value = value.into();
        let change = {
            let mut state = self.shared.state.borrow_mut();
            let change = match state.entries.entry(key.clone()) {
                Entry::Occupied(mut slot) => {
                    if self.shared.config.change_policy == ChangePolicy::SkipUnchanged
                        && *slot.get() == value
                    {
                        return Ok(true);
                    }
                    slot.insert(value);
                    CollectionChange::ItemChanged
                }
                Entry::Vacant(slot) => {
                    slot.insert(value);
                    CollectionChange::ItemInserted
                }
            };
            state.version += 1;
            change
        };
        self.notify(&MapChangedEventArgs::keyed(change, key));
        Ok(change == CollectionChange::ItemChanged)
    }

    /// Remove `key` and return its value, or [`RtError::KeyNotFound`]
    /// (nothing is notified in that case).
    pub fn remove<Q>(&self, key: &Q) -> RtResult<V>
    where
        K: std::borrow::Borrow<Q>,
        Q: Ord + fmt::Debug + ?Sized,
    {
        self.ensure_idle("remove")?;
        let (key, value) = {
            let mut state = self.shared.state.borrow_mut();
            let removed = state
                .entries
                .remove_entry(key)
                .ok_or_else(|| RtError::key_not_found(&key))?;
            state.version += 1;
            removed
        };
        self.notify(&MapChangedEventArgs::keyed(
            CollectionChange::ItemRemoved,
            key,
        ));
        Ok(value)
    }

    /// Remove every entry. Always notifies [`CollectionChange::Reset`],
    /// even if the map was already empty.
    pub fn clear(&self) -> RtResult<()> {
        self.ensure_idle("clear")?;
        {
            let mut state = self.shared.state.borrow_mut();
            state.entries.clear();
            state.version += 1;
        }
        self.notify(&MapChangedEventArgs::reset());
        Ok(())
    }

    /// Snapshot of the current entries.
    #[must_use]
    pub fn get_view(&self) -> MapView<K, V> {
        MapView::new(self.shared.state.borrow().entries.clone())
    }

    /// Entries in key order.
    #[must_use]
    pub fn entries(&self) -> Vec<(K, V)> {
        self.shared
            .state
            .borrow()
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Keys in order.
    #[must_use]
    pub fn keys(&self) -> Vec<K> {
        self.shared.state.borrow().entries.keys().cloned().collect()
    }

    /// Register a listener invoked after every subsequent mutation.
    ///
    /// The returned token is the only way to unregister it; see
    /// [`subscribe`](Self::subscribe) for an RAII alternative.
    pub fn add_map_changed(
        &self,
        handler: impl Fn(&ObservableMap<K, V>, &MapChangedEventArgs<K>) + 'static,
    ) -> EventToken {
        let token = self.shared.handlers.borrow_mut().add(Rc::new(handler));
        debug!(%token, "map changed handler added");
        token
    }

    /// Unregister the listener behind `token`. Returns `false` if the token
    /// is unknown or was already removed.
    ///
    /// Calling this from inside a listener does not affect the delivery in
    /// progress; the listener stops receiving notifications from the next
    /// mutation on.
    pub fn remove_map_changed(&self, token: EventToken) -> bool {
        self.shared.revoke(token)
    }

    /// Register a listener that stays registered until the returned
    /// [`EventRevoker`] is dropped.
    pub fn subscribe(
        &self,
        handler: impl Fn(&ObservableMap<K, V>, &MapChangedEventArgs<K>) + 'static,
    ) -> EventRevoker {
        let token = self.add_map_changed(handler);
        let shared: Rc<dyn TokenSource> = self.shared.clone();
        EventRevoker::new(Rc::downgrade(&shared), token)
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.shared.handlers.borrow().len()
    }

    /// Whether two handles share the same store.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.shared, &other.shared)
    }

    /// Weak handle that does not keep the map alive.
    #[must_use]
    pub fn downgrade(&self) -> WeakObservableMap<K, V> {
        WeakObservableMap {
            shared: Rc::downgrade(&self.shared),
        }
    }

    fn ensure_idle(&self, operation: &'static str) -> RtResult<()> {
        if self.shared.dispatching.get() {
            warn!(operation, "rejected mutation during change notification");
            return Err(RtError::Reentrancy);
        }
        Ok(())
    }

    /// Deliver `args` to a snapshot of the current listeners.
    fn notify(&self, args: &MapChangedEventArgs<K>) {
        // Snapshot first so no borrow is held while listeners run.
        let handlers = self.shared.handlers.borrow().snapshot();
        if handlers.is_empty() {
            return;
        }
        let _span = trace_span!(
            "map_changed",
            change = %args.collection_change(),
            key = ?args.key(),
            listeners = handlers.len()
        )
        .entered();
        let _guard = DispatchGuard::enter(&self.shared.dispatching);
        for handler in &handlers {
            handler(self, args);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for ObservableMap<K, V>
where
    K: Ord + Clone + fmt::Debug + 'static,
    V: Clone + PartialEq + 'static,
{
    /// Build a populated map without emitting notifications.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_parts(iter.into_iter().collect(), MapConfig::default())
    }
}

/// Non-owning handle to an [`ObservableMap`].
pub struct WeakObservableMap<K, V> {
    shared: Weak<MapShared<K, V>>,
}

impl<K, V> Clone for WeakObservableMap<K, V> {
    fn clone(&self) -> Self {
        Self {
            shared: Weak::clone(&self.shared),
        }
    }
}

impl<K, V> fmt::Debug for WeakObservableMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakObservableMap")
            .field("alive", &(self.shared.strong_count() > 0))
            .finish()
    }
}

impl<K, V> WeakObservableMap<K, V> {
    /// Recover a strong handle if the map is still alive.
    #[must_use]
    pub fn upgrade(&self) -> Option<ObservableMap<K, V>> {
        self.shared.upgrade().map(|shared| ObservableMap { shared })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
