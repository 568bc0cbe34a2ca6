#![forbid(unsafe_code)]

//! Observable collections for rtmodel.
//!
//! This crate provides keyed containers that report every mutation to
//! registered listeners:
//!
//! - [`ObservableMap`]: an ordered map emitting [`MapChangedEventArgs`]
//!   synchronously after each `insert`, `remove` and `clear`.
//! - [`EventToken`] / [`EventRevoker`]: token-based and RAII listener
//!   registration.
//! - [`MapView`]: detached read-only snapshots.
//!
//! # Architecture
//!
//! Maps use `Rc<RefCell<..>>` for single-threaded shared ownership; handles
//! are `!Send`. Listeners live in a token-keyed registry and are delivered a
//! snapshot of that registry, so registration changes made during delivery
//! apply from the next mutation.
//!
//! # Invariants
//!
//! 1. `size()` always equals the number of stored keys.
//! 2. Each mutation notifies every listener exactly once, in registration
//!    order, before returning; listeners observe the post-mutation state.
//! 3. Tokens are never reused; a removed token stays removed.
//! 4. Mutating a map from inside its own listener fails with
//!    [`RtError::Reentrancy`](rtmodel_foundation::RtError::Reentrancy).

pub mod config;
pub mod event;
pub mod map_changed;
pub mod map_view;
pub mod observable_map;

pub use config::{ChangePolicy, MapConfig};
pub use event::{EventRevoker, EventToken};
pub use map_changed::{CollectionChange, MapChangedEventArgs};
pub use map_view::MapView;
pub use observable_map::{MapChangedHandler, ObservableMap, WeakObservableMap};

use rtmodel_foundation::PropertyValue;

/// String-keyed, string-valued observable map.
pub type StringMap = ObservableMap<String, String>;

/// String-keyed observable map of boxed property values.
pub type PropertySet = ObservableMap<String, PropertyValue>;
