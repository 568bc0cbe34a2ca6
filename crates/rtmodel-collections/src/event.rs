#![forbid(unsafe_code)]

//! Token-keyed handler registry and RAII revokers.
//!
//! Handlers are stored under an [`EventToken`] drawn from a per-registry
//! counter. Tokens start at 1, increase strictly, and are never reused, so
//! iterating the registry in token order is iterating in registration order.
//!
//! Delivery always works from a [`HandlerRegistry::snapshot`]: the caller
//! clones the handler list, releases its borrow, and only then invokes the
//! callbacks. Registering or removing a handler from inside a callback is
//! therefore safe; the change takes effect from the next delivery.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

/// Opaque handle identifying one handler registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventToken(u64);

impl EventToken {
    /// Raw token value, as handed to the projection layer.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EventToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handlers of one event, keyed by registration token.
pub(crate) struct HandlerRegistry<H: ?Sized> {
    last_token: u64,
    handlers: BTreeMap<EventToken, Rc<H>>,
}

impl<H: ?Sized> Default for HandlerRegistry<H> {
    fn default() -> Self {
        Self {
            last_token: 0,
            handlers: BTreeMap::new(),
        }
    }
}

impl<H: ?Sized> HandlerRegistry<H> {
    pub(crate) fn add(&mut self, handler: Rc<H>) -> EventToken {
        self.last_token += 1;
        let token = EventToken(self.last_token);
        self.handlers.insert(token, handler);
        token
    }

    /// Take a registration out of the registry. Returns `None` for unknown
    /// or already removed tokens.
    ///
    /// The handler is handed back instead of dropped here: its captures may
    /// own revokers for this same registry, so the caller must release any
    /// borrow of the registry before letting it go.
    #[must_use]
    pub(crate) fn remove(&mut self, token: EventToken) -> Option<Rc<H>> {
        self.handlers.remove(&token)
    }

    /// Live handlers in registration order.
    pub(crate) fn snapshot(&self) -> Vec<Rc<H>> {
        self.handlers.values().cloned().collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.handlers.len()
    }
}

/// Something a registration can be removed from.
pub(crate) trait TokenSource {
    fn revoke(&self, token: EventToken) -> bool;
}

/// RAII guard for a handler registration.
///
/// Dropping the revoker removes the registration. The revoker only holds a
/// weak reference to its source, so it never keeps a collection alive; if
/// the collection is already gone, dropping is a no-op.
#[must_use = "dropping the revoker immediately unregisters the handler"]
pub struct EventRevoker {
    source: Weak<dyn TokenSource>,
    token: Option<EventToken>,
}

impl EventRevoker {
    pub(crate) fn new(source: Weak<dyn TokenSource>, token: EventToken) -> Self {
        Self {
            source,
            token: Some(token),
        }
    }

    /// Token of the guarded registration, or `None` once revoked or detached.
    #[must_use]
    pub fn token(&self) -> Option<EventToken> {
        self.token
    }

    /// Remove the registration now. Returns `true` if it was still present.
    pub fn revoke(&mut self) -> bool {
        match (self.token.take(), self.source.upgrade()) {
            (Some(token), Some(source)) => source.revoke(token),
            _ => false,
        }
    }

    /// Give up the guard and keep the registration alive; the returned
    /// token is the only way left to remove it.
    #[must_use]
    pub fn detach(mut self) -> Option<EventToken> {
        self.token.take()
    }
}

impl Drop for EventRevoker {
    fn drop(&mut self) {
        self.revoke();
    }
}

impl fmt::Debug for EventRevoker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventRevoker")
            .field("token", &self.token)
            .field("source_alive", &(self.source.strong_count() > 0))
            .finish()
    }
}
