#![forbid(unsafe_code)]

//! rtmodel: the WinRT-style foundation data model.
//!
//! # Role
//! This crate is the public facade. It re-exports the workspace crates
//! under the namespace layout the projection layer addresses:
//!
//! - [`foundation`]: [`PropertyValue`](foundation::PropertyValue),
//!   [`PropertyType`](foundation::PropertyType), the value structs and
//!   [`RtError`](foundation::RtError).
//! - [`foundation::collections`]: [`StringMap`](foundation::collections::StringMap),
//!   [`PropertySet`](foundation::collections::PropertySet) and the change
//!   notification types.
//!
//! # Example
//!
//! ```
//! use rtmodel::foundation::collections::{CollectionChange, StringMap};
//! use rtmodel::foundation::{PropertyType, PropertyValue};
//!
//! let ipv = PropertyValue::create_uint8(250);
//! assert_eq!(ipv.property_type(), PropertyType::UInt8);
//! assert_eq!(ipv.get_uint8(), Ok(250));
//!
//! let m = StringMap::new();
//! let token = m.add_map_changed(|sender, args| {
//!     assert_eq!(args.collection_change(), CollectionChange::ItemInserted);
//!     assert!(sender.has_key("hello"));
//! });
//! m.insert("hello", "world").unwrap();
//! m.remove_map_changed(token);
//! assert_eq!(m.lookup("hello").as_deref(), Ok("world"));
//! ```
//!
//! # Features
//! - `serde`: forwards to `rtmodel-foundation/serde`.

pub mod foundation {
    //! Typed property values, value structs and errors.

    pub use rtmodel_foundation::*;

    pub mod collections {
        //! Observable collections and change notification.

        pub use rtmodel_collections::*;
    }
}

pub mod prelude {
    //! Common imports.

    pub use crate::foundation::collections::{
        CollectionChange, EventToken, MapChangedEventArgs, PropertySet, StringMap,
    };
    pub use crate::foundation::{PropertyType, PropertyValue, RtError, RtResult};
}
