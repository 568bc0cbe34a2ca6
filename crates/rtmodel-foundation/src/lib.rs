#![forbid(unsafe_code)]

//! Foundation: typed property values and the shared error taxonomy.
//!
//! # Role in rtmodel
//! `rtmodel-foundation` is the leaf of the workspace. It owns the boxed
//! [`PropertyValue`] variant, its [`PropertyType`] tags, the plain value
//! structs a variant can carry, and [`RtError`], which the collections crate
//! reuses for its own failures.
//!
//! # Primary responsibilities
//! - **PropertyValue**: one factory and one accessor per tag, tag-checked.
//! - **Value structs**: [`DateTime`], [`TimeSpan`], [`Point`], [`Size`],
//!   [`Rect`], [`Guid`].
//! - **RtError**: type mismatch, range, missing key and re-entrancy failures.
//!
//! # Features
//! - `serde`: derive `Serialize`/`Deserialize` for every public value type.

pub mod error;
pub mod geometry;
pub mod guid;
pub mod property_type;
pub mod property_value;
pub mod time;

pub use error::{RtError, RtResult};
pub use geometry::{Point, Rect, Size};
pub use guid::Guid;
pub use property_type::PropertyType;
pub use property_value::PropertyValue;
pub use time::{DateTime, TimeSpan};
