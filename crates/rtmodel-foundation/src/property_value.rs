#![forbid(unsafe_code)]

//! Boxed values tagged with their runtime [`PropertyType`].
//!
//! # Design
//!
//! [`PropertyValue`] is a closed sum type: the active variant *is* the tag,
//! so a value can never report one type while holding another. Each tag gets
//! a `create_*` factory and a matching `get_*` accessor; asking for any other
//! type returns [`RtError::TypeMismatch`] rather than coercing.
//!
//! # Invariants
//!
//! 1. `property_type()` never changes for the lifetime of a value.
//! 2. `get_T(create_T(v)) == Ok(v)` for every supported `T`.
//! 3. Integers round-trip exactly over their full native range.
//! 4. Arrays keep their length and element order verbatim.
//!
//! # Boundary construction
//!
//! Dynamically typed callers hand over wide numbers. [`PropertyValue::create_integer`]
//! and [`PropertyValue::create_float`] narrow them to a requested tag and
//! return [`RtError::Range`] when the input does not fit.
//!
//! # Serialization
//!
//! With the `serde` feature, values serialize adjacently tagged as
//! `{"type": .., "value": ..}`. JSON cannot carry NaN or infinities:
//! `serde_json` writes non-finite `Single`/`Double` payloads as `null`, and
//! that `null` does not deserialize back into a `PropertyValue`.

use crate::error::{RtError, RtResult};
use crate::geometry::{Point, Rect, Size};
use crate::guid::Guid;
use crate::property_type::PropertyType;
use crate::time::{DateTime, TimeSpan};

/// A boxed value and its type tag.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", content = "value")
)]
pub enum PropertyValue {
    #[default]
    Empty,
    UInt8(u8),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Single(f32),
    Double(f64),
    /// A UTF-16 code unit.
    Char16(u16),
    Boolean(bool),
    String(String),
    DateTime(DateTime),
    TimeSpan(TimeSpan),
    Guid(Guid),
    Point(Point),
    Size(Size),
    Rect(Rect),
    UInt8Array(Vec<u8>),
    Int16Array(Vec<i16>),
    UInt16Array(Vec<u16>),
    Int32Array(Vec<i32>),
    UInt32Array(Vec<u32>),
    Int64Array(Vec<i64>),
    UInt64Array(Vec<u64>),
    SingleArray(Vec<f32>),
    DoubleArray(Vec<f64>),
    Char16Array(Vec<u16>),
    BooleanArray(Vec<bool>),
    StringArray(Vec<String>),
    DateTimeArray(Vec<DateTime>),
    TimeSpanArray(Vec<TimeSpan>),
    GuidArray(Vec<Guid>),
    PointArray(Vec<Point>),
    SizeArray(Vec<Size>),
    RectArray(Vec<Rect>),
}

impl PropertyValue {
    /// The runtime tag of this value.
    #[must_use]
    pub const fn property_type(&self) -> PropertyType {
        match self {
            Self::Empty => PropertyType::Empty,
            Self::UInt8(_) => PropertyType::UInt8,
            Self::Int16(_) => PropertyType::Int16,
            Self::UInt16(_) => PropertyType::UInt16,
            Self::Int32(_) => PropertyType::Int32,
            Self::UInt32(_) => PropertyType::UInt32,
            Self::Int64(_) => PropertyType::Int64,
            Self::UInt64(_) => PropertyType::UInt64,
            Self::Single(_) => PropertyType::Single,
            Self::Double(_) => PropertyType::Double,
            Self::Char16(_) => PropertyType::Char16,
            Self::Boolean(_) => PropertyType::Boolean,
            Self::String(_) => PropertyType::String,
            Self::DateTime(_) => PropertyType::DateTime,
            Self::TimeSpan(_) => PropertyType::TimeSpan,
            Self::Guid(_) => PropertyType::Guid,
            Self::Point(_) => PropertyType::Point,
            Self::Size(_) => PropertyType::Size,
            Self::Rect(_) => PropertyType::Rect,
            Self::UInt8Array(_) => PropertyType::UInt8Array,
            Self::Int16Array(_) => PropertyType::Int16Array,
            Self::UInt16Array(_) => PropertyType::UInt16Array,
            Self::Int32Array(_) => PropertyType::Int32Array,
            Self::UInt32Array(_) => PropertyType::UInt32Array,
            Self::Int64Array(_) => PropertyType::Int64Array,
            Self::UInt64Array(_) => PropertyType::UInt64Array,
            Self::SingleArray(_) => PropertyType::SingleArray,
            Self::DoubleArray(_) => PropertyType::DoubleArray,
            Self::Char16Array(_) => PropertyType::Char16Array,
            Self::BooleanArray(_) => PropertyType::BooleanArray,
            Self::StringArray(_) => PropertyType::StringArray,
            Self::DateTimeArray(_) => PropertyType::DateTimeArray,
            Self::TimeSpanArray(_) => PropertyType::TimeSpanArray,
            Self::GuidArray(_) => PropertyType::GuidArray,
            Self::PointArray(_) => PropertyType::PointArray,
            Self::SizeArray(_) => PropertyType::SizeArray,
            Self::RectArray(_) => PropertyType::RectArray,
        }
    }

    /// A value carrying no payload.
    #[inline]
    #[must_use]
    pub const fn create_empty() -> Self {
        Self::Empty
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Whether the tag is an integer or floating-point scalar.
    #[inline]
    #[must_use]
    pub const fn is_numeric_scalar(&self) -> bool {
        self.property_type().is_numeric()
    }

    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        self.property_type().is_array()
    }

    /// Element count for array values, `None` for scalars.
    #[must_use]
    pub fn array_len(&self) -> Option<usize> {
        let len = match self {
            Self::UInt8Array(a) => a.len(),
            Self::Int16Array(a) => a.len(),
            Self::UInt16Array(a) | Self::Char16Array(a) => a.len(),
            Self::Int32Array(a) => a.len(),
            Self::UInt32Array(a) => a.len(),
            Self::Int64Array(a) => a.len(),
            Self::UInt64Array(a) => a.len(),
            Self::SingleArray(a) => a.len(),
            Self::DoubleArray(a) => a.len(),
            Self::BooleanArray(a) => a.len(),
            Self::StringArray(a) => a.len(),
            Self::DateTimeArray(a) => a.len(),
            Self::TimeSpanArray(a) => a.len(),
            Self::GuidArray(a) => a.len(),
            Self::PointArray(a) => a.len(),
            Self::SizeArray(a) => a.len(),
            Self::RectArray(a) => a.len(),
            _ => return None,
        };
        Some(len)
    }

    /// Narrow a wide integer to the integer (or float) tag `target`.
    ///
    /// Float targets accept any integer, rounding to the nearest
    /// representable value. Non-numeric targets return
    /// [`RtError::TypeMismatch`] with `actual` set to [`PropertyType::Int64`].
    pub fn create_integer(target: PropertyType, value: i128) -> RtResult<Self> {
        let narrowed = match target {
            PropertyType::UInt8 => u8::try_from(value).map(Self::UInt8),
            PropertyType::Int16 => i16::try_from(value).map(Self::Int16),
            PropertyType::UInt16 => u16::try_from(value).map(Self::UInt16),
            PropertyType::Int32 => i32::try_from(value).map(Self::Int32),
            PropertyType::UInt32 => u32::try_from(value).map(Self::UInt32),
            PropertyType::Int64 => i64::try_from(value).map(Self::Int64),
            PropertyType::UInt64 => u64::try_from(value).map(Self::UInt64),
            PropertyType::Single | PropertyType::Double => {
                return Self::create_float(target, value as f64);
            }
            _ => {
                return Err(RtError::TypeMismatch {
                    expected: target,
                    actual: PropertyType::Int64,
                });
            }
        };
        narrowed.map_err(|_| {
            tracing::debug!(ty = %target, %value, "integer outside native range");
            RtError::range(target, value)
        })
    }

    /// Narrow a double to the float tag `target`.
    ///
    /// Finite inputs beyond `f32::MAX` are rejected for [`PropertyType::Single`];
    /// NaN and infinities pass through unchanged. Non-float targets return
    /// [`RtError::TypeMismatch`] with `actual` set to [`PropertyType::Double`].
    pub fn create_float(target: PropertyType, value: f64) -> RtResult<Self> {
        match target {
            PropertyType::Double => Ok(Self::Double(value)),
            PropertyType::Single => {
                if value.is_finite() && value.abs() > f64::from(f32::MAX) {
                    tracing::debug!(ty = %target, %value, "float outside native range");
                    Err(RtError::range(target, value))
                } else {
                    Ok(Self::Single(value as f32))
                }
            }
            _ => Err(RtError::TypeMismatch {
                expected: target,
                actual: PropertyType::Double,
            }),
        }
    }

    fn mismatch(&self, expected: PropertyType) -> RtError {
        RtError::TypeMismatch {
            expected,
            actual: self.property_type(),
        }
    }
}

/// Factories and copying accessors for plain-data payloads.
macro_rules! copy_accessors {
    ($($variant:ident($ty:ty) => $create:ident, $get:ident;)*) => {
        impl PropertyValue {
            $(
                #[doc = concat!("Box a value tagged `", stringify!($variant), "`.")]
                #[inline]
                #[must_use]
                pub const fn $create(value: $ty) -> Self {
                    Self::$variant(value)
                }

                #[doc = concat!("Unbox a `", stringify!($variant), "` payload.")]
                pub fn $get(&self) -> RtResult<$ty> {
                    match self {
                        Self::$variant(v) => Ok(*v),
                        other => Err(other.mismatch(PropertyType::$variant)),
                    }
                }
            )*
        }
    };
}

/// Factories, cloning accessors and borrowing views for heap payloads.
macro_rules! owned_accessors {
    ($($variant:ident($ty:ty, $borrowed:ty) => $create:ident, $get:ident, $view:ident;)*) => {
        impl PropertyValue {
            $(
                #[doc = concat!("Box a value tagged `", stringify!($variant), "`.")]
                #[must_use]
                pub fn $create(value: impl Into<$ty>) -> Self {
                    Self::$variant(value.into())
                }

                #[doc = concat!("Unbox a copy of a `", stringify!($variant), "` payload.")]
                pub fn $get(&self) -> RtResult<$ty> {
                    self.$view().map(Into::into)
                }

                #[doc = concat!("Borrow a `", stringify!($variant), "` payload without copying.")]
                pub fn $view(&self) -> RtResult<&$borrowed> {
                    match self {
                        Self::$variant(v) => Ok(&**v),
                        other => Err(other.mismatch(PropertyType::$variant)),
                    }
                }
            )*
        }
    };
}

copy_accessors! {
    UInt8(u8) => create_uint8, get_uint8;
    Int16(i16) => create_int16, get_int16;
    UInt16(u16) => create_uint16, get_uint16;
    Int32(i32) => create_int32, get_int32;
    UInt32(u32) => create_uint32, get_uint32;
    Int64(i64) => create_int64, get_int64;
    UInt64(u64) => create_uint64, get_uint64;
    Single(f32) => create_single, get_single;
    Double(f64) => create_double, get_double;
    Char16(u16) => create_char16, get_char16;
    Boolean(bool) => create_boolean, get_boolean;
    DateTime(DateTime) => create_date_time, get_date_time;
    TimeSpan(TimeSpan) => create_time_span, get_time_span;
    Guid(Guid) => create_guid, get_guid;
    Point(Point) => create_point, get_point;
    Size(Size) => create_size, get_size;
    Rect(Rect) => create_rect, get_rect;
}

owned_accessors! {
    String(String, str) => create_string, get_string, as_string;
    UInt8Array(Vec<u8>, [u8]) => create_uint8_array, get_uint8_array, as_uint8_array;
    Int16Array(Vec<i16>, [i16]) => create_int16_array, get_int16_array, as_int16_array;
    UInt16Array(Vec<u16>, [u16]) => create_uint16_array, get_uint16_array, as_uint16_array;
    Int32Array(Vec<i32>, [i32]) => create_int32_array, get_int32_array, as_int32_array;
    UInt32Array(Vec<u32>, [u32]) => create_uint32_array, get_uint32_array, as_uint32_array;
    Int64Array(Vec<i64>, [i64]) => create_int64_array, get_int64_array, as_int64_array;
    UInt64Array(Vec<u64>, [u64]) => create_uint64_array, get_uint64_array, as_uint64_array;
    SingleArray(Vec<f32>, [f32]) => create_single_array, get_single_array, as_single_array;
    DoubleArray(Vec<f64>, [f64]) => create_double_array, get_double_array, as_double_array;
    Char16Array(Vec<u16>, [u16]) => create_char16_array, get_char16_array, as_char16_array;
    BooleanArray(Vec<bool>, [bool]) => create_boolean_array, get_boolean_array, as_boolean_array;
    StringArray(Vec<String>, [String]) => create_string_array, get_string_array, as_string_array;
    DateTimeArray(Vec<DateTime>, [DateTime]) => create_date_time_array, get_date_time_array, as_date_time_array;
    TimeSpanArray(Vec<TimeSpan>, [TimeSpan]) => create_time_span_array, get_time_span_array, as_time_span_array;
    GuidArray(Vec<Guid>, [Guid]) => create_guid_array, get_guid_array, as_guid_array;
    PointArray(Vec<Point>, [Point]) => create_point_array, get_point_array, as_point_array;
    SizeArray(Vec<Size>, [Size]) => create_size_array, get_size_array, as_size_array;
    RectArray(Vec<Rect>, [Rect]) => create_rect_array, get_rect_array, as_rect_array;
}

/// `From` conversions. `u16` and `Vec<u16>` map to the integer tags; use
/// [`PropertyValue::create_char16`] for UTF-16 code units.
macro_rules! from_payload {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for PropertyValue {
                fn from(value: $ty) -> Self {
                    Self::$variant(value.into())
                }
            }
        )*
    };
}

from_payload! {
    u8 => UInt8,
    i16 => Int16,
    u16 => UInt16,
    i32 => Int32,
    u32 => UInt32,
    i64 => Int64,
    u64 => UInt64,
    f32 => Single,
    f64 => Double,
    bool => Boolean,
    String => String,
    &str => String,
    DateTime => DateTime,
    TimeSpan => TimeSpan,
    Guid => Guid,
    Point => Point,
    Size => Size,
    Rect => Rect,
    Vec<u8> => UInt8Array,
    &[u8] => UInt8Array,
    Vec<i16> => Int16Array,
    Vec<u16> => UInt16Array,
    Vec<i32> => Int32Array,
    Vec<u32> => UInt32Array,
    Vec<i64> => Int64Array,
    Vec<u64> => UInt64Array,
    Vec<f32> => SingleArray,
    Vec<f64> => DoubleArray,
    Vec<bool> => BooleanArray,
    Vec<String> => StringArray,
    Vec<DateTime> => DateTimeArray,
    Vec<TimeSpan> => TimeSpanArray,
    Vec<Guid> => GuidArray,
    Vec<Point> => PointArray,
    Vec<Size> => SizeArray,
    Vec<Rect> => RectArray,
}
