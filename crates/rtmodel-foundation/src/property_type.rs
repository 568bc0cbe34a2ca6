#![forbid(unsafe_code)]

//! Runtime type tags for boxed property values.
//!
//! Discriminants follow the WinRT `PropertyType` numbering: scalars occupy
//! `0..=20` and every array tag is `1024 + scalar`. `Inspectable` and
//! `OtherType` (and their arrays) are named for completeness but are never
//! produced by a [`PropertyValue`](crate::PropertyValue).

use std::fmt;

/// Offset added to a scalar tag to form its array tag.
pub const ARRAY_OFFSET: u32 = 1024;

/// Type tag carried by every [`PropertyValue`](crate::PropertyValue).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u32)]
pub enum PropertyType {
    Empty = 0,
    UInt8 = 1,
    Int16 = 2,
    UInt16 = 3,
    Int32 = 4,
    UInt32 = 5,
    Int64 = 6,
    UInt64 = 7,
    Single = 8,
    Double = 9,
    Char16 = 10,
    Boolean = 11,
    String = 12,
    Inspectable = 13,
    DateTime = 14,
    TimeSpan = 15,
    Guid = 16,
    Point = 17,
    Size = 18,
    Rect = 19,
    OtherType = 20,
    UInt8Array = 1025,
    Int16Array = 1026,
    UInt16Array = 1027,
    Int32Array = 1028,
    UInt32Array = 1029,
    Int64Array = 1030,
    UInt64Array = 1031,
    SingleArray = 1032,
    DoubleArray = 1033,
    Char16Array = 1034,
    BooleanArray = 1035,
    StringArray = 1036,
    InspectableArray = 1037,
    DateTimeArray = 1038,
    TimeSpanArray = 1039,
    GuidArray = 1040,
    PointArray = 1041,
    SizeArray = 1042,
    RectArray = 1043,
    OtherTypeArray = 1044,
}

impl PropertyType {
    /// Every tag, scalars first, in discriminant order.
    pub const ALL: [Self; 41] = [
        Self::Empty,
        Self::UInt8,
        Self::Int16,
        Self::UInt16,
        Self::Int32,
        Self::UInt32,
        Self::Int64,
        Self::UInt64,
        Self::Single,
        Self::Double,
        Self::Char16,
        Self::Boolean,
        Self::String,
        Self::Inspectable,
        Self::DateTime,
        Self::TimeSpan,
        Self::Guid,
        Self::Point,
        Self::Size,
        Self::Rect,
        Self::OtherType,
        Self::UInt8Array,
        Self::Int16Array,
        Self::UInt16Array,
        Self::Int32Array,
        Self::UInt32Array,
        Self::Int64Array,
        Self::UInt64Array,
        Self::SingleArray,
        Self::DoubleArray,
        Self::Char16Array,
        Self::BooleanArray,
        Self::StringArray,
        Self::InspectableArray,
        Self::DateTimeArray,
        Self::TimeSpanArray,
        Self::GuidArray,
        Self::PointArray,
        Self::SizeArray,
        Self::RectArray,
        Self::OtherTypeArray,
    ];

    /// Numeric discriminant as exposed to the projection layer.
    #[inline]
    #[must_use]
    pub const fn code(self) -> u32 {
        self as u32
    }

    /// Look a tag up by its numeric discriminant.
    #[must_use]
    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.code() == code)
    }

    /// Whether this is one of the `*Array` tags.
    #[inline]
    #[must_use]
    pub const fn is_array(self) -> bool {
        self.code() > ARRAY_OFFSET
    }

    /// Element tag of an array tag, or `None` for scalars.
    #[must_use]
    pub fn element_type(self) -> Option<Self> {
        if self.is_array() {
            Self::from_code(self.code() - ARRAY_OFFSET)
        } else {
            None
        }
    }

    /// Array tag whose elements carry this tag, or `None` for `Empty` and
    /// tags that are already arrays.
    #[must_use]
    pub fn array_type(self) -> Option<Self> {
        if self.is_array() || self == Self::Empty {
            None
        } else {
            Self::from_code(self.code() + ARRAY_OFFSET)
        }
    }

    /// Integer scalar tags (`UInt8` through `UInt64`).
    #[inline]
    #[must_use]
    pub const fn is_integer(self) -> bool {
        matches!(
            self,
            Self::UInt8
                | Self::Int16
                | Self::UInt16
                | Self::Int32
                | Self::UInt32
                | Self::Int64
                | Self::UInt64
        )
    }

    /// Floating-point scalar tags.
    #[inline]
    #[must_use]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::Single | Self::Double)
    }

    /// Numeric scalar tags: integers and floats.
    #[inline]
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        self.is_integer() || self.is_float()
    }

    /// Upper-snake name, matching the projection's enum spelling
    /// (`UINT8`, `DATE_TIME`, `UINT8_ARRAY`, ...).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Empty => "EMPTY",
            Self::UInt8 => "UINT8",
            Self::Int16 => "INT16",
            Self::UInt16 => "UINT16",
            Self::Int32 => "INT32",
            Self::UInt32 => "UINT32",
            Self::Int64 => "INT64",
            Self::UInt64 => "UINT64",
            Self::Single => "SINGLE",
            Self::Double => "DOUBLE",
            Self::Char16 => "CHAR16",
            Self::Boolean => "BOOLEAN",
            Self::String => "STRING",
            Self::Inspectable => "INSPECTABLE",
            Self::DateTime => "DATE_TIME",
            Self::TimeSpan => "TIME_SPAN",
            Self::Guid => "GUID",
            Self::Point => "POINT",
            Self::Size => "SIZE",
            Self::Rect => "RECT",
            Self::OtherType => "OTHER_TYPE",
            Self::UInt8Array => "UINT8_ARRAY",
            Self::Int16Array => "INT16_ARRAY",
            Self::UInt16Array => "UINT16_ARRAY",
            Self::Int32Array => "INT32_ARRAY",
            Self::UInt32Array => "UINT32_ARRAY",
            Self::Int64Array => "INT64_ARRAY",
            Self::UInt64Array => "UINT64_ARRAY",
            Self::SingleArray => "SINGLE_ARRAY",
            Self::DoubleArray => "DOUBLE_ARRAY",
            Self::Char16Array => "CHAR16_ARRAY",
            Self::BooleanArray => "BOOLEAN_ARRAY",
            Self::StringArray => "STRING_ARRAY",
            Self::InspectableArray => "INSPECTABLE_ARRAY",
            Self::DateTimeArray => "DATE_TIME_ARRAY",
            Self::TimeSpanArray => "TIME_SPAN_ARRAY",
            Self::GuidArray => "GUID_ARRAY",
            Self::PointArray => "POINT_ARRAY",
            Self::SizeArray => "SIZE_ARRAY",
            Self::RectArray => "RECT_ARRAY",
            Self::OtherTypeArray => "OTHER_TYPE_ARRAY",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for ty in PropertyType::ALL {
            assert_eq!(PropertyType::from_code(ty.code()), Some(ty));
        }
        assert_eq!(PropertyType::from_code(21), None);
        assert_eq!(PropertyType::from_code(1024), None);
    }

    #[test]
    fn array_pairing() {
        assert_eq!(
            PropertyType::UInt8.array_type(),
            Some(PropertyType::UInt8Array)
        );
        assert_eq!(
            PropertyType::RectArray.element_type(),
            Some(PropertyType::Rect)
        );
        assert_eq!(PropertyType::Empty.array_type(), None);
        assert_eq!(PropertyType::UInt8Array.array_type(), None);
        assert_eq!(PropertyType::String.element_type(), None);
    }

    #[test]
    fn numeric_classes() {
        assert!(PropertyType::UInt64.is_integer());
        assert!(!PropertyType::UInt64.is_float());
        assert!(PropertyType::Single.is_numeric());
        assert!(!PropertyType::Char16.is_numeric());
        assert!(!PropertyType::Int32Array.is_numeric());
    }

    #[test]
    fn display_uses_projection_names() {
        assert_eq!(PropertyType::DateTime.to_string(), "DATE_TIME");
        assert_eq!(PropertyType::UInt8Array.to_string(), "UINT8_ARRAY");
        assert_eq!(PropertyType::UInt8.code(), 1);
    }
}
