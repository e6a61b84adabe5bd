//! Conversions between Rust types and the store's native representation.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use prefs_store::NativeValue;
use serde_bytes::ByteBuf;

/// A type the store can hold without serialization.
///
/// Implemented for primitives, strings, byte buffers, dates and collections of native types.
/// `Option<T>` is native whenever `T` is; its `None` is the "no value" instance which removes the
/// entry instead of being stored.
pub trait NativeType: Sized {
    /// Name of the expected kind of value, used in diagnostics.
    const TYPE_NAME: &'static str;

    /// Convert into the native representation.
    ///
    /// Returns `None` only for a "no value" instance, which the store can't hold.
    fn into_native(self) -> Option<NativeValue>;

    /// Interpret a native value as this type.
    ///
    /// Returns `None` when the value has a different shape.
    fn from_native(value: NativeValue) -> Option<Self>;
}

impl NativeType for NativeValue {
    const TYPE_NAME: &'static str = "any";

    fn into_native(self) -> Option<NativeValue> {
        Some(self)
    }

    fn from_native(value: NativeValue) -> Option<Self> {
        Some(value)
    }
}

impl NativeType for bool {
    const TYPE_NAME: &'static str = "bool";

    fn into_native(self) -> Option<NativeValue> {
        Some(NativeValue::Bool(self))
    }

    fn from_native(value: NativeValue) -> Option<Self> {
        match value {
            NativeValue::Bool(b) => Some(b),
            _ => None,
        }
    }
}

macro_rules! impl_native_integer {
    ($($ty:ty),*) => {
        $(
            impl NativeType for $ty {
                const TYPE_NAME: &'static str = "integer";

                fn into_native(self) -> Option<NativeValue> {
                    Some(NativeValue::Integer(i64::from(self)))
                }

                fn from_native(value: NativeValue) -> Option<Self> {
                    match value {
                        NativeValue::Integer(i) => <$ty>::try_from(i).ok(),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_native_integer!(i8, i16, i32, i64, u8, u16, u32);

// Stored integers are only read as floats when the float holds them exactly.
impl NativeType for f64 {
    const TYPE_NAME: &'static str = "float";

    fn into_native(self) -> Option<NativeValue> {
        Some(NativeValue::Float(self))
    }

    fn from_native(value: NativeValue) -> Option<Self> {
        match value {
            NativeValue::Float(f) => Some(f),
            NativeValue::Integer(i) => {
                let f = i as f64;
                (f as i128 == i128::from(i)).then_some(f)
            }
            _ => None,
        }
    }
}

impl NativeType for f32 {
    const TYPE_NAME: &'static str = "float";

    fn into_native(self) -> Option<NativeValue> {
        Some(NativeValue::Float(f64::from(self)))
    }

    fn from_native(value: NativeValue) -> Option<Self> {
        match value {
            // Finite values beyond the f32 range don't fit.
            NativeValue::Float(f) => {
                let narrowed = f as f32;
                (narrowed.is_finite() || !f.is_finite()).then_some(narrowed)
            }
            NativeValue::Integer(i) => {
                let f = i as f32;
                (f as i128 == i128::from(i)).then_some(f)
            }
            _ => None,
        }
    }
}

impl NativeType for String {
    const TYPE_NAME: &'static str = "string";

    fn into_native(self) -> Option<NativeValue> {
        Some(NativeValue::String(self))
    }

    fn from_native(value: NativeValue) -> Option<Self> {
        match value {
            NativeValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl NativeType for ByteBuf {
    const TYPE_NAME: &'static str = "data";

    fn into_native(self) -> Option<NativeValue> {
        Some(NativeValue::Data(self.into_vec()))
    }

    fn from_native(value: NativeValue) -> Option<Self> {
        value.into_data().map(ByteBuf::from)
    }
}

impl NativeType for DateTime<Utc> {
    const TYPE_NAME: &'static str = "date";

    fn into_native(self) -> Option<NativeValue> {
        Some(NativeValue::Date(self))
    }

    fn from_native(value: NativeValue) -> Option<Self> {
        match value {
            NativeValue::Date(d) => Some(d),
            _ => None,
        }
    }
}

// Collections can't hold "no value" elements, so `None` elements are dropped on write.
impl<T: NativeType> NativeType for Vec<T> {
    const TYPE_NAME: &'static str = "array";

    fn into_native(self) -> Option<NativeValue> {
        Some(NativeValue::Array(
            self.into_iter().filter_map(T::into_native).collect(),
        ))
    }

    fn from_native(value: NativeValue) -> Option<Self> {
        match value {
            NativeValue::Array(items) => items.into_iter().map(T::from_native).collect(),
            _ => None,
        }
    }
}

impl<T: NativeType> NativeType for BTreeMap<String, T> {
    const TYPE_NAME: &'static str = "dictionary";

    fn into_native(self) -> Option<NativeValue> {
        Some(NativeValue::Dictionary(
            self.into_iter()
                .filter_map(|(k, v)| Some((k, v.into_native()?)))
                .collect(),
        ))
    }

    fn from_native(value: NativeValue) -> Option<Self> {
        match value {
            NativeValue::Dictionary(entries) => entries
                .into_iter()
                .map(|(k, v)| Some((k, T::from_native(v)?)))
                .collect(),
            _ => None,
        }
    }
}

impl<T: NativeType> NativeType for HashMap<String, T> {
    const TYPE_NAME: &'static str = "dictionary";

    fn into_native(self) -> Option<NativeValue> {
        Some(NativeValue::Dictionary(
            self.into_iter()
                .filter_map(|(k, v)| Some((k, v.into_native()?)))
                .collect(),
        ))
    }

    fn from_native(value: NativeValue) -> Option<Self> {
        match value {
            NativeValue::Dictionary(entries) => entries
                .into_iter()
                .map(|(k, v)| Some((k, T::from_native(v)?)))
                .collect(),
            _ => None,
        }
    }
}

impl<T: NativeType> NativeType for Option<T> {
    const TYPE_NAME: &'static str = T::TYPE_NAME;

    fn into_native(self) -> Option<NativeValue> {
        self.and_then(T::into_native)
    }

    fn from_native(value: NativeValue) -> Option<Self> {
        T::from_native(value).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn integers_narrow_with_checks() {
        assert_eq!(u8::from_native(NativeValue::Integer(255)), Some(255));
        assert_eq!(u8::from_native(NativeValue::Integer(256)), None);
        assert_eq!(u32::from_native(NativeValue::Integer(-1)), None);
        assert_eq!(i64::from_native(NativeValue::Float(1.0)), None);
        assert_eq!(42_i32.into_native(), Some(NativeValue::Integer(42)));
    }

    #[test]
    fn floats_accept_integers() {
        assert_eq!(f64::from_native(NativeValue::Integer(3)), Some(3.0));
        assert_eq!(f32::from_native(NativeValue::Float(0.5)), Some(0.5));
        assert_eq!(f64::from_native(NativeValue::Bool(true)), None);
    }

    #[test]
    fn f32_rejects_out_of_range_floats() {
        assert_eq!(f32::from_native(NativeValue::Float(1e300)), None);
        assert_eq!(f32::from_native(NativeValue::Float(-1e300)), None);
        assert_eq!(
            f32::from_native(NativeValue::Float(f64::INFINITY)),
            Some(f32::INFINITY)
        );
        assert_eq!(
            f32::from_native(NativeValue::Float(f64::from(f32::MAX))),
            Some(f32::MAX)
        );
    }

    #[test]
    fn floats_reject_integers_they_cannot_hold_exactly() {
        assert_eq!(f64::from_native(NativeValue::Integer(i64::MAX)), None);
        assert_eq!(
            f64::from_native(NativeValue::Integer(1 << 53)),
            Some(9_007_199_254_740_992.0)
        );
        assert_eq!(f64::from_native(NativeValue::Integer((1 << 53) + 1)), None);
        assert_eq!(f32::from_native(NativeValue::Integer((1 << 24) + 1)), None);
        assert_eq!(f32::from_native(NativeValue::Integer(-7)), Some(-7.0));
    }

    #[test]
    fn bool_is_strict() {
        assert_eq!(bool::from_native(NativeValue::Bool(false)), Some(false));
        assert_eq!(bool::from_native(NativeValue::Integer(1)), None);
    }

    #[test]
    fn none_is_the_no_value_instance() {
        assert_eq!(None::<String>.into_native(), None);
        assert_eq!(
            Some("x".to_string()).into_native(),
            Some(NativeValue::String("x".to_string()))
        );
        assert_eq!(
            Option::<String>::from_native(NativeValue::String("x".to_string())),
            Some(Some("x".to_string()))
        );
        assert_eq!(Option::<String>::from_native(NativeValue::Integer(1)), None);
    }

    #[test]
    fn collections_require_every_element_to_convert() {
        let mixed = NativeValue::Array(vec![
            NativeValue::Integer(1),
            NativeValue::String("two".to_string()),
        ]);
        assert_eq!(Vec::<i64>::from_native(mixed), None);

        let ints = NativeValue::Array(vec![NativeValue::Integer(1), NativeValue::Integer(2)]);
        assert_eq!(Vec::<i64>::from_native(ints), Some(vec![1, 2]));
    }

    #[test]
    fn none_elements_are_dropped() {
        assert_eq!(
            vec![Some(1_i64), None, Some(3)].into_native(),
            Some(NativeValue::Array(vec![
                NativeValue::Integer(1),
                NativeValue::Integer(3)
            ]))
        );
    }

    #[test]
    fn dictionaries_and_dates() {
        let at = Utc.with_ymd_and_hms(2020, 6, 18, 0, 0, 0).unwrap();
        let mut map = HashMap::new();
        map.insert("last_seen".to_string(), at);

        let native = map.clone().into_native().expect("native");
        assert_eq!(HashMap::<String, DateTime<Utc>>::from_native(native), Some(map));
    }

    #[test]
    fn byte_buffers_are_data() {
        let buf = ByteBuf::from(vec![1, 2, 3]);
        assert_eq!(
            buf.clone().into_native(),
            Some(NativeValue::Data(vec![1, 2, 3]))
        );
        assert_eq!(ByteBuf::from_native(NativeValue::Data(vec![1, 2, 3])), Some(buf));
    }
}
