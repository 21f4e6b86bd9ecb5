//! A serde [`Serializer`] that builds a [`Value`] directly.
//!
//! Mapping rules:
//!
//! | Rust / serde data model          | `Value`                          |
//! |----------------------------------|----------------------------------|
//! | `i8`..`i64`, fitting `i128`      | `Scalar(Signed)`                 |
//! | `u8`..`u64`, fitting `u128`      | `Scalar(Unsigned)`               |
//! | `f32`, `f64`                     | `Scalar(Float)`                  |
//! | `bool`, `str`, `char`            | `Scalar(Bool)` / `Scalar(String)`|
//! | `None`, `()`, unit struct        | `Null`                           |
//! | `Some(x)`, newtype struct        | normalized `x`                   |
//! | seq, tuple, tuple struct, bytes  | `List`                           |
//! | map, struct                      | `Map`                            |
//! | unit variant                     | `Scalar(String)` variant name    |
//! | newtype/tuple/struct variant     | `Map { variant: payload }`       |

use std::collections::BTreeMap;

use serde::ser::{self, Impossible, Serialize, Serializer};

use differ_types::{ScalarValue, Value};

use crate::error::{NormalizeError, NormalizeResult};

/// Normalize any serializable value into a [`Value`].
///
/// Fails with [`NormalizeError::UnsupportedType`] when the input holds data
/// the value model cannot represent (non-scalar map keys, 128-bit integers
/// outside the 64-bit range).
pub fn to_value<T>(value: &T) -> NormalizeResult<Value>
where
    T: Serialize + ?Sized,
{
    value.serialize(ValueSerializer)
}

/// Parse a JSON document and normalize it.
pub fn from_json_str(json: &str) -> NormalizeResult<Value> {
    let parsed: serde_json::Value = serde_json::from_str(json)?;
    Ok(Value::from(parsed))
}

/// Serializer whose output is a [`Value`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ValueSerializer;

macro_rules! serialize_signed {
    ($($method:ident: $t:ty),*) => {$(
        fn $method(self, v: $t) -> NormalizeResult<Value> {
            Ok(Value::Scalar(ScalarValue::Signed(i64::from(v))))
        }
    )*};
}

macro_rules! serialize_unsigned {
    ($($method:ident: $t:ty),*) => {$(
        fn $method(self, v: $t) -> NormalizeResult<Value> {
            Ok(Value::Scalar(ScalarValue::Unsigned(u64::from(v))))
        }
    )*};
}

impl Serializer for ValueSerializer {
    type Ok = Value;
    type Error = NormalizeError;

    type SerializeSeq = SeqSerializer;
    type SerializeTuple = SeqSerializer;
    type SerializeTupleStruct = SeqSerializer;
    type SerializeTupleVariant = TupleVariantSerializer;
    type SerializeMap = MapSerializer;
    type SerializeStruct = MapSerializer;
    type SerializeStructVariant = StructVariantSerializer;

    fn serialize_bool(self, v: bool) -> NormalizeResult<Value> {
        Ok(Value::Scalar(ScalarValue::Bool(v)))
    }

    serialize_signed!(serialize_i8: i8, serialize_i16: i16, serialize_i32: i32, serialize_i64: i64);
    serialize_unsigned!(serialize_u8: u8, serialize_u16: u16, serialize_u32: u32, serialize_u64: u64);

    fn serialize_i128(self, v: i128) -> NormalizeResult<Value> {
        i64::try_from(v)
            .map(|n| Value::Scalar(ScalarValue::Signed(n)))
            .map_err(|_| NormalizeError::unsupported(format!("i128 value {v} exceeds 64 bits")))
    }

    fn serialize_u128(self, v: u128) -> NormalizeResult<Value> {
        u64::try_from(v)
            .map(|n| Value::Scalar(ScalarValue::Unsigned(n)))
            .map_err(|_| NormalizeError::unsupported(format!("u128 value {v} exceeds 64 bits")))
    }

    fn serialize_f32(self, v: f32) -> NormalizeResult<Value> {
        Ok(Value::Scalar(ScalarValue::Float(f64::from(v))))
    }

    fn serialize_f64(self, v: f64) -> NormalizeResult<Value> {
        Ok(Value::Scalar(ScalarValue::Float(v)))
    }

    fn serialize_char(self, v: char) -> NormalizeResult<Value> {
        Ok(Value::Scalar(ScalarValue::String(v.to_string())))
    }

    fn serialize_str(self, v: &str) -> NormalizeResult<Value> {
        Ok(Value::Scalar(ScalarValue::String(v.to_owned())))
    }

    fn serialize_bytes(self, v: &[u8]) -> NormalizeResult<Value> {
        Ok(Value::List(v.iter().copied().map(Value::from).collect()))
    }

    fn serialize_none(self) -> NormalizeResult<Value> {
        Ok(Value::Null)
    }

    fn serialize_some<T>(self, value: &T) -> NormalizeResult<Value>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> NormalizeResult<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> NormalizeResult<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> NormalizeResult<Value> {
        Ok(Value::Scalar(ScalarValue::String(variant.to_owned())))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> NormalizeResult<Value>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> NormalizeResult<Value>
    where
        T: Serialize + ?Sized,
    {
        let mut entries = BTreeMap::new();
        entries.insert(variant.to_owned(), value.serialize(self)?);
        Ok(Value::Map(entries))
    }

    fn serialize_seq(self, len: Option<usize>) -> NormalizeResult<SeqSerializer> {
        Ok(SeqSerializer {
            items: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> NormalizeResult<SeqSerializer> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> NormalizeResult<SeqSerializer> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> NormalizeResult<TupleVariantSerializer> {
        Ok(TupleVariantSerializer {
            variant,
            items: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, _len: Option<usize>) -> NormalizeResult<MapSerializer> {
        Ok(MapSerializer {
            entries: BTreeMap::new(),
            next_key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> NormalizeResult<MapSerializer> {
        self.serialize_map(Some(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> NormalizeResult<StructVariantSerializer> {
        Ok(StructVariantSerializer {
            variant,
            entries: BTreeMap::new(),
        })
    }
}

/// Collects sequence, tuple and tuple-struct elements.
#[derive(Debug)]
pub struct SeqSerializer {
    items: Vec<Value>,
}

impl ser::SerializeSeq for SeqSerializer {
    type Ok = Value;
    type Error = NormalizeError;

    fn serialize_element<T>(&mut self, value: &T) -> NormalizeResult<()>
    where
        T: Serialize + ?Sized,
    {
        self.items.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> NormalizeResult<Value> {
        Ok(Value::List(self.items))
    }
}

impl ser::SerializeTuple for SeqSerializer {
    type Ok = Value;
    type Error = NormalizeError;

    fn serialize_element<T>(&mut self, value: &T) -> NormalizeResult<()>
    where
        T: Serialize + ?Sized,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> NormalizeResult<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SeqSerializer {
    type Ok = Value;
    type Error = NormalizeError;

    fn serialize_field<T>(&mut self, value: &T) -> NormalizeResult<()>
    where
        T: Serialize + ?Sized,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> NormalizeResult<Value> {
        ser::SerializeSeq::end(self)
    }
}

/// Collects the fields of a tuple variant into `{variant: [..]}`.
#[derive(Debug)]
pub struct TupleVariantSerializer {
    variant: &'static str,
    items: Vec<Value>,
}

impl ser::SerializeTupleVariant for TupleVariantSerializer {
    type Ok = Value;
    type Error = NormalizeError;

    fn serialize_field<T>(&mut self, value: &T) -> NormalizeResult<()>
    where
        T: Serialize + ?Sized,
    {
        self.items.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> NormalizeResult<Value> {
        let mut entries = BTreeMap::new();
        entries.insert(self.variant.to_owned(), Value::List(self.items));
        Ok(Value::Map(entries))
    }
}

/// Collects map entries and struct fields.
#[derive(Debug)]
pub struct MapSerializer {
    entries: BTreeMap<String, Value>,
    next_key: Option<String>,
}

impl ser::SerializeMap for MapSerializer {
    type Ok = Value;
    type Error = NormalizeError;

    fn serialize_key<T>(&mut self, key: &T) -> NormalizeResult<()>
    where
        T: Serialize + ?Sized,
    {
        self.next_key = Some(key.serialize(MapKeySerializer)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> NormalizeResult<()>
    where
        T: Serialize + ?Sized,
    {
        let key = self
            .next_key
            .take()
            .ok_or_else(|| NormalizeError::Custom("map value serialized before its key".into()))?;
        self.entries.insert(key, to_value(value)?);
        Ok(())
    }

    fn end(self) -> NormalizeResult<Value> {
        Ok(Value::Map(self.entries))
    }
}

impl ser::SerializeStruct for MapSerializer {
    type Ok = Value;
    type Error = NormalizeError;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> NormalizeResult<()>
    where
        T: Serialize + ?Sized,
    {
        self.entries.insert(key.to_owned(), to_value(value)?);
        Ok(())
    }

    fn end(self) -> NormalizeResult<Value> {
        Ok(Value::Map(self.entries))
    }
}

/// Collects the fields of a struct variant into `{variant: {..}}`.
#[derive(Debug)]
pub struct StructVariantSerializer {
    variant: &'static str,
    entries: BTreeMap<String, Value>,
}

impl ser::SerializeStructVariant for StructVariantSerializer {
    type Ok = Value;
    type Error = NormalizeError;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> NormalizeResult<()>
    where
        T: Serialize + ?Sized,
    {
        self.entries.insert(key.to_owned(), to_value(value)?);
        Ok(())
    }

    fn end(self) -> NormalizeResult<Value> {
        let mut outer = BTreeMap::new();
        outer.insert(self.variant.to_owned(), Value::Map(self.entries));
        Ok(Value::Map(outer))
    }
}

/// Serializes map keys to strings. Only scalar keys are representable.
struct MapKeySerializer;

fn unsupported_key<T>(what: &str) -> NormalizeResult<T> {
    Err(NormalizeError::unsupported(format!("{what} as map key")))
}

macro_rules! serialize_key_display {
    ($($method:ident: $t:ty),*) => {$(
        fn $method(self, v: $t) -> NormalizeResult<String> {
            Ok(v.to_string())
        }
    )*};
}

impl Serializer for MapKeySerializer {
    type Ok = String;
    type Error = NormalizeError;

    type SerializeSeq = Impossible<String, NormalizeError>;
    type SerializeTuple = Impossible<String, NormalizeError>;
    type SerializeTupleStruct = Impossible<String, NormalizeError>;
    type SerializeTupleVariant = Impossible<String, NormalizeError>;
    type SerializeMap = Impossible<String, NormalizeError>;
    type SerializeStruct = Impossible<String, NormalizeError>;
    type SerializeStructVariant = Impossible<String, NormalizeError>;

    serialize_key_display!(
        serialize_bool: bool,
        serialize_i8: i8,
        serialize_i16: i16,
        serialize_i32: i32,
        serialize_i64: i64,
        serialize_i128: i128,
        serialize_u8: u8,
        serialize_u16: u16,
        serialize_u32: u32,
        serialize_u64: u64,
        serialize_u128: u128,
        serialize_char: char
    );

    fn serialize_f32(self, _v: f32) -> NormalizeResult<String> {
        unsupported_key("float")
    }

    fn serialize_f64(self, _v: f64) -> NormalizeResult<String> {
        unsupported_key("float")
    }

    fn serialize_str(self, v: &str) -> NormalizeResult<String> {
        Ok(v.to_owned())
    }

    fn serialize_bytes(self, _v: &[u8]) -> NormalizeResult<String> {
        unsupported_key("bytes")
    }

    fn serialize_none(self) -> NormalizeResult<String> {
        unsupported_key("none")
    }

    fn serialize_some<T>(self, _value: &T) -> NormalizeResult<String>
    where
        T: Serialize + ?Sized,
    {
        unsupported_key("option")
    }

    fn serialize_unit(self) -> NormalizeResult<String> {
        unsupported_key("unit")
    }

    fn serialize_unit_struct(self, name: &'static str) -> NormalizeResult<String> {
        unsupported_key(name)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> NormalizeResult<String> {
        Ok(variant.to_owned())
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> NormalizeResult<String>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> NormalizeResult<String>
    where
        T: Serialize + ?Sized,
    {
        unsupported_key(name)
    }

    fn serialize_seq(self, _len: Option<usize>) -> NormalizeResult<Self::SerializeSeq> {
        unsupported_key("sequence")
    }

    fn serialize_tuple(self, _len: usize) -> NormalizeResult<Self::SerializeTuple> {
        unsupported_key("tuple")
    }

    fn serialize_tuple_struct(
        self,
        name: &'static str,
        _len: usize,
    ) -> NormalizeResult<Self::SerializeTupleStruct> {
        unsupported_key(name)
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> NormalizeResult<Self::SerializeTupleVariant> {
        unsupported_key(name)
    }

    fn serialize_map(self, _len: Option<usize>) -> NormalizeResult<Self::SerializeMap> {
        unsupported_key("map")
    }

    fn serialize_struct(self, name: &'static str, _len: usize) -> NormalizeResult<Self::SerializeStruct> {
        unsupported_key(name)
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> NormalizeResult<Self::SerializeStructVariant> {
        unsupported_key(name)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashMap};

    use serde::Serialize;

    use super::*;

    #[derive(Serialize)]
    struct Address {
        city: String,
        zip: Option<u32>,
    }

    #[derive(Serialize)]
    struct Person {
        name: String,
        age: u8,
        balance: i64,
        score: f32,
        tags: Vec<String>,
        address: Option<Box<Address>>,
    }

    #[derive(Serialize)]
    enum Shape {
        Empty,
        Circle(f64),
        Point(i32, i32),
        Rect { w: u16, h: u16 },
    }

    #[derive(Serialize)]
    struct Meters(i16);

    struct Failing;

    impl Serialize for Failing {
        fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(ser::Error::custom("refused"))
        }
    }

    fn map(pairs: &[(&str, Value)]) -> Value {
        Value::Map(pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect())
    }

    #[test]
    fn struct_collapses_to_map() {
        let p = Person {
            name: "Ada".into(),
            age: 36,
            balance: -12,
            score: 0.5,
            tags: vec!["math".into()],
            address: Some(Box::new(Address {
                city: "London".into(),
                zip: None,
            })),
        };

        let v = to_value(&p).unwrap();
        assert_eq!(
            v,
            map(&[
                ("name", Value::from("Ada")),
                ("age", ScalarValue::Unsigned(36).into()),
                ("balance", ScalarValue::Signed(-12).into()),
                ("score", ScalarValue::Float(0.5).into()),
                ("tags", Value::from(vec!["math"])),
                (
                    "address",
                    map(&[("city", Value::from("London")), ("zip", Value::Null)])
                ),
            ])
        );
    }

    #[test]
    fn none_pointer_is_null() {
        let addr: Option<Box<Address>> = None;
        assert_eq!(to_value(&addr).unwrap(), Value::Null);
    }

    #[test]
    fn signedness_survives_normalization() {
        assert_eq!(to_value(&5u32).unwrap(), ScalarValue::Unsigned(5).into());
        assert_eq!(to_value(&5i32).unwrap(), ScalarValue::Signed(5).into());
        assert_ne!(to_value(&5u32).unwrap(), to_value(&5i32).unwrap());
    }

    #[test]
    fn widths_collapse() {
        assert_eq!(to_value(&7i8).unwrap(), to_value(&7i64).unwrap());
        assert_eq!(to_value(&7u16).unwrap(), to_value(&7usize).unwrap());
        assert_eq!(to_value(&1.5f32).unwrap(), to_value(&1.5f64).unwrap());
    }

    #[test]
    fn tuples_and_arrays_become_lists() {
        let v = to_value(&(1u8, "two", [3i16, 4])).unwrap();
        assert_eq!(
            v,
            Value::List(vec![
                ScalarValue::Unsigned(1).into(),
                Value::from("two"),
                Value::from(vec![3i64, 4]),
            ])
        );
    }

    #[test]
    fn enum_variants_are_externally_tagged() {
        assert_eq!(to_value(&Shape::Empty).unwrap(), Value::from("Empty"));
        assert_eq!(
            to_value(&Shape::Circle(1.0)).unwrap(),
            map(&[("Circle", Value::from(1.0))])
        );
        assert_eq!(
            to_value(&Shape::Point(1, -1)).unwrap(),
            map(&[("Point", Value::from(vec![1i64, -1]))])
        );
        assert_eq!(
            to_value(&Shape::Rect { w: 2, h: 3 }).unwrap(),
            map(&[(
                "Rect",
                map(&[("w", Value::from(2u64)), ("h", Value::from(3u64))])
            )])
        );
    }

    #[test]
    fn newtype_struct_is_transparent() {
        assert_eq!(to_value(&Meters(-4)).unwrap(), Value::from(-4i64));
    }

    #[test]
    fn unit_is_null() {
        assert_eq!(to_value(&()).unwrap(), Value::Null);
    }

    #[test]
    fn integer_map_keys_are_stringified() {
        let mut m = BTreeMap::new();
        m.insert(10u32, "ten");
        m.insert(2u32, "two");
        let v = to_value(&m).unwrap();
        assert_eq!(v.get("10"), Some(&Value::from("ten")));
        assert_eq!(v.get("2"), Some(&Value::from("two")));
    }

    #[test]
    fn composite_map_keys_are_unsupported() {
        let mut m = HashMap::new();
        m.insert((1, 2), "pair");
        let err = to_value(&m).unwrap_err();
        assert!(matches!(err, NormalizeError::UnsupportedType(_)));
    }

    #[test]
    fn oversized_i128_is_unsupported() {
        let err = to_value(&i128::MAX).unwrap_err();
        assert!(matches!(err, NormalizeError::UnsupportedType(_)));
        assert_eq!(to_value(&-3i128).unwrap(), Value::from(-3i64));
    }

    #[test]
    fn custom_error_is_propagated() {
        let err = to_value(&vec![Failing]).unwrap_err();
        assert!(matches!(err, NormalizeError::Custom(ref m) if m == "refused"));
    }

    #[test]
    fn json_documents_normalize() {
        let v = from_json_str(r#"{"items": [1, 2, 3], "ok": true}"#).unwrap();
        assert_eq!(v.get("items"), Some(&Value::from(vec![1i64, 2, 3])));
        assert!(matches!(from_json_str("{"), Err(NormalizeError::Json(_))));
    }
}
