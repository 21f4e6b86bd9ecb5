//! Normalization adapter for differ.
//!
//! Turns native Rust data into the [`Value`] model before any diffing
//! happens. Anything implementing [`serde::Serialize`] can be normalized:
//! structs and maps become [`Value::Map`], sequences and tuples become
//! [`Value::List`], `None` becomes [`Value::Null`], and every integer width
//! is widened within its signedness class.
//!
//! Unlike a JSON round-trip, the serializer keeps signed and unsigned
//! integers apart, so `5u32` and `5i32` normalize to different scalars.
//!
//! [`Value`]: differ_types::Value
//! [`Value::Map`]: differ_types::Value::Map
//! [`Value::List`]: differ_types::Value::List
//! [`Value::Null`]: differ_types::Value::Null

pub mod error;
pub mod serializer;

pub use error::{NormalizeError, NormalizeResult};
pub use serializer::{from_json_str, to_value, ValueSerializer};
