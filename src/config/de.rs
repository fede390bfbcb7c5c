//! Lenient deserialization of typed sections
//!
//! Coercion runs before any section type is known, so `"1"` arrives as
//! `Bool(true)` and `"2024"` as `Int(2024)`. Deserializing from a
//! [`SettingValue`] lets the target field decide: integer fields accept
//! booleans as 1/0 and integral floats, string fields accept any scalar's
//! text, and numeric fields parse numeric strings.

use std::collections::btree_map;

use serde::de::value::Error;
use serde::de::{self, DeserializeSeed, Deserializer, IntoDeserializer, MapAccess, Visitor};
use serde::forward_to_deserialize_any;

use crate::config::value::{SettingMap, SettingValue};

macro_rules! deserialize_integer {
    ($($method:ident)*) => {
        $(
            fn $method<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
                match self {
                    SettingValue::Bool(b) => visitor.visit_i64(i64::from(b)),
                    SettingValue::Float(f) if f.fract() == 0.0 && f.abs() < 9.0e15 => {
                        visitor.visit_i64(f as i64)
                    }
                    SettingValue::String(s) => match s.trim().parse::<i64>() {
                        Ok(i) => visitor.visit_i64(i),
                        Err(_) => visitor.visit_string(s),
                    },
                    other => other.deserialize_any(visitor),
                }
            }
        )*
    };
}

macro_rules! deserialize_float {
    ($($method:ident)*) => {
        $(
            fn $method<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
                match self {
                    SettingValue::Int(i) => visitor.visit_f64(i as f64),
                    SettingValue::String(s) => match s.trim().parse::<f64>() {
                        Ok(f) => visitor.visit_f64(f),
                        Err(_) => visitor.visit_string(s),
                    },
                    other => other.deserialize_any(visitor),
                }
            }
        )*
    };
}

macro_rules! deserialize_text {
    ($($method:ident)*) => {
        $(
            fn $method<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
                match self {
                    SettingValue::Map(map) => visitor.visit_map(SettingMapAccess::new(map)),
                    SettingValue::Null => visitor.visit_string(String::new()),
                    scalar => visitor.visit_string(scalar.to_string()),
                }
            }
        )*
    };
}

impl<'de> Deserializer<'de> for SettingValue {
    type Error = Error;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
        match self {
            SettingValue::Null => visitor.visit_unit(),
            SettingValue::Bool(b) => visitor.visit_bool(b),
            SettingValue::Int(i) => visitor.visit_i64(i),
            SettingValue::Float(f) => visitor.visit_f64(f),
            SettingValue::String(s) => visitor.visit_string(s),
            SettingValue::Map(map) => visitor.visit_map(SettingMapAccess::new(map)),
        }
    }

    fn deserialize_bool<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
        match self {
            SettingValue::Int(i) => visitor.visit_bool(i != 0),
            SettingValue::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "on" => visitor.visit_bool(true),
                "false" | "no" | "off" => visitor.visit_bool(false),
                _ => visitor.visit_string(s),
            },
            other => other.deserialize_any(visitor),
        }
    }

    deserialize_integer! {
        deserialize_i8 deserialize_i16 deserialize_i32 deserialize_i64 deserialize_i128
        deserialize_u8 deserialize_u16 deserialize_u32 deserialize_u64 deserialize_u128
    }

    deserialize_float! { deserialize_f32 deserialize_f64 }

    deserialize_text! { deserialize_str deserialize_string }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
        match self {
            SettingValue::Null => visitor.visit_none(),
            other => visitor.visit_some(other),
        }
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, Error> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Error> {
        match self {
            SettingValue::String(s) => visitor.visit_enum(s.into_deserializer()),
            other => other.deserialize_any(visitor),
        }
    }

    forward_to_deserialize_any! {
        char bytes byte_buf unit unit_struct seq tuple tuple_struct map struct
        identifier ignored_any
    }
}

struct SettingMapAccess {
    entries: btree_map::IntoIter<String, SettingValue>,
    pending: Option<SettingValue>,
}

impl SettingMapAccess {
    fn new(map: SettingMap) -> Self {
        Self {
            entries: map.into_iter(),
            pending: None,
        }
    }
}

impl<'de> MapAccess<'de> for SettingMapAccess {
    type Error = Error;

    fn next_key_seed<K: DeserializeSeed<'de>>(
        &mut self,
        seed: K,
    ) -> Result<Option<K::Value>, Error> {
        match self.entries.next() {
            Some((key, value)) => {
                self.pending = Some(value);
                seed.deserialize(key.into_deserializer()).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V: DeserializeSeed<'de>>(&mut self, seed: V) -> Result<V::Value, Error> {
        match self.pending.take() {
            Some(value) => seed.deserialize(value),
            None => Err(de::Error::custom("value requested before key")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.entries.len())
    }
}
