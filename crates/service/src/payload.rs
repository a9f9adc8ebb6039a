//! Serde helpers for loosely-typed JSON request bodies.
//!
//! Clients send ids as numbers or numeric strings and use `null` to clear an
//! association, so update payloads distinguish "absent" from "null":
//! `None` = key absent, `Some(None)` = explicit null, `Some(Some(v))` = value.

use serde::de::{Deserializer, Error};
use serde::Deserialize;
use serde_json::Value;

/// Integer id given as a number or a numeric string; `null` and `""` mean no id.
pub fn lenient_id<'de, D>(de: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(de)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(|v| i32::try_from(v).ok())
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid literal for int(): {n}"))),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .parse::<i32>()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("invalid literal for int(): '{s}'"))),
        Some(other) => Err(D::Error::custom(format!("expected an integer id, got {other}"))),
    }
}

/// Like [`lenient_id`], keeping an explicit `null` distinguishable from an absent key.
/// Use together with `#[serde(default)]`.
pub fn lenient_id_patch<'de, D>(de: D) -> Result<Option<Option<i32>>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_id(de).map(Some)
}

/// Present-or-absent wrapper for nullable fields. Use together with `#[serde(default)]`.
pub fn patch<'de, D, T>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}

/// Flag from a loosely-typed JSON value. `null`, `false`, zero, empty arrays and
/// objects are false; strings are false when blank or spelling a negative
/// (`"false"`, `"0"`, `"no"`, any case), true otherwise.
pub fn lenient_bool<'de, D>(de: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(de)? {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
        Some(Value::String(s)) => !matches!(s.trim().to_ascii_lowercase().as_str(), "" | "false" | "0" | "no"),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
    })
}

/// Treat blank strings the way an absent value is treated.
pub fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Fields {
        #[serde(default, deserialize_with = "lenient_id")]
        id: Option<i32>,
        #[serde(default, deserialize_with = "lenient_id_patch")]
        link: Option<Option<i32>>,
        #[serde(default, deserialize_with = "patch")]
        note: Option<Option<String>>,
        #[serde(default, deserialize_with = "lenient_bool")]
        flag: bool,
    }

    fn parse(v: serde_json::Value) -> Result<Fields, serde_json::Error> {
        serde_json::from_value(v)
    }

    #[test]
    fn ids_accept_numbers_and_numeric_strings() {
        assert_eq!(parse(json!({"id": 7})).unwrap().id, Some(7));
        assert_eq!(parse(json!({"id": " 12 "})).unwrap().id, Some(12));
        assert_eq!(parse(json!({"id": ""})).unwrap().id, None);
        assert_eq!(parse(json!({})).unwrap().id, None);
    }

    #[test]
    fn ids_reject_garbage() {
        let err = parse(json!({"id": "abc"})).unwrap_err();
        assert!(err.to_string().contains("invalid literal for int()"));
        assert!(parse(json!({"id": 1.5})).is_err());
        assert!(parse(json!({"id": [1]})).is_err());
    }

    #[test]
    fn patch_fields_distinguish_null_from_absent() {
        let absent = parse(json!({})).unwrap();
        assert_eq!(absent.link, None);
        assert_eq!(absent.note, None);

        let cleared = parse(json!({"link": null, "note": null})).unwrap();
        assert_eq!(cleared.link, Some(None));
        assert_eq!(cleared.note, Some(None));

        let set = parse(json!({"link": "3", "note": "hi"})).unwrap();
        assert_eq!(set.link, Some(Some(3)));
        assert_eq!(set.note, Some(Some("hi".to_string())));
    }

    #[test]
    fn bool_treats_negative_words_as_false() {
        assert!(parse(json!({"flag": true})).unwrap().flag);
        assert!(parse(json!({"flag": 1})).unwrap().flag);
        assert!(parse(json!({"flag": "yes"})).unwrap().flag);
        assert!(parse(json!({"flag": "primary"})).unwrap().flag);
        assert!(!parse(json!({"flag": "false"})).unwrap().flag);
        assert!(!parse(json!({"flag": "No"})).unwrap().flag);
        assert!(!parse(json!({"flag": " 0 "})).unwrap().flag);
        assert!(!parse(json!({"flag": 0})).unwrap().flag);
        assert!(!parse(json!({"flag": null})).unwrap().flag);
        assert!(!parse(json!({})).unwrap().flag);
    }
}
