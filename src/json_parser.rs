/*

    Provide utilities to parse scene and cage configuration
    JSON files.

    The parser is somewhat robust, let <a> be integer or float type,
    in JSON file <a> can be given both in quotes (string) or as is.

    e.g. In JSON file both
    "MarkerRadius": "0.01" and "MarkerRadius": 0.01
    works as marker_radius: Float in source code

    Vector3 fields accept "<a> <a> <a>" strings as well as [a, a, a]
    arrays.

    @date: 2 Oct, 2025
*/

use std::fmt::{self};
use std::fs::File;
use std::io::BufReader;
use std::marker::PhantomData;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};
use serde::de::{self, MapAccess, SeqAccess, Visitor};

use crate::error::{CageError, Result};
use crate::json_structs::SceneJSON;
use crate::prelude::*;

pub fn parse_scene_json(path: &Path) -> Result<SceneJSON> {

    let span = tracing::span!(tracing::Level::INFO, "load_scene");
    let _enter = span.enter();

    // Open file
    let file = File::open(path).map_err(|source| CageError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let reader = BufReader::new(file);
    debug!("Reading file from {}", path.display());

    // Parse JSON into scene description
    let scene: SceneJSON = serde_json::from_reader(reader)?;
    Ok(scene)
}

// Handles floats as string or number
pub(crate) fn deser_float<'de, D>(deserializer: D) -> std::result::Result<Float, D::Error>
where
    D: Deserializer<'de>,
{
    /*
        Deserialize float type given as either string or number in JSON
    */
    let s: serde_json::Value = Deserialize::deserialize(deserializer)?;
    match s {
        serde_json::Value::Number(n) => n.as_f64()
            .map(|v| v as Float)
            .ok_or_else(|| de::Error::custom("Invalid float")),
        serde_json::Value::String(s) => s.trim().parse::<Float>()
            .map_err(|_| de::Error::custom("Failed to parse float from string")),
        t => Err(de::Error::custom(format!("Expected float or string, found {t}"))),
    }
}

pub trait From3<T>: Sized {
    fn new(x: T, y: T, z: T) -> Self;
}

impl From3<f64> for bevy_math::DVec3 {
    fn new(x: f64, y: f64, z: f64) -> Self {
        Self::new(x, y, z)
    }
}

pub(crate) fn deser_vec3<'de, D, V>(deserializer: D) -> std::result::Result<V, D::Error>
where
    D: Deserializer<'de>,
    V: From3<Float>,
{
    struct Vec3Visitor<V>(PhantomData<V>);

    impl<'de, V> Visitor<'de> for Vec3Visitor<V>
    where
        V: From3<Float>,
    {
        type Value = V;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a Vec3 as a string 'x y z' or an array [x, y, z]")
        }

        // Given "X Y Z"
        fn visit_str<E>(self, value: &str) -> std::result::Result<V, E>
        where
            E: de::Error,
        {
            parse_vec3_str::<V, Float>(value).map_err(de::Error::custom)
        }

        // Given [X, Y, Z]
        fn visit_seq<A>(self, mut seq: A) -> std::result::Result<V, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let mut next = || -> std::result::Result<Float, A::Error> {
                let v: serde_json::Value = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::custom("Expected 3 elements in Vec3 array"))?;
                deser_float(v).map_err(de::Error::custom)
            };
            let (x, y, z) = (next()?, next()?, next()?);
            if seq.next_element::<serde_json::Value>()?.is_some() {
                return Err(de::Error::custom("Expected only 3 elements in Vec3 array"));
            }
            Ok(V::new(x, y, z))
        }
    }

    deserializer.deserialize_any(Vec3Visitor(PhantomData))
}

/// Helper function: parse a string like "25 25 25" into Vector3
fn parse_vec3_str<V, F>(s: &str) -> std::result::Result<V, String>
where
    F: FromStr,
    F::Err: fmt::Display,
    V: From3<F>,
{
    let parts: Vec<&str> = s.split_whitespace().collect();
    if parts.len() != 3 {
        return Err(format!("Expected 3 values, got {}", parts.len()));
    }
    let x = parts[0].parse::<F>().map_err(|e| e.to_string())?;
    let y = parts[1].parse::<F>().map_err(|e| e.to_string())?;
    let z = parts[2].parse::<F>().map_err(|e| e.to_string())?;
    Ok(V::new(x, y, z))
}


pub fn parse_string_vecvec3(s: &str) -> std::result::Result<Vec<Vector3>, String> {
    parse_string_vec(s, 3, |chunk| Ok(Vector3::new(chunk[0], chunk[1], chunk[2])))
}


fn parse_string_vec<T, F>(s: &str, chunk_len: usize, mut f: F) -> std::result::Result<Vec<T>, String>
where
    F: FnMut(&[Float]) -> std::result::Result<T, String>,
{
    let nums: Vec<Float> = s
        .split_whitespace()
        .map(|x| x.parse::<Float>().map_err(|e| e.to_string()))
        .collect::<std::result::Result<_, _>>()?;

    if nums.len() % chunk_len != 0 {
        return Err(format!("Input length not divisible by {}", chunk_len));
    }

    nums.chunks(chunk_len)
        .map(|chunk| f(chunk))
        .collect::<std::result::Result<Vec<_>, _>>()
}


// DISCLAIMER: This function is adapted from
// https://serde.rs/string-or-struct.html, here FromStr may fail
// and its error is reported as the deserialization error.
pub(crate) fn deser_string_or_struct<'de, T, D>(deserializer: D) -> std::result::Result<T, D::Error>
where
    T: Deserialize<'de> + FromStr,
    T::Err: fmt::Display,
    D: Deserializer<'de>,
{
    // This is a Visitor that forwards string types to T's `FromStr` impl and
    // forwards map types to T's `Deserialize` impl. The `PhantomData` is to
    // keep the compiler from complaining about T being an unused generic type
    // parameter. We need T in order to know the Value type for the Visitor
    // impl.
    struct StringOrStruct<T>(PhantomData<fn() -> T>);

    impl<'de, T> Visitor<'de> for StringOrStruct<T>
    where
        T: Deserialize<'de> + FromStr,
        T::Err: fmt::Display,
    {
        type Value = T;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("string or map")
        }

        fn visit_str<E>(self, value: &str) -> std::result::Result<T, E>
        where
            E: de::Error,
        {
            T::from_str(value).map_err(de::Error::custom)
        }

        fn visit_map<M>(self, map: M) -> std::result::Result<T, M::Error>
        where
            M: MapAccess<'de>,
        {
            // `MapAccessDeserializer` is a wrapper that turns a `MapAccess`
            // into a `Deserializer`, allowing it to be used as the input to T's
            // `Deserialize` implementation. T then deserializes itself using
            // the entries from the map visitor.
            Deserialize::deserialize(de::value::MapAccessDeserializer::new(map))
        }
    }

    deserializer.deserialize_any(StringOrStruct(PhantomData))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Sample {
        #[serde(deserialize_with = "deser_float")]
        f: Float,
        #[serde(deserialize_with = "deser_vec3")]
        v: Vector3,
    }

    #[test]
    fn test_numbers_as_strings_or_values() {
        let a: Sample = serde_json::from_str(r#"{"f": "0.25", "v": "1 2 3"}"#).unwrap();
        let b: Sample = serde_json::from_str(r#"{"f": 0.25, "v": [1, "2", 3.0]}"#).unwrap();
        assert_eq!(a.f, 0.25);
        assert_eq!(a.v, Vector3::new(1., 2., 3.));
        assert_eq!(a.f, b.f);
        assert_eq!(a.v, b.v);
    }

    #[test]
    fn test_bad_vec3_rejected() {
        assert!(serde_json::from_str::<Sample>(r#"{"f": 1, "v": "1 2"}"#).is_err());
        assert!(serde_json::from_str::<Sample>(r#"{"f": 1, "v": [1, 2, 3, 4]}"#).is_err());
        assert!(serde_json::from_str::<Sample>(r#"{"f": "abc", "v": "1 2 3"}"#).is_err());
    }

    #[test]
    fn test_parse_string_vecvec3() {
        let v = parse_string_vecvec3("0 0 0 1 2 3").unwrap();
        assert_eq!(v, vec![Vector3::ZERO, Vector3::new(1., 2., 3.)]);
        assert!(parse_string_vecvec3("1 2").is_err());
    }
}
