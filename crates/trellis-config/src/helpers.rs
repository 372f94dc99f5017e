use std::fmt;
use std::path::PathBuf;

use serde::de::{self, Deserialize, Deserializer, Visitor};

// Helper defaults
pub(crate) fn default_out_dir() -> PathBuf {
    PathBuf::from("wwwroot")
}

pub(crate) fn default_base_url() -> String {
    "/".to_string()
}

pub(crate) fn default_feature_dir() -> PathBuf {
    PathBuf::from("./Features")
}

pub(crate) fn default_component_dir() -> PathBuf {
    PathBuf::from("./Components")
}

pub(crate) fn default_dependency_dir() -> PathBuf {
    PathBuf::from("node_modules")
}

pub(crate) fn default_template() -> PathBuf {
    PathBuf::from("index.ejs")
}

pub(crate) fn default_favicon() -> PathBuf {
    PathBuf::from("static/favicon.ico")
}

/// A settings value that may arrive as any scalar.
///
/// Environment values are parsed into typed values, so `TRELLIS_TITLE=2024`
/// reaches serde as an integer and `TRELLIS_OUT_DIR=true` as a bool. Names and
/// directories take them verbatim as text.
struct Scalar(String);

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ScalarVisitor).map(Scalar)
    }
}

struct ScalarVisitor;

impl Visitor<'_> for ScalarVisitor {
    type Value = String;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a string, number or boolean")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<String, E> {
        Ok(value.to_string())
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<String, E> {
        Ok(value)
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<String, E> {
        Ok(value.to_string())
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<String, E> {
        Ok(value.to_string())
    }

    fn visit_i128<E: de::Error>(self, value: i128) -> Result<String, E> {
        Ok(value.to_string())
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<String, E> {
        Ok(value.to_string())
    }

    fn visit_u128<E: de::Error>(self, value: u128) -> Result<String, E> {
        Ok(value.to_string())
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<String, E> {
        Ok(value.to_string())
    }
}

pub(crate) fn lenient_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<String, D::Error> {
    Scalar::deserialize(deserializer).map(|scalar| scalar.0)
}

pub(crate) fn lenient_path<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<PathBuf, D::Error> {
    Scalar::deserialize(deserializer).map(|scalar| PathBuf::from(scalar.0))
}

pub(crate) fn lenient_optional_path<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<PathBuf>, D::Error> {
    Option::<Scalar>::deserialize(deserializer)
        .map(|scalar| scalar.map(|scalar| PathBuf::from(scalar.0)))
}
