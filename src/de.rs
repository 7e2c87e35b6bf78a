//! Deserialize concrete-value documents with JSON-path context in errors.

use serde::de::DeserializeOwned;

#[derive(Debug, thiserror::Error)]
#[error("at JSON path {path}: {source}")]
pub struct DeError {
    pub path: String,
    #[source]
    source: serde_json::Error,
}

pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T, DeError> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(|err| DeError {
        path: err.path().to_string(),
        source: err.into_inner(),
    })
}

pub fn from_slice_with_path<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, DeError> {
    let de = &mut serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize::<_, T>(de).map_err(|err| DeError {
        path: err.path().to_string(),
        source: err.into_inner(),
    })
}
