use super::error::{CoreError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Compute a stable fingerprint of a serializable value.
///
/// Uses SeaHash over the JSON encoding, which is stable across compiler
/// versions and process restarts. Two replays that reach the same state
/// produce the same bytes and therefore the same fingerprint.
///
/// Not cryptographically secure; it is only used for equality checks.
pub fn fingerprint<T: Serialize>(value: &T) -> Result<u64> {
    let bytes = serialize_value(value)?;
    Ok(seahash::hash(&bytes))
}

/// Serializes a value to bytes using JSON.
///
/// Plain `f64` fields encode non-finite values as `null`, which does not
/// read back; distance fields use [`crate::core::distance`] instead.
///
/// # Errors
/// Returns `CoreError::Serialization` if the value cannot be serialized.
pub fn serialize_value<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(CoreError::Serialization)
}

/// Deserializes bytes to a value using JSON.
///
/// # Errors
/// Returns `CoreError::Deserialization` if the bytes cannot be deserialized.
pub fn deserialize_value<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(CoreError::Deserialization)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_stable() {
        let values = vec![3u32, 1, 2];
        let a = fingerprint(&values).unwrap();
        let b = fingerprint(&values.clone()).unwrap();
        assert_eq!(a, b);

        let other = vec![1u32, 2, 3];
        assert_ne!(a, fingerprint(&other).unwrap());
    }

    #[test]
    fn test_step_round_trip() {
        use crate::step::{SortStep, Step};

        let step = Step::new(SortStep::Compare { i: 2, j: 3 }, "Compare 7 and 4");
        let bytes = serialize_value(&step).unwrap();
        let restored: Step = deserialize_value(&bytes).unwrap();
        assert_eq!(restored, step);
        assert!(deserialize_value::<Step>(b"{\"kind\":1}").is_err());
    }

    #[test]
    fn test_infinity_encodes_as_null() {
        let bytes = serialize_value(&vec![0.0f64, f64::INFINITY]).unwrap();
        assert_eq!(bytes, b"[0.0,null]");
    }
}
