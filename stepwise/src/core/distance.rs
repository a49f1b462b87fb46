//! Serde adapters for distances that may be infinite.
//!
//! JSON has no literal for infinity: `serde_json` writes `f64::INFINITY` as
//! `null` and refuses to read `null` back as `f64`. Distances go through
//! these adapters instead, which write finite values as numbers and the
//! non-finite ones as `"inf"`, `"-inf"` and `"NaN"`. The three encode to
//! different bytes, so state fingerprints tell them apart.
//!
//! ```
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Row {
//!     #[serde(with = "stepwise::core::distance")]
//!     cost: f64,
//! }
//!
//! let json = serde_json::to_string(&Row { cost: f64::INFINITY }).unwrap();
//! assert_eq!(json, r#"{"cost":"inf"}"#);
//! let row: Row = serde_json::from_str(&json).unwrap();
//! assert!(row.cost.is_infinite());
//! ```

use crate::graph::NodeId;
use serde::de::{self, Deserializer, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

const INFINITY: &str = "inf";
const NEG_INFINITY: &str = "-inf";
const NAN: &str = "NaN";

/// Wire form of one distance
#[derive(Debug, Clone, Copy, PartialEq)]
struct Wire(f64);

impl Serialize for Wire {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value = self.0;
        if value.is_finite() {
            serializer.serialize_f64(value)
        } else if value.is_nan() {
            serializer.serialize_str(NAN)
        } else if value > 0.0 {
            serializer.serialize_str(INFINITY)
        } else {
            serializer.serialize_str(NEG_INFINITY)
        }
    }
}

impl<'de> Deserialize<'de> for Wire {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(WireVisitor)
    }
}

struct WireVisitor;

impl Visitor<'_> for WireVisitor {
    type Value = Wire;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number, \"inf\", \"-inf\" or \"NaN\"")
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Wire, E> {
        Ok(Wire(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Wire, E> {
        Ok(Wire(value as f64))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Wire, E> {
        Ok(Wire(value as f64))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Wire, E> {
        match value {
            INFINITY => Ok(Wire(f64::INFINITY)),
            NEG_INFINITY => Ok(Wire(f64::NEG_INFINITY)),
            NAN => Ok(Wire(f64::NAN)),
            other => Err(E::invalid_value(de::Unexpected::Str(other), &self)),
        }
    }
}

/// Use with `#[serde(with = "crate::core::distance")]` on an `f64`
pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    Wire(*value).serialize(serializer)
}

/// Use with `#[serde(with = "crate::core::distance")]` on an `f64`
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Wire::deserialize(deserializer).map(|wire| wire.0)
}

/// Adapter for a distance table keyed by node
pub mod map {
    use super::*;

    pub fn serialize<S: Serializer>(
        table: &BTreeMap<NodeId, f64>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_map(table.iter().map(|(node, value)| (node, Wire(*value))))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<NodeId, f64>, D::Error> {
        let table = BTreeMap::<NodeId, Wire>::deserialize(deserializer)?;
        Ok(table.into_iter().map(|(node, wire)| (node, wire.0)).collect())
    }
}

/// Adapter for a dense all-pairs matrix
pub mod matrix {
    use super::*;

    pub fn serialize<S: Serializer>(rows: &[Vec<f64>], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(
            rows.iter()
                .map(|row| row.iter().copied().map(Wire).collect::<Vec<_>>()),
        )
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Vec<f64>>, D::Error> {
        let rows = Vec::<Vec<Wire>>::deserialize(deserializer)?;
        Ok(rows
            .into_iter()
            .map(|row| row.into_iter().map(|wire| wire.0).collect())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{deserialize_value, fingerprint, serialize_value};

    #[derive(Debug, Serialize, Deserialize)]
    struct Table {
        #[serde(with = "super")]
        single: f64,
        #[serde(with = "map")]
        by_node: BTreeMap<NodeId, f64>,
        #[serde(with = "matrix")]
        grid: Vec<Vec<f64>>,
    }

    #[test]
    fn test_non_finite_values_survive() {
        let table = Table {
            single: f64::NEG_INFINITY,
            by_node: BTreeMap::from([(NodeId::new(0), 0.0), (NodeId::new(1), f64::INFINITY)]),
            grid: vec![vec![0.0, f64::INFINITY], vec![2.5, f64::NAN]],
        };
        let bytes = serialize_value(&table).unwrap();
        let restored: Table = deserialize_value(&bytes).unwrap();

        assert_eq!(restored.single, f64::NEG_INFINITY);
        assert_eq!(restored.by_node[&NodeId::new(0)], 0.0);
        assert_eq!(restored.by_node[&NodeId::new(1)], f64::INFINITY);
        assert_eq!(restored.grid[0], vec![0.0, f64::INFINITY]);
        assert_eq!(restored.grid[1][0], 2.5);
        assert!(restored.grid[1][1].is_nan());
    }

    #[test]
    fn test_integers_read_as_distances() {
        let restored: Table =
            deserialize_value(br#"{"single":3,"by_node":{"4":-2},"grid":[[1]]}"#).unwrap();
        assert_eq!(restored.single, 3.0);
        assert_eq!(restored.by_node[&NodeId::new(4)], -2.0);
        assert_eq!(restored.grid, vec![vec![1.0]]);
    }

    #[test]
    fn test_unknown_text_is_rejected() {
        let result: crate::core::Result<Table> =
            deserialize_value(br#"{"single":"infinite","by_node":{},"grid":[]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_non_finite_values_fingerprint_apart() {
        let fingerprints: Vec<u64> = [f64::INFINITY, f64::NEG_INFINITY, f64::NAN]
            .into_iter()
            .map(|single| {
                fingerprint(&Table {
                    single,
                    by_node: BTreeMap::new(),
                    grid: Vec::new(),
                })
                .unwrap()
            })
            .collect();
        assert_ne!(fingerprints[0], fingerprints[1]);
        assert_ne!(fingerprints[0], fingerprints[2]);
        assert_ne!(fingerprints[1], fingerprints[2]);
    }
}
