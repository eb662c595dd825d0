//! JSON loading of PAC benchmark statistics.
//!
//! Document shape:
//!
//! ```json
//! { "instances": { "korf-01": { "optimal": 57.0, "initial_h": 41.0 } } }
//! ```
//!
//! Anything malformed is a configuration error, reported through
//! [`SearchError::MalformedStatistics`]; validation of the values
//! themselves happens in `PacStatisticsV1::new`.

use std::collections::BTreeMap;
use std::path::Path;

use wayfinder_search::error::SearchError;
use wayfinder_search::pac::stats::InstanceStat;
use wayfinder_search::pac::PacStatisticsV1;

/// Parse statistics from a JSON document.
///
/// # Errors
///
/// Returns [`SearchError::MalformedStatistics`] for syntax errors, a
/// missing or non-object `instances` field, or entries without finite
/// numeric `optimal` and `initial_h`.
pub fn statistics_from_json(text: &str) -> Result<PacStatisticsV1, SearchError> {
    let document: serde_json::Value =
        serde_json::from_str(text).map_err(|e| SearchError::MalformedStatistics {
            detail: format!("JSON syntax: {e}"),
        })?;
    let instances = document
        .get("instances")
        .and_then(serde_json::Value::as_object)
        .ok_or_else(|| SearchError::MalformedStatistics {
            detail: "missing \"instances\" object".into(),
        })?;

    let mut table = BTreeMap::new();
    for (id, entry) in instances {
        let optimal = number_field(id, entry, "optimal")?;
        let initial_h = number_field(id, entry, "initial_h")?;
        table.insert(id.clone(), InstanceStat { optimal, initial_h });
    }
    PacStatisticsV1::new(table)
}

/// Read and parse a statistics file.
///
/// # Errors
///
/// Returns [`SearchError::MalformedStatistics`] for I/O failures as well
/// as parse failures; a missing file is a configuration error here, not
/// an I/O concern the caller can act on.
pub fn statistics_from_file(path: &Path) -> Result<PacStatisticsV1, SearchError> {
    let text = std::fs::read_to_string(path).map_err(|e| SearchError::MalformedStatistics {
        detail: format!("read {}: {e}", path.display()),
    })?;
    statistics_from_json(&text)
}

fn number_field(id: &str, entry: &serde_json::Value, field: &str) -> Result<f64, SearchError> {
    entry
        .get(field)
        .and_then(serde_json::Value::as_f64)
        .ok_or_else(|| SearchError::MalformedStatistics {
            detail: format!("instance {id}: missing numeric \"{field}\""),
        })
}
