//! Golden-file snapshots.
//!
//! Values are serialized as canonical pretty JSON (object keys sorted, trailing
//! newline) and compared against a file on disk. Set
//! `LIBRARY_UPDATE_SNAPSHOTS=1` to write the current value instead.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Environment variable that enables snapshot updates.
pub const UPDATE_SNAPSHOTS_ENV: &str = "LIBRARY_UPDATE_SNAPSHOTS";

/// Whether a snapshot assertion compares or rewrites the golden file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotMode {
    /// Compare against the file on disk.
    Compare,
    /// Overwrite the file on disk.
    Update,
}

impl SnapshotMode {
    /// Mode selected by [`UPDATE_SNAPSHOTS_ENV`].
    pub fn from_env() -> Self {
        match std::env::var(UPDATE_SNAPSHOTS_ENV).as_deref() {
            Ok("1") | Ok("true") | Ok("TRUE") | Ok("yes") | Ok("YES") => Self::Update,
            _ => Self::Compare,
        }
    }
}

/// Assert that `value` matches the JSON snapshot stored at `path`.
pub fn assert_json_snapshot<P: AsRef<Path>, T: Serialize>(path: P, value: &T) -> Result<()> {
    assert_json_snapshot_with_mode(path, value, SnapshotMode::from_env())
}

/// [`assert_json_snapshot`] with an explicit mode.
pub fn assert_json_snapshot_with_mode<P: AsRef<Path>, T: Serialize>(
    path: P,
    value: &T,
    mode: SnapshotMode,
) -> Result<()> {
    let path = path.as_ref();
    let actual = canonical_json(value)?;

    if mode == SnapshotMode::Update {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create snapshot directory {}", parent.display())
            })?;
        }
        fs::write(path, &actual)
            .with_context(|| format!("Failed to write snapshot {}", path.display()))?;
        return Ok(());
    }

    let expected = fs::read_to_string(path).with_context(|| {
        format!(
            "Snapshot missing at {} (run with {}=1 to create it)",
            path.display(),
            UPDATE_SNAPSHOTS_ENV
        )
    })?;

    if let Some((line, want, got)) = first_difference(&expected, &actual) {
        anyhow::bail!(
            "Snapshot mismatch at {} line {line}: expected `{want}`, got `{got}` (run with {}=1 to update)",
            path.display(),
            UPDATE_SNAPSHOTS_ENV
        );
    }

    Ok(())
}

/// Canonical pretty JSON for `value`.
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String> {
    let value = serde_json::to_value(value).context("Failed to serialize snapshot value")?;
    let mut s = serde_json::to_string_pretty(&sort_keys(value))
        .context("Failed to format snapshot JSON")?;
    s.push('\n');
    Ok(s)
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, sort_keys(v)))
                    .collect(),
            )
        }
        Value::Array(values) => Value::Array(values.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

fn first_difference<'a>(expected: &'a str, actual: &'a str) -> Option<(usize, &'a str, &'a str)> {
    let mut want = expected.lines();
    let mut got = actual.lines();
    let mut line = 1;
    loop {
        match (want.next(), got.next()) {
            (None, None) => return None,
            (w, g) if w != g => return Some((line, w.unwrap_or("<eof>"), g.unwrap_or("<eof>"))),
            _ => line += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn canonical_json_sorts_nested_keys() {
        let s = canonical_json(&json!({"b": {"z": 1, "a": 2}, "a": [true]})).unwrap();
        let a = s.find("\"a\": [").unwrap();
        let b = s.find("\"b\"").unwrap();
        assert!(a < b);
        assert!(s.find("\"a\": 2").unwrap() < s.find("\"z\"").unwrap());
        assert!(s.ends_with("}\n"));
    }

    #[test]
    fn mismatch_names_the_line() {
        let path = std::env::temp_dir().join("library_testkit_mismatch.json");
        assert_json_snapshot_with_mode(&path, &json!({"found": 1}), SnapshotMode::Update).unwrap();
        let err = assert_json_snapshot_with_mode(&path, &json!({"found": 2}), SnapshotMode::Compare)
            .unwrap_err();
        assert!(err.to_string().contains("line 2"), "unexpected error: {err:#}");
        let _ = fs::remove_file(&path);
    }
}
