//! Golden fixture manifest: TOML files describing inputs and their expected
//! token snapshots.

use serde::Deserialize;
use std::path::Path;

pub const GOLDEN_FORMAT_V1: &str = "tagsoup-golden-v1";

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct GoldenManifest {
    pub format: String,
    pub cases: Vec<GoldenCase>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct GoldenCase {
    pub name: String,
    /// What the case pins down, for reviewers.
    #[serde(default)]
    pub covers: String,
    pub input: String,
    /// Expected `token_snapshot` lines for a single-feed run plus finish.
    pub tokens: Vec<String>,
}

/// Load and validate a manifest; panics with context on any problem, which
/// is the right failure mode inside a test harness.
pub fn load_manifest(path: &Path) -> GoldenManifest {
    let raw = std::fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("failed to read golden manifest {}: {err}", path.display()));
    let manifest: GoldenManifest = toml::from_str(&raw)
        .unwrap_or_else(|err| panic!("failed to parse golden manifest {}: {err}", path.display()));
    assert_eq!(
        manifest.format,
        GOLDEN_FORMAT_V1,
        "unsupported golden manifest format in {}",
        path.display()
    );
    let mut seen = std::collections::BTreeSet::new();
    for case in &manifest.cases {
        assert!(
            seen.insert(case.name.as_str()),
            "duplicate golden case name '{}' in {}",
            case.name,
            path.display()
        );
    }
    manifest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_round_trips_from_toml() {
        let manifest: GoldenManifest = toml::from_str(
            r#"
format = "tagsoup-golden-v1"

[[cases]]
name = "doctype"
covers = "basic declaration"
input = "<!DOCTYPE html>"
tokens = ["Declaration(DOCTYPE, html)"]
"#,
        )
        .expect("manifest must parse");
        assert_eq!(manifest.format, GOLDEN_FORMAT_V1);
        assert_eq!(manifest.cases.len(), 1);
        assert_eq!(manifest.cases[0].tokens.len(), 1);
    }
}
