//! JSON problems and configs shared by the lesson tests, indexed by
//! `fixtures/manifest.json` at the workspace root.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

const MANIFEST_JSON: &str = include_str!("../../../../fixtures/manifest.json");

/// Parsed once; a broken manifest surfaces as an error from every lookup.
static MANIFEST: Lazy<Result<Manifest, String>> =
    Lazy::new(|| serde_json::from_str(MANIFEST_JSON).map_err(|e| e.to_string()));

#[derive(Debug, Deserialize)]
struct Manifest {
    problems: HashMap<String, ProblemEntry>,
    configs: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct ProblemEntry {
    kind: String,
    path: String,
    #[serde(default)]
    expect: Expectation,
}

/// What the finished lesson should show for a fixture problem.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Expectation {
    /// Labels on the terminal view, compared exactly.
    #[serde(default)]
    pub labels: HashMap<String, String>,
    /// The parameters are invalid and the lesson renders an error panel.
    #[serde(default)]
    pub error: bool,
}

fn manifest() -> Result<&'static Manifest> {
    MANIFEST
        .as_ref()
        .map_err(|e| anyhow!("fixtures/manifest.json is malformed: {e}"))
}

/// `rel` is relative to the `fixtures/` directory.
fn fixture_file(rel: &str) -> PathBuf {
    [env!("CARGO_MANIFEST_DIR"), "..", "..", "..", "fixtures", rel]
        .iter()
        .collect()
}

fn read_fixture(rel: &str) -> Result<String> {
    let path = fixture_file(rel);
    fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))
}

fn parse_fixture<T: DeserializeOwned>(rel: &str) -> Result<T> {
    serde_json::from_str(&read_fixture(rel)?).with_context(|| format!("decoding {rel}"))
}

fn sorted_names<T>(map: &HashMap<String, T>) -> Vec<String> {
    let mut names: Vec<String> = map.keys().cloned().collect();
    names.sort();
    names
}

fn problem(name: &str) -> Result<&'static ProblemEntry> {
    manifest()?
        .problems
        .get(name)
        .ok_or_else(|| anyhow!("no problem fixture named '{name}'"))
}

fn config_path(name: &str) -> Result<&'static str> {
    manifest()?
        .configs
        .get(name)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("no config fixture named '{name}'"))
}

pub mod problems {
    use super::*;

    /// Fixture names, sorted so test output is stable. Empty if the manifest
    /// does not parse.
    pub fn keys() -> Vec<String> {
        manifest().map(|m| sorted_names(&m.problems)).unwrap_or_default()
    }

    /// Lesson kind the problem is meant for.
    pub fn kind(name: &str) -> Result<String> {
        Ok(problem(name)?.kind.clone())
    }

    pub fn json(name: &str) -> Result<String> {
        read_fixture(&problem(name)?.path)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        parse_fixture(&problem(name)?.path)
    }

    pub fn expectation(name: &str) -> Result<Expectation> {
        Ok(problem(name)?.expect.clone())
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        Ok(fixture_file(&problem(name)?.path))
    }
}

pub mod configs {
    use super::*;

    pub fn keys() -> Vec<String> {
        manifest().map(|m| sorted_names(&m.configs)).unwrap_or_default()
    }

    pub fn json(name: &str) -> Result<String> {
        read_fixture(config_path(name)?)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        parse_fixture(config_path(name)?)
    }
}
