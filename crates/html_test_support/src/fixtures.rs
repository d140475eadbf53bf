use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

pub const FIXTURE_FORMAT_V1: &str = "textsplit-fixtures-v1";

#[derive(Debug, Deserialize)]
struct FixtureFile<T> {
    format: String,
    #[serde(rename = "case")]
    cases: Vec<T>,
}

/// One case from a fixture file, tagged with where it came from.
#[derive(Debug)]
pub struct Fixture<T> {
    pub path: PathBuf,
    pub index: usize,
    pub case: T,
}

impl<T> Fixture<T> {
    pub fn label(&self) -> String {
        let file = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        format!("{file}#{}", self.index)
    }
}

/// Loads every `*.toml` file in `dir` (sorted by name) as a list of `[[case]]` tables.
///
/// Panics with the offending path on unreadable files, parse errors, an unknown `format`
/// header, or a directory without cases.
pub fn load_cases<T: DeserializeOwned>(dir: &Path) -> Vec<Fixture<T>> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .unwrap_or_else(|err| panic!("failed to read fixture dir {dir:?}: {err}"))
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    paths.sort();

    let mut out = Vec::new();
    for path in paths {
        let content = fs::read_to_string(&path)
            .unwrap_or_else(|err| panic!("failed to read fixture {path:?}: {err}"));
        let file: FixtureFile<T> = toml::from_str(&content)
            .unwrap_or_else(|err| panic!("failed to parse fixture {path:?}: {err}"));
        assert_eq!(
            file.format, FIXTURE_FORMAT_V1,
            "unsupported fixture format in {path:?}"
        );
        out.extend(file.cases.into_iter().enumerate().map(|(index, case)| Fixture {
            path: path.clone(),
            index,
            case,
        }));
    }
    assert!(!out.is_empty(), "no fixture cases found in {dir:?}");
    out
}
