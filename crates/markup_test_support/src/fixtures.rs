//! Golden parse cases stored as TOML.
//!
//! ```toml
//! format = "markup-cases-v1"
//!
//! [[cases]]
//! name = "leaf"
//! input = "<node/>"
//! tree = ["<node>"]
//! deparse = "<node/>"
//!
//! [[cases]]
//! name = "unterminated"
//! input = "<node>"
//! error = "incomplete"
//! ```
//!
//! A case expects either a tree (snapshot lines, see `TreeSnapshot`) or an
//! error code, never both. `deparse` and `dump` are optional extra checks on a
//! successful parse.

use markup::ParseErrorCode;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

pub const CASES_FORMAT_V1: &str = "markup-cases-v1";

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
struct CaseManifest {
    format: String,
    cases: Vec<RawCase>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct RawCase {
    name: String,
    input: String,
    #[serde(default)]
    error: Option<ExpectedError>,
    #[serde(default)]
    tree: Option<Vec<String>>,
    #[serde(default)]
    deparse: Option<String>,
    #[serde(default)]
    dump: Option<Vec<String>>,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
enum ExpectedError {
    NotMarkup,
    Incomplete,
    OpenCloseMismatch,
    StackUnderflow,
}

impl From<ExpectedError> for ParseErrorCode {
    fn from(value: ExpectedError) -> Self {
        match value {
            ExpectedError::NotMarkup => ParseErrorCode::NotMarkup,
            ExpectedError::Incomplete => ParseErrorCode::Incomplete,
            ExpectedError::OpenCloseMismatch => ParseErrorCode::OpenCloseMismatch,
            ExpectedError::StackUnderflow => ParseErrorCode::StackUnderflow,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expected {
    Tree {
        lines: Vec<String>,
        deparse: Option<String>,
        dump: Option<Vec<String>>,
    },
    Error(ParseErrorCode),
}

#[derive(Clone, Debug)]
pub struct ParseCase {
    pub name: String,
    pub input: String,
    pub expected: Expected,
}

pub fn load_cases(path: &Path) -> Vec<ParseCase> {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("failed to read case file {path:?}: {err}"));
    parse_cases(&content, path)
}

pub fn parse_cases(content: &str, path: &Path) -> Vec<ParseCase> {
    let manifest: CaseManifest = toml::from_str(content)
        .unwrap_or_else(|err| panic!("failed to parse case file {path:?}: {err}"));
    assert_eq!(
        manifest.format, CASES_FORMAT_V1,
        "unsupported case format in {path:?}"
    );
    assert!(!manifest.cases.is_empty(), "case file {path:?} has no cases");

    let mut seen = BTreeSet::new();
    manifest
        .cases
        .into_iter()
        .map(|raw| {
            if !seen.insert(raw.name.clone()) {
                panic!("duplicate case '{}' in {path:?}", raw.name);
            }
            let expected = match (raw.error, raw.tree) {
                (Some(error), None) => {
                    if raw.deparse.is_some() || raw.dump.is_some() {
                        panic!(
                            "case '{}' expects an error but has deparse/dump in {path:?}",
                            raw.name
                        );
                    }
                    Expected::Error(error.into())
                }
                (None, Some(lines)) => {
                    if lines.is_empty() {
                        panic!("case '{}' has an empty tree in {path:?}", raw.name);
                    }
                    Expected::Tree {
                        lines,
                        deparse: raw.deparse,
                        dump: raw.dump,
                    }
                }
                (Some(_), Some(_)) => {
                    panic!("case '{}' has both error and tree in {path:?}", raw.name)
                }
                (None, None) => panic!("case '{}' has neither error nor tree in {path:?}", raw.name),
            };
            ParseCase {
                name: raw.name,
                input: raw.input,
                expected,
            }
        })
        .collect()
}
