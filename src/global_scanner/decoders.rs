//! Per-manager output decoding
//!
//! Every package manager speaks its own dialect: npm a single JSON object
//! keyed by package name, pip a JSON array of records, yarn
//! newline-delimited JSON events, brew a JSON array with nested install
//! records. Each decoder turns one dialect into the same intermediate shape
//! before DependencyInfo construction.

use serde_json::Value;

use crate::error::DepscopeError;

/// Normalized intermediate record shared by all decoders
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RawPackage {
    pub name: String,
    pub version: String,
    pub description: Option<String>,
}

fn decode_error(manager: &str, message: impl Into<String>) -> DepscopeError {
    DepscopeError::DecodeFailed {
        manager: manager.to_string(),
        message: message.into(),
    }
}

/// `npm list -g --json --depth=0`: one object with a `dependencies` map
/// keyed by package name
pub(crate) fn decode_npm_list(stdout: &str) -> Result<Vec<RawPackage>, DepscopeError> {
    let json: Value =
        serde_json::from_str(stdout).map_err(|e| decode_error("npm", e.to_string()))?;

    let mut packages = Vec::new();
    if let Some(dependencies) = json.get("dependencies").and_then(|deps| deps.as_object()) {
        for (name, info) in dependencies {
            let version = info
                .get("version")
                .and_then(|version| version.as_str())
                .unwrap_or("unknown");
            let description = info
                .get("description")
                .and_then(|description| description.as_str())
                .map(String::from);

            packages.push(RawPackage {
                name: name.clone(),
                version: version.to_string(),
                description,
            });
        }
    }

    Ok(packages)
}

/// `pip list --format=json`: a JSON array of `{name, version}` records
pub(crate) fn decode_pip_list(stdout: &str) -> Result<Vec<RawPackage>, DepscopeError> {
    let json: Value =
        serde_json::from_str(stdout).map_err(|e| decode_error("pip", e.to_string()))?;

    let entries = json
        .as_array()
        .ok_or_else(|| decode_error("pip", "expected a JSON array"))?;

    let mut packages = Vec::new();
    for entry in entries {
        let Some(name) = entry.get("name").and_then(|name| name.as_str()) else {
            continue;
        };
        let version = entry
            .get("version")
            .and_then(|version| version.as_str())
            .unwrap_or("unknown");

        packages.push(RawPackage {
            name: name.to_string(),
            version: version.to_string(),
            description: None,
        });
    }

    Ok(packages)
}

/// `yarn global list --json`: newline-delimited JSON events; `info` events
/// carry `name@version` in their `data` field. Non-info and malformed
/// events are skipped.
pub(crate) fn decode_yarn_list(stdout: &str) -> Result<Vec<RawPackage>, DepscopeError> {
    let mut packages = Vec::new();

    for line in stdout.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Ok(event) = serde_json::from_str::<Value>(line) else {
            continue;
        };
        if event.get("type").and_then(|t| t.as_str()) != Some("info") {
            continue;
        }
        let Some(data) = event.get("data").and_then(|data| data.as_str()) else {
            continue;
        };

        // Split at the last '@' so scoped names like @vue/cli@5.0.0 survive
        let Some(at) = data.rfind('@').filter(|at| *at > 0) else {
            continue;
        };

        packages.push(RawPackage {
            name: data[..at].to_string(),
            version: data[at + 1..].to_string(),
            description: None,
        });
    }

    Ok(packages)
}

/// `brew info --json=v1 --installed`: a JSON array of formula records with
/// nested `installed` version entries
pub(crate) fn decode_brew_list(stdout: &str) -> Result<Vec<RawPackage>, DepscopeError> {
    let json: Value =
        serde_json::from_str(stdout).map_err(|e| decode_error("brew", e.to_string()))?;

    let entries = json
        .as_array()
        .ok_or_else(|| decode_error("brew", "expected a JSON array"))?;

    let mut packages = Vec::new();
    for entry in entries {
        let Some(name) = entry.get("name").and_then(|name| name.as_str()) else {
            continue;
        };
        let version = entry
            .get("installed")
            .and_then(|installed| installed.as_array())
            .and_then(|installed| installed.first())
            .and_then(|record| record.get("version"))
            .and_then(|version| version.as_str())
            .unwrap_or("unknown");
        let description = entry
            .get("desc")
            .and_then(|desc| desc.as_str())
            .map(String::from);

        packages.push(RawPackage {
            name: name.to_string(),
            version: version.to_string(),
            description,
        });
    }

    Ok(packages)
}
