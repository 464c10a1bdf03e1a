//! Keyframe and timeline fixtures listed in `fixtures/manifest.json`.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../../../fixtures/manifest.json"))
        .expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    keyframes: HashMap<String, String>,
    timelines: HashMap<String, Timeline>,
}

/// A timeline file plus the container its screen positions were authored in.
#[derive(Debug, Deserialize)]
struct Timeline {
    path: String,
    #[serde(default)]
    container: Option<[i32; 2]>,
}

fn entry<'a, T>(section: &'a HashMap<String, T>, name: &str) -> Result<&'a T> {
    section
        .get(name)
        .ok_or_else(|| anyhow!("no fixture named '{name}' in the manifest"))
}

fn read(rel: &str) -> Result<String> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../../fixtures")
        .join(rel);
    std::fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))
}

fn parse<T: DeserializeOwned>(rel: &str) -> Result<T> {
    serde_json::from_str(&read(rel)?).with_context(|| format!("parsing {rel}"))
}

/// Single keyframes, one JSON object per file.
pub mod keyframes {
    use super::*;

    /// Raw JSON text, for tests that pick the target type themselves.
    pub fn json(name: &str) -> Result<String> {
        read(entry(&MANIFEST.keyframes, name)?)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        parse(entry(&MANIFEST.keyframes, name)?)
    }
}

/// Ordered keyframe lists for one animated target.
pub mod timelines {
    use super::*;

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        parse(&entry(&MANIFEST.timelines, name)?.path)
    }

    /// `[width, height]` of the authoring container, if the manifest records one.
    pub fn container(name: &str) -> Result<Option<[i32; 2]>> {
        Ok(entry(&MANIFEST.timelines, name)?.container)
    }
}
