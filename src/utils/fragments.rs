// fragment files: one changelog entry per file, collected later

use super::config::ScrivenerConfig;
use super::format::{FormatTools, SectionMap};
use super::template::new_fragment_text;
use crate::error::{Error, Result};
use chrono::NaiveDateTime;
use std::fs;
use std::path::{Path, PathBuf};

/// a fragment file and its raw text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub path: PathBuf,
    pub content: String,
}

impl Fragment {
    pub fn new(path: PathBuf, content: String) -> Self {
        Self { path, content }
    }

    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::FileReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Self::new(path.to_path_buf(), content))
    }

    pub fn sections(&self, tools: &dyn FormatTools) -> SectionMap {
        tools.parse_text(&self.content)
    }
}

/// replace anything outside `[A-Za-z0-9_-]` with `_`
fn sanitize_slug(slug: &str) -> String {
    slug.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// file name for a fragment created at `now`
///
/// names start with a timestamp so that sorting by name is chronological.
pub fn fragment_file_name(now: NaiveDateTime, slug: Option<&str>, extension: &str) -> String {
    let stamp = now.format("%Y%m%d_%H%M%S");
    match slug.map(str::trim).filter(|s| !s.is_empty()) {
        Some(slug) => format!("{}_{}.{}", stamp, sanitize_slug(slug), extension),
        None => format!("{}.{}", stamp, extension),
    }
}

/// fragment files in `dir`, sorted by file name
///
/// a missing directory has no fragments.
pub fn discover_fragments<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        tracing::debug!(dir = %dir.display(), "fragment directory does not exist");
        return Ok(Vec::new());
    }

    let mut fragments = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }

        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.starts_with("README") {
            continue;
        }

        let matches_extension = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(extension));
        if matches_extension {
            fragments.push(path);
        }
    }

    fragments.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    tracing::debug!(count = fragments.len(), dir = %dir.display(), "discovered fragments");
    Ok(fragments)
}

/// read every fragment in the configured directory
pub fn read_fragments(root: &Path, config: &ScrivenerConfig) -> Result<Vec<Fragment>> {
    let tools = config.format.tools();
    discover_fragments(config.fragment_dir(root), tools.file_extension())?
        .into_iter()
        .map(Fragment::read)
        .collect()
}

/// write a new blank fragment and return its path
pub fn create_fragment(
    root: &Path,
    config: &ScrivenerConfig,
    now: NaiveDateTime,
    slug: Option<&str>,
) -> Result<PathBuf> {
    let tools = config.format.tools();
    let dir = config.fragment_dir(root);
    fs::create_dir_all(&dir).map_err(|e| Error::FileWriteError {
        path: dir.clone(),
        source: e,
    })?;

    let path = dir.join(fragment_file_name(now, slug, tools.file_extension()));
    if path.exists() {
        return Err(Error::FragmentExists { path });
    }

    let text = new_fragment_text(root, tools.as_ref(), config)?;
    fs::write(&path, text).map_err(|e| Error::FileWriteError {
        path: path.clone(),
        source: e,
    })?;

    tracing::info!(path = %path.display(), "created fragment");
    Ok(path)
}
