// aggregate fragments into one changelog entry

use super::config::ScrivenerConfig;
use super::format::SectionMap;
use super::fragments::read_fragments;
use super::template::entry_title;
use crate::error::{Error, Result};
use chrono::NaiveDate;
use semver::Version;
use std::fs;
use std::path::{Path, PathBuf};

/// a rendered changelog entry and the fragments it consumed
#[derive(Debug, Clone)]
pub struct Collected {
    pub text: String,
    pub sections: SectionMap,
    pub fragments: Vec<PathBuf>,
}

/// concatenate paragraph lists per title, in the order given
pub fn combine_sections<I>(maps: I) -> SectionMap
where
    I: IntoIterator<Item = SectionMap>,
{
    let mut combined = SectionMap::new();
    for map in maps {
        combined.merge(map);
    }
    combined
}

/// configured categories first, then any other titles in first-seen order
///
/// sections without paragraphs are dropped.
pub fn order_sections(mut sections: SectionMap, categories: &[String]) -> SectionMap {
    let mut ordered = SectionMap::new();

    for category in categories {
        if let Some(paragraphs) = sections.remove(category)
            && !paragraphs.is_empty()
        {
            ordered.insert(category.clone(), paragraphs);
        }
    }
    for section in sections.into_sections() {
        if !section.paragraphs.is_empty() {
            ordered.insert(section.title, section.paragraphs);
        }
    }

    ordered
}

/// validate a version string, tolerating a leading `v`
pub fn parse_version(version: &str) -> Result<Version> {
    let trimmed = version.trim();
    let bare = trimmed.strip_prefix('v').unwrap_or(trimmed);
    Version::parse(bare).map_err(|e| Error::InvalidVersion {
        version: version.to_string(),
        source: e,
    })
}

/// read, merge and render every fragment of the project
pub fn collect(
    root: &Path,
    config: &ScrivenerConfig,
    version: Option<&str>,
    date: NaiveDate,
) -> Result<Collected> {
    let version = version.map(parse_version).transpose()?;
    let tools = config.format.tools();
    let fragments = read_fragments(root, config)?;

    let sections = order_sections(
        combine_sections(fragments.iter().map(|f| f.sections(tools.as_ref()))),
        &config.categories,
    );
    tracing::debug!(
        fragments = fragments.len(),
        sections = sections.len(),
        "combined fragments"
    );

    let version_text = version.as_ref().map(Version::to_string);
    let title = entry_title(config, version_text.as_deref(), date)?;

    let mut text = tools.format_header(&title);
    text.push_str(&tools.format_sections(&sections));

    Ok(Collected {
        text,
        sections,
        fragments: fragments.into_iter().map(|f| f.path).collect(),
    })
}

/// put `entry` into an existing changelog
///
/// the entry goes right after the first `.. <marker>` comment line, or at the
/// top when there is no such line.
pub fn insert_into_changelog(existing: &str, entry: &str, marker: &str) -> String {
    let mut offset = 0;
    for line in existing.split_inclusive('\n') {
        offset += line.len();
        let marker_line = line
            .trim_end()
            .strip_prefix("..")
            .is_some_and(|rest| rest.trim() == marker);
        if marker_line {
            let (head, tail) = existing.split_at(offset);
            let mut out = String::with_capacity(existing.len() + entry.len() + 1);
            out.push_str(head);
            if !head.ends_with('\n') {
                out.push('\n');
            }
            out.push_str(entry);
            out.push_str(tail);
            return out;
        }
    }

    let mut out = String::with_capacity(existing.len() + entry.len());
    out.push_str(entry.trim_start_matches('\n'));
    out.push_str(existing);
    out
}

/// write a collected entry into the changelog file, removing the fragments
/// unless `keep` is set
pub fn write_changelog(
    root: &Path,
    config: &ScrivenerConfig,
    collected: &Collected,
    keep: bool,
) -> Result<PathBuf> {
    let path = config.output_path(root);
    let existing = if path.exists() {
        fs::read_to_string(&path).map_err(|e| Error::FileReadError {
            path: path.clone(),
            source: e,
        })?
    } else {
        String::new()
    };

    let updated = insert_into_changelog(&existing, &collected.text, &config.insert_marker);
    fs::write(&path, updated).map_err(|e| Error::FileWriteError {
        path: path.clone(),
        source: e,
    })?;
    tracing::info!(path = %path.display(), "updated changelog");

    if !keep {
        for fragment in &collected.fragments {
            fs::remove_file(fragment).map_err(|e| Error::FileWriteError {
                path: fragment.clone(),
                source: e,
            })?;
            tracing::debug!(path = %fragment.display(), "removed fragment");
        }
    }

    Ok(path)
}
