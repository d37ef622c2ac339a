// SPDX-License-Identifier: MIT

//! Glob expansion of spec and helper file patterns.
//!
//! Patterns resolve relative to `base_dir/sub_dir` unless already
//! absolute. Matches accumulate into a caller-owned list that stays
//! duplicate-free and preserves first-seen order across calls, so a file
//! matched by several patterns (or several config entries) loads once.

use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use thiserror::Error;

/// Failure while walking the filesystem to expand a pattern.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("failed to read {} while expanding '{pattern}'", root.display())]
    Walk {
        root: PathBuf,
        pattern: String,
        #[source]
        source: ignore::Error,
    },
}

const GLOB_META: &[char] = &['*', '?', '[', ']', '{', '}'];

/// Expand `patterns` and append newly-seen matches to `accumulated`.
///
/// Matches within one pattern are sorted lexicographically; pattern order
/// is preserved across patterns. A pattern matching nothing contributes
/// nothing, and a malformed pattern is skipped with a warning rather than
/// failing the run.
pub fn resolve_into(
    accumulated: &mut Vec<PathBuf>,
    patterns: &[String],
    base_dir: &Path,
    sub_dir: &str,
) -> Result<(), ResolveError> {
    for pattern in patterns {
        let full = join_pattern(pattern, base_dir, sub_dir);
        append_matches(accumulated, &full)?;
    }
    Ok(())
}

fn join_pattern(pattern: &str, base_dir: &Path, sub_dir: &str) -> PathBuf {
    if Path::new(pattern).is_absolute() {
        return PathBuf::from(pattern);
    }
    let mut full = base_dir.to_path_buf();
    if !sub_dir.is_empty() {
        full.push(sub_dir);
    }
    full.push(pattern);
    full
}

fn append_matches(accumulated: &mut Vec<PathBuf>, pattern: &Path) -> Result<(), ResolveError> {
    let text = pattern.to_string_lossy();
    if !text.contains(GLOB_META) {
        // Literal path: matches iff it names an existing file.
        if pattern.is_file() {
            push_unique(accumulated, pattern.to_path_buf());
        }
        return Ok(());
    }

    let Some(matcher) = build_matcher(&text) else {
        return Ok(());
    };

    let root = walk_root(&text);
    if !root.is_dir() {
        // Nothing under the literal prefix, so nothing can match.
        return Ok(());
    }

    let mut batch = Vec::new();
    for entry in walk(&root) {
        let entry = entry.map_err(|source| ResolveError::Walk {
            root: root.clone(),
            pattern: text.to_string(),
            source,
        })?;
        if entry.file_type().is_some_and(|ty| ty.is_file()) && matcher.is_match(entry.path()) {
            batch.push(entry.path().to_path_buf());
        }
    }
    batch.sort();
    for path in batch {
        push_unique(accumulated, path);
    }
    Ok(())
}

/// Compile a pattern, or skip it with a warning when malformed.
///
/// A single `*` never crosses a directory separator, while `dir/**/file`
/// must also match `dir/file`: `**` spans zero or more components in spec
/// patterns, so a collapsed variant of the pattern joins the set alongside
/// the original.
fn build_matcher(text: &str) -> Option<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    match compile(text) {
        Ok(glob) => builder.add(glob),
        Err(err) => {
            tracing::warn!("skipping malformed pattern '{}': {}", text, err);
            return None;
        }
    };
    let collapsed = text.replace("/**/", "/");
    if collapsed != text
        && let Ok(glob) = compile(&collapsed)
    {
        builder.add(glob);
    }
    Some(builder.build().unwrap_or_else(|_| GlobSet::empty()))
}

fn compile(text: &str) -> Result<globset::Glob, globset::Error> {
    GlobBuilder::new(text).literal_separator(true).build()
}

fn walk(root: &Path) -> ignore::Walk {
    // Spec globbing is plain filesystem matching: hidden files and
    // ignore-file semantics must not apply.
    WalkBuilder::new(root).standard_filters(false).build()
}

/// Longest literal directory prefix of a pattern, used as the walk root.
fn walk_root(pattern: &str) -> PathBuf {
    let meta = pattern.find(GLOB_META).unwrap_or(pattern.len());
    match pattern[..meta].rfind(std::path::MAIN_SEPARATOR) {
        Some(idx) if idx > 0 => PathBuf::from(&pattern[..idx]),
        Some(_) => PathBuf::from(std::path::MAIN_SEPARATOR_STR),
        None => PathBuf::from("."),
    }
}

fn push_unique(accumulated: &mut Vec<PathBuf>, path: PathBuf) {
    if !accumulated.contains(&path) {
        accumulated.push(path);
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
