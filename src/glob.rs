//! Minimal glob matching.
//!
//! Supports `*` (any run of characters within one path component), `?` (one
//! character) and `**` as a whole component (zero or more directories).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Match a single path component against a pattern.
pub fn matches(pattern: &str, name: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let name: Vec<char> = name.chars().collect();

    let (mut p, mut n) = (0, 0);
    let mut star: Option<usize> = None;
    let mut resume = 0;

    while n < name.len() {
        if p < pattern.len() && (pattern[p] == '?' || pattern[p] == name[n]) {
            p += 1;
            n += 1;
        } else if p < pattern.len() && pattern[p] == '*' {
            star = Some(p);
            resume = n;
            p += 1;
        } else if let Some(s) = star {
            // Let the last star swallow one more character.
            p = s + 1;
            resume += 1;
            n = resume;
        } else {
            return false;
        }
    }

    pattern[p..].iter().all(|&c| c == '*')
}

/// Expand a `/`-separated pattern relative to `base`.
///
/// Returned paths are joined onto `base` and sorted. A missing `base`
/// yields no matches.
pub fn glob_dir(base: &Path, pattern: &str) -> io::Result<Vec<PathBuf>> {
    let parts: Vec<&str> = pattern
        .split('/')
        .filter(|p| !p.is_empty() && *p != ".")
        .collect();

    let mut found = Vec::new();
    if base.is_dir() {
        expand(base, &parts, &mut found)?;
    }
    found.sort();
    found.dedup();
    Ok(found)
}

fn expand(dir: &Path, parts: &[&str], found: &mut Vec<PathBuf>) -> io::Result<()> {
    let Some((head, rest)) = parts.split_first() else {
        return Ok(());
    };

    if *head == "**" {
        // Zero directories
        if rest.is_empty() {
            found.push(dir.to_path_buf());
        } else {
            expand(dir, rest, found)?;
        }
        // One or more
        for sub in subdirs(dir)? {
            expand(&sub, parts, found)?;
        }
        return Ok(());
    }

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if !matches(head, name) {
            continue;
        }

        let path = entry.path();
        if rest.is_empty() {
            found.push(path);
        } else if path.is_dir() {
            expand(&path, rest, found)?;
        }
    }

    Ok(())
}

fn subdirs(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            dirs.push(entry.path());
        }
    }
    Ok(dirs)
}
