//! Path-list manipulation for composing tool environments.
//!
//! Search paths (`PATH`, `PYTHONPATH`) are delimiter-separated strings whose
//! delimiter differs per platform. These helpers splice entries into such
//! lists without disturbing the existing entries, and update environment maps
//! under every variable-name variant a platform's shells consult.

use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// Platform path-list delimiter.
pub const DELIMITER: char = if cfg!(windows) { ';' } else { ':' };

/// Prepend `add` to a delimiter-separated path list.
///
/// An empty `add` is a path error; an empty base list yields `add` alone.
pub fn prepend_path(old_path: &str, add_path: &str) -> Result<String> {
    splice_path(old_path, add_path, true)
}

/// Append `add` to a delimiter-separated path list.
///
/// An empty `add` is a path error; an empty base list yields `add` alone.
pub fn append_path(old_path: &str, add_path: &str) -> Result<String> {
    splice_path(old_path, add_path, false)
}

fn splice_path(old_path: &str, add_path: &str, prepend: bool) -> Result<String> {
    if add_path.is_empty() {
        return Err(Error::Path {
            message: "cannot add an empty path to a path list".to_string(),
        });
    }
    if old_path.is_empty() {
        return Ok(add_path.to_string());
    }
    let mut parts: Vec<&str> = old_path.split(DELIMITER).collect();
    if prepend {
        parts.insert(0, add_path);
    } else {
        parts.push(add_path);
    }
    Ok(parts.join(&DELIMITER.to_string()))
}

/// Splice a path into the search-path variables of an environment map.
///
/// cmd.exe consults `Path` while other shells consult `PATH`, so both
/// spellings are updated when each is already present.
pub fn add_path_to_env(
    env: &mut BTreeMap<String, String>,
    add_path: &str,
    prepend: bool,
) -> Result<()> {
    for key in ["Path", "PATH"] {
        if let Some(old) = env.get(key) {
            let new = if prepend {
                prepend_path(old, add_path)?
            } else {
                append_path(old, add_path)?
            };
            env.insert(key.to_string(), new);
        }
    }
    Ok(())
}

/// Append a path to the secondary-interpreter search path, creating the
/// variable when unset.
pub fn add_python_path_to_env(env: &mut BTreeMap<String, String>, add_path: &str) -> Result<()> {
    let old = env.get("PYTHONPATH").cloned().unwrap_or_default();
    env.insert("PYTHONPATH".to_string(), append_path(&old, add_path)?);
    Ok(())
}
