//! Service-date cache: person id → service-start date string.
//!
//! Deriving service dates means scanning the full history ledger, so the
//! mapping is persisted between passes and reused until the ledger is newer
//! than the cache. Rebuilds are wholesale, never an incremental merge, and
//! the written bytes are reproducible for identical inputs regardless of
//! row order.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::SystemTime;

use chrono::NaiveDate;

use crate::columns;
use crate::dates;
use crate::error::MusterError;
use crate::identity::person_id;
use crate::table::SourceTable;

/// Staleness predicate, pure in its inputs. An absent or unstattable cache
/// is stale; an unstattable source is not newer than anything; `force`
/// always rebuilds.
pub fn is_stale(
    source_modified: Option<SystemTime>,
    cache_modified: Option<SystemTime>,
    force: bool,
) -> bool {
    if force {
        return true;
    }
    match (source_modified, cache_modified) {
        (_, None) => true,
        (None, Some(_)) => false,
        (Some(source), Some(cache)) => source > cache,
    }
}

/// Load the cache, or rebuild it from the history rows when stale.
///
/// A cache file that statted fresh but cannot be read or parsed is fatal:
/// a partially usable cache is indistinguishable from systematic corruption.
pub fn load_or_rebuild(
    cache_path: &Path,
    source_modified: Option<SystemTime>,
    history: &SourceTable,
    force: bool,
) -> Result<BTreeMap<String, String>, MusterError> {
    let cache_modified = fs::metadata(cache_path).ok().and_then(|m| m.modified().ok());

    if !is_stale(source_modified, cache_modified, force) {
        let raw = fs::read_to_string(cache_path).map_err(|e| MusterError::CacheCorrupt {
            path: cache_path.display().to_string(),
            reason: e.to_string(),
        })?;
        return serde_json::from_str(&raw).map_err(|e| MusterError::CacheCorrupt {
            path: cache_path.display().to_string(),
            reason: e.to_string(),
        });
    }

    let dates = rebuild(history);
    persist(cache_path, &dates)?;
    Ok(dates)
}

/// Scan history rows into id → service-date. Duplicate ids resolve
/// deterministically: the row with the latest parseable date wins,
/// unparsable dates are used only when no parseable one exists for the id,
/// and ties keep the earliest row.
pub fn rebuild(history: &SourceTable) -> BTreeMap<String, String> {
    struct Candidate {
        text: String,
        parsed: Option<NaiveDate>,
    }

    let mut best: BTreeMap<String, Candidate> = BTreeMap::new();
    for row in history.rows() {
        let id = person_id(history.get(row, columns::PERSON_ID));
        let text = history.get(row, columns::SERVICE_DATE);
        if id.is_empty() || text.is_empty() {
            continue;
        }
        let parsed = dates::parse_flexible(text);
        let supersedes = match best.get(&id) {
            None => true,
            Some(current) => match (current.parsed, parsed) {
                (None, Some(_)) => true,
                (Some(held), Some(new)) => new > held,
                _ => false,
            },
        };
        if supersedes {
            best.insert(
                id,
                Candidate {
                    text: text.to_string(),
                    parsed,
                },
            );
        }
    }

    best.into_iter().map(|(id, c)| (id, c.text)).collect()
}

/// Write the full mapping, creating parent directories as needed. The file
/// is staged next to its destination and renamed into place so readers
/// never observe a half-written cache.
fn persist(cache_path: &Path, dates: &BTreeMap<String, String>) -> Result<(), MusterError> {
    let io_err = |e: std::io::Error| MusterError::Io(format!("{}: {e}", cache_path.display()));

    if let Some(parent) = cache_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
    }

    let json = serde_json::to_string_pretty(dates)
        .map_err(|e| MusterError::Io(format!("{}: {e}", cache_path.display())))?;

    let staged = cache_path.with_extension("json.tmp");
    fs::write(&staged, json).map_err(io_err)?;
    fs::rename(&staged, cache_path).map_err(io_err)?;
    Ok(())
}
