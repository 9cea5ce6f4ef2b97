//! Tag resolution. Tags are global and unique by exact name; both entry
//! points lean on the store's unique index instead of failing when another
//! request creates the same name first.

use diesel::QueryResult;

use crate::store::models::Tag;
use crate::store::Store;

/// Drops blank names and repeats, keeping first-seen order.
fn distinct_names(names: &[String]) -> Vec<String> {
    let mut seen = Vec::with_capacity(names.len());
    for name in names {
        if !name.trim().is_empty() && !seen.contains(name) {
            seen.push(name.clone());
        }
    }
    seen
}

/// Looks up every name in one query and creates only the missing ones.
/// The result follows the order of `names`.
pub fn create_or_get_tags<S: Store>(store: &S, names: &[String]) -> QueryResult<Vec<Tag>> {
    let names = distinct_names(names);
    if names.is_empty() {
        return Ok(Vec::new());
    }

    let mut found = store.find_tags(&names)?;
    let missing = names
        .iter()
        .filter(|name| !found.iter().any(|tag| &tag.name == *name))
        .cloned()
        .collect::<Vec<_>>();

    if !missing.is_empty() {
        let created = store.insert_missing_tags(&missing)?;
        log::info!("created {} new tag(s)", created);
        found.extend(store.find_tags(&missing)?);
    }

    Ok(names
        .iter()
        .filter_map(|name| found.iter().find(|tag| &tag.name == name).cloned())
        .collect())
}

/// Resolves names one at a time. Used on the update path, where the calls
/// run inside the enclosing transaction. Names go in sorted order so
/// concurrent updates take the tag index locks in the same order.
pub fn upsert_tags<S: Store>(store: &S, names: &[String]) -> QueryResult<Vec<Tag>> {
    let mut names = distinct_names(names);
    names.sort();
    names
        .iter()
        .map(|name| store.upsert_tag(name))
        .collect()
}

pub fn search_tags<S: Store>(store: &S, query: &str, limit: i64) -> QueryResult<Vec<String>> {
    store.search_tags(query.trim(), limit)
}
