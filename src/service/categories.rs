use diesel::QueryResult;

use crate::store::Store;

/// Creates `name` as a category unless it already exists. Blank names are
/// ignored.
pub fn ensure_category<S: Store>(store: &S, name: Option<&str>) -> QueryResult<()> {
    match name {
        Some(name) if !name.trim().is_empty() => store.ensure_category(name),
        _ => Ok(()),
    }
}

pub fn search_categories<S: Store>(store: &S, query: &str, limit: i64) -> QueryResult<Vec<String>> {
    store.search_categories(query.trim(), limit)
}
