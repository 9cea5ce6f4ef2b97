use crate::db::DbConn;
use crate::error::ErrorResponse;
use crate::service::{categories, tags, ServiceError};
use crate::settings::Settings;
use rocket::serde::json::Json;
use rocket::State;

/// Tag names containing `query`, case-insensitively, in name order.
#[get("/tags?<query>")]
pub(crate) async fn search_tags(
    query: Option<String>,
    conn: DbConn,
    settings: &State<Settings>,
) -> Result<Json<Vec<String>>, ErrorResponse> {
    let limit = settings.tag_search_limit;
    let names = conn
        .run(move |c| tags::search_tags(c, query.as_deref().unwrap_or(""), limit))
        .await
        .map_err(ServiceError::from)?;

    Ok(Json(names))
}

#[get("/categories?<query>")]
pub(crate) async fn search_categories(
    query: Option<String>,
    conn: DbConn,
    settings: &State<Settings>,
) -> Result<Json<Vec<String>>, ErrorResponse> {
    let limit = settings.category_search_limit;
    let names = conn
        .run(move |c| categories::search_categories(c, query.as_deref().unwrap_or(""), limit))
        .await
        .map_err(ServiceError::from)?;

    Ok(Json(names))
}
