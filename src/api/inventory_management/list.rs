use crate::api::inventory_management::models::InventorySummaryOut;
use crate::db::DbConn;
use crate::error::ErrorResponse;
use crate::service::{inventory, Actor};
use crate::store::models::InventoryFilter;
use rocket::serde::json::Json;

async fn list(
    conn: DbConn,
    filter: InventoryFilter,
) -> Result<Json<Vec<InventorySummaryOut>>, ErrorResponse> {
    let summaries = conn
        .run(move |c| inventory::list_inventories(c, filter))
        .await?;

    Ok(Json(summaries.into_iter().map(Into::into).collect()))
}

#[get("/inventories/my")]
pub(crate) async fn my_inventories(
    actor: Actor,
    conn: DbConn,
) -> Result<Json<Vec<InventorySummaryOut>>, ErrorResponse> {
    list(conn, InventoryFilter::OwnedBy(actor.id)).await
}

#[get("/inventories/access-write")]
pub(crate) async fn shared_inventories(
    actor: Actor,
    conn: DbConn,
) -> Result<Json<Vec<InventorySummaryOut>>, ErrorResponse> {
    list(conn, InventoryFilter::SharedWith(actor.id)).await
}

#[get("/inventories/public")]
pub(crate) async fn public_inventories(
    actor: Actor,
    conn: DbConn,
) -> Result<Json<Vec<InventorySummaryOut>>, ErrorResponse> {
    list(conn, InventoryFilter::PublicExcept(actor.id)).await
}

#[get("/inventories/all")]
pub(crate) async fn all_inventories(
    conn: DbConn,
) -> Result<Json<Vec<InventorySummaryOut>>, ErrorResponse> {
    list(conn, InventoryFilter::All).await
}
