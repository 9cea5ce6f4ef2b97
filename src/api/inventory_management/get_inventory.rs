use crate::api::inventory_management::models::{tag_names, InventoryOverviewOut};
use crate::db::DbConn;
use crate::error::ErrorResponse;
use crate::service::inventory;
use crate::store::models::FieldConfig;
use rocket::serde::json::{Json, Value};

#[get("/inventories/<iid>")]
pub(crate) async fn get_inventory(
    iid: i32,
    conn: DbConn,
) -> Result<Json<InventoryOverviewOut>, ErrorResponse> {
    let overview = conn
        .run(move |c| inventory::get_inventory(c, iid))
        .await?;

    Ok(Json(overview.into()))
}

#[get("/inventories/<iid>/fields")]
pub(crate) async fn get_inventory_fields(
    iid: i32,
    conn: DbConn,
) -> Result<Json<Vec<FieldConfig>>, ErrorResponse> {
    let fields = conn
        .run(move |c| inventory::inventory_fields(c, iid))
        .await?;

    Ok(Json(fields))
}

#[get("/inventories/<iid>/tags")]
pub(crate) async fn get_inventory_tags(
    iid: i32,
    conn: DbConn,
) -> Result<Json<Vec<String>>, ErrorResponse> {
    let tags = conn.run(move |c| inventory::inventory_tags(c, iid)).await?;

    Ok(Json(tag_names(tags)))
}

#[get("/inventories/<iid>/custom-id-format")]
pub(crate) async fn get_custom_id_format(
    iid: i32,
    conn: DbConn,
) -> Result<Json<Option<Value>>, ErrorResponse> {
    let format = conn
        .run(move |c| inventory::custom_id_format(c, iid))
        .await?;

    Ok(Json(format))
}
