use crate::db::DbConn;
use crate::error::ErrorResponse;
use crate::service::items;
use crate::store::models::Item;
use rocket::serde::json::Json;

#[get("/inventories/<iid>/items")]
pub(crate) async fn list_items(iid: i32, conn: DbConn) -> Result<Json<Vec<Item>>, ErrorResponse> {
    let item_list = conn.run(move |c| items::list_items(c, iid)).await?;

    Ok(Json(item_list))
}
