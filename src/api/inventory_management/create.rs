use crate::api::inventory_management::models::InventoryOut;
use crate::db::DbConn;
use crate::error::ErrorResponse;
use crate::service::inventory::{self, InventoryInput};
use crate::service::Actor;
use rocket::serde::json::Json;

#[post("/inventories", data = "<input>")]
pub(crate) async fn create_inventory(
    actor: Actor,
    input: Json<InventoryInput>,
    conn: DbConn,
) -> Result<Json<InventoryOut>, ErrorResponse> {
    let input = input.into_inner();
    let details = conn
        .run(move |c| inventory::create_inventory(c, &actor, input))
        .await?;

    Ok(Json(details.into()))
}
