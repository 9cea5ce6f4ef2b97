use crate::api::inventory_management::models::InventoryOut;
use crate::db::DbConn;
use crate::error::ErrorResponse;
use crate::service::inventory::{self, InventoryUpdate};
use crate::service::Actor;
use rocket::serde::json::Json;

/// Full replacement of an inventory's editable state. Stale `version`
/// answers 409 with the stored version and fields.
#[put("/inventories/<iid>", data = "<update>")]
pub(crate) async fn update_inventory(
    actor: Actor,
    iid: i32,
    update: Json<InventoryUpdate>,
    conn: DbConn,
) -> Result<Json<InventoryOut>, ErrorResponse> {
    let update = update.into_inner();
    let details = conn
        .run(move |c| inventory::update_inventory(c, iid, &actor, update))
        .await?;

    Ok(Json(details.into()))
}
