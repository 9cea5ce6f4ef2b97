use crate::api::inventory_management::models::{DeletedOut, IdsBody};
use crate::db::DbConn;
use crate::error::ErrorResponse;
use crate::service::{inventory, parse_ids, Actor};
use rocket::serde::json::Json;

#[delete("/inventories", data = "<body>")]
pub(crate) async fn delete_inventories(
    actor: Actor,
    body: Json<IdsBody>,
    conn: DbConn,
) -> Result<Json<DeletedOut>, ErrorResponse> {
    let ids = parse_ids(&body.ids)?;
    let deleted = conn
        .run(move |c| inventory::delete_inventories(c, &actor, &ids))
        .await?;

    Ok(Json(DeletedOut { deleted }))
}
