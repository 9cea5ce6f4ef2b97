use crate::api::inventory_management::models::{DeletedOut, IdsBody};
use crate::db::DbConn;
use crate::error::ErrorResponse;
use crate::service::{items, parse_ids, Actor};
use rocket::serde::json::Json;

#[delete("/inventories/<iid>/items", data = "<body>")]
pub(crate) async fn delete_items(
    actor: Actor,
    iid: i32,
    body: Json<IdsBody>,
    conn: DbConn,
) -> Result<Json<DeletedOut>, ErrorResponse> {
    let ids = parse_ids(&body.ids)?;
    let deleted = conn
        .run(move |c| items::delete_items(c, iid, &actor, &ids))
        .await?;

    Ok(Json(DeletedOut { deleted }))
}
