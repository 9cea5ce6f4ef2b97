use crate::db::DbConn;
use crate::error::ErrorResponse;
use crate::service::items::{self, ItemInput};
use crate::service::Actor;
use crate::store::models::Item;
use rocket::serde::json::Json;

#[post("/inventories/<iid>/items", data = "<input>")]
pub(crate) async fn create_item(
    actor: Actor,
    iid: i32,
    input: Json<ItemInput>,
    conn: DbConn,
) -> Result<Json<Item>, ErrorResponse> {
    let input = input.into_inner();
    let item = conn
        .run(move |c| items::create_item(c, iid, &actor, input))
        .await?;

    Ok(Json(item))
}
