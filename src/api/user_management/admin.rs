use crate::api::inventory_management::models::IdsBody;
use crate::api::user_management::models::{MessageOut, UserOut, UsersUpdateBody};
use crate::db::DbConn;
use crate::error::ErrorResponse;
use crate::service::{parse_ids, users, Actor};
use rocket::serde::json::Json;

#[get("/users")]
pub(crate) async fn get_users(
    actor: Actor,
    conn: DbConn,
) -> Result<Json<Vec<UserOut>>, ErrorResponse> {
    let user_list = conn.run(move |c| users::list_users(c, &actor)).await?;

    Ok(Json(user_list.into_iter().map(Into::into).collect()))
}

#[delete("/users", data = "<body>")]
pub(crate) async fn delete_users(
    actor: Actor,
    body: Json<IdsBody>,
    conn: DbConn,
) -> Result<Json<MessageOut>, ErrorResponse> {
    let ids = parse_ids(&body.ids)?;
    conn.run(move |c| users::delete_users(c, &actor, &ids)).await?;

    Ok(Json(MessageOut {
        message: "Deleted successfully",
    }))
}

#[patch("/users/update", data = "<body>")]
pub(crate) async fn update_users(
    actor: Actor,
    body: Json<UsersUpdateBody>,
    conn: DbConn,
) -> Result<Json<MessageOut>, ErrorResponse> {
    let body = body.into_inner();
    let ids = parse_ids(&body.ids)?;
    conn.run(move |c| users::update_users(c, &actor, &ids, body.status, body.role))
        .await?;

    Ok(Json(MessageOut {
        message: "Status updated successfully",
    }))
}
