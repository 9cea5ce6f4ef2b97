use crate::api::inventory_management::models::{HasAccessOut, UpdatedOut, UserAccessOut};
use crate::db::DbConn;
use crate::error::ErrorResponse;
use crate::service::grants::{self, AccessChange};
use crate::service::Actor;
use rocket::serde::json::Json;

#[get("/inventories/<iid>/access/<uid>")]
pub(crate) async fn check_user_access(
    iid: i32,
    uid: i32,
    conn: DbConn,
) -> Result<Json<HasAccessOut>, ErrorResponse> {
    let has_access = conn
        .run(move |c| grants::check_user_access(c, iid, uid))
        .await?;

    Ok(Json(HasAccessOut { has_access }))
}

#[get("/inventories/<iid>/users-access")]
pub(crate) async fn users_with_access(
    actor: Actor,
    iid: i32,
    conn: DbConn,
) -> Result<Json<Vec<UserAccessOut>>, ErrorResponse> {
    let users = conn
        .run(move |c| grants::users_with_access(c, iid, &actor))
        .await?;

    Ok(Json(users.into_iter().map(Into::into).collect()))
}

#[post("/inventories/<iid>/users-access", data = "<changes>")]
pub(crate) async fn bulk_update_access(
    actor: Actor,
    iid: i32,
    changes: Json<Vec<AccessChange>>,
    conn: DbConn,
) -> Result<Json<UpdatedOut>, ErrorResponse> {
    let changes = changes.into_inner();
    let updated = conn
        .run(move |c| grants::bulk_update_access(c, iid, &actor, &changes))
        .await?;

    Ok(Json(UpdatedOut { updated }))
}
