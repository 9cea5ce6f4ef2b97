use crate::api::user_management::models::UserOut;
use crate::db::DbConn;
use crate::error::ErrorResponse;
use crate::service::{Actor, ServiceError};
use crate::store::Store;
use rocket::serde::json::Json;

#[get("/users/me")]
pub(crate) async fn me(actor: Actor, conn: DbConn) -> Result<Json<UserOut>, ErrorResponse> {
    let user = conn
        .run(move |c| c.find_user(actor.id))
        .await
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound("User not found"))?;

    Ok(Json(user.into()))
}
