use crate::api::user_management::models::TokenClaims;
use crate::db::DbConn;
use crate::error::{ApiError, GuardMessage};
use crate::service::users::ensure_active;
use crate::service::Actor;
use crate::settings::Settings;
use crate::store::models::NewUser;
use crate::store::Store;
use rocket::http::Status;
use rocket::outcome::{try_outcome, IntoOutcome};
use rocket::request::{self, FromRequest, Outcome};
use rocket::{Request, State};

fn bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Resolves the caller from a Google ID token and mirrors them into `users`.
#[rocket::async_trait]
impl<'r> FromRequest<'r> for Actor {
    type Error = ApiError;

    async fn from_request(req: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        let token = try_outcome!(req
            .headers()
            .get_one("Authorization")
            .and_then(bearer_token)
            .map(str::to_string)
            .ok_or_else(|| ApiError::new("Login required"))
            .into_outcome(Status { code: 401 }));

        let settings = try_outcome!(req.guard::<&State<Settings>>().await.map_failure(|_| {
            (
                Status { code: 500 },
                ApiError::new("Couldn't get settings"),
            )
        }));

        let parser = jsonwebtoken_google::Parser::new(&settings.google_client_id);
        let claims = match parser.parse::<TokenClaims>(&token).await {
            Ok(claims) => claims,
            Err(_) => {
                log::warn!("rejected bearer token on {}", req.uri());
                req.local_cache(|| GuardMessage("Couldn't validate Google account"));
                return Outcome::Failure((
                    Status { code: 401 },
                    ApiError::new("Couldn't validate Google account"),
                ));
            }
        };

        let conn = try_outcome!(req.guard::<DbConn>().await.map_failure(|_| {
            (
                Status { code: 500 },
                ApiError::new("Couldn't get database connection"),
            )
        }));

        let new_user = NewUser {
            sub: claims.sub,
            username: claims.name,
            email: claims.email,
        };

        let user = try_outcome!(conn
            .run(move |c| c.upsert_user(&new_user))
            .await
            .map_err(|err| {
                log::error!("couldn't update user: {}", err);
                ApiError::new("Couldn't update user")
            })
            .into_outcome(Status { code: 500 }));

        if let Err(err) = ensure_active(&user) {
            log::warn!("blocked user {} refused", user.id);
            req.local_cache(|| GuardMessage("User blocked"));
            return Outcome::Failure((Status { code: 403 }, ApiError::new(err.to_string())));
        }

        Outcome::Success(Actor {
            id: user.id,
            email: user.email,
        })
    }
}
