//! Local user profiles: the blocked-account gate and admin management of
//! status and role.

use serde::{Deserialize, Serialize};

use super::{Actor, ServiceError};
use crate::store::models::{User, UserChanges};
use crate::store::Store;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Blocked,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Blocked => "blocked",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Admin => "admin",
        }
    }
}

/// Refuses a resolved user whose profile is blocked.
pub fn ensure_active(user: &User) -> Result<(), ServiceError> {
    if user.status == UserStatus::Blocked.as_str() {
        return Err(ServiceError::Forbidden("User blocked"));
    }
    Ok(())
}

fn require_admin<S: Store>(store: &S, actor: &Actor) -> Result<(), ServiceError> {
    let user = store
        .find_user(actor.id)?
        .ok_or(ServiceError::NotFound("User not found"))?;

    if user.role != UserRole::Admin.as_str() {
        log::warn!("user {} denied user administration", actor.id);
        return Err(ServiceError::Forbidden("Admin access required"));
    }
    Ok(())
}

pub fn list_users<S: Store>(store: &S, actor: &Actor) -> Result<Vec<User>, ServiceError> {
    require_admin(store, actor)?;
    Ok(store.list_users()?)
}

/// Deletes the listed users together with their inventories and items.
pub fn delete_users<S: Store>(
    store: &S,
    actor: &Actor,
    user_ids: &[i32],
) -> Result<usize, ServiceError> {
    store.atomically(|| {
        require_admin(store, actor)?;
        let deleted = store.delete_users(user_ids)?;
        log::info!("user {} deleted {} user(s)", actor.id, deleted);
        Ok(deleted)
    })
}

/// Sets status and/or role on every listed user. Nothing given means nothing
/// to write.
pub fn update_users<S: Store>(
    store: &S,
    actor: &Actor,
    user_ids: &[i32],
    status: Option<UserStatus>,
    role: Option<UserRole>,
) -> Result<usize, ServiceError> {
    require_admin(store, actor)?;
    if status.is_none() && role.is_none() {
        return Ok(0);
    }

    let changes = UserChanges {
        status: status.map(|status| status.as_str().to_string()),
        role: role.map(|role| role.as_str().to_string()),
    };
    let updated = store.update_users(user_ids, &changes)?;
    log::info!(
        "user {} updated {} user(s): status {:?}, role {:?}",
        actor.id,
        updated,
        changes.status,
        changes.role
    );
    Ok(updated)
}
