use serde::Deserialize;

use super::{Actor, ServiceError};
use crate::store::models::{Inventory, User};
use crate::store::Store;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessChange {
    pub user_id: i32,
    pub has_access: bool,
}

fn owned_inventory<S: Store>(
    store: &S,
    actor: &Actor,
    inventory_id: i32,
) -> Result<Inventory, ServiceError> {
    let inventory = store
        .find_inventory(inventory_id)?
        .ok_or(ServiceError::NotFound("Inventory not found"))?;

    if inventory.owner_id != actor.id {
        return Err(ServiceError::Forbidden("Only the owner can manage access"));
    }

    Ok(inventory)
}

pub fn check_user_access<S: Store>(
    store: &S,
    inventory_id: i32,
    user_id: i32,
) -> Result<bool, ServiceError> {
    Ok(store.grant_exists(inventory_id, user_id)?)
}

/// Every user other than the actor, flagged with whether they hold a grant.
pub fn users_with_access<S: Store>(
    store: &S,
    inventory_id: i32,
    actor: &Actor,
) -> Result<Vec<(User, bool)>, ServiceError> {
    store
        .find_inventory(inventory_id)?
        .ok_or(ServiceError::NotFound("Inventory not found"))?;

    let granted = store.granted_user_ids(inventory_id)?;
    Ok(store
        .users_except(actor.id)?
        .into_iter()
        .map(|user| {
            let has_access = granted.contains(&user.id);
            (user, has_access)
        })
        .collect())
}

/// Revokes and grants in one transaction. Returns how many entries were
/// submitted.
pub fn bulk_update_access<S: Store>(
    store: &S,
    inventory_id: i32,
    actor: &Actor,
    changes: &[AccessChange],
) -> Result<usize, ServiceError> {
    let user_ids = |has_access: bool| {
        changes
            .iter()
            .filter(|change| change.has_access == has_access)
            .map(|change| change.user_id)
            .collect::<Vec<i32>>()
    };
    let grant = user_ids(true);
    let revoke = user_ids(false);

    store.atomically(|| {
        owned_inventory(store, actor, inventory_id)?;

        if !revoke.is_empty() {
            store.revoke_access(inventory_id, &revoke)?;
        }
        if !grant.is_empty() {
            store.grant_access(inventory_id, &grant)?;
        }

        log::info!(
            "user {} updated access on inventory {}: {} granted, {} revoked",
            actor.id,
            inventory_id,
            grant.len(),
            revoke.len()
        );
        Ok(changes.len())
    })
}
