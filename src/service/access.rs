use diesel::QueryResult;

use super::Actor;
use crate::store::models::Inventory;
use crate::store::Store;

/// Owners and anyone on a public inventory may write; otherwise an explicit
/// grant is required. The grant table is only consulted for private
/// inventories the actor does not own.
pub fn has_write_access<S: Store>(
    store: &S,
    actor: &Actor,
    inventory: &Inventory,
) -> QueryResult<bool> {
    if actor.id == inventory.owner_id || inventory.is_public {
        return Ok(true);
    }

    store.grant_exists(inventory.id, actor.id)
}
