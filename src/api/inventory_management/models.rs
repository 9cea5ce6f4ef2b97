use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::user_management::models::UserOut;
use crate::service::inventory::{InventoryDetails, InventoryOverview, InventorySummary};
use crate::store::models::{FieldConfig, Inventory, Tag, User};

pub(crate) fn tag_names(tags: Vec<Tag>) -> Vec<String> {
    tags.into_iter().map(|tag| tag.name).collect()
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct InventoryOut {
    #[serde(flatten)]
    pub inventory: Inventory,
    pub fields: Vec<FieldConfig>,
    pub tags: Vec<String>,
}

impl From<InventoryDetails> for InventoryOut {
    fn from(details: InventoryDetails) -> Self {
        InventoryOut {
            inventory: details.inventory,
            fields: details.fields,
            tags: tag_names(details.tags),
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct InventoryOverviewOut {
    #[serde(flatten)]
    pub details: InventoryOut,
    pub owner: Option<UserOut>,
    pub granted_user_ids: Vec<i32>,
}

impl From<InventoryOverview> for InventoryOverviewOut {
    fn from(overview: InventoryOverview) -> Self {
        InventoryOverviewOut {
            details: overview.details.into(),
            owner: overview.owner.map(UserOut::from),
            granted_user_ids: overview.granted_user_ids,
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummaryOut {
    #[serde(flatten)]
    pub inventory: Inventory,
    pub tags: Vec<String>,
}

impl From<InventorySummary> for InventorySummaryOut {
    fn from(summary: InventorySummary) -> Self {
        InventorySummaryOut {
            inventory: summary.inventory,
            tags: tag_names(summary.tags),
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UserAccessOut {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub has_access: bool,
}

impl From<(User, bool)> for UserAccessOut {
    fn from((user, has_access): (User, bool)) -> Self {
        UserAccessOut {
            id: user.id,
            username: user.username,
            email: user.email,
            has_access,
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct HasAccessOut {
    pub has_access: bool,
}

#[derive(Serialize, Debug)]
pub struct UpdatedOut {
    pub updated: usize,
}

#[derive(Serialize, Debug)]
pub struct DeletedOut {
    pub deleted: usize,
}

/// Body of the bulk delete endpoints. `ids` stays loose so a malformed list
/// is reported as a validation error rather than a parse failure.
#[derive(Deserialize, Debug)]
pub struct IdsBody {
    #[serde(default)]
    pub ids: Value,
}
