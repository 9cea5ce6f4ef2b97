//! Domain operations. Every function takes the store explicitly and returns
//! a classified `ServiceError` that the HTTP layer maps to a status code.

pub(crate) mod access;
pub(crate) mod categories;
pub(crate) mod fields;
pub(crate) mod grants;
pub(crate) mod inventory;
pub(crate) mod items;
pub(crate) mod tags;
pub(crate) mod users;

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use serde_json::Value;
use thiserror::Error;

use crate::store::models::FieldConfig;

/// An authenticated caller, already resolved by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: i32,
    pub email: String,
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(&'static str),
    #[error("{0}")]
    Forbidden(&'static str),
    /// The submitted version is stale. Carries the stored state so the
    /// client can rebase without another fetch.
    #[error("Version conflict")]
    VersionConflict {
        current_version: i32,
        fields: Vec<FieldConfig>,
    },
    #[error("{0}")]
    Conflict(&'static str),
    #[error("{0}")]
    Validation(String),
    #[error("database error: {0}")]
    Database(#[from] DieselError),
}

pub(crate) fn is_unique_violation(err: &DieselError) -> bool {
    matches!(
        err,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    )
}

/// Accepts only a non-empty JSON array of integer ids.
pub fn parse_ids(ids: &Value) -> Result<Vec<i32>, ServiceError> {
    let list = ids
        .as_array()
        .filter(|list| !list.is_empty())
        .ok_or_else(|| ServiceError::Validation("No IDs provided".to_string()))?;

    list.iter()
        .map(|id| {
            id.as_i64()
                .and_then(|id| i32::try_from(id).ok())
                .ok_or_else(|| ServiceError::Validation(format!("Invalid ID: {}", id)))
        })
        .collect()
}
