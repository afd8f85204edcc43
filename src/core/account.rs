//! Analytic account business logic - Account creation and the hierarchical full name.
//!
//! The full name of an account joins the names of all its ancestors, root first,
//! with a backslash. It is never stored: every call walks the parent chain again.

use crate::{
    entities::{AnalyticAccount, analytic_account},
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*};
use std::collections::HashSet;
use tracing::debug;

/// Separator between the segments of an account full name and of generated work names.
pub const NAME_SEPARATOR: &str = "\\";

/// Retrieves an analytic account by id, failing if it does not exist.
pub async fn get_account<C>(db: &C, account_id: i64) -> Result<analytic_account::Model>
where
    C: ConnectionTrait,
{
    AnalyticAccount::find_by_id(account_id)
        .one(db)
        .await?
        .ok_or(Error::AccountNotFound { id: account_id })
}

/// Creates an analytic account, optionally under a parent.
///
/// # Errors
/// Returns an error if:
/// - The name is empty or whitespace-only
/// - The parent does not exist
/// - The database insert operation fails
pub async fn create_account<C>(
    db: &C,
    name: String,
    code: Option<String>,
    parent_id: Option<i64>,
) -> Result<analytic_account::Model>
where
    C: ConnectionTrait,
{
    if name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Analytic account name cannot be empty".to_string(),
        });
    }

    if let Some(parent_id) = parent_id {
        get_account(db, parent_id).await?;
    }

    let account = analytic_account::ActiveModel {
        name: Set(name.trim().to_string()),
        code: Set(code),
        parent_id: Set(parent_id),
        active: Set(true),
        ..Default::default()
    };
    account.insert(db).await.map_err(Into::into)
}

/// Returns the chain from `account` up to its root, `account` first.
async fn ancestry<C>(db: &C, account: &analytic_account::Model) -> Result<Vec<analytic_account::Model>>
where
    C: ConnectionTrait,
{
    let mut seen = HashSet::from([account.id]);
    let mut chain = vec![account.clone()];
    let mut parent_id = account.parent_id;

    while let Some(id) = parent_id {
        if !seen.insert(id) {
            return Err(Error::RecursiveAccount {
                name: account.name.clone(),
            });
        }
        let parent = get_account(db, id).await?;
        parent_id = parent.parent_id;
        chain.push(parent);
    }

    Ok(chain)
}

/// Computes the full hierarchical name of an account: the parent's full name,
/// a backslash, then the account's own name. A root's full name is its name.
///
/// # Errors
/// Returns an error if an ancestor is missing or the parent chain loops.
pub async fn full_name<C>(db: &C, account: &analytic_account::Model) -> Result<String>
where
    C: ConnectionTrait,
{
    let names: Vec<String> = ancestry(db, account)
        .await?
        .into_iter()
        .rev()
        .map(|a| a.name)
        .collect();
    let full_name = names.join(NAME_SEPARATOR);
    debug!(account_id = account.id, %full_name, "computed account full name");
    Ok(full_name)
}

/// Returns the analytic root an account descends from (the account itself for a root).
pub async fn root_of<C>(db: &C, account: &analytic_account::Model) -> Result<analytic_account::Model>
where
    C: ConnectionTrait,
{
    ancestry(db, account)
        .await?
        .pop()
        .ok_or(Error::AccountNotFound { id: account.id })
}
