//! Timesheet work business logic - Display name, delete guard and name field states.

use crate::{
    core::{account, product},
    entities::{AnalyticAccount, TimesheetLine, TimesheetWork, timesheet_line, timesheet_work},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, QuerySelect, Set, TransactionTrait, prelude::*};
use tracing::{info, warn};

/// Payload of a work to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWork {
    /// Entered name
    pub name: String,
    /// Company the work belongs to
    pub company_id: Option<i64>,
    /// Whether hours can be logged against the work
    pub timesheet_available: bool,
    /// Product the work is generated for
    pub product_id: Option<i64>,
    /// Analytic account the work is generated for
    pub account_id: Option<i64>,
}

/// Retrieves a work by id, failing if it does not exist.
pub async fn get_work<C>(db: &C, work_id: i64) -> Result<timesheet_work::Model>
where
    C: ConnectionTrait,
{
    TimesheetWork::find_by_id(work_id)
        .one(db)
        .await?
        .ok_or(Error::WorkNotFound { id: work_id })
}

/// Retrieves the works attached to a product, ordered by id.
pub async fn works_of_product<C>(db: &C, product_id: i64) -> Result<Vec<timesheet_work::Model>>
where
    C: ConnectionTrait,
{
    TimesheetWork::find()
        .filter(timesheet_work::Column::ProductId.eq(product_id))
        .order_by_asc(timesheet_work::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Inserts works, returning them in payload order.
///
/// # Errors
/// Returns an error if a name is empty or the insert fails.
pub async fn create_works<C>(db: &C, vlist: Vec<NewWork>) -> Result<Vec<timesheet_work::Model>>
where
    C: ConnectionTrait,
{
    let mut works = Vec::with_capacity(vlist.len());
    for values in vlist {
        if values.name.trim().is_empty() {
            return Err(Error::Validation {
                message: "Work name cannot be empty".to_string(),
            });
        }
        let work = timesheet_work::ActiveModel {
            name: Set(values.name),
            company_id: Set(values.company_id),
            timesheet_available: Set(values.timesheet_available),
            product_id: Set(values.product_id),
            account_id: Set(values.account_id),
            ..Default::default()
        };
        works.push(work.insert(db).await?);
    }
    Ok(works)
}

/// Display name of a work.
///
/// A work linked to both a product and an account is named after them: the account
/// full name, a backslash, then the product display name. Otherwise the entered name.
pub async fn rec_name<C>(db: &C, work: &timesheet_work::Model) -> Result<String>
where
    C: ConnectionTrait,
{
    let (Some(product_id), Some(account_id)) = (work.product_id, work.account_id) else {
        return Ok(work.name.clone());
    };

    let account = AnalyticAccount::find_by_id(account_id)
        .one(db)
        .await?
        .ok_or(Error::AccountNotFound { id: account_id })?;
    let product = product::get_product(db, product_id).await?;

    Ok(format!(
        "{}{}{}",
        account::full_name(db, &account).await?,
        account::NAME_SEPARATOR,
        product::rec_name(db, &product).await?
    ))
}

/// Whether any timesheet line was logged against the work.
pub async fn has_timesheet_lines<C>(db: &C, work_id: i64) -> Result<bool>
where
    C: ConnectionTrait,
{
    let line = TimesheetLine::find()
        .filter(timesheet_line::Column::WorkId.eq(work_id))
        .limit(1)
        .one(db)
        .await?;
    Ok(line.is_some())
}

/// Delete guard: a product work with logged timesheet lines cannot be deleted.
///
/// # Errors
/// Returns [`Error::WorkWithLines`] naming the work.
pub async fn check_delete<C>(db: &C, work: &timesheet_work::Model) -> Result<()>
where
    C: ConnectionTrait,
{
    if work.product_id.is_some() && has_timesheet_lines(db, work.id).await? {
        let name = rec_name(db, work).await?;
        warn!(work_id = work.id, %name, "refusing to delete work with timesheet lines");
        return Err(Error::WorkWithLines { name });
    }
    Ok(())
}

/// Deletes works in bulk without running the guard. Callers run [`check_delete`] first.
pub(crate) async fn delete_works_unchecked<C>(db: &C, work_ids: Vec<i64>) -> Result<u64>
where
    C: ConnectionTrait,
{
    if work_ids.is_empty() {
        return Ok(0);
    }
    let result = TimesheetWork::delete_many()
        .filter(timesheet_work::Column::Id.is_in(work_ids))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// Deletes works, running the delete guard on each first. Nothing is deleted if any
/// guard fails.
pub async fn delete_works(db: &DatabaseConnection, work_ids: &[i64]) -> Result<()> {
    let txn = db.begin().await?;

    for &work_id in work_ids {
        let work = get_work(&txn, work_id).await?;
        check_delete(&txn, &work).await?;
    }
    let deleted = delete_works_unchecked(&txn, work_ids.to_vec()).await?;

    txn.commit().await?;
    info!(deleted, "deleted timesheet works");
    Ok(())
}

/// Client-side states of a form field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldStates {
    /// The field cannot be edited
    pub readonly: bool,
    /// The field is not shown
    pub invisible: bool,
}

/// States of the work `name` field. The name is derived once a product is set, so the
/// field is hidden then; a field that was already readonly is hidden as well.
#[must_use]
pub const fn name_states(work: &timesheet_work::Model, base: FieldStates) -> FieldStates {
    FieldStates {
        readonly: base.readonly,
        invisible: work.product_id.is_some() || base.readonly,
    }
}
