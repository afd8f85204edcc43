//! Timesheet line business logic - Logging hours against works.
//!
//! Lines are what make a work undeletable, see [`crate::core::work::check_delete`].

use crate::{
    core::work,
    entities::{TimesheetLine, timesheet_line},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{debug, info};

/// Logs hours against a work.
///
/// # Errors
/// Returns an error if:
/// - The hours are zero, negative or not finite
/// - The work does not exist
/// - The work is not available for timesheets
/// - The database insert operation fails
pub async fn log_timesheet_line<C>(
    db: &C,
    work_id: i64,
    date: NaiveDate,
    hours: f64,
    description: Option<String>,
) -> Result<timesheet_line::Model>
where
    C: ConnectionTrait,
{
    if !hours.is_finite() || hours <= 0.0 {
        return Err(Error::InvalidHours { hours });
    }

    let work = work::get_work(db, work_id).await?;
    if !work.timesheet_available {
        return Err(Error::WorkNotAvailable {
            name: work::rec_name(db, &work).await?,
        });
    }

    let line = timesheet_line::ActiveModel {
        work_id: Set(work_id),
        date: Set(date),
        hours: Set(hours),
        description: Set(description),
        created_at: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    };
    let line = line.insert(db).await?;
    debug!(work_id, hours, "timesheet line logged");
    Ok(line)
}

/// Retrieves the lines logged against a work, oldest day first.
pub async fn lines_for_work<C>(db: &C, work_id: i64) -> Result<Vec<timesheet_line::Model>>
where
    C: ConnectionTrait,
{
    TimesheetLine::find()
        .filter(timesheet_line::Column::WorkId.eq(work_id))
        .order_by_asc(timesheet_line::Column::Date)
        .order_by_asc(timesheet_line::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes timesheet lines.
pub async fn delete_timesheet_lines(db: &DatabaseConnection, line_ids: &[i64]) -> Result<()> {
    let txn = db.begin().await?;
    let result = TimesheetLine::delete_many()
        .filter(timesheet_line::Column::Id.is_in(line_ids.iter().copied()))
        .exec(&txn)
        .await?;
    txn.commit().await?;
    info!(deleted = result.rows_affected, "timesheet lines deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::{kit, work::NewWork};
    use crate::test_utils::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[tokio::test]
    async fn test_log_and_list_lines() -> Result<()> {
        let db = setup_test_db().await?;
        let setup = setup_eligible_component(&db).await?;
        let work_id = work::works_of_product(&db, setup.component.id).await?[0].id;

        log_timesheet_line(&db, work_id, day(5), 2.0, Some("wiring".to_string())).await?;
        log_timesheet_line(&db, work_id, day(4), 1.5, None).await?;

        let lines = lines_for_work(&db, work_id).await?;
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].date, day(4));
        assert_eq!(lines[1].hours, 2.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_log_validation() -> Result<()> {
        let db = setup_test_db().await?;
        let closed = work::create_works(
            &db,
            vec![NewWork {
                name: "Archived".to_string(),
                company_id: None,
                timesheet_available: false,
                product_id: None,
                account_id: None,
            }],
        )
        .await?;

        let result = log_timesheet_line(&db, closed[0].id, day(1), 0.0, None).await;
        assert!(matches!(result, Err(Error::InvalidHours { .. })));

        let result = log_timesheet_line(&db, closed[0].id, day(1), f64::INFINITY, None).await;
        assert!(matches!(result, Err(Error::InvalidHours { .. })));

        let result = log_timesheet_line(&db, 404, day(1), 1.0, None).await;
        assert!(matches!(result, Err(Error::WorkNotFound { id: 404 })));

        let result = log_timesheet_line(&db, closed[0].id, day(1), 1.0, None).await;
        assert!(matches!(result, Err(Error::WorkNotAvailable { ref name }) if name == "Archived"));
        Ok(())
    }

    #[tokio::test]
    async fn test_deleting_lines_unblocks_kit_line_deletion() -> Result<()> {
        let db = setup_test_db().await?;
        let setup = setup_eligible_component(&db).await?;
        let work_id = work::works_of_product(&db, setup.component.id).await?[0].id;
        let line = log_timesheet_line(&db, work_id, day(2), 4.0, None).await?;

        assert!(kit::delete_kit_lines(&db, &[setup.line.id]).await.is_err());

        delete_timesheet_lines(&db, &[line.id]).await?;
        kit::delete_kit_lines(&db, &[setup.line.id]).await?;
        assert!(work::works_of_product(&db, setup.component.id).await?.is_empty());
        Ok(())
    }
}
