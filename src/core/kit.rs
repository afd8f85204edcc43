//! Kit line business logic - Cascades between kit lines and the works of their components.
//!
//! Creating a kit line generates the works of its component. Deleting one deletes the
//! component's works, provided none of them has logged hours. A kit line whose
//! component already has works cannot be moved to another component.

use crate::{
    core::{context::Context, product, work},
    entities::{KitLine, kit_line},
    errors::{Error, Result},
};
use sea_orm::{Set, TransactionTrait, prelude::*};
use std::collections::BTreeSet;
use tracing::{info, warn};

/// Payload of a kit line to be created.
#[derive(Debug, Clone, PartialEq)]
pub struct NewKitLine {
    /// Kit product
    pub kit_id: i64,
    /// Component product
    pub product_id: i64,
    /// Quantity of the component per kit
    pub quantity: f64,
    /// Optional ordering inside the kit
    pub sequence: Option<i32>,
}

/// Field values written to kit lines by [`write_kit_lines`]. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KitLineValues {
    /// New component product
    pub product_id: Option<i64>,
    /// New quantity
    pub quantity: Option<f64>,
    /// New sequence; `Some(None)` clears it
    pub sequence: Option<Option<i32>>,
}

/// Retrieves a kit line by id, failing if it does not exist.
pub async fn get_kit_line<C>(db: &C, line_id: i64) -> Result<kit_line::Model>
where
    C: ConnectionTrait,
{
    KitLine::find_by_id(line_id)
        .one(db)
        .await?
        .ok_or(Error::KitLineNotFound { id: line_id })
}

/// Display name of a kit line: the display name of its component.
pub async fn rec_name<C>(db: &C, line: &kit_line::Model) -> Result<String>
where
    C: ConnectionTrait,
{
    let component = product::get_product(db, line.product_id).await?;
    product::rec_name(db, &component).await
}

fn check_quantity(quantity: f64) -> Result<()> {
    if !quantity.is_finite() || quantity <= 0.0 {
        return Err(Error::InvalidQuantity { quantity });
    }
    Ok(())
}

/// Creates kit lines, then generates the works of each line's component.
///
/// # Errors
/// Returns an error if:
/// - A quantity is zero, negative or not finite
/// - The kit or the component does not exist
/// - A kit lists itself as component
/// - A database operation fails
///
/// Nothing is created when any line fails.
pub async fn create_kit_lines(
    db: &DatabaseConnection,
    ctx: &Context,
    vlist: Vec<NewKitLine>,
) -> Result<Vec<kit_line::Model>> {
    let txn = db.begin().await?;

    let mut lines = Vec::with_capacity(vlist.len());
    for values in vlist {
        check_quantity(values.quantity)?;
        if values.kit_id == values.product_id {
            return Err(Error::Validation {
                message: format!("Product {} cannot be a component of itself", values.kit_id),
            });
        }
        product::get_product(&txn, values.kit_id).await?;
        product::get_product(&txn, values.product_id).await?;

        let line = kit_line::ActiveModel {
            parent_id: Set(values.kit_id),
            product_id: Set(values.product_id),
            quantity: Set(values.quantity),
            sequence: Set(values.sequence),
            ..Default::default()
        };
        lines.push(line.insert(&txn).await?);
    }

    for line in &lines {
        product::create_work(&txn, ctx, line.product_id).await?;
    }

    txn.commit().await?;
    info!(count = lines.len(), "kit lines created");
    Ok(lines)
}

/// Deletes kit lines together with the works of their components.
///
/// Every work of every component is checked with [`work::check_delete`] first; a single
/// work with logged hours aborts the call and nothing is deleted.
pub async fn delete_kit_lines(db: &DatabaseConnection, line_ids: &[i64]) -> Result<()> {
    let txn = db.begin().await?;

    let mut works_to_delete = BTreeSet::new();
    for &line_id in line_ids {
        let line = get_kit_line(&txn, line_id).await?;
        for work in work::works_of_product(&txn, line.product_id).await? {
            work::check_delete(&txn, &work).await?;
            works_to_delete.insert(work.id);
        }
    }

    let works_deleted =
        work::delete_works_unchecked(&txn, works_to_delete.into_iter().collect()).await?;
    let lines_deleted = KitLine::delete_many()
        .filter(kit_line::Column::Id.is_in(line_ids.iter().copied()))
        .exec(&txn)
        .await?
        .rows_affected;

    txn.commit().await?;
    info!(lines_deleted, works_deleted, "kit lines deleted");
    Ok(())
}

/// Writes batched kit line values.
///
/// When values set a new component, every line they apply to must have a current
/// component without works. All lines are checked before anything is written.
///
/// # Errors
/// Returns [`Error::LineWithWork`] naming the first offending line.
pub async fn write_kit_lines(
    db: &DatabaseConnection,
    actions: Vec<(Vec<i64>, KitLineValues)>,
) -> Result<()> {
    let txn = db.begin().await?;

    for (line_ids, values) in &actions {
        if values.product_id.is_none() {
            continue;
        }
        for &line_id in line_ids {
            let line = get_kit_line(&txn, line_id).await?;
            if !work::works_of_product(&txn, line.product_id).await?.is_empty() {
                let name = rec_name(&txn, &line).await?;
                warn!(line_id, %name, "refusing to reassign component with works");
                return Err(Error::LineWithWork { name });
            }
        }
    }

    for (line_ids, values) in actions {
        if let Some(quantity) = values.quantity {
            check_quantity(quantity)?;
        }
        if let Some(product_id) = values.product_id {
            product::get_product(&txn, product_id).await?;
        }
        for line_id in line_ids {
            let line = get_kit_line(&txn, line_id).await?;
            if values.product_id == Some(line.parent_id) {
                return Err(Error::Validation {
                    message: format!("Product {} cannot be a component of itself", line.parent_id),
                });
            }
            let mut line: kit_line::ActiveModel = line.into();
            if let Some(product_id) = values.product_id {
                line.product_id = Set(product_id);
            }
            if let Some(quantity) = values.quantity {
                line.quantity = Set(quantity);
            }
            if let Some(sequence) = values.sequence {
                line.sequence = Set(sequence);
            }
            line.update(&txn).await?;
        }
    }

    txn.commit().await?;
    Ok(())
}
