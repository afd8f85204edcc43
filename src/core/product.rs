//! Product business logic - Work eligibility, work generation and consistency checks.
//!
//! A product is eligible for generated timesheet work when it is the component of at
//! least one kit line, its template selects analytic accounts and its type is
//! `service`. Eligible products get one work per selected analytic account. Products
//! that carry works must stay eligible; `validate_products` enforces that.

use crate::{
    core::{
        account::{self, NAME_SEPARATOR},
        context::Context,
        work::{self, NewWork},
    },
    entities::{
        AnalyticAccount, KitLine, Product, ProductTemplate, ProductType, TemplateAnalyticAccount,
        analytic_account, kit_line, product, product_template, template_analytic_account,
        timesheet_work,
    },
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, QuerySelect, Set, TransactionTrait, prelude::*};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Retrieves a product by id, failing if it does not exist.
pub async fn get_product<C>(db: &C, product_id: i64) -> Result<product::Model>
where
    C: ConnectionTrait,
{
    Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })
}

/// Creates a product variant of an existing template.
///
/// # Errors
/// Returns an error if the template does not exist or the insert fails.
pub async fn create_product<C>(
    db: &C,
    template_id: i64,
    code: Option<String>,
) -> Result<product::Model>
where
    C: ConnectionTrait,
{
    ProductTemplate::find_by_id(template_id)
        .one(db)
        .await?
        .ok_or(Error::TemplateNotFound { id: template_id })?;

    let product = product::ActiveModel {
        template_id: Set(template_id),
        code: Set(code.map(|c| c.trim().to_string()).filter(|c| !c.is_empty())),
        active: Set(true),
        ..Default::default()
    };
    product.insert(db).await.map_err(Into::into)
}

/// Retrieves the template a product is a variant of.
pub async fn template_of<C>(db: &C, product: &product::Model) -> Result<product_template::Model>
where
    C: ConnectionTrait,
{
    ProductTemplate::find_by_id(product.template_id)
        .one(db)
        .await?
        .ok_or(Error::TemplateNotFound {
            id: product.template_id,
        })
}

/// Retrieves all products of a template, ordered by id.
pub async fn products_of_template<C>(db: &C, template_id: i64) -> Result<Vec<product::Model>>
where
    C: ConnectionTrait,
{
    Product::find()
        .filter(product::Column::TemplateId.eq(template_id))
        .order_by_asc(product::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Display name of a product: `[code] name` when the variant has a code, else the
/// template name.
pub async fn rec_name<C>(db: &C, product: &product::Model) -> Result<String>
where
    C: ConnectionTrait,
{
    let template = template_of(db, product).await?;
    Ok(match &product.code {
        Some(code) => format!("[{code}] {}", template.name),
        None => template.name,
    })
}

/// Analytic accounts selected by the product's template, ordered by analytic root.
pub async fn analytic_accounts<C>(
    db: &C,
    product: &product::Model,
) -> Result<Vec<analytic_account::Model>>
where
    C: ConnectionTrait,
{
    let selections = TemplateAnalyticAccount::find()
        .filter(template_analytic_account::Column::TemplateId.eq(product.template_id))
        .order_by_asc(template_analytic_account::Column::RootId)
        .all(db)
        .await?;

    let mut accounts = Vec::with_capacity(selections.len());
    for selection in selections {
        let account = AnalyticAccount::find_by_id(selection.account_id)
            .one(db)
            .await?
            .ok_or(Error::AccountNotFound {
                id: selection.account_id,
            })?;
        accounts.push(account);
    }
    Ok(accounts)
}

/// Whether the product is the component of at least one kit line.
pub async fn kit_component<C>(db: &C, product_id: i64) -> Result<bool>
where
    C: ConnectionTrait,
{
    let line = KitLine::find()
        .filter(kit_line::Column::ProductId.eq(product_id))
        .limit(1)
        .one(db)
        .await?;
    Ok(line.is_some())
}

/// Whether the product is eligible for generated work: a kit component with analytic
/// accounts and of type `service`.
pub async fn check_create_work<C>(db: &C, product: &product::Model) -> Result<bool>
where
    C: ConnectionTrait,
{
    if !kit_component(db, product.id).await? {
        return Ok(false);
    }
    if analytic_accounts(db, product).await?.is_empty() {
        return Ok(false);
    }
    Ok(template_of(db, product).await?.product_type == ProductType::Service)
}

/// Builds one work payload per analytic account of the product.
///
/// Accounts that already carry a work for this product are skipped, so calling this
/// again on an unchanged product yields nothing.
pub async fn work_values<C>(db: &C, ctx: &Context, product: &product::Model) -> Result<Vec<NewWork>>
where
    C: ConnectionTrait,
{
    let template = template_of(db, product).await?;
    let existing: HashSet<i64> = work::works_of_product(db, product.id)
        .await?
        .into_iter()
        .filter_map(|w| w.account_id)
        .collect();

    let mut values = Vec::new();
    for account in analytic_accounts(db, product).await? {
        if existing.contains(&account.id) {
            continue;
        }
        let account_name = account::full_name(db, &account).await?;
        values.push(NewWork {
            name: format!("{account_name}{NAME_SEPARATOR}{}", template.name),
            company_id: ctx.company_id,
            timesheet_available: true,
            product_id: Some(product.id),
            account_id: Some(account.id),
        });
    }
    Ok(values)
}

/// Generates the timesheet works of a product. Does nothing unless the product is
/// eligible (see [`check_create_work`]).
///
/// # Returns
/// The works created by this call.
pub async fn create_work<C>(
    db: &C,
    ctx: &Context,
    product_id: i64,
) -> Result<Vec<timesheet_work::Model>>
where
    C: ConnectionTrait,
{
    let product = get_product(db, product_id).await?;
    if !check_create_work(db, &product).await? {
        debug!(product_id, "product not eligible for work");
        return Ok(Vec::new());
    }

    let values = work_values(db, ctx, &product).await?;
    if values.is_empty() {
        return Ok(Vec::new());
    }
    let works = work::create_works(db, values).await?;
    info!(product_id, count = works.len(), "generated timesheet works");
    Ok(works)
}

/// Checks that a product carrying works is still eligible for them.
///
/// # Errors
/// Returns [`Error::ProductWorkConsistency`] naming the product when it has works
/// but no longer satisfies [`check_create_work`].
pub async fn check_work_product_consistency<C>(db: &C, product: &product::Model) -> Result<()>
where
    C: ConnectionTrait,
{
    if work::works_of_product(db, product.id).await?.is_empty() {
        return Ok(());
    }
    if check_create_work(db, product).await? {
        return Ok(());
    }
    let name = rec_name(db, product).await?;
    warn!(product_id = product.id, %name, "product works disagree with eligibility");
    Err(Error::ProductWorkConsistency { name })
}

/// Runs [`check_work_product_consistency`] on every product, in order. The first
/// failure aborts the whole batch.
pub async fn validate_products<C>(db: &C, product_ids: &[i64]) -> Result<()>
where
    C: ConnectionTrait,
{
    for &product_id in product_ids {
        let product = get_product(db, product_id).await?;
        check_work_product_consistency(db, &product).await?;
    }
    Ok(())
}

/// Field values written to products by [`write_products`]. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductValues {
    /// New variant code; `Some(None)` clears it
    pub code: Option<Option<String>>,
    /// New active flag
    pub active: Option<bool>,
}

/// Writes batched product values, then validates every written product.
/// All-or-nothing: any failure leaves the database untouched.
pub async fn write_products(
    db: &DatabaseConnection,
    actions: Vec<(Vec<i64>, ProductValues)>,
) -> Result<()> {
    let txn = db.begin().await?;

    let mut written = Vec::new();
    for (product_ids, values) in actions {
        for product_id in product_ids {
            let mut product: product::ActiveModel = get_product(&txn, product_id).await?.into();
            if let Some(code) = &values.code {
                product.code = Set(code.clone());
            }
            if let Some(active) = values.active {
                product.active = Set(active);
            }
            product.update(&txn).await?;
            written.push(product_id);
        }
    }

    validate_products(&txn, &written).await?;
    txn.commit().await?;
    Ok(())
}

/// Lists every product whose works disagree with its eligibility.
///
/// Unlike [`validate_products`] this does not stop at the first offender.
pub async fn find_inconsistent_products(db: &DatabaseConnection) -> Result<Vec<product::Model>> {
    let products = Product::find()
        .order_by_asc(product::Column::Id)
        .all(db)
        .await?;

    let mut inconsistent = Vec::new();
    for product in products {
        match check_work_product_consistency(db, &product).await {
            Ok(()) => {}
            Err(Error::ProductWorkConsistency { .. }) => inconsistent.push(product),
            Err(e) => return Err(e),
        }
    }
    Ok(inconsistent)
}
