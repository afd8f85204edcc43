//! Product template business logic - Template writes that regenerate product works.
//!
//! Writing a template that sets its type to `service` or touches one of its
//! `analytic_account_<root id>` fields regenerates the works of every product of that
//! template once the write has been validated.

use crate::{
    core::{account, context::Context, product},
    entities::{
        ProductTemplate, ProductType, TemplateAnalyticAccount, product_template,
        template_analytic_account,
    },
    errors::{Error, Result},
};
use sea_orm::{Set, TransactionTrait, prelude::*};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Prefix of the per-root analytic account fields of a template.
pub const ANALYTIC_ACCOUNT_PREFIX: &str = "analytic_account_";

/// Retrieves a template by id, failing if it does not exist.
pub async fn get_template<C>(db: &C, template_id: i64) -> Result<product_template::Model>
where
    C: ConnectionTrait,
{
    ProductTemplate::find_by_id(template_id)
        .one(db)
        .await?
        .ok_or(Error::TemplateNotFound { id: template_id })
}

/// Creates a product template.
///
/// # Errors
/// Returns an error if the name is empty or the insert fails.
pub async fn create_template<C>(
    db: &C,
    name: String,
    product_type: ProductType,
) -> Result<product_template::Model>
where
    C: ConnectionTrait,
{
    if name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Template name cannot be empty".to_string(),
        });
    }

    let template = product_template::ActiveModel {
        name: Set(name.trim().to_string()),
        product_type: Set(product_type),
        active: Set(true),
        ..Default::default()
    };
    template.insert(db).await.map_err(Into::into)
}

/// Field values written to templates by [`write_templates`]. Unset fields are left
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateValues {
    /// New name
    pub name: Option<String>,
    /// New product type
    pub product_type: Option<ProductType>,
    /// Analytic account selection per root id; `None` clears the root's selection.
    /// Each entry is the field `analytic_account_<root id>`.
    pub analytic_accounts: BTreeMap<i64, Option<i64>>,
}

impl TemplateValues {
    /// Names of the fields these values touch.
    #[must_use]
    pub fn field_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        if self.name.is_some() {
            names.push("name".to_string());
        }
        if self.product_type.is_some() {
            names.push("type".to_string());
        }
        names.extend(
            self.analytic_accounts
                .keys()
                .map(|root| format!("{ANALYTIC_ACCOUNT_PREFIX}{root}")),
        );
        names
    }

    /// Whether writing these values must regenerate product works: the type is set to
    /// `service` or an analytic account field is touched.
    #[must_use]
    pub fn triggers_work(&self) -> bool {
        self.product_type == Some(ProductType::Service)
            || self
                .field_names()
                .iter()
                .any(|f| f.starts_with(ANALYTIC_ACCOUNT_PREFIX))
    }
}

async fn set_analytic_account<C>(
    db: &C,
    template_id: i64,
    root_id: i64,
    account_id: Option<i64>,
) -> Result<()>
where
    C: ConnectionTrait,
{
    let root = account::get_account(db, root_id).await?;
    if root.parent_id.is_some() {
        return Err(Error::Validation {
            message: format!("Analytic account \"{}\" is not a root", root.name),
        });
    }

    TemplateAnalyticAccount::delete_many()
        .filter(template_analytic_account::Column::TemplateId.eq(template_id))
        .filter(template_analytic_account::Column::RootId.eq(root_id))
        .exec(db)
        .await?;

    let Some(account_id) = account_id else {
        return Ok(());
    };
    let selected = account::get_account(db, account_id).await?;
    if account::root_of(db, &selected).await?.id != root_id {
        return Err(Error::AccountOutsideRoot {
            account: selected.name,
            root: root_id,
        });
    }

    let selection = template_analytic_account::ActiveModel {
        template_id: Set(template_id),
        root_id: Set(root_id),
        account_id: Set(account_id),
        ..Default::default()
    };
    selection.insert(db).await?;
    Ok(())
}

async fn apply_values<C>(db: &C, template_id: i64, values: &TemplateValues) -> Result<()>
where
    C: ConnectionTrait,
{
    let mut template: product_template::ActiveModel = get_template(db, template_id).await?.into();
    if let Some(name) = &values.name {
        if name.trim().is_empty() {
            return Err(Error::Validation {
                message: "Template name cannot be empty".to_string(),
            });
        }
        template.name = Set(name.trim().to_string());
    }
    if let Some(product_type) = values.product_type {
        template.product_type = Set(product_type);
    }
    template.update(db).await?;

    for (&root_id, &account_id) in &values.analytic_accounts {
        set_analytic_account(db, template_id, root_id, account_id).await?;
    }
    Ok(())
}

/// Validates templates: every product of every template must keep its works
/// consistent with its eligibility.
pub async fn validate_templates<C>(db: &C, template_ids: &[i64]) -> Result<()>
where
    C: ConnectionTrait,
{
    for &template_id in template_ids {
        let product_ids: Vec<i64> = product::products_of_template(db, template_id)
            .await?
            .into_iter()
            .map(|p| p.id)
            .collect();
        product::validate_products(db, &product_ids).await?;
    }
    Ok(())
}

/// Writes batched template values.
///
/// Every written template is validated, then the works of every product of the
/// templates whose values trigger regeneration are created. The whole batch runs in
/// one transaction: any failure leaves the database untouched.
pub async fn write_templates(
    db: &DatabaseConnection,
    ctx: &Context,
    actions: Vec<(Vec<i64>, TemplateValues)>,
) -> Result<()> {
    let txn = db.begin().await?;

    let mut written = Vec::new();
    let mut regenerate = Vec::new();
    for (template_ids, values) in &actions {
        debug!(fields = ?values.field_names(), "writing templates");
        if values.triggers_work() {
            regenerate.extend(template_ids.iter().copied());
        }
        for &template_id in template_ids {
            apply_values(&txn, template_id, values).await?;
            written.push(template_id);
        }
    }

    validate_templates(&txn, &written).await?;

    regenerate.sort_unstable();
    regenerate.dedup();
    for template_id in regenerate {
        for product in product::products_of_template(&txn, template_id).await? {
            product::create_work(&txn, ctx, product.id).await?;
        }
    }

    txn.commit().await?;
    info!(count = written.len(), "templates written");
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::work;
    use crate::test_utils::*;

    fn set_type(product_type: ProductType) -> TemplateValues {
        TemplateValues {
            product_type: Some(product_type),
            ..TemplateValues::default()
        }
    }

    #[test]
    fn test_triggers_work() {
        assert!(set_type(ProductType::Service).triggers_work());
        assert!(!set_type(ProductType::Goods).triggers_work());
        assert!(
            !TemplateValues {
                name: Some("Renamed".to_string()),
                ..TemplateValues::default()
            }
            .triggers_work()
        );

        let values = TemplateValues {
            analytic_accounts: BTreeMap::from([(4, None)]),
            ..TemplateValues::default()
        };
        assert_eq!(values.field_names(), vec!["analytic_account_4".to_string()]);
        assert!(values.triggers_work());
    }

    #[tokio::test]
    async fn test_type_change_to_service_generates_works() -> Result<()> {
        let db = setup_test_db().await?;
        let setup = setup_component_with_accounts(&db).await?;
        set_test_template_type(&db, setup.component.template_id, ProductType::Goods).await?;
        create_test_kit_line(&db, setup.kit.id, setup.component.id).await?;
        assert!(work::works_of_product(&db, setup.component.id).await?.is_empty());

        write_templates(
            &db,
            &Context::default(),
            vec![(vec![setup.component.template_id], set_type(ProductType::Service))],
        )
        .await?;

        let works = work::works_of_product(&db, setup.component.id).await?;
        let names: Vec<&str> = works.iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names, vec!["Projects\\Internal\\Assembly", "Departments\\Assembly"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_analytic_account_change_generates_missing_works() -> Result<()> {
        let db = setup_test_db().await?;
        let setup = setup_eligible_component(&db).await?;
        let extra_root = create_test_account(&db, "Regions", None).await?;
        let north = create_test_account(&db, "North", Some(extra_root.id)).await?;

        write_templates(
            &db,
            &Context::new(Some(9)),
            vec![(
                vec![setup.component.template_id],
                TemplateValues {
                    analytic_accounts: BTreeMap::from([(extra_root.id, Some(north.id))]),
                    ..TemplateValues::default()
                },
            )],
        )
        .await?;

        let works = work::works_of_product(&db, setup.component.id).await?;
        assert_eq!(works.len(), 3);
        assert_eq!(works[2].name, "Regions\\North\\Assembly");
        assert_eq!(works[2].company_id, Some(9));
        Ok(())
    }

    #[tokio::test]
    async fn test_type_change_away_from_service_is_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        let setup = setup_eligible_component(&db).await?;

        let err = write_templates(
            &db,
            &Context::default(),
            vec![(vec![setup.component.template_id], set_type(ProductType::Goods))],
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::ProductWorkConsistency { ref name } if name == "Assembly"));

        // Rolled back
        let template = get_template(&db, setup.component.template_id).await?;
        assert_eq!(template.product_type, ProductType::Service);
        assert_eq!(work::works_of_product(&db, setup.component.id).await?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_rename_does_not_touch_works() -> Result<()> {
        let db = setup_test_db().await?;
        let setup = setup_eligible_component(&db).await?;

        write_templates(
            &db,
            &Context::default(),
            vec![(
                vec![setup.component.template_id],
                TemplateValues {
                    name: Some("Sub-assembly".to_string()),
                    ..TemplateValues::default()
                },
            )],
        )
        .await?;

        let template = get_template(&db, setup.component.template_id).await?;
        assert_eq!(template.name, "Sub-assembly");
        assert_eq!(work::works_of_product(&db, setup.component.id).await?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_account_must_descend_from_root() -> Result<()> {
        let db = setup_test_db().await?;
        let setup = setup_component_with_accounts(&db).await?;
        let other_root = create_test_account(&db, "Regions", None).await?;

        let result = write_templates(
            &db,
            &Context::default(),
            vec![(
                vec![setup.component.template_id],
                TemplateValues {
                    analytic_accounts: BTreeMap::from([(other_root.id, Some(setup.accounts[0].id))]),
                    ..TemplateValues::default()
                },
            )],
        )
        .await;
        assert!(matches!(result, Err(Error::AccountOutsideRoot { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_template_validation() -> Result<()> {
        let db = setup_test_db().await?;
        let result = create_template(&db, String::new(), ProductType::Goods).await;
        assert!(matches!(result, Err(Error::Validation { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_validate_templates() -> Result<()> {
        let db = setup_test_db().await?;
        let setup = setup_eligible_component(&db).await?;
        validate_templates(&db, &[setup.component.template_id]).await?;

        set_test_template_type(&db, setup.component.template_id, ProductType::Assets).await?;
        let result = validate_templates(&db, &[setup.component.template_id]).await;
        assert!(matches!(result, Err(Error::ProductWorkConsistency { .. })));
        Ok(())
    }
}
