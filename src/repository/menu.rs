use std::collections::HashMap;

use diesel::dsl::{exists, select};
use diesel::prelude::*;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::domain::category::NewCategory as DomainNewCategory;
use crate::domain::menu::{MenuInitOutcome, SeedCategory};
use crate::domain::product::NewProduct as DomainNewProduct;
use crate::domain::subcategory::NewSubcategory as DomainNewSubcategory;
use crate::models::category::{Category as DbCategory, NewCategory as DbNewCategory};
use crate::models::product::NewProduct as DbNewProduct;
use crate::models::subcategory::{NewSubcategory as DbNewSubcategory, Subcategory as DbSubcategory};
use crate::repository::{DieselRepository, MenuWriter};
use crate::schema::{categories, products, subcategories};

impl MenuWriter for DieselRepository {
    fn seed_menu(
        &self,
        hub_id: i32,
        currency: &str,
        seed: &[SeedCategory],
    ) -> RepositoryResult<MenuInitOutcome> {
        let mut conn = self.conn()?;

        conn.transaction::<MenuInitOutcome, RepositoryError, _>(|conn| {
            let has_categories: bool = select(exists(
                categories::table.filter(categories::hub_id.eq(hub_id)),
            ))
            .get_result(conn)?;
            let has_products: bool =
                select(exists(products::table.filter(products::hub_id.eq(hub_id))))
                    .get_result(conn)?;

            if has_categories || has_products {
                return Ok(MenuInitOutcome {
                    already_initialized: true,
                    ..MenuInitOutcome::default()
                });
            }

            let mut outcome = MenuInitOutcome::default();

            for (category_order, seed_category) in seed.iter().enumerate() {
                let new_category = DomainNewCategory::new(hub_id, seed_category.name)
                    .with_icon(seed_category.icon)
                    .with_sort_order(category_order as i32);
                let category = diesel::insert_into(categories::table)
                    .values(&DbNewCategory::from(&new_category))
                    .get_result::<DbCategory>(conn)?;
                outcome.categories_created += 1;

                let mut subcategory_ids = HashMap::new();
                for (sub_order, (name, icon)) in seed_category.subcategories.iter().enumerate() {
                    let new_subcategory = DomainNewSubcategory::new(hub_id, category.id, *name)
                        .with_icon(*icon)
                        .with_sort_order(sub_order as i32);
                    let subcategory = diesel::insert_into(subcategories::table)
                        .values(&DbNewSubcategory::from(&new_subcategory))
                        .get_result::<DbSubcategory>(conn)?;
                    subcategory_ids.insert(*name, subcategory.id);
                    outcome.subcategories_created += 1;
                }

                for seed_product in seed_category.products {
                    let mut new_product = DomainNewProduct::new(
                        hub_id,
                        seed_product.name,
                        seed_product.price_cents,
                        currency,
                    )
                    .with_category_id(category.id)
                    .with_icon(seed_product.icon)
                    .with_description(seed_product.description);

                    if let Some(subcategory_id) = seed_product
                        .subcategory
                        .and_then(|name| subcategory_ids.get(name))
                    {
                        new_product = new_product.with_subcategory_id(*subcategory_id);
                    }

                    diesel::insert_into(products::table)
                        .values(&DbNewProduct::from(&new_product))
                        .execute(conn)?;
                    outcome.products_created += 1;
                }
            }

            Ok(outcome)
        })
    }
}
