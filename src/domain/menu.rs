use std::collections::HashMap;

use serde::Serialize;

use crate::domain::category::Category;
use crate::domain::product::Product;
use crate::domain::subcategory::Subcategory;

/// Orderable menu as shown on the POS screen and fed to the assistant.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Menu {
    pub categories: Vec<MenuCategory>,
    /// Products that are not filed under any category.
    pub uncategorized: Vec<Product>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MenuCategory {
    pub category: Category,
    pub subcategories: Vec<MenuSubcategory>,
    /// Products filed directly under the category.
    pub products: Vec<Product>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MenuSubcategory {
    pub subcategory: Subcategory,
    pub products: Vec<Product>,
}

impl Menu {
    /// Arrange flat catalog rows into the nested menu.
    ///
    /// Archived categories and subcategories are dropped together with their
    /// products, as are products that cannot currently be ordered. Empty
    /// sections are omitted.
    pub fn build(
        categories: Vec<Category>,
        subcategories: Vec<Subcategory>,
        products: Vec<Product>,
    ) -> Self {
        let mut by_subcategory: HashMap<i32, Vec<Product>> = HashMap::new();
        let mut by_category: HashMap<i32, Vec<Product>> = HashMap::new();
        let mut uncategorized = Vec::new();

        for product in products.into_iter().filter(Product::is_orderable) {
            match (product.category_id, product.subcategory_id) {
                (_, Some(subcategory_id)) => {
                    by_subcategory.entry(subcategory_id).or_default().push(product)
                }
                (Some(category_id), None) => {
                    by_category.entry(category_id).or_default().push(product)
                }
                (None, None) => uncategorized.push(product),
            }
        }

        let mut subcategories_by_category: HashMap<i32, Vec<Subcategory>> = HashMap::new();
        for subcategory in subcategories.into_iter().filter(|sub| !sub.is_archived) {
            subcategories_by_category
                .entry(subcategory.category_id)
                .or_default()
                .push(subcategory);
        }

        let mut categories: Vec<Category> = categories
            .into_iter()
            .filter(|category| !category.is_archived)
            .collect();
        categories.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then(a.name.cmp(&b.name)));

        let mut sections = Vec::with_capacity(categories.len());
        for category in categories {
            let mut subs = subcategories_by_category
                .remove(&category.id)
                .unwrap_or_default();
            subs.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then(a.name.cmp(&b.name)));

            let subcategories: Vec<MenuSubcategory> = subs
                .into_iter()
                .filter_map(|subcategory| {
                    let mut products = by_subcategory.remove(&subcategory.id)?;
                    sort_products(&mut products);
                    Some(MenuSubcategory {
                        subcategory,
                        products,
                    })
                })
                .collect();

            let mut products = by_category.remove(&category.id).unwrap_or_default();
            sort_products(&mut products);

            if subcategories.is_empty() && products.is_empty() {
                continue;
            }

            sections.push(MenuCategory {
                category,
                subcategories,
                products,
            });
        }

        sort_products(&mut uncategorized);

        Menu {
            categories: sections,
            uncategorized,
        }
    }

    /// Number of products listed anywhere on the menu.
    pub fn product_count(&self) -> usize {
        let nested: usize = self
            .categories
            .iter()
            .map(|section| {
                section.products.len()
                    + section
                        .subcategories
                        .iter()
                        .map(|sub| sub.products.len())
                        .sum::<usize>()
            })
            .sum();
        nested + self.uncategorized.len()
    }
}

fn sort_products(products: &mut [Product]) {
    products.sort_by(|a, b| a.name.cmp(&b.name));
}

/// Product shipped with the starter menu.
#[derive(Debug, Clone, Copy)]
pub struct SeedProduct {
    pub name: &'static str,
    pub icon: &'static str,
    pub price_cents: i64,
    pub description: &'static str,
    /// Subcategory name inside the parent seed category.
    pub subcategory: Option<&'static str>,
}

/// Category shipped with the starter menu.
#[derive(Debug, Clone, Copy)]
pub struct SeedCategory {
    pub name: &'static str,
    pub icon: &'static str,
    pub subcategories: &'static [(&'static str, &'static str)],
    pub products: &'static [SeedProduct],
}

/// Starter menu created for a hub with an empty catalog.
pub const STARTER_MENU: &[SeedCategory] = &[
    SeedCategory {
        name: "Starters",
        icon: "🥗",
        subcategories: &[("Salads", "🥬"), ("Soups", "🍲")],
        products: &[
            SeedProduct {
                name: "Caesar Salad",
                icon: "🥗",
                price_cents: 850,
                description: "Romaine, parmesan, croutons and Caesar dressing",
                subcategory: Some("Salads"),
            },
            SeedProduct {
                name: "Greek Salad",
                icon: "🫒",
                price_cents: 790,
                description: "Tomato, cucumber, feta and olives",
                subcategory: Some("Salads"),
            },
            SeedProduct {
                name: "Tomato Soup",
                icon: "🍅",
                price_cents: 650,
                description: "Roasted tomato soup with basil",
                subcategory: Some("Soups"),
            },
            SeedProduct {
                name: "Garlic Bread",
                icon: "🥖",
                price_cents: 450,
                description: "Toasted baguette with garlic butter",
                subcategory: None,
            },
        ],
    },
    SeedCategory {
        name: "Mains",
        icon: "🍽️",
        subcategories: &[("Grill", "🔥"), ("Pasta", "🍝")],
        products: &[
            SeedProduct {
                name: "Ribeye Steak",
                icon: "🥩",
                price_cents: 2450,
                description: "300 g ribeye with fries",
                subcategory: Some("Grill"),
            },
            SeedProduct {
                name: "Grilled Chicken",
                icon: "🍗",
                price_cents: 1450,
                description: "Chicken breast with seasonal vegetables",
                subcategory: Some("Grill"),
            },
            SeedProduct {
                name: "Spaghetti Carbonara",
                icon: "🍝",
                price_cents: 1290,
                description: "Guanciale, egg yolk and pecorino",
                subcategory: Some("Pasta"),
            },
        ],
    },
    SeedCategory {
        name: "Desserts",
        icon: "🍰",
        subcategories: &[],
        products: &[
            SeedProduct {
                name: "Cheesecake",
                icon: "🍰",
                price_cents: 690,
                description: "New York style cheesecake",
                subcategory: None,
            },
            SeedProduct {
                name: "Ice Cream",
                icon: "🍨",
                price_cents: 490,
                description: "Three scoops, ask for flavours",
                subcategory: None,
            },
        ],
    },
    SeedCategory {
        name: "Drinks",
        icon: "🥤",
        subcategories: &[("Hot Drinks", "☕"), ("Soft Drinks", "🧃")],
        products: &[
            SeedProduct {
                name: "Espresso",
                icon: "☕",
                price_cents: 250,
                description: "Single shot",
                subcategory: Some("Hot Drinks"),
            },
            SeedProduct {
                name: "Cappuccino",
                icon: "☕",
                price_cents: 350,
                description: "Espresso with steamed milk foam",
                subcategory: Some("Hot Drinks"),
            },
            SeedProduct {
                name: "Lemonade",
                icon: "🍋",
                price_cents: 390,
                description: "House-made lemonade",
                subcategory: Some("Soft Drinks"),
            },
            SeedProduct {
                name: "Sparkling Water",
                icon: "💧",
                price_cents: 250,
                description: "0.5 l bottle",
                subcategory: Some("Soft Drinks"),
            },
        ],
    },
];

/// Result of seeding the starter menu.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct MenuInitOutcome {
    /// `true` when the hub already had a catalog and nothing was created.
    pub already_initialized: bool,
    pub categories_created: usize,
    pub subcategories_created: usize,
    pub products_created: usize,
}
