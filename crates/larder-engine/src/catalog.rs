use std::collections::HashMap;

use larder_types::{DishCount, Ingredient};

/// Static mapping from dish kind to its fixed per-unit ingredient list.
///
/// The catalog is external configuration, not a store: it is consulted
/// read-only when turning detected dish counts into ingredient demand.
/// The default catalog carries the dish kinds the detection collaborator
/// is trained on.
#[derive(Clone, Debug)]
pub struct DishCatalog {
    dishes: HashMap<String, Vec<Ingredient>>,
}

impl DishCatalog {
    /// An empty catalog.
    pub fn empty() -> Self {
        Self {
            dishes: HashMap::new(),
        }
    }

    /// Register (or replace) the per-unit ingredient list of a dish kind.
    pub fn insert(&mut self, dish: impl Into<String>, ingredients: Vec<Ingredient>) {
        self.dishes.insert(dish.into(), ingredients);
    }

    /// Per-unit ingredients of one dish kind, if known.
    pub fn get(&self, dish: &str) -> Option<&[Ingredient]> {
        self.dishes.get(dish).map(Vec::as_slice)
    }

    pub fn contains(&self, dish: &str) -> bool {
        self.dishes.contains_key(dish)
    }

    pub fn len(&self) -> usize {
        self.dishes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dishes.is_empty()
    }

    /// Turn a batch of detected dish counts into one combined demand list.
    ///
    /// Each dish's per-unit ingredient quantities are scaled by its
    /// instance count, then entries sharing an ingredient name are summed
    /// (first-seen order and unit win; units are assumed consistent per
    /// name and are not converted). Unknown dish kinds contribute nothing.
    pub fn aggregate(&self, dishes: &[DishCount]) -> Vec<Ingredient> {
        let mut combined: Vec<Ingredient> = Vec::new();
        for dish in dishes {
            let Some(per_unit) = self.dishes.get(&dish.name) else {
                continue;
            };
            for ingredient in per_unit {
                let scaled = ingredient.quantity * f64::from(dish.count);
                match combined.iter_mut().find(|c| c.name == ingredient.name) {
                    Some(existing) => existing.quantity += scaled,
                    None => combined.push(Ingredient::new(&ingredient.name, scaled, &ingredient.unit)),
                }
            }
        }
        combined
    }
}

impl Default for DishCatalog {
    /// The dish kinds the detection model is trained on, with their
    /// per-unit ingredient requirements.
    fn default() -> Self {
        let mut catalog = Self::empty();
        catalog.insert(
            "burger",
            vec![
                Ingredient::new("beef patty", 1.0, "piece"),
                Ingredient::new("burger bun", 1.0, "piece"),
                Ingredient::new("lettuce", 20.0, "g"),
                Ingredient::new("tomato", 30.0, "g"),
                Ingredient::new("cheese", 20.0, "g"),
                Ingredient::new("onion", 15.0, "g"),
            ],
        );
        catalog.insert(
            "chicken nuggets",
            vec![
                Ingredient::new("chicken", 100.0, "g"),
                Ingredient::new("breadcrumbs", 30.0, "g"),
                Ingredient::new("oil", 20.0, "ml"),
                Ingredient::new("spices", 5.0, "g"),
            ],
        );
        catalog.insert(
            "dessert",
            vec![
                Ingredient::new("flour", 100.0, "g"),
                Ingredient::new("sugar", 50.0, "g"),
                Ingredient::new("butter", 30.0, "g"),
                Ingredient::new("eggs", 1.0, "piece"),
            ],
        );
        catalog.insert(
            "drink",
            vec![
                Ingredient::new("water", 200.0, "ml"),
                Ingredient::new("syrup", 20.0, "ml"),
                Ingredient::new("ice", 50.0, "g"),
            ],
        );
        catalog.insert(
            "fried chicken",
            vec![
                Ingredient::new("chicken", 150.0, "g"),
                Ingredient::new("flour", 50.0, "g"),
                Ingredient::new("oil", 100.0, "ml"),
                Ingredient::new("spices", 10.0, "g"),
            ],
        );
        catalog.insert(
            "fries",
            vec![
                Ingredient::new("potatoes", 150.0, "g"),
                Ingredient::new("oil", 30.0, "ml"),
                Ingredient::new("salt", 2.0, "g"),
            ],
        );
        catalog.insert("ice", vec![Ingredient::new("water", 100.0, "ml")]);
        catalog.insert("other", vec![Ingredient::new("miscellaneous", 100.0, "g")]);
        catalog.insert(
            "pasta",
            vec![
                Ingredient::new("pasta", 100.0, "g"),
                Ingredient::new("tomato sauce", 80.0, "ml"),
                Ingredient::new("cheese", 20.0, "g"),
            ],
        );
        catalog.insert(
            "pizza",
            vec![
                Ingredient::new("pizza dough", 1.0, "piece"),
                Ingredient::new("tomato sauce", 50.0, "ml"),
                Ingredient::new("cheese", 100.0, "g"),
                Ingredient::new("pepperoni", 50.0, "g"),
            ],
        );
        catalog.insert(
            "sandwich",
            vec![
                Ingredient::new("bread", 2.0, "slice"),
                Ingredient::new("ham", 30.0, "g"),
                Ingredient::new("cheese", 20.0, "g"),
                Ingredient::new("lettuce", 10.0, "g"),
                Ingredient::new("tomato", 20.0, "g"),
            ],
        );
        catalog.insert(
            "shawarma",
            vec![
                Ingredient::new("pita bread", 1.0, "piece"),
                Ingredient::new("chicken", 100.0, "g"),
                Ingredient::new("garlic sauce", 20.0, "ml"),
                Ingredient::new("vegetables", 50.0, "g"),
            ],
        );
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_covers_trained_dishes() {
        let catalog = DishCatalog::default();
        assert_eq!(catalog.len(), 12);
        assert!(catalog.contains("burger"));
        assert!(catalog.contains("shawarma"));
    }

    #[test]
    fn aggregate_scales_by_instance_count() {
        let catalog = DishCatalog::default();
        let demand = catalog.aggregate(&[DishCount::new("burger", 2)]);
        let cheese = demand.iter().find(|i| i.name == "cheese").unwrap();
        assert_eq!(cheese.quantity, 40.0);
        let patties = demand.iter().find(|i| i.name == "beef patty").unwrap();
        assert_eq!(patties.quantity, 2.0);
    }

    #[test]
    fn aggregate_combines_shared_ingredients_across_dishes() {
        let catalog = DishCatalog::default();
        // burger (20g cheese) + pizza (100g cheese) share cheese; fries
        // and burger do not overlap.
        let demand = catalog.aggregate(&[
            DishCount::new("burger", 1),
            DishCount::new("pizza", 1),
            DishCount::new("fries", 1),
        ]);
        let cheese = demand.iter().find(|i| i.name == "cheese").unwrap();
        assert_eq!(cheese.quantity, 120.0);
        assert_eq!(demand.iter().filter(|i| i.name == "cheese").count(), 1);
        assert!(demand.iter().any(|i| i.name == "potatoes"));
    }

    #[test]
    fn aggregate_preserves_first_seen_order() {
        let catalog = DishCatalog::default();
        let demand = catalog.aggregate(&[DishCount::new("fries", 1)]);
        let names: Vec<_> = demand.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["potatoes", "oil", "salt"]);
    }

    #[test]
    fn unknown_dish_contributes_nothing() {
        let catalog = DishCatalog::default();
        let demand = catalog.aggregate(&[DishCount::new("sushi", 3)]);
        assert!(demand.is_empty());
    }

    #[test]
    fn zero_count_contributes_zero_quantity() {
        let catalog = DishCatalog::default();
        let demand = catalog.aggregate(&[DishCount::new("fries", 0)]);
        assert!(demand.iter().all(|i| i.quantity == 0.0));
    }
}
