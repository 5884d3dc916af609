//! Sample pantry used by the demo commands.
//!
//! The CLI runs against a fresh in-memory engine; every invocation seeds
//! this dataset first so the demo flows (consume, prepare, low-stock)
//! have realistic stock to work with.

use larder_engine::{EngineResult, Larder};
use larder_types::Ingredient;

const PANTRY: &[(&str, f64, &str, &str, f64)] = &[
    ("beef patty", 50.0, "piece", "Meat", 10.0),
    ("burger bun", 60.0, "piece", "Bread", 15.0),
    ("lettuce", 1000.0, "g", "Vegetable", 200.0),
    ("tomato", 2000.0, "g", "Vegetable", 300.0),
    ("cheese", 1500.0, "g", "Dairy", 250.0),
    ("onion", 1000.0, "g", "Vegetable", 200.0),
    ("pizza dough", 30.0, "piece", "Bread", 10.0),
    ("tomato sauce", 2000.0, "ml", "Sauce", 500.0),
    ("pepperoni", 1000.0, "g", "Meat", 200.0),
    ("bread", 100.0, "slice", "Bread", 20.0),
    ("ham", 1000.0, "g", "Meat", 200.0),
    ("potatoes", 5000.0, "g", "Vegetable", 1000.0),
    ("oil", 3000.0, "ml", "Condiment", 500.0),
    ("salt", 1000.0, "g", "Spice", 200.0),
    ("pasta", 3000.0, "g", "Grain", 500.0),
    ("water", 10000.0, "ml", "Liquid", 2000.0),
    ("chicken", 3000.0, "g", "Meat", 500.0),
    ("spices", 500.0, "g", "Spice", 100.0),
    ("breadcrumbs", 1000.0, "g", "Bread", 200.0),
    ("flour", 2000.0, "g", "Baking", 500.0),
    ("sugar", 1500.0, "g", "Baking", 300.0),
    ("butter", 1000.0, "g", "Dairy", 200.0),
    ("eggs", 24.0, "piece", "Dairy", 6.0),
    ("syrup", 1000.0, "ml", "Condiment", 200.0),
    ("ice", 2000.0, "g", "Frozen", 500.0),
    ("pita bread", 30.0, "piece", "Bread", 10.0),
    ("garlic sauce", 500.0, "ml", "Sauce", 100.0),
    ("vegetables", 2000.0, "g", "Vegetable", 400.0),
    ("miscellaneous", 1000.0, "g", "Other", 200.0),
];

/// Seed the sample pantry and recipe book into a fresh engine.
pub fn seed(larder: &Larder) -> EngineResult<()> {
    for (name, quantity, unit, category, threshold) in PANTRY {
        larder.add_inventory_item(name, *quantity, unit, Some(category), Some(*threshold))?;
    }

    larder.add_recipe(
        "Classic Burger",
        vec![
            Ingredient::new("beef patty", 1.0, "piece"),
            Ingredient::new("burger bun", 1.0, "piece"),
            Ingredient::new("lettuce", 20.0, "g"),
            Ingredient::new("tomato", 30.0, "g"),
            Ingredient::new("cheese", 20.0, "g"),
            Ingredient::new("onion", 15.0, "g"),
        ],
        Some("Grill the beef patty, toast the bun, and assemble the burger with all ingredients."),
        Some("Burger"),
    )?;
    larder.add_recipe(
        "Pepperoni Pizza",
        vec![
            Ingredient::new("pizza dough", 1.0, "piece"),
            Ingredient::new("tomato sauce", 50.0, "ml"),
            Ingredient::new("cheese", 100.0, "g"),
            Ingredient::new("pepperoni", 50.0, "g"),
        ],
        Some("Roll out the dough, spread tomato sauce, sprinkle cheese, add pepperoni, and bake."),
        Some("Pizza"),
    )?;
    larder.add_recipe(
        "Ham and Cheese Sandwich",
        vec![
            Ingredient::new("bread", 2.0, "slice"),
            Ingredient::new("ham", 30.0, "g"),
            Ingredient::new("cheese", 20.0, "g"),
            Ingredient::new("lettuce", 10.0, "g"),
            Ingredient::new("tomato", 20.0, "g"),
        ],
        Some("Layer ham, cheese, lettuce, and tomato between bread slices."),
        Some("Sandwich"),
    )?;
    larder.add_recipe(
        "Chicken Nuggets",
        vec![
            Ingredient::new("chicken", 100.0, "g"),
            Ingredient::new("breadcrumbs", 30.0, "g"),
            Ingredient::new("oil", 20.0, "ml"),
            Ingredient::new("spices", 5.0, "g"),
        ],
        Some("Coat chicken pieces with breadcrumbs and spices, fry until golden."),
        Some("Chicken"),
    )?;
    larder.add_recipe(
        "Chocolate Cake",
        vec![
            Ingredient::new("flour", 100.0, "g"),
            Ingredient::new("sugar", 50.0, "g"),
            Ingredient::new("butter", 30.0, "g"),
            Ingredient::new("eggs", 1.0, "piece"),
        ],
        Some("Mix all ingredients, pour into a cake pan, and bake."),
        Some("Dessert"),
    )?;
    larder.add_recipe(
        "Fruit Smoothie",
        vec![
            Ingredient::new("water", 200.0, "ml"),
            Ingredient::new("syrup", 20.0, "ml"),
            Ingredient::new("ice", 50.0, "g"),
        ],
        Some("Blend all ingredients until smooth."),
        Some("Drink"),
    )?;
    larder.add_recipe(
        "Fried Chicken",
        vec![
            Ingredient::new("chicken", 150.0, "g"),
            Ingredient::new("flour", 50.0, "g"),
            Ingredient::new("oil", 100.0, "ml"),
            Ingredient::new("spices", 10.0, "g"),
        ],
        Some("Coat chicken in flour and spices, fry in hot oil until crispy."),
        Some("Chicken"),
    )?;
    larder.add_recipe(
        "French Fries",
        vec![
            Ingredient::new("potatoes", 150.0, "g"),
            Ingredient::new("oil", 30.0, "ml"),
            Ingredient::new("salt", 2.0, "g"),
        ],
        Some("Cut potatoes, fry in oil, season with salt."),
        Some("Side"),
    )?;

    Ok(())
}
