//! Bundled sample recipes.
//!
//! Three curated dishes ship with the client so the catalog has content on
//! first launch and stays non-empty when the remote service is unreachable.
//! They are plain local records that never correlate with a remote row.
//! Nobody owns them and none carries a price, so they stay out of a user's
//! submissions and a price-bounded filter never matches them.

use normalize::{RawIngredient, RawLocalRecipe};

/// The bundled starter recipes, in display order.
pub fn sample_recipes() -> Vec<RawLocalRecipe> {
    vec![
        RawLocalRecipe {
            id: 1,
            name: Some("Adobo sa Gata".into()),
            description: Some(
                "Rich coconut adobo with tender pork belly and savory sauce.".into(),
            ),
            image: Some(unsplash("photo-1544025162-d76694265947")),
            ingredients: vec![
                detailed("Pork belly", "1 kg"),
                detailed("Coconut milk", "400 ml"),
            ],
            instructions: Some(
                "Sear pork until brown\nAdd vinegar, soy, and simmer\nAdd coconut milk and reduce"
                    .into(),
            ),
            cuisine: Some("Filipino".into()),
            difficulty: Some("medium".into()),
            cook_time_minutes: Some(60),
            ..RawLocalRecipe::default()
        },
        RawLocalRecipe {
            id: 2,
            name: Some("Sinigang na Hipon".into()),
            description: Some(
                "Tamarind-based sour soup with shrimp and seasonal vegetables.".into(),
            ),
            image: Some(unsplash("photo-1512058564366-c9e3b7bb3d55")),
            ingredients: vec![
                detailed("Shrimp", "500 g"),
                detailed("Tamarind paste", "2 tbsp"),
            ],
            instructions: Some(
                "Boil vegetables until tender\nAdd shrimp and tamarind\nSimmer until pink".into(),
            ),
            cuisine: Some("Filipino".into()),
            difficulty: Some("easy".into()),
            cook_time_minutes: Some(35),
            ..RawLocalRecipe::default()
        },
        RawLocalRecipe {
            id: 3,
            name: Some("Spaghetti Carbonara".into()),
            description: Some(
                "Creamy and comforting Italian pasta with bacon and cheese.".into(),
            ),
            image: Some(unsplash("photo-1604908554022-9ec2a2b875d9")),
            ingredients: vec![detailed("Spaghetti", "400 g"), detailed("Bacon", "150 g")],
            instructions: Some(
                "Cook pasta\nFry bacon\nCombine with eggs and cheese off heat".into(),
            ),
            cuisine: Some("Italian".into()),
            difficulty: Some("easy".into()),
            cook_time_minutes: Some(25),
            ..RawLocalRecipe::default()
        },
    ]
}

fn detailed(name: &str, quantity: &str) -> RawIngredient {
    RawIngredient::Detailed {
        name: name.into(),
        quantity: Some(quantity.into()),
    }
}

fn unsplash(photo: &str) -> String {
    format!("https://images.unsplash.com/{photo}?q=80&w=1400&auto=format&fit=crop")
}
