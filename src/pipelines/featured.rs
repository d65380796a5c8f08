use log::{debug, warn};

use crate::model::Recipe;
use crate::spoonacular::{RecipeQuery, SpoonacularClient};

/// Look up one recipe per curated dish.
///
/// Each lookup is isolated: a failing dish is logged and contributes
/// nothing, the others still run.
pub async fn featured_recipes(client: &SpoonacularClient, dishes: &[String]) -> Vec<Recipe> {
    let mut recipes = Vec::with_capacity(dishes.len());

    for dish in dishes {
        match client.search_with_limit(&RecipeQuery::dish(dish), 1).await {
            Ok(found) => {
                debug!("Featured {:?} returned {} recipes", dish, found.len());
                recipes.extend(found.into_iter().take(1));
            }
            Err(e) => warn!("Featured lookup for {:?} failed: {}", dish, e),
        }
    }

    recipes
}
