//! Reshapes Spoonacular `complexSearch` results into [`Recipe`]s.

use html_escape::decode_html_entities;
use log::warn;
use scraper::Html;
use serde::Deserialize;
use serde_json::Value;

use crate::model::{Ingredient, Measure, Recipe};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecipeId {
    Number(i64),
    Text(String),
}

impl RecipeId {
    fn into_string(self) -> String {
        match self {
            RecipeId::Number(n) => n.to_string(),
            RecipeId::Text(s) => s,
        }
    }
}

/// A single `complexSearch` result. Only `id` and `title` are required,
/// every other field tolerates being absent or null.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpoonacularRecipe {
    id: RecipeId,
    title: String,
    image: Option<String>,
    cuisines: Option<Vec<String>>,
    ready_in_minutes: Option<f64>,
    servings: Option<f64>,
    vegetarian: Option<bool>,
    vegan: Option<bool>,
    gluten_free: Option<bool>,
    summary: Option<String>,
    nutrition: Option<Nutrition>,
    extended_ingredients: Option<Vec<ExtendedIngredient>>,
    analyzed_instructions: Option<Vec<InstructionSection>>,
    instructions: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Nutrition {
    nutrients: Option<Vec<Nutrient>>,
}

#[derive(Debug, Deserialize)]
struct Nutrient {
    name: Option<String>,
    amount: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExtendedIngredient {
    name_clean: Option<String>,
    name: Option<String>,
    amount: Option<f64>,
    unit: Option<String>,
}

#[derive(Debug, Deserialize)]
struct InstructionSection {
    steps: Option<Vec<InstructionStep>>,
}

#[derive(Debug, Deserialize)]
struct InstructionStep {
    step: Option<String>,
}

/// Normalize a batch of raw results.
///
/// A record that does not fit the expected shape is logged and skipped so
/// one bad entry never discards the rest of the batch.
pub fn normalize_results(results: Vec<Value>) -> Vec<Recipe> {
    results
        .into_iter()
        .enumerate()
        .filter_map(|(index, raw)| match normalize_recipe(raw) {
            Ok(recipe) => Some(recipe),
            Err(e) => {
                warn!("Skipping malformed recipe at position {}: {}", index, e);
                None
            }
        })
        .collect()
}

/// Normalize a single raw result.
pub fn normalize_recipe(raw: Value) -> Result<Recipe, serde_json::Error> {
    let recipe: SpoonacularRecipe = serde_json::from_value(raw)?;

    let nutrients = recipe
        .nutrition
        .and_then(|n| n.nutrients)
        .unwrap_or_default();
    let instructions = extract_instructions(
        recipe.analyzed_instructions.as_deref().unwrap_or_default(),
        recipe.instructions.as_deref(),
    );

    Ok(Recipe {
        id: recipe.id.into_string(),
        title: recipe.title,
        image: recipe.image.unwrap_or_default(),
        cuisine: recipe.cuisines.unwrap_or_default(),
        preparation_time: recipe.ready_in_minutes.into(),
        servings: recipe.servings.into(),
        vegetarian: recipe.vegetarian.unwrap_or(false),
        vegan: recipe.vegan.unwrap_or(false),
        gluten_free: recipe.gluten_free.unwrap_or(false),
        calories: nutrient_value(&nutrients, "Calories"),
        protein: nutrient_value(&nutrients, "Protein"),
        fat: nutrient_value(&nutrients, "Fat"),
        carbs: nutrient_value(&nutrients, "Carbohydrates"),
        summary: recipe.summary.unwrap_or_default(),
        ingredients: recipe
            .extended_ingredients
            .unwrap_or_default()
            .into_iter()
            .map(convert_ingredient)
            .collect(),
        instructions,
    })
}

/// First nutrient whose name contains `name`, case-insensitively,
/// rounded to one decimal place.
fn nutrient_value(nutrients: &[Nutrient], name: &str) -> Measure {
    let needle = name.to_lowercase();
    nutrients
        .iter()
        .find(|n| {
            n.name
                .as_deref()
                .is_some_and(|candidate| candidate.to_lowercase().contains(&needle))
        })
        .map_or(Measure::Unknown, |n| {
            Measure::Number(round_to(n.amount.unwrap_or(0.0), 1))
        })
}

fn convert_ingredient(ingredient: ExtendedIngredient) -> Ingredient {
    let name = ingredient
        .name_clean
        .filter(|n| !n.trim().is_empty())
        .or(ingredient.name)
        .unwrap_or_default();

    Ingredient {
        name: decode_html_entities(&name).into_owned(),
        amount: Measure::Number(round_to(ingredient.amount.unwrap_or(0.0), 2)),
        unit: ingredient.unit.unwrap_or_default(),
    }
}

/// Structured steps win; otherwise the raw instruction markup is stripped
/// and split into sentences.
fn extract_instructions(sections: &[InstructionSection], raw: Option<&str>) -> Vec<String> {
    let steps: Vec<String> = sections
        .iter()
        .flat_map(|section| section.steps.iter().flatten())
        .filter_map(|step| step.step.as_deref())
        .map(|step| decode_html_entities(step.trim()).into_owned())
        .filter(|step| !step.is_empty())
        .collect();

    if !steps.is_empty() {
        return steps;
    }

    match raw {
        Some(raw) if !raw.trim().is_empty() => split_raw_instructions(raw),
        _ => Vec::new(),
    }
}

/// Strip markup and split on periods, discarding empty fragments.
pub fn split_raw_instructions(raw: &str) -> Vec<String> {
    let fragment = Html::parse_fragment(raw);
    let text = fragment
        .root_element()
        .text()
        .collect::<Vec<_>>()
        .join(" ");

    text.split('.')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
