use log::{error, info, warn};
use serde::Deserialize;
use serde_json::Value;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::error::RelayError;
use crate::images::ImageSearch;
use crate::model::{Ingredient, Measure, Recipe};
use crate::providers::{build_recipe_prompt, LlmProvider, ResponseFormat, CHEF_SYSTEM_PROMPT};
use crate::spoonacular::split_raw_instructions;

/// Recipe JSON as returned by the generative service. Every field is
/// coerced on its own since the model is loose about types.
#[derive(Debug, Deserialize)]
struct GeneratedRecipe {
    title: Option<Value>,
    preparation_time: Option<Value>,
    servings: Option<Value>,
    cuisine: Option<Value>,
    vegetarian: Option<Value>,
    vegan: Option<Value>,
    #[serde(rename = "glutenFree")]
    gluten_free: Option<Value>,
    calories: Option<Value>,
    protein: Option<Value>,
    fat: Option<Value>,
    carbs: Option<Value>,
    summary: Option<Value>,
    ingredients: Option<Value>,
    instructions: Option<Value>,
}

impl GeneratedRecipe {
    fn into_recipe(self, query: &str, image: String) -> Recipe {
        Recipe {
            id: derive_id(query),
            title: text(self.title.as_ref())
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| query.to_string()),
            image,
            cuisine: string_list(self.cuisine.as_ref()),
            preparation_time: Measure::from_json(self.preparation_time.as_ref()),
            servings: Measure::from_json(self.servings.as_ref()),
            vegetarian: flag(self.vegetarian.as_ref()),
            vegan: flag(self.vegan.as_ref()),
            gluten_free: flag(self.gluten_free.as_ref()),
            calories: Measure::from_json(self.calories.as_ref()),
            protein: Measure::from_json(self.protein.as_ref()),
            fat: Measure::from_json(self.fat.as_ref()),
            carbs: Measure::from_json(self.carbs.as_ref()),
            summary: text(self.summary.as_ref()).unwrap_or_default(),
            ingredients: match self.ingredients {
                Some(Value::Array(items)) => items.iter().filter_map(ingredient).collect(),
                _ => Vec::new(),
            },
            instructions: steps(self.instructions.as_ref()),
        }
    }
}

/// A string as-is, or a number rendered as text.
fn text(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

/// `true` or `"true"`; anything else is false.
fn flag(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    let items = match value {
        Some(Value::Array(items)) => items.iter().filter_map(|v| text(Some(v))).collect(),
        other => text(other).into_iter().collect::<Vec<_>>(),
    };
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn ingredient(value: &Value) -> Option<Ingredient> {
    let Value::Object(fields) = value else {
        return None;
    };

    Some(Ingredient {
        name: text(fields.get("name")).unwrap_or_default(),
        amount: Measure::from_json(fields.get("amount")),
        unit: text(fields.get("unit")).unwrap_or_default(),
    })
}

/// A list of steps, or a single paragraph split into sentences.
fn steps(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|step| text(Some(step)))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        Some(Value::String(paragraph)) => split_raw_instructions(paragraph),
        _ => Vec::new(),
    }
}

/// Generates a recipe when the recipe search comes back empty.
///
/// Produces at most one recipe. Any failure of the generative service
/// yields no recipe at all; image lookup failures only leave the image empty.
pub struct FallbackPipeline {
    generator: Option<Arc<dyn LlmProvider>>,
    images: Option<Arc<dyn ImageSearch>>,
}

impl FallbackPipeline {
    pub fn new(
        generator: Option<Arc<dyn LlmProvider>>,
        images: Option<Arc<dyn ImageSearch>>,
    ) -> Self {
        Self { generator, images }
    }

    /// Fallback with both services disabled
    pub fn disabled() -> Self {
        Self::new(None, None)
    }

    pub fn is_enabled(&self) -> bool {
        self.generator.is_some()
    }

    pub async fn run(&self, query: &str) -> Vec<Recipe> {
        let Some(generator) = &self.generator else {
            warn!("No generative service configured; skipping fallback for {:?}", query);
            return Vec::new();
        };

        let generated = match generate(generator.as_ref(), query).await {
            Ok(generated) => generated,
            Err(e) => {
                error!(
                    "Fallback generation with {} failed for {:?}: {}",
                    generator.provider_name(),
                    query,
                    e
                );
                return Vec::new();
            }
        };

        let image = self.lookup_image(query).await;
        info!("Generated fallback recipe for {:?}", query);

        vec![generated.into_recipe(query, image)]
    }

    /// Image URL for the dish, or an empty string on any failure.
    async fn lookup_image(&self, dish: &str) -> String {
        let Some(images) = &self.images else {
            return String::new();
        };

        match images.find_image(dish).await {
            Ok(Some(url)) => url,
            Ok(None) => {
                warn!("{} found no image for {:?}", images.provider_name(), dish);
                String::new()
            }
            Err(e) => {
                error!("{} image lookup failed for {:?}: {}", images.provider_name(), dish, e);
                String::new()
            }
        }
    }
}

async fn generate(generator: &dyn LlmProvider, query: &str) -> Result<GeneratedRecipe, RelayError> {
    let content = generator
        .complete(
            CHEF_SYSTEM_PROMPT,
            &build_recipe_prompt(query),
            ResponseFormat::JsonObject,
        )
        .await?;

    match serde_json::from_str::<Value>(strip_code_fence(&content))? {
        Value::Object(fields) => Ok(serde_json::from_value(Value::Object(fields))?),
        other => Err(RelayError::Parse(format!(
            "expected a JSON object, got {}",
            other
        ))),
    }
}

/// Remove a surrounding markdown code fence, if the model added one.
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop the info string ("json") on the opening line
    let body = rest.split_once('\n').map_or(rest, |(_, body)| body);
    let body = body.trim_end();
    body.strip_suffix("```").unwrap_or(body).trim()
}

/// Short opaque id derived from the query text.
fn derive_id(query: &str) -> String {
    let mut hasher = DefaultHasher::new();
    query.hash(&mut hasher);
    format!("{:016x}", hasher.finish())[..8].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct StubGenerator {
        response: Option<String>,
    }

    #[async_trait]
    impl LlmProvider for StubGenerator {
        fn provider_name(&self) -> &str {
            "stub"
        }

        async fn complete(
            &self,
            _system: &str,
            _prompt: &str,
            _format: ResponseFormat,
        ) -> Result<String, RelayError> {
            self.response.clone().ok_or(RelayError::Upstream {
                status: 500,
                body: "boom".to_string(),
            })
        }
    }

    struct StubImages {
        url: Option<String>,
        fail: bool,
    }

    #[async_trait]
    impl ImageSearch for StubImages {
        fn provider_name(&self) -> &str {
            "stub-images"
        }

        async fn find_image(&self, _dish: &str) -> Result<Option<String>, RelayError> {
            if self.fail {
                return Err(RelayError::ServiceUnavailable("down".to_string()));
            }
            Ok(self.url.clone())
        }
    }

    const LITTI_CHOKHA: &str = r#"{
        "title": "Litti Chokha",
        "preparation_time": "60",
        "servings": 4,
        "cuisine": ["Indian", "Bihari"],
        "vegetarian": true,
        "vegan": false,
        "glutenFree": false,
        "calories": "450",
        "protein": "12.5",
        "fat": "",
        "summary": "Roasted wheat balls stuffed with sattu.",
        "ingredients": [
            {"name": "wheat flour", "amount": "2", "unit": "cups"},
            {"name": "sattu", "amount": 1, "unit": "cup"},
            {"name": "salt", "amount": "to taste", "unit": ""}
        ],
        "instructions": ["Knead the dough.", "", "Stuff and roast."]
    }"#;

    fn pipeline(response: Option<&str>, images: Option<StubImages>) -> FallbackPipeline {
        FallbackPipeline::new(
            Some(Arc::new(StubGenerator {
                response: response.map(String::from),
            })),
            images.map(|i| Arc::new(i) as Arc<dyn ImageSearch>),
        )
    }

    #[tokio::test]
    async fn test_generated_recipe_is_normalized() {
        let images = StubImages {
            url: Some("https://example.com/litti.jpg".to_string()),
            fail: false,
        };
        let recipes = pipeline(Some(LITTI_CHOKHA), Some(images))
            .run("Litti Chokha")
            .await;

        assert_eq!(recipes.len(), 1);
        let recipe = &recipes[0];
        assert_eq!(recipe.title, "Litti Chokha");
        assert_eq!(recipe.image, "https://example.com/litti.jpg");
        assert_eq!(recipe.id.len(), 8);
        assert_eq!(recipe.cuisine, vec!["Indian", "Bihari"]);
        assert_eq!(recipe.preparation_time, Measure::Number(60.0));
        assert_eq!(recipe.servings, Measure::Number(4.0));
        assert!(recipe.vegetarian);
        assert_eq!(recipe.calories, Measure::Number(450.0));
        assert_eq!(recipe.protein, Measure::Number(12.5));
        assert!(recipe.fat.is_unknown());
        assert!(recipe.carbs.is_unknown());
        assert_eq!(recipe.ingredients.len(), 3);
        assert_eq!(recipe.ingredients[0].amount, Measure::Number(2.0));
        assert_eq!(
            recipe.ingredients[2].amount,
            Measure::Text("to taste".to_string())
        );
        assert_eq!(recipe.instructions, vec!["Knead the dough.", "Stuff and roast."]);
    }

    #[tokio::test]
    async fn test_invalid_json_yields_nothing() {
        let recipes = pipeline(Some("Sorry, I can't help with that."), None)
            .run("Litti Chokha")
            .await;
        assert!(recipes.is_empty());
    }

    #[tokio::test]
    async fn test_generator_error_yields_nothing() {
        let recipes = pipeline(None, None).run("Litti Chokha").await;
        assert!(recipes.is_empty());
    }

    #[tokio::test]
    async fn test_image_failure_leaves_image_empty() {
        let images = StubImages {
            url: None,
            fail: true,
        };
        let recipes = pipeline(Some(LITTI_CHOKHA), Some(images))
            .run("Litti Chokha")
            .await;

        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].image, "");
    }

    #[tokio::test]
    async fn test_disabled_pipeline_yields_nothing() {
        let fallback = FallbackPipeline::disabled();
        assert!(!fallback.is_enabled());
        assert!(fallback.run("Litti Chokha").await.is_empty());
    }

    #[tokio::test]
    async fn test_missing_title_defaults_to_query() {
        let recipes = pipeline(Some(r#"{"cuisine": "Bihari"}"#), None)
            .run("Litti Chokha")
            .await;

        assert_eq!(recipes[0].title, "Litti Chokha");
        assert_eq!(recipes[0].cuisine, vec!["Bihari"]);
        assert_eq!(recipes[0].image, "");
    }

    #[tokio::test]
    async fn test_string_flags_are_coerced() {
        let recipes = pipeline(
            Some(r#"{"title": "Litti Chokha", "vegetarian": "true", "vegan": "False", "glutenFree": 1, "servings": 4}"#),
            None,
        )
        .run("Litti Chokha")
        .await;

        assert_eq!(recipes.len(), 1);
        assert!(recipes[0].vegetarian);
        assert!(!recipes[0].vegan);
        assert!(!recipes[0].gluten_free);
        assert_eq!(recipes[0].servings, Measure::Number(4.0));
    }

    #[tokio::test]
    async fn test_numeric_text_fields_are_stringified() {
        let recipes = pipeline(Some(r#"{"title": 1984, "summary": 12, "cuisine": "Bihari"}"#), None)
            .run("Litti Chokha")
            .await;

        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].title, "1984");
        assert_eq!(recipes[0].summary, "12");
    }

    #[tokio::test]
    async fn test_instruction_paragraph_is_split_into_steps() {
        let recipes = pipeline(
            Some(r#"{"title": "Litti Chokha", "instructions": "Knead. Roast.", "summary": null}"#),
            None,
        )
        .run("Litti Chokha")
        .await;

        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].instructions, vec!["Knead", "Roast"]);
        assert_eq!(recipes[0].summary, "");
    }

    #[tokio::test]
    async fn test_malformed_ingredients_are_skipped() {
        let recipes = pipeline(
            Some(r#"{"ingredients": ["salt", {"name": "sattu", "amount": 1, "unit": 2}], "cuisine": {"a": 1}}"#),
            None,
        )
        .run("Litti Chokha")
        .await;

        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].ingredients.len(), 1);
        assert_eq!(recipes[0].ingredients[0].name, "sattu");
        assert_eq!(recipes[0].ingredients[0].unit, "2");
        assert!(recipes[0].cuisine.is_empty());
    }

    #[tokio::test]
    async fn test_non_object_reply_yields_nothing() {
        let recipes = pipeline(Some(r#"["Litti Chokha"]"#), None)
            .run("Litti Chokha")
            .await;
        assert!(recipes.is_empty());
    }

    #[tokio::test]
    async fn test_single_line_fenced_reply_is_parsed() {
        let recipes = pipeline(Some(r#"```{"title": "Litti Chokha"}```"#), None)
            .run("Litti Chokha")
            .await;
        assert_eq!(recipes.len(), 1);
    }

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_code_fence("```\n{}\n```\n"), "{}");
        assert_eq!(strip_code_fence("```{\"a\": 1}```"), "{\"a\": 1}");
        assert_eq!(strip_code_fence("  {\"a\": 1} "), "{\"a\": 1}");
    }

    #[test]
    fn test_derive_id_is_stable() {
        assert_eq!(derive_id("Litti Chokha"), derive_id("Litti Chokha"));
        assert_eq!(derive_id("Litti Chokha").len(), 8);
    }
}
