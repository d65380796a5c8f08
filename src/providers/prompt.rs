/// System prompt for generating a fallback recipe.
pub const CHEF_SYSTEM_PROMPT: &str = "You are a professional chef. Always respond with valid JSON containing recipe data. Do not wrap in ```json markers.";

/// User prompt template for generating a fallback recipe.
///
/// Loaded from `recipe_prompt.txt` at compile time. `{dish}` is replaced
/// with the searched dish name.
pub const RECIPE_GENERATION_PROMPT: &str = include_str!("recipe_prompt.txt");

/// System prompt for the cooking assistant.
pub const COOKING_ASSISTANT_PROMPT: &str = "You are a friendly cooking assistant. Answer questions about ingredients, substitutions, cooking techniques and tips. Keep answers short and practical, and say so when a question has nothing to do with cooking.";

/// Build the recipe generation prompt for a dish.
pub fn build_recipe_prompt(dish: &str) -> String {
    RECIPE_GENERATION_PROMPT.replace("{dish}", dish.trim())
}

/// Build the assistant system prompt, scoped to a recipe when one is named.
pub fn build_assistant_prompt(recipe: Option<&str>) -> String {
    match recipe.map(str::trim).filter(|r| !r.is_empty()) {
        Some(recipe) => format!(
            "{}\n\nThe user is currently cooking \"{recipe}\". Relate your answers to that dish where it helps.",
            COOKING_ASSISTANT_PROMPT
        ),
        None => COOKING_ASSISTANT_PROMPT.to_string(),
    }
}
