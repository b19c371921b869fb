//! Prompt construction for the language-model routes.
//!
//! Pure functions, no async. The output-format contracts live in the JSON
//! schemas in [`crate::schema`]; these prompts only carry the analysis
//! instructions and the caller's data.

use crate::schema::UserPreferences;

/// System instruction for `/extract-ingredients`.
pub const INGREDIENT_SYSTEM_PROMPT: &str = "\
You are an expert food label analyzer. Extract ALL ingredients from the food \
product label text you are given.

- Find the ingredients section (it may be in any language)
- List every single ingredient, including sub-ingredients in parentheses
- Translate all ingredients to English
- Return a simple comma-separated list in English, in lowercase
- Keep full ingredient names, do not abbreviate";

/// User message embedding the caller's text verbatim.
pub fn ingredient_user_prompt(text: &str) -> String {
    format!(
        "Extract the ingredients from this text and return only the list:\n\n{}",
        text
    )
}

/// Prompt for the `/analyze-co2` environmental-impact pass.
pub fn co2_prompt(ingredients: &[String]) -> String {
    format!(
        "You are an environmental impact expert specializing in food production \
carbon footprints.

Analyze the CO2 emissions for these food ingredients: {}

Based on lifecycle assessments, provide:
1. Total estimated CO2 emissions in kg for a typical 100g serving
2. Per-ingredient CO2 breakdown for the major contributors, with percentages
3. Overall sustainability rating (Low/Medium/High impact)
4. Key environmental concerns
5. Lower-impact alternatives

Consider agricultural production, processing, transportation (average supply \
chain) and packaging.",
        ingredients.join(", ")
    )
}

/// Prompt for the `/comprehensive-analysis` pass, scoped to the allergens and
/// dietary restrictions the user actually selected.
pub fn comprehensive_prompt(ingredients: &[String], prefs: &UserPreferences) -> String {
    let allergens = allergen_selections(prefs);
    let diets = dietary_selections(prefs);

    let allergen_check = if allergens.is_empty() {
        "No specific allergens to check".to_string()
    } else {
        format!("Check ONLY for these allergens: {}", allergens.join(", "))
    };
    let dietary_check = if diets.is_empty() {
        "No dietary restrictions specified".to_string()
    } else {
        format!("Check compatibility with: {}", diets.join(", "))
    };

    format!(
        "You are a comprehensive food analysis expert covering environmental \
impact, allergens, nutrition, and health.

Analyze these ingredients: {}

USER'S PREFERENCES:
- {}
- {}

Provide a complete analysis:
1. Environmental impact: total CO2 emissions (kg per 100g), water usage \
(liters per 100g), animal impact (Low for plant-based, Medium for dairy or \
eggs, High for meat or fish), overall sustainability rating, and the \
highest-impact ingredients with individual CO2 values and percentages.
2. Allergen analysis, ONLY for the user's selected allergens. Use severity \
\"Severe\" when an allergen is directly listed in the ingredients, and \
\"Caution\" for may-contain warnings, cross-contamination risks, or \
uncertain ingredients that might contain it. Report definite violations and \
caution warnings separately; omit allergens that are safe.
3. Dietary compatibility with the user's restrictions: overall rating \
(Compatible/Partially Compatible/Not Compatible) and any violations.
4. Health analysis: nutritional concerns, health benefits, and an overall \
score from 1 to 10 where 10 is healthiest.
5. Recommendations: environmental alternatives, healthier alternatives, \
allergen-free alternatives if violations were found, and general insights.",
        ingredients.join(", "),
        allergen_check,
        dietary_check
    )
}

fn allergen_selections(prefs: &UserPreferences) -> Vec<&'static str> {
    let mut selected = Vec::new();
    if prefs.gluten {
        selected.push("gluten");
    }
    if prefs.dairy {
        selected.push("dairy/milk");
    }
    if prefs.nuts {
        selected.push("nuts (all types)");
    }
    if prefs.soy {
        selected.push("soy");
    }
    if prefs.eggs {
        selected.push("eggs");
    }
    if prefs.shellfish {
        selected.push("shellfish");
    }
    if prefs.peanuts {
        selected.push("peanuts");
    }
    if prefs.tree_nuts {
        selected.push("tree nuts");
    }
    selected
}

fn dietary_selections(prefs: &UserPreferences) -> Vec<&'static str> {
    let mut selected = Vec::new();
    if prefs.vegan {
        selected.push("vegan");
    }
    if prefs.vegetarian {
        selected.push("vegetarian");
    }
    if prefs.pescatarian {
        selected.push("pescatarian");
    }
    if prefs.kosher {
        selected.push("kosher");
    }
    if prefs.halal {
        selected.push("halal");
    }
    if prefs.jain {
        selected.push("jain");
    }
    selected
}
