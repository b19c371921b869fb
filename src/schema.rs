//! Wire types for the AI analysis routes.
//!
//! Field names are camelCase — the shapes the scanner frontend consumes.
//! Each analysis type has a companion JSON schema handed to the chat client
//! as a structured-output constraint, so the model's reply deserializes
//! directly into these types.

use serde::{Deserialize, Serialize};
use serde_json::json;

/// Allergen and dietary selections sent with `/comprehensive-analysis`.
/// Unselected fields default to false, so partial payloads are fine.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    #[serde(default)]
    pub gluten: bool,
    #[serde(default)]
    pub dairy: bool,
    #[serde(default)]
    pub nuts: bool,
    #[serde(default)]
    pub soy: bool,
    #[serde(default)]
    pub eggs: bool,
    #[serde(default)]
    pub shellfish: bool,
    #[serde(default)]
    pub peanuts: bool,
    #[serde(default)]
    pub tree_nuts: bool,
    #[serde(default)]
    pub vegan: bool,
    #[serde(default)]
    pub vegetarian: bool,
    #[serde(default)]
    pub pescatarian: bool,
    #[serde(default)]
    pub kosher: bool,
    #[serde(default)]
    pub halal: bool,
    #[serde(default)]
    pub jain: bool,
}

// ── /analyze-co2 ────────────────────────────────────────────────────────────

/// Environmental-impact analysis returned by `/analyze-co2`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Co2Analysis {
    #[serde(rename = "totalCO2")]
    pub total_co2: f64,
    pub rating: String,
    pub breakdown: Vec<Co2Breakdown>,
    pub concerns: Vec<String>,
    pub alternatives: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Co2Breakdown {
    pub ingredient: String,
    pub co2: f64,
    pub percentage: f64,
}

pub fn co2_analysis_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "totalCO2": { "type": "number" },
            "rating": { "type": "string", "enum": ["Low", "Medium", "High"] },
            "breakdown": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "ingredient": { "type": "string" },
                        "co2": { "type": "number" },
                        "percentage": { "type": "number" }
                    },
                    "required": ["ingredient", "co2", "percentage"]
                }
            },
            "concerns": { "type": "array", "items": { "type": "string" } },
            "alternatives": { "type": "array", "items": { "type": "string" } }
        },
        "required": ["totalCO2", "rating", "breakdown", "concerns", "alternatives"]
    })
}

// ── /comprehensive-analysis ─────────────────────────────────────────────────

/// Full analysis returned by `/comprehensive-analysis`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComprehensiveAnalysis {
    pub environmental: EnvironmentalImpact,
    pub allergens: AllergenReport,
    pub dietary: DietaryCompatibility,
    pub health: HealthAnalysis,
    pub recommendations: Recommendations,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentalImpact {
    #[serde(rename = "totalCO2")]
    pub total_co2: f64,
    pub water_usage: f64,
    pub animal_impact: String,
    pub rating: String,
    pub breakdown: Vec<Co2Breakdown>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllergenReport {
    pub definite_violations: Vec<AllergenViolation>,
    pub caution_warnings: Vec<AllergenViolation>,
    pub safe: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllergenViolation {
    pub allergen: String,
    /// "Severe" for directly listed allergens, "Caution" for possible ones.
    pub severity: String,
    pub source: String,
    pub warning: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DietaryCompatibility {
    pub compatible: String,
    pub violations: Vec<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthAnalysis {
    pub score: u8,
    pub concerns: Vec<String>,
    pub benefits: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendations {
    pub environmental: Vec<String>,
    pub health: Vec<String>,
    pub allergen_free: Vec<String>,
    pub insights: Vec<String>,
}

pub fn comprehensive_analysis_schema() -> serde_json::Value {
    let string_array = json!({ "type": "array", "items": { "type": "string" } });
    let violation = json!({
        "type": "object",
        "properties": {
            "allergen": { "type": "string" },
            "severity": { "type": "string", "enum": ["Severe", "Caution"] },
            "source": { "type": "string" },
            "warning": { "type": "string" }
        },
        "required": ["allergen", "severity", "source", "warning"]
    });

    json!({
        "type": "object",
        "properties": {
            "environmental": {
                "type": "object",
                "properties": {
                    "totalCO2": { "type": "number" },
                    "waterUsage": { "type": "number" },
                    "animalImpact": { "type": "string", "enum": ["Low", "Medium", "High"] },
                    "rating": { "type": "string", "enum": ["Low", "Medium", "High"] },
                    "breakdown": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "ingredient": { "type": "string" },
                                "co2": { "type": "number" },
                                "percentage": { "type": "number" }
                            },
                            "required": ["ingredient", "co2", "percentage"]
                        }
                    }
                },
                "required": ["totalCO2", "waterUsage", "animalImpact", "rating", "breakdown"]
            },
            "allergens": {
                "type": "object",
                "properties": {
                    "definiteViolations": { "type": "array", "items": violation.clone() },
                    "cautionWarnings": { "type": "array", "items": violation },
                    "safe": { "type": "boolean" }
                },
                "required": ["definiteViolations", "cautionWarnings", "safe"]
            },
            "dietary": {
                "type": "object",
                "properties": {
                    "compatible": {
                        "type": "string",
                        "enum": ["Compatible", "Partially Compatible", "Not Compatible"]
                    },
                    "violations": string_array.clone(),
                    "tags": string_array.clone()
                },
                "required": ["compatible", "violations", "tags"]
            },
            "health": {
                "type": "object",
                "properties": {
                    "score": { "type": "integer", "minimum": 1, "maximum": 10 },
                    "concerns": string_array.clone(),
                    "benefits": string_array.clone()
                },
                "required": ["score", "concerns", "benefits"]
            },
            "recommendations": {
                "type": "object",
                "properties": {
                    "environmental": string_array.clone(),
                    "health": string_array.clone(),
                    "allergenFree": string_array.clone(),
                    "insights": string_array
                },
                "required": ["environmental", "health", "allergenFree", "insights"]
            }
        },
        "required": ["environmental", "allergens", "dietary", "health", "recommendations"]
    })
}
