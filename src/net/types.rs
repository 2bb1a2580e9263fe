//! Wire DTOs for the client/server boundary.
//!
//! DESIGN
//! ======
//! Field names and enum wire strings follow the server contract exactly, so
//! serde round-trips stay lossless. The profile enums carry their Rust names
//! in English and rename to the server's Spanish values; the server's
//! spellings (including `"ocacional"`) are the contract, not ours to fix.

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

// =============================================================================
// AUTH
// =============================================================================

/// An authenticated user as returned by `POST /auth/login`.
///
/// Immutable within a session; replaced wholesale by the next login.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    pub id: i64,
    /// Display name.
    pub username: String,
    /// Account email address.
    pub email: String,
}

/// Body of `POST /auth/login`.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Response of `POST /auth/login`: the opaque bearer token plus the user
/// record the session will carry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/// Body of `POST /auth/register`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Generic success/failure envelope used by register, profile save, and
/// consumption logging.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub success: bool,
    /// Optional human-readable detail, shown to the user when present.
    #[serde(default)]
    pub message: Option<String>,
}

// =============================================================================
// PROFILE
// =============================================================================

/// Self-reported gender.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "hombre")]
    Male,
    #[serde(rename = "mujer")]
    Female,
    #[serde(rename = "otro")]
    Other,
    #[serde(rename = "prefiero no decir")]
    Undisclosed,
}

/// Day-to-day activity level outside training.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityLevel {
    #[serde(rename = "sedentario")]
    Sedentary,
    #[serde(rename = "moderado")]
    Moderate,
    #[serde(rename = "activo")]
    Active,
    #[serde(rename = "muy activo")]
    VeryActive,
}

/// Training sessions per week.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrainingFrequency {
    #[serde(rename = "1-2")]
    OneToTwo,
    #[serde(rename = "3-4")]
    ThreeToFour,
    #[serde(rename = "5+")]
    FivePlus,
    /// The server spells this value `ocacional`.
    #[serde(rename = "ocacional")]
    Occasional,
}

/// What the user primarily trains for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimaryGoal {
    #[serde(rename = "mejor rendimiento")]
    Performance,
    #[serde(rename = "perder peso")]
    WeightLoss,
    #[serde(rename = "ganar musculo")]
    MuscleGain,
    #[serde(rename = "resistencia")]
    Endurance,
    #[serde(rename = "recuperacion")]
    Recovery,
    #[serde(rename = "por salud")]
    GeneralHealth,
}

/// How much the user sweats during training.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SweatLevel {
    #[serde(rename = "bajo")]
    Low,
    #[serde(rename = "medio")]
    Medium,
    #[serde(rename = "alto")]
    High,
}

/// Tolerance for caffeinated products.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaffeineTolerance {
    #[serde(rename = "no")]
    None,
    #[serde(rename = "bajo")]
    Low,
    #[serde(rename = "medio")]
    Medium,
    #[serde(rename = "alto")]
    High,
}

/// A single dietary restriction. `None` is the sentinel for an explicitly
/// empty selection; it never coexists with a real restriction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DietaryRestriction {
    #[serde(rename = "vegetariano")]
    Vegetarian,
    #[serde(rename = "vegano")]
    Vegan,
    #[serde(rename = "libre de gluten")]
    GlutenFree,
    #[serde(rename = "libre de lactosa")]
    LactoseFree,
    #[serde(rename = "libre de frutos secos")]
    NutFree,
    #[serde(rename = "no")]
    None,
}

impl DietaryRestriction {
    /// Wire value, as joined into the profile submission string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vegetarian => "vegetariano",
            Self::Vegan => "vegano",
            Self::GlutenFree => "libre de gluten",
            Self::LactoseFree => "libre de lactosa",
            Self::NutFree => "libre de frutos secos",
            Self::None => "no",
        }
    }
}

/// Questionnaire answers submitted to `POST /users/{id}/profile`.
///
/// Held transiently in screen form state and submitted; never cached
/// locally. The restriction set serializes as a comma-joined string on the
/// wire (see [`crate::net::api::save_profile`]).
#[derive(Clone, Debug, PartialEq)]
pub struct Profile {
    pub age: u32,
    /// Body weight in kilograms; wire field `weight`.
    pub weight_kg: f64,
    /// Height in centimeters; wire field `height`.
    pub height_cm: f64,
    pub gender: Gender,
    pub activity_level: ActivityLevel,
    pub training_frequency: TrainingFrequency,
    pub primary_goal: PrimaryGoal,
    pub sweat_level: SweatLevel,
    pub caffeine_tolerance: CaffeineTolerance,
    pub dietary_restrictions: BTreeSet<DietaryRestriction>,
}

// =============================================================================
// CATALOG
// =============================================================================

/// A top-level product category from `GET /products/categories`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCategory {
    pub category_id: i64,
    pub name: String,
    pub description: String,
    /// When or why products in this category are used.
    pub usage_context: String,
}

/// A catalog product.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: i64,
    pub type_id: i64,
    pub name: String,
    pub description: String,
    /// Server-relative image path; image serving itself is out of scope.
    pub image_url: String,
    pub usage_recommendation: String,
    pub is_active: bool,
    /// Product-type name, present on some listings.
    #[serde(default)]
    pub type_name: Option<String>,
    #[serde(default)]
    pub type_description: Option<String>,
}

/// Nutrition facts for one product, from `GET /products/{id}/nutrition`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductNutrition {
    pub nutrition_id: i64,
    pub product_id: i64,
    pub serving_size: String,
    pub energy_kcal: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub sugars_g: f64,
    pub sodium_mg: f64,
    pub potassium_mg: f64,
    pub magnesium_mg: f64,
    pub caffeine_mg: f64,
    pub other_components: String,
}

/// One available flavor of a product.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFlavor {
    pub flavor_id: i64,
    pub product_id: i64,
    pub name: String,
}

/// A benefit or characteristic attributed to a product.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductAttribute {
    pub attribute_id: i64,
    pub name: String,
    /// Nullable on the wire; attributes without copy show the name alone.
    #[serde(default)]
    pub description: Option<String>,
}

/// The joined result of fetching all four product sub-resources.
#[derive(Clone, Debug, PartialEq)]
pub struct ProductDetail {
    pub product: Product,
    pub nutrition: ProductNutrition,
    pub flavors: Vec<ProductFlavor>,
    pub attributes: Vec<ProductAttribute>,
}

// =============================================================================
// RECOMMENDATIONS
// =============================================================================

/// One server-computed recommendation: a product plus why it was picked.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationItem {
    pub product_details: Product,
    /// Server-side reasoning text. Older server revisions named this field
    /// `reasoningText`.
    #[serde(alias = "reasoningText")]
    pub reasoning: String,
}

/// Response envelope of `POST /recommendations`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationsResponse {
    #[serde(default)]
    pub recommendations: Vec<RecommendationItem>,
    /// Set by the server when it has something to say about an empty list
    /// (e.g. the profile questionnaire is incomplete).
    #[serde(default)]
    pub message: Option<String>,
}
