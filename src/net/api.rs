//! Typed endpoint functions over [`ApiClient`].
//!
//! SYSTEM CONTEXT
//! ==============
//! Screens call these and nothing lower. Authentication is ambient: the
//! bearer slot installed by the auth session rides along on every request,
//! so no function here takes a token.
//!
//! ERROR HANDLING
//! ==============
//! Every function returns the normalized [`ApiError`]; callers surface
//! `user_message()` in an alert and keep the current screen.

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;

use serde::Serialize;

use crate::net::client::ApiClient;
use crate::net::error::ApiError;
use crate::net::types::{
    ActivityLevel, CaffeineTolerance, Gender, LoginRequest, LoginResponse, PrimaryGoal, Product,
    ProductAttribute, ProductCategory, ProductDetail, ProductFlavor, ProductNutrition, Profile,
    RecommendationsResponse, RegisterRequest, StatusResponse, SweatLevel, TrainingFrequency,
};

fn user_profile_path(user_id: i64) -> String {
    format!("/users/{user_id}/profile")
}

fn user_consumption_path(user_id: i64) -> String {
    format!("/users/{user_id}/consumption")
}

fn products_by_category_path(category_id: i64) -> String {
    format!("/products/category/{category_id}")
}

fn product_path(product_id: i64) -> String {
    format!("/products/{product_id}")
}

fn product_subresource_path(product_id: i64, subresource: &str) -> String {
    format!("/products/{product_id}/{subresource}")
}

/// Join a restriction set into the comma-separated string the server
/// expects for `dietary_restrictions`.
fn join_restrictions(profile: &Profile) -> String {
    let values: Vec<&str> = profile.dietary_restrictions.iter().map(|r| r.as_str()).collect();
    values.join(",")
}

/// Wire shape of the profile submission. Weight and height drop their unit
/// suffixes and the restriction set flattens to a string.
#[derive(Serialize)]
struct ProfilePayload {
    age: u32,
    weight: f64,
    height: f64,
    gender: Gender,
    activity_level: ActivityLevel,
    training_frequency: TrainingFrequency,
    primary_goal: PrimaryGoal,
    sweat_level: SweatLevel,
    caffeine_tolerance: CaffeineTolerance,
    dietary_restrictions: String,
}

fn profile_payload(profile: &Profile) -> ProfilePayload {
    ProfilePayload {
        age: profile.age,
        weight: profile.weight_kg,
        height: profile.height_cm,
        gender: profile.gender,
        activity_level: profile.activity_level,
        training_frequency: profile.training_frequency,
        primary_goal: profile.primary_goal,
        sweat_level: profile.sweat_level,
        caffeine_tolerance: profile.caffeine_tolerance,
        dietary_restrictions: join_restrictions(profile),
    }
}

/// Exchange credentials for a bearer token and user record via
/// `POST /auth/login`.
///
/// This performs the network call only; the caller passes the result to
/// [`crate::state::AuthSession::login`] to actually open the session.
///
/// # Errors
///
/// Returns [`ApiError`] on any transport or server failure, including bad
/// credentials (a 401 `Server` error carrying the server's message).
pub async fn login(client: &ApiClient, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
    client.post_json("/auth/login", &LoginRequest { email, password }).await
}

/// Create an account via `POST /auth/register`.
///
/// # Errors
///
/// Returns [`ApiError`] on any transport or server failure.
pub async fn register(client: &ApiClient, request: &RegisterRequest) -> Result<StatusResponse, ApiError> {
    client.post_json("/auth/register", request).await
}

/// Submit the questionnaire via `POST /users/{id}/profile`.
///
/// # Errors
///
/// Returns [`ApiError`] on any transport or server failure.
pub async fn save_profile(client: &ApiClient, user_id: i64, profile: &Profile) -> Result<StatusResponse, ApiError> {
    client.post_json(&user_profile_path(user_id), &profile_payload(profile)).await
}

/// Record that the user consumed a product via
/// `POST /users/{id}/consumption`.
///
/// # Errors
///
/// Returns [`ApiError`] on any transport or server failure.
pub async fn log_consumption(
    client: &ApiClient,
    user_id: i64,
    product_id: i64,
    quantity: u32,
) -> Result<StatusResponse, ApiError> {
    let body = serde_json::json!({ "productId": product_id, "quantity": quantity });
    client.post_json(&user_consumption_path(user_id), &body).await
}

/// Fetch all product categories via `GET /products/categories`.
///
/// # Errors
///
/// Returns [`ApiError`] on any transport or server failure.
pub async fn product_categories(client: &ApiClient) -> Result<Vec<ProductCategory>, ApiError> {
    client.get_json("/products/categories").await
}

/// Fetch the products of one category via `GET /products/category/{id}`.
///
/// # Errors
///
/// Returns [`ApiError`] on any transport or server failure.
pub async fn products_by_category(client: &ApiClient, category_id: i64) -> Result<Vec<Product>, ApiError> {
    client.get_json(&products_by_category_path(category_id)).await
}

/// Fetch one product via `GET /products/{id}`.
///
/// # Errors
///
/// Returns [`ApiError`] on any transport or server failure.
pub async fn product(client: &ApiClient, product_id: i64) -> Result<Product, ApiError> {
    client.get_json(&product_path(product_id)).await
}

/// Fetch a product's nutrition facts via `GET /products/{id}/nutrition`.
///
/// # Errors
///
/// Returns [`ApiError`] on any transport or server failure.
pub async fn product_nutrition(client: &ApiClient, product_id: i64) -> Result<ProductNutrition, ApiError> {
    client.get_json(&product_subresource_path(product_id, "nutrition")).await
}

/// Fetch a product's flavors via `GET /products/{id}/flavors`.
///
/// # Errors
///
/// Returns [`ApiError`] on any transport or server failure.
pub async fn product_flavors(client: &ApiClient, product_id: i64) -> Result<Vec<ProductFlavor>, ApiError> {
    client.get_json(&product_subresource_path(product_id, "flavors")).await
}

/// Fetch a product's attributes via `GET /products/{id}/attributes`.
///
/// # Errors
///
/// Returns [`ApiError`] on any transport or server failure.
pub async fn product_attributes(client: &ApiClient, product_id: i64) -> Result<Vec<ProductAttribute>, ApiError> {
    client.get_json(&product_subresource_path(product_id, "attributes")).await
}

/// Fetch the product record and its three sub-resources concurrently and
/// join them into a [`ProductDetail`].
///
/// The four requests fire together; the join completes when all four have.
/// Dropping the returned future cancels whatever is still in flight, which
/// is how a screen teardown abandons the fetch.
///
/// # Errors
///
/// Any sub-call failing fails the whole join with that call's normalized
/// [`ApiError`]; there is no partial result.
pub async fn product_detail(client: &ApiClient, product_id: i64) -> Result<ProductDetail, ApiError> {
    let (product, nutrition, flavors, attributes) = tokio::try_join!(
        product(client, product_id),
        product_nutrition(client, product_id),
        product_flavors(client, product_id),
        product_attributes(client, product_id),
    )?;

    Ok(ProductDetail { product, nutrition, flavors, attributes })
}

/// Request the server-computed recommendation list via
/// `POST /recommendations`.
///
/// Bearer-authenticated with an empty JSON body; the server derives
/// everything from the authenticated user's stored profile.
///
/// # Errors
///
/// Returns [`ApiError`] on any transport or server failure.
pub async fn recommendations(client: &ApiClient) -> Result<RecommendationsResponse, ApiError> {
    client.post_json("/recommendations", &serde_json::json!({})).await
}
