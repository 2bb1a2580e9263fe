use std::collections::BTreeSet;

use tokio::io::{AsyncReadExt, AsyncWriteExt};

use super::*;
use crate::config::ApiConfig;
use crate::net::types::DietaryRestriction;

fn sample_profile() -> Profile {
    Profile {
        age: 28,
        weight_kg: 74.5,
        height_cm: 181.0,
        gender: Gender::Male,
        activity_level: ActivityLevel::Moderate,
        training_frequency: TrainingFrequency::ThreeToFour,
        primary_goal: PrimaryGoal::Performance,
        sweat_level: SweatLevel::Medium,
        caffeine_tolerance: CaffeineTolerance::Medium,
        dietary_restrictions: BTreeSet::from([DietaryRestriction::None]),
    }
}

// =============================================================
// Endpoint paths
// =============================================================

#[test]
fn user_paths_embed_the_user_id() {
    assert_eq!(user_profile_path(12), "/users/12/profile");
    assert_eq!(user_consumption_path(12), "/users/12/consumption");
}

#[test]
fn product_paths_embed_the_product_id() {
    assert_eq!(products_by_category_path(3), "/products/category/3");
    assert_eq!(product_path(41), "/products/41");
    assert_eq!(product_subresource_path(41, "nutrition"), "/products/41/nutrition");
    assert_eq!(product_subresource_path(41, "flavors"), "/products/41/flavors");
    assert_eq!(product_subresource_path(41, "attributes"), "/products/41/attributes");
}

// =============================================================
// Profile submission shape
// =============================================================

#[test]
fn profile_payload_flattens_restrictions_to_a_comma_joined_string() {
    let mut profile = sample_profile();
    profile.dietary_restrictions =
        BTreeSet::from([DietaryRestriction::GlutenFree, DietaryRestriction::Vegetarian]);

    let value = serde_json::to_value(profile_payload(&profile)).expect("serialize");
    assert_eq!(value["dietary_restrictions"], "vegetariano,libre de gluten");
}

#[test]
fn profile_payload_uses_wire_field_names() {
    let value = serde_json::to_value(profile_payload(&sample_profile())).expect("serialize");

    assert_eq!(value["age"], 28);
    assert_eq!(value["weight"], 74.5);
    assert_eq!(value["height"], 181.0);
    assert_eq!(value["gender"], "hombre");
    assert_eq!(value["activity_level"], "moderado");
    assert_eq!(value["training_frequency"], "3-4");
    assert_eq!(value["primary_goal"], "mejor rendimiento");
    assert_eq!(value["sweat_level"], "medio");
    assert_eq!(value["caffeine_tolerance"], "medio");
    assert!(value.get("weight_kg").is_none());
}

#[test]
fn none_sentinel_joins_as_the_bare_wire_value() {
    let value = serde_json::to_value(profile_payload(&sample_profile())).expect("serialize");
    assert_eq!(value["dietary_restrictions"], "no");
}

// =============================================================
// Joined product-detail fetch
// =============================================================

const PRODUCT_BODY: &str = r#"{
    "product_id": 41,
    "type_id": 2,
    "name": "Electrolyte Mix",
    "description": "Minerals for long sessions",
    "image_url": "electrolyte.png",
    "usage_recommendation": "During training",
    "is_active": true
}"#;

const NUTRITION_BODY: &str = r#"{
    "nutrition_id": 1,
    "product_id": 41,
    "serving_size": "10 g",
    "energy_kcal": 35.0,
    "protein_g": 0.0,
    "carbs_g": 8.5,
    "sugars_g": 6.0,
    "sodium_mg": 300.0,
    "potassium_mg": 150.0,
    "magnesium_mg": 60.0,
    "caffeine_mg": 0.0,
    "other_components": "citrates"
}"#;

const FLAVORS_BODY: &str = r#"[{"flavor_id": 1, "product_id": 41, "name": "Lemon"}]"#;

const ATTRIBUTES_BODY: &str = r#"[{"attribute_id": 9, "name": "Sugar free", "description": null}]"#;

fn route_request(path: &str, fail_nutrition: bool) -> (&'static str, &'static str) {
    if path.ends_with("/nutrition") {
        if fail_nutrition {
            return ("503 Service Unavailable", r#"{"message": "nutrition unavailable"}"#);
        }
        return ("200 OK", NUTRITION_BODY);
    }
    if path.ends_with("/flavors") {
        return ("200 OK", FLAVORS_BODY);
    }
    if path.ends_with("/attributes") {
        return ("200 OK", ATTRIBUTES_BODY);
    }
    ("200 OK", PRODUCT_BODY)
}

/// Serve the four product sub-resource endpoints on an ephemeral loopback
/// port, one connection per request.
async fn serve_product_endpoints(fail_nutrition: bool) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            tokio::spawn(async move {
                let mut buf = vec![0_u8; 8192];
                let n = socket.read(&mut buf).await.unwrap_or(0);
                let request = String::from_utf8_lossy(&buf[..n]).into_owned();
                let path = request.split_whitespace().nth(1).unwrap_or("/").to_string();
                let (status, body) = route_request(&path, fail_nutrition);
                let response = format!(
                    "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
            });
        }
    });

    format!("http://{addr}")
}

fn joined_client(base_url: String) -> ApiClient {
    let config = ApiConfig { base_url, request_timeout_secs: 5, connect_timeout_secs: 2 };
    ApiClient::new(&config).expect("client build")
}

#[tokio::test]
async fn product_detail_joins_all_four_fetches() {
    let base = serve_product_endpoints(false).await;
    let client = joined_client(base);

    let detail = product_detail(&client, 41).await.expect("joined fetch");
    assert_eq!(detail.product.name, "Electrolyte Mix");
    assert_eq!(detail.nutrition.sodium_mg, 300.0);
    assert_eq!(detail.flavors.len(), 1);
    assert_eq!(detail.attributes.len(), 1);
}

#[tokio::test]
async fn one_failing_sub_fetch_fails_the_whole_join() {
    let base = serve_product_endpoints(true).await;
    let client = joined_client(base);

    let err = product_detail(&client, 41).await.unwrap_err();
    assert_eq!(err, ApiError::Server { message: "nutrition unavailable".to_string(), status: 503 });
}
