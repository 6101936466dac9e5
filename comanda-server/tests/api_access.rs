//! HTTP-level access control and ordering flows, driven through the full
//! router with oneshot requests.

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use comanda_server::core::{Config, ServerState};
use comanda_server::db::models::UserCreate;
use comanda_server::db::repository::{OrderRepository, ProfileRepository, UserRepository};
use shared::Role;

struct TestApp {
    _tmp: tempfile::TempDir,
    app: Router,
    state: ServerState,
}

async fn spawn_app() -> TestApp {
    let tmp = tempfile::tempdir().unwrap();
    let config = Config::with_overrides(tmp.path().to_string_lossy().to_string(), 0);
    let state = ServerState::initialize(&config).await;
    let app = comanda_server::api::build_app(state.clone());
    TestApp {
        _tmp: tmp,
        app,
        state,
    }
}

impl TestApp {
    /// Create a user directly in the store and mint a token for it
    async fn user_with_token(&self, name: &str, email: &str, role: Role) -> (String, String) {
        let users = UserRepository::new(self.state.get_db());
        let user = users
            .create(UserCreate {
                name: name.to_string(),
                email: email.to_string(),
                password: "secret-password".to_string(),
                role: Some(role),
            })
            .await
            .unwrap();
        let id = user.id.as_ref().unwrap().to_string();
        let token = self
            .state
            .get_jwt_service()
            .generate_token(&id, role)
            .unwrap();
        (id, token)
    }

    async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 1 << 20)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }
}

fn latte_items() -> Value {
    json!([{
        "dish_name": "Latte",
        "dish_price": 3.50,
        "change_list": [{"change_name": "Extra shot", "change_price": 0.75}]
    }])
}

/// Build one restaurant over HTTP, returning its profile id
async fn build_restaurant(app: &TestApp, admin_token: &str, name: &str) -> String {
    let (status, profile) = app
        .request(
            "POST",
            "/api/profile",
            Some(admin_token),
            Some(json!({"restaurant_name": name, "restaurant_desc": "desc"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    profile["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let app = spawn_app().await;
    let (status, body) = app.request("GET", "/api/profile/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "E3001");
}

#[tokio::test]
async fn garbage_token_is_unauthorized() {
    let app = spawn_app().await;
    let (status, body) = app
        .request("GET", "/api/profile/me", Some("not-a-jwt"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "E3002");
}

#[tokio::test]
async fn worker_token_is_rejected_on_admin_routes() {
    let app = spawn_app().await;
    let (_id, worker_token) = app
        .user_with_token("Wes", "worker@cafe.com", Role::Worker)
        .await;

    let (status, body) = app
        .request(
            "POST",
            "/api/profile/menu/category",
            Some(&worker_token),
            Some(json!({"category_name": "Drinks", "category_desc": "desc"})),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "E2001");
}

#[tokio::test]
async fn validation_errors_carry_field_details() {
    let app = spawn_app().await;
    let (status, body) = app
        .request(
            "POST",
            "/api/users",
            None,
            Some(json!({"name": "", "email": "nope", "password": "123"})),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E0002");
    let errors = body["errors"].as_array().expect("field errors expected");
    assert_eq!(errors.len(), 3);
    assert!(errors.iter().any(|e| e["field"] == "email"));
}

#[tokio::test]
async fn register_confirm_login_round_trip() {
    let app = spawn_app().await;

    let (status, body) = app
        .request(
            "POST",
            "/api/users",
            None,
            Some(json!({"name": "Ana", "email": "Ana@Cafe.com", "password": "secret-password"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Please confirm your account");

    // Pending accounts cannot log in yet
    let credentials = json!({"email": "ana@cafe.com", "password": "secret-password"});
    let (status, _) = app
        .request("POST", "/api/auth", None, Some(credentials.clone()))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Redeem the emailed code (read from the store, the mail relay is off)
    let users = UserRepository::new(app.state.get_db());
    let user = users.find_by_email("ana@cafe.com").await.unwrap().unwrap();
    let code = user.confirmation_code.unwrap();

    let (status, _) = app
        .request("GET", &format!("/api/auth/confirm/{code}"), None, None)
        .await;
    assert_eq!(status, StatusCode::OK);

    // Login now issues a token that resolves back to the same account
    let (status, login) = app
        .request("POST", "/api/auth", None, Some(credentials))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(login["user"]["role"], "user");
    let token = login["token"].as_str().unwrap().to_string();

    let (status, me) = app.request("GET", "/api/auth", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["email"], "ana@cafe.com");
    assert_eq!(me["status"], "Active");
}

#[tokio::test]
async fn table_order_scenario_totals_exclude_tip() {
    let app = spawn_app().await;
    let (_admin_id, admin_token) = app
        .user_with_token("Ana", "owner@cafe.com", Role::Admin)
        .await;

    let profile_id = build_restaurant(&app, &admin_token, "Cafe").await;

    // Category
    let (status, profile) = app
        .request(
            "POST",
            "/api/profile/menu/category",
            Some(&admin_token),
            Some(json!({"category_name": "Drinks", "category_desc": "desc"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let category_id = profile["menu"][0]["id"].as_str().unwrap().to_string();

    // Dish
    let (status, profile) = app
        .request(
            "POST",
            &format!("/api/profile/menu/{category_id}/dish"),
            Some(&admin_token),
            Some(json!({"dish_name": "Latte", "dish_desc": "desc", "dish_price": 3.50})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let dish_id = profile["menu"][0]["dish"][0]["id"].as_str().unwrap();

    // Change
    let (status, _) = app
        .request(
            "POST",
            &format!("/api/profile/menu/{category_id}/{dish_id}/change"),
            Some(&admin_token),
            Some(json!({"change_name": "Extra shot", "change_price": 0.75})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    // Customer places the order, no token required
    let (status, order) = app
        .request(
            "POST",
            &format!("/api/order/{profile_id}/5"),
            None,
            Some(json!({"items": latte_items(), "tip": 1.0})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["total_price"], 4.25);
    assert_eq!(order["tip"], 1.0);
    assert_eq!(order["table_number"], 5);
    assert_eq!(order["status"], false);

    // Staff listing sees it
    let (status, orders) = app
        .request("GET", "/api/order/me", Some(&admin_token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(orders.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn ordering_at_unknown_restaurant_is_not_found() {
    let app = spawn_app().await;
    let (status, body) = app
        .request(
            "POST",
            "/api/order/profile:doesnotexist/5",
            None,
            Some(json!({"items": latte_items(), "tip": 0.0})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "E0003");
}

#[tokio::test]
async fn cross_restaurant_order_edit_is_forbidden() {
    let app = spawn_app().await;

    // Restaurant 1 with an order
    let (_a1, admin1_token) = app
        .user_with_token("Ana", "owner1@cafe.com", Role::Admin)
        .await;
    let rest1 = build_restaurant(&app, &admin1_token, "Cafe Uno").await;

    let (status, order) = app
        .request(
            "POST",
            &format!("/api/order/{rest1}/5"),
            None,
            Some(json!({"items": latte_items(), "tip": 1.0})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let order_id = order["id"].as_str().unwrap().to_string();

    // Restaurant 2 with a registered worker
    let (admin2_id, admin2_token) = app
        .user_with_token("Bea", "owner2@cafe.com", Role::Admin)
        .await;
    build_restaurant(&app, &admin2_token, "Cafe Dos").await;
    let (worker2_id, worker2_token) = app
        .user_with_token("Wes", "worker2@cafe.com", Role::Worker)
        .await;
    ProfileRepository::new(app.state.get_db())
        .add_worker(&admin2_id, &worker2_id)
        .await
        .unwrap();

    // The other restaurant's worker cannot edit the order
    let (status, body) = app
        .request(
            "PUT",
            &format!("/api/order/{order_id}"),
            Some(&worker2_token),
            Some(json!({"items": [{"dish_name": "Latte", "dish_price": 0.01, "change_list": []}]})),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "E2001");

    // And the order is unchanged
    let stored = OrderRepository::new(app.state.get_db())
        .find_by_id(&order_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.total_price, 4.25);
    assert_eq!(stored.items[0].dish_price, 3.50);

    // The owning restaurant can edit, and the total is recomputed
    let (status, updated) = app
        .request(
            "PUT",
            &format!("/api/order/{order_id}"),
            Some(&admin1_token),
            Some(json!({"items": [
                {"dish_name": "Latte", "dish_price": 3.50, "change_list": []},
                {"dish_name": "Croissant", "dish_price": 2.20, "change_list": []}
            ]})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["total_price"], 5.7);
    assert_eq!(updated["tip"], 1.0);
}

#[tokio::test]
async fn customer_role_cannot_resolve_a_restaurant() {
    let app = spawn_app().await;
    let (_id, user_token) = app
        .user_with_token("Cal", "customer@example.com", Role::User)
        .await;

    let (status, body) = app
        .request("GET", "/api/order/me", Some(&user_token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "E0003");
}

#[tokio::test]
async fn hidden_dishes_remain_in_public_menu() {
    let app = spawn_app().await;
    let (_id, admin_token) = app
        .user_with_token("Ana", "owner@cafe.com", Role::Admin)
        .await;
    let profile_id = build_restaurant(&app, &admin_token, "Cafe").await;

    let (_, profile) = app
        .request(
            "POST",
            "/api/profile/menu/category",
            Some(&admin_token),
            Some(json!({"category_name": "Drinks", "category_desc": "desc"})),
        )
        .await;
    let category_id = profile["menu"][0]["id"].as_str().unwrap();

    let (status, _) = app
        .request(
            "POST",
            &format!("/api/profile/menu/{category_id}/dish"),
            Some(&admin_token),
            Some(json!({
                "dish_name": "Off-menu special",
                "dish_desc": "ask the chef",
                "dish_price": 9.0,
                "hide": true
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    // Public menu read returns the hidden dish as stored
    let (status, menu) = app
        .request("GET", &format!("/api/profile/menu/{profile_id}"), None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(menu[0]["dish"][0]["hide"], true);
}
