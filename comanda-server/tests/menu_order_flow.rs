//! Repository-level flows over a real embedded database: registration
//! uniqueness, menu mutation semantics, and order pricing snapshots.

use chrono::Utc;

use comanda_server::db::DbService;
use comanda_server::db::models::{
    CategoryCreate, ChangeCreate, ChangeUpdate, DishCreate, Order, OrderChange, OrderItem,
    ProfileUpsert, UserCreate, UserStatus,
};
use comanda_server::db::repository::{
    OrderRepository, ProfileRepository, RepoError, UserRepository,
};
use comanda_server::pricing;
use shared::Role;

async fn setup() -> (tempfile::TempDir, DbService) {
    let tmp = tempfile::tempdir().unwrap();
    let db = DbService::new(&tmp.path().join("test.db")).await.unwrap();
    (tmp, db)
}

fn user_payload(name: &str, email: &str, role: Option<Role>) -> UserCreate {
    UserCreate {
        name: name.to_string(),
        email: email.to_string(),
        password: "secret-password".to_string(),
        role,
    }
}

fn upsert_payload(name: &str, desc: &str) -> ProfileUpsert {
    ProfileUpsert {
        restaurant_name: name.to_string(),
        restaurant_desc: desc.to_string(),
        seller_payment_id: None,
        table_list: None,
    }
}

#[tokio::test]
async fn duplicate_email_is_rejected_case_insensitively() {
    let (_tmp, db) = setup().await;
    let users = UserRepository::new(db.db.clone());

    users
        .create(user_payload("Ana", "Owner@Example.com", None))
        .await
        .expect("first registration should succeed");

    let err = users
        .create(user_payload("Bea", "owner@example.COM", None))
        .await
        .expect_err("second registration should conflict");

    assert!(matches!(err, RepoError::Duplicate(_)));
}

#[tokio::test]
async fn registration_defaults_and_activation() {
    let (_tmp, db) = setup().await;
    let users = UserRepository::new(db.db.clone());

    let user = users
        .create(user_payload("Ana", "ana@example.com", None))
        .await
        .unwrap();

    assert_eq!(user.status, UserStatus::Pending);
    assert_eq!(user.role, Role::User);
    assert_eq!(user.email, "ana@example.com");
    let code = user.confirmation_code.clone().expect("code should be set");
    assert!(user.avatar.is_some());

    let activated = users
        .activate_by_code(&code)
        .await
        .unwrap()
        .expect("code should match the account");
    assert_eq!(activated.status, UserStatus::Active);

    // Unknown code activates nothing
    assert!(users.activate_by_code("no-such-code").await.unwrap().is_none());
}

#[tokio::test]
async fn reset_code_expires_after_consumption() {
    let (_tmp, db) = setup().await;
    let users = UserRepository::new(db.db.clone());

    let user = users
        .create(user_payload("Ana", "ana@example.com", None))
        .await
        .unwrap();
    let id = user.id.as_ref().unwrap().to_string();

    let with_code = users.issue_reset_code(&id).await.unwrap();
    let expires = with_code.reset_password_expires.expect("expiry should be set");
    assert!(expires > Utc::now());

    let hash = comanda_server::db::models::User::hash_password("new-password").unwrap();
    let consumed = users.reset_password(&id, hash).await.unwrap();

    // Boundary moved to now: the code is no longer redeemable
    assert!(consumed.reset_password_expires.unwrap() <= Utc::now());
    assert!(consumed.verify_password("new-password").unwrap());
}

#[tokio::test]
async fn menu_flow_and_order_pricing_scenario() {
    let (_tmp, db) = setup().await;
    let users = UserRepository::new(db.db.clone());
    let profiles = ProfileRepository::new(db.db.clone());
    let orders = OrderRepository::new(db.db.clone());

    let admin = users
        .create(user_payload("Ana", "owner@cafe.com", Some(Role::Admin)))
        .await
        .unwrap();
    let admin_id = admin.id.as_ref().unwrap().to_string();

    // Profile upsert is idempotent by owner
    let profile = profiles
        .upsert(&admin_id, upsert_payload("Cafe", "desc"))
        .await
        .unwrap();
    let profile_again = profiles
        .upsert(&admin_id, upsert_payload("Cafe", "better desc"))
        .await
        .unwrap();
    assert_eq!(profile.id, profile_again.id);
    assert_eq!(profile_again.restaurant_desc, "better desc");

    // Build the menu: category → dish → change
    let profile = profiles
        .add_category(
            &admin_id,
            CategoryCreate {
                category_name: "Drinks".to_string(),
                category_desc: "desc".to_string(),
            },
        )
        .await
        .unwrap();
    let category_id = profile.menu[0].id.clone();

    let profile = profiles
        .add_dish(
            &admin_id,
            &category_id,
            DishCreate {
                dish_name: "Latte".to_string(),
                dish_desc: "espresso + milk".to_string(),
                dish_price: 3.50,
                hide: None,
            },
        )
        .await
        .unwrap();
    let dish_id = profile.menu[0].dish[0].id.clone();

    let profile = profiles
        .add_change(
            &admin_id,
            &category_id,
            &dish_id,
            ChangeCreate {
                change_name: "Extra shot".to_string(),
                change_price: Some(0.75),
            },
        )
        .await
        .unwrap();
    assert_eq!(profile.menu[0].dish[0].change_list.len(), 1);

    // Place the order for table 5 with tip 1
    let items = vec![OrderItem {
        dish_name: "Latte".to_string(),
        dish_price: 3.50,
        change_list: vec![OrderChange {
            change_name: "Extra shot".to_string(),
            change_price: 0.75,
        }],
    }];
    pricing::validate_items(&items).unwrap();
    let total_price = pricing::to_f64(pricing::order_total(&items));

    let order = orders
        .create(Order {
            id: None,
            restaurant: profile_again.id.clone().unwrap(),
            table_number: 5,
            created_at: Utc::now(),
            status: false,
            items,
            tip: 1.0,
            total_price,
        })
        .await
        .unwrap();

    assert_eq!(order.total_price, 4.25);
    assert_eq!(order.tip, 1.0);
    assert!(!order.status, "orders start open");

    // Snapshot pricing: a later menu edit never touches the stored order
    profiles
        .update_dish(
            &admin_id,
            &category_id,
            &dish_id,
            comanda_server::db::models::DishUpdate {
                dish_name: "Latte".to_string(),
                dish_desc: "espresso + milk".to_string(),
                dish_price: 9.99,
                hide: None,
            },
        )
        .await
        .unwrap();

    let order_id = order.id.as_ref().unwrap().to_string();
    let stored = orders.find_by_id(&order_id).await.unwrap().unwrap();
    assert_eq!(stored.items[0].dish_price, 3.50);
    assert_eq!(stored.total_price, 4.25);
}

#[tokio::test]
async fn change_edit_without_price_keeps_stored_price() {
    let (_tmp, db) = setup().await;
    let users = UserRepository::new(db.db.clone());
    let profiles = ProfileRepository::new(db.db.clone());

    let admin = users
        .create(user_payload("Ana", "owner@cafe.com", Some(Role::Admin)))
        .await
        .unwrap();
    let admin_id = admin.id.as_ref().unwrap().to_string();

    profiles
        .upsert(&admin_id, upsert_payload("Cafe", "desc"))
        .await
        .unwrap();
    let profile = profiles
        .add_category(
            &admin_id,
            CategoryCreate {
                category_name: "Drinks".to_string(),
                category_desc: "desc".to_string(),
            },
        )
        .await
        .unwrap();
    let category_id = profile.menu[0].id.clone();
    let profile = profiles
        .add_dish(
            &admin_id,
            &category_id,
            DishCreate {
                dish_name: "Latte".to_string(),
                dish_desc: "desc".to_string(),
                dish_price: 3.50,
                hide: None,
            },
        )
        .await
        .unwrap();
    let dish_id = profile.menu[0].dish[0].id.clone();
    let profile = profiles
        .add_change(
            &admin_id,
            &category_id,
            &dish_id,
            ChangeCreate {
                change_name: "Extra shot".to_string(),
                change_price: Some(0.75),
            },
        )
        .await
        .unwrap();
    let change_id = profile.menu[0].dish[0].change_list[0].id.clone();

    // Omitted price → unchanged
    let profile = profiles
        .update_change(
            &admin_id,
            &category_id,
            &dish_id,
            &change_id,
            ChangeUpdate {
                change_name: "Double shot".to_string(),
                change_price: None,
            },
        )
        .await
        .unwrap();
    let change = &profile.menu[0].dish[0].change_list[0];
    assert_eq!(change.change_name, "Double shot");
    assert_eq!(change.change_price, 0.75);

    // Provided price → replaced
    let profile = profiles
        .update_change(
            &admin_id,
            &category_id,
            &dish_id,
            &change_id,
            ChangeUpdate {
                change_name: "Double shot".to_string(),
                change_price: Some(1.20),
            },
        )
        .await
        .unwrap();
    assert_eq!(profile.menu[0].dish[0].change_list[0].change_price, 1.20);
}

#[tokio::test]
async fn deleting_a_category_spares_its_siblings() {
    let (_tmp, db) = setup().await;
    let users = UserRepository::new(db.db.clone());
    let profiles = ProfileRepository::new(db.db.clone());

    let admin = users
        .create(user_payload("Ana", "owner@cafe.com", Some(Role::Admin)))
        .await
        .unwrap();
    let admin_id = admin.id.as_ref().unwrap().to_string();
    profiles
        .upsert(&admin_id, upsert_payload("Cafe", "desc"))
        .await
        .unwrap();

    for name in ["A", "B", "C"] {
        profiles
            .add_category(
                &admin_id,
                CategoryCreate {
                    category_name: name.to_string(),
                    category_desc: format!("{name} desc"),
                },
            )
            .await
            .unwrap();
    }

    let profile = profiles.find_by_owner(&admin_id).await.unwrap().unwrap();
    // Prepend order: C, B, A
    assert_eq!(profile.menu[0].category_name, "C");
    let target = profile.menu[1].id.clone();
    let survivors: Vec<String> = profile
        .menu
        .iter()
        .filter(|c| c.id != target)
        .map(|c| c.id.clone())
        .collect();

    let profile = profiles.delete_category(&admin_id, &target).await.unwrap();
    let after: Vec<String> = profile.menu.iter().map(|c| c.id.clone()).collect();
    assert_eq!(after, survivors);

    // Deleting an unknown id is a typed not-found, not an index panic
    let err = profiles
        .delete_category(&admin_id, "no-such-id")
        .await
        .expect_err("unknown category should be a typed error");
    assert!(matches!(err, RepoError::NotFound(_)));
}
