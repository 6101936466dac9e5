//! Profile API Handlers
//!
//! Restaurant profile upsert, worker registration, public reads and the
//! nested menu mutation endpoints (categories → dishes → changes).

use axum::{
    Json,
    extract::{Path, State},
};

use shared::ApiResponse;
use shared::models::Role;
use shared::models as api;

use crate::api::AppResult;
use crate::AppError;
use crate::api::convert::profile_with_owner;
use crate::auth::{ADMIN_ONLY, CurrentUser};
use crate::core::ServerState;
use crate::db::models::{
    CategoryCreate, CategoryUpdate, ChangeCreate, ChangeUpdate, DishCreate, DishUpdate,
    ProfileUpsert, UserCreate,
};
use crate::db::repository::{ProfileRepository, UserRepository};
use crate::utils::validation::validate_payload;

/// GET /api/profile - 获取所有餐厅资料 (公开)
pub async fn list_public(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<api::Profile>>> {
    let repo = ProfileRepository::new(state.get_db());
    let users = UserRepository::new(state.get_db());

    let profiles = repo.find_all().await?;
    let mut result = Vec::with_capacity(profiles.len());
    for profile in profiles {
        let owner = users.find_by_id(&profile.owner.to_string()).await?;
        result.push(profile_with_owner(profile, owner.as_ref()));
    }

    Ok(Json(result))
}

/// GET /api/profile/me - 当前管理员自己的餐厅资料
pub async fn me(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<api::Profile>> {
    user.authorize(ADMIN_ONLY)?;

    let repo = ProfileRepository::new(state.get_db());
    let users = UserRepository::new(state.get_db());

    let profile = repo
        .find_by_owner(&user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("There is no profile for this user".to_string()))?;
    let owner = users.find_by_id(&user.id).await?;

    Ok(Json(profile_with_owner(profile, owner.as_ref())))
}

/// POST /api/profile - 创建或更新餐厅资料 (按管理员幂等)
pub async fn upsert(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<ProfileUpsert>,
) -> AppResult<Json<api::Profile>> {
    user.authorize(ADMIN_ONLY)?;
    validate_payload(&payload)?;

    let repo = ProfileRepository::new(state.get_db());
    let profile = repo.upsert(&user.id, payload).await?;

    Ok(Json(profile.into()))
}

/// POST /api/profile/register - 注册员工账号并挂到本餐厅
pub async fn register_worker(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(mut payload): Json<UserCreate>,
) -> AppResult<Json<api::Profile>> {
    user.authorize(ADMIN_ONLY)?;
    validate_payload(&payload)?;

    // Worker accounts always carry the worker role, whatever the body says
    payload.role = Some(Role::Worker);

    let users = UserRepository::new(state.get_db());
    let worker = users.create(payload).await?;

    if let Some(code) = worker.confirmation_code.as_deref() {
        state
            .mailer
            .send_confirmation(&worker.name, &worker.email, code);
    }

    let worker_id = worker
        .id
        .as_ref()
        .map(|t| t.to_string())
        .unwrap_or_default();

    let repo = ProfileRepository::new(state.get_db());
    let profile = repo.add_worker(&user.id, &worker_id).await?;

    tracing::info!(worker = %worker.email, "Worker registered to restaurant");

    Ok(Json(profile.into()))
}

/// DELETE /api/profile - 删除资料与账号
pub async fn delete_own(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<ApiResponse<()>>> {
    user.authorize(ADMIN_ONLY)?;

    let repo = ProfileRepository::new(state.get_db());
    let users = UserRepository::new(state.get_db());

    repo.delete_by_owner(&user.id).await?;
    users.delete(&user.id).await?;

    Ok(Json(ApiResponse::ok_with_message((), "User deleted")))
}

/// GET /api/profile/user/{profile_id} - 按 id 获取餐厅资料 (公开)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(profile_id): Path<String>,
) -> AppResult<Json<api::Profile>> {
    let repo = ProfileRepository::new(state.get_db());
    let users = UserRepository::new(state.get_db());

    let profile = repo
        .find_by_id(&profile_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;
    let owner = users.find_by_id(&profile.owner.to_string()).await?;

    Ok(Json(profile_with_owner(profile, owner.as_ref())))
}

/// GET /api/profile/menu/{profile_id} - 获取菜单 (公开)
///
/// Returns the menu exactly as stored, hidden dishes included; display
/// clients filter them.
pub async fn get_menu(
    State(state): State<ServerState>,
    Path(profile_id): Path<String>,
) -> AppResult<Json<Vec<api::Category>>> {
    let repo = ProfileRepository::new(state.get_db());
    let profile = repo
        .find_by_id(&profile_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;

    Ok(Json(profile.menu.into_iter().map(Into::into).collect()))
}

// ========== Menu mutations (admin only) ==========

/// POST /api/profile/menu/category - 新增分类 (插入到最前)
pub async fn add_category(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<CategoryCreate>,
) -> AppResult<Json<api::Profile>> {
    user.authorize(ADMIN_ONLY)?;
    validate_payload(&payload)?;

    let repo = ProfileRepository::new(state.get_db());
    let profile = repo.add_category(&user.id, payload).await?;
    Ok(Json(profile.into()))
}

/// PUT /api/profile/menu/{category_id} - 编辑分类
pub async fn update_category(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(category_id): Path<String>,
    Json(payload): Json<CategoryUpdate>,
) -> AppResult<Json<api::Profile>> {
    user.authorize(ADMIN_ONLY)?;
    validate_payload(&payload)?;

    let repo = ProfileRepository::new(state.get_db());
    let profile = repo.update_category(&user.id, &category_id, payload).await?;
    Ok(Json(profile.into()))
}

/// DELETE /api/profile/menu/{category_id} - 删除分类
pub async fn delete_category(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(category_id): Path<String>,
) -> AppResult<Json<api::Profile>> {
    user.authorize(ADMIN_ONLY)?;

    let repo = ProfileRepository::new(state.get_db());
    let profile = repo.delete_category(&user.id, &category_id).await?;
    Ok(Json(profile.into()))
}

/// POST /api/profile/menu/{category_id}/dish - 新增菜品
pub async fn add_dish(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(category_id): Path<String>,
    Json(payload): Json<DishCreate>,
) -> AppResult<Json<api::Profile>> {
    user.authorize(ADMIN_ONLY)?;
    validate_payload(&payload)?;

    let repo = ProfileRepository::new(state.get_db());
    let profile = repo.add_dish(&user.id, &category_id, payload).await?;
    Ok(Json(profile.into()))
}

/// PUT /api/profile/menu/{category_id}/{dish_id} - 编辑菜品
pub async fn update_dish(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path((category_id, dish_id)): Path<(String, String)>,
    Json(payload): Json<DishUpdate>,
) -> AppResult<Json<api::Profile>> {
    user.authorize(ADMIN_ONLY)?;
    validate_payload(&payload)?;

    let repo = ProfileRepository::new(state.get_db());
    let profile = repo
        .update_dish(&user.id, &category_id, &dish_id, payload)
        .await?;
    Ok(Json(profile.into()))
}

/// DELETE /api/profile/menu/{category_id}/{dish_id} - 删除菜品
pub async fn delete_dish(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path((category_id, dish_id)): Path<(String, String)>,
) -> AppResult<Json<api::Profile>> {
    user.authorize(ADMIN_ONLY)?;

    let repo = ProfileRepository::new(state.get_db());
    let profile = repo.delete_dish(&user.id, &category_id, &dish_id).await?;
    Ok(Json(profile.into()))
}

/// POST /api/profile/menu/{category_id}/{dish_id}/change - 新增配料变更
pub async fn add_change(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path((category_id, dish_id)): Path<(String, String)>,
    Json(payload): Json<ChangeCreate>,
) -> AppResult<Json<api::Profile>> {
    user.authorize(ADMIN_ONLY)?;
    validate_payload(&payload)?;

    let repo = ProfileRepository::new(state.get_db());
    let profile = repo
        .add_change(&user.id, &category_id, &dish_id, payload)
        .await?;
    Ok(Json(profile.into()))
}

/// PUT /api/profile/menu/{category_id}/{dish_id}/{change_id} - 编辑变更
///
/// Omitted change_price leaves the stored price unchanged.
pub async fn update_change(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path((category_id, dish_id, change_id)): Path<(String, String, String)>,
    Json(payload): Json<ChangeUpdate>,
) -> AppResult<Json<api::Profile>> {
    user.authorize(ADMIN_ONLY)?;
    validate_payload(&payload)?;

    let repo = ProfileRepository::new(state.get_db());
    let profile = repo
        .update_change(&user.id, &category_id, &dish_id, &change_id, payload)
        .await?;
    Ok(Json(profile.into()))
}

/// DELETE /api/profile/menu/{category_id}/{dish_id}/{change_id} - 删除变更
pub async fn delete_change(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path((category_id, dish_id, change_id)): Path<(String, String, String)>,
) -> AppResult<Json<api::Profile>> {
    user.authorize(ADMIN_ONLY)?;

    let repo = ProfileRepository::new(state.get_db());
    let profile = repo
        .delete_change(&user.id, &category_id, &dish_id, &change_id)
        .await?;
    Ok(Json(profile.into()))
}
