//! Profile Repository
//!
//! Every menu mutation is a read-modify-write of the whole profile
//! document: locate the profile by its owning admin, mutate the nested
//! menu through the checked model helpers, write the document back. Only
//! the store's per-document atomicity applies across concurrent writers.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, parse_id};
use crate::db::models::{
    Category, CategoryCreate, CategoryUpdate, Change, ChangeCreate, ChangeUpdate, Dish, DishCreate,
    DishUpdate, Profile, ProfileUpsert,
};

const TABLE: &str = "profile";

#[derive(Clone)]
pub struct ProfileRepository {
    base: BaseRepository,
}

impl ProfileRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all profiles
    pub async fn find_all(&self) -> RepoResult<Vec<Profile>> {
        let profiles: Vec<Profile> = self
            .base
            .db()
            .query("SELECT * FROM profile ORDER BY restaurant_name")
            .await?
            .take(0)?;
        Ok(profiles)
    }

    /// Find profile by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Profile>> {
        let thing = parse_id(TABLE, id);
        let profile: Option<Profile> = self.base.db().select(thing).await?;
        Ok(profile)
    }

    /// Find the profile owned by an admin user
    pub async fn find_by_owner(&self, owner_id: &str) -> RepoResult<Option<Profile>> {
        let owner = owner_id.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM profile WHERE owner = $owner LIMIT 1")
            .bind(("owner", owner))
            .await?;
        let profiles: Vec<Profile> = result.take(0)?;
        Ok(profiles.into_iter().next())
    }

    /// Find the profile a user belongs to, as owner or registered worker
    pub async fn find_by_member(&self, user_id: &str) -> RepoResult<Option<Profile>> {
        let user = user_id.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM profile WHERE owner = $user OR workers CONTAINS $user LIMIT 1")
            .bind(("user", user))
            .await?;
        let profiles: Vec<Profile> = result.take(0)?;
        Ok(profiles.into_iter().next())
    }

    /// Create-or-replace the profile's scalar fields, keyed by owner
    /// (idempotent by owning admin id)
    pub async fn upsert(&self, owner_id: &str, data: ProfileUpsert) -> RepoResult<Profile> {
        match self.find_by_owner(owner_id).await? {
            Some(mut profile) => {
                profile.apply_upsert(data);
                self.save(&profile).await
            }
            None => {
                let owner = parse_id("user", owner_id);
                let profile = Profile::new(owner, data);
                let created: Option<Profile> =
                    self.base.db().create(TABLE).content(profile).await?;
                created.ok_or_else(|| RepoError::Database("Failed to create profile".to_string()))
            }
        }
    }

    /// Append a worker account to the profile's worker list
    pub async fn add_worker(&self, owner_id: &str, worker_id: &str) -> RepoResult<Profile> {
        let mut profile = self.require_by_owner(owner_id).await?;
        profile.workers.push(parse_id("user", worker_id));
        self.save(&profile).await
    }

    /// Delete the profile owned by an admin user
    pub async fn delete_by_owner(&self, owner_id: &str) -> RepoResult<bool> {
        let owner = owner_id.to_string();
        self.base
            .db()
            .query("DELETE FROM profile WHERE owner = $owner")
            .bind(("owner", owner))
            .await?;
        Ok(true)
    }

    // ========== Menu mutations ==========

    /// Prepend a new category
    pub async fn add_category(&self, owner_id: &str, data: CategoryCreate) -> RepoResult<Profile> {
        let mut profile = self.require_by_owner(owner_id).await?;
        profile.prepend_category(Category::new(data));
        self.save(&profile).await
    }

    /// Replace a category's fields in place
    pub async fn update_category(
        &self,
        owner_id: &str,
        category_id: &str,
        data: CategoryUpdate,
    ) -> RepoResult<Profile> {
        let mut profile = self.require_by_owner(owner_id).await?;
        let category = locate_category(&mut profile, category_id)?;
        category.category_name = data.category_name;
        category.category_desc = data.category_desc;
        self.save(&profile).await
    }

    /// Remove a category
    pub async fn delete_category(&self, owner_id: &str, category_id: &str) -> RepoResult<Profile> {
        let mut profile = self.require_by_owner(owner_id).await?;
        profile
            .remove_category(category_id)
            .ok_or_else(|| category_not_found(category_id))?;
        self.save(&profile).await
    }

    /// Prepend a new dish under the located category
    pub async fn add_dish(
        &self,
        owner_id: &str,
        category_id: &str,
        data: DishCreate,
    ) -> RepoResult<Profile> {
        let mut profile = self.require_by_owner(owner_id).await?;
        let category = locate_category(&mut profile, category_id)?;
        category.prepend_dish(Dish::new(data));
        self.save(&profile).await
    }

    /// Replace a dish's fields in place
    pub async fn update_dish(
        &self,
        owner_id: &str,
        category_id: &str,
        dish_id: &str,
        data: DishUpdate,
    ) -> RepoResult<Profile> {
        let mut profile = self.require_by_owner(owner_id).await?;
        let dish = locate_dish(&mut profile, category_id, dish_id)?;
        dish.dish_name = data.dish_name;
        dish.dish_desc = data.dish_desc;
        dish.dish_price = data.dish_price;
        if let Some(hide) = data.hide {
            dish.hide = hide;
        }
        self.save(&profile).await
    }

    /// Remove a dish
    pub async fn delete_dish(
        &self,
        owner_id: &str,
        category_id: &str,
        dish_id: &str,
    ) -> RepoResult<Profile> {
        let mut profile = self.require_by_owner(owner_id).await?;
        let category = locate_category(&mut profile, category_id)?;
        category
            .remove_dish(dish_id)
            .ok_or_else(|| dish_not_found(dish_id))?;
        self.save(&profile).await
    }

    /// Prepend a new change under the located dish
    pub async fn add_change(
        &self,
        owner_id: &str,
        category_id: &str,
        dish_id: &str,
        data: ChangeCreate,
    ) -> RepoResult<Profile> {
        let mut profile = self.require_by_owner(owner_id).await?;
        let dish = locate_dish(&mut profile, category_id, dish_id)?;
        dish.prepend_change(Change::new(data));
        self.save(&profile).await
    }

    /// Replace a change's name; price only when one is supplied
    pub async fn update_change(
        &self,
        owner_id: &str,
        category_id: &str,
        dish_id: &str,
        change_id: &str,
        data: ChangeUpdate,
    ) -> RepoResult<Profile> {
        let mut profile = self.require_by_owner(owner_id).await?;
        let dish = locate_dish(&mut profile, category_id, dish_id)?;
        let change = dish
            .change_mut(change_id)
            .ok_or_else(|| change_not_found(change_id))?;
        change.change_name = data.change_name;
        if let Some(price) = data.change_price {
            change.change_price = price;
        }
        self.save(&profile).await
    }

    /// Remove a change
    pub async fn delete_change(
        &self,
        owner_id: &str,
        category_id: &str,
        dish_id: &str,
        change_id: &str,
    ) -> RepoResult<Profile> {
        let mut profile = self.require_by_owner(owner_id).await?;
        let dish = locate_dish(&mut profile, category_id, dish_id)?;
        dish.remove_change(change_id)
            .ok_or_else(|| change_not_found(change_id))?;
        self.save(&profile).await
    }

    // ========== Internals ==========

    async fn require_by_owner(&self, owner_id: &str) -> RepoResult<Profile> {
        self.find_by_owner(owner_id)
            .await?
            .ok_or_else(|| RepoError::NotFound("There is no profile for this user".to_string()))
    }

    /// Write the whole document back
    async fn save(&self, profile: &Profile) -> RepoResult<Profile> {
        let id = profile
            .id
            .clone()
            .ok_or_else(|| RepoError::Database("Profile is missing its id".to_string()))?;
        let updated: Option<Profile> = self
            .base
            .db()
            .update(id)
            .content(profile.clone())
            .await?;
        updated.ok_or_else(|| RepoError::Database("Failed to save profile".to_string()))
    }
}

fn locate_category<'a>(
    profile: &'a mut Profile,
    category_id: &str,
) -> RepoResult<&'a mut Category> {
    profile
        .category_mut(category_id)
        .ok_or_else(|| category_not_found(category_id))
}

fn locate_dish<'a>(
    profile: &'a mut Profile,
    category_id: &str,
    dish_id: &str,
) -> RepoResult<&'a mut Dish> {
    locate_category(profile, category_id)?
        .dish_mut(dish_id)
        .ok_or_else(|| dish_not_found(dish_id))
}

fn category_not_found(id: &str) -> RepoError {
    RepoError::NotFound(format!("Category {} not found", id))
}

fn dish_not_found(id: &str) -> RepoError {
    RepoError::NotFound(format!("Dish {} not found", id))
}

fn change_not_found(id: &str) -> RepoError {
    RepoError::NotFound(format!("Change {} not found", id))
}
