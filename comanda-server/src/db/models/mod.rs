//! Database Models

pub mod order;
pub mod profile;
pub mod serde_helpers;
pub mod user;

pub use order::{Order, OrderChange, OrderCreate, OrderId, OrderItem, OrderUpdate};
pub use profile::{
    Category, CategoryCreate, CategoryUpdate, Change, ChangeCreate, ChangeUpdate, Dish, DishCreate,
    DishUpdate, Profile, ProfileId, ProfileUpsert,
};
pub use user::{PasswordChange, PasswordReset, RecoverRequest, User, UserCreate, UserId, UserStatus};
