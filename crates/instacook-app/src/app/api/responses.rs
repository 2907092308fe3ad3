//! JSON representations returned by the API.

use chrono::{DateTime, Utc};
use instacook_db::model::recipe::Recipe;
use instacook_db::model::user::User;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct RecipeResponse {
    pub id: uuid::Uuid,
    pub name: String,
    pub description: String,
    pub num_of_servings: Option<i32>,
    pub cook_time: Option<i32>,
    pub directions: String,
    pub is_publish: bool,
    pub user_id: Option<uuid::Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Recipe> for RecipeResponse {
    fn from(recipe: Recipe) -> Self {
        Self {
            id: recipe.id,
            name: recipe.name,
            description: recipe.description,
            num_of_servings: recipe.num_of_servings,
            cook_time: recipe.cook_time,
            directions: recipe.directions,
            is_publish: recipe.is_publish,
            user_id: recipe.user_id,
            created_at: recipe.created_at,
            updated_at: recipe.updated_at,
        }
    }
}

/// What the account holder sees about themselves.
#[derive(Debug, Clone, Serialize)]
pub struct PrivateUserResponse {
    pub id: uuid::Uuid,
    pub username: String,
    pub email: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for PrivateUserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            is_active: user.is_active,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// What everybody else sees about a user.
#[derive(Debug, Clone, Serialize)]
pub struct PublicUserResponse {
    pub id: uuid::Uuid,
    pub username: String,
}

impl From<User> for PublicUserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum UserResponse {
    Private(PrivateUserResponse),
    Public(PublicUserResponse),
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AccessTokenResponse {
    pub access_token: String,
}
