use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::tags::TagSplit;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
}

/// Display name and bio, both optional; posts and comments fall back to the
/// username when no display name is set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub authorname: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub author_name: String,
    pub username: String,
    pub user_id: i64,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl Post {
    /// Whether `user` owns this post. Ownership is compared by stable user
    /// id, never by display name, which any user can change at will.
    pub fn authored_by(&self, user: &User) -> bool {
        self.user_id == user.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub content: String,
    pub author_name: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub replies: Vec<Comment>,
}

#[derive(Debug, Serialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SignupResponse {
    pub id: i64,
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct UpdateProfileRequest {
    pub user_data: UserProfile,
}

impl UpdateProfileRequest {
    /// Builds the profile payload from raw form input. The display name is
    /// trimmed and falls back to the username when blank, so the backend
    /// never stores an empty author name.
    pub fn new(display_name: &str, bio: &str, username: &str) -> Self {
        let trimmed = display_name.trim();
        let authorname = if trimmed.is_empty() { username } else { trimmed };

        Self {
            user_data: UserProfile {
                authorname: Some(authorname.to_string()),
                bio: Some(bio.to_string()),
            },
        }
    }
}

/// Body shared by post creation and post update.
#[derive(Debug, Serialize)]
pub struct SavePostRequest {
    pub title: String,
    pub description: String,
    pub user_id: i64,
    pub tag_ids: Vec<i64>,
    pub new_tags: Vec<String>,
}

impl SavePostRequest {
    pub fn new(title: String, description: String, user_id: i64, tags: TagSplit) -> Self {
        Self {
            title,
            description,
            user_id,
            tag_ids: tags.tag_ids,
            new_tags: tags.new_tags,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateCommentRequest {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct FavoriteResponse {
    pub favorited: bool,
}
