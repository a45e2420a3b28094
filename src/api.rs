//! Typed client for the blog backend's REST API.

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use thiserror::Error;

use crate::config::Config;
use crate::models::{
    Comment, CreateCommentRequest, FavoriteResponse, LoginRequest, LoginResponse, Post,
    SavePostRequest, SignupRequest, SignupResponse, Tag, UpdateProfileRequest, UserProfile,
};
use crate::session::Session;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server responded with {status}: {message}")]
    Status { status: StatusCode, message: String },
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ApiError::Status {
                status: StatusCode::NOT_FOUND,
                ..
            }
        )
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            ApiError::Status {
                status: StatusCode::UNAUTHORIZED,
                ..
            }
        )
    }
}

pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(config: &Config) -> Self {
        Self {
            base_url: config.api_url.clone(),
            token: None,
            http: reqwest::Client::new(),
        }
    }

    pub fn with_session(config: &Config, session: &Session) -> Self {
        let mut client = Self::new(config);
        client.token = Some(session.token.clone());
        client
    }

    pub async fn signup(&self, username: &str, password: &str) -> Result<SignupResponse, ApiError> {
        let payload = SignupRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response = self
            .request(Method::POST, "/signup")
            .json(&payload)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let payload = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response = self
            .request(Method::POST, "/login")
            .json(&payload)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    pub async fn current_user_data(&self) -> Result<UserProfile, ApiError> {
        let response = self
            .request(Method::GET, "/current_user_data")
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    pub async fn update_user_data(
        &self,
        payload: &UpdateProfileRequest,
    ) -> Result<UserProfile, ApiError> {
        let response = self
            .request(Method::PUT, "/user_datum")
            .json(payload)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    pub async fn posts(&self) -> Result<Vec<Post>, ApiError> {
        let response = self.request(Method::GET, "/posts").send().await?;
        Ok(check(response).await?.json().await?)
    }

    pub async fn post(&self, id: i64) -> Result<Post, ApiError> {
        let response = self
            .request(Method::GET, &format!("/posts/{}", id))
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    pub async fn create_post(&self, payload: &SavePostRequest) -> Result<Post, ApiError> {
        let response = self
            .request(Method::POST, "/posts")
            .json(payload)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    pub async fn update_post(&self, id: i64, payload: &SavePostRequest) -> Result<Post, ApiError> {
        let response = self
            .request(Method::PUT, &format!("/posts/{}", id))
            .json(payload)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    pub async fn delete_post(&self, id: i64) -> Result<(), ApiError> {
        let response = self
            .request(Method::DELETE, &format!("/posts/{}", id))
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    pub async fn comments(&self, post_id: i64) -> Result<Vec<Comment>, ApiError> {
        let response = self
            .request(Method::GET, &format!("/posts/{}/comments", post_id))
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    pub async fn create_comment(
        &self,
        post_id: i64,
        payload: &CreateCommentRequest,
    ) -> Result<(), ApiError> {
        let response = self
            .request(Method::POST, &format!("/posts/{}/comments", post_id))
            .json(payload)
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    pub async fn toggle_favorite(&self, post_id: i64) -> Result<FavoriteResponse, ApiError> {
        let response = self
            .request(Method::POST, &format!("/posts/{}/favorite", post_id))
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    pub async fn tags(&self) -> Result<Vec<Tag>, ApiError> {
        let response = self.request(Method::GET, "/tags").send().await?;
        Ok(check(response).await?.json().await?)
    }

    pub async fn user_posts(&self, username: &str) -> Result<Vec<Post>, ApiError> {
        let response = self
            .request(Method::GET, &format!("/users/{}/posts", username))
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self
            .http
            .request(method, format!("{}{}", self.base_url, path));
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        builder
    }
}

async fn check(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(ApiError::Status { status, message })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_recognized() {
        let err = ApiError::Status {
            status: StatusCode::NOT_FOUND,
            message: "Couldn't find Post".to_string(),
        };
        assert!(err.is_not_found());
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn unauthorized_is_recognized() {
        let err = ApiError::Status {
            status: StatusCode::UNAUTHORIZED,
            message: "bad token".to_string(),
        };
        assert!(err.is_unauthorized());
        assert!(!err.is_not_found());
    }

    #[test]
    fn status_errors_carry_the_server_message() {
        let err = ApiError::Status {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: "Title can't be blank".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "server responded with 422 Unprocessable Entity: Title can't be blank"
        );
    }
}
