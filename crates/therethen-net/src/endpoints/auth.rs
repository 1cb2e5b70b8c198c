use tracing::info;

use therethen_shared::requests::{
    CreateUserRequest, LoginRequest, RefreshRequest, UpdateProfileRequest,
};
use therethen_shared::{LoginResponse, User};

use crate::api::ApiClient;
use crate::error::Result;

impl ApiClient {
    /// Exchange credentials for a token pair and store the access token.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let tokens: LoginResponse = self.post("/token/", &body).await?;
        self.session().set_token(&tokens.access);
        info!("Logged in");
        Ok(tokens)
    }

    pub async fn refresh_token(&self, refresh: &str) -> Result<LoginResponse> {
        let body = RefreshRequest {
            refresh: refresh.to_string(),
        };
        let tokens: LoginResponse = self.post("/token/refresh/", &body).await?;
        self.session().set_token(&tokens.access);
        info!("Access token refreshed");
        Ok(tokens)
    }

    /// Sign up. The backend logs the new user in straight away.
    pub async fn create_user(&self, request: &CreateUserRequest) -> Result<LoginResponse> {
        let tokens: LoginResponse = self.post("/users/", request).await?;
        self.session().set_token(&tokens.access);
        info!(username = %request.username, "Account created");
        Ok(tokens)
    }

    pub fn sign_out(&self) {
        self.session().clear();
        info!("Signed out");
    }

    pub async fn current_user(&self) -> Result<User> {
        self.get("/users/me/").await
    }

    pub async fn update_profile(&self, request: &UpdateProfileRequest) -> Result<User> {
        self.patch("/users/update_profile/", request).await
    }
}
