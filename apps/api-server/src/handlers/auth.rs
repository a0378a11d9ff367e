//! Authentication handlers.

use actix_web::{HttpResponse, web};
use validator::Validate;

use devhub_core::domain::User;
use devhub_core::ports::{AuthError, UserRepository};
use devhub_shared::Envelope;
use devhub_shared::dto::{AuthPayload, LoginRequest};

use crate::handlers::present::user_summary;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Sign a token for `user` and wrap it with the sanitized user.
pub(crate) fn auth_payload(state: &AppState, user: &User) -> AppResult<AuthPayload> {
    let token = state
        .tokens
        .generate_token(user)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(AuthPayload {
        user: user_summary(user),
        token,
        token_type: "Bearer".to_string(),
        expires_in: state.tokens.expiration_seconds().max(0) as u64,
    })
}

/// POST /api/auth/login - accepts a username or an email address.
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let user = match state.users.find_by_username(&req.username).await? {
        Some(user) => Some(user),
        None if req.username.contains('@') => state.users.find_by_email(&req.username).await?,
        None => None,
    };

    let Some(user) = user else {
        tracing::warn!("Login attempt for unknown user");
        return Err(AuthError::InvalidCredentials.into());
    };

    if !state.passwords.verify(&req.password, &user.password_hash)? {
        tracing::warn!(user_id = %user.id, "Login attempt with wrong password");
        return Err(AuthError::InvalidCredentials.into());
    }

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(HttpResponse::Ok().json(Envelope::success(
        "Successfully logged in!",
        auth_payload(&state, &user)?,
    )))
}
