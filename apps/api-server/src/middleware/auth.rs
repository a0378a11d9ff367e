//! Authentication extractor.

use std::future::Future;
use std::pin::Pin;

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use uuid::Uuid;

use devhub_core::domain::{Role, User};
use devhub_core::policy::Actor;
use devhub_core::ports::{AuthError, BaseRepository};

use crate::middleware::error::AppError;
use crate::state::AppState;

/// Authenticated user identity extractor.
///
/// The token only vouches for the user id in `sub`. Username, email and role
/// come from the stored user on every request, so renames and role changes
/// take effect before the token expires.
///
/// ```ignore
/// async fn protected_route(identity: Identity) -> impl Responder {
///     format!("Hello, {}!", identity.username)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    pub role: Role,
}

impl From<User> for Identity {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
        }
    }
}

impl Actor for Identity {
    fn user_id(&self) -> Uuid {
        self.user_id
    }

    fn role(&self) -> Role {
        self.role
    }
}

impl FromRequest for Identity {
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let token = bearer_token(req);

        Box::pin(async move {
            let Some(state) = state else {
                tracing::error!("AppState not found in app data");
                return Err(AppError::Internal("Server configuration error".to_string()));
            };
            authenticate(&state, token?).await
        })
    }
}

fn bearer_token(req: &HttpRequest) -> Result<String, AuthError> {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuth)?;

    header_value
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string)
        .ok_or_else(|| AuthError::InvalidToken("Expected Bearer token".to_string()))
}

async fn authenticate(state: &AppState, token: String) -> Result<Identity, AppError> {
    let claims = state.tokens.validate_token(&token).map_err(|e| {
        tracing::warn!("Rejected bearer token: {}", e);
        AppError::from(e)
    })?;

    match state.users.find_by_id(claims.user_id).await? {
        Some(user) => Ok(Identity::from(user)),
        None => {
            tracing::warn!(user_id = %claims.user_id, "Token for a user that no longer exists");
            Err(AppError::Unauthorized("User no longer exists".to_string()))
        }
    }
}
