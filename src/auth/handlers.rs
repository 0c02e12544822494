use axum::{
    extract::{FromRef, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{error::ApiError, state::AppState};

use super::{
    dto::{AuthResponse, LoginRequest, MessageResponse, SignupRequest, WhoamiResponse},
    extractors::AuthUser,
    jwt::JwtKeys,
    password::{hash_password, verify_password},
    repo::User,
    validate::{validate_login, validate_signup},
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/auth", get(whoami))
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let input = validate_signup(&payload)?;

    // Fast path; the unique index still catches the concurrent race in create().
    if User::find_by_email(&state.db, &input.email).await?.is_some() {
        warn!(email = %input.email, "email already registered");
        return Err(ApiError::Conflict);
    }

    let hash = hash_password(&input.password, state.config.hash_cost)?;
    let user = User::create(&state.db, &input.name, &input.email, &hash).await?;

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id, &user.name, &user.email)?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(Json(AuthResponse {
        status: 200,
        message: "User was created successfully".into(),
        user_info: user.into(),
        token,
    }))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let input = validate_login(&payload)?;

    // Unknown email and wrong password must be indistinguishable.
    let user = match User::find_by_email(&state.db, &input.email).await? {
        Some(u) => u,
        None => {
            warn!(email = %input.email, "login unknown email");
            return Err(ApiError::Authentication);
        }
    };

    if !verify_password(&input.password, &user.password_hash) {
        warn!(email = %input.email, user_id = %user.id, "login invalid password");
        return Err(ApiError::Authentication);
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id, &user.name, &user.email)?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(Json(AuthResponse {
        status: 200,
        message: "You logged in successfully".into(),
        user_info: user.into(),
        token,
    }))
}

/// Tokens are stateless; logout is the client discarding its copy.
#[instrument]
pub async fn logout() -> Json<MessageResponse> {
    Json(MessageResponse {
        status: 200,
        message: "You logged out successfully".into(),
    })
}

#[instrument(skip_all)]
pub async fn whoami(AuthUser(claims): AuthUser) -> Json<WhoamiResponse> {
    Json(WhoamiResponse {
        status: 200,
        data: claims,
    })
}
