use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use livadai_core::{Actor, Role};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::AppState;

// ============================================================================
// JWT Claims
// ============================================================================

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ActorClaims {
    pub sub: String,
    pub role: String,
    pub exp: usize,
}

impl ActorClaims {
    pub fn actor(&self) -> Result<Actor, AppError> {
        let role: Role = self
            .role
            .parse()
            .map_err(|e: livadai_core::CoreError| AppError::AuthenticationError(e.to_string()))?;
        Ok(Actor::new(self.sub.clone(), role))
    }
}

// ============================================================================
// Actor Authentication Middleware
// ============================================================================

pub async fn actor_auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // 1. Extract token from Authorization header
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::AuthenticationError("Missing bearer token".to_string()))?;

    // 2. Decode and validate JWT
    let token_data = decode::<ActorClaims>(
        token,
        &DecodingKey::from_secret(state.auth.secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| AppError::AuthenticationError(e.to_string()))?;

    // 3. Resolve the marketplace role
    let actor = token_data.claims.actor()?;
    tracing::debug!(actor_id = %actor.id, role = %actor.role, "authenticated actor");

    // 4. Inject actor into request extensions
    req.extensions_mut().insert(actor);

    Ok(next.run(req).await)
}
