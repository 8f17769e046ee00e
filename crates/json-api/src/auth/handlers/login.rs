//! Login Handler

use std::{fmt, sync::Arc};

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use shoeclean_app::auth::{Credentials, IssuedToken};

use crate::{auth::errors::into_status_error, extensions::*, state::State};

/// Login Request
#[derive(Deserialize, Serialize, ToSchema)]
pub(crate) struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl From<LoginRequest> for Credentials {
    fn from(request: LoginRequest) -> Self {
        Credentials {
            email: request.email,
            password: Zeroizing::new(request.password),
        }
    }
}

/// Login Response
#[derive(Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginResponse {
    /// Signed bearer token for the `Authorization` header
    pub bearer_token: String,

    /// Roles granted to the user
    pub roles: Vec<String>,
}

impl fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginResponse")
            .field("roles", &self.roles)
            .finish_non_exhaustive()
    }
}

impl From<IssuedToken> for LoginResponse {
    fn from(token: IssuedToken) -> Self {
        Self {
            bearer_token: token.bearer_token,
            roles: token.roles.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Login Handler
#[endpoint(
    tags("auth"),
    summary = "Login",
    responses(
        (status_code = StatusCode::OK, description = "Token issued"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Email or password is incorrect"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
) -> Result<Json<LoginResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let token = state
        .app
        .auth
        .login(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(token.into()))
}
