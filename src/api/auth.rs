//! Session API endpoints

use axum::{extract::State, http::HeaderMap, Json};
use axum_extra::extract::{
    cookie::{Cookie, SameSite},
    CookieJar,
};

use crate::{
    error::AppResult,
    models::user::User,
    services::auth::SESSION_COOKIE_NAME,
};

use super::{CurrentCaller, SuccessResponse};

/// Get the signed-in user, or null for anonymous callers
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "auth",
    security((), ("session" = [])),
    responses(
        (status = 200, description = "Current user or null", body = User)
    )
)]
pub async fn me(CurrentCaller(caller): CurrentCaller) -> AppResult<Json<Option<User>>> {
    Ok(Json(caller.0))
}

/// End the session by clearing the session cookie
#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Session cookie cleared", body = SuccessResponse)
    )
)]
pub async fn logout(
    State(state): State<crate::AppState>,
    headers: HeaderMap,
    jar: CookieJar,
) -> (CookieJar, Json<SuccessResponse>) {
    let secure = state.config.auth.secure_cookies || is_forwarded_https(&headers);
    // Browsers drop SameSite=None cookies that are not Secure
    let same_site = if secure { SameSite::None } else { SameSite::Lax };

    let mut cookie = Cookie::build((SESSION_COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(same_site)
        .secure(secure)
        .build();
    cookie.make_removal();

    tracing::debug!("Session cookie cleared");
    (jar.add(cookie), Json(SuccessResponse::ok()))
}

/// Whether a TLS-terminating proxy reports the original request as HTTPS
fn is_forwarded_https(headers: &HeaderMap) -> bool {
    headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .is_some_and(|proto| proto.trim().eq_ignore_ascii_case("https"))
}
