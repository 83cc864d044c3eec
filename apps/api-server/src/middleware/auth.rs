//! Authentication extractor - resolves the request's caller from HTTP Basic credentials.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use base64::{Engine, engine::general_purpose};
use futures::future::{LocalBoxFuture, ready};

use postboard_core::domain::{Caller, CallerIdentity};
use postboard_core::ports::AuthError;

use crate::middleware::error::AppError;
use crate::state::AppState;

/// The resolved caller of a request.
///
/// Requests without an `Authorization` header are anonymous. A header that is
/// present but does not name a valid user and password is rejected outright.
#[derive(Debug, Clone)]
pub struct CurrentCaller(pub Caller);

impl CurrentCaller {
    pub fn into_inner(self) -> Caller {
        self.0
    }
}

impl FromRequest for CurrentCaller {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(auth_header) = req.headers().get(header::AUTHORIZATION) else {
            return Box::pin(ready(Ok(CurrentCaller(Caller::Anonymous))));
        };

        let credentials = match parse_basic(auth_header.as_bytes()) {
            Ok(credentials) => credentials,
            Err(err) => return Box::pin(ready(Err(AppError::from(err)))),
        };

        let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
            tracing::error!("AppState not found in app data");
            return Box::pin(ready(Err(AppError::Internal(
                "Server configuration error".to_string(),
            ))));
        };

        let (username, password) = credentials;
        Box::pin(async move { authenticate(&state, &username, &password).await })
    }
}

async fn authenticate(
    state: &AppState,
    username: &str,
    password: &str,
) -> Result<CurrentCaller, AppError> {
    let user = state
        .users
        .find_by_username(username)
        .await
        .map_err(|e| AuthError::Lookup(e.to_string()))?
        .ok_or(AuthError::InvalidCredentials)?;

    if !state.passwords.verify(password, &user.password_hash)? {
        return Err(AuthError::InvalidCredentials.into());
    }

    Ok(CurrentCaller(Caller::Authenticated(CallerIdentity::from(
        &user,
    ))))
}

/// Split `Basic base64(username:password)` into its parts.
fn parse_basic(raw: &[u8]) -> Result<(String, String), AuthError> {
    let value = std::str::from_utf8(raw)
        .map_err(|_| AuthError::MalformedHeader("not valid UTF-8".to_string()))?;

    let (scheme, encoded) = value
        .trim()
        .split_once(' ')
        .ok_or_else(|| AuthError::MalformedHeader("missing credentials".to_string()))?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return Err(AuthError::MalformedHeader(format!(
            "unsupported scheme {scheme}"
        )));
    }

    let decoded = general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|e| AuthError::MalformedHeader(e.to_string()))?;
    let decoded = String::from_utf8(decoded)
        .map_err(|_| AuthError::MalformedHeader("credentials are not UTF-8".to_string()))?;

    let (username, password) = decoded
        .split_once(':')
        .ok_or_else(|| AuthError::MalformedHeader("missing ':' separator".to_string()))?;

    Ok((username.to_string(), password.to_string()))
}
