// src/presentation/http/extractors.rs
use crate::{
    application::{dto::Requester, error::ApplicationError},
    presentation::http::state::HttpState,
};
use axum::{
    extract::FromRequestParts,
    http::{HeaderName, HeaderValue, request::Parts},
};
use headers::{Header, HeaderMapExt};

use super::error::HttpError;

/// Header carrying the caller identity asserted by the upstream gateway.
pub static USER_ID_HEADER: HeaderName = HeaderName::from_static("x-user-id");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XUserId(pub String);

impl Header for XUserId {
    fn name() -> &'static HeaderName {
        &USER_ID_HEADER
    }

    fn decode<'i, I>(values: &mut I) -> Result<Self, headers::Error>
    where
        I: Iterator<Item = &'i HeaderValue>,
    {
        let value = values.next().ok_or_else(headers::Error::invalid)?;
        let raw = value.to_str().map_err(|_| headers::Error::invalid())?.trim();
        if raw.is_empty() {
            return Err(headers::Error::invalid());
        }
        Ok(Self(raw.to_string()))
    }

    fn encode<E>(&self, values: &mut E)
    where
        E: Extend<HeaderValue>,
    {
        if let Ok(value) = HeaderValue::from_str(&self.0) {
            values.extend(std::iter::once(value));
        }
    }
}

#[derive(Debug, Clone)]
pub struct Authenticated(pub Requester);

#[derive(Debug, Clone)]
pub struct MaybeAuthenticated(pub Option<Requester>);

fn app_state(parts: &Parts) -> Result<HttpState, HttpError> {
    parts.extensions.get::<HttpState>().cloned().ok_or_else(|| {
        HttpError::from_error(ApplicationError::infrastructure(
            "application state missing",
        ))
    })
}

impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let app_state = app_state(parts)?;

        let XUserId(user_id) = parts.headers.typed_get::<XUserId>().ok_or_else(|| {
            HttpError::from_error(ApplicationError::unauthorized(
                "missing X-User-Id header",
            ))
        })?;

        let requester = app_state
            .services
            .resolve_requester(&user_id)
            .await
            .map_err(HttpError::from_error)?;

        Ok(Self(requester))
    }
}

impl<S> FromRequestParts<S> for MaybeAuthenticated
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let app_state = app_state(parts)?;

        // An absent header is anonymous; a present but unusable one is rejected.
        let header = parts.headers.typed_try_get::<XUserId>().map_err(|_| {
            HttpError::from_error(ApplicationError::unauthorized(
                "invalid X-User-Id header",
            ))
        })?;
        let Some(XUserId(user_id)) = header else {
            return Ok(Self(None));
        };

        let requester = app_state
            .services
            .resolve_requester(&user_id)
            .await
            .map_err(HttpError::from_error)?;
        Ok(Self(Some(requester)))
    }
}
