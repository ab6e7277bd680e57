use actix_web::{
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
    Error, HttpMessage, HttpRequest,
};

use crate::{
    api::error,
    utils::{Claims, AUTH_COOKIE},
    ENV,
};

/// Resolves the current user from the `auth_token` cookie, falling back to an
/// `Authorization: Bearer` header, and stashes the decoded claims in request
/// extensions for handlers to pick up.
pub async fn authentication<B>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<B>, Error>
where
    B: MessageBody + 'static,
{
    let cookie_token = req.cookie(AUTH_COOKIE).map(|c| c.value().to_string());

    let token = match cookie_token {
        Some(t) => t,
        None => {
            let auth = req.headers().get("Authorization").and_then(|h| h.to_str().ok());
            match auth.and_then(|h| h.strip_prefix("Bearer ")) {
                Some(t) => t.to_string(),
                None => {
                    return Err(error::Error::unauthorized("Authentication required").into());
                }
            }
        }
    };

    let claims = Claims::decode(&token, ENV.jwt_secret.as_ref())
        .map_err(|_| error::Error::unauthorized("Token invalid or expired"))?;

    req.extensions_mut().insert(claims);

    next.call(req).await
}

pub fn get_claims(req: &HttpRequest) -> Result<Claims, error::Error> {
    let extensions = req.extensions();

    let claims = extensions
        .get::<Claims>()
        .ok_or_else(|| error::Error::unauthorized("Unauthorized"))?
        .clone();

    Ok(claims)
}
