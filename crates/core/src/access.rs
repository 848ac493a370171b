//! Ownership-scoped access control.
//!
//! A verified principal may read or write private relationship data (events
//! it owns, events it joined) only when the requested scope is its own
//! email. Public catalog routes never call into this module.
//!
//! Email comparison is exact: `A@x.com` and `a@x.com` are different scopes.

use crate::error::CoreError;

/// Message returned for every scope mismatch. Kept uniform so a denial does
/// not reveal whether the other identity exists.
pub const FORBIDDEN_MESSAGE: &str = "Forbidden";

/// Check a requested scope against the verified principal.
///
/// - `None` scope: allowed. The route decides whether unscoped access makes
///   sense at all.
/// - `Some(scope)` equal to `principal`: allowed.
/// - Anything else: [`CoreError::Forbidden`].
///
/// # Examples
///
/// ```
/// use actify_core::access::authorize;
/// assert!(authorize("a@x.com", Some("a@x.com")).is_ok());
/// assert!(authorize("a@x.com", None).is_ok());
/// assert!(authorize("a@x.com", Some("b@x.com")).is_err());
/// ```
pub fn authorize(principal: &str, scope: Option<&str>) -> Result<(), CoreError> {
    match scope {
        Some(scope) if scope != principal => {
            Err(CoreError::Forbidden(FORBIDDEN_MESSAGE.to_string()))
        }
        _ => Ok(()),
    }
}

/// Check that the principal owns a stored resource.
///
/// Unlike [`authorize`], the owner is always known, so there is no unscoped
/// case.
pub fn authorize_owner(principal: &str, owner: &str) -> Result<(), CoreError> {
    authorize(principal, Some(owner))
}

/// Resolve the effective scope for a route where omitting the scope means
/// "my own data".
///
/// Returns the scope to query with, after checking it against the principal.
pub fn scope_or_self<'a>(principal: &'a str, scope: Option<&'a str>) -> Result<&'a str, CoreError> {
    authorize(principal, scope)?;
    Ok(scope.unwrap_or(principal))
}
