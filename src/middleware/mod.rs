//! Request middleware.
//!
//! - [`auth`]: the `AuthUser` extractor, bearer token in, verified claims out
//! - [`role`]: role allow-list middleware composed per route group
//!
//! # Authentication flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. The role layer (if any) rejects callers outside the route's allow-list
//! 3. The handler extracts `AuthUser` and scopes every query by its
//!    `school_id`

pub mod auth;
pub mod role;
