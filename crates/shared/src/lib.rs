//! Wire types shared between the admin client and its views.

pub mod domain;
pub mod error;
pub mod protocol;
