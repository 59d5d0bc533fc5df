//! Service layer for lobby accounts.
//! - Transport-agnostic: callers hand in decoded inputs and get one outcome back.
//! - Storage sits behind the `AccountStore` trait; an in-memory store ships here.

pub mod auth;
