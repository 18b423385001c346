//! Domain models and request/response types.
//!
//! Row-shaped structs derive `sqlx::FromRow` and map 1:1 to tables; the
//! aggregate response types (cart, wishlist, profile views) are assembled
//! by the services so every mutating endpoint can return the full current
//! state of the aggregate it touched.

pub mod address;
pub mod cart;
pub mod catalog;
pub mod profile;
pub mod session;
pub mod user;
pub mod wishlist;

pub use session::{CurrentUser, session_keys};
