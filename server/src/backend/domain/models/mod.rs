//! Domain models. These are internal to the server; the REST layer maps them
//! to the DTOs in the `shared` crate.

pub mod message;
pub mod notification;
pub mod user;

pub use message::{Message, NewMessage};
pub use notification::StoredNotification;
pub use user::{NewUser, User};
