//! Prelude module for convenient imports

pub use super::assets::Entity as Assets;
pub use super::claims::Entity as Claims;
pub use super::contracts::Entity as Contracts;
pub use super::holdings::Entity as Holdings;
pub use super::listings::Entity as Listings;
pub use super::operators::Entity as Operators;
pub use super::ratings::Entity as Ratings;
pub use super::sessions::Entity as Sessions;
pub use super::users::Entity as Users;
