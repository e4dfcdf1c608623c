//! Reviews domain: customer ratings and comments on inventory items

pub mod api;
pub mod domain;
pub mod repository;

pub use domain::entities::{Review, ReviewError};
pub use repository::ReviewRepository;

pub use api::routes;
pub use api::ReviewsState;
