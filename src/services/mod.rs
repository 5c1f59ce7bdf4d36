pub mod categories;
pub mod errors;
pub mod news;

pub use errors::{ServiceError, ServiceResult};
