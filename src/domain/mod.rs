pub mod category;
pub mod news;
pub mod types;
