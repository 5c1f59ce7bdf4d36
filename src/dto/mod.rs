pub mod categories;
pub mod news;
