pub mod food_entry;
pub mod goals;
pub mod summary;
