pub mod load;
pub mod metadata;
pub mod save;
