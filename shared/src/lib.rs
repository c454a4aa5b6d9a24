pub mod data;
pub mod mock;
pub mod summary;
