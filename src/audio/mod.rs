pub mod capture;
pub mod engine;
pub mod handle;
pub mod nodes;
pub mod recorder;
