// Adapters layer: concrete implementations for storage and spreadsheet output.

pub mod storage;
pub mod xlsx;

pub use storage::{LocalStorage, MemoryStorage};
