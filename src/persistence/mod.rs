pub mod files;
pub mod storage;
pub mod task_store;

pub use files::{ensure_data_dir, init_data_dir, LOG_FILE_NAME};
#[cfg(test)]
pub use storage::MemoryStore;
pub use storage::{FileStore, KeyValueStore};
pub use task_store::TaskStore;
#[cfg(test)]
pub use task_store::STORAGE_KEY;
