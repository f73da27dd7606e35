pub mod storage_screen;

pub use storage_screen::StorageScreen;
