/// Session persistence module - Gateway

mod storage;

pub use storage::SessionStorage;
