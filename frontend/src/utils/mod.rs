pub mod lifecycle;
pub mod location;
pub mod storage;
