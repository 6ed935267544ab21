pub mod guard;
pub mod provider;
pub mod storage;
