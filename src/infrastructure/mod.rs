pub mod config;
pub mod network;
pub mod speech;
pub mod storage;
