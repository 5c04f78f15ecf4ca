pub mod aws;
pub mod config;
pub mod http;
pub mod logging;
pub mod repositories;
pub mod storage;
