pub mod config_io;
pub mod http_store;
#[cfg(test)]
pub mod memory_store;
pub mod remote;
