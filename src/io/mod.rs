pub mod config_io;
pub mod lock;
pub mod paths;
pub mod store;
pub mod watcher;
