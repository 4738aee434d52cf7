pub mod board;
pub mod config;
pub mod session;
pub mod task;

pub use board::*;
pub use config::*;
pub use session::*;
pub use task::*;
