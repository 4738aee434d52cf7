pub mod board_ops;
pub mod check;
pub mod session_ops;
