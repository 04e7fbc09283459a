pub mod error;
pub mod projection;
