//! 설정 모듈.

pub mod cache;
pub mod env;

pub use cache::*;
pub use env::*;
