pub mod config;
pub mod meta;
pub mod render;
pub mod session;
pub mod tools;
pub mod trace;

pub use meta::SessionMeta;
pub use trace::*;

#[cfg(any(test, feature = "testing"))]
pub mod testing;
