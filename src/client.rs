//! Per-request orchestration: credential → prompt → inference → recovery.
//!
//! Keep the public surface small: build a [`Director`] once at startup with
//! [`DirectorBuilder`] and call [`Director::generate`] per brief.

pub mod builder;
pub mod core;
pub mod invoker;

pub use builder::DirectorBuilder;
pub use core::Director;
pub use invoker::InferenceInvoker;
