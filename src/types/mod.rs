//! 类型系统模块：创意简报、凭证与模型目录的核心数据类型。
//!
//! # Types Module
//!
//! | Type | Description |
//! |------|-------------|
//! | [`CreativeBrief`] | Caller input: free-text idea plus optional overrides |
//! | [`Credential`] | Provider API key with caller-over-fallback resolution |
//! | [`ModelDescriptor`] | One catalog entry with its capability set |
//! | [`GenerationMethod`] | Explicit capability tag |

pub mod brief;
pub mod model;

pub use brief::{CreativeBrief, Credential};
pub use model::{GenerationMethod, ModelCatalog, ModelDescriptor, ProviderErrorBody};
