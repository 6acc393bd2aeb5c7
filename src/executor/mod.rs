//! 远程执行服务
//!
//! - `language`: 语言标签解析
//! - `router`: 语言到执行服务地址的静态映射
//! - `client`: 执行服务 HTTP 客户端

pub mod client;
pub mod language;
pub mod router;

pub use client::{ExecutionClient, HttpExecutionClient};
pub use language::Language;
pub use router::ExecutionRouter;
