//! Rust Grading Worker - 编程题异步判题服务
//!
//! 从 Redis Stream 消费判题批次，调用各语言的远程执行服务，
//! 持久化答案得分并重新计算考试记录。
//!
//! # 架构
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `executor`: 语言路由与执行服务客户端
//! - `models`: 数据模型定义
//! - `runtime`: 运行时生命周期管理
//! - `services`: 判题编排与考试聚合
//! - `status`: 判题状态存储（Redis/Moka）
//! - `storage`: 数据存储层（SeaORM）
//! - `worker`: 消息流消费

pub mod config;
pub mod entity;
pub mod errors;
pub mod executor;
pub mod models;
pub mod runtime;
pub mod services;
pub mod status;
pub mod storage;
pub mod worker;

#[cfg(test)]
pub(crate) mod test_support;
