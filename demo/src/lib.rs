//! ddd-es 示例：产品待办（Product Backlog）
//!
//! - `domain`：产品（Product）与待办项（BacklogItem）两个事件溯源聚合；
//! - `config`：示例程序配置，来自环境变量；
//! - `telemetry`：日志初始化。
//!
pub mod config;
pub mod domain;
pub mod telemetry;
