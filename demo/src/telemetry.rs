//! 日志初始化
//!
//! `RUST_LOG` 存在时以其为过滤规则，否则使用配置中的默认规则。
//!
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// 安装全局订阅者；重复调用返回错误而不是 panic
pub fn init(default_filter: &str) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .try_init()
}
