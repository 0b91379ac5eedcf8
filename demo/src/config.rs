//! 示例程序配置
//!
//! 环境变量：
//! - `DDD_ES_LOG`：默认日志过滤规则，`RUST_LOG` 存在时以其为准；
//! - `DDD_ES_BUS_CAPACITY`：进程内事件总线的缓冲区容量，必须为正整数。
//!
use bon::Builder;
use thiserror::Error;

pub const LOG_ENV: &str = "DDD_ES_LOG";
pub const BUS_CAPACITY_ENV: &str = "DDD_ES_BUS_CAPACITY";

const DEFAULT_LOG_FILTER: &str = "info,ddd_es_infra=debug,ddd_es_demo=debug";
const DEFAULT_BUS_CAPACITY: usize = 64;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct DemoConfig {
    #[builder(into, default = DEFAULT_LOG_FILTER.to_string())]
    log_filter: String,
    #[builder(default = DEFAULT_BUS_CAPACITY)]
    bus_capacity: usize,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl DemoConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源读取，未设置的键使用默认值
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_filter = lookup(LOG_ENV)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        let bus_capacity = match lookup(BUS_CAPACITY_ENV) {
            Some(raw) => parse_capacity(&raw)?,
            None => DEFAULT_BUS_CAPACITY,
        };

        Ok(Self::builder()
            .log_filter(log_filter)
            .bus_capacity(bus_capacity)
            .build())
    }

    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    pub fn bus_capacity(&self) -> usize {
        self.bus_capacity
    }
}

fn parse_capacity(raw: &str) -> Result<usize, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidValue {
        key: BUS_CAPACITY_ENV,
        value: raw.to_string(),
        reason,
    };

    match raw.trim().parse::<usize>() {
        Ok(0) => Err(invalid("must be greater than zero".to_string())),
        Ok(capacity) => Ok(capacity),
        Err(e) => Err(invalid(e.to_string())),
    }
}
