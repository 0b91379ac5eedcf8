//! 领域层统一错误定义
//!
//! 覆盖领域校验、乐观并发冲突、未找到、实体管理与事件序列化等最小必要集合，
//! 存储后端与发布器的错误也统一转换为 `DomainError`。
//!
//! 事件分派失败（聚合收到未定义处理逻辑的事件）不在此列：
//! 每个聚合的事件是封闭枚举并通过穷举匹配分派，缺失分支在编译期即被拒绝。
//!
use thiserror::Error;

/// 统一错误类型
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DomainError {
    // --- 领域规则 ---
    #[error("validation failed: {reason}")]
    Validation { reason: String },
    #[error("invalid state: {reason}")]
    InvalidState { reason: String },

    // --- 实体管理 ---
    #[error("entity has already been added: {entity_id}")]
    EntityAlreadyExists { entity_id: String },
    #[error("entity has not been found: {entity_id}")]
    EntityNotFound { entity_id: String },

    // --- 存储/并发 ---
    #[error("concurrency conflict on stream {stream_id}: expected={expected}, actual={actual}")]
    ConcurrencyConflict {
        stream_id: String,
        expected: usize,
        actual: usize,
    },
    #[error("not found: {reason}")]
    NotFound { reason: String },
    #[error("event store error: {reason}")]
    EventStore { reason: String },
    #[error("event publish error: {reason}")]
    Publish { reason: String },

    // --- 序列化 ---
    #[error("serialization error: {source}")]
    Serde {
        #[from]
        source: serde_json::Error,
    },
    #[error("parse error: {reason}")]
    Parse { reason: String },
    #[error("type mismatch: expected={expected}, found={found}")]
    TypeMismatch { expected: String, found: String },
}

impl DomainError {
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }

    pub fn invalid_state(reason: impl Into<String>) -> Self {
        Self::InvalidState {
            reason: reason.into(),
        }
    }

    pub fn not_found(reason: impl Into<String>) -> Self {
        Self::NotFound {
            reason: reason.into(),
        }
    }

    pub fn concurrency_conflict(stream_id: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::ConcurrencyConflict {
            stream_id: stream_id.into(),
            expected,
            actual,
        }
    }

    pub fn publish(reason: impl Into<String>) -> Self {
        Self::Publish {
            reason: reason.into(),
        }
    }

    /// 乐观并发冲突：调用方应重新加载聚合、重放业务意图后重试
    pub fn is_concurrency_conflict(&self) -> bool {
        matches!(self, Self::ConcurrencyConflict { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

/// 统一 Result 类型别名
pub type DomainResult<T> = Result<T, DomainError>;
