//! 值对象（Value Object）
//!
//! 无标识、以值相等为准的对象，用于封装不可变的概念性值与校验逻辑。
//!
use serde::{Deserialize, Serialize};
use std::fmt;

/// 值对象抽象
pub trait ValueObject {
    /// 业务校验失败时的错误类型
    type Error;

    /// 创建值对象时进行验证
    fn validate(&self) -> Result<(), Self::Error>;
}

/// 聚合版本号，等于聚合迄今应用过的事件总数（历史 + 待提交）。
///
/// 同时充当乐观并发的期望位点：聚合从一条长度为 N 的事件流重建后版本为 N。
///
/// ```
/// use ddd_es_domain::value_object::Version;
///
/// let v0 = Version::new();
/// assert!(v0.is_new());
///
/// let v1 = v0.next();
/// assert_eq!(v1.value(), 1);
/// assert!(v1 > v0);
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Version(usize);

impl Version {
    /// 初始版本（尚未应用任何事件）
    pub const fn new() -> Self {
        Self(0)
    }

    pub const fn from_value(value: usize) -> Self {
        Self(value)
    }

    /// 下一个版本，即下一条事件的聚合序号
    pub const fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    pub const fn value(&self) -> usize {
        self.0
    }

    pub const fn is_new(&self) -> bool {
        self.0 == 0
    }

    /// 聚合是否已被创建（至少应用过一条事件）
    pub const fn is_created(&self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl From<usize> for Version {
    fn from(value: usize) -> Self {
        Self::from_value(value)
    }
}

impl From<Version> for usize {
    fn from(version: Version) -> Self {
        version.value()
    }
}
