use crate::aggregate::Aggregate;
use crate::error::DomainResult;
use crate::value_object::Version;
use async_trait::async_trait;
use std::sync::Arc;

/// 聚合仓储：按标识重放事件历史得到聚合，并以乐观并发方式保存待提交变更
#[async_trait]
pub trait Repository<A>: Send + Sync
where
    A: Aggregate,
{
    /// 重建聚合；事件流不存在或为空时返回 `NotFound`
    async fn get_by_id(&self, aggregate_id: &A::Id) -> DomainResult<A>;

    /// 追加待提交变更，成功后将其标记为已提交。
    ///
    /// `expected_version` 为加载时观察到的版本，作为事件流的期望位点；
    /// 为 `None` 时不做并发检查。失败时聚合保持不变。
    async fn save_with_expected_version(
        &self,
        aggregate: &mut A,
        expected_version: Option<Version>,
    ) -> DomainResult<()>;

    async fn save(&self, aggregate: &mut A) -> DomainResult<()> {
        self.save_with_expected_version(aggregate, None).await
    }

    async fn save_expecting(&self, aggregate: &mut A, expected_version: Version) -> DomainResult<()> {
        self.save_with_expected_version(aggregate, Some(expected_version))
            .await
    }
}

#[async_trait]
impl<A, T> Repository<A> for Arc<T>
where
    A: Aggregate,
    T: Repository<A> + ?Sized,
{
    async fn get_by_id(&self, aggregate_id: &A::Id) -> DomainResult<A> {
        (**self).get_by_id(aggregate_id).await
    }

    async fn save_with_expected_version(
        &self,
        aggregate: &mut A,
        expected_version: Option<Version>,
    ) -> DomainResult<()> {
        (**self)
            .save_with_expected_version(aggregate, expected_version)
            .await
    }
}
