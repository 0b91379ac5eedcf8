use anyhow::Context;
use ddd_es_demo::config::DemoConfig;
use ddd_es_demo::domain::{
    BacklogItem, BacklogItemRepository, Product, ProductId, ProductRepository, StoryPoints,
};
use ddd_es_demo::telemetry;
use ddd_es_domain::aggregate::Aggregate;
use ddd_es_domain::entity::Entity;
use ddd_es_domain::persist::Repository;
use ddd_es_infra::{
    FanOutPublisher, InMemoryEventBus, InMemoryEventStore, PublishingEventStore,
    TracingEventPublisher,
};
use futures_util::StreamExt;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = DemoConfig::from_env()?;
    telemetry::init(config.log_filter()).context("failed to install tracing subscriber")?;

    let bus = InMemoryEventBus::new(config.bus_capacity());
    let mut subscription = bus.subscribe();
    let listener = tokio::spawn(async move {
        let mut received = 0usize;
        while let Some(event) = subscription.next().await {
            match event {
                Ok(event) => {
                    received += 1;
                    tracing::debug!(event_id = event.event_id(), "bus delivered {event}");
                }
                Err(err) => tracing::warn!(%err, "bus subscription lagged"),
            }
        }
        received
    });

    let publisher = FanOutPublisher::new()
        .with(TracingEventPublisher)
        .with(bus.clone());
    let store = Arc::new(PublishingEventStore::new(InMemoryEventStore::new(), publisher));
    let products: ProductRepository<_> = ProductRepository::new(Arc::clone(&store));
    let backlog_items: BacklogItemRepository<_> = BacklogItemRepository::new(Arc::clone(&store));

    // 创建产品与两个待办项，规划后交换顺序
    let product_id = ProductId::new("P1".to_string());
    let mut product = Product::create(product_id.clone(), "Widgets")?;
    let mut canvas = BacklogItem::create_titled("Business model canvas", &product)?;
    let mut landing = BacklogItem::create_titled("Landing page", &product)?;
    canvas.assign_story_points(StoryPoints::Five)?;
    landing.assign_story_points(StoryPoints::Eight)?;

    product.plan_backlog_item(&canvas)?;
    product.plan_backlog_item(&landing)?;
    let reordered: Vec<_> = [&landing, &canvas]
        .iter()
        .filter_map(|item| item.id().cloned())
        .collect();
    product.reorder_backlog_items(&reordered)?;

    products.save(&mut product).await?;
    backlog_items.save(&mut canvas).await?;
    backlog_items.save(&mut landing).await?;

    let reloaded = products.get_by_id(&product_id).await?;
    let order: Vec<String> = reloaded
        .planned_backlog_items()
        .into_iter()
        .map(|item| item.id().to_string())
        .collect();
    tracing::info!(
        name = reloaded.name(),
        version = %reloaded.version(),
        ?order,
        "product reloaded"
    );

    // 两个调用方基于同一版本修改，后保存的一方被拒绝
    let mut first = products.get_by_id(&product_id).await?;
    let mut stale = products.get_by_id(&product_id).await?;
    let observed = first.version();

    first.rename("Widgets Pro")?;
    products.save_expecting(&mut first, observed).await?;

    stale.rename("Gadgets")?;
    match products.save_expecting(&mut stale, observed).await {
        Err(err) if err.is_concurrency_conflict() => {
            tracing::info!(%err, "stale save rejected, reload and retry");
        }
        Err(err) => return Err(err.into()),
        Ok(()) => anyhow::bail!("stale save was accepted"),
    }

    // 释放所有发送端后订阅流结束
    drop((products, backlog_items, store, bus));
    let received = listener.await?;
    tracing::info!(received, "bus subscriber finished");

    Ok(())
}
