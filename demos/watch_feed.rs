use trendhub::config::{Config, Strategy};
use trendhub::services::feed_service::FeedService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 创建行情服务（JSON接口策略）
    let config = Config::new(Strategy::JsonApi);
    let service = FeedService::new(config)?;

    // 获取一批趋势数据；失败时自动降级为样例数据
    let batch = service.current_batch().await;

    println!("数据来源: {}", batch.source);
    println!(
        "{:<6} {:<10} {:<18} {:<10} {:<16} {:<10}",
        "Rank", "Ticker", "Messages", "Change", "Trending Since", "Updated"
    );
    println!("{:-<76}", "");

    for record in &batch.records {
        println!(
            "{:<6} {:<10} {:<18} {:<10} {:<16} {:<10}",
            record.rank, record.ticker, record.messages, record.change, record.since,
            record.captured_at
        );
    }

    // 柱状图数据：消息量规整为原始数值
    println!("\n规整后的消息量:");
    for (ticker, volume) in batch.volume_series() {
        println!("{:<10} {:.0}", ticker, volume);
    }

    Ok(())
}
