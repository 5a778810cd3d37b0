use trendhub::config::{Config, Strategy};
use trendhub::models::trending::TrendingBatch;
use trendhub::services::feed_service::FeedService;

use clap::{App, Arg, ArgMatches, SubCommand};
use log::{error, info};
use tokio::sync::watch;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logger
    env_logger::init();

    // 创建基本的命令行应用
    let app = App::new("TrendHub")
        .version("0.3.0")
        .author("TrendHub Team")
        .about("Trending ticker data processing system");

    // 在开发模式下添加调试参数
    #[cfg(debug_assertions)]
    let app = app
        .arg(
            Arg::with_name("debug")
                .long("debug")
                .help("Enable debug mode")
                .takes_value(false),
        )
        .arg(
            Arg::with_name("debug-limit")
                .long("debug-limit")
                .help("Limit the number of records to keep in debug mode")
                .takes_value(true)
                .default_value("10"),
        );

    // 添加子命令
    let app = app
        .subcommand(
            SubCommand::with_name("watch")
                .about("Poll the trending ranking and render it every refresh interval")
                .arg(
                    Arg::with_name("strategy")
                        .short('s')
                        .long("strategy")
                        .value_name("STRATEGY")
                        .help("Acquisition strategy (api, html, html-regex)")
                        .takes_value(true)
                        .default_value("api"),
                )
                .arg(
                    Arg::with_name("endpoint")
                        .short('e')
                        .long("endpoint")
                        .value_name("URL")
                        .help("Override the upstream endpoint")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("interval")
                        .short('i')
                        .long("interval")
                        .value_name("SECONDS")
                        .help("Refresh interval in seconds")
                        .takes_value(true)
                        .default_value("180"),
                )
                .arg(
                    Arg::with_name("limit")
                        .short('l')
                        .long("limit")
                        .value_name("LIMIT")
                        .help("Maximum number of ranking entries to request")
                        .takes_value(true)
                        .default_value("20"),
                )
                .arg(
                    Arg::with_name("timeout")
                        .long("timeout")
                        .value_name("SECONDS")
                        .help("HTTP request timeout in seconds")
                        .takes_value(true)
                        .default_value("10"),
                )
                .arg(
                    Arg::with_name("fallback")
                        .long("fallback")
                        .value_name("TICKERS")
                        .help("Comma-separated fallback ticker list")
                        .takes_value(true),
                ),
        )
        .subcommand(
            SubCommand::with_name("fetch")
                .about("Fetch and render one trending batch, then exit")
                .arg(
                    Arg::with_name("strategy")
                        .short('s')
                        .long("strategy")
                        .value_name("STRATEGY")
                        .help("Acquisition strategy (api, html, html-regex)")
                        .takes_value(true)
                        .default_value("api"),
                )
                .arg(
                    Arg::with_name("endpoint")
                        .short('e')
                        .long("endpoint")
                        .value_name("URL")
                        .help("Override the upstream endpoint")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("interval")
                        .short('i')
                        .long("interval")
                        .value_name("SECONDS")
                        .help("Cache window in seconds")
                        .takes_value(true)
                        .default_value("180"),
                )
                .arg(
                    Arg::with_name("limit")
                        .short('l')
                        .long("limit")
                        .value_name("LIMIT")
                        .help("Maximum number of ranking entries to request")
                        .takes_value(true)
                        .default_value("20"),
                )
                .arg(
                    Arg::with_name("timeout")
                        .long("timeout")
                        .value_name("SECONDS")
                        .help("HTTP request timeout in seconds")
                        .takes_value(true)
                        .default_value("10"),
                )
                .arg(
                    Arg::with_name("fallback")
                        .long("fallback")
                        .value_name("TICKERS")
                        .help("Comma-separated fallback ticker list")
                        .takes_value(true),
                ),
        );

    let matches = app.get_matches();

    // 获取调试模式设置
    #[cfg(debug_assertions)]
    let debug_mode = matches.is_present("debug");
    #[cfg(not(debug_assertions))]
    let debug_mode = false;

    #[cfg(debug_assertions)]
    let debug_record_limit = matches
        .value_of("debug-limit")
        .unwrap_or("10")
        .parse::<usize>()
        .unwrap_or(10);
    #[cfg(not(debug_assertions))]
    let debug_record_limit = usize::MAX;

    if let Some(matches) = matches.subcommand_matches("watch") {
        let config = build_config(matches, debug_mode, debug_record_limit)?;
        info!(
            "Watching trending ranking via {} every {}s",
            config.strategy.code(),
            config.refresh_secs
        );

        let service = FeedService::new(config)?;

        // ctrl-c -> 停止信号，循环在周期边界干净退出
        let (tx, rx) = watch::channel(false);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("shutdown requested");
                let _ = tx.send(true);
            }
        });

        service.run(rx, print_batch).await?;
    } else if let Some(matches) = matches.subcommand_matches("fetch") {
        let config = build_config(matches, debug_mode, debug_record_limit)?;
        let service = FeedService::new(config)?;

        let batch = service.current_batch().await;
        print_batch(&batch);
    } else {
        info!("No command specified. Use --help for usage information.");
    }

    Ok(())
}

fn build_config(
    matches: &ArgMatches,
    debug_mode: bool,
    debug_record_limit: usize,
) -> anyhow::Result<Config> {
    let strategy_str = matches.value_of("strategy").unwrap_or("api");
    let strategy = match strategy_str.parse::<Strategy>() {
        Ok(strategy) => strategy,
        Err(e) => {
            error!("{}", e);
            return Err(anyhow::anyhow!(e));
        }
    };

    let interval = matches
        .value_of("interval")
        .unwrap_or("180")
        .parse::<u64>()
        .unwrap_or(180);

    let limit = matches
        .value_of("limit")
        .unwrap_or("20")
        .parse::<usize>()
        .unwrap_or(20);

    let timeout = matches
        .value_of("timeout")
        .unwrap_or("10")
        .parse::<u64>()
        .unwrap_or(10);

    let mut config = Config::new(strategy)
        .with_refresh_secs(interval)
        .with_limit(limit)
        .with_timeout_secs(timeout)
        .with_debug_mode(debug_mode)
        .with_debug_record_limit(debug_record_limit);

    if let Some(endpoint) = matches.value_of("endpoint") {
        config = config.with_endpoint(endpoint);
    }

    if let Some(fallback) = matches.value_of("fallback") {
        let tickers: Vec<String> = fallback
            .split(',')
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        if !tickers.is_empty() {
            config = config.with_fallback_tickers(tickers);
        }
    }

    Ok(config)
}

// 左对齐文本表格，五个显示列加抓取时间
fn print_batch(batch: &TrendingBatch) {
    info!(
        "Trending tickers: {} records from {}",
        batch.len(),
        batch.source
    );
    info!("{:-<76}", "");
    info!(
        "{:<6} {:<10} {:<18} {:<10} {:<16} {:<10}",
        "Rank", "Ticker", "Messages", "Change", "Trending Since", "Updated"
    );
    info!("{:-<76}", "");

    for record in &batch.records {
        info!(
            "{:<6} {:<10} {:<18} {:<10} {:<16} {:<10}",
            record.rank, record.ticker, record.messages, record.change, record.since,
            record.captured_at
        );
    }
}
