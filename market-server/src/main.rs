use market_server::{Config, Server, ServerState, print_banner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 环境变量 (.env 可选)
    dotenv::dotenv().ok();

    // 2. 加载配置
    let config = Config::from_env();

    // 3. 日志 (日志目录要先于 appender 存在)
    config.ensure_work_dir_structure()?;
    let log_dir = config.logs_dir();
    market_server::init_logger_with_file(
        config.log_level.as_deref(),
        config.log_to_file.then(|| log_dir.to_string_lossy().into_owned()).as_deref(),
    );

    print_banner();
    tracing::info!("Market server starting...");

    // 4. 初始化服务器状态
    let state = ServerState::initialize(&config).await?;

    // 5. 启动 HTTP + 实时通道
    let server = Server::with_state(config, state);
    server.run().await?;

    Ok(())
}
