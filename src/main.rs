use anyhow::Result;
use boardgame_quiz::utils::logging;
use boardgame_quiz::{App, AppResult, Config};

/// 加载配置：命令行第一个参数或 QUIZ_CONFIG 指定 TOML 文件，否则读取环境变量
fn load_config() -> AppResult<Config> {
    let config_path = std::env::args().nth(1).or_else(|| std::env::var("QUIZ_CONFIG").ok());
    let config = match config_path {
        Some(path) => Config::from_toml_file(path)?,
        None => Config::from_env(),
    };
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = load_config()?;

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化并运行应用
    App::initialize(config).await?.run().await?;

    Ok(())
}
