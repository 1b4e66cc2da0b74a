//! Web 服务器主程序入口

use clap::Parser;

use hackernews_zh::env::{generate_env_docs, EnvConfig};
use hackernews_zh::web::{build_state, WebConfig, WebServer};

#[derive(Parser, Debug)]
#[command(
    name = "hackernews-zh-web",
    version,
    about = "Hacker News top stories with translated titles"
)]
struct Args {
    /// Bind address [default: $HNZH_WEB_BIND_ADDRESS or 127.0.0.1]
    #[arg(short, long, value_name = "ADDRESS")]
    bind: Option<String>,
    /// Port number [default: $HNZH_WEB_PORT or 2001]
    #[arg(short, long)]
    port: Option<u16>,
    /// Directory overriding the bundled /static assets
    #[arg(long, value_name = "DIR")]
    static_dir: Option<String>,
    /// Print environment variable documentation and exit
    #[arg(long)]
    env_docs: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.env_docs {
        print!("{}", generate_env_docs());
        return Ok(());
    }

    // .env 文件不存在时忽略
    dotenv::dotenv().ok();

    let env_config = EnvConfig::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("hackernews_zh={}", env_config.log_level).into()),
        )
        .init();

    env_config.validate()?;
    env_config.log_summary();

    let mut web_config = WebConfig::from_env()?;
    if let Some(bind) = args.bind {
        web_config.bind_addr = bind;
    }
    if let Some(port) = args.port {
        web_config.port = port;
    }
    if let Some(static_dir) = args.static_dir {
        web_config.static_dir = Some(static_dir).filter(|dir| !dir.is_empty());
    }
    web_config.validate()?;

    let state = build_state(&env_config)?;
    let server = WebServer::new(web_config, state, env_config.cache_ttl);
    server.start().await?;

    Ok(())
}
