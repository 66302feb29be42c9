//! Clarity CLI 诊断工具
//!
//! 启动客户端核心，展示设备 ID、同步状态，并探测本地后端与同步服务是否可用。

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clarity_client_core::clarity::api::{LocalApi, SyncApi};
use clarity_client_core::clarity::config::AppConfig;
use clarity_client_core::{ClarityApp, ClientListener};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Clarity CLI 客户端
#[derive(Parser, Debug)]
#[command(name = "clarity-cli")]
#[command(about = "Clarity CLI - 检查本地 AI 后端与云同步状态", long_about = None)]
struct Args {
    /// 本地 AI 后端地址（默认: http://localhost:5000）
    #[arg(long, env = "CLARITY_LOCAL_BACKEND_URL")]
    local_url: Option<String>,

    /// 云同步服务地址（不配置则为仅本地模式）
    #[arg(long, env = "CLARITY_SYNC_SERVICE_URL")]
    sync_url: Option<String>,

    /// 本地存储数据库 URL
    #[arg(long, env = "CLARITY_STORAGE_URL")]
    storage_url: Option<String>,

    /// 开发模式：打印每个请求与响应
    #[arg(long)]
    dev: bool,

    /// 日志级别（默认: info,clarity_client_core=debug）
    #[arg(long, default_value = "info,clarity_client_core=debug")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 显示设备 ID、同步状态与登录状态（默认）
    Status,
    /// 探测两个后端的健康检查接口
    Health,
    /// 退出登录并清空本地存储
    Logout,
}

/// 初始化日志（同时输出到 stdout 和文件）
fn init_logger(log_level: &str) -> Result<()> {
    use std::fs::OpenOptions;
    use std::io;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    // 优先使用环境变量 RUST_LOG（如果设置了），否则使用命令行参数
    let filter_layer =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open("clarity.log")
        .context("无法创建日志文件 clarity.log")?;

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stdout)
        .with_target(false)
        .with_ansi(true);

    // 文件不需要颜色
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(log_file)
        .with_file(true)
        .with_line_number(true)
        .with_target(false)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(stdout_layer)
        .with(file_layer)
        .init();
    Ok(())
}

/// 把客户端事件打印出来
struct CliClientListener;

#[async_trait::async_trait]
impl ClientListener for CliClientListener {
    async fn on_local_backend_unreachable(&self, message: String) {
        error!("[CLI/LocalAI] ❌ {}", message);
    }

    async fn on_sync_failed(&self, message: String) {
        warn!("[CLI/CloudSync] ⚠️ 同步失败（本地功能不受影响）: {}", message);
    }
}

fn build_config(args: &Args) -> AppConfig {
    let mut config = AppConfig::from_env();
    if let Some(url) = &args.local_url {
        config.local_backend_url = url.clone();
    }
    if let Some(url) = &args.sync_url {
        config.sync_service_url = Some(url.clone()).filter(|u| !u.trim().is_empty());
    }
    if let Some(url) = &args.storage_url {
        config.storage_url = url.clone();
    }
    config.dev_mode |= args.dev;
    config
}

async fn show_status(app: &ClarityApp) -> Result<()> {
    let device_id = app.device_id().await?;
    let status = app.sync_status();
    info!("[CLI] 🆔 设备ID: {}", device_id);
    info!("[CLI] {} 同步状态: {}", status.icon(), status);
    info!(
        "[CLI] 🔑 已保存访问令牌: {}",
        if app.store().access_token().is_some() { "是" } else { "否" }
    );
    Ok(())
}

async fn check_health(app: &ClarityApp) -> Result<()> {
    match LocalApi::new(app.clients()).health().await {
        Ok(health) => info!(
            "[CLI] 🤖 本地 AI 后端: {} (v{}, 嵌入模型 {}, LLM {})",
            health.status, health.version, health.embedder_model, health.llm_model
        ),
        Err(e) => error!("[CLI] 🤖 本地 AI 后端不可用: {}", e),
    }

    match SyncApi::new(app.clients()) {
        Some(sync) => match sync.health().await {
            Ok(health) => info!("[CLI] ☁️ 同步服务: {} - {}", health.status, health.message),
            Err(e) => warn!("[CLI] ☁️ 同步服务不可用: {}", e),
        },
        None => info!("[CLI] 💾 未配置同步服务（仅本地模式）"),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(&args.log_level)?;

    let config = build_config(&args);
    let storage = clarity_client_core::SqliteStorage::connect(&config.storage_url).await?;
    let mut app =
        ClarityApp::with_parts(config, Arc::new(storage), Arc::new(CliClientListener)).await?;

    match args.command.unwrap_or(Command::Status) {
        Command::Status => show_status(&app).await?,
        Command::Health => check_health(&app).await?,
        Command::Logout => {
            app.store_mut().logout().await?;
            info!("[CLI] 👋 已退出登录");
        }
    }

    Ok(())
}
