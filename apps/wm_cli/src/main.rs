// apps/wm_cli/src/main.rs

//! WindMesh 命令行界面
//!
//! 将平底挤出网格变换为贴地网格并输出 GAMBIT 中性格式文件。

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// WindMesh 贴地网格构建命令行工具
#[derive(Parser)]
#[command(name = "wm_cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "WindMesh terrain-conforming mesh builder", long_about = None)]
struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 构建贴地网格
    Build(commands::build::BuildArgs),
    /// 显示输入数据信息
    Info(commands::info::InfoArgs),
    /// 验证工况配置
    Validate(commands::validate::ValidateArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 初始化日志
    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // 执行命令
    match cli.command {
        Commands::Build(args) => commands::build::execute(args),
        Commands::Info(args) => commands::info::execute(args),
        Commands::Validate(args) => commands::validate::execute(args),
    }
}
