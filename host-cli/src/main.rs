//! # Host CLI
//!
//! 无界面宿主：按场景文件逐帧驱动 anim-runtime 的动画状态控制器。
//!
//! ## 用法
//!
//! ```bash
//! # 在项目根目录使用 cargo 运行
//! cargo run -p host-cli -- run host-cli/scenarios/demo.json
//! cargo run -p host-cli -- run host-cli/scenarios/demo.json --config host-cli/config.json -v
//! cargo run -p host-cli -- run host-cli/scenarios/demo.json --json
//! cargo run -p host-cli -- check host-cli/scenarios/demo.json
//! cargo run -p host-cli -- states
//! cargo run -p host-cli -- init-config config.json
//! ```

mod config;
mod replay;
mod scenario;

use anim_runtime::StateId;
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

use config::{HostConfig, LogLevel};
use scenario::Scenario;

#[derive(Parser)]
#[command(name = "host-cli")]
#[command(about = "无界面宿主 - 按场景文件逐帧驱动动画状态控制器")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 配置文件（默认使用内置配置）
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// 提高日志详细程度（可重复：-v、-vv）
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// 回放场景并输出状态切换
    Run {
        /// 场景文件
        scenario: PathBuf,

        /// 以 JSON 输出回放结果
        #[arg(long)]
        json: bool,
    },

    /// 校验场景与配置，不回放
    Check {
        /// 场景文件
        scenario: PathBuf,
    },

    /// 列出所有动画状态
    States,

    /// 写出默认配置文件
    InitConfig {
        /// 输出路径（默认：config.json）
        #[arg(default_value = "config.json")]
        path: PathBuf,
    },
}

fn main() -> ExitCode {
    match real_main() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("❌ host-cli error: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn real_main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // 全局日志级别来自配置，加载期间的警告先输出到临时订阅者
    let loading = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    let config = tracing::subscriber::with_default(loading, || {
        HostConfig::load(cli.config.as_deref())
    });
    init_tracing(config.log_level, cli.verbose);
    config.validate()?;

    match cli.command {
        Commands::Run { scenario, json } => {
            let scenario = Scenario::load(&scenario)
                .with_context(|| format!("加载场景失败: {}", scenario.display()))?;
            info!(name = %scenario.name, frames = scenario.frames.len(), "开始回放");

            let report = replay::run(&scenario, &config);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{report}");
            }

            Ok(if report.passed() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            })
        }
        Commands::Check { scenario } => {
            let scenario = Scenario::load(&scenario)
                .with_context(|| format!("校验场景失败: {}", scenario.display()))?;
            println!(
                "✅ 场景 '{}'：{} 帧，时长 {:.3}s，{} 个期望",
                scenario.name,
                scenario.frames.len(),
                scenario.duration(),
                scenario.expectation_count()
            );
            Ok(ExitCode::SUCCESS)
        }
        Commands::States => {
            for state in StateId::ALL {
                println!("{state}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::InitConfig { path } => {
            config.save(&path)?;
            println!("✅ 已写出配置: {}", path.display());
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// 初始化日志，命令行 `-v` 在配置级别基础上提高详细程度
fn init_tracing(level: LogLevel, verbose: u8) {
    let level: tracing::Level = level.raised_by(verbose).into();
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
