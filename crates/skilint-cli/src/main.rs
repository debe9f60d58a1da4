use anyhow::{bail, Context, Result};
use clap::Parser;
use skilint_core::{default_config_file, load_config_file, parse_jobs, run, LintOptions, ReportEvent, ReportSink};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, error, info};

/// 命令行入口（基于 clap）
#[derive(Parser, Debug)]
#[command(name = "ski-lint", version, about = "A pre-commit hook that rejects files containing non-ASCII characters")]
struct Cli {
    /// 发现未允许的非 ASCII 字符时返回码为 1
    #[arg(long)]
    check: bool,

    /// 诊断中上下文窗口的宽度（字符数）
    #[arg(short = 'w', long)]
    context_width: Option<usize>,

    /// 配置文件路径（YAML/JSON/TOML），默认 ./.ski-lint.yml
    #[arg(short = 'c', long)]
    config_file: Option<PathBuf>,

    /// 线程数（"auto"=CPU 核心数），默认串行
    #[arg(short = 'j', long)]
    jobs: Option<String>,

    /// 待检查的文件（目录会递归展开）
    #[arg(value_name = "FILENAME")]
    filenames: Vec<PathBuf>,
}

/// 配置错误、文件无法读取等情况的退出码
const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
    // 初始化日志（支持通过 RUST_LOG 控制等级，例如 info、debug）
    init_tracing();
    let cli = Cli::parse();

    match execute(cli) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            error!("{err:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn execute(cli: Cli) -> Result<u8> {
    let opts = resolve_options(cli)?;
    info!(files = opts.filenames.len(), check = opts.check, "starting non-ASCII check");

    let report = run(&opts, &mut TracingSink).context("non-ASCII check failed")?;
    debug!(
        files_checked = report.files_checked,
        files_flagged = report.files_flagged,
        violations = report.violations,
        accepted = report.accepted,
        scan_failures = report.scan_failures,
        "check finished"
    );

    Ok(if report.exit_code() == 0 { 0 } else { 1 })
}

/// 合并配置：默认值 → 配置文件 → 命令行（命令行优先）
fn resolve_options(cli: Cli) -> Result<LintOptions> {
    let mut opts = LintOptions::default();
    debug!(?opts, "default config");

    // 显式指定的配置文件必须存在；默认配置文件不存在时忽略
    let config_file = match cli.config_file {
        Some(path) => Some(path),
        None => default_config_file(Path::new(".")),
    };
    if let Some(path) = config_file {
        let file_config = load_config_file(&path).with_context(|| format!("load config file {}", path.display()))?;
        file_config
            .apply_to(&mut opts)
            .with_context(|| format!("apply config file {}", path.display()))?;
        info!(path = %path.display(), "loaded config file");
        debug!(?opts, "config after file merge");
    }

    // 命令行参数仅在显式给出时覆盖
    if cli.check {
        opts.check = true;
    }
    if let Some(width) = cli.context_width {
        opts.context_width = width;
    }
    if let Some(jobs) = cli.jobs.as_deref() {
        opts.jobs = parse_jobs(jobs).context("--jobs")?;
    }
    if !cli.filenames.is_empty() {
        opts.filenames = cli.filenames;
    }
    debug!(?opts, "config after cli merge");

    if opts.filenames.is_empty() {
        bail!("No filenames provided");
    }
    Ok(opts)
}

/// 将检查事件写入 tracing：违规与扫描失败记为 error，通过记为 info
struct TracingSink;

impl ReportSink for TracingSink {
    fn emit(&mut self, event: ReportEvent) {
        match event {
            ReportEvent::Clean => info!("{event}"),
            _ => error!("{event}"),
        }
    }
}

fn init_tracing() {
    use std::io::IsTerminal;
    use tracing_subscriber::{EnvFilter, FmtSubscriber};
    // 支持通过环境变量 RUST_LOG 控制日志等级，如：RUST_LOG=debug
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stdout)
        .with_ansi(std::io::stdout().is_terminal())
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
