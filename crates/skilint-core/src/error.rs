//! 错误类型（对外暴露）
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// 致命错误：出现即中止本次检查（CLI 以非零状态退出）
#[derive(Debug, Error)]
pub enum LintError {
    #[error("no filenames provided")]
    NoFilenames,

    #[error("invalid accepted value {value:?}: expected `U+<hex>`")]
    InvalidAcceptedValue { value: String },

    #[error("cannot read {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid jobs value {value:?}: expected a positive integer or \"auto\"")]
    InvalidJobs { value: String },

    #[error("cannot start {threads} worker threads: {message}")]
    ThreadPool { threads: usize, message: String },

    #[error("invalid config file {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

/// 单文件扫描失败：只影响该文件，其它文件继续处理
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("read error in {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is not valid UTF-8 at line {line_number}", path.display())]
    Decode { path: PathBuf, line_number: usize },
}
