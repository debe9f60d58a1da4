//! 非 ASCII 字符检查核心库
//!
//! 设计要点：
//! - 先做编码探测（流式、可提前结束），只有探测结果不是 ASCII 的文件才逐行扫描。
//! - 逐行扫描始终按默认文本编码（UTF-8）解码，与探测结果解耦。
//! - 诊断通过 `ReportSink` 交给调用方，核心库不依赖全局日志。
//! - 默认串行；`jobs > 1` 时用 Rayon 线程池并行，结果按输入顺序输出。

mod codepoint;
mod config;
mod context;
mod encoding;
mod error;
mod inputs;
mod options;
mod report;
mod scan;
mod types;

pub use codepoint::{is_ascii_char, is_printable, parse_notation, unicode_notation, AcceptedChars};
pub use config::{default_config_file, load_config_file, FileConfig, JobsSetting, DEFAULT_CONFIG_FILES};
pub use context::extract_context;
pub use encoding::{
    detect_encodings, detect_file, is_clean_encoding, offending_files, ChardetSniffer, Detection, EncodingSniffer,
    ASCII_LABEL,
};
pub use error::{LintError, ScanError};
pub use inputs::expand_inputs;
pub use options::{parse_jobs, LintOptions, LintReport, DEFAULT_CONTEXT_WIDTH};
pub use report::{run, run_with_sniffer, ReportEvent, ReportSink, CLEAN_MESSAGE};
pub use scan::{analyze_line, scan_file, FileScan};
pub use types::{Diagnostic, FileEncodingResult, LineAnalysisResult};
