//! 检查主流程与结果输出
//!
//! 流程：解析允许清单 → 展开输入 → 编码探测 → 过滤出非 ASCII 文件 → 逐行扫描 → 生成诊断。
//! 诊断不写全局日志，而是逐条推送给调用方提供的 `ReportSink`。
use std::fmt;
use std::path::PathBuf;

use rayon::prelude::*;

use crate::codepoint::{is_printable, unicode_notation, AcceptedChars};
use crate::context::extract_context;
use crate::encoding::{detect_file, offending_files, ChardetSniffer, EncodingSniffer};
use crate::error::LintError;
use crate::inputs::expand_inputs;
use crate::options::{LintOptions, LintReport};
use crate::scan::{scan_file, FileScan};
use crate::types::{Diagnostic, FileEncodingResult, LineAnalysisResult};

/// 检查全部通过时输出的提示
pub const CLEAN_MESSAGE: &str = "NON-ASCII CHECK: OK";

/// 检查过程中产生的事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEvent {
    /// 一次违规出现
    Violation(Diagnostic),
    /// 文件无法完整扫描（例如解码失败）
    ScanFailed { filename: PathBuf, encoding: String, error: String },
    /// 没有任何违规
    Clean,
}

impl fmt::Display for ReportEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportEvent::Violation(d) => fmt::Display::fmt(d, f),
            ReportEvent::ScanFailed { filename, encoding, error } => {
                write!(f, "{} ({}), could not be fully scanned: {}", filename.display(), encoding, error)
            }
            ReportEvent::Clean => f.write_str(CLEAN_MESSAGE),
        }
    }
}

/// 事件接收方
pub trait ReportSink {
    fn emit(&mut self, event: ReportEvent);
}

impl ReportSink for Vec<ReportEvent> {
    fn emit(&mut self, event: ReportEvent) {
        self.push(event);
    }
}

/// 使用默认探测器（chardetng）执行检查
pub fn run(opts: &LintOptions, sink: &mut dyn ReportSink) -> Result<LintReport, LintError> {
    run_with_sniffer(opts, ChardetSniffer::new, sink)
}

/// 使用指定探测器执行检查；并行时每个工作线程各自创建一个探测器
pub fn run_with_sniffer<S, F>(opts: &LintOptions, make_sniffer: F, sink: &mut dyn ReportSink) -> Result<LintReport, LintError>
where
    S: EncodingSniffer,
    F: Fn() -> S + Sync + Send,
{
    if opts.filenames.is_empty() {
        return Err(LintError::NoFilenames);
    }
    // 允许清单必须在读取任何文件之前校验
    let accepted = AcceptedChars::parse(&opts.accepted_values)?;
    let files = expand_inputs(&opts.filenames)?;

    let threads = opts.jobs.unwrap_or_else(num_cpus::get).max(1);
    let pool = if files.len() > 1 { build_pool(threads)? } else { None };

    let (encodings, scans) = match &pool {
        Some(pool) => pool.install(|| detect_and_scan_parallel(&files, &make_sniffer))?,
        None => detect_and_scan(&files, &make_sniffer)?,
    };

    let mut report = LintReport { files_checked: encodings.len(), check: opts.check, ..Default::default() };
    let offending = offending_files(&encodings);
    report.files_flagged = offending.len();

    for (info, scanned) in offending.into_iter().zip(scans) {
        let encoding = info.encoding.clone().unwrap_or_default();
        // 先输出失败之前已扫描到的行，再报告扫描失败
        for line in &scanned.lines {
            report_line(info, &encoding, line, &accepted, opts.context_width, &mut report, sink);
        }
        if let Some(err) = scanned.error {
            report.scan_failures += 1;
            sink.emit(ReportEvent::ScanFailed { filename: info.filename.clone(), encoding, error: err.to_string() });
        }
    }

    if report.is_clean() {
        sink.emit(ReportEvent::Clean);
    }
    Ok(report)
}

/// 线程数大于 1 时构建 Rayon 线程池；构建失败直接返回错误
fn build_pool(threads: usize) -> Result<Option<rayon::ThreadPool>, LintError> {
    if threads <= 1 {
        return Ok(None);
    }
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map(Some)
        .map_err(|err| LintError::ThreadPool { threads, message: err.to_string() })
}

/// 串行：先探测全部文件（读不到的文件在扫描前就失败），再扫描非 ASCII 文件
fn detect_and_scan<S, F>(files: &[PathBuf], make_sniffer: &F) -> Result<(Vec<FileEncodingResult>, Vec<FileScan>), LintError>
where
    S: EncodingSniffer,
    F: Fn() -> S,
{
    let mut sniffer = make_sniffer();
    let encodings = files
        .iter()
        .map(|p| detect_file(p, &mut sniffer))
        .collect::<Result<Vec<_>, _>>()?;
    let scans = offending_files(&encodings).iter().map(|r| scan_file(&r.filename)).collect();
    Ok((encodings, scans))
}

/// 并行版本；collect 保持输入顺序，事件序列与串行一致
fn detect_and_scan_parallel<S, F>(files: &[PathBuf], make_sniffer: &F) -> Result<(Vec<FileEncodingResult>, Vec<FileScan>), LintError>
where
    S: EncodingSniffer,
    F: Fn() -> S + Sync + Send,
{
    let encodings = files
        .par_iter()
        .map_init(make_sniffer, |sniffer, p| detect_file(p, sniffer))
        .collect::<Result<Vec<_>, _>>()?;
    let scans = offending_files(&encodings).par_iter().map(|r| scan_file(&r.filename)).collect();
    Ok((encodings, scans))
}

fn report_line(
    info: &FileEncodingResult,
    encoding: &str,
    line: &LineAnalysisResult,
    accepted: &AcceptedChars,
    context_width: usize,
    report: &mut LintReport,
    sink: &mut dyn ReportSink,
) {
    for (ch, positions) in line.chars() {
        if accepted.contains(ch) {
            report.accepted += positions.len();
            continue;
        }
        let codepoint = unicode_notation(ch);
        let printable = is_printable(ch);
        for &position in positions {
            report.violations += 1;
            let mut context = extract_context(&line.line_text, position, context_width);
            if !printable {
                // 不可打印字符可能无法显示，用记法替换
                context = context.replace(ch, &codepoint);
            }
            sink.emit(ReportEvent::Violation(Diagnostic {
                filename: info.filename.clone(),
                encoding: encoding.to_string(),
                line_number: line.line_number,
                position,
                character: ch,
                codepoint: codepoint.clone(),
                printable,
                context,
            }));
        }
    }
}
