//! 编码探测（流式喂入 + 置信度短路）
//!
//! 设计要点：
//! - 按行读取原始字节喂给探测器，探测器给出足够置信度后立即停止读取，大文件无需读完。
//! - 每个文件开始前 `reset`，文件之间互不影响。
//! - 仅 ASCII 字节的文件报告为 `ascii`，空文件无法判定（None）。
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use chardetng::EncodingDetector;
use encoding_rs::Encoding;

use crate::error::LintError;
use crate::types::FileEncodingResult;

/// 视为“干净”的编码标签
pub const ASCII_LABEL: &str = "ascii";

/// 首个非 ASCII 字节之后再喂入这么多字节即认为证据充分
pub(crate) const CONFIDENT_SAMPLE: usize = 64 * 1024;

const CONFIDENCE_CERTAIN: f32 = 1.0;
const CONFIDENCE_UTF8: f32 = 0.99;
const CONFIDENCE_LEGACY: f32 = 0.73;

/// 一次探测的结论
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub encoding: Option<String>,
    pub confidence: f32,
}

/// 流式编码探测器
pub trait EncodingSniffer {
    /// 清空状态，准备探测下一个文件
    fn reset(&mut self);
    /// 喂入一段原始字节
    fn feed(&mut self, chunk: &[u8]);
    /// 是否已足够确定，可以停止喂入
    fn done(&self) -> bool;
    /// 结束本文件的探测并给出结论
    fn close(&mut self) -> Detection;
}

/// 基于 chardetng 的探测器；BOM 由 encoding_rs 识别
pub struct ChardetSniffer {
    inner: EncodingDetector,
    /// 文件开头（最多 3 字节），用于 BOM 识别
    head: Vec<u8>,
    bom: Option<&'static Encoding>,
    seen_bytes: usize,
    non_ascii: bool,
    /// 首个非 ASCII 字节之后已喂入的字节数
    evidence: usize,
}

impl ChardetSniffer {
    pub fn new() -> Self {
        Self {
            inner: EncodingDetector::new(),
            head: Vec::with_capacity(3),
            bom: None,
            seen_bytes: 0,
            non_ascii: false,
            evidence: 0,
        }
    }
}

impl Default for ChardetSniffer {
    fn default() -> Self {
        Self::new()
    }
}

impl EncodingSniffer for ChardetSniffer {
    fn reset(&mut self) {
        *self = Self::new();
    }

    fn feed(&mut self, chunk: &[u8]) {
        if chunk.is_empty() || self.done() {
            return;
        }

        if self.head.len() < 3 {
            let take = (3 - self.head.len()).min(chunk.len());
            self.head.extend_from_slice(&chunk[..take]);
            if let Some((enc, _)) = Encoding::for_bom(&self.head) {
                self.bom = Some(enc);
            }
        }
        self.seen_bytes += chunk.len();

        if self.non_ascii {
            self.evidence += chunk.len();
        } else if let Some(idx) = chunk.iter().position(|b| !b.is_ascii()) {
            self.evidence += chunk.len() - idx;
        }
        self.non_ascii = self.inner.feed(chunk, false);
    }

    fn done(&self) -> bool {
        self.bom.is_some() || self.evidence >= CONFIDENT_SAMPLE
    }

    fn close(&mut self) -> Detection {
        self.inner.feed(&[], true);

        let detection = if let Some(enc) = self.bom {
            Detection { encoding: Some(enc.name().to_string()), confidence: CONFIDENCE_CERTAIN }
        } else if self.seen_bytes == 0 {
            Detection { encoding: None, confidence: 0.0 }
        } else if !self.non_ascii {
            Detection { encoding: Some(ASCII_LABEL.to_string()), confidence: CONFIDENCE_CERTAIN }
        } else {
            let enc = self.inner.guess(None, true);
            let confidence = if enc == encoding_rs::UTF_8 { CONFIDENCE_UTF8 } else { CONFIDENCE_LEGACY };
            Detection { encoding: Some(enc.name().to_string()), confidence }
        };

        self.reset();
        detection
    }
}

/// 探测单个文件：按行喂入，探测器确定后提前结束读取
pub fn detect_file(path: &Path, sniffer: &mut dyn EncodingSniffer) -> Result<FileEncodingResult, LintError> {
    let access = |source| LintError::FileAccess { path: path.to_path_buf(), source };

    sniffer.reset();
    let file = File::open(path).map_err(access)?;
    let mut reader = BufReader::new(file);
    let mut line = Vec::new();
    loop {
        line.clear();
        let n = reader.read_until(b'\n', &mut line).map_err(access)?;
        if n == 0 {
            break;
        }
        sniffer.feed(&line);
        if sniffer.done() {
            break;
        }
    }
    let Detection { encoding, confidence } = sniffer.close();

    Ok(FileEncodingResult { filename: path.to_path_buf(), encoding, confidence })
}

/// 依次探测全部文件（结果顺序与输入一致）；任一文件无法读取即返回错误
pub fn detect_encodings(paths: &[PathBuf], sniffer: &mut dyn EncodingSniffer) -> Result<Vec<FileEncodingResult>, LintError> {
    paths.iter().map(|p| detect_file(p, sniffer)).collect()
}

/// 编码为 None 或 `ascii`（忽略大小写）即视为干净
pub fn is_clean_encoding(encoding: Option<&str>) -> bool {
    encoding.map_or(true, |e| e.eq_ignore_ascii_case(ASCII_LABEL))
}

/// 过滤出需要逐行扫描的文件
pub fn offending_files(results: &[FileEncodingResult]) -> Vec<&FileEncodingResult> {
    results.iter().filter(|r| !is_clean_encoding(r.encoding.as_deref())).collect()
}
