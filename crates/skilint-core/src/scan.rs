//! 逐行扫描非 ASCII 字符
//!
//! 注意：这里始终按默认文本编码（UTF-8）解码，而不是使用探测到的编码。
//! 探测结果只决定“是否需要扫描”；两者不一致时（例如仅含 windows-1252 字节的文件），
//! 解码失败会作为该文件的 `ScanError` 上报，失败之前已扫描到的行照常返回。
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use encoding_rs::UTF_8;

use crate::codepoint::is_ascii_char;
use crate::error::ScanError;
use crate::types::LineAnalysisResult;

/// 单个文件的扫描结果。
///
/// 中途失败（读取或解码错误）时 `lines` 保留失败之前已扫描到的行，`error` 说明失败原因。
#[derive(Debug, Default)]
pub struct FileScan {
    pub lines: Vec<LineAnalysisResult>,
    pub error: Option<ScanError>,
}

impl FileScan {
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }
}

/// 扫描单个文件，返回所有含非 ASCII 字符的行（按行号升序）
pub fn scan_file(path: &Path) -> FileScan {
    let mut scan = FileScan::default();
    if let Err(err) = scan_lines(path, &mut scan.lines) {
        scan.error = Some(err);
    }
    scan
}

fn scan_lines(path: &Path, results: &mut Vec<LineAnalysisResult>) -> Result<(), ScanError> {
    let file = File::open(path).map_err(|source| ScanError::Io { path: path.to_path_buf(), source })?;
    let mut reader = BufReader::new(file);

    let mut line_number = 0usize;
    let mut raw = Vec::new();
    loop {
        raw.clear();
        let n = reader
            .read_until(b'\n', &mut raw)
            .map_err(|source| ScanError::Io { path: path.to_path_buf(), source })?;
        if n == 0 {
            break;
        }

        // 按默认文本编码（UTF-8）解码，BOM 作为普通字符保留
        let text = UTF_8
            .decode_without_bom_handling_and_without_replacement(&raw)
            .ok_or_else(|| ScanError::Decode { path: path.to_path_buf(), line_number: line_number + 1 })?;

        // 单独的 `\r` 也算换行（与 `\n`、`\r\n` 一致）
        for line in split_universal(&text) {
            line_number += 1;
            if let Some(result) = analyze_line(line_number, line) {
                results.push(result);
            }
        }
    }

    Ok(())
}

/// 分析单行；没有非 ASCII 字符时返回 None
pub fn analyze_line(line_number: usize, line: &str) -> Option<LineAnalysisResult> {
    let mut result = LineAnalysisResult::new(line_number, line);
    for (idx, ch) in line.chars().enumerate() {
        if !is_ascii_char(ch) {
            result.add_char(ch, idx + 1);
        }
    }
    (!result.is_empty()).then_some(result)
}

/// 按 `\r`（其后不是 `\n`）切分；每段保留自己的行尾
fn split_universal(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    for (i, &b) in bytes.iter().enumerate() {
        if b == b'\r' && bytes.get(i + 1) != Some(&b'\n') {
            lines.push(&text[start..=i]);
            start = i + 1;
        }
    }
    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
        let p = dir.path().join(name);
        fs::write(&p, bytes).unwrap();
        p
    }

    #[test]
    fn pure_ascii_yields_nothing() {
        let dir = TempDir::new().unwrap();
        let p = write(&dir, "good.txt", b"fn main() {}\n\tlet x = 1;\r\n~!@#$%^&*()\n");
        let scan = scan_file(&p);
        assert!(scan.is_complete());
        assert!(scan.lines.is_empty());
    }

    #[test]
    fn records_lines_and_positions() {
        let dir = TempDir::new().unwrap();
        let text = "Kale chips leggings with käse and more text ahead, then föur dollar toast jean shorts hashtag.\n\
                    Nothing to see here.\n\
                    Photo booth Åir plant cliche.\n";
        let p = write(&dir, "umlaut.txt", text.as_bytes());

        let results = scan_file(&p).lines;
        assert_eq!(results.len(), 2);

        assert_eq!(results[0].line_number, 1);
        assert_eq!(results[0].positions('ä'), Some(&[27][..]));
        assert_eq!(results[0].positions('ö'), Some(&[58][..]));
        assert!(!results[0].line_text.ends_with('\n'));

        assert_eq!(results[1].line_number, 3);
        assert_eq!(results[1].positions('Å'), Some(&[13][..]));
    }

    #[test]
    fn repeated_characters_keep_every_position() {
        let dir = TempDir::new().unwrap();
        let p = write(&dir, "rep.txt", "ä ä\n".as_bytes());
        let results = scan_file(&p).lines;
        assert_eq!(results[0].positions('ä'), Some(&[1, 3][..]));
    }

    #[test]
    fn non_printable_and_bom_are_recorded() {
        let dir = TempDir::new().unwrap();
        let p = write(&dir, "zw.txt", "\u{FEFF}a\u{200B}b\n".as_bytes());
        let results = scan_file(&p).lines;
        assert_eq!(results[0].positions('\u{FEFF}'), Some(&[1][..]));
        assert_eq!(results[0].positions('\u{200B}'), Some(&[3][..]));
    }

    #[test]
    fn universal_newlines_number_lines() {
        let dir = TempDir::new().unwrap();
        let p = write(&dir, "cr.txt", "one\rtwo ä\r\nthree\nfour ö".as_bytes());
        let results = scan_file(&p).lines;
        assert_eq!(results.len(), 2);
        assert_eq!((results[0].line_number, results[0].line_text.as_str()), (2, "two ä"));
        assert_eq!(results[0].positions('ä'), Some(&[5][..]));
        assert_eq!((results[1].line_number, results[1].line_text.as_str()), (4, "four ö"));
    }

    #[test]
    fn decodes_with_default_encoding_not_detected_one() {
        // 0x85 是 windows-1252 的省略号，但不是合法 UTF-8
        let dir = TempDir::new().unwrap();
        let p = write(&dir, "cp1252.txt", b"fine\nHi there\x85\n");
        let scan = scan_file(&p);
        assert!(scan.lines.is_empty());
        match scan.error {
            Some(ScanError::Decode { line_number, .. }) => assert_eq!(line_number, 2),
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[test]
    fn lines_before_decode_error_are_kept() {
        let dir = TempDir::new().unwrap();
        let p = write(&dir, "mixed.txt", b"Gr\xC3\xBC\xC3\x9Fe line one\nok\nbad \x85 byte\ntail \xC3\xA4\n");
        let scan = scan_file(&p);

        assert_eq!(scan.lines.len(), 1);
        assert_eq!(scan.lines[0].line_number, 1);
        assert_eq!(scan.lines[0].positions('ü'), Some(&[3][..]));
        assert_eq!(scan.lines[0].positions('ß'), Some(&[4][..]));
        assert!(matches!(scan.error, Some(ScanError::Decode { line_number: 3, .. })));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let scan = scan_file(&dir.path().join("gone.txt"));
        assert!(scan.lines.is_empty());
        assert!(matches!(scan.error, Some(ScanError::Io { .. })));
    }
}
