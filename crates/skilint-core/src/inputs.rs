//! 输入路径展开
use std::collections::HashSet;
use std::path::PathBuf;

use walkdir::WalkDir;

use crate::error::LintError;

/// 展开输入：目录递归展开为其下的普通文件（按路径排序），普通文件原样保留。
/// 重复路径只保留第一次出现。不存在的路径原样保留，由编码探测阶段报告访问错误。
pub fn expand_inputs(filenames: &[PathBuf]) -> Result<Vec<PathBuf>, LintError> {
    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut out = Vec::new();

    for input in filenames {
        if !input.is_dir() {
            if seen.insert(input.clone()) {
                out.push(input.clone());
            }
            continue;
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(input).min_depth(1) {
            let entry = entry.map_err(|err| {
                let path = err.path().unwrap_or(input).to_path_buf();
                LintError::FileAccess { path, source: err.into() }
            })?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }
        // 目录内按路径排序，保证输出顺序可复现
        files.sort();
        for f in files {
            if seen.insert(f.clone()) {
                out.push(f);
            }
        }
    }

    Ok(out)
}
