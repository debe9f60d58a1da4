//! 检查选项与统计信息（模块）
use std::path::PathBuf;

use crate::error::LintError;

/// 默认上下文宽度（字符数）
pub const DEFAULT_CONTEXT_WIDTH: usize = 50;

/// 已合并完毕的检查选项（默认值 → 配置文件 → 命令行）
#[derive(Debug, Clone, PartialEq)]
pub struct LintOptions {
    /// 待检查的文件或目录；不能为空
    pub filenames: Vec<PathBuf>,
    /// 允许出现的字符，`U+XXXX` 记法
    pub accepted_values: Vec<String>,
    /// 诊断中上下文窗口的宽度
    pub context_width: usize,
    /// 为 true 时，发现违规即返回退出码 1
    pub check: bool,
    /// 线程数：None 表示自动（等于 CPU 核数）；Some(1) 走串行
    pub jobs: Option<usize>,
}

impl Default for LintOptions {
    fn default() -> Self {
        Self {
            filenames: Vec::new(),
            accepted_values: Vec::new(),
            context_width: DEFAULT_CONTEXT_WIDTH,
            check: false,
            jobs: Some(1),
        }
    }
}

/// 解析线程参数："auto"（忽略大小写）表示 CPU 核数，其余必须是正整数。
/// 命令行与配置文件共用同一规则。
pub fn parse_jobs(value: &str) -> Result<Option<usize>, LintError> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("auto") {
        return Ok(None);
    }
    match value.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(Some(n)),
        _ => Err(LintError::InvalidJobs { value: value.to_string() }),
    }
}

/// 检查统计与结论
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LintReport {
    pub files_checked: usize,
    /// 编码探测为非 ASCII、需要逐行扫描的文件数
    pub files_flagged: usize,
    /// 违规出现次数（每个位置一次）
    pub violations: usize,
    /// 因允许清单而忽略的出现次数
    pub accepted: usize,
    pub scan_failures: usize,
    pub check: bool,
}

impl LintReport {
    pub fn is_clean(&self) -> bool {
        self.violations == 0 && self.scan_failures == 0
    }

    /// 仅在 check 模式且存在违规（或无法完整扫描的文件）时返回 1
    pub fn exit_code(&self) -> i32 {
        if self.check && !self.is_clean() {
            1
        } else {
            0
        }
    }
}
