//! 配置文件加载（YAML / JSON / TOML）
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::LintError;
use crate::options::{parse_jobs, LintOptions};

/// 默认配置文件名（按顺序查找）
pub const DEFAULT_CONFIG_FILES: [&str; 2] = [".ski-lint.yml", ".ski-lint.yaml"];

/// 配置文件内容；未出现的字段不覆盖默认值
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub accepted_values: Option<Vec<String>>,
    #[serde(default)]
    pub check: Option<bool>,
    #[serde(default)]
    pub context_width: Option<usize>,
    #[serde(default)]
    pub filenames: Option<Vec<PathBuf>>,
    #[serde(default)]
    pub jobs: Option<JobsSetting>,
}

/// 配置文件中的线程数：正整数或 "auto"
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum JobsSetting {
    Count(usize),
    Named(String),
}

impl JobsSetting {
    /// 与命令行 `--jobs` 相同的规则：0 或其它字符串均为错误
    pub fn resolve(&self) -> Result<Option<usize>, LintError> {
        match self {
            JobsSetting::Count(n) => parse_jobs(&n.to_string()),
            JobsSetting::Named(s) => parse_jobs(s),
        }
    }
}

impl FileConfig {
    /// 将配置文件中出现的字段覆盖到 `opts`
    pub fn apply_to(&self, opts: &mut LintOptions) -> Result<(), LintError> {
        if let Some(v) = &self.accepted_values {
            opts.accepted_values = v.clone();
        }
        if let Some(v) = self.check {
            opts.check = v;
        }
        if let Some(v) = self.context_width {
            opts.context_width = v;
        }
        if let Some(v) = &self.filenames {
            opts.filenames = v.clone();
        }
        if let Some(v) = &self.jobs {
            opts.jobs = v.resolve()?;
        }
        Ok(())
    }
}

/// 在 `dir` 下查找默认配置文件
pub fn default_config_file(dir: &Path) -> Option<PathBuf> {
    DEFAULT_CONFIG_FILES.iter().map(|name| dir.join(name)).find(|p| p.is_file())
}

/// 读取并解析配置文件，格式由扩展名决定（未知扩展名按 YAML 处理）
pub fn load_config_file(path: &Path) -> Result<FileConfig, LintError> {
    let txt = std::fs::read_to_string(path)
        .map_err(|source| LintError::FileAccess { path: path.to_path_buf(), source })?;
    let invalid = |message: String| LintError::Config { path: path.to_path_buf(), message };

    if txt.trim().is_empty() {
        return Ok(FileConfig::default());
    }

    let ext = path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("json") => serde_json::from_str(&txt).map_err(|e| invalid(e.to_string())),
        Some("toml") => toml::from_str(&txt).map_err(|e| invalid(e.to_string())),
        _ => serde_yaml::from_str(&txt).map_err(|e| invalid(e.to_string())),
    }
}
