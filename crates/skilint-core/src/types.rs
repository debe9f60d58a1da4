//! 公共类型（对外暴露）
use std::fmt;
use std::path::PathBuf;

/// 单个文件的编码探测结果
#[derive(Debug, Clone, PartialEq)]
pub struct FileEncodingResult {
    pub filename: PathBuf,
    /// 无法判定时为 None；大小写取决于探测器，比较时需忽略大小写
    pub encoding: Option<String>,
    pub confidence: f32,
}

/// 含非 ASCII 字符的一行的分析结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineAnalysisResult {
    /// 行号（从 1 开始）
    pub line_number: usize,
    /// 去掉行尾 `\r`/`\n` 后的行内容
    pub line_text: String,
    /// 字符 → 出现位置（从 1 开始），按首次出现顺序排列
    chars: Vec<(char, Vec<usize>)>,
}

impl LineAnalysisResult {
    pub fn new(line_number: usize, line: &str) -> Self {
        Self {
            line_number,
            line_text: line.trim_end_matches(['\r', '\n']).to_string(),
            chars: Vec::new(),
        }
    }

    /// 记录一次出现；同一字符重复出现时追加位置
    pub fn add_char(&mut self, ch: char, position: usize) {
        match self.chars.iter_mut().find(|(c, _)| *c == ch) {
            Some((_, positions)) => positions.push(position),
            None => self.chars.push((ch, vec![position])),
        }
    }

    pub fn chars(&self) -> impl Iterator<Item = (char, &[usize])> + '_ {
        self.chars.iter().map(|(c, p)| (*c, p.as_slice()))
    }

    pub fn positions(&self, ch: char) -> Option<&[usize]> {
        self.chars.iter().find(|(c, _)| *c == ch).map(|(_, p)| p.as_slice())
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

/// 单条诊断（一次违规出现）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub filename: PathBuf,
    pub encoding: String,
    pub line_number: usize,
    pub position: usize,
    pub character: char,
    /// `U+XXXX` 记法
    pub codepoint: String,
    pub printable: bool,
    /// 不可打印字符已在上下文中替换为 `U+XXXX`
    pub context: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}), line {}, pos {}, ",
            self.filename.display(),
            self.encoding,
            self.line_number,
            self.position
        )?;
        if self.printable {
            write!(f, "char {} '{}', ", self.codepoint, self.character)?;
        } else {
            write!(f, "non-printable char {}, ", self.codepoint)?;
        }
        write!(f, "context: '{}'", self.context)
    }
}
