//! 码点记法（`U+XXXX`）与字符分类
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;
use unicode_general_category::{get_general_category, GeneralCategory};

use crate::error::LintError;

fn notation_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // 大小写不敏感的 `U+` 前缀，1~6 位十六进制
    RE.get_or_init(|| Regex::new(r"^[Uu]\+([0-9A-Fa-f]{1,6})$").expect("valid notation regex"))
}

/// 字符的 Unicode 记法：大写十六进制、不补零，例如 `U+E4`、`U+2026`
pub fn unicode_notation(ch: char) -> String {
    format!("U+{:X}", ch as u32)
}

/// 将 `U+XXXX` 解析为字符；格式错误、代理区或越界码点均视为配置错误
pub fn parse_notation(value: &str) -> Result<char, LintError> {
    let invalid = || LintError::InvalidAcceptedValue { value: value.to_string() };
    let caps = notation_regex().captures(value.trim()).ok_or_else(invalid)?;
    let code = u32::from_str_radix(&caps[1], 16).map_err(|_| invalid())?;
    char::from_u32(code).ok_or_else(invalid)
}

/// 是否为 ASCII（码点 <= 127）
pub fn is_ascii_char(ch: char) -> bool {
    ch.is_ascii()
}

/// 是否“可打印”：基于固定的 Unicode 通用类别表，不依赖本地化设置。
/// 控制、格式、代理、私用、未分配、行/段分隔符，以及除普通空格外的空白分隔符均为不可打印。
pub fn is_printable(ch: char) -> bool {
    if ch == ' ' {
        return true;
    }
    !matches!(
        get_general_category(ch),
        GeneralCategory::Control
            | GeneralCategory::Format
            | GeneralCategory::Surrogate
            | GeneralCategory::PrivateUse
            | GeneralCategory::Unassigned
            | GeneralCategory::LineSeparator
            | GeneralCategory::ParagraphSeparator
            | GeneralCategory::SpaceSeparator
    )
}

/// 允许清单（已归一化为字符）
#[derive(Debug, Clone, Default)]
pub struct AcceptedChars {
    chars: HashSet<char>,
}

impl AcceptedChars {
    /// 解析全部 `U+XXXX` 条目；任一条目非法即返回错误
    pub fn parse<S: AsRef<str>>(values: &[S]) -> Result<Self, LintError> {
        let chars = values
            .iter()
            .map(|v| parse_notation(v.as_ref()))
            .collect::<Result<HashSet<char>, _>>()?;
        Ok(Self { chars })
    }

    pub fn contains(&self, ch: char) -> bool {
        self.chars.contains(&ch)
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn notation_is_uppercase_without_padding() {
        assert_eq!(unicode_notation('ä'), "U+E4");
        assert_eq!(unicode_notation('…'), "U+2026");
        assert_eq!(unicode_notation('\u{200B}'), "U+200B");
        assert_eq!(unicode_notation('\u{1F600}'), "U+1F600");
    }

    #[test]
    fn parses_accepted_values() {
        assert_eq!(parse_notation("U+E4").unwrap(), 'ä');
        assert_eq!(parse_notation("U+2026").unwrap(), '…');
        assert_eq!(parse_notation("u+00e4").unwrap(), 'ä');
    }

    #[test]
    fn rejects_malformed_values() {
        for bad in ["", "U+", "E4", "U+XYZ", "U-E4", "U+110000", "U+D800", "U+1234567"] {
            let err = parse_notation(bad).unwrap_err();
            assert!(matches!(err, LintError::InvalidAcceptedValue { .. }), "{bad:?}");
        }
    }

    #[test]
    fn printable_classification() {
        assert!(is_printable('ä'));
        assert!(is_printable('…'));
        assert!(is_printable(' '));
        assert!(!is_printable('\u{200B}'));
        assert!(!is_printable('\u{FEFF}'));
        assert!(!is_printable('\u{A0}'));
        assert!(!is_printable('\u{2028}'));
        assert!(!is_printable('\u{E000}'));
        assert!(!is_printable('\u{7}'));
    }

    #[test]
    fn accepted_set_rejects_on_first_bad_entry() {
        let set = AcceptedChars::parse(&["U+E4", "U+2026"]).unwrap();
        assert!(set.contains('ä'));
        assert!(set.contains('…'));
        assert!(!set.contains('ö'));
        assert_eq!(set.len(), 2);

        assert!(AcceptedChars::parse(&["U+E4", "nope"]).is_err());
        assert!(AcceptedChars::parse::<&str>(&[]).unwrap().is_empty());
    }

    proptest! {
        #[test]
        fn notation_round_trips(ch in any::<char>().prop_filter("non-ascii", |c| !c.is_ascii())) {
            let notation = unicode_notation(ch);
            let parsed = parse_notation(&notation).unwrap();
            prop_assert_eq!(parsed, ch);
            prop_assert_eq!(unicode_notation(parsed), notation);
        }
    }
}
