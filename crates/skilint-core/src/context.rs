//! 上下文窗口提取

/// 以 `center_position` 为中心截取 `line` 的一段上下文（按字符计）。
///
/// 前后各取 `width / 2` 个字符；窗口越过行首/行尾时直接截断、不补齐，
/// 因此输出长度不超过 `width`。`width == 0` 返回空串。
pub fn extract_context(line: &str, center_position: usize, width: usize) -> String {
    let before = width / 2;
    let after = width / 2;

    let len = line.chars().count();
    let start = center_position.saturating_sub(before);
    let end = len.min(center_position.saturating_add(after));
    if start >= end {
        return String::new();
    }

    line.chars().skip(start).take(end - start).collect()
}
