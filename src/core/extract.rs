use regex::Regex;
use std::sync::LazyLock;

static LIST_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\d\-\*•]+\.?\s+").expect("valid list marker regex"));

static COURSE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{3}\d{4}\s*[\-:]\s*").expect("valid course code regex"));

static QUOTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"["']([^"']+)["']|["\[(]([^\])]+)[\])]"#).expect("valid quoted regex")
});

/// 從 agent 的自由文字回覆中擷取課程名稱。
///
/// 先逐行尋找編號或項目符號開頭的行（去掉標記與 `ABC1234 - ` 課程代碼前綴），
/// 若一行都沒有，才退回擷取引號或括號內的文字。
pub fn extract_disciplines(text: &str) -> Vec<String> {
    let listed: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|line| LIST_MARKER.is_match(line))
        .map(|line| {
            let without_marker = LIST_MARKER.replace(line, "");
            COURSE_CODE.replace(&without_marker, "").into_owned()
        })
        .collect();

    if !listed.is_empty() {
        return listed;
    }

    QUOTED
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str().to_string())
        .collect()
}
