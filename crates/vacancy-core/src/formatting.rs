use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

/// Format a raw salary amount with space-separated thousands, dropping any
/// fractional part.
///
/// # Examples
///
/// ```
/// use vacancy_core::formatting::format_money;
///
/// assert_eq!(format_money("80000.0"), "80 000");
/// assert_eq!(format_money("1500000"), "1 500 000");
/// assert_eq!(format_money("900"), "900");
/// ```
pub fn format_money(raw: &str) -> String {
    let raw = raw.trim();
    let integer = raw.split('.').next().unwrap_or(raw);
    let (sign, digits) = match integer.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", integer),
    };
    format!("{}{}", sign, group_thousands(digits, ' '))
}

/// Insert `separator` between every group of three digits, counting from the
/// right.
pub fn group_thousands(digits: &str, separator: char) -> String {
    let chars: Vec<char> = digits.chars().collect();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(*c);
    }
    out
}

/// Format an ISO-like publication timestamp as `dd.mm.yyyy`.
///
/// Strings that do not start with a `YYYY-MM-DD` date are sliced by position
/// when long enough and returned unchanged otherwise.
///
/// # Examples
///
/// ```
/// use vacancy_core::formatting::format_date;
///
/// assert_eq!(format_date("2022-07-17T18:23:06+0300"), "17.07.2022");
/// assert_eq!(format_date("2014-12-30"), "30.12.2014");
/// ```
pub fn format_date(published_at: &str) -> String {
    let Some(prefix) = published_at.get(..10) else {
        return published_at.to_string();
    };
    match NaiveDate::parse_from_str(prefix, "%Y-%m-%d") {
        Ok(date) => date.format("%d.%m.%Y").to_string(),
        Err(_) => match (prefix.get(8..10), prefix.get(5..7), prefix.get(..4)) {
            (Some(day), Some(month), Some(year)) => format!("{day}.{month}.{year}"),
            _ => published_at.to_string(),
        },
    }
}

/// Format a vacancy share (`0.0..=1.0`) as a percentage with at most two
/// decimals.
///
/// # Examples
///
/// ```
/// use vacancy_core::formatting::format_share;
///
/// assert_eq!(format_share(0.5), "50.0%");
/// assert_eq!(format_share(0.1234), "12.34%");
/// ```
pub fn format_share(share: f64) -> String {
    let percent = (share * 100.0 * 100.0).round() / 100.0;
    format!("{:?}%", percent)
}

/// Cut `value` to `max_chars` characters, appending `...` when shortened.
pub fn truncate(value: &str, max_chars: usize) -> String {
    match value.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &value[..idx]),
        None => value.to_string(),
    }
}

/// Strip HTML tags and collapse runs of whitespace inside every line.
///
/// # Examples
///
/// ```
/// use vacancy_core::formatting::clean_text;
///
/// assert_eq!(clean_text("<p><b>Python</b>   developer</p>"), "Python developer");
/// assert_eq!(clean_text(" a \n  b  c "), "a\nb c");
/// ```
pub fn clean_text(value: &str) -> String {
    static TAG: OnceLock<Regex> = OnceLock::new();
    let tag = TAG.get_or_init(|| Regex::new(r"<[^>]*>").expect("regex is valid"));

    tag.replace_all(value, "")
        .split('\n')
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join("\n")
}
