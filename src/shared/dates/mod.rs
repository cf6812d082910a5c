// 日付文字列の正規化と表示整形
//
// ストアから返る日付はISO形式（YYYY-MM-DD）と省略形（"4 Avr. 04" など）が
// 混在するため、並べ替えの前に比較可能な値へ正規化する。

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// 月略称テーブル（1月から順、ドット除去後の形）
const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Févr", "Mar", "Avr", "Mai", "Juin", "Juil", "Août", "Sep", "Oct", "Nov", "Déc",
];

/// 略称 → 月番号（1〜12）の逆引きテーブル
static MONTH_LOOKUP: Lazy<HashMap<&'static str, u32>> = Lazy::new(|| {
    MONTH_ABBREVIATIONS
        .iter()
        .enumerate()
        .map(|(index, abbr)| (*abbr, index as u32 + 1))
        .collect()
});

/// 正規化された日付
///
/// `Invalid` は解析できなかった日付を表す番兵値で、順序比較では
/// すべての有効な日付より後に並ぶ。解析失敗が一覧の描画を
/// 中断させてはならないため、エラーではなく値として扱う。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum NormalizedDate {
    Valid(NaiveDate),
    Invalid,
}

impl NormalizedDate {
    /// 解析に成功した日付かどうか
    pub fn is_valid(&self) -> bool {
        matches!(self, NormalizedDate::Valid(_))
    }

    /// 内部のカレンダー日付を取得する（無効な場合はNone）
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            NormalizedDate::Valid(date) => Some(*date),
            NormalizedDate::Invalid => None,
        }
    }
}

/// 日付文字列を正規化する（純粋関数）
///
/// # 引数
/// * `raw` - ISO形式（YYYY-MM-DD）または省略形（"D Mon YY" / "D Mon YYYY"）の日付文字列
///
/// # 戻り値
/// 比較可能な正規化済み日付。解析できない場合は `NormalizedDate::Invalid`
pub fn normalize(raw: &str) -> NormalizedDate {
    let trimmed = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return NormalizedDate::Valid(date);
    }

    parse_abbreviated(trimmed)
}

/// 省略形（"4 Avr. 04" / "4 Avr. 2004"）を解析する
fn parse_abbreviated(value: &str) -> NormalizedDate {
    let parts: Vec<&str> = value.split_whitespace().collect();
    if parts.len() != 3 {
        return NormalizedDate::Invalid;
    }

    let day: u32 = match parts[0].parse() {
        Ok(day) => day,
        Err(_) => return NormalizedDate::Invalid,
    };

    // 月略称のドットを除去してから逆引きする
    let month_key = parts[1].replace('.', "");
    let month = match MONTH_LOOKUP.get(month_key.as_str()) {
        Some(month) => *month,
        None => return NormalizedDate::Invalid,
    };

    let year = match parse_year(parts[2]) {
        Some(year) => year,
        None => return NormalizedDate::Invalid,
    };

    // 存在しない組み合わせ（31 Févr など）もここで無効になる
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => NormalizedDate::Valid(date),
        None => NormalizedDate::Invalid,
    }
}

/// 年を解析する（2桁の場合は「20」を世紀として補う）
fn parse_year(raw: &str) -> Option<i32> {
    let value: i32 = raw.parse().ok()?;
    if raw.len() == 2 {
        Some(2000 + value)
    } else {
        Some(value)
    }
}

/// 表示用の短い形式（"4 Avr. 04"）へ整形する
///
/// 月略称は解析側と同じテーブルを使うため、整形した文字列を
/// `normalize` に戻しても同じ日付になる
pub fn format_display(date: NaiveDate) -> String {
    format!(
        "{} {}. {:02}",
        date.day(),
        MONTH_ABBREVIATIONS[date.month0() as usize],
        date.year() % 100
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn test_normalize_iso_format() {
        let normalized = normalize("2004-04-04");
        assert!(normalized.is_valid());
        assert_eq!(normalized.date(), NaiveDate::from_ymd_opt(2004, 4, 4));
        assert_eq!(
            normalized,
            NormalizedDate::Valid(NaiveDate::from_ymd_opt(2004, 4, 4).unwrap())
        );
        assert_eq!(
            normalize("2024-09-05"),
            NormalizedDate::Valid(NaiveDate::from_ymd_opt(2024, 9, 5).unwrap())
        );
    }

    #[test]
    fn test_normalize_abbreviated_format() {
        // 2桁の年は「20」を補って解釈する
        assert_eq!(
            normalize("4 Avr. 04"),
            NormalizedDate::Valid(NaiveDate::from_ymd_opt(2004, 4, 4).unwrap())
        );
        // ドットなし・4桁の年も受け付ける
        assert_eq!(
            normalize("15 Juin 2023"),
            NormalizedDate::Valid(NaiveDate::from_ymd_opt(2023, 6, 15).unwrap())
        );
        // 4文字の略称
        assert_eq!(
            normalize("5 Févr. 04"),
            NormalizedDate::Valid(NaiveDate::from_ymd_opt(2004, 2, 5).unwrap())
        );
        assert_eq!(
            normalize("1 Août 99"),
            NormalizedDate::Valid(NaiveDate::from_ymd_opt(2099, 8, 1).unwrap())
        );
    }

    #[test]
    fn test_normalize_invalid_inputs() {
        // 未知の月略称
        assert_eq!(normalize("4 Xyz 04"), NormalizedDate::Invalid);
        // 数値でない日
        assert_eq!(normalize("xx Avr. 04"), NormalizedDate::Invalid);
        // 数値でない年
        assert_eq!(normalize("4 Avr. yy"), NormalizedDate::Invalid);
        // 存在しない日付
        assert_eq!(normalize("31 Févr. 04"), NormalizedDate::Invalid);
        // 形が違う
        assert_eq!(normalize(""), NormalizedDate::Invalid);
        assert_eq!(normalize("2004/04/04"), NormalizedDate::Invalid);
        assert_eq!(normalize("4 Avr"), NormalizedDate::Invalid);

        assert!(!normalize("garbage").is_valid());
        assert_eq!(normalize("garbage").date(), None);
    }

    #[test]
    fn test_invalid_sorts_after_all_valid_dates() {
        let valid = normalize("2004-04-04");
        assert!(valid < NormalizedDate::Invalid);
        assert!(normalize("9999-12-31") < NormalizedDate::Invalid);
    }

    #[test]
    fn test_chronological_ordering() {
        let earlier = normalize("2003-03-03");
        let later = normalize("2004-04-04");
        assert!(earlier < later);
    }

    #[test]
    fn test_format_display() {
        assert_eq!(
            format_display(NaiveDate::from_ymd_opt(2004, 4, 4).unwrap()),
            "4 Avr. 04"
        );
        // 月略称は切り詰めない（"Fév" ではなく "Févr"）
        assert_eq!(
            format_display(NaiveDate::from_ymd_opt(2004, 2, 5).unwrap()),
            "5 Févr. 04"
        );
        assert_eq!(
            format_display(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()),
            "31 Déc. 23"
        );
    }

    #[test]
    fn test_same_input_same_result() {
        // 正規化は純粋で状態を持たない
        assert_eq!(normalize("4 Avr. 04"), normalize("4 Avr. 04"));
        assert_eq!(normalize("garbage"), normalize("garbage"));
    }

    #[quickcheck]
    fn prop_chronological_order_is_preserved(a_offset: u16, b_offset: u16) -> bool {
        let base = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let a = base + chrono::Duration::days(a_offset as i64);
        let b = base + chrono::Duration::days(b_offset as i64);

        let normalized_a = normalize(&a.format("%Y-%m-%d").to_string());
        let normalized_b = normalize(&b.format("%Y-%m-%d").to_string());

        (a < b) == (normalized_a < normalized_b) && (a == b) == (normalized_a == normalized_b)
    }

    #[quickcheck]
    fn prop_format_then_normalize_round_trips(offset: u16) -> bool {
        // 表示形式は2桁の年を使うため、2000〜2099年の範囲で検証する
        let base = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let date = base + chrono::Duration::days((offset % 36000) as i64);

        normalize(&format_display(date)) == NormalizedDate::Valid(date)
    }
}
