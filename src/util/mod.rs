pub(crate) fn now_ms() -> i64 {
    js_sys::Date::now().round() as i64
}

/// Compact count formatting for stat tiles: 1532 -> "1.5K", 2_100_000 -> "2.1M".
pub(crate) fn format_count(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

/// `YYYY-MM-DD` in the browser's local timezone, `days` days before today.
/// Used for default report date ranges.
pub(crate) fn yyyy_mm_dd_days_ago(days: u32) -> String {
    let d = js_sys::Date::new_0();
    let ms = d.get_time() - f64::from(days) * 86_400_000.0;
    let d = js_sys::Date::new(&ms.into());
    format!(
        "{:04}-{:02}-{:02}",
        d.get_full_year(),
        d.get_month() + 1,
        d.get_date()
    )
}

/// Trim an ISO timestamp down to its date part for display.
pub(crate) fn short_date(iso: &str) -> &str {
    iso.split('T').next().unwrap_or(iso)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_count_thresholds() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1.0K");
        assert_eq!(format_count(1_532), "1.5K");
        assert_eq!(format_count(2_100_000), "2.1M");
    }

    #[test]
    fn short_date_strips_time() {
        assert_eq!(short_date("2025-11-03T14:22:08Z"), "2025-11-03");
        assert_eq!(short_date("2025-11-03"), "2025-11-03");
    }
}
