const DAYS_IN_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

pub const MIN_YEAR: i32 = 1900;

/// Gregorian leap-year rule.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Day count of `month` (1-based) in `year`.
///
/// Callers must pass `month` in `1..=12`; anything else panics on the table index.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    if month == 2 && is_leap_year(year) {
        return 29;
    }
    DAYS_IN_MONTH[(month - 1) as usize]
}

/// Options offered by the day picker for the given year/month.
pub fn day_options(year: i32, month: u32) -> Vec<u32> {
    (1..=days_in_month(year, month)).collect()
}

/// Keeps the currently selected day when the month shrinks under it.
pub fn clamp_day(year: i32, month: u32, day: u32) -> u32 {
    day.clamp(1, days_in_month(year, month))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leap_years_follow_gregorian_rule() {
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
        assert!(is_leap_year(2024));
    }

    #[test]
    fn february_depends_on_leap_year() {
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
    }

    #[test]
    fn other_months_are_fixed() {
        let expected = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for (i, days) in expected.iter().enumerate() {
            assert_eq!(days_in_month(2023, i as u32 + 1), *days);
        }
    }

    #[test]
    fn day_options_cover_whole_month() {
        let opts = day_options(2024, 2);
        assert_eq!(opts.first(), Some(&1));
        assert_eq!(opts.last(), Some(&29));
        assert_eq!(opts.len(), 29);
    }

    #[test]
    fn clamp_day_shrinks_to_month_end() {
        assert_eq!(clamp_day(2023, 2, 31), 28);
        assert_eq!(clamp_day(2024, 2, 30), 29);
        assert_eq!(clamp_day(2024, 3, 15), 15);
        assert_eq!(clamp_day(2024, 3, 0), 1);
    }
}
