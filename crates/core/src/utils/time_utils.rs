use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

/// Timezone used to turn instants into calendar dates for the user.
pub const DEFAULT_LOCAL_TZ: Tz = chrono_tz::America::Sao_Paulo;

/// Converts a UTC instant to the user's calendar date in the given timezone.
pub fn local_date_from_utc(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// Today's date in the default local timezone.
pub fn local_today() -> NaiveDate {
    local_date_from_utc(Utc::now(), DEFAULT_LOCAL_TZ)
}

/// Renders a date as dd/mm/yyyy.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_local_date_crosses_midnight_behind_utc() {
        // 01:30 UTC is still the previous evening in São Paulo (UTC-3)
        let instant = Utc.with_ymd_and_hms(2024, 3, 10, 1, 30, 0).unwrap();
        assert_eq!(
            local_date_from_utc(instant, DEFAULT_LOCAL_TZ),
            NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
        );
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 7).unwrap();
        assert_eq!(format_date(date), "07/01/2025");
    }
}
