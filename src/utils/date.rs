use chrono::{Datelike, Days, NaiveDate, Weekday};

pub const DATE_FMT: &str = "%Y-%m-%d";

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FMT).ok()
}

pub fn format_date(d: &NaiveDate) -> String {
    d.format(DATE_FMT).to_string()
}

/// `d + n` days, saturating at the calendar bounds.
pub fn add_days(d: NaiveDate, n: u64) -> NaiveDate {
    d.checked_add_days(Days::new(n)).unwrap_or(NaiveDate::MAX)
}

/// `d - n` days, saturating at the calendar bounds.
pub fn sub_days(d: NaiveDate, n: u64) -> NaiveDate {
    d.checked_sub_days(Days::new(n)).unwrap_or(NaiveDate::MIN)
}

/// Weekday from a name or abbreviation (`mon`, `Monday`, ...)
/// or from a number with 0 = Sunday .. 6 = Saturday.
pub fn parse_weekday(s: &str) -> Option<Weekday> {
    let s = s.trim();
    if let Ok(n) = s.parse::<u32>() {
        return weekday_from_sunday_index(n);
    }
    s.parse::<Weekday>().ok()
}

/// 0 = Sunday .. 6 = Saturday, the numbering stored in `schedules.day_of_week`.
pub fn weekday_from_sunday_index(n: u32) -> Option<Weekday> {
    match n {
        0 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
    }
}

pub fn weekday_to_sunday_index(w: Weekday) -> u32 {
    w.num_days_from_sunday()
}

/// Accepts `YYYY`, `YYYY-MM`, `YYYY-MM-DD` or `A:B` with any of those on each side.
/// Returns the inclusive `(first, last)` bounds.
pub fn resolve_period(p: &str) -> Result<(NaiveDate, NaiveDate), String> {
    if let Some((a, b)) = p.split_once(':') {
        let (start, _) = period_bounds(a)?;
        let (_, end) = period_bounds(b)?;
        return Ok((start, end));
    }
    period_bounds(p)
}

fn period_bounds(p: &str) -> Result<(NaiveDate, NaiveDate), String> {
    let p = p.trim();

    // YYYY-MM-DD
    if let Some(d) = parse_date(p) {
        return Ok((d, d));
    }

    // YYYY-MM
    if let Some(first) = parse_date(&format!("{p}-01")) {
        return Ok((first, last_day_of_month(first.year(), first.month())));
    }

    // YYYY
    if p.len() == 4
        && let Ok(year) = p.parse::<i32>()
        && let (Some(first), Some(last)) = (
            NaiveDate::from_ymd_opt(year, 1, 1),
            NaiveDate::from_ymd_opt(year, 12, 31),
        )
    {
        return Ok((first, last));
    }

    Err(format!("Invalid period: {}", p))
}

pub fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let (ny, nm) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(ny, nm, 1)
        .and_then(|d| d.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}
