use chrono::{Datelike, Duration, NaiveDate};

const WEEKDAY_HEADER: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

pub fn first_day_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn shift_months(date: NaiveDate, months: i32) -> NaiveDate {
    let mut year = date.year();
    let mut month = date.month() as i32 + months;

    while month < 1 {
        month += 12;
        year = year.saturating_sub(1);
    }
    while month > 12 {
        month -= 12;
        year = year.saturating_add(1);
    }

    NaiveDate::from_ymd_opt(year, month as u32, 1).unwrap_or(date)
}

pub fn days_in_month(month: NaiveDate) -> u32 {
    let first = first_day_of_month(month);
    let next = shift_months(first, 1);
    (next - first).num_days() as u32
}

pub fn in_month(date: NaiveDate, month: NaiveDate) -> bool {
    date.year() == month.year() && date.month() == month.month()
}

// Sunday first. Marked days get a trailing `*`, today a leading `>`.
pub fn render_month<F>(month: NaiveDate, today: NaiveDate, is_marked: F) -> String
where
    F: Fn(NaiveDate) -> bool,
{
    let first = first_day_of_month(month);
    let mut out = String::new();
    out.push_str(&format!("{:^28}\n", first.format("%B %Y").to_string()));
    for label in WEEKDAY_HEADER {
        out.push_str(&format!(" {} ", label));
    }
    out.push('\n');

    let lead = first.weekday().num_days_from_sunday() as usize;
    let mut column = 0;
    for _ in 0..lead {
        out.push_str("    ");
        column += 1;
    }

    for offset in 0..days_in_month(first) {
        let day = first + Duration::days(offset as i64);
        let prefix = if day == today { '>' } else { ' ' };
        let suffix = if is_marked(day) { '*' } else { ' ' };
        out.push_str(&format!("{}{:>2}{}", prefix, day.day(), suffix));
        column += 1;
        if column == 7 {
            out.push('\n');
            column = 0;
        }
    }
    if column != 0 {
        out.push('\n');
    }
    out
}
