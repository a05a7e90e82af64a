//! Formatting of dates and times with `DateTimeFormatter`-style patterns
//! such as `yyyy-MM-dd'T'HH:mm:ss.SSS`.
//!
//! Supported letters: `y`/`u` (year), `M` (month), `d` (day of month),
//! `D` (day of year), `E` (weekday), `a` (AM/PM), `H` (hour 0-23),
//! `h` (hour 1-12), `m` (minute), `s` (second), `S` (fraction of second).
//! Text in single quotes is copied literally and `''` is one quote. Any
//! other letter is rejected, everything else is copied as-is.

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::error::{ResolveError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Field {
    Literal(String),
    /// Year zero-padded to at least the given width
    Year(usize),
    YearOfCentury,
    Month(usize),
    MonthShort,
    MonthLong,
    Day(usize),
    DayOfYear(usize),
    WeekdayShort,
    WeekdayLong,
    AmPm,
    Hour(usize),
    Hour12(usize),
    Minute(usize),
    Second(usize),
    /// Fraction of second truncated to the given number of digits
    Fraction(usize),
}

impl Field {
    fn is_time(&self) -> bool {
        matches!(
            self,
            Field::AmPm
                | Field::Hour(_)
                | Field::Hour12(_)
                | Field::Minute(_)
                | Field::Second(_)
                | Field::Fraction(_)
        )
    }
}

/// A parsed date/time pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePattern {
    pattern: String,
    fields: Vec<Field>,
}

impl DatePattern {
    pub fn parse(pattern: &str) -> Result<Self> {
        let invalid = |reason: String| ResolveError::InvalidPattern {
            pattern: pattern.to_string(),
            reason,
        };

        let mut fields = Vec::new();
        let mut chars = pattern.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '\'' {
                let mut literal = String::new();
                if chars.peek() == Some(&'\'') {
                    chars.next();
                    literal.push('\'');
                } else {
                    loop {
                        match chars.next() {
                            Some('\'') if chars.peek() == Some(&'\'') => {
                                chars.next();
                                literal.push('\'');
                            }
                            Some('\'') => break,
                            Some(other) => literal.push(other),
                            None => return Err(invalid("unterminated quoted text".into())),
                        }
                    }
                }
                fields.push(Field::Literal(literal));
                continue;
            }

            if !c.is_ascii_alphabetic() {
                fields.push(Field::Literal(c.to_string()));
                continue;
            }

            let mut width = 1;
            while chars.peek() == Some(&c) {
                chars.next();
                width += 1;
            }

            let field = match (c, width) {
                ('y' | 'u', 2) => Field::YearOfCentury,
                ('y' | 'u', w) => Field::Year(w),
                ('M', 1 | 2) => Field::Month(width),
                ('M', 3) => Field::MonthShort,
                ('M', 4) => Field::MonthLong,
                ('d', 1 | 2) => Field::Day(width),
                ('D', 1..=3) => Field::DayOfYear(width),
                ('E', 1..=3) => Field::WeekdayShort,
                ('E', 4) => Field::WeekdayLong,
                ('a', 1) => Field::AmPm,
                ('H', 1 | 2) => Field::Hour(width),
                ('h', 1 | 2) => Field::Hour12(width),
                ('m', 1 | 2) => Field::Minute(width),
                ('s', 1 | 2) => Field::Second(width),
                ('S', 1..=9) => Field::Fraction(width),
                _ => {
                    return Err(invalid(format!(
                        "unsupported field '{}'",
                        c.to_string().repeat(width)
                    )));
                }
            };
            fields.push(field);
        }

        Ok(Self {
            pattern: pattern.to_string(),
            fields,
        })
    }

    /// Whether the pattern prints any time-of-day field
    pub fn has_time(&self) -> bool {
        self.fields.iter().any(Field::is_time)
    }

    pub fn format_date(&self, date: NaiveDate) -> Result<String> {
        if self.has_time() {
            return Err(ResolveError::InvalidPattern {
                pattern: self.pattern.clone(),
                reason: "time fields cannot be used to format a date".into(),
            });
        }
        Ok(self.render(date, NaiveTime::MIN))
    }

    pub fn format_datetime(&self, datetime: NaiveDateTime) -> String {
        self.render(datetime.date(), datetime.time())
    }

    fn render(&self, date: NaiveDate, time: NaiveTime) -> String {
        let mut out = String::with_capacity(self.pattern.len() + 8);
        for field in &self.fields {
            match field {
                Field::Literal(text) => out.push_str(text),
                Field::Year(w) => out.push_str(&format!("{:0w$}", date.year(), w = *w)),
                Field::YearOfCentury => {
                    out.push_str(&format!("{:02}", date.year().rem_euclid(100)))
                }
                Field::Month(w) => out.push_str(&format!("{:0w$}", date.month(), w = *w)),
                Field::MonthShort => out.push_str(&date.format("%b").to_string()),
                Field::MonthLong => out.push_str(&date.format("%B").to_string()),
                Field::Day(w) => out.push_str(&format!("{:0w$}", date.day(), w = *w)),
                Field::DayOfYear(w) => out.push_str(&format!("{:0w$}", date.ordinal(), w = *w)),
                Field::WeekdayShort => out.push_str(&date.format("%a").to_string()),
                Field::WeekdayLong => out.push_str(&date.format("%A").to_string()),
                Field::AmPm => out.push_str(if time.hour() < 12 { "AM" } else { "PM" }),
                Field::Hour(w) => out.push_str(&format!("{:0w$}", time.hour(), w = *w)),
                Field::Hour12(w) => out.push_str(&format!("{:0w$}", time.hour12().1, w = *w)),
                Field::Minute(w) => out.push_str(&format!("{:0w$}", time.minute(), w = *w)),
                Field::Second(w) => out.push_str(&format!("{:0w$}", time.second(), w = *w)),
                Field::Fraction(n) => {
                    // leap seconds carry nanos past one second
                    let nanos = format!("{:09}", time.nanosecond() % 1_000_000_000);
                    out.push_str(&nanos[..*n]);
                }
            }
        }
        out
    }
}

/// Format `date` with a `DateTimeFormatter`-style pattern
pub fn format_date(date: NaiveDate, pattern: &str) -> Result<String> {
    DatePattern::parse(pattern)?.format_date(date)
}

/// Format `datetime` with a `DateTimeFormatter`-style pattern
pub fn format_datetime(datetime: NaiveDateTime, pattern: &str) -> Result<String> {
    Ok(DatePattern::parse(pattern)?.format_datetime(datetime))
}

/// Today's local date formatted with `pattern`
pub fn today(pattern: &str) -> Result<String> {
    format_date(Local::now().date_naive(), pattern)
}

/// The current local date-time formatted with `pattern`
pub fn now(pattern: &str) -> Result<String> {
    format_datetime(Local::now().naive_local(), pattern)
}
