use anyhow::{anyhow, bail, Result};
use chrono::{Datelike, Months, NaiveDate};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Age {
    pub years: u32,
    pub months: u32,
    pub days: u32,
}

/// Elapsed full years, remaining months and remaining days between a birth
/// date and `today`.
pub fn calc_age(day: u32, month: u32, year: i32, today: NaiveDate) -> Result<Age> {
    let birth = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| anyhow!("invalid birth date {year}-{month:02}-{day:02}"))?;
    if birth > today {
        bail!("birth date {birth} is after {today}");
    }

    let month_index = |d: NaiveDate| i64::from(d.year()) * 12 + i64::from(d.month0());
    let mut months = u32::try_from(month_index(today) - month_index(birth))?;
    let anniversary = |m: u32| {
        birth
            .checked_add_months(Months::new(m))
            .ok_or_else(|| anyhow!("date overflow adding {m} months to {birth}"))
    };
    // Month-end birthdays clamp, e.g. Jan 31 + 1 month is Feb 28.
    let mut anchor = anniversary(months)?;
    if anchor > today {
        months -= 1;
        anchor = anniversary(months)?;
    }
    let days = u32::try_from((today - anchor).num_days())?;

    Ok(Age {
        years: months / 12,
        months: months % 12,
        days,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_age_on_birthday() {
        let age = calc_age(20, 1, 1996, date(2026, 1, 20)).unwrap();
        assert_eq!(
            age,
            Age {
                years: 30,
                months: 0,
                days: 0
            }
        );
    }

    #[test]
    fn test_age_with_months_and_days() {
        let age = calc_age(20, 1, 1996, date(2026, 10, 19)).unwrap();
        assert_eq!(
            age,
            Age {
                years: 30,
                months: 8,
                days: 29
            }
        );
    }

    #[test]
    fn test_day_before_birthday() {
        let age = calc_age(20, 1, 1996, date(2026, 1, 19)).unwrap();
        assert_eq!(
            age,
            Age {
                years: 29,
                months: 11,
                days: 30
            }
        );
    }

    #[test]
    fn test_month_end_birthday() {
        let age = calc_age(31, 1, 2025, date(2025, 3, 1)).unwrap();
        assert_eq!(
            age,
            Age {
                years: 0,
                months: 1,
                days: 1
            }
        );
    }

    #[test]
    fn test_deterministic() {
        let today = date(2026, 10, 19);
        let first = calc_age(29, 2, 2000, today).unwrap();
        for _ in 0..10 {
            assert_eq!(calc_age(29, 2, 2000, today).unwrap(), first);
        }
    }

    #[test]
    fn test_invalid_input() {
        assert!(calc_age(30, 2, 2001, date(2026, 1, 1)).is_err());
        assert!(calc_age(1, 13, 2001, date(2026, 1, 1)).is_err());
        assert!(calc_age(2, 1, 2026, date(2026, 1, 1)).is_err());
    }
}
