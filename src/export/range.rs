use crate::errors::{AppError, AppResult};
use crate::models::month::YearMonth;
use chrono::NaiveDate;

fn invalid(r: &str) -> AppError {
    AppError::InvalidDate(format!(
        "'{r}' (expected YYYY, YYYY-MM, YYYY-MM-DD or START:END with the same shape)"
    ))
}

/// First and last day covered by a single range endpoint.
fn bounds_of(part: &str, whole: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    match part.len() {
        4 => {
            let y: i32 = part.parse().map_err(|_| invalid(whole))?;
            let first = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(|| invalid(whole))?;
            let last = NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(|| invalid(whole))?;
            Ok((first, last))
        }
        7 => {
            let m = YearMonth::parse(part).map_err(|_| invalid(whole))?;
            let last = m
                .next()
                .first_day()
                .pred_opt()
                .ok_or_else(|| invalid(whole))?;
            Ok((m.first_day(), last))
        }
        10 => {
            let d = NaiveDate::parse_from_str(part, "%Y-%m-%d").map_err(|_| invalid(whole))?;
            Ok((d, d))
        }
        _ => Err(invalid(whole)),
    }
}

/// Parse `--range` into inclusive date bounds.
///
/// Accepted: `YYYY`, `YYYY-MM`, `YYYY-MM-DD`, and `START:END` where both
/// sides use one of those shapes (the same one on both sides).
pub fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let r = r.trim();
    let (start, end) = match r.split_once(':') {
        Some((s, e)) => {
            let (s, e) = (s.trim(), e.trim());
            if s.len() != e.len() {
                return Err(invalid(r));
            }
            (bounds_of(s, r)?.0, bounds_of(e, r)?.1)
        }
        None => bounds_of(r, r)?,
    };

    if start > end {
        return Err(invalid(r));
    }
    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn single_periods() {
        assert_eq!(parse_range("2024").unwrap(), (d(2024, 1, 1), d(2024, 12, 31)));
        assert_eq!(parse_range("2024-02").unwrap(), (d(2024, 2, 1), d(2024, 2, 29)));
        assert_eq!(parse_range("2024-12").unwrap(), (d(2024, 12, 1), d(2024, 12, 31)));
        assert_eq!(parse_range("2024-05-03").unwrap(), (d(2024, 5, 3), d(2024, 5, 3)));
    }

    #[test]
    fn intervals() {
        assert_eq!(
            parse_range("2024-11:2025-01").unwrap(),
            (d(2024, 11, 1), d(2025, 1, 31))
        );
        assert!(parse_range("2024:2025-01").is_err());
        assert!(parse_range("2025:2024").is_err());
        assert!(parse_range("last week").is_err());
    }
}
