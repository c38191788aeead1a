//! Front controllers
//!
//! A front runs before route resolution and may add values to the request.

use super::request::Request;
use chrono::{Local, NaiveDate};

/// Key under which [`DateFront`] stores the date
pub const DATE_KEY: &str = "date";

/// Request decorator applied before dispatch
pub trait Front: Send + Sync {
    fn apply(&self, request: &mut Request);
}

/// Adds the date of the request as `extras["date"]` (`YYYY-MM-DD`)
#[derive(Debug, Default, Clone, Copy)]
pub struct DateFront {
    fixed: Option<NaiveDate>,
}

impl DateFront {
    /// Uses the local date at the time of each request
    pub fn new() -> Self {
        Self::default()
    }

    /// Always uses `date`
    pub fn fixed(date: NaiveDate) -> Self {
        Self { fixed: Some(date) }
    }
}

impl Front for DateFront {
    fn apply(&self, request: &mut Request) {
        let date = self.fixed.unwrap_or_else(|| Local::now().date_naive());
        request
            .extras
            .insert(DATE_KEY.to_string(), date.format("%Y-%m-%d").to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_date() {
        let mut request = Request::get("/");
        let date = NaiveDate::from_ymd_opt(2024, 3, 8).unwrap();
        DateFront::fixed(date).apply(&mut request);
        assert_eq!(request.extra(DATE_KEY), Some("2024-03-08"));
    }

    #[test]
    fn test_today_has_date_shape() {
        let mut request = Request::get("/");
        DateFront::new().apply(&mut request);
        let value = request.extra(DATE_KEY).unwrap();
        assert_eq!(value.len(), 10);
        assert!(NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok());
    }
}
