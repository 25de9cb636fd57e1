use std::error::Error;
use std::f64::consts::PI;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Hours east of UTC used by the Vietnamese calendar since 1968.
pub const VIETNAM_TIME_ZONE: f64 = 7.0;

/// Days in a mean synodic month.
const SYNODIC_MONTH: f64 = 29.530588853;

/// Julian day of the new moon of 1900-01-01, origin of the lunation count.
const LUNATION_EPOCH: f64 = 2415021.076998695;

/// Years for which the new-moon series stays within a day of the true phase.
const SUPPORTED_YEARS: std::ops::RangeInclusive<i32> = 1200..=2199;

pub type JulianDayNumber = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LunarDate {
    pub day: u32,
    pub month: u32,
    pub year: i32,
    pub is_leap_month: bool,
    pub julian_day: JulianDayNumber,
}

impl fmt::Display for LunarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let leap = if self.is_leap_month { " (nhuận)" } else { "" };
        write!(f, "Ngày {} tháng {}{} năm {}", self.day, self.month, leap, self.year)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalculationError {
    pub code: i32,
    pub message: String,
}

impl fmt::Display for CalculationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CalculationError {{ code: {} message: {} }}",
            self.code, self.message
        )
    }
}

impl Error for CalculationError {}

// ---------------------------
// ## Julian Day Numbers
// ---------------------------

/// Julian day number of a civil date. Dates before 1582-10-15 are read as
/// Julian calendar dates.
pub fn jd_from_date(day: u32, month: u32, year: i32) -> JulianDayNumber {
    let (dd, mm, yy) = (day as i64, month as i64, year as i64);
    let a = (14 - mm) / 12;
    let y = yy + 4800 - a;
    let m = mm + 12 * a - 3;
    let jd = dd + (153 * m + 2) / 5 + 365 * y + y / 4 - y / 100 + y / 400 - 32045;
    if jd < 2299161 {
        dd + (153 * m + 2) / 5 + 365 * y + y / 4 - 32083
    } else {
        jd
    }
}

/// Inverse of [`jd_from_date`], returning `(day, month, year)`.
pub fn jd_to_date(jd: JulianDayNumber) -> (u32, u32, i32) {
    let (b, c) = if jd > 2299160 {
        let a = jd + 32044;
        let b = (4 * a + 3) / 146097;
        (b, a - (b * 146097) / 4)
    } else {
        (0, jd + 32082)
    };
    let d = (4 * c + 3) / 1461;
    let e = c - (1461 * d) / 4;
    let m = (5 * e + 2) / 153;
    let day = e - (153 * m + 2) / 5 + 1;
    let month = m + 3 - 12 * (m / 10);
    let year = b * 100 + d - 4800 + m / 10;
    (day as u32, month as u32, year as i32)
}

pub fn julday(date: NaiveDate) -> JulianDayNumber {
    jd_from_date(date.day(), date.month(), date.year())
}

// ---------------------------
// ## Moon and Sun
// ---------------------------

/// Julian day (UT, fractional) of the `k`-th new moon after 1900-01-01.
pub fn new_moon(k: i64) -> f64 {
    let k = k as f64;
    let t = k / 1236.85;
    let t2 = t * t;
    let t3 = t2 * t;
    let dr = PI / 180.0;

    let mut jd1 = 2415020.75933 + 29.53058868 * k + 0.0001178 * t2 - 0.000000155 * t3;
    jd1 += 0.00033 * ((166.56 + 132.87 * t - 0.009173 * t2) * dr).sin();

    let m = 359.2242 + 29.10535608 * k - 0.0000333 * t2 - 0.00000347 * t3;
    let mpr = 306.0253 + 385.81691806 * k + 0.0107306 * t2 + 0.00001236 * t3;
    let f = 21.2964 + 390.67050646 * k - 0.0016528 * t2 - 0.00000239 * t3;

    let mut c1 = (0.1734 - 0.000393 * t) * (m * dr).sin() + 0.0021 * (2.0 * dr * m).sin();
    c1 = c1 - 0.4068 * (mpr * dr).sin() + 0.0161 * (dr * 2.0 * mpr).sin();
    c1 -= 0.0004 * (dr * 3.0 * mpr).sin();
    c1 = c1 + 0.0104 * (dr * 2.0 * f).sin() - 0.0051 * (dr * (m + mpr)).sin();
    c1 = c1 - 0.0074 * (dr * (m - mpr)).sin() + 0.0004 * (dr * (2.0 * f + m)).sin();
    c1 = c1 - 0.0004 * (dr * (2.0 * f - m)).sin() - 0.0006 * (dr * (2.0 * f + mpr)).sin();
    c1 = c1 + 0.0010 * (dr * (2.0 * f - mpr)).sin() + 0.0005 * (dr * (2.0 * mpr + m)).sin();

    let delta_t = if t < -11.0 {
        0.001 + 0.000839 * t + 0.0002261 * t2 - 0.00000845 * t3 - 0.000000081 * t * t3
    } else {
        -0.000278 + 0.000265 * t + 0.000262 * t2
    };

    jd1 + c1 - delta_t
}

/// Local civil day number holding the `k`-th new moon.
pub fn new_moon_day(k: i64, time_zone: f64) -> JulianDayNumber {
    (new_moon(k) + 0.5 + time_zone / 24.0).floor() as JulianDayNumber
}

/// Apparent solar longitude in radians, normalized to `[0, 2π)`.
pub fn sun_longitude(jdn: f64) -> f64 {
    let t = (jdn - 2451545.0) / 36525.0;
    let t2 = t * t;
    let dr = PI / 180.0;
    let m = 357.52910 + 35999.05030 * t - 0.0001559 * t2 - 0.00000048 * t * t2;
    let l0 = 280.46645 + 36000.76983 * t + 0.0003032 * t2;
    let mut dl = (1.914600 - 0.004817 * t - 0.000014 * t2) * (dr * m).sin();
    dl += (0.019993 - 0.000101 * t) * (dr * 2.0 * m).sin() + 0.000290 * (dr * 3.0 * m).sin();
    let l = (l0 + dl) * dr;
    l.rem_euclid(2.0 * PI)
}

/// Index (0..=11) of the 30° major solar term the sun is in at local
/// midnight starting `day_number`.
pub fn sun_longitude_sector(day_number: JulianDayNumber, time_zone: f64) -> i64 {
    (sun_longitude(day_number as f64 - 0.5 - time_zone / 24.0) / PI * 6.0).floor() as i64
}

// ---------------------------
// ## Lunar Months
// ---------------------------

/// Day number on which lunar month 11 (the winter-solstice month) of `year`
/// begins.
pub fn lunar_month_11(year: i32, time_zone: f64) -> JulianDayNumber {
    let off = jd_from_date(31, 12, year) - 2415021;
    let k = (off as f64 / SYNODIC_MONTH).floor() as i64;
    let nm = new_moon_day(k, time_zone);
    if sun_longitude_sector(nm, time_zone) >= 9 {
        new_moon_day(k - 1, time_zone)
    } else {
        nm
    }
}

/// Offset, counted in months after month 11 starting at `a11`, of the first
/// month that contains no major solar term.
pub fn leap_month_offset(a11: JulianDayNumber, time_zone: f64) -> i64 {
    let k = ((a11 as f64 - LUNATION_EPOCH) / SYNODIC_MONTH + 0.5).floor() as i64;
    let mut i = 1;
    let mut arc = sun_longitude_sector(new_moon_day(k + i, time_zone), time_zone);
    loop {
        let last = arc;
        i += 1;
        arc = sun_longitude_sector(new_moon_day(k + i, time_zone), time_zone);
        if arc == last || i >= 14 {
            break;
        }
    }
    i - 1
}

pub fn solar_to_lunar(date: NaiveDate, time_zone: f64) -> Result<LunarDate, CalculationError> {
    if !SUPPORTED_YEARS.contains(&date.year()) {
        return Err(CalculationError {
            code: -1,
            message: format!(
                "year {} outside supported range {}..={}",
                date.year(),
                SUPPORTED_YEARS.start(),
                SUPPORTED_YEARS.end()
            ),
        });
    }
    if !(-12.0..=14.0).contains(&time_zone) {
        return Err(CalculationError {
            code: -1,
            message: format!("time zone offset {} out of range", time_zone),
        });
    }

    let yy = date.year();
    let day_number = julday(date);
    let k = ((day_number as f64 - LUNATION_EPOCH) / SYNODIC_MONTH).floor() as i64;
    let mut month_start = new_moon_day(k + 1, time_zone);
    if month_start > day_number {
        month_start = new_moon_day(k, time_zone);
    }

    let mut a11 = lunar_month_11(yy, time_zone);
    let mut b11 = a11;
    let mut lunar_year;
    if a11 >= month_start {
        lunar_year = yy;
        a11 = lunar_month_11(yy - 1, time_zone);
    } else {
        lunar_year = yy + 1;
        b11 = lunar_month_11(yy + 1, time_zone);
    }

    let lunar_day = day_number - month_start + 1;
    let diff = (month_start - a11) / 29;
    let mut is_leap_month = false;
    let mut lunar_month = diff + 11;
    if b11 - a11 > 365 {
        let leap_diff = leap_month_offset(a11, time_zone);
        if diff >= leap_diff {
            lunar_month = diff + 10;
            is_leap_month = diff == leap_diff;
        }
    }
    if lunar_month > 12 {
        lunar_month -= 12;
    }
    if lunar_month >= 11 && diff < 4 {
        lunar_year -= 1;
    }

    if !(1..=12).contains(&lunar_month) || !(1..=30).contains(&lunar_day) {
        return Err(CalculationError {
            code: -2,
            message: format!(
                "conversion of {} produced day {} month {}",
                date, lunar_day, lunar_month
            ),
        });
    }

    Ok(LunarDate {
        day: lunar_day as u32,
        month: lunar_month as u32,
        year: lunar_year,
        is_leap_month,
        julian_day: day_number,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn julian_day_of_known_dates() {
        assert_eq!(jd_from_date(1, 1, 2000), 2451545);
        assert_eq!(jd_from_date(15, 1, 1990), 2447907);
        assert_eq!(jd_to_date(2451545), (1, 1, 2000));
        // Last Julian-calendar day is followed by the first Gregorian one.
        assert_eq!(jd_from_date(4, 10, 1582) + 1, jd_from_date(15, 10, 1582));
    }

    #[test]
    fn sun_longitude_at_j2000() {
        let degrees = sun_longitude(2451545.0).to_degrees();
        assert_abs_diff_eq!(degrees, 280.38, epsilon = 0.05);
    }

    #[test]
    fn new_moon_near_known_epoch() {
        // New moon of 2000-01-06 18:14 UT.
        let k = ((2451550.26 - LUNATION_EPOCH) / SYNODIC_MONTH).round() as i64;
        assert_abs_diff_eq!(new_moon(k), 2451550.26, epsilon = 0.05);
    }

    #[test]
    fn tet_dates() {
        for (date, year) in [
            (ymd(1990, 1, 27), 1990),
            (ymd(2000, 2, 5), 2000),
            (ymd(2024, 2, 10), 2024),
        ] {
            let lunar = solar_to_lunar(date, VIETNAM_TIME_ZONE).unwrap();
            assert_eq!((lunar.day, lunar.month, lunar.year), (1, 1, year), "{}", date);
            assert!(!lunar.is_leap_month);
        }
    }

    #[test]
    fn late_twelfth_month_belongs_to_previous_year() {
        let lunar = solar_to_lunar(ymd(1990, 1, 15), VIETNAM_TIME_ZONE).unwrap();
        assert_eq!((lunar.day, lunar.month, lunar.year), (19, 12, 1989));
        assert_eq!(lunar.julian_day, 2447907);
    }

    #[test]
    fn leap_second_month_of_2023() {
        let lunar = solar_to_lunar(ymd(2023, 3, 22), VIETNAM_TIME_ZONE).unwrap();
        assert_eq!((lunar.day, lunar.month, lunar.year), (1, 2, 2023));
        assert!(lunar.is_leap_month);
        assert_eq!(lunar.to_string(), "Ngày 1 tháng 2 (nhuận) năm 2023");
    }

    #[test]
    fn rejects_unsupported_input() {
        assert!(solar_to_lunar(ymd(1000, 1, 1), VIETNAM_TIME_ZONE).is_err());
        assert!(solar_to_lunar(ymd(2000, 1, 1), 20.0).is_err());
    }
}
