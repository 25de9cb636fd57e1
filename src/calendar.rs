//! Lunar date and stem-branch derivation for a birth moment.

use super::*;
use crate::tables::{branch, stem};
use lunar_calendar::{solar_to_lunar, JulianDayNumber, VIETNAM_TIME_ZONE};
use tracing::debug;

// ---------------------------
// ## Calendar Providers
// ---------------------------

/// Source of lunar dates. Implementations must be deterministic and only
/// return months 1..=12 and days 1..=30.
pub trait LunarCalendar {
    fn solar_to_lunar(&self, date: NaiveDate) -> Result<LunarDate>;
}

/// New-moon based Vietnamese calendar evaluated in a fixed time zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VietnameseCalendar {
    pub time_zone: f64,
}

impl VietnameseCalendar {
    pub fn new(time_zone: f64) -> Self {
        VietnameseCalendar { time_zone }
    }
}

impl Default for VietnameseCalendar {
    fn default() -> Self {
        VietnameseCalendar::new(VIETNAM_TIME_ZONE)
    }
}

impl LunarCalendar for VietnameseCalendar {
    fn solar_to_lunar(&self, date: NaiveDate) -> Result<LunarDate> {
        Ok(solar_to_lunar(date, self.time_zone)?)
    }
}

fn check_provider_date(lunar: &LunarDate) -> Result<()> {
    if !(1..=12).contains(&lunar.month) || !(1..=30).contains(&lunar.day) {
        return Err(TuViError::LunarConversionFailure(format!(
            "provider returned invalid lunar date {}/{}",
            lunar.day, lunar.month
        )));
    }
    Ok(())
}

// ---------------------------
// ## Hour Buckets
// ---------------------------

/// One of the twelve two-hour windows, 1 = Tý (23:00-01:00) through
/// 12 = Hợi (21:00-23:00).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct HourBucket(u8);

const HOUR_WINDOWS: [&str; 12] = [
    "23:00-01:00",
    "01:00-03:00",
    "03:00-05:00",
    "05:00-07:00",
    "07:00-09:00",
    "09:00-11:00",
    "11:00-13:00",
    "13:00-15:00",
    "15:00-17:00",
    "17:00-19:00",
    "19:00-21:00",
    "21:00-23:00",
];

impl HourBucket {
    pub fn from_index(index: u8) -> Result<HourBucket> {
        match index {
            1..=12 => Ok(HourBucket(index)),
            other => Err(TuViError::UnrecognizedHourBucket(other.to_string())),
        }
    }

    /// Bucket containing a wall-clock hour 0..=23. Both 23 and 0 fall in Tý.
    pub fn from_clock_hour(hour: u32) -> Result<HourBucket> {
        if hour > 23 {
            return Err(TuViError::UnrecognizedHourBucket(format!("{}h", hour)));
        }
        Ok(HourBucket((((hour + 1) / 2) % 12 + 1) as u8))
    }

    pub fn index(self) -> u8 {
        self.0
    }

    /// The window text, e.g. "09:00-11:00".
    pub fn label(self) -> &'static str {
        HOUR_WINDOWS[self.0 as usize - 1]
    }

    pub fn branch_name(self) -> &'static str {
        tables::BRANCHES[self.0 as usize - 1].name
    }
}

impl FromStr for HourBucket {
    type Err = TuViError;

    fn from_str(s: &str) -> Result<Self> {
        let window = s.trim();
        HOUR_WINDOWS
            .iter()
            .position(|w| *w == window)
            .map(|i| HourBucket(i as u8 + 1))
            .ok_or_else(|| TuViError::UnrecognizedHourBucket(window.to_string()))
    }
}

impl TryFrom<u8> for HourBucket {
    type Error = TuViError;

    fn try_from(index: u8) -> Result<Self> {
        HourBucket::from_index(index)
    }
}

impl From<HourBucket> for u8 {
    fn from(bucket: HourBucket) -> u8 {
        bucket.0
    }
}

impl fmt::Display for HourBucket {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ---------------------------
// ## Stem-Branch Pillars
// ---------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StemBranch {
    pub stem: u8,
    pub branch: u8,
    pub stem_name: String,
    pub branch_name: String,
}

impl StemBranch {
    pub fn new(stem_id: u8, branch_id: u8) -> Result<StemBranch> {
        Ok(StemBranch {
            stem: stem_id,
            branch: branch_id,
            stem_name: stem(stem_id)?.name.to_string(),
            branch_name: branch(branch_id)?.name.to_string(),
        })
    }

    pub fn of_year(lunar_year: i32) -> Result<StemBranch> {
        StemBranch::new(
            ((i64::from(lunar_year) + 6).rem_euclid(10) + 1) as u8,
            year_branch(lunar_year),
        )
    }
}

impl fmt::Display for StemBranch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.stem_name, self.branch_name)
    }
}

/// Branch id of a lunar year, 1 = Tý.
pub fn year_branch(lunar_year: i32) -> u8 {
    ((i64::from(lunar_year) + 8).rem_euclid(12) + 1) as u8
}

/// A lunar date together with its year, month, day and hour pillars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LunarDerivation {
    pub lunar: LunarDate,
    pub hour: HourBucket,
    pub year: StemBranch,
    pub month: StemBranch,
    pub day: StemBranch,
    pub hour_pillar: StemBranch,
}

impl LunarDerivation {
    pub fn derive(
        date: NaiveDate,
        hour: HourBucket,
        calendar: &impl LunarCalendar,
    ) -> Result<LunarDerivation> {
        let lunar = calendar.solar_to_lunar(date)?;
        check_provider_date(&lunar)?;
        let derivation = LunarDerivation::from_lunar(lunar, hour)?;
        debug!(
            "lunar date {} for {}: year {}, month {}, day {}, hour {}",
            derivation.lunar,
            date,
            derivation.year,
            derivation.month,
            derivation.day,
            derivation.hour_pillar
        );
        Ok(derivation)
    }

    pub fn from_lunar(lunar: LunarDate, hour: HourBucket) -> Result<LunarDerivation> {
        let y = i64::from(lunar.year);
        let m = i64::from(lunar.month);
        let jd: JulianDayNumber = lunar.julian_day;
        let h = i64::from(hour.index());

        let month_stem = ((y * 12 + m + 3).rem_euclid(10) + 1) as u8;
        let day_stem = ((jd + 9).rem_euclid(10) + 1) as u8;
        let day_branch = ((jd + 1).rem_euclid(12) + 1) as u8;
        let hour_stem = match (((jd - 1) * 2).rem_euclid(10) + h) % 10 {
            0 => 10,
            s => s as u8,
        };

        Ok(LunarDerivation {
            lunar,
            hour,
            year: StemBranch::of_year(lunar.year)?,
            month: StemBranch::new(month_stem, lunar.month as u8)?,
            day: StemBranch::new(day_stem, day_branch)?,
            hour_pillar: StemBranch::new(hour_stem, hour.index())?,
        })
    }

    pub fn lunar_date_label(&self) -> String {
        self.lunar.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn hour_windows_map_in_order() {
        assert_eq!("23:00-01:00".parse::<HourBucket>().unwrap().index(), 1);
        assert_eq!("09:00-11:00".parse::<HourBucket>().unwrap().index(), 6);
        assert_eq!(" 21:00-23:00 ".parse::<HourBucket>().unwrap().index(), 12);
        assert_eq!(HourBucket::from_index(6).unwrap().label(), "09:00-11:00");
        assert_eq!(HourBucket::from_index(6).unwrap().branch_name(), "Tỵ");
    }

    #[test]
    fn unknown_windows_are_rejected() {
        for bad in ["", "24:00-02:00", "09:00-10:00", "noon"] {
            assert!(matches!(
                bad.parse::<HourBucket>(),
                Err(TuViError::UnrecognizedHourBucket(_))
            ));
        }
        assert!(HourBucket::from_index(0).is_err());
        assert!(HourBucket::from_index(13).is_err());
    }

    #[test]
    fn clock_hours() {
        assert_eq!(HourBucket::from_clock_hour(23).unwrap().index(), 1);
        assert_eq!(HourBucket::from_clock_hour(0).unwrap().index(), 1);
        assert_eq!(HourBucket::from_clock_hour(1).unwrap().index(), 2);
        assert_eq!(HourBucket::from_clock_hour(10).unwrap().index(), 6);
        assert_eq!(HourBucket::from_clock_hour(22).unwrap().index(), 12);
        assert!(HourBucket::from_clock_hour(24).is_err());
    }

    #[test]
    fn hour_bucket_serializes_as_index() {
        let bucket = HourBucket::from_index(6).unwrap();
        assert_eq!(serde_json::to_string(&bucket).unwrap(), "6");
        assert_eq!(serde_json::from_str::<HourBucket>("6").unwrap(), bucket);
        assert!(serde_json::from_str::<HourBucket>("13").is_err());
    }

    #[test]
    fn year_pillars() {
        assert_eq!(StemBranch::of_year(1984).unwrap().to_string(), "Giáp Tý");
        assert_eq!(StemBranch::of_year(1989).unwrap().to_string(), "Kỷ Tỵ");
        assert_eq!(StemBranch::of_year(2024).unwrap().to_string(), "Giáp Thìn");
        // 2147483647 = 1984 + 60 * 35791361 + 3, a Đinh Mão year.
        assert_eq!(StemBranch::of_year(i32::MAX).unwrap().to_string(), "Đinh Mão");
        assert_eq!(year_branch(i32::MIN), year_branch(i32::MIN + 12));
    }

    #[test]
    fn pillars_for_known_birth() {
        let hour = HourBucket::from_index(6).unwrap();
        let d = LunarDerivation::derive(date(1990, 1, 15), hour, &VietnameseCalendar::default())
            .unwrap();
        assert_eq!((d.lunar.day, d.lunar.month, d.lunar.year), (19, 12, 1989));
        assert_eq!(d.lunar.julian_day, 2447907);
        assert_eq!(d.year.to_string(), "Kỷ Tỵ");
        assert_eq!(d.month.to_string(), "Đinh Hợi");
        assert_eq!(d.day.to_string(), "Canh Thìn");
        assert_eq!(d.hour_pillar.to_string(), "Tân Tỵ");
        assert_eq!(d.lunar_date_label(), "Ngày 19 tháng 12 năm 1989");
    }

    #[test]
    fn conversion_errors_are_propagated() {
        let hour = HourBucket::from_index(1).unwrap();
        let err = LunarDerivation::derive(date(1100, 1, 1), hour, &VietnameseCalendar::default())
            .unwrap_err();
        assert!(matches!(err, TuViError::LunarConversionFailure(_)));
    }
}
