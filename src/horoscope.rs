//! Time-windowed pointers (hạn) re-derived from a built chart.

use super::*;
use crate::calculations::{shift, Direction};
use crate::calendar::year_branch;
use tracing::debug;

/// Decades wrap after twelve palaces.
const DECADE_CYCLE: i64 = 120;

/// Palaces active for a point in time. Month and day pointers are only set
/// when a lunar month and day were given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Overlay {
    pub year: i32,
    pub nominal_age: i64,
    pub decade_pointer: u8,
    pub year_pointer: u8,
    pub month_pointer: Option<u8>,
    pub day_pointer: Option<u8>,
}

impl Overlay {
    pub fn decade_palace<'a>(&self, chart: &'a Chart) -> Option<&'a Palace> {
        chart.palace(self.decade_pointer)
    }

    pub fn year_palace<'a>(&self, chart: &'a Chart) -> Option<&'a Palace> {
        chart.palace(self.year_pointer)
    }
}

/// Decade and year pointers for lunar `year`.
pub fn overlay_for_year(chart: &Chart, year: i32) -> Overlay {
    let anchors = &chart.anchors;
    let nominal_age = i64::from(year) - i64::from(chart.derivation.lunar.year) + 1;

    let index = (nominal_age - i64::from(anchors.structural_number)).rem_euclid(DECADE_CYCLE) / 10;
    let direction = Direction::from_sign(anchors.decade_sign);
    let decade_pointer = shift(anchors.soul_position, &[direction.sign() * index as i32]);

    let branch_offset = i32::from(year_branch(year)) - 1;
    let year_pointer = shift(anchors.year_cycle_origin, &[anchors.gender_sign * branch_offset]);

    debug!(
        "overlay {} (age {}): decade at {}, year at {}",
        year, nominal_age, decade_pointer, year_pointer
    );
    Overlay {
        year,
        nominal_age,
        decade_pointer,
        year_pointer,
        month_pointer: None,
        day_pointer: None,
    }
}

/// Overlay for a lunar date: the year pointers plus the month (nguyệt hạn)
/// and day (nhật hạn) pointers.
pub fn overlay_for_date(chart: &Chart, lunar_year: i32, lunar_month: u32, lunar_day: u32) -> Result<Overlay> {
    if !(1..=12).contains(&lunar_month) {
        return Err(TuViError::InvalidInput(format!("lunar month {} out of range 1..=12", lunar_month)));
    }
    if !(1..=30).contains(&lunar_day) {
        return Err(TuViError::InvalidInput(format!("lunar day {} out of range 1..=30", lunar_day)));
    }

    let birth_month = chart.derivation.lunar.month as i32;
    let hour = i32::from(chart.facts.hour.index());
    let first_month = shift(year_branch(lunar_year), &[-(birth_month - 1), hour - 1]);
    let month_pointer = shift(first_month, &[lunar_month as i32 - 1]);
    let day_pointer = shift(month_pointer, &[lunar_day as i32 - 1]);

    Ok(Overlay {
        month_pointer: Some(month_pointer),
        day_pointer: Some(day_pointer),
        ..overlay_for_year(chart, lunar_year)
    })
}

/// Convert a solar date with `calendar`, then overlay the resulting lunar date.
pub fn overlay_for_solar_date(chart: &Chart, date: NaiveDate, calendar: &impl LunarCalendar) -> Result<Overlay> {
    let lunar = calendar.solar_to_lunar(date)?;
    overlay_for_date(chart, lunar.year, lunar.month, lunar.day)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Chart {
        BirthFacts::new(
            "Trần Thị B",
            Gender::Male,
            NaiveDate::from_ymd_opt(1990, 1, 15).unwrap(),
            HourBucket::from_index(6).unwrap(),
        )
        .generate_chart()
        .unwrap()
    }

    #[test]
    fn decade_pointer_moves_with_age() {
        let chart = sample();
        let birth = overlay_for_year(&chart, 1989);
        assert_eq!(birth.nominal_age, 1);
        // Before the first decade the pointer sits on the last palace of the cycle.
        assert_eq!(birth.decade_pointer, 10);
        let later = overlay_for_year(&chart, 1999);
        assert_eq!(later.nominal_age, 11);
        assert_eq!(later.decade_pointer, 9);
        assert_ne!(birth.decade_pointer, later.decade_pointer);
    }

    #[test]
    fn decade_pointer_matches_palace_ranges() {
        let chart = sample();
        for year in 1995..2080 {
            let overlay = overlay_for_year(&chart, year);
            let (start, end) = overlay.decade_palace(&chart).unwrap().decade_range();
            let age = overlay.nominal_age as u32;
            assert!(start <= age && age <= end, "age {} not in {}..={}", age, start, end);
        }
    }

    #[test]
    fn year_pointer_carries_the_year_branch() {
        let chart = sample();
        for year in 1989..2001 {
            let overlay = overlay_for_year(&chart, year);
            let palace = overlay.year_palace(&chart).unwrap();
            assert_eq!(palace.year_cycle, year_branch(year), "year {}", year);
        }
        assert_eq!(overlay_for_year(&chart, 1989).year_pointer, 8);
        assert_eq!(overlay_for_year(&chart, 1999).year_pointer, 6);
    }

    #[test]
    fn first_month_of_birth_year_is_dau_quan() {
        let chart = sample();
        let overlay = overlay_for_date(&chart, 1989, 1, 1).unwrap();
        let dau_quan = chart.find_star(Star::DauQuan).map(|(p, _)| p);
        assert_eq!(overlay.month_pointer, dau_quan);
        assert_eq!(overlay.day_pointer, overlay.month_pointer);
        let next = overlay_for_date(&chart, 1989, 3, 5).unwrap();
        assert_eq!(next.month_pointer, Some(shift(overlay.month_pointer.unwrap(), &[2])));
        assert_eq!(next.day_pointer, Some(shift(next.month_pointer.unwrap(), &[4])));
    }

    #[test]
    fn overlays_leave_the_chart_untouched() {
        let chart = sample();
        let before = chart.clone();
        overlay_for_year(&chart, 2030);
        overlay_for_solar_date(&chart, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(), &VietnameseCalendar::default())
            .unwrap();
        assert_eq!(chart, before);
    }

    #[test]
    fn extreme_years_stay_on_the_ring() {
        let chart = sample();
        for year in [i32::MIN, -1, 0, i32::MAX] {
            let overlay = overlay_for_date(&chart, year, 12, 30).unwrap();
            for pointer in [overlay.decade_pointer, overlay.year_pointer] {
                assert!((1..=12).contains(&pointer), "year {}", year);
            }
            assert_eq!(overlay.year_palace(&chart).unwrap().year_cycle, year_branch(year));
        }
    }

    #[test]
    fn out_of_range_dates_are_rejected() {
        let chart = sample();
        assert!(overlay_for_date(&chart, 2000, 13, 1).is_err());
        assert!(overlay_for_date(&chart, 2000, 1, 31).is_err());
    }
}
