//! Solar to lunar conversion for the Vietnamese lunisolar calendar.
//!
//! Month boundaries come from mean new moons corrected by the main periodic
//! terms, evaluated at local midnight for the given time zone. Month 11 is the
//! month containing the winter solstice; a year holding thirteen new moons
//! gets a leap month at the first month without a major solar term.

pub mod core;

pub use crate::core::{
    jd_from_date, jd_to_date, julday, leap_month_offset, lunar_month_11, new_moon,
    new_moon_day, solar_to_lunar, sun_longitude, sun_longitude_sector, CalculationError,
    JulianDayNumber, LunarDate, VIETNAM_TIME_ZONE,
};
