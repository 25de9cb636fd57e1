// src/lib.rs

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub mod calculations;
pub mod calendar;
pub mod chart;
pub mod config;
pub mod horoscope;
pub mod stars;
pub mod tables;

pub use calendar::{HourBucket, LunarCalendar, LunarDerivation, StemBranch, VietnameseCalendar};
pub use chart::{build_chart, Chart, ChartAnchors, ChartSummary, Palace, StarPlacement};
pub use config::{OutputFormat, TuViConfig};
pub use horoscope::{overlay_for_date, overlay_for_solar_date, overlay_for_year, Overlay};
pub use lunar_calendar::LunarDate;
pub use stars::{Star, StarInfo};

// ---------------------------
// ## Enumerations
// ---------------------------

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// +1 for male, -1 for female. Multiplied with stem or branch polarity
    /// to pick the direction of the rotating rings.
    pub fn sign(self) -> i32 {
        match self {
            Gender::Male => 1,
            Gender::Female => -1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "Nam",
            Gender::Female => "Nữ",
        }
    }
}

impl FromStr for Gender {
    type Err = TuViError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" | "nam" => Ok(Gender::Male),
            "female" | "f" | "nu" | "nữ" => Ok(Gender::Female),
            other => Err(TuViError::InvalidInput(format!("unknown gender '{}'", other))),
        }
    }
}

/// The five phases. Discriminants are the table ids used by the Nạp Âm and
/// element-relation lookups.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Element {
    Kim = 1,
    Moc = 2,
    Thuy = 3,
    Hoa = 4,
    Tho = 5,
}

impl Element {
    pub fn from_index(index: u8) -> Option<Element> {
        match index {
            1 => Some(Element::Kim),
            2 => Some(Element::Moc),
            3 => Some(Element::Thuy),
            4 => Some(Element::Hoa),
            5 => Some(Element::Tho),
            _ => None,
        }
    }

    /// Single-letter codes: K M T H O.
    pub fn from_code(code: char) -> Option<Element> {
        match code {
            'K' => Some(Element::Kim),
            'M' => Some(Element::Moc),
            'T' => Some(Element::Thuy),
            'H' => Some(Element::Hoa),
            'O' => Some(Element::Tho),
            _ => None,
        }
    }

    pub fn from_structural_number(number: u8) -> Result<Element> {
        tables::ELEMENTS
            .iter()
            .find(|info| info.structural_number == number)
            .map(|info| info.element)
            .ok_or(TuViError::InvalidStructuralNumber(number))
    }

    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn info(self) -> &'static tables::ElementInfo {
        &tables::ELEMENTS[self as usize - 1]
    }

    pub fn code(self) -> char {
        self.info().code
    }

    pub fn structural_number(self) -> u8 {
        self.info().structural_number
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.info().name)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Brightness {
    Mieu,
    Vuong,
    Dac,
    Binh,
    Ham,
}

impl Brightness {
    pub fn code(self) -> &'static str {
        match self {
            Brightness::Mieu => "M",
            Brightness::Vuong => "V",
            Brightness::Dac => "Đ",
            Brightness::Binh => "B",
            Brightness::Ham => "H",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Brightness::Mieu => "Miếu",
            Brightness::Vuong => "Vượng",
            Brightness::Dac => "Đắc",
            Brightness::Binh => "Bình",
            Brightness::Ham => "Hãm",
        }
    }
}

/// The Four Transformations (Tứ Hóa).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transformation {
    Loc,
    Quyen,
    Khoa,
    Ky,
}

impl Transformation {
    pub const ALL: [Transformation; 4] = [
        Transformation::Loc,
        Transformation::Quyen,
        Transformation::Khoa,
        Transformation::Ky,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Transformation::Loc => "Lộc",
            Transformation::Quyen => "Quyền",
            Transformation::Khoa => "Khoa",
            Transformation::Ky => "Kỵ",
        }
    }

    /// The synthetic star carrying this transformation on the chart.
    pub fn star(self) -> Star {
        match self {
            Transformation::Loc => Star::HoaLoc,
            Transformation::Quyen => Star::HoaQuyen,
            Transformation::Khoa => Star::HoaKhoa,
            Transformation::Ky => Star::HoaKy,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StarCategory {
    Major,
    Auxiliary,
    Malefic,
    Transformation,
    LifeCycle,
}

// ---------------------------
// ## Structures
// ---------------------------

/// Everything the chart is computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthFacts {
    pub full_name: String,
    pub gender: Gender,
    pub birth_date: NaiveDate,
    pub hour: HourBucket,
}

impl BirthFacts {
    pub fn new(full_name: &str, gender: Gender, birth_date: NaiveDate, hour: HourBucket) -> Self {
        BirthFacts {
            full_name: full_name.to_string(),
            gender,
            birth_date,
            hour,
        }
    }

    /// Build the chart with the default Vietnamese calendar at UTC+7.
    pub fn generate_chart(&self) -> Result<Chart> {
        build_chart(self, &VietnameseCalendar::default())
    }

    pub fn solar_date_label(&self) -> String {
        format!(
            "{:02}/{:02}/{}",
            self.birth_date.day(),
            self.birth_date.month(),
            self.birth_date.year()
        )
    }
}

// ---------------------------
// ## Error Handling
// ---------------------------

#[derive(Error, Debug)]
pub enum TuViError {
    #[error("No Nạp Âm entry for branch {branch} and stem {stem}")]
    InvalidStemBranchCombination { branch: u8, stem: u8 },

    #[error("Invalid structural number {0}: expected one of 2, 3, 4, 5, 6")]
    InvalidStructuralNumber(u8),

    #[error("Unrecognized hour bucket: {0}")]
    UnrecognizedHourBucket(String),

    #[error("Lunar conversion failed: {0}")]
    LunarConversionFailure(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<lunar_calendar::CalculationError> for TuViError {
    fn from(err: lunar_calendar::CalculationError) -> Self {
        TuViError::LunarConversionFailure(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TuViError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gender_parsing() {
        assert_eq!("male".parse::<Gender>().unwrap(), Gender::Male);
        assert_eq!(" Nữ ".parse::<Gender>().unwrap(), Gender::Female);
        assert_eq!(Gender::Female.sign(), -1);
        assert!(matches!("x".parse::<Gender>(), Err(TuViError::InvalidInput(_))));
    }

    #[test]
    fn element_lookups() {
        assert_eq!(Element::from_code('O'), Some(Element::Tho));
        assert_eq!(Element::from_index(3), Some(Element::Thuy));
        assert_eq!(Element::from_structural_number(6).unwrap(), Element::Hoa);
        assert_eq!(Element::Thuy.structural_number(), 2);
        assert_eq!(Element::Moc.to_string(), "Mộc");
    }

    #[test]
    fn solar_date_label_is_zero_padded() {
        let facts = BirthFacts::new(
            "A",
            Gender::Male,
            NaiveDate::from_ymd_opt(2003, 4, 5).unwrap(),
            HourBucket::from_index(2).unwrap(),
        );
        assert_eq!(facts.solar_date_label(), "05/04/2003");
    }
}
