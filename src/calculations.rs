//! Palace arithmetic and the closed-form star position formulas.
//!
//! Positions are palace numbers on the fixed ring, Tý = 1 through Hợi = 12.

use super::*;
use crate::tables::{nap_am_checked, stem};

/// Palace of the Tiger (Dần), origin of most month and day counts.
pub const DAN: u8 = 3;

// ---------------------------
// ## Ring Arithmetic
// ---------------------------

/// Move `base` around the ring by every delta in turn. The result is always
/// in `1..=12`; a zero remainder lands on Hợi (12).
pub fn shift(base: impl Into<i32>, deltas: &[i32]) -> u8 {
    let base: i32 = base.into();
    let total = deltas
        .iter()
        .fold(base.rem_euclid(12), |acc, delta| (acc + delta.rem_euclid(12)) % 12);
    match total {
        0 => 12,
        rest => rest as u8,
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// Positive sign runs forward (thuận), anything else backward (nghịch).
    pub fn from_sign(sign: i32) -> Direction {
        if sign == 1 {
            Direction::Forward
        } else {
            Direction::Backward
        }
    }

    pub fn sign(self) -> i32 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }
}

/// Steps from `p2` to `p1` walking in `direction`, in `0..12`.
pub fn distance(p1: u8, p2: u8, direction: Direction) -> u8 {
    let (a, b) = (i32::from(p1), i32::from(p2));
    let steps = match direction {
        Direction::Forward => (a - b + 12) % 12,
        Direction::Backward => (b - a + 12) % 12,
    };
    steps.rem_euclid(12) as u8
}

// ---------------------------
// ## Element Relations
// ---------------------------

/// Relation of the first element to the second.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementRelation {
    Neutral,
    /// A sinh B
    Produces,
    /// A khắc B
    Destroys,
    /// B sinh A
    ProducedBy,
    /// B khắc A
    DestroyedBy,
}

use ElementRelation::{DestroyedBy as Dby, Destroys as Des, Neutral as Neu, ProducedBy as Pby, Produces as Pro};

/// Row is the first argument, column the second; index 0 is unused.
const RELATIONS: [[ElementRelation; 6]; 6] = [
    [Neu, Neu, Neu, Neu, Neu, Neu],
    [Neu, Neu, Des, Pro, Dby, Pby],
    [Neu, Dby, Neu, Pby, Pro, Des],
    [Neu, Pby, Pro, Neu, Pro, Dby],
    [Neu, Des, Pby, Dby, Neu, Pro],
    [Neu, Pro, Dby, Des, Pby, Neu],
];

pub fn compare_elements(a: Element, b: Element) -> ElementRelation {
    RELATIONS[a as usize][b as usize]
}

// ---------------------------
// ## Chart Seeds
// ---------------------------

/// Element of the Cục, from the Nạp Âm of the soul palace's branch and the
/// stem that month-stem counting assigns to it.
pub fn find_structure(soul_position: u8, year_stem: u8) -> Result<Element> {
    stem(year_stem)?;
    let first_month_stem = (i32::from(year_stem) * 2 + 1) % 10;
    let months_from_dan = (i32::from(soul_position) - i32::from(DAN)).rem_euclid(12);
    let soul_stem = match (months_from_dan + first_month_stem) % 10 {
        0 => 10,
        s => s as u8,
    };
    Ok(nap_am_checked(soul_position, soul_stem)?.element)
}

/// The Cục number (2..=6) seeding the Tử Vi and Tràng Sinh positions.
pub fn find_structural_number(soul_position: u8, year_stem: u8) -> Result<u8> {
    Ok(find_structure(soul_position, year_stem)?.structural_number())
}

fn check_structural_number(structural: u8) -> Result<()> {
    match structural {
        2..=6 => Ok(()),
        other => Err(TuViError::InvalidStructuralNumber(other)),
    }
}

/// Position of Tử Vi. Counting from Dần, add the Cục number until the total
/// reaches the lunar day; an odd overshoot moves back, an even one forward.
pub fn find_primary_star(structural: u8, lunar_day: u32) -> Result<u8> {
    check_structural_number(structural)?;
    let day = lunar_day as i32;
    let step = i32::from(structural);
    let mut total = step;
    let mut position = i32::from(DAN);
    while total < day {
        total += step;
        position += 1;
    }
    let mut gap = total - day;
    if gap % 2 == 1 {
        gap = -gap;
    }
    Ok(shift(position, &[gap]))
}

/// Position of Tràng Sinh for the Cục number.
pub fn find_life_cycle_seed(structural: u8) -> Result<u8> {
    match structural {
        6 => Ok(3),
        4 => Ok(6),
        2 | 5 => Ok(9),
        3 => Ok(12),
        other => Err(TuViError::InvalidStructuralNumber(other)),
    }
}

// ---------------------------
// ## Standalone Star Formulas
// ---------------------------

/// Hỏa Tinh and Linh Tinh. The starting palaces depend on the year-branch
/// triad; the stars then count the birth hour in opposite directions.
pub fn find_fire_bell(year_branch: u8, hour: u8, ring_sign: i32) -> Result<(u8, u8)> {
    let (fire_start, bell_start) = match year_branch {
        3 | 7 | 11 => (2, 4),
        1 | 5 | 9 => (3, 11),
        6 | 10 | 2 => (11, 4),
        12 | 4 | 8 => (10, 11),
        other => {
            return Err(TuViError::InvalidInput(format!(
                "cannot seed Hỏa/Linh for branch {}",
                other
            )))
        }
    };
    let hour = i32::from(hour);
    if ring_sign == -1 {
        Ok((shift(fire_start + 1, &[-hour]), shift(bell_start - 1, &[hour])))
    } else {
        Ok((shift(fire_start - 1, &[hour]), shift(bell_start + 1, &[-hour])))
    }
}

fn by_stem(table: &[u8; 10], year_stem: u8) -> Result<u8> {
    stem(year_stem)?;
    Ok(table[year_stem as usize - 1])
}

pub fn find_thien_khoi(year_stem: u8) -> Result<u8> {
    by_stem(&[2, 1, 12, 10, 8, 1, 8, 7, 6, 4], year_stem)
}

pub fn find_thien_quan_phuc(year_stem: u8) -> Result<(u8, u8)> {
    Ok((
        by_stem(&[8, 5, 6, 3, 4, 10, 12, 10, 11, 7], year_stem)?,
        by_stem(&[10, 9, 1, 12, 4, 3, 7, 6, 7, 6], year_stem)?,
    ))
}

/// Lưu Hà and Thiên Trù.
pub fn find_luu_tru(year_stem: u8) -> Result<(u8, u8)> {
    Ok((
        by_stem(&[10, 11, 8, 5, 6, 7, 9, 4, 12, 3], year_stem)?,
        by_stem(&[6, 7, 1, 6, 7, 9, 3, 7, 10, 11], year_stem)?,
    ))
}

pub fn find_co_than(year_branch: u8) -> u8 {
    match year_branch {
        12 | 1 | 2 => 3,
        3..=5 => 6,
        6..=8 => 9,
        _ => 12,
    }
}

pub fn find_thien_ma(year_branch: u8) -> u8 {
    match year_branch % 4 {
        1 => 3,
        2 => 12,
        3 => 9,
        _ => 6,
    }
}

pub fn find_pha_toai(year_branch: u8) -> u8 {
    match year_branch % 3 {
        0 => 6,
        1 => 10,
        _ => 2,
    }
}

/// The two palaces cut off by Triệt, by year stem pair.
pub fn find_triet(year_stem: u8) -> Result<(u8, u8)> {
    match year_stem {
        1 | 6 => Ok((9, 10)),
        2 | 7 => Ok((7, 8)),
        3 | 8 => Ok((5, 6)),
        4 | 9 => Ok((3, 4)),
        5 | 10 => Ok((1, 2)),
        other => Err(TuViError::InvalidInput(format!("cannot place Triệt for stem {}", other))),
    }
}

/// The two palaces left empty (Tuần) by the decade of the sixty-term cycle
/// holding the birth year: the two branches after the decade's Quý year.
pub fn find_tuan(year_stem: u8, year_branch: u8) -> Result<(u8, u8)> {
    stem(year_stem)?;
    let decade_end = shift(year_branch, &[10 - i32::from(year_stem)]);
    let first = shift(decade_end, &[1]);
    Ok((first, shift(first, &[1])))
}

// ---------------------------
// ## Four Transformations
// ---------------------------

/// Stars receiving Lộc, Quyền, Khoa and Kỵ for a year stem, in that order.
pub fn four_transformations(year_stem: u8) -> Result<[Star; 4]> {
    use Star::*;
    let stars = match year_stem {
        1 => [LiemTrinh, PhaQuan, VuKhuc, ThaiDuong],
        2 => [ThienCo, ThienLuong, TuVi, ThaiAm],
        3 => [ThienDong, ThienCo, VanXuong, LiemTrinh],
        4 => [ThaiAm, ThienDong, ThienCo, CuMon],
        5 => [ThamLang, ThaiAm, HuuBat, ThienCo],
        6 => [VuKhuc, ThamLang, ThienLuong, VanKhuc],
        7 => [ThaiDuong, VuKhuc, ThienDong, ThaiAm],
        8 => [CuMon, ThaiDuong, VanKhuc, VanXuong],
        9 => [ThienLuong, TuVi, ThienPhu, VuKhuc],
        10 => [PhaQuan, CuMon, ThaiAm, ThamLang],
        other => {
            return Err(TuViError::InvalidInput(format!(
                "stem id {} out of range 1..=10",
                other
            )))
        }
    };
    Ok(stars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn shift_wraps_into_ring() {
        assert_eq!(shift(3, &[]), 3);
        assert_eq!(shift(12, &[1]), 1);
        assert_eq!(shift(1, &[-1]), 12);
        assert_eq!(shift(3, &[-3]), 12);
        assert_eq!(shift(11, &[-15]), 8);
        assert_eq!(shift(3, &[11, -5]), 9);
        assert_eq!(shift(i32::MAX, &[1]), 8);
        assert_eq!(shift(i32::MIN, &[-1, i32::MIN]), 7);
    }

    #[test]
    fn distance_both_directions() {
        assert_eq!(distance(5, 3, Direction::Forward), 2);
        assert_eq!(distance(5, 3, Direction::Backward), 10);
        assert_eq!(distance(9, 9, Direction::Forward), 0);
        assert_eq!(distance(8, 9, Direction::Backward), 1);
    }

    #[test]
    fn element_relations_follow_encoded_table() {
        assert_eq!(compare_elements(Element::Kim, Element::Moc), ElementRelation::Destroys);
        assert_eq!(compare_elements(Element::Kim, Element::Thuy), ElementRelation::Produces);
        assert_eq!(compare_elements(Element::Moc, Element::Kim), ElementRelation::DestroyedBy);
        assert_eq!(compare_elements(Element::Tho, Element::Hoa), ElementRelation::ProducedBy);
        assert_eq!(compare_elements(Element::Hoa, Element::Hoa), ElementRelation::Neutral);
        // Argument order matters.
        assert_ne!(
            compare_elements(Element::Thuy, Element::Moc),
            compare_elements(Element::Moc, Element::Thuy)
        );
    }

    #[test]
    fn structural_number_for_known_soul() {
        // Kỷ year, soul at Thân: stem Nhâm, Nhâm Thân is Kim.
        assert_eq!(find_structure(9, 6).unwrap(), Element::Kim);
        assert_eq!(find_structural_number(9, 6).unwrap(), 4);
    }

    #[test]
    fn souls_before_dan_count_from_the_end_of_the_year() {
        // Giáp year: Bính Tý and Đinh Sửu, both Giản Hạ Thủy.
        assert_eq!(find_structure(1, 1).unwrap(), Element::Thuy);
        assert_eq!(find_structure(2, 1).unwrap(), Element::Thuy);
        assert_eq!(find_structural_number(1, 1).unwrap(), 2);
        // Mậu year: Giáp Tý and Ất Sửu, Hải Trung Kim.
        assert_eq!(find_structure(1, 5).unwrap(), Element::Kim);
        assert_eq!(find_structure(2, 5).unwrap(), Element::Kim);
        // Quý year: Giáp Tý again.
        assert_eq!(find_structure(1, 10).unwrap(), Element::Kim);
    }

    #[test]
    fn structural_number_is_always_valid() {
        for soul in 1..=12u8 {
            for year_stem in 1..=10u8 {
                let n = find_structural_number(soul, year_stem).unwrap();
                assert!((2..=6).contains(&n));
            }
        }
    }

    #[test]
    fn primary_star_positions() {
        assert_eq!(find_primary_star(4, 19).unwrap(), 6);
        // Day 1 of Thủy nhị cục: one step back from Dần's neighbour.
        assert_eq!(find_primary_star(2, 1).unwrap(), 2);
        assert_eq!(find_primary_star(2, 2).unwrap(), 3);
        assert_eq!(find_primary_star(6, 30).unwrap(), 7);
    }

    #[test]
    fn invalid_structural_number_is_an_error() {
        assert!(matches!(find_primary_star(7, 1), Err(TuViError::InvalidStructuralNumber(7))));
        assert!(matches!(find_life_cycle_seed(1), Err(TuViError::InvalidStructuralNumber(1))));
        assert_eq!(find_life_cycle_seed(5).unwrap(), 9);
    }

    #[test]
    fn void_markers() {
        // Giáp Tý decade leaves Tuất and Hợi empty.
        assert_eq!(find_tuan(1, 1).unwrap(), (11, 12));
        // Kỷ Tỵ belongs to the Giáp Tý decade as well.
        assert_eq!(find_tuan(6, 6).unwrap(), (11, 12));
        assert_eq!(find_triet(6).unwrap(), (9, 10));
        assert!(find_triet(0).is_err());
    }

    #[test]
    fn fire_bell_directions() {
        // Tỵ year, hour Tỵ, ring running backward.
        assert_eq!(find_fire_bell(6, 6, -1).unwrap(), (6, 9));
        assert_eq!(find_fire_bell(6, 6, 1).unwrap(), (4, 11));
        assert!(find_fire_bell(0, 1, 1).is_err());
    }

    proptest! {
        #[test]
        fn shift_stays_on_ring(base in any::<i32>(), a in any::<i32>(), b in any::<i32>()) {
            let p = shift(base, &[a, b]);
            prop_assert!((1..=12).contains(&p));
        }

        #[test]
        fn shift_is_associative(base in any::<i32>(), a in any::<i32>(), b in any::<i32>()) {
            prop_assert_eq!(shift(shift(base, &[a]), &[b]), shift(base, &[a, b]));
        }

        #[test]
        fn shift_matches_wide_arithmetic(base in any::<i32>(), a in any::<i32>(), b in any::<i32>()) {
            let wide = (i64::from(base) + i64::from(a) + i64::from(b)).rem_euclid(12);
            let expected = if wide == 0 { 12 } else { wide as u8 };
            prop_assert_eq!(shift(base, &[a, b]), expected);
        }

        #[test]
        fn forward_distances_cancel(p1 in 1u8..=12, p2 in 1u8..=12) {
            let sum = u32::from(distance(p1, p2, Direction::Forward))
                + u32::from(distance(p2, p1, Direction::Forward));
            prop_assert_eq!(sum % 12, 0);
        }
    }
}
