//! Static Can/Chi/Ngũ Hành tables.
//!
//! Ids are 1-based everywhere, matching the palace ring where Tý = 1.

use super::*;

// ---------------------------
// ## Heavenly Stems
// ---------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StemInfo {
    pub id: u8,
    pub code: char,
    pub name: &'static str,
    pub element: Element,
    /// Palace of Lộc Tồn for a year of this stem.
    pub loc_ton_position: u8,
    pub polarity: i32,
}

pub static STEMS: [StemInfo; 10] = [
    StemInfo { id: 1, code: 'G', name: "Giáp", element: Element::Moc, loc_ton_position: 3, polarity: 1 },
    StemInfo { id: 2, code: 'A', name: "Ất", element: Element::Moc, loc_ton_position: 4, polarity: -1 },
    StemInfo { id: 3, code: 'B', name: "Bính", element: Element::Hoa, loc_ton_position: 6, polarity: 1 },
    StemInfo { id: 4, code: 'D', name: "Đinh", element: Element::Hoa, loc_ton_position: 7, polarity: -1 },
    StemInfo { id: 5, code: 'M', name: "Mậu", element: Element::Tho, loc_ton_position: 6, polarity: 1 },
    StemInfo { id: 6, code: 'K', name: "Kỷ", element: Element::Tho, loc_ton_position: 7, polarity: -1 },
    StemInfo { id: 7, code: 'C', name: "Canh", element: Element::Kim, loc_ton_position: 9, polarity: 1 },
    StemInfo { id: 8, code: 'T', name: "Tân", element: Element::Kim, loc_ton_position: 10, polarity: -1 },
    StemInfo { id: 9, code: 'N', name: "Nhâm", element: Element::Thuy, loc_ton_position: 12, polarity: 1 },
    StemInfo { id: 10, code: 'Q', name: "Quý", element: Element::Thuy, loc_ton_position: 1, polarity: -1 },
];

pub fn stem(id: u8) -> Result<&'static StemInfo> {
    match id {
        1..=10 => Ok(&STEMS[id as usize - 1]),
        _ => Err(TuViError::InvalidInput(format!("stem id {} out of range 1..=10", id))),
    }
}

// ---------------------------
// ## Earthly Branches
// ---------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchInfo {
    pub id: u8,
    pub name: &'static str,
    pub element: Element,
    pub polarity: i32,
    /// Mệnh chủ: the star ruling the soul for a year of this branch.
    pub soul_star: &'static str,
    /// Thân chủ: the star ruling the body.
    pub body_star: &'static str,
    pub animal: &'static str,
}

pub static BRANCHES: [BranchInfo; 12] = [
    BranchInfo { id: 1, name: "Tý", element: Element::Thuy, polarity: 1, soul_star: "Tham lang", body_star: "Linh tinh", animal: "Chuột" },
    BranchInfo { id: 2, name: "Sửu", element: Element::Tho, polarity: -1, soul_star: "Cự môn", body_star: "Thiên tướng", animal: "Trâu" },
    BranchInfo { id: 3, name: "Dần", element: Element::Moc, polarity: 1, soul_star: "Lộc tồn", body_star: "Thiên lương", animal: "Hổ" },
    BranchInfo { id: 4, name: "Mão", element: Element::Moc, polarity: -1, soul_star: "Văn khúc", body_star: "Thiên đồng", animal: "Mèo" },
    BranchInfo { id: 5, name: "Thìn", element: Element::Tho, polarity: 1, soul_star: "Liêm trinh", body_star: "Văn xương", animal: "Rồng" },
    BranchInfo { id: 6, name: "Tỵ", element: Element::Hoa, polarity: -1, soul_star: "Vũ khúc", body_star: "Thiên cơ", animal: "Rắn" },
    BranchInfo { id: 7, name: "Ngọ", element: Element::Hoa, polarity: 1, soul_star: "Phá quân", body_star: "Hỏa tinh", animal: "Ngựa" },
    BranchInfo { id: 8, name: "Mùi", element: Element::Tho, polarity: -1, soul_star: "Vũ khúc", body_star: "Thiên tướng", animal: "Dê" },
    BranchInfo { id: 9, name: "Thân", element: Element::Kim, polarity: 1, soul_star: "Liêm trinh", body_star: "Thiên lương", animal: "Khỉ" },
    BranchInfo { id: 10, name: "Dậu", element: Element::Kim, polarity: -1, soul_star: "Văn khúc", body_star: "Thiên đồng", animal: "Gà" },
    BranchInfo { id: 11, name: "Tuất", element: Element::Tho, polarity: 1, soul_star: "Lộc tồn", body_star: "Văn xương", animal: "Chó" },
    BranchInfo { id: 12, name: "Hợi", element: Element::Thuy, polarity: -1, soul_star: "Cự môn", body_star: "Thiên cơ", animal: "Lợn" },
];

pub fn branch(id: u8) -> Result<&'static BranchInfo> {
    match id {
        1..=12 => Ok(&BRANCHES[id as usize - 1]),
        _ => Err(TuViError::InvalidInput(format!("branch id {} out of range 1..=12", id))),
    }
}

// ---------------------------
// ## Five Elements
// ---------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementInfo {
    pub element: Element,
    pub code: char,
    pub name: &'static str,
    /// Cục number seeded by this element.
    pub structural_number: u8,
    pub structural_label: &'static str,
}

pub static ELEMENTS: [ElementInfo; 5] = [
    ElementInfo { element: Element::Kim, code: 'K', name: "Kim", structural_number: 4, structural_label: "Kim tứ Cục" },
    ElementInfo { element: Element::Moc, code: 'M', name: "Mộc", structural_number: 3, structural_label: "Mộc tam Cục" },
    ElementInfo { element: Element::Thuy, code: 'T', name: "Thủy", structural_number: 2, structural_label: "Thủy nhị Cục" },
    ElementInfo { element: Element::Hoa, code: 'H', name: "Hỏa", structural_number: 6, structural_label: "Hỏa lục Cục" },
    ElementInfo { element: Element::Tho, code: 'O', name: "Thổ", structural_number: 5, structural_label: "Thổ ngũ Cục" },
];

// ---------------------------
// ## Nạp Âm
// ---------------------------

/// An entry of the sixty-term cycle: its element plus which of the six
/// destinies of that element it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NapAm {
    pub element: Element,
    pub cycle: u8,
}

impl NapAm {
    pub fn destiny(self) -> &'static str {
        DESTINIES[self.element as usize - 1][self.cycle as usize - 1]
    }
}

/// Rows pair up branches (Tý-Sửu, Dần-Mão, …); columns pair up stems
/// (Giáp-Ất, Bính-Đinh, …).
const NAP_AM_ROWS: [[(Element, u8); 5]; 6] = [
    [(Element::Kim, 1), (Element::Thuy, 1), (Element::Hoa, 1), (Element::Tho, 1), (Element::Moc, 1)],
    [(Element::Thuy, 2), (Element::Hoa, 2), (Element::Tho, 2), (Element::Moc, 2), (Element::Kim, 2)],
    [(Element::Hoa, 3), (Element::Tho, 3), (Element::Moc, 3), (Element::Kim, 3), (Element::Thuy, 3)],
    [(Element::Kim, 4), (Element::Thuy, 4), (Element::Hoa, 4), (Element::Tho, 4), (Element::Moc, 4)],
    [(Element::Thuy, 5), (Element::Hoa, 5), (Element::Tho, 5), (Element::Moc, 5), (Element::Kim, 5)],
    [(Element::Hoa, 6), (Element::Tho, 6), (Element::Moc, 6), (Element::Kim, 6), (Element::Thuy, 6)],
];

const DESTINIES: [[&str; 6]; 5] = [
    ["HẢI TRUNG KIM", "KIM BẠCH KIM", "BẠCH LẠP KIM", "SA TRUNG KIM", "KIẾM PHONG KIM", "XOA XUYẾN KIM"],
    ["TANG ĐỐ MỘC", "TÒNG BÁ MỘC", "ĐẠI LÂM MỘC", "DƯƠNG LIỄU MỘC", "THẠCH LỰU MỘC", "BÌNH ĐỊA MỘC"],
    ["GIÁNG HẠ THỦY", "ĐẠI KHÊ THỦY", "TRƯỜNG LƯU THỦY", "THIÊN HÀ THỦY", "TRUYỀN TRUNG THỦY", "ĐẠI HẢI THỦY"],
    ["TÍCH LỊCH HỎA", "LƯ TRUNG HỎA", "PHÚ ĐĂNG HỎA", "THIÊN THƯỢNG HỎA", "SƠN HẠ HỎA", "SƠN ĐẦU HỎA"],
    ["BÍCH THƯỢNG THỔ", "THÀNH ĐẦU THỔ", "SA TRUNG THỔ", "LỘ BÀN THỔ", "ĐẠI TRẠCH THỔ", "ỐC THƯỢNG THỔ"],
];

/// Nạp Âm of a (branch, stem) pair, or `None` when their parities differ and
/// the pair never occurs in the sixty-term cycle.
pub fn nap_am(branch: u8, stem: u8) -> Option<NapAm> {
    if !(1..=12).contains(&branch) || !(1..=10).contains(&stem) || branch % 2 != stem % 2 {
        return None;
    }
    let (element, cycle) = NAP_AM_ROWS[(branch as usize - 1) / 2][(stem as usize - 1) / 2];
    Some(NapAm { element, cycle })
}

pub fn nap_am_checked(branch: u8, stem: u8) -> Result<NapAm> {
    nap_am(branch, stem).ok_or(TuViError::InvalidStemBranchCombination { branch, stem })
}

// ---------------------------
// ## Palace Ring
// ---------------------------

/// House names in ring order starting from the soul palace.
pub static PALACE_NAMES: [&str; 12] = [
    "Mệnh",
    "Phụ mẫu",
    "Phúc đức",
    "Điền trạch",
    "Quan lộc",
    "Nô bộc",
    "Thiên di",
    "Tật ách",
    "Tài bạch",
    "Tử tức",
    "Phu thê",
    "Huynh đệ",
];

/// Element of each fixed position, Tý first.
pub static PALACE_ELEMENTS: [Element; 12] = [
    Element::Thuy,
    Element::Tho,
    Element::Moc,
    Element::Moc,
    Element::Tho,
    Element::Hoa,
    Element::Hoa,
    Element::Tho,
    Element::Kim,
    Element::Kim,
    Element::Tho,
    Element::Thuy,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nap_am_known_years() {
        // Giáp Tý
        assert_eq!(nap_am(1, 1).map(NapAm::destiny), Some("HẢI TRUNG KIM"));
        // Ất Sửu
        assert_eq!(nap_am(2, 2).map(NapAm::destiny), Some("HẢI TRUNG KIM"));
        // Kỷ Tỵ
        assert_eq!(nap_am(6, 6).map(NapAm::destiny), Some("ĐẠI LÂM MỘC"));
        // Nhâm Thân
        assert_eq!(nap_am(9, 9).map(NapAm::destiny), Some("KIẾM PHONG KIM"));
        // Quý Hợi
        assert_eq!(nap_am(12, 10).map(NapAm::destiny), Some("ĐẠI HẢI THỦY"));
    }

    #[test]
    fn nap_am_absent_for_parity_mismatch() {
        for branch in 1..=12u8 {
            for stem in 1..=10u8 {
                assert_eq!(nap_am(branch, stem).is_some(), branch % 2 == stem % 2);
            }
        }
        assert!(matches!(
            nap_am_checked(1, 2),
            Err(TuViError::InvalidStemBranchCombination { branch: 1, stem: 2 })
        ));
    }

    #[test]
    fn sixty_distinct_pairs_cover_thirty_destinies() {
        let mut destinies: Vec<&str> = (1..=12u8)
            .flat_map(|b| (1..=10u8).filter_map(move |s| nap_am(b, s)))
            .map(NapAm::destiny)
            .collect();
        assert_eq!(destinies.len(), 60);
        destinies.sort();
        destinies.dedup();
        assert_eq!(destinies.len(), 30);
    }

    #[test]
    fn lookups_reject_out_of_range_ids() {
        assert!(stem(0).is_err());
        assert!(stem(11).is_err());
        assert!(branch(13).is_err());
        assert_eq!(stem(10).unwrap().name, "Quý");
        assert_eq!(branch(1).unwrap().name, "Tý");
    }
}
