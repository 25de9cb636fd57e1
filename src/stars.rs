//! Star catalog and brightness grades.

use super::*;

/// Every star that can be placed on a chart. Discriminants are the catalog
/// ids.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Star {
    TuVi = 1,
    LiemTrinh = 2,
    ThienDong = 3,
    VuKhuc = 4,
    ThaiDuong = 5,
    ThienCo = 6,
    ThienPhu = 7,
    ThaiAm = 8,
    ThamLang = 9,
    CuMon = 10,
    ThienTuong = 11,
    ThienLuong = 12,
    ThatSat = 13,
    PhaQuan = 14,
    ThaiTue = 15,
    ThieuDuong = 16,
    TangMon = 17,
    ThieuAm = 18,
    QuanPhu = 19,
    TuPhu = 20,
    TuePha = 21,
    LongDuc = 22,
    BachHo = 23,
    PhucDuc = 24,
    DieuKhach = 25,
    TrucPhu = 26,
    LocTon = 27,
    LucSi = 28,
    ThanhLong = 29,
    TieuHao = 30,
    TuongQuan = 31,
    TauThu = 32,
    PhiLiem = 33,
    HyThan = 34,
    BenhPhu = 35,
    DaiHao = 36,
    PhucBinh = 37,
    QuanPhuBacSy = 38,
    TrangSinh = 39,
    MocDuc = 40,
    QuanDoi = 41,
    LamQuan = 42,
    DeVuong = 43,
    Suy = 44,
    Benh = 45,
    Tu = 46,
    Mo = 47,
    Tuyet = 48,
    Thai = 49,
    Duong = 50,
    DaLa = 51,
    KinhDuong = 52,
    DiaKhong = 53,
    DiaKiep = 54,
    LinhTinh = 55,
    HoaTinh = 56,
    VanXuong = 57,
    VanKhuc = 58,
    ThienKhoi = 59,
    ThienViet = 60,
    TaPhu = 61,
    HuuBat = 62,
    LongTri = 63,
    PhuongCac = 64,
    TamThai = 65,
    BatToa = 66,
    AnQuang = 67,
    ThienQuy = 68,
    ThienKhoc = 69,
    ThienHu = 70,
    ThienDuc = 71,
    NguyetDuc = 72,
    ThienHinh = 73,
    ThienRieu = 74,
    ThienY = 75,
    QuocAn = 76,
    DuongPhu = 77,
    DaoHoa = 78,
    HongLoan = 79,
    ThienHy = 80,
    ThienGiai = 81,
    DiaGiai = 82,
    GiaiThan = 83,
    ThaiPhu = 84,
    PhongCao = 85,
    ThienTai = 86,
    ThienTho = 87,
    ThienThuong = 88,
    ThienSu = 89,
    ThienLa = 90,
    DiaVong = 91,
    HoaKhoa = 92,
    HoaQuyen = 93,
    HoaLoc = 94,
    HoaKy = 95,
    CoThan = 96,
    QuaTu = 97,
    ThienMa = 98,
    PhaToai = 99,
    ThienQuan = 100,
    ThienPhuc = 101,
    LuuHa = 102,
    ThienTru = 103,
    KiepSat = 104,
    HoaCai = 105,
    VanTinh = 106,
    DauQuan = 107,
    ThienKhong = 108,
    BacSy = 109,
}

impl Star {
    pub fn from_id(id: u8) -> Option<Star> {
        match id {
            1..=109 => Some(STAR_CATALOG[id as usize - 1].star),
            _ => None,
        }
    }

    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn info(self) -> &'static StarInfo {
        &STAR_CATALOG[self as usize - 1]
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }

    /// Brightness of this star at `position`, if the star is graded.
    pub fn brightness_at(self, position: u8) -> Option<Brightness> {
        if !(1..=12).contains(&position) {
            return None;
        }
        BRIGHTNESS_TABLE
            .iter()
            .find(|(star, _)| *star == self)
            .map(|(_, grades)| grades[position as usize - 1])
    }

    pub fn all() -> impl Iterator<Item = Star> {
        STAR_CATALOG.iter().map(|info| info.star)
    }
}

impl fmt::Display for Star {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarInfo {
    pub star: Star,
    pub name: &'static str,
    pub element: Element,
    /// Rank code: 1 for the fourteen major stars, 2..=10 for favourable
    /// auxiliaries, 11 and above for malefic ones.
    pub rank: u8,
    pub category: StarCategory,
    /// Star group (Đế tinh, Nam đẩu tinh, Bắc đẩu tinh), empty when unassigned.
    pub group: &'static str,
}

impl StarInfo {
    const fn new(
        star: Star,
        name: &'static str,
        element: Element,
        rank: u8,
        category: StarCategory,
        group: &'static str,
    ) -> Self {
        StarInfo {
            star,
            name,
            element,
            rank,
            category,
            group,
        }
    }
}

/// Indexed by `id - 1`.
pub static STAR_CATALOG: [StarInfo; 109] = [
    StarInfo::new(Star::TuVi, "Tử vi", Element::Tho, 1, StarCategory::Major, "Đế tinh"),
    StarInfo::new(Star::LiemTrinh, "Liêm trinh", Element::Hoa, 1, StarCategory::Major, "Bắc đẩu tinh"),
    StarInfo::new(Star::ThienDong, "Thiên đồng", Element::Thuy, 1, StarCategory::Major, "Bắc đẩu tinh"),
    StarInfo::new(Star::VuKhuc, "Vũ khúc", Element::Kim, 1, StarCategory::Major, "Bắc đẩu tinh"),
    StarInfo::new(Star::ThaiDuong, "Thái dương", Element::Hoa, 1, StarCategory::Major, "Nam đẩu tinh"),
    StarInfo::new(Star::ThienCo, "Thiên cơ", Element::Moc, 1, StarCategory::Major, "Nam đẩu tinh"),
    StarInfo::new(Star::ThienPhu, "Thiên phủ", Element::Tho, 1, StarCategory::Major, "Nam đẩu tinh"),
    StarInfo::new(Star::ThaiAm, "Thái âm", Element::Thuy, 1, StarCategory::Major, "Bắc đẩu tinh"),
    StarInfo::new(Star::ThamLang, "Tham lang", Element::Thuy, 1, StarCategory::Major, "Bắc đẩu tinh"),
    StarInfo::new(Star::CuMon, "Cự môn", Element::Thuy, 1, StarCategory::Major, "Bắc đẩu tinh"),
    StarInfo::new(Star::ThienTuong, "Thiên tướng", Element::Thuy, 1, StarCategory::Major, "Nam đẩu tinh"),
    StarInfo::new(Star::ThienLuong, "Thiên lương", Element::Moc, 1, StarCategory::Major, "Nam đẩu tinh"),
    StarInfo::new(Star::ThatSat, "Thất sát", Element::Kim, 1, StarCategory::Major, "Nam đẩu tinh"),
    StarInfo::new(Star::PhaQuan, "Phá quân", Element::Thuy, 1, StarCategory::Major, "Bắc đẩu tinh"),
    StarInfo::new(Star::ThaiTue, "Thái tuế", Element::Hoa, 15, StarCategory::Malefic, ""),
    StarInfo::new(Star::ThieuDuong, "Thiếu dương", Element::Hoa, 5, StarCategory::Auxiliary, ""),
    StarInfo::new(Star::TangMon, "Tang môn", Element::Moc, 12, StarCategory::Malefic, ""),
    StarInfo::new(Star::ThieuAm, "Thiếu âm", Element::Thuy, 5, StarCategory::Auxiliary, ""),
    StarInfo::new(Star::QuanPhu, "Quan phù", Element::Hoa, 12, StarCategory::Malefic, ""),
    StarInfo::new(Star::TuPhu, "Tử phù", Element::Kim, 12, StarCategory::Malefic, ""),
    StarInfo::new(Star::TuePha, "Tuế phá", Element::Hoa, 12, StarCategory::Malefic, ""),
    StarInfo::new(Star::LongDuc, "Long đức", Element::Thuy, 5, StarCategory::Auxiliary, ""),
    StarInfo::new(Star::BachHo, "Bạch hổ", Element::Kim, 12, StarCategory::Malefic, ""),
    StarInfo::new(Star::PhucDuc, "Phúc đức", Element::Tho, 5, StarCategory::Auxiliary, ""),
    StarInfo::new(Star::DieuKhach, "Điếu khách", Element::Hoa, 12, StarCategory::Malefic, ""),
    StarInfo::new(Star::TrucPhu, "Trực phù", Element::Kim, 16, StarCategory::Malefic, ""),
    StarInfo::new(Star::LocTon, "Lộc tồn", Element::Tho, 3, StarCategory::Auxiliary, "Bắc đẩu tinh"),
    StarInfo::new(Star::LucSi, "Lực sĩ", Element::Hoa, 2, StarCategory::Auxiliary, ""),
    StarInfo::new(Star::ThanhLong, "Thanh long", Element::Thuy, 5, StarCategory::Auxiliary, ""),
    StarInfo::new(Star::TieuHao, "Tiểu hao", Element::Hoa, 12, StarCategory::Malefic, ""),
    StarInfo::new(Star::TuongQuan, "Tướng quân", Element::Moc, 4, StarCategory::Auxiliary, ""),
    StarInfo::new(Star::TauThu, "Tấu thư", Element::Kim, 3, StarCategory::Auxiliary, ""),
    StarInfo::new(Star::PhiLiem, "Phi liêm", Element::Hoa, 2, StarCategory::Auxiliary, ""),
    StarInfo::new(Star::HyThan, "Hỷ thần", Element::Hoa, 5, StarCategory::Auxiliary, ""),
    StarInfo::new(Star::BenhPhu, "Bệnh phù", Element::Tho, 12, StarCategory::Malefic, ""),
    StarInfo::new(Star::DaiHao, "Đại hao", Element::Hoa, 12, StarCategory::Malefic, ""),
    StarInfo::new(Star::PhucBinh, "Phục binh", Element::Hoa, 13, StarCategory::Malefic, ""),
    StarInfo::new(Star::QuanPhuBacSy, "Quan phù", Element::Hoa, 12, StarCategory::Malefic, ""),
    StarInfo::new(Star::TrangSinh, "Tràng sinh", Element::Thuy, 5, StarCategory::LifeCycle, ""),
    StarInfo::new(Star::MocDuc, "Mộc dục", Element::Thuy, 14, StarCategory::LifeCycle, ""),
    StarInfo::new(Star::QuanDoi, "Quan đới", Element::Kim, 4, StarCategory::LifeCycle, ""),
    StarInfo::new(Star::LamQuan, "Lâm quan", Element::Kim, 7, StarCategory::LifeCycle, ""),
    StarInfo::new(Star::DeVuong, "Đế vượng", Element::Kim, 5, StarCategory::LifeCycle, ""),
    StarInfo::new(Star::Suy, "Suy", Element::Thuy, 12, StarCategory::LifeCycle, ""),
    StarInfo::new(Star::Benh, "Bệnh", Element::Hoa, 12, StarCategory::LifeCycle, ""),
    StarInfo::new(Star::Tu, "Tử", Element::Hoa, 12, StarCategory::LifeCycle, ""),
    StarInfo::new(Star::Mo, "Mộ", Element::Tho, 2, StarCategory::LifeCycle, ""),
    StarInfo::new(Star::Tuyet, "Tuyệt", Element::Tho, 12, StarCategory::LifeCycle, ""),
    StarInfo::new(Star::Thai, "Thai", Element::Tho, 14, StarCategory::LifeCycle, ""),
    StarInfo::new(Star::Duong, "Dưỡng", Element::Moc, 2, StarCategory::LifeCycle, ""),
    StarInfo::new(Star::DaLa, "Đà la", Element::Kim, 11, StarCategory::Malefic, ""),
    StarInfo::new(Star::KinhDuong, "Kình dương", Element::Kim, 11, StarCategory::Malefic, ""),
    StarInfo::new(Star::DiaKhong, "Địa không", Element::Hoa, 11, StarCategory::Malefic, ""),
    StarInfo::new(Star::DiaKiep, "Địa kiếp", Element::Hoa, 11, StarCategory::Malefic, ""),
    StarInfo::new(Star::LinhTinh, "Linh tinh", Element::Hoa, 11, StarCategory::Malefic, ""),
    StarInfo::new(Star::HoaTinh, "Hỏa tinh", Element::Hoa, 11, StarCategory::Malefic, ""),
    StarInfo::new(Star::VanXuong, "Văn xương", Element::Kim, 6, StarCategory::Auxiliary, ""),
    StarInfo::new(Star::VanKhuc, "Văn khúc", Element::Thuy, 6, StarCategory::Auxiliary, ""),
    StarInfo::new(Star::ThienKhoi, "Thiên khôi", Element::Hoa, 6, StarCategory::Auxiliary, ""),
    StarInfo::new(Star::ThienViet, "Thiên việt", Element::Hoa, 6, StarCategory::Auxiliary, ""),
    StarInfo::new(Star::TaPhu, "Tả phù", Element::Tho, 2, StarCategory::Auxiliary, ""),
    StarInfo::new(Star::HuuBat, "Hữu bật", Element::Tho, 2, StarCategory::Auxiliary, ""),
    StarInfo::new(Star::LongTri, "Long trì", Element::Thuy, 3, StarCategory::Auxiliary, ""),
    StarInfo::new(Star::PhuongCac, "Phượng các", Element::Tho, 3, StarCategory::Auxiliary, ""),
    StarInfo::new(Star::TamThai, "Tam thai", Element::Moc, 7, StarCategory::Auxiliary, ""),
    StarInfo::new(Star::BatToa, "Bát tọa", Element::Thuy, 7, StarCategory::Auxiliary, ""),
    StarInfo::new(Star::AnQuang, "Ân quang", Element::Moc, 3, StarCategory::Auxiliary, ""),
    StarInfo::new(Star::ThienQuy, "Thiên quý", Element::Tho, 3, StarCategory::Auxiliary, ""),
    StarInfo::new(Star::ThienKhoc, "Thiên khốc", Element::Thuy, 12, StarCategory::Malefic, ""),
    StarInfo::new(Star::ThienHu, "Thiên hư", Element::Thuy, 12, StarCategory::Malefic, ""),
    StarInfo::new(Star::ThienDuc, "Thiên đức", Element::Hoa, 5, StarCategory::Auxiliary, ""),
    StarInfo::new(Star::NguyetDuc, "Nguyệt đức", Element::Hoa, 5, StarCategory::Auxiliary, ""),
    StarInfo::new(Star::ThienHinh, "Thiên hình", Element::Hoa, 15, StarCategory::Malefic, ""),
    StarInfo::new(Star::ThienRieu, "Thiên riêu", Element::Thuy, 13, StarCategory::Malefic, ""),
    StarInfo::new(Star::ThienY, "Thiên y", Element::Thuy, 5, StarCategory::Auxiliary, ""),
    StarInfo::new(Star::QuocAn, "Quốc ấn", Element::Tho, 6, StarCategory::Auxiliary, ""),
    StarInfo::new(Star::DuongPhu, "Đường phù", Element::Moc, 4, StarCategory::Auxiliary, ""),
    StarInfo::new(Star::DaoHoa, "Đào hoa", Element::Moc, 8, StarCategory::Auxiliary, ""),
    StarInfo::new(Star::HongLoan, "Hồng loan", Element::Thuy, 8, StarCategory::Auxiliary, ""),
    StarInfo::new(Star::ThienHy, "Thiên hỷ", Element::Thuy, 5, StarCategory::Auxiliary, ""),
    StarInfo::new(Star::ThienGiai, "Thiên giải", Element::Hoa, 5, StarCategory::Auxiliary, ""),
    StarInfo::new(Star::DiaGiai, "Địa giải", Element::Tho, 5, StarCategory::Auxiliary, ""),
    StarInfo::new(Star::GiaiThan, "Giải thần", Element::Moc, 5, StarCategory::Auxiliary, ""),
    StarInfo::new(Star::ThaiPhu, "Thai phụ", Element::Kim, 6, StarCategory::Auxiliary, ""),
    StarInfo::new(Star::PhongCao, "Phong cáo", Element::Tho, 4, StarCategory::Auxiliary, ""),
    StarInfo::new(Star::ThienTai, "Thiên tài", Element::Tho, 2, StarCategory::Auxiliary, ""),
    StarInfo::new(Star::ThienTho, "Thiên thọ", Element::Tho, 5, StarCategory::Auxiliary, ""),
    StarInfo::new(Star::ThienThuong, "Thiên thương", Element::Tho, 12, StarCategory::Malefic, ""),
    StarInfo::new(Star::ThienSu, "Thiên sứ", Element::Thuy, 12, StarCategory::Malefic, ""),
    StarInfo::new(Star::ThienLa, "Thiên la", Element::Tho, 12, StarCategory::Malefic, ""),
    StarInfo::new(Star::DiaVong, "Địa võng", Element::Tho, 12, StarCategory::Malefic, ""),
    StarInfo::new(Star::HoaKhoa, "Hóa khoa", Element::Thuy, 5, StarCategory::Transformation, ""),
    StarInfo::new(Star::HoaQuyen, "Hóa quyền", Element::Thuy, 4, StarCategory::Transformation, ""),
    StarInfo::new(Star::HoaLoc, "Hóa lộc", Element::Moc, 3, StarCategory::Transformation, ""),
    StarInfo::new(Star::HoaKy, "Hóa kỵ", Element::Thuy, 13, StarCategory::Transformation, ""),
    StarInfo::new(Star::CoThan, "Cô thần", Element::Tho, 13, StarCategory::Malefic, ""),
    StarInfo::new(Star::QuaTu, "Quả tú", Element::Tho, 13, StarCategory::Malefic, ""),
    StarInfo::new(Star::ThienMa, "Thiên mã", Element::Hoa, 3, StarCategory::Auxiliary, ""),
    StarInfo::new(Star::PhaToai, "Phá toái", Element::Hoa, 12, StarCategory::Malefic, ""),
    StarInfo::new(Star::ThienQuan, "Thiên quan", Element::Hoa, 5, StarCategory::Auxiliary, ""),
    StarInfo::new(Star::ThienPhuc, "Thiên phúc", Element::Hoa, 5, StarCategory::Auxiliary, ""),
    StarInfo::new(Star::LuuHa, "Lưu hà", Element::Thuy, 12, StarCategory::Malefic, ""),
    StarInfo::new(Star::ThienTru, "Thiên trù", Element::Tho, 5, StarCategory::Auxiliary, ""),
    StarInfo::new(Star::KiepSat, "Kiếp sát", Element::Hoa, 11, StarCategory::Malefic, ""),
    StarInfo::new(Star::HoaCai, "Hoa cái", Element::Kim, 14, StarCategory::Malefic, ""),
    StarInfo::new(Star::VanTinh, "Văn tinh", Element::Hoa, 6, StarCategory::Auxiliary, ""),
    StarInfo::new(Star::DauQuan, "Đẩu quân", Element::Hoa, 5, StarCategory::Auxiliary, ""),
    StarInfo::new(Star::ThienKhong, "Thiên không", Element::Thuy, 11, StarCategory::Malefic, ""),
    StarInfo::new(Star::BacSy, "Bác sỹ", Element::Thuy, 5, StarCategory::Auxiliary, ""),
];

// ---------------------------
// ## Brightness
// ---------------------------

const M: Brightness = Brightness::Mieu;
const V: Brightness = Brightness::Vuong;
const D: Brightness = Brightness::Dac;
const B: Brightness = Brightness::Binh;
const H: Brightness = Brightness::Ham;

/// Grades at positions Tý..Hợi.
static BRIGHTNESS_TABLE: [(Star, [Brightness; 12]); 21] = [
    (Star::TuVi, [B, D, M, B, V, M, M, D, M, B, V, B]),
    (Star::LiemTrinh, [V, D, V, H, M, H, V, D, V, H, M, H]),
    (Star::ThienDong, [V, H, M, D, H, D, H, H, M, H, H, D]),
    (Star::VuKhuc, [V, M, V, D, M, H, V, M, V, D, M, H]),
    (Star::ThaiDuong, [H, D, V, V, V, M, M, D, H, H, H, H]),
    (Star::ThienCo, [D, D, H, M, M, V, D, D, V, M, M, H]),
    (Star::ThaiAm, [V, D, H, H, H, H, H, D, V, M, M, M]),
    (Star::ThamLang, [H, M, D, H, V, H, H, M, D, H, V, H]),
    (Star::CuMon, [V, H, V, M, H, H, V, H, D, M, H, D]),
    (Star::ThienTuong, [V, D, M, H, V, D, V, D, M, H, V, D]),
    (Star::ThienLuong, [V, D, V, V, M, H, M, D, V, H, M, H]),
    (Star::ThatSat, [M, D, M, H, H, V, M, D, M, H, H, V]),
    (Star::PhaQuan, [M, V, H, H, D, H, M, V, H, H, D, H]),
    (Star::DaLa, [H, D, H, H, D, H, H, D, H, H, D, H]),
    (Star::KinhDuong, [H, D, H, H, D, H, H, D, H, H, D, H]),
    (Star::LinhTinh, [H, H, D, D, D, D, D, H, H, H, H, H]),
    (Star::HoaTinh, [H, H, D, D, D, D, D, H, H, H, H, H]),
    (Star::VanXuong, [H, D, H, D, H, D, H, D, H, H, D, D]),
    (Star::VanKhuc, [H, D, H, D, H, D, H, D, H, H, D, D]),
    (Star::DiaKhong, [H, H, D, H, H, D, H, H, D, H, H, D]),
    (Star::DiaKiep, [H, H, D, H, H, D, H, H, D, H, H, D]),
];
