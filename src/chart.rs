//! Chart construction: palaces, cycles, star layout and void markers.

use super::*;
use crate::calculations::*;
use crate::tables::{branch, nap_am_checked, stem, PALACE_ELEMENTS, PALACE_NAMES};
use tracing::{debug, trace};

// ---------------------------
// ## Structures
// ---------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StarPlacement {
    pub star: Star,
    pub id: u8,
    pub name: &'static str,
    pub element: Element,
    pub category: StarCategory,
    pub rank: u8,
    pub brightness: Option<Brightness>,
    pub transformation: Option<Transformation>,
}

impl StarPlacement {
    fn at(star: Star, position: u8) -> Self {
        let info = star.info();
        StarPlacement {
            star,
            id: star.id(),
            name: info.name,
            element: info.element,
            category: info.category,
            rank: info.rank,
            brightness: star.brightness_at(position),
            transformation: None,
        }
    }
}

impl fmt::Display for StarPlacement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(brightness) = self.brightness {
            write!(f, " ({})", brightness.code())?;
        }
        if let Some(transformation) = self.transformation {
            write!(f, " [Hóa {}]", transformation.label())?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Palace {
    pub position: u8,
    pub house: &'static str,
    pub branch: &'static str,
    pub element: Element,
    pub stars: Vec<StarPlacement>,
    /// First age of the ten-year period (đại hạn) governed by this palace.
    pub decade_start: u32,
    /// Branch of the years (tiểu hạn) this palace governs.
    pub year_cycle: u8,
    pub year_cycle_name: &'static str,
    pub is_soul: bool,
    pub is_body: bool,
    pub is_void_tuan: bool,
    pub is_void_triet: bool,
}

impl Palace {
    fn empty(position: u8) -> Palace {
        Palace {
            position,
            house: "",
            branch: tables::BRANCHES[position as usize - 1].name,
            element: PALACE_ELEMENTS[position as usize - 1],
            stars: Vec::new(),
            decade_start: 0,
            year_cycle: 0,
            year_cycle_name: "",
            is_soul: false,
            is_body: false,
            is_void_tuan: false,
            is_void_triet: false,
        }
    }

    pub fn has_star(&self, star: Star) -> bool {
        self.stars.iter().any(|s| s.star == star)
    }

    pub fn decade_range(&self) -> (u32, u32) {
        (self.decade_start, self.decade_start + 9)
    }

    /// Stars split the way the printed chart lays them out.
    pub fn grouped(&self) -> PalaceStars<'_> {
        let mut groups = PalaceStars::default();
        for placement in &self.stars {
            match placement.category {
                StarCategory::Major => groups.major.push(placement),
                StarCategory::LifeCycle => groups.life_cycle = Some(placement),
                _ if placement.rank >= 11 => groups.malefic.push(placement),
                _ => groups.minor.push(placement),
            }
        }
        groups
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct PalaceStars<'a> {
    pub major: Vec<&'a StarPlacement>,
    pub minor: Vec<&'a StarPlacement>,
    pub malefic: Vec<&'a StarPlacement>,
    pub life_cycle: Option<&'a StarPlacement>,
}

/// The numbers a chart was built from, kept for overlay re-derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartAnchors {
    pub year_stem: u8,
    pub year_branch: u8,
    pub soul_position: u8,
    pub body_position: u8,
    pub structural_number: u8,
    pub element: Element,
    pub gender_sign: i32,
    /// Gender sign times year-stem polarity; direction of the Lộc Tồn and
    /// Tràng Sinh rings.
    pub ring_sign: i32,
    /// Gender sign times year-branch polarity; direction of the decades.
    pub decade_sign: i32,
    pub primary_star: u8,
    pub life_cycle_seed: u8,
    /// Palace whose year-cycle branch is Tý.
    pub year_cycle_origin: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSummary {
    pub full_name: String,
    pub gender: &'static str,
    pub solar_date: String,
    pub lunar_date: String,
    pub hour: String,
    pub year_pillar: String,
    pub month_pillar: String,
    pub day_pillar: String,
    pub hour_pillar: String,
    pub structural_label: &'static str,
    pub destiny: &'static str,
    pub soul_star: &'static str,
    pub body_star: &'static str,
    /// "Dương" or "Âm".
    pub year_polarity: &'static str,
    /// Year polarity with gender, e.g. "Âm Nam".
    pub classification: String,
    pub soul_harmony: &'static str,
    pub destiny_relation: &'static str,
    pub zodiac: &'static str,
    pub tuan: [&'static str; 2],
    pub triet: [&'static str; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub facts: BirthFacts,
    pub derivation: LunarDerivation,
    pub summary: ChartSummary,
    pub anchors: ChartAnchors,
    pub palaces: [Palace; 12],
}

impl Chart {
    pub fn palace(&self, position: u8) -> Option<&Palace> {
        match position {
            1..=12 => Some(&self.palaces[position as usize - 1]),
            _ => None,
        }
    }

    pub fn soul_palace(&self) -> &Palace {
        &self.palaces[self.anchors.soul_position as usize - 1]
    }

    pub fn body_palace(&self) -> &Palace {
        &self.palaces[self.anchors.body_position as usize - 1]
    }

    /// Position and placement of a star, if it was placed.
    pub fn find_star(&self, star: Star) -> Option<(u8, &StarPlacement)> {
        self.palaces.iter().find_map(|palace| {
            palace
                .stars
                .iter()
                .find(|s| s.star == star)
                .map(|s| (palace.position, s))
        })
    }

    pub fn major_stars(&self, position: u8) -> Vec<&StarPlacement> {
        self.palace(position)
            .map(|palace| palace.grouped().major)
            .unwrap_or_default()
    }

    pub fn palace_by_house(&self, house: &str) -> Option<&Palace> {
        self.palaces.iter().find(|palace| palace.house == house)
    }
}

// ---------------------------
// ## Builder
// ---------------------------

/// Build the full chart for `facts`, converting the birth date with
/// `calendar`. Any failure aborts the build.
pub fn build_chart(facts: &BirthFacts, calendar: &impl LunarCalendar) -> Result<Chart> {
    if facts.full_name.trim().is_empty() {
        return Err(TuViError::InvalidInput("full name is empty".to_string()));
    }
    let derivation = LunarDerivation::derive(facts.birth_date, facts.hour, calendar)?;
    let anchors = compute_anchors(facts, &derivation)?;
    debug!(
        "anchors for {}: soul {}, body {}, structural number {}, Tử Vi {}",
        facts.full_name,
        anchors.soul_position,
        anchors.body_position,
        anchors.structural_number,
        anchors.primary_star
    );

    let mut board = Board::new(&anchors);
    board.place_stars(&anchors, &derivation)?;
    board.mark_voids(&anchors)?;

    let summary = summarize(facts, &derivation, &anchors, &board)?;
    Ok(Chart {
        facts: facts.clone(),
        derivation,
        summary,
        anchors,
        palaces: board.palaces,
    })
}

fn compute_anchors(facts: &BirthFacts, derivation: &LunarDerivation) -> Result<ChartAnchors> {
    let year_stem = derivation.year.stem;
    let year_branch = derivation.year.branch;
    let month = derivation.lunar.month as i32;
    let hour = i32::from(facts.hour.index());
    let gender_sign = facts.gender.sign();

    let soul_position = shift(DAN, &[month - 1, -hour + 1]);
    let body_position = shift(DAN, &[month - 1, hour - 1]);
    let element = find_structure(soul_position, year_stem)?;
    let structural_number = element.structural_number();
    let primary_star = find_primary_star(structural_number, derivation.lunar.day)?;
    let life_cycle_seed = find_life_cycle_seed(structural_number)?;

    let branch_index = i32::from(year_branch) - 1;
    let year_cycle_start = shift(11, &[-3 * branch_index]);
    let year_cycle_origin = shift(year_cycle_start, &[-gender_sign * branch_index]);

    Ok(ChartAnchors {
        year_stem,
        year_branch,
        soul_position,
        body_position,
        structural_number,
        element,
        gender_sign,
        ring_sign: gender_sign * stem(year_stem)?.polarity,
        decade_sign: gender_sign * branch(year_branch)?.polarity,
        primary_star,
        life_cycle_seed,
        year_cycle_origin,
    })
}

/// Twelve palaces under construction.
struct Board {
    palaces: [Palace; 12],
}

impl Board {
    fn new(anchors: &ChartAnchors) -> Board {
        let mut palaces: [Palace; 12] = std::array::from_fn(|i| Palace::empty(i as u8 + 1));
        for (offset, house) in PALACE_NAMES.iter().enumerate() {
            let position = shift(anchors.soul_position, &[offset as i32]);
            palaces[position as usize - 1].house = *house;
        }

        let decade_direction = Direction::from_sign(anchors.decade_sign);
        let year_direction = Direction::from_sign(anchors.gender_sign);
        for palace in palaces.iter_mut() {
            let steps = distance(palace.position, anchors.soul_position, decade_direction);
            palace.decade_start = u32::from(anchors.structural_number) + u32::from(steps) * 10;
            palace.year_cycle = distance(palace.position, anchors.year_cycle_origin, year_direction) + 1;
            palace.year_cycle_name = tables::BRANCHES[palace.year_cycle as usize - 1].name;
            palace.is_soul = palace.position == anchors.soul_position;
            palace.is_body = palace.position == anchors.body_position;
        }
        Board { palaces }
    }

    /// Insert `star` at `position` unless that palace already holds it.
    fn place(&mut self, position: u8, star: Star) {
        let palace = &mut self.palaces[position as usize - 1];
        if palace.has_star(star) {
            return;
        }
        trace!("{} -> {}", star, palace.branch);
        palace.stars.push(StarPlacement::at(star, position));
    }

    fn place_ring(&mut self, origin: u8, step: i32, stars: &[Star]) {
        for (i, star) in stars.iter().enumerate() {
            self.place(shift(origin, &[step * i as i32]), *star);
        }
    }

    fn position_of(&self, star: Star) -> Option<u8> {
        self.palaces
            .iter()
            .find(|palace| palace.has_star(star))
            .map(|palace| palace.position)
    }

    fn place_stars(&mut self, anchors: &ChartAnchors, derivation: &LunarDerivation) -> Result<()> {
        use Star::*;

        let day = derivation.lunar.day as i32;
        let month = derivation.lunar.month as i32;
        let hour = i32::from(derivation.hour.index());
        let year_stem = anchors.year_stem;
        let chi = anchors.year_branch;
        let chi_i = i32::from(chi);
        let ring = anchors.ring_sign;

        // Tử Vi group
        let tu_vi = anchors.primary_star;
        for (offset, star) in [(0, TuVi), (4, LiemTrinh), (7, ThienDong), (8, VuKhuc), (9, ThaiDuong), (11, ThienCo)] {
            self.place(shift(tu_vi, &[offset]), star);
        }

        // Thiên Phủ group
        let thien_phu = shift(DAN, &[3 - i32::from(tu_vi)]);
        for (offset, star) in [
            (0, ThienPhu),
            (1, ThaiAm),
            (2, ThamLang),
            (3, CuMon),
            (4, ThienTuong),
            (5, ThienLuong),
            (6, ThatSat),
            (10, PhaQuan),
        ] {
            self.place(shift(thien_phu, &[offset]), star);
        }

        // Lộc Tồn ring
        let loc_ton = stem(year_stem)?.loc_ton_position;
        self.place(loc_ton, LocTon);
        self.place_ring(
            loc_ton,
            ring,
            &[BacSy, LucSi, ThanhLong, TieuHao, TuongQuan, TauThu, PhiLiem, HyThan, BenhPhu, DaiHao, PhucBinh, QuanPhuBacSy],
        );

        // Thái Tuế ring
        self.place_ring(
            chi,
            1,
            &[ThaiTue, ThieuDuong, TangMon, ThieuAm, QuanPhu, TuPhu, TuePha, LongDuc, BachHo, PhucDuc, DieuKhach, TrucPhu],
        );
        self.place(shift(chi, &[1]), ThienKhong);
        self.place(shift(chi, &[5]), NguyetDuc);
        self.place(shift(chi, &[9]), ThienDuc);

        // Tràng Sinh ring
        let seed = anchors.life_cycle_seed;
        self.place_ring(
            seed,
            ring,
            &[TrangSinh, MocDuc, QuanDoi, LamQuan, DeVuong, Suy, Benh, Tu, Mo, Tuyet],
        );
        self.place(shift(seed, &[-ring]), Thai);
        self.place(shift(seed, &[-2 * ring]), Duong);

        // Kình Dương, Đà La
        let kinh_duong = shift(loc_ton, &[1]);
        self.place(shift(loc_ton, &[-1]), DaLa);
        self.place(kinh_duong, KinhDuong);

        // Địa Kiếp, Địa Không
        let dia_kiep = shift(11, &[hour]);
        self.place(dia_kiep, DiaKiep);
        self.place(mirror(12, dia_kiep), DiaKhong);

        let (hoa_tinh, linh_tinh) = find_fire_bell(chi, derivation.hour.index(), ring)?;
        self.place(hoa_tinh, HoaTinh);
        self.place(linh_tinh, LinhTinh);

        // Tả Phù, Hữu Bật
        let ta_phu = shift(5, &[month - 1]);
        self.place(ta_phu, TaPhu);
        self.place(mirror(2, ta_phu), HuuBat);

        // Văn Khúc, Văn Xương
        let van_khuc = shift(5, &[hour - 1]);
        let van_xuong = mirror(2, van_khuc);
        self.place(van_khuc, VanKhuc);
        self.place(van_xuong, VanXuong);

        // Long Trì, Phượng Các, Giải Thần
        let long_tri = shift(5, &[chi_i - 1]);
        self.place(long_tri, LongTri);
        self.place(mirror(2, long_tri), PhuongCac);
        self.place(mirror(2, long_tri), GiaiThan);

        // Tam Thai, Bát Tọa
        let tam_thai = shift(5, &[month + day - 2]);
        self.place(tam_thai, TamThai);
        self.place(mirror(2, tam_thai), BatToa);

        // Ân Quang, Thiên Quý
        let an_quang = shift(van_xuong, &[day - 2]);
        self.place(an_quang, AnQuang);
        self.place(mirror(2, an_quang), ThienQuy);

        // Thiên Khôi, Thiên Việt
        let thien_khoi = find_thien_khoi(year_stem)?;
        self.place(thien_khoi, ThienKhoi);
        self.place(shift(5, &[5 - i32::from(thien_khoi)]), ThienViet);

        // Thiên Hư, Thiên Khốc
        self.place(shift(7, &[chi_i - 1]), ThienHu);
        self.place(shift(7, &[-chi_i + 1]), ThienKhoc);

        // Thiên Tài, Thiên Thọ
        self.place(shift(anchors.soul_position, &[chi_i - 1]), ThienTai);
        self.place(shift(anchors.body_position, &[chi_i - 1]), ThienTho);

        // Hồng Loan, Thiên Hỷ
        let hong_loan = shift(4, &[-chi_i + 1]);
        self.place(hong_loan, HongLoan);
        self.place(shift(hong_loan, &[6]), ThienHy);

        let (thien_quan, thien_phuc) = find_thien_quan_phuc(year_stem)?;
        self.place(thien_quan, ThienQuan);
        self.place(thien_phuc, ThienPhuc);

        // Thiên Hình, Thiên Riêu, Thiên Y
        let thien_hinh = shift(10, &[month - 1]);
        let thien_rieu = shift(thien_hinh, &[4]);
        self.place(thien_hinh, ThienHinh);
        self.place(thien_rieu, ThienRieu);
        self.place(thien_rieu, ThienY);

        // Cô Thần, Quả Tú
        let co_than = find_co_than(chi);
        self.place(co_than, CoThan);
        self.place(shift(co_than, &[-4]), QuaTu);

        // Văn Tinh, Đường Phù, Quốc Ấn
        let van_tinh = shift(kinh_duong, &[2]);
        let duong_phu = shift(van_tinh, &[2]);
        self.place(van_tinh, VanTinh);
        self.place(duong_phu, DuongPhu);
        self.place(shift(duong_phu, &[3]), QuocAn);

        // Thai Phụ, Phong Cáo
        self.place(shift(van_khuc, &[2]), ThaiPhu);
        self.place(shift(van_khuc, &[-2]), PhongCao);

        // Thiên Giải, Địa Giải
        self.place(shift(9, &[2 * month - 2]), ThienGiai);
        self.place(shift(ta_phu, &[3]), DiaGiai);

        // Thiên La, Địa Võng
        self.place(5, ThienLa);
        self.place(11, DiaVong);

        // Thiên Thương at Nô bộc, Thiên Sứ at Tật ách
        self.place(shift(anchors.soul_position, &[5]), ThienThuong);
        self.place(shift(anchors.soul_position, &[7]), ThienSu);

        // Thiên Mã, Hoa Cái, Kiếp Sát, Đào Hoa
        let thien_ma = find_thien_ma(chi);
        let kiep_sat = shift(thien_ma, &[3]);
        self.place(thien_ma, ThienMa);
        self.place(shift(thien_ma, &[2]), HoaCai);
        self.place(kiep_sat, KiepSat);
        self.place(shift(kiep_sat, &[4]), DaoHoa);

        self.place(find_pha_toai(chi), PhaToai);
        self.place(shift(chi, &[-month + hour]), DauQuan);

        let (luu_ha, thien_tru) = find_luu_tru(year_stem)?;
        self.place(luu_ha, LuuHa);
        self.place(thien_tru, ThienTru);

        self.apply_transformations(year_stem)
    }

    /// Tag the four transformed stars and add the Hóa stars beside them.
    fn apply_transformations(&mut self, year_stem: u8) -> Result<()> {
        let targets = four_transformations(year_stem)?;
        for (transformation, target) in Transformation::ALL.iter().zip(targets) {
            let Some(position) = self.position_of(target) else {
                continue;
            };
            let palace = &mut self.palaces[position as usize - 1];
            if let Some(placement) = palace.stars.iter_mut().find(|s| s.star == target) {
                placement.transformation = Some(*transformation);
            }
            self.place(position, transformation.star());
        }
        Ok(())
    }

    fn mark_voids(&mut self, anchors: &ChartAnchors) -> Result<()> {
        let (tuan_a, tuan_b) = find_tuan(anchors.year_stem, anchors.year_branch)?;
        let (triet_a, triet_b) = find_triet(anchors.year_stem)?;
        for position in [tuan_a, tuan_b] {
            self.palaces[position as usize - 1].is_void_tuan = true;
        }
        for position in [triet_a, triet_b] {
            self.palaces[position as usize - 1].is_void_triet = true;
        }
        Ok(())
    }
}

/// Reflection of `position` across the axis through `axis`.
fn mirror(axis: u8, position: u8) -> u8 {
    shift(axis, &[i32::from(axis) - i32::from(position)])
}

// ---------------------------
// ## Summary
// ---------------------------

fn summarize(
    facts: &BirthFacts,
    derivation: &LunarDerivation,
    anchors: &ChartAnchors,
    board: &Board,
) -> Result<ChartSummary> {
    let year_stem = stem(anchors.year_stem)?;
    let year_branch = branch(anchors.year_branch)?;
    let destiny = nap_am_checked(anchors.year_branch, anchors.year_stem)?;

    let year_polarity = if year_stem.polarity == 1 { "Dương" } else { "Âm" };
    let soul_parity = if anchors.soul_position % 2 == 1 { 1 } else { -1 };
    let soul_harmony = if soul_parity * anchors.gender_sign * year_stem.polarity == 1 {
        "Âm dương thuận lý"
    } else {
        "Âm dương nghịch lý"
    };
    let destiny_relation = match compare_elements(destiny.element, anchors.element) {
        ElementRelation::Produces => "Bản Mệnh sinh Cục",
        ElementRelation::Destroys => "Bản Mệnh khắc Cục",
        ElementRelation::ProducedBy => "Cục sinh Bản Mệnh",
        ElementRelation::DestroyedBy => "Cục khắc Bản Mệnh",
        ElementRelation::Neutral => "Cục hòa Bản Mệnh",
    };

    let void_names = |flag: fn(&Palace) -> bool| {
        let mut names = board.palaces.iter().filter(|p| flag(p)).map(|p| p.branch);
        [names.next().unwrap_or(""), names.next().unwrap_or("")]
    };

    Ok(ChartSummary {
        full_name: facts.full_name.clone(),
        gender: facts.gender.label(),
        solar_date: facts.solar_date_label(),
        lunar_date: derivation.lunar_date_label(),
        hour: format!("{} ({})", derivation.hour_pillar, facts.hour.label()),
        year_pillar: derivation.year.to_string(),
        month_pillar: derivation.month.to_string(),
        day_pillar: derivation.day.to_string(),
        hour_pillar: derivation.hour_pillar.to_string(),
        structural_label: anchors.element.info().structural_label,
        destiny: destiny.destiny(),
        soul_star: year_branch.soul_star,
        body_star: year_branch.body_star,
        year_polarity,
        classification: format!("{} {}", year_polarity, facts.gender.label()),
        soul_harmony,
        destiny_relation,
        zodiac: year_branch.animal,
        tuan: void_names(|p: &Palace| p.is_void_tuan),
        triet: void_names(|p: &Palace| p.is_void_triet),
    })
}
