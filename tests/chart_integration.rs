//! Chart properties across many birth moments.

use chrono::{Duration, NaiveDate};
use tuvi_core::*;

fn facts(gender: Gender, date: NaiveDate, hour: u8) -> BirthFacts {
    BirthFacts::new("Lê Văn C", gender, date, HourBucket::from_index(hour).unwrap())
}

/// Every 37th day from 1950 through 2030, all hours, both genders.
fn sweep() -> impl Iterator<Item = BirthFacts> {
    let start = NaiveDate::from_ymd_opt(1950, 1, 1).unwrap();
    (0..800).flat_map(move |i| {
        let date = start + Duration::days(i * 37);
        (1..=12u8).flat_map(move |hour| {
            [Gender::Male, Gender::Female]
                .into_iter()
                .map(move |gender| facts(gender, date, hour))
        })
    })
}

#[test]
fn test_reference_birth_is_pinned() {
    let chart = facts(Gender::Male, NaiveDate::from_ymd_opt(1990, 1, 15).unwrap(), 6)
        .generate_chart()
        .unwrap();
    let anchors = chart.anchors;
    assert_eq!(
        (anchors.soul_position, anchors.body_position, anchors.structural_number),
        (9, 7, 4)
    );
    assert_eq!(chart.soul_palace().branch, "Thân");
    assert_eq!(chart.body_palace().branch, "Ngọ");
    assert_eq!(chart.summary.structural_label, "Kim tứ Cục");
}

#[test]
fn test_soul_at_ty_takes_its_stem_from_the_year_end() {
    // Lunar 9/1 Giáp Tý, hour Dần: soul at Tý, stem Bính, Giản Hạ Thủy.
    let chart = facts(Gender::Male, NaiveDate::from_ymd_opt(1984, 2, 10).unwrap(), 3)
        .generate_chart()
        .unwrap();
    let lunar = chart.derivation.lunar;
    assert_eq!((lunar.day, lunar.month, lunar.year), (9, 1, 1984));
    assert_eq!(chart.anchors.soul_position, 1);
    assert_eq!(chart.anchors.structural_number, 2);
    assert_eq!(chart.summary.structural_label, "Thủy nhị Cục");
    assert_eq!(chart.find_star(Star::TuVi).map(|(p, _)| p), Some(6));
}

#[test]
fn test_chart_invariants_hold_for_every_input() {
    for facts in sweep() {
        let chart = facts.generate_chart().unwrap();
        let context = format!("{} {:?} {}", facts.birth_date, facts.gender, facts.hour);

        assert_eq!(chart.palaces.iter().filter(|p| p.is_soul).count(), 1, "{}", context);
        assert_eq!(chart.palaces.iter().filter(|p| p.is_body).count(), 1, "{}", context);
        assert_eq!(chart.palaces.iter().filter(|p| p.is_void_tuan).count(), 2, "{}", context);
        assert_eq!(chart.palaces.iter().filter(|p| p.is_void_triet).count(), 2, "{}", context);
        assert!((2..=6).contains(&chart.anchors.structural_number), "{}", context);

        for palace in &chart.palaces {
            let mut ids: Vec<u8> = palace.stars.iter().map(|s| s.id).collect();
            let placed = ids.len();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), placed, "duplicate star in {} for {}", palace.branch, context);
        }

        for transformation in Transformation::ALL {
            let tagged = chart
                .palaces
                .iter()
                .flat_map(|p| p.stars.iter())
                .filter(|s| s.transformation == Some(transformation))
                .count();
            assert!(tagged <= 1, "{} tagged {} times for {}", transformation.label(), tagged, context);
        }
    }
}

#[test]
fn test_every_catalog_star_is_placed_once() {
    let chart = facts(Gender::Female, NaiveDate::from_ymd_opt(1975, 8, 20).unwrap(), 3)
        .generate_chart()
        .unwrap();
    let total: usize = chart.palaces.iter().map(|p| p.stars.len()).sum();
    assert_eq!(total, 109);
    for star in Star::all() {
        assert!(chart.find_star(star).is_some(), "{} missing", star);
    }
}

#[test]
fn test_houses_cover_the_ring() {
    for facts in sweep().step_by(97) {
        let chart = facts.generate_chart().unwrap();
        let mut houses: Vec<&str> = chart.palaces.iter().map(|p| p.house).collect();
        houses.sort_unstable();
        houses.dedup();
        assert_eq!(houses.len(), 12);

        let mut decades: Vec<u32> = chart.palaces.iter().map(|p| p.decade_start).collect();
        decades.sort_unstable();
        let expected: Vec<u32> = (0..12).map(|k| u32::from(chart.anchors.structural_number) + 10 * k).collect();
        assert_eq!(decades, expected);
        assert_eq!(chart.soul_palace().decade_start, u32::from(chart.anchors.structural_number));
    }
}

#[test]
fn test_build_is_deterministic() {
    let input = facts(Gender::Female, NaiveDate::from_ymd_opt(2001, 11, 3).unwrap(), 10);
    let first = serde_json::to_string(&input.generate_chart().unwrap()).unwrap();
    let second = serde_json::to_string(&input.generate_chart().unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_gender_reverses_rotating_rings() {
    let date = NaiveDate::from_ymd_opt(1990, 1, 15).unwrap();
    let male = facts(Gender::Male, date, 6).generate_chart().unwrap();
    let female = facts(Gender::Female, date, 6).generate_chart().unwrap();
    assert_eq!(male.anchors.ring_sign, -female.anchors.ring_sign);
    assert_eq!(male.find_star(Star::LocTon), female.find_star(Star::LocTon));
    let male_luc_si = male.find_star(Star::LucSi).unwrap().0;
    let female_luc_si = female.find_star(Star::LucSi).unwrap().0;
    assert_ne!(male_luc_si, female_luc_si);
    assert_eq!(female.summary.soul_harmony, "Âm dương thuận lý");
}

#[test]
fn test_overlay_decade_changes_after_ten_years() {
    for facts in sweep().step_by(53) {
        let chart = facts.generate_chart().unwrap();
        let birth_year = chart.derivation.lunar.year;
        let at_birth = overlay_for_year(&chart, birth_year);
        let ten_later = overlay_for_year(&chart, birth_year + 10);
        assert_ne!(at_birth.decade_pointer, ten_later.decade_pointer);
    }
}
