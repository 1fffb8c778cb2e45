use belfiore_core::codec::{
    code_to_int, encode_code, encode_day_offset, encode_license_bits, epoch, int_to_code,
};
use belfiore_core::names::name_by_index;
use belfiore_core::search::binary_find_index;
use belfiore_core::{
    BelfioreError, Connector, FilterConfig, PackedSource, PackedSourceRaw, PlaceKind,
    CITY_MATCHER,
};
use chrono::{Days, NaiveDate};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

struct Entry<'a> {
    code: &'a str,
    region: &'a str,
    name: &'a str,
    license: u8,
}

fn partition(entries: &[Entry<'_>], creation: Option<String>, expiration: Option<String>) -> PackedSource {
    let raw = PackedSourceRaw {
        codes: entries.iter().map(|e| encode_code(e.code).unwrap()).collect(),
        region_codes: entries.iter().map(|e| e.region).collect(),
        names: entries.iter().map(|e| e.name).collect::<Vec<_>>().join("|"),
        creation_dates: creation,
        expiration_dates: expiration,
        license_bits: encode_license_bits(&entries.iter().map(|e| e.license).collect::<Vec<_>>())
            .unwrap(),
    };
    PackedSource::try_from(raw).unwrap()
}

fn rome_and_milan() -> Connector {
    let cities = partition(
        &[
            Entry { code: "A011", region: "RM", name: "Rome", license: 1 },
            Entry { code: "C012", region: "MI", name: "Milan", license: 0 },
        ],
        None,
        None,
    );
    Connector::new(vec![cities], vec!["L0".to_string(), "L1".to_string()])
}

#[test]
fn exact_lookup_decodes_every_field() {
    let rome = rome_and_milan().lookup_by_code("A011").unwrap().unwrap();
    assert_eq!(rome.code(), "A011");
    assert_eq!(rome.name(), "Rome");
    assert_eq!(rome.license(), Some("L1"));
    assert_eq!(rome.kind, PlaceKind::City { province: "RM".to_string() });
}

#[test]
fn absent_country_is_not_found() {
    let db = rome_and_milan().countries().unwrap();
    assert!(db.lookup_by_code("Z999").unwrap().is_none());
}

#[test]
fn find_by_name_returns_a_unique_city() {
    let rome = rome_and_milan().find_by_name("^Rome$").unwrap().unwrap();
    assert!(rome.is_city());
    assert_eq!(rome.code(), "A011");
}

#[test]
fn ambiguous_names_have_no_unique_match() {
    let cities = partition(
        &[
            Entry { code: "A011", region: "RM", name: "Rome", license: 0 },
            Entry { code: "H620", region: "RO", name: "Rovigo", license: 0 },
        ],
        None,
        None,
    );
    let db = Connector::new(vec![cities], vec!["L0".to_string()]);
    assert!(db.find_by_name("^Ro").unwrap().is_none());
    assert_eq!(db.search_by_name("^Ro").unwrap().len(), 2);
}

#[test]
fn creation_on_epoch_without_expiration_never_expires() {
    let source = partition(
        &[Entry { code: "A001", region: "PD", name: "Abano Terme", license: 0 }],
        Some(encode_day_offset(epoch()).unwrap()),
        None,
    );
    let db = Connector::new(vec![source], Vec::new());
    assert!(db.active(epoch()).lookup_by_code("A001").unwrap().is_some());
    assert!(db.active(day(9999, 12, 31)).lookup_by_code("A001").unwrap().is_some());
    assert!(db.active(day(1860, 12, 31)).lookup_by_code("A001").unwrap().is_none());
}

#[test]
fn expiration_day_is_inclusive() {
    let expires = day(1927, 6, 30);
    let source = partition(
        &[Entry { code: "A002", region: "AQ", name: "Abbateggio", license: 0 }],
        None,
        Some(encode_day_offset(expires).unwrap()),
    );
    let db = Connector::new(vec![source], Vec::new());
    assert!(db.active(expires).lookup_by_code("A002").unwrap().is_some());
    let next = expires.checked_add_days(Days::new(1)).unwrap();
    assert!(db.active(next).lookup_by_code("A002").unwrap().is_none());
    assert!(db.active(next).to_vec().unwrap().is_empty());
}

#[test]
fn short_creation_field_bounds_later_entries_at_the_epoch() {
    let source = partition(
        &[
            Entry { code: "A001", region: "PD", name: "Uno", license: 0 },
            Entry { code: "A002", region: "AQ", name: "Due", license: 0 },
        ],
        Some(encode_day_offset(day(1861, 6, 1)).unwrap()),
        None,
    );
    let db = Connector::new(vec![source], Vec::new());
    let before_epoch = db.active(day(1800, 1, 1));
    assert!(before_epoch.lookup_by_code("A002").unwrap().is_none());
    assert!(before_epoch.to_vec().unwrap().is_empty());

    let due = db.active(epoch()).lookup_by_code("A002").unwrap().unwrap();
    assert_eq!(due.creation_date, epoch());
    assert!(due.is_active_on(epoch()));
}

#[test]
fn province_view_keeps_countries_with_the_same_region_code() {
    let countries = partition(
        &[Entry { code: "Z110", region: "FR", name: "Francia", license: 0 }],
        None,
        None,
    );
    let db = Connector::new(vec![countries], Vec::new());
    let france = db.by_province("FR").unwrap().lookup_by_code("Z110").unwrap().unwrap();
    assert_eq!(france.iso3166(), Some("FR"));
}

#[test]
fn matcher_and_province_are_exclusive() {
    let err = FilterConfig::builder()
        .code_matcher(CITY_MATCHER.clone())
        .province("RM")
        .build()
        .unwrap_err();
    assert!(matches!(err, BelfioreError::Config(_)));
}

#[test]
fn every_code_round_trips() {
    for n in 0..=25_999u32 {
        let code = int_to_code(n).unwrap();
        assert_eq!(code_to_int(&code).unwrap(), n);
        assert_eq!(int_to_code(code_to_int(&code.to_lowercase()).unwrap()).unwrap(), code);
    }
}

#[test]
fn binary_search_agrees_with_linear_scan() {
    // Deterministic pseudo-random sorted sets of 3-char tokens.
    let mut seed = 0x2545_f491u32;
    for _ in 0..50 {
        let mut ints: Vec<u32> = (0..40)
            .map(|_| {
                seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
                (seed >> 8) % 26_000
            })
            .collect();
        ints.sort_unstable();
        ints.dedup();
        let tokens: Vec<String> = ints.iter().map(|&n| encode_code(&int_to_code(n).unwrap()).unwrap()).collect();
        let packed = tokens.concat();

        for probe in (0..26_000).step_by(97) {
            let target = encode_code(&int_to_code(probe).unwrap()).unwrap();
            let linear = tokens.iter().position(|t| *t == target);
            assert_eq!(binary_find_index(&packed, &target, None), linear);
        }
        for (i, token) in tokens.iter().enumerate() {
            assert_eq!(binary_find_index(&packed, token, None), Some(i));
        }
    }
}

#[test]
fn name_index_boundaries() {
    let list = "Abano Terme|Abbadia Cerreto|Abbadia Lariana";
    assert_eq!(name_by_index(list, 0).unwrap(), "Abano Terme");
    assert_eq!(name_by_index(list, 2).unwrap(), "Abbadia Lariana");
    assert!(matches!(name_by_index(list, 3), Err(BelfioreError::Range(_))));
    assert!(matches!(name_by_index(list, -1i64), Err(BelfioreError::Range(_))));
}

#[test]
fn views_are_shared_across_threads() {
    let db = rome_and_milan();
    let cities = db.cities().unwrap();
    std::thread::scope(|s| {
        let a = s.spawn(|| db.lookup_by_code("C012").unwrap().map(|p| p.name));
        let b = s.spawn(|| cities.to_vec().unwrap().len());
        assert_eq!(a.join().unwrap().as_deref(), Some("Milan"));
        assert_eq!(b.join().unwrap(), 2);
    });
}
