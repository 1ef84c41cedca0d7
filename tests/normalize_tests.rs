//! Normalization of compact packs

mod common;

use common::{init_tracing, pack, value};
use senml::{Pack, Record, Unit, resolve_relative_time, to_senml_time};
use time::OffsetDateTime;

const DEVICE: &str = "urn:dev:ow:10e2073a01080063";

fn resolved(time: f64, unit: Unit, v: f64) -> Record {
    value(DEVICE, v).with_time(time).with_unit(unit)
}

#[test]
fn test_normalize_table() {
    init_tracing();

    let cases: Vec<(Pack, Pack)> = vec![
        (
            pack([
                value("", 20.0)
                    .with_base_name(DEVICE)
                    .with_base_time(1.320067464e+09)
                    .with_base_unit(Unit::RELATIVE_HUMIDITY),
                value("", 24.30621).with_unit(Unit::DEGREES_LONGITUDE),
                value("", 60.07965).with_unit(Unit::DEGREES_LATITUDE),
                value("", 20.3).with_time(60.0),
                value("", 24.30622).with_unit(Unit::DEGREES_LONGITUDE).with_time(60.0),
                value("", 60.07965).with_unit(Unit::DEGREES_LATITUDE).with_time(60.0),
                value("", 20.7).with_time(120.0),
                value("", 24.30623).with_unit(Unit::DEGREES_LONGITUDE).with_time(120.0),
                value("", 60.07966).with_unit(Unit::DEGREES_LATITUDE).with_time(120.0),
                value("", 98.0).with_unit(Unit::ENERGY_LEVEL).with_time(150.0),
            ]),
            pack([
                resolved(1.320067464e+09, Unit::RELATIVE_HUMIDITY, 20.0),
                resolved(1.320067464e+09, Unit::DEGREES_LONGITUDE, 24.30621),
                resolved(1.320067464e+09, Unit::DEGREES_LATITUDE, 60.07965),
                resolved(1.320067524e+09, Unit::RELATIVE_HUMIDITY, 20.3),
                resolved(1.320067524e+09, Unit::DEGREES_LONGITUDE, 24.30622),
                resolved(1.320067524e+09, Unit::DEGREES_LATITUDE, 60.07965),
                resolved(1.320067584e+09, Unit::RELATIVE_HUMIDITY, 20.7),
                resolved(1.320067584e+09, Unit::DEGREES_LONGITUDE, 24.30623),
                resolved(1.320067584e+09, Unit::DEGREES_LATITUDE, 60.07966),
                resolved(1.320067614e+09, Unit::ENERGY_LEVEL, 98.0),
            ]),
        ),
        (
            pack([Record::new().with_base_name("foo."), value("bar", 1.0)]),
            pack([value("foo.bar", 1.0)]),
        ),
        (
            pack([Record::new().with_base_value(1.0), value("foo", 1.0)]),
            pack([value("foo", 2.0)]),
        ),
        (
            pack([
                Record::new().with_base_sum(1.0),
                Record::new().with_name("foo").with_sum(1.0),
            ]),
            pack([Record::new().with_name("foo").with_sum(2.0)]),
        ),
        (
            pack([Record::new().with_base_time(1.0), value("foo", 1.0).with_time(1.0)]),
            pack([value("foo", 1.0).with_time(2.0)]),
        ),
        (
            pack([
                value("foo", 1.0).with_time(1.0),
                Record::with_bool_value("foo", true).with_time(1.0),
                Record::with_string_value("foo", "foo").with_time(1.0),
                Record::with_data_value("foo", vec![0x01, 0x02]).with_time(1.0),
                Record::new().with_name("foo").with_time(1.0).with_sum(1.0),
            ]),
            pack([
                value("foo", 1.0).with_time(1.0),
                Record::with_bool_value("foo", true).with_time(1.0),
                Record::with_string_value("foo", "foo").with_time(1.0),
                Record::with_data_value("foo", vec![0x01, 0x02]).with_time(1.0),
                Record::new().with_name("foo").with_time(1.0).with_sum(1.0),
            ]),
        ),
        (
            pack([value("foo", 1.0).with_time(2.0), value("foo", 2.0).with_time(1.0)]),
            pack([value("foo", 2.0).with_time(1.0), value("foo", 1.0).with_time(2.0)]),
        ),
    ];

    for (src, expected) in &cases {
        let normalized = src.normalize();
        assert!(
            normalized.equals(expected),
            "normalized version of {src:?} should be {expected:?}, not {normalized:?}"
        );
    }
}

#[test]
fn test_normalize_at_table() {
    init_tracing();

    let t0 = OffsetDateTime::now_utc();
    let reference = to_senml_time(t0);

    let cases: Vec<(Pack, Pack)> = vec![
        (
            pack([Record::new().with_base_name("foo."), value("bar", 1.0)]),
            pack([value("foo.bar", 1.0).with_time(reference)]),
        ),
        (
            pack([Record::new().with_base_name("foo."), value("bar", 1.0).with_time(1.0)]),
            pack([value("foo.bar", 1.0).with_time(reference + 1.0)]),
        ),
        (
            pack([
                Record::new().with_base_name("foo."),
                value("bar", 1.0).with_time(-268_435_457.0),
            ]),
            pack([value("foo.bar", 1.0).with_time(reference - 268_435_457.0)]),
        ),
        (
            pack([
                Record::new().with_base_name("foo."),
                value("bar", 1.0).with_time(268_435_456.0),
            ]),
            pack([value("foo.bar", 1.0).with_time(reference + 268_435_456.0)]),
        ),
        (
            pack([
                Record::new().with_base_name("foo."),
                value("bar", 1.0).with_time(268_435_457.0),
            ]),
            pack([value("foo.bar", 1.0).with_time(268_435_457.0)]),
        ),
    ];

    for (src, expected) in &cases {
        let normalized = src.normalize_at(t0);
        assert!(
            normalized.equals(expected),
            "normalized version of {src:?} should be {expected:?}, not {normalized:?}"
        );
    }
}

fn mixed_pack() -> Pack {
    pack([
        value("temp", 20.0)
            .with_base_name("urn:dev:mac:0024befffe804ff1/")
            .with_base_time(1_276_020_076.0)
            .with_base_unit(Unit::CELSIUS)
            .with_base_value(1.0)
            .with_version(10),
        value("temp", 21.0).with_time(-5.0),
        Record::new().with_base_sum(100.0),
        Record::new().with_name("energy").with_sum(3.0).with_time(-10.0),
        Record::with_string_value("state", "open").with_unit(Unit::SWITCH),
        Record::new().with_base_name("urn:dev:mac:0024befffe804ff2/"),
        Record::with_bool_value("door", false).with_time(7.0),
        Record::with_data_value("blob", vec![9, 8, 7]).with_time(-1.0),
    ])
}

#[test]
fn test_normalize_is_idempotent() {
    let once = mixed_pack().normalize();
    let twice = once.normalize();

    assert!(twice.equals(&once));
    assert_eq!(twice, once);
}

#[test]
fn test_normalize_mixed_pack() {
    let normalized = mixed_pack().normalize();

    assert_eq!(normalized.len(), 6);
    let summary: Vec<(&str, f64)> = normalized
        .iter()
        .map(|r| (r.name.as_str(), r.time))
        .collect();
    assert_eq!(
        summary,
        [
            ("urn:dev:mac:0024befffe804ff1/energy", 1_276_020_066.0),
            ("urn:dev:mac:0024befffe804ff1/temp", 1_276_020_071.0),
            ("urn:dev:mac:0024befffe804ff2/blob", 1_276_020_075.0),
            ("urn:dev:mac:0024befffe804ff1/temp", 1_276_020_076.0),
            ("urn:dev:mac:0024befffe804ff1/state", 1_276_020_076.0),
            ("urn:dev:mac:0024befffe804ff2/door", 1_276_020_083.0),
        ]
    );
    assert_eq!(normalized.records[0].sum, Some(103.0));
    assert_eq!(normalized.records[1].value, Some(22.0));
    assert_eq!(normalized.records[3].value, Some(21.0));
    assert_eq!(normalized.records[4].unit, Unit::SWITCH);
    assert!(normalized.iter().all(|r| r.version == 10));
    assert!(normalized.iter().all(|r| r.base_name.is_empty() && r.base_time == 0.0));
}

#[test]
fn test_normalize_at_matches_normalize() {
    let reference = OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap();
    let src = pack([
        value("a", 1.0).with_time(-30.0),
        value("b", 2.0).with_time(1_600_000_000.0),
        value("c", 3.0).with_time(268_435_456.0),
    ]);

    let anchored = src.normalize_at(reference);
    let mut expected = src.normalize();
    for r in expected.iter_mut() {
        r.time = resolve_relative_time(r.time, to_senml_time(reference));
    }

    assert!(anchored.equals(&expected));
}

#[test]
fn test_empty_and_base_only_packs() {
    assert!(Pack::new().normalize().is_empty());

    let base_only = pack([
        Record::new().with_base_name("x/").with_base_value(1.0),
        Record::new().with_base_unit(Unit::WATT),
    ]);
    assert!(base_only.normalize().is_empty());
}
