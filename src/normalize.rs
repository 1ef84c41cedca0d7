//! SenML normalization - converting packs to resolved form
//!
//! Base fields are folded into every record they apply to, records without
//! a measurement are dropped, and the result is sorted by time.

use time::OffsetDateTime;

use crate::{Measurement, NormalizeConfig, Pack, Record, Unit, resolve_relative_time, to_senml_time};

/// Base fields in effect at some point of a pack. A field changes whenever
/// a record sets it, and stays until the next record that sets it.
#[derive(Debug, Default)]
struct BaseFields {
    name: String,
    unit: Unit,
    time: f64,
    value: f64,
    sum: f64,
    version: i32,
}

impl BaseFields {
    fn update(&mut self, record: &Record) {
        if record.base_time != 0.0 {
            self.time = record.base_time;
        }
        if record.version != 0 {
            self.version = record.version;
        }
        if !record.base_unit.is_empty() {
            self.unit = record.base_unit.clone();
        }
        if !record.base_name.is_empty() {
            self.name.clone_from(&record.base_name);
        }
        // bv and bs count when present, even at zero
        if let Some(bv) = record.base_value {
            self.value = bv;
        }
        if let Some(bs) = record.base_sum {
            self.sum = bs;
        }
    }

    /// Resolve `record` against the current base fields, or `None` when it
    /// carries no measurement.
    fn resolve(&self, record: &Record, config: &NormalizeConfig) -> Option<Record> {
        let measurement = match record.measurement()? {
            Measurement::Value(v) => Measurement::Value(self.value + v),
            Measurement::Sum(s) => Measurement::Sum(self.sum + s),
            other => other,
        };

        let mut resolved = Record {
            name: format!("{}{}", self.name, record.name),
            time: self.time + record.time,
            unit: if record.unit.is_empty() {
                self.unit.clone()
            } else {
                record.unit.clone()
            },
            version: self.version,
            ..Default::default()
        };
        if config.propagate_update_time {
            resolved.update_time = record.update_time;
        }
        resolved.set_measurement(measurement);
        Some(resolved)
    }
}

impl Pack {
    /// Resolve all base fields and sort the records by time.
    ///
    /// The result holds one record per input record with a measurement,
    /// named `base name + name`, timed `base time + time`, with the base
    /// unit filled in and base value/sum added to `v`/`s`. Records that only
    /// set base fields are dropped. `self` is left untouched.
    pub fn normalize(&self) -> Pack {
        self.normalize_with(&NormalizeConfig::default())
    }

    /// [`Pack::normalize`] with explicit options
    pub fn normalize_with(&self, config: &NormalizeConfig) -> Pack {
        let mut base = BaseFields::default();
        let mut normalized = Pack {
            records: Vec::with_capacity(self.len()),
        };

        for (index, record) in self.records.iter().enumerate() {
            base.update(record);
            match base.resolve(record, config) {
                Some(resolved) => normalized.records.push(resolved),
                None => tracing::trace!(index, "dropping record without measurement"),
            }
        }

        normalized.sort_by_time();
        tracing::debug!(
            records = self.len(),
            resolved = normalized.len(),
            "normalized SenML pack"
        );
        normalized
    }

    /// Normalize, then turn every relative time into an absolute one using
    /// `reference` as "now".
    pub fn normalize_at(&self, reference: OffsetDateTime) -> Pack {
        self.normalize_at_with(reference, &NormalizeConfig::default())
    }

    /// [`Pack::normalize_at`] with explicit options
    pub fn normalize_at_with(&self, reference: OffsetDateTime, config: &NormalizeConfig) -> Pack {
        let mut normalized = self.normalize_with(config);
        let reference = to_senml_time(reference);
        for record in normalized.iter_mut() {
            record.time = resolve_relative_time(record.time, reference);
        }
        normalized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_normalization() {
        let pack = Pack::from(vec![
            Record::with_value("temp", 22.5)
                .with_base_name("device1/")
                .with_base_time(1_640_995_200.0)
                .with_base_unit(Unit::CELSIUS),
        ]);

        let normalized = pack.normalize();

        assert_eq!(normalized.len(), 1);
        let record = &normalized.records[0];
        assert_eq!(record.name, "device1/temp");
        assert_eq!(record.value, Some(22.5));
        assert_eq!(record.unit, Unit::CELSIUS);
        assert_eq!(record.time, 1_640_995_200.0);
        assert!(record.base_name.is_empty());
        assert!(record.base_unit.is_empty());
        assert_eq!(record.base_time, 0.0);
    }

    #[test]
    fn test_base_value_and_sum_are_added() {
        let pack = Pack::from(vec![
            Record::new().with_base_value(20.0).with_base_sum(100.0),
            Record::with_value("temp", 2.5),
            Record::new().with_name("energy").with_sum(5.0),
            Record::with_string_value("status", "ok"),
        ]);

        let normalized = pack.normalize();

        assert_eq!(normalized.len(), 3);
        assert_eq!(normalized.records[0].value, Some(22.5));
        assert_eq!(normalized.records[1].sum, Some(105.0));
        assert_eq!(normalized.records[2].string_value, "ok");
        assert!(normalized.iter().all(|r| r.base_value.is_none() && r.base_sum.is_none()));
    }

    #[test]
    fn test_zero_base_value_resets_offset() {
        let pack = Pack::from(vec![
            Record::with_value("a", 1.0).with_base_value(10.0),
            Record::with_value("b", 1.0).with_base_value(0.0),
        ]);

        let normalized = pack.normalize();

        assert_eq!(normalized.records[0].value, Some(11.0));
        assert_eq!(normalized.records[1].value, Some(1.0));
    }

    #[test]
    fn test_zero_base_time_does_not_reset() {
        let pack = Pack::from(vec![
            Record::with_value("a", 1.0).with_base_time(1000.0),
            Record::with_value("b", 1.0).with_base_time(0.0).with_time(5.0),
        ]);

        let normalized = pack.normalize();

        assert_eq!(normalized.records[1].time, 1005.0);
    }

    #[test]
    fn test_base_fields_change_mid_pack() {
        let pack = Pack::from(vec![
            Record::with_value("temp", 1.0).with_base_name("dev1/"),
            Record::with_value("temp", 2.0).with_base_name("dev2/").with_time(1.0),
            Record::with_value("hum", 3.0).with_time(2.0),
        ]);

        let names: Vec<String> = pack.normalize().into_iter().map(|r| r.name).collect();
        assert_eq!(names, ["dev1/temp", "dev2/temp", "dev2/hum"]);
    }

    #[test]
    fn test_version_is_kept() {
        let pack = Pack::from(vec![
            Record::with_value("a", 1.0).with_version(10),
            Record::with_value("b", 2.0),
        ]);

        let normalized = pack.normalize();

        assert!(normalized.iter().all(|r| r.version == 10));
    }

    #[test]
    fn test_update_time_propagation() {
        let pack = Pack::from(vec![Record::with_value("a", 1.0).with_update_time(60.0)]);

        assert_eq!(pack.normalize().records[0].update_time, 0.0);

        let config = NormalizeConfig::new().propagate_update_time(true);
        assert_eq!(pack.normalize_with(&config).records[0].update_time, 60.0);
    }

    #[test]
    fn test_ambiguous_record_keeps_priority_field() {
        let pack = Pack::from(vec![
            Record {
                name: "x".into(),
                string_value: "on".into(),
                sum: Some(4.0),
                bool_value: Some(true),
                ..Default::default()
            },
        ]);

        let normalized = pack.normalize();

        let record = &normalized.records[0];
        assert_eq!(record.bool_value, Some(true));
        assert!(record.string_value.is_empty());
        assert_eq!(record.sum, None);
    }

    #[test]
    fn test_input_not_modified() {
        let pack = Pack::from(vec![
            Record::new().with_base_name("foo."),
            Record::with_value("bar", 1.0).with_time(2.0),
            Record::with_value("baz", 1.0).with_time(1.0),
        ]);
        let before = pack.clone();

        let _ = pack.normalize();

        assert_eq!(pack, before);
    }

    #[test]
    fn test_normalize_at_anchors_relative_times() {
        let reference = OffsetDateTime::from_unix_timestamp(1_600_000_000).unwrap();
        let pack = Pack::from(vec![
            Record::with_value("rel", 1.0).with_time(-5.0),
            Record::with_value("abs", 1.0).with_time(1_500_000_000.0),
        ]);

        let normalized = pack.normalize_at(reference);

        assert_eq!(normalized.records[0].time, 1_599_999_995.0);
        assert_eq!(normalized.records[1].time, 1_500_000_000.0);
    }
}
