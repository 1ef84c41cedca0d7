//! Fluent construction of compact packs

use time::OffsetDateTime;

use crate::{Measurement, Pack, Record, Unit, to_senml_time};

/// Builds a compact pack: base fields are collected on a header and end up
/// on the first record. A pack without any record gets the header alone.
#[derive(Debug, Default)]
pub struct PackBuilder {
    header: Record,
    records: Vec<Record>,
}

impl PackBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_name<S: Into<String>>(mut self, name: S) -> Self {
        self.header.base_name = name.into();
        self
    }

    pub fn base_time(mut self, time: f64) -> Self {
        self.header.base_time = time;
        self
    }

    pub fn base_unit<U: Into<Unit>>(mut self, unit: U) -> Self {
        self.header.base_unit = unit.into();
        self
    }

    /// Offset added to every following `v`
    pub fn base_value(mut self, value: f64) -> Self {
        self.header.base_value = Some(value);
        self
    }

    /// Offset added to every following `s`
    pub fn base_sum(mut self, sum: f64) -> Self {
        self.header.base_sum = Some(sum);
        self
    }

    pub fn version(mut self, version: i32) -> Self {
        self.header.version = version;
        self
    }

    /// Append a record named `name` carrying `measurement`
    pub fn add(self, name: impl Into<String>, measurement: Measurement) -> Self {
        self.add_record(Record::from(measurement).with_name(name))
    }

    pub fn add_value<S: Into<String>>(self, name: S, value: f64) -> Self {
        self.add(name, Measurement::Value(value))
    }

    pub fn add_string_value<S: Into<String>, V: Into<String>>(self, name: S, value: V) -> Self {
        self.add(name, Measurement::String(value.into()))
    }

    pub fn add_bool_value<S: Into<String>>(self, name: S, value: bool) -> Self {
        self.add(name, Measurement::Bool(value))
    }

    pub fn add_data_value<S: Into<String>>(self, name: S, data: Vec<u8>) -> Self {
        self.add(name, Measurement::Data(data))
    }

    /// Append a numeric value at `time`, relative to the base time
    pub fn add_measurement<S: Into<String>>(self, name: S, value: f64, time: f64) -> Self {
        self.add_record(Record::with_value(name, value).with_time(time))
    }

    /// [`PackBuilder::add_measurement`] with a unit of its own
    pub fn add_measurement_with_unit<S: Into<String>, U: Into<Unit>>(
        self,
        name: S,
        value: f64,
        unit: U,
        time: f64,
    ) -> Self {
        self.add_record(Record::with_value(name, value).with_unit(unit).with_time(time))
    }

    /// Append a running sum at `time`
    pub fn add_sum<S: Into<String>>(self, name: S, sum: f64, time: f64) -> Self {
        self.add_record(Record::from(Measurement::Sum(sum)).with_name(name).with_time(time))
    }

    pub fn add_record(mut self, record: Record) -> Self {
        self.records.push(record);
        self
    }

    pub fn add_records<I>(mut self, records: I) -> Self
    where
        I: IntoIterator<Item = Record>,
    {
        self.records.extend(records);
        self
    }

    pub fn build(self) -> Pack {
        let Self { header, mut records } = self;
        if header == Record::default() {
            return Pack { records };
        }

        match records.first_mut() {
            Some(first) => merge_header(first, header),
            None => records.push(header),
        }
        Pack { records }
    }
}

/// Copy the base fields set on `header` onto `record`
fn merge_header(record: &mut Record, header: Record) {
    if !header.base_name.is_empty() {
        record.base_name = header.base_name;
    }
    if header.base_time != 0.0 {
        record.base_time = header.base_time;
    }
    if !header.base_unit.is_empty() {
        record.base_unit = header.base_unit;
    }
    if header.version != 0 {
        record.version = header.version;
    }
    record.base_value = header.base_value.or(record.base_value);
    record.base_sum = header.base_sum.or(record.base_sum);
}

/// A series of readings of one sensor at times relative to a base time
#[derive(Debug)]
pub struct TimeSeriesBuilder {
    base_name: String,
    base_time: f64,
    unit: Unit,
    readings: Vec<(f64, f64)>,
}

impl TimeSeriesBuilder {
    pub fn new<S: Into<String>>(base_name: S, base_time: f64) -> Self {
        Self {
            base_name: base_name.into(),
            base_time,
            unit: Unit::default(),
            readings: Vec::new(),
        }
    }

    pub fn unit<U: Into<Unit>>(mut self, unit: U) -> Self {
        self.unit = unit.into();
        self
    }

    /// Add a reading at `relative_time` seconds from the base time
    pub fn measurement(mut self, relative_time: f64, value: f64) -> Self {
        self.readings.push((relative_time, value));
        self
    }

    /// `(relative_time, value)` pairs
    pub fn measurements<I>(mut self, readings: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        self.readings.extend(readings);
        self
    }

    /// A reading taken at the current wall clock time
    pub fn measurement_now(self, value: f64) -> Self {
        let relative_time = to_senml_time(OffsetDateTime::now_utc()) - self.base_time;
        self.measurement(relative_time, value)
    }

    pub fn build(self) -> Pack {
        let header = PackBuilder::new()
            .base_name(self.base_name)
            .base_time(self.base_time)
            .base_unit(self.unit);

        self.readings
            .into_iter()
            .fold(header, |builder, (time, value)| {
                builder.add_measurement("", value, time)
            })
            .build()
    }
}
