//! XML serialization support for SenML
//!
//! A pack is a `<sensml xmlns="urn:ietf:params:xml:ns:senml">` element with
//! one `<senml>` child per record. Record fields are attributes named after
//! the JSON labels, and fields at their zero or absent value are left out.
//! The sum is written as `s` (or `sum`, see [`SumAttribute`]); both names
//! are read back.
//!
//! `vd` is base64 text, the same form as in JSON. An attribute holding raw
//! bytes that are not valid base64 is rejected with
//! [`SenMLError::InvalidFieldValue`].

use std::borrow::Cow;

use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, Event};

use crate::record::data_value;
use crate::{Pack, Record, Result, SenMLError, SumAttribute, XmlConfig};

/// Namespace of the SenML XML representation
pub const NAMESPACE: &str = "urn:ietf:params:xml:ns:senml";

const PACK_ELEMENT: &str = "sensml";
const RECORD_ELEMENT: &str = "senml";

impl Pack {
    /// Serialize this SenML pack to XML
    ///
    /// # Example
    ///
    /// ```rust
    /// # use senml::{Pack, Record, Result, Unit};
    /// # fn example() -> Result<()> {
    /// let pack = Pack::from(vec![Record::with_value("urn:dev:ow:10e2073a01080063", 23.1).with_unit(Unit::CELSIUS)]);
    ///
    /// assert_eq!(
    ///     pack.to_xml()?,
    ///     r#"<sensml xmlns="urn:ietf:params:xml:ns:senml"><senml n="urn:dev:ow:10e2073a01080063" u="Cel" v="23.1"></senml></sensml>"#
    /// );
    /// # Ok(())
    /// # }
    /// ```
    pub fn to_xml(&self) -> Result<String> {
        self.to_xml_with(&XmlConfig::default())
    }

    /// [`Pack::to_xml`] with explicit options
    pub fn to_xml_with(&self, config: &XmlConfig) -> Result<String> {
        let mut writer = Writer::new(Vec::new());

        let mut root = BytesStart::new(PACK_ELEMENT);
        root.push_attribute(("xmlns", NAMESPACE));
        write_event(&mut writer, Event::Start(root))?;

        for record in &self.records {
            let mut element = BytesStart::new(RECORD_ELEMENT);
            for (key, value) in record_attributes(record, config.sum_attribute) {
                element.push_attribute((key, &*value));
            }
            write_event(&mut writer, Event::Start(element))?;
            write_event(&mut writer, Event::End(BytesEnd::new(RECORD_ELEMENT)))?;
        }

        write_event(&mut writer, Event::End(BytesEnd::new(PACK_ELEMENT)))?;

        String::from_utf8(writer.into_inner()).map_err(|e| SenMLError::serialization(e.to_string()))
    }

    /// Deserialize a SenML pack from XML
    ///
    /// The root element must be `sensml`; its namespace is not checked.
    /// Child elements other than `senml`, and anything nested deeper, are
    /// skipped.
    pub fn from_xml(xml: &str) -> Result<Self> {
        parse_pack(xml).inspect_err(|e| tracing::debug!(error = %e, "failed to decode SenML XML"))
    }
}

fn write_event(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| SenMLError::serialization(e.to_string()))
}

fn record_attributes(record: &Record, sum_attribute: SumAttribute) -> Vec<(&'static str, Cow<'_, str>)> {
    let mut attributes = Vec::new();

    if !record.base_name.is_empty() {
        attributes.push(("bn", Cow::Borrowed(record.base_name.as_str())));
    }
    if record.base_time != 0.0 {
        attributes.push(("bt", Cow::Owned(format_float(record.base_time))));
    }
    if !record.base_unit.is_empty() {
        attributes.push(("bu", Cow::Borrowed(record.base_unit.as_str())));
    }
    if let Some(bv) = record.base_value {
        attributes.push(("bv", Cow::Owned(format_float(bv))));
    }
    if let Some(bs) = record.base_sum {
        attributes.push(("bs", Cow::Owned(format_float(bs))));
    }
    if record.version != 0 {
        attributes.push(("bver", Cow::Owned(record.version.to_string())));
    }
    if !record.name.is_empty() {
        attributes.push(("n", Cow::Borrowed(record.name.as_str())));
    }
    if !record.unit.is_empty() {
        attributes.push(("u", Cow::Borrowed(record.unit.as_str())));
    }
    if record.time != 0.0 {
        attributes.push(("t", Cow::Owned(format_float(record.time))));
    }
    if record.update_time != 0.0 {
        attributes.push(("ut", Cow::Owned(format_float(record.update_time))));
    }
    if let Some(v) = record.value {
        attributes.push(("v", Cow::Owned(format_float(v))));
    }
    if !record.string_value.is_empty() {
        attributes.push(("vs", Cow::Borrowed(record.string_value.as_str())));
    }
    if !record.data_value.is_empty() {
        attributes.push(("vd", Cow::Owned(data_value::encode(&record.data_value))));
    }
    if let Some(vb) = record.bool_value {
        attributes.push(("vb", Cow::Borrowed(if vb { "true" } else { "false" })));
    }
    if let Some(s) = record.sum {
        attributes.push((sum_attribute.as_str(), Cow::Owned(format_float(s))));
    }

    attributes
}

fn parse_pack(xml: &str) -> Result<Pack> {
    let mut reader = Reader::from_str(xml);
    let mut pack = Pack::new();
    let mut depth = 0usize;
    let mut seen_root = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| SenMLError::deserialization(e.to_string()))?;
        match event {
            Event::Start(ref element) | Event::Empty(ref element) => {
                match depth {
                    0 => {
                        if seen_root {
                            return Err(SenMLError::deserialization("more than one root element"));
                        }
                        expect_root(element)?;
                        seen_root = true;
                    }
                    1 if element.local_name().as_ref() == RECORD_ELEMENT.as_bytes() => {
                        pack.add_record(parse_record(element)?);
                    }
                    _ => {}
                }
                if matches!(event, Event::Start(_)) {
                    depth += 1;
                }
            }
            Event::End(_) => depth = depth.saturating_sub(1),
            Event::Eof => break,
            _ => {}
        }
    }

    if !seen_root {
        return Err(SenMLError::deserialization("missing <sensml> root element"));
    }
    if depth != 0 {
        return Err(SenMLError::deserialization("unexpected end of document"));
    }
    Ok(pack)
}

fn expect_root(element: &BytesStart<'_>) -> Result<()> {
    let name = element.local_name();
    if name.as_ref() == PACK_ELEMENT.as_bytes() {
        Ok(())
    } else {
        Err(SenMLError::deserialization(format!(
            "expected element <{PACK_ELEMENT}> but found <{}>",
            String::from_utf8_lossy(name.as_ref())
        )))
    }
}

fn parse_record(element: &BytesStart<'_>) -> Result<Record> {
    let mut record = Record::default();

    for attribute in element.attributes() {
        let attribute = attribute.map_err(|e| SenMLError::deserialization(e.to_string()))?;
        let value = attribute
            .unescape_value()
            .map_err(|e| SenMLError::deserialization(e.to_string()))?;

        match attribute.key.as_ref() {
            b"bn" => record.base_name = value.into_owned(),
            b"bt" => record.base_time = parse_float("bt", &value)?,
            b"bu" => record.base_unit = value.into_owned().into(),
            b"bv" => record.base_value = Some(parse_float("bv", &value)?),
            b"bs" => record.base_sum = Some(parse_float("bs", &value)?),
            b"bver" => record.version = parse_int("bver", &value)?,
            b"n" => record.name = value.into_owned(),
            b"u" => record.unit = value.into_owned().into(),
            b"t" => record.time = parse_float("t", &value)?,
            b"ut" => record.update_time = parse_float("ut", &value)?,
            b"v" => record.value = Some(parse_float("v", &value)?),
            b"vs" => record.string_value = value.into_owned(),
            b"vd" => {
                record.data_value = data_value::decode(&value)
                    .map_err(|_| SenMLError::invalid_field_value("vd", value.to_string()))?
            }
            b"vb" => record.bool_value = Some(parse_bool("vb", &value)?),
            b"s" | b"sum" => record.sum = Some(parse_float("s", &value)?),
            _ => {}
        }
    }

    Ok(record)
}

/// An empty attribute is zero
fn parse_float(field: &str, value: &str) -> Result<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    trimmed
        .parse()
        .map_err(|_| SenMLError::invalid_field_value(field, value))
}

fn parse_int(field: &str, value: &str) -> Result<i32> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed
        .parse()
        .map_err(|_| SenMLError::invalid_field_value(field, value))
}

fn parse_bool(field: &str, value: &str) -> Result<bool> {
    match value.trim() {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(SenMLError::invalid_field_value(field, value)),
    }
}

/// Shortest representation that reads back to the same `f64`, in plain
/// notation for exponents -4..6 and as `d.ddde±XX` otherwise.
pub(crate) fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }

    let scientific = format!("{value:e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return value.to_string();
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if (-4..6).contains(&exponent) {
        value.to_string()
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exponent.abs())
    }
}
