//! Options for normalization and the XML codec

/// Options for [`Pack::normalize_with`](crate::Pack::normalize_with)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizeConfig {
    /// Copy the update time (`ut`) into the resolved records. Off by default:
    /// resolved records carry no update time.
    pub propagate_update_time: bool,
}

impl NormalizeConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep `ut` on resolved records
    pub fn propagate_update_time(mut self, propagate: bool) -> Self {
        self.propagate_update_time = propagate;
        self
    }
}

/// Attribute name used for the sum field in XML
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SumAttribute {
    /// `s`, the same key as in JSON
    #[default]
    S,
    /// `sum`, used by older revisions of the XML mapping
    LegacySum,
}

impl SumAttribute {
    pub fn as_str(self) -> &'static str {
        match self {
            SumAttribute::S => "s",
            SumAttribute::LegacySum => "sum",
        }
    }
}

/// Options for [`Pack::to_xml_with`](crate::Pack::to_xml_with)
///
/// Decoding always accepts both sum attribute names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XmlConfig {
    pub sum_attribute: SumAttribute,
}

impl XmlConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose the attribute name written for sums
    pub fn sum_attribute(mut self, sum_attribute: SumAttribute) -> Self {
        self.sum_attribute = sum_attribute;
        self
    }
}
