//! SenML Pack - ordered collection of SenML records

use serde::{Deserialize, Serialize};

use crate::Record;

/// A SenML Pack represents an ordered list of SenML records
///
/// Base fields may appear on any record and apply from there on. After
/// [`Pack::normalize`] the pack is in resolved form: no base fields, one
/// measurement per record, sorted by time.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pack {
    /// Array of SenML records
    pub records: Vec<Record>,
}

impl Pack {
    /// Create a new empty pack
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Add a record to this pack
    pub fn add_record(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Add multiple records to this pack
    pub fn add_records<I>(&mut self, records: I)
    where
        I: IntoIterator<Item = Record>,
    {
        self.records.extend(records);
    }

    /// Get the number of records in this pack
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if this pack is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over records in this pack
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    /// Get a mutable iterator over records
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Record> {
        self.records.iter_mut()
    }

    /// Order-sensitive pack equality, comparing records pairwise with
    /// [`Record::equals`]
    pub fn equals(&self, other: &Pack) -> bool {
        self.len() == other.len()
            && self
                .records
                .iter()
                .zip(&other.records)
                .all(|(a, b)| a.equals(b))
    }

    /// Sort records by ascending time. Records with equal times keep their
    /// relative order.
    pub fn sort_by_time(&mut self) {
        self.records.sort_by(|a, b| a.time.total_cmp(&b.time));
    }

    /// The `Less` relation of the time ordering, by index.
    ///
    /// Panics if either index is out of bounds.
    pub fn less(&self, i: usize, j: usize) -> bool {
        self.records[i].time < self.records[j].time
    }

    /// Smallest and largest record time, or `None` for an empty pack
    pub fn time_range(&self) -> Option<(f64, f64)> {
        self.records.iter().map(|r| r.time).fold(None, |range, t| match range {
            None => Some((t, t)),
            Some((min, max)) => Some((min.min(t), max.max(t))),
        })
    }

    /// Records whose time lies within `start..=end`
    pub fn records_in_time_range(&self, start: f64, end: f64) -> Vec<&Record> {
        self.records
            .iter()
            .filter(|r| r.time >= start && r.time <= end)
            .collect()
    }
}

/// [`Pack::equals`] with an absent side; an absent pack never equals a
/// present one, even an empty one.
pub fn packs_equal(a: Option<&Pack>, b: Option<&Pack>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.equals(b),
        (None, None) => true,
        _ => false,
    }
}

impl From<Vec<Record>> for Pack {
    fn from(records: Vec<Record>) -> Self {
        Self { records }
    }
}

impl FromIterator<Record> for Pack {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Pack {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a Pack {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl Extend<Record> for Pack {
    fn extend<I: IntoIterator<Item = Record>>(&mut self, iter: I) {
        self.records.extend(iter);
    }
}
