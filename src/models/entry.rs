use serde::{Deserialize, Serialize};

/// One dated, hour-logged unit of work inside a report.
///
/// `date` and `hours` are kept as the raw strings the user typed: an entry
/// with an empty or malformed value is still a valid entry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub hours: String,
    #[serde(default)]
    pub description: String,
}

impl Entry {
    pub fn new(
        id: impl Into<String>,
        date: impl Into<String>,
        hours: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            date: date.into(),
            hours: hours.into(),
            description: description.into(),
        }
    }

    /// Hours as a number; anything non-numeric counts as zero.
    pub fn hours_value(&self) -> f64 {
        match self.hours.trim().parse::<f64>() {
            Ok(h) if h.is_finite() => h,
            _ => 0.0,
        }
    }

    /// Numeric suffix of ids shaped like `{report}-{n}`.
    pub fn sequence(&self) -> Option<u32> {
        self.id.rsplit_once('-').and_then(|(_, n)| n.parse().ok())
    }
}
