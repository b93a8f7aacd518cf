use std::collections::BTreeMap;

/// Applied filters as sent to the backend: field -> value.
pub type FilterMap = BTreeMap<String, String>;

/// A field a page lets the user filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterField {
    pub key: &'static str,
    pub label: &'static str,
}

pub const REFERRAL_FILTERS: &[FilterField] = &[
    FilterField { key: "referrer_name", label: "Referrer Name" },
    FilterField { key: "referee_name", label: "Referee Name" },
    FilterField { key: "referrer_user_id", label: "Referrer User ID" },
    FilterField { key: "referee_user_id", label: "Referee User ID" },
];

pub const PROFILE_FILTERS: &[FilterField] = &[
    FilterField { key: "id", label: "ID" },
    FilterField { key: "name", label: "Name" },
    FilterField { key: "referral_code", label: "Referral Code" },
    FilterField { key: "phone", label: "Phone" },
];

/// A user-authored (field, value) pair not yet applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterRow {
    pub field: String,
    pub value: String,
}

impl FilterRow {
    pub fn is_complete(&self) -> bool {
        !self.field.is_empty() && !self.value.is_empty()
    }
}

/// The editable filter list. Kept separate from the applied [`FilterMap`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterRows {
    rows: Vec<FilterRow>,
}

impl FilterRows {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an empty row and return its index.
    pub fn add(&mut self) -> usize {
        self.rows.push(FilterRow::default());
        self.rows.len() - 1
    }

    /// Returns false when `index` is out of range.
    pub fn set_field(&mut self, index: usize, field: impl Into<String>) -> bool {
        match self.rows.get_mut(index) {
            Some(row) => {
                row.field = field.into();
                true
            }
            None => false,
        }
    }

    pub fn set_value(&mut self, index: usize, value: impl Into<String>) -> bool {
        match self.rows.get_mut(index) {
            Some(row) => {
                row.value = value.into();
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, index: usize) -> Option<FilterRow> {
        (index < self.rows.len()).then(|| self.rows.remove(index))
    }

    pub fn rows(&self) -> &[FilterRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Collapse rows into a mapping. Incomplete rows are skipped and a later
    /// row for the same field wins.
    pub fn to_mapping(&self) -> FilterMap {
        self.rows
            .iter()
            .filter(|row| row.is_complete())
            .fold(FilterMap::new(), |mut acc, row| {
                acc.insert(row.field.clone(), row.value.clone());
                acc
            })
    }
}
