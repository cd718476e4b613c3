use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One data line of the trial-balance export, all fields kept as text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerRow {
    pub line: usize,
    pub mask: Option<String>,
    pub description: Option<String>,
    pub balance: Option<String>,
    pub balance_type: Option<String>,
}

/// PCASP control group a row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Group {
    /// Controles devedores
    #[serde(rename = "7")]
    Seven,
    /// Controles credores
    #[serde(rename = "8")]
    Eight,
}

impl Group {
    /// Group of a full account mask, taken from its first character.
    pub fn from_mask(mask: &str) -> Option<Self> {
        match mask.chars().next() {
            Some('7') => Some(Group::Seven),
            Some('8') => Some(Group::Eight),
            _ => None,
        }
    }

    /// Leading letter of the balance type that counts for this group.
    pub fn counted_balance_side(&self) -> char {
        match self {
            Group::Seven => 'D',
            Group::Eight => 'C',
        }
    }
}

/// A creditor row after grouping, mask normalization and the value rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub group: Group,
    pub mask: String,
    pub creditor: String,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "CORRETO")]
    Correct,
    #[serde(rename = "DIVERGENTE")]
    Divergent,
}

impl Status {
    pub fn label(&self) -> &'static str {
        match self {
            Status::Correct => "CORRETO",
            Status::Divergent => "DIVERGENTE",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditorComparison {
    pub mask: String,
    pub creditor: String,
    pub group7: f64,
    pub group8: f64,
    pub difference: f64,
    pub status: Status,
}

/// Counters collected while reading and filtering the input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadStats {
    pub rows_read: usize,
    pub rows_in_groups: usize,
    pub creditor_rows: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub comparisons: Vec<CreditorComparison>,
    pub stats: ReadStats,
    pub generated_at: DateTime<Utc>,
}

impl ValidationReport {
    pub fn new(comparisons: Vec<CreditorComparison>, stats: ReadStats) -> Self {
        Self {
            comparisons,
            stats,
            generated_at: Utc::now(),
        }
    }

    pub fn correct(&self) -> Vec<&CreditorComparison> {
        self.with_status(Status::Correct)
    }

    pub fn divergent(&self) -> Vec<&CreditorComparison> {
        self.with_status(Status::Divergent)
    }

    pub fn correct_count(&self) -> usize {
        self.comparisons
            .iter()
            .filter(|c| c.status == Status::Correct)
            .count()
    }

    pub fn divergent_count(&self) -> usize {
        self.comparisons.len() - self.correct_count()
    }

    fn with_status(&self, status: Status) -> Vec<&CreditorComparison> {
        self.comparisons
            .iter()
            .filter(|c| c.status == status)
            .collect()
    }
}

/// Tunables of the comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationRules {
    pub tolerance: f64,
    pub mask_levels: usize,
    pub delimiter: char,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            tolerance: 0.01,
            mask_levels: 5,
            delimiter: ';',
        }
    }
}
