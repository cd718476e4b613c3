use crate::domain::model::LedgerRow;
use crate::utils::error::{Result, ValidatorError};
use std::borrow::Cow;
use std::collections::HashMap;

pub const COL_MASK: &str = "máscara";
pub const COL_DESCRIPTION: &str = "descrição";
pub const COL_BALANCE: &str = "saldo atual";
pub const COL_BALANCE_TYPE: &str = "tipo saldo";
/// Second "Tipo Saldo" column of the export, the one next to "Saldo Atual".
pub const COL_CURRENT_BALANCE_TYPE: &str = "tipo saldo.1";

/// Decodes the upload as UTF-8, falling back to Latin-1 for legacy exports.
pub fn decode(bytes: &[u8]) -> Cow<'_, str> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => {
            tracing::debug!("Input is not valid UTF-8, decoding as Latin-1");
            Cow::Owned(bytes.iter().map(|&b| b as char).collect())
        }
    }
}

/// Trims and lowercases header names, suffixing repeats with `.1`, `.2`, ...
pub fn normalize_headers<'a, I>(headers: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut names = Vec::new();

    for header in headers {
        let base = header.trim().to_lowercase();
        let count = seen.entry(base.clone()).or_insert(0);
        let name = if *count == 0 {
            base.clone()
        } else {
            format!("{}.{}", base, count)
        };
        *count += 1;
        names.push(name);
    }

    names
}

struct ColumnMap {
    mask: usize,
    description: usize,
    balance: usize,
    balance_type: usize,
}

impl ColumnMap {
    fn resolve(headers: &[String]) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| ValidatorError::MissingColumn {
                    column: name.to_string(),
                })
        };

        let balance_type = find(COL_CURRENT_BALANCE_TYPE).or_else(|_| find(COL_BALANCE_TYPE))?;

        Ok(Self {
            mask: find(COL_MASK)?,
            description: find(COL_DESCRIPTION)?,
            balance: find(COL_BALANCE)?,
            balance_type,
        })
    }
}

fn cell(record: &csv::StringRecord, index: usize) -> Option<String> {
    record
        .get(index)
        .filter(|value| !value.trim().is_empty())
        .map(str::to_string)
}

/// Reads the trial-balance CSV into raw rows.
pub fn read_rows(bytes: &[u8], delimiter: char) -> Result<Vec<LedgerRow>> {
    let text = decode(bytes);
    if text.trim().is_empty() {
        return Err(ValidatorError::EmptyInput);
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = normalize_headers(reader.headers()?.iter());
    tracing::debug!("Input columns: {:?}", headers);
    let columns = ColumnMap::resolve(&headers)?;

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        rows.push(LedgerRow {
            line: index + 1,
            mask: cell(&record, columns.mask),
            description: cell(&record, columns.description),
            balance: cell(&record, columns.balance),
            balance_type: cell(&record, columns.balance_type),
        });
    }

    Ok(rows)
}
