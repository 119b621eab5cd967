//! Contact list ingestion from CSV files or plain one-number-per-line text.

use std::io::Read;
use std::path::Path;

use crate::domain::{Attributes, Contact, derive_name_attributes};

#[derive(Debug, thiserror::Error)]
pub enum ContactsError {
    #[error("failed to read contacts: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("column {column:?} not found (available: {available})")]
    MissingColumn { column: String, available: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactFormat {
    /// Header row plus one contact per row.
    Csv,
    /// One phone number per line.
    Lines,
}

impl ContactFormat {
    /// `.csv` files are tabular; anything else is read line by line.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Self::Csv,
            _ => Self::Lines,
        }
    }
}

/// Read contacts from a CSV source.
///
/// Every column becomes an attribute of the contact. When `name_column` is given,
/// `name` and `username` are derived from it.
pub fn read_csv<R: Read>(
    reader: R,
    phone_column: &str,
    name_column: Option<&str>,
) -> Result<Vec<Contact>, ContactsError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = reader.headers()?.clone();

    let position = |column: &str| {
        headers
            .iter()
            .position(|header| header.trim() == column)
            .ok_or_else(|| ContactsError::MissingColumn {
                column: column.to_owned(),
                available: headers.iter().collect::<Vec<_>>().join(", "),
            })
    };
    let phone_idx = position(phone_column)?;
    if let Some(name_column) = name_column {
        position(name_column)?;
    }

    let mut contacts = Vec::new();
    for row in reader.records() {
        let row = row?;
        let mut attributes: Attributes = headers
            .iter()
            .zip(row.iter())
            .map(|(header, value)| (header.trim(), value.trim()))
            .collect();
        if let Some(name_column) = name_column {
            derive_name_attributes(&mut attributes, name_column);
        }
        let phone = row.get(phone_idx).unwrap_or("").trim();
        contacts.push(Contact::with_attributes(phone, attributes));
    }
    Ok(contacts)
}

/// Read one phone number per line; blank lines are skipped.
pub fn read_lines(text: &str) -> Vec<Contact> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(Contact::new)
        .collect()
}

/// Read contacts from `path`, choosing the format from its extension.
pub fn load(
    path: &Path,
    phone_column: &str,
    name_column: Option<&str>,
) -> Result<Vec<Contact>, ContactsError> {
    match ContactFormat::from_path(path) {
        ContactFormat::Csv => read_csv(std::fs::File::open(path)?, phone_column, name_column),
        ContactFormat::Lines => Ok(read_lines(&std::fs::read_to_string(path)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_rows_become_contacts_with_attributes() {
        let data = "phone,Full Name,order\n(555) 123-4567,Jane Doe,A-1\n5557654321,Madonna,A-2\n";
        let contacts = read_csv(data.as_bytes(), "phone", Some("Full Name")).unwrap();

        assert_eq!(contacts.len(), 2);
        assert_eq!(contacts[0].raw_phone(), "(555) 123-4567");
        assert_eq!(contacts[0].attributes().get("order"), Some("A-1"));
        assert_eq!(contacts[0].attributes().get("name"), Some("Jane"));
        assert_eq!(contacts[0].attributes().get("username"), Some("Jane"));
        assert_eq!(contacts[1].attributes().get("name"), Some("Madonna"));
    }

    #[test]
    fn csv_without_name_column_keeps_raw_columns_only() {
        let data = "mobile,city\n5551234567,Oslo\n";
        let contacts = read_csv(data.as_bytes(), "mobile", None).unwrap();
        assert_eq!(contacts[0].attributes().get("city"), Some("Oslo"));
        assert_eq!(contacts[0].attributes().get("name"), None);
    }

    #[test]
    fn csv_short_rows_yield_empty_phone() {
        let data = "name,phone\nJane\n";
        let contacts = read_csv(data.as_bytes(), "phone", None).unwrap();
        assert_eq!(contacts[0].raw_phone(), "");
    }

    #[test]
    fn csv_missing_column_is_reported() {
        let data = "mobile,city\n5551234567,Oslo\n";
        let err = read_csv(data.as_bytes(), "phone", None).unwrap_err();
        match err {
            ContactsError::MissingColumn { column, available } => {
                assert_eq!(column, "phone");
                assert_eq!(available, "mobile, city");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = read_csv(data.as_bytes(), "mobile", Some("name")).unwrap_err();
        assert!(matches!(err, ContactsError::MissingColumn { .. }));
    }

    #[test]
    fn lines_are_trimmed_and_blank_lines_skipped() {
        let contacts = read_lines("5551234567\n\n  (555) 765-4321  \r\n   \n");
        let phones: Vec<_> = contacts.iter().map(Contact::raw_phone).collect();
        assert_eq!(phones, vec!["5551234567", "(555) 765-4321"]);
        assert!(contacts.iter().all(|c| c.attributes().is_empty()));
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(ContactFormat::from_path(Path::new("list.csv")), ContactFormat::Csv);
        assert_eq!(ContactFormat::from_path(Path::new("LIST.CSV")), ContactFormat::Csv);
        assert_eq!(ContactFormat::from_path(Path::new("list.txt")), ContactFormat::Lines);
        assert_eq!(ContactFormat::from_path(Path::new("numbers")), ContactFormat::Lines);
    }
}
