// 📤 CSV Exporter - Serialize registrations for download
// String fields quoted, numeric fields bare, members joined with "; "

use crate::registration::Registration;
use chrono::NaiveDate;

/// Fixed header row, in this exact column order.
pub const CSV_HEADERS: [&str; 9] = [
    "Team Name",
    "Event Type",
    "Team Size",
    "Team Lead",
    "Team Members",
    "Mobile",
    "Transaction ID",
    "Registration Fee",
    "Registration Date",
];

// ============================================================================
// EXPORT ERROR
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportError {
    /// Nothing to export; the caller rejects instead of producing an
    /// empty file.
    Empty,
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::Empty => write!(f, "no registrations to export"),
        }
    }
}

impl std::error::Error for ExportError {}

// ============================================================================
// CSV SERIALIZATION
// ============================================================================

/// Quote a string field, doubling any embedded quotes. Embedded newlines
/// are legal inside a quoted field (RFC 4180).
fn quoted(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn row(registration: &Registration) -> String {
    [
        quoted(&registration.team_name),
        quoted(registration.event_type.name()),
        registration.team_size.to_string(),
        quoted(&registration.team_lead),
        quoted(&registration.team_members.join("; ")),
        quoted(&registration.mobile),
        quoted(&registration.transaction_id),
        registration.registration_fee.to_string(),
        quoted(&registration.display_date()),
    ]
    .join(",")
}

/// Serialize records to CSV in input order. Callers pre-sort if order
/// matters for the download.
pub fn to_csv(records: &[Registration]) -> Result<String, ExportError> {
    if records.is_empty() {
        return Err(ExportError::Empty);
    }

    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(CSV_HEADERS.join(","));
    lines.extend(records.iter().map(row));
    Ok(lines.join("\n"))
}

/// Download filename for an export made on the given date.
pub fn suggested_filename(date: NaiveDate) -> String {
    format!("techmania2025-registrations-{}.csv", date.format("%Y-%m-%d"))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registration::{build, RawRegistration};
    use crate::selection::Selection;

    fn create_test_registration() -> Registration {
        let raw = RawRegistration {
            team_name: "Code Crusaders".to_string(),
            members: vec!["Asha Rao".to_string(), "Vikram Shetty".to_string()],
            mobile: "9876543210".to_string(),
            transaction_id: "TXN12345".to_string(),
        };
        build(&raw, &Selection::new()).unwrap()
    }

    #[test]
    fn test_empty_export_is_rejected() {
        assert_eq!(to_csv(&[]).unwrap_err(), ExportError::Empty);
    }

    #[test]
    fn test_single_record_exact_output() {
        let registration = create_test_registration();
        let csv = to_csv(std::slice::from_ref(&registration)).unwrap();

        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Team Name,Event Type,Team Size,Team Lead,Team Members,Mobile,Transaction ID,Registration Fee,Registration Date"
        );
        assert_eq!(
            lines.next().unwrap(),
            format!(
                "\"Code Crusaders\",\"combo\",2,\"Asha Rao\",\"Asha Rao; Vikram Shetty\",\"9876543210\",\"TXN12345\",479,\"{}\"",
                registration.display_date()
            )
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_rows_follow_input_order() {
        let mut first = create_test_registration();
        let mut second = create_test_registration();
        first.team_name = "First".to_string();
        second.team_name = "Second".to_string();

        let csv = to_csv(&[first, second]).unwrap();
        let lines: Vec<_> = csv.lines().collect();
        assert!(lines[1].starts_with("\"First\""));
        assert!(lines[2].starts_with("\"Second\""));
    }

    #[test]
    fn test_embedded_quotes_are_doubled() {
        let mut registration = create_test_registration();
        registration.team_name = "The \"A\" Team".to_string();

        let csv = to_csv(std::slice::from_ref(&registration)).unwrap();
        assert!(csv.contains("\"The \"\"A\"\" Team\""));
    }

    #[test]
    fn test_export_parses_back_with_csv_reader() {
        let mut registration = create_test_registration();
        registration.team_name = "Quote \"Club\"".to_string();

        let csv_text = to_csv(std::slice::from_ref(&registration)).unwrap();
        let mut reader = csv::Reader::from_reader(csv_text.as_bytes());

        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.len(), 9);
        assert_eq!(&headers[0], "Team Name");

        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(&record[0], "Quote \"Club\"");
        assert_eq!(&record[1], "combo");
        assert_eq!(&record[2], "2");
        assert_eq!(&record[4], "Asha Rao; Vikram Shetty");
        assert_eq!(&record[7], "479");
    }

    #[test]
    fn test_suggested_filename() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        assert_eq!(
            suggested_filename(date),
            "techmania2025-registrations-2025-03-09.csv"
        );
    }
}
