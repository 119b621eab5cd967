//! CSV export of per-recipient outcomes.

use std::io::Write;

use chrono::{DateTime, Local};

use crate::domain::DispatchOutcome;

pub const HEADERS: [&str; 8] = [
    "Name",
    "Original Number",
    "Formatted Number",
    "Content Preview",
    "Status",
    "Message ID",
    "Error",
    "Timestamp",
];

const PREVIEW_CHARS: usize = 50;
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Write one row per outcome, in order, after a header row.
pub fn write_results_csv<W: Write>(
    writer: W,
    outcomes: &[DispatchOutcome],
) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(HEADERS)?;
    for outcome in outcomes {
        let preview = content_preview(&outcome.rendered_content);
        let timestamp = outcome.sent_at.format(TIMESTAMP_FORMAT).to_string();
        writer.write_record([
            outcome.name.as_deref().unwrap_or(""),
            outcome.recipient.original(),
            outcome.recipient.canonical(),
            preview.as_str(),
            outcome.status_label(),
            outcome.provider_message_id.as_deref().unwrap_or("N/A"),
            outcome.error_detail.as_deref().unwrap_or(""),
            timestamp.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// First 50 characters of `content`, with `...` appended when cut.
pub fn content_preview(content: &str) -> String {
    let mut chars = content.chars();
    let preview: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{preview}...")
    } else {
        preview
    }
}

/// `sms_results_YYYYMMDD_HHMMSS.csv` for the given moment.
pub fn default_results_file_name(now: DateTime<Local>) -> String {
    format!("sms_results_{}.csv", now.format("%Y%m%d_%H%M%S"))
}
