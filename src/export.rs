// 🧾 IRS Form 8949 Export
//
// One row per disposal. Part I holds short-term sales, Part II long-term;
// rows keep input order within each part. The exported CSV is fingerprinted
// with SHA-256 so a downloaded copy can be matched to its export record.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::io::Write;
use tracing::info;

use crate::error::Result;
use crate::reports::{Disposal, HoldingTerm};

// ============================================================================
// FORM ROWS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Form8949Part {
    /// Short-term transactions
    #[serde(rename = "I")]
    PartI,
    /// Long-term transactions
    #[serde(rename = "II")]
    PartII,
}

impl From<HoldingTerm> for Form8949Part {
    fn from(term: HoldingTerm) -> Self {
        match term {
            HoldingTerm::ShortTerm => Form8949Part::PartI,
            HoldingTerm::LongTerm => Form8949Part::PartII,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Form8949Row {
    #[serde(rename = "Part")]
    pub part: Form8949Part,

    #[serde(rename = "(a) Description of property")]
    pub description: String,

    #[serde(rename = "(b) Date acquired", serialize_with = "irs_date")]
    pub date_acquired: NaiveDate,

    #[serde(rename = "(c) Date sold", serialize_with = "irs_date")]
    pub date_sold: NaiveDate,

    #[serde(rename = "(d) Proceeds", serialize_with = "dollars")]
    pub proceeds: f64,

    #[serde(rename = "(e) Cost basis", serialize_with = "dollars")]
    pub cost_basis: f64,

    #[serde(rename = "(h) Gain or (loss)", serialize_with = "dollars")]
    pub gain: f64,
}

impl From<&Disposal> for Form8949Row {
    fn from(d: &Disposal) -> Self {
        Form8949Row {
            part: d.term().into(),
            description: format!("{} {}", d.quantity, d.asset),
            date_acquired: d.acquired,
            date_sold: d.sold,
            proceeds: d.proceeds,
            cost_basis: d.cost_basis,
            gain: d.gain(),
        }
    }
}

fn irs_date<S: Serializer>(
    date: &NaiveDate,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&date.format("%m/%d/%Y").to_string())
}

fn dollars<S: Serializer>(amount: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("{:.2}", amount))
}

/// Part I rows first, then Part II
pub fn form_8949_rows(disposals: &[Disposal]) -> Vec<Form8949Row> {
    let mut rows: Vec<Form8949Row> = disposals.iter().map(Form8949Row::from).collect();
    // Stable: input order survives within a part
    rows.sort_by_key(|row| row.part);
    rows
}

/// Column headers, matching the `Form8949Row` serde renames
pub const FORM_8949_HEADERS: [&str; 7] = [
    "Part",
    "(a) Description of property",
    "(b) Date acquired",
    "(c) Date sold",
    "(d) Proceeds",
    "(e) Cost basis",
    "(h) Gain or (loss)",
];

pub fn write_form_8949<W: Write>(writer: W, rows: &[Form8949Row]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    // Serialized rows emit the header themselves; an empty form still gets one
    if rows.is_empty() {
        wtr.write_record(FORM_8949_HEADERS)?;
    }
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

// ============================================================================
// EXPORT RECORD
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRecord {
    pub id: String,
    pub form: String,
    pub tax_year: i32,
    pub generated_at: DateTime<Utc>,
    pub row_count: usize,
    pub short_term_rows: usize,
    pub long_term_rows: usize,
    /// Hex SHA-256 of the CSV bytes
    pub sha256: String,
}

impl ExportRecord {
    pub fn verify(&self, bytes: &[u8]) -> bool {
        digest(bytes) == self.sha256
    }
}

fn digest(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Build the Form 8949 CSV for disposals sold in `tax_year`
pub fn export_form_8949(disposals: &[Disposal], tax_year: i32) -> Result<(Vec<u8>, ExportRecord)> {
    use chrono::Datelike;

    let in_year: Vec<Disposal> = disposals
        .iter()
        .filter(|d| d.sold.year() == tax_year)
        .cloned()
        .collect();
    let rows = form_8949_rows(&in_year);

    let mut bytes = Vec::new();
    write_form_8949(&mut bytes, &rows)?;

    let short_term_rows = rows.iter().filter(|r| r.part == Form8949Part::PartI).count();
    let record = ExportRecord {
        id: uuid::Uuid::new_v4().to_string(),
        form: "8949".to_string(),
        tax_year,
        generated_at: Utc::now(),
        row_count: rows.len(),
        short_term_rows,
        long_term_rows: rows.len() - short_term_rows,
        sha256: digest(&bytes),
    };

    info!(
        export_id = %record.id,
        tax_year,
        rows = record.row_count,
        "generated Form 8949 export"
    );

    Ok((bytes, record))
}

// ============================================================================
// TESTS
// ============================================================================
