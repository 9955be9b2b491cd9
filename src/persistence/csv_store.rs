//! Flat-file listing history.
//!
//! The file is UTF-8, optionally BOM-prefixed, with one header row. Only the
//! six observed columns are read back; derived columns are written for
//! humans and recomputed on load.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};

use crate::domain::profit::{self, ProfitBreakdown};
use crate::domain::{Admission, Listing, ParameterSet, RawListing, admit_batch};
use crate::error::ResearchError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Columns read back on load; an existing file must carry all of them.
const OBSERVED_COLUMNS: usize = 6;

/// Header written to a new file.
pub const CSV_HEADER: [&str; 9] = [
    "timestamp",
    "keyword",
    "name",
    "price",
    "sales",
    "shop_rating",
    "price_jpy",
    "estimated_cost_jpy",
    "estimated_profit_jpy",
];

/// Result of reading the history file.
#[derive(Debug)]
pub struct CsvLoad {
    /// Admitted rows as one batch, plus the rows that failed validation.
    pub admission: Admission,
    /// Rows the CSV reader could not tokenize at all.
    pub unreadable_rows: usize,
}

/// Reads and appends the listing history file.
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    /// Store backed by `path`. The file need not exist yet.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads every row as a single batch.
    ///
    /// A missing file yields an empty batch. Rows failing validation are
    /// returned in the admission rather than aborting the load. The batch is
    /// stamped with the newest row timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`ResearchError::Persistence`] if the file exists but cannot
    /// be read or has an unreadable header.
    pub fn load(&self) -> Result<CsvLoad, ResearchError> {
        let now = chrono::Local::now().naive_local();
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "no history file, starting empty");
                return Ok(CsvLoad {
                    admission: admit_batch(&Vec::<RawListing>::new(), now),
                    unreadable_rows: 0,
                });
            }
            Err(err) => return Err(err.into()),
        };
        let content = decode_content(&bytes);

        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .trim(Trim::Headers)
            .from_reader(content.as_bytes());
        let columns = ColumnMap::new(reader.headers()?);

        let mut raws = Vec::new();
        let mut unreadable_rows = 0;
        for (row, result) in reader.records().enumerate() {
            match result {
                Ok(record) => raws.push(columns.raw(&record)),
                Err(err) => {
                    unreadable_rows += 1;
                    tracing::warn!(row, error = %err, "skipping unreadable csv row");
                }
            }
        }

        let mut admission = admit_batch(&raws, now);
        if let Some(latest) = admission.batch.listings.iter().map(Listing::timestamp).max() {
            admission.batch.fetched_at = latest;
        }
        tracing::info!(
            path = %self.path.display(),
            admitted = admission.batch.len(),
            rejected = admission.rejected_count(),
            unreadable_rows,
            "history loaded"
        );
        Ok(CsvLoad {
            admission,
            unreadable_rows,
        })
    }

    /// Appends `listings`, never rewriting existing rows.
    ///
    /// Values are placed under the existing header by column name; columns
    /// this crate does not know are left empty. A new or empty file gets a
    /// BOM and [`CSV_HEADER`]. Derived columns are rounded to whole units.
    ///
    /// # Errors
    ///
    /// Returns [`ResearchError::Persistence`] on any I/O or CSV failure, or
    /// when the existing header lacks one of the observed columns. Nothing
    /// is written in that case.
    pub fn append(&self, listings: &[Listing], params: &ParameterSet) -> Result<usize, ResearchError> {
        if listings.is_empty() {
            return Ok(0);
        }
        let existing = self.existing_layout()?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let header: Vec<String> = match existing {
            Some(layout) => {
                if !layout.ends_with_newline {
                    file.write_all(b"\n")?;
                }
                layout.header
            }
            None => {
                file.write_all(UTF8_BOM)?;
                let header: Vec<String> = CSV_HEADER.iter().map(ToString::to_string).collect();
                let mut writer = WriterBuilder::new().has_headers(false).from_writer(&mut file);
                writer.write_record(&header)?;
                writer.flush()?;
                header
            }
        };

        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        for listing in listings {
            let row = PersistedRow::new(listing, params);
            writer.write_record(header.iter().map(|column| row.value(column)))?;
        }
        writer.flush()?;

        tracing::info!(path = %self.path.display(), rows = listings.len(), "history appended");
        Ok(listings.len())
    }

    /// Header and trailing-newline state of a non-empty existing file.
    fn existing_layout(&self) -> Result<Option<Layout>, ResearchError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let content = decode_content(&bytes);
        if content.trim().is_empty() {
            return Ok(None);
        }
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .trim(Trim::Headers)
            .from_reader(content.as_bytes());
        let header: Vec<String> = reader.headers()?.iter().map(ToString::to_string).collect();
        let missing: Vec<&str> = CSV_HEADER
            .iter()
            .take(OBSERVED_COLUMNS)
            .filter(|column| !header.iter().any(|h| h == *column))
            .copied()
            .collect();
        if !missing.is_empty() {
            return Err(ResearchError::Persistence(format!(
                "{} is missing columns: {}",
                self.path.display(),
                missing.join(", ")
            )));
        }
        Ok(Some(Layout {
            header,
            ends_with_newline: content.ends_with('\n'),
        }))
    }
}

#[derive(Debug)]
struct Layout {
    header: Vec<String>,
    ends_with_newline: bool,
}

/// Strips a UTF-8 BOM and decodes, replacing invalid sequences.
fn decode_content(bytes: &[u8]) -> String {
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    String::from_utf8_lossy(body).into_owned()
}

/// Positions of the observed columns within a header row.
#[derive(Debug)]
struct ColumnMap {
    timestamp: Option<usize>,
    keyword: Option<usize>,
    name: Option<usize>,
    price: Option<usize>,
    sales: Option<usize>,
    shop_rating: Option<usize>,
}

impl ColumnMap {
    fn new(headers: &StringRecord) -> Self {
        let position = |name: &str| headers.iter().position(|h| h == name);
        Self {
            timestamp: position("timestamp"),
            keyword: position("keyword"),
            name: position("name"),
            price: position("price"),
            sales: position("sales"),
            shop_rating: position("shop_rating"),
        }
    }

    fn raw(&self, record: &StringRecord) -> RawListing {
        let cell = |index: Option<usize>| index.and_then(|i| record.get(i)).map(str::to_string);
        RawListing {
            timestamp: cell(self.timestamp),
            keyword: cell(self.keyword),
            name: cell(self.name),
            price: cell(self.price),
            sales: cell(self.sales),
            shop_rating: cell(self.shop_rating),
        }
    }
}

/// One listing rendered into persisted column values.
#[derive(Debug)]
struct PersistedRow {
    raw: RawListing,
    derived: ProfitBreakdown,
}

impl PersistedRow {
    fn new(listing: &Listing, params: &ParameterSet) -> Self {
        Self {
            raw: listing.to_raw(),
            derived: profit::derive(listing.price(), params),
        }
    }

    fn value(&self, column: &str) -> String {
        let text = |field: &Option<String>| field.clone().unwrap_or_default();
        match column {
            "timestamp" => text(&self.raw.timestamp),
            "keyword" => text(&self.raw.keyword),
            "name" => text(&self.raw.name),
            "price" => text(&self.raw.price),
            "sales" => text(&self.raw.sales),
            "shop_rating" => text(&self.raw.shop_rating),
            "price_jpy" => self.derived.price_converted.round().to_string(),
            "estimated_cost_jpy" => self.derived.estimated_cost.round().to_string(),
            "estimated_profit_jpy" => self.derived.estimated_profit.round().to_string(),
            _ => String::new(),
        }
    }
}
