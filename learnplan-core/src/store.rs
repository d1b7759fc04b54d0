//! CSV persistence for the schedule.
//!
//! The header row is kept as read so that saving writes the columns back
//! in their original order, including columns this crate does not use.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PlanError, PlanResult};
use crate::row::ScheduleRow;

/// Header labels of the columns the schedule is made of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Columns {
    pub year: String,
    pub month: String,
    pub week: String,
    pub content: String,
    pub project: String,
    pub process: String,
    pub claude_usage: String,
    pub url: String,
}

impl Default for Columns {
    fn default() -> Self {
        Columns {
            year: "年度".into(),
            month: "月".into(),
            week: "週".into(),
            content: "学習内容".into(),
            project: "実践課題".into(),
            process: "開発工程".into(),
            claude_usage: "Claude活用法".into(),
            url: "メモ・参考URL".into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Year,
    Month,
    Week,
    Content,
    Project,
    Process,
    ClaudeUsage,
    Url,
}

impl Field {
    const ALL: [Field; 8] = [
        Field::Year,
        Field::Month,
        Field::Week,
        Field::Content,
        Field::Project,
        Field::Process,
        Field::ClaudeUsage,
        Field::Url,
    ];

    fn label(self, columns: &Columns) -> &str {
        match self {
            Field::Year => &columns.year,
            Field::Month => &columns.month,
            Field::Week => &columns.week,
            Field::Content => &columns.content,
            Field::Project => &columns.project,
            Field::Process => &columns.process,
            Field::ClaudeUsage => &columns.claude_usage,
            Field::Url => &columns.url,
        }
    }

    fn value(self, row: &ScheduleRow) -> String {
        match self {
            Field::Year => row.year.to_string(),
            Field::Month => row.month.to_string(),
            Field::Week => row.week.to_string(),
            Field::Content => row.content.clone(),
            Field::Project => row.project.clone(),
            Field::Process => row.process.clone(),
            Field::ClaudeUsage => row.claude_usage.clone(),
            Field::Url => row.url.clone(),
        }
    }
}

/// The ordered plan plus the column layout it was read with.
#[derive(Debug, Clone)]
pub struct Schedule {
    pub rows: Vec<ScheduleRow>,
    headers: Vec<String>,
    columns: Columns,
}

impl Schedule {
    /// Create an empty schedule using the default column order.
    pub fn new(columns: Columns) -> Self {
        let headers = Field::ALL
            .iter()
            .map(|f| f.label(&columns).to_string())
            .collect();

        Schedule {
            rows: Vec::new(),
            headers,
            columns,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn columns(&self) -> &Columns {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Read a schedule from a CSV file with a header row.
    pub fn load(path: &Path, columns: &Columns) -> PlanResult<Self> {
        if !path.exists() {
            return Err(PlanError::FileNotFound(path.to_path_buf()));
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)?;

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .enumerate()
            .map(|(i, h)| {
                if i == 0 {
                    h.trim_start_matches('\u{feff}').to_string()
                } else {
                    h.to_string()
                }
            })
            .collect();

        let mut layout = Vec::with_capacity(Field::ALL.len());
        for field in Field::ALL {
            let label = field.label(columns);
            let position = headers.iter().position(|h| h == label).ok_or_else(|| {
                PlanError::Parse {
                    line: 1,
                    message: format!("missing required column '{}'", label),
                }
            })?;
            layout.push((field, position));
        }

        let mut rows = Vec::new();

        for record in reader.records() {
            let record = record.map_err(record_error)?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            let get = |field: Field| cell(&record, &layout, field, columns, line);

            let mut row = ScheduleRow::new(
                parse_int(get(Field::Year)?, Field::Year.label(columns), line)?,
                parse_int(get(Field::Month)?, Field::Month.label(columns), line)?,
                parse_int(get(Field::Week)?, Field::Week.label(columns), line)?,
                get(Field::Content)?,
            );
            row.project = get(Field::Project)?.to_string();
            row.process = get(Field::Process)?.to_string();
            row.claude_usage = get(Field::ClaudeUsage)?.to_string();
            row.url = get(Field::Url)?.to_string();

            for (i, header) in headers.iter().enumerate() {
                if !layout.iter().any(|(_, p)| *p == i) {
                    let value = record.get(i).unwrap_or_default();
                    row.extra.insert(header.clone(), value.to_string());
                }
            }

            rows.push(row);
        }

        log::debug!("Loaded {} rows from {}", rows.len(), path.display());

        Ok(Schedule {
            rows,
            headers,
            columns: columns.clone(),
        })
    }

    /// Write the schedule back, replacing `path` only once the new
    /// contents are fully on disk.
    pub fn save(&self, path: &Path) -> PlanResult<()> {
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;

        {
            let mut writer = csv::WriterBuilder::new()
                .terminator(csv::Terminator::Any(b'\n'))
                .from_writer(&mut tmp);
            writer.write_record(&self.headers)?;

            for row in &self.rows {
                let record: Vec<String> = self
                    .headers
                    .iter()
                    .map(|header| self.cell_value(row, header))
                    .collect();
                writer.write_record(&record)?;
            }

            writer.flush()?;
        }

        tmp.as_file_mut().sync_all()?;
        tmp.persist(path).map_err(|e| PlanError::Io(e.error))?;

        log::debug!("Saved {} rows to {}", self.rows.len(), path.display());

        Ok(())
    }

    fn cell_value(&self, row: &ScheduleRow, header: &str) -> String {
        Field::ALL
            .iter()
            .find(|f| f.label(&self.columns) == header)
            .map(|f| f.value(row))
            .or_else(|| row.extra.get(header).cloned())
            .unwrap_or_default()
    }
}

fn cell<'r>(
    record: &'r csv::StringRecord,
    layout: &[(Field, usize)],
    field: Field,
    columns: &Columns,
    line: u64,
) -> PlanResult<&'r str> {
    layout
        .iter()
        .find(|(f, _)| *f == field)
        .and_then(|(_, position)| record.get(*position))
        .ok_or_else(|| PlanError::Parse {
            line,
            message: format!("missing value for column '{}'", field.label(columns)),
        })
}

/// A row with the wrong number of fields is reported against its line.
fn record_error(e: csv::Error) -> PlanError {
    match e.kind() {
        csv::ErrorKind::UnequalLengths {
            pos,
            expected_len,
            len,
        } => PlanError::Parse {
            line: pos.as_ref().map(|p| p.line()).unwrap_or(0),
            message: format!("expected {} fields, found {}", expected_len, len),
        },
        _ => PlanError::Csv(e),
    }
}

fn parse_int<T: std::str::FromStr>(value: &str, column: &str, line: u64) -> PlanResult<T> {
    value.trim().parse().map_err(|_| PlanError::Parse {
        line,
        message: format!("column '{}' must be an integer, got '{}'", column, value),
    })
}
