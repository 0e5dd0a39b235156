//! Batch plan parsing
//!
//! A plan is a CSV file whose first row is a header. Every following row
//! describes one legacy environment to migrate, in this column order:
//!
//! 1. legacy organization
//! 2. legacy environment
//! 3. new organization
//! 4. new workspace
//! 5. terraform version of the new workspace (e.g. `1.5.0`)
//! 6. VCS repository identifier (e.g. `myorg/myproject`)
//! 7. VCS branch the workspace follows
//! 8. directory holding the terraform configuration within the repository
//!
//! Rows are numbered as in the file: the header is row 1, the first plan
//! row is row 2.

use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::error::MigrationError;

pub const PLAN_FIELD_COUNT: usize = 8;

const FIELD_NAMES: [&str; PLAN_FIELD_COUNT] = [
    "legacy organization",
    "legacy environment",
    "new organization",
    "new workspace",
    "terraform version",
    "VCS repository",
    "VCS branch",
    "working directory",
];

/// One validated plan row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationPlan {
    pub legacy_org: String,
    pub legacy_env: String,
    pub new_org: String,
    pub new_workspace: String,
    pub terraform_version: String,
    pub vcs_repo: String,
    pub vcs_branch: String,
    pub working_dir: String,
}

impl MigrationPlan {
    /// Validate one raw record.
    ///
    /// Fails with [`MigrationError::MalformedRow`] when the record does not
    /// hold exactly eight fields or any field is blank.
    pub fn from_fields<S: AsRef<str>>(fields: &[S], row: usize) -> Result<Self, MigrationError> {
        if fields.len() != PLAN_FIELD_COUNT {
            return Err(MigrationError::MalformedRow {
                row,
                reason: format!(
                    "expected {} fields, found {}",
                    PLAN_FIELD_COUNT,
                    fields.len()
                ),
            });
        }

        if let Some(index) = fields.iter().position(|f| f.as_ref().trim().is_empty()) {
            return Err(MigrationError::MalformedRow {
                row,
                reason: format!(
                    "{} (column {}) must not be empty",
                    FIELD_NAMES[index],
                    index + 1
                ),
            });
        }

        let field = |i: usize| fields[i].as_ref().to_string();
        Ok(Self {
            legacy_org: field(0),
            legacy_env: field(1),
            new_org: field(2),
            new_workspace: field(3),
            terraform_version: field(4),
            vcs_repo: field(5),
            vcs_branch: field(6),
            working_dir: field(7),
        })
    }
}

/// One plan row as read from the file, valid or not
#[derive(Debug)]
pub struct PlanEntry {
    pub row: usize,
    pub plan: Result<MigrationPlan, MigrationError>,
}

/// Streams plan rows after discarding the header.
///
/// Yields `Err` only when the file itself cannot be read any further; a row
/// that fails validation comes back as an entry carrying its error.
pub struct PlanReader<R: Read> {
    records: csv::StringRecordsIntoIter<R>,
    row: usize,
}

impl PlanReader<File> {
    pub fn open(path: &Path) -> Result<Self, MigrationError> {
        let file = File::open(path).map_err(|e| MigrationError::PlanRead {
            message: format!("cannot open {}", path.display()),
            source: Some(csv::Error::from(e)),
        })?;
        Self::from_reader(file)
    }
}

impl<R: Read> PlanReader<R> {
    pub fn from_reader(reader: R) -> Result<Self, MigrationError> {
        let mut records = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader)
            .into_records();

        match records.next() {
            Some(Ok(_header)) => Ok(Self { records, row: 1 }),
            Some(Err(e)) => Err(MigrationError::PlanRead {
                message: "error reading first row of the plan".to_string(),
                source: Some(e),
            }),
            None => Err(MigrationError::PlanRead {
                message: "plan is empty, expected a header row".to_string(),
                source: None,
            }),
        }
    }
}

impl<R: Read> Iterator for PlanReader<R> {
    type Item = Result<PlanEntry, MigrationError>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.records.next()?;
        self.row += 1;
        let row = self.row;

        Some(match record {
            Ok(record) => {
                let fields: Vec<&str> = record.iter().collect();
                Ok(PlanEntry {
                    row,
                    plan: MigrationPlan::from_fields(&fields, row),
                })
            }
            Err(e) => Err(MigrationError::PlanRead {
                message: format!("error reading row {} of the plan", row),
                source: Some(e),
            }),
        })
    }
}
