//! `tfc-ops plan validate`

use anyhow::Result;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{ErrorCode, OpsError};
use crate::migration::{MigrationError, PlanReader};

/// Per-row verdicts for a plan file
#[derive(Debug, Default)]
pub struct PlanValidation {
    pub lines: Vec<String>,
    pub valid: usize,
    pub malformed: usize,
}

pub fn validate_plan<R: Read>(reader: PlanReader<R>) -> Result<PlanValidation, MigrationError> {
    let mut summary = PlanValidation::default();

    for entry in reader {
        let entry = entry?;
        match entry.plan {
            Ok(plan) => {
                summary.valid += 1;
                summary.lines.push(format!(
                    "row {}: ok {}/{} -> {}/{}",
                    entry.row, plan.legacy_org, plan.legacy_env, plan.new_org, plan.new_workspace
                ));
            }
            Err(MigrationError::MalformedRow { reason, .. }) => {
                summary.malformed += 1;
                summary
                    .lines
                    .push(format!("row {}: malformed: {}", entry.row, reason));
            }
            Err(other) => return Err(other),
        }
    }
    Ok(summary)
}

pub fn run_plan_validate(path: &Path) -> Result<()> {
    let reader: PlanReader<File> = PlanReader::open(path).map_err(OpsError::from)?;
    let summary = validate_plan(reader).map_err(OpsError::from)?;

    for line in &summary.lines {
        println!("{line}");
    }

    if summary.malformed > 0 {
        return Err(OpsError::plan_with_code(
            ErrorCode::PLAN_MALFORMED_ROW,
            format!(
                "{} of {} rows are malformed",
                summary.malformed,
                summary.malformed + summary.valid
            ),
            None,
        )
        .into());
    }

    println!("{} rows ready to migrate", summary.valid);
    Ok(())
}
