//! Projection of record sources into table rows.
//!
//! The workflow runs in stages: derive column candidates from the source's
//! readable fields, reconcile them against the table's existing columns,
//! then create, populate, and append the row. Each stage is callable on its
//! own; [`project_to_row`] composes all of them.

use crate::describe::{Describable, FieldSpec};
use crate::errors::{internal, invalid_operation, TabulaResult};
use crate::table::{Column, Row, Table};

/// Derives column candidates from a source's field descriptions. A field
/// that is not writable at the source yields a read-only column.
pub fn make_columns(fields: &[FieldSpec]) -> Vec<Column> {
    fields
        .iter()
        .map(|field| {
            let column = Column::new(field.name(), field.kind());
            if field.is_writable() {
                column
            } else {
                column.read_only()
            }
        })
        .collect()
}

/// Reconciles candidate columns against the table's existing columns,
/// returning the target column index for each candidate.
///
/// Existing columns whose name starts with a candidate's name are its
/// relatives: same kind is a match, different kind is a mismatch. A
/// candidate with no relatives is appended as-is. A candidate with at least
/// one match reuses the first matching column; matching always wins over
/// creating a duplicate. A candidate with only mismatches is appended under
/// a suffixed name (the count of mismatched relatives), keeping the original
/// name as its caption.
///
/// Later candidates in the same batch see the columns appended by earlier
/// ones. Columns appended before a failure stay in the table.
pub fn reconcile_columns(table: &mut Table, candidates: &[Column]) -> TabulaResult<Vec<usize>> {
    if candidates.is_empty() {
        return Err(internal(
            "reconciliation requires at least one candidate column",
        ));
    }
    let mut targets = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let mut matching = Vec::new();
        let mut mismatched = Vec::new();
        for (index, existing) in table.columns().iter().enumerate() {
            if !existing.name().starts_with(candidate.name()) {
                continue;
            }
            if existing.kind() == candidate.kind() {
                matching.push(index);
            } else {
                mismatched.push(index);
            }
        }
        let target = if matching.is_empty() && mismatched.is_empty() {
            table.push_column(candidate.clone())?
        } else if let Some(&first) = matching.first() {
            first
        } else {
            let renamed =
                candidate.renamed(format!("{}{}", candidate.name(), mismatched.len()));
            table.push_column(renamed)?
        };
        targets.push(target);
    }
    Ok(targets)
}

/// Populates a detached row from the source, one target column at a time.
///
/// The source field read for a column is its caption when one is set,
/// otherwise its name; a source without that field leaves the cell `Nil`.
/// Each column's read-only flag is released for the duration of its own
/// value copy and restored afterwards, failed copies included.
pub fn populate_row<S>(
    table: &mut Table,
    row: &mut Row,
    source: &S,
    targets: &[usize],
) -> TabulaResult<()>
where
    S: Describable + ?Sized,
{
    if targets.is_empty() {
        return Err(invalid_operation(
            "cannot populate a row without target columns",
            Some("targets"),
        ));
    }
    for &index in targets {
        let release = table.release_read_only(index)?;
        let column = release.column();
        if let Some(value) = source.read_field(column.source_name()) {
            row.set_checked(column, value)?;
        }
    }
    Ok(())
}

/// Projects a record source into a new row appended to `table`.
///
/// Columns are derived from the source's readable fields and reconciled
/// against the table's existing columns before the row is created. A source
/// with no readable fields yields `Ok(None)` and leaves the table untouched.
///
/// # Examples
///
/// ```rust
/// use serde_json::json;
/// use tabula::project::project_to_row;
/// use tabula::table::Table;
///
/// let mut table = Table::new();
/// let record = json!({"Name": "Alice", "Age": 30});
/// let row = project_to_row(&record, &mut table).unwrap();
/// assert!(row.is_some());
/// assert_eq!(table.column_count(), 2);
/// assert_eq!(table.row_count(), 1);
/// ```
pub fn project_to_row<'t, S>(source: &S, table: &'t mut Table) -> TabulaResult<Option<&'t Row>>
where
    S: Describable + ?Sized,
{
    let candidates = make_columns(&source.fields());
    if candidates.is_empty() {
        return Ok(None);
    }
    let targets = reconcile_columns(table, &candidates)?;
    let mut row = table.new_row();
    populate_row(table, &mut row, source, &targets)?;
    table.add_row(row)?;
    Ok(table.rows().last())
}
