//! In-memory tabular container.
//!
//! A [`Table`] is an ordered list of [`Column`] definitions plus the
//! [`Row`]s that satisfy them. Column names are unique within a table, and
//! every stored value must satisfy its column's declared kind or be `Nil`.

use std::fmt;

use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

use crate::errors::{internal, invalid_argument, invalid_operation, type_mismatch, TabulaResult};
use crate::predicates::Countable;
use crate::value::{Value, ValueKind};

// ============================================================================
// COLUMN DEFINITIONS
// ============================================================================

/// Definition of a single table column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    name: String,
    kind: ValueKind,
    read_only: bool,
    expression: Option<String>,
    caption: Option<String>,
}

impl Column {
    /// Creates a writable column with the given name and kind.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tabula::table::Column;
    /// use tabula::value::ValueKind;
    /// let column = Column::new("Name", ValueKind::Str);
    /// assert_eq!(column.name(), "Name");
    /// assert!(!column.is_read_only());
    /// ```
    pub fn new(name: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            name: name.into(),
            kind,
            read_only: false,
            expression: None,
            caption: None,
        }
    }

    /// Marks the column as read-only.
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Attaches a display caption distinct from the column name.
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Attaches an expression string. Expressions are carried as opaque
    /// metadata and never evaluated.
    pub fn with_expression(mut self, expression: impl Into<String>) -> Self {
        self.expression = Some(expression.into());
        self
    }

    /// Returns a copy of this column under a new name, keeping the original
    /// name as the copy's caption.
    pub fn renamed(&self, name: impl Into<String>) -> Column {
        Column {
            name: name.into(),
            kind: self.kind,
            read_only: self.read_only,
            expression: self.expression.clone(),
            caption: Some(self.name.clone()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn expression(&self) -> Option<&str> {
        self.expression.as_deref()
    }

    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }

    /// The name population reads from the source: the caption when one is
    /// set, otherwise the column name.
    pub fn source_name(&self) -> &str {
        self.caption.as_deref().unwrap_or(&self.name)
    }
}

// ============================================================================
// ROWS
// ============================================================================

/// A single table row, keyed by column name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    values: im::HashMap<String, Value>,
}

impl Row {
    /// Returns the value stored under a column name, if any.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Stores a value under a column's name, enforcing the column's
    /// read-only flag and declared kind. `Nil` satisfies every kind.
    pub fn set_checked(&mut self, column: &Column, value: Value) -> TabulaResult<()> {
        if column.is_read_only() {
            return Err(invalid_operation(
                format!("column '{}' is read-only", column.name()),
                Some("column"),
            ));
        }
        if !value.is_nil() && value.kind() != column.kind() {
            return Err(type_mismatch(column.name(), column.kind(), value.kind()));
        }
        self.values.insert(column.name().to_string(), value);
        Ok(())
    }

    /// Iterates over the stored (name, value) pairs.
    pub fn values(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }
}

impl Countable for Row {
    fn count(&self) -> usize {
        self.values.len()
    }
}

// ============================================================================
// TABLE
// ============================================================================

/// An ordered set of column definitions plus the rows that satisfy them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Row>,
}

impl Table {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a column definition, returning its index.
    /// Column names are unique within a table.
    pub fn push_column(&mut self, column: Column) -> TabulaResult<usize> {
        if self.column_index(column.name()).is_some() {
            return Err(invalid_argument(
                format!("a column named '{}' already exists", column.name()),
                Some("column"),
            ));
        }
        self.columns.push(column);
        Ok(self.columns.len() - 1)
    }

    /// Returns the column definitions in declaration order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the column at `index`, if in range.
    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// Returns the column with the given name, if present.
    pub fn column_by_name(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name() == name)
    }

    /// Returns the index of the column with the given name, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.name() == name)
    }

    /// Returns the column names in declaration order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|column| column.name()).collect()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Returns the rows in insertion order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Returns the row at `index`, if in range.
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Returns the first row, if the table has any.
    pub fn first_row(&self) -> Option<&Row> {
        self.rows.first()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Creates a detached row with every column set to `Nil`. The row joins
    /// the table only through [`Table::add_row`].
    pub fn new_row(&self) -> Row {
        let values = self
            .columns
            .iter()
            .map(|column| (column.name().to_string(), Value::Nil))
            .collect();
        Row { values }
    }

    /// Appends a row after checking every stored value against its column.
    /// Values under names no column declares are rejected.
    pub fn add_row(&mut self, row: Row) -> TabulaResult<()> {
        for (name, value) in row.values() {
            let column = self.column_by_name(name).ok_or_else(|| {
                invalid_operation(
                    format!("row value targets unknown column '{}'", name),
                    Some("row"),
                )
            })?;
            if !value.is_nil() && value.kind() != column.kind() {
                return Err(type_mismatch(column.name(), column.kind(), value.kind()));
            }
        }
        self.rows.push(row);
        Ok(())
    }

    /// Temporarily clears a column's read-only flag. The saved flag is
    /// restored when the returned guard drops, early returns included.
    pub fn release_read_only(&mut self, index: usize) -> TabulaResult<ReadOnlyRelease<'_>> {
        let saved = match self.columns.get_mut(index) {
            Some(column) => {
                let saved = column.read_only;
                column.read_only = false;
                saved
            }
            None => {
                return Err(internal(format!("column index {} is out of range", index)));
            }
        };
        Ok(ReadOnlyRelease {
            table: self,
            index,
            saved,
        })
    }
}

impl Countable for Table {
    fn count(&self) -> usize {
        self.rows.len()
    }
}

/// Scoped release of a column's read-only flag, created by
/// [`Table::release_read_only`].
#[derive(Debug)]
pub struct ReadOnlyRelease<'a> {
    table: &'a mut Table,
    index: usize,
    saved: bool,
}

impl ReadOnlyRelease<'_> {
    /// The column under release. Its read-only flag reads as cleared for the
    /// guard's lifetime.
    pub fn column(&self) -> &Column {
        &self.table.columns[self.index]
    }
}

impl Drop for ReadOnlyRelease<'_> {
    fn drop(&mut self) {
        self.table.columns[self.index].read_only = self.saved;
    }
}

// ============================================================================
// RENDERING
// ============================================================================

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.columns.is_empty() || self.rows.is_empty() {
            return write!(f, "(empty table)");
        }
        let mut widths: Vec<usize> = Vec::with_capacity(self.columns.len());
        for column in &self.columns {
            let mut width = column.name().width();
            for row in &self.rows {
                if let Some(value) = row.get(column.name()) {
                    width = width.max(value.to_string().as_str().width());
                }
            }
            widths.push(width);
        }
        for (i, (column, width)) in self.columns.iter().zip(widths.iter().copied()).enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write_padded(f, column.name(), width)?;
        }
        writeln!(f)?;
        for (i, width) in widths.iter().copied().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", "-".repeat(width))?;
        }
        for row in &self.rows {
            writeln!(f)?;
            for (i, (column, width)) in self.columns.iter().zip(widths.iter().copied()).enumerate() {
                if i > 0 {
                    write!(f, " ")?;
                }
                let rendered = match row.get(column.name()) {
                    Some(value) => value.to_string(),
                    None => Value::Nil.to_string(),
                };
                write_padded(f, &rendered, width)?;
            }
        }
        Ok(())
    }
}

/// Left-aligns `text` to `width` using display width, not byte length.
fn write_padded(f: &mut fmt::Formatter<'_>, text: &str, width: usize) -> fmt::Result {
    let padding = width.saturating_sub(text.width());
    write!(f, "{}{}", text, " ".repeat(padding))
}
