//! Scenario tests for record-to-row projection, column reconciliation, and
//! the tabular container they run against.

use serde_json::json;
use tabula::describe::{describe, FieldSpec};
use tabula::errors::ErrorKind;
use tabula::project::{make_columns, populate_row, project_to_row, reconcile_columns};
use tabula::table::{Column, Table};
use tabula::value::{Value, ValueKind};
use tabula::TabulaResult;

#[cfg(test)]
mod projection_flow_tests {
    use super::*;

    #[test]
    fn test_projection_creates_columns_in_declaration_order() -> TabulaResult<()> {
        let mut table = Table::new();
        let alice = json!({"Name": "Alice", "Age": 30});

        let row = project_to_row(&alice, &mut table)?.cloned();

        assert_eq!(table.column_names(), vec!["Name", "Age"]);
        assert_eq!(table.column(0).map(Column::kind), Some(ValueKind::Str));
        assert_eq!(table.column(1).map(Column::kind), Some(ValueKind::Int));

        let row = row.expect("a row should be appended");
        assert_eq!(row.get("Name"), Some(&Value::Str("Alice".to_string())));
        assert_eq!(row.get("Age"), Some(&Value::Int(30)));
        assert_eq!(table.row_count(), 1);
        Ok(())
    }

    #[test]
    fn test_matching_column_is_reused_for_later_sources() -> TabulaResult<()> {
        let mut table = Table::new();
        project_to_row(&json!({"Name": "Alice", "Age": 30}), &mut table)?;
        project_to_row(&json!({"Name": "Bob"}), &mut table)?;

        assert_eq!(table.column_count(), 2);
        assert_eq!(table.row_count(), 2);

        let second = table.row(1).expect("second row");
        assert_eq!(second.get("Name"), Some(&Value::Str("Bob".to_string())));
        // Columns the source does not cover stay Nil.
        assert_eq!(second.get("Age"), Some(&Value::Nil));
        Ok(())
    }

    #[test]
    fn test_source_without_fields_projects_nothing() -> TabulaResult<()> {
        let mut table = Table::new();
        table.push_column(Column::new("Name", ValueKind::Str))?;

        assert_eq!(project_to_row(&json!(42), &mut table)?, None);
        assert_eq!(project_to_row(&json!([1, 2]), &mut table)?, None);
        assert_eq!(project_to_row(&json!(null), &mut table)?, None);

        assert_eq!(table.column_count(), 1);
        assert_eq!(table.row_count(), 0);
        Ok(())
    }

    #[test]
    fn test_projecting_twice_appends_two_identical_rows() -> TabulaResult<()> {
        let mut table = Table::new();
        let source = json!({"Name": "Alice", "Age": 30});
        project_to_row(&source, &mut table)?;
        project_to_row(&source, &mut table)?;

        assert_eq!(table.column_count(), 2);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.row(0), table.row(1));
        Ok(())
    }

    #[test]
    fn test_serialize_based_records_project_like_json() -> TabulaResult<()> {
        #[derive(serde::Serialize)]
        struct Person {
            name: String,
            age: i64,
        }

        let person = Person {
            name: "Alice".to_string(),
            age: 30,
        };
        let record = describe(&person)?;

        let mut table = Table::new();
        project_to_row(&record, &mut table)?;
        assert_eq!(table.column_names(), vec!["name", "age"]);
        assert_eq!(
            table.first_row().and_then(|row| row.get("age")),
            Some(&Value::Int(30))
        );
        Ok(())
    }

    #[test]
    fn test_make_columns_mirrors_field_writability() {
        let fields = vec![
            FieldSpec::new("Name", ValueKind::Str),
            FieldSpec::new("Id", ValueKind::Int).read_only(),
        ];
        let columns = make_columns(&fields);
        assert_eq!(columns.len(), 2);
        assert!(!columns[0].is_read_only());
        assert!(columns[1].is_read_only());
    }
}

#[cfg(test)]
mod reconciliation_tests {
    use super::*;

    #[test]
    fn test_kind_collision_mints_a_suffixed_column_with_caption() -> TabulaResult<()> {
        let mut table = Table::new();
        table.push_column(Column::new("Name", ValueKind::Int))?;

        project_to_row(&json!({"Name": "Carl"}), &mut table)?;

        assert_eq!(table.column_names(), vec!["Name", "Name1"]);
        let renamed = table.column_by_name("Name1").expect("renamed column");
        assert_eq!(renamed.kind(), ValueKind::Str);
        assert_eq!(renamed.caption(), Some("Name"));

        // The original column is untouched.
        let original = table.column_by_name("Name").expect("original column");
        assert_eq!(original.kind(), ValueKind::Int);
        assert_eq!(original.caption(), None);

        let row = table.first_row().expect("row");
        assert_eq!(row.get("Name1"), Some(&Value::Str("Carl".to_string())));
        assert_eq!(row.get("Name"), Some(&Value::Nil));
        Ok(())
    }

    #[test]
    fn test_caption_drives_population_of_reconciled_columns() -> TabulaResult<()> {
        let mut table = Table::new();
        table.push_column(Column::new("Name", ValueKind::Int))?;
        project_to_row(&json!({"Name": "Carl"}), &mut table)?;
        project_to_row(&json!({"Name": "Dora"}), &mut table)?;

        // The second string source reuses the suffixed column instead of
        // minting another one.
        assert_eq!(table.column_names(), vec!["Name", "Name1"]);
        assert_eq!(table.row_count(), 2);
        let second = table.row(1).expect("second row");
        assert_eq!(second.get("Name1"), Some(&Value::Str("Dora".to_string())));
        Ok(())
    }

    #[test]
    fn test_prefix_relatives_of_matching_kind_are_reused() -> TabulaResult<()> {
        let mut table = Table::new();
        table.push_column(Column::new("NameFull", ValueKind::Str))?;

        project_to_row(&json!({"Name": "Alice"}), &mut table)?;

        // "NameFull" starts with "Name" and shares its kind, so no new
        // column is created. Population reads the reused column's own name,
        // which this source does not expose, so the cell stays Nil.
        assert_eq!(table.column_names(), vec!["NameFull"]);
        assert_eq!(table.row_count(), 1);
        let row = table.first_row().expect("row");
        assert_eq!(row.get("NameFull"), Some(&Value::Nil));
        Ok(())
    }

    #[test]
    fn test_suffix_collision_surfaces_a_typed_error() {
        let mut table = Table::new();
        table.push_column(Column::new("Name1", ValueKind::Int)).unwrap();
        table.push_column(Column::new("Name2", ValueKind::Int)).unwrap();

        // The candidate has two mismatched relatives, so the rename targets
        // "Name2", a name the table already holds.
        let candidates = vec![Column::new("Name", ValueKind::Str)];
        let err = reconcile_columns(&mut table, &candidates).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(err.name(), Some("column"));
        assert_eq!(table.column_count(), 2);
    }

    #[test]
    fn test_stage_preconditions() {
        let mut table = Table::new();

        let err = reconcile_columns(&mut table, &[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal);

        let mut row = table.new_row();
        let err = populate_row(&mut table, &mut row, &json!({}), &[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOperation);
        assert_eq!(err.name(), Some("targets"));
    }

    #[test]
    fn test_missing_source_fields_leave_cells_nil() -> TabulaResult<()> {
        let mut table = Table::new();
        table.push_column(Column::new("Ghost", ValueKind::Str))?;

        let mut row = table.new_row();
        let source = json!({"Other": 1});
        populate_row(&mut table, &mut row, &source, &[0])?;

        assert_eq!(row.get("Ghost"), Some(&Value::Nil));
        table.add_row(row)?;
        Ok(())
    }
}

#[cfg(test)]
mod container_tests {
    use super::*;

    #[test]
    fn test_read_only_columns_accept_projection_and_keep_their_flag() -> TabulaResult<()> {
        let mut table = Table::new();
        table.push_column(Column::new("Name", ValueKind::Str).read_only())?;

        project_to_row(&json!({"Name": "Eve"}), &mut table)?;

        assert!(table.column(0).expect("column").is_read_only());
        let row = table.first_row().expect("row");
        assert_eq!(row.get("Name"), Some(&Value::Str("Eve".to_string())));
        Ok(())
    }

    #[test]
    fn test_read_only_flag_is_restored_when_population_fails() {
        let mut table = Table::new();
        table
            .push_column(Column::new("Count", ValueKind::Int).read_only())
            .unwrap();

        let mut row = table.new_row();
        let source = json!({"Count": "not a number"});
        let err = populate_row(&mut table, &mut row, &source, &[0]).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert!(table.column(0).unwrap().is_read_only());
    }

    #[test]
    fn test_duplicate_column_names_are_rejected() {
        let mut table = Table::new();
        table.push_column(Column::new("Name", ValueKind::Str)).unwrap();

        let err = table
            .push_column(Column::new("Name", ValueKind::Int))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(err.name(), Some("column"));
    }

    #[test]
    fn test_add_row_validates_against_the_target_table() {
        let mut donor = Table::new();
        donor.push_column(Column::new("Name", ValueKind::Int)).unwrap();
        let mut row = donor.new_row();
        row.set_checked(donor.column(0).unwrap(), Value::Int(5))
            .unwrap();

        // Unknown column name.
        let mut other = Table::new();
        other
            .push_column(Column::new("Different", ValueKind::Int))
            .unwrap();
        let err = other.add_row(row.clone()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOperation);

        // Same name, conflicting kind.
        let mut conflicting = Table::new();
        conflicting
            .push_column(Column::new("Name", ValueKind::Str))
            .unwrap();
        let err = conflicting.add_row(row).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_first_row_and_rendering() -> TabulaResult<()> {
        let mut table = Table::new();
        assert!(table.first_row().is_none());
        assert_eq!(table.to_string(), "(empty table)");

        project_to_row(&json!({"Name": "Alice", "Age": 30}), &mut table)?;
        project_to_row(&json!({"Name": "Bob", "Age": 41}), &mut table)?;

        let first = table.first_row().expect("first row");
        assert_eq!(first.get("Name"), Some(&Value::Str("Alice".to_string())));

        let rendered = table.to_string();
        assert!(rendered.contains("Name"));
        assert!(rendered.contains("Age"));
        assert!(rendered.contains("Alice"));
        assert!(rendered.contains("41"));
        Ok(())
    }
}
