//! DDL text emission.
//!
//! A script is laid out as: optional drop block, one `CREATE TABLE` block
//! per entity, then every entity's foreign keys as `ALTER TABLE` lines.
//! Constraints come last so that tables may reference tables defined later.

use tracing::debug;

use crate::format::{column_clause, id, id_list, indent_string};
use crate::model::{DataModel, Entity};
use crate::options::{Dbms, GenerateOptions};
use crate::resolve::{ForeignKeyConstraint, ModelIndex, resolve_foreign_keys};
use crate::writer::CodeWriter;

/// Render the complete script for a data model.
pub fn render_data_model(model: &DataModel, options: &GenerateOptions) -> String {
    let index = ModelIndex::new(model);
    let mut writer = CodeWriter::new(indent_string(options));

    if options.drop_table {
        write_drop_tables(&mut writer, model, options);
    }

    for entity in &model.entities {
        write_table(&mut writer, entity, options);
    }

    for entity in &model.entities {
        write_foreign_keys(&mut writer, entity, &index, options);
    }

    writer.into_text()
}

/// Drop statements for every entity, followed by a blank line.
pub fn write_drop_tables(writer: &mut CodeWriter, model: &DataModel, options: &GenerateOptions) {
    if options.dbms == Dbms::Mysql {
        writer.write_line("SET FOREIGN_KEY_CHECKS = 0;");
    }
    for entity in &model.entities {
        let table = id(&entity.name, options);
        match options.dbms {
            Dbms::Mysql => writer.write_line(&format!("DROP TABLE IF EXISTS {table};")),
            Dbms::Oracle => writer.write_line(&format!("DROP TABLE {table} CASCADE CONSTRAINTS;")),
        }
    }
    if options.dbms == Dbms::Mysql {
        writer.write_line("SET FOREIGN_KEY_CHECKS = 1;");
    }
    writer.blank_line();
}

/// `CREATE TABLE` block with key lines inside the parenthesis.
pub fn write_table(writer: &mut CodeWriter, entity: &Entity, options: &GenerateOptions) {
    let mut lines: Vec<String> = entity
        .columns
        .iter()
        .map(|col| column_clause(col, options))
        .collect();

    let primary_keys = entity.primary_keys();
    if !primary_keys.is_empty() {
        let names = id_list(primary_keys.iter().map(|col| col.name.as_str()), options);
        lines.push(format!("PRIMARY KEY ({names})"));
    }

    let uniques = entity.uniques();
    if !uniques.is_empty() {
        let names = id_list(uniques.iter().map(|col| col.name.as_str()), options);
        lines.push(format!("UNIQUE ({names})"));
    }

    writer.write_line(&format!("CREATE TABLE {} (", id(&entity.name, options)));
    writer.indent();
    let last = lines.len().saturating_sub(1);
    for (pos, line) in lines.iter().enumerate() {
        if pos < last {
            writer.write_line(&format!("{line},"));
        } else {
            writer.write_line(line);
        }
    }
    writer.outdent();
    writer.write_line(");");
    writer.blank_line();
}

/// One `ALTER TABLE ... ADD FOREIGN KEY` line per resolved constraint.
pub fn write_foreign_keys(
    writer: &mut CodeWriter,
    entity: &Entity,
    index: &ModelIndex<'_>,
    options: &GenerateOptions,
) {
    let constraints = resolve_foreign_keys(entity, index);
    debug!(table = %entity.name, constraints = constraints.len(), "writing foreign keys");
    for constraint in &constraints {
        writer.write_line(&foreign_key_statement(constraint, options));
    }
}

fn foreign_key_statement(constraint: &ForeignKeyConstraint, options: &GenerateOptions) -> String {
    format!(
        "ALTER TABLE {} ADD FOREIGN KEY ({}) REFERENCES {}({});",
        id(&constraint.table, options),
        id_list(constraint.columns.iter().map(String::as_str), options),
        id(&constraint.referenced_table, options),
        id_list(
            constraint.referenced_columns.iter().map(String::as_str),
            options
        ),
    )
}
