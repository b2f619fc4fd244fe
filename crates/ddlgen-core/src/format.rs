//! Identifier and type formatting.

use crate::DEFAULT_COLUMN_TYPE;
use crate::model::Column;
use crate::options::{Dbms, GenerateOptions};

/// Quote `name` with the dialect's quote character when `quote` is set.
///
/// Embedded quote characters are not escaped.
pub fn format_identifier(name: &str, quote: bool, dbms: Dbms) -> String {
    if quote {
        let q = dbms.quote_char();
        format!("{q}{name}{q}")
    } else {
        name.to_string()
    }
}

/// Declared type string, or [`DEFAULT_COLUMN_TYPE`] when blank.
pub fn format_column_type(column: &Column) -> String {
    let declared = column.type_string();
    if declared.trim().is_empty() {
        DEFAULT_COLUMN_TYPE.to_string()
    } else {
        declared
    }
}

/// Full column clause: identifier, type and nullability.
///
/// Primary keys are always `NOT NULL`, whatever their own flag says.
pub fn column_clause(column: &Column, options: &GenerateOptions) -> String {
    let mut line = id(&column.name, options);
    line.push(' ');
    line.push_str(&format_column_type(column));
    if column.primary_key || !column.nullable {
        line.push_str(" NOT NULL");
    }
    line
}

/// Indentation unit for nested lines.
pub fn indent_string(options: &GenerateOptions) -> String {
    if options.use_tab {
        "\t".to_string()
    } else {
        " ".repeat(options.indent_spaces)
    }
}

pub(crate) fn id(name: &str, options: &GenerateOptions) -> String {
    format_identifier(name, options.quote_identifiers, options.dbms)
}

pub(crate) fn id_list<'a>(
    names: impl IntoIterator<Item = &'a str>,
    options: &GenerateOptions,
) -> String {
    names
        .into_iter()
        .map(|name| id(name, options))
        .collect::<Vec<_>>()
        .join(", ")
}
