//! Core model and DDL emission for ddlgen.
//!
//! This crate defines the ER model types, the foreign-key resolution passes,
//! and the emitter that turns a data model into a single SQL script.

pub mod emit;
pub mod error;
pub mod format;
pub mod generator;
pub mod model;
pub mod options;
pub mod output;
pub mod resolve;
pub mod validation;
pub mod writer;

pub use emit::{render_data_model, write_drop_tables, write_foreign_keys, write_table};
pub use error::{Error, Result};
pub use format::{column_clause, format_column_type, format_identifier, indent_string};
pub use generator::{DdlGenerator, GenerateOutcome};
pub use model::{Column, ColumnRef, DataModel, Entity, ModelElement, RelationshipEnd};
pub use options::{Dbms, FileExtension, GenerateOptions};
pub use output::write_text_atomic;
pub use resolve::{
    ConstraintOrigin, ForeignKeyConstraint, ModelIndex, resolve_foreign_keys,
    resolve_relationship_ends, resolve_residual_columns,
};
pub use validation::validate_model;
pub use writer::CodeWriter;

/// Type name substituted when a column has no declared type.
pub const DEFAULT_COLUMN_TYPE: &str = "INTEGER";

/// Cardinality tag that marks a relationship end as a to-one reference.
pub const CARDINALITY_ONE: &str = "1";
