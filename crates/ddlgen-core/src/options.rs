use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Target database family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Dbms {
    #[default]
    Mysql,
    Oracle,
}

impl Dbms {
    /// Character wrapped around quoted identifiers.
    pub fn quote_char(self) -> char {
        match self {
            Dbms::Mysql => '`',
            Dbms::Oracle => '"',
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Dbms::Mysql => "mysql",
            Dbms::Oracle => "oracle",
        }
    }
}

impl std::fmt::Display for Dbms {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Dbms {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "mysql" => Ok(Dbms::Mysql),
            "oracle" => Ok(Dbms::Oracle),
            other => Err(format!("unknown dbms: {other}")),
        }
    }
}

/// Suggested suffix for the generated script file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum FileExtension {
    #[default]
    #[serde(rename = ".sql")]
    Sql,
    #[serde(rename = ".ddl")]
    Ddl,
}

impl FileExtension {
    pub fn as_str(self) -> &'static str {
        match self {
            FileExtension::Sql => ".sql",
            FileExtension::Ddl => ".ddl",
        }
    }
}

impl std::str::FromStr for FileExtension {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "sql" => Ok(FileExtension::Sql),
            "ddl" => Ok(FileExtension::Ddl),
            other => Err(format!("unknown file extension: {other}")),
        }
    }
}

/// Options that control how DDL is emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct GenerateOptions {
    /// Wrap identifiers in the dialect's quote character.
    pub quote_identifiers: bool,
    /// Emit drop statements before the create statements.
    pub drop_table: bool,
    pub dbms: Dbms,
    /// Indent with a tab instead of spaces.
    pub use_tab: bool,
    pub indent_spaces: usize,
    /// Only used to suggest an output file name.
    pub file_extension: FileExtension,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            quote_identifiers: true,
            drop_table: true,
            dbms: Dbms::Mysql,
            use_tab: false,
            indent_spaces: 4,
            file_extension: FileExtension::Sql,
        }
    }
}
