use std::path::{Path, PathBuf};

use ddlgen_core::{Dbms, FileExtension, GenerateOptions, write_text_atomic};
use serde::{Deserialize, Serialize};

use crate::CliError;

/// Default settings file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "ddlgen.toml";

/// Contents of `ddlgen.toml`; every field falls back to the built-in default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DdlSettings {
    #[serde(default)]
    pub ddl: GenerateOptions,
}

/// Per-invocation overrides from command-line flags.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub dbms: Option<Dbms>,
    pub quote_identifiers: Option<bool>,
    pub drop_table: Option<bool>,
    pub use_tab: Option<bool>,
    pub indent_spaces: Option<usize>,
    pub file_extension: Option<FileExtension>,
}

impl DdlSettings {
    /// Apply flag overrides on top of file values.
    pub fn with_overrides(mut self, overrides: &SettingsOverrides) -> Self {
        let ddl = &mut self.ddl;
        if let Some(dbms) = overrides.dbms {
            ddl.dbms = dbms;
        }
        if let Some(quote) = overrides.quote_identifiers {
            ddl.quote_identifiers = quote;
        }
        if let Some(drop_table) = overrides.drop_table {
            ddl.drop_table = drop_table;
        }
        if let Some(use_tab) = overrides.use_tab {
            ddl.use_tab = use_tab;
        }
        if let Some(spaces) = overrides.indent_spaces {
            ddl.indent_spaces = spaces;
        }
        if let Some(extension) = overrides.file_extension {
            ddl.file_extension = extension;
        }
        self
    }
}

/// Load settings from `path`, or from `ddlgen.toml` when it exists.
///
/// An explicit path must exist; the implicit default may be absent.
pub fn load_settings(path: Option<&Path>) -> Result<DdlSettings, CliError> {
    let (path, required) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };

    if !path.exists() {
        if required {
            return Err(CliError::InvalidConfig(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        return Ok(DdlSettings::default());
    }

    let content = std::fs::read_to_string(&path)?;
    let settings: DdlSettings = toml::from_str(&content)?;
    tracing::debug!(path = %path.display(), "settings loaded");
    Ok(settings)
}

pub fn save_settings(path: &Path, settings: &DdlSettings) -> Result<(), CliError> {
    let encoded = toml::to_string_pretty(settings)?;
    write_text_atomic(path, &encoded)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let settings: DdlSettings = toml::from_str(
            r#"
            [ddl]
            dbms = "oracle"
            indent_spaces = 2
            "#,
        )
        .expect("parse settings");

        assert_eq!(settings.ddl.dbms, Dbms::Oracle);
        assert_eq!(settings.ddl.indent_spaces, 2);
        assert!(settings.ddl.quote_identifiers);
        assert!(settings.ddl.drop_table);
        assert_eq!(settings.ddl.file_extension, FileExtension::Sql);
    }

    #[test]
    fn flags_override_file_values() {
        let settings = DdlSettings::default().with_overrides(&SettingsOverrides {
            dbms: Some(Dbms::Oracle),
            quote_identifiers: Some(false),
            indent_spaces: Some(8),
            file_extension: Some(FileExtension::Ddl),
            ..SettingsOverrides::default()
        });

        assert_eq!(settings.ddl.dbms, Dbms::Oracle);
        assert!(!settings.ddl.quote_identifiers);
        assert!(settings.ddl.drop_table);
        assert_eq!(settings.ddl.indent_spaces, 8);
        assert_eq!(settings.ddl.file_extension, FileExtension::Ddl);
    }

    #[test]
    fn flags_can_restore_values_disabled_in_file() {
        let settings: DdlSettings = toml::from_str(
            r#"
            [ddl]
            quote_identifiers = false
            drop_table = false
            use_tab = true
            "#,
        )
        .expect("parse settings");

        let settings = settings.with_overrides(&SettingsOverrides {
            quote_identifiers: Some(true),
            drop_table: Some(true),
            use_tab: Some(false),
            ..SettingsOverrides::default()
        });
        assert!(settings.ddl.quote_identifiers);
        assert!(settings.ddl.drop_table);
        assert!(!settings.ddl.use_tab);
    }

    #[test]
    fn absent_flags_keep_file_values() {
        let mut file = DdlSettings::default();
        file.ddl.use_tab = true;
        file.ddl.quote_identifiers = false;

        let settings = file.clone().with_overrides(&SettingsOverrides::default());
        assert_eq!(settings.ddl, file.ddl);
    }

    #[test]
    fn saved_settings_load_back() {
        let path = std::env::temp_dir()
            .join(format!("ddlgen_settings_{}", uuid::Uuid::new_v4()))
            .join(DEFAULT_CONFIG_FILE);
        let mut settings = DdlSettings::default();
        settings.ddl.use_tab = true;

        save_settings(&path, &settings).expect("save settings");
        let loaded = load_settings(Some(&path)).expect("load settings");
        assert_eq!(loaded.ddl, settings.ddl);

        if let Some(dir) = path.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let path = std::env::temp_dir().join(format!("ddlgen_missing_{}.toml", uuid::Uuid::new_v4()));
        assert!(matches!(
            load_settings(Some(&path)),
            Err(CliError::InvalidConfig(_))
        ));
    }
}
