use std::path::{Path, PathBuf};

use tracing::info;

use crate::emit::render_data_model;
use crate::error::Result;
use crate::model::ModelElement;
use crate::options::GenerateOptions;
use crate::output::write_text_atomic;

/// What a call to [`DdlGenerator::generate`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// A script was written.
    Written { path: PathBuf, bytes: usize },
    /// The element is not a data model; nothing was written.
    Skipped { kind: &'static str },
}

/// Entry point for turning model elements into DDL scripts.
///
/// Holds only options; the model is borrowed per call, so one generator can
/// serve concurrent calls with different output targets.
#[derive(Debug, Clone, Default)]
pub struct DdlGenerator {
    options: GenerateOptions,
}

impl DdlGenerator {
    pub fn new(options: GenerateOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    /// Render the script for `element`, or `None` when it is not a data model.
    pub fn render(&self, element: &ModelElement) -> Option<String> {
        match element {
            ModelElement::DataModel(model) => Some(render_data_model(model, &self.options)),
            ModelElement::Entity(_)
            | ModelElement::Column(_)
            | ModelElement::RelationshipEnd(_)
            | ModelElement::Other { .. } => None,
        }
    }

    /// Render the script for `element` and write it to `path`.
    ///
    /// The text is fully assembled before anything touches the file system.
    pub fn generate(&self, element: &ModelElement, path: &Path) -> Result<GenerateOutcome> {
        let Some(text) = self.render(element) else {
            info!(
                kind = element.kind(),
                name = element.name().unwrap_or_default(),
                "element has no ddl; skipping"
            );
            return Ok(GenerateOutcome::Skipped {
                kind: element.kind(),
            });
        };

        write_text_atomic(path, &text)?;
        info!(
            path = %path.display(),
            bytes = text.len(),
            dbms = %self.options.dbms,
            "ddl written"
        );
        Ok(GenerateOutcome::Written {
            path: path.to_path_buf(),
            bytes: text.len(),
        })
    }

    /// File name suggested for a model's script (`<name><extension>`).
    pub fn suggested_file_name(&self, element: &ModelElement) -> Option<String> {
        match element {
            ModelElement::DataModel(model) => Some(format!(
                "{}{}",
                model.name,
                self.options.file_extension.as_str()
            )),
            _ => None,
        }
    }
}
