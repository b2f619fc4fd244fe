use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::model::DataModel;
use crate::resolve::ModelIndex;

/// Validate internal consistency of a data model.
///
/// This checks:
/// - duplicate entity names and duplicate column names per entity
/// - `reference_to` targets exist
/// - relationship end targets exist
///
/// The emitter does not call this; it tolerates every case reported here.
pub fn validate_model(model: &DataModel) -> Result<()> {
    let mut entity_names = BTreeSet::new();
    for entity in &model.entities {
        if !entity_names.insert(entity.name.as_str()) {
            return Err(Error::InvalidModel(format!(
                "duplicate entity name: {}",
                entity.name
            )));
        }

        let mut columns = BTreeSet::new();
        for column in &entity.columns {
            if !columns.insert(column.name.as_str()) {
                return Err(Error::InvalidModel(format!(
                    "duplicate column name: {}.{}",
                    entity.name, column.name
                )));
            }
        }
    }

    let index = ModelIndex::new(model);
    for entity in &model.entities {
        for column in &entity.columns {
            let Some(reference) = column.reference_to.as_ref() else {
                continue;
            };
            let target = index.entity(&reference.entity).ok_or_else(|| {
                Error::InvalidModel(format!(
                    "referenced entity not found: {}.{} -> {}",
                    entity.name, column.name, reference.entity
                ))
            })?;
            if target.column(&reference.column).is_none() {
                return Err(Error::InvalidModel(format!(
                    "referenced column not found: {}.{} -> {}.{}",
                    entity.name, column.name, reference.entity, reference.column
                )));
            }
        }

        for end in &entity.relationship_ends {
            if index.entity(&end.reference).is_none() {
                return Err(Error::InvalidModel(format!(
                    "relationship target not found: {} -> {}",
                    entity.name, end.reference
                )));
            }
        }
    }

    Ok(())
}
