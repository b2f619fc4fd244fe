//! Foreign-key resolution.
//!
//! Resolution runs in two passes over an entity's foreign-key columns:
//!
//! 1. every to-one relationship end whose target primary key is fully
//!    covered by remaining columns becomes one composite constraint, and
//!    the covered columns leave the remaining set;
//! 2. every column still remaining that has a `reference_to` becomes its
//!    own single-column constraint.
//!
//! The remaining set is handed from pass 1 to pass 2 by value, so each
//! column ends up in at most one constraint.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::CARDINALITY_ONE;
use crate::model::{Column, DataModel, Entity};

/// Name lookup over the entities of one data model.
#[derive(Debug, Clone)]
pub struct ModelIndex<'a> {
    entities: BTreeMap<&'a str, &'a Entity>,
}

impl<'a> ModelIndex<'a> {
    /// Index entities by name. The first entity wins on duplicate names.
    pub fn new(model: &'a DataModel) -> Self {
        let mut entities = BTreeMap::new();
        for entity in &model.entities {
            entities.entry(entity.name.as_str()).or_insert(entity);
        }
        Self { entities }
    }

    pub fn entity(&self, name: &str) -> Option<&'a Entity> {
        self.entities.get(name).copied()
    }
}

/// Which pass produced a constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintOrigin {
    Relationship,
    Column,
}

/// A resolved foreign key, ready to be emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForeignKeyConstraint {
    pub table: String,
    pub columns: Vec<String>,
    pub referenced_table: String,
    pub referenced_columns: Vec<String>,
    pub origin: ConstraintOrigin,
}

/// Resolve every foreign-key constraint for `entity`, pass 1 then pass 2.
pub fn resolve_foreign_keys(entity: &Entity, index: &ModelIndex<'_>) -> Vec<ForeignKeyConstraint> {
    let (mut constraints, remaining) =
        resolve_relationship_ends(entity, index, entity.foreign_keys());
    constraints.extend(resolve_residual_columns(entity, remaining));
    constraints
}

/// Pass 1: coalesce columns that fully cover a to-one target's primary key.
///
/// Returns the composite constraints and the columns left unconsumed.
pub fn resolve_relationship_ends<'c>(
    entity: &Entity,
    index: &ModelIndex<'_>,
    remaining: Vec<&'c Column>,
) -> (Vec<ForeignKeyConstraint>, Vec<&'c Column>) {
    let mut remaining = remaining;
    let mut constraints = Vec::new();

    for end in entity
        .relationship_ends
        .iter()
        .filter(|end| end.cardinality == CARDINALITY_ONE)
    {
        let Some(target) = index.entity(&end.reference) else {
            debug!(
                table = %entity.name,
                target = %end.reference,
                "relationship end targets unknown entity"
            );
            continue;
        };

        let target_pks = target.primary_keys();
        if target_pks.is_empty() {
            debug!(
                table = %entity.name,
                target = %target.name,
                "relationship target has no primary key"
            );
            continue;
        }

        let matched: Option<Vec<usize>> = target_pks
            .iter()
            .map(|pk| {
                remaining.iter().position(|col| {
                    col.reference_to
                        .as_ref()
                        .is_some_and(|reference| reference.points_to(target, pk))
                })
            })
            .collect();

        let Some(matched) = matched else {
            debug!(
                table = %entity.name,
                target = %target.name,
                "relationship end only partially matched"
            );
            continue;
        };

        let columns = matched
            .iter()
            .map(|&pos| remaining[pos].name.clone())
            .collect();
        remaining = remaining
            .into_iter()
            .enumerate()
            .filter(|(pos, _)| !matched.contains(pos))
            .map(|(_, col)| col)
            .collect();

        let constraint = ForeignKeyConstraint {
            table: entity.name.clone(),
            columns,
            referenced_table: target.name.clone(),
            referenced_columns: target_pks.iter().map(|pk| pk.name.clone()).collect(),
            origin: ConstraintOrigin::Relationship,
        };
        debug!(
            table = %constraint.table,
            target = %constraint.referenced_table,
            columns = constraint.columns.len(),
            "resolved relationship foreign key"
        );
        constraints.push(constraint);
    }

    (constraints, remaining)
}

/// Pass 2: one constraint per leftover column with a reference.
///
/// Columns flagged as foreign keys without a target are skipped.
pub fn resolve_residual_columns(
    entity: &Entity,
    remaining: Vec<&Column>,
) -> Vec<ForeignKeyConstraint> {
    remaining
        .into_iter()
        .filter_map(|col| {
            let Some(reference) = col.reference_to.as_ref() else {
                debug!(table = %entity.name, column = %col.name, "foreign key without target");
                return None;
            };
            Some(ForeignKeyConstraint {
                table: entity.name.clone(),
                columns: vec![col.name.clone()],
                referenced_table: reference.entity.clone(),
                referenced_columns: vec![reference.column.clone()],
                origin: ConstraintOrigin::Column,
            })
        })
        .collect()
}
