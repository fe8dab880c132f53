//! The mapper collaborator contract.

use std::any::Any;

use crate::entity::TaxonomyEntity;
use crate::error::MapError;
use crate::target_type::TargetType;

/// A converter between the canonical taxonomy record and one (or more)
/// concrete types.
///
/// Implementations live with the embedding system; the dispatch layer only
/// ever talks to them through this contract. `can_map` must be a pure
/// predicate — it is called repeatedly and concurrently during resolution
/// scans and its answer for a given type must never change over the
/// mapper's lifetime.
pub trait Mapper: Send + Sync {
    /// Whether this mapper handles `target`.
    fn can_map(&self, target: &TargetType) -> bool;

    /// Convert a canonical record into an instance of the handled type.
    ///
    /// The produced box holds a value of the type this mapper claimed via
    /// `can_map`; the typed dispatch facade downcasts it.
    fn map_from(&self, entity: &TaxonomyEntity) -> Result<Box<dyn Any + Send>, MapError>;

    /// Non-failing variant of [`map_from`](Self::map_from).
    fn try_map_from(&self, entity: &TaxonomyEntity) -> Option<Box<dyn Any + Send>> {
        self.map_from(entity).ok()
    }

    /// Convert an instance of the handled type back into a canonical record.
    fn map_to(&self, value: &dyn Any) -> Result<TaxonomyEntity, MapError>;
}

impl std::fmt::Debug for dyn Mapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn Mapper")
    }
}
