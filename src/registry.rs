//! Mapper registry — ordered, append-only collection of registered mappers.
//!
//! Registration order is load-bearing: resolution scans in this order and
//! the first capable mapper wins, so overlapping registrations stay
//! deterministic.

use std::sync::{Arc, PoisonError, RwLock};

use crate::mapper::Mapper;

/// Ordered collection of `Arc<dyn Mapper>` handlers.
///
/// Append-only: mappers are registered at system start (or rarely,
/// administratively, at runtime) and never removed or replaced. Safe for
/// concurrent registration and concurrent scanning — scanners take a
/// snapshot under the read lock, so an in-progress scan never observes a
/// torn state and never holds up a writer.
#[derive(Default)]
pub struct MapperRegistry {
    mappers: RwLock<Vec<Arc<dyn Mapper>>>,
}

impl MapperRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a fixed list, preserving order.
    pub fn with_mappers(mappers: impl IntoIterator<Item = Arc<dyn Mapper>>) -> Self {
        Self {
            mappers: RwLock::new(mappers.into_iter().collect()),
        }
    }

    /// Append a mapper. Ordering among concurrent registrations is
    /// unspecified; each registered mapper is visible to every later scan.
    pub fn register(&self, mapper: Arc<dyn Mapper>) {
        // Appends of pre-built Arcs cannot tear, so a poisoned guard still
        // holds a consistent vec.
        self.mappers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(mapper);
    }

    /// Registration-order snapshot for scanning.
    pub fn snapshot(&self) -> Vec<Arc<dyn Mapper>> {
        self.mappers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.mappers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::TaxonomyEntity;
    use crate::error::MapError;
    use crate::target_type::TargetType;
    use std::any::Any;

    struct NullMapper;

    impl Mapper for NullMapper {
        fn can_map(&self, _target: &TargetType) -> bool {
            false
        }
        fn map_from(&self, _entity: &TaxonomyEntity) -> Result<Box<dyn Any + Send>, MapError> {
            Err(MapError::conversion("null mapper"))
        }
        fn map_to(&self, _value: &dyn Any) -> Result<TaxonomyEntity, MapError> {
            Err(MapError::conversion("null mapper"))
        }
    }

    // ── Registration & snapshots ────────────────────────────────

    #[test]
    fn starts_empty() {
        let reg = MapperRegistry::new();
        assert!(reg.is_empty());
        assert!(reg.snapshot().is_empty());
    }

    #[test]
    fn register_appends_in_order() {
        let reg = MapperRegistry::new();
        let a: Arc<dyn Mapper> = Arc::new(NullMapper);
        let b: Arc<dyn Mapper> = Arc::new(NullMapper);
        reg.register(a.clone());
        reg.register(b.clone());

        let snap = reg.snapshot();
        assert_eq!(snap.len(), 2);
        assert!(Arc::ptr_eq(&snap[0], &a));
        assert!(Arc::ptr_eq(&snap[1], &b));
    }

    #[test]
    fn with_mappers_preserves_order() {
        let a: Arc<dyn Mapper> = Arc::new(NullMapper);
        let b: Arc<dyn Mapper> = Arc::new(NullMapper);
        let reg = MapperRegistry::with_mappers([a.clone(), b.clone()]);
        let snap = reg.snapshot();
        assert!(Arc::ptr_eq(&snap[0], &a));
        assert!(Arc::ptr_eq(&snap[1], &b));
    }

    #[test]
    fn snapshot_is_isolated_from_later_registration() {
        let reg = MapperRegistry::new();
        reg.register(Arc::new(NullMapper));
        let snap = reg.snapshot();
        reg.register(Arc::new(NullMapper));
        assert_eq!(snap.len(), 1);
        assert_eq!(reg.len(), 2);
    }

    // ── Concurrent registration ─────────────────────────────────

    #[test]
    fn concurrent_register_loses_nothing() {
        let reg = Arc::new(MapperRegistry::new());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let reg = reg.clone();
            handles.push(std::thread::spawn(move || {
                for _ in 0..50 {
                    reg.register(Arc::new(NullMapper));
                }
            }));
        }
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(reg.len(), 400);
    }
}
