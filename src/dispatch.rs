//! Type resolver + dispatcher.
//!
//! Translates "act on type T" into "the one mapper for T", then performs the
//! requested action. Resolution is a linear first-match scan over the
//! registry in registration order, memoized under the target type's stable
//! string identity. Only positive resolutions are cached — a miss re-scans
//! on every call, so registering the missing mapper fixes the next one.

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::entity::TaxonomyEntity;
use crate::error::MapError;
use crate::mapper::Mapper;
use crate::registry::MapperRegistry;
use crate::target_type::{Mappable, TargetType};

/// What to do when more than one registered mapper claims the same type.
///
/// The winner is always the first registered — that tie-break is part of the
/// contract either way. `WarnOnOverlap` additionally completes the scan on a
/// cache miss and emits a `tracing::warn!` naming the overlap, for
/// deployments that treat ambiguous registration as a configuration smell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AmbiguityPolicy {
    #[default]
    UseFirst,
    WarnOnOverlap,
}

/// Counters for operational introspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchStats {
    pub registered_mappers: usize,
    pub cached_resolutions: usize,
}

/// The dispatch surface offered to the embedding system.
///
/// Owns its [`MapperRegistry`] and resolution cache for its whole lifetime;
/// neither is shared ambient state. All entry points are synchronous and
/// safe for concurrent use.
pub struct EntityMapper {
    registry: MapperRegistry,
    cache: RwLock<HashMap<&'static str, Arc<dyn Mapper>>>,
    ambiguity: AmbiguityPolicy,
}

impl Default for EntityMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityMapper {
    /// Empty dispatcher; mappers arrive through [`register`](Self::register).
    pub fn new() -> Self {
        Self {
            registry: MapperRegistry::new(),
            cache: RwLock::new(HashMap::new()),
            ambiguity: AmbiguityPolicy::default(),
        }
    }

    /// Dispatcher over a fixed mapper list. Behaviorally identical to
    /// constructing empty and registering each in order.
    pub fn with_mappers(mappers: impl IntoIterator<Item = Arc<dyn Mapper>>) -> Self {
        Self {
            registry: MapperRegistry::with_mappers(mappers),
            cache: RwLock::new(HashMap::new()),
            ambiguity: AmbiguityPolicy::default(),
        }
    }

    pub fn with_ambiguity_policy(mut self, policy: AmbiguityPolicy) -> Self {
        self.ambiguity = policy;
        self
    }

    /// Append a mapper to the registry. Visible to every later resolution;
    /// already-cached resolutions are unaffected.
    pub fn register(&self, mapper: Arc<dyn Mapper>) {
        self.registry.register(mapper);
    }

    /// Find the one mapper for `target`.
    ///
    /// Cache hit returns without evaluating any `can_map`. Cache miss scans
    /// the registry snapshot in registration order; the first capable mapper
    /// is cached under `target.key()` and returned. No match fails with
    /// [`MapError::MapperNotFound`] and caches nothing.
    pub fn resolve(&self, target: &TargetType) -> Result<Arc<dyn Mapper>, MapError> {
        if let Some(mapper) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(target.key())
        {
            tracing::debug!("mapper cache hit for {target}");
            return Ok(mapper.clone());
        }

        let snapshot = self.registry.snapshot();
        let found = match self.ambiguity {
            AmbiguityPolicy::UseFirst => snapshot.iter().find(|m| m.can_map(target)).cloned(),
            AmbiguityPolicy::WarnOnOverlap => {
                let matches: Vec<&Arc<dyn Mapper>> =
                    snapshot.iter().filter(|m| m.can_map(target)).collect();
                if matches.len() > 1 {
                    tracing::warn!(
                        "{} mappers claim type {target}; using the first registered",
                        matches.len()
                    );
                }
                matches.first().map(|m| Arc::clone(m))
            }
        };

        match found {
            Some(mapper) => {
                // Racing resolvers may both scan; the entry API makes the
                // first write win and every caller converge on it.
                let resolved = self
                    .cache
                    .write()
                    .unwrap_or_else(PoisonError::into_inner)
                    .entry(target.key())
                    .or_insert_with(|| mapper)
                    .clone();
                tracing::debug!("resolved mapper for {target}");
                Ok(resolved)
            }
            None => Err(MapError::MapperNotFound(target.key().to_string())),
        }
    }

    /// Convert a canonical record into an instance of `target`.
    ///
    /// Hard contract: an empty record is an [`MapError::InvalidArgument`],
    /// an unmatched type is a [`MapError::MapperNotFound`], and whatever the
    /// mapper raises mid-conversion propagates unchanged.
    pub fn map(
        &self,
        entity: &TaxonomyEntity,
        target: &TargetType,
    ) -> Result<Box<dyn Any + Send>, MapError> {
        if entity.is_empty() {
            return Err(MapError::InvalidArgument("entity"));
        }
        let mapper = self.resolve(target)?;
        mapper.map_from(entity)
    }

    /// Typed facade over [`map`](Self::map), fixing the target to `T` and
    /// downcasting the produced value.
    pub fn map_as<T: Any>(&self, entity: &TaxonomyEntity) -> Result<T, MapError> {
        let target = TargetType::of::<T>();
        let boxed = self.map(entity, &target)?;
        match boxed.downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(_) => Err(MapError::conversion(format!(
                "mapper for {target} produced a value of a different type"
            ))),
        }
    }

    /// Non-throwing probe: every failure past the argument guard — no
    /// capable mapper, or a mapper-raised conversion failure — becomes
    /// `None`. An empty record also probes as `None`.
    pub fn try_map(
        &self,
        entity: &TaxonomyEntity,
        target: &TargetType,
    ) -> Option<Box<dyn Any + Send>> {
        if entity.is_empty() {
            return None;
        }
        let mapper = self.resolve(target).ok()?;
        mapper.try_map_from(entity)
    }

    /// Typed facade over [`try_map`](Self::try_map).
    pub fn try_map_as<T: Any>(&self, entity: &TaxonomyEntity) -> Option<T> {
        let boxed = self.try_map(entity, &TargetType::of::<T>())?;
        boxed.downcast::<T>().ok().map(|b| *b)
    }

    /// Reverse direction: discover the value's runtime type, resolve through
    /// the same cache and scan, and delegate to the mapper's reverse
    /// conversion.
    pub fn map_to_entity(&self, value: &dyn Mappable) -> Result<TaxonomyEntity, MapError> {
        let target = value.target_type();
        let mapper = self.resolve(&target)?;
        mapper.map_to(value.as_any())
    }

    /// Eagerly resolve a set of target types so the first dispatch pays no
    /// scan. Returns how many resolved; types with no registered mapper are
    /// skipped (and, as always, not cached).
    pub fn prewarm<'a>(&self, targets: impl IntoIterator<Item = &'a TargetType>) -> usize {
        let warmed = targets
            .into_iter()
            .filter(|t| self.resolve(t).is_ok())
            .count();
        tracing::debug!("prewarmed {warmed} mapper resolution(s)");
        warmed
    }

    pub fn stats(&self) -> DispatchStats {
        DispatchStats {
            registered_mappers: self.registry.len(),
            cached_resolutions: self
                .cache
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .len(),
        }
    }
}
