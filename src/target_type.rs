//! Type identity — the descriptor mappers are keyed on, plus runtime type
//! discovery for reverse mapping.

use std::any::{Any, TypeId};
use std::fmt;

/// First-class descriptor for a target type.
///
/// Wraps [`TypeId`] for equality/hashing and [`std::any::type_name`] as the
/// stable string identity used as the resolution-cache key. Two descriptors
/// for the same logical type always compare equal and produce the same key.
/// Identity is stable within one process lifetime; serialized or
/// cross-process identity is out of scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetType {
    id: TypeId,
    name: &'static str,
}

impl TargetType {
    /// Descriptor for a concrete type.
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The stable string identity — the resolution-cache key.
    pub fn key(&self) -> &'static str {
        self.name
    }

    pub fn id(&self) -> TypeId {
        self.id
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Runtime type discovery for reverse mapping.
///
/// `map_to_entity` takes a `&dyn Mappable` and recovers the value's concrete
/// type through [`target_type`](Self::target_type) — the explicit form of
/// "what type is this value". Implemented for every `T: Any + Send` via the
/// blanket impl; callers never implement it by hand.
pub trait Mappable: Any + Send {
    fn target_type(&self) -> TargetType;
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any + Send> Mappable for T {
    fn target_type(&self) -> TargetType {
        TargetType::of::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct Category;
    struct Tag;

    // ── Equality & keys ─────────────────────────────────────────

    #[test]
    fn same_type_same_descriptor() {
        assert_eq!(TargetType::of::<Category>(), TargetType::of::<Category>());
        assert_eq!(
            TargetType::of::<Category>().key(),
            TargetType::of::<Category>().key()
        );
    }

    #[test]
    fn distinct_types_distinct_descriptors() {
        assert_ne!(TargetType::of::<Category>(), TargetType::of::<Tag>());
        assert_ne!(
            TargetType::of::<Category>().key(),
            TargetType::of::<Tag>().key()
        );
    }

    #[test]
    fn usable_as_hash_key() {
        let mut m = HashMap::new();
        m.insert(TargetType::of::<Category>(), 1);
        assert_eq!(m.get(&TargetType::of::<Category>()), Some(&1));
        assert_eq!(m.get(&TargetType::of::<Tag>()), None);
    }

    #[test]
    fn display_is_key() {
        let t = TargetType::of::<Category>();
        assert_eq!(t.to_string(), t.key());
    }

    // ── Runtime discovery ───────────────────────────────────────

    #[test]
    fn mappable_recovers_concrete_type() {
        let v = Category;
        let dynamic: &dyn Mappable = &v;
        assert_eq!(dynamic.target_type(), TargetType::of::<Category>());
        assert!(dynamic.as_any().downcast_ref::<Category>().is_some());
    }
}
