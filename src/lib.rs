//! Taxonomy mapping core — mapper registry, type-directed resolution, dispatch.
//!
//! Given a canonical taxonomy record and a target type, find the one
//! registered [`Mapper`] capable of converting between the two, memoize the
//! lookup by type identity, and invoke it.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  Embedding system: CMS pipelines, import/export jobs            │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    EntityMapper                                  │
//! │     map / map_as / try_map / try_map_as / map_to_entity          │
//! │          resolution cache: type key -> Arc<dyn Mapper>           │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                   MapperRegistry                                 │
//! │        ordered, append-only Vec<Arc<dyn Mapper>>                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Resolution is a linear first-match scan over the registry in registration
//! order; the winning mapper is cached under the target type's stable string
//! identity and never re-evaluated. A failed resolution is never cached, so
//! registering the missing mapper fixes the next call.
//!
//! This crate is pure: no DB, no network, no async runtime. Concrete mappers
//! live with the embedding system and plug in through the [`Mapper`] trait.

pub mod dispatch;
pub mod entity;
pub mod error;
pub mod mapper;
pub mod registry;
pub mod target_type;

pub use dispatch::{AmbiguityPolicy, DispatchStats, EntityMapper};
pub use entity::TaxonomyEntity;
pub use error::MapError;
pub use mapper::Mapper;
pub use registry::MapperRegistry;
pub use target_type::{Mappable, TargetType};
