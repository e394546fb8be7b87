//! Priority-ordered converter registry.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use parking_lot::RwLock;

use super::list::{ListConverter, SliceConverter};
use super::scalar::register_defaults;
use super::{ConfigTarget, Converter};

/// Priority assumed for converters registered without one.
pub const DEFAULT_PRIORITY: i32 = 100;

struct Registration {
    priority: i32,
    // holds an `Arc<dyn Converter<T>>` for the keyed `T`
    converter: Box<dyn Any + Send + Sync>,
}

/// Maps target types to converters, resolving conflicts by priority.
///
/// For a given target type exactly one converter is active: the one with the
/// highest priority among all registered for that type. A registration at a
/// priority equal to the active entry's never replaces it, so the final
/// registry state depends only on the multiset of registrations, not their
/// order.
///
/// Registering a scalar converter also registers delimited-sequence
/// converters for `Vec<T>` and `Box<[T]>` at the same priority, so both
/// sequence shapes resolve wherever the scalar does.
///
/// Types with no explicit entry fall back to their
/// [`ConfigTarget::implicit_converter`]; synthesized converters are cached
/// for the lifetime of the registry.
pub struct ConverterRegistry {
    entries: HashMap<TypeId, Registration>,
    implicit: RwLock<HashMap<TypeId, Box<dyn Any + Send + Sync>>>,
}

impl ConverterRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            implicit: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a registry seeded with the built-in converters at
    /// [`DEFAULT_PRIORITY`].
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        register_defaults(&mut registry);
        registry
    }

    /// Registers `converter` for `T` at `priority`.
    ///
    /// Replaces the active entry only if `priority` is strictly greater.
    /// Also registers the `Vec<T>` and `Box<[T]>` sequence converters backed
    /// by this scalar converter, under the same replacement rule.
    pub fn register<T, C>(&mut self, converter: C, priority: i32)
    where
        T: Send + Sync + 'static,
        C: Converter<T> + 'static,
    {
        let converter: Arc<dyn Converter<T>> = Arc::new(converter);
        self.register_entry::<Vec<T>>(Arc::new(ListConverter::new(converter.clone())), priority);
        self.register_entry::<Box<[T]>>(Arc::new(SliceConverter::new(converter.clone())), priority);
        self.register_entry::<T>(converter, priority);
    }

    fn register_entry<T: Send + Sync + 'static>(
        &mut self,
        converter: Arc<dyn Converter<T>>,
        priority: i32,
    ) {
        match self.entries.entry(TypeId::of::<T>()) {
            Entry::Occupied(mut occupied) if priority > occupied.get().priority => {
                occupied.insert(Registration {
                    priority,
                    converter: Box::new(converter),
                });
            }
            // equal or lower priority never replaces
            Entry::Occupied(_) => {}
            Entry::Vacant(vacant) => {
                vacant.insert(Registration {
                    priority,
                    converter: Box::new(converter),
                });
            }
        }
    }

    /// Returns true if an explicit converter is registered for `T`.
    pub fn has_explicit<T: 'static>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    /// Looks up the active converter for `T`.
    ///
    /// Tries, in order: the explicit entry, the implicit-converter cache,
    /// and [`ConfigTarget::implicit_converter`] (caching its result).
    /// Returns `None` when all three fail.
    pub fn converter<T: ConfigTarget>(&self) -> Option<Arc<dyn Converter<T>>> {
        let id = TypeId::of::<T>();

        if let Some(registration) = self.entries.get(&id) {
            return registration
                .converter
                .downcast_ref::<Arc<dyn Converter<T>>>()
                .map(Arc::clone);
        }

        if let Some(cached) = self.implicit.read().get(&id) {
            return cached
                .downcast_ref::<Arc<dyn Converter<T>>>()
                .map(Arc::clone);
        }

        let synthesized = T::implicit_converter()?;

        // Concurrent first-use races are benign: every racer synthesizes an
        // equivalent converter and the first insert wins.
        let mut cache = self.implicit.write();
        cache
            .entry(id)
            .or_insert_with(|| Box::new(synthesized))
            .downcast_ref::<Arc<dyn Converter<T>>>()
            .map(Arc::clone)
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::new()
    }
}
