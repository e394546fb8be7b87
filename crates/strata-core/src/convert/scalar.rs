//! Built-in scalar converters seeded by the builder.

use std::path::PathBuf;

use crate::error::{ConfigError, Result};

use super::registry::{ConverterRegistry, DEFAULT_PRIORITY};
use super::{Converter, FromStrConverter};

/// Boolean converter with configuration token semantics.
///
/// `true`, `1`, `yes`, `y`, and `on` convert to `true` case-insensitively;
/// every other input converts to `false`. The conversion is total.
pub struct BoolConverter;

impl Converter<bool> for BoolConverter {
    fn convert(&self, value: &str) -> Result<bool> {
        Ok(matches!(
            value.to_ascii_lowercase().as_str(),
            "true" | "1" | "yes" | "y" | "on"
        ))
    }
}

/// Character converter accepting exactly one character.
pub struct CharConverter;

impl Converter<char> for CharConverter {
    fn convert(&self, value: &str) -> Result<char> {
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(ConfigError::conversion_failed(
                value,
                "char",
                "expected exactly one character",
            )),
        }
    }
}

/// Registers the built-in converters, all at [`DEFAULT_PRIORITY`].
///
/// Because these are explicit registrations, a caller-supplied converter for
/// one of these types only takes over at a priority strictly above 100.
pub(crate) fn register_defaults(registry: &mut ConverterRegistry) {
    registry.register(BoolConverter, DEFAULT_PRIORITY);
    registry.register(CharConverter, DEFAULT_PRIORITY);
    registry.register(FromStrConverter::<String>::default(), DEFAULT_PRIORITY);
    registry.register(FromStrConverter::<i8>::default(), DEFAULT_PRIORITY);
    registry.register(FromStrConverter::<i16>::default(), DEFAULT_PRIORITY);
    registry.register(FromStrConverter::<i32>::default(), DEFAULT_PRIORITY);
    registry.register(FromStrConverter::<i64>::default(), DEFAULT_PRIORITY);
    registry.register(FromStrConverter::<isize>::default(), DEFAULT_PRIORITY);
    registry.register(FromStrConverter::<u8>::default(), DEFAULT_PRIORITY);
    registry.register(FromStrConverter::<u16>::default(), DEFAULT_PRIORITY);
    registry.register(FromStrConverter::<u32>::default(), DEFAULT_PRIORITY);
    registry.register(FromStrConverter::<u64>::default(), DEFAULT_PRIORITY);
    registry.register(FromStrConverter::<usize>::default(), DEFAULT_PRIORITY);
    registry.register(FromStrConverter::<f32>::default(), DEFAULT_PRIORITY);
    registry.register(FromStrConverter::<f64>::default(), DEFAULT_PRIORITY);
    registry.register(FromStrConverter::<PathBuf>::default(), DEFAULT_PRIORITY);
}
