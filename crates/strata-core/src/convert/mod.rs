//! Type conversion: the converter contract, implicit targets, and the
//! priority-ordered registry.

pub mod list;
pub mod registry;
pub mod scalar;

use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{ConfigError, Result};

/// Converts one raw configuration string into a `T`.
///
/// Converters fail on malformed input with
/// [`ConfigError::ConversionFailed`]; they never coerce bad input to a
/// fallback value. Use [`FnConverter`] to lift a plain closure into this
/// trait.
///
/// # Example
///
/// ```
/// use strata_core::{Converter, FnConverter, Result};
///
/// let upper = FnConverter::new(|value: &str| -> Result<String> {
///     Ok(value.to_uppercase())
/// });
/// assert_eq!(upper.convert("abc").unwrap(), "ABC");
/// ```
pub trait Converter<T>: Send + Sync {
    /// Converts `value`, failing on malformed input.
    fn convert(&self, value: &str) -> Result<T>;
}

/// Adapter lifting a conversion closure into a [`Converter`].
pub struct FnConverter<F> {
    convert: F,
}

impl<F> FnConverter<F> {
    /// Wraps a closure of the shape `Fn(&str) -> Result<T>`.
    pub fn new(convert: F) -> Self {
        Self { convert }
    }
}

impl<T, F> Converter<T> for FnConverter<F>
where
    F: Fn(&str) -> Result<T> + Send + Sync,
{
    fn convert(&self, value: &str) -> Result<T> {
        (self.convert)(value)
    }
}

/// A type that can be requested from the typed accessor layer.
///
/// This is the compile-time replacement for reflective converter discovery:
/// instead of probing a type for conventional factory methods at runtime,
/// each target type states its fallback converter once, here. Lookup order
/// in the registry is fixed: an explicit registration wins, then the cached
/// implicit converter, then [`implicit_converter`](Self::implicit_converter).
///
/// For parseable types the conventional factory is [`FromStr`]; the impls in
/// this module simply delegate to it. A type may return `None`, in which
/// case only an explicit registration can serve it and lookups without one
/// report [`ConfigError::NoConverter`].
pub trait ConfigTarget: Sized + Send + Sync + 'static {
    /// Returns the converter used when no explicit converter is registered
    /// for this type, or `None` if the type requires explicit registration.
    fn implicit_converter() -> Option<Arc<dyn Converter<Self>>>;
}

/// Converter delegating to a type's [`FromStr`] implementation.
pub struct FromStrConverter<T> {
    _target: PhantomData<fn() -> T>,
}

impl<T> Default for FromStrConverter<T> {
    fn default() -> Self {
        Self {
            _target: PhantomData,
        }
    }
}

impl<T> Converter<T> for FromStrConverter<T>
where
    T: FromStr + Send + Sync + 'static,
    T::Err: fmt::Display,
{
    fn convert(&self, value: &str) -> Result<T> {
        value.parse::<T>().map_err(|e| {
            ConfigError::conversion_failed(value, std::any::type_name::<T>(), e.to_string())
        })
    }
}

/// Implements [`ConfigTarget`] for types that already implement
/// [`FromStr`](std::str::FromStr), making `FromStr` their implicit
/// converter.
///
/// # Example
///
/// ```
/// use std::str::FromStr;
///
/// struct Verbosity(u8);
///
/// impl FromStr for Verbosity {
///     type Err = String;
///
///     fn from_str(s: &str) -> Result<Self, Self::Err> {
///         match s {
///             "quiet" => Ok(Verbosity(0)),
///             "loud" => Ok(Verbosity(2)),
///             other => Err(format!("unknown verbosity '{other}'")),
///         }
///     }
/// }
///
/// strata_core::impl_config_target!(Verbosity);
/// ```
#[macro_export]
macro_rules! impl_config_target {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::ConfigTarget for $ty {
                fn implicit_converter() -> ::core::option::Option<
                    ::std::sync::Arc<dyn $crate::Converter<Self>>,
                > {
                    ::core::option::Option::Some(::std::sync::Arc::new(
                        $crate::FromStrConverter::default(),
                    ))
                }
            }
        )*
    };
}

crate::impl_config_target!(
    bool,
    char,
    String,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    std::path::PathBuf,
    std::net::IpAddr,
    std::net::Ipv4Addr,
    std::net::Ipv6Addr,
    std::net::SocketAddr,
);

impl<T: ConfigTarget> ConfigTarget for Vec<T> {
    fn implicit_converter() -> Option<Arc<dyn Converter<Self>>> {
        let element = T::implicit_converter()?;
        Some(Arc::new(list::ListConverter::new(element)))
    }
}

impl<T: ConfigTarget> ConfigTarget for Box<[T]> {
    fn implicit_converter() -> Option<Arc<dyn Converter<Self>>> {
        let element = T::implicit_converter()?;
        Some(Arc::new(list::SliceConverter::new(element)))
    }
}
