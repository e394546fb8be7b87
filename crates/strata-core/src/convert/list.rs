//! Delimited-string conversion into sequences.
//!
//! A sequence value is a single string whose elements are separated by
//! commas. A comma preceded by a backslash (`\,`) is part of the element,
//! not a separator. Tokens that are empty after unescaping are dropped, so
//! leading, trailing, or doubled commas neither fail nor produce empty
//! elements. Whether an all-empty result means "absent" is decided by the
//! accessor layer, not here.

use std::sync::Arc;

use crate::error::Result;

use super::Converter;

/// Splits `value` on every unescaped comma, unescaping `\,` and dropping
/// tokens that end up empty.
pub fn split_tokens(value: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut chars = value.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&',') => {
                chars.next();
                current.push(',');
            }
            ',' => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            other => current.push(other),
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

/// Converts every surviving token of `value` with `element`, in order.
pub fn convert_tokens<T>(value: &str, element: &dyn Converter<T>) -> Result<Vec<T>> {
    let tokens = split_tokens(value);
    let mut converted = Vec::with_capacity(tokens.len());

    for token in &tokens {
        converted.push(element.convert(token)?);
    }

    Ok(converted)
}

/// Converter producing a `Vec<T>` from a delimited string.
pub struct ListConverter<T> {
    element: Arc<dyn Converter<T>>,
}

impl<T> ListConverter<T> {
    /// Wraps an element converter.
    pub fn new(element: Arc<dyn Converter<T>>) -> Self {
        Self { element }
    }
}

impl<T: Send + Sync + 'static> Converter<Vec<T>> for ListConverter<T> {
    fn convert(&self, value: &str) -> Result<Vec<T>> {
        convert_tokens(value, self.element.as_ref())
    }
}

/// Converter producing a fixed-size `Box<[T]>` from a delimited string.
pub struct SliceConverter<T> {
    element: Arc<dyn Converter<T>>,
}

impl<T> SliceConverter<T> {
    /// Wraps an element converter.
    pub fn new(element: Arc<dyn Converter<T>>) -> Self {
        Self { element }
    }
}

impl<T: Send + Sync + 'static> Converter<Box<[T]>> for SliceConverter<T> {
    fn convert(&self, value: &str) -> Result<Box<[T]>> {
        convert_tokens(value, self.element.as_ref()).map(Vec::into_boxed_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::FromStrConverter;

    #[test]
    fn test_plain_split() {
        assert_eq!(split_tokens("a,b,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_escaped_comma_stays_in_token() {
        assert_eq!(split_tokens("one\\, two,three"), vec!["one, two", "three"]);
    }

    #[test]
    fn test_literal_backslash_before_escaped_comma() {
        // `a\\,b` keeps the backslash and the escaped comma in one token
        assert_eq!(split_tokens("a\\\\,b"), vec!["a\\,b"]);
    }

    #[test]
    fn test_backslash_not_before_comma_is_literal() {
        assert_eq!(split_tokens("a\\b"), vec!["a\\b"]);
    }

    #[test]
    fn test_empty_tokens_dropped() {
        assert_eq!(split_tokens(",,"), Vec::<String>::new());
        assert_eq!(split_tokens("a,,b,"), vec!["a", "b"]);
        assert_eq!(split_tokens(",lead"), vec!["lead"]);
    }

    #[test]
    fn test_escaped_comma_alone_survives() {
        // the token unescapes to "," which is not empty
        assert_eq!(split_tokens("\\,"), vec![","]);
    }

    #[test]
    fn test_convert_tokens_in_order() {
        let element = FromStrConverter::<i32>::default();
        let values = convert_tokens("3,1,2", &element).unwrap();

        assert_eq!(values, vec![3, 1, 2]);
    }

    #[test]
    fn test_convert_tokens_surfaces_element_failure() {
        let element = FromStrConverter::<i32>::default();
        let err = convert_tokens("1,x,3", &element).unwrap_err();

        assert!(err.is_conversion_failure());
        assert!(err.to_string().contains('x'));
    }

    #[test]
    fn test_list_converter() {
        let converter = ListConverter::new(Arc::new(FromStrConverter::<u8>::default()));
        assert_eq!(converter.convert("1,2,3").unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_slice_converter_is_fixed_size() {
        let converter = SliceConverter::new(Arc::new(FromStrConverter::<String>::default()));
        let slice = converter.convert("a,b").unwrap();

        assert_eq!(slice.len(), 2);
        assert_eq!(&*slice, ["a".to_string(), "b".to_string()]);
    }
}
