use std::collections::BTreeMap;
use std::fmt::Display;

use url::form_urlencoded;

use crate::error::{AppError, AppResult, ValidationError};

const RESERVED_KEYS: [&str; 3] = ["order_by", "page_size", "page_token"];
const FILTER_SUFFIXES: [&str; 4] = ["_eq", "_gte", "_lte", "_in_values"];

/// Typed filter/sort/pagination state for a list endpoint.
///
/// Parameters live in a `BTreeMap`, so encoding order is deterministic and
/// the encoded string doubles as a stable cache key. `parse` accepts what
/// `to_query` produced, which is what makes view state deep-linkable.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FilterSpec {
    params: BTreeMap<String, String>,
}

impl FilterSpec {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn where_eq(mut self, field: &str, value: impl Display) -> Self {
        self.params.insert(format!("{}_eq", field), value.to_string());
        self
    }

    #[must_use]
    pub fn where_gte(mut self, field: &str, value: impl Display) -> Self {
        self.params
            .insert(format!("{}_gte", field), value.to_string());
        self
    }

    #[must_use]
    pub fn where_lte(mut self, field: &str, value: impl Display) -> Self {
        self.params
            .insert(format!("{}_lte", field), value.to_string());
        self
    }

    #[must_use]
    pub fn where_in<V: Display>(mut self, field: &str, values: &[V]) -> Self {
        let joined = values
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        self.params.insert(format!("{}_in_values", field), joined);
        self
    }

    #[must_use]
    pub fn order_by(mut self, clause: &str) -> Self {
        self.params.insert("order_by".to_owned(), clause.to_owned());
        self
    }

    #[must_use]
    pub fn page_size(mut self, size: u32) -> Self {
        self.params
            .insert("page_size".to_owned(), size.to_string());
        self
    }

    #[must_use]
    pub fn page_token(mut self, token: &str) -> Self {
        self.params
            .insert("page_token".to_owned(), token.to_owned());
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Deterministic query-string encoding (keys in sorted order).
    #[must_use]
    pub fn to_query(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.params {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }

    /// Parses an encoded query string back into a spec.
    ///
    /// # Errors
    ///
    /// Returns a validation error for keys that are neither reserved nor
    /// carry a known filter suffix, for duplicated reserved keys, and for a
    /// non-numeric `page_size`.
    pub fn parse(query: &str) -> AppResult<Self> {
        let mut params = BTreeMap::new();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let key = key.into_owned();
            let value = value.into_owned();
            if RESERVED_KEYS.contains(&key.as_str()) {
                if params.contains_key(&key) {
                    return Err(AppError::validation(ValidationError::DuplicateReservedKey {
                        key,
                    }));
                }
                if key == "page_size" && value.parse::<u32>().is_err() {
                    return Err(AppError::validation(ValidationError::InvalidPageSize {
                        value,
                    }));
                }
            } else if !has_filter_suffix(&key) {
                return Err(AppError::validation(ValidationError::UnknownFilterKey {
                    key,
                }));
            }
            params.insert(key, value);
        }
        Ok(Self { params })
    }
}

fn has_filter_suffix(key: &str) -> bool {
    FILTER_SUFFIXES
        .iter()
        .any(|suffix| key.ends_with(suffix) && key.len() > suffix.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoding_is_deterministic_and_sorted() {
        let spec = FilterSpec::new()
            .page_size(100)
            .where_eq("meta_network_name", "mainnet")
            .where_gte("slot", 10)
            .where_lte("slot", 20);
        assert_eq!(
            spec.to_query(),
            "meta_network_name_eq=mainnet&page_size=100&slot_gte=10&slot_lte=20"
        );
    }

    #[test]
    fn query_round_trips() -> crate::error::AppResult<()> {
        let spec = FilterSpec::new()
            .where_eq("slot", 42)
            .where_in("expiry_policy", &["none", "1y"])
            .order_by("slot asc")
            .page_size(500)
            .page_token("abc/def==");
        let parsed = FilterSpec::parse(&spec.to_query())?;
        assert_eq!(parsed, spec);
        assert_eq!(parsed.get("page_token"), Some("abc/def=="));
        Ok(())
    }

    #[test]
    fn parse_rejects_unknown_keys() {
        assert!(FilterSpec::parse("slot_like=5").is_err());
        assert!(FilterSpec::parse("_eq=5").is_err());
    }

    #[test]
    fn parse_rejects_duplicate_reserved_keys() {
        assert!(FilterSpec::parse("page_token=a&page_token=b").is_err());
    }

    #[test]
    fn parse_rejects_non_numeric_page_size() {
        assert!(FilterSpec::parse("page_size=lots").is_err());
    }

    #[test]
    fn page_token_replaces_previous_token() {
        let spec = FilterSpec::new().page_token("first").page_token("second");
        assert_eq!(spec.get("page_token"), Some("second"));
    }
}
