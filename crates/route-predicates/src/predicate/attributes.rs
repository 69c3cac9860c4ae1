//! Request-scoped attribute storage.
//!
//! Predicates publish what they capture here so later stages of request
//! handling (URI rewriting, for one) can read it by key. A store belongs to a
//! single request and is dropped with it.

use crate::pattern::UriVariables;
use std::collections::HashMap;

/// Key under which captured URI template variables are stored.
pub const URI_TEMPLATE_VARIABLES_ATTRIBUTE: &str = "route_predicates.uriTemplateVariables";

/// Value held by a request attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    Text(String),
    Variables(UriVariables),
}

/// Key-value store living for the duration of one request.
pub trait AttributeStore: Send {
    fn get(&self, key: &str) -> Option<&AttributeValue>;

    fn put(&mut self, key: &str, value: AttributeValue);
}

/// In-memory attribute store.
#[derive(Debug, Clone, Default)]
pub struct RequestAttributes {
    entries: HashMap<String, AttributeValue>,
}

impl RequestAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl AttributeStore for RequestAttributes {
    fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.entries.get(key)
    }

    fn put(&mut self, key: &str, value: AttributeValue) {
        self.entries.insert(key.to_string(), value);
    }
}

/// Merge `variables` into the URI template variables already on the request.
///
/// New values win over existing ones with the same name.
pub fn put_uri_template_variables(store: &mut dyn AttributeStore, variables: UriVariables) {
    let merged = match store.get(URI_TEMPLATE_VARIABLES_ATTRIBUTE) {
        Some(AttributeValue::Variables(existing)) => {
            let mut merged = existing.clone();
            merged.extend(variables);
            merged
        }
        _ => variables,
    };
    store.put(
        URI_TEMPLATE_VARIABLES_ATTRIBUTE,
        AttributeValue::Variables(merged),
    );
}

/// URI template variables published so far, if any.
pub fn uri_template_variables(store: &dyn AttributeStore) -> Option<&UriVariables> {
    match store.get(URI_TEMPLATE_VARIABLES_ATTRIBUTE) {
        Some(AttributeValue::Variables(variables)) => Some(variables),
        _ => None,
    }
}
