use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use smallvec::SmallVec;

/// Maximum number of path/query parameters before heap allocation.
/// Most REST APIs have no more than 4 path params (e.g. `/users/:id/posts/:post_id`).
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated parameter storage.
///
/// Param names use `Arc<str>` because they come from the route table built at startup.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Application-defined permission identifier. The router never interprets the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Permission(pub u32);

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Permission {
    fn from(value: u32) -> Self {
        Permission(value)
    }
}

/// Errors returned by context lookups
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextError {
    /// No authorization guard has set an identity on this request
    IdentityNotSet,
    /// The route did not capture a parameter with this name
    MissingParam { name: String },
    /// The parameter was captured but its value is empty
    EmptyParam { name: String },
}

impl fmt::Display for ContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextError::IdentityNotSet => write!(f, "identity has not been set"),
            ContextError::MissingParam { name } => {
                write!(f, "route parameter '{}' not found", name)
            }
            ContextError::EmptyParam { name } => {
                write!(f, "route parameter '{}' is empty", name)
            }
        }
    }
}

impl std::error::Error for ContextError {}

/// Path parameters captured from `:name` template segments.
///
/// Keys are unique: inserting an existing name replaces its value, so a template that
/// repeats a name keeps the last captured segment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteParams {
    inner: ParamVec,
}

impl RouteParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: Arc<str>, value: String) {
        if let Some(slot) = self.inner.iter_mut().find(|(k, _)| *k == name) {
            slot.1 = value;
        } else {
            self.inner.push((name, value));
        }
    }

    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner
            .iter()
            .find(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Look up a parameter that must be present and non-empty.
    pub fn require(&self, name: &str) -> Result<&str, ContextError> {
        match self.get(name) {
            None => Err(ContextError::MissingParam {
                name: name.to_string(),
            }),
            Some("") => Err(ContextError::EmptyParam {
                name: name.to_string(),
            }),
            Some(value) => Ok(value),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(k, v)| (k.as_ref(), v.as_str()))
    }
}

/// Handler-defined values attached to a request. The router creates it empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomData {
    values: HashMap<String, Value>,
}

impl CustomData {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Store a value, returning the previous one for the key.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Per-request context passed to guards and handlers
#[derive(Debug, Clone, Default)]
pub struct RouteContext {
    params: RouteParams,
    custom_data: CustomData,
    identity: Option<String>,
    required_permissions: Vec<Permission>,
}

impl RouteContext {
    #[must_use]
    pub fn new(params: RouteParams, required_permissions: Vec<Permission>) -> Self {
        Self {
            params,
            custom_data: CustomData::default(),
            identity: None,
            required_permissions,
        }
    }

    #[inline]
    #[must_use]
    pub fn params(&self) -> &RouteParams {
        &self.params
    }

    #[must_use]
    pub fn custom_data(&self) -> &CustomData {
        &self.custom_data
    }

    pub fn custom_data_mut(&mut self) -> &mut CustomData {
        &mut self.custom_data
    }

    /// Identity resolved by the authorization guard.
    pub fn identity(&self) -> Result<&str, ContextError> {
        self.identity.as_deref().ok_or(ContextError::IdentityNotSet)
    }

    pub fn set_identity(&mut self, identity: impl Into<String>) {
        self.identity = Some(identity.into());
    }

    #[must_use]
    pub fn required_permissions(&self) -> &[Permission] {
        &self.required_permissions
    }

    /// True when every required permission is in `held`. An empty requirement always passes.
    #[must_use]
    pub fn has_required_permissions(&self, held: &[Permission]) -> bool {
        self.required_permissions.iter().all(|p| held.contains(p))
    }
}
