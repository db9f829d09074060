use std::fmt;

/// Stable identifier of one serializable scene-graph model.
///
/// Identifiers key the entries of a `json` change-set document, so a runtime must hand out the same
/// id for the same model for as long as a plot handle lives.
#[derive(
    Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct ModelId(String);

impl ModelId {
    /// Wrap an identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModelId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Sequential id allocator scoped to one bind call.
///
/// Starting every bind from the same seed keeps ids (and therefore payloads) reproducible across
/// render calls for the same object.
#[derive(Debug, Clone)]
pub(crate) struct IdAllocator {
    prefix: &'static str,
    next: u64,
}

impl IdAllocator {
    pub(crate) const DEFAULT_SEED: u64 = 1001;

    pub(crate) fn new(prefix: &'static str) -> Self {
        Self {
            prefix,
            next: Self::DEFAULT_SEED,
        }
    }

    pub(crate) fn next_id(&mut self) -> ModelId {
        let id = ModelId(format!("{}{}", self.prefix, self.next));
        self.next += 1;
        id
    }
}
