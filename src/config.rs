use std::path::PathBuf;

/// What to do with a `${...}` placeholder that names no known token
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownTokens {
    /// Leave the placeholder in the output verbatim
    #[default]
    Keep,
    /// Fail the resolution with [`ResolveError::UnknownToken`](crate::ResolveError::UnknownToken)
    Reject,
}

/// Resolver settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Base directory for relative `XML.FILE` paths
    pub resource_root: PathBuf,
    pub unknown_tokens: UnknownTokens,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            resource_root: PathBuf::from("."),
            unknown_tokens: UnknownTokens::Keep,
        }
    }
}

impl ResolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resource_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.resource_root = root.into();
        self
    }

    pub fn with_unknown_tokens(mut self, policy: UnknownTokens) -> Self {
        self.unknown_tokens = policy;
        self
    }
}
