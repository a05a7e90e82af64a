use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use tracing::debug;

use crate::ast::{RuntimeToken, Segment};
use crate::config::{ResolverConfig, UnknownTokens};
use crate::datetime;
use crate::error::{ResolveError, Result};
use crate::generators;
use crate::parser::{TemplateParser, extract_tokens};
use crate::sequence::SequenceStore;

/// Resolved values keyed by the full token text (without `${` and `}`)
pub type ParamMap = HashMap<String, String>;

#[derive(Debug, Clone)]
enum Sequences {
    Global,
    Owned(Arc<SequenceStore>),
}

/// Replaces known `${...}` runtime tokens with generated values
#[derive(Debug, Clone)]
pub struct Resolver {
    config: ResolverConfig,
    sequences: Sequences,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(ResolverConfig::default())
    }
}

impl Resolver {
    /// A resolver with its own, fresh sequence store
    pub fn new(config: ResolverConfig) -> Self {
        Self::with_sequences(config, Arc::new(SequenceStore::new()))
    }

    /// A resolver drawing sequential numbers from `sequences`
    pub fn with_sequences(config: ResolverConfig, sequences: Arc<SequenceStore>) -> Self {
        Self {
            config,
            sequences: Sequences::Owned(sequences),
        }
    }

    /// A resolver backed by [`SequenceStore::global`]
    pub fn global() -> &'static Resolver {
        static GLOBAL: OnceLock<Resolver> = OnceLock::new();
        GLOBAL.get_or_init(|| Resolver {
            config: ResolverConfig::default(),
            sequences: Sequences::Global,
        })
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn sequences(&self) -> &SequenceStore {
        match &self.sequences {
            Sequences::Global => SequenceStore::global(),
            Sequences::Owned(store) => store,
        }
    }

    /// Resolve every known token in `input` (main entry point)
    pub fn resolve(&self, input: &str) -> Result<String> {
        let segments = TemplateParser::parse_input(input)?;
        let params = self.param_map(segments.iter().filter_map(Segment::key))?;
        Ok(substitute_segments(&segments, &params))
    }

    /// Build the parameter map for a list of token keys
    pub fn param_map<'a, I>(&self, tokens: I) -> Result<ParamMap>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut params = ParamMap::new();
        for token in tokens {
            self.populate(&mut params, token)?;
        }
        Ok(params)
    }

    /// Compute the value for `token` and store it in `params`.
    ///
    /// A token already present in the map keeps its value, so every
    /// occurrence of the same text gets the same replacement. Unknown tokens
    /// add nothing unless the config rejects them.
    pub fn populate(&self, params: &mut ParamMap, token: &str) -> Result<()> {
        if params.contains_key(token) {
            return Ok(());
        }

        match RuntimeToken::classify(token)? {
            Some(kind) => {
                let value = self.generate(&kind)?;
                debug!(token, kind = kind.name(), "resolved runtime token");
                params.insert(token.to_string(), value);
            }
            None => match self.config.unknown_tokens {
                UnknownTokens::Keep => debug!(token, "leaving unknown token in place"),
                UnknownTokens::Reject => return Err(ResolveError::UnknownToken(token.to_string())),
            },
        }
        Ok(())
    }

    /// Produce the value for one classified token
    pub fn generate(&self, token: &RuntimeToken<'_>) -> Result<String> {
        match *token {
            RuntimeToken::RandomNumber { length: Some(length) } => self.sequences().next(length),
            RuntimeToken::RandomNumber { length: None } => Ok(generators::epoch_millis()),
            RuntimeToken::RandomString { length } => Ok(generators::random_alpha_string(length)),
            RuntimeToken::StaticAlphabet { length } => Ok(generators::static_alpha_string(length)),
            RuntimeToken::LocalDateToday { pattern } => datetime::today(pattern),
            RuntimeToken::LocalDateTimeNow { pattern } => datetime::now(pattern),
            RuntimeToken::XmlFile { path } => {
                let xml = generators::read_resource(&self.config.resource_root, path)?;
                Ok(generators::escape_java(&xml))
            }
            RuntimeToken::RandomUuid => Ok(generators::random_uuid()),
        }
    }
}

/// Replace every `${key}` whose key is in `params`; others stay verbatim.
pub fn substitute(input: &str, params: &ParamMap) -> Result<String> {
    let segments = TemplateParser::parse_input(input)?;
    Ok(substitute_segments(&segments, params))
}

fn substitute_segments(segments: &[Segment<'_>], params: &ParamMap) -> String {
    let mut result = String::new();
    for segment in segments {
        match segment {
            Segment::Literal(text) => result.push_str(text),
            Segment::Placeholder(key) => match params.get(*key) {
                Some(value) => result.push_str(value),
                None => {
                    result.push_str("${");
                    result.push_str(key);
                    result.push('}');
                }
            },
        }
    }
    result
}

/// Resolve known tokens using the process-wide resolver and sequence store
pub fn resolve_known_tokens(input: &str) -> Result<String> {
    Resolver::global().resolve(input)
}

/// Build a parameter map for every token in `input` with the process-wide
/// resolver, without substituting
pub fn known_token_values(input: &str) -> Result<ParamMap> {
    let tokens = extract_tokens(input)?;
    Resolver::global().param_map(tokens)
}
