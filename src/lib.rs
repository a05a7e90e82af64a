//! Runtime token resolution for request templates.
//!
//! Placeholders of the form `${NAME[:args]}` are replaced with generated
//! values:
//!
//! | Token | Value |
//! |---|---|
//! | `${RANDOM.NUMBER}` | current epoch milliseconds |
//! | `${RANDOM.NUMBER:3}` | next sequential 3-digit number: 100, 101, ... |
//! | `${RANDOM.STRING:8}` | 8 random lowercase letters |
//! | `${STATIC.ALPHABET:5}` | `abcde` |
//! | `${LOCAL.DATE.TODAY:yyyy-MM-dd}` | today's local date |
//! | `${LOCAL.DATETIME.NOW:yyyy-MM-dd'T'HH:mm:ss}` | the local date-time |
//! | `${XML.FILE:path/to/file.xml}` | file content escaped for a string literal |
//! | `${RANDOM.UUID}` | a random v4 UUID |
//!
//! Names may use `_` instead of `.` (`${RANDOM_UUID}`). Any other placeholder
//! is left as it is.
//!
//! ```
//! use runtime_tokens::{Resolver, ResolverConfig};
//!
//! let resolver = Resolver::new(ResolverConfig::default());
//! let out = resolver.resolve(r#"{"n": "${RANDOM.NUMBER:3}", "s": "${STATIC.ALPHABET:3}"}"#).unwrap();
//! assert_eq!(out, r#"{"n": "100", "s": "abc"}"#);
//! ```

pub mod ast;
pub mod config;
pub mod datetime;
pub mod error;
pub mod generators;
pub mod parser;
pub mod processor;
pub mod sequence;

pub use ast::{KNOWN_TOKENS, RuntimeToken, Segment};
pub use config::{ResolverConfig, UnknownTokens};
pub use error::{ResolveError, Result};
pub use parser::{TemplateParser, extract_tokens};
pub use processor::{ParamMap, Resolver, known_token_values, resolve_known_tokens, substitute};
pub use sequence::SequenceStore;
