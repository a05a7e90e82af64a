use std::num::ParseIntError;

use crate::error::ResolveError;

/// A piece of a parsed template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text copied to the output unchanged
    Literal(&'a str),
    /// The key between `${` and `}`
    Placeholder(&'a str),
}

impl<'a> Segment<'a> {
    /// The placeholder key, if this segment is one
    pub fn key(&self) -> Option<&'a str> {
        match self {
            Segment::Placeholder(key) => Some(key),
            Segment::Literal(_) => None,
        }
    }
}

pub const RANDOM_NUMBER: &str = "RANDOM.NUMBER";
pub const RANDOM_STRING: &str = "RANDOM.STRING";
pub const STATIC_ALPHABET: &str = "STATIC.ALPHABET";
pub const LOCAL_DATE_TODAY: &str = "LOCAL.DATE.TODAY";
pub const LOCAL_DATETIME_NOW: &str = "LOCAL.DATETIME.NOW";
pub const XML_FILE: &str = "XML.FILE";
pub const RANDOM_UUID: &str = "RANDOM.UUID";

/// Every token name the resolver knows about
pub const KNOWN_TOKENS: [&str; 7] = [
    RANDOM_NUMBER,
    RANDOM_STRING,
    STATIC_ALPHABET,
    LOCAL_DATE_TODAY,
    LOCAL_DATETIME_NOW,
    XML_FILE,
    RANDOM_UUID,
];

/// A recognized runtime token with its arguments parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeToken<'a> {
    /// `RANDOM.NUMBER[:length]`
    RandomNumber { length: Option<u32> },
    /// `RANDOM.STRING:length`
    RandomString { length: usize },
    /// `STATIC.ALPHABET:length`
    StaticAlphabet { length: usize },
    /// `LOCAL.DATE.TODAY:pattern`
    LocalDateToday { pattern: &'a str },
    /// `LOCAL.DATETIME.NOW:pattern`
    LocalDateTimeNow { pattern: &'a str },
    /// `XML.FILE:path`
    XmlFile { path: &'a str },
    /// `RANDOM.UUID`
    RandomUuid,
}

impl<'a> RuntimeToken<'a> {
    /// Classify a placeholder key of the form `NAME[:args]`.
    ///
    /// Returns `Ok(None)` for keys that name no known token, including known
    /// names missing a required argument. `_` and `.` are interchangeable in
    /// the name, so `RANDOM_UUID` is the same token as `RANDOM.UUID`.
    pub fn classify(key: &'a str) -> Result<Option<Self>, ResolveError> {
        let (name, args) = match key.split_once(':') {
            Some((name, args)) => (name, Some(args)),
            None => (key, None),
        };
        let name = name.replace('_', ".");

        let token = match (name.as_str(), args) {
            (RANDOM_NUMBER, None) => RuntimeToken::RandomNumber { length: None },
            (RANDOM_NUMBER, Some(args)) => RuntimeToken::RandomNumber {
                length: Some(parse_length(key, args)?),
            },
            (RANDOM_STRING, Some(args)) => RuntimeToken::RandomString {
                length: parse_length(key, args)? as usize,
            },
            (STATIC_ALPHABET, Some(args)) => RuntimeToken::StaticAlphabet {
                length: parse_length(key, args)? as usize,
            },
            (LOCAL_DATE_TODAY, Some(pattern)) => RuntimeToken::LocalDateToday { pattern },
            (LOCAL_DATETIME_NOW, Some(pattern)) => RuntimeToken::LocalDateTimeNow { pattern },
            (XML_FILE, Some(path)) => RuntimeToken::XmlFile { path },
            (RANDOM_UUID, _) => RuntimeToken::RandomUuid,
            _ => return Ok(None),
        };
        Ok(Some(token))
    }

    /// Canonical name of this token kind
    pub fn name(&self) -> &'static str {
        match self {
            RuntimeToken::RandomNumber { .. } => RANDOM_NUMBER,
            RuntimeToken::RandomString { .. } => RANDOM_STRING,
            RuntimeToken::StaticAlphabet { .. } => STATIC_ALPHABET,
            RuntimeToken::LocalDateToday { .. } => LOCAL_DATE_TODAY,
            RuntimeToken::LocalDateTimeNow { .. } => LOCAL_DATETIME_NOW,
            RuntimeToken::XmlFile { .. } => XML_FILE,
            RuntimeToken::RandomUuid => RANDOM_UUID,
        }
    }
}

/// Lengths follow a Java `int`: non-negative and at most `i32::MAX`
pub const MAX_LENGTH: u32 = i32::MAX as u32;

fn parse_length(token: &str, digits: &str) -> Result<u32, ResolveError> {
    let length: u32 = digits
        .parse()
        .map_err(|source: ParseIntError| ResolveError::InvalidLength {
            token: token.to_string(),
            source,
        })?;
    if length > MAX_LENGTH {
        return Err(ResolveError::LengthTooLarge {
            token: token.to_string(),
            length,
        });
    }
    Ok(length)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_random_number() {
        assert_eq!(
            RuntimeToken::classify("RANDOM.NUMBER").unwrap(),
            Some(RuntimeToken::RandomNumber { length: None })
        );
        assert_eq!(
            RuntimeToken::classify("RANDOM.NUMBER:3").unwrap(),
            Some(RuntimeToken::RandomNumber { length: Some(3) })
        );
    }

    #[test]
    fn test_classify_underscore_alias() {
        assert_eq!(
            RuntimeToken::classify("RANDOM_NUMBER:12").unwrap(),
            Some(RuntimeToken::RandomNumber { length: Some(12) })
        );
        assert_eq!(
            RuntimeToken::classify("RANDOM_UUID").unwrap(),
            Some(RuntimeToken::RandomUuid)
        );
    }

    #[test]
    fn test_classify_pattern_keeps_colons() {
        assert_eq!(
            RuntimeToken::classify("LOCAL.DATETIME.NOW:yyyy-MM-dd'T'HH:mm:ss").unwrap(),
            Some(RuntimeToken::LocalDateTimeNow {
                pattern: "yyyy-MM-dd'T'HH:mm:ss"
            })
        );
    }

    #[test]
    fn test_classify_xml_file() {
        assert_eq!(
            RuntimeToken::classify("XML.FILE:soap/request.xml").unwrap(),
            Some(RuntimeToken::XmlFile {
                path: "soap/request.xml"
            })
        );
    }

    #[test]
    fn test_classify_unknown() {
        assert_eq!(RuntimeToken::classify("UNKNOWN_TOKEN").unwrap(), None);
        assert_eq!(RuntimeToken::classify("RANDOM.NUMBERS").unwrap(), None);
        assert_eq!(RuntimeToken::classify("$.body.id").unwrap(), None);
        // required argument missing
        assert_eq!(RuntimeToken::classify("RANDOM.STRING").unwrap(), None);
    }

    #[test]
    fn test_classify_bad_length() {
        for key in [
            "RANDOM.NUMBER:abc",
            "RANDOM.NUMBER:",
            "RANDOM.STRING:-3",
            "STATIC.ALPHABET:4x",
            "STATIC.ALPHABET: 4",
        ] {
            let err = RuntimeToken::classify(key).unwrap_err();
            assert!(
                matches!(&err, ResolveError::InvalidLength { token, .. } if token == key),
                "{key}: {err:?}"
            );
        }
    }

    #[test]
    fn test_classify_rejects_lengths_beyond_int_range() {
        let err = RuntimeToken::classify("STATIC.ALPHABET:18446744073709551615").unwrap_err();
        assert!(matches!(err, ResolveError::InvalidLength { .. }), "{err:?}");

        let err = RuntimeToken::classify("RANDOM.STRING:2147483648").unwrap_err();
        assert!(
            matches!(err, ResolveError::LengthTooLarge { length: 2_147_483_648, ref token } if token == "RANDOM.STRING:2147483648"),
            "{err:?}"
        );

        let err = RuntimeToken::classify("RANDOM.NUMBER:4294967295").unwrap_err();
        assert!(matches!(err, ResolveError::LengthTooLarge { .. }), "{err:?}");
    }

    #[test]
    fn test_classify_accepts_int_max() {
        assert_eq!(
            RuntimeToken::classify("STATIC.ALPHABET:2147483647").unwrap(),
            Some(RuntimeToken::StaticAlphabet {
                length: 2_147_483_647
            })
        );
    }

    #[test]
    fn test_uuid_ignores_suffix() {
        assert_eq!(
            RuntimeToken::classify("RANDOM.UUID:ignored").unwrap(),
            Some(RuntimeToken::RandomUuid)
        );
    }

    #[test]
    fn test_names_round_trip() {
        for name in KNOWN_TOKENS {
            let key = format!("{name}:1");
            let token = RuntimeToken::classify(&key).unwrap().unwrap();
            assert_eq!(token.name(), name);
        }
    }

    #[test]
    fn test_segment_key() {
        assert_eq!(Segment::Placeholder("a").key(), Some("a"));
        assert_eq!(Segment::Literal("a").key(), None);
    }
}
