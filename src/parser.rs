use pest::Parser;
use pest::iterators::Pair;
use pest_derive::Parser;
use tracing::trace;

use crate::ast::Segment;
use crate::error::Result;

#[derive(Parser)]
#[grammar = "src/template.pest"]
pub struct TemplateParser;

impl TemplateParser {
    /// Split a template into literal text and `${...}` placeholders
    pub fn parse_input(input: &str) -> Result<Vec<Segment<'_>>> {
        let mut pairs = TemplateParser::parse(Rule::template, input).map_err(Box::new)?;
        let segments: Vec<Segment<'_>> = pairs
            .next()
            .into_iter()
            .flat_map(|template| template.into_inner())
            .filter_map(Self::parse_segment)
            .collect();

        trace!(
            placeholders = segments.iter().filter(|s| s.key().is_some()).count(),
            "parsed template"
        );
        Ok(segments)
    }

    fn parse_segment(pair: Pair<'_, Rule>) -> Option<Segment<'_>> {
        match pair.as_rule() {
            Rule::literal => Some(Segment::Literal(pair.as_str())),
            Rule::placeholder => {
                let key = pair.into_inner().next()?;
                Some(Segment::Placeholder(key.as_str()))
            }
            _ => None,
        }
    }
}

/// Keys of every `${...}` placeholder in `input`, in order of appearance.
///
/// Duplicates are kept. The key is returned verbatim, no validation is done.
pub fn extract_tokens(input: &str) -> Result<Vec<&str>> {
    Ok(TemplateParser::parse_input(input)?
        .into_iter()
        .filter_map(|segment| segment.key())
        .collect())
}
