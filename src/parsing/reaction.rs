use thiserror::Error;

use crate::utils::fields::split_fields;
use crate::utils::validation::is_real_coefficient;

#[derive(Error, Debug, PartialEq)]
pub enum ParseError {
    #[error("Invalid reaction line: {0}")]
    InvalidFormat(String),

    #[error("Invalid stoichiometric coefficient '{0}'")]
    InvalidCoefficient(String),

    #[error("Reaction declares {declared} term(s) but lists {found}")]
    TermCountMismatch { declared: usize, found: usize },
}

/// One `(component, coefficient)` term of a reaction
#[derive(Debug, Clone, PartialEq)]
pub struct SpeciesTerm {
    pub formula: Option<String>,
    pub coefficient: f64,
}

/// A parsed reaction: the species it forms and the components it is built from
#[derive(Debug, Clone, PartialEq)]
pub struct ReactionRecord {
    pub name: String,
    pub terms: Vec<SpeciesTerm>,
}

impl ReactionRecord {
    /// Formulas this reaction actually references: non-empty and with `|coefficient| >= 0.001`
    pub fn references(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().filter_map(|t| match &t.formula {
            Some(f) if !f.is_empty() && is_real_coefficient(t.coefficient) => Some(f.as_str()),
            _ => None,
        })
    }
}

/// Turns one line of a reaction database into a [`ReactionRecord`]
pub trait ReactionParser {
    /// # Errors
    ///
    /// Returns `ParseError` if the line is not a valid reaction.
    fn parse_line(&self, line: &str) -> Result<ReactionRecord, ParseError>;
}

impl<F> ReactionParser for F
where
    F: Fn(&str) -> Result<ReactionRecord, ParseError>,
{
    fn parse_line(&self, line: &str) -> Result<ReactionRecord, ParseError> {
        self(line)
    }
}

/// Parser for comma-separated reaction lines:
///
/// ```text
/// "FeSCN+2", 2, 1.0, "Fe+3", 1.0, "SCN-", -3.02, -2.91
/// ```
///
/// The species name, the number of terms `n`, then `n` pairs of
/// coefficient and component formula. Any further fields (log K values and
/// the like) are ignored.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextReactionParser;

impl ReactionParser for TextReactionParser {
    fn parse_line(&self, line: &str) -> Result<ReactionRecord, ParseError> {
        let fields = split_fields(line).map_err(ParseError::InvalidFormat)?;
        if fields.len() < 2 {
            return Err(ParseError::InvalidFormat(
                "expected species name and term count".to_string(),
            ));
        }

        let name = fields[0].text.trim().to_string();
        if name.is_empty() {
            return Err(ParseError::InvalidFormat("missing species name".to_string()));
        }

        let declared: usize = fields[1].text.trim().parse().map_err(|_| {
            ParseError::InvalidFormat(format!("invalid term count '{}'", fields[1].text))
        })?;

        let width = declared.checked_mul(2).ok_or_else(|| {
            ParseError::InvalidFormat(format!("term count {declared} is too large"))
        })?;

        let rest = &fields[2..];
        if rest.len() < width {
            return Err(ParseError::TermCountMismatch {
                declared,
                found: rest.len() / 2,
            });
        }

        let terms = rest[..width]
            .chunks(2)
            .map(|pair| {
                let coefficient: f64 = pair[0]
                    .text
                    .trim()
                    .parse()
                    .map_err(|_| ParseError::InvalidCoefficient(pair[0].text.clone()))?;
                let formula = pair[1].text.trim();
                Ok(SpeciesTerm {
                    formula: (!formula.is_empty()).then(|| formula.to_string()),
                    coefficient,
                })
            })
            .collect::<Result<Vec<_>, ParseError>>()?;

        Ok(ReactionRecord { name, terms })
    }
}
