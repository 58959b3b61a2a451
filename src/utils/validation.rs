//! Centralized validation and helper functions.

use crate::core::element::is_catalog_symbol;

/// Smallest stoichiometric coefficient (in magnitude) that counts as a real reference
pub const MIN_COEFFICIENT: f64 = 0.001;

/// Maximum length of a component formula
pub const MAX_FORMULA_LENGTH: usize = 64;

/// Whether a reaction term with this coefficient actually references its component.
///
/// # Examples
///
/// ```
/// use elt_sync::utils::validation::is_real_coefficient;
///
/// assert!(is_real_coefficient(-2.0));
/// assert!(is_real_coefficient(0.001));
/// assert!(!is_real_coefficient(0.0005));
/// ```
#[must_use]
pub fn is_real_coefficient(coefficient: f64) -> bool {
    coefficient.abs() >= MIN_COEFFICIENT
}

/// Validation error types for user-supplied component data
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Component formula is empty")]
    EmptyFormula,
    #[error("Component formula exceeds {MAX_FORMULA_LENGTH} characters")]
    FormulaTooLong,
    #[error("Component formula contains invalid characters: '{0}'")]
    InvalidFormula(String),
    #[error("No linked elements given")]
    NoElements,
    #[error("Unknown element symbol: '{0}'")]
    UnknownElement(String),
    #[error("Description contains control characters: {0:?}")]
    InvalidDescription(String),
}

/// Validate a component formula typed by a user.
///
/// Formulas may not contain quotes, commas, or whitespace, since they are
/// written verbatim into the catalog file.
///
/// # Errors
///
/// Returns `ValidationError::EmptyFormula`, `ValidationError::FormulaTooLong`,
/// or `ValidationError::InvalidFormula`.
pub fn validate_formula(formula: &str) -> Result<&str, ValidationError> {
    let formula = formula.trim();
    if formula.is_empty() {
        return Err(ValidationError::EmptyFormula);
    }
    if formula.len() > MAX_FORMULA_LENGTH {
        return Err(ValidationError::FormulaTooLong);
    }
    if formula
        .chars()
        .any(|c| c == '"' || c == ',' || c.is_whitespace() || c.is_control())
    {
        return Err(ValidationError::InvalidFormula(formula.to_string()));
    }
    Ok(formula)
}

/// Whether `text` can be stored in a single catalog line
#[must_use]
pub fn is_single_line(text: &str) -> bool {
    !text.chars().any(char::is_control)
}

/// Validate a component description typed by a user.
///
/// # Errors
///
/// Returns `ValidationError::InvalidDescription` if the text holds a line
/// break or any other control character.
pub fn validate_description(description: &str) -> Result<&str, ValidationError> {
    if !is_single_line(description) {
        return Err(ValidationError::InvalidDescription(description.to_string()));
    }
    Ok(description)
}

/// Parse a comma-separated list of element symbols, e.g. `"C, N"`.
///
/// Empty items are skipped and duplicates are dropped, keeping first-seen order.
///
/// # Errors
///
/// Returns `ValidationError::NoElements` if nothing remains, or
/// `ValidationError::UnknownElement` for a symbol that is neither a known
/// element nor `XX`.
pub fn parse_linked_elements(list: &str) -> Result<Vec<String>, ValidationError> {
    let mut elements: Vec<String> = Vec::new();
    for symbol in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !is_catalog_symbol(symbol) {
            return Err(ValidationError::UnknownElement(symbol.to_string()));
        }
        if !elements.iter().any(|e| e == symbol) {
            elements.push(symbol.to_string());
        }
    }
    if elements.is_empty() {
        return Err(ValidationError::NoElements);
    }
    Ok(elements)
}
