//! Syntactic validation of submitted form fields.
//!
//! Pure functions shared by the submit endpoint and the preview
//! endpoint. Semantic validation (whether the integrand actually
//! renders) is deferred to the renderer worker.

use crate::error::CoreError;
use crate::expr::parse_expression;
use crate::job::RenderRequest;

/// Maximum accepted integrand length, in characters.
pub const MAX_INTEGRAND_LEN: usize = 256;

/// Maximum accepted bound length, in characters.
pub const MAX_BOUND_LEN: usize = 64;

/// Validate the integration variable.
///
/// Rules: exactly one ASCII-alphabetic character, and not one of the
/// reserved words consumed by the parser (`pi`, `sin`, `cos` are all
/// multi-character, so single-character is sufficient).
pub fn validate_variable(variable: &str) -> Result<(), CoreError> {
    let mut chars = variable.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Ok(()),
        _ => Err(CoreError::Validation(format!(
            "Variable must be a single letter, got `{variable}`"
        ))),
    }
}

/// Validate a bound field.
///
/// A bound must be non-empty, within the length limit, and parseable
/// as an expression in the integration variable.
pub fn validate_bound(name: &str, bound: &str, variable: &str) -> Result<(), CoreError> {
    if bound.is_empty() {
        return Err(CoreError::Validation(format!(
            "{name} bound must not be empty"
        )));
    }
    if bound.chars().count() > MAX_BOUND_LEN {
        return Err(CoreError::Validation(format!(
            "{name} bound must not exceed {MAX_BOUND_LEN} characters"
        )));
    }
    parse_expression(bound, variable)
        .map_err(|e| CoreError::Validation(format!("{name} bound is not a valid expression: {e}")))?;
    Ok(())
}

/// Validate a full submission before a job record is created.
///
/// Only syntax is checked here: non-empty integrand within the length
/// limit, a well-formed variable, and parseable bounds. The integrand
/// itself is *not* parsed -- a malformed integrand surfaces as a failed
/// job at render time.
pub fn validate_submission(request: &RenderRequest) -> Result<(), CoreError> {
    if request.integrand.is_empty() {
        return Err(CoreError::Validation(
            "Integrand must not be empty".to_string(),
        ));
    }
    if request.integrand.chars().count() > MAX_INTEGRAND_LEN {
        return Err(CoreError::Validation(format!(
            "Integrand must not exceed {MAX_INTEGRAND_LEN} characters"
        )));
    }
    validate_variable(&request.variable)?;
    validate_bound("Lower", &request.lower, &request.variable)?;
    validate_bound("Upper", &request.upper, &request.variable)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(integrand: &str, variable: &str, lower: &str, upper: &str) -> RenderRequest {
        RenderRequest {
            integrand: integrand.to_string(),
            variable: variable.to_string(),
            lower: lower.to_string(),
            upper: upper.to_string(),
        }
    }

    #[test]
    fn accepts_the_reference_submission() {
        let req = request("3x*sin(x)", "x", "0", "pi");
        assert!(validate_submission(&req).is_ok());
    }

    #[test]
    fn rejects_empty_integrand() {
        let req = request("", "x", "0", "1");
        assert!(validate_submission(&req).is_err());
    }

    #[test]
    fn rejects_oversized_integrand() {
        let req = request(&"x+".repeat(MAX_INTEGRAND_LEN), "x", "0", "1");
        assert!(validate_submission(&req).is_err());
    }

    #[test]
    fn rejects_empty_bound() {
        let req = request("x", "x", "", "1");
        assert!(validate_submission(&req).is_err());
    }

    #[test]
    fn rejects_unparseable_bound() {
        let req = request("x", "x", "0", "1+");
        assert!(validate_submission(&req).is_err());
    }

    #[test]
    fn accepts_symbolic_bounds() {
        let req = request("x", "x", "-pi", "2pi");
        assert!(validate_submission(&req).is_ok());
    }

    #[test]
    fn does_not_parse_the_integrand() {
        // Semantic integrand errors are deferred to render time.
        let req = request("3**)bad", "x", "0", "1");
        assert!(validate_submission(&req).is_ok());
    }

    #[test]
    fn rejects_multi_character_variable() {
        assert!(validate_variable("xy").is_err());
        assert!(validate_variable("").is_err());
        assert!(validate_variable("2").is_err());
        assert!(validate_variable("t").is_ok());
    }
}
