//! Scene script construction.
//!
//! The renderer binary animates a four-stage storyboard of the solved
//! integral: the integral statement, the bracketed antiderivative, the
//! evaluated difference, and the simplified result. Antidifferentiation
//! is the renderer's concern; this module only normalizes the statement
//! stage from the parsed request and ships it as JSON.

use serde::{Deserialize, Serialize};

use integro_core::expr::parse_expression;
use integro_core::job::RenderRequest;

use crate::error::RenderError;

/// Normalized input handed to the renderer binary as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneScript {
    /// LaTeX of the full integral statement,
    /// e.g. `\int_{0}^{\pi} 3 x \sin{\left(x \right)}\,dx`.
    pub integral_tex: String,
    /// LaTeX of the integrand alone.
    pub integrand_tex: String,
    /// Integration variable name.
    pub variable: String,
    /// Normalized LaTeX of the lower bound.
    pub lower_tex: String,
    /// Normalized LaTeX of the upper bound.
    pub upper_tex: String,
}

impl SceneScript {
    /// Parse the request fields and compose the statement stage.
    ///
    /// This is where a malformed integrand finally surfaces; the error
    /// becomes the job's failure detail.
    pub fn build(request: &RenderRequest) -> Result<Self, RenderError> {
        let integrand = parse_expression(&request.integrand, &request.variable)?;
        let lower = parse_expression(&request.lower, &request.variable)?;
        let upper = parse_expression(&request.upper, &request.variable)?;

        let integrand_tex = integrand.to_latex();
        let lower_tex = lower.to_latex();
        let upper_tex = upper.to_latex();
        let integral_tex = format!(
            "\\int_{{{lower_tex}}}^{{{upper_tex}}} {integrand_tex}\\,d{}",
            request.variable,
        );

        Ok(Self {
            integral_tex,
            integrand_tex,
            variable: request.variable.clone(),
            lower_tex,
            upper_tex,
        })
    }
}
