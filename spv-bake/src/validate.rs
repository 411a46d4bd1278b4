/*!
Target-environment SPIR-V validation.
*/

use spirv_tools::error::Diagnostic;
use spirv_tools::val::{self, Validator};
use thiserror::Error;

use crate::target::TargetEnv;

#[derive(Debug, Error)]
#[error("validation failed")]
pub struct ValidateError(#[source] pub spirv_tools::error::Error);

impl ValidateError {
    /// The structured record reported by the validator, if it supplied
    /// one. Records surface in discovery order.
    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        self.0.diagnostic.as_ref()
    }
}

/// Validate a module for the target environment.
///
/// The module is handed over as a borrowed word view; nothing is
/// copied.
pub fn validate(words: &[u32], target: TargetEnv) -> Result<(), ValidateError> {
    let validator = val::create(Some(target.tools_env()));
    validator
        .validate(words, Some(val::ValidatorOptions::default()))
        .map_err(ValidateError)
}
