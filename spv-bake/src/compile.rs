/*!
GLSL front-end drive.

The front-end runs in three gated steps: preprocess and parse happen
when the shader object is created, link and code generation when it is
compiled. Each step must succeed before the next runs, and the first
failure aborts with the front-end's log text attached.
*/

use glslang::error::GlslangError;
use glslang::{
    Compiler, CompilerOptions, Shader, ShaderInput, ShaderSource, ShaderStage, SourceLanguage,
    SpirvVersion,
};
use thiserror::Error;

use crate::target::TargetEnv;

#[derive(Debug, Error)]
pub enum CompileError {
    /// The process-wide front-end instance could not be acquired.
    #[error("the GLSL front-end is unavailable")]
    FrontendUnavailable,
    #[error("shader source is not representable as a C string")]
    InvalidSource,
    #[error("preprocessing failed")]
    Preprocess { log: String },
    #[error("parsing failed")]
    Parse { log: String },
    #[error("linking failed")]
    Link { log: String },
    #[error(transparent)]
    Frontend(GlslangError),
}

impl CompileError {
    /// The front-end log text accompanying this failure, if any.
    pub fn log(&self) -> Option<&str> {
        match self {
            Self::Preprocess { log } | Self::Parse { log } | Self::Link { log } => Some(log),
            _ => None,
        }
    }
}

/// Translate one GLSL compilation unit into SPIR-V words.
///
/// The input descriptor uses GLSL source language with the front-end's
/// default version, profile and message settings; only the target is
/// supplied by the caller. All front-end handles are scoped to this
/// call.
pub fn compile(
    source: &str,
    stage: ShaderStage,
    target: TargetEnv,
    spirv_version: SpirvVersion,
) -> Result<Vec<u32>, CompileError> {
    let compiler = Compiler::acquire().ok_or(CompileError::FrontendUnavailable)?;
    let source = ShaderSource::try_from(source).map_err(|_| CompileError::InvalidSource)?;
    let options = CompilerOptions {
        source_language: SourceLanguage::GLSL,
        target: target.frontend_target(spirv_version),
        ..Default::default()
    };
    let input = ShaderInput::new(&source, stage, &options, None).map_err(classify)?;
    let shader = Shader::new(compiler, input).map_err(classify)?;
    let words = shader.compile().map_err(classify)?;
    debug_assert!(!words.is_empty());
    Ok(words)
}

fn classify(error: GlslangError) -> CompileError {
    match error {
        GlslangError::PreprocessError(log) => CompileError::Preprocess { log },
        GlslangError::ParseError(log) => CompileError::Parse { log },
        GlslangError::LinkError(log) => CompileError::Link { log },
        other => CompileError::Frontend(other),
    }
}
