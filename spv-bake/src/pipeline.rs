/*!
The compilation pipeline: stage resolution, translation, transforms,
validation, and word-buffer ownership across them.
*/

use std::path::Path;

use glslang::SpirvVersion;
use spirv_tools::binary::Binary;
use thiserror::Error;

use crate::compile::{self, CompileError};
use crate::optimize::{self, OptimizeConfig, OptimizeError, RemapError};
use crate::stage::{self, StageError};
use crate::target::TargetEnv;
use crate::validate::{self, ValidateError};

/// Everything the pipeline needs besides the source itself.
#[derive(Clone, Debug)]
pub struct Options {
    pub target: TargetEnv,
    /// Explicit SPIR-V version; the target's default when `None`.
    pub spirv_version: Option<SpirvVersion>,
    /// Remap ids after optimization.
    pub remap: bool,
    pub optimize: OptimizeConfig,
}

/// An owned SPIR-V word buffer, tagged by the allocator that produced
/// it.
///
/// The compiled buffer is a plain `Vec`; transformed buffers belong to
/// the SPIRV-Tools allocator and are released through it when the
/// token drops. Keeping the provenance in the type makes release
/// dispatch on it instead of on convention.
#[derive(Debug)]
pub enum SpirvModule {
    /// Fresh out of the front-end.
    Compiled(Vec<u32>),
    /// Rewritten by the optimizer or the remapper.
    Transformed(Binary),
}

impl SpirvModule {
    /// The module contents as 32-bit words.
    pub fn words(&self) -> &[u32] {
        match self {
            Self::Compiled(words) => words,
            Self::Transformed(binary) => binary.as_ref(),
        }
    }

    /// The module serialized little-endian, byte-for-byte, with no
    /// extra header.
    pub fn to_bytes(&self) -> Vec<u8> {
        let words = self.words();
        words
            .iter()
            .fold(Vec::with_capacity(words.len() * 4), |mut bytes, word| {
                bytes.extend_from_slice(&word.to_le_bytes());
                bytes
            })
    }
}

/// Any stage failure. Each is terminal for the run.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Stage(#[from] StageError),
    #[error(transparent)]
    Compile(#[from] CompileError),
    #[error(transparent)]
    Optimize(#[from] OptimizeError),
    #[error(transparent)]
    Remap(#[from] RemapError),
    #[error(transparent)]
    Validate(#[from] ValidateError),
}

/// Run the whole pipeline over one source file.
///
/// Stages run strictly in order - compile, optimize, remap (when
/// requested), validate - and the first failure aborts the run. Each
/// transform yields a new owned buffer; the superseded one is released
/// through its own allocator when the token is replaced.
pub fn process(path: &Path, source: &str, options: &Options) -> Result<SpirvModule, Error> {
    let stage = stage::from_path(path)?;
    let spirv_version = options.target.resolve_spirv_version(options.spirv_version);
    log::debug!(
        "compiling {} as {:?} for {} (SPIR-V {:?})",
        path.display(),
        stage,
        options.target,
        spirv_version
    );

    let words = compile::compile(source, stage, options.target, spirv_version)?;
    let mut module = SpirvModule::Compiled(words);

    let optimized = optimize::optimize(module.words(), options.target, &options.optimize)?;
    module = SpirvModule::Transformed(optimized);

    if options.remap {
        let remapped = optimize::remap(module.words(), options.target)?;
        module = SpirvModule::Transformed(remapped);
    }

    validate::validate(module.words(), options.target)?;
    Ok(module)
}
