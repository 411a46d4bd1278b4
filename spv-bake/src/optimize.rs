/*!
SPIR-V to SPIR-V transforms: optimization passes and id remapping.
*/

use spirv_tools::binary::Binary;
use spirv_tools::error::{Message, MessageLevel};
use spirv_tools::opt::{self, Optimizer, Passes};
use thiserror::Error;

use crate::target::TargetEnv;

/// Which optimization passes run, and what they must not disturb.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct OptimizeConfig {
    /// Register the performance-oriented pass set.
    pub performance: bool,
    /// Register the size-oriented pass set.
    pub size: bool,
    /// Insert bounds checks so out-of-range access is well-defined.
    pub robust_access: bool,
    /// Keep resource bindings intact even when unused.
    pub preserve_bindings: bool,
    /// Keep specialization constants intact.
    pub preserve_spec_constants: bool,
}

#[derive(Debug, Error)]
#[error("optimization failed")]
pub struct OptimizeError(#[source] pub spirv_tools::error::Error);

#[derive(Debug, Error)]
#[error("id remapping failed")]
pub struct RemapError(#[source] pub spirv_tools::error::Error);

/// Run the configured pass pipeline over a module.
///
/// The pass pipeline runs even when no passes are registered, and the
/// result is always a fresh toolkit-owned buffer released through the
/// toolkit's deallocator. The optimizer's built-in validation stays
/// off; validation is a separate stage of this pipeline.
pub fn optimize(
    words: &[u32],
    target: TargetEnv,
    config: &OptimizeConfig,
) -> Result<Binary, OptimizeError> {
    let mut optimizer = opt::create(Some(target.tools_env()));
    if config.performance {
        optimizer.register_performance_passes();
    }
    if config.size {
        optimizer.register_size_passes();
    }
    if config.robust_access {
        optimizer.register_pass(Passes::GraphicsRobustAccess);
    }
    let options = opt::Options {
        validator_options: None,
        preserve_bindings: config.preserve_bindings,
        preserve_spec_constants: config.preserve_spec_constants,
        ..Default::default()
    };
    optimizer
        .optimize(words, &mut relay, Some(options))
        .map_err(OptimizeError)
}

/// Remap result ids into a compact, deterministic range.
///
/// This can shrink the module's id bound but never changes what it
/// computes.
pub fn remap(words: &[u32], target: TargetEnv) -> Result<Binary, RemapError> {
    let mut optimizer = opt::create(Some(target.tools_env()));
    optimizer.register_pass(Passes::CompactIds);
    let options = opt::Options {
        validator_options: None,
        ..Default::default()
    };
    optimizer
        .optimize(words, &mut relay, Some(options))
        .map_err(RemapError)
}

/// Forward non-fatal toolkit chatter to the log.
fn relay(message: Message) {
    match message.level {
        MessageLevel::Fatal | MessageLevel::InternalError | MessageLevel::Error => {
            log::error!("spirv-opt: {}", message.message);
        }
        MessageLevel::Warning => log::warn!("spirv-opt: {}", message.message),
        MessageLevel::Info | MessageLevel::Debug => log::info!("spirv-opt: {}", message.message),
    }
}
