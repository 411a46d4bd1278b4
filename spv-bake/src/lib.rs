/*!
Ahead-of-time GLSL to SPIR-V compilation.

`spv-bake` turns a single GLSL source file into a validated SPIR-V
binary for a chosen target environment (Vulkan 1.0 through 1.3, or
OpenGL 4.5), optionally running optimization passes and id remapping
before validation. The GLSL front-end is [glslang] and the SPIR-V
optimizer/validator is [SPIRV-Tools]; this crate sequences them and
owns the word-buffer handoff between stages.

The entry point is [`pipeline::process`]. The individual stages are
public so build tooling can drive them separately.

[glslang]: https://github.com/KhronosGroup/glslang
[SPIRV-Tools]: https://github.com/KhronosGroup/SPIRV-Tools
*/

pub mod compile;
pub mod diag;
pub mod optimize;
pub mod pipeline;
pub mod stage;
pub mod target;
pub mod validate;

pub use optimize::OptimizeConfig;
pub use pipeline::{process, Error, Options, SpirvModule};
pub use target::TargetEnv;
