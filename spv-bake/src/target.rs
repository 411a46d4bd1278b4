/*!
Target environment and SPIR-V version resolution.
*/

use std::fmt;

use glslang::{OpenGlVersion, SpirvVersion, Target, VulkanVersion};

/// The client API and version the compiled module must be valid for.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TargetEnv {
    Vulkan1_0,
    Vulkan1_1,
    Vulkan1_2,
    Vulkan1_3,
    OpenGl4_5,
}

impl TargetEnv {
    /// The SPIR-V version implied by this environment when the caller
    /// does not pick one explicitly.
    pub fn default_spirv_version(self) -> SpirvVersion {
        match self {
            Self::Vulkan1_0 => SpirvVersion::SPIRV1_0,
            Self::Vulkan1_1 => SpirvVersion::SPIRV1_3,
            Self::Vulkan1_2 => SpirvVersion::SPIRV1_5,
            Self::Vulkan1_3 => SpirvVersion::SPIRV1_6,
            Self::OpenGl4_5 => SpirvVersion::SPIRV1_0,
        }
    }

    /// Resolve an optional explicit version choice to a concrete
    /// target version.
    pub fn resolve_spirv_version(self, choice: Option<SpirvVersion>) -> SpirvVersion {
        choice.unwrap_or_else(|| self.default_spirv_version())
    }

    /// The front-end target descriptor for this environment.
    pub fn frontend_target(self, spirv_version: SpirvVersion) -> Target {
        match self {
            Self::Vulkan1_0 => Target::Vulkan {
                version: VulkanVersion::Vulkan1_0,
                spirv_version,
            },
            Self::Vulkan1_1 => Target::Vulkan {
                version: VulkanVersion::Vulkan1_1,
                spirv_version,
            },
            Self::Vulkan1_2 => Target::Vulkan {
                version: VulkanVersion::Vulkan1_2,
                spirv_version,
            },
            Self::Vulkan1_3 => Target::Vulkan {
                version: VulkanVersion::Vulkan1_3,
                spirv_version,
            },
            Self::OpenGl4_5 => Target::OpenGL {
                version: OpenGlVersion::OpenGL4_5,
                spirv_version: Some(spirv_version),
            },
        }
    }

    /// The matching SPIRV-Tools environment, shared by the optimizer
    /// and the validator.
    pub fn tools_env(self) -> spirv_tools::TargetEnv {
        match self {
            Self::Vulkan1_0 => spirv_tools::TargetEnv::Vulkan_1_0,
            Self::Vulkan1_1 => spirv_tools::TargetEnv::Vulkan_1_1,
            Self::Vulkan1_2 => spirv_tools::TargetEnv::Vulkan_1_2,
            Self::Vulkan1_3 => spirv_tools::TargetEnv::Vulkan_1_3,
            Self::OpenGl4_5 => spirv_tools::TargetEnv::OpenGL_4_5,
        }
    }
}

impl fmt::Display for TargetEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Vulkan1_0 => "vulkan1.0",
            Self::Vulkan1_1 => "vulkan1.1",
            Self::Vulkan1_2 => "vulkan1.2",
            Self::Vulkan1_3 => "vulkan1.3",
            Self::OpenGl4_5 => "opengl4.5",
        })
    }
}
