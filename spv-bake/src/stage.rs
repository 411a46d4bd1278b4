/*!
Shading-stage classification from file extensions.
*/

use std::path::{Path, PathBuf};

use glslang::ShaderStage;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum StageError {
    #[error("{}: filename has no extension", .0.display())]
    MissingExtension(PathBuf),
    #[error("{}: unknown shader stage extension `{}`", .0.display(), .1)]
    UnknownExtension(PathBuf, String),
}

/// Infer the pipeline stage of a shader from its path.
///
/// Only the last `.`-delimited extension is examined, using glslang's
/// conventional stage extensions (`foo.vert`, `foo.rgen`, ...).
pub fn from_path(path: &Path) -> Result<ShaderStage, StageError> {
    let Some(extension) = path.extension() else {
        return Err(StageError::MissingExtension(path.to_path_buf()));
    };
    let extension = extension.to_string_lossy();
    from_extension(&extension).ok_or_else(|| {
        StageError::UnknownExtension(path.to_path_buf(), extension.into_owned())
    })
}

fn from_extension(extension: &str) -> Option<ShaderStage> {
    Some(match extension {
        "vert" => ShaderStage::Vertex,
        "tesc" => ShaderStage::TesselationControl,
        "tese" => ShaderStage::TesselationEvaluation,
        "geom" => ShaderStage::Geometry,
        "frag" => ShaderStage::Fragment,
        "comp" => ShaderStage::Compute,
        "rgen" => ShaderStage::RayGeneration,
        "rint" => ShaderStage::Intersect,
        "rahit" => ShaderStage::AnyHit,
        "rchit" => ShaderStage::ClosestHit,
        "rmiss" => ShaderStage::Miss,
        "rcall" => ShaderStage::Callable,
        "task" => ShaderStage::Task,
        "mesh" => ShaderStage::Mesh,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use glslang::ShaderStage;

    use super::{from_path, StageError};

    #[test]
    fn every_stage_extension_resolves() {
        let table = [
            ("shader.vert", ShaderStage::Vertex),
            ("shader.tesc", ShaderStage::TesselationControl),
            ("shader.tese", ShaderStage::TesselationEvaluation),
            ("shader.geom", ShaderStage::Geometry),
            ("shader.frag", ShaderStage::Fragment),
            ("shader.comp", ShaderStage::Compute),
            ("shader.rgen", ShaderStage::RayGeneration),
            ("shader.rint", ShaderStage::Intersect),
            ("shader.rahit", ShaderStage::AnyHit),
            ("shader.rchit", ShaderStage::ClosestHit),
            ("shader.rmiss", ShaderStage::Miss),
            ("shader.rcall", ShaderStage::Callable),
            ("shader.task", ShaderStage::Task),
            ("shader.mesh", ShaderStage::Mesh),
        ];
        for (name, expected) in table {
            assert_eq!(from_path(Path::new(name)).unwrap(), expected, "{name}");
        }
    }

    #[test]
    fn only_the_last_extension_counts() {
        assert_eq!(
            from_path(Path::new("post.blur.frag")).unwrap(),
            ShaderStage::Fragment
        );
    }

    #[test]
    fn missing_extension_is_rejected() {
        assert_eq!(
            from_path(Path::new("shader")),
            Err(StageError::MissingExtension("shader".into()))
        );
    }

    #[test]
    fn unknown_extension_is_rejected() {
        assert_eq!(
            from_path(Path::new("shader.xyz")),
            Err(StageError::UnknownExtension("shader.xyz".into(), "xyz".into()))
        );
    }
}
