use std::{error::Error, fmt, fs, path::Path, str::FromStr};

use glslang::SpirvVersion;
use spv_bake::{diag, pipeline, OptimizeConfig, TargetEnv};

/// Compile a GLSL shader into a validated SPIR-V binary.
#[derive(argh::FromArgs, Debug)]
struct Args {
    /// the target environment: vulkan1.0, vulkan1.1, vulkan1.2,
    /// vulkan1.3 or opengl4.5
    #[argh(option)]
    target_env: Option<TargetEnvArg>,

    /// the target SPIR-V version, `1.0` through `1.6`. Defaults to the
    /// version implied by the target environment
    #[argh(option)]
    spirv_version: Option<SpirvVersionArg>,

    /// remap SPIR-V ids into a compact, deterministic range
    #[argh(switch)]
    remap: bool,

    /// run the performance-oriented optimization passes
    #[argh(switch)]
    optimize_perf: bool,

    /// run the size-oriented optimization passes
    #[argh(switch)]
    optimize_size: bool,

    /// insert bounds checks so out-of-range access is well-defined
    #[argh(switch)]
    robust_access: bool,

    /// keep resource bindings intact even when unused
    #[argh(switch)]
    preserve_bindings: bool,

    /// keep specialization constants intact
    #[argh(switch)]
    preserve_spec_constants: bool,

    /// show version
    #[argh(switch)]
    version: bool,

    /// the input GLSL file and the output SPIR-V file
    #[argh(positional)]
    files: Vec<String>,
}

/// Newtype so we can implement [`FromStr`] for [`TargetEnv`].
#[derive(Debug, Clone, Copy)]
struct TargetEnvArg(TargetEnv);

impl FromStr for TargetEnvArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(match s.to_lowercase().as_str() {
            "vulkan1.0" => TargetEnv::Vulkan1_0,
            "vulkan1.1" => TargetEnv::Vulkan1_1,
            "vulkan1.2" => TargetEnv::Vulkan1_2,
            "vulkan1.3" => TargetEnv::Vulkan1_3,
            "opengl4.5" => TargetEnv::OpenGl4_5,
            _ => return Err(format!("Invalid value for --target-env: {s}")),
        }))
    }
}

/// Newtype so we can implement [`FromStr`] for [`SpirvVersion`].
#[derive(Debug, Clone)]
struct SpirvVersionArg(SpirvVersion);

impl FromStr for SpirvVersionArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(match s {
            "1.0" => SpirvVersion::SPIRV1_0,
            "1.1" => SpirvVersion::SPIRV1_1,
            "1.2" => SpirvVersion::SPIRV1_2,
            "1.3" => SpirvVersion::SPIRV1_3,
            "1.4" => SpirvVersion::SPIRV1_4,
            "1.5" => SpirvVersion::SPIRV1_5,
            "1.6" => SpirvVersion::SPIRV1_6,
            _ => return Err(format!("Invalid value for --spirv-version: {s}")),
        }))
    }
}

/// Error type for the CLI
#[derive(Debug, Clone)]
struct CliError(&'static str);
impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl Error for CliError {}

fn print_err(error: &dyn Error) {
    eprint!("{error}");

    let mut e = error.source();
    if e.is_some() {
        eprintln!(":");
    } else {
        eprintln!();
    }

    while let Some(source) = e {
        eprintln!("\t{source}");
        e = source.source();
    }
}

/// Emit one coherent diagnostic block for a failed run.
fn report(path: &Path, error: &pipeline::Error) {
    match error {
        pipeline::Error::Compile(e) => {
            eprintln!("{e}");
            if let Some(log) = e.log() {
                for line in diag::format_frontend_log(path, log) {
                    eprintln!("{line}");
                }
            }
        }
        pipeline::Error::Validate(e) => match e.diagnostic() {
            Some(diagnostic) => {
                eprintln!("{}", diag::format_validator_diagnostic(path, diagnostic));
            }
            None => print_err(e),
        },
        other => print_err(other),
    }
}

fn main() {
    if let Err(e) = run() {
        print_err(e.as_ref());
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args: Args = argh::from_env();
    if args.version {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let target = args
        .target_env
        .ok_or(CliError("--target-env is not specified"))?
        .0;
    let (input, output) = match args.files.as_slice() {
        [input, output] => (Path::new(input), Path::new(output)),
        [] => return Err(CliError("Input file path is not specified").into()),
        [_] => return Err(CliError("Output file path is not specified").into()),
        _ => return Err(CliError("Too many positional arguments").into()),
    };

    let source =
        fs::read_to_string(input).map_err(|e| format!("{}: {e}", input.display()))?;

    let options = pipeline::Options {
        target,
        spirv_version: args.spirv_version.map(|v| v.0),
        remap: args.remap,
        optimize: OptimizeConfig {
            performance: args.optimize_perf,
            size: args.optimize_size,
            robust_access: args.robust_access,
            preserve_bindings: args.preserve_bindings,
            preserve_spec_constants: args.preserve_spec_constants,
        },
    };

    let module = match pipeline::process(input, &source, &options) {
        Ok(module) => module,
        Err(error) => {
            report(input, &error);
            std::process::exit(1);
        }
    };

    fs::write(output, module.to_bytes()).map_err(|e| format!("{}: {e}", output.display()))?;
    Ok(())
}
