use clap::Parser;
use error_stack::{Result, ResultExt};
use fileset::error::FilesetError;
use fileset::{Config, Input, ResolveOptions, Resolver, Verbosity};
use std::path::PathBuf;
use std::process::ExitCode;

/// Resolve path patterns into file resources.
///
/// Expands the given patterns against the working directory and either
/// lists the resolved origin/destination pairs, or writes every resolved
/// file under the output root (with the destination prefix applied).
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// Path patterns to resolve, relative to the working directory
    #[arg(required = true)]
    patterns: Vec<String>,

    /// Destination path prefix applied to each resolved resource
    #[arg(short, long)]
    prefix: Option<String>,

    /// Working directory to expand patterns against
    #[arg(short, long)]
    cwd: Option<PathBuf>,

    /// Output root to write resolved resources under. When absent, the
    /// resolved paths are listed instead of written.
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Number of worker threads
    #[arg(short, long, default_value_t = 4)]
    threads: usize,

    /// Print nothing except errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Print every processed path
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match run(cli) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e:?}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), FilesetError> {
    let verbosity = if cli.quiet {
        Verbosity::Quiet
    } else if cli.verbose {
        Verbosity::Verbose
    } else {
        Verbosity::Normal
    };

    let config = Config {
        num_threads: cli.threads,
        verbosity,
        ..Default::default()
    };
    let options = ResolveOptions {
        cwd: cli.cwd,
        prefix: cli.prefix,
    };
    let input = Input::with_options(cli.patterns, options);

    let resources = Resolver::run(input, config).change_context(FilesetError)?;

    match cli.out {
        Some(out) => {
            log::info!("saving {} resource(s) to {}", resources.len(), out.display());
            for mut resource in resources {
                resource
                    .save(Some(&out))
                    .change_context(FilesetError)
                    .attach_printable_lazy(|| {
                        format!("cannot save resource: {:?}", resource.origin())
                    })?;
            }
        }
        None => {
            for resource in &resources {
                if let (Some(origin), Some(dest)) = (resource.origin(), resource.dest()) {
                    println!("{} -> {}", origin.display(), dest.display());
                }
            }
        }
    }

    Ok(())
}
