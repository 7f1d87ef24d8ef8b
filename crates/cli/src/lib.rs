mod check;
mod config;
mod dgm;
mod logging;
mod resolve;

pub use config::{CliConfig, default_config_path};
pub use logging::init_logging;

use clap::{Parser, Subcommand};
use groovyscope_groovy::{GroovyVersion, InferenceEngine};
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Parser)]
#[command(
    name = "groovyscope",
    version,
    about = "Static type inference for Groovy source",
    long_about = "Groovyscope infers the static type of any expression in a Groovy file \
                  using the JDK and GDK bindings, the file's own declarations and any \
                  additional source files given with --source."
)]
pub struct Cli {
    /// Groovy release whose extension methods and checker results apply (e.g. 2.4)
    #[arg(long, global = true, value_name = "VERSION")]
    pub groovy_version: Option<GroovyVersion>,

    /// Configuration file. Defaults to ~/.groovyscope/config.json
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Additional Groovy files whose declarations are visible to the analysed file
    #[arg(long = "source", global = true, value_name = "FILE")]
    pub sources: Vec<PathBuf>,

    /// Also log to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the inferred type of an expression
    #[command(
        long_about = "Resolves the expression covering a byte range of FILE. The range is given \
                            either as --offset/--length or by searching for --find TEXT, which \
                            picks the last occurrence unless --first is set."
    )]
    Type {
        /// The Groovy file to analyse
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Byte offset of the expression
        #[arg(long, conflicts_with = "find", required_unless_present = "find")]
        offset: Option<usize>,

        /// Length of the range starting at --offset
        #[arg(long, default_value_t = 1, requires = "offset")]
        length: usize,

        /// Text to search for
        #[arg(long, value_name = "TEXT")]
        find: Option<String>,

        /// Use the first occurrence of --find instead of the last
        #[arg(long, requires = "find")]
        first: bool,

        /// Print the whole resolution as JSON
        #[arg(long)]
        json: bool,
    },
    /// Report unresolved types and declaration problems
    Check {
        /// The Groovy file to analyse
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// List the extension methods of the active Groovy version
    Dgm {
        /// Only methods declared on this type, e.g. java.util.Collection
        #[arg(long, value_name = "FQN")]
        receiver: Option<String>,
    },
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let _guard = init_logging("cli", cli.verbose);

    let config = CliConfig::load(cli.config.as_deref())?;
    let mut options = config.options;
    if let Some(version) = cli.groovy_version {
        options.groovy_version = version;
    }
    debug!("options: {:?}", options);

    let mut engine = InferenceEngine::new(options)?;
    for source in config.sources.iter().chain(cli.sources.iter()) {
        let text = std::fs::read_to_string(source)?;
        engine.add_source(&source.to_string_lossy(), &text);
        info!("Added source {}", source.display());
    }

    match cli.command {
        Commands::Type {
            file,
            offset,
            length,
            find,
            first,
            json,
        } => {
            let target = match (offset, find) {
                (Some(offset), _) => resolve::Target::Range { offset, length },
                (None, Some(text)) => resolve::Target::Text { text, first },
                (None, None) => return Err("either --offset or --find is required".into()),
            };
            resolve::run(&engine, &file, target, json)
        }
        Commands::Check { file } => check::run(&engine, &file),
        Commands::Dgm { receiver } => dgm::run(&engine, receiver.as_deref()),
    }
}
