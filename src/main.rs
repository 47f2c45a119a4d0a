use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use sarx::index::suffix_array::{
    BuiltSuffixArray, Semantics, SuffixArrayBuilder, SuffixArrayReader, SuffixQueries,
};
use sarx::index::{build_index_with_progress, open_index, stats};
use sarx::output::{print_ordering, print_suffix_table};
use sarx::utils::{get_config_path, remove_index, AppConfig};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "sarx")]
#[command(about = "Suffix arrays with LCP and constant-time substring comparison")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

/// Where a query gets its suffix array from
#[derive(Args)]
#[group(required = true, multiple = false)]
struct Source {
    /// Query the stored index of this file
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Build an in-memory array over this text
    #[arg(short, long)]
    text: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build or rebuild the index for a file
    Build {
        /// File to index
        path: PathBuf,

        /// Force full rebuild
        #[arg(long)]
        force: bool,

        /// Rank cyclic rotations instead of suffixes
        #[arg(long)]
        rotations: bool,

        /// Lowercase ASCII before building
        #[arg(short = 'i', long)]
        case_insensitive: bool,

        /// Suppress progress and summary output
        #[arg(short, long)]
        quiet: bool,
    },
    /// Print the sorted suffix table
    Show {
        #[command(flatten)]
        source: Source,

        /// Rank rotations (in-memory text only)
        #[arg(long)]
        rotations: bool,

        /// Maximum rows to print
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Compare the length-LEN substrings at I and J (-1, 0 or 1)
    Compare {
        #[command(flatten)]
        source: Source,

        /// Rank rotations (in-memory text only)
        #[arg(long)]
        rotations: bool,

        i: usize,
        j: usize,
        len: usize,
    },
    /// Longest common prefix of the suffixes at I and J
    Lcp {
        #[command(flatten)]
        source: Source,

        /// Rank rotations (in-memory text only)
        #[arg(long)]
        rotations: bool,

        i: usize,
        j: usize,
    },
    /// Show index statistics
    Stats {
        /// Indexed file
        path: PathBuf,
    },
    /// List all indexed files
    List,
    /// Remove an index
    Remove {
        /// File to remove the index for
        path: PathBuf,
    },
    /// Print the effective configuration
    Config {
        /// Write the configuration file with current values
        #[arg(long)]
        init: bool,
    },
}

/// A suffix array held in memory or mapped from an index
enum Loaded {
    Memory(BuiltSuffixArray),
    Stored(SuffixArrayReader),
}

impl Loaded {
    fn load(source: &Source, rotations: bool, config: &AppConfig) -> Result<Self> {
        if let Some(path) = &source.file {
            return Ok(Loaded::Stored(open_index(path)?));
        }

        let text = source.text.as_deref().unwrap_or_default();
        let mut build = config.build.clone();
        if rotations {
            build.semantics = Semantics::Rotations;
        }
        let built = SuffixArrayBuilder::new(build).build(text.as_bytes())?;
        Ok(Loaded::Memory(built))
    }

    fn queries(&self) -> &dyn SuffixQueries {
        match self {
            Loaded::Memory(built) => &built.array,
            Loaded::Stored(reader) => reader,
        }
    }

    fn text(&self) -> &[u8] {
        match self {
            Loaded::Memory(built) => &built.text,
            Loaded::Stored(reader) => reader.text(),
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = AppConfig::load()?;
    let color = !cli.no_color;

    match cli.command {
        Commands::Build {
            path,
            force,
            rotations,
            case_insensitive,
            quiet,
        } => {
            let mut build = config.build.clone();
            if rotations {
                build.semantics = Semantics::Rotations;
            }
            if case_insensitive {
                build.case_insensitive = true;
            }
            build_index_with_progress(&path, &build, force, quiet)?;
        }
        Commands::Show {
            source,
            rotations,
            limit,
        } => {
            let loaded = Loaded::load(&source, rotations, &config)?;
            print_suffix_table(
                loaded.queries(),
                loaded.text(),
                limit.unwrap_or(config.show_limit),
                config.preview_width,
                color,
            )?;
        }
        Commands::Compare {
            source,
            rotations,
            i,
            j,
            len,
        } => {
            let loaded = Loaded::load(&source, rotations, &config)?;
            let ordering = loaded.queries().compare(i, j, len)?;
            print_ordering(ordering, color)?;
        }
        Commands::Lcp {
            source,
            rotations,
            i,
            j,
        } => {
            let loaded = Loaded::load(&source, rotations, &config)?;
            println!("{}", loaded.queries().longest_common_prefix(i, j)?);
        }
        Commands::Stats { path } => {
            stats::show_stats(&path)?;
        }
        Commands::List => {
            stats::list_indexes()?;
        }
        Commands::Remove { path } => {
            remove(&path)?;
        }
        Commands::Config { init } => {
            show_config(&config, init)?;
        }
    }

    Ok(())
}

fn remove(path: &Path) -> Result<()> {
    let source = path.canonicalize().context("Invalid path")?;
    if remove_index(&source)? {
        println!("Removed index for: {}", source.display());
    } else {
        println!("No index found for: {}", source.display());
    }
    Ok(())
}

fn show_config(config: &AppConfig, init: bool) -> Result<()> {
    if init {
        config.save()?;
        println!("Wrote {}", get_config_path()?.display());
        return Ok(());
    }

    println!("# {}", get_config_path()?.display());
    println!("{}", serde_json::to_string_pretty(config)?);

    Ok(())
}
