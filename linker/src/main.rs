use ada_link::link::{self, LinkOptions};
use ada_link::{entry_procedure_in_file, link_program};
use clap::{CommandFactory, Parser as ClapParser, Subcommand};
use std::path::{Path, PathBuf};

/// adalink - Link compiled Ada-subset programs with the runtime library
#[derive(ClapParser)]
#[command(name = "adalink")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the name of the main procedure defined in an LLVM IR file
    Entry {
        /// Input LLVM IR file
        #[arg(value_name = "INPUT")]
        input: PathBuf,
    },

    /// Link an LLVM IR file with the runtime into an executable
    Link {
        /// Input LLVM IR file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output executable name (default: input filename without extension)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Main procedure name (default: detected from the IR)
        #[arg(long, value_name = "NAME")]
        entry: Option<String>,

        /// Prebuilt runtime archive (skips the runtime build)
        #[arg(long, value_name = "PATH")]
        runtime: Option<PathBuf>,

        /// Use the existing runtime archive instead of rebuilding it
        #[arg(long)]
        skip_runtime_build: bool,

        /// C compiler driver used for linking
        #[arg(long, env = "ADALINK_CC", default_value = "clang")]
        cc: String,
    },

    /// Generate shell completions for bash, zsh, fish, or powershell
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Entry { input } => {
            println!("{}", entry_procedure_in_file(&input)?);
            Ok(())
        }
        Commands::Link {
            input,
            output,
            entry,
            runtime,
            skip_runtime_build,
            cc,
        } => link_command(&input, output, entry, runtime, skip_runtime_build, cc),
        Commands::Completions { shell } => {
            generate_completions(shell);
            Ok(())
        }
    }
}

fn link_command(
    input: &Path,
    output: Option<PathBuf>,
    entry: Option<String>,
    runtime: Option<PathBuf>,
    skip_runtime_build: bool,
    cc: String,
) -> Result<(), Box<dyn std::error::Error>> {
    // Default: strip .ll extension and use as output name
    let output = output.unwrap_or_else(|| {
        PathBuf::from(
            input
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("output"),
        )
    });

    let entry = match entry {
        Some(name) => name,
        None => {
            let name = entry_procedure_in_file(input)?;
            println!("Using '{}' as main procedure", name);
            name
        }
    };

    let toolchain = link::check_cc(&cc)?;
    println!("Using {}", toolchain);

    let runtime_lib = match runtime {
        Some(path) => path,
        None if skip_runtime_build => PathBuf::from(link::DEFAULT_RUNTIME_LIB),
        None => {
            println!("Building runtime...");
            link::build_runtime()?
        }
    };

    println!("Linking...");
    link_program(&LinkOptions {
        ir_file: input.to_path_buf(),
        runtime_lib,
        output: output.clone(),
        entry,
        cc,
    })?;

    println!("\n✅ Successfully linked ./{}", output.display());
    println!("Run it with: ./{}", output.display());

    Ok(())
}

fn generate_completions(shell: clap_complete::Shell) {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
}
