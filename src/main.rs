use anyhow::Context;
use clap::{Parser, Subcommand};
use is_terminal::IsTerminal;
use minigit::artifacts::core::PagerWriter;
use minigit::config::Config;
use minigit::errors::error_kind;
use minigit::{MergeOutcome, Repository, RepositoryError};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "minigit",
    version = "0.1.0",
    about = "A minimal content-addressed version-control engine",
    long_about = "Tracks snapshots of a working directory as an immutable object graph, \
    supports branching and reconciles divergent histories with a three-way merge.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[arg(
        short = 'C',
        global = true,
        value_name = "PATH",
        help = "Run as if started in <PATH> instead of the current directory"
    )]
    directory: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "Creates the .minigit directory in the current directory or at the given path, \
        with HEAD attached to the unborn branch 'main'."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<PathBuf>,
    },
    #[command(
        name = "add",
        about = "Stage file contents for the next commit",
        long_about = "Stores the content of each file as a blob and records it in the staging index. \
        Directories are added recursively."
    )]
    Add {
        #[arg(index = 1, required = true, help = "Files or directories to stage")]
        paths: Vec<PathBuf>,
    },
    #[command(
        name = "commit",
        about = "Record the staged snapshot",
        long_about = "Creates a commit from HEAD's snapshot with the staged entries applied, \
        then advances the current branch and clears the staging index."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(name = "log", about = "Show the first-parent history of HEAD")]
    Log,
    #[command(
        name = "branch",
        about = "List, create or reset branches",
        long_about = "Without a name, lists every branch and marks the current one. \
        With a name, creates a branch at the start point (HEAD by default)."
    )]
    Branch {
        #[arg(index = 1, help = "The branch to create")]
        name: Option<String>,
        #[arg(index = 2, requires = "name", help = "Revision the branch starts at")]
        start_point: Option<String>,
        #[arg(short, long, requires = "name", help = "Move the branch if it already exists")]
        force: bool,
    },
    #[command(
        name = "checkout",
        about = "Switch branches or detach HEAD at a commit",
        long_about = "Attaches HEAD to the named branch, or detaches it at the given revision, \
        and rewrites the working directory to match the target snapshot."
    )]
    Checkout {
        #[arg(index = 1, help = "Branch name or revision")]
        target: String,
    },
    #[command(
        name = "merge",
        about = "Merge another branch into HEAD",
        long_about = "Reconciles HEAD with the target through their best common ancestor. \
        A clean merge creates a two-parent commit; conflicts are written to the working \
        directory and must be resolved and committed."
    )]
    Merge {
        #[arg(index = 1, help = "Branch or revision to merge")]
        target: String,
    },
    #[command(name = "diff", about = "Show changes between two commits")]
    Diff {
        #[arg(index = 1, help = "The old revision")]
        old: String,
        #[arg(index = 2, default_value = "HEAD", help = "The new revision")]
        new: String,
    },
    #[command(
        name = "hash-object",
        about = "Compute a blob ID and optionally store the blob",
        long_about = "Hashes the content of a file as a blob and can write it to the object database."
    )]
    HashObject {
        #[arg(short, long, help = "Write the object to the object database")]
        write: bool,
        #[arg(index = 1)]
        file: PathBuf,
    },
    #[command(
        name = "cat-file",
        about = "Print the content or type of an object",
        long_about = "Prints a stored object given its full or abbreviated ID."
    )]
    CatFile {
        #[arg(short = 'p', conflicts_with = "show_type", help = "Pretty-print the object content")]
        pretty: bool,
        #[arg(short = 't', help = "Print the object type")]
        show_type: bool,
        #[arg(index = 1)]
        object: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load_from_env() {
        Ok(config) => config,
        Err(error) => return report_error(error),
    };
    init_tracing(&config);

    match run(cli, config) {
        Ok(code) => code,
        Err(error) => report_error(error),
    }
}

fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn report_error(error: anyhow::Error) -> ExitCode {
    if let Some(RepositoryError::NothingToCommit) = error_kind(&error) {
        println!("nothing to commit");
    } else {
        eprintln!("error: {error:#}");
    }

    ExitCode::FAILURE
}

fn run(cli: Cli, config: Config) -> anyhow::Result<ExitCode> {
    if let Some(directory) = &cli.directory {
        std::env::set_current_dir(directory)
            .with_context(|| format!("cannot change to '{}'", directory.display()))?;
    }
    let pwd = std::env::current_dir()?;

    let stdout_is_terminal = std::io::stdout().is_terminal();
    if !stdout_is_terminal {
        colored::control::set_override(false);
    }

    match cli.command {
        Commands::Init { path } => {
            let root = path.unwrap_or(pwd);
            let repository = Repository::new(&root, Box::new(std::io::stdout()), config)?;
            repository.init()?;
            repository.writer().flush()?;
        }
        Commands::Log => {
            if stdout_is_terminal && config.pager_enabled {
                let pager = minus::Pager::new();
                let repository =
                    Repository::open(&pwd, Box::new(PagerWriter::new(pager.clone())), config)?;
                repository.log()?;
                repository.writer().flush()?;
                minus::page_all(pager)?;
            } else {
                let repository = Repository::open(&pwd, Box::new(std::io::stdout()), config)?;
                repository.log()?;
                repository.writer().flush()?;
            }
        }
        command => {
            let repository = Repository::open(&pwd, Box::new(std::io::stdout()), config)?;
            let code = run_in_repository(&repository, command)?;
            repository.writer().flush()?;
            return Ok(code);
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn run_in_repository(repository: &Repository, command: Commands) -> anyhow::Result<ExitCode> {
    match command {
        Commands::Add { paths } => repository.add(&paths)?,
        Commands::Commit { message } => {
            repository.commit(&message)?;
        }
        Commands::Branch {
            name: Some(name),
            start_point,
            force,
        } => {
            repository.create_branch(&name, start_point.as_deref(), force)?;
        }
        Commands::Branch { name: None, .. } => repository.list_branches()?,
        Commands::Checkout { target } => repository.checkout(&target)?,
        Commands::Merge { target } => {
            if let MergeOutcome::ConflictedMerge { .. } = repository.merge(&target)? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Diff { old, new } => {
            repository.diff(&old, &new)?;
        }
        Commands::HashObject { write, file } => {
            repository.hash_object(&file, write)?;
        }
        Commands::CatFile {
            show_type, object, ..
        } => repository.cat_file(&object, show_type)?,
        Commands::Init { .. } | Commands::Log => unreachable!("handled before opening"),
    }

    Ok(ExitCode::SUCCESS)
}
