use anyhow::Result;
use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use twig::areas::repository::Repository;
use twig::commands::plumbing::cat_file::CatFileMode;
use twig::commands::plumbing::hash_object::hash_file;
use twig::commands::plumbing::update_index::UpdateIndexAction;

#[derive(Parser)]
#[command(
    name = "twig",
    version = "0.1.0",
    about = "A small content-addressed version control tool",
    long_about = "twig stores file snapshots as git-compatible loose objects, \
    stages them through a binary index and records commits on a single current branch.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command initializes a new repository in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<PathBuf>,
    },
    #[command(
        name = "hash-object",
        about = "Hash a file as a blob and optionally write it to the object database"
    )]
    HashObject {
        #[arg(short, long, required = false, help = "Write the object to the object database")]
        write: bool,
        #[arg(index = 1)]
        file: PathBuf,
    },
    #[command(
        name = "cat-file",
        about = "Print the type or the content of an object",
        group(ArgGroup::new("mode").required(true).args(["pretty", "kind"]))
    )]
    CatFile {
        #[arg(short = 'p', help = "Pretty-print the object content")]
        pretty: bool,
        #[arg(short = 't', help = "Print the object type")]
        kind: bool,
        #[arg(index = 1, help = "The object hash")]
        sha: String,
    },
    #[command(
        name = "ls-tree",
        about = "List the contents of a tree object",
        long_about = "This command lists a tree given its hash or the hash of a commit pointing at it."
    )]
    LsTree {
        #[arg(short = 'r', help = "Recurse into subtrees")]
        recursive: bool,
        #[arg(index = 1, help = "The tree or commit hash")]
        sha: String,
    },
    #[command(name = "write-tree", about = "Create tree objects from the current index")]
    WriteTree,
    #[command(
        name = "update-index",
        about = "Stage or unstage a single file",
        group(ArgGroup::new("action").required(true).args(["add", "remove"]))
    )]
    UpdateIndex {
        #[arg(long, help = "Add the file to the index")]
        add: bool,
        #[arg(long, help = "Remove the file from the index")]
        remove: bool,
        #[arg(index = 1)]
        file: PathBuf,
    },
    #[command(name = "ls-files", about = "Show the files in the index")]
    LsFiles {
        #[arg(short = 's', long = "stage", help = "Show mode and object hash")]
        stage: bool,
    },
    #[command(
        name = "add",
        about = "Add file contents to the index",
        long_about = "This command stages files; directories are expanded to every file below them."
    )]
    Add {
        #[arg(index = 1, required = true, num_args = 1.., help = "Files or directories to stage")]
        paths: Vec<PathBuf>,
    },
    #[command(
        name = "commit",
        about = "Create a new commit with the specified message",
        long_about = "This command creates a new commit in the repository with the specified commit message."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(name = "log", about = "Show the commit history of the current branch")]
    Log,
}

fn open_repository() -> Result<Repository> {
    let pwd = std::env::current_dir()?;
    Ok(Repository::discover(&pwd, Box::new(std::io::stdout()))?)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("TWIG_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Init { path } => {
            let pwd = std::env::current_dir()?;
            let path = match path {
                Some(path) => pwd.join(path),
                None => pwd,
            };
            std::fs::create_dir_all(&path)?;

            let repository = Repository::new(&path, Box::new(std::io::stdout()))?;
            repository.init()?
        }
        Commands::HashObject { write, file } => {
            if *write {
                open_repository()?.hash_object(file, true)?;
            } else {
                println!("{}", hash_file(file)?);
            }
        }
        Commands::CatFile { pretty, sha, .. } => {
            let mode = if *pretty {
                CatFileMode::Pretty
            } else {
                CatFileMode::Type
            };
            open_repository()?.cat_file(sha, mode)?
        }
        Commands::LsTree { recursive, sha } => open_repository()?.ls_tree(sha, *recursive)?,
        Commands::WriteTree => {
            open_repository()?.write_tree()?;
        }
        Commands::UpdateIndex { add, file, .. } => {
            let action = if *add {
                UpdateIndexAction::Add
            } else {
                UpdateIndexAction::Remove
            };
            open_repository()?.update_index(file, action)?
        }
        Commands::LsFiles { stage } => open_repository()?.ls_files(*stage)?,
        Commands::Add { paths } => open_repository()?.add(paths)?,
        Commands::Commit { message } => {
            open_repository()?.commit(message)?;
        }
        Commands::Log => open_repository()?.log()?,
    }

    Ok(())
}
