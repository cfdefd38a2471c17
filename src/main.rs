#![allow(dead_code)]

use crate::areas::repository::Repository;
use clap::{Parser, Subcommand};

mod areas;
mod artifacts;
mod commands;

#[derive(Parser)]
#[command(
    name = "minigit",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A minimal content-addressed version control system",
    long_about = "minigit is a minimal local version control system built on a \
    content-addressed commit graph. It supports staging, commits, branches, \
    checkouts and three-way merges, all stored under a .minigit/ directory.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
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
        long_about = "This command creates the .minigit/ layout in the current directory. \
        It fails if a repository already exists here."
    )]
    Init,
    #[command(
        name = "add",
        about = "Add a file or directory to the staging area",
        long_about = "This command hashes the given file (or every file under the given \
        directory), stores the resulting blobs and records them in the index."
    )]
    Add {
        #[arg(index = 1, help = "The file or directory to stage")]
        path: String,
    },
    #[command(
        name = "commit",
        about = "Create a new commit from the staging area",
        long_about = "This command snapshots the index as a new commit on the current \
        branch. It is a no-op when the index matches the parent commit's file set."
    )]
    Commit {
        #[arg(short, long, help = "The commit message (a single line)")]
        message: String,
    },
    #[command(
        name = "log",
        about = "Show the commit history of HEAD",
        long_about = "This command walks the first-parent chain from HEAD and prints \
        each commit's id, date and message."
    )]
    Log,
    #[command(
        name = "branch",
        about = "Create a new branch at the current commit",
        long_about = "This command creates a branch pointing at the commit the current \
        branch is on. It fails if the name is taken or there are no commits yet."
    )]
    Branch {
        #[arg(index = 1, help = "The name of the branch to create")]
        name: String,
    },
    #[command(
        name = "checkout",
        about = "Switch the working directory to a branch or commit",
        long_about = "This command materializes the target snapshot into the working \
        directory and rewrites the index to match. Uncommitted local changes are \
        discarded without prompting."
    )]
    Checkout {
        #[arg(index = 1, help = "The branch name or commit id to check out")]
        target: String,
    },
    #[command(
        name = "merge",
        about = "Merge a branch into the current branch",
        long_about = "This command merges the given branch into the current branch, \
        fast-forwarding when possible and falling back to a three-way merge through \
        the common ancestor otherwise."
    )]
    Merge {
        #[arg(index = 1, help = "The branch to merge in")]
        branch: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::try_parse().unwrap_or_else(|err| {
        let is_help = matches!(
            err.kind(),
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion
        );
        let _ = err.print();
        std::process::exit(if is_help { 0 } else { 1 });
    });

    let pwd = std::env::current_dir()?;
    let mut repository = Repository::new(pwd, Box::new(std::io::stdout()))?;

    match &cli.command {
        Commands::Init => repository.init()?,
        Commands::Add { path } => repository.add(path)?,
        Commands::Commit { message } => repository.commit(message)?,
        Commands::Log => repository.log()?,
        Commands::Branch { name } => repository.branch(name)?,
        Commands::Checkout { target } => repository.checkout(target)?,
        Commands::Merge { branch } => repository.merge(branch)?,
    }

    Ok(())
}
