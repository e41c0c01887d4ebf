use clap::{Parser, Subcommand};
use dtree::commands::{compare, copy, count};
use dtree::drive::http::HttpDrive;
use dtree::retry::Backoff;
use dtree::{auth, DriveError};

#[derive(Parser)]
#[command(version, about = "Reporting and copy tools for a Drive folder tree")]
struct Opts {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Count the direct children of a folder
    Count { folder_id: String },
    /// Recursively count every descendant of a folder
    Report { folder_id: String },
    /// Copy the full contents of a folder into another folder
    Copy {
        source_id: String,
        dest_id: String,
    },
    /// Check whether two folder trees are structurally identical
    Compare { folder_a: String, folder_b: String },
}

async fn run(opts: Opts) -> Result<(), DriveError> {
    let token = auth::get_token().await?;
    let client = HttpDrive::new(token);
    let backoff = Backoff::default();

    match opts.command {
        Command::Count { folder_id } => {
            count::print_shallow_report(&client, &backoff, &folder_id).await?;
        }
        Command::Report { folder_id } => {
            count::print_recursive_report(&client, &backoff, &folder_id).await?;
        }
        Command::Copy { source_id, dest_id } => {
            copy::copy_tree(&client, &backoff, &source_id, &dest_id).await?;
        }
        Command::Compare { folder_a, folder_b } => {
            let identical =
                compare::folders_identical(&client, &backoff, &folder_a, &folder_b).await?;
            if identical {
                println!("The folders are identical.");
            } else {
                println!("The folders are NOT identical.");
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let opts = Opts::parse();

    if let Err(e) = run(opts).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
