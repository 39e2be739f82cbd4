use ballotbox::application::engine::VotingEngine;
use ballotbox::domain::ports::BallotStoreBox;
use ballotbox::error::VotingError;
use ballotbox::infrastructure::in_memory::InMemoryBallotStore;
use ballotbox::interfaces::csv::request_reader::{Request, RequestKind, RequestReader};
use ballotbox::interfaces::csv::results_writer::ResultsWriter;
use ballotbox::interfaces::csv::voter_writer::VoterWriter;
use clap::{Parser, ValueEnum};
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Report {
    /// The voter roll, including issued credentials.
    Voters,
    /// Tallies plus the winner (ties listed in full).
    Results,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input requests CSV file
    input: PathBuf,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Which report to write to stdout after processing.
    #[arg(long, value_enum, default_value_t = Report::Results)]
    report: Report,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let store: BallotStoreBox = if let Some(db_path) = cli.db_path {
        persistent_store(db_path)?
    } else {
        Box::new(InMemoryBallotStore::new())
    };
    let engine = VotingEngine::new(store);

    let file = File::open(cli.input).into_diagnostic()?;
    let reader = RequestReader::new(file);
    for request in reader.requests() {
        match request {
            Ok(request) => {
                if let Err(e) = dispatch(&engine, request).await {
                    eprintln!("Error processing request: {}", e);
                }
            }
            Err(e) => {
                eprintln!("Error reading request: {}", e);
            }
        }
    }

    let stdout = io::stdout();
    match cli.report {
        Report::Voters => {
            let voters = engine.list_voters().await.into_diagnostic()?;
            VoterWriter::new(stdout.lock())
                .write_voters(voters)
                .into_diagnostic()?;
        }
        Report::Results => {
            let results = engine.results().await.into_diagnostic()?;
            ResultsWriter::new(stdout.lock())
                .write_results(&results)
                .into_diagnostic()?;
        }
    }

    Ok(())
}

async fn dispatch(engine: &VotingEngine, request: Request) -> ballotbox::error::Result<()> {
    match request.action {
        RequestKind::Register => {
            let (Some(firstname), Some(lastname), Some(email), Some(external_id)) = (
                request.firstname,
                request.lastname,
                request.email,
                request.external_id,
            ) else {
                return Err(invalid_row("register row is missing identity fields"));
            };
            engine
                .register(&firstname, &lastname, &email, &external_id)
                .await?;
            Ok(())
        }
        RequestKind::Vote => {
            let (Some(credential), Some(candidate)) = (request.credential, request.candidate)
            else {
                return Err(invalid_row("vote row is missing credential or candidate"));
            };
            engine.cast_vote(&credential, &candidate).await
        }
    }
}

fn invalid_row(msg: &str) -> VotingError {
    VotingError::Io(io::Error::new(io::ErrorKind::InvalidInput, msg.to_string()))
}

#[cfg(feature = "storage-rocksdb")]
fn persistent_store(db_path: PathBuf) -> Result<BallotStoreBox> {
    use ballotbox::infrastructure::rocksdb::RocksDbBallotStore;
    Ok(Box::new(
        RocksDbBallotStore::open(db_path).into_diagnostic()?,
    ))
}

#[cfg(not(feature = "storage-rocksdb"))]
fn persistent_store(_db_path: PathBuf) -> Result<BallotStoreBox> {
    Err(miette::miette!(
        "--db-path requires building with the storage-rocksdb feature"
    ))
}
