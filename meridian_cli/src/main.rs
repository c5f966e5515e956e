use clap::{Parser, Subcommand};

use mimalloc::MiMalloc;

use crate::{reverse::ReverseArgs, route::RouteArgs, search::SearchArgs};

mod context;
mod parsers;
mod reverse;
mod route;
mod search;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a route between two or more stops
    #[command(visible_alias = "r")]
    Route {
        #[command(flatten)]
        args: RouteArgs,
    },
    /// Resolve a position to an address
    Reverse {
        #[command(flatten)]
        args: ReverseArgs,
    },
    /// Look up places matching a free-text query
    Search {
        #[command(flatten)]
        args: SearchArgs,
    },
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::from_filename("./.env.local").ok();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match cli.command {
        Some(Commands::Route { args }) => route::run(args).await?,
        Some(Commands::Reverse { args }) => reverse::run(args).await?,
        Some(Commands::Search { args }) => search::run(args).await?,
        None => {}
    }

    Ok(())
}
