use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dotenv::dotenv;

mod config;
mod generate;
mod scrape;

use config::Config;
use generate::{GenerateArgs, Provider};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Yaml file holding the job search settings
    #[clap(long, default_value = "config.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search for postings and save the extracted records
    Scrape {
        #[clap(long, default_value = persistence::RECORDS_FILE)]
        output: PathBuf,
        /// Skip the random pauses between requests
        #[clap(long)]
        no_delay: bool,
    },
    /// Write a resume and cover letter for every saved record
    Generate {
        #[clap(long)]
        resume: PathBuf,
        #[clap(long)]
        cover_letter: PathBuf,
        #[clap(long, default_value = persistence::RECORDS_FILE)]
        records: PathBuf,
        #[clap(long, default_value = persistence::APPLICATIONS_FILE)]
        output: PathBuf,
        #[clap(long, value_enum, default_value_t = Provider::Anthropic)]
        provider: Provider,
        #[clap(long)]
        model: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();
    let args = Cli::parse();
    match args.command {
        Commands::Scrape { output, no_delay } => {
            let config = Config::load(&args.config)?;
            scrape::scrape(&config.job_search, &output, no_delay).await
        }
        Commands::Generate {
            resume,
            cover_letter,
            records,
            output,
            provider,
            model,
        } => {
            generate::generate(GenerateArgs {
                records: &records,
                resume: &resume,
                cover_letter: &cover_letter,
                output: &output,
                provider,
                model,
            })
            .await
        }
    }
}
