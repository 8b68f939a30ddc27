use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use product_visualizer::cli::{run_batch, Console};
use product_visualizer::image::ImageStore;
use product_visualizer::{App, Config, Medium};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "product-visualizer")]
#[command(about = "Place a product image onto marketing media with AI")]
struct CliArgs {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generate a visualization and apply edits in one run.
    Generate {
        /// Product image to place.
        #[arg(long, value_name = "PATH")]
        image: PathBuf,

        /// Marketing medium: mug, t-shirt or billboard.
        #[arg(long, value_parser = parse_medium_arg)]
        medium: Medium,

        /// Edit instruction; repeat to apply several edits in order.
        #[arg(long = "edit", value_name = "TEXT")]
        edits: Vec<String>,

        /// Directory for generated images.
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },
    /// Drive a session command by command from stdin.
    Interactive {
        /// Directory for saved images.
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },
}

fn parse_medium_arg(input: &str) -> std::result::Result<Medium, String> {
    input.parse::<Medium>().map_err(|_| {
        format!(
            "Invalid medium '{}'. Expected one of: mug, t-shirt, billboard",
            input
        )
    })
}

fn session_output_dir(requested: Option<PathBuf>) -> PathBuf {
    requested.unwrap_or_else(|| {
        let date = Local::now().format("%Y-%m-%d").to_string();
        PathBuf::from("output").join(format!("{}_{}", date, Uuid::new_v4()))
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "product_visualizer=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    };
    let app = App::from_config(&config);

    match args.command {
        Commands::Generate {
            image,
            medium,
            edits,
            output_dir,
        } => {
            let store = ImageStore::new(&session_output_dir(output_dir));
            match run_batch(&app, &store, &image, medium, &edits).await {
                Ok(paths) => {
                    for path in paths {
                        println!("{}", path.display());
                    }
                    info!("Generation completed successfully");
                    Ok(())
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Interactive { output_dir } => {
            let store = ImageStore::new(&session_output_dir(output_dir));
            info!("Saving images to {}", store.output_dir().display());
            let mut console = Console::new(app, store);
            console
                .run(
                    tokio::io::BufReader::new(tokio::io::stdin()),
                    tokio::io::stdout(),
                )
                .await?;
            Ok(())
        }
    }
}
