use clap::{Parser, Subcommand};
use serde::Serialize;
use std::{fmt::Display, path::PathBuf};
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::prelude::*;
use wallhaven_scraper::{
    hex_to_rgb,
    wallhaven::{
        Category, Order, Purity, SearchOption, Sorting, WallhavenClient, WallpaperId,
        DEFAULT_BASE_URL,
    },
    HttpFetcher,
};

#[derive(Debug, Parser)]
#[command(version, about = "Scrape wallpaper listings and details")]
struct Cli {
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Print records as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Search wallpapers
    Search {
        #[arg(default_value = "")]
        query: String,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long, value_delimiter = ',')]
        purity: Vec<Purity>,
        #[arg(long, value_delimiter = ',')]
        categories: Vec<Category>,
        #[arg(long, value_enum)]
        sorting: Option<Sorting>,
        #[arg(long, value_enum)]
        order: Option<Order>,
        /// e.g. 1920x1080,2560x1440
        #[arg(long, value_delimiter = ',', value_parser = parse_size)]
        resolutions: Vec<(u32, u32)>,
    },
    /// List the uploads of a user
    Uploads {
        user: String,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long, value_delimiter = ',')]
        purity: Vec<Purity>,
    },
    /// Show the details of a wallpaper
    Detail { id: WallpaperId },
    /// Download the full-resolution image of a wallpaper
    Download {
        id: WallpaperId,
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
    /// Convert a hex color to RGB
    Color { hex: String },
}

fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once('x')
        .ok_or_else(|| format!("Expected WIDTHxHEIGHT, got {:?}", s))?;
    let dimension = |v: &str| v.trim().parse::<u32>().map_err(|e| e.to_string());
    Ok((dimension(w)?, dimension(h)?))
}

fn print<T: Serialize + Display>(record: &T, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(record)?);
    } else {
        println!("{}", record.to_string().trim_end());
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| {
                "info,html5ever=error,selectors=error,hyper=warn,reqwest=info".into()
            }),
        )
        .with(ErrorLayer::default())
        .init();

    let cli = Cli::parse();
    let client = WallhavenClient::with_base_url(HttpFetcher::default(), &cli.base_url);

    match cli.command {
        Command::Search {
            query,
            page,
            purity,
            categories,
            sorting,
            order,
            resolutions,
        } => {
            let mut options = vec![];
            if !categories.is_empty() {
                options.push(SearchOption::Categories(categories));
            }
            if !purity.is_empty() {
                options.push(SearchOption::Purity(purity));
            }
            if let Some(sorting) = sorting {
                options.push(SearchOption::Sorting(sorting));
            }
            if let Some(order) = order {
                options.push(SearchOption::Order(order));
            }
            if !resolutions.is_empty() {
                options.push(SearchOption::Resolutions(resolutions));
            }
            if let Some(page) = page {
                options.push(SearchOption::Page(page));
            }
            let listing = client.search(&query, &options).await?;
            print(&listing, cli.json)?;
        }
        Command::Uploads { user, page, purity } => {
            let mut options = vec![];
            if !purity.is_empty() {
                options.push(SearchOption::Purity(purity));
            }
            if let Some(page) = page {
                options.push(SearchOption::Page(page));
            }
            let listing = client.user_uploads(&user, &options).await?;
            print(&listing, cli.json)?;
        }
        Command::Detail { id } => {
            let record = client.details(id).await?;
            print(&record, cli.json)?;
        }
        Command::Download { id, dir } => {
            let record = client.details(id).await?;
            let path = client.download(&record, &dir).await?;
            info!("Downloaded {}", record.image_url);
            println!("{}", path.display());
        }
        Command::Color { hex } => {
            let rgb = hex_to_rgb(&hex)?;
            print(&rgb, cli.json)?;
        }
    }

    Ok(())
}
