use clap::Parser;
use medialens::{Config, DateRange, Pipeline, SearchRequest};
use tracing::info;

/// Search news about an entity, date each article and enrich it with a language model.
#[derive(Debug, Parser)]
#[command(name = "medialens", version, about)]
struct Cli {
    /// Person or organization to search for
    entity: String,

    /// ISO-2 country code
    #[arg(long, default_value = medialens::model::DEFAULT_COUNTRY)]
    country: String,

    /// Topic tag, repeatable; the first three become query variants
    #[arg(long = "tag", value_name = "TAG")]
    tags: Vec<String>,

    /// Short description of the entity, given to the model for disambiguation
    #[arg(long)]
    description: Option<String>,

    /// Window start, YYYY-MM-DD (inclusive)
    #[arg(long, requires = "to")]
    from: Option<String>,

    /// Window end, YYYY-MM-DD (inclusive)
    #[arg(long, requires = "from")]
    to: Option<String>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

impl Cli {
    fn into_request(self) -> SearchRequest {
        let date_range = match (self.from, self.to) {
            (None, None) => None,
            (from_date, to_date) => Some(DateRange { from_date, to_date }),
        };
        SearchRequest {
            entity: self.entity,
            description: self.description,
            country: self.country,
            tags: self.tags,
            date_range,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("medialens=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let pretty = cli.pretty;

    let config = Config::from_env().inspect_err(|e| tracing::error!("invalid configuration: {e}"))?;
    let pipeline = Pipeline::from_config(&config)?;

    let response = pipeline.search(&cli.into_request()).await;
    info!(results = response.results.len(), "done");

    let json = if pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{json}");
    Ok(())
}
