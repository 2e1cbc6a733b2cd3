use clap::{Parser, Subcommand, ValueEnum};
use dotenvy::dotenv;
use pantry_buddy::{
    config::{database, items},
    core::{
        CategoryFilter, InventoryStore, SortKey, StockAdjustment, listing,
        monthly::format_monthly_reset_summary,
        report::{build_view, format_card, format_quantity, format_view},
        snapshot,
        store::STORAGE_KEY,
    },
    errors::Result,
};
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pantry-buddy")]
#[command(about = "Household inventory tracker with monthly consumption counters", version)]
struct Cli {
    /// Path to the seed item configuration
    #[arg(long, global = true, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show item cards and the low-stock banner
    List {
        /// Only show items in this category
        #[arg(short, long)]
        category: Option<String>,

        /// Sort order
        #[arg(short, long, value_enum, default_value_t = SortArg::Name)]
        sort: SortArg,
    },

    /// List the categories in use
    Categories,

    /// Add to or remove from an item's stock (e.g. -1, +5)
    Adjust {
        /// Item id
        id: String,

        /// Signed change in stock
        #[arg(allow_negative_numbers = true)]
        delta: f64,
    },

    /// Set an item's stock to an absolute quantity
    Set {
        /// Item id
        id: String,

        /// New stock level (negative values clamp to zero)
        #[arg(allow_negative_numbers = true)]
        amount: f64,
    },

    /// Change an item's recommended stock
    Recommend {
        /// Item id
        id: String,

        /// New recommended stock (must be positive)
        amount: f64,
    },

    /// Zero this month's consumption on every item
    Reset,

    /// Run the new-month check and report what it did
    Rollover,

    /// Write the inventory as a JSON record
    Export {
        /// Output file (default: inventory-storage.json)
        #[arg(short, long, conflicts_with = "stdout")]
        output: Option<PathBuf>,

        /// Print the record instead of writing a file
        #[arg(long)]
        stdout: bool,
    },

    /// Restore item state from a JSON record written by `export`
    Import {
        /// Record to read
        path: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    /// Alphabetical by name
    Name,
    /// Most depleted first
    Stock,
    /// Alphabetical by category
    Category,
}

impl From<SortArg> for SortKey {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::Name => Self::Name,
            SortArg::Stock => Self::Stock,
            SortArg::Category => Self::Category,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    let cli = Cli::parse();

    run(cli)
        .await
        .inspect_err(|e| error!("Command failed: {}", e))
}

async fn run(cli: Cli) -> Result<()> {
    // 3. Seed configuration and database
    let seed_config = items::load_config_or_default(&cli.config)?;
    let db = database::create_connection().await?;
    database::create_tables(&db).await?;

    // 4. Open the store; this is where the monthly rollover check runs
    let mut store = InventoryStore::open(db, &seed_config).await?;
    info!("Inventory ready with {} items", store.items().len());

    match cli.command {
        Commands::List { category, sort } => {
            let view = build_view(
                store.items(),
                &CategoryFilter::from_option(category),
                sort.into(),
            );
            print!("{}", format_view(&view));
        }
        Commands::Categories => {
            for category in listing::categories(store.items()) {
                println!("{category}");
            }
        }
        Commands::Adjust { id, delta } => {
            adjust(&mut store, &id, StockAdjustment::Delta(delta)).await?;
        }
        Commands::Set { id, amount } => {
            adjust(&mut store, &id, StockAdjustment::SetTo(amount)).await?;
        }
        Commands::Recommend { id, amount } => {
            match store.set_recommended_stock(&id, amount).await? {
                Some(item) => println!(
                    "{}: recommended stock is now {} {}",
                    item.name,
                    format_quantity(item.recommended_stock),
                    item.unit
                ),
                None => warn_unknown(&id),
            }
        }
        Commands::Reset => {
            let result = store.reset_monthly_consumption().await?;
            print!("{}", format_monthly_reset_summary(&result));
        }
        Commands::Rollover => match store.ensure_current_month().await? {
            Some(result) => print!("{}", format_monthly_reset_summary(&result)),
            None => println!("Monthly consumption is already current."),
        },
        Commands::Export { output, stdout } => {
            if stdout {
                println!("{}", snapshot::to_json(store.items())?);
            } else {
                let path = output.unwrap_or_else(|| PathBuf::from(format!("{STORAGE_KEY}.json")));
                snapshot::write_snapshot(&path, store.items())?;
                println!("Exported {} items to {}", store.items().len(), path.display());
            }
        }
        Commands::Import { path } => {
            let incoming = snapshot::read_snapshot(&path)?;
            let restored = store.restore(&incoming).await?;
            println!("Restored {restored} of {} items.", incoming.len());
        }
    }

    Ok(())
}

async fn adjust(store: &mut InventoryStore, id: &str, adjustment: StockAdjustment) -> Result<()> {
    if store.update_stock(id, adjustment).await?.is_none() {
        warn_unknown(id);
        return Ok(());
    }
    if let Some(item) = store.item(id) {
        print!("{}", format_card(&item.clone().into()));
    }
    Ok(())
}

fn warn_unknown(id: &str) {
    warn!("No item with id '{}'", id);
    println!("No item with id '{id}'; nothing changed.");
}
