use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use shared::domain::{sample_products, Product, ProductId};
use storage::Storage;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Maintenance commands for the catalog database")]
struct Cli {
    #[arg(long, default_value = "sqlite://./data/catalog.db")]
    database_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Insert the demo products.
    Seed {
        /// Only seed when the table is empty.
        #[arg(long)]
        if_empty: bool,
    },
    Count,
    /// Delete every product. Ids are not reused afterwards.
    Clear,
    AddProduct {
        name: String,
        description: String,
        price: f64,
        quantity: i64,
    },
    RemoveProduct {
        id: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    let cli = Cli::parse();
    let storage = Storage::new(&cli.database_url)
        .await
        .with_context(|| format!("failed to open {}", cli.database_url))?;

    match cli.command {
        Command::Seed { if_empty } => {
            let existing = storage.count_products().await?;
            if if_empty && existing > 0 {
                info!(existing, "table not empty, skipping seed");
                println!("skipped: {existing} products already present");
                return Ok(());
            }
            let created = storage.create_products(&sample_products()).await?;
            for product in &created {
                println!(
                    "created product_id={} name={}",
                    product.id.map(|id| id.0).unwrap_or_default(),
                    product.name
                );
            }
        }
        Command::Count => {
            println!("{}", storage.count_products().await?);
        }
        Command::Clear => {
            let removed = storage.delete_all_products().await?;
            println!("removed {removed} products");
        }
        Command::AddProduct {
            name,
            description,
            price,
            quantity,
        } => {
            let product = Product::new(name, description, price, quantity);
            anyhow::ensure!(product.is_valid(), "product fields are invalid: {product:?}");
            let created = storage.create_product(&product).await?;
            println!(
                "created product_id={}",
                created.id.map(|id| id.0).unwrap_or_default()
            );
        }
        Command::RemoveProduct { id } => {
            let id = ProductId(id);
            if !storage.product_exists(id).await? {
                println!("no product with id {id}");
                return Ok(());
            }
            storage.delete_product(id).await?;
            println!("removed product_id={id}");
        }
    }

    Ok(())
}
