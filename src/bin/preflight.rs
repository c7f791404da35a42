use library_seed::infra::{config, logging};
use library_seed::{Collection, DocumentStore, PostgresStore};

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight\n\
         \n\
         Requires env vars:\n\
           DATABASE_URL\n\
         Optional:\n\
           DB_MAX_CONNECTIONS, SEED_DATASET\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init();

    // No options; any argument (including --help) prints usage.
    if std::env::args().nth(1).is_some() {
        usage_and_exit();
    }

    // Force-read config (nice error messages if missing)
    let database_url = config::database_url()?;
    let max_connections = config::max_connections()?;
    let dataset = config::seed_dataset()?;

    println!("> Preflight:");
    println!("  DB_MAX_CONNECTIONS={}", max_connections);
    println!("  SEED_DATASET={}", dataset.name);

    let store = PostgresStore::connect(&database_url, max_connections).await?;
    store.ping().await?;
    println!("  Database reachable.");

    for collection in Collection::ALL {
        let count = store.count(collection).await?;
        println!("  {:<10} {:>4} records", collection.name(), count);
    }

    println!("> Preflight OK.");
    Ok(())
}
