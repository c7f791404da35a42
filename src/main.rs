//! Seeds the library collections (`books`, `authors`, `adherents`, `loans`).
//!
//! Run with:
//!   DATABASE_URL="postgres://localhost/books_api" cargo run --bin library-seed
//!
//! Options:
//!   --dataset NAME   Dataset to load (overrides SEED_DATASET)
//!   --dry-run        Seed an in-memory store instead of PostgreSQL
//!   --verify-only    Skip seeding; only audit what is already stored
//!   --json           Print the audit report as JSON

use anyhow::Context;
use library_seed::infra::{config, logging};
use library_seed::{Dataset, DocumentStore, MemoryStore, PostgresStore, SeedLoader, SeedReport};

#[derive(Debug, Default)]
struct Options {
    dataset: Option<String>,
    dry_run: bool,
    verify_only: bool,
    json: bool,
}

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: library-seed [--dataset NAME] [--dry-run] [--verify-only] [--json]\n\
         \n\
         Datasets: {}\n\
         Env vars:\n\
           DATABASE_URL (required unless --dry-run), SEED_DATASET, DB_MAX_CONNECTIONS, RUST_LOG\n",
        Dataset::names().join(", ")
    );
    std::process::exit(2);
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Options {
    let mut opts = Options::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--dataset" => match args.next() {
                Some(name) => opts.dataset = Some(name),
                None => usage_and_exit(),
            },
            "--dry-run" => opts.dry_run = true,
            "--verify-only" => opts.verify_only = true,
            "--json" => opts.json = true,
            _ => usage_and_exit(),
        }
    }
    opts
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init();

    let opts = parse_args(std::env::args().skip(1));
    let dataset = match &opts.dataset {
        Some(name) => config::dataset_named(name)?,
        None => config::seed_dataset()?,
    };

    if opts.dry_run {
        println!("> Dry run: seeding an in-memory store.");
        return run(MemoryStore::new(), dataset, &opts).await;
    }

    let database_url = config::database_url()?;
    let store = PostgresStore::connect(&database_url, config::max_connections()?)
        .await
        .context("connecting to DATABASE_URL")?;
    run(store, dataset, &opts).await
}

async fn run<S: DocumentStore>(store: S, dataset: Dataset, opts: &Options) -> anyhow::Result<()> {
    let loader = SeedLoader::new(store, dataset);

    if !opts.verify_only {
        let outcome = loader.run().await.context("seeding failed")?;
        println!("> Seeded dataset '{}':", outcome.dataset);
        for (collection, count) in outcome.counts() {
            println!("  {:<10} {:>4} inserted", collection.name(), count);
        }
    }

    let report = SeedReport::collect(loader.store())
        .await
        .context("reading back seeded collections")?;
    if opts.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("> Audit:");
        println!("{}", report);
    }

    if !report.is_consistent() {
        anyhow::bail!("stored collections have dangling references or duplicate keys");
    }
    Ok(())
}
