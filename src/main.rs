use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use storefront::application::checkout::{Checkout, CheckoutConfig};
use storefront::application::dashboard::StatusTracker;
use storefront::application::location::LocationPicker;
use storefront::application::storefront::Storefront;
use storefront::domain::menu::Catalog;
use storefront::domain::ports::{
    KeyValueStoreBox, KeyValueStoreFactory, OrderRepositoryBox, OrderRepositoryFactory,
};
use storefront::infrastructure::in_memory::{
    InMemoryGeocoder, InMemoryKeyValueStore, InMemoryOrderRepository,
};
use storefront::infrastructure::log_notifier::LogNotifier;
use storefront::interfaces::csv::event_reader::EventReader;
use storefront::interfaces::csv::place_reader::PlaceReader;
use storefront::interfaces::csv::report_writer::{ReportWriter, write_menu};
use storefront::interfaces::replay;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Event script CSV (`action,id,value,text`) to replay
    #[arg(required_unless_present = "menu")]
    input: Option<PathBuf>,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Also clear the delivery address and location after each order
    #[arg(long)]
    reset_location: bool,

    /// Region appended to typed addresses before geocoding
    #[arg(long)]
    region: Option<String>,

    /// Known places CSV (`lat,lng,address`) used to resolve `pin` and
    /// `lookup` events. Without it no address can be resolved.
    #[arg(long)]
    places: Option<PathBuf>,

    /// Print the menu as CSV and exit
    #[arg(long)]
    menu: bool,
}

fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();
}

fn in_memory_stores() -> (OrderRepositoryFactory, KeyValueStoreFactory) {
    let orders = InMemoryOrderRepository::new();
    let local = InMemoryKeyValueStore::new();
    (
        Box::new(move || Box::new(orders.clone()) as OrderRepositoryBox),
        Box::new(move || Box::new(local.clone()) as KeyValueStoreBox),
    )
}

#[cfg(feature = "storage-rocksdb")]
fn open_stores(db_path: Option<PathBuf>) -> Result<(OrderRepositoryFactory, KeyValueStoreFactory)> {
    use storefront::infrastructure::rocksdb::RocksDBStore;

    let Some(db_path) = db_path else {
        return Ok(in_memory_stores());
    };
    let store = RocksDBStore::open(db_path).into_diagnostic()?;
    let local = store.clone();
    Ok((
        Box::new(move || Box::new(store.clone()) as OrderRepositoryBox),
        Box::new(move || Box::new(local.clone()) as KeyValueStoreBox),
    ))
}

#[cfg(not(feature = "storage-rocksdb"))]
fn open_stores(db_path: Option<PathBuf>) -> Result<(OrderRepositoryFactory, KeyValueStoreFactory)> {
    if db_path.is_some() {
        warn!(
            "Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to in-memory storage."
        );
    }
    Ok(in_memory_stores())
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_tracing();
    let cli = Cli::parse();

    let catalog = Catalog::house_menu().into_diagnostic()?;
    if cli.menu {
        write_menu(io::stdout().lock(), &catalog).into_diagnostic()?;
        return Ok(());
    }
    let Some(input) = cli.input else {
        return Ok(());
    };

    let (orders, local) = open_stores(cli.db_path)?;
    let config = CheckoutConfig {
        reset_location_on_success: cli.reset_location,
    };

    let geocoder = match cli.places {
        Some(path) => {
            let file = File::open(path).into_diagnostic()?;
            PlaceReader::new(file).into_geocoder(|e| error!(error = %e, "Error reading place"))
        }
        None => InMemoryGeocoder::new(),
    };

    let checkout = Checkout::new(orders(), Box::new(LogNotifier), config);
    let mut location = LocationPicker::new(
        Box::new(geocoder),
        local(),
        Box::new(LogNotifier),
    );
    if let Some(region) = cli.region {
        location = location.with_region(region);
    }
    let mut storefront = Storefront::new(catalog, checkout, location, Box::new(LogNotifier));
    let mut tracker = StatusTracker::new(orders(), local());

    if let Err(e) = storefront.restore_location().await {
        warn!(error = %e, "Could not restore saved location");
    }

    // Replay the script
    let file = File::open(input).into_diagnostic()?;
    for event in EventReader::new(file).events() {
        match event {
            Ok(event) => {
                if let Err(e) = replay::apply(event, &mut storefront, &mut tracker).await {
                    error!(error = %e, "Error applying event");
                }
            }
            Err(e) => {
                error!(error = %e, "Error reading event");
            }
        }
    }

    // A failed load still prints an (empty) report
    if let Err(e) = tracker.load().await {
        error!(error = %e, "Error loading orders");
    }

    ReportWriter::new(io::stdout().lock())
        .write_dashboard(&tracker.buckets())
        .into_diagnostic()?;

    Ok(())
}
