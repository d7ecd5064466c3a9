// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{bail, Context, Result};
use std::env;
use std::io;
use tracing::info;

use loan_monitor::{init_tracing, write_aggregations_csv, write_transactions_csv, Config, Dataset};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() > 1 && args[1] == "export" {
        // Export mode
        init_tracing("info");
        run_export(args.get(2).map(String::as_str))?;
    } else {
        // UI mode (default)
        init_tracing("warn");
        run_ui_mode()?;
    }

    Ok(())
}

fn load_dataset() -> Result<Dataset> {
    let dataset = Dataset::load_embedded().context("Embedded fixture failed validation")?;
    info!(
        bank = dataset.bank_name(),
        customers = dataset.customers().len(),
        "dataset loaded"
    );
    Ok(dataset)
}

fn run_export(what: Option<&str>) -> Result<()> {
    let dataset = load_dataset()?;
    let stdout = io::stdout().lock();

    match what {
        Some("aggregations") => write_aggregations_csv(&dataset.aggregations(), stdout)
            .context("Failed to write aggregation CSV")?,
        Some("transactions") => write_transactions_csv(dataset.customers(), stdout)
            .context("Failed to write transaction CSV")?,
        Some(other) => bail!("Unknown export {:?} (expected aggregations or transactions)", other),
        None => bail!("Usage: loan-monitor export <aggregations|transactions>"),
    }

    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode() -> Result<()> {
    println!("🏦 Loading loan monitoring dashboard...\n");

    let config = Config::from_env()?;
    let dataset = load_dataset()?;

    println!("✓ Loaded {} customers, {} loan periods", dataset.customers().len(), dataset.loan_periods().len());
    println!("Starting UI... (Press 'q' to quit)\n");

    // Create and run app
    let mut app = ui::App::new(dataset);
    ui::run_ui(&mut app, config.tick)?;

    println!("\n✅ UI closed successfully");

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode() -> Result<()> {
    // Keep the config check so a bad environment is reported either way
    let _ = Config::from_env()?;
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use the API: cargo run --bin loan-monitor-server --features server");
    std::process::exit(1);
}
