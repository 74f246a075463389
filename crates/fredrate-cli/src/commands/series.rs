//! Print the FRED series catalog and usage guidance.

use fredrate_core::fred::{series_catalog, API_KEY_URL};

pub fn run() {
    println!("FRED series for corporate tax analysis");
    println!("{}", "=".repeat(60));
    println!();
    println!(
        "{:<18} {:<10} {:<12} NAME",
        "SERIES ID", "FREQUENCY", "EARLIEST"
    );

    for info in series_catalog() {
        println!(
            "{:<18} {:<10} {:<12} {}",
            info.id,
            info.frequency.as_str(),
            info.earliest,
            info.name
        );
    }

    println!();
    println!("Formula: Effective Tax Rate = (Tax Receipts / Profits Before Tax) x 100");
    println!();
    println!("A FRED API key is required for 'fetch' and 'analyze'.");
    println!("Get a free key at: {API_KEY_URL}");
    println!();
    println!("Example:");
    println!("  fredrate analyze --start 1950-01-01 --chart rates.svg \\");
    println!("      --export-prefix corporate_tax_data");
}
