// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::Result;
use std::env;

use techmania_registration::{load_or_empty, suggested_filename, to_csv, SqliteKeyValue};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() > 1 && args[1] == "export" {
        // Export mode
        run_export()?;
    } else {
        // Admin dashboard (default)
        run_ui_mode()?;
    }

    Ok(())
}

fn db_path() -> String {
    env::var("TECHMANIA_DB").unwrap_or_else(|_| "techmania2025.db".to_string())
}

fn run_export() -> Result<()> {
    println!("📤 TechMania 2025 - Registration Export");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let path = db_path();
    println!("\n🗄️  Opening registration store: {}", path);
    let kv = SqliteKeyValue::open(&path)?;

    let store = load_or_empty(&kv);
    println!("✓ Loaded {} registrations", store.len());

    let csv = match to_csv(store.all()) {
        Ok(csv) => csv,
        Err(err) => {
            eprintln!("\n❌ {}", err);
            std::process::exit(1);
        }
    };

    let filename = suggested_filename(chrono::Local::now().date_naive());
    std::fs::write(&filename, csv)?;

    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("🎉 Export complete!");
    println!("✓ Wrote {}", filename);

    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode() -> Result<()> {
    println!("🖥️  Loading TechMania 2025 admin dashboard...\n");

    let path = db_path();
    let kv = SqliteKeyValue::open(&path)?;

    // A fresh database simply means no registrations yet
    println!("📊 Loading registrations...");
    let store = load_or_empty(&kv);
    println!("✓ Loaded {} registrations\n", store.len());
    println!("Starting UI... (Press 'q' to quit)\n");

    let mut app = ui::App::new(store.all().to_vec());
    ui::run_ui(&mut app)?;

    println!("\n✅ Dashboard closed");

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode() -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use the API: cargo run --bin techmania-server --features server");
    std::process::exit(1);
}
