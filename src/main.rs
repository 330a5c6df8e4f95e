use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;

use species_cleaner::config::Config;
use species_cleaner::db::SpeciesStore;
use species_cleaner::runner::{
    BatchRunner, CleanNamesPass, CleanVendorPass, CleanupPass, FixNamesPass, NormalizeFieldsPass,
};
use species_cleaner::{logging, merge, TextRewriter, VariantMap};

#[derive(Parser)]
#[command(name = "species_cleaner")]
#[command(about = "Bilingual species catalog text cleanup")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Restore canonical species names in Turkish descriptions
    FixNames {
        /// Compute and report changes without writing
        #[arg(long)]
        dry_run: bool,
    },
    /// Drop sentences containing vendor boilerplate
    CleanVendor {
        #[arg(long)]
        dry_run: bool,
    },
    /// Strip vendor branding from display names
    CleanNames {
        #[arg(long)]
        dry_run: bool,
    },
    /// Translate enumerated attribute values (care level, temperament, ...)
    NormalizeFields {
        #[arg(long)]
        dry_run: bool,
    },
    /// Merge fresh scraper JSON exports, honoring manual edits
    Merge {
        /// Directory holding the scraper export files
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
    /// Report residual bad patterns without changing anything
    Check,
}

fn open_store(config: &Config) -> anyhow::Result<SpeciesStore> {
    Ok(SpeciesStore::open(&config.database.path)?)
}

/// Shared open/run/summary sequence for every table pass. The pass is built
/// after the store opens so passes that need table state (the variant map)
/// follow the same path as the stateless ones.
fn run_pass<F>(config: &Config, dry_run: bool, make_pass: F) -> anyhow::Result<()>
where
    F: FnOnce(&SpeciesStore) -> anyhow::Result<Box<dyn CleanupPass>>,
{
    if dry_run {
        println!("=== DRY-RUN modu ===");
    }
    let store = open_store(config)?;
    let pass = make_pass(&store)?;
    let mut runner = BatchRunner::new(store, dry_run);
    let outcome = runner.run(pass.as_ref())?;
    outcome.print_summary();
    Ok(())
}

/// Rewriter seeded with every canonical name currently in the table.
fn build_rewriter(store: &SpeciesStore) -> anyhow::Result<TextRewriter> {
    let names = store.species_names()?;
    info!(names = names.len(), "building variant map");
    Ok(TextRewriter::new(&VariantMap::build(names)))
}

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();
    let config = Config::load()?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        started_at = %chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        db = %config.database.path,
        "species_cleaner starting"
    );

    match cli.command {
        Commands::FixNames { dry_run } => {
            println!("🔄 Tür isimleri düzeltiliyor...");
            run_pass(&config, dry_run, |store| {
                Ok(Box::new(FixNamesPass::new(build_rewriter(store)?)))
            })?;
        }
        Commands::CleanVendor { dry_run } => {
            println!("🔄 Satıcı metinleri temizleniyor...");
            run_pass(&config, dry_run, |_| Ok(Box::new(CleanVendorPass)))?;
        }
        Commands::CleanNames { dry_run } => {
            println!("🔄 Tür görünen adları temizleniyor...");
            run_pass(&config, dry_run, |_| Ok(Box::new(CleanNamesPass)))?;
        }
        Commands::NormalizeFields { dry_run } => {
            println!("🔄 Alan değerleri normalize ediliyor...");
            run_pass(&config, dry_run, |_| Ok(Box::new(NormalizeFieldsPass)))?;
        }
        Commands::Merge { data_dir } => {
            println!("🔄 Scraper verisi birleştiriliyor...");
            let mut store = open_store(&config)?;
            let dir = data_dir.unwrap_or_else(|| PathBuf::from(&config.import.data_dir));
            let stats = merge::run(&mut store, &dir)?;
            stats.print_summary();
        }
        Commands::Check => {
            println!("🔍 Kalan sorunlu kalıplar taranıyor...");
            let store = open_store(&config)?;
            let rewriter = TextRewriter::new(&VariantMap::build(Vec::<String>::new()));
            let runner = BatchRunner::new(store, true);
            let passes: Vec<Box<dyn CleanupPass>> = vec![
                Box::new(FixNamesPass::new(rewriter)),
                Box::new(CleanVendorPass),
                Box::new(CleanNamesPass),
            ];
            let mut total = 0;
            for pass in &passes {
                for (pattern, count, names) in runner.residual_scan(pass.as_ref())? {
                    println!("  ⚠ [{}] \"{pattern}\": {count} kayıt ({})", pass.name(), names.join(", "));
                    total += count;
                }
            }
            if total == 0 {
                println!("✓ Sorunlu kalıp kalmadı.");
            }
        }
    }
    Ok(())
}
