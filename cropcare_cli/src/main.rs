use clap::{Parser, Subcommand};
use cropcare_core::upstream::Supplier;
use cropcare_core::*;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "cropcare")]
#[command(about = "Crop disease treatment advisor", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Skip the Redis tier and cache in memory only
    #[arg(long, global = true)]
    no_redis: bool,

    /// Use built-in location and supplier data instead of network lookups
    #[arg(long, global = true)]
    offline: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend treatments for a disease
    Recommend {
        /// Disease name (e.g. "anthracnose", "Leaf Blight")
        disease: String,

        /// Where the farm is (e.g. "Accra, Ghana")
        #[arg(long, default_value = "Ghana")]
        location: String,

        /// low, moderate, high or severe
        #[arg(long)]
        severity: Option<String>,

        /// Prefer organic treatments
        #[arg(long)]
        organic: bool,

        /// Budget in GHS, "max" or "min-max"
        #[arg(long)]
        budget: Option<String>,

        /// Only the top treatments, key symptoms and a prevention tip
        #[arg(long)]
        quick: bool,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Find agricultural suppliers near a location
    Suppliers {
        /// Where to search (e.g. "Accra, Ghana")
        location: String,

        /// Search radius in km (1-100)
        #[arg(long, default_value_t = 10)]
        radius: u32,

        /// Only suppliers stocking this product (e.g. "fungicides")
        #[arg(long)]
        product: Option<String>,

        #[arg(long)]
        verified_only: bool,
    },

    /// List supported diseases by crop
    Diseases {
        /// Only list diseases for this crop
        #[arg(long)]
        crop: Option<String>,
    },

    /// Show everything known about a disease
    Info {
        disease: String,

        #[arg(long)]
        json: bool,
    },

    /// Show price quotes for a treatment
    Prices {
        treatment: String,

        #[arg(long)]
        location: Option<String>,

        #[arg(long, default_value_t = 10)]
        limit: usize,
    },

    /// Inspect or clear the cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand)]
enum CacheAction {
    /// Hit/miss counters
    Stats,
    /// Probe each cache tier
    Health,
    /// Remove every entry under a key prefix (e.g. "disease_info:")
    Clear { prefix: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    cropcare_core::logging::init_from_config(&config.log);

    if cli.no_redis {
        config.cache.redis_enabled = false;
    }

    let catalog = build_default_catalog()?;
    let errors = catalog.validate();
    if !errors.is_empty() {
        eprintln!("Catalog validation errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::CatalogValidation("Invalid catalog".into()));
    }

    let cache = Arc::new(TieredCache::from_config(&config.cache).await);
    let collaborators = if cli.offline {
        Collaborators::offline()
    } else {
        Collaborators::live(&config.upstream)?
    };
    let service = RecommendationService::new(Arc::new(catalog), cache, collaborators, &config);

    match cli.command {
        Commands::Recommend {
            disease,
            location,
            severity,
            organic,
            budget,
            quick,
            json,
        } => {
            let request = RecommendationRequest {
                disease,
                location,
                severity: severity.as_deref().map(str::parse::<SeverityLevel>).transpose()?,
                organic_preference: organic,
                budget: budget.as_deref().map(str::parse::<BudgetRange>).transpose()?,
            };
            if quick {
                cmd_quick(&service, &request, json).await
            } else {
                cmd_recommend(&service, &request, json).await
            }
        }
        Commands::Suppliers {
            location,
            radius,
            product,
            verified_only,
        } => cmd_suppliers(&service, &location, radius, product.as_deref(), verified_only).await,
        Commands::Diseases { crop } => cmd_diseases(&service, crop.as_deref()).await,
        Commands::Info { disease, json } => cmd_info(&service, &disease, json).await,
        Commands::Prices {
            treatment,
            location,
            limit,
        } => cmd_prices(&service, &treatment, location.as_deref(), limit).await,
        Commands::Cache { action } => cmd_cache(service.cache(), action).await,
    }
}

fn print_treatment(index: usize, treatment: &Treatment) {
    let cost = treatment
        .cost_estimate
        .map_or_else(|| "unknown".to_string(), |c| format!("GHS {:.2}", c));
    println!(
        "  {}. {} [{}] effectiveness {:.0}%, cost {}",
        index + 1,
        treatment.name,
        treatment.kind,
        treatment.effectiveness,
        cost
    );
    println!("     {}: {}, {}", treatment.application_method, treatment.dosage, treatment.frequency);
    for precaution in &treatment.precautions {
        println!("     ! {}", precaution);
    }
}

fn supplier_line(supplier: &Supplier) -> String {
    let distance = supplier
        .distance_km
        .map_or_else(String::new, |d| format!(" ({:.1} km)", d));
    let verified = if supplier.verified { " [verified]" } else { "" };
    format!("{}{}{}", supplier.name, distance, verified)
}

async fn cmd_recommend(
    service: &RecommendationService,
    request: &RecommendationRequest,
    json: bool,
) -> Result<()> {
    let report = service.recommend(request).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} ({}) - severity {}, location {}",
        report.disease, report.crop, report.severity, report.location
    );
    if let Some(scientific) = &report.disease_info.scientific_name {
        println!("Pathogen: {}", scientific);
    }
    for indicator in &report.severity_indicators {
        println!("Looks like: {}", indicator);
    }

    println!();
    if report.recommended_treatments.is_empty() {
        println!("No matching treatments are cataloged for this disease.");
    } else {
        println!("Recommended treatments:");
        for (i, treatment) in report.recommended_treatments.iter().enumerate() {
            print_treatment(i, treatment);
        }
    }
    if let Some(total) = report.total_estimated_cost_ghs {
        println!("Estimated total cost: GHS {:.2}", total);
    }

    if !report.nearby_suppliers.is_empty() {
        println!();
        println!("Nearby suppliers:");
        for supplier in &report.nearby_suppliers {
            println!("  - {}", supplier_line(supplier));
        }
    }

    println!();
    println!("Emergency contacts:");
    for contact in &report.emergency_contacts {
        println!("  - {} ({}): {}", contact.name, contact.kind, contact.phone);
    }

    for issue in &report.issues {
        eprintln!("note: {} unavailable: {}", issue.collaborator, issue.detail);
    }
    Ok(())
}

async fn cmd_quick(
    service: &RecommendationService,
    request: &RecommendationRequest,
    json: bool,
) -> Result<()> {
    let quick = service.quick(request).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&quick)?);
        return Ok(());
    }

    println!("{} ({}) - severity {}", quick.disease, quick.crop, quick.severity);
    println!("Key symptoms:");
    for symptom in &quick.key_symptoms {
        println!("  - {}", symptom);
    }
    println!("Top treatments:");
    for (i, treatment) in quick.top_treatments.iter().enumerate() {
        println!(
            "  {}. {} [{}] {}, {}",
            i + 1,
            treatment.name,
            treatment.kind,
            treatment.application_method,
            treatment.dosage
        );
    }
    if let Some(tip) = &quick.prevention_tip {
        println!("Prevention tip: {}", tip);
    }
    Ok(())
}

async fn cmd_suppliers(
    service: &RecommendationService,
    location: &str,
    radius: u32,
    product: Option<&str>,
    verified_only: bool,
) -> Result<()> {
    let search = service.suppliers(location, radius, product, verified_only).await?;

    println!(
        "Found {} suppliers within {} km of {}",
        search.total_count, search.radius_km, search.location
    );
    for supplier in &search.suppliers {
        println!("  - {}", supplier_line(supplier));
        if let Some(phone) = &supplier.phone {
            println!("    {}", phone);
        }
        println!("    stocks: {}", supplier.products.join(", "));
    }
    Ok(())
}

async fn cmd_diseases(service: &RecommendationService, crop: Option<&str>) -> Result<()> {
    let wanted = crop.map(str::parse::<CropType>).transpose()?;
    let supported = service.supported_diseases().await;

    for (crop, diseases) in supported {
        if wanted.is_some_and(|w| w != crop) {
            continue;
        }
        println!("{}:", crop);
        for disease in diseases {
            println!("  - {}", disease);
        }
    }
    Ok(())
}

async fn cmd_info(service: &RecommendationService, disease: &str, json: bool) -> Result<()> {
    let record = service.disease_info(disease).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(record)?);
        return Ok(());
    }

    println!("{} ({})", record.name, record.crop);
    if let Some(scientific) = &record.scientific_name {
        println!("Pathogen: {}", scientific);
    }
    if let Some(impact) = &record.economic_impact {
        println!("Impact: {}", impact);
    }
    println!("Symptoms:");
    for symptom in &record.symptoms {
        println!("  - {}", symptom);
    }
    if !record.prevention_methods.is_empty() {
        println!("Prevention:");
        for method in &record.prevention_methods {
            println!("  - {}", method);
        }
    }
    println!("Treatments:");
    for (i, treatment) in record.treatments.iter().enumerate() {
        print_treatment(i, treatment);
    }
    Ok(())
}

async fn cmd_prices(
    service: &RecommendationService,
    treatment: &str,
    location: Option<&str>,
    limit: usize,
) -> Result<()> {
    let report = service.prices(treatment, location, limit).await?;

    for quote in &report.quotes {
        println!(
            "  {} - GHS {:.2} at {} ({}, {})",
            quote.product_name, quote.price_ghs, quote.supplier, quote.location, quote.availability
        );
    }
    if let Some(summary) = report.summary {
        println!(
            "Average GHS {:.2}, range GHS {:.2} - {:.2}",
            summary.average_ghs, summary.min_ghs, summary.max_ghs
        );
    }
    Ok(())
}

async fn cmd_cache(cache: &TieredCache, action: CacheAction) -> Result<()> {
    match action {
        CacheAction::Stats => {
            let stats = cache.stats().await;
            println!("Hits: {}", stats.hits);
            println!("Misses: {}", stats.misses);
            println!("External hits: {}", stats.external_hits);
            println!("Memory hits: {}", stats.memory_hits);
            println!("Errors: {}", stats.errors);
            println!("Hit rate: {:.2}%", stats.hit_rate_percent);
            println!(
                "External tier: {}",
                if stats.external_enabled { "enabled" } else { "disabled" }
            );
            match stats.memory_entries {
                Some(entries) => println!("Memory entries: {}/{}", entries, stats.memory_capacity),
                None => println!("Memory capacity: {}", stats.memory_capacity),
            }
        }
        CacheAction::Health => {
            let health = cache.health_check().await;
            println!("memory: {}", describe(&health.memory));
            println!("external: {}", describe(&health.external));
        }
        CacheAction::Clear { prefix } => {
            let removed = cache.clear_pattern(&prefix).await;
            println!("Removed {} entries", removed);
        }
    }
    Ok(())
}

fn describe(status: &TierStatus) -> String {
    match status {
        TierStatus::Healthy => "healthy".to_string(),
        TierStatus::Unhealthy(reason) => format!("unhealthy ({})", reason),
        TierStatus::Disabled => "disabled".to_string(),
    }
}
