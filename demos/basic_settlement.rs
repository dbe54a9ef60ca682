//! Basic settlement example

use bigdecimal::BigDecimal;
use settlement_core::utils::StrictContributionValidator;
use settlement_core::{
    Contribution, DuplicatePolicy, ExactPairMatcher, SettlementConfig, SettlementEngine,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("🧮 Settlement Core - Basic Settlement Example\n");

    // 1. Who paid what on the trip
    let contributions = vec![
        Contribution::new("Andi", 450000),
        Contribution::new("Budi", 150000),
        Contribution::new("Citra", 25000),
        Contribution::new("Dewi", 175000),
    ];

    println!("👥 Contributions:");
    for contribution in &contributions {
        println!("  • {}: {}", contribution.identifier, contribution.amount);
    }
    println!();

    // 2. Validate the way an entry form would, then settle
    let engine = SettlementEngine::new();
    let result = engine.settle_validated(&contributions, &StrictContributionValidator)?;

    println!("📊 Summary:");
    println!("  Total: {}", result.total);
    println!("  Share per person: {}", result.average_share);
    println!();

    if result.is_settled() {
        println!("✅ Everyone is already square");
    } else {
        println!("💸 Who pays whom:");
        for transfer in &result.transfers {
            println!("  • {} → {}: {}", transfer.from, transfer.to, transfer.amount);
        }
    }
    println!();

    // 3. How much rounding drift the summary carries
    let audit = engine.audit(&result);
    println!(
        "🔍 Largest rounding residual: {} (tolerance {})",
        audit.max_residual, audit.tolerance
    );
    println!();

    // 4. Cents, merged duplicate names, and exact-pair matching
    let config = SettlementConfig::default()
        .with_scale(2)?
        .with_duplicates(DuplicatePolicy::Merge);
    let engine = SettlementEngine::with_matcher(config, Box::new(ExactPairMatcher));

    let dinner = vec![
        Contribution::new("Eka", BigDecimal::from(30)),
        Contribution::new("Fajar", BigDecimal::from(10)),
        Contribution::new("Eka", BigDecimal::from(20)),
        Contribution::new("Gita", BigDecimal::from(0)),
    ];
    let result = engine.settle(&dinner);

    println!("🍽️  Dinner, in cents with merged names:");
    println!("  Share per person: {}", result.average_share);
    for transfer in &result.transfers {
        println!("  • {} → {}: {}", transfer.from, transfer.to, transfer.amount);
    }

    Ok(())
}
