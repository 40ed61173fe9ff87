//! CLI tool to render dashboard snapshots to files.
//!
//! Produces:
//! - `output/snapshot_all_hourly.json` — aggregate hourly view for today
//! - `output/snapshot_london_daily.json` — London's daily view for today
//!
//! and prints a human-readable summary of the aggregate view.

use retail_forecast_demo::generator::Clock;
use retail_forecast_demo::models::series::Granularity;
use retail_forecast_demo::models::store::{Scope, ALL_STORES};
use retail_forecast_demo::session::DashboardSession;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let clock = Clock::now();
    let mut session = DashboardSession::new(clock.today);

    let all_hourly = session
        .render(&Scope::All, clock.today, &clock)
        .expect("aggregate hourly render failed");

    session.set_granularity(Granularity::Daily);
    let london_daily = session
        .render(&Scope::Store("London".to_string()), clock.today, &clock)
        .expect("London daily render failed");

    std::fs::create_dir_all("output").expect("Failed to create output directory");
    let all_json = serde_json::to_string_pretty(&all_hourly).expect("Failed to serialize snapshot");
    std::fs::write("output/snapshot_all_hourly.json", &all_json)
        .expect("Failed to write aggregate snapshot");
    println!("Wrote output/snapshot_all_hourly.json");

    let london_json =
        serde_json::to_string_pretty(&london_daily).expect("Failed to serialize snapshot");
    std::fs::write("output/snapshot_london_daily.json", &london_json)
        .expect("Failed to write London snapshot");
    println!("Wrote output/snapshot_london_daily.json");

    println!();
    println!("=== DASHBOARD SUMMARY ({}) ===", clock.today);
    println!("Scope: all stores, hourly");
    println!("  Total Traffic:       {}", all_hourly.kpis.total_traffic);
    println!("  Potential Revenue:   {} kr", all_hourly.kpis.potential_revenue);
    println!("  Staffing Efficiency: {}%", all_hourly.kpis.staffing_efficiency);
    if all_hourly.accuracy.is_not_applicable() {
        println!("  Forecast Accuracy:   N/A");
    } else {
        println!(
            "  Forecast Accuracy:   {:.1}% today / {:.1}% 3-day / {:.1}% week",
            all_hourly.accuracy.today, all_hourly.accuracy.three_day, all_hourly.accuracy.week
        );
    }
    println!();
    println!("--- Staffing Recommendation ---");
    println!("  Legacy Avg FTE:      {:.1}", all_hourly.staffing.baseline_fte);
    println!("  AI Avg FTE:          {:.1}", all_hourly.staffing.ai_fte);
    println!("  Difference:          {:+.1}", all_hourly.staffing.fte_difference);
    println!(
        "  Revenue Impact:      {} kr/day",
        all_hourly.staffing.revenue_impact_per_day
    );
    println!();
    println!("--- AI Adoption (last 29 days) ---");
    for entry in &all_hourly.adoption_summary {
        println!(
            "  {}: {:.1}% ({} of {} days)",
            entry.store, entry.adoption_rate, entry.ai_days, entry.total_days
        );
    }
    println!();
    println!("--- Aggregate Traffic by Hour ---");
    for row in &all_hourly.aggregate.rows {
        let stores: Vec<String> = ALL_STORES
            .iter()
            .map(|s| format!("{s} {}", row.per_store[*s]))
            .collect();
        println!(
            "  {}  total {:>5}  ({})",
            row.label,
            row.total_traffic,
            stores.join(", ")
        );
    }
}
