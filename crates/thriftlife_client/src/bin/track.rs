//! Looks a donation up by tracking identifier and prints its progress.
//!
//! Usage: `thriftlife-track DN12345678`

use thriftlife_client::views::{TrackingMsg, TrackingView};
use thriftlife_client::{AppContext, ClientConfig, HttpBackend, View};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ClientConfig::from_env()?;
    let backend = HttpBackend::new(&config);

    let (context, error) = AppContext::initialize(&backend).await;
    if let Some(e) = error {
        eprintln!("{}", e.user_message());
    }
    if let Some(stats) = context.impact_stats() {
        println!(
            "{:.1} kg of clothing collected from {} donors",
            stats.total_clothes_collected_kg, stats.total_donors
        );
    }

    let mut view = TrackingView::new(std::env::args().nth(1));
    view.dispatch(&backend, TrackingMsg::Search).await;
    for notice in view.notices.take() {
        eprintln!("{}", notice.message);
    }

    if let Some(donation) = view.donation() {
        println!("{} ({})", donation.tracking_id, view.description());
        for step in view.timeline() {
            let mark = if step.current {
                ">"
            } else if step.completed {
                "x"
            } else {
                " "
            };
            println!("  [{}] {}", mark, step.stage);
        }
        if let Some(points) = view.points() {
            println!("  {} points earned", points);
        }
        if let Some(carbon) = view.carbon_saved_kg() {
            println!("  {:.1} kg CO2 saved", carbon);
        }
    }
    Ok(())
}
