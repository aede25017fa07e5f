use anyhow::Result;
use eventbook_core::config::EventbookConfig;
use eventbook_core::refresh::{PastFlagRefresher, shared};
use owo_colors::OwoColorize;

use super::open_store;

pub async fn run(config: &EventbookConfig) -> Result<()> {
    let store = open_store(config);
    let upcoming = store.list().iter().filter(|e| !e.is_past).count();
    let store = shared(store);

    println!(
        "{}",
        format!(
            "  Watching {} upcoming {} (checking every {}s). Press Ctrl-C to stop.",
            upcoming,
            if upcoming == 1 { "event" } else { "events" },
            config.refresh_interval_secs
        )
        .dimmed()
    );

    let refresher = PastFlagRefresher::start(store, config.refresh_interval(), |events| {
        for event in events {
            let state = if event.is_past { "now in the past" } else { "upcoming again" };
            println!(
                "  {} {} {}",
                event.title.bold(),
                format!("@ {}", event.venue).cyan(),
                state.yellow()
            );
        }
    });

    tokio::signal::ctrl_c().await?;
    refresher.stop().await;

    println!();
    println!("{}", "  Stopped".dimmed());
    Ok(())
}
