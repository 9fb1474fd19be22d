//! Terminal front-end for the forecast session.
//!
//! Renders the area list as a numbered selection, reads the pick from
//! stdin and prints the forecast text or the session's message. The
//! recording variant additionally appends every displayed line to the
//! local weather table.

use std::io::{BufRead, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use tenki_core::Config;
use tenki_jma::{AreaCatalog, DisplayLine, JmaClient};
use tenki_shell::{
    message_for, metadata_error, ForecastSession, JmaForecastSource, Outcome, SessionState,
};
use tenki_store::WeatherStore;

/// Which application was launched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Display only.
    View,
    /// Display and persist each shown forecast.
    Record,
}

/// Run one windowed session until the user quits.
pub fn run(variant: Variant) -> Result<()> {
    tenki_core::init()?;
    let config = Config::load()?;

    let runtime = tokio::runtime::Runtime::new().context("Failed to start runtime")?;
    let client = JmaClient::with_endpoints(&config.jma.area_url, &config.jma.forecast_url)?;

    // Load the catalog once at startup; on failure the selection list
    // degrades to empty and the failure message is shown.
    let (catalog, startup_message) = match runtime.block_on(AreaCatalog::load(&client)) {
        Ok(catalog) => (catalog, None),
        Err(e) => {
            tracing::warn!("area metadata load failed: {}", e);
            (AreaCatalog::empty(), Some(message_for(&metadata_error(e))))
        }
    };

    let source = JmaForecastSource::new(client, runtime.handle().clone());
    let mut session = ForecastSession::new(catalog, source);

    if variant == Variant::Record {
        let store = WeatherStore::open(&config.database_path)
            .context("Failed to open weather database")?;
        session = session.with_store(Arc::new(store));
    }

    println!("日本の天気予報");
    if let Some(message) = startup_message {
        println!("{}", message);
    }

    for (i, entry) in session.areas().iter().enumerate() {
        println!("{:>3}: {}", i + 1, entry.name);
    }

    let stdin = std::io::stdin();
    loop {
        print!("地域番号を入力 (q で終了): ");
        std::io::stdout().flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();
        if input == "q" {
            break;
        }

        // A valid number updates the selection; anything else leaves it
        // as-is, so the first trigger without a pick shows the
        // no-selection message.
        let picked = input
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| session.areas().get(i))
            .map(|entry| entry.name.clone());
        if let Some(name) = picked {
            session.select(name);
        }

        session.trigger();
        render(session.state());
    }

    if let Some(store) = session.store() {
        let count = store.count()?;
        println!("保存件数: {}", count);
    }

    Ok(())
}

fn render(state: &SessionState) {
    match state {
        SessionState::Shown(Outcome::Forecast(lines)) => {
            println!("{}", format_forecast(lines));
        }
        SessionState::Shown(Outcome::Message(message)) => println!("{}", message),
        SessionState::Idle | SessionState::Loading => {}
    }
}

/// Render forecast lines the way the output region shows them:
/// `name:` then the weather text, blocks separated by a blank line.
fn format_forecast(lines: &[DisplayLine]) -> String {
    lines
        .iter()
        .map(|line| format!("{}:\n{}", line.area_name, line.text))
        .collect::<Vec<_>>()
        .join("\n\n")
}
