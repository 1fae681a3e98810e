use super::{convert, refresh, ui};
use crate::core::{Amount, Exchange};
use anyhow::{Context, Result};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, warn};

/// A line typed by the user while watching.
#[derive(Debug, Clone, PartialEq)]
pub enum WatchInput {
    Refresh,
    ToggleAutoRefresh,
    Help,
    Quit,
    Empty,
    SetAmount(Amount),
}

impl WatchInput {
    /// Anything that is not a command is read as an amount.
    pub fn parse(line: &str) -> Self {
        match line.trim().to_lowercase().as_str() {
            "" => WatchInput::Empty,
            "r" | "refresh" => WatchInput::Refresh,
            "a" | "auto" => WatchInput::ToggleAutoRefresh,
            "h" | "help" | "?" => WatchInput::Help,
            "q" | "quit" | "exit" => WatchInput::Quit,
            other => WatchInput::SetAmount(Amount::parse_lenient(other)),
        }
    }
}

fn help_text(auto_refresh: bool, interval: Duration) -> String {
    let auto = if auto_refresh {
        format!("on, every {}s", interval.as_secs())
    } else {
        "off".to_string()
    };
    ui::style_text(
        &format!(
            "Enter an amount in NPR, [r] refresh, [a] toggle auto-refresh ({auto}), [q] quit"
        ),
        ui::StyleType::Subtle,
    )
}

fn print_conversions(exchange: &Exchange) {
    ui::print_separator();
    convert::run(exchange);
}

/// Interactive loop: periodic auto-refresh plus commands read from stdin.
pub async fn run(exchange: &mut Exchange, interval: Duration) -> Result<()> {
    convert::run(exchange);
    println!("\n{}", help_text(exchange.auto_refresh(), interval));

    let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let pb = exchange
                    .auto_refresh()
                    .then(|| ui::new_spinner("Auto-refreshing rates..."));
                let outcome = exchange.on_timer_tick().await.map(|r| r.map(|_| ()));
                if let Some(pb) = pb {
                    pb.finish_and_clear();
                }

                if let Some(result) = outcome {
                    if let Err(e) = &result {
                        warn!("Scheduled refresh failed: {}", e);
                    }
                    println!("{}", refresh::notice_for(&result));
                    if result.is_ok() {
                        print_conversions(exchange);
                    }
                }
            }
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read from stdin")? else {
                    debug!("stdin closed, leaving watch mode");
                    break;
                };
                match WatchInput::parse(&line) {
                    WatchInput::Quit => break,
                    WatchInput::Empty => {}
                    WatchInput::Help => {
                        println!("{}", help_text(exchange.auto_refresh(), interval));
                    }
                    WatchInput::Refresh => {
                        if refresh::refresh_with_feedback(exchange).await {
                            print_conversions(exchange);
                        }
                    }
                    WatchInput::ToggleAutoRefresh => {
                        let enabled = exchange.toggle_auto_refresh();
                        let message = if enabled {
                            "Auto-refresh enabled"
                        } else {
                            "Auto-refresh disabled"
                        };
                        println!("{}", ui::notification(message, ui::Notice::Success));
                    }
                    WatchInput::SetAmount(amount) => {
                        exchange.set_amount(amount);
                        print_conversions(exchange);
                    }
                }
            }
        }
    }

    Ok(())
}
