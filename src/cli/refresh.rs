use super::{convert, ui};
use crate::core::{Exchange, RefreshError};
use tracing::warn;

/// Status line for the outcome of a refresh.
pub fn notice_for(result: &Result<(), RefreshError>) -> String {
    match result {
        Ok(()) => ui::notification("Rates updated successfully!", ui::Notice::Success),
        Err(RefreshError::InFlight) => {
            ui::notification("A rate refresh is already running.", ui::Notice::Error)
        }
        Err(RefreshError::Exhausted(_)) => ui::notification(
            "Failed to update rates. Using cached data.",
            ui::Notice::Error,
        ),
    }
}

/// Refreshes behind a spinner and prints the outcome. Returns true on success.
pub async fn refresh_with_feedback(exchange: &mut Exchange) -> bool {
    let pb = ui::new_spinner("Fetching latest rates...");
    let result = exchange.refresh().await.map(|_| ());
    pb.finish_and_clear();

    if let Err(e) = &result {
        warn!("Rate refresh failed: {}", e);
    }
    println!("{}", notice_for(&result));
    result.is_ok()
}

pub async fn run(exchange: &mut Exchange) {
    refresh_with_feedback(exchange).await;
    println!();
    convert::run(exchange);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_for_outcomes() {
        console::set_colors_enabled(false);
        assert_eq!(notice_for(&Ok(())), "✔ Rates updated successfully!");
        assert_eq!(
            notice_for(&Err(RefreshError::Exhausted(2))),
            "✘ Failed to update rates. Using cached data."
        );
        assert_eq!(
            notice_for(&Err(RefreshError::InFlight)),
            "✘ A rate refresh is already running."
        );
    }
}
