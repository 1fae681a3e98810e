use super::ui;
use crate::core::conversion::{format_money, format_rate, reverse_rate};
use crate::core::{Currency, Exchange};
use chrono::Local;
use comfy_table::Cell;

/// "Rates updated 14:05 (cached)" line shown under every table.
pub(crate) fn rates_status(exchange: &Exchange) -> String {
    let updated = exchange
        .snapshot()
        .fetched_at
        .with_timezone(&Local)
        .format("%H:%M");
    ui::style_text(
        &format!(
            "Rates updated {} ({})",
            updated,
            exchange.source().label()
        ),
        ui::StyleType::Subtle,
    )
}

pub fn render_conversions(exchange: &Exchange) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Currency"),
        ui::header_cell("Code"),
        ui::header_cell("Rate"),
        ui::header_cell("Amount"),
    ]);

    for conversion in exchange.conversions() {
        let (name, flag) = conversion.currency.display_info();
        table.add_row(vec![
            Cell::new(format!("{flag} {name}")),
            Cell::new(conversion.currency.code()),
            ui::number_cell(format_rate(conversion.rate)),
            ui::highlight_cell(format_money(conversion.converted)),
        ]);
    }

    let mut output = format!(
        "Converting {}\n\n",
        ui::style_text(
            &format!("NPR {}", exchange.amount()),
            ui::StyleType::Title
        )
    );
    output.push_str(&table.to_string());
    output.push_str(&format!("\n\n{}", rates_status(exchange)));
    output
}

pub fn render_reverse(currency: Currency, rate: f64) -> String {
    format!(
        "1 {} = {} NPR",
        ui::style_text(currency.code(), ui::StyleType::TotalLabel),
        ui::style_text(&format_rate(reverse_rate(rate)), ui::StyleType::TotalValue)
    )
}

pub fn run(exchange: &Exchange) {
    println!("{}", render_conversions(exchange));
}

pub fn run_reverse(exchange: &Exchange, currency: Currency) {
    println!(
        "{}",
        render_reverse(currency, exchange.snapshot().rates.get(currency))
    );
    println!(
        "{}",
        ui::style_text(
            "Run `nprx refresh` to get the latest rates.",
            ui::StyleType::Subtle
        )
    );
}
