use super::{convert, ui};
use crate::core::Exchange;
use crate::core::conversion::format_rate;
use comfy_table::Cell;

/// Simulated buy/sell table. The spread is not market data.
pub fn render_rate_table(exchange: &Exchange) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Currency"),
        ui::header_cell("Code"),
        ui::header_cell("Buy"),
        ui::header_cell("Sell"),
    ]);

    for quote in exchange.rate_table() {
        let (name, flag) = quote.currency.display_info();
        table.add_row(vec![
            Cell::new(format!("{flag} {name}")),
            Cell::new(quote.currency.code()),
            ui::number_cell(format_rate(quote.buy)),
            ui::number_cell(format_rate(quote.sell)),
        ]);
    }

    let mut output = format!(
        "{}\n\n",
        ui::style_text("Exchange rates per 1 NPR", ui::StyleType::Title)
    );
    output.push_str(&table.to_string());
    output.push_str(&format!("\n\n{}", convert::rates_status(exchange)));
    output
}

pub fn run(exchange: &Exchange) {
    println!("{}", render_rate_table(exchange));
}
