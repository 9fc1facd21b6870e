//! Output formatting for the CLI.

use console::style;
use rocket_commerce::{Cart, CartSummary};

/// Column widths of the cart table: id, product, quantity.
const CART_COLUMNS: [usize; 3] = [6, 40, 10];

/// Column widths of the summary table: id, product, quantity × price, subtotal.
const SUMMARY_COLUMNS: [usize; 4] = [6, 40, 20, 12];

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print the cart as a table, or as JSON.
    pub fn cart(&self, cart: &Cart) {
        if self.json {
            self.json(cart);
            return;
        }
        if cart.is_empty() {
            self.info("Your cart is empty");
            return;
        }

        self.row(&["ID", "PRODUCT", "QUANTITY"], &CART_COLUMNS);
        for product in cart {
            let id = product.id.to_string();
            let amount = product.amount.to_string();
            let cols = [id.as_str(), product.title.as_str(), amount.as_str()];
            self.row(&cols, &CART_COLUMNS);
        }
        println!();
        self.kv("Items", &cart.item_count().to_string());
    }

    /// Print priced lines and the total, or the summary as JSON.
    pub fn summary(&self, summary: &CartSummary) {
        if self.json {
            self.json(summary);
            return;
        }
        if summary.lines.is_empty() {
            self.info("Your cart is empty");
            return;
        }

        for line in &summary.lines {
            let id = line.product_id.to_string();
            let quantity = format!("{} × {}", line.amount, line.unit_price.display());
            let subtotal = line.subtotal.display();
            let cols = [
                id.as_str(),
                line.title.as_str(),
                quantity.as_str(),
                subtotal.as_str(),
            ];
            self.row(&cols, &SUMMARY_COLUMNS);
        }
        println!();
        self.kv("Items", &summary.item_count.to_string());
        self.kv("Total", &summary.total.display());
    }

    fn row(&self, cols: &[&str], widths: &[usize]) {
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        println!("  {}", formatted.join("  "));
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Quantity badge shown next to a product.
pub fn amount_badge(amount: i64) -> String {
    style(format!("×{}", amount)).cyan().bold().to_string()
}
