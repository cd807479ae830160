use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::sync::Arc;
use tally::prelude::*;
use tally::upsell::LoggingReporter;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Checkout composition, quantity-offer pricing and upsell flow tools
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the render plan for a checkout configuration
    Compose {
        /// Path to the checkout configuration JSON file
        config_path: String,
        /// Optional path to a quantity offer JSON file
        #[arg(short, long)]
        offer: Option<String>,
        /// Product base price used to price the offer tiers
        #[arg(short, long, default_value_t = 0.0)]
        base_price: f64,
    },
    /// Print the priced tier rows of a quantity offer
    Price {
        /// Path to the quantity offer JSON file
        offer_path: String,
        /// Product base price
        #[arg(short, long)]
        base_price: f64,
        #[arg(long, default_value = "COP")]
        currency: String,
        #[arg(long, default_value = "CO")]
        country: String,
    },
    /// Simulate an upsell flow with a logging reporter
    Upsell {
        /// Path to the upsell list JSON file
        queue_path: String,
        /// One decision per shown upsell: `a` accepts, `d` declines
        #[arg(short, long, value_delimiter = ',')]
        decisions: Vec<String>,
        /// Order the accepted upsells are appended to
        #[arg(long)]
        order_id: Option<Uuid>,
        #[arg(long, value_enum, default_value = "post-purchase")]
        mode: ModeCli,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeCli {
    PrePurchase,
    PostPurchase,
}

impl From<ModeCli> for UpsellMode {
    fn from(mode: ModeCli) -> Self {
        match mode {
            ModeCli::PrePurchase => UpsellMode::PrePurchase,
            ModeCli::PostPurchase => UpsellMode::PostPurchase,
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Compose {
            config_path,
            offer,
            base_price,
        } => run_compose(&config_path, offer.as_deref(), base_price),
        Command::Price {
            offer_path,
            base_price,
            currency,
            country,
        } => run_price(&offer_path, base_price, &currency, &country),
        Command::Upsell {
            queue_path,
            decisions,
            order_id,
            mode,
        } => run_upsell(&queue_path, &decisions, order_id, mode.into()).await,
    }
}

fn run_compose(config_path: &str, offer_path: Option<&str>, base_price: f64) {
    let config = CheckoutConfig::from_file(config_path)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()))
        .merged_with_defaults();
    let offer = offer_path.map(load_offer);

    for issue in validate_config(&config.form_blocks, offer.as_ref()) {
        println!("warning: {}", issue);
    }

    let plan = compose(&config.form_blocks, offer.as_ref(), base_price);
    print!("{}", PlanOutline::format_plan(&plan));
}

fn run_price(offer_path: &str, base_price: f64, currency: &str, country: &str) {
    let offer = load_offer(offer_path);
    let view = OfferView::new(&offer, base_price);
    if view.rows.is_empty() {
        println!("Offer '{}' has no tiers.", offer.name);
        return;
    }

    println!("{}", view.header_text);
    for label in view.labels(&format_money, currency, country) {
        let marker = if label.selected { "*" } else { " " };
        let mut line = format!("{} {:<12} {}", marker, label.title, label.total);
        if let Some(compare_at) = label.compare_at {
            line.push_str(&format!("  (antes {})", compare_at));
        }
        if let Some(per_unit) = label.per_unit {
            line.push_str(&format!("  {}", per_unit));
        }
        if let Some(savings) = label.savings {
            line.push_str(&format!("  {}", savings));
        }
        println!("{}", line);
    }
}

async fn run_upsell(queue_path: &str, decisions: &[String], order_id: Option<Uuid>, mode: UpsellMode) {
    let json = fs::read_to_string(queue_path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read upsell file '{}': {}", queue_path, e))
    });
    let queue =
        UpsellDefinition::list_from_json(&json).unwrap_or_else(|e| exit_with_error(&e.to_string()));

    let mut builder = UpsellFlow::builder(queue).mode(mode);
    if let Some(order_id) = order_id {
        builder = builder.order_id(order_id);
    }

    let mut session = UpsellSession::builder(builder.build(), Arc::new(LoggingReporter))
        .on_complete(|accepted| {
            println!("Flow completed with {} accepted item(s).", accepted.len());
            for item in accepted {
                println!("  - {} x{} @ {}", item.product_name, item.quantity, item.unit_price);
            }
        })
        .build()
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));

    let mut state = session
        .start()
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));
    let mut decisions = decisions.iter();

    while let FlowState::Showing(index) = state {
        if let Some(upsell) = session.current() {
            println!("[{}] {}", index, upsell.rendered_title(None));
        }
        let result = match decisions.next().map(|d| d.trim()) {
            Some("a") | Some("accept") => session.accept_current(1),
            _ => session.decline(),
        };
        state = result.unwrap_or_else(|e| exit_with_error(&e.to_string()));
    }

    session.settle().await;
}

fn load_offer(path: &str) -> QuantityOffer {
    let json = fs::read_to_string(path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to read offer file '{}': {}", path, e)));
    QuantityOffer::from_json(&json).unwrap_or_else(|e| exit_with_error(&e.to_string()))
}

/// Whole units with `.` thousands separators, as Colombian pesos print.
fn format_money(amount: f64, currency: &str, _country: &str) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    let sign = if rounded < 0 { "-" } else { "" };
    format!("{}${} {}", sign, grouped, currency)
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
