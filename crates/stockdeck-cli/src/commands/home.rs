use serde::Serialize;

use crate::error::CliError;
use crate::routes::Route;

use super::CommandResult;

const HEADLINE: &str = "Master Your Financial Future";
const TAGLINE: &str = "Get comprehensive stock data and intelligent analytics to make informed \
investment decisions in real-time.";

static FEATURES: [Feature; 3] = [
    Feature {
        title: "Real-time Data",
        description: "Access live market information with millisecond updates. Stay ahead with \
the latest stock movements, news alerts, and market trends.",
    },
    Feature {
        title: "Smart Analysis",
        description: "Make data-driven decisions with our advanced analytics tools. Visualize \
trends, identify patterns, and get actionable insights.",
    },
    Feature {
        title: "Easy Access",
        description: "Monitor your investments from anywhere, anytime. Our responsive platform \
works seamlessly across desktop, tablet, and mobile devices.",
    },
];

#[derive(Debug, Clone, Copy, Serialize)]
struct Feature {
    title: &'static str,
    description: &'static str,
}

#[derive(Debug, Serialize)]
struct HomeData {
    headline: &'static str,
    tagline: &'static str,
    features: &'static [Feature],
    next: String,
}

pub fn run() -> Result<CommandResult, CliError> {
    let next = Route::Stocks.path();

    let mut lines = vec![
        String::from(HEADLINE),
        "=".repeat(HEADLINE.len()),
        String::from(TAGLINE),
        String::new(),
    ];
    for feature in &FEATURES {
        lines.push(format!("* {}", feature.title));
        lines.push(format!("  {}", feature.description));
    }
    lines.push(String::new());
    lines.push(format!("Explore stocks: stockdeck open {next}"));

    let data = HomeData {
        headline: HEADLINE,
        tagline: TAGLINE,
        features: &FEATURES,
        next,
    };

    let data = serde_json::to_value(data)?;
    Ok(CommandResult::ok(Route::Home.path(), data, lines))
}
