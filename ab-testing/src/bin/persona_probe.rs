/*
  Score one piece of marketing copy against each persona. No network.

EXAMPLE COMMANDS:

  cargo run --bin persona-probe -- \
    --text "Certified safe stroller, practical and durable" \
    --category baby --price 29.99

  cargo run --bin persona-probe -- \
    --text "Exclusive premium headphones, trending now" \
    --category electronics --price 299.99 --personas young_male --json
*/

use anyhow::Result;
use clap::Parser;

use ab_testing::personas::{default_personas, personas_from_keys, ProductInfo};

/// Show how each persona reacts to a product description
#[derive(Parser, Debug)]
#[command(name = "persona-probe", version)]
struct Args {
    /// Marketing copy or product description
    #[arg(long)]
    text: String,

    /// Product category
    #[arg(long, default_value = "general")]
    category: String,

    /// Product price in dollars
    #[arg(long, default_value_t = 49.99)]
    price: f64,

    /// Comma-separated personas (default: all three)
    #[arg(long, value_delimiter = ',')]
    personas: Vec<String>,

    /// Print responses as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    ab_testing::logging::init();
    let args = Args::parse();

    let product = ProductInfo::new(args.category.trim(), args.price);
    product.validate()?;
    let personas = if args.personas.is_empty() {
        default_personas()
    } else {
        personas_from_keys(&args.personas)?
    };

    let responses: Vec<_> = personas
        .iter()
        .map(|persona| persona.score(&args.text, &product))
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&responses)?);
        return Ok(());
    }

    for (persona, response) in personas.iter().zip(&responses) {
        println!(
            "\n{} ({}):",
            persona.archetype().display_name(),
            persona.profile().name
        );
        println!(
            "  Purchase Likelihood: {:.2}%",
            response.purchase_likelihood * 100.0
        );
        println!("  Emotional Response: {}", response.emotional_response);
        println!("  Reasoning: {}", response.reasoning);
        println!("  Key Factors: {}", response.key_factors.join(", "));
        println!("  Budget: {}", response.budget_consideration);
    }
    Ok(())
}
