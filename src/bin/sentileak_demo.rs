//! Score a text from the command line and print the result as JSON.
//!
//! Usage:
//!   cargo run --bin sentileak_demo -- "El partido fue muy bueno."
//!   echo "No me gustó nada." | cargo run --bin sentileak_demo
//!
//! With no args and empty stdin, a built-in sample paragraph is scored.

use std::io::{self, IsTerminal, Read};

use anyhow::Context;
use sentileak::{SentimentEngine, Settings};

const SAMPLE: &str = "La decisión del árbitro fue muy perjudicial para el equipo local. \
El partido estaba empatado para ambos equipos. \
Al final, el portero hizo una gran intervención que salvó a su equipo.";

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    sentileak::init_tracing();

    let settings = Settings::load()?;
    let engine = SentimentEngine::from_settings(&settings).context("building sentiment engine")?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let text = if !args.is_empty() {
        args.join(" ")
    } else {
        let mut buf = String::new();
        if !io::stdin().is_terminal() {
            io::stdin().read_to_string(&mut buf).context("reading stdin")?;
        }
        if buf.trim().is_empty() {
            SAMPLE.to_string()
        } else {
            buf
        }
    };

    println!("{}", text.trim());
    let result = engine.compute_sentiment(&text)?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
