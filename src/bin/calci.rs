use anyhow::{Context, Result};
use calci::{Calculator, Settings};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Drive the calculator engine with button labels.
///
/// Labels are the keypad texts: digits, `.`, `π`, `e`, `(`, `)`, `()`,
/// `+ - * / **`, `√ sin cos tan log`, `x²`, `+/-`, `⌫`, `C` and `=`.
#[derive(Parser)]
#[command(name = "calci", version)]
struct Cli {
    /// TOML file with evaluator settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print both display lines after every label instead of once at the end
    #[arg(short, long)]
    steps: bool,

    /// Log evaluations to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Labels to press, in order. Read line by line from stdin when empty.
    labels: Vec<String>,
}

fn print_display(out: &mut impl Write, calculator: &Calculator) -> io::Result<()> {
    let (pending, current) = calculator.buffer().display();
    writeln!(out, "{}", pending)?;
    writeln!(out, "{}", current)
}

fn press_all<'a>(
    calculator: &mut Calculator,
    labels: impl IntoIterator<Item = &'a str>,
    steps: bool,
    out: &mut impl Write,
) -> Result<()> {
    for label in labels {
        calculator.press(label)?;
        if steps {
            print_display(out, calculator)?;
        }
    }
    if !steps {
        print_display(out, calculator)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "calci=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    let settings = match &cli.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    let mut calculator = Calculator::new(settings);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if !cli.labels.is_empty() {
        return press_all(
            &mut calculator,
            cli.labels.iter().map(String::as_str),
            cli.steps,
            &mut out,
        );
    }

    for line in io::stdin().lock().lines() {
        let line = line?;
        if let Err(err) = press_all(&mut calculator, line.split_whitespace(), cli.steps, &mut out) {
            eprintln!("{:#}", err);
        }
    }
    Ok(())
}
