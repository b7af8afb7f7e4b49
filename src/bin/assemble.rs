use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use hack_asm::assembler::{run, AsmConfig, DEFAULT_OUTPUT};

#[derive(Parser, Debug)]
#[command(author, version, about = "Assemble Hack assembly into .hack binary text")]
struct Opts {
    /// Assembly source file
    #[arg(value_name = "SOURCE")]
    input: PathBuf,
    /// Output file (one 16-digit binary word per line)
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,
    /// Write the symbol table as JSON
    #[arg(long, value_name = "FILE")]
    symbols: Option<PathBuf>,
    /// Print a ROM listing to stdout
    #[arg(long)]
    listing: bool,
}

impl Opts {
    fn config(&self) -> AsmConfig {
        AsmConfig {
            output: self.output.clone(),
            symbols: self.symbols.clone(),
            listing: self.listing,
        }
    }
}

fn assemble(opts: &Opts) -> Result<()> {
    let cfg = opts.config();
    let asm = run(&opts.input, &cfg)
        .with_context(|| format!("failed to assemble {}", opts.input.display()))?;
    if cfg.listing {
        print!("{}", asm.listing());
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // every failure, usage errors included, exits with 1
    let opts = match Opts::try_parse() {
        Ok(opts) => opts,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            return ExitCode::FAILURE;
        }
        Err(e) => e.exit(),
    };

    match assemble(&opts) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
