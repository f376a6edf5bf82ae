use anyhow::Result;
use clap::Parser;

use gridmark::cli::CliArgs;

fn main() -> Result<()> {
    let args = CliArgs::parse();
    gridmark::tracing::init(args.verbose);

    let output = args.run()?;
    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}
