use togglebright::{TogglebrightBuilder, TogglebrightError};

use clap::Parser;

/// Toggle a display output between two preset brightness levels.
///
/// Reads the output's current gamma brightness and sets it to 0.75 when the
/// reading is above 0.85, to 0.95 otherwise.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Name of the output to toggle. Defaults to the primary connected
    /// output, or the first connected one.
    #[arg(long, value_name = "name")]
    output: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), TogglebrightError> {
    env_logger::init();
    let args = Args::parse();

    let mut builder = TogglebrightBuilder::new();
    if let Some(output) = args.output.as_deref() {
        builder = builder.with_output(output);
    }

    let level = builder.build()?.toggle().await?;
    log::info!("brightness set to {level}");

    Ok(())
}
