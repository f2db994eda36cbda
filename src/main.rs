use clap::Parser;
use page_inspect::{InspectError, Inspector, render};
use std::process::ExitCode;

mod args;
use args::{Args, convert_format};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    ::log::info!("Inspecting URL: {}", args.url);

    match run(args).await {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            ::log::error!("Inspection failed: {}", e);
            eprintln!("Error: {}", e);
            ExitCode::from(exit_status(&e))
        }
    }
}

/// Exit status for a failed run: 2 for bad configuration, 1 for everything else
fn exit_status(error: &InspectError) -> u8 {
    if error.is_config() { 2 } else { 1 }
}

/// Build the inspector from CLI arguments, run it and render the report
async fn run(args: Args) -> Result<String, InspectError> {
    let mut inspector = Inspector::new(args.url);

    if let Some(path) = &args.config {
        inspector = inspector.with_config_file(path)?;
    }
    if let Some(timeout) = args.timeout {
        inspector = inspector.with_timeout(timeout);
    }
    if let Some(user_agent) = args.user_agent {
        inspector = inspector.with_user_agent(user_agent);
    }
    for pattern in args.exclude {
        inspector = inspector.with_exclude_pattern(pattern);
    }

    let start_time = std::time::Instant::now();
    let report = inspector.inspect().await?;
    ::log::debug!(
        "Inspection complete in {:.2} seconds",
        start_time.elapsed().as_secs_f64()
    );

    render::render(&report, convert_format(args.format))
}
