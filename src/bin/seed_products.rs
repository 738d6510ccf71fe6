use catalog_seed::cli::seed::{run, SeedArgs, SeedConfig};
use catalog_seed::logging::{init_tracing, LogTarget};
use clap::Parser;
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = SeedArgs::parse();
    let json_output = args.json;
    if let Err(e) = init_tracing("info,sqlx=warn", LogTarget::for_output(json_output)) {
        eprintln!("{e}");
    }

    let cfg = match SeedConfig::resolve(args) {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("configuration error: {err:#}");
            return ExitCode::from(1);
        }
    };

    match run(cfg).await {
        Ok(_) => {
            if !json_output {
                println!("database seeding completed successfully");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("seeding failed: {err:#}");
            ExitCode::from(1)
        }
    }
}
