//! Command-line front end for the fiscal-code service.
//!
//! ```text
//! cfiscale <name> <surname> <birth_city> <birth_date> <gender>
//! cfiscale --verify <fiscal_code>
//! ```

use cfiscale_api::config::ServiceConfig;
use cfiscale_api::models::{Identity, RequestOutcome};
use cfiscale_api::orchestrator::FiscalCodeOrchestrator;
use std::env;
use std::process::ExitCode;

const USAGE: &str = "usage:\n  cfiscale <name> <surname> <birth_city> <birth_date DD/MM/YYYY> <gender M|F>\n  cfiscale --verify <fiscal_code>";

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cfiscale_api=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let service = ServiceConfig::from_env()?;
    let orchestrator = FiscalCodeOrchestrator::new(service)?;

    match args.as_slice() {
        [flag, code] if flag == "--verify" => {
            let valid = orchestrator.verify(code).await?;
            println!("{} {}", code, if valid { "valid" } else { "NOT valid" });
            Ok(if valid {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            })
        }
        [name, surname, birth_city, birth_date, gender] => {
            let identity = Identity::new(name, surname, birth_city, birth_date, gender);
            match orchestrator.do_request(&identity).await {
                RequestOutcome::Completed {
                    code,
                    verified: true,
                    ..
                } => {
                    println!("{}", code);
                    Ok(ExitCode::SUCCESS)
                }
                RequestOutcome::Completed { code, error, .. } => {
                    println!("{}", code);
                    match error {
                        Some(e) => eprintln!("verification failed: {}", e),
                        None => eprintln!("service did not validate {}", code),
                    }
                    Ok(ExitCode::from(1))
                }
                RequestOutcome::Failed(e) => Err(e.into()),
            }
        }
        _ => {
            eprintln!("{}", USAGE);
            Ok(ExitCode::from(2))
        }
    }
}
