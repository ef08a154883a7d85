use anyhow::Result;
use booking_demo::{Attempt, ENV_PREFIX};
use inn_core::InnConfig;
use inn_model::format_date;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = InnConfig::from_env(ENV_PREFIX);
    let services = booking_demo::build(&config)?;

    for (n, attempt) in booking_demo::run_capacity_scenario(&services)?.iter().enumerate() {
        match attempt {
            Attempt::Booked(r) => println!(
                "[booking {}] booked {} for {} -> {} ({} nights)",
                n + 1,
                r.id(),
                format_date(r.check_in()),
                format_date(r.check_out()),
                r.nights()
            ),
            Attempt::Rejected(body) => println!("[booking {}] rejected: {body}", n + 1),
        }
    }

    Ok(())
}
