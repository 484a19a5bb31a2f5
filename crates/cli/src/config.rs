//! Command-line arguments and environment overrides.

use clap::{Parser, Subcommand};
use desk_observability::LogFormat;

#[derive(Parser, Debug)]
#[command(name = "desk")]
#[command(version)]
#[command(about = "Menu-driven desk for a clinic, a transit network and a bank")]
pub struct Args {
    #[command(subcommand)]
    pub domain: Domain,

    /// Start with empty registries instead of the sample data.
    #[arg(long, env = "DESK_NO_SEED", global = true)]
    pub no_seed: bool,

    /// Log record format on stderr (`text` or `json`). Filter with RUST_LOG.
    #[arg(
        long,
        env = "DESK_LOG_FORMAT",
        value_name = "FORMAT",
        default_value_t = LogFormat::Text,
        global = true
    )]
    pub log_format: LogFormat,
}

/// Which registry the session drives.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    /// Patients, doctors, appointments, prescriptions and bills
    Clinic,
    /// Vehicles, stations and passenger bookings
    Transit,
    /// Customers, checking and savings accounts
    Bank,
}

impl Args {
    pub fn seed(&self) -> bool {
        !self.no_seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_subcommand_is_required() {
        assert!(Args::try_parse_from(["desk"]).is_err());
        assert!(Args::try_parse_from(["desk", "library"]).is_err());
    }

    #[test]
    fn flags_may_follow_the_subcommand() {
        let args =
            Args::try_parse_from(["desk", "bank", "--no-seed", "--log-format", "json"]).unwrap();
        assert_eq!(args.domain, Domain::Bank);
        assert!(!args.seed());
        assert_eq!(args.log_format, LogFormat::Json);
    }

    #[test]
    fn rejects_unknown_log_format() {
        assert!(Args::try_parse_from(["desk", "clinic", "--log-format", "xml"]).is_err());
    }
}
