//! Interactive console front end for the clinic, transit and bank registries.

pub mod bank;
pub mod clinic;
pub mod config;
pub mod menu;
pub mod prompt;
pub mod seed;
pub mod transit;

use std::io::{BufRead, Write};

use anyhow::Context;
use desk_bank::Bank;
use desk_clinic::Clinic;
use desk_transit::TransitSystem;

pub use config::{Args, Domain};
pub use menu::Menu;
pub use prompt::{Prompt, PromptError};

/// Run one interactive session for `domain` until the user exits or input ends.
pub fn run<R: BufRead, W: Write>(domain: Domain, seed: bool, input: R, output: W) -> anyhow::Result<()> {
    let mut prompt = Prompt::new(input, output);

    match domain {
        Domain::Clinic => {
            let clinic = if seed {
                seed::clinic().context("loading clinic sample data")?
            } else {
                Clinic::new()
            };
            menu::run(&mut clinic::ClinicMenu::new(clinic), &mut prompt)?;
        }
        Domain::Transit => {
            let system = if seed {
                seed::transit().context("loading transit sample data")?
            } else {
                TransitSystem::new()
            };
            menu::run(&mut transit::TransitMenu::new(system), &mut prompt)?;
        }
        Domain::Bank => {
            let bank = if seed {
                seed::bank().context("loading bank sample data")?
            } else {
                Bank::new()
            };
            menu::run(&mut bank::BankMenu::new(bank), &mut prompt)?;
        }
    }

    tracing::debug!(domain = ?domain, "session ended");
    Ok(())
}
