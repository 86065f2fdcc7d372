//! Interactive menu loop.

use core::str::FromStr;
use std::io::{self, BufRead, Write};

use foodwaste_core::{Clock, InventoryError, SystemClock};
use foodwaste_inventory::FoodTracker;

use crate::render;

/// Top-level menu entries.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MenuChoice {
    AddFood,
    TrackUsage,
    RecordWaste,
    MonitorExpirations,
    SuggestDonation,
    GenerateReport,
    DisplayInventory,
    Exit,
}

impl FromStr for MenuChoice {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "1" => Self::AddFood,
            "2" => Self::TrackUsage,
            "3" => Self::RecordWaste,
            "4" => Self::MonitorExpirations,
            "5" => Self::SuggestDonation,
            "6" => Self::GenerateReport,
            "7" => Self::DisplayInventory,
            "8" => Self::Exit,
            _ => return Err(()),
        })
    }
}

const MENU: &str = "\n--- Food Waste Management System ---
1. Add Food Item
2. Track Usage
3. Record Waste
4. Monitor Expirations
5. Suggest Donation
6. Generate Report
7. Display Inventory
8. Exit";

/// Menu shell over any line-oriented input and text output.
pub struct Shell<R, W, C = SystemClock> {
    tracker: FoodTracker<C>,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write, C: Clock> Shell<R, W, C> {
    pub fn new(tracker: FoodTracker<C>, input: R, output: W) -> Self {
        Self {
            tracker,
            input,
            output,
        }
    }

    pub fn tracker(&self) -> &FoodTracker<C> {
        &self.tracker
    }

    /// Run until the user picks Exit or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output, "{MENU}")?;
            let Some(line) = self.prompt("Enter your choice: ")? else {
                tracing::info!("input closed; leaving shell");
                return Ok(());
            };

            let Ok(choice) = line.parse::<MenuChoice>() else {
                writeln!(self.output, "Invalid choice. Please try again.")?;
                continue;
            };

            if choice == MenuChoice::Exit {
                writeln!(self.output, "Exiting the system.")?;
                return Ok(());
            }
            if !self.dispatch(choice)? {
                return Ok(());
            }
        }
    }

    /// Execute one menu action; `Ok(false)` means input ran out mid-action.
    fn dispatch(&mut self, choice: MenuChoice) -> io::Result<bool> {
        match choice {
            MenuChoice::AddFood => {
                let Some(name) = self.prompt("Enter food name: ")? else {
                    return Ok(false);
                };
                let Some(quantity) = self.prompt_quantity("Enter quantity: ")? else {
                    return Ok(false);
                };
                let Some(date) = self.prompt("Enter expiration date (YYYY-MM-DD): ")? else {
                    return Ok(false);
                };
                match self.tracker.add_food(name.as_str(), quantity, date.trim()) {
                    Ok(()) => {
                        if let Some(item) = self.tracker.get_item(&name) {
                            writeln!(
                                self.output,
                                "Added {} (Quantity: {}, Expiration: {}) to inventory.",
                                item.name(),
                                item.quantity(),
                                item.expires_on()
                            )?;
                        }
                    }
                    Err(err) => self.report_error(&err)?,
                }
            }
            MenuChoice::TrackUsage => {
                let Some(name) = self.prompt("Enter food name: ")? else {
                    return Ok(false);
                };
                let Some(quantity) = self.prompt_quantity("Enter quantity used: ")? else {
                    return Ok(false);
                };
                match self.tracker.consume_item(&name, quantity) {
                    Ok(()) => writeln!(self.output, "Used {quantity} units of {name}.")?,
                    Err(err) => self.report_error(&err)?,
                }
            }
            MenuChoice::RecordWaste => {
                let Some(name) = self.prompt("Enter food name: ")? else {
                    return Ok(false);
                };
                let Some(quantity) = self.prompt_quantity("Enter quantity wasted: ")? else {
                    return Ok(false);
                };
                let Some(reason) = self.prompt("Enter reason for waste: ")? else {
                    return Ok(false);
                };
                match self.tracker.record_waste(&name, quantity, reason.as_str()) {
                    Ok(()) => writeln!(
                        self.output,
                        "Recorded waste: {quantity} units of {name} due to {reason}."
                    )?,
                    Err(err) => self.report_error(&err)?,
                }
            }
            MenuChoice::MonitorExpirations => {
                let expiring = self.tracker.monitor_expirations();
                render::expiring(&mut self.output, &expiring)?;
            }
            MenuChoice::SuggestDonation => {
                let candidates = self.tracker.suggest_donation();
                render::donations(&mut self.output, &candidates)?;
            }
            MenuChoice::GenerateReport => {
                render::waste_report(&mut self.output, &self.tracker.waste_report())?;
            }
            MenuChoice::DisplayInventory => {
                render::inventory(&mut self.output, self.tracker.list_inventory())?;
            }
            MenuChoice::Exit => {}
        }
        Ok(true)
    }

    /// Print a rejected operation and keep the loop going, unless the engine
    /// itself is unusable.
    fn report_error(&mut self, err: &InventoryError) -> io::Result<()> {
        if !err.is_user_error() {
            tracing::error!(error = %err, "inventory engine failure");
            return Err(io::Error::other(err.clone()));
        }
        tracing::warn!(error = %err, "operation rejected");
        writeln!(self.output, "Error: {err}")
    }

    /// Print `label`, read one line with the newline stripped. `None` on EOF.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    /// Re-prompt until a whole number is entered. `None` on EOF.
    fn prompt_quantity(&mut self, label: &str) -> io::Result<Option<u64>> {
        loop {
            let Some(line) = self.prompt(label)? else {
                return Ok(None);
            };
            match line.trim().parse::<u64>() {
                Ok(quantity) => return Ok(Some(quantity)),
                Err(_) => writeln!(self.output, "Please enter a whole number.")?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use foodwaste_core::FixedClock;
    use foodwaste_inventory::TrackerConfig;

    #[test]
    fn menu_choices_parse_with_whitespace() {
        assert_eq!(" 4 ".parse::<MenuChoice>(), Ok(MenuChoice::MonitorExpirations));
        assert_eq!("8".parse::<MenuChoice>(), Ok(MenuChoice::Exit));
        assert!("9".parse::<MenuChoice>().is_err());
        assert!("".parse::<MenuChoice>().is_err());
    }

    #[test]
    fn only_engine_failures_abort_the_shell() {
        let now = Utc.with_ymd_and_hms(2025, 1, 8, 0, 0, 0).unwrap();
        let tracker = FoodTracker::with_clock(TrackerConfig::default(), FixedClock::new(now));
        let mut output = Vec::new();
        let mut shell = Shell::new(tracker, &b""[..], &mut output);

        shell.report_error(&InventoryError::not_found("eggs")).unwrap();
        let err = shell.report_error(&InventoryError::Poisoned).unwrap_err();
        assert_eq!(err.to_string(), "inventory lock poisoned");
        drop(shell);

        assert_eq!(String::from_utf8(output).unwrap(), "Error: item not found: eggs\n");
    }
}
