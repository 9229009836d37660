//! `legalis history`

use crate::cli::HistoryCommand;
use crate::commands::{open_store, report};
use crate::config::Config;
use crate::error::{LegalisError, Result};
use crate::history::HistoryManager;
use colored::Colorize;

/// Handle history commands
pub fn handle_history(config: &Config, command: HistoryCommand) -> Result<()> {
    let history = HistoryManager::with_limit(open_store(config)?, config.storage.history_limit);

    match command {
        HistoryCommand::List => {
            let items = history.get_history();

            if items.is_empty() {
                println!("{}", "No analyses in history.".yellow());
                return Ok(());
            }

            println!("\nAnalysis History:");
            print!("{}", report::render_history(&items));
            println!();
            println!(
                "Use {} to see a full report.",
                "legalis history show <ID>".cyan()
            );
            println!();
        }
        HistoryCommand::Show { id, json } => {
            let item = history.find(&id).ok_or_else(|| {
                LegalisError::Validation(format!("No analysis found with id {}", id))
            })?;
            if json {
                println!("{}", report::to_json(&item)?);
            } else {
                print!("{}", report::render_result(&item));
                println!();
            }
        }
        HistoryCommand::Clear => {
            history.clear_history();
            println!("{}", "History cleared.".green());
        }
    }

    Ok(())
}
