use anyhow::Context;
use colored::Colorize;
use supplychain_contract::{Invocation, SupplyChainContract};
use supplychain_state::{FileWorldState, Transaction, WorldState};
use supplychain_types::ProductRecord;
use tracing::info;

use crate::cli::*;
use crate::config::CliConfig;

pub fn run_command(cli: Cli, config: &CliConfig) -> anyhow::Result<()> {
    let state_path = cli.state.clone().unwrap_or_else(|| config.state_path.clone());
    let state = FileWorldState::open(&state_path)
        .with_context(|| format!("opening world state {}", state_path.display()))?;

    let invocation = to_invocation(cli.command)?;
    let record = execute(&SupplyChainContract::new(), &state, &invocation)?;
    println!("{}", render(&cli.format, &invocation, record.as_ref())?);
    Ok(())
}

fn to_invocation(command: Command) -> anyhow::Result<Invocation> {
    let invocation = match command {
        Command::Seed => Invocation::SeedLedger,
        Command::Register(args) => Invocation::RegisterProduct {
            id: args.id,
            name: args.name,
            description: args.description,
            manufacturing_date: args.manufacturing_date,
            batch_number: args.batch_number,
        },
        Command::Supply(args) => Invocation::UpdateSupplyInfo {
            id: args.id,
            supply_date: args.supply_date,
            location: args.location,
        },
        Command::Wholesale(args) => Invocation::RecordWholesale {
            id: args.id,
            wholesale_date: args.wholesale_date,
            location: args.location,
            quantity: args.quantity,
        },
        Command::Status(args) => Invocation::ChangeProductStatus {
            id: args.id,
            new_status: args.new_status,
        },
        Command::Get(args) => Invocation::GetProductById { id: args.id },
        Command::Invoke(args) => Invocation::parse(&args.function, &args.args[..])?,
    };
    Ok(invocation)
}

/// Run one invocation as one transaction: commit on success, discard on
/// any error. Queries never commit.
pub fn execute<S: WorldState + ?Sized>(
    contract: &SupplyChainContract,
    state: &S,
    invocation: &Invocation,
) -> anyhow::Result<Option<ProductRecord>> {
    let txn = Transaction::begin(state);
    let record = invocation
        .execute(contract, &txn)
        .with_context(|| format!("{} failed", invocation.function()))?;

    if invocation.is_read_only() {
        txn.rollback()?;
    } else {
        let keys = txn.commit()?;
        info!(function = invocation.function(), keys, "invocation committed");
    }
    Ok(record)
}

fn render(
    format: &OutputFormat,
    invocation: &Invocation,
    record: Option<&ProductRecord>,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => {
            let value = match record {
                Some(record) => serde_json::to_value(record)?,
                None => serde_json::json!({
                    "function": invocation.function(),
                    "result": "ok",
                }),
            };
            Ok(serde_json::to_string_pretty(&value)?)
        }
        OutputFormat::Text => Ok(match record {
            Some(record) => render_record(record),
            None => render_summary(invocation),
        }),
    }
}

fn render_summary(invocation: &Invocation) -> String {
    let detail = match invocation {
        Invocation::SeedLedger => "Seeded PRD001 and PRD002".to_string(),
        Invocation::RegisterProduct { id, .. } => format!("Registered {}", id.yellow()),
        Invocation::UpdateSupplyInfo { id, location, .. } => {
            format!("{} is {} at {}", id.yellow(), "In Supply".cyan(), location.bold())
        }
        Invocation::RecordWholesale { id, location, quantity, .. } => format!(
            "{} {} at {} (quantity {})",
            id.yellow(),
            "Wholesale Completed".cyan(),
            location.bold(),
            quantity
        ),
        Invocation::ChangeProductStatus { id, new_status } => {
            format!("{} status set to {}", id.yellow(), new_status.cyan())
        }
        Invocation::GetProductById { id } => format!("Read {}", id.yellow()),
    };
    format!("{} {}", "✓".green().bold(), detail)
}

fn render_record(record: &ProductRecord) -> String {
    let status = if record.status.is_known() {
        record.status.as_str().green()
    } else {
        record.status.as_str().magenta()
    };
    let mut lines = vec![
        format!("Product {}  [{}]", record.product_id.yellow().bold(), status),
        format!("  Name:          {}", record.name),
        format!("  Description:   {}", record.description),
        format!("  Manufactured:  {}", record.manufacturing_date),
        format!("  Batch:         {}", record.batch_number),
    ];
    if !record.supply_date.is_empty() || !record.warehouse_location.is_empty() {
        lines.push(format!(
            "  Supply:        {} @ {}",
            record.supply_date, record.warehouse_location
        ));
    }
    if !record.wholesale_date.is_empty()
        || !record.wholesale_location.is_empty()
        || record.quantity != 0
    {
        lines.push(format!(
            "  Wholesale:     {} @ {} (quantity {})",
            record.wholesale_date, record.wholesale_location, record.quantity
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use supplychain_state::InMemoryWorldState;
    use supplychain_types::ProductStatus;

    fn parse(args: &[&str]) -> Invocation {
        let mut argv = vec!["supplychain"];
        argv.extend_from_slice(args);
        to_invocation(Cli::try_parse_from(argv).unwrap().command).unwrap()
    }

    #[test]
    fn subcommands_map_to_invocations() {
        assert_eq!(parse(&["seed"]), Invocation::SeedLedger);
        assert_eq!(parse(&["get", "P"]), Invocation::GetProductById { id: "P".into() });
        assert_eq!(
            parse(&["wholesale", "P", "d", "l", "-2"]),
            Invocation::RecordWholesale {
                id: "P".into(),
                wholesale_date: "d".into(),
                location: "l".into(),
                quantity: -2,
            }
        );
        assert_eq!(
            parse(&["invoke", "ChangeProductStatus", "P", "Sold"]),
            Invocation::ChangeProductStatus {
                id: "P".into(),
                new_status: "Sold".into(),
            }
        );
    }

    #[test]
    fn invoke_with_unknown_function_fails_early() {
        let cli = Cli::try_parse_from(["supplychain", "invoke", "Nope"]).unwrap();
        assert!(to_invocation(cli.command).is_err());
    }

    #[test]
    fn execute_commits_writes() {
        let state = InMemoryWorldState::new();
        let contract = SupplyChainContract::new();
        assert!(execute(&contract, &state, &Invocation::SeedLedger).unwrap().is_none());
        assert_eq!(state.len().unwrap(), 2);
    }

    #[test]
    fn execute_failure_commits_nothing() {
        let state = InMemoryWorldState::new();
        let contract = SupplyChainContract::new();
        let err = execute(
            &contract,
            &state,
            &Invocation::ChangeProductStatus {
                id: "P".into(),
                new_status: "Sold".into(),
            },
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("not found"));
        assert!(state.is_empty().unwrap());
    }

    #[test]
    fn execute_query_returns_record() {
        let state = InMemoryWorldState::new();
        let contract = SupplyChainContract::new();
        execute(&contract, &state, &Invocation::SeedLedger).unwrap();
        let query = Invocation::GetProductById {
            id: "PRD002".into(),
        };
        let record = execute(&contract, &state, &query).unwrap().unwrap();
        assert_eq!(record.name, "Widget B");
    }

    #[test]
    fn run_command_persists_between_invocations() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let path_arg = path.to_str().unwrap();
        let config = CliConfig::default();

        let run = |args: &[&str]| {
            let mut argv = vec![
                "supplychain".to_string(),
                "--state".to_string(),
                path_arg.to_string(),
            ];
            argv.extend(args.iter().map(|a| a.to_string()));
            run_command(Cli::try_parse_from(argv).unwrap(), &config)
        };

        run(&["seed"]).unwrap();
        run(&["supply", "PRD001", "2023-10-01", "Dock 4"]).unwrap();
        run(&["status", "PRD001", "Sold"]).unwrap();
        assert!(run(&["supply", "PRD999", "2023-10-01", "Dock 4"]).is_err());

        let state = FileWorldState::open(&path).unwrap();
        let record = SupplyChainContract::new().get_product_by_id(&state, "PRD001").unwrap();
        assert_eq!(record.status, ProductStatus::from("Sold"));
        assert_eq!(record.warehouse_location, "Dock 4");
        assert_eq!(state.keys().unwrap(), vec!["PRD001".to_string(), "PRD002".to_string()]);
    }

    #[test]
    fn query_against_missing_directory_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("not-yet");
        let cli = Cli::try_parse_from([
            "supplychain".to_string(),
            "--state".to_string(),
            nested.join("state.json").display().to_string(),
            "get".to_string(),
            "PRD001".to_string(),
        ])
        .unwrap();
        assert!(run_command(cli, &CliConfig::default()).is_err());
        assert!(!nested.exists());
    }

    #[test]
    fn render_json_record_uses_wire_names() {
        let record = ProductRecord::registered("P1", "n", "d", "m", "b");
        let query = Invocation::GetProductById { id: "P1".into() };
        let out = render(&OutputFormat::Json, &query, Some(&record)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["productID"], "P1");
        assert_eq!(value["status"], "Registered");
    }

    #[test]
    fn render_json_summary() {
        let out = render(&OutputFormat::Json, &Invocation::SeedLedger, None).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["function"], "SeedLedger");
        assert_eq!(value["result"], "ok");
    }

    #[test]
    fn render_text_record_shows_downstream_details() {
        let mut record = ProductRecord::registered("P1", "Drill", "d", "2024-01-01", "B1");
        let text = render_record(&record);
        assert!(text.contains("Drill"));
        assert!(!text.contains("Supply:"));

        record.apply_supply("2024-02-01", "Depot");
        record.apply_wholesale("2024-03-01", "Market", -4);
        let text = render_record(&record);
        assert!(text.contains("Depot"));
        assert!(text.contains("quantity -4"));
    }
}
