use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "supplychain",
    about = "Supply chain ledger — product lifecycle tracking",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// World state snapshot file (overrides the config file)
    #[arg(long, global = true)]
    pub state: Option<PathBuf>,

    /// Configuration file (defaults to ./supplychain.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Write the two initial manufactured products
    Seed,
    /// Register a product (replaces any existing record with the same id)
    Register(RegisterArgs),
    /// Record warehouse details and mark the product "In Supply"
    Supply(SupplyArgs),
    /// Record a wholesale and mark the product "Wholesale Completed"
    Wholesale(WholesaleArgs),
    /// Set an arbitrary status label
    Status(StatusArgs),
    /// Show a product record
    Get(GetArgs),
    /// Call a contract function by name with string arguments
    Invoke(InvokeArgs),
}

#[derive(Args)]
pub struct RegisterArgs {
    pub id: String,
    pub name: String,
    pub description: String,
    pub manufacturing_date: String,
    pub batch_number: String,
}

#[derive(Args)]
pub struct SupplyArgs {
    pub id: String,
    pub supply_date: String,
    pub location: String,
}

#[derive(Args)]
pub struct WholesaleArgs {
    pub id: String,
    pub wholesale_date: String,
    pub location: String,
    #[arg(allow_negative_numbers = true)]
    pub quantity: i64,
}

#[derive(Args)]
pub struct StatusArgs {
    pub id: String,
    pub new_status: String,
}

#[derive(Args)]
pub struct GetArgs {
    pub id: String,
}

#[derive(Args)]
pub struct InvokeArgs {
    pub function: String,
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_seed() {
        let cli = Cli::try_parse_from(["supplychain", "seed"]).unwrap();
        assert!(matches!(cli.command, Command::Seed));
    }

    #[test]
    fn parse_register() {
        let cli = Cli::try_parse_from([
            "supplychain",
            "register",
            "PRD003",
            "Widget C",
            "A widget",
            "2024-01-01",
            "BATCH003",
        ])
        .unwrap();
        let Command::Register(args) = cli.command else {
            panic!("wrong command");
        };
        assert_eq!(args.id, "PRD003");
        assert_eq!(args.name, "Widget C");
        assert_eq!(args.batch_number, "BATCH003");
    }

    #[test]
    fn parse_register_missing_args() {
        assert!(Cli::try_parse_from(["supplychain", "register", "PRD003"]).is_err());
    }

    #[test]
    fn parse_supply() {
        let cli = Cli::try_parse_from(["supplychain", "supply", "PRD001", "2023-10-01", "Dock 4"])
            .unwrap();
        let Command::Supply(args) = cli.command else {
            panic!("wrong command");
        };
        assert_eq!(args.location, "Dock 4");
    }

    #[test]
    fn parse_wholesale_negative_quantity() {
        let cli = Cli::try_parse_from([
            "supplychain",
            "wholesale",
            "PRD001",
            "2023-10-02",
            "Market",
            "-3",
        ])
        .unwrap();
        let Command::Wholesale(args) = cli.command else {
            panic!("wrong command");
        };
        assert_eq!(args.quantity, -3);
    }

    #[test]
    fn parse_wholesale_rejects_non_integer() {
        assert!(Cli::try_parse_from(["supplychain", "wholesale", "P", "d", "l", "many"]).is_err());
    }

    #[test]
    fn parse_status() {
        let cli = Cli::try_parse_from(["supplychain", "status", "PRD001", "Sold"]).unwrap();
        let Command::Status(args) = cli.command else {
            panic!("wrong command");
        };
        assert_eq!(args.new_status, "Sold");
    }

    #[test]
    fn parse_invoke() {
        let cli = Cli::try_parse_from([
            "supplychain",
            "invoke",
            "RecordWholesale",
            "P",
            "d",
            "l",
            "-5",
        ])
        .unwrap();
        let Command::Invoke(args) = cli.command else {
            panic!("wrong command");
        };
        assert_eq!(args.function, "RecordWholesale");
        assert_eq!(args.args, vec!["P", "d", "l", "-5"]);
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::try_parse_from([
            "supplychain", "get", "PRD001", "--state", "/tmp/s.json", "--format", "json", "-v",
        ])
        .unwrap();
        assert_eq!(cli.state, Some(PathBuf::from("/tmp/s.json")));
        assert!(matches!(cli.format, OutputFormat::Json));
        assert!(cli.verbose);
    }
}
