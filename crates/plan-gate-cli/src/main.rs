// crates/plan-gate-cli/src/main.rs
// ============================================================================
// Module: Plan Gate CLI Entry Point
// Description: Command dispatcher for payment plan validation and repair.
// Purpose: Provide a scriptable front end to the constraint engine.
// Dependencies: clap, plan-gate-config, plan-gate-core, serde, serde_jcs, thiserror.
// ============================================================================

//! ## Overview
//! The Plan Gate CLI validates, repairs, and quotes payment plans against the
//! configured financing rules. Money arguments are parsed strictly at the
//! boundary; the engine only ever sees well-formed amounts. Commands that
//! check a plan exit with failure when the plan has violations.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use plan_gate_cli::t;
use plan_gate_config::CONFIG_ENV_VAR;
use plan_gate_config::DEFAULT_CONFIG_NAME;
use plan_gate_config::PlanGateConfig;
use plan_gate_config::config_toml_example;
use plan_gate_core::AuditSink;
use plan_gate_core::Consultation;
use plan_gate_core::Evaluation;
use plan_gate_core::FileAuditSink;
use plan_gate_core::Money;
use plan_gate_core::MoneyError;
use plan_gate_core::NoopAuditSink;
use plan_gate_core::PaymentPlanProposal;
use plan_gate_core::PlanGate;
use plan_gate_core::PlanQuote;
use plan_gate_core::RepairOutcome;
use plan_gate_core::RuleSet;
use plan_gate_core::StderrAuditSink;
use plan_gate_core::Violation;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "plan-gate", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a payment plan against the configured rules.
    Validate(PlanCommand),
    /// Repair a payment plan and re-validate the result.
    Repair(PlanCommand),
    /// Show the monthly payment for a payment plan.
    Quote(PlanCommand),
    /// Apply each configured preset to a treatment cost.
    Presets(PresetsCommand),
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate a Plan Gate configuration file.
    Validate(ConfigArgs),
    /// Print the canonical example configuration.
    Example,
    /// Print the effective rule set as canonical JSON.
    Rules(ConfigArgs),
}

/// Config file selection shared by all commands.
#[derive(Args, Debug)]
struct ConfigArgs {
    /// Optional config file path (defaults to plan-gate.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Arguments describing a single payment plan.
#[derive(Args, Debug)]
struct PlanCommand {
    /// Proposed down payment (e.g. 1000, 1000.50, $1,000).
    #[arg(long, value_name = "AMOUNT", value_parser = parse_money, allow_hyphen_values = true)]
    down_payment: Money,
    /// Proposed number of monthly installments.
    #[arg(long, value_name = "MONTHS", allow_hyphen_values = true)]
    installments: i32,
    /// Total treatment cost before insurance.
    #[arg(long, value_name = "AMOUNT", value_parser = parse_money, allow_hyphen_values = true)]
    total_cost: Money,
    /// Insurance coverage deducted from the total cost.
    #[arg(long, value_name = "AMOUNT", value_parser = parse_money, allow_hyphen_values = true)]
    insurance: Option<Money>,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Config file selection.
    #[command(flatten)]
    config: ConfigArgs,
}

impl PlanCommand {
    /// Builds the proposal with insurance netted out of the total cost.
    fn proposal(&self) -> PaymentPlanProposal {
        Consultation {
            treatment_name: String::new(),
            total_cost: self.total_cost,
            insurance_coverage: self.insurance.unwrap_or_default(),
            down_payment: self.down_payment,
            installments: self.installments,
        }
        .proposal()
    }
}

/// Arguments for preset listing.
#[derive(Args, Debug)]
struct PresetsCommand {
    /// Total treatment cost before insurance.
    #[arg(long, value_name = "AMOUNT", value_parser = parse_money, allow_hyphen_values = true)]
    total_cost: Money,
    /// Insurance coverage deducted from the total cost.
    #[arg(long, value_name = "AMOUNT", value_parser = parse_money, allow_hyphen_values = true)]
    insurance: Option<Money>,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Config file selection.
    #[command(flatten)]
    config: ConfigArgs,
}

/// Output formats for plan reports.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Human-readable text.
    Text,
    /// Canonical JSON.
    Json,
}

// ============================================================================
// SECTION: Output Types
// ============================================================================

/// JSON report for `validate`.
#[derive(Serialize)]
struct ValidateReport<'a> {
    /// True when the plan has no violations.
    valid: bool,
    /// Evaluation details.
    #[serde(flatten)]
    evaluation: &'a Evaluation,
}

/// JSON report for `repair`.
#[derive(Serialize)]
struct RepairReport<'a> {
    /// True when the repaired plan has no violations.
    compliant: bool,
    /// Repair details.
    #[serde(flatten)]
    outcome: &'a RepairOutcome,
}

/// JSON entry for `presets`.
#[derive(Serialize)]
struct PresetReport {
    /// Preset identifier.
    id: String,
    /// Preset display name.
    name: String,
    /// True when the preset plan has no violations.
    valid: bool,
    /// Evaluation of the preset plan.
    #[serde(flatten)]
    evaluation: Evaluation,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for catalog error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a catalog message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Validate(command) => command_validate(&command),
        Commands::Repair(command) => command_repair(&command),
        Commands::Quote(command) => command_quote(&command),
        Commands::Presets(command) => command_presets(&command),
        Commands::Config {
            command,
        } => command_config(command),
    }
}

/// Prints top-level help.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line("").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(())
}

/// Parses a money argument.
fn parse_money(value: &str) -> Result<Money, MoneyError> {
    Money::parse(value)
}

// ============================================================================
// SECTION: Plan Commands
// ============================================================================

/// Executes the `validate` command.
fn command_validate(command: &PlanCommand) -> CliResult<ExitCode> {
    let config = load_config(command.config.config.as_deref())?;
    let gate = build_gate(&config)?;
    let evaluation = gate.evaluate(&command.proposal());

    match command.format {
        OutputFormat::Json => write_json(&ValidateReport {
            valid: evaluation.is_valid(),
            evaluation: &evaluation,
        })?,
        OutputFormat::Text => {
            let mut lines = vec![plan_summary(&evaluation.proposal)];
            lines.extend(quote_lines(&evaluation.quote, gate.rules()));
            if evaluation.is_valid() {
                lines.push(t!("plan.valid"));
            } else {
                lines.push(t!("plan.violations.header", count = evaluation.violations.len()));
                lines.extend(violation_lines(&evaluation.violations));
            }
            write_lines(&lines)?;
        }
    }
    Ok(exit_for(evaluation.is_valid()))
}

/// Executes the `repair` command.
fn command_repair(command: &PlanCommand) -> CliResult<ExitCode> {
    let config = load_config(command.config.config.as_deref())?;
    let gate = build_gate(&config)?;
    let outcome = gate.auto_fix(&command.proposal());

    match command.format {
        OutputFormat::Json => write_json(&RepairReport {
            compliant: outcome.is_compliant(),
            outcome: &outcome,
        })?,
        OutputFormat::Text => {
            let mut lines = vec![
                t!(
                    "repair.original",
                    down = outcome.original.down_payment,
                    installments = outcome.original.installments
                ),
                t!(
                    "repair.repaired",
                    down = outcome.repaired.down_payment,
                    installments = outcome.repaired.installments
                ),
            ];
            if !outcome.changed {
                lines.push(t!("repair.unchanged"));
            }
            if outcome.is_compliant() {
                lines.push(t!("repair.compliant"));
            } else {
                lines.push(t!("repair.residual.header", count = outcome.residual.len()));
                lines.extend(violation_lines(&outcome.residual));
                if gate.rules().zero_down_is_unrepairable() && outcome.repaired.down_payment.is_zero()
                {
                    lines.push(t!("repair.unrepairable_hint", minimum = gate.rules().min_down_payment()));
                }
            }
            write_lines(&lines)?;
        }
    }
    Ok(exit_for(outcome.is_compliant()))
}

/// Executes the `quote` command.
fn command_quote(command: &PlanCommand) -> CliResult<ExitCode> {
    let config = load_config(command.config.config.as_deref())?;
    let rules = config
        .rule_set()
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    let proposal = command.proposal();
    let quote = PlanQuote::compute(&proposal, &rules);

    match command.format {
        OutputFormat::Json => write_json(&quote)?,
        OutputFormat::Text => {
            let mut lines = vec![plan_summary(&proposal)];
            lines.extend(quote_lines(&quote, &rules));
            write_lines(&lines)?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Executes the `presets` command.
fn command_presets(command: &PresetsCommand) -> CliResult<ExitCode> {
    let config = load_config(command.config.config.as_deref())?;
    let gate = build_gate(&config)?;
    let total_cost = Consultation {
        treatment_name: String::new(),
        total_cost: command.total_cost,
        insurance_coverage: command.insurance.unwrap_or_default(),
        down_payment: Money::zero(),
        installments: 0,
    }
    .patient_cost();

    let reports: Vec<PresetReport> = config
        .presets()
        .into_iter()
        .map(|preset| {
            let evaluation = gate.evaluate(&preset.apply(total_cost));
            PresetReport {
                id: preset.id,
                name: preset.name,
                valid: evaluation.is_valid(),
                evaluation,
            }
        })
        .collect();

    match command.format {
        OutputFormat::Json => write_json(&reports)?,
        OutputFormat::Text => {
            let lines: Vec<String> = reports
                .iter()
                .map(|report| {
                    let status = if report.valid {
                        t!("presets.status.compliant")
                    } else {
                        t!("presets.status.violations", count = report.evaluation.violations.len())
                    };
                    t!(
                        "presets.entry",
                        id = report.id,
                        name = report.name,
                        down = report.evaluation.proposal.down_payment,
                        installments = report.evaluation.proposal.installments,
                        monthly = report.evaluation.quote.monthly_payment,
                        status = status
                    )
                })
                .collect();
            write_lines(&lines)?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Dispatches config subcommands.
fn command_config(command: ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate(args) => command_config_validate(&args),
        ConfigCommand::Example => {
            write_stdout_bytes(config_toml_example().as_bytes())
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
            Ok(ExitCode::SUCCESS)
        }
        ConfigCommand::Rules(args) => {
            let config = load_config(args.config.as_deref())?;
            let rules: RuleSet = config
                .rule_set()
                .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
            write_json(&rules)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Executes the config validation command.
fn command_config_validate(args: &ConfigArgs) -> CliResult<ExitCode> {
    let _config = PlanGateConfig::load(args.config.as_deref())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    write_stdout_line(&t!("config.validate.ok"))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Gate Setup
// ============================================================================

/// Loads configuration, falling back to defaults when no file is present.
fn load_config(path: Option<&Path>) -> CliResult<PlanGateConfig> {
    if path.is_none()
        && std::env::var_os(CONFIG_ENV_VAR).is_none()
        && !Path::new(DEFAULT_CONFIG_NAME).exists()
    {
        return Ok(PlanGateConfig::default());
    }
    PlanGateConfig::load(path).map_err(|err| CliError::new(t!("config.load_failed", error = err)))
}

/// Builds a plan gate with the configured rules and audit sink.
fn build_gate(config: &PlanGateConfig) -> CliResult<PlanGate<Box<dyn AuditSink>>> {
    let rules =
        config.rule_set().map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    let sink: Box<dyn AuditSink> = match (config.audit.enabled, config.audit.path.as_deref()) {
        (false, _) => Box::new(NoopAuditSink),
        (true, None) => Box::new(StderrAuditSink),
        (true, Some(path)) => Box::new(FileAuditSink::new(Path::new(path)).map_err(|err| {
            CliError::new(t!("audit.open_failed", path = path, error = err))
        })?),
    };
    Ok(PlanGate::new(rules, sink))
}

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Renders the plan summary line.
fn plan_summary(proposal: &PaymentPlanProposal) -> String {
    t!(
        "plan.summary",
        down = proposal.down_payment,
        installments = proposal.installments,
        total = proposal.total_cost
    )
}

/// Renders quote lines, including the advisory minimum note.
fn quote_lines(quote: &PlanQuote, rules: &RuleSet) -> Vec<String> {
    let mut lines = vec![t!(
        "plan.quote",
        monthly = quote.monthly_payment,
        financed = quote.financed_amount
    )];
    if quote.below_min_monthly
        && let Some(minimum) = rules.min_monthly_payment()
    {
        lines.push(t!("plan.advisory.min_monthly", minimum = minimum));
    }
    lines
}

/// Renders one line per violation.
fn violation_lines(violations: &[Violation]) -> Vec<String> {
    violations.iter().map(|violation| t!("plan.violations.entry", violation = violation)).collect()
}

/// Maps a compliance result to an exit code.
fn exit_for(compliant: bool) -> ExitCode {
    if compliant { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes raw bytes to stdout without adding a newline.
fn write_stdout_bytes(bytes: &[u8]) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    stdout.write_all(bytes)
}

/// Writes each line to stdout.
fn write_lines(lines: &[String]) -> CliResult<()> {
    let mut output = lines.join("\n");
    output.push('\n');
    write_stdout_bytes(output.as_bytes()).map_err(|err| CliError::new(output_error("stdout", &err)))
}

/// Writes canonical JSON to stdout.
fn write_json<T: Serialize>(value: &T) -> CliResult<()> {
    let mut bytes = serde_jcs::to_vec(value)
        .map_err(|err| CliError::new(t!("output.json_failed", error = err)))?;
    bytes.push(b'\n');
    write_stdout_bytes(&bytes).map_err(|err| CliError::new(output_error("stdout", &err)))
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
