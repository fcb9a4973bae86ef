use anyhow::{bail, Context};
use clap::{ArgGroup, Parser};
use std::io::{self, BufRead, Read, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use utur::{
    MachineConfig, Mode, ProgramLoader, ProgramManager, RuleSet, TuringMachine,
    DEFAULT_MAX_STEPS,
};

#[derive(Parser)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
#[clap(group(ArgGroup::new("source").args(["program", "code", "decimal", "example"])))]
#[clap(after_help = "EXAMPLES:
  utur-cli --example bit-invert --input 0110
  utur-cli --code 01010100100 --input 0 --step
  echo 1011 | utur-cli --program increment.tm")]
struct Cli {
    /// File holding the program, binary or decimal
    #[clap(short, long)]
    program: Option<PathBuf>,

    /// The binary program itself
    #[clap(short, long)]
    code: Option<String>,

    /// The program written as a decimal number
    #[clap(long)]
    decimal: Option<String>,

    /// Name of a bundled program
    #[clap(short, long)]
    example: Option<String>,

    /// List the bundled programs and exit
    #[clap(long)]
    list: bool,

    /// The initial tape. Read from stdin when omitted.
    #[clap(short, long)]
    input: Option<String>,

    /// Print each step of the execution
    #[clap(short, long)]
    step: bool,

    /// Stop after this many steps, 0 for no limit
    #[clap(long)]
    max_steps: Option<u64>,

    /// Reject programs with conflicting transitions
    #[clap(long)]
    strict: bool,

    /// JSON file with machine settings
    #[clap(long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[clap(long, default_value = "warn")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    if cli.list {
        for index in 0..ProgramManager::get_program_count() {
            let info = ProgramManager::get_program_info(index)?;
            println!("{:<20} {}", info.name, info.description);
        }
        return Ok(());
    }

    let config = load_config(&cli)?;
    let rules = load_rules(&cli, config.mode)?;
    let input = read_input(&cli)?;

    if config.trace {
        println!("Running in step mode...");
    } else {
        println!("Running in normal mode...");
    }

    let mut machine = TuringMachine::new(rules, &input, config)?;
    let result = machine.run()?;

    println!("Final result: {}", result);

    Ok(())
}

/// Builds the machine settings. Command line flags win over the configuration file.
fn load_config(cli: &Cli) -> anyhow::Result<MachineConfig> {
    let defaults = MachineConfig {
        max_steps: Some(DEFAULT_MAX_STEPS),
        ..MachineConfig::default()
    };
    let mut config = match &cli.config {
        Some(path) => ProgramLoader::load_config_over(path, defaults)?,
        None => defaults,
    };

    if let Some(max_steps) = cli.max_steps {
        config.max_steps = (max_steps > 0).then_some(max_steps);
    }
    if cli.step {
        config.trace = true;
    }
    if cli.strict {
        config.mode = Mode::Strict;
    }

    Ok(config)
}

fn load_rules(cli: &Cli, mode: Mode) -> anyhow::Result<RuleSet> {
    let rules = if let Some(path) = &cli.program {
        ProgramLoader::load_program_with_mode(path, mode)?
    } else if let Some(code) = &cli.code {
        ProgramLoader::load_program_from_string_with_mode(code, mode)?
    } else if let Some(decimal) = &cli.decimal {
        let code = ProgramLoader::from_decimal(decimal)?;
        ProgramLoader::load_program_from_string_with_mode(&code, mode)?
    } else if let Some(name) = &cli.example {
        let program = ProgramManager::get_program_by_name(name)?;
        ProgramLoader::load_program_from_string_with_mode(program.code, mode)?
    } else {
        bail!("No program given, use --program, --code, --decimal or --example");
    };

    Ok(rules)
}

/// Reads the initial tape from the command line, a pipe or an interactive prompt.
fn read_input(cli: &Cli) -> anyhow::Result<String> {
    if let Some(input) = &cli.input {
        return Ok(ProgramLoader::read_binary(input)?);
    }

    if atty::isnt(atty::Stream::Stdin) {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        return Ok(ProgramLoader::read_binary(&buffer)?);
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("Enter the input for the Turing machine: ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            bail!("No input given");
        };

        match ProgramLoader::read_binary(&line?) {
            Ok(input) => return Ok(input),
            Err(e) => println!("{}. Please enter binary data.", e),
        }
    }
}
