use std::io;
use std::path::PathBuf;
use std::{fs, process};

use clap::{Parser, Subcommand, ValueEnum};

use rlox_lang::{error, rlox};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Specify the log level of the interpreter.
    #[arg(value_enum, short, long, global = true, default_value_t = LogLevel::default())]
    verbosity: LogLevel,
}

/// Enum for specifying the log level of the interpreter.
#[derive(ValueEnum, Clone, Default, Debug)]
enum LogLevel {
    /// The default log level. Only critical errors will be logged.
    #[default]
    Error,

    /// Also log warnings.
    Warn,

    /// Also log information about the general state of the interpreter.
    Info,

    /// Log the stages of the pipeline as they run.
    Debug,

    /// Log everything.
    Trace,
}

impl From<&LogLevel> for log::Level {
    fn from(value: &LogLevel) -> Self {
        match value {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scan a script and print its tokens.
    Tokenize { file: PathBuf },

    /// Parse a script and print its syntax tree as s-expressions.
    Parse { file: PathBuf },

    /// Evaluate a single expression and print its value.
    Evaluate { file: PathBuf },

    /// Run a script.
    Run { file: PathBuf },
}

fn main() {
    let args = Cli::parse();

    simple_logger::init_with_level((&args.verbosity).into()).expect("logger to initialize");

    let mut stdout = io::stdout();
    let mut lox = rlox::new(&mut stdout);

    let Some(command) = args.command else {
        lox.run_prompt();
        return;
    };

    match command {
        Commands::Tokenize { file } => lox.tokenize(&read(file)),
        Commands::Parse { file } => lox.parse(&read(file)),
        Commands::Evaluate { file } => lox.evaluate(&read(file)),
        Commands::Run { file } => lox.run(&read(file)),
    };

    if error::did_static_error() {
        process::exit(65);
    }
    if error::did_runtime_error() {
        process::exit(70);
    }
}

fn read(path: PathBuf) -> String {
    fs::read_to_string(path).expect("Should have been able to read the file")
}
