use clap::Parser as ClapParser;
use pathkit::cli::{self, CliError, RunOptions};
use std::io::{self, Read};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "pathkit")]
#[command(about = "Read or update a value inside a JSON document using a path expression")]
#[command(version)]
struct Cli {
    /// The path to query, e.g. '$.items[0].name' or 'a..b[*]'
    query: String,

    /// A JSON string to process (read from stdin when piped and omitted)
    #[arg(long)]
    data: Option<String>,

    /// A JSON file to process
    #[arg(long)]
    file: Option<PathBuf>,

    /// A value to set using the query; JSON, or a plain string otherwise
    #[arg(long)]
    set: Option<String>,

    /// Indentation to use when printing the result
    #[arg(long, default_value_t = 0)]
    indent: usize,

    /// Fail instead of creating missing keys, containers or array positions
    #[arg(long)]
    strict: bool,

    /// Log compilation and evaluation details to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "pathkit=debug" } else { "pathkit=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let data = match cli.data {
        Some(s) => Some(s),
        None if cli.file.is_none() && !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Some(buffer)
        }
        None => None,
    };

    let options = RunOptions {
        query: cli.query,
        data,
        file: cli.file,
        set: cli.set,
        strict: cli.strict,
    };

    let output = cli::execute(&options)?;
    println!("{}", cli::render(&output, cli.indent)?);
    Ok(())
}
