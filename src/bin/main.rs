use std::{error::Error, fs, path::PathBuf, process::ExitCode};

use clap::{Parser, ValueEnum};
use loopc::{eval::Interpreter, lexer, parser, synth, util::fmt::tree};

#[derive(Parser)]
#[command(name = "loopc", version, about = "Compiles LOOP programs to Python")]
struct Cli {
    /// Source file to compile
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// What to print
    #[arg(long, value_enum, default_value_t = Emit::Python)]
    emit: Emit,

    /// Evaluates the given function instead of printing anything
    #[arg(long, value_name = "FUNC")]
    run: Option<String>,

    /// Arguments passed to the function given to `--run`
    #[arg(value_name = "ARGS", requires = "run")]
    args: Vec<u64>,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Emit {
    Python,
    Ast,
    Tokens,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if let Err(error) = run(&cli) {
        println!("error: {error}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let src = fs::read_to_string(&cli.input)?;
    log::debug!("read {} bytes from {}", src.len(), cli.input.display());

    if let Some(function) = &cli.run {
        let program = parser::parse_program(&src)?;
        let result = Interpreter::new(&program).call(function, &cli.args)?;
        println!("{result}");
        return Ok(());
    }

    match cli.emit {
        Emit::Tokens => {
            for token in lexer::Lexer::new(&src) {
                println!("{:?}", token?);
            }
        }
        Emit::Ast => {
            let program = parser::parse_program(&src)?;
            print!("{}", tree::print_program_string(&program));
        }
        Emit::Python => {
            let program = parser::parse_program(&src)?;
            print!("{}", synth::synthesize(&program));
        }
    }
    Ok(())
}
