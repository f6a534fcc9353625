use std::{
    fs,
    path::{Path, PathBuf},
    process,
};

use clap::Parser;
use tracing::debug;

use flint::bytecode::disasm::{print_chunk, print_chunk_stats};
use flint::frontend::token_dumper::TokenDumper;
use flint::{Chunk, CompilerConfig, Scanner, VERSION, compile_with};

const EXIT_COMPILE_ERROR: i32 = 65;
const EXIT_IO_ERROR: i32 = 74;

/// FLINT - single-pass expression compiler
#[derive(Parser, Debug)]
#[command(name = "flint", version = VERSION)]
#[command(about = "Compile arithmetic expressions to bytecode", long_about = None)]
struct Cli {
    /// Source file to compile
    file: Option<PathBuf>,

    /// Compile an expression given on the command line
    #[arg(short = 'e', long = "eval", conflicts_with = "file")]
    eval: Option<String>,

    /// Show tokens only
    #[arg(long)]
    tokens: bool,

    /// Disable colored token output
    #[arg(long)]
    no_color: bool,

    /// Terse token output
    #[arg(long)]
    pretty: bool,

    /// Print the disassembled chunk
    #[arg(long = "bc", alias = "bytecode")]
    bytecode: bool,

    /// Print chunk statistics
    #[arg(long)]
    stats: bool,

    /// Write the compiled chunk image to PATH
    #[arg(long, value_name = "PATH")]
    emit: Option<PathBuf>,

    /// Maximum expression nesting depth
    #[arg(long, default_value_t = flint::config::DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose { "flint=debug" } else { "flint=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let source = match read_source(&cli) {
        Ok(source) => source,
        Err(msg) => {
            eprintln!("{}", msg);
            process::exit(EXIT_IO_ERROR);
        }
    };

    if cli.tokens {
        dump_tokens(&source, cli.no_color, cli.pretty);
        return;
    }

    let config = CompilerConfig::new().with_max_depth(cli.max_depth);
    let chunk = compile_source(&source, &config);

    if cli.bytecode {
        print_chunk(&chunk, "code");
    }
    if cli.stats {
        print_chunk_stats(&chunk);
    }
    if let Some(path) = &cli.emit {
        emit_chunk(&chunk, path);
    }
}

fn read_source(cli: &Cli) -> Result<String, String> {
    match (&cli.file, &cli.eval) {
        (_, Some(expr)) => Ok(expr.clone()),
        (Some(path), None) => fs::read_to_string(path)
            .map_err(|e| format!("Failed to read '{}': {}", path.display(), e)),
        (None, None) => Err("Error: expected a source file or -e <expr>".to_string()),
    }
}

fn dump_tokens(source: &str, no_color: bool, pretty: bool) {
    let mut dumper = TokenDumper::new();

    if no_color {
        dumper = dumper.no_color();
    }
    if pretty {
        dumper = dumper.pretty();
    }

    dumper.dump(Scanner::new(source));
}

fn compile_source(source: &str, config: &CompilerConfig) -> Chunk {
    let mut chunk = Chunk::new();

    if let Err(e) = compile_with(source, &mut chunk, config) {
        for diagnostic in &e.diagnostics {
            eprintln!("{}", diagnostic);
        }
        process::exit(EXIT_COMPILE_ERROR);
    }

    debug!(bytes = chunk.len(), "chunk ready");
    chunk
}

fn emit_chunk(chunk: &Chunk, path: &Path) {
    let bytes = match chunk.to_bytes() {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("Failed to encode chunk: {}", e);
            process::exit(EXIT_IO_ERROR);
        }
    };

    if let Err(e) = fs::write(path, &bytes) {
        eprintln!("Failed to write '{}': {}", path.display(), e);
        process::exit(EXIT_IO_ERROR);
    }

    debug!(path = %path.display(), size = bytes.len(), "chunk image written");
}
