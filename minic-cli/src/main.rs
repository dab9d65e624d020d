use clap::Parser;
use minic_compiler::{compile_to_ast_dump, compile_to_ir, compile_to_riscv};
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "minicc")]
#[command(about = "A staged compiler for a minimal C subset")]
struct Args {
    /// Path to the source file to compile
    file: PathBuf,

    /// Dump the syntax tree
    #[arg(long, conflicts_with_all = ["ir", "asm"])]
    ast: bool,

    /// Emit the textual SSA IR
    #[arg(long, conflicts_with = "asm")]
    ir: bool,

    /// Emit RISC-V assembly (the default)
    #[arg(long)]
    asm: bool,

    /// Write the output to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    let src = fs::read_to_string(&args.file).unwrap_or_else(|e| {
        eprintln!("Error reading file '{}': {}", args.file.display(), e);
        std::process::exit(1);
    });

    // One terminal output per run; assembly when no mode is requested.
    let result = if args.ast {
        compile_to_ast_dump(&src)
    } else if args.ir {
        compile_to_ir(&src)
    } else {
        compile_to_riscv(&src)
    };

    let text = result.unwrap_or_else(|e| {
        eprintln!("Compilation error: {}", e);
        std::process::exit(1);
    });

    match &args.output {
        Some(path) => {
            if let Err(e) = fs::write(path, &text) {
                eprintln!("Error writing file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        }
        None => print!("{text}"),
    }
}
