use std::env;
use std::fs;

fn main() {
    let args = env::args().skip(1).collect::<Vec<_>>();

    if let Some(result) = maybe_run_subcommand(&args) {
        if let Err(err) = result {
            eprintln!("{}", err);
            std::process::exit(1);
        }
        return;
    }

    match parse_cli(args) {
        Ok(options) => match fs::read_to_string(&options.path) {
            Ok(source) => {
                if let Err(err) = run_source_file(&source, &options) {
                    eprintln!("{}", err);
                    std::process::exit(1);
                }
            }
            Err(err) => {
                eprintln!("failed to read '{}': {}", options.path, err);
                std::process::exit(1);
            }
        },
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    }
}

struct CliOptions {
    path: String,
    show_tokens: bool,
    show_ast: bool,
}

fn maybe_run_subcommand(args: &[String]) -> Option<Result<(), String>> {
    let command = args.first()?.as_str();
    match command {
        "repl" => Some(quadc::repl::run().map_err(|err| format!("repl error: {}", err))),
        _ => None,
    }
}

fn parse_cli(args: Vec<String>) -> Result<CliOptions, String> {
    let mut path: Option<String> = None;
    let mut show_tokens = false;
    let mut show_ast = false;

    for arg in args {
        if arg == "--tokens" {
            show_tokens = true;
            continue;
        }

        if arg == "--ast" {
            show_ast = true;
            continue;
        }

        if arg.starts_with("--") {
            return Err(format!("unknown flag '{}'", arg));
        }

        if path.is_none() {
            path = Some(arg);
        } else {
            return Err("multiple source paths provided".to_string());
        }
    }

    let Some(path) = path else {
        return Err(usage());
    };

    Ok(CliOptions {
        path,
        show_tokens,
        show_ast,
    })
}

fn usage() -> String {
    "usage: quadc [--tokens] [--ast] <source-file>\n       quadc repl".to_string()
}

fn run_source_file(source: &str, options: &CliOptions) -> Result<(), String> {
    if options.show_tokens {
        let tokens = quadc::lexer::lex(source);
        print!("{}", quadc::lexer::render_token_table(&tokens));
    }

    let output = quadc::compile(source).map_err(|err| err.to_string())?;

    if options.show_ast {
        println!("=== Parsed AST ===");
        print!("{}", output.program);
    }

    print!(
        "{}",
        quadc::ir::printer::render_listing("Unoptimized", &output.code)
    );
    println!();
    print!(
        "{}",
        quadc::ir::printer::render_listing("Optimized", &output.optimized)
    );
    println!();
    println!("=== Final Assembly Code ===");
    print!("{}", output.assembly);
    Ok(())
}
