pub mod highlighter;

use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::{ValidationContext, ValidationResult, Validator};
use rustyline::{Context, Editor, Helper};
use std::error::Error;
use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::parser::ast::{Block, Item, Program, Stmt};

const MAX_HISTORY_ENTRIES: usize = 500;

enum CommandAction {
    NotHandled,
    Handled,
    Exit,
}

/// Per-session output toggles, flipped by `:tokens` and `:ast`.
struct ReplOptions {
    show_tokens: bool,
    show_ast: bool,
}

#[derive(Clone)]
struct ReplEditorHelper {
    symbols: Arc<Mutex<Vec<String>>>,
}

impl ReplEditorHelper {
    fn new() -> Self {
        Self {
            symbols: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn set_symbols(&self, symbols: Vec<String>) {
        if let Ok(mut guard) = self.symbols.lock() {
            *guard = symbols;
        }
    }

    fn symbols(&self) -> Vec<String> {
        self.symbols
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl Helper for ReplEditorHelper {}

impl Hinter for ReplEditorHelper {
    type Hint = String;
}

impl Validator for ReplEditorHelper {
    fn validate(
        &self,
        context: &mut ValidationContext<'_>,
    ) -> Result<ValidationResult, ReadlineError> {
        if highlighter::needs_more_input(context.input()) {
            Ok(ValidationResult::Incomplete)
        } else {
            Ok(ValidationResult::Valid(None))
        }
    }
}

impl Highlighter for ReplEditorHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> std::borrow::Cow<'l, str> {
        std::borrow::Cow::Owned(highlighter::colorize(line))
    }
}

impl Completer for ReplEditorHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> Result<(usize, Vec<Pair>), ReadlineError> {
        let line = &line[..pos.min(line.len())];
        let mut start = line.len();
        for (idx, ch) in line.char_indices().rev() {
            if ch == '_' || ch.is_ascii_alphanumeric() {
                start = idx;
            } else {
                break;
            }
        }

        let prefix = &line[start..];
        if prefix.is_empty() {
            return Ok((start, Vec::new()));
        }

        let suggestions = highlighter::complete(prefix, &self.symbols());
        let pairs = suggestions
            .into_iter()
            .map(|value| Pair {
                display: value.clone(),
                replacement: value,
            })
            .collect::<Vec<_>>();
        Ok((start, pairs))
    }
}

pub fn run() -> Result<(), Box<dyn Error>> {
    let mut multiline_buffer = String::new();
    let mut options = ReplOptions {
        show_tokens: false,
        show_ast: false,
    };
    let mut history = load_history();

    println!("quadc REPL");
    println!("Commands: :help, :tokens on|off, :ast on|off, :history, :quit");
    println!("Multi-line mode is automatic when input is syntactically incomplete.");

    if io::stdin().is_terminal() {
        let helper = ReplEditorHelper::new();
        let mut editor = Editor::<ReplEditorHelper, DefaultHistory>::new()?;
        editor.set_helper(Some(helper.clone()));

        for entry in &history {
            let _ = editor.add_history_entry(entry.as_str());
        }

        loop {
            let prompt = if multiline_buffer.is_empty() {
                "quadc> "
            } else {
                "....> "
            };

            let raw_line = match editor.readline(prompt) {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(err) => return Err(Box::<dyn Error>::from(err)),
            };

            if multiline_buffer.is_empty() {
                match handle_meta_command(raw_line.trim(), &history, &mut options) {
                    CommandAction::NotHandled => {}
                    CommandAction::Handled => continue,
                    CommandAction::Exit => break,
                }
            }

            let normalized = highlighter::normalize_line(&raw_line);
            if multiline_buffer.is_empty() && normalized.trim().is_empty() {
                continue;
            }

            if !multiline_buffer.is_empty() {
                multiline_buffer.push('\n');
            }
            multiline_buffer.push_str(&normalized);

            if highlighter::needs_more_input(&multiline_buffer) {
                continue;
            }

            let input = std::mem::take(&mut multiline_buffer);
            if !input.trim().is_empty() {
                let _ = editor.add_history_entry(input.as_str());
                history.push(input.clone());
                trim_history(&mut history);
            }

            if let Some(symbols) = evaluate(&input, &options) {
                if let Some(editor_helper) = editor.helper_mut() {
                    editor_helper.set_symbols(symbols);
                }
            }
        }
    } else {
        let stdin = io::stdin();
        let mut line = String::new();
        loop {
            let prompt = if multiline_buffer.is_empty() {
                "quadc> "
            } else {
                "....> "
            };
            print!("{}", prompt);
            io::stdout().flush()?;

            line.clear();
            if stdin.read_line(&mut line)? == 0 {
                break;
            }

            let raw_line = line.trim_end_matches(['\n', '\r']);
            if multiline_buffer.is_empty() {
                match handle_meta_command(raw_line.trim(), &history, &mut options) {
                    CommandAction::NotHandled => {}
                    CommandAction::Handled => continue,
                    CommandAction::Exit => break,
                }
            }

            let normalized = highlighter::normalize_line(raw_line);
            if multiline_buffer.is_empty() && normalized.trim().is_empty() {
                continue;
            }

            if !multiline_buffer.is_empty() {
                multiline_buffer.push('\n');
            }
            multiline_buffer.push_str(&normalized);

            if highlighter::needs_more_input(&multiline_buffer) {
                continue;
            }

            let input = std::mem::take(&mut multiline_buffer);
            if !input.trim().is_empty() {
                history.push(input.clone());
                trim_history(&mut history);
            }

            let _ = evaluate(&input, &options);
        }
    }

    if let Err(err) = save_history(&history) {
        eprintln!("failed to save repl history: {}", err);
    }

    Ok(())
}

/// Compiles one snippet and prints the listings and assembly.
///
/// Returns the names worth offering to the completer, or `None` when the
/// snippet failed to compile.
fn evaluate(input: &str, options: &ReplOptions) -> Option<Vec<String>> {
    if options.show_tokens {
        let tokens = crate::lexer::lex(input);
        print!("{}", crate::lexer::render_token_table(&tokens));
    }

    match crate::compile(input) {
        Ok(output) => {
            if options.show_ast {
                println!("=== Parsed AST ===");
                print!("{}", output.program);
            }
            print!(
                "{}",
                crate::ir::printer::render_listing("Unoptimized", &output.code)
            );
            println!();
            print!(
                "{}",
                crate::ir::printer::render_listing("Optimized", &output.optimized)
            );
            println!();
            println!("=== Final Assembly Code ===");
            print!("{}", output.assembly);
            Some(collect_symbols(&output.program))
        }
        Err(error) => {
            eprintln!("{}", error);
            None
        }
    }
}

fn handle_meta_command(
    command: &str,
    history: &[String],
    options: &mut ReplOptions,
) -> CommandAction {
    if command.is_empty() {
        return CommandAction::NotHandled;
    }
    if command.eq_ignore_ascii_case("exit") || command.eq_ignore_ascii_case("quit") {
        return CommandAction::Exit;
    }
    if !command.starts_with(':') {
        return CommandAction::NotHandled;
    }

    let mut parts = command.split_whitespace();
    let directive = parts.next().unwrap_or_default();
    match directive {
        ":quit" | ":exit" => return CommandAction::Exit,
        ":help" => {
            println!(":help                   Show this message");
            println!(":tokens on|off          Toggle the token table for each snippet");
            println!(":ast on|off             Toggle the parse tree for each snippet");
            println!(":history [n]            Show recent history (default 20)");
            println!(":quit                   Exit REPL");
        }
        ":tokens" => {
            let Some(mode) = parts.next() else {
                eprintln!("usage: :tokens on|off");
                return CommandAction::Handled;
            };
            match mode {
                "on" => {
                    options.show_tokens = true;
                    println!("tokens: on");
                }
                "off" => {
                    options.show_tokens = false;
                    println!("tokens: off");
                }
                _ => eprintln!("usage: :tokens on|off"),
            }
        }
        ":ast" => {
            let Some(mode) = parts.next() else {
                eprintln!("usage: :ast on|off");
                return CommandAction::Handled;
            };
            match mode {
                "on" => {
                    options.show_ast = true;
                    println!("ast: on");
                }
                "off" => {
                    options.show_ast = false;
                    println!("ast: off");
                }
                _ => eprintln!("usage: :ast on|off"),
            }
        }
        ":history" => {
            let count = parts
                .next()
                .and_then(|value| value.parse::<usize>().ok())
                .unwrap_or(20);
            let start = history.len().saturating_sub(count);
            for (idx, entry) in history.iter().enumerate().skip(start) {
                println!("{:>4} {}", idx + 1, highlighter::colorize(entry));
            }
        }
        other => {
            eprintln!("unknown command '{}'; use :help", other);
        }
    }

    CommandAction::Handled
}

/// Names the completer should know: function names plus every declared
/// variable, from any scope depth.
fn collect_symbols(program: &Program) -> Vec<String> {
    let mut symbols = Vec::new();
    for item in &program.items {
        if let Item::Function(function) = item {
            symbols.push(function.name.clone());
            collect_block_symbols(&function.body, &mut symbols);
        }
    }
    symbols.sort();
    symbols.dedup();
    symbols
}

fn collect_block_symbols(block: &Block, symbols: &mut Vec<String>) {
    for statement in &block.statements {
        match statement {
            Stmt::Declaration { name, .. } => symbols.push(name.clone()),
            Stmt::If {
                then_branch,
                else_branch,
                ..
            } => {
                collect_block_symbols(then_branch, symbols);
                if let Some(else_branch) = else_branch {
                    collect_block_symbols(else_branch, symbols);
                }
            }
            Stmt::While { body, .. } => collect_block_symbols(body, symbols),
            Stmt::Block(inner) => collect_block_symbols(inner, symbols),
            _ => {}
        }
    }
}

fn load_history() -> Vec<String> {
    let path = repl_history_path();
    let Ok(contents) = fs::read_to_string(path) else {
        return Vec::new();
    };
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn save_history(history: &[String]) -> io::Result<()> {
    let path = repl_history_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut trimmed = history.to_vec();
    trim_history(&mut trimmed);
    let mut encoded = trimmed.join("\n");
    if !encoded.is_empty() {
        encoded.push('\n');
    }
    fs::write(path, encoded)
}

fn trim_history(history: &mut Vec<String>) {
    if history.len() > MAX_HISTORY_ENTRIES {
        let drop_count = history.len() - MAX_HISTORY_ENTRIES;
        history.drain(0..drop_count);
    }
}

fn repl_history_path() -> PathBuf {
    if let Ok(path) = std::env::var("QUADC_REPL_HISTORY") {
        return PathBuf::from(path);
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".quadc").join("repl_history");
    }
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".quadc").join("repl_history");
    }
    PathBuf::from(".quadc_repl_history")
}
