use branchwork::prelude::*;
use clap::Parser;
use itertools::Itertools;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// A single line of editing input, as typed at the prompt or read from a
/// script file.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Add {
        parent: String,
        kind: NodeKind,
        slot: usize,
    },
    Delete(String),
    Label(String, String),
    Undo,
    Redo,
    Show,
    Export,
    Help,
    Quit,
}

const HELP: &str = "\
Commands:
  add <parent> <action|branch|end> [slot]   insert after <parent> (slot 0 = TRUE, 1 = FALSE)
  delete <id>                               remove a node, promoting its first child
  label <id> <text>                         rename a node
  undo | redo                               step through structural history
  show                                      print the workflow outline
  export                                    write workflow-<millis>.json to the export dir
  help | quit";

/// Edit workflow trees from the command line
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a workflow JSON file to start from
    workflow_path: Option<PathBuf>,

    /// Path to an editor config JSON file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to a file of commands to run, one per line
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Directory exports are written to (overrides the config file)
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// Run in interactive mode with a command prompt
    #[arg(short = 'i', long, help = "Run in interactive 'human' mode")]
    interactive: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => EditorConfig::from_file(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load config: {}", e))),
        None => EditorConfig::default(),
    };
    if let Some(dir) = cli.export_dir.clone() {
        config.export_dir = dir;
    }

    let mut builder = Workflow::builder().with_config(&config);
    if let Some(path) = &cli.workflow_path {
        let snapshot = export::from_file(path).unwrap_or_else(|e| {
            exit_with_error(&format!(
                "Failed to load workflow '{}': {}",
                path.display(),
                e
            ))
        });
        builder = builder
            .with_snapshot(snapshot)
            .unwrap_or_else(|e| exit_with_error(&format!("Invalid workflow: {}", e)));
    }
    let mut workflow = builder.build();

    if let Some(script) = &cli.script {
        run_script(&mut workflow, script, &config.export_dir);
    }

    if cli.interactive {
        run_interactive(&mut workflow, &config.export_dir);
    } else {
        print!("{}", OutlineFormatter::format(workflow.snapshot()));
    }
}

/// Runs every command in `path`. Blank lines and `#` comments are skipped.
fn run_script(workflow: &mut Workflow, path: &Path, export_dir: &Path) {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read script '{}': {}",
            path.display(),
            e
        ))
    });

    for (number, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let command = parse_command(line).unwrap_or_else(|e| {
            exit_with_error(&format!("{}:{}: {}", path.display(), number + 1, e))
        });
        if !execute(workflow, command, export_dir) {
            break;
        }
    }
}

/// Runs the prompt loop until `quit` or end of input.
fn run_interactive(workflow: &mut Workflow, export_dir: &Path) {
    println!("--- Branchwork Interactive Mode ---");
    println!("Type 'help' for a list of commands.\n");
    print!("{}", OutlineFormatter::format(workflow.snapshot()));

    loop {
        let Some(line) = prompt_for_input("edit") else {
            break;
        };
        if line.is_empty() {
            continue;
        }
        match parse_command(&line) {
            Ok(command) => {
                if !execute(workflow, command, export_dir) {
                    break;
                }
            }
            Err(e) => println!("{}", e),
        }
    }
}

/// Applies one command. Returns `false` when the session should end.
fn execute(workflow: &mut Workflow, command: Command, export_dir: &Path) -> bool {
    match command {
        Command::Add { parent, kind, slot } => {
            match workflow.insert_node_at(&parent, kind, slot) {
                Ok(report) => {
                    println!("  -> Added {} '{}'", kind, report.node_id);
                    report_side_effects(&report);
                }
                Err(e) => println!("  -> Not applied: {}", e),
            }
        }
        Command::Delete(id) => match workflow.delete_node(&id) {
            Ok(report) => {
                println!("  -> Deleted '{}'", report.node_id);
                report_side_effects(&report);
            }
            Err(e) => println!("  -> Not applied: {}", e),
        },
        Command::Label(id, text) => match workflow.relabel_node(&id, &text) {
            Ok(()) => println!("  -> Renamed '{}' to \"{}\"", id, text),
            Err(e) => println!("  -> Not applied: {}", e),
        },
        Command::Undo => {
            if !workflow.undo() {
                println!("  -> Nothing to undo");
            }
        }
        Command::Redo => {
            if !workflow.redo() {
                println!("  -> Nothing to redo");
            }
        }
        Command::Show => {
            print!("{}", OutlineFormatter::format(workflow.snapshot()));
            println!(
                "(history {}/{}, undo: {}, redo: {})",
                workflow.history().cursor() + 1,
                workflow.history().len(),
                workflow.can_undo(),
                workflow.can_redo()
            );
        }
        Command::Export => match export::write_to_dir(export_dir, workflow.snapshot()) {
            Ok(path) => println!("  -> Wrote '{}'", path.display()),
            Err(e) => println!("  -> Export failed: {}", e),
        },
        Command::Help => println!("{}", HELP),
        Command::Quit => return false,
    }
    true
}

fn report_side_effects(report: &EditReport) {
    if let Some(advisory) = &report.advisory {
        println!("  -> Note: {}", advisory);
    }
    if !report.swept.is_empty() {
        println!(
            "  -> Removed detached nodes: {}",
            report.swept.iter().join(", ")
        );
    }
}

fn parse_command(line: &str) -> std::result::Result<Command, String> {
    let mut parts = line.split_whitespace();
    let verb = parts.next().unwrap_or_default();
    let mut arg = |name: &str| {
        parts
            .next()
            .map(str::to_string)
            .ok_or_else(|| format!("'{}' needs a <{}> argument", verb, name))
    };

    match verb {
        "add" => {
            let parent = arg("parent")?;
            let kind = parse_kind(&arg("kind")?)?;
            let slot = match parts.next() {
                Some(raw) => raw
                    .parse()
                    .map_err(|_| format!("'{}' is not a valid slot", raw))?,
                None => 0,
            };
            Ok(Command::Add { parent, kind, slot })
        }
        "delete" | "del" | "rm" => Ok(Command::Delete(arg("id")?)),
        "label" | "rename" => {
            let id = arg("id")?;
            let text = rest_of_line(line, 2).to_string();
            if text.is_empty() {
                return Err("'label' needs a <text> argument".to_string());
            }
            Ok(Command::Label(id, text))
        }
        "undo" => Ok(Command::Undo),
        "redo" => Ok(Command::Redo),
        "show" | "ls" => Ok(Command::Show),
        "export" | "save" => Ok(Command::Export),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        other => Err(format!("Unknown command '{}'. Type 'help'.", other)),
    }
}

/// The text after the first `skip` words of `line`, with inner whitespace
/// left as typed.
fn rest_of_line(line: &str, skip: usize) -> &str {
    let mut rest = line.trim_start();
    for _ in 0..skip {
        rest = rest
            .split_once(char::is_whitespace)
            .map_or("", |(_, tail)| tail)
            .trim_start();
    }
    rest.trim_end()
}

fn parse_kind(raw: &str) -> std::result::Result<NodeKind, String> {
    match raw {
        "action" => Ok(NodeKind::Action),
        "branch" => Ok(NodeKind::Branch),
        "end" => Ok(NodeKind::End),
        other => Err(format!(
            "'{}' is not an insertable kind (use action, branch or end)",
            other
        )),
    }
}

/// Prompts and reads one trimmed line. Returns `None` at end of input.
fn prompt_for_input(prompt_text: &str) -> Option<String> {
    let mut line = String::new();
    print!("> {}: ", prompt_text);
    io::stdout().flush().ok()?;

    match io::stdin().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_string()),
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
