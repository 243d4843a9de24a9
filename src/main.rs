use std::{env, process};

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing_subscriber::EnvFilter;

use ember_lang::Ember;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env("EMBER_LOG").unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args: Vec<String> = env::args().collect();
    let mut ember = Ember::new();

    match args.len() {
        1 => run_prompt(&mut ember),
        2 => ember.run_file(&args[1]),
        _ => {
            eprintln!("Usage: {} [script]", args[0]);
            process::exit(1);
        }
    }
}

fn history_path() -> Option<std::path::PathBuf> {
    home::home_dir().map(|home| home.join(".ember_history"))
}

fn run_prompt(ember: &mut Ember) {
    println!("Ember REPL");

    let mut editor = DefaultEditor::new().expect("terminal should support line editing");
    let history = history_path();

    if let Some(history) = &history {
        let _ = editor.load_history(history);
    }

    loop {
        match editor.readline("ember> ") {
            Ok(line) => {
                let _ = editor.add_history_entry(line.as_str());
                ember.run_line(&line);
            }
            Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => break,
            Err(err) => {
                eprintln!("Error reading input: {err}");
                break;
            }
        }
    }

    if let Some(history) = &history {
        let _ = editor.save_history(history);
    }
}
