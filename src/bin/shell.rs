//! Interactive testing shell: type a string to see its segmentation, or
//! `prob(...)` to query the loaded tables directly.

use std::env;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process::{self, Command};

use pivot_segment::{loader, Segmenter};

const UNIGRAMS_PATH: &str = "1grams.txt";
const BIGRAMS_PATH: &str = "2grams.txt";

const INTRO: &str = "Welcome to the segmenter testing shell.
Type a word and its segmentation will be displayed.
Type help() to show all commands.";

/// Owns the live engine for the duration of the read-eval loop; dropped at
/// program exit along with everything it holds.
struct Session {
    segmenter: Segmenter,
}

impl Session {
    /// Evaluate one line of user input; returns `false` to quit the loop
    fn eval(&self, input: &str) -> bool {
        match input {
            "exit()" => {
                println!("Closing....");
                return false;
            }
            "clear()" => clear(),
            "help()" => help(),
            "intro()" => println!("{}", INTRO),
            _ if input.starts_with("prob(") && input.ends_with(')') => {
                self.prob(&input["prob(".len()..input.len() - 1]);
            }
            _ if input.ends_with(')') => println!("Unrecognised command."),
            _ => match self.segmenter.segment(input) {
                Ok(segmented) => println!("{}", segmented),
                Err(err) => println!("{}", err),
            },
        }
        true
    }

    fn prob(&self, args: &str) {
        let words = args
            .split(',')
            .map(|word| word.trim().trim_matches(|c| c == '"' || c == '\''))
            .collect::<Vec<_>>();
        match self.segmenter.probability(&words) {
            Ok(p) => println!("{}", p),
            Err(err) => println!("{}", err),
        }
    }
}

fn clear() {
    if env::var_os("TERM").is_some() {
        let _ = Command::new(if cfg!(windows) { "cls" } else { "clear" }).status();
    } else {
        // No terminal info; push the old contents out of view.
        for _ in 0..80 {
            println!("\x1b[2J");
        }
    }
}

fn help() {
    println!();
    println!("============");
    println!("  Commands  ");
    println!("============");
    println!("clear()\n\tClear console.");
    println!("exit()\n\tQuit program.");
    println!("help()\n\tDisplay commands.");
    println!("intro()\n\tDisplay instructions again.");
    println!("prob(s)\n\tGet probability of s.");
    println!("prob(a, b)\n\tGet probability of a and b appearing in that order.");
    println!();
}

fn main() {
    let simple = env::args().skip(1).any(|arg| arg == "-simple");

    if !Path::new(UNIGRAMS_PATH).is_file() {
        eprintln!("Error: could not find {}.", UNIGRAMS_PATH);
        process::exit(1);
    }

    eprintln!("Loading segmenter.");
    let unigrams = match loader::load_unigrams(UNIGRAMS_PATH) {
        Ok(table) => table,
        Err(err) => {
            eprintln!("Error: could not read {}: {}", UNIGRAMS_PATH, err);
            process::exit(1);
        }
    };

    let segmenter = if simple || !Path::new(BIGRAMS_PATH).is_file() {
        if !simple {
            eprintln!("Could not find {}, loading without bigrams.", BIGRAMS_PATH);
        }
        Segmenter::new(unigrams)
    } else {
        match loader::load_ngrams(BIGRAMS_PATH, 2) {
            Ok(bigrams) => Segmenter::with_ngrams(unigrams, bigrams),
            Err(err) => {
                eprintln!(
                    "Could not read {}: {}; loading without bigrams.",
                    BIGRAMS_PATH, err
                );
                Segmenter::new(unigrams)
            }
        }
    };

    let session = Session { segmenter };
    clear();
    println!("{}", INTRO);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        let line = match lines.next() {
            Some(Ok(line)) => line,
            _ => break,
        };
        if !session.eval(line.trim()) {
            break;
        }
    }
}
