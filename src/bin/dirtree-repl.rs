//! A minimal line-oriented demo shell over [`dirtree::Tree`].
//!
//! Not part of the namespace's public contract (§6 names it out of scope); it exists so the
//! locking protocol can be poked at interactively. Commands:
//!
//! ```text
//! list /a/
//! create /a/b/
//! remove /a/b/
//! move /a/b/ /c/b/
//! exit
//! ```

use std::io::{self, BufRead, Write};

use dirtree::Tree;

fn main() {
    env_logger::init();
    let tree = Tree::new();
    let stdin = io::stdin();
    let mut prompt = "> ".to_owned();

    print!("{prompt}");
    io::stdout().flush().ok();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(_) => break,
        };
        let line = line.trim();
        if line.is_empty() {
            print!("{prompt}");
            io::stdout().flush().ok();
            continue;
        }
        if line == "exit" {
            break;
        }
        match dispatch(&tree, line) {
            Ok(Some(output)) => println!("{output}"),
            Ok(None) => {}
            Err(e) => eprintln!("error: {e} (errno {})", e.code()),
        }
        print!("{prompt}");
        io::stdout().flush().ok();
    }
    prompt.clear();
    println!("bye");
}

fn dispatch(tree: &Tree, line: &str) -> Result<Option<String>, dirtree::TreeError> {
    let mut parts = line.split_whitespace();
    let cmd = parts.next().unwrap_or("");
    match cmd {
        "list" => {
            let path = parts.next().unwrap_or("/");
            tree.list(path).map(Some)
        }
        "create" => {
            let path = parts.next().unwrap_or("");
            tree.create(path).map(|()| None)
        }
        "remove" => {
            let path = parts.next().unwrap_or("");
            tree.remove(path).map(|()| None)
        }
        "move" => {
            let source = parts.next().unwrap_or("");
            let target = parts.next().unwrap_or("");
            tree.move_dir(source, target).map(|()| None)
        }
        other => {
            eprintln!("unknown command: {other}");
            Ok(None)
        }
    }
}
