use crate::history::HistoryEntry;
use crate::llm::Failure;

pub fn print_notes(notes: &str) {
    println!("{}", notes.trim_end());
}

pub fn print_history(entries: &[HistoryEntry]) {
    if entries.is_empty() {
        println!("No history yet.");
        return;
    }
    for entry in entries {
        println!(
            "{}  {}  {}",
            entry.id,
            entry.display_timestamp(),
            entry.filename
        );
    }
}

pub fn print_failure(failure: &Failure) {
    eprintln!("error: {}", failure.message);
}
