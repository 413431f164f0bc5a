//! `fairdraw show` — dry run that prints the summary only.

use std::path::Path;

use fairdraw_core::{Sha256Hasher, draw, load_definition, summary};

use super::fail;

pub fn run(path: &Path) {
    let record = load_definition(path)
        .and_then(|def| draw(&Sha256Hasher, def))
        .unwrap_or_else(|e| fail(&e));
    print!("{}", summary(&record));
}
