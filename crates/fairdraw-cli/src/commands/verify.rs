//! `fairdraw verify` — recompute a published result record.

use std::path::Path;

use fairdraw_core::{Sha256Hasher, load_published, verify_record};

use super::fail;

pub struct VerifyCommandConfig<'a> {
    pub path: &'a Path,
}

/// Run the verify command. Exits 1 when any field disagrees.
pub fn run(config: &VerifyCommandConfig<'_>) {
    let published = load_published(config.path).unwrap_or_else(|e| fail(&e));
    let verification = verify_record(&Sha256Hasher, &published).unwrap_or_else(|e| fail(&e));

    let name = verification.recomputed.definition().name();
    if verification.is_consistent() {
        println!("{}: `{name}` verified", config.path.display());
        return;
    }

    println!(
        "{}: `{name}` does NOT match its inputs ({} field(s))",
        config.path.display(),
        verification.mismatches.len()
    );
    for m in &verification.mismatches {
        println!("  {:<14} expected {}", m.field, m.expected);
        println!("  {:<14} found    {}", "", m.found);
    }
    std::process::exit(1);
}
