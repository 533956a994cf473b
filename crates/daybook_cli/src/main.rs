//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `daybook_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use daybook_core::db::migrations::latest_version;
use daybook_core::db::open_db_in_memory;

fn main() {
    // Tiny probe to validate core crate wiring independently from the
    // Flutter/FFI runtime setup.
    println!("daybook_core ping={}", daybook_core::ping());
    println!("daybook_core version={}", daybook_core::core_version());

    match open_db_in_memory() {
        Ok(_) => println!("store bootstrap=ok schema_version={}", latest_version()),
        Err(err) => {
            eprintln!("store bootstrap=failed error={err}");
            std::process::exit(1);
        }
    }
}
