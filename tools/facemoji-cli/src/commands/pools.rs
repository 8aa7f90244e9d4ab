//! Show the compiled-in symbol pool table.

use facemoji_ranking::pools::POOL_TABLE_VERSION;
use facemoji_ranking::POOL_TABLE;

pub fn run() -> anyhow::Result<()> {
    println!("Symbol pools (table v{POOL_TABLE_VERSION}):");
    for category in POOL_TABLE.categories() {
        let symbols = POOL_TABLE.pool(category).unwrap_or_default();
        let note = if category.is_classifier_output() {
            ""
        } else {
            "  (not produced by the classifier)"
        };
        println!("  {:<10} {}{note}", category.as_str(), symbols.join(" "));
    }
    println!();
    println!(
        "  {:<10} {}  (mixed into happy at confidence >= 0.7)",
        "intense",
        POOL_TABLE.high_intensity().join(" ")
    );
    Ok(())
}
