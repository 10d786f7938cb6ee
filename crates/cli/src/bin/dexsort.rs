use anyhow::Result;

fn main() -> Result<()> {
    dexsort_cli::main_entry()
}
