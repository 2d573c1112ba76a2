use anyhow::Result;

fn main() -> Result<()> {
    rulesync_cli::main_entry()
}
