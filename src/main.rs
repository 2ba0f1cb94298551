use anyhow::Result;

fn main() -> Result<()> {
    context_keeper::cli::run()
}
