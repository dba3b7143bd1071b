use clap::Parser;
use keyed_compose::{App, AppConfig, DraftBinding, KeyPolicy, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Types into one row, reverses the list and shows where the text ended up.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Row identity: `index` or `id`.
    #[arg(long, default_value = "index")]
    key: KeyPolicy,
    /// Owner of the input text: `local` (the row) or `record` (the record id).
    #[arg(long, default_value = "local")]
    drafts: DraftBinding,
    /// Position of the row to type into.
    #[arg(long, default_value_t = 0)]
    row: usize,
    #[arg(long, default_value = "hello")]
    text: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let mut app = App::new(AppConfig::new(args.key, args.drafts));
    app.type_into(args.row, &args.text)?;
    app.print_tree();

    app.click("Reverse")?;
    info!(row = args.row, text = %args.text, "after reverse");
    app.print_tree();
    for (position, row) in app.rows().iter().enumerate() {
        println!(
            "{position}: {id} {draft:?} {created_at}",
            id = row.id,
            draft = row.draft,
            created_at = row.created_at
        );
    }
    Ok(())
}
