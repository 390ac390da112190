use std::env;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use umbra::backend::Headless;
use umbra::hooks::NoopHooks;
use umbra::Umbra;

#[derive(Parser)]
#[command(author, version, about = "umbra headless session")]
struct Cli {
    /// Number of virtual outputs to create.
    #[arg(long, default_value_t = 2)]
    outputs: usize,
    /// Request adaptive sync on new outputs.
    #[arg(long)]
    adaptive_sync: bool,
}

fn main() -> Result<()> {
    let directives = env::var("RUST_LOG").unwrap_or_else(|_| "umbra=debug".to_owned());
    let env_filter = EnvFilter::builder().parse_lossy(directives);
    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(env_filter)
        .init();

    let cli = Cli::parse();

    let mut backend = Headless::new();
    let mut umbra = Umbra::new(Box::new(NoopHooks));
    umbra.adaptive_sync = cli.adaptive_sync;

    for n in 0..cli.outputs {
        umbra.add_virtual_output(&mut backend, Some(&format!("virt-{n}")));
        umbra.dispatch_pending(&mut backend);
    }

    let snapshot = umbra.layout_snapshot();
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
