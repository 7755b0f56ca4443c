use tyu_disk::bench::SystemFio;
use tyu_disk::cli::DiskMark;
use tyu_disk::config::AppConfig;
use tyu_disk::Result;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("tyu-disk: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config = AppConfig::load()?;

    tracing_subscriber::fmt()
        .with_max_level(config.tracing_level()?)
        .with_writer(std::io::stderr)
        .init();

    let provisioner = SystemFio::from_config(&config);

    // Not locked: the spinner task writes to stdout while fio runs.
    let mut stdout = std::io::stdout();
    DiskMark::new(&config, &provisioner).run(&mut stdout).await
}
