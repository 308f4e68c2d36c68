//! `prusactl info` – printer identity.

use anyhow::Result;
use prusa_core::client::PrinterClient;

pub async fn run_info(client: &PrinterClient) -> Result<()> {
    let info = client.info().await?;
    println!("{:<10} {}", "Model", info.title());
    let rows = [
        ("Name", info.name.as_deref()),
        ("Hostname", info.hostname.as_deref()),
        ("Serial", info.serial.as_deref()),
    ];
    for (label, value) in rows {
        println!("{:<10} {}", label, value.unwrap_or("-"));
    }
    if let Some(d) = info.nozzle_diameter {
        println!("{:<10} {d:.2}mm", "Nozzle");
    }
    Ok(())
}
