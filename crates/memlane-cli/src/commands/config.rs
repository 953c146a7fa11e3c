use anyhow::Result;
use memlane_core::AppConfig;

pub fn run(config: &AppConfig, write: bool) -> Result<()> {
    let path = AppConfig::config_path();
    if write {
        config.save()?;
        println!("Wrote {}", path.display());
    } else {
        println!("Config file: {}", path.display());
        println!("Data dir:    {}", config.data_dir().display());
        println!("Log file:    {}", config.log_path().display());
        if !path.exists() {
            println!("\nNo config file yet; run `memlane config --write` to create one.");
        }
    }
    Ok(())
}
