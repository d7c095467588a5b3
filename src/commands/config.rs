use std::path::Path;

use anyhow::Result;
use dayname_core::config::DaynameConfig;

pub fn run(path: Option<&Path>) -> Result<()> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => DaynameConfig::config_path()?,
    };

    if !path.exists() {
        DaynameConfig::create_default_config(&path)?;
        println!("Created default config at {}", path.display());
    } else {
        println!("{}", path.display());
    }

    Ok(())
}
