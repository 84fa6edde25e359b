//! Basic usage example

use envtag::EnvTag;

#[derive(Debug, Default, EnvTag)]
struct Config {
    // Loaded from LOCATION if it is set and non-empty
    #[env(name = "LOCATION")]
    pub location: String,

    // Usually provided by the shell
    #[env(name = "HOME")]
    pub home: String,
}

fn main() -> anyhow::Result<()> {
    let mut config = Config::default();
    envtag::bind(&mut config)?;

    println!("HOME: {}", config.home);
    println!("LOCATION: {}", config.location);

    Ok(())
}
