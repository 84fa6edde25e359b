//! Example layering environment variables over defaults read from JSON

use envtag::EnvTag;
use serde::Deserialize;

#[derive(Debug, Deserialize, EnvTag)]
struct Config {
    // Overridable from the environment
    #[env(name = "FOO")]
    pub foo: String,

    #[env(name = "BAR")]
    pub bar: String,

    // Only ever comes from the document
    pub misc: String,

    pub database: DatabaseConfig,
}

#[derive(Debug, Deserialize, EnvTag)]
struct DatabaseConfig {
    #[env(name = "DATABASE_HOST")]
    pub host: String,

    #[env(name = "DATABASE_PORT")]
    pub port: u16,
}

const DEFAULTS: &str = r#"{
    "foo": "foo from document",
    "bar": "bar from document",
    "misc": "misc from document",
    "database": { "host": "localhost", "port": 5432 }
}"#;

fn main() -> anyhow::Result<()> {
    // Set environment variables for demonstration
    std::env::set_var("BAR", "bar from environment");
    std::env::set_var("DATABASE_PORT", "6432");

    let mut config: Config = serde_json::from_str(DEFAULTS)?;
    envtag::bind(&mut config)?;

    println!("{config:#?}");

    Ok(())
}
