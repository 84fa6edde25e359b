use envtag::EnvTag;

#[allow(dead_code)]
#[derive(EnvTag)]
struct Config {
    #[env(name = "PORT", name = "APP_PORT")]
    port: u16,
}

fn main() {}
