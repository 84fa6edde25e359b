use envtag::EnvTag;

#[allow(dead_code)]
#[derive(EnvTag)]
struct Config {
    #[env(rename = "PORT")]
    port: u16,
}

fn main() {}
