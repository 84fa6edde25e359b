use envtag::EnvTag;

#[allow(dead_code)]
#[derive(EnvTag)]
enum Mode {
    Debug,
    Release,
}

fn main() {}
