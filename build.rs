use std::env;

fn main() {
    println!("cargo:rerun-if-env-changed=FETCHRUN_BASE_HINT");

    // Packagers can bake a default script-store endpoint into the binary;
    // runtime environment variables still win over the baked value.
    if let Ok(hint) = env::var("FETCHRUN_BASE_HINT") {
        let trimmed = hint.trim_end_matches('/');
        println!("cargo:rustc-env=FETCHRUN_BASE_HINT={trimmed}");
    }
}
