fn main() {
    // Pick up new commits and branch switches without a clean build.
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");

    // `--dirty` marks builds with uncommitted changes; outside a git
    // checkout (e.g. a crates.io build) the stamp is simply empty.
    let describe = std::process::Command::new("git")
        .args(["describe", "--always", "--dirty", "--tags"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
        .unwrap_or_default();

    println!("cargo:rustc-env=SITEWIRE_BUILD={describe}");
}
