use std::process::Command;

/// Short hash of HEAD, or "unknown" outside a git checkout
fn short_commit() -> String {
    Command::new("git")
        .args(["rev-parse", "--short=8", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|hash| hash.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn main() {
    // Reported by `mahjong-waits --version` and the wasm `get_build_commit`
    println!("cargo:rustc-env=BUILD_COMMIT={}", short_commit());

    // Re-run if .git/HEAD changes (when switching branches)
    println!("cargo:rerun-if-changed=.git/HEAD");
}
