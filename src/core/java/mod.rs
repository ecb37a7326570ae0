use std::path::{Path, PathBuf};

fn java_executable_name() -> &'static str {
    if cfg!(windows) {
        "java.exe"
    } else {
        "java"
    }
}

/// The `java` used to run loader installers: `$JAVA_HOME/bin/java` when it
/// exists, otherwise whatever `java` resolves to on `PATH`.
pub fn find_java_binary() -> PathBuf {
    let java_home = std::env::var_os("JAVA_HOME").map(PathBuf::from);
    java_binary_from(java_home.as_deref())
}

fn java_binary_from(java_home: Option<&Path>) -> PathBuf {
    java_home
        .map(|home| home.join("bin").join(java_executable_name()))
        .filter(|bin| bin.is_file())
        .unwrap_or_else(|| PathBuf::from(java_executable_name()))
}
