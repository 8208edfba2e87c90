use crate::config::ProgramsConfig;

/// Comparison key for a command line: first token, without a `/bin/` or
/// `/usr/bin/` prefix and without the login-shell dash.
pub fn program_key(command: &str) -> &str {
    let first = command.split_whitespace().next().unwrap_or("");
    strip_bin_prefix(first).trim_start_matches('-')
}

fn strip_bin_prefix(token: &str) -> &str {
    let rest = token.strip_prefix("/usr").unwrap_or(token);
    match rest.strip_prefix("/bin/") {
        Some(name) if !name.is_empty() => name,
        _ => token,
    }
}

/// The program to show for a pane's foreground command, or `None` when the
/// pane should be named after its directory alone.
pub fn current_program(command: Option<&str>, cfg: &ProgramsConfig) -> Option<String> {
    let command = command?.trim();
    let key = program_key(command);
    if key.is_empty() {
        return None;
    }
    if cfg.shells.iter().any(|s| s == key) || cfg.ignored.iter().any(|s| s == key) {
        log::debug!("{command:?} is a shell or ignored");
        return None;
    }
    if cfg.show_args {
        Some(command.to_string())
    } else {
        command.split_whitespace().next().map(String::from)
    }
}

/// Whether the program's first token is exactly one of `dir_programs`.
pub fn is_dir_program(program: &str, dir_programs: &[String]) -> bool {
    program
        .split_whitespace()
        .next()
        .is_some_and(|first| dir_programs.iter().any(|p| p == first))
}
