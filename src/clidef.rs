use clap::{builder::styling, Arg, ArgAction, Command};

use pipelog::relay::{DEFAULT_OUTPUT_PATH, DEFAULT_PIPE_PATH, ENV_OUTPUT_PATH, ENV_PIPE_PATH};

pub static APPNAME: &str = "pipelog";

/// Define CLI arguments and styling
pub fn cli(version: &'static str) -> Command {
    let styles = styling::Styles::styled()
        .header(styling::AnsiColor::Yellow.on_default())
        .usage(styling::AnsiColor::Yellow.on_default())
        .literal(styling::AnsiColor::BrightGreen.on_default())
        .placeholder(styling::AnsiColor::BrightMagenta.on_default());

    Command::new(APPNAME)
        .version(version)
        .about("Relays single-character commands from a named pipe into an append-only log. Send 'q' to stop it.")
        .arg(
            Arg::new("pipe-path")
                .short('p')
                .long("pipe-path")
                .help(format!(
                    "Named pipe to read commands from (default {DEFAULT_PIPE_PATH}, or ${ENV_PIPE_PATH})"
                )),
        )
        .arg(
            Arg::new("output-path")
                .short('o')
                .long("output-path")
                .help(format!(
                    "File the commands are appended to (default {DEFAULT_OUTPUT_PATH}, or ${ENV_OUTPUT_PATH})"
                )),
        )
        .arg(
            Arg::new("debug")
                .short('d')
                .long("debug")
                .action(ArgAction::Count)
                .help("Set debug mode for more verbose output. Increase this flag for more verbosity."),
        )
        .styles(styles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_path_overrides() {
        let m = cli("0.0.0")
            .try_get_matches_from(["pipelog", "-p", "/run/a.pipe", "--output-path", "/run/a.out", "-dd"])
            .unwrap();
        assert_eq!(m.get_one::<String>("pipe-path").unwrap(), "/run/a.pipe");
        assert_eq!(m.get_one::<String>("output-path").unwrap(), "/run/a.out");
        assert_eq!(m.get_count("debug"), 2);
    }

    #[test]
    fn paths_are_optional() {
        let m = cli("0.0.0").try_get_matches_from(["pipelog"]).unwrap();
        assert!(m.get_one::<String>("pipe-path").is_none());
        assert_eq!(m.get_count("debug"), 0);
    }
}
