use super::*;

mod test_helpers {
    use super::*;

    pub(super) fn parse_args(argv: &[&str]) -> Args {
        Args::try_parse_from(argv)
            .unwrap_or_else(|err| panic!("argv={argv:?} should parse successfully: {err}"))
    }

    pub(super) fn words(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }
}

use test_helpers::{parse_args, words};

#[test]
fn no_subcommand_means_chat() {
    let args = parse_args(&["parlance"]);
    assert!(args.command.is_none());
    assert!(args.api_base.is_none());
    assert!(args.language.is_none());
}

#[test]
fn global_flags_parse_before_and_after_subcommand() {
    let args = parse_args(&[
        "parlance",
        "--api-base",
        "http://tutor.local/api",
        "chat",
        "-L",
        "fr",
        "--transcript",
        "session.txt",
    ]);
    assert_eq!(args.command, Some(Commands::Chat));
    assert_eq!(args.api_base.as_deref(), Some("http://tutor.local/api"));
    assert_eq!(args.language.as_deref(), Some("fr"));
    assert_eq!(args.transcript.as_deref(), Some("session.txt"));
    assert!(args.log.is_none());
}

#[test]
fn languages_subcommand_accepts_log_flag() {
    let args = parse_args(&["parlance", "languages", "--log", "debug.log"]);
    assert_eq!(args.command, Some(Commands::Languages));
    assert_eq!(args.log.as_deref(), Some("debug.log"));
}

#[test]
fn set_collects_trailing_words() {
    let args = parse_args(&["parlance", "set", "default-language", "es"]);
    assert_eq!(
        args.command,
        Some(Commands::Set {
            key: "default-language".into(),
            value: Some(words(&["es"])),
        })
    );

    let args = parse_args(&["parlance", "set", "api-base"]);
    assert_eq!(
        args.command,
        Some(Commands::Set {
            key: "api-base".into(),
            value: None,
        })
    );
}

#[test]
fn apply_set_validates_key_and_value() {
    let mut config = Config::default();

    assert_eq!(
        apply_set(&mut config, "api-base", &words(&["http://tutor.local/api/"])),
        Ok(ConfigKey::ApiBase)
    );
    assert_eq!(config.api_base.as_deref(), Some("http://tutor.local/api"));

    assert_eq!(
        apply_set(&mut config, "default-language", &words(&["DE"])),
        Ok(ConfigKey::DefaultLanguage)
    );
    assert_eq!(config.default_language.as_deref(), Some("de"));

    let err = apply_set(&mut config, "theme", &words(&["dark"])).expect_err("unknown key");
    assert!(err.contains("api-base"), "error should list known keys: {err}");

    let err = apply_set(&mut config, "api-base", &words(&["ftp://nope"])).expect_err("bad url");
    assert!(err.contains("http"));
    assert_eq!(config.api_base.as_deref(), Some("http://tutor.local/api"));
}

#[test]
fn apply_unset_clears_value() {
    let mut config = Config {
        api_base: Some("http://tutor.local/api".into()),
        default_language: Some("it".into()),
    };

    assert_eq!(
        apply_unset(&mut config, "default-language"),
        Ok(ConfigKey::DefaultLanguage)
    );
    assert!(config.default_language.is_none());
    assert!(config.api_base.is_some());
    assert!(apply_unset(&mut config, "nonsense").is_err());
}

#[test]
fn init_tracing_without_file_is_a_no_op() {
    assert!(init_tracing(None).is_ok());
}
