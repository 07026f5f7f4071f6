use figment::Jail;
use pal_config::PalConfig;

#[test]
fn env_sets_nested_session_values() {
    Jail::expect_with(|jail| {
        jail.set_env("PALAVER_SESSION__PERSIST_COOKIES", "false");
        jail.set_env("PALAVER_GENERAL__HISTORY_LIMIT", "3");

        let config = PalConfig::load().expect("config loads");
        assert!(!config.session.persist_cookies);
        assert_eq!(config.general.history_limit, 3);
        Ok(())
    });
}

#[test]
fn env_timeout_is_numeric() {
    Jail::expect_with(|jail| {
        jail.set_env("PALAVER_API__TIMEOUT_SECS", "7");
        let config = PalConfig::load().expect("config loads");
        assert_eq!(config.api.timeout_secs, 7);
        Ok(())
    });
}
