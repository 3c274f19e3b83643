use std::collections::HashMap;
use std::time::Duration;

use dealbot::core::config::{AppConfig, DEFAULT_USER_AGENT};
use dealbot::errors::DealError;

fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

#[test]
fn test_defaults_when_nothing_is_set() {
    let config = AppConfig::from_map(&HashMap::new()).unwrap();

    assert!(config.discord_webhook_url.is_none());
    assert_eq!(config.hotukdeals_max_pages, 2);
    assert_eq!(config.latestdeals_max_pages, 2);
    assert_eq!(config.request_timeout, Duration::from_secs(15));
    assert_eq!(config.webhook_timeout, Duration::from_secs(10));
    assert_eq!(config.min_page_delay, Duration::from_secs(3));
    assert_eq!(config.max_page_delay, Duration::from_secs(8));
    assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
}

#[test]
fn test_overrides_are_applied() {
    let config = AppConfig::from_map(&vars(&[
        ("DISCORD_WEBHOOK_URL", "https://discord.com/api/webhooks/1/abc"),
        ("HOTUKDEALS_MAX_PAGES", "4"),
        ("LATESTDEALS_MAX_PAGES", " 1 "),
        ("MIN_PAGE_DELAY_SECS", "0.5"),
        ("MAX_PAGE_DELAY_SECS", "1.5"),
        ("SCRAPER_USER_AGENT", "dealbot-test"),
    ]))
    .unwrap();

    assert_eq!(
        config.discord_webhook_url.unwrap().as_str(),
        "https://discord.com/api/webhooks/1/abc"
    );
    assert_eq!(config.hotukdeals_max_pages, 4);
    assert_eq!(config.latestdeals_max_pages, 1);
    assert_eq!(config.min_page_delay, Duration::from_millis(500));
    assert_eq!(config.max_page_delay, Duration::from_millis(1500));
    assert_eq!(config.user_agent, "dealbot-test");
}

#[test]
fn test_blank_webhook_is_treated_as_unset() {
    let config = AppConfig::from_map(&vars(&[("DISCORD_WEBHOOK_URL", "  ")])).unwrap();
    assert!(config.discord_webhook_url.is_none());
}

#[test]
fn test_invalid_values_are_rejected() {
    let cases: &[&[(&str, &str)]] = &[
        &[("DISCORD_WEBHOOK_URL", "not a url")],
        &[("DISCORD_WEBHOOK_URL", "discord.com:443/api/webhooks/1/x")],
        &[("DISCORD_WEBHOOK_URL", "ftp://discord.com/api/webhooks/1/x")],
        &[("REQUEST_TIMEOUT_SECS", "0")],
        &[("WEBHOOK_TIMEOUT_SECS", "0.0")],
        &[("HOTUKDEALS_MAX_PAGES", "0")],
        &[("LATESTDEALS_MAX_PAGES", "two")],
        &[("REQUEST_TIMEOUT_SECS", "-1")],
        &[("MIN_PAGE_DELAY_SECS", "9"), ("MAX_PAGE_DELAY_SECS", "2")],
    ];

    for case in cases {
        match AppConfig::from_map(&vars(case)) {
            Err(DealError::Config(_)) => {}
            other => panic!("expected config error for {:?}, got {:?}", case, other),
        }
    }
}
