use super::*;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let pairs: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| pairs.get(key).cloned()
}

#[test]
fn defaults_point_at_placeholder_service_with_six_per_page() {
    let settings = Settings::default();
    assert_eq!(settings.base_url, "https://jsonplaceholder.typicode.com");
    assert_eq!(settings.page_size.get(), 6);
}

#[test]
fn file_sets_base_url_and_page_size() {
    let mut settings = Settings::default();
    apply_file(
        &mut settings,
        "base_url = \"http://127.0.0.1:8787\"\npage_size = 4\n",
    );
    assert_eq!(settings.base_url, "http://127.0.0.1:8787");
    assert_eq!(settings.page_size.get(), 4);
}

#[test]
fn non_positive_page_size_is_ignored() {
    let mut settings = Settings::default();
    apply_file(&mut settings, "page_size = 0\n");
    assert_eq!(settings.page_size.get(), 6);
    apply_file(&mut settings, "page_size = -3\n");
    assert_eq!(settings.page_size.get(), 6);
    apply_env(&mut settings, env_from(&[("APP__PAGE_SIZE", "lots")]));
    assert_eq!(settings.page_size.get(), 6);
}

#[test]
fn app_prefixed_env_wins_over_roster_env() {
    let mut settings = Settings::default();
    apply_env(
        &mut settings,
        env_from(&[
            ("ROSTER_BASE_URL", "http://first.test"),
            ("APP__BASE_URL", "http://second.test"),
            ("APP__PAGE_SIZE", " 10 "),
        ]),
    );
    assert_eq!(settings.base_url, "http://second.test");
    assert_eq!(settings.page_size.get(), 10);
}

#[test]
fn missing_explicit_file_falls_back_to_defaults() {
    let settings = load_settings(Some(Path::new("/nonexistent/roster-settings.toml")));
    assert_eq!(settings.page_size, Settings::default().page_size);
}
