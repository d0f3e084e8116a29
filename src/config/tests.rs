use std::sync::{Mutex, OnceLock};

use tempfile::TempDir;

use crate::logging::Logger;

use super::constants::{API_KEY_ENV_VAR, DEFAULT_BASE_URL, MODEL_ENV_VAR, TEMPERATURE_ENV_VAR};
use super::environment::{env_string, load_dotenv};
use super::{
    ConfigLoadError, ConfigTree, CredentialError, Credentials, DEFAULT_MODEL, DEFAULT_TEMPERATURE,
    EnvSource, MapEnv, ProcessEnv,
};

fn logger() -> Logger {
    Logger::new("config-test")
}

fn tree(contents: &str) -> ConfigTree {
    ConfigTree::parse(contents).unwrap()
}

fn env_lock<'a>() -> std::sync::MutexGuard<'a, ()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
}

struct EnvGuard {
    saved: Vec<(String, Option<String>)>,
}

impl EnvGuard {
    fn new(vars: &[(&str, Option<&str>)]) -> Self {
        let saved = vars
            .iter()
            .map(|(key, _)| (key.to_string(), std::env::var(key).ok()))
            .collect::<Vec<_>>();
        for (key, value) in vars {
            match value {
                Some(val) => unsafe { std::env::set_var(key, val) },
                None => unsafe { std::env::remove_var(key) },
            }
        }
        Self { saved }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in &self.saved {
            match value {
                Some(val) => unsafe { std::env::set_var(key, val) },
                None => unsafe { std::env::remove_var(key) },
            }
        }
    }
}

#[test]
fn get_walks_nested_tables() {
    let config = tree(
        r#"
        [llm]
        model = "gpt-4o"
        temperature = 0.2

        [api]
        openai_api_key = "file-key"
        "#,
    );

    assert_eq!(config.get_or(&["llm", "model"], String::new()), "gpt-4o");
    assert_eq!(config.get_or(&["llm", "temperature"], 1.0), 0.2);
    assert_eq!(
        config.get_or(&["api", "openai_api_key"], String::new()),
        "file-key"
    );
}

#[test]
fn get_returns_default_for_missing_keys() {
    let config = tree("[llm]\nmodel = \"gpt-4o\"\n");

    assert_eq!(config.get_or(&["llm", "missing"], "fallback".to_string()), "fallback");
    assert_eq!(config.get_or(&["nope", "model"], 3_i64), 3);
    assert!(config.get(&[]).is_none());

    let empty = ConfigTree::empty();
    assert!(empty.is_empty());
    assert_eq!(empty.get_or(&["llm", "model"], "x".to_string()), "x");
    assert!(empty.get(&["a", "b", "c"]).is_none());
}

#[test]
fn get_does_not_index_into_scalars() {
    let config = tree("[llm]\nmodel = \"gpt-4o\"\n");

    assert!(config.get(&["llm", "model", "name"]).is_none());
    assert_eq!(
        config.get_or(&["llm", "model", "name"], "default".to_string()),
        "default"
    );
}

#[test]
fn get_returns_default_on_type_mismatch() {
    let config = tree("[llm]\nmodel = 42\ntemperature = 1\n");

    assert_eq!(config.get_or(&["llm", "model"], "fallback".to_string()), "fallback");
    assert_eq!(config.get_or(&["llm", "temperature"], 0.5), 1.0);
    assert!(!config.get_or(&["llm", "temperature"], false));
}

#[test]
fn each_lookup_gets_its_own_default() {
    let config = ConfigTree::empty();
    let mut first = config.get_or(&["a"], String::from("shared"));
    first.push_str("-mutated");
    assert_eq!(config.get_or(&["a"], String::from("shared")), "shared");
}

#[test]
fn load_without_path_is_empty() {
    assert!(ConfigTree::load(None, &logger()).is_empty());
}

#[test]
fn load_missing_file_degrades_to_empty() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");

    assert!(matches!(
        ConfigTree::try_load(&path),
        Err(ConfigLoadError::Read { .. })
    ));
    assert!(ConfigTree::load(Some(&path), &logger()).is_empty());
}

#[test]
fn load_malformed_file_degrades_to_empty() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "[llm\nmodel = ").unwrap();

    assert!(matches!(
        ConfigTree::try_load(&path),
        Err(ConfigLoadError::Parse { .. })
    ));
    assert!(ConfigTree::load(Some(&path), &logger()).is_empty());
}

#[test]
fn load_reads_toml_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[llm]\nmodel = \"file-model\"\n").unwrap();

    let config = ConfigTree::load(Some(&path), &logger());
    assert_eq!(config.get_or(&["llm", "model"], String::new()), "file-model");
}

#[test]
fn config_value_wins_over_environment() {
    let config = tree(
        r#"
        [api]
        openai_api_key = "file-key"
        [llm]
        model = "file-model"
        temperature = 0.3
        "#,
    );
    let env = MapEnv::new()
        .with(API_KEY_ENV_VAR, "env-key")
        .with(MODEL_ENV_VAR, "env-model")
        .with(TEMPERATURE_ENV_VAR, "1.5");

    let credentials = Credentials::resolve(&config, &env, &logger()).unwrap();
    assert_eq!(credentials.api_key, "file-key");
    assert_eq!(credentials.model, "file-model");
    assert_eq!(credentials.temperature, 0.3);
}

#[test]
fn environment_fills_empty_config_values() {
    let config = tree("[api]\nopenai_api_key = \"   \"\n");
    let env = MapEnv::new()
        .with(API_KEY_ENV_VAR, "sk-env")
        .with(MODEL_ENV_VAR, "env-model")
        .with(TEMPERATURE_ENV_VAR, "1.2");

    let credentials = Credentials::resolve(&config, &env, &logger()).unwrap();
    assert_eq!(credentials.api_key, "sk-env");
    assert_eq!(credentials.model, "env-model");
    assert_eq!(credentials.temperature, 1.2);
}

#[test]
fn missing_api_key_is_an_error() {
    let env = MapEnv::new().with(API_KEY_ENV_VAR, "");

    let err = Credentials::resolve(&ConfigTree::empty(), &env, &logger()).unwrap_err();
    assert!(matches!(err, CredentialError::MissingApiKey { .. }));
    assert!(err.to_string().contains(API_KEY_ENV_VAR));
    assert!(err.to_string().contains("api.openai_api_key"));
}

#[test]
fn model_and_temperature_fall_back_to_defaults() {
    let env = MapEnv::new().with(API_KEY_ENV_VAR, "sk-test");

    let credentials = Credentials::resolve(&ConfigTree::empty(), &env, &logger()).unwrap();
    assert_eq!(credentials.model, DEFAULT_MODEL);
    assert_eq!(credentials.model, "gpt-3.5-turbo");
    assert_eq!(credentials.temperature, DEFAULT_TEMPERATURE);
    assert_eq!(credentials.base_url, DEFAULT_BASE_URL);
}

#[test]
fn out_of_range_temperature_falls_through() {
    let config = tree("[llm]\ntemperature = 3.5\n");
    let env = MapEnv::new()
        .with(API_KEY_ENV_VAR, "sk-test")
        .with(TEMPERATURE_ENV_VAR, "warm");

    let credentials = Credentials::resolve(&config, &env, &logger()).unwrap();
    assert_eq!(credentials.temperature, DEFAULT_TEMPERATURE);

    let env = MapEnv::new()
        .with(API_KEY_ENV_VAR, "sk-test")
        .with(TEMPERATURE_ENV_VAR, "0");
    let credentials = Credentials::resolve(&config, &env, &logger()).unwrap();
    assert_eq!(credentials.temperature, 0.0);
}

#[test]
fn debug_output_redacts_api_key() {
    let env = MapEnv::new().with(API_KEY_ENV_VAR, "sk-secret");
    let credentials = Credentials::resolve(&ConfigTree::empty(), &env, &logger()).unwrap();

    let rendered = format!("{credentials:?}");
    assert!(!rendered.contains("sk-secret"));
    assert!(rendered.contains("<redacted>"));
}

#[test]
fn process_env_reads_variables() {
    let _lock = env_lock();
    let _env = EnvGuard::new(&[
        ("CHATLOOP_TEST_VAR", Some("test_value")),
        ("CHATLOOP_TEST_UNSET", None),
    ]);

    let env = ProcessEnv::new(logger());
    assert_eq!(env.var("CHATLOOP_TEST_VAR"), Some("test_value".to_string()));
    assert_eq!(env.var("CHATLOOP_TEST_UNSET"), None);
    assert_eq!(
        env_string("CHATLOOP_TEST_VAR").unwrap(),
        Some("test_value".to_string())
    );
}

#[test]
fn dotenv_fills_unset_variables_only() {
    let _lock = env_lock();
    let _env = EnvGuard::new(&[
        ("CHATLOOP_DOTENV_UNSET", None),
        ("CHATLOOP_DOTENV_PRESET", Some("from-process")),
    ]);
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".env");
    std::fs::write(
        &path,
        "CHATLOOP_DOTENV_UNSET=from-file\nCHATLOOP_DOTENV_PRESET=from-file\n",
    )
    .unwrap();

    load_dotenv(&path, &logger());

    assert_eq!(
        std::env::var("CHATLOOP_DOTENV_UNSET").ok(),
        Some("from-file".to_string())
    );
    assert_eq!(
        std::env::var("CHATLOOP_DOTENV_PRESET").ok(),
        Some("from-process".to_string())
    );
}

#[test]
fn dotenv_missing_file_is_not_an_error() {
    let _lock = env_lock();
    let _env = EnvGuard::new(&[("CHATLOOP_DOTENV_ABSENT", None)]);
    let dir = TempDir::new().unwrap();

    load_dotenv(&dir.path().join(".env"), &logger());

    assert!(std::env::var("CHATLOOP_DOTENV_ABSENT").is_err());
}

#[test]
fn dotenv_values_feed_credential_resolution() {
    let _lock = env_lock();
    let _env = EnvGuard::new(&[(API_KEY_ENV_VAR, None)]);
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".env");
    std::fs::write(&path, format!("{API_KEY_ENV_VAR}=sk-dotenv\n")).unwrap();

    load_dotenv(&path, &logger());
    let env = ProcessEnv::new(logger());
    let credentials = Credentials::resolve(&ConfigTree::empty(), &env, &logger()).unwrap();

    assert_eq!(credentials.api_key, "sk-dotenv");
}
