pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const TEMPERATURE_RANGE: std::ops::RangeInclusive<f64> = 0.0..=2.0;
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const REQUEST_TIMEOUT_SECS: u64 = 60;
pub const DOTENV_FILE: &str = ".env";

pub const API_KEY_PATH: &[&str] = &["api", "openai_api_key"];
pub const BASE_URL_PATH: &[&str] = &["api", "base_url"];
pub const MODEL_PATH: &[&str] = &["llm", "model"];
pub const TEMPERATURE_PATH: &[&str] = &["llm", "temperature"];

pub const API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";
pub const BASE_URL_ENV_VAR: &str = "OPENAI_BASE_URL";
pub const MODEL_ENV_VAR: &str = "OPENAI_MODEL";
pub const TEMPERATURE_ENV_VAR: &str = "OPENAI_TEMPERATURE";
