pub mod env_var {
    use std::time::Duration;

    use derive_more::Display;
    use lazy_static::lazy_static;
    use url::Url;

    use crate::{
        app::query::PAGE_SIZE_OPTIONS,
        domain::datatype::{AuthorId, InstructorId},
    };

    lazy_static! {
        static ref ENV_VAR: EnvVar = EnvVar::from_process_env().unwrap_or_else(|err| panic!("{err}"));
    }

    pub const DEFAULT_API_URL: &str = "http://localhost:5000";

    #[derive(Debug, Clone)]
    pub struct EnvVar {
        pub api_url: Url,
        pub request_timeout: Duration,
        pub connect_timeout: Duration,
        pub page_size: usize,
        pub instructor_id: InstructorId,
        pub student_id: AuthorId,
        pub log_level: tracing::Level,
    }

    #[derive(Debug, Display, Clone, PartialEq, Eq)]
    #[display(fmt = "Invalid {variable}: {value:?}")]
    pub struct ConfigError {
        pub variable: &'static str,
        pub value: String,
    }

    impl std::error::Error for ConfigError {}

    macro_rules! get_env {
        ($lookup:ident, $env:literal, $default:expr) => {
            $lookup($env).unwrap_or_else(|| String::from($default))
        };
    }

    macro_rules! parse_env {
        ($lookup:ident, $env:literal, $default:expr) => {{
            let value = get_env!($lookup, $env, $default);
            value.parse().map_err(|_| ConfigError {
                variable: $env,
                value,
            })
        }};
    }

    impl EnvVar {
        pub fn from_process_env() -> Result<Self, ConfigError> {
            Self::from_lookup(|key| std::env::var(key).ok())
        }

        pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
        where
            F: Fn(&str) -> Option<String>,
        {
            let api_url: Url = parse_env!(lookup, "API_URL", DEFAULT_API_URL)?;
            if api_url.cannot_be_a_base() {
                return Err(ConfigError {
                    variable: "API_URL",
                    value: api_url.into(),
                });
            }

            let request_timeout: u64 = parse_env!(lookup, "REQUEST_TIMEOUT_MS", "10000")?;
            let connect_timeout: u64 = parse_env!(lookup, "CONNECT_TIMEOUT_MS", "5000")?;

            let page_size: usize = parse_env!(lookup, "PAGE_SIZE", "5")?;
            if !PAGE_SIZE_OPTIONS.contains(&page_size) {
                return Err(ConfigError {
                    variable: "PAGE_SIZE",
                    value: page_size.to_string(),
                });
            }

            let instructor_id = InstructorId::parse(&get_env!(lookup, "INSTRUCTOR_ID", "1"));
            let student_id = AuthorId::parse(&get_env!(lookup, "STUDENT_ID", "Student"));
            let log_level: tracing::Level = parse_env!(lookup, "LOG_LEVEL", "info")?;

            Ok(EnvVar {
                api_url,
                request_timeout: Duration::from_millis(request_timeout),
                connect_timeout: Duration::from_millis(connect_timeout),
                page_size,
                instructor_id,
                student_id,
                log_level,
            })
        }
    }

    pub fn get() -> &'static EnvVar {
        &ENV_VAR
    }

}
