use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

/// Statement logs from `sqlx` are noisy at `info`; they stay at `warn` unless a
/// directive for `sqlx` is given explicitly.
const SQLX_DIRECTIVE: &str = "sqlx=warn";

pub fn init_logging(default_level: &str) -> Result<()> {
    fmt()
        .with_env_filter(build_filter(default_level))
        .with_target(true)
        .compact()
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(())
}

fn build_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(with_sqlx_directive(default_level)))
        .unwrap_or_else(|_| EnvFilter::new(with_sqlx_directive("info")))
}

fn with_sqlx_directive(level: &str) -> String {
    if level.split(',').any(|directive| directive.trim().starts_with("sqlx")) {
        level.to_string()
    } else {
        format!("{level},{SQLX_DIRECTIVE}")
    }
}

#[cfg(test)]
mod tests {
    use super::with_sqlx_directive;

    #[test]
    fn sqlx_is_quieted_by_default() {
        assert_eq!(with_sqlx_directive("debug"), "debug,sqlx=warn");
    }

    #[test]
    fn explicit_sqlx_directive_is_kept() {
        assert_eq!(
            with_sqlx_directive("info,sqlx=debug"),
            "info,sqlx=debug"
        );
    }
}
