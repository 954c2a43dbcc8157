use std::sync::Once;

/// Crates whose per-frame chatter drowns the demo's own debug output.
const GPU_CRATES: [&str; 3] = ["wgpu_core", "wgpu_hal", "naga"];

/// Logger configuration.
///
/// An explicit `filter` (env_logger syntax, e.g.
/// `"glasswork_engine=debug"`) beats `RUST_LOG`, which beats `level`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub filter: Option<String>,
    pub level: log::LevelFilter,
    /// Caps the GPU stack at `warn` unless the filter names it.
    pub quiet_gpu: bool,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: None,
            level: log::LevelFilter::Info,
            quiet_gpu: true,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    /// Debug output for glasswork crates, geometry rebuilds included.
    pub fn verbose() -> Self {
        Self { level: log::LevelFilter::Debug, ..Self::default() }
    }

    /// The filter string handed to env_logger.
    fn filter_spec(&self, rust_log: Option<&str>) -> String {
        let mut spec = match (self.filter.as_deref(), rust_log) {
            (Some(filter), _) | (None, Some(filter)) => filter.to_string(),
            (None, None) => self.level.to_string().to_lowercase(),
        };

        if self.quiet_gpu {
            for name in GPU_CRATES {
                if !spec.contains(name) {
                    spec.push_str(&format!(",{name}=warn"));
                }
            }
        }
        spec
    }
}

static INIT: Once = Once::new();

/// Installs env_logger as the `log` backend. Later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let rust_log = std::env::var("RUST_LOG").ok();
        let spec = config.filter_spec(rust_log.as_deref());

        env_logger::Builder::new()
            .parse_filters(&spec)
            .write_style(config.write_style)
            .init();

        log::debug!("logging initialized with '{spec}'");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_is_the_fallback() {
        let spec = LoggingConfig::default().filter_spec(None);
        assert_eq!(spec, "info,wgpu_core=warn,wgpu_hal=warn,naga=warn");
    }

    #[test]
    fn explicit_filter_beats_rust_log() {
        let config = LoggingConfig { filter: Some("glasswork_engine=debug".into()), quiet_gpu: false, ..Default::default() };
        assert_eq!(config.filter_spec(Some("trace")), "glasswork_engine=debug");
        let config = LoggingConfig { quiet_gpu: false, ..Default::default() };
        assert_eq!(config.filter_spec(Some("trace")), "trace");
    }

    #[test]
    fn named_gpu_crates_are_left_alone() {
        let spec = LoggingConfig::verbose().filter_spec(Some("debug,naga=info"));
        assert_eq!(spec, "debug,naga=info,wgpu_core=warn,wgpu_hal=warn");
    }
}
