// # rdnsd - Reverse DNS Applier
//
// Thin integration layer: reads configuration from environment
// variables, registers providers, and applies each configured
// IP → hostname mapping once. All reconciliation logic lives in
// rdns-core and the provider crates.
//
// ## Configuration
//
// All configuration is done via environment variables:
//
// ### Provider
// - `RDNS_PROVIDER_TYPE`: provider type (bound)
// - `RDNS_API_HOST`: management API host
// - `RDNS_API_PORT`: management API port (default 443)
// - `RDNS_API_TLS`: "true"/"false" (default true)
// - `RDNS_API_KEY`: API key
//
// ### Mappings
// - `RDNS_MAPPINGS`: comma-separated `ip=hostname` pairs; an empty
//   hostname (`ip=`) means the PTR record should be removed
//
// ### Misc
// - `RDNS_LOG_LEVEL`: trace|debug|info|warn|error (default info)
// - `RDNS_MODE`: set to `dry-run` to log mutations without applying
//
// ## Example
//
// ```bash
// export RDNS_PROVIDER_TYPE=bound
// export RDNS_API_HOST=dns.example.net
// export RDNS_API_KEY=your_key
// export RDNS_MAPPINGS="192.0.2.5=host1.example.com,192.0.2.6="
//
// rdnsd
// ```

use anyhow::Result;
use rdns_core::{MappingConfig, ProviderConfig, ProviderRegistry, RdnsConfig};
use std::env;
use std::process::ExitCode;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for different termination scenarios
///
/// These codes follow systemd conventions:
/// - 0: all mappings converged
/// - 1: configuration or startup error
/// - 2: one or more mappings failed to converge
#[derive(Debug, Clone, Copy)]
enum RdnsExitCode {
    /// All mappings converged
    Converged = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// At least one mapping failed
    PartialFailure = 2,
}

impl From<RdnsExitCode> for ExitCode {
    fn from(code: RdnsExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Application configuration
struct Config {
    provider_type: String,
    api_host: String,
    api_port: u16,
    api_tls: bool,
    api_key: String,
    mappings: Vec<MappingConfig>,
    log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        Ok(Self {
            provider_type: env::var("RDNS_PROVIDER_TYPE").unwrap_or_else(|_| "bound".to_string()),
            api_host: env::var("RDNS_API_HOST").unwrap_or_default(),
            api_port: env::var("RDNS_API_PORT")
                .ok()
                .map(|s| s.parse())
                .transpose()
                .map_err(|e| anyhow::anyhow!("RDNS_API_PORT is not a valid port: {}", e))?
                .unwrap_or(443),
            api_tls: env::var("RDNS_API_TLS")
                .map(|s| s.to_lowercase() != "false")
                .unwrap_or(true),
            api_key: env::var("RDNS_API_KEY").unwrap_or_default(),
            mappings: parse_mappings(&env::var("RDNS_MAPPINGS").unwrap_or_default())?,
            log_level: env::var("RDNS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        if self.api_host.is_empty() {
            anyhow::bail!("RDNS_API_HOST is required. Set it via: export RDNS_API_HOST=dns.example.net");
        }

        if self.api_key.is_empty() {
            anyhow::bail!("RDNS_API_KEY is required. Set it via: export RDNS_API_KEY=your_key");
        }

        match self.provider_type.as_str() {
            "bound" => {}
            _ => anyhow::bail!(
                "RDNS_PROVIDER_TYPE '{}' is not supported. Supported providers: bound",
                self.provider_type
            ),
        }

        if self.mappings.is_empty() {
            anyhow::bail!(
                "RDNS_MAPPINGS must contain at least one mapping. \
                Set it via: export RDNS_MAPPINGS=192.0.2.5=host1.example.com"
            );
        }

        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!(
                "RDNS_LOG_LEVEL '{}' is not valid. Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }

        Ok(())
    }

    /// Build the core configuration from the environment values
    fn to_rdns_config(&self) -> Result<RdnsConfig> {
        let provider = ProviderConfig::Bound {
            host: self.api_host.clone(),
            port: self.api_port,
            use_tls: self.api_tls,
            api_key: self.api_key.clone(),
        };

        let config = RdnsConfig::new(provider, self.mappings.clone());
        config.validate().map_err(|e| anyhow::anyhow!(e))?;
        Ok(config)
    }
}

/// Parse `RDNS_MAPPINGS` into mapping configs
///
/// Format: comma-separated `ip=hostname` pairs. An empty hostname
/// means the PTR record for that IP should not exist.
fn parse_mappings(raw: &str) -> Result<Vec<MappingConfig>> {
    let mut mappings = Vec::new();

    for pair in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let (ip_text, hostname) = pair
            .split_once('=')
            .ok_or_else(|| anyhow::anyhow!("Invalid mapping '{}': expected ip=hostname", pair))?;

        let ip = ip_text
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid IP address '{}': {}", ip_text, e))?;

        let hostname = hostname.trim();
        let hostname = (!hostname.is_empty()).then(|| hostname.to_string());

        mappings.push(MappingConfig { ip, hostname });
    }

    Ok(mappings)
}

fn main() -> ExitCode {
    // Load configuration from environment
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return RdnsExitCode::ConfigError.into();
        }
    };

    // Validate configuration
    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {}", e);
        return RdnsExitCode::ConfigError.into();
    }

    // Initialize tracing
    let log_level = match config.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return RdnsExitCode::ConfigError.into();
    }

    info!("Starting rdnsd");
    info!("Configuration loaded: {} mapping(s)", config.mappings.len());

    // Enter tokio runtime
    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return RdnsExitCode::PartialFailure.into();
        }
    };

    rt.block_on(async {
        match apply_mappings(config).await {
            Ok(0) => RdnsExitCode::Converged,
            Ok(failed) => {
                error!("{} mapping(s) failed to converge", failed);
                RdnsExitCode::PartialFailure
            }
            Err(e) => {
                error!("Startup error: {}", e);
                RdnsExitCode::ConfigError
            }
        }
    })
    .into()
}

/// Apply every configured mapping once, returning the failure count
///
/// A failed mapping is logged and does not stop the remaining
/// mappings: convergence failures are isolated per IP.
async fn apply_mappings(config: Config) -> Result<usize> {
    let registry = ProviderRegistry::new();

    #[cfg(feature = "bound")]
    {
        info!("Registering Bound provider");
        rdns_provider_bound::register(&registry);
    }

    let rdns_config = config.to_rdns_config()?;
    let provider = registry
        .create_provider(&rdns_config.provider)
        .map_err(|e| anyhow::anyhow!(e))?;

    info!(
        "Using provider '{}': {}",
        provider.provider_name(),
        provider.provider_description()
    );

    let mut failed = 0;
    for mapping in &rdns_config.mappings {
        if !provider.supports(mapping.ip) {
            error!("Provider does not support {}", mapping.ip);
            failed += 1;
            continue;
        }

        match provider.update(mapping.ip, mapping.hostname.as_deref()).await {
            Ok(outcome) => {
                info!(ip = %mapping.ip, outcome = ?outcome, "mapping converged");
            }
            Err(e) => {
                error!(ip = %mapping.ip, error = %e, "mapping failed");
                failed += 1;
            }
        }
    }

    Ok(failed)
}
