use soundope_core::ledger::{BoostPoolPolicy, BoostStacking};

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development except the JWT
/// secret. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long background jobs get to stop after the server drains (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Boost, vote, and discovery policy knobs.
    pub ledger: LedgerConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `30`                       |
    ///
    /// See [`JwtConfig::from_env`] and [`LedgerConfig::from_env`] for the rest.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            jwt: JwtConfig::from_env(),
            ledger: LedgerConfig::from_env(),
        }
    }
}

/// Default monthly vote allowance per listener.
const DEFAULT_MONTHLY_VOTE_ALLOWANCE: i32 = 10;
/// Default interval between boost expiry sweeps, in seconds.
const DEFAULT_BOOST_EXPIRY_SWEEP_SECS: u64 = 300;
/// Default cap on the rows returned by `GET /discover/eligible`.
const DEFAULT_ELIGIBLE_LIST_LIMIT: i64 = 500;

/// Policies for the boost and vote ledgers and the discovery draw.
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// How a new boost's window combines with an active one.
    pub boost_stacking: BoostStacking,
    /// Whether lapsed boost pools keep counting toward selection weight.
    pub boost_pool_policy: BoostPoolPolicy,
    /// Votes granted to each listener at the start of every month.
    pub monthly_vote_allowance: i32,
    /// How often the boost expiry sweeper runs under `reset_on_expiry`.
    pub boost_expiry_sweep_secs: u64,
    /// Maximum rows returned by the eligible-pool listing. The draw itself
    /// always considers every eligible track.
    pub eligible_list_limit: i64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            boost_stacking: BoostStacking::Extend,
            boost_pool_policy: BoostPoolPolicy::Permanent,
            monthly_vote_allowance: DEFAULT_MONTHLY_VOTE_ALLOWANCE,
            boost_expiry_sweep_secs: DEFAULT_BOOST_EXPIRY_SWEEP_SECS,
            eligible_list_limit: DEFAULT_ELIGIBLE_LIST_LIMIT,
        }
    }
}

impl LedgerConfig {
    /// Load ledger policies from environment variables.
    ///
    /// | Env Var                     | Default     | Values                         |
    /// |-----------------------------|-------------|--------------------------------|
    /// | `BOOST_STACKING`            | `extend`    | `extend`, `replace`            |
    /// | `BOOST_POOL_POLICY`         | `permanent` | `permanent`, `reset_on_expiry` |
    /// | `MONTHLY_VOTE_ALLOWANCE`    | `10`        | non-negative integer           |
    /// | `BOOST_EXPIRY_SWEEP_SECS`   | `300`       | positive integer               |
    /// | `ELIGIBLE_LIST_LIMIT`       | `500`       | positive integer               |
    ///
    /// # Panics
    ///
    /// Panics on unrecognized or out-of-range values so misconfiguration
    /// fails at startup.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let boost_stacking = match std::env::var("BOOST_STACKING") {
            Ok(v) => BoostStacking::from_str_config(&v)
                .unwrap_or_else(|e| panic!("Invalid BOOST_STACKING: {e}")),
            Err(_) => defaults.boost_stacking,
        };

        let boost_pool_policy = match std::env::var("BOOST_POOL_POLICY") {
            Ok(v) => BoostPoolPolicy::from_str_config(&v)
                .unwrap_or_else(|e| panic!("Invalid BOOST_POOL_POLICY: {e}")),
            Err(_) => defaults.boost_pool_policy,
        };

        let monthly_vote_allowance: i32 = std::env::var("MONTHLY_VOTE_ALLOWANCE")
            .map(|v| v.parse().expect("MONTHLY_VOTE_ALLOWANCE must be a valid i32"))
            .unwrap_or(defaults.monthly_vote_allowance);
        assert!(
            monthly_vote_allowance >= 0,
            "MONTHLY_VOTE_ALLOWANCE must not be negative"
        );

        let boost_expiry_sweep_secs: u64 = std::env::var("BOOST_EXPIRY_SWEEP_SECS")
            .map(|v| v.parse().expect("BOOST_EXPIRY_SWEEP_SECS must be a valid u64"))
            .unwrap_or(defaults.boost_expiry_sweep_secs);
        assert!(
            boost_expiry_sweep_secs > 0,
            "BOOST_EXPIRY_SWEEP_SECS must be positive"
        );

        let eligible_list_limit: i64 = std::env::var("ELIGIBLE_LIST_LIMIT")
            .map(|v| v.parse().expect("ELIGIBLE_LIST_LIMIT must be a valid i64"))
            .unwrap_or(defaults.eligible_list_limit);
        assert!(
            eligible_list_limit > 0,
            "ELIGIBLE_LIST_LIMIT must be positive"
        );

        Self {
            boost_stacking,
            boost_pool_policy,
            monthly_vote_allowance,
            boost_expiry_sweep_secs,
            eligible_list_limit,
        }
    }
}
