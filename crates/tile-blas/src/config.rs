//! Tiling and execution configuration.

use once_cell::sync::OnceCell;

use crate::error::{Result, TileError};

/// Environment variable overriding the tile size.
pub const ENV_NB: &str = "TILE_BLAS_NB";
/// Environment variable overriding the worker count.
pub const ENV_NUM_THREADS: &str = "TILE_BLAS_NUM_THREADS";

/// Process-wide configuration, read from the environment on first use.
static GLOBAL_CONFIG: OnceCell<TileConfig> = OnceCell::new();

/// Configuration used by the [`api`](crate::api) drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileConfig {
    /// Tile size: matrices are split into `nb x nb` tiles.
    pub nb: usize,
    /// Worker threads. `None` runs on rayon's global pool.
    pub num_threads: Option<usize>,
}

impl TileConfig {
    /// Default for large problems.
    pub const DEFAULT: Self = Self {
        nb: 256,
        num_threads: None,
    };

    /// Small tiles; more parallelism, more scheduling overhead.
    pub const SMALL: Self = Self {
        nb: 64,
        num_threads: None,
    };

    pub const fn new(nb: usize, num_threads: Option<usize>) -> Self {
        Self { nb, num_threads }
    }

    pub fn with_nb(mut self, nb: usize) -> Self {
        self.nb = nb;
        self
    }

    pub fn with_num_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = Some(num_threads);
        self
    }

    /// Validate that the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        if self.nb == 0 {
            return Err(TileError::Config("nb must be non-zero".into()));
        }
        if self.num_threads == Some(0) {
            return Err(TileError::Config("num_threads must be non-zero".into()));
        }
        Ok(())
    }

    /// Defaults overridden by `TILE_BLAS_NB` and `TILE_BLAS_NUM_THREADS`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for the environment keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(value) = lookup(ENV_NB) {
            config.nb = parse_count(ENV_NB, &value)?;
        }
        if let Some(value) = lookup(ENV_NUM_THREADS) {
            config.num_threads = Some(parse_count(ENV_NUM_THREADS, &value)?);
        }
        config.validate()?;
        Ok(config)
    }

    /// The process-wide configuration.
    ///
    /// Initialized from the environment on first call; an invalid
    /// environment falls back to [`TileConfig::DEFAULT`].
    pub fn global() -> &'static TileConfig {
        GLOBAL_CONFIG.get_or_init(|| {
            Self::from_env().unwrap_or_else(|err| {
                tracing::warn!(error = %err, "ignoring tile-blas environment configuration");
                Self::DEFAULT
            })
        })
    }
}

impl Default for TileConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

fn parse_count(key: &str, value: &str) -> Result<usize> {
    value
        .trim()
        .parse::<usize>()
        .map_err(|e| TileError::Config(format!("{}={:?}: {}", key, value, e)))
}

#[cfg(feature = "parallel")]
pub(crate) mod pool {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use once_cell::sync::OnceCell;

    use crate::error::{Result, TileError};

    static POOLS: OnceCell<Mutex<HashMap<usize, Arc<rayon::ThreadPool>>>> = OnceCell::new();

    /// Shared pool with exactly `num_threads` workers, built on first request.
    pub(crate) fn get(num_threads: usize) -> Result<Arc<rayon::ThreadPool>> {
        let pools = POOLS.get_or_init(|| Mutex::new(HashMap::new()));
        let mut pools = pools.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(pool) = pools.get(&num_threads) {
            return Ok(Arc::clone(pool));
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .thread_name(|i| format!("tile-blas-{}", i))
            .build()
            .map_err(|e| TileError::Config(format!("thread pool: {}", e)))?;
        tracing::debug!(num_threads, "built tile-blas thread pool");
        let pool = Arc::new(pool);
        pools.insert(num_threads, Arc::clone(&pool));
        Ok(pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default() {
        let config = TileConfig::default();
        assert_eq!(config, TileConfig::DEFAULT);
        assert!(config.validate().is_ok());
        assert!(TileConfig::SMALL.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = TileConfig::default().with_nb(32).with_num_threads(4);
        assert_eq!(config, TileConfig::new(32, Some(4)));
    }

    #[test]
    fn test_validate_nb_zero() {
        let err = TileConfig::new(0, None).validate().unwrap_err();
        assert_eq!(err, TileError::Config("nb must be non-zero".into()));
    }

    #[test]
    fn test_validate_threads_zero() {
        assert!(TileConfig::new(8, Some(0)).validate().is_err());
    }

    #[test]
    fn test_from_lookup_empty() {
        let config = TileConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, TileConfig::DEFAULT);
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = TileConfig::from_lookup(lookup(&[(ENV_NB, " 48 "), (ENV_NUM_THREADS, "3")])).unwrap();
        assert_eq!(config, TileConfig::new(48, Some(3)));
    }

    #[test]
    fn test_from_lookup_rejects_garbage() {
        let err = TileConfig::from_lookup(lookup(&[(ENV_NB, "big")])).unwrap_err();
        assert!(matches!(err, TileError::Config(msg) if msg.starts_with("TILE_BLAS_NB")));
    }

    #[test]
    fn test_from_lookup_rejects_zero() {
        assert!(TileConfig::from_lookup(lookup(&[(ENV_NB, "0")])).is_err());
    }

    #[test]
    fn test_global_is_valid_and_stable() {
        let first = TileConfig::global();
        assert!(first.validate().is_ok());
        assert!(std::ptr::eq(first, TileConfig::global()));
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_pool_is_cached() {
        let first = pool::get(2).unwrap();
        let second = pool::get(2).unwrap();
        assert!(std::sync::Arc::ptr_eq(&first, &second));
        assert_eq!(first.current_num_threads(), 2);
    }
}
