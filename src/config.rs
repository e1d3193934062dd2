use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{config_error, Error};

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub nominatim_api_base: String,
    pub osrm_api_base: String,
    pub user_agent: String,
    /// How long `current_fix` waits for the device before timing out.
    pub fix_timeout: Duration,
    /// Oldest cached fix `current_fix` may return.
    pub fix_maximum_age: Duration,
    pub notice_ttl: Duration,
    pub simulation_tick: Duration,
    /// Simulated seconds that pass per wall-clock second.
    pub simulation_time_scale: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            nominatim_api_base: "nominatim.openstreetmap.org".into(),
            osrm_api_base: "router.project-osrm.org".into(),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).into(),
            fix_timeout: Duration::from_millis(10_000),
            fix_maximum_age: Duration::from_millis(30_000),
            notice_ttl: Duration::from_millis(5_000),
            simulation_tick: Duration::from_millis(1_000),
            simulation_time_scale: 10.0,
        }
    }
}

impl Config {
    #[tracing::instrument(name = "Config::from_env")]
    pub fn from_env() -> Result<Self, Error> {
        let defaults = Self::default();

        Ok(Self {
            addr: parsed("NAVITRACK_ADDR")?.unwrap_or(defaults.addr),
            nominatim_api_base: var("NOMINATIM_API_BASE")?.unwrap_or(defaults.nominatim_api_base),
            osrm_api_base: var("OSRM_API_BASE")?.unwrap_or(defaults.osrm_api_base),
            user_agent: var("NAVITRACK_USER_AGENT")?.unwrap_or(defaults.user_agent),
            fix_timeout: millis("FIX_TIMEOUT_MS")?.unwrap_or(defaults.fix_timeout),
            fix_maximum_age: millis("FIX_MAXIMUM_AGE_MS")?.unwrap_or(defaults.fix_maximum_age),
            notice_ttl: millis("NOTICE_TTL_MS")?.unwrap_or(defaults.notice_ttl),
            simulation_tick: millis("SIMULATION_TICK_MS")?.unwrap_or(defaults.simulation_tick),
            simulation_time_scale: parsed("SIMULATION_TIME_SCALE")?
                .unwrap_or(defaults.simulation_time_scale),
        })
    }

    pub fn notice_ttl(&self) -> chrono::Duration {
        chrono::Duration::from_std(self.notice_ttl).unwrap_or_else(|_| chrono::Duration::seconds(5))
    }
}

fn var(key: &str) -> Result<Option<String>, Error> {
    match env::var(key) {
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

fn parsed<T: FromStr>(key: &str) -> Result<Option<T>, Error> {
    var(key)?
        .map(|value| value.trim().parse().map_err(|_| config_error(key)))
        .transpose()
}

fn millis(key: &str) -> Result<Option<Duration>, Error> {
    Ok(parsed::<u64>(key)?.map(Duration::from_millis))
}

#[cfg(test)]
mod tests {
    use super::*;

    // one test so nothing else races on the process environment
    #[test]
    fn reads_environment_overrides() {
        env::set_var("OSRM_API_BASE", "osrm.internal:5000");
        env::set_var("FIX_TIMEOUT_MS", "2500");

        let config = Config::from_env().unwrap();

        assert_eq!(config.osrm_api_base, "osrm.internal:5000");
        assert_eq!(config.fix_timeout, Duration::from_millis(2500));
        assert_eq!(config.fix_maximum_age, Duration::from_millis(30_000));

        env::set_var("SIMULATION_TICK_MS", "soon");
        let err = Config::from_env().unwrap_err();
        assert_eq!(err, config_error("SIMULATION_TICK_MS"));

        env::remove_var("OSRM_API_BASE");
        env::remove_var("FIX_TIMEOUT_MS");
        env::remove_var("SIMULATION_TICK_MS");
    }
}
