// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is read from the environment once at startup into an
//! immutable [`RelayerConfig`], which is then shared by reference. Nothing
//! re-reads the environment after that.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `NETWORK` | Relay service network segment | `ropsten` |
//! | `CHAINID` | Chain ID bound into EIP-712 signatures | `3` |
//! | `ADMIN_PRIVATEKEY` | Administrative secp256k1 key (hex) | Required |
//! | `APIURL` | Relay service base URL | `https://api.rockside.io` |
//! | `APIKEY` | Relay service API key | empty |
//! | `FORWARDER` | Forwarder contract address | zero address |
//! | `GNOSIS_SAFE_PROXY_FACTORY` | Safe proxy factory address | Ropsten factory |
//! | `GNOSIS_SAFE_MASTERCOPY` | Safe master copy address | Ropsten master copy |
//! | `RPC` | Blockchain RPC endpoint | `http://localhost:8545` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8000` |
//! | `RPC_TIMEOUT_SECS` | Address prediction timeout | `10` |
//! | `RELAY_TIMEOUT_SECS` | Relay service request timeout | `15` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::{fmt, net::SocketAddr, str::FromStr, time::Duration};

use alloy::primitives::Address;
use url::Url;

use crate::blockchain::{ForwarderDomain, DEFAULT_PROXY_FACTORY, DEFAULT_SAFE_MASTER_COPY};

pub const NETWORK_ENV: &str = "NETWORK";
pub const CHAIN_ID_ENV: &str = "CHAINID";
pub const ADMIN_PRIVATE_KEY_ENV: &str = "ADMIN_PRIVATEKEY";
pub const RELAY_API_URL_ENV: &str = "APIURL";
pub const RELAY_API_KEY_ENV: &str = "APIKEY";
pub const FORWARDER_ENV: &str = "FORWARDER";
pub const PROXY_FACTORY_ENV: &str = "GNOSIS_SAFE_PROXY_FACTORY";
pub const SAFE_MASTER_COPY_ENV: &str = "GNOSIS_SAFE_MASTERCOPY";
pub const RPC_URL_ENV: &str = "RPC";
pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const RPC_TIMEOUT_ENV: &str = "RPC_TIMEOUT_SECS";
pub const RELAY_TIMEOUT_ENV: &str = "RELAY_TIMEOUT_SECS";

/// Environment variable selecting `json` or `pretty` log output.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";
/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

const DEFAULT_NETWORK: &str = "ropsten";
const DEFAULT_CHAIN_ID: u64 = 3;
const DEFAULT_RELAY_API_URL: &str = "https://api.rockside.io";
const DEFAULT_RPC_URL: &str = "http://localhost:8545";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_RPC_TIMEOUT_SECS: u64 = 10;
const DEFAULT_RELAY_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required configuration: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Raw admin key material. Never printed.
#[derive(Clone)]
pub struct AdminKey(String);

impl AdminKey {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AdminKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AdminKey(<redacted>)")
    }
}

/// Process-wide relayer configuration.
#[derive(Debug, Clone)]
pub struct RelayerConfig {
    /// Network segment in relay service URLs (e.g. `ropsten`)
    pub network: String,
    /// Chain ID bound into the EIP-712 domain
    pub chain_id: u64,
    pub admin_private_key: AdminKey,
    pub relay_api_url: Url,
    pub relay_api_key: String,
    /// Forwarder contract; also the EIP-712 verifying contract
    pub forwarder: Address,
    pub proxy_factory: Address,
    pub safe_master_copy: Address,
    pub rpc_url: Url,
    pub host: String,
    pub port: u16,
    pub rpc_timeout: Duration,
    pub relay_timeout: Duration,
}

impl RelayerConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let admin_private_key = get(ADMIN_PRIVATE_KEY_ENV)
            .map(AdminKey)
            .ok_or(ConfigError::Missing(ADMIN_PRIVATE_KEY_ENV))?;

        Ok(Self {
            network: get(NETWORK_ENV).unwrap_or_else(|| DEFAULT_NETWORK.to_string()),
            chain_id: parse_or(get(CHAIN_ID_ENV), CHAIN_ID_ENV, DEFAULT_CHAIN_ID)?,
            admin_private_key,
            relay_api_url: parse_or_else(get(RELAY_API_URL_ENV), RELAY_API_URL_ENV, || {
                Url::parse(DEFAULT_RELAY_API_URL)
            })?,
            relay_api_key: get(RELAY_API_KEY_ENV).unwrap_or_default(),
            forwarder: parse_or(get(FORWARDER_ENV), FORWARDER_ENV, Address::ZERO)?,
            proxy_factory: parse_or(get(PROXY_FACTORY_ENV), PROXY_FACTORY_ENV, DEFAULT_PROXY_FACTORY)?,
            safe_master_copy: parse_or(
                get(SAFE_MASTER_COPY_ENV),
                SAFE_MASTER_COPY_ENV,
                DEFAULT_SAFE_MASTER_COPY,
            )?,
            rpc_url: parse_or_else(get(RPC_URL_ENV), RPC_URL_ENV, || Url::parse(DEFAULT_RPC_URL))?,
            host: get(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_or(get(PORT_ENV), PORT_ENV, DEFAULT_PORT)?,
            rpc_timeout: Duration::from_secs(parse_or(
                get(RPC_TIMEOUT_ENV),
                RPC_TIMEOUT_ENV,
                DEFAULT_RPC_TIMEOUT_SECS,
            )?),
            relay_timeout: Duration::from_secs(parse_or(
                get(RELAY_TIMEOUT_ENV),
                RELAY_TIMEOUT_ENV,
                DEFAULT_RELAY_TIMEOUT_SECS,
            )?),
        })
    }

    /// EIP-712 domain the admin signs under.
    pub fn domain(&self) -> ForwarderDomain {
        ForwarderDomain {
            verifying_contract: self.forwarder,
            chain_id: self.chain_id,
        }
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                name: HOST_ENV,
                reason: e.to_string(),
            })
    }
}

fn parse_or<T>(raw: Option<String>, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    parse_or_else(raw, name, || Ok::<_, T::Err>(default))
}

fn parse_or_else<T, D>(raw: Option<String>, name: &'static str, default: D) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
    D: FnOnce() -> Result<T, T::Err>,
{
    let parsed = match raw {
        Some(value) => value.parse::<T>(),
        None => default(),
    };
    parsed.map_err(|e| ConfigError::Invalid {
        name,
        reason: e.to_string(),
    })
}
