//! 统一配置中心
//!
//! 提供应用的全局配置管理，包括：
//! - HTTP 服务设置
//! - 自动化流程的模拟延迟
//! - 通知广播设置

use serde::{Deserialize, Serialize};
use std::env;

/// 全局应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// 服务配置
    pub server: ServerConfig,
    /// 自动化流程配置
    pub automation: AutomationConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// 自动化流程配置
///
/// 预约与验证码流程目前由模拟实现承载，延迟用于模拟真实的
/// 浏览器自动化耗时。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutomationConfig {
    pub booking_delay_ms: u64,
    pub captcha_delay_ms: u64,
}

impl AppConfig {
    /// 从环境变量加载配置（严格模式）
    /// 数值型变量格式非法时返回错误，而不是悄悄退回默认值
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match env::var("SERVER_PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidServerPort(raw))?,
            Err(_) => 8080,
        };

        Ok(Self {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port,
            },
            automation: AutomationConfig {
                booking_delay_ms: parse_env_strict("BOOKING_DELAY_MS", 2000)?,
                captcha_delay_ms: parse_env_strict("CAPTCHA_DELAY_MS", 1000)?,
            },
        })
    }

    /// 从环境变量加载配置，开发环境版本
    /// 非法值回退到默认值，仅用于测试和开发
    pub fn from_env_with_defaults() -> Self {
        Self {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: env::var("SERVER_PORT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(8080),
            },
            automation: AutomationConfig {
                booking_delay_ms: env::var("BOOKING_DELAY_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(2000),
                captcha_delay_ms: env::var("CAPTCHA_DELAY_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(1000),
            },
        }
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.is_empty() {
            return Err(ConfigError::InvalidServerConfig(
                "Server host cannot be empty".to_string(),
            ));
        }

        if self.server.port == 0 {
            return Err(ConfigError::InvalidServerPort("0".to_string()));
        }

        // 模拟延迟为 0 会让状态机的 RUNNING 窗口在观察者眼中消失
        if self.automation.booking_delay_ms == 0 {
            return Err(ConfigError::InvalidAutomationConfig(
                "Booking delay must be greater than 0".to_string(),
            ));
        }

        if self.automation.captcha_delay_ms == 0 {
            return Err(ConfigError::InvalidAutomationConfig(
                "Captcha delay must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

fn parse_env_strict(name: &str, default: u64) -> Result<u64, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| ConfigError::InvalidAutomationConfig(format!("{}={}", name, raw))),
        Err(_) => Ok(default),
    }
}

/// 配置错误类型
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid server port: {0}")]
    InvalidServerPort(String),
    #[error("Invalid server configuration: {0}")]
    InvalidServerConfig(String),
    #[error("Invalid automation configuration: {0}")]
    InvalidAutomationConfig(String),
    #[error("Environment variable error: {0}")]
    EnvVarError(#[from] std::env::VarError),
}

impl Default for AppConfig {
    /// 默认配置使用开发环境版本
    fn default() -> Self {
        Self::from_env_with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_config_from_env_with_defaults() {
        let config = AppConfig::from_env_with_defaults();
        assert!(!config.server.host.is_empty());
        assert!(config.server.port > 0);
        assert!(config.automation.booking_delay_ms > 0);
        assert!(config.automation.captcha_delay_ms > 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_env_rejects_malformed_delay() {
        env::set_var("BOOKING_DELAY_MS", "not-a-number");

        let result = AppConfig::from_env();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidAutomationConfig(_))
        ));

        env::remove_var("BOOKING_DELAY_MS");
    }

    #[test]
    fn test_config_validation_rejects_zero_values() {
        let mut config = AppConfig::from_env_with_defaults();

        config.server.port = 0;
        assert!(config.validate().is_err());
        config.server.port = 8080;

        config.automation.booking_delay_ms = 0;
        assert!(config.validate().is_err());
        config.automation.booking_delay_ms = 2000;

        config.automation.captcha_delay_ms = 0;
        assert!(config.validate().is_err());
        config.automation.captcha_delay_ms = 1000;

        assert!(config.validate().is_ok());
    }
}
