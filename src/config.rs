use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            log: LogConfig {
                level: "info".to_string(),
            },
        }
    }
}

impl AppConfig {
    /// 加载配置: 默认值 -> config/default.* (可选) -> 环境变量
    ///
    /// 环境变量: SERVER_HOST, SERVER_PORT, LOG_LEVEL
    pub fn load() -> Result<Self, ConfigError> {
        Self::builder(
            std::env::var("SERVER_HOST").ok(),
            std::env::var("SERVER_PORT").ok(),
            std::env::var("LOG_LEVEL").ok(),
        )?
        .try_deserialize()
    }

    fn builder(
        host: Option<String>,
        port: Option<String>,
        level: Option<String>,
    ) -> Result<Config, ConfigError> {
        let defaults = Self::default();
        Config::builder()
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", i64::from(defaults.server.port))?
            .set_default("log.level", defaults.log.level)?
            .add_source(File::with_name("config/default").required(false))
            .set_override_option("server.host", host)?
            .set_override_option("server.port", port)?
            .set_override_option("log.level", level)?
            .build()
    }

    /// 监听地址 "host:port"
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// 日志级别, 无法识别时返回 None
    pub fn log_level(&self) -> Option<tracing::Level> {
        self.log.level.parse().ok()
    }
}
