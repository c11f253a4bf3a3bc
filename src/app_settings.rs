use std::fs;
use std::path::{Path, PathBuf};

use caption_core::TtmlParsingOptions;
use clap::ValueEnum;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{AppError, AppResult};

/// 转换结果的输出格式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Vtt,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// `RUST_LOG` 未设置时使用的过滤规则，语法与 `EnvFilter` 相同。
    pub console_log_level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            console_log_level: "warn".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub log_settings: LogSettings,
    pub output_format: OutputFormat,
    pub parsing: TtmlParsingOptions,
}

/// 加载配置时遇到的问题。
///
/// 加载发生在日志系统初始化之前，所以这些问题由调用方在初始化之后再记录。
#[derive(Debug, Error)]
pub enum SettingsIssue {
    #[error("无法获取项目配置目录路径")]
    NoConfigDir,

    #[error("无法创建配置目录 {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("读取配置文件 {path:?} 失败: {source}。将使用默认配置")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("解析 JSON 配置文件 {path:?} 失败: {source}。将使用默认配置")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("无法保存初始默认配置文件 {path:?}: {source}")]
    Save { path: PathBuf, source: AppError },
}

impl AppSettings {
    pub fn config_dir() -> Result<PathBuf, SettingsIssue> {
        let proj_dirs =
            ProjectDirs::from("com", "Unilyric", "unicaption").ok_or(SettingsIssue::NoConfigDir)?;
        let config_dir = proj_dirs.config_dir();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(|source| SettingsIssue::CreateDir {
                path: config_dir.to_path_buf(),
                source,
            })?;
        }
        Ok(config_dir.to_path_buf())
    }

    fn config_file_path() -> Result<PathBuf, SettingsIssue> {
        Self::config_dir().map(|dir| dir.join("unicaption.json"))
    }

    /// 从平台配置目录加载设置，同时返回加载过程中遇到的问题。
    pub fn load() -> (Self, Vec<SettingsIssue>) {
        match Self::config_file_path() {
            Ok(path) => Self::load_from(&path),
            Err(issue) => (Self::default(), vec![issue]),
        }
    }

    /// 文件无法读取或解析时使用默认设置；文件不存在时还会把默认设置写入该路径。
    pub fn load_from(path: &Path) -> (Self, Vec<SettingsIssue>) {
        if path.exists() {
            let settings = fs::read_to_string(path)
                .map_err(|source| SettingsIssue::Read {
                    path: path.to_path_buf(),
                    source,
                })
                .and_then(|content| {
                    Self::from_json(&content).map_err(|source| SettingsIssue::Parse {
                        path: path.to_path_buf(),
                        source,
                    })
                });
            return match settings {
                Ok(settings) => (settings, Vec::new()),
                Err(issue) => (Self::default(), vec![issue]),
            };
        }

        let default_settings = Self::default();
        let issues = default_settings
            .save_to(path)
            .err()
            .map(|source| SettingsIssue::Save {
                path: path.to_path_buf(),
                source,
            })
            .into_iter()
            .collect();
        (default_settings, issues)
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        let json_string = serde_json::to_string_pretty(self)?;
        fs::write(path, json_string)?;
        tracing::info!("[Settings] 设置已成功保存到 {path:?}");
        Ok(())
    }
}
