mod app;
mod app_settings;
mod cli;
mod error;
mod logger;

use std::process::ExitCode;

use clap::Parser;

use crate::app::{ConversionRequest, convert, read_input};
use crate::app_settings::AppSettings;
use crate::cli::Cli;
use crate::error::AppResult;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let (app_settings, settings_issues) = AppSettings::load();

    logger::init_global_logger(&app_settings.log_settings.console_log_level, cli.verbose);
    for issue in &settings_issues {
        tracing::warn!("[Settings] {issue}");
    }
    tracing::debug!("unicaption 已启动，输入: {:?}", cli.input);

    match run(&cli, &app_settings) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("转换失败: {e}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, settings: &AppSettings) -> AppResult<String> {
    let request = ConversionRequest::from_cli(cli, settings)?;
    let content = read_input(&cli.input)?;
    convert(&content, &request)
}
