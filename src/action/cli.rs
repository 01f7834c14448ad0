use std::io;
use clap::Parser;
use crate::action::interactive::process_interactive_mode;
use crate::config::config::{validate_file_patterns, validate_input_path, Cli};
use crate::config::ports::{AppConfig, ConfigPort, ConversionPort};
use crate::facade::conversion_facade::ConversionAdapter;
use crate::models::conversion::ConversionOutput;
use crate::service::config_service::ConfigService;
use crate::utils::utils::setup_logging;

pub fn process_args(args: Vec<String>) -> io::Result<String> {
    if args.len() == 1 {
        process_interactive_mode()
    } else {
        process_cli_mode()
    }
}

pub fn process_cli_mode() -> io::Result<String> {
    let cli = Cli::parse();
    setup_logging(&cli.log_level)?;

    let config_service = ConfigService::new(Box::new(CliConfigAdapter::new(cli.clone())));
    let config = config_service.get_config()?;

    let conversion_port: Box<dyn ConversionPort> = Box::new(ConversionAdapter);
    let output = conversion_port.execute(config.clone())?;

    if config.to_stdout {
        print_outcomes(&output);
    } else {
        print_summary(&output);
    }

    if cli.show_config {
        println!("Cấu hình thực tế: {:#?}", config);
    }

    Ok(output.output_path)
}

fn print_outcomes(output: &ConversionOutput) {
    for outcome in &output.outcomes {
        let (data_uri, html_code) = outcome.result.outputs();
        println!("=== {}", outcome.path.display());
        println!("{}", data_uri);
        if !html_code.is_empty() {
            println!();
            println!("{}", html_code);
        }
        println!();
    }
}

fn print_summary(output: &ConversionOutput) {
    for outcome in &output.outcomes {
        match &outcome.page_path {
            Some(page) => println!("✔ {} → {}", outcome.path.display(), page),
            None => println!("✘ {}: {}", outcome.path.display(), outcome.result.outputs().0),
        }
    }
    println!(
        "Đã chuyển đổi {} tệp, {} lỗi",
        output.processed_files, output.failed_files
    );
}

// CLI configuration adapter
pub struct CliConfigAdapter {
    cli: Cli,
}

impl CliConfigAdapter {
    pub fn new(cli: Cli) -> Self {
        CliConfigAdapter { cli }
    }
}

impl ConfigPort for CliConfigAdapter {
    fn get_config(&self) -> io::Result<AppConfig> {
        for input in &self.cli.inputs {
            validate_input_path(input)?;
        }
        validate_file_patterns(&self.cli.include, &self.cli.exclude)?;
        if let Some(max) = self.cli.max_size {
            if !(max > 0.0) {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("--max-size phải lớn hơn 0, nhận được {}", max),
                ));
            }
        }

        Ok(AppConfig {
            inputs: self.cli.inputs.clone(),
            output: self.cli.output.clone(),
            include: self.cli.include.clone(),
            exclude: self.cli.exclude.clone(),
            max_size: self.cli.max_size,
            no_progress: self.cli.no_progress,
            to_stdout: self.cli.stdout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn adapter(args: &[&str]) -> CliConfigAdapter {
        CliConfigAdapter::new(Cli::try_parse_from(args).unwrap())
    }

    #[test]
    fn maps_cli_into_config() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("cat.png");
        fs::write(&file, b"x").unwrap();
        let file = file.to_string_lossy().to_string();

        let config = adapter(&["file_to_data_uri", &file, "-o", "pages", "--stdout", "--max-size", "2"])
            .get_config()
            .unwrap();
        assert_eq!(config.inputs, vec![file]);
        assert_eq!(config.output, "pages");
        assert!(config.to_stdout);
        assert_eq!(config.max_size, Some(2.0));
    }

    #[test]
    fn rejects_missing_input() {
        let err = adapter(&["file_to_data_uri", "/no/such/file.png"]).get_config().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn rejects_non_positive_max_size() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().to_string_lossy().to_string();
        let err = adapter(&["file_to_data_uri", &input, "--max-size", "0"]).get_config().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
