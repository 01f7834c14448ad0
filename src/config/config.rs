use clap::Parser;
use std::io;
use std::path::Path;

#[derive(Parser, Clone, Debug)]
#[command(
    name = "file_to_data_uri",
    about = "Chuyển đổi tệp thành Data URI (Base64) và mã HTML nhúng",
    long_about = "Mã hóa tệp thành Data URI base64 và tạo đoạn mã HTML nhúng tương ứng (img/audio/video hoặc liên kết tải xuống).\nMỗi tệp được ghi thành một trang HTML xem trước trong thư mục đầu ra, hoặc in ra màn hình với --stdout.\nChạy không có tham số để vào chế độ tương tác.",
    arg_required_else_help = true
)]
pub struct Cli {
    /// Files or directories to convert
    #[arg(required = true)]
    pub inputs: Vec<String>,
    #[arg(short, long, default_value = "output")]
    pub output: String,
    #[arg(long, default_value = "*", value_delimiter = ',')]
    pub include: Vec<String>,
    #[arg(long, value_delimiter = ',')]
    pub exclude: Option<Vec<String>>,
    /// Skip files larger than this many MB
    #[arg(long)]
    pub max_size: Option<f64>,
    /// Print the Data URI and HTML snippet instead of writing preview pages
    #[arg(long, default_value_t = false)]
    pub stdout: bool,
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,
    #[arg(long, default_value = "info", value_parser = ["debug", "info", "warn", "error"])]
    pub log_level: String,
    #[arg(long, default_value_t = false)]
    pub show_config: bool,
}

pub fn validate_input_path(input: &str) -> io::Result<&Path> {
    let path = Path::new(input);
    if !path.exists() {
        log::error!("Input path does not exist: {}", input);
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("Đường dẫn '{}' không tồn tại", input)
        ));
    }
    Ok(path)
}

pub fn is_valid_pattern(pattern: &str) -> bool {
    let invalid_chars = ['/', '\\', ':', '?', '"', '<', '>', '|'];
    !pattern.is_empty() && !pattern.contains(&invalid_chars[..])
}

pub fn validate_file_patterns(include: &[String], exclude: &Option<Vec<String>>) -> io::Result<()> {
    if include.is_empty() {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "Cần ít nhất một mẫu bao gồm"));
    }
    for pattern in include {
        if !is_valid_pattern(pattern) {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, format!("Mẫu bao gồm không hợp lệ: {}", pattern)));
        }
    }
    if let Some(exclude_patterns) = exclude {
        for pattern in exclude_patterns {
            if !is_valid_pattern(pattern) {
                return Err(io::Error::new(io::ErrorKind::InvalidInput, format!("Mẫu loại trừ không hợp lệ: {}", pattern)));
            }
        }
    }
    Ok(())
}
