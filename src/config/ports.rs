use std::io;
use crate::models::conversion::ConversionOutput;

// Cấu hình hiệu lực của một lượt chạy
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub inputs: Vec<String>,
    pub output: String,
    pub include: Vec<String>,
    pub exclude: Option<Vec<String>>,
    pub max_size: Option<f64>,
    pub no_progress: bool,
    pub to_stdout: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            inputs: Vec::new(),
            output: "output".to_string(),
            include: vec!["*".to_string()],
            exclude: None,
            max_size: None,
            no_progress: false,
            to_stdout: false,
        }
    }
}

// Port cho nguồn cấu hình
pub trait ConfigPort {
    /// Lấy cấu hình từ nguồn (dòng lệnh hoặc chế độ tương tác)
    /// # Trả về
    /// - Thành công trả về [`AppConfig`], thất bại trả về lỗi IO
    fn get_config(&self) -> io::Result<AppConfig>;
}

// Port thực thi chuyển đổi
pub trait ConversionPort {
    /// Thực thi một lượt chuyển đổi theo cấu hình
    /// # Tham số
    /// - config: cấu hình hiệu lực của lượt chạy
    /// # Trả về
    /// - Thành công trả về kết quả chuyển đổi, thất bại trả về lỗi IO
    fn execute(&self, config: AppConfig) -> io::Result<ConversionOutput>;
}
