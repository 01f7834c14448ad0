use std::io;
use crate::models::conversion::{ConversionInput, ConversionOutput};

// Giao diện facade điều phối một lượt chuyển đổi: thu thập, mã hóa, ghi trang
pub trait ConversionFacadeTrait: Send + Sync {
    /// Chuyển đổi mọi tệp được chọn bởi `input`
    /// # Tham số
    /// - input: danh sách đầu vào, thư mục kết quả, mẫu lọc và các tùy chọn
    /// # Trả về
    /// - Thành công trả về số tệp đã xử lý, số tệp lỗi và kết quả từng tệp;
    ///   lỗi của từng tệp nằm trong kết quả, `Err` chỉ khi cả lượt không thể chạy
    fn execute_conversion(&self, input: ConversionInput) -> io::Result<ConversionOutput>;
}
