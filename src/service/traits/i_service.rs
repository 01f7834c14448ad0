use std::io;
use std::path::Path;
use crate::models::conversion::ConversionResult;
use crate::models::file::{FileCollectInput, FileCollectOutput, UploadedFile};
use crate::models::page::{PageRenderInput, PageRenderOutput};

// Giao diện dịch vụ tệp, phụ trách đọc và thu thập tệp
pub trait FileServiceTrait: Send + Sync {
    /// Đọc toàn bộ tệp vào bộ nhớ
    /// # Tham số
    /// - path: đường dẫn tệp cần đọc
    /// # Trả về
    /// - Thành công trả về nội dung byte của tệp, thất bại trả về lỗi IO
    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Thu thập các tệp khớp mẫu và giới hạn kích thước
    /// # Tham số
    /// - input: tham số đầu vào cho việc thu thập tệp
    /// # Trả về
    /// - Thành công trả về danh sách tệp và tổng kích thước, thất bại trả về lỗi IO
    fn collect_files(&self, input: FileCollectInput) -> io::Result<FileCollectOutput>;
}

// Giao diện dịch vụ mã hóa, một tệp vào một kết quả ra
pub trait EncoderServiceTrait: Send + Sync {
    /// Chuyển tệp đã chọn (hoặc không có tệp) thành Data URI và mã HTML nhúng
    /// # Tham số
    /// - file: tệp được chọn, `None` khi chưa tải lên tệp nào
    /// # Trả về
    /// - Luôn trả về một [`ConversionResult`]; lỗi đọc hoặc mã hóa nằm trong `ConversionResult::Failure`
    fn convert(&self, file: Option<&UploadedFile>) -> ConversionResult;
}

// Giao diện dịch vụ trang, phụ trách ghi trang xem trước HTML
pub trait PageServiceTrait: Send + Sync {
    /// Tạo và ghi trang xem trước độc lập
    /// # Tham số
    /// - input: đường dẫn trang, thông tin tệp, Data URI và mã HTML nhúng
    /// # Trả về
    /// - Thành công trả về đường dẫn trang đã ghi, thất bại trả về lỗi IO
    fn write_page(&self, input: PageRenderInput) -> io::Result<PageRenderOutput>;
}
