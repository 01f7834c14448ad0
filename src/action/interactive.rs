use dialoguer::{Confirm, Input};
use std::fs;
use std::io;
use std::path::Path;

use crate::config::ports::{AppConfig, ConfigPort};
use crate::facade::conversion_facade::page_path_for;
use crate::facade::events::{EventGraph, FormState, Trigger};
use crate::models::file::UploadedFile;
use crate::models::page::PageRenderInput;
use crate::service::config_service::ConfigService;
use crate::service::encoder::EncoderService;
use crate::service::file::FileService;
use crate::service::page::PageService;
use crate::service::traits::i_service::PageServiceTrait;
use crate::utils::utils::setup_logging;

pub fn process_interactive_mode() -> io::Result<String> {
    println!("=== 🔄 Chuyển đổi Tệp thành Data URI (Base64) và Mã HTML Nhúng ===");
    let config_service = ConfigService::new(Box::new(InteractiveConfigAdapter));
    let config = config_service.get_config()?;

    let graph = EventGraph::new(Box::new(EncoderService::new(Box::new(FileService::new()))));
    let page_service = PageService::new();
    let mut state = FormState::default();

    loop {
        let file = get_file_selection()?;
        graph.dispatch(&mut state, Trigger::FileChanged(file.clone()));
        show_state(&state);

        if let Some(file) = file.filter(|_| !state.html_code.is_empty()) {
            if get_save_page_option()? {
                let page = save_page(&page_service, &config.output, &file, &state)?;
                println!("Đã lưu trang xem trước: {}", page);
            }
        }

        if !get_continue_option()? {
            break;
        }
    }

    Ok(config.output)
}

fn show_state(state: &FormState) {
    println!("\n--- Data URI (Chuỗi Base64) ---\n{}", state.data_uri);
    println!("\n--- Mã HTML Nhúng ---\n{}", state.html_code);
    println!("\n--- 🔍 Kết quả Xem trước (Không phải là HTML code) ---\n{}\n", state.preview);
}

fn save_page(
    page_service: &PageService,
    output_dir: &str,
    file: &UploadedFile,
    state: &FormState,
) -> io::Result<String> {
    let root = file.path().parent().unwrap_or_else(|| Path::new(""));
    let file_size = fs::metadata(file.path()).map(|m| m.len() as usize).unwrap_or(0);
    let output = page_service.write_page(PageRenderInput {
        page_path: page_path_for(output_dir, root, file.path()),
        file_name: file.file_name(),
        file_size,
        data_uri: state.data_uri.clone(),
        html_snippet: state.html_code.clone(),
    })?;
    Ok(output.html_file_path)
}

/// An empty answer means no file is selected.
pub fn get_file_selection() -> io::Result<Option<UploadedFile>> {
    let answer: String = Input::new()
        .with_prompt("Tải lên Tệp (Ảnh, Video, Âm thanh,...): nhập đường dẫn, để trống nếu không chọn")
        .allow_empty(true)
        .interact_text()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("Nhập đường dẫn thất bại: {}", e)))?;
    let answer = answer.trim();
    Ok(if answer.is_empty() { None } else { Some(UploadedFile::new(answer)) })
}

pub fn get_output_path() -> io::Result<String> {
    Input::new()
        .with_prompt("Thư mục lưu trang xem trước (mặc định: output)")
        .default("output".to_string())
        .interact_text()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))
}

pub fn get_save_page_option() -> io::Result<bool> {
    Confirm::new()
        .with_prompt("Lưu trang HTML xem trước?")
        .default(false)
        .interact()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("Lựa chọn thất bại: {}", e)))
}

pub fn get_continue_option() -> io::Result<bool> {
    Confirm::new()
        .with_prompt("Chuyển đổi tệp khác?")
        .default(true)
        .interact()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("Lựa chọn thất bại: {}", e)))
}

// Interactive configuration adapter
pub struct InteractiveConfigAdapter;

impl ConfigPort for InteractiveConfigAdapter {
    fn get_config(&self) -> io::Result<AppConfig> {
        let output = get_output_path()?;
        setup_logging("info")?;
        Ok(AppConfig {
            output,
            ..AppConfig::default()
        })
    }
}
