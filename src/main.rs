use std::io;

use file_to_data_uri::action::cli::process_args;

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let output_dir = process_args(args)?;
    log::info!("Run finished, output directory: {}", output_dir);
    eprintln!("Hoàn tất! Kết quả nằm tại: {}", output_dir);
    Ok(())
}
