//! Export core modules shared across CLI and WASM wrappers.

pub mod archive;
pub mod margin;
pub mod qr;

pub use archive::{
    build_archive, collect_archive, entry_file_name, ArchiveOutput, ARCHIVE_FILE_NAME,
    SINGLE_FILE_NAME,
};
pub use margin::{add_margin, parse_hex_color, MarginStyle, MAX_MARGIN};
pub use qr::{encode_png, render_qr, render_record, ErrorCorrection, QrStyle, MAX_QR_SIZE};
