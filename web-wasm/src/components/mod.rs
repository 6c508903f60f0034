pub mod bulk_upload;
pub mod header;
pub mod progress_bar;
pub mod qr_grid;
pub mod single_form;
