pub mod csv_write;
pub mod fetch;
pub mod html;
