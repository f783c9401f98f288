//! Scanner
//!
//! Entrada de escaneo QR del checkpoint.

pub mod scan_stream;

pub use scan_stream::{decode_scan, scan_channel, FrameDecode, ScanFeed, ScanStream};
