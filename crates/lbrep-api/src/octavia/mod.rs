// Octavia v2: the successor load-balancing service we write to.

pub mod client;
pub mod models;

pub use client::OctaviaClient;
