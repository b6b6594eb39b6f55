mod client;

pub use client::NostrTransport;
