//! DNS registration for remote access
//!
//! One-shot Cloudflare plumbing used by the `backup-monitor-dns` binary:
//! zone lookup, public IP lookup, and A-record upsert.

mod client;

pub use client::*;
