#![allow(dead_code)]

pub mod harness;
pub mod http_client;

/// A 12-word phrase whose first word is `prefix`.
pub fn twelve(prefix: &str) -> String {
    format!("{prefix} alpha bravo charlie delta echo foxtrot golf hotel india juliet kilo")
}
