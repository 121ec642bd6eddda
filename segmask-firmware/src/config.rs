//! Display settings validated from display.toml by build.rs

include!(concat!(env!("OUT_DIR"), "/display_config.rs"));
