// Copyright 2026, the t67xx_i2c authors
//
// Licensed under the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>,
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Driver for the Telaire T67XX family of I2C CO₂ sensors
//!
//! Operations taken from the Amphenol [application note](https://www.amphenol-sensors.com/hubfs/Documents/AAS-916-127J-Telaire-T6700-CO2-Sensor-Module-022719-web.pdf)
//! for the T6700 series modules. The sensor speaks a fixed request/response
//! protocol: write a command, wait 10 ms for the module to prepare its
//! answer, then read a fixed-length response.
//!
//! **IMPORTANT**
//! The sensor needs 10 minutes of operation after power-on before its
//! readings reach full accuracy. The [`accuracy`] module predicts that
//! point from the system boot time (Linux only, via `/proc/stat`), on the
//! assumption that the sensor was powered together with the host and has
//! not been power-cycled since.
//!
//! Diagnostics are emitted through the [`log`] facade at debug level;
//! nothing here depends on a logger being installed.
//!
//! ## Basic Example
//!
//! Enabling background calibration, then reading CO₂ once the sensor is
//! trustworthy. The warm-up wait runs on its own thread so the read loop
//! is not stalled for up to 10 minutes.
//!
//!```no_run
//!use t67xx_i2c::accuracy::Accuracy;
//!use t67xx_i2c::t67xx::{T67xx, DEFAULT_ADDRESS};
//!use std::sync::mpsc;
//!use std::thread;
//!use std::time::Duration;
//!
//!fn main() {
//!    // Open the I2C device
//!    let mut sensor = T67xx::new("/dev/i2c-1", DEFAULT_ADDRESS).unwrap();
//!    sensor.enable_abc().unwrap();
//!
//!    // The channel disconnects once the warm-up wait finishes.
//!    let (ready_tx, ready_rx) = mpsc::channel::<()>();
//!    thread::spawn(move || {
//!        Accuracy::new().wait_until_fully_accurate().unwrap();
//!        drop(ready_tx);
//!    });
//!
//!    loop {
//!        match ready_rx.try_recv() {
//!            Err(mpsc::TryRecvError::Disconnected) => {
//!                let ppm = sensor.gas_ppm().unwrap();
//!                println!("CO2: {} ppm", ppm);
//!            }
//!            _ => println!("Sensor still warming up, discarding reading"),
//!        }
//!        thread::sleep(Duration::from_secs(10));
//!    }
//!}
//!```
//!

/// Warm-up timing model predicting when readings reach full accuracy
pub mod accuracy;
/// Generic bitmask decoding against an ordered value/description table
pub mod bitmask;
/// T67XX device related operations
pub mod t67xx;
