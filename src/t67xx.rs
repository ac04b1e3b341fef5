// Copyright 2026, the t67xx_i2c authors
//
// Licensed under the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>,
// This file may not be copied, modified, or distributed
// except according to those terms.

use i2cdev::core::I2CDevice;
use i2cdev::linux::{LinuxI2CDevice, LinuxI2CError};
use log::debug;
use std::fmt::Debug;
use std::path::Path;
use std::{thread, time};

use crate::bitmask::{BitValue, Bitmask};

/// Factory default I2C address of the T67XX modules.
pub const DEFAULT_ADDRESS: u16 = 0x21;

/// Known bits of the status register, in the order the application note
/// lists them.
pub const STATUS_BITS: [BitValue; 8] = [
    BitValue {
        value: 0x1,
        description: "Error condition",
    },
    BitValue {
        value: 0x2,
        description: "Flash error",
    },
    BitValue {
        value: 0x4,
        description: "Calibration error",
    },
    BitValue {
        value: 0x100,
        description: "RS-232",
    },
    BitValue {
        value: 0x200,
        description: "RS-485",
    },
    BitValue {
        value: 0x400,
        description: "I2C",
    },
    BitValue {
        value: 0x800,
        description: "Warm-up mode",
    },
    BitValue {
        value: 0x8000,
        description: "Single point calibration",
    },
];

// How long to sleep after sending a command before the sensor response
// should be read. From the datasheet:
//
//   "It is suggested that the master send the request, wait 5 to 10
//    milliseconds and then ask for the response. This time does depend on
//    bus loading and board layout but carefully constructed test setups
//    have demonstrated that the sensor can respond within 1 millisecond in
//    controlled conditions with a data rate of 100kbps. The suggested
//    delay of 10 milliseconds should be adequate for almost all
//    conceivable cases"
const COMMAND_SLEEP: time::Duration = time::Duration::from_millis(10);

// Protocol-mandated settle time around an address change: one second for
// the EEPROM commit after the address write, another for the reboot after
// the reset.
const ADDRESS_SETTLE: time::Duration = time::Duration::from_secs(1);

///
/// T67XX error enum, generic over the error type of the underlying bus.
/// Bus failures are propagated unmodified; the driver performs no retries.
///
#[derive(Debug, thiserror::Error)]
pub enum T67xxError<E: Debug> {
    /// The underlying I2C write or read failed.
    #[error("bus I/O error: {0:?}")]
    Bus(E),
    /// The requested I2C address is outside the range the sensor accepts.
    #[error("address should be in the range 0x03 -> 0x77, you requested address {0:#04x}")]
    AddressOutOfRange(u8),
}

/// T67XX struct, wraps an I2C device handle and has implemented the
/// sensor command set.
///
/// The driver assumes exclusive use of the handle: every operation is a
/// write followed by a settle sleep and a read, and interleaving a second
/// operation on the same handle corrupts the response framing. Callers
/// that share a sensor between threads must serialize access themselves.
pub struct T67xx<D: I2CDevice> {
    pub i2cdev: D,
}

impl T67xx<LinuxI2CDevice> {
    /// Open the sensor on a Linux I2C character device, e.g.
    /// `/dev/i2c-1`, at the given slave address (factory default
    /// [`DEFAULT_ADDRESS`]).
    ///
    pub fn new(path: impl AsRef<Path>, address: u16) -> Result<Self, LinuxI2CError> {
        let device = LinuxI2CDevice::new(path, address)?;
        Ok(T67xx { i2cdev: device })
    }
}

impl<D: I2CDevice> T67xx<D> {
    /// Wrap an already-open bus handle.
    pub fn with_device(device: D) -> Self {
        T67xx { i2cdev: device }
    }

    /// Get the CO₂ concentration in parts per million measured on the
    /// sensor.
    ///
    pub fn gas_ppm(&mut self) -> Result<u16, T67xxError<D::Error>> {
        let buffer: [u8; 5] = [0x04, 0x13, 0x8b, 0x00, 0x01];
        self.i2cdev.write(&buffer).map_err(T67xxError::Bus)?;

        thread::sleep(COMMAND_SLEEP);

        let mut data_buffer: [u8; 4] = [0; 4];
        self.i2cdev
            .read(&mut data_buffer)
            .map_err(T67xxError::Bus)?;

        Ok(data_buffer[2] as u16 * 256 + data_buffer[3] as u16)
    }

    /// Query the firmware version register.
    ///
    /// The chip does not return a usable version over I2C, so after a
    /// successful read this always reports 1. The raw bytes are logged at
    /// debug level for whoever wants to stare at them.
    ///
    pub fn firmware_version(&mut self) -> Result<u16, T67xxError<D::Error>> {
        let buffer: [u8; 5] = [0x04, 0x13, 0x89, 0x00, 0x01];
        self.i2cdev.write(&buffer).map_err(T67xxError::Bus)?;

        thread::sleep(COMMAND_SLEEP);

        let mut data_buffer: [u8; 4] = [0; 4];
        self.i2cdev
            .read(&mut data_buffer)
            .map_err(T67xxError::Bus)?;

        debug!("Read firmware version bytes: {:?}", data_buffer);

        Ok(1)
    }

    /// Read the status register as a [`Bitmask`].
    ///
    /// Decode it against [`STATUS_BITS`], or use
    /// [`status_descriptions`](Self::status_descriptions) directly.
    ///
    pub fn status(&mut self) -> Result<Bitmask, T67xxError<D::Error>> {
        let buffer: [u8; 4] = [0x04, 0x13, 0x8a, 0x00];
        self.i2cdev.write(&buffer).map_err(T67xxError::Bus)?;

        thread::sleep(COMMAND_SLEEP);

        let mut data_buffer: [u8; 2] = [0; 2];
        self.i2cdev
            .read(&mut data_buffer)
            .map_err(T67xxError::Bus)?;

        debug!("Read status bytes: {:?}", data_buffer);

        Ok(Bitmask(u16::from_be_bytes(data_buffer)))
    }

    /// Read the status register and return the descriptions of the bits
    /// that are set, in the order of [`STATUS_BITS`].
    ///
    pub fn status_descriptions(&mut self) -> Result<Vec<&'static str>, T67xxError<D::Error>> {
        let status = self.status()?;
        Ok(status.list_descriptions(&STATUS_BITS))
    }

    /// Reset the sensor. Fire-and-forget: you will need to make sure the
    /// sensor is available again before requesting a new reading.
    ///
    pub fn reset(&mut self) -> Result<(), T67xxError<D::Error>> {
        let buffer: [u8; 5] = [0x05, 0x03, 0xe8, 0xff, 0x00];
        self.i2cdev.write(&buffer).map_err(T67xxError::Bus)
    }

    /// Enable ABC calibration. From the datasheet:
    ///
    ///   "ABC LOGIC™ Automatic Background Logic, or ABC Logic™, is a
    ///    patented self-calibration technique that is designed to be used
    ///    in applications where concentrations will drop to outside
    ///    ambient conditions (400 ppm) at least three times in 7 days,
    ///    typically during unoccupied periods. Full accuracy to be
    ///    achieved utilizing ABC Logic™. With ABC Logic™ enabled, the
    ///    sensor will typically reach its operational accuracy after 24
    ///    hours of continuous operation at a condition that it was exposed
    ///    to ambient reference levels of air at 400 ppm CO2."
    ///
    pub fn enable_abc(&mut self) -> Result<(), T67xxError<D::Error>> {
        let buffer: [u8; 5] = [0x05, 0x03, 0xee, 0xff, 0x00];
        self.i2cdev.write(&buffer).map_err(T67xxError::Bus)
    }

    /// Change the I2C address of the sensor.
    ///
    /// Valid addresses are 0x03 through 0x77 inclusive; anything else is
    /// rejected before a single byte is written. On success the new
    /// address is committed to EEPROM and the sensor is reset, which takes
    /// about two seconds of mandated settle time. The sensor answers on
    /// the new address afterwards, so reopen the handle to keep talking
    /// to it.
    ///
    pub fn set_address(&mut self, address: u8) -> Result<(), T67xxError<D::Error>> {
        if !(0x03..=0x77).contains(&address) {
            return Err(T67xxError::AddressOutOfRange(address));
        }

        debug!("Changing sensor address to {:#04x}", address);

        let buffer: [u8; 5] = [0x06, 0x0f, 0xa5, 0x00, address];
        self.i2cdev.write(&buffer).map_err(T67xxError::Bus)?;

        // EEPROM commit
        thread::sleep(ADDRESS_SETTLE);

        self.reset()?;

        // Reboot
        thread::sleep(ADDRESS_SETTLE);

        Ok(())
    }
}
