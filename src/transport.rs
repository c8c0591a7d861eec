//! Byte level register access to the touch controller.
//!
//! The driver only needs two things from the bus: writing a single register and
//! reading a single register back. [`Transport`] captures that, and [`I2cTransport`]
//! implements it on top of any blocking `embedded_hal` I2C bus.
//!
//! A bus shared with other devices is handed over as a `shared_bus` proxy, which locks
//! the bus for each transaction and releases it when the transaction returns.
use std::fmt;

use embedded_hal::blocking::i2c::{Write, WriteRead};
use thiserror::Error;

use crate::regs;

/// Addressed single byte register access.
pub trait Transport {
    type Error: fmt::Debug;

    /// Writes `value` to `register` as one `[register, value]` frame.
    fn write(&mut self, register: u8, value: u8) -> Result<(), Self::Error>;

    /// Writes `[register]` and reads one byte back in the same transaction.
    fn read_register(&mut self, register: u8) -> Result<u8, Self::Error>;
}

#[derive(Debug, Error)]
pub enum TransportError<E> {
    #[error("Writing register {register:#04X} failed. {bus:?}")]
    Write { register: u8, bus: E },
    #[error("Reading register {register:#04X} failed. {bus:?}")]
    Read { register: u8, bus: E },
    #[cfg(feature = "rpi")]
    #[error("Couldn't open the I2C bus. {0:?}")]
    Open(E),
}

/// A transport owning its I2C bus.
pub struct I2cTransport<I> {
    bus: I,
    address: u8,
}

impl<I> I2cTransport<I> {
    /// Uses the default CST816 address, `0x15`.
    pub fn new(bus: I) -> Self {
        Self::with_address(bus, regs::CST816_ADDR)
    }

    /// Useful if the chip sits behind an address translator or a board strapped
    /// it differently.
    pub fn with_address(bus: I, address: u8) -> Self {
        I2cTransport { bus, address }
    }

    /// The 7-bit address frames are sent to.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Gives the bus back.
    pub fn release(self) -> I {
        self.bus
    }
}

#[cfg(feature = "rpi")]
impl I2cTransport<rppal::i2c::I2c> {
    /// Opens the primary I2C bus of a Raspberry Pi.
    pub fn rpi() -> Result<Self, TransportError<rppal::i2c::Error>> {
        let bus = rppal::i2c::I2c::new().map_err(TransportError::Open)?;
        debug!("Opened I2C bus");
        Ok(I2cTransport::new(bus))
    }
}

impl<I, E> Transport for I2cTransport<I>
where
    I: Write<Error = E> + WriteRead<Error = E>,
    E: fmt::Debug,
{
    type Error = TransportError<E>;

    fn write(&mut self, register: u8, value: u8) -> Result<(), Self::Error> {
        write_frame(&mut self.bus, self.address, register, value)
    }

    fn read_register(&mut self, register: u8) -> Result<u8, Self::Error> {
        read_frame(&mut self.bus, self.address, register)
    }
}

fn write_frame<I, E>(bus: &mut I, address: u8, register: u8, value: u8) -> Result<(), TransportError<E>>
where
    I: Write<Error = E>,
{
    debug!("Write {:#04X} <- {:#04X}", register, value);
    bus.write(address, &[register, value])
        .map_err(|bus| TransportError::Write { register, bus })
}

fn read_frame<I, E>(bus: &mut I, address: u8, register: u8) -> Result<u8, TransportError<E>>
where
    I: WriteRead<Error = E>,
{
    let mut buffer = [0u8];
    bus.write_read(address, &[register], &mut buffer)
        .map_err(|bus| TransportError::Read { register, bus })?;
    debug!("Read {:#04X} -> {:#04X}", register, buffer[0]);
    Ok(buffer[0])
}
