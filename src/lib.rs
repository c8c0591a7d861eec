//! Library for the CST816 capacitive touch controller.
//!
//! The chip is driven through its register map over I2C. Reading is poll based: the
//! application asks for the current point, gesture or finger count whenever it wants
//! them, and [`Cst816::get_distance`] derives the movement since the previous call.
//!
//! Any blocking `embedded_hal` I2C bus can be used through [`I2cTransport`]. When other
//! devices sit on the same bus, pass it a proxy from `shared_bus::BusManagerStd`, which
//! holds the bus only for the duration of each transaction. On a Raspberry Pi the `rpi`
//! feature (on by default) opens the bus with `rppal`.
//!
//! ## Example
//!
//! ```rust, ignore
//! pub fn main() {
//!     use cst816::{Cst816, Mode};
//!     use rppal::hal::Delay;
//!     use embedded_hal::blocking::delay::DelayMs;
//!
//!     let mut touch = Cst816::init(Delay::new()).unwrap();
//!     touch.set_mode(Mode::All).unwrap();
//!
//!     loop {
//!         let point = touch.get_point().unwrap();
//!         let gesture = touch.gesture().unwrap();
//!         let pressed = touch.get_touch().unwrap();
//!         let distance = touch.get_distance().unwrap();
//!         println!(
//!             "Position: {},{} - Gesture: {:?} - Pressed? {} - Distance: {},{}",
//!             point.x, point.y, gesture, pressed, distance.dx, distance.dy
//!         );
//!         Delay::new().delay_ms(50u16);
//!     }
//! }
//! ```
//!
//! ## Debugging
//!
//! Every register access is logged with `debug!`. Attaching a logger and setting
//! `RUST_LOG=debug` will show the full bus traffic.
//!
use embedded_hal::blocking::delay::DelayMs;
#[macro_use]
extern crate log;

pub mod regs;
mod transport;

#[cfg(test)]
mod mock;

pub use transport::{I2cTransport, Transport, TransportError};

pub const DEFAULT_ADDRESS: u8 = regs::CST816_ADDR;

// Settle times of the power state machine behind DIS_AUTO_SLEEP.
const RESET_SETTLE_MS: u16 = 100;
const WAKE_LOW_MS: u16 = 10;
const WAKE_HIGH_MS: u16 = 50;

/// Combines the position registers of one axis into a 12 bit coordinate.
///
/// Only the low nibble of `high` belongs to the coordinate.
pub fn decode_coordinate(high: u8, low: u8) -> u16 {
    (u16::from(high & 0x0F) << 8) | u16::from(low)
}

/// A touch position in panel coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Point {
    pub x: u16,
    pub y: u16,
}

/// Movement between two consecutive samples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Distance {
    pub dx: i16,
    pub dy: i16,
}

impl Distance {
    // Coordinates come out of `decode_coordinate` and never exceed 4095, so both
    // fit in an i16 and so does their difference.
    fn between(from: Point, to: Point) -> Self {
        Distance {
            dx: to.x as i16 - from.x as i16,
            dy: to.y as i16 - from.y as i16,
        }
    }
}

/// Which events the chip reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Point,
    Gesture,
    All,
}

impl Mode {
    /// Value written to the interrupt control register.
    pub fn irq_ctl(self) -> u8 {
        match self {
            Mode::Point => regs::irq::POINT_MODE,
            Mode::Gesture => regs::irq::GESTURE_MODE,
            Mode::All => regs::irq::ALL_MODE,
        }
    }
}

/// Gestures recognized by the chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    None,
    SwipeUp,
    SwipeDown,
    SwipeLeft,
    SwipeRight,
    Click,
    DoubleClick,
    LongPress,
    /// An id this driver doesn't know about.
    Reserved(u8),
}

impl From<u8> for Gesture {
    fn from(id: u8) -> Self {
        match id {
            0x00 => Gesture::None,
            0x01 => Gesture::SwipeUp,
            0x02 => Gesture::SwipeDown,
            0x03 => Gesture::SwipeLeft,
            0x04 => Gesture::SwipeRight,
            0x05 => Gesture::Click,
            0x0B => Gesture::DoubleClick,
            0x0C => Gesture::LongPress,
            other => Gesture::Reserved(other),
        }
    }
}

/// Driver for a CST816 reached through a [`Transport`], with `D` providing the settle
/// pauses of the power sequences.
pub struct Cst816<T: Transport, D: DelayMs<u16>> {
    transport: T,
    delay: D,
    point: Point,
    distance: Distance,
    prev: Point,
    prev_touch: bool,
    mode: Option<Mode>,
}

#[cfg(feature = "rpi")]
impl<D: DelayMs<u16>> Cst816<I2cTransport<rppal::i2c::I2c>, D> {
    /// Opens the Raspberry Pi I2C bus and checks that a CST816 answers on it.
    ///
    /// A chip answering with an unexpected ID is only logged, since clones of the
    /// CST816 report other IDs but speak the same register map.
    pub fn init(delay: D) -> Result<Self, TransportError<rppal::i2c::Error>> {
        let transport = I2cTransport::rpi()?;
        let mut touch = Cst816::new(transport, delay);
        if touch.identify()? {
            debug!("Found CST816 at {:#X}", DEFAULT_ADDRESS);
        } else {
            warn!("Device at {:#X} is not a CST816", DEFAULT_ADDRESS);
        }
        Ok(touch)
    }
}

impl<T: Transport, D: DelayMs<u16>> Cst816<T, D> {
    /// Creates a driver on top of a ready transport. Nothing is sent on the bus.
    pub fn new(transport: T, delay: D) -> Self {
        Cst816 {
            transport,
            delay,
            point: Point::default(),
            distance: Distance::default(),
            prev: Point::default(),
            prev_touch: false,
            mode: None,
        }
    }

    /// Gives back the transport and the delay provider.
    pub fn release(self) -> (T, D) {
        (self.transport, self.delay)
    }

    /// Checks the chip ID.
    ///
    /// A device answering with another ID is reported as `false`, not as an error.
    pub fn identify(&mut self) -> Result<bool, T::Error> {
        let id = self.transport.read_register(regs::info::CHIP_ID)?;
        debug!("Chip ID: {:#X}, expected {:#X}", id, regs::CST816_CHIP_ID);
        Ok(id == regs::CST816_CHIP_ID)
    }

    /// Power cycles the touch logic.
    pub fn reset(&mut self) -> Result<(), T::Error> {
        debug!("Resetting");
        self.transport.write(regs::ctl::DIS_AUTO_SLEEP, 0x00)?;
        self.delay.delay_ms(RESET_SETTLE_MS);
        self.transport.write(regs::ctl::DIS_AUTO_SLEEP, 0x01)?;
        self.delay.delay_ms(RESET_SETTLE_MS);
        Ok(())
    }

    /// Reads the firmware version of the chip.
    pub fn read_firmware_version(&mut self) -> Result<u8, T::Error> {
        self.transport.read_register(regs::info::FW_VERSION)
    }

    /// Reads the project ID the chip was programmed with.
    pub fn read_project_id(&mut self) -> Result<u8, T::Error> {
        self.transport.read_register(regs::info::PROJ_ID)
    }

    /// Wakes the chip up.
    ///
    /// The last write repeats the previous one on purpose: the chip only accepts it
    /// once it settled after the first rising edge.
    pub fn wake(&mut self) -> Result<(), T::Error> {
        debug!("Waking up");
        self.transport.write(regs::ctl::DIS_AUTO_SLEEP, 0x00)?;
        self.delay.delay_ms(WAKE_LOW_MS);
        self.transport.write(regs::ctl::DIS_AUTO_SLEEP, 0x01)?;
        self.delay.delay_ms(WAKE_HIGH_MS);
        self.transport.write(regs::ctl::DIS_AUTO_SLEEP, 0x01)
    }

    /// Disables auto sleep.
    pub fn stop_sleep(&mut self) -> Result<(), T::Error> {
        self.transport.write(regs::ctl::DIS_AUTO_SLEEP, 0x01)
    }

    /// Selects what the chip reports. Gesture mode also enables single touch gestures
    /// in the motion mask.
    pub fn set_mode(&mut self, mode: Mode) -> Result<(), T::Error> {
        debug!("Setting mode {:?}", mode);
        self.transport.write(regs::ctl::IRQ_CTL, mode.irq_ctl())?;
        if mode == Mode::Gesture {
            self.transport
                .write(regs::info::MOTION_MASK, regs::irq::MOTION_MASK_SINGLE)?;
        }
        self.mode = Some(mode);
        Ok(())
    }

    /// The last mode set with [`Cst816::set_mode`].
    pub fn mode(&self) -> Option<Mode> {
        self.mode
    }

    /// Reads the current touch position.
    pub fn get_point(&mut self) -> Result<Point, T::Error> {
        let x_high = self.transport.read_register(regs::touch::XPOS_H)?;
        let x_low = self.transport.read_register(regs::touch::XPOS_L)?;
        let y_high = self.transport.read_register(regs::touch::YPOS_H)?;
        let y_low = self.transport.read_register(regs::touch::YPOS_L)?;
        self.point = Point {
            x: decode_coordinate(x_high, x_low),
            y: decode_coordinate(y_high, y_low),
        };
        Ok(self.point)
    }

    /// Raw gesture id, see [`Gesture`] for the known values.
    pub fn get_gesture(&mut self) -> Result<u8, T::Error> {
        self.transport.read_register(regs::touch::GESTURE_ID)
    }

    /// Reads the last gesture and decodes it.
    pub fn gesture(&mut self) -> Result<Gesture, T::Error> {
        self.get_gesture().map(Gesture::from)
    }

    /// Number of contacts the chip currently sees.
    pub fn finger_count(&mut self) -> Result<u8, T::Error> {
        self.transport.read_register(regs::touch::FINGER_NUM)
    }

    /// Whether anything touches the panel.
    pub fn get_touch(&mut self) -> Result<bool, T::Error> {
        Ok(self.finger_count()? > 0)
    }

    /// Refreshes the point and returns how far it moved since the previous call.
    ///
    /// The first sample of a new touch reports no movement, otherwise the jump from
    /// wherever the last touch ended would show up as motion.
    ///
    /// The touch state is read again after the distance is decided and that second
    /// reading is what the next call compares against. When the panel was already
    /// touched the first read is skipped, so a call costs five or six register reads.
    pub fn get_distance(&mut self) -> Result<Distance, T::Error> {
        let point = self.get_point()?;
        self.distance = if !self.prev_touch && self.get_touch()? {
            Distance::default()
        } else {
            Distance::between(self.prev, point)
        };
        self.prev_touch = self.get_touch()?;
        self.prev = point;
        Ok(self.distance)
    }

    /// The point from the last [`Cst816::get_point`], without touching the bus.
    pub fn point(&self) -> Point {
        self.point
    }

    /// The movement from the last [`Cst816::get_distance`].
    pub fn distance(&self) -> Distance {
        self.distance
    }

    /// The sample the next [`Cst816::get_distance`] compares against.
    pub fn previous(&self) -> Point {
        self.prev
    }

    /// Whether the panel was touched at the last [`Cst816::get_distance`].
    pub fn was_touching(&self) -> bool {
        self.prev_touch
    }
}
