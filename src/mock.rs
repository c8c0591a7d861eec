//! Recording stand-ins for the bus and the delay provider used by the unit tests.
use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::Rc;

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::blocking::i2c::{Write, WriteRead};

#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    Write(u8, Vec<u8>),
    WriteRead(u8, Vec<u8>),
    Delay(u16),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nack(pub u8);

#[derive(Default)]
struct State {
    frames: Vec<Frame>,
    registers: HashMap<u8, VecDeque<u8>>,
    failing: HashSet<u8>,
}

/// An I2C bus answering reads from a per register queue.
///
/// The last queued value of a register sticks, so a register set once reads the same
/// forever. Unset registers read `0`. Delays issued through [`MockDelay`] built with
/// [`MockBus::delay`] land in the same frame log, which keeps ordering observable.
#[derive(Clone, Default)]
pub struct MockBus {
    state: Rc<RefCell<State>>,
}

impl MockBus {
    pub fn new() -> Self {
        MockBus::default()
    }

    pub fn delay(&self) -> MockDelay {
        MockDelay {
            state: Rc::clone(&self.state),
        }
    }

    pub fn set(&self, register: u8, value: u8) {
        self.queue(register, &[value]);
    }

    pub fn queue(&self, register: u8, values: &[u8]) {
        let mut state = self.state.borrow_mut();
        let queue = state.registers.entry(register).or_default();
        queue.clear();
        queue.extend(values);
    }

    pub fn fail_on(&self, register: u8) {
        self.state.borrow_mut().failing.insert(register);
    }

    pub fn frames(&self) -> Vec<Frame> {
        self.state.borrow().frames.clone()
    }

    pub fn writes(&self) -> Vec<(u8, u8)> {
        self.frames()
            .into_iter()
            .filter_map(|frame| match frame {
                Frame::Write(_, bytes) => Some((bytes[0], bytes[1])),
                _ => None,
            })
            .collect()
    }

    pub fn reads(&self) -> Vec<u8> {
        self.frames()
            .into_iter()
            .filter_map(|frame| match frame {
                Frame::WriteRead(_, bytes) => Some(bytes[0]),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.state.borrow_mut().frames.clear();
    }
}

impl Write for MockBus {
    type Error = Nack;

    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), Nack> {
        let mut state = self.state.borrow_mut();
        state.frames.push(Frame::Write(address, bytes.to_vec()));
        if state.failing.contains(&bytes[0]) {
            return Err(Nack(bytes[0]));
        }
        Ok(())
    }
}

impl WriteRead for MockBus {
    type Error = Nack;

    fn write_read(&mut self, address: u8, bytes: &[u8], buffer: &mut [u8]) -> Result<(), Nack> {
        let mut state = self.state.borrow_mut();
        state.frames.push(Frame::WriteRead(address, bytes.to_vec()));
        let register = bytes[0];
        if state.failing.contains(&register) {
            return Err(Nack(register));
        }
        let value = match state.registers.get_mut(&register) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap_or(0),
            Some(queue) => queue.front().copied().unwrap_or(0),
            None => 0,
        };
        for byte in buffer.iter_mut() {
            *byte = value;
        }
        Ok(())
    }
}

pub struct MockDelay {
    state: Rc<RefCell<State>>,
}

impl DelayMs<u16> for MockDelay {
    fn delay_ms(&mut self, ms: u16) {
        self.state.borrow_mut().frames.push(Frame::Delay(ms));
    }
}
