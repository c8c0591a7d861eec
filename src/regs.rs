/// Default 7-bit I2C address of the CST816.
pub const CST816_ADDR: u8 = 0x15;

/// Value of the chip ID register on a CST816.
pub const CST816_CHIP_ID: u8 = 0xB5;

pub mod touch {
    //! Touch report registers
    pub const GESTURE_ID: u8 = 0x01;
    pub const FINGER_NUM: u8 = 0x02;
    pub const XPOS_H: u8 = 0x03;
    pub const XPOS_L: u8 = 0x04;
    pub const YPOS_H: u8 = 0x05;
    pub const YPOS_L: u8 = 0x06;
}

pub mod info {
    //! Identification registers
    pub const CHIP_ID: u8 = 0xA7;
    pub const PROJ_ID: u8 = 0xA8;
    pub const FW_VERSION: u8 = 0xA9;
    pub const MOTION_MASK: u8 = 0xAA;
}

pub mod baseline {
    //! Baseline capacitance registers
    pub const BPC0_H: u8 = 0xB0;
    pub const BPC0_L: u8 = 0xB1;
    pub const BPC1_H: u8 = 0xB2;
    pub const BPC1_L: u8 = 0xB3;
}

pub mod lp {
    //! Low power scan configuration registers
    pub const IRQ_PLUSE_WIDTH: u8 = 0xED;
    pub const NOR_SCAN_PER: u8 = 0xEE;
    pub const MOTION_SL_ANGLE: u8 = 0xEF;
    pub const LP_SCAN_RAW1_H: u8 = 0xF0;
    pub const LP_SCAN_RAW1_L: u8 = 0xF1;
    pub const LP_SCAN_RAW2_H: u8 = 0xF2;
    pub const LP_SCAN_RAW2_L: u8 = 0xF3;
    pub const LP_AUTO_WAKE_TIME: u8 = 0xF4;
    pub const LP_SCAN_TH: u8 = 0xF5;
    pub const LP_SCAN_WIN: u8 = 0xF6;
    pub const LP_SCAN_FREQ: u8 = 0xF7;
    pub const LP_SCAN_IDAC: u8 = 0xF8;
}

pub mod ctl {
    //! Timing and control registers
    pub const AUTO_SLEEP_TIME: u8 = 0xF9;
    pub const IRQ_CTL: u8 = 0xFA;
    pub const AUTO_RESET: u8 = 0xFB;
    pub const LONG_PRESS_TIME: u8 = 0xFC;
    pub const IO_CTL: u8 = 0xFD;
    pub const DIS_AUTO_SLEEP: u8 = 0xFE;
}

pub mod irq {
    //! Values written to `IRQ_CTL` to select the reporting mode
    pub const POINT_MODE: u8 = 0x41;
    pub const GESTURE_MODE: u8 = 0x11;
    pub const ALL_MODE: u8 = 0x71;

    /// Written to `MOTION_MASK` alongside `GESTURE_MODE`.
    pub const MOTION_MASK_SINGLE: u8 = 0x01;
}
