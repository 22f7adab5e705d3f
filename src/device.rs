//! High-level LIS3DH device driver implementation.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{Error as _, ErrorType, InputPin};
use embedded_hal::spi::SpiDevice;

use crate::config::WakeConfig;
use crate::error::{Error, Result};
use crate::interface::spi::SpiInterface;
use crate::interface::Lis3dhInterface;
use crate::log;
use crate::params::FullScale;
use crate::registers::{
    command_byte,
    CtrlReg1,
    CtrlReg2,
    CtrlReg3,
    CtrlReg4,
    CtrlReg5,
    CtrlReg6,
    Int1Config,
    Int1Source,
    Register,
    TempConfig,
    REG_INT1_DURATION,
    REG_INT1_SRC,
    REG_INT1_THS,
    REG_OUT_ADC3_L,
    REG_OUT_X_L,
    REG_REFERENCE,
    REG_WHO_AM_I,
    WHO_AM_I_VALUE,
};

// Identity probe attempts, covering the boot time after power-up.
const WHO_AM_I_ATTEMPTS: usize = 10;
const WHO_AM_I_RETRY_DELAY_MS: u32 = 1;
// Wait between re-arm attempts while INT1 stays high.
const CLEAR_POLL_INTERVAL_MS: u32 = 10;
// Command byte followed by X, Y, Z low/high pairs.
const XYZ_FRAME_LEN: usize = 7;

/// Placeholder for setups where INT1 is not wired to the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInterruptPin;

impl ErrorType for NoInterruptPin {
    type Error = Infallible;
}

impl InputPin for NoInterruptPin {
    fn is_high(&mut self) -> core::result::Result<bool, Self::Error> {
        Ok(false)
    }

    fn is_low(&mut self) -> core::result::Result<bool, Self::Error> {
        Ok(true)
    }
}

/// High-level synchronous driver for the LIS3DH accelerometer.
///
/// Every register access is one framed transfer through `IFACE`. With a
/// [`ThreadedTransfer`](crate::interface::threaded::ThreadedTransfer) the
/// interface can be a shared borrow, so the driver itself stays cheap to create
/// and needs no teardown.
pub struct Lis3dh<IFACE, INT = NoInterruptPin> {
    interface: IFACE,
    int_pin: Option<INT>,
    int1_cfg: Int1Config,
}

impl<IFACE> Lis3dh<IFACE, NoInterruptPin> {
    // ==================================================================
    // == Driver Construction & Ownership ===============================
    // ==================================================================
    /// Creates a driver whose INT1 output is not connected.
    pub fn new(interface: IFACE) -> Self {
        Self {
            interface,
            int_pin: None,
            int1_cfg: Int1Config::new(),
        }
    }
}

impl<IFACE, INT> Lis3dh<IFACE, INT> {
    /// Creates a driver with INT1 wired to `int_pin`.
    pub fn with_interrupt(interface: IFACE, int_pin: INT) -> Self {
        Self {
            interface,
            int_pin: Some(int_pin),
            int1_cfg: Int1Config::new(),
        }
    }

    /// Consumes the driver and returns the interface and the interrupt pin.
    pub fn release(self) -> (IFACE, Option<INT>) {
        (self.interface, self.int_pin)
    }

    /// Provides mutable access to the underlying interface.
    pub fn interface_mut(&mut self) -> &mut IFACE {
        &mut self.interface
    }

    /// Returns the `INT1_CFG` value re-applied after every interrupt clear.
    pub fn int1_config(&self) -> Int1Config {
        self.int1_cfg
    }
}

impl<SPI> Lis3dh<SpiInterface<SPI>>
where
    SPI: SpiDevice,
{
    // ==================================================================
    // == SPI Convenience Constructors ==================================
    // ==================================================================
    /// Convenience constructor for blocking `SpiDevice` transports.
    pub fn new_spi(spi: SPI) -> Self {
        Self::new(SpiInterface::new(spi))
    }
}

impl<IFACE, INT, CommE> Lis3dh<IFACE, INT>
where
    IFACE: Lis3dhInterface<Error = CommE>,
    INT: InputPin,
{
    // ==================================================================
    // == Register Access ===============================================
    // ==================================================================
    /// Reads an 8-bit register.
    pub fn read8(&mut self, register: u8) -> Result<u8, CommE> {
        let request = [command_byte(register, true, false), 0];
        let mut response = [0u8; 2];
        self.interface.transact(&request, &mut response)?;
        Ok(response[1])
    }

    /// Writes an 8-bit register.
    pub fn write8(&mut self, register: u8, value: u8) -> Result<(), CommE> {
        let request = [command_byte(register, false, false), value];
        let mut response = [0u8; 2];
        self.interface.transact(&request, &mut response)?;
        Ok(())
    }

    /// Reads a little-endian `_L`/`_H` register pair.
    ///
    /// `register` must be the `_L` address of the pair; this is not checked.
    pub fn read16(&mut self, register: u8) -> Result<u16, CommE> {
        let request = [command_byte(register, true, true), 0, 0];
        let mut response = [0u8; 3];
        self.interface.transact(&request, &mut response)?;
        Ok(u16::from_le_bytes([response[1], response[2]]))
    }

    /// Writes a little-endian `_L`/`_H` register pair.
    ///
    /// `register` must be the `_L` address of the pair; this is not checked.
    pub fn write16(&mut self, register: u8, value: u16) -> Result<(), CommE> {
        let [low, high] = value.to_le_bytes();
        let request = [command_byte(register, false, true), low, high];
        let mut response = [0u8; 3];
        self.interface.transact(&request, &mut response)?;
        Ok(())
    }

    /// Reads a typed register.
    pub fn read_register<R>(&mut self) -> Result<R, CommE>
    where
        R: Register + From<u8>,
    {
        Ok(R::from(self.read8(R::ADDRESS)?))
    }

    /// Writes a typed register.
    pub fn write_register<R>(&mut self, value: R) -> Result<(), CommE>
    where
        R: Register,
    {
        self.write8(R::ADDRESS, value.into())
    }

    /// Returns `true` while the interface has a transfer outstanding.
    pub fn is_busy(&self) -> bool {
        self.interface.is_busy()
    }

    // ==================================================================
    // == Identification ================================================
    // ==================================================================
    /// Reads the `WHO_AM_I` register.
    pub fn who_am_i(&mut self) -> Result<u8, CommE> {
        self.read8(REG_WHO_AM_I)
    }

    fn probe(&mut self, delay: &mut impl DelayNs) -> Result<bool, CommE> {
        for attempt in 0..WHO_AM_I_ATTEMPTS {
            let id = self.who_am_i()?;
            if id == WHO_AM_I_VALUE {
                log::debug!("LIS3DH found after {} attempt(s)", attempt + 1);
                return Ok(true);
            }
            log::trace!("WHO_AM_I returned {=u8:#x}", id);
            delay.delay_ms(WHO_AM_I_RETRY_DELAY_MS);
        }

        log::info!("LIS3DH not found after {} attempts", WHO_AM_I_ATTEMPTS);
        Ok(false)
    }

    // ==================================================================
    // == Wake-on-Motion ================================================
    // ==================================================================
    /// Configures low-power wake-on-motion with the default [`WakeConfig`] and `threshold`.
    ///
    /// Returns `Ok(false)` when the device never identified itself.
    pub fn setup_low_power_wake_mode(
        &mut self,
        threshold: u8,
        delay: &mut impl DelayNs,
    ) -> Result<bool, CommE> {
        let config = WakeConfig::new().threshold(threshold).build();
        self.setup_wake_mode(&config, delay)
    }

    /// Configures low-power wake-on-motion.
    ///
    /// Register order follows the application note's per-register sequence.
    /// Reading `REFERENCE` latches the current static acceleration as the
    /// baseline for motion detection. With INT1 wired, X and Y high events are
    /// routed to it and latched until [`clear_interrupt`](Self::clear_interrupt).
    ///
    /// Threshold and duration are written as given. Only their lower seven bits
    /// are meaningful to the device; use [`WakeConfig::validate`] to catch
    /// out-of-range values up front.
    ///
    /// Returns `Ok(false)` when the device never identified itself, in which case
    /// nothing was written.
    pub fn setup_wake_mode(
        &mut self,
        config: &WakeConfig,
        delay: &mut impl DelayNs,
    ) -> Result<bool, CommE> {
        if !self.probe(delay)? {
            return Ok(false);
        }

        self.write_register(
            CtrlReg1::new()
                .with_x_enable(true)
                .with_y_enable(true)
                .with_z_enable(true)
                .with_low_power(true)
                .with_data_rate(config.data_rate),
        )?;
        self.write_register(CtrlReg2::new())?;
        self.write_register(CtrlReg3::new().with_i1_ia1(true))?;
        self.write_register(CtrlReg4::new().with_full_scale(FullScale::G2))?;
        // Page 12 of AN3308 says to write this last, page 25 says in order.
        self.write_register(CtrlReg5::new().with_latch_int1(true))?;
        self.write_register(CtrlReg6::new())?;

        self.read8(REG_REFERENCE)?;

        self.write8(REG_INT1_THS, config.threshold)?;
        self.write8(REG_INT1_DURATION, config.duration)?;

        if self.int_pin.is_some() {
            self.int1_cfg = Int1Config::new().with_x_high(true).with_y_high(true);
            self.write_register(self.int1_cfg)?;
            self.read8(REG_INT1_SRC)?;
        } else {
            self.int1_cfg = Int1Config::new();
            self.write_register(self.int1_cfg)?;
        }

        log::debug!(
            "wake mode armed: threshold {}, INT1_CFG {=u8:#x}",
            config.threshold,
            u8::from(self.int1_cfg)
        );
        Ok(true)
    }

    /// Reads `INT1_SRC`, clearing the latched interrupt.
    ///
    /// With INT1 wired, keeps re-reading `INT1_SRC` and re-arming `INT1_CFG`
    /// every 10 ms until the line drops. The returned value is always the
    /// first read, i.e. the source at the moment the interrupt was observed.
    pub fn clear_interrupt(&mut self, delay: &mut impl DelayNs) -> Result<Int1Source, CommE> {
        let source = Int1Source::from(self.read8(REG_INT1_SRC)?);

        if self.int_pin.is_some() {
            while self.interrupt_line_high()? {
                delay.delay_ms(CLEAR_POLL_INTERVAL_MS);
                self.read8(REG_INT1_SRC)?;
                self.write_register(self.int1_cfg)?;
                log::trace!("INT1 still high, re-armed");
            }
        }

        Ok(source)
    }

    fn interrupt_line_high(&mut self) -> Result<bool, CommE> {
        match self.int_pin.as_mut() {
            Some(pin) => pin.is_high().map_err(|err| Error::Pin(err.kind())),
            None => Ok(false),
        }
    }

    // ==================================================================
    // == Data Acquisition ==============================================
    // ==================================================================
    /// Enables or disables the temperature sensor and its ADC path.
    ///
    /// The sensor needs time to settle after being enabled, so enable it once
    /// during setup rather than around each reading.
    pub fn enable_temperature(&mut self, enable: bool) -> Result<(), CommE> {
        self.write_register(
            TempConfig::new()
                .with_temp_enable(enable)
                .with_adc_enable(enable),
        )
    }

    /// Returns the temperature in whole degrees Celsius.
    ///
    /// The reading is relative: the sensor reports deltas, not absolute values.
    pub fn temperature(&mut self) -> Result<i16, CommE> {
        // Left-justified two's complement, one degree per 256 LSB.
        let raw = self.read16(REG_OUT_ADC3_L)? as i16;
        Ok(raw / 256)
    }

    /// Reads a raw, left-justified acceleration triplet.
    pub fn read_xyz_raw(&mut self) -> Result<[i16; 3], CommE> {
        let mut request = [0u8; XYZ_FRAME_LEN];
        request[0] = command_byte(REG_OUT_X_L, true, true);
        let mut response = [0u8; XYZ_FRAME_LEN];
        self.interface.transact(&request, &mut response)?;

        let x = i16::from_le_bytes([response[1], response[2]]);
        let y = i16::from_le_bytes([response[3], response[4]]);
        let z = i16::from_le_bytes([response[5], response[6]]);

        Ok([x, y, z])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::{CompletionFlag, Notifier};
    use crate::error::TransferError;
    use crate::interface::blocking::BlockingTransfer;
    use crate::interface::fakes::RecordingPin;
    use crate::interface::threaded::ThreadedTransfer;
    use crate::registers::{REG_INT1_CFG, REG_OUT_ADC1_L, REG_TEMP_CFG};
    use crate::transport::AsyncTransfer;
    use embedded_hal::digital::ErrorKind;
    use std::sync::{Arc, Mutex};

    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock,
        State as PinState,
        Transaction as PinTransaction,
    };
    use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};

    /// Register file behind a fake transport that completes immediately.
    struct RegisterBank {
        regs: [u8; 64],
        frames: Vec<Vec<u8>>,
        who_am_i_misses: usize,
    }

    impl RegisterBank {
        fn new() -> Self {
            let mut regs = [0u8; 64];
            regs[REG_WHO_AM_I as usize] = WHO_AM_I_VALUE;
            Self {
                regs,
                frames: Vec::new(),
                who_am_i_misses: 0,
            }
        }

        fn absent() -> Self {
            let mut bank = Self::new();
            bank.regs[REG_WHO_AM_I as usize] = 0x00;
            bank
        }

        fn read(&mut self, address: usize) -> u8 {
            if address == REG_WHO_AM_I as usize && self.who_am_i_misses > 0 {
                self.who_am_i_misses -= 1;
                return 0xFF;
            }
            let value = self.regs[address];
            if address == REG_INT1_SRC as usize {
                self.regs[address] = 0;
            }
            value
        }
    }

    impl AsyncTransfer for RegisterBank {
        type Error = Infallible;

        fn start_transfer(
            &mut self,
            request: &[u8],
            response: &mut [u8],
            done: Notifier,
        ) -> core::result::Result<(), Self::Error> {
            let command = request[0];
            let is_read = command & 0x80 != 0;
            let increment = command & 0x40 != 0;
            let base = (command & 0x3F) as usize;

            response[0] = 0xFF;
            for i in 1..request.len() {
                let offset = if increment { i - 1 } else { 0 };
                let address = (base + offset) & 0x3F;
                if is_read {
                    response[i] = self.read(address);
                } else {
                    self.regs[address] = request[i];
                    response[i] = 0xFF;
                }
            }

            self.frames.push(request.to_vec());
            done.notify();
            Ok(())
        }
    }

    type Adapter = BlockingTransfer<RegisterBank, RecordingPin>;

    fn adapter(bank: RegisterBank) -> Adapter {
        let flag: &'static CompletionFlag = Box::leak(Box::new(CompletionFlag::new()));
        let cs = RecordingPin {
            log: Arc::new(Mutex::new(Vec::new())),
        };
        BlockingTransfer::new(bank, cs, flag)
    }

    fn bank_of<INT>(device: Lis3dh<Adapter, INT>) -> RegisterBank {
        let (adapter, _) = device.release();
        adapter.release().0
    }

    #[derive(Default)]
    struct RecordingDelay {
        calls_ms: Vec<u32>,
    }

    impl DelayNs for RecordingDelay {
        fn delay_ns(&mut self, _ns: u32) {}

        fn delay_ms(&mut self, ms: u32) {
            self.calls_ms.push(ms);
        }
    }

    fn wake_sequence_prefix(threshold: u8) -> Vec<Vec<u8>> {
        vec![
            vec![0x8F, 0x00],
            vec![0x20, 0x2F],
            vec![0x21, 0x00],
            vec![0x22, 0x40],
            vec![0x23, 0x00],
            vec![0x24, 0x08],
            vec![0x25, 0x00],
            vec![0xA6, 0x00],
            vec![0x32, threshold],
            vec![0x33, 0x00],
        ]
    }

    #[test]
    fn write8_then_read8_round_trips_every_address() {
        let mut device = Lis3dh::new(adapter(RegisterBank::new()));

        for address in 0x00..=0x3Fu8 {
            let value = address ^ 0xA5;
            device.write8(address, value).unwrap();
            assert_eq!(device.read8(address).unwrap(), value, "address {address:#04x}");
        }
    }

    #[test]
    fn write16_then_read16_round_trips_little_endian() {
        let mut device = Lis3dh::new(adapter(RegisterBank::new()));

        for (address, value) in [(0x08u8, 0x1234u16), (0x0C, 0xFF00), (0x28, 0x00FF), (0x2C, 0x8001)] {
            device.write16(address, value).unwrap();
            assert_eq!(device.read16(address).unwrap(), value);
            assert_eq!(device.read8(address).unwrap(), value.to_le_bytes()[0]);
            assert_eq!(device.read8(address + 1).unwrap(), value.to_le_bytes()[1]);
        }

        let bank = bank_of(device);
        assert_eq!(bank.frames[0], vec![0x48, 0x34, 0x12]);
        assert_eq!(bank.frames[1], vec![0xC8, 0x00, 0x00]);
    }

    #[test]
    fn typed_register_access_uses_register_address() {
        let mut device = Lis3dh::new(adapter(RegisterBank::new()));

        device
            .write_register(CtrlReg5::new().with_latch_int1(true))
            .unwrap();
        let reg: CtrlReg5 = device.read_register().unwrap();
        assert!(reg.latch_int1());

        let bank = bank_of(device);
        assert_eq!(bank.frames, vec![vec![0x24, 0x08], vec![0xA4, 0x00]]);
    }

    #[test]
    fn setup_fails_without_identity_and_writes_nothing() {
        let mut device = Lis3dh::new(adapter(RegisterBank::absent()));
        let mut delay = RecordingDelay::default();

        assert_eq!(device.setup_low_power_wake_mode(16, &mut delay), Ok(false));
        assert_eq!(delay.calls_ms, vec![1; 10]);

        let bank = bank_of(device);
        assert_eq!(bank.frames.len(), 10);
        assert!(bank.frames.iter().all(|frame| *frame == vec![0x8F, 0x00]));
    }

    #[test]
    fn setup_retries_identity_until_device_boots() {
        let mut bank = RegisterBank::new();
        bank.who_am_i_misses = 3;
        let mut device = Lis3dh::new(adapter(bank));
        let mut delay = RecordingDelay::default();

        assert_eq!(device.setup_low_power_wake_mode(16, &mut delay), Ok(true));
        assert_eq!(delay.calls_ms, vec![1, 1, 1]);

        let bank = bank_of(device);
        assert_eq!(bank.frames[..4], vec![vec![0x8F, 0x00]; 4][..]);
        assert_eq!(bank.frames[4], vec![0x20, 0x2F]);
    }

    #[test]
    fn setup_with_interrupt_line_enables_xy_high_and_clears_source() {
        let mut pin = PinMock::new(&[]);
        let mut bank = RegisterBank::new();
        bank.regs[REG_INT1_SRC as usize] = 0x42;
        let mut device = Lis3dh::with_interrupt(adapter(bank), pin.clone());
        let mut delay = RecordingDelay::default();

        assert_eq!(device.setup_low_power_wake_mode(20, &mut delay), Ok(true));
        assert_eq!(u8::from(device.int1_config()), 0x0A);

        let bank = bank_of(device);
        let mut expected = wake_sequence_prefix(20);
        expected.push(vec![0x30, 0x0A]);
        expected.push(vec![0xB1, 0x00]);
        assert_eq!(bank.frames, expected);
        assert_eq!(bank.regs[REG_INT1_CFG as usize], 0x0A);
        assert_eq!(bank.regs[REG_INT1_SRC as usize], 0x00);
        assert!(delay.calls_ms.is_empty());

        pin.done();
    }

    #[test]
    fn setup_without_interrupt_line_disables_axis_interrupts() {
        let mut bank = RegisterBank::new();
        bank.regs[REG_INT1_CFG as usize] = 0x3F;
        let mut device = Lis3dh::new(adapter(bank));
        let mut delay = RecordingDelay::default();

        assert_eq!(device.setup_low_power_wake_mode(16, &mut delay), Ok(true));
        assert_eq!(u8::from(device.int1_config()), 0x00);

        let bank = bank_of(device);
        let mut expected = wake_sequence_prefix(16);
        expected.push(vec![0x30, 0x00]);
        assert_eq!(bank.frames, expected);
        assert_eq!(bank.regs[REG_INT1_CFG as usize], 0x00);
    }

    #[test]
    fn setup_uses_configured_rate_and_duration() {
        let mut device = Lis3dh::new(adapter(RegisterBank::new()));
        let config = WakeConfig::new()
            .threshold(8)
            .duration(2)
            .data_rate(crate::params::DataRate::Hz50)
            .build();

        assert_eq!(device.setup_wake_mode(&config, &mut RecordingDelay::default()), Ok(true));

        let bank = bank_of(device);
        assert_eq!(bank.regs[0x20], 0x4F);
        assert_eq!(bank.regs[REG_INT1_THS as usize], 8);
        assert_eq!(bank.regs[REG_INT1_DURATION as usize], 2);
    }

    #[test]
    fn setup_writes_eight_bit_threshold_unchecked() {
        let mut device = Lis3dh::new(adapter(RegisterBank::new()));

        assert_eq!(
            device.setup_low_power_wake_mode(0x80, &mut RecordingDelay::default()),
            Ok(true)
        );

        let bank = bank_of(device);
        assert_eq!(bank.regs[REG_INT1_THS as usize], 0x80);
        assert!(bank.frames.contains(&vec![0x32, 0x80]));
    }

    #[test]
    fn clear_interrupt_without_line_reads_source_once() {
        let mut bank = RegisterBank::new();
        bank.regs[REG_INT1_SRC as usize] = 0x48;
        let mut device = Lis3dh::new(adapter(bank));
        let mut delay = RecordingDelay::default();

        let source = device.clear_interrupt(&mut delay).unwrap();
        assert_eq!(u8::from(source), 0x48);
        assert!(source.active());
        assert!(source.y_high());

        let bank = bank_of(device);
        assert_eq!(bank.frames, vec![vec![0xB1, 0x00]]);
        assert!(delay.calls_ms.is_empty());
    }

    #[test]
    fn clear_interrupt_polls_until_line_drops_and_returns_first_read() {
        let expectations = [
            PinTransaction::get(PinState::High),
            PinTransaction::get(PinState::High),
            PinTransaction::get(PinState::Low),
        ];
        let mut pin = PinMock::new(&expectations);
        let mut device = Lis3dh::with_interrupt(adapter(RegisterBank::new()), pin.clone());
        let mut delay = RecordingDelay::default();

        assert!(device.setup_low_power_wake_mode(16, &mut delay).unwrap());
        device.write8(REG_INT1_SRC, 0x42).unwrap();

        let source = device.clear_interrupt(&mut delay).unwrap();
        assert_eq!(u8::from(source), 0x42);
        assert_eq!(delay.calls_ms, vec![10, 10]);

        let bank = bank_of(device);
        let tail = &bank.frames[bank.frames.len() - 5..];
        assert_eq!(
            tail,
            &[
                vec![0xB1, 0x00],
                vec![0xB1, 0x00],
                vec![0x30, 0x0A],
                vec![0xB1, 0x00],
                vec![0x30, 0x0A],
            ][..]
        );

        pin.done();
    }

    #[test]
    fn clear_interrupt_reports_interrupt_line_fault() {
        struct FaultyPin;

        impl ErrorType for FaultyPin {
            type Error = ErrorKind;
        }

        impl InputPin for FaultyPin {
            fn is_high(&mut self) -> core::result::Result<bool, Self::Error> {
                Err(ErrorKind::Other)
            }

            fn is_low(&mut self) -> core::result::Result<bool, Self::Error> {
                Err(ErrorKind::Other)
            }
        }

        let mut bank = RegisterBank::new();
        bank.regs[REG_INT1_SRC as usize] = 0x48;
        let mut device = Lis3dh::with_interrupt(adapter(bank), FaultyPin);
        let mut delay = RecordingDelay::default();

        assert_eq!(
            device.clear_interrupt(&mut delay),
            Err(Error::Pin(ErrorKind::Other))
        );
        assert!(delay.calls_ms.is_empty());

        let bank = bank_of(device);
        assert_eq!(bank.frames, vec![vec![0xB1, 0x00]]);
    }

    #[test]
    fn temperature_divides_left_justified_reading() {
        let mut device = Lis3dh::new(adapter(RegisterBank::new()));

        device.write16(REG_OUT_ADC3_L, 2560).unwrap();
        assert_eq!(device.temperature(), Ok(10));

        device.write16(REG_OUT_ADC3_L, 0xFF00).unwrap();
        assert_eq!(device.temperature(), Ok(-1));

        device.write16(REG_OUT_ADC3_L, 0xFF80).unwrap();
        assert_eq!(device.temperature(), Ok(0));
    }

    #[test]
    fn enable_temperature_toggles_sensor_and_adc() {
        let mut device = Lis3dh::new(adapter(RegisterBank::new()));

        device.enable_temperature(true).unwrap();
        device.enable_temperature(false).unwrap();

        let bank = bank_of(device);
        assert_eq!(
            bank.frames,
            vec![vec![REG_TEMP_CFG, 0xC0], vec![REG_TEMP_CFG, 0x00]]
        );
    }

    #[test]
    fn read_xyz_raw_reads_all_axes_in_one_frame() {
        let mut bank = RegisterBank::new();
        bank.regs[0x28..0x2E].copy_from_slice(&[0x00, 0x40, 0x00, 0xC0, 0x80, 0x01]);
        let mut device = Lis3dh::new(adapter(bank));

        assert_eq!(device.read_xyz_raw(), Ok([0x4000, -0x4000, 0x0180]));
        assert!(!device.is_busy());

        let bank = bank_of(device);
        assert_eq!(bank.frames, vec![vec![0xE8, 0, 0, 0, 0, 0, 0]]);
    }

    #[test]
    fn auxiliary_adc_pair_reads_low_register_first() {
        let mut bank = RegisterBank::new();
        bank.regs[REG_OUT_ADC1_L as usize] = 0x34;
        bank.regs[REG_OUT_ADC1_L as usize + 1] = 0x12;
        let mut device = Lis3dh::new(adapter(bank));

        assert_eq!(device.read16(REG_OUT_ADC1_L), Ok(0x1234));
    }

    #[test]
    fn spi_device_path_probes_identity() {
        let expectations = [
            SpiTransaction::transaction_start(),
            SpiTransaction::transfer(vec![0x8F, 0x00], vec![0x00, 0x33]),
            SpiTransaction::transaction_end(),
        ];
        let mut spi = SpiMock::new(&expectations);
        let mut device = Lis3dh::new_spi(spi.clone());

        assert_eq!(device.who_am_i(), Ok(WHO_AM_I_VALUE));
        spi.done();
    }

    #[test]
    fn drivers_can_share_a_threaded_adapter() {
        let cs = RecordingPin {
            log: Arc::new(Mutex::new(Vec::new())),
        };
        let mut bank = RegisterBank::new();
        bank.regs[0x0C] = 0x00;
        bank.regs[0x0D] = 0x19;
        let adapter = ThreadedTransfer::new(bank, cs);

        let mut first = Lis3dh::new(&adapter);
        let mut second = Lis3dh::new(&adapter);
        assert_eq!(first.temperature(), Ok(25));
        assert_eq!(second.who_am_i(), Ok(WHO_AM_I_VALUE));
        assert!(!first.is_busy());

        let (bank, cs) = adapter.release();
        assert_eq!(bank.frames.len(), 2);
        assert_eq!(cs.log.lock().unwrap().len(), 4);
    }

    #[test]
    fn transfer_errors_surface_as_interface_errors() {
        struct Refusing;

        impl AsyncTransfer for Refusing {
            type Error = u8;

            fn start_transfer(
                &mut self,
                _request: &[u8],
                _response: &mut [u8],
                _done: Notifier,
            ) -> core::result::Result<(), Self::Error> {
                Err(3)
            }
        }

        let flag: &'static CompletionFlag = Box::leak(Box::new(CompletionFlag::new()));
        let cs = RecordingPin {
            log: Arc::new(Mutex::new(Vec::new())),
        };
        let mut device = Lis3dh::new(BlockingTransfer::new(Refusing, cs, flag));

        assert_eq!(
            device.read8(REG_WHO_AM_I),
            Err(Error::Interface(TransferError::Bus(3)))
        );
    }
}
