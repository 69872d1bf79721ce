//! osdlink - serial-controlled on-screen-display firmware
//!
//! Main firmware binary for RP2040 boards carrying a MAX7456. A host sends
//! NUL-terminated command lines over UART0; each one is executed against
//! the OSD chip on SPI0 and answered with `payload, 0xFF, status`.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::UART0;
use embassy_rp::spi::{self, Spi};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_rp::watchdog::Watchdog;
use embassy_time::Delay;
use embedded_hal_bus::spi::ExclusiveDevice;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use osdlink_core::engine::Console;
use osdlink_drivers::osd::{Max7456, SpiTransport};
use osdlink_hal::spi::{Phase, Polarity};
use osdlink_hal::SpiConfig;

use crate::config::OSD_CONFIG;
use crate::serial::{SerialRx, SerialTx};

mod channels;
mod serial;
mod tasks;

mod config {
    use osdlink_core::config::{OsdConfig, PollConfig, SerialConfig, VideoConfig, VideoStandard};

    include!(concat!(env!("OUT_DIR"), "/osd_config.rs"));
}

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

/// SPI clock for the MAX7456
const OSD_SPI_FREQUENCY: u32 = 8_000_000;

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("osdlink firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");
    info!("Configuration: {:?}", OSD_CONFIG);

    // OSD chip on SPI0 (SCK=GPIO18, MOSI=GPIO19, MISO=GPIO16, CS=GPIO17)
    let spi = Spi::new_blocking(
        p.SPI0,
        p.PIN_18,
        p.PIN_19,
        p.PIN_16,
        osd_spi_config(SpiConfig::max7456(OSD_SPI_FREQUENCY)),
    );
    let cs = Output::new(p.PIN_17, Level::High);
    let device = match ExclusiveDevice::new(spi, cs, Delay) {
        Ok(device) => device,
        Err(e) => match e {},
    };
    let osd = Max7456::new(SpiTransport::new(device), Delay, &OSD_CONFIG);
    info!("SPI initialized for MAX7456");

    // Host link on UART0 (TX=GPIO0, RX=GPIO1)
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = OSD_CONFIG.serial.baudrate;

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    let console = Console::new(
        SerialRx::new(rx, OSD_CONFIG.serial.timeout_ms),
        SerialTx::new(tx),
        &OSD_CONFIG.serial,
    );
    info!("UART initialized at {} baud", OSD_CONFIG.serial.baudrate);

    let watchdog = Watchdog::new(p.WATCHDOG);

    spawner.spawn(tasks::watchdog_task(watchdog)).unwrap();
    spawner.spawn(tasks::console_task(console, osd)).unwrap();

    info!("All tasks spawned");
}

/// Map the board-agnostic SPI settings onto the RP2040 peripheral
fn osd_spi_config(cfg: SpiConfig) -> spi::Config {
    let (polarity, phase): (Polarity, Phase) = cfg.mode.into();

    let mut config = spi::Config::default();
    config.frequency = cfg.frequency;
    config.polarity = match polarity {
        Polarity::IdleLow => spi::Polarity::IdleLow,
        Polarity::IdleHigh => spi::Polarity::IdleHigh,
    };
    config.phase = match phase {
        Phase::CaptureOnFirstTransition => spi::Phase::CaptureOnFirstTransition,
        Phase::CaptureOnSecondTransition => spi::Phase::CaptureOnSecondTransition,
    };
    config
}
