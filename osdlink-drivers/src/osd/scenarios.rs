//! Command lines run end to end through the dispatcher and the MAX7456
//! driver against the simulated chip

use osdlink_core::config::OsdConfig;
use osdlink_core::engine::Dispatcher;
use osdlink_core::osd::CursorPosition;
use osdlink_core::traits::OsdDisplay;
use osdlink_hal::Clock;
use osdlink_protocol::{Response, Status};

use super::max7456::Max7456;
use super::sim::{Max7456Sim, NoDelay};
use super::transport::SpiTransport;

struct Uptime(u32);

impl Clock for Uptime {
    fn millis(&self) -> u32 {
        self.0
    }
}

struct Bench {
    sim: Max7456Sim,
    osd: Max7456<SpiTransport<Max7456Sim>, NoDelay>,
    clock: Uptime,
}

impl Bench {
    fn new() -> Self {
        let sim = Max7456Sim::new();
        let mut osd = Max7456::new(
            SpiTransport::new(sim.clone()),
            NoDelay::default(),
            &OsdConfig::default(),
        );
        osd.reset().unwrap();
        {
            let mut state = sim.state_mut();
            state.writes.clear();
            state.transactions = 0;
        }
        Self {
            sim,
            osd,
            clock: Uptime(987_654),
        }
    }

    fn send(&mut self, line: &[u8]) -> Response {
        Dispatcher::new(&mut self.osd, &self.clock).dispatch(line)
    }
}

#[test]
fn test_locate_moves_cursor() {
    let mut bench = Bench::new();
    let response = bench.send(b"l 5 10");
    assert_eq!(response.status, Status::Ok);
    assert_eq!(bench.osd.cursor(), CursorPosition::new(5, 10));
}

#[test]
fn test_locate_out_of_range() {
    let mut bench = Bench::new();
    bench.send(b"l 7 3");
    let response = bench.send(b"l 99 0");
    assert_eq!(response.status, Status::OutOfRange);
    assert_eq!(response.encode_to_vec().unwrap().as_slice(), &[0xFF, 0x22]);
    assert_eq!(bench.osd.cursor(), CursorPosition::new(7, 3));
}

#[test]
fn test_print_reads_back() {
    let mut bench = Bench::new();
    bench.send(b"l 3 2");
    assert_eq!(bench.send(b"p HELLO").status, Status::Ok);

    let mut read = [0u8; 5];
    for (i, slot) in read.iter_mut().enumerate() {
        *slot = bench.osd.read_display(3 + i as u8, 2).unwrap();
    }
    assert_eq!(&read, b"HELLO");
}

#[test]
fn test_fast_print_reads_back() {
    let mut bench = Bench::new();
    bench.send(b"l 0 15");
    assert_eq!(bench.send(b"P WORLD").status, Status::Ok);
    assert_eq!(&bench.sim.state().chars[450..455], b"WORLD");
    assert_eq!(bench.osd.cursor(), CursorPosition::new(5, 15));
}

#[test]
fn test_unknown_opcode_touches_nothing() {
    let mut bench = Bench::new();
    let response = bench.send(b"z");
    assert_eq!(response.encode_to_vec().unwrap().as_slice(), &[0xFF, 0xFF]);
    assert_eq!(bench.sim.state().transactions, 0);
}

#[test]
fn test_blink_follows_attribute_commands() {
    let mut bench = Bench::new();
    bench.send(b"a b 1");
    bench.send(b"p A");
    bench.send(b"a b 0");
    bench.send(b"p B");

    let dmm = bench.sim.state().dmm_at_char_writes();
    assert_eq!(dmm.len(), 2);
    assert_eq!(dmm[0] & 0x10, 0x10);
    assert_eq!(dmm[1] & 0x10, 0);
}

#[test]
fn test_status_and_video_mode_payloads() {
    let mut bench = Bench::new();
    bench.sim.state_mut().stat = 0x0C;
    let response = bench.send(b"s");
    assert_eq!(response.encode_to_vec().unwrap().as_slice(), b"C\xFF\x00");

    let response = bench.send(b"v");
    assert_eq!(response.payload.as_slice(), b"4C 30");
}

#[test]
fn test_millis_and_echo() {
    let mut bench = Bench::new();
    assert_eq!(bench.send(b"m").payload.as_slice(), b"987654");
    assert_eq!(bench.send(b"e ping").payload.as_slice(), b"ping");
}

#[test]
fn test_display_toggle() {
    let mut bench = Bench::new();
    assert_eq!(bench.send(b"a d 0").status, Status::Ok);
    assert_eq!(bench.sim.state().regs[0x00] & 0x08, 0);
    assert_eq!(bench.send(b"a d 1").status, Status::Ok);
    assert_eq!(bench.sim.state().regs[0x00] & 0x08, 0x08);
}

#[test]
fn test_offset_command() {
    let mut bench = Bench::new();
    assert_eq!(bench.send(b"o -40 +3").status, Status::Ok);
    assert_eq!(bench.osd.offsets(), (-32, 3));
    assert_eq!(bench.sim.state().regs[0x02], 0);
    assert_eq!(bench.sim.state().regs[0x03], 13);
}

#[test]
fn test_reset_and_clear_commands() {
    let mut bench = Bench::new();
    bench.send(b"p junk");
    assert_eq!(bench.send(b"c").status, Status::Ok);
    assert!(bench.sim.state().chars.iter().all(|&c| c == 0));
    assert_eq!(bench.send(b"r").status, Status::Ok);
}

#[test]
fn test_reset_timeout_status() {
    let mut bench = Bench::new();
    bench.sim.state_mut().reset_polls = super::sim::NEVER;
    assert_eq!(bench.send(b"r").status, Status::Timeout);
}

#[test]
fn test_reserved_byte_rejected() {
    let mut bench = Bench::new();
    assert_eq!(bench.send(b"P a\xFFb").status, Status::Malformed);
    assert_eq!(bench.sim.state().transactions, 0);
}

#[test]
fn test_bus_failure_reports_io() {
    let mut bench = Bench::new();
    bench.sim.state_mut().fail = true;
    assert_eq!(bench.send(b"p x").status, Status::Io);
    assert_eq!(bench.send(b"l 1 1").status, Status::Ok);
}
