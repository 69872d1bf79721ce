//! Opcode dispatch
//!
//! Arguments are validated before any driver call, so a rejected command
//! leaves the device untouched. Errors never carry a payload.

use osdlink_hal::Clock;
use osdlink_protocol::{AttributeTarget, Command, Opcode, Response, Status};

use crate::traits::OsdDisplay;

/// Executes commands against an OSD device
pub struct Dispatcher<'a, D, C> {
    osd: &'a mut D,
    clock: &'a C,
}

impl<'a, D, C> Dispatcher<'a, D, C>
where
    D: OsdDisplay,
    Status: From<D::Error>,
    C: Clock,
{
    /// Create a dispatcher borrowing the device and uptime source
    pub fn new(osd: &'a mut D, clock: &'a C) -> Self {
        Self { osd, clock }
    }

    /// Execute one command line
    ///
    /// An empty line is answered as an unknown command.
    pub fn dispatch(&mut self, line: &[u8]) -> Response {
        let Some(command) = Command::parse(line) else {
            return Response::with_status(Status::Unknown);
        };

        match self.execute(&command) {
            Ok(response) => response,
            Err(status) => Response::with_status(status),
        }
    }

    fn execute(&mut self, command: &Command<'_>) -> Result<Response, Status> {
        let mut response = Response::ok();

        match command.opcode {
            Opcode::Print => self.osd.write_string_slow(command.args)?,
            Opcode::PrintFast => self.osd.write_string(command.args)?,
            Opcode::Locate => {
                let mut args = command.arg_parser();
                let x = args.next_int()?;
                let y = args.next_int()?;
                let (x, y) = (i32::from(x), i32::from(y));
                if !self.osd.grid().contains(x, y) {
                    return Err(Status::OutOfRange);
                }
                self.osd.set_cursor(x, y);
            }
            Opcode::Attribute => {
                let mut args = command.arg_parser();
                let target = args
                    .next_char()?
                    .and_then(AttributeTarget::from_byte)
                    .ok_or(Status::DomainError)?;
                let on = args.next_int()? != 0;
                match target {
                    AttributeTarget::Blink => self.osd.blink(on),
                    AttributeTarget::Invert => self.osd.invert(on),
                    AttributeTarget::LocalBackground => self.osd.local_background(on),
                    AttributeTarget::Display => self.osd.display(on)?,
                }
            }
            Opcode::Offset => {
                let mut args = command.arg_parser();
                let horizontal = args.next_int()?;
                let vertical = args.next_int()?;
                self.osd.offset(i32::from(horizontal), i32::from(vertical))?;
            }
            Opcode::Status => {
                let stat = self.osd.status()?;
                response.push_hex(stat)?;
            }
            Opcode::Reset => self.osd.reset()?,
            Opcode::Clear => self.osd.clear()?,
            Opcode::Echo => response.push_bytes(command.args)?,
            Opcode::Millis => response.push_decimal(self.clock.millis())?,
            Opcode::VideoMode => {
                let (vm0, vm1) = self.osd.video_modes()?;
                response.push_hex(vm0)?;
                response.push_bytes(b" ")?;
                response.push_hex(vm1)?;
            }
            Opcode::Heartbeat => {}
            Opcode::Unknown(_) => return Err(Status::Unknown),
        }

        Ok(response)
    }
}
