//! osdlink serial command protocol
//!
//! This crate defines the line protocol a host uses to drive the OSD over a
//! UART. It is deliberately tiny: every request is one ASCII line, every
//! reply is a fixed two-byte trailer.
//!
//! # Protocol Overview
//!
//! Request:
//! ```text
//! ┌────────┬───────────────────────┬──────┐
//! │ OPCODE │ ARGUMENTS             │ NUL  │
//! │ 1B     │ 0–(MAX_LINE_LEN-2)B   │ 1B   │
//! └────────┴───────────────────────┴──────┘
//! ```
//!
//! Response:
//! ```text
//! ┌─────────────┬────────────┬────────┐
//! │ PAYLOAD     │ TERMINATOR │ STATUS │
//! │ 0–N B       │ 0xFF       │ 1B     │
//! └─────────────┴────────────┴────────┘
//! ```
//!
//! Only `s`, `m`, `e` and `v` carry a payload.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod args;
pub mod command;
pub mod line;
pub mod response;

pub use args::{ArgError, ArgParser};
pub use command::{AttributeTarget, Command, Opcode};
pub use line::{Line, LineReader, MAX_LINE_LEN};
pub use response::{Response, ResponseError, Status, FRAME_TERMINATOR, MAX_PAYLOAD_SIZE};
