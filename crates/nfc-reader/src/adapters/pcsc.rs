//! Real hardware via PC/SC (pcscd / WinSCard).
//!
//! Covers ACR122U-class USB contactless readers. The card UID is obtained
//! with the standard GET DATA APDU (`FF CA 00 00 00`) after waiting for
//! card insertion through `SCardGetStatusChange`.

use crate::error::{ReaderError, ScanError};
use crate::port::{NfcReader, ReaderInfo};
use pcsc::{
    Context, Error as PcscError, Protocols, ReaderState, Scope, ShareMode, State, MAX_BUFFER_SIZE,
};
use std::ffi::CString;
use std::time::{Duration, Instant};
use tracing::debug;

/// GET DATA: return the UID of the currently inserted card.
const GET_UID_APDU: [u8; 5] = [0xFF, 0xCA, 0x00, 0x00, 0x00];

/// PC/SC backed reader.
///
/// The `Context` handle is thread-safe; concurrent `probe` calls during a
/// blocking `scan` are allowed by the PC/SC service.
pub struct PcscReader {
    ctx: Context,
}

impl PcscReader {
    /// Establish a PC/SC context. Fails when the smart card service is not
    /// running or the library is missing.
    pub fn open() -> Result<Self, ReaderError> {
        let ctx = Context::establish(Scope::User)
            .map_err(|e| ReaderError::NoDriver(format!("PC/SC unavailable: {e}")))?;
        Ok(Self { ctx })
    }

    /// Name of the first attached reader.
    fn first_reader(&self) -> Result<CString, ReaderError> {
        let mut buf = [0u8; 2048];
        let mut names = self
            .ctx
            .list_readers(&mut buf)
            .map_err(map_list_error)?;
        names
            .next()
            .map(CString::from)
            .ok_or_else(|| ReaderError::NoDevice("no PC/SC reader attached".into()))
    }
}

fn map_list_error(e: PcscError) -> ReaderError {
    match e {
        PcscError::NoReadersAvailable => {
            ReaderError::NoDevice("no PC/SC reader attached".into())
        }
        PcscError::NoService | PcscError::ServiceStopped => {
            ReaderError::NoDriver(format!("PC/SC service not running: {e}"))
        }
        other => ReaderError::Driver(other.to_string()),
    }
}

impl NfcReader for PcscReader {
    fn probe(&self) -> Result<ReaderInfo, ReaderError> {
        let name = self.first_reader()?;
        Ok(ReaderInfo::new("pcsc", name.to_string_lossy()))
    }

    fn scan(&self, timeout: Duration) -> Result<String, ScanError> {
        let name = self
            .first_reader()
            .map_err(|e| ScanError::Driver(e.to_string()))?;

        // Wait for card insertion, re-arming on unrelated state changes
        // until the deadline.
        let deadline = Instant::now() + timeout;
        let mut states = [ReaderState::new(name.clone(), State::UNAWARE)];
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(ScanError::NoCard);
            }
            match self.ctx.get_status_change(remaining, &mut states) {
                Ok(()) => {}
                Err(PcscError::Timeout) => return Err(ScanError::NoCard),
                Err(e) => return Err(ScanError::Driver(e.to_string())),
            }
            if states[0].event_state().contains(State::PRESENT) {
                break;
            }
            states[0].sync_current_state();
        }

        let card = self
            .ctx
            .connect(&name, ShareMode::Shared, Protocols::ANY)
            .map_err(|e| ScanError::Driver(format!("connect failed: {e}")))?;

        let mut recv = [0u8; MAX_BUFFER_SIZE];
        let response = card
            .transmit(&GET_UID_APDU, &mut recv)
            .map_err(|e| ScanError::Driver(format!("UID request failed: {e}")))?;

        // Trailing SW1 SW2 must be 90 00
        if response.len() < 2 {
            return Err(ScanError::Driver("short UID response".into()));
        }
        let (uid, status) = response.split_at(response.len() - 2);
        if status != [0x90, 0x00] {
            return Err(ScanError::Driver(format!(
                "UID request rejected: SW={:02X}{:02X}",
                status[0], status[1]
            )));
        }
        if uid.is_empty() {
            return Err(ScanError::NoCard);
        }

        let serial: String = uid.iter().map(|b| format!("{b:02X}")).collect();
        debug!(serial = %serial, "card UID read");
        Ok(serial)
    }
}
